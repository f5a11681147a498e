use std::fs;
use std::io::Cursor;
use tracing::{error, info};

use conversor::config::{AppConfig, ProviderConfig};
use conversor::core::Currency;
use conversor::providers::ExchangeRateApiProvider;

mod test_utils {
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const API_KEY: &str = "integration-key";

    pub async fn create_mock_server(template: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;
        let url_path = format!("/v6/{API_KEY}/latest/USD");

        Mock::given(method("GET"))
            .and(path(&url_path))
            .respond_with(template)
            .expect(1)
            .mount(&mock_server)
            .await;

        mock_server
    }

    /// Accepts any API key, since `CONVERSOR_API_KEY` replaces the one in a
    /// config file.
    pub async fn create_any_key_mock_server(template: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/v6/[^/]+/latest/USD$"))
            .respond_with(template)
            .expect(1)
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn success_body() -> String {
        r#"{
            "result": "success",
            "base_code": "USD",
            "time_last_update_unix": 1700000000,
            "conversion_rates": {
                "USD": 1,
                "ARS": 1000,
                "BRL": 5,
                "COP": 4000,
                "EUR": 0.92
            }
        }"#
        .to_string()
    }
}

fn provider_for(server: &wiremock::MockServer) -> ExchangeRateApiProvider {
    let config = ProviderConfig {
        base_url: server.uri(),
        api_key: test_utils::API_KEY.to_string(),
        timeout_secs: 10,
    };
    ExchangeRateApiProvider::new(&config, Currency::Usd).expect("Failed to build provider")
}

#[test_log::test(tokio::test)]
async fn test_full_interactive_session_with_mock() {
    let mock_server = test_utils::create_mock_server(
        wiremock::ResponseTemplate::new(200).set_body_string(test_utils::success_body()),
    )
    .await;
    let provider = provider_for(&mock_server);

    let mut input = Cursor::new(b"1\n10\nabc\n3\n-2\n6\n4000\n9\n7\n".to_vec());
    let mut output = Vec::new();

    let result = conversor::run_interactive(&provider, &mut input, &mut output).await;
    assert!(result.is_ok(), "Session failed with: {:?}", result.err());

    let text = String::from_utf8(output).unwrap();
    info!(%text, "Session transcript");
    assert!(text.contains("Tasas cargadas con éxito. Base: USD"));
    assert!(text.contains("Resultado: 10.00 USD equivalen a 10000.00 ARS"));
    assert!(text.contains("Entrada no válida. Por favor, ingrese un número del menú."));
    assert!(text.contains("La cantidad a convertir debe ser un valor positivo."));
    assert!(text.contains("Resultado: 4000.00 COP equivalen a 1.00 USD"));
    assert!(text.contains("Opción inválida. Por favor, ingrese un número del 1 al 7."));
    assert!(text.ends_with("Gracias por usar el conversor de monedas. ¡Hasta pronto!\n"));
}

#[test_log::test(tokio::test)]
async fn test_not_found_aborts_before_menu() {
    let mock_server =
        test_utils::create_mock_server(wiremock::ResponseTemplate::new(404)).await;
    let provider = provider_for(&mock_server);

    let mut input = Cursor::new(b"1\n10\n7\n".to_vec());
    let mut output = Vec::new();

    let result = conversor::run_interactive(&provider, &mut input, &mut output).await;
    match &result {
        Err(e) => error!("Startup failed as expected: {e}"),
        Ok(()) => panic!("Startup should fail on HTTP 404"),
    }
    let err = result.unwrap_err();
    assert!(err.to_string().contains("404"));
    assert!(conversor::cli::is_reported(&err));

    let text = String::from_utf8(output).unwrap();
    assert!(!text.contains("CONVERSOR DE MONEDAS"));
    assert!(!text.contains("Seleccione una opción"));
}

#[test_log::test(tokio::test)]
async fn test_unsuccessful_result_aborts_before_menu() {
    let mock_server = test_utils::create_mock_server(
        wiremock::ResponseTemplate::new(200)
            .set_body_string(r#"{"result": "error", "error-type": "quota-reached"}"#),
    )
    .await;
    let provider = provider_for(&mock_server);

    let mut input = Cursor::new(b"7\n".to_vec());
    let mut output = Vec::new();

    let result = conversor::run_interactive(&provider, &mut input, &mut output).await;
    let err = result.expect_err("Startup should fail on a non-success result");
    assert!(err.to_string().contains("quota-reached"));

    let text = String::from_utf8(output).unwrap();
    assert!(!text.contains("CONVERSOR DE MONEDAS"));
}

#[test_log::test(tokio::test)]
async fn test_rates_command_with_config_file() {
    let mock_server = test_utils::create_any_key_mock_server(
        wiremock::ResponseTemplate::new(200).set_body_string(test_utils::success_body()),
    )
    .await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_path = config_file.path();
    let config_content = format!(
        r#"
        provider:
          base_url: "{}"
          api_key: "{}"
          timeout_secs: 5
        base_currency: "USD"
    "#,
        mock_server.uri(),
        test_utils::API_KEY
    );
    fs::write(config_path, &config_content).expect("Failed to write config file");

    let loaded = AppConfig::load_from_path(config_path).expect("Failed to load config");
    assert_eq!(loaded.provider.timeout_secs, 5);

    let result = conversor::run_command(
        conversor::AppCommand::Rates,
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Rates command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_is_an_error() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let missing = dir.path().join("absent.yaml");

    let result = conversor::run_command(
        conversor::AppCommand::Rates,
        Some(missing.to_str().unwrap()),
    )
    .await;
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Failed to read config file")
    );
}
