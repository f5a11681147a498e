use super::ui;
use crate::core::{RateProvider, RateTable};
use anyhow::Result;
use comfy_table::Cell;
use std::io::Write;

impl RateTable {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Moneda"),
            ui::header_cell("Nombre"),
            ui::header_cell(&format!("Tasa (1 {})", self.base())),
        ]);

        for (currency, rate) in self.iter() {
            table.add_row(vec![
                Cell::new(currency.code()),
                Cell::new(currency.name()),
                ui::rate_cell(rate),
            ]);
        }

        let mut out = table.to_string();
        if let Some(updated) = self.updated_at() {
            let footer = format!(
                "Última actualización del proveedor: {}",
                updated.format("%Y-%m-%d %H:%M UTC")
            );
            out.push('\n');
            out.push_str(&ui::style_text(&footer, ui::StyleType::Subtle));
        }
        out
    }
}

/// Loads the rates once and prints them.
pub async fn run<W: Write>(provider: &dyn RateProvider, output: &mut W) -> Result<()> {
    let rates = super::load_rates(provider, output).await?;
    writeln!(output, "{}", rates.display_as_table())?;
    Ok(())
}
