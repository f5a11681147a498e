use super::ui;
use crate::core::conversion::{self, CONVERSION_OPTIONS, EXIT_OPTION};
use crate::core::{ConversionError, ConversionOption, ConversionRequest, RateTable, StateError};
use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

#[derive(Debug, PartialEq)]
enum MenuChoice {
    Convert(&'static ConversionOption),
    Exit,
    Unknown(i32),
}

/// `None` when the line is not a 32-bit integer.
fn parse_choice(line: &str) -> Option<MenuChoice> {
    let number = line.trim().parse::<i32>().ok()?;
    let choice = if i64::from(number) == i64::from(EXIT_OPTION) {
        MenuChoice::Exit
    } else if let Some(option) = conversion::find_option(i64::from(number)) {
        MenuChoice::Convert(option)
    } else {
        MenuChoice::Unknown(number)
    };
    Some(choice)
}

#[derive(Debug, thiserror::Error)]
enum InteractionError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    State(#[from] StateError),
}

/// Runs the interactive menu until the user picks the exit option or the input
/// is closed.
pub fn run<R: BufRead, W: Write>(rates: &RateTable, input: &mut R, output: &mut W) -> Result<()> {
    loop {
        print_menu(output)?;

        let Some(line) = read_line(input)? else {
            debug!("Input closed, leaving menu");
            writeln!(output)?;
            break;
        };

        match parse_choice(&line) {
            None => writeln!(
                output,
                "Entrada no válida. Por favor, ingrese un número del menú."
            )?,
            Some(MenuChoice::Exit) => break,
            Some(MenuChoice::Unknown(number)) => {
                debug!(number, "Unknown menu option");
                writeln!(
                    output,
                    "Opción inválida. Por favor, ingrese un número del 1 al {EXIT_OPTION}."
                )?
            }
            Some(MenuChoice::Convert(option)) => {
                debug!(option = option.number, "Menu option selected");
                match run_conversion(option, rates, input, output) {
                    Ok(()) => {}
                    Err(InteractionError::State(e)) => {
                        warn!(error = %e, "Conversion failed");
                        let message = format!("Ocurrió un error inesperado: {e}");
                        writeln!(output, "{}", ui::style_text(&message, ui::StyleType::Error))?;
                    }
                    Err(InteractionError::Io(e)) => return Err(e.into()),
                }
            }
        }
    }

    writeln!(
        output,
        "Gracias por usar el conversor de monedas. ¡Hasta pronto!"
    )?;
    Ok(())
}

fn print_menu<W: Write>(output: &mut W) -> io::Result<()> {
    writeln!(output, "{}", ui::separator())?;
    writeln!(
        output,
        "{}",
        ui::style_text(&ui::centered("CONVERSOR DE MONEDAS"), ui::StyleType::Title)
    )?;
    writeln!(output, "{}", ui::separator())?;
    for option in &CONVERSION_OPTIONS {
        writeln!(
            output,
            "{}) {} ({}) => {} ({})",
            option.number,
            option.source.name(),
            option.source,
            option.destination.name(),
            option.destination
        )?;
    }
    writeln!(output, "{EXIT_OPTION}) Salir")?;
    writeln!(output, "{}", ui::separator())?;
    write!(output, "Seleccione una opción: ")?;
    output.flush()
}

/// Reads one line, replacing invalid UTF-8 so that it fails to parse like any
/// other bad input instead of ending the session.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

fn run_conversion<R: BufRead, W: Write>(
    option: &ConversionOption,
    rates: &RateTable,
    input: &mut R,
    output: &mut W,
) -> Result<(), InteractionError> {
    write!(
        output,
        "Ingrese la cantidad de {} a convertir: ",
        option.source
    )?;
    output.flush()?;

    let Some(line) = read_line(input)? else {
        writeln!(output)?;
        return Ok(());
    };

    let request = match conversion::parse_amount(&line)
        .and_then(|amount| ConversionRequest::new(option.source, option.destination, amount))
    {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "Rejected amount");
            writeln!(output, "{e}")?;
            return Ok(());
        }
    };

    let converted = match conversion::convert(&request, rates) {
        Ok(converted) => converted,
        Err(ConversionError::State(e)) => return Err(e.into()),
        Err(e @ ConversionError::OutOfRange) => {
            debug!(amount = request.amount(), "Conversion result out of range");
            writeln!(output, "{e}")?;
            return Ok(());
        }
    };
    let line = super::result_line(&request, converted);
    writeln!(output, "{}", ui::style_text(&line, ui::StyleType::Result))?;
    Ok(())
}
