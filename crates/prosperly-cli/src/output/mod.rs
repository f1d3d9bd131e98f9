mod convert_text;
mod error_text;
mod json;
mod mode;
mod settings_text;
mod transactions_text;

use std::io;

use prosperly_client::{ClientError, SuccessEnvelope};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "add" => transactions_text::render_add(&success.data),
        "list" => transactions_text::render_list(&success.data),
        "convert" => convert_text::render_conversion(&success.data),
        "settings show" | "settings set" => settings_text::render_settings(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}

/// Reads a command payload back into the view type its renderer expects.
fn read_view<T>(data: &Value) -> io::Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(data).map_err(io::Error::other)
}
