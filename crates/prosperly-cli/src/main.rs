mod cli;
mod dispatch;
mod logging;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use prosperly_client::ClientError;
use prosperly_client::error::STORAGE_ERROR;
use stdout_io::write_stdout_line;

const ROOT_HELP: &str = "Prosperly - personal finance tracker

Usage:
  prosperly <command>

Start here:
  prosperly add --amount 42.15 --category groceries --description \"Weekly shop\"
  prosperly list
  prosperly settings show

Run `prosperly --help` for every command.";

fn main() -> ExitCode {
    logging::init();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_line(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let cli = match cli::Cli::try_parse() {
        Ok(value) => value,
        Err(err) => return Err(report_parse_error(&err, &raw_args)),
    };
    let mode = output::mode_for_command(&cli.command);

    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if let Err(render_error) = output::print_success(&success, mode) {
                tracing::error!(%render_error, command = %success.command, "failed to render output");
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!(code = %error.code, "command failed");
            if let Err(render_error) = output::print_failure(&error, mode) {
                tracing::error!(%render_error, code = %error.code, "failed to render error");
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

/// Help and version requests exit 0; every other parse failure is rendered as
/// an `invalid_argument` error in the requested output mode.
fn report_parse_error(err: &clap::Error, raw_args: &[String]) -> ExitCode {
    if matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    ) {
        if write_stdout_line(err.to_string().trim_end()).is_err() {
            return ExitCode::from(2);
        }
        return ExitCode::SUCCESS;
    }

    let command_hint = command_path_from_args(raw_args);
    let parse_error = ClientError::invalid_argument_for_command(
        &strip_clap_boilerplate(&err.to_string()),
        command_hint,
    );
    let mode = infer_requested_output_mode(raw_args);
    if output::print_failure(&parse_error, mode).is_err() {
        return ExitCode::from(2);
    }
    ExitCode::from(1)
}

/// Drops clap's usage footer so "What to do next" is the only guidance shown.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed
        .trim_start_matches("error: ")
        .trim_end()
        .to_string()
}

fn command_path_from_args(raw_args: &[String]) -> Option<&'static str> {
    let words: Vec<&str> = raw_args
        .iter()
        .skip(1)
        .filter(|value| !value.starts_with('-'))
        .map(String::as_str)
        .collect();

    match words.as_slice() {
        ["add", ..] => Some("add"),
        ["list", ..] => Some("list"),
        ["convert", ..] => Some("convert"),
        ["settings", "show", ..] => Some("settings show"),
        ["settings", "set", ..] => Some("settings set"),
        ["settings", ..] => Some("settings"),
        _ => None,
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if is_internal_error(error) {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn is_internal_error(error: &ClientError) -> bool {
    error.code.starts_with("internal_") || error.code == STORAGE_ERROR
}
