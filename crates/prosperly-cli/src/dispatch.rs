use chrono::Utc;
use prosperly_client::commands;
use prosperly_client::commands::transactions::ListQuery;
use prosperly_client::transactions::TransactionForm;
use prosperly_client::{ClientResult, SuccessEnvelope};

use crate::cli::{AddArgs, Cli, Commands, SettingsCommand};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Add(args) => commands::transactions::add(&build_form(args)),
        Commands::List {
            from,
            to,
            category,
            currency,
            page,
            ..
        } => commands::transactions::list(&ListQuery {
            from: from.as_ref().map(|value| value.as_str().to_string()),
            to: to.as_ref().map(|value| value.as_str().to_string()),
            category: category.clone(),
            currency: currency.clone(),
            page: *page,
        }),
        Commands::Convert {
            amount, from, to, ..
        } => commands::convert::run(*amount, from, to.as_deref()),
        Commands::Settings { command } => match command {
            SettingsCommand::Show { .. } => commands::settings::show(),
            SettingsCommand::Set {
                currency, theme, ..
            } => commands::settings::set(currency, theme),
        },
    }
}

/// Maps `add` arguments onto the entry form, defaulting the date to today (UTC).
pub fn build_form(args: &AddArgs) -> TransactionForm {
    TransactionForm {
        kind: args.kind.clone(),
        amount: args.amount.clone(),
        date: args
            .date
            .as_ref()
            .map(|date| date.as_str().to_string())
            .unwrap_or_else(today_utc),
        category: args.category.clone(),
        description: args.description.clone(),
        currency: args.currency.clone(),
    }
}

fn today_utc() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}
