use std::path::Path;

use crate::ClientResult;
use crate::commands::common::open_home_store;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ConversionData;
use crate::currency::{Currency, SettingsStore};

/// Converts `amount`; without `to` the preferred settings currency is used.
pub fn run(amount: f64, from: &str, to: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_home_override(None, amount, from, to)
}

#[doc(hidden)]
pub fn run_with_home_override(
    home_override: Option<&Path>,
    amount: f64,
    from: &str,
    to: Option<&str>,
) -> ClientResult<SuccessEnvelope> {
    let from_currency = Currency::from_code(from)?;
    let to_currency = match to {
        Some(code) => Currency::from_code(code)?,
        None => {
            let store = open_home_store(home_override)?;
            SettingsStore::new(&store).get_settings()?.currency
        }
    };

    let converted = from_currency.convert_checked(amount, to_currency)?;
    success(
        "convert",
        ConversionData {
            amount,
            from: from_currency,
            to: to_currency,
            rate: from_currency.rate_to(to_currency),
            converted,
        },
    )
}
