use std::path::Path;

use crate::ClientResult;
use crate::commands::common::open_home_store;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::SettingsData;
use crate::currency::SettingsStore;

pub fn show() -> ClientResult<SuccessEnvelope> {
    show_with_home_override(None)
}

#[doc(hidden)]
pub fn show_with_home_override(home_override: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    let store = open_home_store(home_override)?;
    let settings = SettingsStore::new(&store).get_settings()?;
    success(
        "settings show",
        SettingsData {
            message: None,
            settings,
        },
    )
}

pub fn set(currency: &str, theme: &str) -> ClientResult<SuccessEnvelope> {
    set_with_home_override(None, currency, theme)
}

#[doc(hidden)]
pub fn set_with_home_override(
    home_override: Option<&Path>,
    currency: &str,
    theme: &str,
) -> ClientResult<SuccessEnvelope> {
    let store = open_home_store(home_override)?;
    let settings = SettingsStore::new(&store).set_settings(currency, theme)?;
    success(
        "settings set",
        SettingsData {
            message: Some("Settings saved.".to_string()),
            settings,
        },
    )
}
