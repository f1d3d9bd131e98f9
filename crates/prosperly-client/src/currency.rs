//! Fixed-rate currency conversion and the persisted user settings record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::kv::KeyValueStore;
use crate::{ClientError, ClientResult};

pub const SETTINGS_KEY: &str = "prosperly_settings";

/// 1 USD = 0.85 EUR. The reverse rate is derived from this one.
const USD_TO_EUR: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Usd, Currency::Eur];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
        }
    }

    pub fn from_code(code: &str) -> ClientResult<Self> {
        match code {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            _ => Err(ClientError::unsupported_currency(code)),
        }
    }

    pub fn rate_to(self, to: Currency) -> f64 {
        match (self, to) {
            (Self::Usd, Self::Eur) => USD_TO_EUR,
            (Self::Eur, Self::Usd) => 1.0 / USD_TO_EUR,
            _ => 1.0,
        }
    }

    pub fn convert(self, amount: f64, to: Currency) -> f64 {
        round_cents(amount * self.rate_to(to))
    }

    /// Like [`Currency::convert`], but fails when the input or the rounded
    /// result is not a finite number, which JSON cannot carry.
    pub fn convert_checked(self, amount: f64, to: Currency) -> ClientResult<f64> {
        let converted = self.convert(amount, to);
        if amount.is_finite() && converted.is_finite() {
            Ok(converted)
        } else {
            Err(ClientError::invalid_field(
                "amount",
                "amount must be a finite number small enough to convert.",
            ))
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = ClientError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_code(value)
    }
}

/// Converts `amount` between two currency codes, rounding to cents.
pub fn convert_amount(amount: f64, from: &str, to: &str) -> ClientResult<f64> {
    let from = Currency::from_code(from)?;
    let to = Currency::from_code(to)?;
    from.convert_checked(amount, to)
}

/// Rounds half away from zero to two fractional digits.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Auto,
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(Self::Auto),
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub currency: Currency,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: Currency::Usd,
            theme: Theme::Auto,
        }
    }
}

impl Settings {
    pub fn parse(currency: &str, theme: &str) -> ClientResult<Self> {
        let parsed_currency = Currency::from_code(currency).ok();
        let parsed_theme = Theme::parse(theme);
        match (parsed_currency, parsed_theme) {
            (Some(currency), Some(theme)) => Ok(Self { currency, theme }),
            _ => Err(ClientError::invalid_settings(currency, theme)),
        }
    }
}

pub struct SettingsStore<S> {
    store: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn get_settings(&self) -> ClientResult<Settings> {
        let Some(raw) = self.store.get(SETTINGS_KEY)? else {
            debug!("no stored settings, using defaults");
            return Ok(Settings::default());
        };
        serde_json::from_str(&raw)
            .map_err(|error| ClientError::storage_unreadable(SETTINGS_KEY, &error.to_string()))
    }

    /// Validates both values and replaces the stored record wholesale.
    pub fn set_settings(&self, currency: &str, theme: &str) -> ClientResult<Settings> {
        let settings = Settings::parse(currency, theme)?;
        let body = serde_json::to_string(&settings)
            .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
        self.store.set(SETTINGS_KEY, &body)?;
        info!(
            currency = settings.currency.as_str(),
            theme = settings.theme.as_str(),
            "settings updated"
        );
        Ok(settings)
    }
}
