pub mod commands;
pub mod contracts;
pub mod currency;
pub mod error;
pub mod kv;
pub mod sanitize;
pub mod state;
pub mod transactions;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use currency::{Currency, Settings, SettingsStore, Theme, convert_amount};
pub use error::{ClientError, ClientResult};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use transactions::{
    NewTransaction, Transaction, TransactionFilter, TransactionKind, TransactionStore,
};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
