pub mod common;
pub mod convert;
pub mod settings;
pub mod transactions;
