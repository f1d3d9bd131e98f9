use serde::Serialize;

use crate::currency::{Currency, Settings};
use crate::transactions::{Transaction, TransactionFilter, TransactionKind};

#[derive(Debug, Clone, Serialize)]
pub struct AddTransactionData {
    pub message: String,
    pub transaction: Transaction,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub date: String,
    pub category: String,
    pub description: String,
    pub currency: Currency,
    /// `amount` expressed in the preferred settings currency.
    pub converted_amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListFilterEcho {
    pub from: Option<String>,
    pub to: Option<String>,
    pub category: Option<String>,
    pub currency: Option<Currency>,
}

impl From<&TransactionFilter> for ListFilterEcho {
    fn from(filter: &TransactionFilter) -> Self {
        Self {
            from: filter.start_date.map(|date| date.to_string()),
            to: filter.end_date.map(|date| date.to_string()),
            category: filter.category.clone(),
            currency: filter.currency,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionListData {
    pub filter: ListFilterEcho,
    pub display_currency: Currency,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total: usize,
    pub rows: Vec<TransactionRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversionData {
    pub amount: f64,
    pub from: Currency,
    pub to: Currency,
    pub rate: f64,
    pub converted: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SettingsData {
    pub message: Option<String>,
    pub settings: Settings,
}
