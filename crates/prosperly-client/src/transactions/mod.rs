//! Durable transaction collection with duplicate-safe insertion and
//! conjunctive filtered retrieval.

pub mod date;
pub(crate) mod dedupe;
pub mod filter;
pub mod form;
pub mod page;
pub(crate) mod validate;

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ulid::Ulid;

use crate::currency::{Currency, round_cents};
use crate::kv::KeyValueStore;
use crate::{ClientError, ClientResult};

pub use filter::TransactionFilter;
pub use form::TransactionForm;
pub use page::{PAGE_SIZE, Page, paginate};

pub const TRANSACTIONS_KEY: &str = "prosperly_transactions";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub date: NaiveDate,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub currency: Currency,
}

/// A transaction as submitted, before an id is assigned.
///
/// Every field is optional so that missing values can be reported instead of
/// failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub currency: Option<String>,
}

impl NewTransaction {
    pub fn new(
        kind: TransactionKind,
        amount: f64,
        date: &str,
        category: &str,
        currency: Currency,
    ) -> Self {
        Self {
            kind: Some(kind.as_str().to_string()),
            amount: Some(amount),
            date: Some(date.to_string()),
            category: Some(category.to_string()),
            description: None,
            currency: Some(currency.as_str().to_string()),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

pub struct TransactionStore<S> {
    store: S,
}

impl<S: KeyValueStore> TransactionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates, rejects duplicates, then appends and rewrites the whole
    /// collection. Nothing is written when any check fails.
    pub fn add_transaction(&self, candidate: &NewTransaction) -> ClientResult<Transaction> {
        let validated = validate::validate_candidate(candidate)?;
        let mut transactions = self.load_all()?;

        if let Some(existing) = dedupe::find_duplicate(&transactions, &validated) {
            warn!(
                matched_id = %existing.id,
                kind = validated.kind.as_str(),
                category = %validated.category,
                "rejected duplicate transaction"
            );
            return Err(ClientError::duplicate_transaction(&existing.id));
        }

        let transaction = Transaction {
            id: format!("txn_{}", Ulid::new()),
            kind: validated.kind,
            amount: round_cents(validated.amount),
            date: validated.instant.date_naive(),
            category: validated.category,
            description: validated.description,
            currency: validated.currency,
        };
        transactions.push(transaction.clone());
        self.save_all(&transactions)?;

        info!(
            id = %transaction.id,
            kind = transaction.kind.as_str(),
            amount = transaction.amount,
            currency = transaction.currency.as_str(),
            total = transactions.len(),
            "transaction added"
        );
        Ok(transaction)
    }

    pub fn get_transactions(&self, filter: &TransactionFilter) -> ClientResult<Vec<Transaction>> {
        let transactions = self.load_all()?;
        let loaded = transactions.len();
        let matched = filter.apply(transactions);
        debug!(loaded, matched = matched.len(), "filtered transactions");
        Ok(matched)
    }

    pub fn check_duplicate(&self, candidate: &NewTransaction) -> ClientResult<bool> {
        let validated = validate::validate_candidate(candidate)?;
        let transactions = self.load_all()?;
        Ok(dedupe::find_duplicate(&transactions, &validated).is_some())
    }

    fn load_all(&self) -> ClientResult<Vec<Transaction>> {
        let Some(raw) = self.store.get(TRANSACTIONS_KEY)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|error| {
            warn!(%error, "stored transactions are not valid JSON");
            ClientError::storage_unreadable(TRANSACTIONS_KEY, &error.to_string())
        })
    }

    fn save_all(&self, transactions: &[Transaction]) -> ClientResult<()> {
        let body = serde_json::to_string(transactions)
            .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
        self.store.set(TRANSACTIONS_KEY, &body)
    }
}
