use chrono::NaiveDate;
use serde::Serialize;

use crate::currency::Currency;
use crate::transactions::Transaction;
use crate::transactions::date::parse_iso_date;
use crate::{ClientError, ClientResult};

/// Conjunctive filter over stored transactions. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransactionFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub currency: Option<Currency>,
}

impl TransactionFilter {
    /// Builds a filter from raw text, treating blank values as unset.
    ///
    /// Dates and currency codes are parsed after trimming; a non-blank
    /// category is kept verbatim since it must match exactly.
    pub fn from_args(
        start_date: Option<&str>,
        end_date: Option<&str>,
        category: Option<&str>,
        currency: Option<&str>,
        command: &str,
    ) -> ClientResult<Self> {
        Ok(Self {
            start_date: parse_bound(start_date, "from", command)?,
            end_date: parse_bound(end_date, "to", command)?,
            category: category
                .filter(|text| !text.trim().is_empty())
                .map(str::to_string),
            currency: match non_empty(currency) {
                Some(code) => Some(Currency::from_code(code).map_err(|_| {
                    ClientError::invalid_argument_for_command(
                        &format!("`currency` must be USD or EUR; got \"{code}\"."),
                        Some(command),
                    )
                })?),
                None => None,
            },
        })
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(start) = self.start_date
            && transaction.date < start
        {
            return false;
        }
        if let Some(end) = self.end_date
            && transaction.date > end
        {
            return false;
        }
        if let Some(category) = self.category.as_deref()
            && transaction.category != category
        {
            return false;
        }
        if let Some(currency) = self.currency
            && transaction.currency != currency
        {
            return false;
        }
        true
    }

    pub fn apply(&self, transactions: Vec<Transaction>) -> Vec<Transaction> {
        transactions
            .into_iter()
            .filter(|transaction| self.matches(transaction))
            .collect()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

fn parse_bound(value: Option<&str>, field_name: &str, command: &str) -> ClientResult<Option<NaiveDate>> {
    let Some(text) = non_empty(value) else {
        return Ok(None);
    };
    parse_iso_date(text).map(Some).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with a real calendar date."),
            Some(command),
        )
    })
}
