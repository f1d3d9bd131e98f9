//! Entry-form rules applied before a submission reaches the store.

use serde::{Deserialize, Serialize};

use crate::currency::{Currency, round_cents};
use crate::error::FieldIssue;
use crate::sanitize::sanitize_markup;
use crate::transactions::date::{format_iso_date, parse_iso_date};
use crate::transactions::{NewTransaction, TransactionKind};
use crate::{ClientError, ClientResult};

pub const INCOME_CATEGORIES: [&str; 4] = ["salary", "freelance", "crypto", "other"];
pub const EXPENSE_CATEGORIES: [&str; 4] = ["groceries", "rent", "utilities", "other"];
pub const DESCRIPTION_MAX_CHARS: usize = 100;

pub fn categories_for(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => &INCOME_CATEGORIES,
        TransactionKind::Expense => &EXPENSE_CATEGORIES,
    }
}

/// Form fields exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionForm {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub date: String,
    pub category: String,
    pub description: String,
    pub currency: String,
}

impl TransactionForm {
    /// Checks every field and, when all pass, returns the store candidate with
    /// a sanitized description, a rounded amount and a canonical date.
    pub fn validate(&self) -> ClientResult<NewTransaction> {
        let mut issues = Vec::new();

        let kind = TransactionKind::parse(self.kind.trim());
        if kind.is_none() {
            issues.push(FieldIssue::new("type", "Type is required."));
        }

        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .map(round_cents)
            .filter(|rounded| rounded.is_finite() && *rounded > 0.0);
        if amount.is_none() {
            issues.push(FieldIssue::new("amount", "Amount must be positive."));
        }

        let date = parse_iso_date(self.date.trim());
        if date.is_none() {
            issues.push(FieldIssue::new("date", "Date is required."));
        }

        let category = self.category.trim();
        if category.is_empty() {
            issues.push(FieldIssue::new("category", "Category is required."));
        } else if let Some(kind) = kind
            && !categories_for(kind).contains(&category)
        {
            issues.push(FieldIssue::new(
                "category",
                &format!(
                    "Category must be one of: {}.",
                    categories_for(kind).join(", ")
                ),
            ));
        }

        let description_len = self.description.chars().count();
        if self.description.trim().is_empty() || description_len > DESCRIPTION_MAX_CHARS {
            issues.push(FieldIssue::new(
                "description",
                "Description required (max 100 chars).",
            ));
        }

        let currency = Currency::from_code(self.currency.trim()).ok();
        if currency.is_none() {
            issues.push(FieldIssue::new("currency", "Currency is required."));
        }

        match (kind, amount, date, currency) {
            (Some(kind), Some(amount), Some(date), Some(currency)) if issues.is_empty() => {
                Ok(NewTransaction::new(
                    kind,
                    amount,
                    &format_iso_date(&date),
                    category,
                    currency,
                )
                .with_description(&sanitize_markup(&self.description)))
            }
            _ => Err(ClientError::validation_failed(issues)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TransactionForm;
    use crate::error::VALIDATION_ERROR;

    fn filled() -> TransactionForm {
        TransactionForm {
            kind: "expense".to_string(),
            amount: "19.999".to_string(),
            date: "2024-04-02".to_string(),
            category: "groceries".to_string(),
            description: "<b>Market</b> run".to_string(),
            currency: "EUR".to_string(),
        }
    }

    #[test]
    fn valid_form_produces_normalized_candidate() {
        let candidate = filled().validate();
        assert!(candidate.is_ok());
        if let Ok(value) = candidate {
            assert_eq!(value.amount, Some(20.0));
            assert_eq!(value.date.as_deref(), Some("2024-04-02"));
            assert_eq!(value.description.as_deref(), Some("Market run"));
            assert_eq!(value.currency.as_deref(), Some("EUR"));
        }
    }

    #[test]
    fn category_must_belong_to_the_type() {
        let form = TransactionForm {
            kind: "income".to_string(),
            ..filled()
        };
        let result = form.validate();
        assert!(matches!(result, Err(ref error) if error.is(VALIDATION_ERROR)));
    }

    #[test]
    fn every_failing_field_is_reported() {
        let result = TransactionForm::default().validate();
        assert!(result.is_err());
        if let Err(error) = result
            && let Some(data) = error.data
        {
            let issues = data["issues"].as_array().cloned().unwrap_or_default();
            assert_eq!(issues.len(), 6);
        }
    }

    #[test]
    fn long_descriptions_are_rejected() {
        let form = TransactionForm {
            description: "x".repeat(101),
            ..filled()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn loose_dates_and_zero_amounts_are_rejected() {
        let form = TransactionForm {
            amount: "0".to_string(),
            date: "2024-4-2".to_string(),
            ..filled()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn amounts_that_round_to_zero_are_rejected() {
        let form = TransactionForm {
            amount: "0.004".to_string(),
            ..filled()
        };
        let result = form.validate();
        assert!(result.is_err());
        if let Err(error) = result {
            assert!(error.is(VALIDATION_ERROR));
            assert_eq!(error.message, "Amount must be positive.");
        }
    }
}
