use chrono::{DateTime, Utc};

use crate::currency::{Currency, round_cents};
use crate::error::FieldIssue;
use crate::transactions::date::parse_instant;
use crate::transactions::{NewTransaction, TransactionKind};
use crate::{ClientError, ClientResult};

/// A candidate whose required fields are present and parseable.
///
/// `amount` and `instant` keep their submitted precision; normalization
/// happens only when the record is built for storage.
#[derive(Debug, Clone)]
pub(crate) struct ValidatedCandidate {
    pub(crate) kind: TransactionKind,
    pub(crate) amount: f64,
    pub(crate) instant: DateTime<Utc>,
    pub(crate) category: String,
    pub(crate) description: String,
    pub(crate) currency: Currency,
}

pub(crate) fn validate_candidate(candidate: &NewTransaction) -> ClientResult<ValidatedCandidate> {
    let kind = present(candidate.kind.as_deref());
    let amount = candidate
        .amount
        .filter(|value| *value != 0.0 && !value.is_nan());
    let date = present(candidate.date.as_deref());
    let category = present(candidate.category.as_deref());
    let currency = present(candidate.currency.as_deref());

    let (Some(kind), Some(amount), Some(date), Some(category), Some(currency)) =
        (kind, amount, date, category, currency)
    else {
        let mut missing = Vec::new();
        if kind.is_none() {
            missing.push("type");
        }
        if amount.is_none() {
            missing.push("amount");
        }
        if date.is_none() {
            missing.push("date");
        }
        if category.is_none() {
            missing.push("category");
        }
        if currency.is_none() {
            missing.push("currency");
        }
        return Err(ClientError::missing_required_fields(&missing));
    };

    let mut issues = Vec::new();

    let parsed_kind = TransactionKind::parse(kind);
    if parsed_kind.is_none() {
        issues.push(FieldIssue::new(
            "type",
            &format!("type must be income or expense; got \"{kind}\""),
        ));
    }

    let instant = parse_instant(date);
    if instant.is_none() {
        issues.push(FieldIssue::new(
            "date",
            &format!("date must be YYYY-MM-DD or an ISO-8601 timestamp; got \"{date}\""),
        ));
    }

    let parsed_currency = Currency::from_code(currency).ok();
    if parsed_currency.is_none() {
        issues.push(FieldIssue::new(
            "currency",
            &format!("currency must be USD or EUR; got \"{currency}\""),
        ));
    }

    let rounded = round_cents(amount);
    if !(rounded.is_finite() && rounded > 0.0) {
        issues.push(FieldIssue::new(
            "amount",
            "amount must be a positive number of at least 0.01.",
        ));
    } else if let Some(currency) = parsed_currency
        && !Currency::ALL
            .iter()
            .all(|to| currency.convert(rounded, *to).is_finite())
    {
        issues.push(FieldIssue::new(
            "amount",
            "amount is too large to store and convert.",
        ));
    }

    match (parsed_kind, instant, parsed_currency) {
        (Some(kind), Some(instant), Some(currency)) if issues.is_empty() => {
            Ok(ValidatedCandidate {
                kind,
                amount,
                instant,
                category: category.to_string(),
                description: candidate.description.clone().unwrap_or_default(),
                currency,
            })
        }
        _ => Err(ClientError::validation_failed(issues)),
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}
