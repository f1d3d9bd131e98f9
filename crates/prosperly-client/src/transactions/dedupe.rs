use chrono::{DateTime, Utc};

use crate::currency::round_cents;
use crate::transactions::date::midnight_utc;
use crate::transactions::Transaction;
use crate::transactions::validate::ValidatedCandidate;

pub(crate) fn find_duplicate<'a>(
    existing: &'a [Transaction],
    candidate: &ValidatedCandidate,
) -> Option<&'a Transaction> {
    existing
        .iter()
        .find(|transaction| is_duplicate(transaction, candidate))
}

fn is_duplicate(transaction: &Transaction, candidate: &ValidatedCandidate) -> bool {
    transaction.kind == candidate.kind
        && round_cents(transaction.amount) == round_cents(candidate.amount)
        && transaction.category == candidate.category
        && transaction.currency == candidate.currency
        && midnight_utc(transaction.date)
            .is_some_and(|stored| within_duplicate_window(stored, candidate.instant))
}

/// True when the whole-minute difference, truncated toward zero, is zero.
pub(crate) fn within_duplicate_window(left: DateTime<Utc>, right: DateTime<Utc>) -> bool {
    (left - right).num_minutes() == 0
}
