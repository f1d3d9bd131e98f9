use chrono::NaiveDate;
use prosperly_client::error::{DUPLICATE_TRANSACTION, STORAGE_ERROR, VALIDATION_ERROR};
use prosperly_client::transactions::TRANSACTIONS_KEY;
use prosperly_client::{
    Currency, KeyValueStore, MemoryStore, NewTransaction, TransactionFilter, TransactionKind,
    TransactionStore,
};

fn expense(amount: f64, date: &str, category: &str) -> NewTransaction {
    NewTransaction::new(TransactionKind::Expense, amount, date, category, Currency::Usd)
}

fn seed(store: &TransactionStore<&MemoryStore>, candidates: &[NewTransaction]) {
    for candidate in candidates {
        let added = store.add_transaction(candidate);
        assert!(added.is_ok(), "seed failed: {added:?}");
    }
}

#[test]
fn added_transaction_is_returned_exactly_once() {
    let backend = MemoryStore::new();
    let store = TransactionStore::new(&backend);

    let added = store.add_transaction(&expense(42.5, "2024-05-01", "rent").with_description("May"));
    assert!(added.is_ok());
    let all = store.get_transactions(&TransactionFilter::default());
    assert!(all.is_ok());

    if let (Ok(transaction), Ok(rows)) = (added, all) {
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], transaction);
        assert_eq!(rows[0].description, "May");
        assert_eq!(rows[0].kind, TransactionKind::Expense);
    }
}

#[test]
fn duplicate_submission_leaves_one_record() {
    let backend = MemoryStore::new();
    let store = TransactionStore::new(&backend);
    let candidate = expense(9.99, "2024-06-10", "utilities");

    assert!(store.add_transaction(&candidate).is_ok());
    let second = store.add_transaction(&candidate);
    assert!(second.is_err());
    if let Err(error) = second {
        assert!(error.is(DUPLICATE_TRANSACTION));
        assert_eq!(error.message, "Duplicate transaction");
    }

    let rows = store.get_transactions(&TransactionFilter::default());
    assert!(matches!(rows, Ok(ref values) if values.len() == 1));
}

#[test]
fn duplicates_match_on_rounded_amount_and_utc_day() {
    let backend = MemoryStore::new();
    let store = TransactionStore::new(&backend);
    seed(&store, &[expense(10.0, "2024-06-10", "rent")]);

    let same_instant = expense(10.001, "2024-06-10T00:00:30Z", "rent");
    assert!(matches!(store.check_duplicate(&same_instant), Ok(true)));

    let offset_midnight = expense(10.0, "2024-06-10T02:00:00+02:00", "rent");
    assert!(matches!(store.check_duplicate(&offset_midnight), Ok(true)));

    let later_that_day = expense(10.0, "2024-06-10T12:00:00Z", "rent");
    assert!(matches!(store.check_duplicate(&later_that_day), Ok(false)));

    let other_currency = NewTransaction::new(
        TransactionKind::Expense,
        10.0,
        "2024-06-10",
        "rent",
        Currency::Eur,
    );
    assert!(matches!(store.check_duplicate(&other_currency), Ok(false)));

    let income = NewTransaction::new(
        TransactionKind::Income,
        10.0,
        "2024-06-10",
        "rent",
        Currency::Usd,
    );
    assert!(matches!(store.check_duplicate(&income), Ok(false)));
}

#[test]
fn date_range_filter_selects_middle_record() {
    let backend = MemoryStore::new();
    let store = TransactionStore::new(&backend);
    seed(
        &store,
        &[
            expense(1.0, "2024-01-01", "rent"),
            expense(2.0, "2024-01-15", "rent"),
            expense(3.0, "2024-02-01", "rent"),
        ],
    );

    let filter = TransactionFilter {
        start_date: NaiveDate::from_ymd_opt(2024, 1, 10),
        end_date: NaiveDate::from_ymd_opt(2024, 1, 31),
        ..TransactionFilter::default()
    };
    let rows = store.get_transactions(&filter);
    assert!(rows.is_ok());
    if let Ok(values) = rows {
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].amount, 2.0);
        assert_eq!(values[0].date.to_string(), "2024-01-15");
    }
}

#[test]
fn category_and_currency_filters_are_exact() {
    let backend = MemoryStore::new();
    let store = TransactionStore::new(&backend);
    seed(
        &store,
        &[
            expense(1.0, "2024-01-01", "rent"),
            expense(2.0, "2024-01-02", "Rent"),
            NewTransaction::new(
                TransactionKind::Expense,
                3.0,
                "2024-01-03",
                "rent",
                Currency::Eur,
            ),
        ],
    );

    let filter = TransactionFilter {
        category: Some("rent".to_string()),
        currency: Some(Currency::Usd),
        ..TransactionFilter::default()
    };
    let rows = store.get_transactions(&filter);
    assert!(matches!(rows, Ok(ref values) if values.len() == 1 && values[0].amount == 1.0));
}

#[test]
fn empty_store_returns_empty_list() {
    let backend = MemoryStore::new();
    let store = TransactionStore::new(&backend);
    let rows = store.get_transactions(&TransactionFilter {
        category: Some("rent".to_string()),
        ..TransactionFilter::default()
    });
    assert!(matches!(rows, Ok(ref values) if values.is_empty()));
}

#[test]
fn missing_fields_fail_without_writing() {
    let backend = MemoryStore::new();
    let store = TransactionStore::new(&backend);
    let candidate = NewTransaction {
        category: None,
        ..expense(5.0, "2024-01-01", "rent")
    };

    let result = store.add_transaction(&candidate);
    assert!(matches!(result, Err(ref error) if error.is(VALIDATION_ERROR)));
    assert!(matches!(backend.get(TRANSACTIONS_KEY), Ok(None)));
}

#[test]
fn corrupt_storage_is_reported_not_reset() {
    let backend = MemoryStore::new();
    assert!(backend.set(TRANSACTIONS_KEY, "{not json").is_ok());
    let store = TransactionStore::new(&backend);

    let read = store.get_transactions(&TransactionFilter::default());
    assert!(matches!(read, Err(ref error) if error.is(STORAGE_ERROR)));

    let write = store.add_transaction(&expense(5.0, "2024-01-01", "rent"));
    assert!(matches!(write, Err(ref error) if error.is(STORAGE_ERROR)));

    let untouched = backend.get(TRANSACTIONS_KEY);
    assert!(matches!(untouched, Ok(Some(ref raw)) if raw == "{not json"));
}

#[test]
fn insertion_order_is_preserved_in_persisted_json() {
    let backend = MemoryStore::new();
    let store = TransactionStore::new(&backend);
    seed(
        &store,
        &[
            expense(3.0, "2024-03-01", "rent"),
            expense(1.0, "2024-01-01", "rent"),
        ],
    );

    let raw = backend.get(TRANSACTIONS_KEY);
    assert!(matches!(raw, Ok(Some(_))));
    if let Ok(Some(body)) = raw {
        let parsed: Result<serde_json::Value, _> = serde_json::from_str(&body);
        assert!(parsed.is_ok());
        if let Ok(value) = parsed {
            assert_eq!(value[0]["date"], "2024-03-01");
            assert_eq!(value[0]["type"], "expense");
            assert_eq!(value[0]["currency"], "USD");
            assert_eq!(value[1]["date"], "2024-01-01");
        }
    }
}

#[test]
fn overflowing_amount_is_rejected_and_store_stays_readable() {
    let backend = MemoryStore::new();
    let store = TransactionStore::new(&backend);
    seed(&store, &[expense(5.0, "2024-01-01", "rent")]);

    let huge = store.add_transaction(&expense(1e307, "2024-01-02", "rent"));
    assert!(matches!(huge, Err(ref error) if error.is(VALIDATION_ERROR)));

    let converts_out_of_range = NewTransaction::new(
        TransactionKind::Expense,
        1.6e306,
        "2024-01-03",
        "rent",
        Currency::Eur,
    );
    let rejected = store.add_transaction(&converts_out_of_range);
    assert!(matches!(rejected, Err(ref error) if error.is(VALIDATION_ERROR)));

    let rows = store.get_transactions(&TransactionFilter::default());
    assert!(matches!(rows, Ok(ref values) if values.len() == 1 && values[0].amount == 5.0));
    let raw = backend.get(TRANSACTIONS_KEY);
    assert!(matches!(raw, Ok(Some(ref body)) if !body.contains("null")));
}
