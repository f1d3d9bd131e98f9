use std::path::Path;

use crate::ClientResult;
use crate::commands::common::open_home_store;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{
    AddTransactionData, ListFilterEcho, TransactionListData, TransactionRow,
};
use crate::currency::{Currency, SettingsStore};
use crate::transactions::date::format_iso_date;
use crate::transactions::{
    PAGE_SIZE, Transaction, TransactionFilter, TransactionForm, TransactionStore, paginate,
};

/// Raw list arguments; blank values count as unset.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub category: Option<String>,
    pub currency: Option<String>,
    pub page: Option<usize>,
}

pub fn add(form: &TransactionForm) -> ClientResult<SuccessEnvelope> {
    add_with_home_override(None, form)
}

#[doc(hidden)]
pub fn add_with_home_override(
    home_override: Option<&Path>,
    form: &TransactionForm,
) -> ClientResult<SuccessEnvelope> {
    let candidate = form.validate()?;
    let store = open_home_store(home_override)?;
    let transaction = TransactionStore::new(&store).add_transaction(&candidate)?;
    success(
        "add",
        AddTransactionData {
            message: "Transaction saved!".to_string(),
            transaction,
        },
    )
}

pub fn list(query: &ListQuery) -> ClientResult<SuccessEnvelope> {
    list_with_home_override(None, query)
}

#[doc(hidden)]
pub fn list_with_home_override(
    home_override: Option<&Path>,
    query: &ListQuery,
) -> ClientResult<SuccessEnvelope> {
    let filter = TransactionFilter::from_args(
        query.from.as_deref(),
        query.to.as_deref(),
        query.category.as_deref(),
        query.currency.as_deref(),
        "list",
    )?;

    let store = open_home_store(home_override)?;
    let settings = SettingsStore::new(&store).get_settings()?;
    let matched = TransactionStore::new(&store).get_transactions(&filter)?;
    let page = paginate(matched, query.page.unwrap_or(1), PAGE_SIZE);

    let rows = page
        .rows
        .iter()
        .map(|transaction| to_row(transaction, settings.currency))
        .collect::<ClientResult<Vec<_>>>()?;

    success(
        "list",
        TransactionListData {
            filter: ListFilterEcho::from(&filter),
            display_currency: settings.currency,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
            total: page.total,
            rows,
        },
    )
}

fn to_row(transaction: &Transaction, display_currency: Currency) -> ClientResult<TransactionRow> {
    Ok(TransactionRow {
        id: transaction.id.clone(),
        kind: transaction.kind,
        amount: transaction.amount,
        date: format_iso_date(&transaction.date),
        category: transaction.category.clone(),
        description: transaction.description.clone(),
        currency: transaction.currency,
        converted_amount: transaction
            .currency
            .convert_checked(transaction.amount, display_currency)?,
    })
}
