use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

static TEST_COUNTER: AtomicU64 = AtomicU64::new(1);

struct Outcome {
    code: Option<i32>,
    stdout: String,
}

impl Outcome {
    fn json(&self) -> Value {
        let parsed = serde_json::from_str::<Value>(&self.stdout);
        assert!(parsed.is_ok(), "stdout was not JSON: {}", self.stdout);
        parsed.unwrap_or(Value::Null)
    }
}

fn unique_test_home() -> PathBuf {
    let mut path = std::env::temp_dir();
    let stamp = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(value) => value.as_nanos(),
        Err(_) => 0,
    };
    let sequence = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!(
        "prosperly-cli-test-{}-{stamp}-{sequence}",
        std::process::id()
    ));
    path
}

fn run_cli_in_home(home: &Path, args: &[&str]) -> Outcome {
    let output = Command::new(env!("CARGO_BIN_EXE_prosperly"))
        .args(args)
        .env("PROSPERLY_HOME", home)
        .env_remove("PROSPERLY_LOG")
        .output();
    assert!(output.is_ok(), "failed to spawn prosperly");
    match output {
        Ok(value) => Outcome {
            code: value.status.code(),
            stdout: String::from_utf8_lossy(&value.stdout).to_string(),
        },
        Err(_) => Outcome {
            code: None,
            stdout: String::new(),
        },
    }
}

const GROCERIES: [&str; 11] = [
    "add",
    "--amount",
    "42.155",
    "--date",
    "2024-05-02",
    "--category",
    "groceries",
    "--description",
    "<b>Weekly</b> shop",
    "--currency",
    "EUR",
];

fn with_json<'a>(args: &[&'a str]) -> Vec<&'a str> {
    let mut values = args.to_vec();
    values.push("--json");
    values
}

#[test]
fn bare_invocation_prints_root_help() {
    let home = unique_test_home();
    let outcome = run_cli_in_home(&home, &[]);
    assert_eq!(outcome.code, Some(0));
    assert!(outcome.stdout.starts_with("Prosperly - personal finance tracker"));
}

#[test]
fn added_transaction_is_listed() {
    let home = unique_test_home();

    let added = run_cli_in_home(&home, &with_json(&GROCERIES));
    assert_eq!(added.code, Some(0), "{}", added.stdout);
    let added_json = added.json();
    assert_eq!(added_json["ok"], Value::Bool(true));
    assert_eq!(added_json["data"]["message"], "Transaction saved!");
    assert_eq!(added_json["data"]["transaction"]["description"], "Weekly shop");

    let listed = run_cli_in_home(&home, &["list", "--json"]);
    assert_eq!(listed.code, Some(0));
    let listed_json = listed.json();
    assert_eq!(listed_json["data"]["total"], 1);
    assert_eq!(listed_json["data"]["display_currency"], "USD");
    let row = &listed_json["data"]["rows"][0];
    assert_eq!(row["type"], "expense");
    assert_eq!(row["date"], "2024-05-02");
    assert_eq!(row["currency"], "EUR");
    assert_eq!(row["id"], added_json["data"]["transaction"]["id"]);

    let text = run_cli_in_home(&home, &["list"]);
    assert_eq!(text.code, Some(0));
    assert!(text.stdout.contains("Groceries"));
    assert!(text.stdout.contains("Page 1 of 1 (1 total)"));

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn duplicate_add_is_rejected_with_user_error() {
    let home = unique_test_home();

    assert_eq!(run_cli_in_home(&home, &GROCERIES).code, Some(0));
    let second = run_cli_in_home(&home, &with_json(&GROCERIES));
    assert_eq!(second.code, Some(1));
    let body = second.json();
    assert_eq!(body["ok"], Value::Bool(false));
    assert_eq!(body["error"]["code"], "duplicate_transaction");

    let listed = run_cli_in_home(&home, &["list", "--json"]);
    assert_eq!(listed.json()["data"]["total"], 1);

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn invalid_form_reports_every_field() {
    let home = unique_test_home();
    let outcome = run_cli_in_home(
        &home,
        &[
            "add",
            "--type",
            "income",
            "--amount=-3",
            "--category",
            "rent",
            "--description",
            "",
        ],
    );
    assert_eq!(outcome.code, Some(1));
    assert!(outcome.stdout.contains("Error:    validation_error"));
    assert!(outcome.stdout.contains("- amount:"));
    assert!(outcome.stdout.contains("- category:"));
    assert!(outcome.stdout.contains("- description:"));
    assert!(!home.join("prosperly_transactions.json").exists());
}

#[test]
fn unsupported_settings_keep_previous_values() {
    let home = unique_test_home();

    let fresh = run_cli_in_home(&home, &["settings", "show", "--json"]);
    assert_eq!(fresh.code, Some(0));
    assert_eq!(fresh.json()["data"]["settings"]["currency"], "USD");
    assert_eq!(fresh.json()["data"]["settings"]["theme"], "auto");

    let saved = run_cli_in_home(
        &home,
        &["settings", "set", "--currency", "EUR", "--theme", "dark"],
    );
    assert_eq!(saved.code, Some(0));
    assert!(saved.stdout.starts_with("Settings saved."));

    let rejected = run_cli_in_home(
        &home,
        &[
            "settings", "set", "--currency", "GBP", "--theme", "dark", "--json",
        ],
    );
    assert_eq!(rejected.code, Some(1));
    assert_eq!(rejected.json()["error"]["code"], "validation_error");

    let current = run_cli_in_home(&home, &["settings", "show", "--json"]);
    assert_eq!(current.json()["data"]["settings"]["currency"], "EUR");
    assert_eq!(current.json()["data"]["settings"]["theme"], "dark");

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn convert_uses_fixed_rates_and_preferred_currency() {
    let home = unique_test_home();

    let explicit = run_cli_in_home(&home, &["convert", "100", "--from", "USD", "--to", "EUR"]);
    assert_eq!(explicit.code, Some(0));
    assert!(explicit.stdout.starts_with("100.00 USD = 85.00 EUR"));

    let implicit = run_cli_in_home(&home, &["convert", "10", "--from", "EUR", "--json"]);
    assert_eq!(implicit.code, Some(0));
    let body = implicit.json();
    assert_eq!(body["data"]["to"], "USD");
    assert_eq!(body["data"]["converted"], 11.76);

    let unsupported = run_cli_in_home(&home, &["convert", "5", "--from", "GBP", "--json"]);
    assert_eq!(unsupported.code, Some(1));
    assert_eq!(unsupported.json()["error"]["code"], "unsupported_currency");

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn convert_rejects_amounts_that_cannot_be_represented() {
    let home = unique_test_home();

    let json = run_cli_in_home(
        &home,
        &["convert", "1e307", "--from", "USD", "--to", "EUR", "--json"],
    );
    assert_eq!(json.code, Some(1));
    let body = json.json();
    assert_eq!(body["ok"], Value::Bool(false));
    assert_eq!(body["error"]["code"], "validation_error");

    let text = run_cli_in_home(&home, &["convert", "NaN", "--from", "EUR", "--to", "USD"]);
    assert_eq!(text.code, Some(1));
    assert!(text.stdout.contains("Error:    validation_error"));
    assert!(text.stdout.contains("- amount:"));

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn corrupt_storage_exits_with_storage_error() {
    let home = unique_test_home();
    assert!(fs::create_dir_all(&home).is_ok());
    assert!(fs::write(home.join("prosperly_transactions.json"), "{not json").is_ok());

    let listed = run_cli_in_home(&home, &["list", "--json"]);
    assert_eq!(listed.code, Some(2));
    assert_eq!(listed.json()["error"]["code"], "storage_error");

    let added = run_cli_in_home(&home, &GROCERIES);
    assert_eq!(added.code, Some(2));

    let raw = fs::read_to_string(home.join("prosperly_transactions.json"));
    assert!(matches!(raw, Ok(ref body) if body == "{not json"));

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn parse_errors_render_as_invalid_argument() {
    let home = unique_test_home();
    let outcome = run_cli_in_home(&home, &["list", "--page", "0", "--json"]);
    assert_eq!(outcome.code, Some(1));
    let body = outcome.json();
    assert_eq!(body["error"]["code"], "invalid_argument");
    assert_eq!(body["data"]["command_hint"], "list");
}
