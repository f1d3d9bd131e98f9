use clap::{Args, Parser, Subcommand};
use prosperly_client::transactions::date;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    date::parse_iso_date(value)
        .map(|parsed| IsoDate(date::format_iso_date(&parsed)))
        .ok_or_else(|| "date must use YYYY-MM-DD format with a real calendar date".to_string())
}

pub fn parse_page(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err("page must be a whole number of at least 1".to_string()),
    }
}

/// Extended help shown after `prosperly add --help`.
pub const ADD_AFTER_HELP: &str = "\
Field rules:
  --type         income or expense
  --amount       positive number; stored rounded to 2 decimals
  --date         YYYY-MM-DD (UTC); defaults to today
  --category     income: salary, freelance, crypto, other
                 expense: groceries, rent, utilities, other
  --description  required, at most 100 characters; markup is stripped
  --currency     USD or EUR (default USD)

Duplicates:
  A transaction with the same type, amount, category, currency and date as an
  existing one is rejected. Run `prosperly list` to inspect what is stored.
";

#[derive(Debug, Parser)]
#[command(
    name = "prosperly",
    version,
    about = "personal finance tracker",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record an income or expense transaction
    #[command(after_long_help = ADD_AFTER_HELP)]
    Add(AddArgs),
    /// List stored transactions, filtered and paginated
    List {
        /// Start date filter, inclusive (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        from: Option<IsoDate>,
        /// End date filter, inclusive (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        to: Option<IsoDate>,
        /// Exact category match
        #[arg(long)]
        category: Option<String>,
        /// Exact currency match: USD or EUR
        #[arg(long)]
        currency: Option<String>,
        /// Page number (10 rows per page)
        #[arg(long, value_parser = parse_page)]
        page: Option<usize>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Convert an amount between USD and EUR at the fixed rate
    Convert {
        /// Amount to convert
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Source currency code
        #[arg(long)]
        from: String,
        /// Target currency code; defaults to the preferred settings currency
        #[arg(long)]
        to: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show or change preferred currency and theme
    #[command(arg_required_else_help = true)]
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Transaction type: income or expense
    #[arg(long = "type", default_value = "expense")]
    pub kind: String,
    /// Positive amount, e.g. 42.15
    #[arg(long)]
    pub amount: String,
    /// Transaction date (YYYY-MM-DD, UTC); defaults to today
    #[arg(long, value_parser = parse_iso_date)]
    pub date: Option<IsoDate>,
    /// Category for the chosen type
    #[arg(long)]
    pub category: String,
    /// Short description (max 100 characters)
    #[arg(long)]
    pub description: String,
    /// Currency code: USD or EUR
    #[arg(long, default_value = "USD")]
    pub currency: String,
    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum SettingsCommand {
    /// Show the current settings
    Show {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Replace the settings record
    Set {
        /// Preferred currency: USD or EUR
        #[arg(long)]
        currency: String,
        /// Theme: auto, light, or dark
        #[arg(long)]
        theme: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
