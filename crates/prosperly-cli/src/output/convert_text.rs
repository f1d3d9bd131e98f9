use std::io;

use prosperly_client::Currency;
use prosperly_client::sanitize::format_amount;
use serde::Deserialize;
use serde_json::Value;

use super::read_view;

#[derive(Debug, Deserialize)]
struct ConversionView {
    amount: f64,
    from: Currency,
    to: Currency,
    rate: f64,
    converted: f64,
}

pub fn render_conversion(data: &Value) -> io::Result<String> {
    let view: ConversionView = read_view(data)?;
    Ok(format!(
        "{} {} = {} {}\n\n  Rate:  1 {} = {:.4} {}",
        format_amount(view.amount),
        view.from,
        format_amount(view.converted),
        view.to,
        view.from,
        view.rate,
        view.to
    ))
}
