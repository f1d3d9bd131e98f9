use std::io;

use prosperly_client::Settings;
use serde::Deserialize;
use serde_json::Value;

use super::read_view;

#[derive(Debug, Deserialize)]
struct SettingsView {
    message: Option<String>,
    settings: Settings,
}

pub fn render_settings(data: &Value) -> io::Result<String> {
    let view: SettingsView = read_view(data)?;
    let mut lines = Vec::new();
    if let Some(message) = view.message {
        lines.push(message);
        lines.push(String::new());
    }
    lines.push(format!("  Currency:  {}", view.settings.currency));
    lines.push(format!("  Theme:     {}", view.settings.theme.as_str()));
    Ok(lines.join("\n"))
}
