use prosperly_client::ClientError;
use serde_json::Value;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        "Something went wrong, but it's easy to fix.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];

    let issues = field_issues(error);
    if !issues.is_empty() {
        lines.push(String::new());
        lines.push("Fields:".to_string());
        lines.extend(issues);
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

fn field_issues(error: &ClientError) -> Vec<String> {
    let Some(data) = &error.data else {
        return Vec::new();
    };

    if let Some(issues) = data.get("issues").and_then(Value::as_array) {
        return issues
            .iter()
            .map(|issue| {
                format!(
                    "  - {}: {}",
                    issue.get("field").and_then(Value::as_str).unwrap_or("?"),
                    issue
                        .get("description")
                        .and_then(Value::as_str)
                        .unwrap_or("")
                )
            })
            .collect();
    }

    data.get("missing_fields")
        .and_then(Value::as_array)
        .map(|fields| {
            fields
                .iter()
                .filter_map(Value::as_str)
                .map(|field| format!("  - {field}: missing"))
                .collect()
        })
        .unwrap_or_default()
}
