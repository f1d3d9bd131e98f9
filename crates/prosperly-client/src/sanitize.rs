//! Markup stripping for free-text descriptions, plus the render helpers used
//! when listing transactions.
//!
//! Descriptions are sanitized when a form is submitted and again whenever they
//! are rendered, so `sanitize_markup` must be idempotent.

const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];
const ELLIPSIS: char = '\u{2026}';

/// Removes markup tags, dropping `<script>` and `<style>` elements together
/// with their content. Plain text, including a lone `<`, is kept.
pub fn sanitize_markup(input: &str) -> String {
    let mut current = strip_pass(input);
    loop {
        let next = strip_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Sanitized description cut to `max_chars` characters with a trailing `…`.
pub fn render_description(description: &str, max_chars: usize) -> String {
    sanitize_markup(&truncate_chars(description, max_chars))
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push(ELLIPSIS);
    truncated
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

struct Tag {
    len: usize,
    name: String,
    closing: bool,
}

fn strip_pass(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        output.push_str(&rest[..start]);
        let tail = &rest[start..];

        let Some(tag) = read_tag(tail) else {
            output.push('<');
            rest = &tail[1..];
            continue;
        };
        rest = &tail[tag.len..];

        if !tag.closing && RAW_TEXT_ELEMENTS.contains(&tag.name.as_str()) {
            let closing = format!("</{}", tag.name);
            rest = match rest.to_ascii_lowercase().find(&closing) {
                Some(position) => &rest[position..],
                None => "",
            };
        }
    }

    output.push_str(rest);
    output
}

fn read_tag(tail: &str) -> Option<Tag> {
    if tail.starts_with("<!--") {
        let len = tail.find("-->").map(|end| end + 3).unwrap_or(tail.len());
        return Some(Tag {
            len,
            name: String::new(),
            closing: false,
        });
    }

    let after = &tail[1..];
    let first = after.chars().next()?;
    if !(first.is_ascii_alphabetic() || first == '/' || first == '!' || first == '?') {
        return None;
    }

    let end = tail.find('>')?;
    let closing = first == '/';
    let name_start = if closing { &after[1..] } else { after };
    let name = name_start
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();

    Some(Tag {
        len: end + 1,
        name,
        closing,
    })
}
