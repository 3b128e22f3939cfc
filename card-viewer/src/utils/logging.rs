// Logging utilities
// Structured logging (JSON + human-readable) and masking of visitor contact details

use log::Level;
use serde_json::{json, Map, Value};

/// Mask a phone number for logs, keeping only the last 3 digits.
pub fn mask_phone(phone: &str) -> String {
    let digits: Vec<char> = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() <= 4 {
        return "***".to_string();
    }

    let tail: String = digits[digits.len() - 3..].iter().collect();
    format!("***{}", tail)
}

/// Mask an email address for logs: first character of the local part plus the domain.
pub fn mask_email(email: &str) -> String {
    let e = email.trim();
    if e.is_empty() {
        return String::new();
    }

    match e.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            let first = local.chars().next().unwrap_or('*');
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

/// Remove one `[TAG: value]` marker from `message`, returning the value and the rest.
fn take_tag(message: &str, tag: &str) -> (Option<String>, String) {
    let open = format!("[{}:", tag);
    let Some(start) = message.find(&open) else {
        return (None, message.to_string());
    };
    let Some(len) = message[start..].find(']') else {
        return (None, message.to_string());
    };

    let value = message[start + open.len()..start + len].trim().to_string();
    let rest = format!("{} {}", &message[..start], &message[start + len + 1..]);
    (Some(value), rest.trim().to_string())
}

/// Parse phase and step from a log message.
/// Lifts the `[PHASE: ...]` and `[STEP: ...]` markers out of the text.
pub fn parse_log_metadata(message: &str) -> (Option<String>, Option<String>, String) {
    let (phase, rest) = take_tag(message, "PHASE");
    let (step, rest) = take_tag(&rest, "STEP");
    (phase, step, rest)
}

/// Format log entry as a single JSON line
pub fn format_json_log(
    timestamp: &str,
    level: Level,
    target: &str,
    message: &str,
    phase: Option<&str>,
    step: Option<&str>,
) -> String {
    let mut entry = Map::new();
    entry.insert("timestamp".into(), json!(timestamp));
    entry.insert("level".into(), json!(level.as_str()));
    entry.insert("target".into(), json!(target));
    entry.insert("message".into(), json!(message));
    if let Some(phase) = phase {
        entry.insert("phase".into(), json!(phase));
    }
    if let Some(step) = step {
        entry.insert("step".into(), json!(step));
    }

    serde_json::to_string(&Value::Object(entry)).unwrap_or_else(|_| "{}".to_string())
}

/// Format log entry as human-readable text
pub fn format_human_readable_log(
    timestamp: &str,
    level: Level,
    target: &str,
    message: &str,
    phase: Option<&str>,
    step: Option<&str>,
) -> String {
    let mut line = format!("[{}] [{}]", timestamp, level.as_str());
    if let Some(phase) = phase {
        line.push_str(&format!(" [PHASE: {}]", phase));
    }
    if let Some(step) = step {
        line.push_str(&format!(" [STEP: {}]", step));
    }
    line.push_str(&format!(" [{}] {}", target, message));
    line
}
