//! Summary response parsing
//!
//! The model is instructed to reply with bare JSON, but responses sometimes
//! arrive wrapped in code fences or stray prose. Parsing extracts the first
//! JSON object, applies field defaults, and normalizes action items.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::document::{ActionItem, StructuredSummary};
use crate::{NotesmithError, Result};

#[derive(Debug, Default, Deserialize)]
struct RawSummary {
    #[serde(default)]
    key_points: Vec<String>,
    #[serde(default)]
    decisions: Vec<String>,
    #[serde(default)]
    action_items: Vec<RawActionItem>,
}

#[derive(Debug, Deserialize)]
struct RawActionItem {
    #[serde(default)]
    description: String,
    #[serde(default)]
    owner: Option<String>,
    #[serde(default)]
    due: Option<String>,
}

/// Parse the model reply into a structured summary.
pub fn parse_summary_response(reply: &str) -> Result<StructuredSummary> {
    let json = extract_json_object(reply).ok_or_else(|| {
        NotesmithError::Summarization(format!(
            "Response did not contain a JSON object: {}",
            truncate(reply, 200)
        ))
    })?;

    let raw: RawSummary = serde_json::from_str(json).map_err(|e| {
        NotesmithError::Summarization(format!("Failed to parse summary JSON: {}", e))
    })?;

    Ok(StructuredSummary {
        key_points: clean_list(raw.key_points),
        decisions: clean_list(raw.decisions),
        action_items: raw
            .action_items
            .into_iter()
            .filter_map(normalize_action)
            .collect(),
    })
}

/// Locate the first balanced JSON object in the reply.
fn extract_json_object(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in reply[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&reply[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Normalize one action item: trim fields, drop empty descriptions, keep the
/// due date only when it is a valid ISO date.
fn normalize_action(raw: RawActionItem) -> Option<ActionItem> {
    let description = raw.description.trim().to_string();
    if description.is_empty() {
        return None;
    }

    let owner = raw
        .owner
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty());

    let due = raw
        .due
        .map(|d| d.trim().to_string())
        .filter(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").is_ok());

    Some(ActionItem {
        description,
        owner,
        due,
    })
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let mut end = max_len;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}
