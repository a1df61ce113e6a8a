//! Template binder
//!
//! Fills the template selected by a classification with summary and metadata
//! values. Substitution is total: blank scalars become "(not specified)" and
//! empty sequences render as an explicit "None recorded" line, so no section
//! is ever left blank or missing.

use crate::document::models::{
    ActionItem, Classification, MeetingMetadata, RenderedDocument, StructuredSummary,
};
use crate::document::templates::TemplateRegistry;
use crate::{NotesmithError, Result};

/// Marker rendered in place of an empty sequence
pub const NONE_RECORDED: &str = "_None recorded._";

/// Bind summary + metadata into the template registered for the classification.
pub fn render(
    registry: &TemplateRegistry,
    classification: Classification,
    summary: &StructuredSummary,
    metadata: &MeetingMetadata,
) -> Result<RenderedDocument> {
    let template = registry
        .get(classification)
        .ok_or_else(|| NotesmithError::TemplateNotFound(classification.as_str().to_string()))?;

    tracing::debug!("Rendering with template: {}", template.name);

    let markdown = template
        .body
        .replace("{{title}}", &scalar(&metadata.title))
        .replace("{{datetime}}", &scalar(&metadata.datetime))
        .replace("{{location}}", &scalar(&metadata.location))
        .replace("{{attendees}}", &name_list(&metadata.attendees))
        .replace("{{facilitator}}", &scalar(&metadata.facilitator))
        .replace("{{note_taker}}", &scalar(&metadata.note_taker))
        .replace("{{key_points}}", &bullet_list(&summary.key_points))
        .replace("{{decisions}}", &bullet_list(&summary.decisions))
        .replace("{{action_items}}", &action_list(&summary.action_items));

    Ok(RenderedDocument {
        markdown,
        classification,
    })
}

fn scalar(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "(not specified)".to_string()
    } else {
        trimmed.to_string()
    }
}

fn name_list(names: &[String]) -> String {
    let joined: Vec<&str> = names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .collect();
    if joined.is_empty() {
        "(not specified)".to_string()
    } else {
        joined.join(", ")
    }
}

fn bullet_list(items: &[String]) -> String {
    let mut lines = Vec::new();
    for item in items {
        let trimmed = item.trim();
        if !trimmed.is_empty() {
            lines.push(format!("- {}", trimmed));
        }
    }
    if lines.is_empty() {
        NONE_RECORDED.to_string()
    } else {
        lines.join("\n")
    }
}

fn action_list(items: &[ActionItem]) -> String {
    let mut lines = Vec::new();
    for item in items {
        let description = item.description.trim();
        if description.is_empty() {
            continue;
        }
        let mut line = format!("- {}", description);
        let owner = item.owner.as_deref().map(str::trim).filter(|o| !o.is_empty());
        let due = item.due.as_deref().map(str::trim).filter(|d| !d.is_empty());
        match (owner, due) {
            (Some(owner), Some(due)) => line.push_str(&format!(" (owner: {}, due: {})", owner, due)),
            (Some(owner), None) => line.push_str(&format!(" (owner: {})", owner)),
            (None, Some(due)) => line.push_str(&format!(" (due: {})", due)),
            (None, None) => {}
        }
        lines.push(line);
    }
    if lines.is_empty() {
        NONE_RECORDED.to_string()
    } else {
        lines.join("\n")
    }
}
