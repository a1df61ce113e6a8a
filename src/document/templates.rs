//! Template registry
//!
//! Maps a classification to the Markdown template used to render it. The
//! binder fills `{{placeholder}}` markers; every placeholder used here must
//! have a substitution rule in the binder.

use std::collections::HashMap;

use crate::document::models::Classification;

/// A registered Markdown template
#[derive(Debug, Clone)]
pub struct DocumentTemplate {
    /// Short template identifier used in logs
    pub name: &'static str,

    /// Template body with `{{placeholder}}` markers
    pub body: &'static str,
}

const GENERAL_MEETING_TEMPLATE: &str = "\
# {{title}}

| | |
|---|---|
| **Date** | {{datetime}} |
| **Location** | {{location}} |
| **Attendees** | {{attendees}} |
| **Facilitator** | {{facilitator}} |
| **Note-taker** | {{note_taker}} |

## Key Points

{{key_points}}

## Decisions

{{decisions}}

## Action Items

{{action_items}}
";

const RESEARCH_NOTE_TEMPLATE: &str = "\
# Research Note: {{title}}

| | |
|---|---|
| **Date** | {{datetime}} |
| **Location** | {{location}} |
| **Participants** | {{attendees}} |
| **Lead** | {{facilitator}} |
| **Recorded by** | {{note_taker}} |

## Key Observations

{{key_points}}

## Conclusions

{{decisions}}

## Follow-up Tasks

{{action_items}}
";

/// Keyed store of templates, read-only after startup
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: HashMap<Classification, DocumentTemplate>,
}

impl TemplateRegistry {
    /// Empty registry, mainly useful for tests of missing-template handling
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Registry with the two built-in templates
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(
            Classification::GeneralMeeting,
            DocumentTemplate {
                name: "general_meeting",
                body: GENERAL_MEETING_TEMPLATE,
            },
        );
        registry.register(
            Classification::ResearchNote,
            DocumentTemplate {
                name: "research_note",
                body: RESEARCH_NOTE_TEMPLATE,
            },
        );
        registry
    }

    pub fn register(&mut self, classification: Classification, template: DocumentTemplate) {
        self.templates.insert(classification, template);
    }

    pub fn get(&self, classification: Classification) -> Option<&DocumentTemplate> {
        self.templates.get(&classification)
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_both_classifications() {
        let registry = TemplateRegistry::with_defaults();
        assert!(registry.get(Classification::GeneralMeeting).is_some());
        assert!(registry.get(Classification::ResearchNote).is_some());
    }

    #[test]
    fn empty_registry_has_no_templates() {
        let registry = TemplateRegistry::empty();
        assert!(registry.get(Classification::GeneralMeeting).is_none());
    }
}
