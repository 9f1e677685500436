//! Task label inference.
//!
//! Used only when a filename carried no explicit task entity. Inference
//! is advisory: it never fails, falling back to the documented
//! resting-state default when nothing matches.

use serde::Serialize;

use crate::header::HeaderMetadata;

/// Label assigned to single-volume anatomical scans.
pub const ANATOMICAL_LABEL: &str = "anat";

/// Label assigned when no protocol mapping matches.
pub const DEFAULT_TASK_LABEL: &str = "rest";

/// Built-in protocol-substring mappings, checked in order.
const PROTOCOL_TASK_TABLE: &[(&str, &str)] = &[
    ("mprage", ANATOMICAL_LABEL),
    ("t1w", ANATOMICAL_LABEL),
    ("rest", DEFAULT_TASK_LABEL),
    ("nback", "nback"),
    ("motor", "motor"),
    ("checkerboard", "checkerboard"),
];

/// An inferred or explicit task label. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskLabel(String);

impl TaskLabel {
    fn new(label: &str) -> Self {
        debug_assert!(!label.is_empty());
        Self(label.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Guesses a task label from image shape and scanner protocol text.
#[derive(Debug, Clone)]
pub struct TaskInferencer {
    mappings: Vec<(String, String)>,
}

impl TaskInferencer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            mappings: PROTOCOL_TASK_TABLE
                .iter()
                .map(|(pattern, label)| (pattern.to_string(), label.to_string()))
                .collect(),
        }
    }

    /// Appends a site-specific protocol mapping. Patterns are matched
    /// case-insensitively as substrings, first match wins.
    #[must_use]
    pub fn with_mapping(mut self, pattern: &str, label: &str) -> Self {
        self.mappings
            .push((pattern.to_ascii_lowercase(), label.to_string()));
        self
    }

    /// Decision policy, in priority order: single-volume images are
    /// anatomical; then the protocol table; then the resting-state
    /// default. Never fails.
    #[must_use]
    pub fn infer(&self, meta: &HeaderMetadata, protocol: Option<&str>) -> TaskLabel {
        if meta.n_volumes() <= 1 {
            return TaskLabel::new(ANATOMICAL_LABEL);
        }

        if let Some(protocol) = protocol {
            let protocol = protocol.to_ascii_lowercase();
            for (pattern, label) in &self.mappings {
                if protocol.contains(pattern.as_str()) {
                    return TaskLabel::new(label);
                }
            }
        }

        TaskLabel::new(DEFAULT_TASK_LABEL)
    }
}

impl Default for TaskInferencer {
    fn default() -> Self {
        Self::new()
    }
}
