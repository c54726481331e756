use serde::Deserialize;
use std::collections::HashMap;

/// Repo-side config files, read from the default branch under `.github/`.
pub const LABELER_FILE: &str = "labeler.yml";
pub const AUTO_ASSIGN_FILE: &str = "autoAssignees.yml";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelerConfig {
    /// How many repository labels to consider, newest first.
    pub num_labels: u32,
    pub exclude_labels: Vec<String>,
}

impl Default for LabelerConfig {
    fn default() -> Self {
        Self {
            num_labels: 20,
            exclude_labels: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoAssignConfig {
    /// Label name to the users that should pick issues with that label up.
    pub label_to_author: HashMap<String, Vec<String>>,
}
