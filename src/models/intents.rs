use serde::Deserialize;

use crate::utils::IntentName;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IntentRecord {
    pub tag: IntentName,
    #[serde(default)]
    pub patterns: Vec<String>,
    pub responses: Vec<String>,
    #[serde(default)]
    pub context: Option<Vec<String>>,
}

/// Both the bare list of records and the `{"intents": [...]}` wrapper are
/// accepted
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IntentsDocument {
    Wrapped { intents: Vec<IntentRecord> },
    Bare(Vec<IntentRecord>),
}

impl IntentsDocument {
    pub fn into_records(self) -> Vec<IntentRecord> {
        match self {
            IntentsDocument::Wrapped { intents } => intents,
            IntentsDocument::Bare(intents) => intents,
        }
    }
}
