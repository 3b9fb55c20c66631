use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use failure::ResultExt;

use crate::errors::*;
use crate::utils::IntentName;

/// Intent tags in the order of the classifier output
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSet {
    labels: Vec<IntentName>,
}

impl LabelSet {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let labels_path = path.as_ref();
        let labels_file = File::open(labels_path)
            .with_context(|_| format!("Cannot open labels file '{:?}'", labels_path))?;
        let labels: Vec<IntentName> = serde_json::from_reader(labels_file)
            .with_context(|_| "Cannot deserialize labels json data")?;
        Self::new(labels)
    }

    pub fn new(labels: Vec<IntentName>) -> Result<Self> {
        if labels.is_empty() {
            return Err(ResponderError::InvalidConfiguration(
                "the label set is empty".to_string(),
            )
            .into());
        }
        let mut seen = HashSet::with_capacity(labels.len());
        for label in &labels {
            if !seen.insert(label) {
                return Err(ResponderError::InvalidConfiguration(format!(
                    "label '{}' appears more than once",
                    label
                ))
                .into());
            }
        }
        Ok(Self { labels })
    }

    pub fn decode(&self, index: usize) -> Result<&str> {
        decode(index, &self.labels)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|label| &**label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

pub fn decode(index: usize, labels: &[IntentName]) -> Result<&str> {
    labels.get(index).map(|label| &**label).ok_or_else(|| {
        ResponderError::LabelIndexOutOfRange {
            index,
            nb_labels: labels.len(),
        }
        .into()
    })
}
