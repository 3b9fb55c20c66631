use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ModelVersion {
    pub model_version: String,
}

#[derive(Debug, Deserialize, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaddingSide {
    Pre,
    Post,
}

#[derive(Debug, Deserialize)]
pub struct EngineModel {
    pub model_version: String,
    pub max_len: usize,
    #[serde(default = "default_padding")]
    pub padding: PaddingSide,
    #[serde(default = "default_truncating")]
    pub truncating: PaddingSide,
    #[serde(default)]
    pub padding_value: usize,
    #[serde(default = "default_vocabulary_file")]
    pub vocabulary: String,
    #[serde(default = "default_labels_file")]
    pub labels: String,
    #[serde(default = "default_intents_file")]
    pub intents: String,
    #[serde(default = "default_classifier_file")]
    pub classifier: String,
}

fn default_padding() -> PaddingSide {
    PaddingSide::Pre
}

fn default_truncating() -> PaddingSide {
    PaddingSide::Post
}

fn default_vocabulary_file() -> String {
    "vocabulary.json".to_string()
}

fn default_labels_file() -> String {
    "labels.json".to_string()
}

fn default_intents_file() -> String {
    "intents.json".to_string()
}

fn default_classifier_file() -> String {
    "classifier.json".to_string()
}
