use std::collections::HashMap;

use serde::Deserialize;

use crate::utils::TokenId;

pub const DEFAULT_FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

#[derive(Debug, Deserialize)]
pub struct VocabularyModel {
    pub word_index: HashMap<String, TokenId>,
    pub oov_token: String,
    #[serde(default)]
    pub num_words: Option<usize>,
    #[serde(flatten)]
    pub tokenizer: TokenizerConfiguration,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TokenizerConfiguration {
    pub lower: bool,
    pub filters: String,
    pub split: String,
}

impl Default for TokenizerConfiguration {
    fn default() -> Self {
        Self {
            lower: true,
            filters: DEFAULT_FILTERS.to_string(),
            split: " ".to_string(),
        }
    }
}
