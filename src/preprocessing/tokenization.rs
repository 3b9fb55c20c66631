use crate::models::TokenizerConfiguration;

/// Splits a text into word tokens the same way the vocabulary was built at
/// training time: optional lowercasing, filtered characters turned into
/// separators, then a split on the separator.
#[derive(Debug, Clone, PartialEq)]
pub struct Tokenizer {
    lower: bool,
    filters: Vec<char>,
    split: String,
}

impl Tokenizer {
    pub fn new(config: TokenizerConfiguration) -> Self {
        let split = if config.split.is_empty() {
            " ".to_string()
        } else {
            config.split
        };
        Self {
            lower: config.lower,
            filters: config.filters.chars().collect(),
            split,
        }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let text = if self.lower {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let mut translated = String::with_capacity(text.len());
        for c in text.chars() {
            if self.filters.contains(&c) {
                translated.push_str(&self.split);
            } else {
                translated.push(c);
            }
        }
        translated
            .split(self.split.as_str())
            .filter(|token| !token.is_empty())
            .map(|token| token.to_string())
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TokenizerConfiguration::default())
    }
}
