use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use failure::ResultExt;

use crate::errors::*;
use crate::models::VocabularyModel;
use crate::preprocessing::Tokenizer;
use crate::utils::TokenId;

/// Word vocabulary learned at training time.
///
/// Words missing from the vocabulary, and words ranked beyond `num_words`
/// when a cap is configured, are encoded with the id of the out-of-vocabulary
/// token.
pub struct Vocabulary {
    word_index: HashMap<String, TokenId>,
    unknown_id: TokenId,
    num_words: Option<usize>,
    tokenizer: Tokenizer,
}

impl Vocabulary {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let vocabulary_path = path.as_ref();
        let vocabulary_file = File::open(vocabulary_path)
            .with_context(|_| format!("Cannot open vocabulary file '{:?}'", vocabulary_path))?;
        let model: VocabularyModel = serde_json::from_reader(vocabulary_file)
            .with_context(|_| "Cannot deserialize vocabulary json data")?;
        Self::new(model)
    }

    pub fn new(model: VocabularyModel) -> Result<Self> {
        let unknown_id = *model.word_index.get(&model.oov_token).ok_or_else(|| {
            ResponderError::InvalidConfiguration(format!(
                "out-of-vocabulary token '{}' is missing from the word index",
                model.oov_token
            ))
        })?;
        // a zero cap means no cap
        let num_words = model.num_words.filter(|num_words| *num_words > 0);
        if let Some(num_words) = num_words {
            if unknown_id >= num_words {
                return Err(ResponderError::InvalidConfiguration(format!(
                    "out-of-vocabulary id {} is not below num_words ({})",
                    unknown_id, num_words
                ))
                .into());
            }
        }
        Ok(Self {
            word_index: model.word_index,
            unknown_id,
            num_words,
            tokenizer: Tokenizer::new(model.tokenizer),
        })
    }

    pub fn encode(&self, text: &str) -> Vec<TokenId> {
        self.tokenizer
            .tokenize(text)
            .iter()
            .map(|token| self.token_id(token))
            .collect()
    }

    pub fn token_id(&self, token: &str) -> TokenId {
        match self.word_index.get(token) {
            Some(id) if self.num_words.map(|limit| *id < limit).unwrap_or(true) => *id,
            _ => self.unknown_id,
        }
    }

    pub fn unknown_id(&self) -> TokenId {
        self.unknown_id
    }

    /// Highest id that `encode` can output
    pub fn max_token_id(&self) -> TokenId {
        self.word_index
            .values()
            .filter(|id| self.num_words.map(|limit| **id < limit).unwrap_or(true))
            .fold(self.unknown_id, |max_id, id| max_id.max(*id))
    }

    pub fn len(&self) -> usize {
        self.word_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word_index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenizerConfiguration;
    use crate::testutils::file_path;
    use maplit::hashmap;

    fn sample_model() -> VocabularyModel {
        VocabularyModel {
            word_index: hashmap! {
                "<OOV>".to_string() => 1,
                "you".to_string() => 2,
                "hi".to_string() => 5,
                "are".to_string() => 7,
                "there".to_string() => 12,
            },
            oov_token: "<OOV>".to_string(),
            num_words: None,
            tokenizer: TokenizerConfiguration::default(),
        }
    }

    #[test]
    fn test_encode_works() {
        // Given
        let vocabulary = Vocabulary::new(sample_model()).unwrap();

        // When
        let encoded = vocabulary.encode("Hi there");

        // Then
        assert_eq!(vec![5, 12], encoded);
    }

    #[test]
    fn test_encode_maps_unknown_words_to_unknown_id() {
        // Given
        let vocabulary = Vocabulary::new(sample_model()).unwrap();

        // When
        let encoded = vocabulary.encode("asdkjasd, are you there qwerty?");

        // Then
        assert_eq!(vec![1, 7, 2, 12, 1], encoded);
    }

    #[test]
    fn test_encode_empty_text() {
        // Given
        let vocabulary = Vocabulary::new(sample_model()).unwrap();

        // When
        let encoded = vocabulary.encode("");

        // Then
        assert!(encoded.is_empty());
    }

    #[test]
    fn test_encode_with_num_words_cap() {
        // Given
        let model = VocabularyModel {
            num_words: Some(6),
            ..sample_model()
        };
        let vocabulary = Vocabulary::new(model).unwrap();

        // When
        let encoded = vocabulary.encode("hi you there");

        // Then
        assert_eq!(vec![5, 2, 1], encoded);
    }

    #[test]
    fn test_missing_oov_token_is_rejected() {
        // Given
        let model = VocabularyModel {
            oov_token: "<UNK>".to_string(),
            ..sample_model()
        };

        // When
        let result = Vocabulary::new(model);

        // Then
        assert!(result.is_err());
    }

    #[test]
    fn test_oov_id_beyond_num_words_is_rejected() {
        // Given
        let model = VocabularyModel {
            num_words: Some(1),
            ..sample_model()
        };

        // When
        let result = Vocabulary::new(model);

        // Then
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_num_words_means_no_cap() {
        // Given
        let model = VocabularyModel {
            num_words: Some(0),
            ..sample_model()
        };

        // When
        let vocabulary = Vocabulary::new(model).unwrap();

        // Then
        assert_eq!(vec![5, 2, 12], vocabulary.encode("hi you there"));
        assert_eq!(12, vocabulary.max_token_id());
    }

    #[test]
    fn test_max_token_id_honors_num_words_cap() {
        // Given
        let capped = VocabularyModel {
            num_words: Some(6),
            ..sample_model()
        };

        // When
        let vocabulary = Vocabulary::new(sample_model()).unwrap();
        let capped_vocabulary = Vocabulary::new(capped).unwrap();

        // Then
        assert_eq!(12, vocabulary.max_token_id());
        assert_eq!(5, capped_vocabulary.max_token_id());
    }

    #[test]
    fn test_from_path_works() {
        // Given
        let path = file_path("engine").join("vocabulary.json");

        // When
        let vocabulary = Vocabulary::from_path(path).unwrap();

        // Then
        assert_eq!(1, vocabulary.unknown_id());
        assert_eq!(vec![5, 12], vocabulary.encode("Hi there"));
    }
}
