use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use maplit::hashmap;
use ndarray::prelude::*;

use crate::engine::ResponderEngine;
use crate::errors::*;
use crate::intent_classifier::IntentClassifier;
use crate::labels::LabelSet;
use crate::models::{IntentRecord, TokenizerConfiguration, VocabularyModel};
use crate::preprocessing::{SequencePadder, Vocabulary};
use crate::responses::ResponseTable;
use crate::utils::TokenId;

pub fn assert_epsilon_eq_array1(a: &Array1<f32>, b: &Array1<f32>, epsilon: f32) {
    assert_eq!(a.dim(), b.dim());
    for (index, elem_a) in a.indexed_iter() {
        assert!(epsilon_eq(*elem_a, b[index], epsilon))
    }
}

pub fn epsilon_eq(a: f32, b: f32, epsilon: f32) -> bool {
    let diff = a - b;
    diff < epsilon && diff > -epsilon
}

pub fn file_path(filename: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("tests")
        .join(filename)
}

pub fn copy_dir(source: &Path, destination: &Path) {
    for entry in fs::read_dir(source).unwrap() {
        let path = entry.unwrap().path();
        if path.is_file() {
            fs::copy(&path, destination.join(path.file_name().unwrap())).unwrap();
        }
    }
}

pub fn sample_records() -> Vec<IntentRecord> {
    let record = |tag: &str, responses: &[&str]| IntentRecord {
        tag: tag.to_string(),
        patterns: vec![],
        responses: responses.iter().map(|r| r.to_string()).collect(),
        context: None,
    };
    vec![
        record(
            "greeting",
            &["Hello", "Good to see you again", "Hi there, how can I help?"],
        ),
        record("goodbye", &["See you!", "Have a nice day"]),
        record("thanks", &["My pleasure"]),
        record("noanswer", &["Sorry, can't understand you"]),
    ]
}

pub fn sample_vocabulary() -> Vocabulary {
    Vocabulary::new(VocabularyModel {
        word_index: hashmap! {
            "<OOV>".to_string() => 1,
            "bye".to_string() => 4,
            "hi".to_string() => 5,
            "there".to_string() => 12,
        },
        oov_token: "<OOV>".to_string(),
        num_words: None,
        tokenizer: TokenizerConfiguration::default(),
    })
    .unwrap()
}

/// Sequence as fed to the classifier by an engine built with the default
/// `EngineBuilder` settings
pub fn sample_padded(sequence: &[TokenId]) -> Vec<TokenId> {
    SequencePadder::new(20).unwrap().pad(sequence)
}

pub struct MockedIntentClassifier {
    pub nb_classes: usize,
    pub mocked_outputs: HashMap<Vec<TokenId>, Vec<f32>>,
    pub default_output: Vec<f32>,
}

impl IntentClassifier for MockedIntentClassifier {
    fn nb_classes(&self) -> usize {
        self.nb_classes
    }

    fn predict(&self, batch: &ArrayView2<TokenId>) -> Result<Array2<f32>> {
        let rows: Vec<Vec<f32>> = batch
            .outer_iter()
            .map(|sequence| {
                self.mocked_outputs
                    .get(&sequence.to_vec())
                    .cloned()
                    .unwrap_or_else(|| self.default_output.clone())
            })
            .collect();
        let nb_columns = rows.first().map(|row| row.len()).unwrap_or(0);
        let values: Vec<f32> = rows.iter().flatten().cloned().collect();
        Ok(Array::from_shape_vec((rows.len(), nb_columns), values)?)
    }
}

pub struct EngineBuilder {
    vocabulary: Vocabulary,
    max_len: usize,
    classifier: Box<dyn IntentClassifier>,
    labels: Vec<String>,
    records: Vec<IntentRecord>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            vocabulary: sample_vocabulary(),
            max_len: 20,
            classifier: Box::new(MockedIntentClassifier {
                nb_classes: 3,
                mocked_outputs: HashMap::new(),
                default_output: vec![0.2, 0.5, 0.3],
            }),
            labels: vec![
                "goodbye".to_string(),
                "greeting".to_string(),
                "thanks".to_string(),
            ],
            records: sample_records(),
        }
    }
}

impl EngineBuilder {
    pub fn classifier<C: IntentClassifier + 'static>(mut self, classifier: C) -> Self {
        self.classifier = Box::new(classifier) as _;
        self
    }

    pub fn build(self) -> Result<ResponderEngine> {
        ResponderEngine::new(
            self.vocabulary,
            SequencePadder::new(self.max_len)?,
            self.classifier,
            LabelSet::new(self.labels)?,
            ResponseTable::new(self.records)?,
        )
    }
}
