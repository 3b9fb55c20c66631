use std::fs;
use std::io;
use std::path::Path;

use failure::ResultExt;
use itertools::Itertools;
use log::{debug, info, warn};
use ndarray::prelude::*;
use rand::Rng;
use serde::Serialize;

use crate::errors::*;
use crate::intent_classifier::{DenseIntentClassifier, IntentClassifier};
use crate::labels::LabelSet;
use crate::models::{EngineModel, ModelVersion};
use crate::preprocessing::{SequencePadder, Vocabulary};
use crate::responses::{respond, ResponseTable};
use crate::utils::{argmax, extract_engine_zip_archive, IntentName, TokenId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntentPrediction {
    pub intent_name: IntentName,
    pub index: usize,
    pub probability: f32,
}

/// Read-only inference context: everything is loaded once and shared by all
/// queries.
pub struct ResponderEngine {
    vocabulary: Vocabulary,
    padder: SequencePadder,
    classifier: Box<dyn IntentClassifier>,
    labels: LabelSet,
    responses: ResponseTable,
}

impl ResponderEngine {
    pub fn new(
        vocabulary: Vocabulary,
        padder: SequencePadder,
        classifier: Box<dyn IntentClassifier>,
        labels: LabelSet,
        responses: ResponseTable,
    ) -> Result<Self> {
        if classifier.nb_classes() != labels.len() {
            return Err(ResponderError::InvalidConfiguration(format!(
                "the classifier outputs {} classes but there are {} labels",
                classifier.nb_classes(),
                labels.len()
            ))
            .into());
        }
        if let Some(vocabulary_size) = classifier.vocabulary_size() {
            let max_token_id = vocabulary.max_token_id().max(padder.padding_value());
            if max_token_id >= vocabulary_size {
                return Err(ResponderError::TokenOutOfRange {
                    token_id: max_token_id,
                    vocabulary_size,
                }
                .into());
            }
        }
        for label in labels.iter().filter(|label| !responses.contains(label)) {
            warn!(
                "Intent '{}' has no responses, the fallback message will be used",
                label
            );
        }
        for tag in responses.tags().filter(|tag| !labels.contains(tag)) {
            warn!("Intent '{}' is never predicted by the classifier", tag);
        }
        Ok(Self {
            vocabulary,
            padder,
            classifier,
            labels,
            responses,
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let engine_dir = path.as_ref();
        let model = Self::load_model(engine_dir)?;

        let vocabulary = Vocabulary::from_path(engine_dir.join(&model.vocabulary))?;
        info!("Vocabulary loaded ({} words)", vocabulary.len());
        let padder = SequencePadder::with_sides(
            model.max_len,
            model.padding,
            model.truncating,
            model.padding_value,
        )?;
        let labels = LabelSet::from_path(engine_dir.join(&model.labels))?;
        info!("Label set loaded ({} labels)", labels.len());
        let responses = ResponseTable::from_path(engine_dir.join(&model.intents))?;
        let classifier = DenseIntentClassifier::from_path(engine_dir.join(&model.classifier))?;

        Self::new(
            vocabulary,
            padder,
            Box::new(classifier) as _,
            labels,
            responses,
        )
    }

    fn check_model_version<P: AsRef<Path>>(path: P) -> Result<()> {
        let model_file = fs::File::open(&path)?;

        let model_version: ModelVersion = serde_json::from_reader(model_file)?;
        if model_version.model_version != crate::MODEL_VERSION {
            return Err(ResponderError::WrongModelVersion {
                model: model_version.model_version,
                runner: crate::MODEL_VERSION,
            }
            .into());
        }
        Ok(())
    }

    fn load_model(engine_dir: &Path) -> Result<EngineModel> {
        let engine_model_path = engine_dir.join("engine.json");
        Self::check_model_version(&engine_model_path).with_context(|_| {
            ResponderError::ModelLoad(engine_model_path.to_string_lossy().to_string())
        })?;
        let model_file = fs::File::open(&engine_model_path)
            .with_context(|_| format!("Could not open engine file {:?}", &engine_model_path))?;
        let model = serde_json::from_reader(model_file)
            .with_context(|_| format!("Invalid engine file {:?}", &engine_model_path))?;
        Ok(model)
    }
}

impl ResponderEngine {
    pub fn from_zip<R: io::Read + io::Seek>(reader: R) -> Result<Self> {
        let temp_dir = tempfile::Builder::new()
            .prefix("temp_dir_responder_")
            .tempdir()?;
        let engine_dir_path = extract_engine_zip_archive(reader, temp_dir.path())?;
        Ok(ResponderEngine::from_path(engine_dir_path)?)
    }
}

impl ResponderEngine {
    /// Token ids of `text`, padded or truncated to the classifier input length
    pub fn encode(&self, text: &str) -> Vec<TokenId> {
        self.padder.pad(&self.vocabulary.encode(text))
    }

    fn predict(&self, text: &str) -> Result<Array1<f32>> {
        let sequence = self.encode(text);
        debug!("Encoded '{}' as {:?}", text, sequence);
        let batch = Array::from_shape_vec((1, self.padder.max_len()), sequence)?;
        let predictions = self.classifier.predict(&batch.view())?;
        if predictions.nrows() != 1 {
            return Err(ResponderError::InvalidPrediction(format!(
                "expected a single prediction but got {}",
                predictions.nrows()
            ))
            .into());
        }
        Ok(predictions.row(0).to_owned())
    }

    fn check_prediction_size(&self, scores: &Array1<f32>) -> Result<()> {
        if scores.len() != self.labels.len() {
            return Err(ResponderError::InvalidPrediction(format!(
                "expected {} scores but got {}",
                self.labels.len(),
                scores.len()
            ))
            .into());
        }
        Ok(())
    }

    /// Most probable intent of `text`
    pub fn classify(&self, text: &str) -> Result<IntentPrediction> {
        let scores = self.predict(text)?;
        let index = argmax(&scores.view())?;
        let intent_name = self.labels.decode(index)?.to_string();
        self.check_prediction_size(&scores)?;
        debug!(
            "'{}' classified as '{}' ({})",
            text, intent_name, scores[index]
        );
        Ok(IntentPrediction {
            intent_name,
            index,
            probability: scores[index],
        })
    }

    /// Every intent of the label set, by decreasing probability
    pub fn get_intents(&self, text: &str) -> Result<Vec<IntentPrediction>> {
        let scores = self.predict(text)?;
        self.check_prediction_size(&scores)?;
        if let Some(index) = scores.iter().position(|score| score.is_nan()) {
            return Err(ResponderError::InvalidPrediction(format!(
                "score at index {} is NaN",
                index
            ))
            .into());
        }
        Ok(self
            .labels
            .iter()
            .zip(scores.iter())
            .enumerate()
            .map(|(index, (intent_name, probability))| IntentPrediction {
                intent_name: intent_name.to_string(),
                index,
                probability: *probability,
            })
            .sorted_by(|a, b| {
                b.probability
                    .partial_cmp(&a.probability)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .collect())
    }

    /// Response to `text`, drawing the response from `rng`
    pub fn respond_to<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> Result<String> {
        let prediction = self.classify(text)?;
        Ok(respond(&prediction.intent_name, &self.responses, rng))
    }

    /// Response to `text`, drawing the response from the thread-local rng
    pub fn infer(&self, text: &str) -> Result<String> {
        self.respond_to(text, &mut rand::thread_rng())
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn response_table(&self) -> &ResponseTable {
        &self.responses
    }

    pub fn max_len(&self) -> usize {
        self.padder.max_len()
    }
}
