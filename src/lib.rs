mod engine;
pub mod errors;
mod intent_classifier;
mod labels;
pub mod models;
mod preprocessing;
mod responses;
#[cfg(test)]
mod testutils;
mod utils;

pub const MODEL_VERSION: &str = "0.1.0";

pub use crate::engine::{IntentPrediction, ResponderEngine};
pub use crate::errors::*;
pub use crate::intent_classifier::{DenseIntentClassifier, IntentClassifier};
pub use crate::labels::{decode, LabelSet};
pub use crate::models::*;
pub use crate::preprocessing::{SequencePadder, Tokenizer, Vocabulary};
pub use crate::responses::{respond, ResponseTable, FALLBACK_RESPONSE};
pub use crate::utils::{argmax, IntentName, TokenId};
