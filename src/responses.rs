use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use failure::ResultExt;
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::*;
use crate::models::{IntentRecord, IntentsDocument};
use crate::utils::IntentName;

/// Returned when the predicted tag has no record in the response table.
///
/// A record tagged `noanswer` is never used in its place.
pub const FALLBACK_RESPONSE: &str = "Sorry, I didn't understand that.";

/// Intent records keyed by tag
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseTable {
    records: HashMap<IntentName, IntentRecord>,
}

impl ResponseTable {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let intents_path = path.as_ref();
        let intents_file = File::open(intents_path)
            .with_context(|_| format!("Cannot open intents file '{:?}'", intents_path))?;
        let document: IntentsDocument = serde_json::from_reader(intents_file)
            .with_context(|_| "Cannot deserialize intents json data")?;
        let table = Self::new(document.into_records())?;
        info!("Response table loaded with {} intents", table.len());
        Ok(table)
    }

    /// Rejects duplicated tags and records without any non-empty response
    pub fn new(records: Vec<IntentRecord>) -> Result<Self> {
        let mut table = HashMap::with_capacity(records.len());
        for record in records {
            if record.responses.is_empty()
                || record.responses.iter().any(|response| response.is_empty())
            {
                return Err(ResponderError::EmptyResponses(record.tag).into());
            }
            if table.contains_key(&record.tag) {
                return Err(ResponderError::DuplicateIntent(record.tag).into());
            }
            table.insert(record.tag.clone(), record);
        }
        Ok(Self { records: table })
    }

    pub fn get(&self, tag: &str) -> Option<&IntentRecord> {
        self.records.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.records.contains_key(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(|tag| &**tag)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Picks one of the responses of `tag` uniformly at random, or the fallback
/// message when the tag is unknown. Both paths consume one draw from `rng`.
pub fn respond<R: Rng + ?Sized>(tag: &str, table: &ResponseTable, rng: &mut R) -> String {
    match table.get(tag).and_then(|record| record.responses.choose(rng)) {
        Some(response) => response.clone(),
        None => {
            let _: u32 = rng.gen();
            FALLBACK_RESPONSE.to_string()
        }
    }
}
