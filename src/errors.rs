use failure::Fail;

#[derive(Debug, Fail)]
pub enum ResponderError {
    #[fail(display = "Unable to read file '{}'", _0)]
    ModelLoad(String),
    #[fail(display = "Expected model version {} but found {}", runner, model)]
    WrongModelVersion { model: String, runner: &'static str },
    #[fail(display = "Invalid configuration: {}", _0)]
    InvalidConfiguration(String),
    #[fail(display = "Duplicate intent tag: '{}'", _0)]
    DuplicateIntent(String),
    #[fail(display = "Intent '{}' has no usable response", _0)]
    EmptyResponses(String),
    #[fail(
        display = "Predicted label index {} is out of range for {} labels",
        index, nb_labels
    )]
    LabelIndexOutOfRange { index: usize, nb_labels: usize },
    #[fail(display = "Invalid prediction: {}", _0)]
    InvalidPrediction(String),
    #[fail(
        display = "Token id {} is out of the embedding range (vocabulary size {})",
        token_id, vocabulary_size
    )]
    TokenOutOfRange {
        token_id: usize,
        vocabulary_size: usize,
    },
}

pub type Result<T> = ::std::result::Result<T, ::failure::Error>;
