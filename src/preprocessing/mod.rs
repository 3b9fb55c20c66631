mod padding;
mod tokenization;
mod vocabulary;

pub use self::padding::SequencePadder;
pub use self::tokenization::Tokenizer;
pub use self::vocabulary::Vocabulary;
