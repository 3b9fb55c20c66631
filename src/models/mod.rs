pub mod classifier;
pub mod engine;
pub mod intents;
pub mod vocabulary;

pub use self::classifier::*;
pub use self::engine::*;
pub use self::intents::*;
pub use self::vocabulary::*;
