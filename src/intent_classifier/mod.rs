mod dense;

use ndarray::{Array2, ArrayView2};

pub use self::dense::DenseIntentClassifier;
use crate::errors::*;
use crate::utils::TokenId;

/// Pretrained model scoring padded token sequences.
///
/// `predict` receives a batch of shape (n, max_len) and returns one row of
/// scores per sequence, positionally aligned with the label set.
pub trait IntentClassifier: Send + Sync {
    fn nb_classes(&self) -> usize;

    /// Number of token ids the model accepts, when it is bounded
    fn vocabulary_size(&self) -> Option<usize> {
        None
    }

    fn predict(&self, batch: &ArrayView2<TokenId>) -> Result<Array2<f32>>;
}
