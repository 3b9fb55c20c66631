use crate::errors::*;
use crate::models::PaddingSide;
use crate::utils::TokenId;

/// Brings encoded sequences to the fixed length expected by the classifier
#[derive(Debug, Clone, PartialEq)]
pub struct SequencePadder {
    max_len: usize,
    padding: PaddingSide,
    truncating: PaddingSide,
    value: TokenId,
}

impl SequencePadder {
    /// Pre-padding with zeros and post-truncation
    pub fn new(max_len: usize) -> Result<Self> {
        Self::with_sides(max_len, PaddingSide::Pre, PaddingSide::Post, 0)
    }

    pub fn with_sides(
        max_len: usize,
        padding: PaddingSide,
        truncating: PaddingSide,
        value: TokenId,
    ) -> Result<Self> {
        if max_len == 0 {
            return Err(ResponderError::InvalidConfiguration(
                "max_len must be strictly positive".to_string(),
            )
            .into());
        }
        Ok(Self {
            max_len,
            padding,
            truncating,
            value,
        })
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn padding_value(&self) -> TokenId {
        self.value
    }

    pub fn pad(&self, sequence: &[TokenId]) -> Vec<TokenId> {
        let kept = if sequence.len() > self.max_len {
            match self.truncating {
                PaddingSide::Pre => &sequence[sequence.len() - self.max_len..],
                PaddingSide::Post => &sequence[..self.max_len],
            }
        } else {
            sequence
        };
        let nb_fill = self.max_len - kept.len();
        let mut padded = Vec::with_capacity(self.max_len);
        match self.padding {
            PaddingSide::Pre => {
                padded.extend(std::iter::repeat(self.value).take(nb_fill));
                padded.extend_from_slice(kept);
            }
            PaddingSide::Post => {
                padded.extend_from_slice(kept);
                padded.extend(std::iter::repeat(self.value).take(nb_fill));
            }
        }
        padded
    }
}
