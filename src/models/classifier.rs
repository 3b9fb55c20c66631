use serde::Deserialize;

#[derive(Debug, Deserialize, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Linear,
    Relu,
    Sigmoid,
    Tanh,
    Softmax,
}

impl Default for Activation {
    fn default() -> Self {
        Activation::Linear
    }
}

/// Embedding lookup followed by global average pooling and a stack of dense
/// layers
#[derive(Debug, Deserialize)]
pub struct DenseClassifierModel {
    /// matrix with shape (v, d)
    ///
    /// - v = vocabulary size, token ids included
    /// - d = embedding dimension
    pub embedding: Vec<Vec<f32>>,
    pub layers: Vec<DenseLayerModel>,
}

#[derive(Debug, Deserialize)]
pub struct DenseLayerModel {
    /// matrix with shape (input, output)
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
    #[serde(default)]
    pub activation: Activation,
}
