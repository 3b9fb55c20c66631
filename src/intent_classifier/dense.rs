use std::fs::File;
use std::path::Path;

use failure::{format_err, ResultExt};
use log::info;
use ndarray::prelude::*;

use crate::errors::*;
use crate::intent_classifier::IntentClassifier;
use crate::models::{Activation, DenseClassifierModel, DenseLayerModel};
use crate::utils::TokenId;

/// Token embeddings averaged over the whole padded sequence, followed by
/// dense layers. The last layer outputs one score per intent label.
pub struct DenseIntentClassifier {
    /// matrix with shape (v, d)
    /// ------------------------
    ///
    /// - v = number of embedded token ids
    /// - d = embedding dimension
    embedding: Array2<f32>,
    layers: Vec<DenseLayer>,
}

struct DenseLayer {
    /// matrix with shape (input, output)
    weights: Array2<f32>,
    bias: Array1<f32>,
    activation: Activation,
}

impl DenseIntentClassifier {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let classifier_path = path.as_ref();
        let model_file = File::open(classifier_path).with_context(|_| {
            format!(
                "Cannot open DenseIntentClassifier file '{:?}'",
                classifier_path
            )
        })?;
        let model: DenseClassifierModel = serde_json::from_reader(model_file)
            .with_context(|_| "Cannot deserialize DenseIntentClassifier json data")?;
        let classifier = Self::new(model)?;
        info!(
            "Intent classifier loaded ({} embedded tokens, {} layers, {} classes)",
            classifier.nb_embedded_tokens(),
            classifier.layers.len(),
            classifier.nb_classes()
        );
        Ok(classifier)
    }

    pub fn new(model: DenseClassifierModel) -> Result<Self> {
        let embedding = to_array2(model.embedding, "embedding")?;
        if model.layers.is_empty() {
            return Err(ResponderError::InvalidConfiguration(
                "the classifier has no dense layer".to_string(),
            )
            .into());
        }
        let mut input_dim = embedding.dim().1;
        let mut layers = Vec::with_capacity(model.layers.len());
        for (layer_index, layer_model) in model.layers.into_iter().enumerate() {
            let layer = DenseLayer::new(layer_model, layer_index)?;
            if layer.input_dim() != input_dim {
                return Err(ResponderError::InvalidConfiguration(format!(
                    "dense layer {} expects {} inputs but receives {}",
                    layer_index,
                    layer.input_dim(),
                    input_dim
                ))
                .into());
            }
            input_dim = layer.output_dim();
            layers.push(layer);
        }
        Ok(Self { embedding, layers })
    }

    fn nb_embedded_tokens(&self) -> usize {
        self.embedding.dim().0
    }

    fn embed(&self, batch: &ArrayView2<TokenId>) -> Result<Array2<f32>> {
        let (nb_sequences, _) = batch.dim();
        let mut pooled = Array2::<f32>::zeros((nb_sequences, self.embedding.dim().1));
        for (mut pooled_row, sequence) in pooled.outer_iter_mut().zip(batch.outer_iter()) {
            for &token_id in sequence.iter() {
                if token_id >= self.nb_embedded_tokens() {
                    return Err(ResponderError::TokenOutOfRange {
                        token_id,
                        vocabulary_size: self.nb_embedded_tokens(),
                    }
                    .into());
                }
                pooled_row += &self.embedding.row(token_id);
            }
            if !sequence.is_empty() {
                pooled_row /= sequence.len() as f32;
            }
        }
        Ok(pooled)
    }
}

impl IntentClassifier for DenseIntentClassifier {
    fn nb_classes(&self) -> usize {
        self.layers
            .last()
            .map(|layer| layer.output_dim())
            .unwrap_or(0)
    }

    fn vocabulary_size(&self) -> Option<usize> {
        Some(self.nb_embedded_tokens())
    }

    fn predict(&self, batch: &ArrayView2<TokenId>) -> Result<Array2<f32>> {
        let mut activations = self.embed(batch)?;
        for layer in &self.layers {
            activations = layer.forward(&activations);
        }
        Ok(activations)
    }
}

impl DenseLayer {
    fn new(model: DenseLayerModel, layer_index: usize) -> Result<Self> {
        let weights = to_array2(model.weights, &format!("layer {} weights", layer_index))?;
        let bias = Array::from_vec(model.bias);
        if bias.dim() != weights.dim().1 {
            return Err(ResponderError::InvalidConfiguration(format!(
                "layer {} has {} outputs but {} biases",
                layer_index,
                weights.dim().1,
                bias.dim()
            ))
            .into());
        }
        Ok(Self {
            weights,
            bias,
            activation: model.activation,
        })
    }

    fn input_dim(&self) -> usize {
        self.weights.dim().0
    }

    fn output_dim(&self) -> usize {
        self.weights.dim().1
    }

    fn forward(&self, input: &Array2<f32>) -> Array2<f32> {
        let mut output = input.dot(&self.weights);
        output += &self.bias;
        match self.activation {
            Activation::Linear => {}
            Activation::Relu => output.mapv_inplace(|x| x.max(0.)),
            Activation::Sigmoid => output.mapv_inplace(logit),
            Activation::Tanh => output.mapv_inplace(f32::tanh),
            Activation::Softmax => {
                for mut row in output.outer_iter_mut() {
                    let max = row.fold(std::f32::NEG_INFINITY, |acc, &x| acc.max(x));
                    row.mapv_inplace(|x| (x - max).exp());
                    let divider = row.sum();
                    row /= divider;
                }
            }
        }
        output
    }
}

fn logit(x: f32) -> f32 {
    1. / (1. + (-x).exp())
}

fn to_array2(rows: Vec<Vec<f32>>, name: &str) -> Result<Array2<f32>> {
    let nb_rows = rows.len();
    let nb_columns = rows.first().map(|row| row.len()).unwrap_or(0);
    if nb_rows == 0 || nb_columns == 0 {
        return Err(format_err!("Matrix '{}' is empty", name));
    }
    if rows.iter().any(|row| row.len() != nb_columns) {
        return Err(format_err!("Matrix '{}' has rows of different lengths", name));
    }
    let values: Vec<f32> = rows.into_iter().flatten().collect();
    Ok(Array::from_shape_vec((nb_rows, nb_columns), values)?)
}
