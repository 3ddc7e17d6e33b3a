use ndarray::{Array1, Array2, ArrayBase, ArrayView2, Axis, Data, Dimension, Ix2};
use rand::{prelude::SliceRandom, rngs::SmallRng, Rng, SeedableRng};
use rand_distr::StandardNormal;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::activation::{sample_binary, sigmoid};
use crate::config::TrainConfig;
use crate::error::{InvalidArgument, RbmError, Result};

// Gibbs iterations used by Rbm::sample
pub const DEFAULT_GIBBS_STEPS: usize = 1000;

/// A binary-binary Restricted Boltzmann Machine.
#[derive(Debug, Clone)]
pub struct Rbm {
    n_visible: usize,
    n_hidden: usize,
    // n_visible x n_hidden
    weights: Array2<f64>,
    visible_bias: Array1<f64>,
    hidden_bias: Array1<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    // Per epoch: mean squared difference between the data and its reconstruction probabilities
    pub reconstruction_errors: Vec<f64>,
}

impl Rbm {
    // Weights ~ Normal(0, sqrt(2 / (n_visible + n_hidden))), biases start at zero
    pub fn new(n_hidden: usize, n_visible: usize, rng: &mut impl Rng) -> Result<Self> {
        if n_hidden == 0 {
            return Err(InvalidArgument::LayerSize {
                layer: "n_hidden",
                value: n_hidden,
            }
            .into());
        }
        if n_visible == 0 {
            return Err(InvalidArgument::LayerSize {
                layer: "n_visible",
                value: n_visible,
            }
            .into());
        }

        let std_dev = (2.0 / (n_visible + n_hidden) as f64).sqrt();
        let weights = Array2::from_shape_simple_fn((n_visible, n_hidden), || {
            std_dev * rng.sample::<f64, _>(StandardNormal)
        });
        debug!(n_visible, n_hidden, std_dev, "Initialized RBM");

        Ok(Rbm {
            n_visible,
            n_hidden,
            weights,
            visible_bias: Array1::zeros(n_visible),
            hidden_bias: Array1::zeros(n_hidden),
        })
    }

    pub fn n_visible(&self) -> usize {
        self.n_visible
    }

    pub fn n_hidden(&self) -> usize {
        self.n_hidden
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    pub fn visible_bias(&self) -> &Array1<f64> {
        &self.visible_bias
    }

    pub fn hidden_bias(&self) -> &Array1<f64> {
        &self.hidden_bias
    }

    // P(h = 1 | v) for each row: σ(v·W + b_h)
    pub fn hidden_probabilities<S>(&self, visible: &ArrayBase<S, Ix2>) -> Result<Array2<f64>>
    where
        S: Data<Elem = f64>,
    {
        check_width(visible.ncols(), self.n_visible)?;
        let mut activation = visible.dot(&self.weights);
        activation += &self.hidden_bias;
        activation.mapv_inplace(sigmoid);
        Ok(activation)
    }

    // P(v = 1 | h) for each row: σ(h·Wᵗ + b_v)
    pub fn visible_probabilities<S>(&self, hidden: &ArrayBase<S, Ix2>) -> Result<Array2<f64>>
    where
        S: Data<Elem = f64>,
    {
        check_width(hidden.ncols(), self.n_hidden)?;
        let mut activation = hidden.dot(&self.weights.t());
        activation += &self.visible_bias;
        activation.mapv_inplace(sigmoid);
        Ok(activation)
    }

    // CD-1 over mini-batches of the reshuffled rows. Trailing axes of `data` are flattened.
    // Every update is divided by the configured batch size, even for a short final batch.
    pub fn train<S, A, D>(
        &mut self,
        data: &ArrayBase<S, D>,
        config: &TrainConfig,
        rng: &mut impl Rng,
    ) -> Result<TrainReport>
    where
        S: Data<Elem = A>,
        A: Copy + Into<f64>,
        D: Dimension,
    {
        config.validate()?;
        let data = self.flatten(data)?;
        let n_samples = data.nrows();

        if n_samples == 0 {
            warn!("Training on an empty dataset, parameters left unchanged");
            return Ok(TrainReport {
                reconstruction_errors: vec![0.0; config.epochs],
            });
        }

        let normalizer = config.batch_size as f64;
        let mut order: Vec<usize> = (0..n_samples).collect();
        let mut reconstruction_errors = Vec::with_capacity(config.epochs);

        for epoch in 0..config.epochs {
            order.shuffle(rng);
            let shuffled = data.select(Axis(0), &order);

            let mut squared_error = 0.0;
            for batch in shuffled.axis_chunks_iter(Axis(0), config.batch_size) {
                squared_error +=
                    self.contrastive_divergence(batch, config.learning_rate, normalizer, rng)?;
            }

            let error = squared_error / (n_samples * self.n_visible) as f64;
            info!(epoch, reconstruction_error = error, "Epoch complete");
            reconstruction_errors.push(error);
        }

        Ok(TrainReport {
            reconstruction_errors,
        })
    }

    // One CD-1 update. Returns the batch's summed squared reconstruction error.
    fn contrastive_divergence(
        &mut self,
        v0: ArrayView2<f64>,
        learning_rate: f64,
        normalizer: f64,
        rng: &mut impl Rng,
    ) -> Result<f64> {
        // Positive phase
        let h0_prob = self.hidden_probabilities(&v0)?;
        let h0_sample = sample_binary(&h0_prob, rng)?;

        // Reconstruction
        let v1_prob = self.visible_probabilities(&h0_sample)?;
        let v1_sample = sample_binary(&v1_prob, rng)?;

        // Negative phase. h1 stays a probability and is never resampled.
        let h1_prob = self.hidden_probabilities(&v1_sample)?;

        let d_weights = v0.t().dot(&h0_sample) - v1_sample.t().dot(&h1_prob);
        let d_visible_bias = (&v0 - &v1_sample).sum_axis(Axis(0));
        let d_hidden_bias = (&h0_sample - &h1_prob).sum_axis(Axis(0));

        let step = learning_rate / normalizer;
        self.weights.scaled_add(step, &d_weights);
        self.visible_bias.scaled_add(step, &d_visible_bias);
        self.hidden_bias.scaled_add(step, &d_hidden_bias);

        Ok((&v0 - &v1_prob).mapv(|x| x * x).sum())
    }

    // Collapse every axis after the first into one row per sample
    fn flatten<S, A, D>(&self, data: &ArrayBase<S, D>) -> Result<Array2<f64>>
    where
        S: Data<Elem = A>,
        A: Copy + Into<f64>,
        D: Dimension,
    {
        let shape = data.shape();
        if shape.len() < 2 {
            return Err(RbmError::ShapeMismatch {
                expected: self.n_visible,
                got: data.len(),
            });
        }
        let n_samples = shape[0];
        let width: usize = shape[1..].iter().product();
        check_width(width, self.n_visible)?;

        // iter() walks in logical (row-major) order whatever the memory layout
        let values: Vec<f64> = data.iter().map(|&x| x.into()).collect();
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, x)| !x.is_finite())
        {
            return Err(RbmError::InvalidData { index, value });
        }
        Array2::from_shape_vec((n_samples, width), values).map_err(|_| {
            RbmError::ShapeMismatch {
                expected: self.n_visible,
                got: width,
            }
        })
    }

    // Block Gibbs sampling from uniform noise
    pub fn sample(&self, rng: &mut impl Rng) -> Result<Array1<u8>> {
        self.sample_with_steps(DEFAULT_GIBBS_STEPS, rng)
    }

    pub fn sample_with_steps(&self, gibbs_steps: usize, rng: &mut impl Rng) -> Result<Array1<u8>> {
        // Kept as a single-row matrix so the batch helpers apply unchanged
        let mut visible = Array2::from_shape_simple_fn((1, self.n_visible), || {
            if rng.gen_bool(0.5) {
                1.0
            } else {
                0.0
            }
        });

        for _ in 0..gibbs_steps {
            let hidden = sample_binary(&self.hidden_probabilities(&visible)?, rng)?;
            visible = sample_binary(&self.visible_probabilities(&hidden)?, rng)?;
        }

        Ok(visible.row(0).mapv(|x| x as u8))
    }

    // Independent chains in parallel, one output row each.
    // Seeds are drawn up front so the result does not depend on rayon's scheduling.
    pub fn sample_many(
        &self,
        n_samples: usize,
        gibbs_steps: usize,
        rng: &mut impl Rng,
    ) -> Result<Array2<u8>> {
        let seeds: Vec<u64> = (0..n_samples).map(|_| rng.gen()).collect();

        let mut output = Array2::<u8>::zeros((n_samples, self.n_visible));
        output
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .zip(seeds.into_par_iter())
            .try_for_each(|(mut row, seed)| -> Result<()> {
                let mut chain_rng = SmallRng::seed_from_u64(seed);
                row.assign(&self.sample_with_steps(gibbs_steps, &mut chain_rng)?);
                Ok(())
            })?;
        Ok(output)
    }
}

fn check_width(got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(RbmError::ShapeMismatch { expected, got });
    }
    Ok(())
}
