use ndarray::{Array, ArrayBase, Data, Dimension};
use rand::Rng;

use crate::error::{InvalidArgument, Result};

// Logistic function. Only ever exponentiates a non-positive number, so neither branch overflows.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

// Independent Bernoulli draw per entry: 1.0 with probability p, else 0.0.
// The whole array is validated before anything is drawn.
pub fn sample_binary<S, D>(probs: &ArrayBase<S, D>, rng: &mut impl Rng) -> Result<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    // NaN fails the range check as well
    if let Some((index, &value)) = probs
        .iter()
        .enumerate()
        .find(|(_, p)| !(0.0..=1.0).contains(*p))
    {
        return Err(InvalidArgument::Probability { index, value }.into());
    }

    // gen::<f64>() is in [0, 1), so p = 0 never fires and p = 1 always does
    Ok(probs.map(|&p| if rng.gen::<f64>() < p { 1.0 } else { 0.0 }))
}
