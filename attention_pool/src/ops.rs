//! Array primitives behind the scorer: projection, padding detection,
//! masked fill and softmax.

use nalgebra::{DMatrix, DVector};

/// One logit per sequence position: `x[l, :] . w`.
pub fn project(x: &DMatrix<f64>, w: &DVector<f64>) -> DVector<f64> {
    x * w
}

/// Per position, the fraction of features that differ from `mask_value`.
///
/// Exactly 0.0 only when every feature equals the sentinel.
pub fn real_fraction(x: &DMatrix<f64>, mask_value: f64) -> DVector<f64> {
    let width = x.ncols();
    DVector::from_fn(x.nrows(), |l, _| {
        if width == 0 {
            return 0.0;
        }
        let real = x.row(l).iter().filter(|&&v| v != mask_value).count();
        real as f64 / width as f64
    })
}

pub fn masked_fill(values: &mut DVector<f64>, mask: &[bool], fill: f64) {
    for (v, &m) in values.iter_mut().zip(mask) {
        if m {
            *v = fill;
        }
    }
}

/// Max-subtracted softmax.
///
/// `-inf` entries map to exactly 0.0. If every entry is `-inf` the result is
/// all NaN.
pub fn softmax(logits: &DVector<f64>) -> DVector<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exp = logits.map(|v| (v - max).exp());
    let sum = exp.sum();
    exp / sum
}
