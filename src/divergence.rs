use crate::error::{Error, Result};

use ndarray::ArrayView1;


/// Jensen-Shannon divergence between two discrete distributions, natural log.
/// Symmetric, zero for identical inputs and at most ln 2.
pub fn jensen_shannon(p: ArrayView1<f32>, q: ArrayView1<f32>) -> Result<f64> {

    if p.len() != q.len() {
        return Err(Error::Dimension { expected: p.len(), found: q.len() });
    }

    let p_total: f64 = p.iter().map(|x| *x as f64).sum();
    let q_total: f64 = q.iter().map(|x| *x as f64).sum();
    for total in [p_total, q_total] {
        if !total.is_finite() || total <= 0.0 {
            return Err(Error::Distribution(total));
        }
    }

    // KL of each side against the midpoint m, with 0 * ln(0 / m) = 0
    let mut divergence = 0.0;
    for (pi, qi) in p.iter().zip(q.iter()) {
        let pi = *pi as f64 / p_total;
        let qi = *qi as f64 / q_total;
        let mi = 0.5 * (pi + qi);
        if pi > 0.0 {
            divergence += 0.5 * pi * (pi / mi).ln();
        }
        if qi > 0.0 {
            divergence += 0.5 * qi * (qi / mi).ln();
        }
    }

    // rounding can leave a tiny negative value for near identical inputs
    Ok(divergence.max(0.0))
}
