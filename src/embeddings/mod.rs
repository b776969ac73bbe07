//! Text embedding support: the encoder seam and vector normalization.

pub mod encoder;

#[cfg(test)]
mod tests;

use crate::Result;

pub use encoder::EncoderClient;

/// Guard against division by zero when normalizing a zero vector.
pub const NORM_EPSILON: f32 = 1e-12;

/// Anything that can turn text into unit-length embedding vectors.
///
/// Implementations must return exactly one vector per input string, each
/// L2-normalized. The production implementation is [`EncoderClient`]; tests
/// substitute deterministic local encoders.
pub trait TextEncoder: Send + Sync {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    #[inline]
    fn encode_one(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.encode(std::slice::from_ref(&text.to_string()))?;
        vectors.pop().ok_or_else(|| {
            crate::PlannerError::Encoding("Encoder returned no vector for input".to_string())
        })
    }
}

/// Scale a vector to unit L2 norm.
///
/// A true zero vector stays zero: the epsilon only prevents a division
/// blowup, it does not fabricate direction.
#[inline]
pub fn l2_normalize(vector: &[f32]) -> Vec<f32> {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    vector.iter().map(|x| x / (norm + NORM_EPSILON)).collect()
}
