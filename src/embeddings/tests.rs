use super::*;

#[test]
fn normalized_vectors_have_unit_norm() {
    let vector = vec![3.0, 4.0];
    let normalized = l2_normalize(&vector);
    let norm: f32 = normalized.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-5);
    assert!((normalized[0] - 0.6).abs() < 1e-5);
    assert!((normalized[1] - 0.8).abs() < 1e-5);
}

#[test]
fn zero_vector_stays_zero() {
    let normalized = l2_normalize(&[0.0, 0.0, 0.0]);
    assert_eq!(normalized, vec![0.0, 0.0, 0.0]);
}

#[test]
fn unit_vector_is_unchanged() {
    let normalized = l2_normalize(&[1.0, 0.0]);
    assert!((normalized[0] - 1.0).abs() < 1e-5);
    assert_eq!(normalized[1], 0.0);
}

struct FixedEncoder;

impl TextEncoder for FixedEncoder {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
    }
}

#[test]
fn encode_one_unwraps_single_vector() {
    let encoder = FixedEncoder;
    let vector = encoder.encode_one("hello").expect("should encode");
    assert_eq!(vector, vec![1.0, 0.0]);
}
