//! Weight vector of the linear value function.
//!
//! The printable form (`Display`) is a bracketed, comma-separated list with one
//! value per feature entry, in feature-vector order:
//!
//! ```
//! use tritris_training::Weights;
//!
//! let weights = Weights::from_fn(|i| i as f64 * 0.5, 3);
//! assert_eq!(weights.to_string(), "[0, 0.5, 1]");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Weights of the linear value function, one per feature entry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Weights(Vec<f64>);

impl From<Vec<f64>> for Weights {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl Weights {
    /// Creates an all-zero weight vector.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    /// Creates a weight vector by applying a function to each index.
    pub fn from_fn<F>(mut f: F, len: usize) -> Self
    where
        F: FnMut(usize) -> f64,
    {
        let mut values = Vec::with_capacity(len);
        for i in 0..len {
            values.push(f(i));
        }
        Self(values)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks that no weight is NaN or infinite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|w| w.is_finite())
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Dot product with a feature vector.
    ///
    /// # Panics
    ///
    /// Panics if `features` does not have the same length as the weights.
    #[must_use]
    pub fn dot(&self, features: &[f64]) -> f64 {
        assert_eq!(features.len(), self.0.len());
        self.0.iter().zip(features).map(|(w, x)| w * x).sum()
    }

    /// Adds `scale * features[i]` to every weight `i`.
    ///
    /// # Panics
    ///
    /// Panics if `features` does not have the same length as the weights.
    pub fn add_scaled(&mut self, scale: f64, features: &[f64]) {
        assert_eq!(features.len(), self.0.len());
        for (w, x) in self.0.iter_mut().zip(features) {
            *w += scale * x;
        }
    }
}

impl fmt::Display for Weights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, w) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{w}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let weights = Weights::zeros(4);
        assert_eq!(weights.len(), 4);
        assert_eq!(weights.dot(&[1.0, 2.0, 3.0, 4.0]), 0.0);
    }

    #[test]
    fn test_dot_and_add_scaled() {
        let mut weights = Weights::from(vec![1.0, -2.0, 0.5]);
        assert_eq!(weights.dot(&[1.0, 1.0, 2.0]), 0.0);

        weights.add_scaled(0.5, &[2.0, 0.0, 1.0]);
        assert_eq!(weights.as_slice(), &[2.0, -2.0, 1.0]);
    }

    #[test]
    #[should_panic(expected = "assertion `left == right` failed")]
    fn test_dot_rejects_wrong_dimension() {
        let _ = Weights::zeros(3).dot(&[1.0, 2.0]);
    }

    #[test]
    fn test_is_finite() {
        assert!(Weights::zeros(3).is_finite());
        assert!(!Weights::from(vec![0.0, f64::NAN]).is_finite());
        assert!(!Weights::from(vec![f64::INFINITY]).is_finite());
    }

    #[test]
    fn test_display() {
        assert_eq!(Weights::zeros(0).to_string(), "[]");
        assert_eq!(
            Weights::from(vec![0.25, -1.5, 3.0]).to_string(),
            "[0.25, -1.5, 3]"
        );
    }

    #[test]
    fn test_serialization() {
        let weights = Weights::from(vec![0.25, -1.5]);
        let serialized = serde_json::to_string(&weights).unwrap();
        assert_eq!(serialized, "[0.25,-1.5]");
        let deserialized: Weights = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, weights);
    }
}
