//! Validated probability types.
//!
//! [`Prior`] is the probability that a case drawn from the deployment
//! population is truly positive. It is either supplied by the caller or
//! estimated from the evaluation labels.

use crate::{CutoffError, Result};

/// Class-1 prior probability in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct Prior(f64);

impl Prior {
    /// Create a [`Prior`] from a raw probability.
    ///
    /// # Errors
    ///
    /// Returns an error if `p` is not a finite value in `[0, 1]`.
    pub fn new(p: f64) -> Result<Self> {
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(CutoffError::InvalidInput(format!(
                "prior must be in [0, 1], got {p}"
            )));
        }
        Ok(Self(p))
    }

    /// Empirical positive rate of a binary label vector.
    ///
    /// # Errors
    ///
    /// Returns an error if `labels` is empty or contains values other than
    /// 0 and 1.
    pub fn from_labels(labels: &[u8]) -> Result<Self> {
        if labels.is_empty() {
            return Err(CutoffError::InvalidInput("empty label vector".into()));
        }
        let mut positives = 0usize;
        for (i, &label) in labels.iter().enumerate() {
            match label {
                0 => {}
                1 => positives += 1,
                other => {
                    return Err(CutoffError::InvalidInput(format!(
                        "label at index {i} is {other}, expected 0 or 1"
                    )))
                }
            }
        }
        Ok(Self(positives as f64 / labels.len() as f64))
    }

    /// The raw probability of class 1.
    pub fn p1(self) -> f64 {
        self.0
    }

    /// The complementary probability of class 0.
    pub fn p0(self) -> f64 {
        1.0 - self.0
    }
}

impl TryFrom<f64> for Prior {
    type Error = CutoffError;

    fn try_from(p: f64) -> Result<Self> {
        Self::new(p)
    }
}

impl From<Prior> for f64 {
    fn from(prior: Prior) -> f64 {
        prior.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_closed_unit_interval() {
        assert_eq!(Prior::new(0.0).unwrap().p1(), 0.0);
        assert_eq!(Prior::new(1.0).unwrap().p1(), 1.0);
        assert!((Prior::new(0.3).unwrap().p0() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Prior::new(-0.01).unwrap_err().is_invalid_input());
        assert!(Prior::new(1.01).is_err());
        assert!(Prior::new(f64::NAN).is_err());
        assert!(Prior::try_from(f64::INFINITY).is_err());
    }

    #[test]
    fn empirical_rate() {
        let prior = Prior::from_labels(&[1, 1, 0, 0, 1, 1, 0, 0]).unwrap();
        assert!((prior.p1() - 0.5).abs() < 1e-12);

        let prior = Prior::from_labels(&[1, 0, 0, 0]).unwrap();
        assert!((prior.p1() - 0.25).abs() < 1e-12);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_validates_range() {
        let prior: Prior = serde_json::from_str("0.25").unwrap();
        assert_eq!(prior.p1(), 0.25);
        assert_eq!(serde_json::to_string(&prior).unwrap(), "0.25");

        assert!(serde_json::from_str::<Prior>("1.5").is_err());
        assert!(serde_json::from_str::<Prior>("-0.1").is_err());
    }

    #[test]
    fn empirical_rate_rejects_bad_labels() {
        assert!(Prior::from_labels(&[]).is_err());
        assert!(Prior::from_labels(&[0, 1, 2]).is_err());
    }
}
