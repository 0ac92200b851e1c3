//! Proportional distribution of an integer quantity.
//!
//! Splits a total into parts proportional to integer weights while
//! preserving the exact total.
//!
//! # Algorithm
//! Largest-remainder (Hamilton) method:
//! 1. Every part gets `floor(total * w_i / W)`.
//! 2. The units lost to flooring (fewer than `n`) go one each to the parts
//!    with the largest remainders, ties resolved by lowest index.
//!
//! The result is deterministic for identical inputs.
//!
//! # Reference
//! Balinski & Young (2001), "Fair Representation", Ch. 2

use crate::error::{AllocationError, Result};

/// Distributes integer quantities proportionally to fixed weights.
///
/// # Example
///
/// ```
/// use u_allocate::distributor::ProportionalDistributor;
///
/// let distributor = ProportionalDistributor::new(vec![100, 50]).unwrap();
/// assert_eq!(distributor.distribute(9), vec![6, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProportionalDistributor {
    weights: Vec<u64>,
    total_weight: u128,
}

impl ProportionalDistributor {
    /// Creates a distributor for the given weights.
    ///
    /// Fails if `weights` is empty or every weight is zero.
    pub fn new(weights: Vec<u64>) -> Result<Self> {
        if weights.is_empty() {
            return Err(AllocationError::PreconditionViolation(
                "cannot distribute over an empty weight list".into(),
            ));
        }
        let total_weight: u128 = weights.iter().map(|&w| u128::from(w)).sum();
        if total_weight == 0 {
            return Err(AllocationError::PreconditionViolation(
                "cannot distribute over all-zero weights".into(),
            ));
        }
        Ok(Self {
            weights,
            total_weight,
        })
    }

    /// Splits `total` into one part per weight. The parts sum to `total`.
    pub fn distribute(&self, total: u64) -> Vec<u64> {
        let total = u128::from(total);
        let mut parts = Vec::with_capacity(self.weights.len());
        let mut remainders = Vec::with_capacity(self.weights.len());
        let mut assigned: u128 = 0;

        for (i, &w) in self.weights.iter().enumerate() {
            let scaled = total * u128::from(w);
            let part = scaled / self.total_weight;
            parts.push(part);
            remainders.push((scaled % self.total_weight, i));
            assigned += part;
        }

        let leftover = (total - assigned) as usize;
        remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        for &(_, i) in remainders.iter().take(leftover) {
            parts[i] += 1;
        }

        // Each part is at most `total`, which came from a u64.
        parts.into_iter().map(|p| p as u64).collect()
    }
}
