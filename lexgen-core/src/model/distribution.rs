use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LexgenError;

/// Probability distribution used to turn a ranked list into weights.
///
/// Both variants map `(length, skew)` to one weight per rank, rank 0 being
/// the most frequent entry of the list. Weights are relative: they are not
/// guaranteed to sum to 1.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
	/// Weight at rank `i` is the Poisson mass at `i` with rate `skew`.
	#[default]
	Poisson,
	/// Weight at rank `i` is the Zipf mass at rank `i + 1` with exponent `1 / skew`.
	Zipf,
}

impl Distribution {
	/// Returns `length` weights for a list whose skew parameter is `skew`.
	///
	/// Returns `None` if `skew` is outside the domain of the distribution
	/// (negative, NaN or infinite).
	pub fn weights(self, length: usize, skew: f64) -> Option<Vec<f64>> {
		if !self.accepts_skew(skew) {
			return None;
		}
		Some(match self {
			Distribution::Poisson => poisson_weights(length, skew),
			Distribution::Zipf => zipf_weights(length, skew),
		})
	}

	/// Whether `skew` is a usable parameter for this distribution.
	pub fn accepts_skew(self, skew: f64) -> bool {
		skew.is_finite() && skew >= 0.0
	}
}

impl fmt::Display for Distribution {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Distribution::Poisson => write!(f, "poisson"),
			Distribution::Zipf => write!(f, "zipf"),
		}
	}
}

impl FromStr for Distribution {
	type Err = LexgenError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"poisson" => Ok(Distribution::Poisson),
			"zipf" => Ok(Distribution::Zipf),
			_ => Err(LexgenError::UnknownDistribution(s.to_owned())),
		}
	}
}

/// Poisson mass at ranks `0..length` with rate `lambda`.
///
/// Computed in log space so that large ranks underflow to 0 instead of
/// overflowing the factorial.
fn poisson_weights(length: usize, lambda: f64) -> Vec<f64> {
	if lambda == 0.0 {
		// Degenerate rate: all mass on rank 0
		return (0..length).map(|k| if k == 0 { 1.0 } else { 0.0 }).collect();
	}

	let ln_lambda = lambda.ln();
	let mut ln_factorial = 0.0;
	let mut weights = Vec::with_capacity(length);
	for k in 0..length {
		if k > 0 {
			ln_factorial += (k as f64).ln();
		}
		weights.push((k as f64 * ln_lambda - lambda - ln_factorial).exp());
	}
	weights
}

/// Zipf weights for ranks `1..=length`, re-indexed from 0.
///
/// The table is built with one extra slot for rank 0, which carries no mass
/// in the 1-indexed formulation, and that slot is dropped.
fn zipf_weights(length: usize, skew: f64) -> Vec<f64> {
	let shape = if skew == 0.0 { 1.0 } else { 1.0 / skew };
	let mut table = zipf_pmf_table(length + 1, shape);
	table.split_off(1)
}

/// Truncated Zipf mass for ranks `0..len`, normalized over ranks `1..len`.
///
/// Index 0 is always 0.
fn zipf_pmf_table(len: usize, shape: f64) -> Vec<f64> {
	let norm: f64 = (1..len).map(|k| (k as f64).powf(-shape)).sum();
	(0..len)
		.map(|k| if k == 0 { 0.0 } else { (k as f64).powf(-shape) / norm })
		.collect()
}
