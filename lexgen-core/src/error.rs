use std::fmt;

use thiserror::Error;

/// Identifies which weighted list of a phonology an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
	/// The syllable template list.
	Syllables,
	/// A phoneme category, by label.
	Category(char),
}

impl fmt::Display for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Scope::Syllables => write!(f, "syllables"),
			Scope::Category(label) => write!(f, "category '{label}'"),
		}
	}
}

#[derive(Debug, Error)]
pub enum LexgenError {
	#[error("template \"{template}\" references undefined category '{label}'")]
	MissingCategory { label: char, template: String },

	#[error("{0} has no values")]
	EmptyCategory(Scope),

	#[error("invalid skew {skew} for {scope}")]
	InvalidSkew { scope: Scope, skew: f64 },

	#[error("weights for {0} sum to zero")]
	DegenerateWeights(Scope),

	#[error("malformed phonology: {0}")]
	MalformedPhonology(String),

	#[error("unknown distribution \"{0}\" (expected poisson or zipf)")]
	UnknownDistribution(String),

	#[error("io error: {0}")]
	Io(#[from] std::io::Error),

	#[error("json error: {0}")]
	Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LexgenError>;
