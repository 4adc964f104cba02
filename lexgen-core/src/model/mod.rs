//! Phonology model and word generation.
//!
//! - Typed phonology description (`Phonology`)
//! - Weight functions over ranked lists (`Distribution`)
//! - Compilation of a phonology into weighted tables (`CompiledPhonology`)
//! - Syllable and word sampling
//! - A high-level generation interface (`Generator`)

/// Weight functions mapping `(length, skew)` to one weight per rank.
pub mod distribution;

/// Typed phonology description with validated construction.
///
/// Parses the JSON file format and provides the built-in Hrau fixture.
pub mod phonology;

/// Weighted-choice primitive shared by templates and categories.
pub mod weighted;

/// Attaches weights to a phonology and resolves template labels.
pub mod compiled;

/// Syllable and word sampling over a compiled phonology.
pub mod sampler;

/// Generation requests, vocabulary generation and the `Generator` facade.
pub mod generator;
