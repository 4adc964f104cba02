//! Phonology-weighted word generation for constructed languages.
//!
//! This crate turns a declarative phonology (phoneme categories, syllable
//! templates and per-list skew parameters) into pseudo-random words:
//! - Poisson and Zipf weight functions over frequency-ranked lists
//! - Compilation of a phonology into weighted sampling tables
//! - Independent syllable, word and vocabulary sampling
//! - Reproducible, optionally parallel generation from a seed

/// Phonology model, compilation and sampling.
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

/// File and directory helpers.
pub mod io;

pub use error::{LexgenError, Result, Scope};
pub use model::compiled::{CompiledPhonology, compile};
pub use model::distribution::Distribution;
pub use model::generator::{GenerationRequest, Generator, generate_vocabulary};
pub use model::phonology::{PhoneCategory, Phonology, SyllableTemplateSet};
pub use model::sampler::{sample_syllable, sample_syllable_symbols, sample_word};
