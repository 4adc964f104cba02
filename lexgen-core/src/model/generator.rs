use std::ops::Range;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::compiled::{CompiledPhonology, compile};
use crate::model::distribution::Distribution;
use crate::model::phonology::Phonology;
use crate::model::sampler::sample_word;

/// Requests with at least this many words are generated on worker threads.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Parameters of one generation run.
///
/// # Fields
/// - `word_count`: number of words to produce (0 gives an empty list)
/// - `syllables_per_word`: syllables in each word (0 gives empty words)
/// - `distribution`: weight function used to compile the phonology
/// - `alphabetize`: sort the result by code point instead of keeping generation order
/// - `seed`: makes the output reproducible when set
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GenerationRequest {
	pub word_count: usize,
	pub syllables_per_word: usize,
	pub distribution: Distribution,
	pub alphabetize: bool,
	pub seed: Option<u64>,
}

impl Default for GenerationRequest {
	fn default() -> Self {
		Self {
			word_count: 1,
			syllables_per_word: 1,
			distribution: Distribution::Poisson,
			alphabetize: false,
			seed: None,
		}
	}
}

/// Generates `word_count` words from a compiled phonology.
///
/// Words are not deduplicated. With `alphabetize` the list is sorted by
/// code point, otherwise it keeps generation order.
pub fn generate_vocabulary<R: Rng + ?Sized>(
	phonology: &CompiledPhonology,
	word_count: usize,
	syllable_count: usize,
	alphabetize: bool,
	rng: &mut R,
) -> Vec<String> {
	let mut words: Vec<String> = (0..word_count)
		.map(|_| sample_word(phonology, syllable_count, &mut *rng))
		.collect();
	log::trace!("generated {} words: {:?}", words.len(), words);
	if alphabetize {
		words.sort();
	}
	words
}

/// High-level entry point owning a validated phonology.
///
/// # Responsibilities
/// - Load a phonology from disk or take one built in memory
/// - Compile it once per request with the requested distribution
/// - Produce reproducible output for seeded requests, splitting large
///   requests across threads
#[derive(Debug, Clone)]
pub struct Generator {
	phonology: Phonology,
}

impl Generator {
	pub fn new(phonology: Phonology) -> Self {
		Self { phonology }
	}

	/// Creates a generator from a JSON phonology file.
	///
	/// # Errors
	/// Returns an error if the file cannot be read or is not a valid phonology.
	pub fn from_file<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		Ok(Self::new(Phonology::load(filepath)?))
	}

	pub fn language(&self) -> &str {
		self.phonology.language()
	}

	pub fn phonology(&self) -> &Phonology {
		&self.phonology
	}

	/// Compiles the phonology with `distribution`.
	pub fn compile(&self, distribution: Distribution) -> Result<CompiledPhonology> {
		compile(&self.phonology, distribution)
	}

	/// Runs one generation request.
	///
	/// The phonology is compiled before any word is drawn, so a request
	/// either fails up front or returns the full list.
	///
	/// # Determinism
	/// With a seed, word `i` is drawn from its own RNG derived from
	/// `(seed, i)`: the output does not depend on how the work is split.
	pub fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>> {
		let compiled = self.compile(request.distribution)?;
		let count = request.word_count;
		let syllables = request.syllables_per_word;

		let mut words = if count >= PARALLEL_THRESHOLD {
			generate_parallel(&compiled, count, syllables, request.seed)
		} else {
			generate_range(&compiled, 0..count, syllables, request.seed)
		};

		if request.alphabetize {
			words.sort();
		}
		Ok(words)
	}
}

impl Default for Generator {
	/// A generator for the built-in Hrau phonology.
	fn default() -> Self {
		Self::new(Phonology::hrau())
	}
}

/// RNG dedicated to word `index` of a seeded run.
fn word_rng(seed: u64, index: usize) -> StdRng {
	let mut bytes = [0u8; 32];
	bytes[..8].copy_from_slice(&seed.to_le_bytes());
	bytes[8..16].copy_from_slice(&(index as u64).to_le_bytes());
	StdRng::from_seed(bytes)
}

/// Generates the words whose indices fall in `range`, in order.
fn generate_range(
	phonology: &CompiledPhonology,
	range: Range<usize>,
	syllables: usize,
	seed: Option<u64>,
) -> Vec<String> {
	match seed {
		Some(seed) => range
			.map(|index| sample_word(phonology, syllables, &mut word_rng(seed, index)))
			.collect(),
		None => generate_vocabulary(phonology, range.len(), syllables, false, &mut rand::rng()),
	}
}

/// Splits `count` words into chunks generated on scoped threads.
///
/// - Chunks are `num_cpus * 8` so that uneven threads still balance out
/// - Threads share the compiled phonology read-only
/// - Chunks come back through an MPSC channel and are reassembled by index
fn generate_parallel(
	phonology: &CompiledPhonology,
	count: usize,
	syllables: usize,
	seed: Option<u64>,
) -> Vec<String> {
	let chunks = num_cpus::get() * 8;
	let chunk_size = count.div_ceil(chunks).max(1);
	log::debug!("generating {count} words in chunks of {chunk_size}");

	let (tx, rx) = mpsc::channel();
	thread::scope(|scope| {
		for (chunk_index, start) in (0..count).step_by(chunk_size).enumerate() {
			let tx = tx.clone();
			let end = (start + chunk_size).min(count);
			scope.spawn(move || {
				let words = generate_range(phonology, start..end, syllables, seed);
				// The receiver outlives the scope
				let _ = tx.send((chunk_index, words));
			});
		}
	});
	drop(tx);

	let mut parts: Vec<(usize, Vec<String>)> = rx.iter().collect();
	parts.sort_by_key(|(chunk_index, _)| *chunk_index);
	parts.into_iter().flat_map(|(_, words)| words).collect()
}
