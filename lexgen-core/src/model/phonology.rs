use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LexgenError, Result, Scope};
use crate::io::read_to_string;

/// A named class of phonemes (consonants, vowels, diphthongs...).
///
/// `vals` is ordered most-frequent-first: the weight function assigns
/// rank 0 to the first symbol. A symbol may span several characters
/// (`"ei"`, `"ou"`...).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PhoneCategory {
	vals: Vec<String>,
	/// Skew parameter. Older phonology files call it `mu`.
	#[serde(alias = "mu")]
	q: f64,
}

impl PhoneCategory {
	pub fn new<S: Into<String>>(vals: impl IntoIterator<Item = S>, q: f64) -> Self {
		Self { vals: vals.into_iter().map(Into::into).collect(), q }
	}

	pub fn vals(&self) -> &[String] {
		&self.vals
	}

	pub fn q(&self) -> f64 {
		self.q
	}
}

/// The permitted syllable shapes of a language.
///
/// Each template is a string of category labels, e.g. `"CVF"`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SyllableTemplateSet {
	vals: Vec<String>,
	#[serde(alias = "mu")]
	q: f64,
}

impl SyllableTemplateSet {
	pub fn new<S: Into<String>>(vals: impl IntoIterator<Item = S>, q: f64) -> Self {
		Self { vals: vals.into_iter().map(Into::into).collect(), q }
	}

	pub fn vals(&self) -> &[String] {
		&self.vals
	}

	pub fn q(&self) -> f64 {
		self.q
	}
}

/// Declarative description of a constructed language's sound inventory.
///
/// # Invariants
/// - The template list is non-empty and no template is an empty string
/// - Every category has at least one symbol
///
/// Whether every label used by a template is defined, and whether the skew
/// parameters suit a distribution, is checked by
/// [`compile`](crate::model::compiled::compile).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "RawPhonology", into = "RawPhonology")]
pub struct Phonology {
	language: String,
	syllables: SyllableTemplateSet,
	elements: BTreeMap<char, PhoneCategory>,
}

/// Wire shape of a phonology file, before validation.
#[derive(Serialize, Deserialize)]
struct RawPhonology {
	language: String,
	syllables: SyllableTemplateSet,
	elements: BTreeMap<String, PhoneCategory>,
}

impl Phonology {
	/// Builds a validated phonology.
	///
	/// # Errors
	/// - `EmptyCategory` if the template list or a category has no values
	/// - `MalformedPhonology` if a template is an empty string
	pub fn new(
		language: impl Into<String>,
		syllables: SyllableTemplateSet,
		elements: impl IntoIterator<Item = (char, PhoneCategory)>,
	) -> Result<Self> {
		let phonology = Self {
			language: language.into(),
			syllables,
			elements: elements.into_iter().collect(),
		};
		phonology.validate()?;
		Ok(phonology)
	}

	fn validate(&self) -> Result<()> {
		if self.syllables.vals.is_empty() {
			return Err(LexgenError::EmptyCategory(Scope::Syllables));
		}
		if self.syllables.vals.iter().any(String::is_empty) {
			return Err(LexgenError::MalformedPhonology("empty syllable template".to_owned()));
		}
		for (label, category) in &self.elements {
			if category.vals.is_empty() {
				return Err(LexgenError::EmptyCategory(Scope::Category(*label)));
			}
		}
		Ok(())
	}

	/// Parses a phonology from JSON.
	///
	/// Structural problems (bad JSON, missing keys, wrong types) are reported
	/// as `MalformedPhonology`.
	pub fn from_json_str(json: &str) -> Result<Self> {
		let raw: RawPhonology = serde_json::from_str(json)
			.map_err(|e| LexgenError::MalformedPhonology(e.to_string()))?;
		Self::try_from(raw)
	}

	/// Loads a phonology from a JSON file.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let contents = read_to_string(&path)?;
		let phonology = Self::from_json_str(&contents)?;
		log::debug!("loaded phonology {} from {}", phonology.language, path.as_ref().display());
		Ok(phonology)
	}

	/// Serializes the phonology in the file format accepted by [`Phonology::load`].
	pub fn to_json_pretty(&self) -> Result<String> {
		Ok(serde_json::to_string_pretty(self)?)
	}

	pub fn language(&self) -> &str {
		&self.language
	}

	pub fn syllables(&self) -> &SyllableTemplateSet {
		&self.syllables
	}

	pub fn category(&self, label: char) -> Option<&PhoneCategory> {
		self.elements.get(&label)
	}

	/// Iterates over `(label, category)` pairs in label order.
	pub fn categories(&self) -> impl Iterator<Item = (char, &PhoneCategory)> {
		self.elements.iter().map(|(label, category)| (*label, category))
	}

	/// Distinct category labels used across all templates.
	pub fn referenced_labels(&self) -> BTreeSet<char> {
		self.syllables.vals.iter().flat_map(|template| template.chars()).collect()
	}

	/// The built-in "Hrau" phonology.
	pub fn hrau() -> Self {
		fn category(vals: &[&str], q: f64) -> PhoneCategory {
			PhoneCategory::new(vals.iter().copied(), q)
		}
		Self {
			language: "Hrau".to_owned(),
			syllables: SyllableTemplateSet::new(
				[
					"CV", "CD", "IAV", "CVF", "D", "V", "CDF", "IAD", "CVOF", "IADF", "CDOF",
					"IAVF", "IAVO", "IADO", "IAVOF", "IAODOF",
				],
				0.3,
			),
			elements: BTreeMap::from([
				('C', category(&["k", "t", "r", "n", "s", "h", "l", "f", "m", "y", "j", "p", "w"], 0.3)),
				('V', category(&["i", "u", "o", "e", "a"], 0.3)),
				('D', category(&["ei", "oi", "ai", "uo", "ou", "au"], 0.5)),
				('I', category(&["k", "t", "s", "n", "h", "f", "p", "m", "j"], 0.5)),
				('A', category(&["y", "r", "w"], 0.3)),
				('F', category(&["n", "s", "r", "m"], 0.5)),
				('O', category(&["i", "h", "u"], 0.2)),
			]),
		}
	}
}

impl TryFrom<RawPhonology> for Phonology {
	type Error = LexgenError;

	fn try_from(raw: RawPhonology) -> Result<Self> {
		let mut elements = BTreeMap::new();
		for (key, category) in raw.elements {
			let mut chars = key.chars();
			let label = match (chars.next(), chars.next()) {
				(Some(label), None) => label,
				_ => {
					return Err(LexgenError::MalformedPhonology(format!(
						"category label \"{key}\" must be a single character"
					)));
				}
			};
			elements.insert(label, category);
		}
		Self::new(raw.language, raw.syllables, elements)
	}
}

impl From<Phonology> for RawPhonology {
	fn from(phonology: Phonology) -> Self {
		Self {
			language: phonology.language,
			syllables: phonology.syllables,
			elements: phonology
				.elements
				.into_iter()
				.map(|(label, category)| (label.to_string(), category))
				.collect(),
		}
	}
}
