use std::collections::BTreeMap;

use crate::error::{LexgenError, Result, Scope};
use crate::model::distribution::Distribution;
use crate::model::phonology::Phonology;
use crate::model::weighted::WeightedTable;

/// A category whose symbols carry weights.
#[derive(Debug, Clone)]
pub(crate) struct CompiledCategory {
	pub(crate) label: char,
	pub(crate) symbols: WeightedTable<String>,
}

/// A syllable template with each label resolved to its compiled category.
#[derive(Debug, Clone)]
pub(crate) struct CompiledTemplate {
	pub(crate) text: String,
	/// One index into `CompiledPhonology::categories` per template character.
	pub(crate) slots: Vec<usize>,
}

/// A phonology with weights attached, ready for sampling.
///
/// Produced by [`compile`]. Read-only once built, and `Send + Sync`, so one
/// instance can serve any number of concurrent samplers.
///
/// ## Invariants
/// - Every template slot points at a compiled category
/// - Only categories referenced by at least one template are compiled
#[derive(Debug, Clone)]
pub struct CompiledPhonology {
	language: String,
	distribution: Distribution,
	pub(crate) templates: WeightedTable<CompiledTemplate>,
	pub(crate) categories: Vec<CompiledCategory>,
	uncompiled: Vec<char>,
}

impl CompiledPhonology {
	pub fn language(&self) -> &str {
		&self.language
	}

	pub fn distribution(&self) -> Distribution {
		self.distribution
	}

	/// Template strings, in the order of the source phonology.
	pub fn templates(&self) -> impl Iterator<Item = &str> {
		self.templates.items().iter().map(|template| template.text.as_str())
	}

	/// Weights aligned with [`CompiledPhonology::templates`].
	pub fn template_weights(&self) -> &[f64] {
		self.templates.weights()
	}

	/// Weights of a category, aligned with its symbols.
	///
	/// Returns `None` for a label no template uses (or that does not exist).
	pub fn category_weights(&self, label: char) -> Option<&[f64]> {
		self.categories
			.iter()
			.find(|category| category.label == label)
			.map(|category| category.symbols.weights())
	}

	/// Labels of categories that no template references.
	pub fn uncompiled_labels(&self) -> &[char] {
		&self.uncompiled
	}
}

/// Attaches `distribution` weights to a phonology.
///
/// The template list gets `weights(template count, syllable skew)`; each
/// category referenced by some template gets `weights(symbol count, category
/// skew)`. Categories no template references are left out.
///
/// # Errors
/// - `MissingCategory` if a template uses a label with no category
/// - `InvalidSkew` if a skew is outside the domain of `distribution`
/// - `DegenerateWeights` if a list's weights all vanish (e.g. a huge Poisson rate)
pub fn compile(phonology: &Phonology, distribution: Distribution) -> Result<CompiledPhonology> {
	let syllables = phonology.syllables();

	// Resolve labels first so that a missing category is reported before anything else
	for template in syllables.vals() {
		if let Some(label) = template.chars().find(|label| phonology.category(*label).is_none()) {
			return Err(LexgenError::MissingCategory { label, template: template.clone() });
		}
	}

	let mut categories = Vec::new();
	let mut positions = BTreeMap::new();
	for label in phonology.referenced_labels() {
		let Some(category) = phonology.category(label) else {
			continue;
		};
		let scope = Scope::Category(label);
		let weights = weigh(distribution, scope, category.vals().len(), category.q())?;
		let symbols = WeightedTable::new(category.vals().to_vec(), weights)
			.map_err(|_| LexgenError::DegenerateWeights(scope))?;
		positions.insert(label, categories.len());
		categories.push(CompiledCategory { label, symbols });
	}

	let templates: Vec<CompiledTemplate> = syllables
		.vals()
		.iter()
		.map(|text| CompiledTemplate {
			text: text.clone(),
			slots: text.chars().filter_map(|label| positions.get(&label).copied()).collect(),
		})
		.collect();
	let weights = weigh(distribution, Scope::Syllables, templates.len(), syllables.q())?;
	let templates = WeightedTable::new(templates, weights)
		.map_err(|_| LexgenError::DegenerateWeights(Scope::Syllables))?;

	let uncompiled: Vec<char> = phonology
		.categories()
		.map(|(label, _)| label)
		.filter(|label| !positions.contains_key(label))
		.collect();

	log::debug!(
		"compiled {} with {} weights: {} templates, categories [{}], uncompiled [{}]",
		phonology.language(),
		distribution,
		templates.len(),
		positions.keys().collect::<String>(),
		uncompiled.iter().collect::<String>(),
	);

	Ok(CompiledPhonology {
		language: phonology.language().to_owned(),
		distribution,
		templates,
		categories,
		uncompiled,
	})
}

fn weigh(distribution: Distribution, scope: Scope, length: usize, skew: f64) -> Result<Vec<f64>> {
	distribution
		.weights(length, skew)
		.ok_or(LexgenError::InvalidSkew { scope, skew })
}
