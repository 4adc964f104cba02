use rand::Rng;

use crate::model::compiled::CompiledPhonology;

/// Samples one syllable and returns its symbols in template order.
///
/// One weighted draw picks the template, then each template position draws
/// independently from its category. The result always holds exactly one
/// symbol per template character.
pub fn sample_syllable_symbols<'a, R: Rng + ?Sized>(
	phonology: &'a CompiledPhonology,
	rng: &mut R,
) -> Vec<&'a str> {
	let template = phonology.templates.choose(rng);
	template
		.slots
		.iter()
		.map(|slot| phonology.categories[*slot].symbols.choose(&mut *rng).as_str())
		.collect()
}

/// Samples one syllable as a string.
pub fn sample_syllable<R: Rng + ?Sized>(phonology: &CompiledPhonology, rng: &mut R) -> String {
	let mut syllable = String::new();
	push_syllable(phonology, rng, &mut syllable);
	syllable
}

/// Samples a word of `syllable_count` independent syllables.
///
/// Every syllable draws its own template. A count of 0 gives an empty word.
pub fn sample_word<R: Rng + ?Sized>(
	phonology: &CompiledPhonology,
	syllable_count: usize,
	rng: &mut R,
) -> String {
	let mut word = String::new();
	for _ in 0..syllable_count {
		push_syllable(phonology, rng, &mut word);
	}
	word
}

fn push_syllable<R: Rng + ?Sized>(phonology: &CompiledPhonology, rng: &mut R, out: &mut String) {
	let template = phonology.templates.choose(rng);
	for slot in &template.slots {
		out.push_str(phonology.categories[*slot].symbols.choose(rng));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::compiled::compile;
	use crate::model::distribution::Distribution;
	use crate::model::phonology::{PhoneCategory, Phonology, SyllableTemplateSet};
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn test_symbol_count_matches_template() {
		let compiled = compile(&Phonology::hrau(), Distribution::Zipf).unwrap();
		let templates: Vec<&str> = compiled.templates().collect();
		let mut rng = StdRng::seed_from_u64(1);
		for _ in 0..500 {
			let symbols = sample_syllable_symbols(&compiled, &mut rng);
			// Some template of that length must exist
			assert!(templates.iter().any(|t| t.chars().count() == symbols.len()));
		}
	}

	#[test]
	fn test_single_template_expansion() {
		let phonology = Phonology::new(
			"Test",
			SyllableTemplateSet::new(["CDC"], 0.3),
			[
				('C', PhoneCategory::new(["t"], 0.3)),
				('D', PhoneCategory::new(["ou"], 0.3)),
			],
		)
		.unwrap();
		let compiled = compile(&phonology, Distribution::Poisson).unwrap();
		let mut rng = StdRng::seed_from_u64(3);
		assert_eq!(sample_syllable_symbols(&compiled, &mut rng), ["t", "ou", "t"]);
		assert_eq!(sample_syllable(&compiled, &mut rng), "tout");
		assert_eq!(sample_word(&compiled, 3, &mut rng), "touttouttout");
	}

	#[test]
	fn test_symbols_come_from_their_category() {
		let phonology = Phonology::new(
			"Test",
			SyllableTemplateSet::new(["CV"], 0.3),
			[
				('C', PhoneCategory::new(["p", "t", "k"], 1.5)),
				('V', PhoneCategory::new(["a", "e", "ai"], 1.5)),
			],
		)
		.unwrap();
		let compiled = compile(&phonology, Distribution::Poisson).unwrap();
		let mut rng = StdRng::seed_from_u64(11);
		for _ in 0..200 {
			let symbols = sample_syllable_symbols(&compiled, &mut rng);
			assert_eq!(symbols.len(), 2);
			assert!(["p", "t", "k"].contains(&symbols[0]));
			assert!(["a", "e", "ai"].contains(&symbols[1]));
		}
	}

	#[test]
	fn test_empty_word() {
		let compiled = compile(&Phonology::hrau(), Distribution::Poisson).unwrap();
		assert_eq!(sample_word(&compiled, 0, &mut rand::rng()), "");
	}
}
