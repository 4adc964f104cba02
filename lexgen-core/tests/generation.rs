//! End-to-end generation from phonology files and the built-in fixture.

use std::fs;

use lexgen_core::{
	Distribution, GenerationRequest, Generator, LexgenError, Phonology, compile, generate_vocabulary,
	sample_syllable_symbols,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

const KRAU: &str = r#"{
	"language": "Krau",
	"syllables": { "vals": ["CV", "CVF", "D"], "mu": 0.4 },
	"elements": {
		"C": { "vals": ["k", "r", "t"], "mu": 0.3 },
		"V": { "vals": ["a", "u"], "mu": 0.3 },
		"D": { "vals": ["au", "ei"], "mu": 0.5 },
		"F": { "vals": ["n"], "mu": 0.5 },
		"Z": { "vals": ["zz"], "mu": 0.5 }
	}
}"#;

#[test]
fn test_generate_from_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("krau.json");
	fs::write(&path, KRAU).unwrap();

	let generator = Generator::from_file(&path).unwrap();
	assert_eq!(generator.language(), "Krau");

	let request = GenerationRequest {
		word_count: 5,
		syllables_per_word: 2,
		distribution: Distribution::Poisson,
		alphabetize: true,
		seed: Some(7),
	};
	let words = generator.generate(&request).unwrap();
	assert_eq!(words.len(), 5);
	assert!(words.windows(2).all(|pair| pair[0] <= pair[1]));
	// Z is never referenced by a template
	assert!(words.iter().all(|word| !word.contains('z')));
}

#[test]
fn test_missing_file() {
	let dir = tempfile::tempdir().unwrap();
	assert!(matches!(
		Generator::from_file(dir.path().join("absent.json")),
		Err(LexgenError::Io(_))
	));
}

#[test]
fn test_malformed_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("broken.json");
	fs::write(&path, r#"{ "language": "Broken", "syllables": { "vals": ["CV"] } }"#).unwrap();
	assert!(matches!(Generator::from_file(&path), Err(LexgenError::MalformedPhonology(_))));
}

#[test]
fn test_undefined_label_fails_before_sampling() {
	let json = KRAU.replace("\"CVF\"", "\"CX\"");
	let phonology = Phonology::from_json_str(&json).unwrap();
	let error = Generator::new(phonology)
		.generate(&GenerationRequest { word_count: 3, ..Default::default() })
		.unwrap_err();
	assert!(matches!(error, LexgenError::MissingCategory { label: 'X', .. }));
	assert!(error.to_string().contains("'X'"));
}

#[test]
fn test_same_seed_same_words() {
	let generator = Generator::default();
	for distribution in [Distribution::Poisson, Distribution::Zipf] {
		let request = GenerationRequest {
			word_count: 20,
			syllables_per_word: 3,
			distribution,
			alphabetize: false,
			seed: Some(99),
		};
		assert_eq!(generator.generate(&request).unwrap(), generator.generate(&request).unwrap());
	}
}

#[test]
fn test_seeded_rng_reproduces_vocabulary() {
	let compiled = compile(&Phonology::hrau(), Distribution::Zipf).unwrap();
	let first = generate_vocabulary(&compiled, 10, 2, false, &mut StdRng::seed_from_u64(5));
	let second = generate_vocabulary(&compiled, 10, 2, false, &mut StdRng::seed_from_u64(5));
	assert_eq!(first, second);
	assert_eq!(first.len(), 10);
}

#[test]
fn test_zero_words_and_zero_syllables() {
	let generator = Generator::default();
	let none = generator
		.generate(&GenerationRequest { word_count: 0, ..Default::default() })
		.unwrap();
	assert!(none.is_empty());

	let empty = generator
		.generate(&GenerationRequest { word_count: 3, syllables_per_word: 0, ..Default::default() })
		.unwrap();
	assert_eq!(empty, ["", "", ""]);
}

#[test]
fn test_hrau_symbols_per_syllable() {
	let compiled = compile(&Phonology::hrau(), Distribution::Poisson).unwrap();
	let lengths: Vec<usize> = compiled.templates().map(|t| t.chars().count()).collect();
	let mut rng = StdRng::seed_from_u64(123);
	for _ in 0..300 {
		let symbols = sample_syllable_symbols(&compiled, &mut rng);
		assert!(lengths.contains(&symbols.len()));
		assert!(symbols.iter().all(|symbol| !symbol.is_empty()));
	}
}

#[test]
fn test_bundled_data_matches_fixture() {
	let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/hrau.json");
	assert_eq!(Phonology::load(path).unwrap(), Phonology::hrau());
}
