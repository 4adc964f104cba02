use std::path::PathBuf;
use std::sync::RwLock;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware, put, web};

use lexgen_core::io::{list_files, normalize_folder};
use lexgen_core::model::distribution::Distribution;
use lexgen_core::model::generator::{GenerationRequest, Generator};
use serde::Deserialize;

mod config;

const CONFIG_PATH: &str = "lexgen-server.json";

/// Upper bound on words per request.
const MAX_WORDS: usize = 100_000;

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	words: Option<usize>,
	syllables: Option<usize>,
	distribution: Option<String>,
	alphabetize: Option<bool>,
	seed: Option<u64>,
}

#[derive(Deserialize)]
struct PhonologyQuery {
	name: Option<String>,
}

struct SharedData {
	generator: Generator,
	data_dir: PathBuf,
}

impl GenerateParams {
	/// Builds a generation request, applying the endpoint defaults.
	fn request(&self) -> Result<GenerationRequest, String> {
		let word_count = self.words.unwrap_or(10);
		if word_count > MAX_WORDS {
			return Err(format!("At most {MAX_WORDS} words per request"));
		}
		let distribution = match &self.distribution {
			None => Default::default(),
			Some(s) => s.parse::<Distribution>().map_err(|e| format!("{e}"))?,
		};
		Ok(GenerationRequest {
			word_count,
			syllables_per_word: self.syllables.unwrap_or(2),
			distribution,
			alphabetize: self.alphabetize.unwrap_or(false),
			seed: self.seed,
		})
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Returns the generated words, one per line.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<RwLock<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let request = match query.request() {
		Ok(r) => r,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let shared_data = match data.read() {
		Ok(d) => d,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};

	match shared_data.generator.generate(&request) {
		Ok(words) => HttpResponse::Ok().body(words.join("\n")),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

#[get("/v1/language")]
async fn get_language(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	match data.read() {
		Ok(d) => HttpResponse::Ok().body(d.generator.language().to_owned()),
		Err(_) => HttpResponse::InternalServerError().body("Generator lock failed"),
	}
}

#[get("/v1/phonologies")]
async fn get_phonologies(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let data_dir = match data.read() {
		Ok(d) => d.data_dir.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	match list_files(&data_dir, "json") {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list phonologies"),
	}
}

#[put("/v1/load_phonology")]
async fn put_phonology(data: web::Data<RwLock<SharedData>>, query: web::Query<PhonologyQuery>) -> impl Responder {
	let name = match &query.name {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty phonology name"),
	};
	if name.contains(['/', '\\']) || name.contains("..") {
		return HttpResponse::BadRequest().body("Invalid phonology name");
	}

	let mut shared_data = match data.write() {
		Ok(d) => d,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};

	let path = shared_data.data_dir.join(format!("{name}.json"));
	match Generator::from_file(&path) {
		Ok(generator) => {
			log::info!("loaded {} from {}", generator.language(), path.display());
			shared_data.generator = generator;
			HttpResponse::Ok().body("Phonology loaded successfully")
		}
		Err(e) => HttpResponse::InternalServerError().body(format!("Failed to load phonology: {e}")),
	}
}

fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated)
		.service(get_language)
		.service(get_phonologies)
		.service(put_phonology);
}

/// Main entry point for the server.
///
/// Starts with the built-in Hrau phonology; other phonologies are loaded
/// from the configured data directory through `/v1/load_phonology`.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = config::load_config(CONFIG_PATH);
	let shared_data = SharedData {
		generator: Generator::default(),
		data_dir: normalize_folder(&config.data_dir),
	};
	let shared_data = web::Data::new(RwLock::new(shared_data));

	log::info!("listening on {}:{}", config.host, config.port);
	HttpServer::new(move || {
		App::new()
			.wrap(middleware::Logger::default())
			.wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET", "PUT"]))
			.app_data(shared_data.clone())
			.configure(configure)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test;

	fn shared(data_dir: PathBuf) -> web::Data<RwLock<SharedData>> {
		web::Data::new(RwLock::new(SharedData { generator: Generator::default(), data_dir }))
	}

	#[actix_web::test]
	async fn test_generate() {
		let app = test::init_service(App::new().app_data(shared(PathBuf::from("."))).configure(configure)).await;

		let req = test::TestRequest::get()
			.uri("/v1/generate?words=3&syllables=2&distribution=zipf&alphabetize=true&seed=4")
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::OK);
		let body = test::read_body(resp).await;
		let words: Vec<&str> = std::str::from_utf8(&body).unwrap().lines().collect();
		assert_eq!(words.len(), 3);
		assert!(words.windows(2).all(|pair| pair[0] <= pair[1]));
	}

	#[actix_web::test]
	async fn test_bad_distribution() {
		let app = test::init_service(App::new().app_data(shared(PathBuf::from("."))).configure(configure)).await;
		let req = test::TestRequest::get().uri("/v1/generate?distribution=gauss").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn test_load_phonology() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(
			dir.path().join("krau.json"),
			r#"{
				"language": "Krau",
				"syllables": { "vals": ["CV"], "q": 0.3 },
				"elements": {
					"C": { "vals": ["k", "r"], "q": 0.3 },
					"V": { "vals": ["a"], "q": 0.3 }
				}
			}"#,
		)
		.unwrap();
		let app = test::init_service(App::new().app_data(shared(dir.path().to_path_buf())).configure(configure)).await;

		let req = test::TestRequest::get().uri("/v1/phonologies").to_request();
		assert_eq!(test::read_body(test::call_service(&app, req).await).await, "krau");

		let req = test::TestRequest::put().uri("/v1/load_phonology?name=krau").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

		let req = test::TestRequest::get().uri("/v1/language").to_request();
		assert_eq!(test::read_body(test::call_service(&app, req).await).await, "Krau");

		let req = test::TestRequest::put().uri("/v1/load_phonology?name=absent").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::INTERNAL_SERVER_ERROR);

		let req = test::TestRequest::put().uri("/v1/load_phonology?name=../krau").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

		// Failed loads keep the previous phonology
		let req = test::TestRequest::get().uri("/v1/language").to_request();
		assert_eq!(test::read_body(test::call_service(&app, req).await).await, "Krau");
	}
}
