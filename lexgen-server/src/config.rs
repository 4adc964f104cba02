//! Server configuration, read from an optional JSON file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Where the server listens and where it looks for phonology files.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
	#[serde(default = "default_host")]
	pub host: String,
	#[serde(default = "default_port")]
	pub port: u16,
	/// Directory holding `<name>.json` phonology files
	#[serde(default = "default_data_dir")]
	pub data_dir: String,
}

fn default_host() -> String {
	"127.0.0.1".to_owned()
}

fn default_port() -> u16 {
	5000
}

fn default_data_dir() -> String {
	"./data".to_owned()
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: default_host(),
			port: default_port(),
			data_dir: default_data_dir(),
		}
	}
}

/// Loads the configuration at `path`.
///
/// A missing file gives the defaults; an unreadable or invalid one is
/// logged and also gives the defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> ServerConfig {
	let path = path.as_ref();
	let content = match fs::read_to_string(path) {
		Ok(content) => content,
		Err(e) => {
			if path.exists() {
				log::warn!("cannot read {}: {e}, using defaults", path.display());
			}
			return ServerConfig::default();
		}
	};
	serde_json::from_str(&content).unwrap_or_else(|e| {
		log::warn!("invalid config {}: {e}, using defaults", path.display());
		ServerConfig::default()
	})
}
