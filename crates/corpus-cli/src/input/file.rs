use serde::de::DeserializeOwned;
use std::error::Error;
use std::fs;
use tracing::debug;

pub fn read_config<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn Error>> {
    let contents =
        fs::read_to_string(path).map_err(|e| format!("cannot read config '{path}': {e}"))?;
    debug!(path, bytes = contents.len(), "config read from file");
    serde_json::from_str(&contents)
        .map_err(|e| format!("config '{path}' is not a valid projection config: {e}").into())
}
