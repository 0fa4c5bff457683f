//! Engine configs from a JSON file or a pipe.

pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;
use std::error::Error;

/// Config from `--input` when given, otherwise from piped stdin.
/// `None` means neither was supplied and the caller should fall back to flags.
pub fn config_from<T: DeserializeOwned>(path: Option<&str>) -> Result<Option<T>, Box<dyn Error>> {
    match path {
        Some(path) => file::read_config(path).map(Some),
        None => stdin::read_config(),
    }
}
