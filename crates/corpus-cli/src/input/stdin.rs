use serde::de::DeserializeOwned;
use std::error::Error;
use std::io::{self, Read};
use tracing::debug;

/// `None` when stdin is a terminal or the pipe carries nothing.
pub fn read_config<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    let piped = buffer.trim();
    if piped.is_empty() {
        return Ok(None);
    }

    debug!(bytes = piped.len(), "config read from stdin");
    let config = serde_json::from_str(piped)
        .map_err(|e| format!("stdin is not a valid projection config: {e}"))?;
    Ok(Some(config))
}
