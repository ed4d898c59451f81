//! Request scripts.
//!
//! A script is a JSON-lines file of [`Request`] values, one per line. Blank
//! lines and lines starting with `#` are skipped.
//!
//! ```text
//! # identify
//! {"transaction":1,"message":{"type":"StartIDPS"}}
//! {"transaction":2,"message":{"type":"SetFIDTokenValues","tokens":[{"type":0,"subtype":0}]}}
//! {"transaction":3,"message":{"type":"EndIDPS","status":"continue"}}
//! ```

use super::message::Request;
use crate::error::{IapError, Result};

/// Parse a request script
pub fn parse_script(input: &str) -> Result<Vec<Request>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|source| IapError::Script {
                line: idx + 1,
                source,
            })
        })
        .collect()
}
