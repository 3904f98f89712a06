//! JSON file helpers for seed and lemma files

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::path::Path;

/// Read a file holding a top-level JSON array and decode every element
///
/// Decoding failures name the offending element index.
pub fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let Value::Array(items) = value else {
        bail!("{} must be a top-level JSON array", path.display());
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item)
                .with_context(|| format!("{}: entry {} is malformed", path.display(), i))
        })
        .collect()
}

/// Write pretty JSON to `out`, or to stdout when `out` is None
pub fn write_json<T: Serialize>(value: &T, out: Option<&Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => std::fs::write(path, text + "\n")
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", text)?;
            Ok(())
        }
    }
}
