use crate::error::{AcquireError, Result};
use dickinson_model::PoemRecord;
use std::fs;
use std::path::Path;

/// Write the catalog as one compact JSON array, replacing any existing file.
///
/// Non-ASCII text is written as UTF-8, not escaped. The write is a single
/// `fs::write` and is not atomic.
pub fn persist(records: &[PoemRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string(records)?;
    fs::write(path, &json).map_err(|source| AcquireError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), poems = records.len(), bytes = json.len(), "Wrote poem catalog");

    Ok(())
}
