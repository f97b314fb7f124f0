use std::fs;
use std::path::Path;

use tracing::{error, info, instrument};

use crate::error::WriteError;

/// Replace the file at `path` with `contents`.
#[instrument(level = "info", skip(contents), fields(path = %path.display(), bytes = contents.len()))]
pub fn write_calendar(path: &Path, contents: &str) -> Result<(), WriteError> {
    if let Err(e) = fs::write(path, contents) {
        error!(error = %e, "Failed to write calendar file");
        return Err(WriteError { path: path.to_path_buf(), source: e });
    }
    info!("Wrote calendar file");
    Ok(())
}
