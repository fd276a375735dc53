use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Read an instruction file in full. The file is raw opcode bytes, no header.
pub fn read_program(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| Error::Load {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "read program file");
    Ok(bytes)
}
