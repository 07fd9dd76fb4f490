//! Source checksums embedded into generated PNGs.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use sha1::{Digest, Sha1};

use crate::error::{BassetError, Result};

const BUFFER_SIZE: usize = 64 * 1024;

/// Lowercase hex SHA-1 of a file's bytes.
pub fn sha1_of_file(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| BassetError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to open source: {}", e),
    })?;
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);

    let mut hasher = Sha1::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let n = reader.read(&mut buffer).map_err(|e| BassetError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read source: {}", e),
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}
