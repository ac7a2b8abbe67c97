// crates/triplog-core/src/fsio.rs

//! Shared file transport for the store and export modules.
//!
//! Opens buffered readers/writers and, with the `compact` feature, wraps
//! `.gz` paths in a gzip codec so callers never care about compression.

use crate::error::{Result, TripError};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Opens a file, buffers it, and optionally wraps it in a Gzip decoder.
/// Returns a generic reader so the caller doesn't care about the compression.
pub(crate) fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path)
        .map_err(|e| TripError::NotFound(format!("no file at {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);

    #[cfg(feature = "compact")]
    if is_gz(path) {
        return Ok(Box::new(flate2::read::GzDecoder::new(reader)));
    }

    Ok(Box::new(reader))
}

/// Creates a file for writing, mirroring [`open_stream`]'s gzip handling.
pub(crate) fn create_stream(path: &Path) -> Result<Box<dyn Write>> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    #[cfg(feature = "compact")]
    if is_gz(path) {
        return Ok(Box::new(flate2::write::GzEncoder::new(
            writer,
            flate2::Compression::default(),
        )));
    }

    Ok(Box::new(writer))
}

#[cfg(feature = "compact")]
fn is_gz(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}
