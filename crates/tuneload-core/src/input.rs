//! Opening export files as buffered line readers

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use indicatif::ProgressBar;

use crate::progress::upgrade_to_bar;

/// Read buffer for export files (256KB)
const READ_BUF_SIZE: usize = 256 * 1024;

/// Boxed line reader over a plain or gzipped export file
pub type InputReader = Box<dyn BufRead + Send>;

/// Whether `path` names a gzip file (by extension)
fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Open an export file, gunzipping `*.gz` transparently.
///
/// Progress on `pb` advances with the bytes read from disk, so for gzip
/// inputs it tracks compressed size.
pub fn open_input(path: &Path, pb: &ProgressBar) -> io::Result<InputReader> {
    let file = File::open(path)
        .map_err(|e| io::Error::new(e.kind(), format!("{}: {e}", path.display())))?;
    if let Ok(meta) = file.metadata() {
        upgrade_to_bar(pb, meta.len());
    }
    let counted = pb.wrap_read(file);

    if is_gzip(path) {
        log::debug!("{}: reading as gzip", path.display());
        let decoder = GzDecoder::new(BufReader::with_capacity(READ_BUF_SIZE, counted));
        Ok(Box::new(BufReader::with_capacity(READ_BUF_SIZE, decoder)))
    } else {
        Ok(Box::new(BufReader::with_capacity(READ_BUF_SIZE, counted)))
    }
}
