use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

use crate::domain::compression::is_gzip_path;

/// Sequential line reader over the dump being split.
///
/// Gzip input is chosen from the `.gz` file name suffix rather than from the
/// output compression setting.
#[derive(Debug)]
pub enum DumpSource {
    Plain {
        path: PathBuf,
        reader: BufReader<File>,
    },
    Gzip {
        path: PathBuf,
        reader: BufReader<MultiGzDecoder<File>>,
    },
}

impl DumpSource {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Unable to open dump file: {}", path.display()))?;
        let path = path.to_path_buf();

        if is_gzip_path(&path) {
            Ok(DumpSource::Gzip {
                path,
                reader: BufReader::new(MultiGzDecoder::new(file)),
            })
        } else {
            Ok(DumpSource::Plain {
                path,
                reader: BufReader::new(file),
            })
        }
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self, DumpSource::Gzip { .. })
    }

    /// Reads the next line, terminator included, into `line`.
    ///
    /// `line` is cleared first. Returns `Ok(false)` once the input is exhausted.
    pub fn next_line(&mut self, line: &mut Vec<u8>) -> Result<bool> {
        line.clear();
        let (path, read) = match self {
            DumpSource::Plain { path, reader } => (path, reader.read_until(b'\n', line)),
            DumpSource::Gzip { path, reader } => (path, reader.read_until(b'\n', line)),
        };
        let read =
            read.with_context(|| format!("Unable to read dump file: {}", path.display()))?;
        Ok(read > 0)
    }

    pub fn close(self) {
        drop(self);
    }
}
