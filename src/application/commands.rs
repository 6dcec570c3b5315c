use std::path::PathBuf;

use crate::domain::{chunk_size::ChunkSize, compression::Compression};

#[derive(Debug, Clone)]
pub struct SplitSqlDumpCommand {
    pub source_path: PathBuf,
    pub max_chunk_bytes: ChunkSize,
    pub compression: Compression,
}

#[derive(Debug)]
pub struct SplitSqlDumpResult {
    pub chunk_paths: Vec<PathBuf>,
    pub statement_count: usize,
    pub skipped_line_count: usize,
    /// Bytes of an unterminated statement left over at end of input.
    pub dropped_trailing_bytes: usize,
}
