use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::{
    application::commands::{SplitSqlDumpCommand, SplitSqlDumpResult},
    domain::{
        chunk_naming::ChunkNamer,
        compression::Compression,
        statement::{Statement, StatementBuffer, is_skippable},
    },
    infrastructure::{sink::ChunkSink, source::DumpSource},
};

#[derive(Debug, Default)]
pub struct SplitSqlDumpUseCase;

impl SplitSqlDumpUseCase {
    pub fn execute(&self, command: SplitSqlDumpCommand) -> Result<SplitSqlDumpResult> {
        info!(
            "File {} will be split into chunks of at most {} ({}).",
            command.source_path.display(),
            command.max_chunk_bytes,
            command.compression.describe(),
        );

        let source = DumpSource::open(&command.source_path)?;
        let mut splitter = DumpSplitter::new(&command);
        splitter.run(source)
    }
}

/// Per-run state of one split.
#[derive(Debug)]
struct DumpSplitter {
    namer: ChunkNamer,
    compression: Compression,
    max_chunk_bytes: u64,
    chunk_paths: Vec<PathBuf>,
    statement_count: usize,
    skipped_line_count: usize,
}

impl DumpSplitter {
    fn new(command: &SplitSqlDumpCommand) -> Self {
        Self {
            namer: ChunkNamer::new(&command.source_path, command.compression),
            compression: command.compression,
            max_chunk_bytes: command.max_chunk_bytes.bytes(),
            chunk_paths: Vec::new(),
            statement_count: 0,
            skipped_line_count: 0,
        }
    }

    fn run(&mut self, mut source: DumpSource) -> Result<SplitSqlDumpResult> {
        // The first chunk exists even when the dump holds no statement at all.
        let mut sink = self.open_next_chunk()?;
        let mut statements_in_chunk = 0usize;
        let mut buffer = StatementBuffer::default();
        let mut line = Vec::new();
        debug!(compressed_input = source.is_compressed(), "reading dump");

        while source.next_line(&mut line)? {
            if is_skippable(&line) {
                self.skipped_line_count += 1;
                continue;
            }

            buffer.push_line(&line);
            if !buffer.is_complete() {
                continue;
            }

            let statement = buffer.take();
            let current_size = sink.size()?;
            if self.needs_rollover(current_size, &statement, statements_in_chunk) {
                debug!(
                    chunk = %sink.path().display(),
                    current_size,
                    statement_len = statement.char_len(),
                    "chunk is full, rolling over"
                );
                sink.close()?;
                sink = self.open_next_chunk()?;
                statements_in_chunk = 0;
            }

            sink.write(statement.as_bytes())?;
            statements_in_chunk += 1;
            self.statement_count += 1;
        }

        source.close();

        let dropped_trailing_bytes = buffer.len();
        if !buffer.is_empty() {
            warn!(
                dropped_bytes = dropped_trailing_bytes,
                "input ended inside an unterminated statement, discarding it"
            );
        }

        sink.close()?;
        debug!(
            chunks = self.namer.issued(),
            statements = self.statement_count,
            skipped_lines = self.skipped_line_count,
            "split complete"
        );

        Ok(SplitSqlDumpResult {
            chunk_paths: std::mem::take(&mut self.chunk_paths),
            statement_count: self.statement_count,
            skipped_line_count: self.skipped_line_count,
            dropped_trailing_bytes,
        })
    }

    /// A statement that would bring the chunk to the limit goes to a fresh
    /// chunk. A chunk that holds no statement yet is never abandoned, so an
    /// oversized statement lands whole in the current chunk instead of leaving
    /// an empty file behind.
    fn needs_rollover(
        &self,
        current_size: u64,
        statement: &Statement,
        statements_in_chunk: usize,
    ) -> bool {
        statements_in_chunk > 0
            && current_size.saturating_add(statement.char_len()) >= self.max_chunk_bytes
    }

    fn open_next_chunk(&mut self) -> Result<ChunkSink> {
        let path = self.namer.next_path();
        info!("Opening new file {}.", path.display());
        let sink = ChunkSink::create(&path, self.compression)?;
        self.chunk_paths.push(path);
        Ok(sink)
    }
}
