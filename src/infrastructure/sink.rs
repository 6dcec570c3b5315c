use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use flate2::write::GzEncoder;

use crate::domain::{compression::Compression, statement::char_len};

/// One open output chunk.
///
/// The two variants account for size differently. The plain chunk counts the
/// characters handed to it. The gzip chunk asks the filesystem, since the
/// compressed size cannot be predicted from the input; every write is flushed
/// through the encoder so the on-disk length is current.
#[derive(Debug)]
pub enum ChunkSink {
    Plain(PlainSink),
    Gzip(GzipSink),
}

impl ChunkSink {
    pub fn create(path: &Path, compression: Compression) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Unable to create file: {}", path.display()))?;
        let path = path.to_path_buf();

        Ok(match compression {
            Compression::Plain => ChunkSink::Plain(PlainSink {
                path,
                writer: BufWriter::new(file),
                written_chars: 0,
            }),
            Compression::Gzip => ChunkSink::Gzip(GzipSink {
                path,
                encoder: GzEncoder::new(file, flate2::Compression::default()),
            }),
        })
    }

    pub fn path(&self) -> &Path {
        match self {
            ChunkSink::Plain(sink) => &sink.path,
            ChunkSink::Gzip(sink) => &sink.path,
        }
    }

    pub fn write(&mut self, text: &[u8]) -> Result<()> {
        match self {
            ChunkSink::Plain(sink) => sink.write(text),
            ChunkSink::Gzip(sink) => sink.write(text),
        }
    }

    pub fn size(&self) -> Result<u64> {
        match self {
            ChunkSink::Plain(sink) => Ok(sink.written_chars),
            ChunkSink::Gzip(sink) => sink.size(),
        }
    }

    pub fn close(self) -> Result<()> {
        match self {
            ChunkSink::Plain(sink) => sink.close(),
            ChunkSink::Gzip(sink) => sink.close(),
        }
    }
}

#[derive(Debug)]
pub struct PlainSink {
    path: PathBuf,
    writer: BufWriter<File>,
    written_chars: u64,
}

impl PlainSink {
    fn write(&mut self, text: &[u8]) -> Result<()> {
        self.writer
            .write_all(text)
            .with_context(|| format!("Unable to write to file: {}", self.path.display()))?;
        self.written_chars += char_len(text);
        Ok(())
    }

    fn close(mut self) -> Result<()> {
        self.writer
            .flush()
            .with_context(|| format!("Unable to flush file: {}", self.path.display()))?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct GzipSink {
    path: PathBuf,
    encoder: GzEncoder<File>,
}

impl GzipSink {
    fn write(&mut self, text: &[u8]) -> Result<()> {
        self.encoder
            .write_all(text)
            .and_then(|()| self.encoder.flush())
            .with_context(|| format!("Unable to write to file: {}", self.path.display()))
    }

    fn size(&self) -> Result<u64> {
        let metadata = self
            .encoder
            .get_ref()
            .metadata()
            .with_context(|| format!("Unable to stat file: {}", self.path.display()))?;
        Ok(metadata.len())
    }

    fn close(self) -> Result<()> {
        self.encoder
            .finish()
            .with_context(|| format!("Unable to finish gzip stream: {}", self.path.display()))?;
        Ok(())
    }
}
