use std::path::{Path, PathBuf};

use crate::domain::compression::{Compression, GZIP_SUFFIX};

const BARE_GZIP_EXTENSION: &str = "gz";

/// Produces the numbered output paths `<base>-NN.<ext>` for one run.
///
/// The source file name is split at its first `.`; everything after it is the
/// extension. Chunks are placed next to the source file.
#[derive(Debug)]
pub struct ChunkNamer {
    directory: PathBuf,
    base: String,
    extension: Option<String>,
    next_index: u32,
}

impl ChunkNamer {
    pub fn new(source_path: &Path, compression: Compression) -> Self {
        let directory = source_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let file_name = source_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let (base, extension) = match file_name.split_once('.') {
            Some((base, extension)) => (base.to_string(), Some(extension)),
            None => (file_name.clone(), None),
        };

        Self {
            directory,
            base,
            extension: chunk_extension(extension, compression),
            next_index: 0,
        }
    }

    /// Returns the next chunk path and advances the sequence counter.
    pub fn next_path(&mut self) -> PathBuf {
        let index = self.next_index;
        self.next_index += 1;

        let file_name = match &self.extension {
            Some(extension) => format!("{}-{index:02}.{extension}", self.base),
            None => format!("{}-{index:02}", self.base),
        };
        self.directory.join(file_name)
    }

    /// Number of paths handed out so far.
    pub fn issued(&self) -> u32 {
        self.next_index
    }
}

fn chunk_extension(extension: Option<&str>, compression: Compression) -> Option<String> {
    match compression {
        Compression::Plain => match extension {
            None | Some(BARE_GZIP_EXTENSION) => None,
            Some(extension) => Some(
                extension
                    .strip_suffix(GZIP_SUFFIX)
                    .unwrap_or(extension)
                    .to_string(),
            ),
        },
        Compression::Gzip => match extension {
            None => Some(BARE_GZIP_EXTENSION.to_string()),
            Some(extension)
                if extension == BARE_GZIP_EXTENSION || extension.ends_with(GZIP_SUFFIX) =>
            {
                Some(extension.to_string())
            }
            Some(extension) => Some(format!("{extension}{GZIP_SUFFIX}")),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::ChunkNamer;
    use crate::domain::compression::Compression;

    fn names(source: &str, compression: Compression, count: usize) -> Vec<PathBuf> {
        let mut namer = ChunkNamer::new(Path::new(source), compression);
        (0..count).map(|_| namer.next_path()).collect()
    }

    #[test]
    fn numbers_plain_chunks_from_zero() {
        assert_eq!(
            names("dump.sql", Compression::Plain, 3),
            vec![
                PathBuf::from("dump-00.sql"),
                PathBuf::from("dump-01.sql"),
                PathBuf::from("dump-02.sql"),
            ]
        );
    }

    #[test]
    fn appends_gzip_suffix_once() {
        assert_eq!(
            names("dump.sql", Compression::Gzip, 1),
            vec![PathBuf::from("dump-00.sql.gz")]
        );
        assert_eq!(
            names("dump.sql.gz", Compression::Gzip, 1),
            vec![PathBuf::from("dump-00.sql.gz")]
        );
    }

    #[test]
    fn strips_gzip_suffix_in_plain_mode() {
        assert_eq!(
            names("dump.sql.gz", Compression::Plain, 1),
            vec![PathBuf::from("dump-00.sql")]
        );
        assert_eq!(
            names("dump.gz", Compression::Plain, 1),
            vec![PathBuf::from("dump-00")]
        );
    }

    #[test]
    fn splits_at_first_dot_and_keeps_directory() {
        assert_eq!(
            names("backups/prod.2024.sql", Compression::Plain, 1),
            vec![Path::new("backups").join("prod-00.2024.sql")]
        );
    }

    #[test]
    fn handles_names_without_extension() {
        assert_eq!(
            names("dump", Compression::Plain, 1),
            vec![PathBuf::from("dump-00")]
        );
        assert_eq!(
            names("dump", Compression::Gzip, 1),
            vec![PathBuf::from("dump-00.gz")]
        );
    }

    #[test]
    fn counter_grows_past_two_digits() {
        let mut namer = ChunkNamer::new(Path::new("dump.sql"), Compression::Plain);
        let last = (0..101).map(|_| namer.next_path()).last();

        assert_eq!(last, Some(PathBuf::from("dump-100.sql")));
        assert_eq!(namer.issued(), 101);
    }
}
