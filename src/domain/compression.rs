use std::path::Path;

pub const GZIP_SUFFIX: &str = ".gz";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    Plain,
    Gzip,
}

impl Compression {
    pub const ALL: [Compression; 2] = [Compression::Plain, Compression::Gzip];

    pub fn as_str(self) -> &'static str {
        match self {
            Compression::Plain => "plain",
            Compression::Gzip => "gzip",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Compression::Plain => "uncompressed",
            Compression::Gzip => "compressed",
        }
    }
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input files are decompressed when their name ends with `.gz`.
pub fn is_gzip_path(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(GZIP_SUFFIX))
        .unwrap_or(false)
}
