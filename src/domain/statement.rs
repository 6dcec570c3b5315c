//! Reassembly of logical SQL statements from dump lines.
//!
//! This is a textual heuristic, not a SQL parser. A statement is a run of
//! non-skippable lines whose last trimmed line ends with `;`. Lines are
//! handled as raw bytes so dumps containing non-UTF-8 data pass through
//! unchanged.

const LINE_COMMENT: &[u8] = b"--";
const BLOCK_COMMENT_OPEN: &[u8] = b"/*";
const TERMINATOR: &[u8] = b";\n";

/// Returns `true` for lines that never become part of a statement: blank
/// lines and lines starting with `--` or `/*`.
///
/// The comment markers are matched against the raw line, so an indented
/// comment is kept as statement text. The closing `*/` of a multi-line block
/// comment is not tracked either; the lines after the opener are treated as
/// ordinary statement text.
pub fn is_skippable(line: &[u8]) -> bool {
    trim(line).is_empty() || line.starts_with(LINE_COMMENT) || line.starts_with(BLOCK_COMMENT_OPEN)
}

/// Strips leading and trailing whitespace, including NUL and vertical tab.
pub fn trim(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|byte| !is_strippable(*byte))
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|byte| !is_strippable(*byte))
        .map_or(start, |index| index + 1);
    &line[start..end]
}

fn is_strippable(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == b'\0' || byte == 0x0b
}

/// Number of characters in `bytes`, counting each UTF-8 scalar once.
///
/// Bytes that are not valid UTF-8 lead bytes still count as one character
/// each, so the result never exceeds the byte length.
pub fn char_len(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .filter(|byte| (**byte & 0xC0) != 0x80)
        .count() as u64
}

/// A complete statement, ready to be written to a chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    text: Vec<u8>,
    char_len: u64,
}

impl Statement {
    pub fn as_bytes(&self) -> &[u8] {
        &self.text
    }

    pub fn char_len(&self) -> u64 {
        self.char_len
    }
}

#[derive(Debug, Default)]
pub struct StatementBuffer {
    text: Vec<u8>,
    char_len: u64,
}

impl StatementBuffer {
    /// Appends the trimmed line followed by a single newline.
    pub fn push_line(&mut self, line: &[u8]) {
        let trimmed = trim(line);
        self.text.extend_from_slice(trimmed);
        self.text.push(b'\n');
        self.char_len += char_len(trimmed) + 1;
    }

    pub fn is_complete(&self) -> bool {
        self.text.ends_with(TERMINATOR)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length of the buffered text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn take(&mut self) -> Statement {
        let statement = Statement {
            text: std::mem::take(&mut self.text),
            char_len: self.char_len,
        };
        self.char_len = 0;
        statement
    }
}
