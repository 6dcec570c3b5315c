use std::{
    fmt::{self, Display},
    str::FromStr,
    sync::LazyLock,
};

use regex::Regex;

static SIZE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)(?:\.([0-9]*))?([KMG]I?)?$").expect("size pattern should compile")
});

// Fraction digits beyond this cannot change the truncated byte count.
const MAX_FRACTION_DIGITS: usize = 18;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkSizeError {
    Empty,
    Malformed(String),
    Zero(String),
    TooLarge(String),
}

impl Display for ChunkSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkSizeError::Empty => f.write_str("Chunk size must not be empty"),
            ChunkSizeError::Malformed(value) => write!(
                f,
                "Chunk size `{value}` is invalid, formats accepted are 2.5M for 2.5 Megabytes or 2.5MI for Mebibytes"
            ),
            ChunkSizeError::Zero(value) => {
                write!(f, "Chunk size `{value}` must be at least one byte")
            }
            ChunkSizeError::TooLarge(value) => write!(f, "Chunk size `{value}` is too large"),
        }
    }
}

impl std::error::Error for ChunkSizeError {}

/// Maximum size of one output chunk, in bytes.
///
/// The value is a rollover threshold: a chunk is closed before a statement
/// would bring it to this size, but a single statement larger than the
/// threshold still lands whole in its own chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ChunkSize(u64);

impl ChunkSize {
    pub fn new(bytes: u64) -> Result<Self, ChunkSizeError> {
        if bytes == 0 {
            return Err(ChunkSizeError::Zero(bytes.to_string()));
        }
        Ok(Self(bytes))
    }

    pub fn bytes(self) -> u64 {
        self.0
    }
}

impl Display for ChunkSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes", self.0)
    }
}

impl FromStr for ChunkSize {
    type Err = ChunkSizeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ChunkSizeError::Empty);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let captures = SIZE_PATTERN
            .captures(&normalized)
            .ok_or_else(|| ChunkSizeError::Malformed(trimmed.to_string()))?;

        let factor = unit_factor(captures.get(3).map_or("", |unit| unit.as_str()));
        let whole = captures[1]
            .parse::<u128>()
            .map_err(|_| ChunkSizeError::TooLarge(trimmed.to_string()))?;
        let fraction_digits = captures.get(2).map_or("", |digits| digits.as_str());
        let fraction_digits = &fraction_digits[..fraction_digits.len().min(MAX_FRACTION_DIGITS)];

        let whole_bytes = whole
            .checked_mul(factor)
            .ok_or_else(|| ChunkSizeError::TooLarge(trimmed.to_string()))?;
        let fraction_bytes = if fraction_digits.is_empty() {
            0
        } else {
            // Bounded by MAX_FRACTION_DIGITS, so neither parse nor multiply overflows.
            let numerator = fraction_digits
                .parse::<u128>()
                .map_err(|_| ChunkSizeError::Malformed(trimmed.to_string()))?;
            numerator * factor / 10u128.pow(fraction_digits.len() as u32)
        };

        let total = u64::try_from(whole_bytes + fraction_bytes)
            .map_err(|_| ChunkSizeError::TooLarge(trimmed.to_string()))?;
        Self::new(total).map_err(|_| ChunkSizeError::Zero(trimmed.to_string()))
    }
}

fn unit_factor(unit: &str) -> u128 {
    match unit {
        "K" => 1_000,
        "M" => 1_000_000,
        "G" => 1_000_000_000,
        "KI" => 1 << 10,
        "MI" => 1 << 20,
        "GI" => 1 << 30,
        _ => 1,
    }
}
