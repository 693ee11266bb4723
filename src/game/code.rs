use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::core::{Result, SettlementError};

/// Characters a group code may contain. `I`, `L`, `O` and `0` are left
/// out because they are easy to misread when shouted across a table.
pub const GROUP_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ123456789";

pub const GROUP_CODE_LEN: usize = 6;

/// How many times [`GroupCode::generate_unique`] tries before giving up
/// when no other limit is given.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// A short code players type in to join a game.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupCode(String);

impl GroupCode {
    /// Draw a random code.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..GROUP_CODE_LEN)
            .map(|_| {
                let idx = rng.random_range(0..GROUP_CODE_ALPHABET.len());
                GROUP_CODE_ALPHABET[idx] as char
            })
            .collect();
        Self(code)
    }

    /// Draw codes until one is not taken.
    ///
    /// `is_taken` is asked about each candidate. After `max_attempts`
    /// collisions this gives up with
    /// [`SettlementError::GroupCodeExhausted`].
    pub fn generate_unique<R, F>(rng: &mut R, mut is_taken: F, max_attempts: usize) -> Result<Self>
    where
        R: Rng + ?Sized,
        F: FnMut(&GroupCode) -> bool,
    {
        for attempt in 0..max_attempts {
            let code = Self::generate(rng);
            if !is_taken(&code) {
                return Ok(code);
            }
            tracing::event!(tracing::Level::TRACE, %code, attempt, "Group code collision");
        }
        Err(SettlementError::GroupCodeExhausted(max_attempts))
    }

    /// Parse a code typed by a person. Lower case is accepted and
    /// surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let code = input.trim().to_ascii_uppercase();
        let valid = code.len() == GROUP_CODE_LEN
            && code.bytes().all(|b| GROUP_CODE_ALPHABET.contains(&b));
        if !valid {
            return Err(SettlementError::InvalidGroupCode(input.to_string()));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for GroupCode {
    type Err = SettlementError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for GroupCode {
    type Error = SettlementError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<GroupCode> for String {
    fn from(code: GroupCode) -> Self {
        code.0
    }
}
