//! Typed identifiers for stored resources.
//!
//! Two identifier spaces exist side by side:
//!
//! - [`ResourceId`]: the primary key, UUID-shaped, assigned by the
//!   persistence layer at creation and never reused.
//! - [`ShortCode`]: an optional secondary key, 10 characters from `0-9a-z`,
//!   generated at creation for shorter public URLs.
//!
//! Both are assigned exactly once and never change.

use uuid::Uuid;

use crate::error::IdError;

// =============================================================================
// ResourceId
// =============================================================================

/// Primary immutable key of a stored resource.
///
/// Canonical form is the lowercase hyphenated UUID string
/// (`xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`, 36 characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(Uuid);

impl ResourceId {
    /// Creates a new ID with a fresh random UUID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an ID from a raw UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn uuid(&self) -> Uuid {
        self.0
    }

    /// Parses an ID from its canonical string form.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s.is_empty() {
            return Err(IdError::Empty);
        }
        let uuid = Uuid::try_parse(s).map_err(|e| IdError::InvalidUuid(e.to_string()))?;
        Ok(Self(uuid))
    }
}

impl Default for ResourceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl std::str::FromStr for ResourceId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for ResourceId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<Uuid> for ResourceId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

// =============================================================================
// ShortCode
// =============================================================================

/// Secondary short identifier for a resource.
///
/// Fixed length 10, alphabet `0-9a-z` (36 symbols), drawn uniformly from a
/// cryptographically secure generator. 36^10 ≈ 3.7e15 possible codes, so at
/// 100k resources the collision probability stays below 1e-5; generation does
/// not check for existing codes, the store's uniqueness constraint does.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShortCode(String);

impl ShortCode {
    /// Length of every short code.
    pub const LENGTH: usize = 10;

    /// Symbols a short code is drawn from.
    pub const ALPHABET: &'static [u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    /// Generates a fresh code from the process-wide CSPRNG.
    ///
    /// Cannot fail and performs no uniqueness check; retrying on a store
    /// collision is the caller's responsibility.
    #[must_use]
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rng())
    }

    /// Generates a fresh code from the given generator.
    ///
    /// `random_range` maps to the alphabet without modulo bias.
    #[must_use]
    pub fn generate_with<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..Self::LENGTH)
            .map(|_| Self::ALPHABET[rng.random_range(0..Self::ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    /// Parses a code from a string, enforcing length and alphabet.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s.is_empty() {
            return Err(IdError::Empty);
        }
        if s.len() != Self::LENGTH {
            return Err(IdError::InvalidLength {
                expected: Self::LENGTH,
                actual: s.len(),
            });
        }
        for (position, character) in s.char_indices() {
            if !matches!(character, '0'..='9' | 'a'..='z') {
                return Err(IdError::InvalidCharacter {
                    character,
                    position,
                });
            }
        }
        Ok(Self(s.to_string()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ShortCode {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for ShortCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ShortCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// ResourceKeys
// =============================================================================

/// The identifier pair a resource carries: primary id plus optional short
/// code. Both are assigned at creation time and never change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResourceKeys {
    /// Primary key.
    pub id: ResourceId,

    /// Secondary short identifier, if one was generated at creation.
    pub short_code: Option<ShortCode>,
}

impl ResourceKeys {
    /// Keys for a resource without a short code.
    #[must_use]
    pub fn new(id: ResourceId) -> Self {
        Self {
            id,
            short_code: None,
        }
    }

    /// Attaches a short code.
    #[must_use]
    pub fn with_short_code(mut self, code: ShortCode) -> Self {
        self.short_code = Some(code);
        self
    }

    /// Generates a fresh id and short code pair.
    #[must_use]
    pub fn generate() -> Self {
        Self {
            id: ResourceId::new(),
            short_code: Some(ShortCode::generate()),
        }
    }

    /// The identifier that goes into URLs: the short code when present,
    /// otherwise the primary id.
    #[must_use]
    pub fn routing_key(&self) -> String {
        match &self.short_code {
            Some(code) => code.as_str().to_string(),
            None => self.id.to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
