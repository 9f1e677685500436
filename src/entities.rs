//! BIDS filename entity parsing.
//!
//! A BIDS filename is a `_`-separated sequence of `key-value` entities
//! followed by a suffix and extension, e.g.
//! `sub-01_task-rest_run-1_bold.nii.gz`. Parsing validates every token
//! against the fixed entity vocabulary and reorders the result into
//! canonical key order regardless of the order found on disk.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{CoreError, Result};

/// Fixed entity vocabulary, declared in canonical filename order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum EntityKey {
    Subject,
    Session,
    Task,
    Acquisition,
    Run,
    Date,
}

impl EntityKey {
    pub const ALL: [Self; 6] = [
        Self::Subject,
        Self::Session,
        Self::Task,
        Self::Acquisition,
        Self::Run,
        Self::Date,
    ];

    /// Short key as it appears in filenames.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Subject => "sub",
            Self::Session => "ses",
            Self::Task => "task",
            Self::Acquisition => "acq",
            Self::Run => "run",
            Self::Date => "date",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|entity| entity.key() == key)
    }
}

impl std::fmt::Display for EntityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A filename decomposed into validated entities, suffix and extension.
///
/// Entities are held in canonical vocabulary order with no duplicates;
/// `date` values name a real calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedFilename {
    entities: Vec<(EntityKey, String)>,
    suffix: String,
    extension: String,
}

impl ParsedFilename {
    /// Parses and validates a bare filename (no directory components).
    pub fn parse(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(CoreError::InvalidEntity("empty filename".to_string()));
        }

        let mut tokens: Vec<&str> = name.split('_').collect();
        let last = tokens.pop().unwrap_or_default();

        let (suffix, extension) = match last.split_once('.') {
            Some((suffix, extension)) => (suffix, extension),
            None => (last, ""),
        };
        if suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidEntity(format!(
                "malformed suffix '{suffix}'"
            )));
        }
        if !extension
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.')
        {
            return Err(CoreError::InvalidEntity(format!(
                "malformed extension '{extension}'"
            )));
        }

        let mut entities: Vec<(EntityKey, String)> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let (key, value) = token.split_once('-').ok_or_else(|| {
                CoreError::InvalidEntity(format!("malformed entity token '{token}'"))
            })?;

            let key = EntityKey::from_key(key)
                .ok_or_else(|| CoreError::InvalidEntity(format!("unknown entity key '{key}'")))?;

            if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(CoreError::InvalidEntity(format!(
                    "value '{value}' for key '{key}' must be alphanumeric"
                )));
            }
            if entities.iter().any(|(existing, _)| *existing == key) {
                return Err(CoreError::InvalidEntity(format!(
                    "duplicate entity key '{key}'"
                )));
            }
            if key == EntityKey::Date {
                validate_date(value)?;
            }

            entities.push((key, value.to_string()));
        }

        entities.sort_by_key(|(key, _)| *key);

        Ok(Self {
            entities,
            suffix: suffix.to_string(),
            extension: extension.to_string(),
        })
    }

    #[must_use]
    pub fn entities(&self) -> &[(EntityKey, String)] {
        &self.entities
    }

    #[must_use]
    pub fn get(&self, key: EntityKey) -> Option<&str> {
        self.entities
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Task entity value, when one was present in the filename.
    #[must_use]
    pub fn task(&self) -> Option<&str> {
        self.get(EntityKey::Task)
    }

    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl std::fmt::Display for ParsedFilename {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (key, value) in &self.entities {
            write!(f, "{key}-{value}_")?;
        }
        write!(f, "{}", self.suffix)?;
        if !self.extension.is_empty() {
            write!(f, ".{}", self.extension)?;
        }
        Ok(())
    }
}

fn validate_date(value: &str) -> Result<()> {
    if value.len() != 8 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::InvalidDate {
            value: value.to_string(),
            reason: "expected YYYYMMDD".to_string(),
        });
    }

    // All-digit input, so these cannot fail.
    let year: i32 = value[..4].parse().unwrap_or(0);
    let month: u32 = value[4..6].parse().unwrap_or(0);
    let day: u32 = value[6..].parse().unwrap_or(0);

    if NaiveDate::from_ymd_opt(year, month, day).is_none() {
        return Err(CoreError::InvalidDate {
            value: value.to_string(),
            reason: "no such calendar day".to_string(),
        });
    }

    Ok(())
}
