//! Account record domain model.
//!
//! # Responsibility
//! - Define `AccountRecord`, `TagObject` and `RecordType`.
//! - Provide tag parsing from the semicolon-delimited input form.
//!
//! # Invariants
//! - `password` is `None` whenever an update sets `type == LDAP`.
//! - Parsed tags are trimmed, non-empty, and keep input order and duplicates.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Opaque record identifier.
///
/// Kept as a plain string so ids written by older clients (timestamp strings)
/// load without conversion.
pub type RecordId = String;

/// Separator between tag labels in the raw tag input.
pub const TAG_SEPARATOR: char = ';';

/// Account kind. Controls whether a password is stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// Directory-backed account; the password lives elsewhere.
    #[serde(rename = "LDAP")]
    Ldap,
    /// Local account with its own password.
    #[default]
    #[serde(rename = "Локальная")]
    Local,
}

impl RecordType {
    /// Returns the wire label used in persisted data.
    pub fn label(self) -> &'static str {
        match self {
            Self::Ldap => "LDAP",
            Self::Local => "Локальная",
        }
    }

    /// Returns whether records of this type keep a password.
    pub fn stores_password(self) -> bool {
        !matches!(self, Self::Ldap)
    }
}

impl Display for RecordType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a record type label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRecordTypeError(String);

impl Display for ParseRecordTypeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported record type `{}`; expected LDAP|Локальная|local",
            self.0
        )
    }
}

impl Error for ParseRecordTypeError {}

impl FromStr for RecordType {
    type Err = ParseRecordTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed == Self::Local.label() {
            return Ok(Self::Local);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "ldap" => Ok(Self::Ldap),
            "local" => Ok(Self::Local),
            _ => Err(ParseRecordTypeError(trimmed.to_string())),
        }
    }
}

/// Single tag label wrapper, serialized as `{ "text": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagObject {
    pub text: String,
}

impl TagObject {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// One account credential entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: RecordId,
    #[serde(default)]
    pub tags: Vec<TagObject>,
    /// Serialized as `type` to match the persisted schema.
    #[serde(rename = "type")]
    pub kind: RecordType,
    #[serde(default)]
    pub login: String,
    /// Always `None` for LDAP records written through an update.
    #[serde(default)]
    pub password: Option<String>,
}

impl AccountRecord {
    /// Creates a blank record with a freshly generated id.
    ///
    /// # Invariants
    /// - Type defaults to `Local`, login and password are empty strings.
    /// - Tags start empty.
    pub fn new() -> Self {
        Self::with_id(generate_record_id())
    }

    /// Creates a blank record with a caller-provided id.
    pub fn with_id(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            tags: Vec::new(),
            kind: RecordType::default(),
            login: String::new(),
            password: Some(String::new()),
        }
    }

    /// Builds the full replacement for this record from update input.
    ///
    /// The id is kept; every other field comes from `update`.
    pub fn replaced_with(&self, update: &RecordUpdate) -> Self {
        let password = if update.kind.stores_password() {
            update.password.clone()
        } else {
            None
        };

        Self {
            id: self.id.clone(),
            tags: parse_tags(&update.tags),
            kind: update.kind,
            login: update.login.clone(),
            password,
        }
    }

    /// Returns tag texts joined back into the editable raw form.
    pub fn tags_label(&self) -> String {
        self.tags
            .iter()
            .map(|tag| tag.text.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Default for AccountRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Input for replacing a record's contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordUpdate {
    /// Semicolon-separated tag labels.
    pub tags: String,
    pub kind: RecordType,
    pub login: String,
    /// Ignored when `kind` is LDAP.
    pub password: Option<String>,
}

/// Splits raw tag input into trimmed, non-empty tags.
///
/// Order and duplicates are preserved.
pub fn parse_tags(raw: &str) -> Vec<TagObject> {
    raw.split(TAG_SEPARATOR)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(TagObject::new)
        .collect()
}

/// Generates a unique record id.
pub fn generate_record_id() -> RecordId {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::{parse_tags, AccountRecord, RecordType, RecordUpdate, TagObject};

    fn texts(tags: &[TagObject]) -> Vec<&str> {
        tags.iter().map(|tag| tag.text.as_str()).collect()
    }

    #[test]
    fn parse_tags_trims_and_drops_empty_segments() {
        let tags = parse_tags("a; b ;;c");
        assert_eq!(texts(&tags), vec!["a", "b", "c"]);
    }

    #[test]
    fn parse_tags_keeps_duplicates_in_order() {
        let tags = parse_tags("work;home; work");
        assert_eq!(texts(&tags), vec!["work", "home", "work"]);
    }

    #[test]
    fn parse_tags_returns_empty_for_blank_input() {
        assert!(parse_tags("").is_empty());
        assert!(parse_tags("  ;  ; ").is_empty());
    }

    #[test]
    fn new_record_is_blank_local() {
        let record = AccountRecord::new();
        assert!(!record.id.is_empty());
        assert_eq!(record.kind, RecordType::Local);
        assert_eq!(record.login, "");
        assert_eq!(record.password.as_deref(), Some(""));
        assert!(record.tags.is_empty());
    }

    #[test]
    fn new_records_get_distinct_ids() {
        assert_ne!(AccountRecord::new().id, AccountRecord::new().id);
    }

    #[test]
    fn replaced_with_nulls_password_for_ldap() {
        let record = AccountRecord::with_id("1");
        let replaced = record.replaced_with(&RecordUpdate {
            tags: "a".to_string(),
            kind: RecordType::Ldap,
            login: "x".to_string(),
            password: Some("y".to_string()),
        });
        assert_eq!(replaced.id, "1");
        assert_eq!(replaced.password, None);
    }

    #[test]
    fn replaced_with_keeps_none_password_for_local() {
        let record = AccountRecord::with_id("1");
        let replaced = record.replaced_with(&RecordUpdate {
            kind: RecordType::Local,
            password: None,
            ..RecordUpdate::default()
        });
        assert_eq!(replaced.password, None);
    }

    #[test]
    fn record_type_parses_labels() {
        assert_eq!("LDAP".parse::<RecordType>().unwrap(), RecordType::Ldap);
        assert_eq!("ldap".parse::<RecordType>().unwrap(), RecordType::Ldap);
        assert_eq!("Локальная".parse::<RecordType>().unwrap(), RecordType::Local);
        assert_eq!(" Local ".parse::<RecordType>().unwrap(), RecordType::Local);
        assert!("remote".parse::<RecordType>().is_err());
    }

    #[test]
    fn record_serializes_with_wire_field_names() {
        let mut record = AccountRecord::with_id("42");
        record.tags = parse_tags("a");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "42",
                "tags": [{ "text": "a" }],
                "type": "Локальная",
                "login": "",
                "password": ""
            })
        );
    }

    #[test]
    fn tags_label_joins_with_separator() {
        let mut record = AccountRecord::with_id("1");
        record.tags = parse_tags("a;b");
        assert_eq!(record.tags_label(), "a; b");
    }
}
