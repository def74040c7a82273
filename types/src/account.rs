//! Account record and its stored JSON encoding.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TypesError;

/// Primary key of an account record.
///
/// Ids are opaque to the store: seeded ids are decimal strings starting at
/// `10000`, externally supplied ids may be anything non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key bytes as written to the bucket.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// An id is usable as a key only when it is non-empty.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// An account as stored in `AccountBucket`.
///
/// The wire shape is `{"Id": "...", "Name": "..."}` so that other tooling
/// reading the same store file sees the same two fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "Id")]
    pub id: AccountId,
    #[serde(rename = "Name")]
    pub name: String,
}

impl Account {
    pub fn new(id: impl Into<AccountId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Encode the record as the UTF-8 JSON value stored under its key.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, TypesError> {
        serde_json::to_vec(self).map_err(|e| TypesError::Encode(e.to_string()))
    }

    /// Decode a stored value. Both fields must be present and be strings.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        serde_json::from_slice(bytes).map_err(|e| TypesError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_capitalised_field_names() {
        let account = Account::new("10000", "Person_0");
        let json = String::from_utf8(account.to_json_bytes().unwrap()).unwrap();
        assert_eq!(json, r#"{"Id":"10000","Name":"Person_0"}"#);
    }

    #[test]
    fn decodes_value_written_by_other_tooling() {
        let account = Account::from_json_bytes(br#"{"Name":"Ada","Id":"abc-1"}"#).unwrap();
        assert_eq!(account.id.as_str(), "abc-1");
        assert_eq!(account.name, "Ada");
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(matches!(
            Account::from_json_bytes(b"not json"),
            Err(TypesError::Decode(_))
        ));
        // lowercase field names are not the stored shape
        assert!(Account::from_json_bytes(br#"{"id":"1","name":"x"}"#).is_err());
        // id must be a string
        assert!(Account::from_json_bytes(br#"{"Id":1,"Name":"x"}"#).is_err());
    }

    #[test]
    fn empty_id_is_invalid() {
        assert!(!AccountId::new("").is_valid());
        assert!(AccountId::new("10000").is_valid());
    }
}
