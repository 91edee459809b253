use serde::{Deserialize, Serialize};

/// A rating is whatever the client sent: a number or a string. It is stored
/// with the same SQLite storage class, so its JSON type comes back unchanged.
///
/// Numbers are held as `i64`/`f64`, so they normalize the way any JSON number
/// parser does: `5.10` comes back as `5.1` and `1e2` as `100.0`. String
/// ratings round-trip byte for byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Rating {
    pub fn is_truthy(&self) -> bool {
        match self {
            Rating::Integer(n) => *n != 0,
            Rating::Real(n) => *n != 0.0 && !n.is_nan(),
            Rating::Text(s) => !s.is_empty(),
        }
    }
}

impl From<Rating> for libsql::Value {
    fn from(rating: Rating) -> Self {
        match rating {
            Rating::Integer(n) => libsql::Value::Integer(n),
            Rating::Real(n) => libsql::Value::Real(n),
            Rating::Text(s) => libsql::Value::Text(s),
        }
    }
}

impl TryFrom<libsql::Value> for Rating {
    type Error = libsql::Value;

    fn try_from(value: libsql::Value) -> Result<Self, Self::Error> {
        match value {
            libsql::Value::Integer(n) => Ok(Rating::Integer(n)),
            libsql::Value::Real(n) => Ok(Rating::Real(n)),
            libsql::Value::Text(s) => Ok(Rating::Text(s)),
            other => Err(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: Rating,
}

/// A create request as received. Every field may be missing; the validator
/// decides which one to complain about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookmarkPayload {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<Rating>,
}

/// A validated create request, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: Rating,
}

/// A partial update. `None` means "leave the column alone".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<Rating>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_keeps_json_type() {
        let r: Rating = serde_json::from_str("5").unwrap();
        assert_eq!(r, Rating::Integer(5));
        let r: Rating = serde_json::from_str("\"5\"").unwrap();
        assert_eq!(r, Rating::Text("5".into()));
        let r: Rating = serde_json::from_str("4.5").unwrap();
        assert_eq!(r, Rating::Real(4.5));
        assert_eq!(serde_json::to_string(&Rating::Text("5".into())).unwrap(), "\"5\"");
    }

    #[test]
    fn numeric_ratings_are_normalized_strings_are_not() {
        let r: Rating = serde_json::from_str("5.10").unwrap();
        assert_eq!(serde_json::to_string(&r).unwrap(), "5.1");
        let r: Rating = serde_json::from_str("1e2").unwrap();
        assert_eq!(r, Rating::Real(100.0));
        let r: Rating = serde_json::from_str("\"5.10\"").unwrap();
        assert_eq!(serde_json::to_string(&r).unwrap(), "\"5.10\"");
    }

    #[test]
    fn rating_rejects_other_json_types() {
        assert!(serde_json::from_str::<Rating>("true").is_err());
        assert!(serde_json::from_str::<Rating>("{}").is_err());
    }

    #[test]
    fn rating_truthiness() {
        assert!(!Rating::Integer(0).is_truthy());
        assert!(!Rating::Real(0.0).is_truthy());
        assert!(!Rating::Text(String::new()).is_truthy());
        assert!(Rating::Text("0".into()).is_truthy());
        assert!(Rating::Integer(3).is_truthy());
    }
}
