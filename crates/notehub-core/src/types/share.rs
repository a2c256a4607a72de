//! Shareable read-only links.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A server-issued link granting read access to one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLink {
    /// Link token.
    pub id: String,
    /// Path of the shared document.
    pub document_path: String,
    /// Expiry instant; `None` means the link never expires.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShareLink {
    /// Whether the link is still usable at `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

/// Lifetimes the server accepts when a link is extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShareDuration {
    /// One hour.
    Hour,
    /// One day.
    Day,
    /// One week.
    Week,
    /// No expiry.
    Never,
}

impl ShareDuration {
    /// The duration string sent in the update request body.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hour => "1h",
            Self::Day => "24h",
            Self::Week => "168h",
            Self::Never => "never",
        }
    }

    /// Length of the duration, `None` for [`ShareDuration::Never`].
    pub fn to_chrono(&self) -> Option<chrono::Duration> {
        match self {
            Self::Hour => Some(chrono::Duration::hours(1)),
            Self::Day => Some(chrono::Duration::hours(24)),
            Self::Week => Some(chrono::Duration::hours(168)),
            Self::Never => None,
        }
    }
}

impl fmt::Display for ShareDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShareDuration {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1h" | "hour" => Ok(Self::Hour),
            "24h" | "1d" | "day" => Ok(Self::Day),
            "168h" | "7d" | "week" => Ok(Self::Week),
            "never" => Ok(Self::Never),
            other => Err(AppError::validation(format!(
                "Unsupported share duration '{other}' (expected 1h, 24h, 168h or never)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_server_link() {
        let json = r#"{"id":"abc","documentPath":"notes/today","expiresAt":"2026-01-02T03:04:05.123456789+01:00"}"#;
        let link: ShareLink = serde_json::from_str(json).expect("parse");
        assert_eq!(link.document_path, "notes/today");
        assert!(link.expires_at.is_some());

        let never: ShareLink =
            serde_json::from_str(r#"{"id":"x","documentPath":"a","expiresAt":null}"#)
                .expect("parse");
        assert!(never.is_active_at(Utc::now()));
    }

    #[test]
    fn test_expired_link_is_inactive() {
        let link = ShareLink {
            id: "x".into(),
            document_path: "a".into(),
            expires_at: Some(Utc::now() - chrono::Duration::minutes(1)),
        };
        assert!(!link.is_active_at(Utc::now()));
    }

    #[test]
    fn test_duration_parsing() {
        assert_eq!("24h".parse::<ShareDuration>().unwrap(), ShareDuration::Day);
        assert_eq!("never".parse::<ShareDuration>().unwrap(), ShareDuration::Never);
        assert!("3h".parse::<ShareDuration>().is_err());
    }
}
