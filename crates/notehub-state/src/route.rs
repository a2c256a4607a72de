//! Mapping between application URLs and views.

use std::fmt;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

use notehub_core::path;

/// URL prefix for document and folder paths.
const DATA_PREFIX: &str = "/data/";

/// Characters that would otherwise end the path part of a URL.
const URL_RESERVED: &AsciiSet = &CONTROLS.add(b'%').add(b'#').add(b'?');

/// A navigable location in the application.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/` and any unknown URL.
    Welcome,
    /// `/trash`.
    Trash,
    /// `/settings`.
    Settings,
    /// `/data/<encoded path>`; may name a document or a folder.
    Data(String),
}

impl Route {
    /// Classify a URL path. Query strings and fragments are ignored.
    pub fn parse(url: &str) -> Self {
        let url = url.split(['?', '#']).next().unwrap_or_default();
        let trimmed = url.trim_end_matches('/');
        match trimmed {
            "" => Self::Welcome,
            "/trash" => Self::Trash,
            "/settings" => Self::Settings,
            _ => match url.strip_prefix(DATA_PREFIX) {
                Some(encoded) => {
                    let unescaped = percent_decode_str(encoded).decode_utf8_lossy();
                    let decoded = path::decode(&unescaped);
                    let doc_path = path::segments(&decoded).collect::<Vec<_>>().join("/");
                    if doc_path.is_empty() {
                        Self::Welcome
                    } else {
                        Self::Data(doc_path)
                    }
                }
                None => Self::Welcome,
            },
        }
    }

    /// Route for a document or folder path.
    pub fn data(doc_path: impl Into<String>) -> Self {
        let doc_path = doc_path.into();
        if doc_path.is_empty() {
            Self::Welcome
        } else {
            Self::Data(doc_path)
        }
    }

    /// The URL for this route.
    pub fn to_url(&self) -> String {
        match self {
            Self::Welcome => "/".to_string(),
            Self::Trash => "/trash".to_string(),
            Self::Settings => "/settings".to_string(),
            Self::Data(doc_path) => {
                let encoded = path::encode(doc_path);
                format!("{DATA_PREFIX}{}", utf8_percent_encode(&encoded, URL_RESERVED))
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixed_routes() {
        assert_eq!(Route::parse("/"), Route::Welcome);
        assert_eq!(Route::parse(""), Route::Welcome);
        assert_eq!(Route::parse("/trash"), Route::Trash);
        assert_eq!(Route::parse("/settings/"), Route::Settings);
        assert_eq!(Route::parse("/unknown/page"), Route::Welcome);
        assert_eq!(Route::parse("/data/"), Route::Welcome);
    }

    #[test]
    fn test_parse_data_decodes_path() {
        assert_eq!(
            Route::parse("/data/my_notes/first_draft?x=1"),
            Route::Data("my notes/first draft".to_string())
        );
    }

    #[test]
    fn test_url_roundtrip() {
        for route in [
            Route::Welcome,
            Route::Trash,
            Route::Settings,
            Route::data("projects/q3 plan"),
        ] {
            assert_eq!(Route::parse(&route.to_url()), route);
        }
        assert_eq!(Route::data("a b").to_url(), "/data/a_b");
    }

    #[test]
    fn test_reserved_characters_survive_roundtrip() {
        for name in ["C# notes", "why? maybe", "100% done", "drafts/C#/intro"] {
            let route = Route::data(name);
            assert_eq!(Route::parse(&route.to_url()), route, "{name}");
        }
        assert_eq!(Route::data("C# notes").to_url(), "/data/C%23_notes");
    }

    #[test]
    fn test_parse_unescapes_browser_encoding() {
        assert_eq!(
            Route::parse("/data/caf%C3%A9/menu%20card#top"),
            Route::Data("café/menu card".to_string())
        );
    }
}
