//! Document path helpers.
//!
//! Document paths are slash-delimited and relative to the workspace root
//! (`projects/plans/q3`). Whenever a path is embedded in a URL, either a
//! navigable application URL or an API request, spaces are replaced by
//! underscores and the substitution is reversed on the way back in. This
//! is the only encoding scheme used by NoteHub.

/// Separator between path segments.
pub const SEPARATOR: char = '/';

/// Character substituted for spaces when a path is placed in a URL.
const SPACE_SUBSTITUTE: char = '_';

/// Encode a document path for embedding in a URL.
pub fn encode(path: &str) -> String {
    path.replace(' ', &SPACE_SUBSTITUTE.to_string())
}

/// Decode a URL-embedded path back into a document path.
pub fn decode(encoded: &str) -> String {
    encoded.replace(SPACE_SUBSTITUTE, " ")
}

/// Join a parent folder path and a child name.
///
/// An empty parent denotes the root, in which case no prefix is added.
pub fn join(parent: &str, name: &str) -> String {
    let parent = parent.trim_matches(SEPARATOR);
    let name = name.trim_matches(SEPARATOR);
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}{SEPARATOR}{name}")
    }
}

/// The parent folder of a path, `""` for items at the root.
pub fn parent(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// The last segment of a path.
pub fn file_name(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Non-empty segments of a path.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty())
}

/// Whether `path` lies inside the folder `ancestor`.
pub fn is_descendant_of(path: &str, ancestor: &str) -> bool {
    if ancestor.is_empty() {
        return !path.is_empty();
    }
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path[ancestor.len()..].starts_with(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        for p in ["plain", "my notes/first draft", "a b/c d/e f", ""] {
            assert_eq!(decode(&encode(p)), p);
        }
        for e in ["plain", "my_notes/first_draft"] {
            assert_eq!(encode(&decode(e)), e);
        }
    }

    #[test]
    fn test_join_at_root_and_nested() {
        assert_eq!(join("", "note"), "note");
        assert_eq!(join("folder", "note"), "folder/note");
        assert_eq!(join("a/b/", "c"), "a/b/c");
    }

    #[test]
    fn test_parent_and_file_name() {
        assert_eq!(parent("a/b"), "a");
        assert_eq!(parent("a"), "");
        assert_eq!(file_name("a/b/c"), "c");
        assert_eq!(file_name("c"), "c");
    }

    #[test]
    fn test_is_descendant_of() {
        assert!(is_descendant_of("a/b", "a"));
        assert!(!is_descendant_of("ab/c", "a"));
        assert!(!is_descendant_of("a", "a"));
        assert!(is_descendant_of("a", ""));
    }
}
