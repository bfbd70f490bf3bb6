//! URL construction: base/path joining and query-parameter merging.

use std::fmt::Display;

use url::Url;

/// Ordered query parameters where `None` values are omitted at send time.
///
/// Mirrors how optional filters are passed to the backend: absent filters
/// never appear in the query string, present ones are stringified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, Option<String>)>,
}

impl QueryParams {
    /// Creates an empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a present value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.pairs.push((key.into(), Some(value.to_string())));
        self
    }

    /// Appends an optional value; `None` is kept but skipped when applied.
    #[must_use]
    pub fn with_opt<V: Display>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.pairs
            .push((key.into(), value.map(|value| value.to_string())));
        self
    }

    /// Returns `true` when no present values would be appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }

    /// Iterates over the pairs that will actually be sent.
    pub fn present(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|value| (key.as_str(), value)))
    }
}

/// Returns `true` when `path` is already an absolute http(s) URL.
#[must_use]
pub fn is_absolute_url(path: &str) -> bool {
    let lower = path.get(..8).unwrap_or(path).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Joins `base` and `path` with exactly one separating slash.
///
/// Absolute `path` values are returned verbatim. Any run of trailing slashes
/// on `base` and leading slashes on `path` collapses to a single `/`.
#[must_use]
pub fn build_url(base: &str, path: &str) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }

    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

/// Appends `params` to `url`, preserving any query string already present.
///
/// # Errors
///
/// Returns the parse error when `url` is not a valid absolute URL.
pub fn apply_query(url: &str, params: &QueryParams) -> Result<Url, url::ParseError> {
    let mut parsed = Url::parse(url)?;
    if !params.is_empty() {
        let mut pairs = parsed.query_pairs_mut();
        for (key, value) in params.present() {
            pairs.append_pair(key, value);
        }
    }
    Ok(parsed)
}

/// Percent-encodes a single user-supplied path segment (ISBN, username, etc.).
#[must_use]
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const BASES: [&str; 4] = [
        "http://localhost:8090/api/v1",
        "http://localhost:8090/api/v1/",
        "http://localhost:8090/api/v1//",
        "http://localhost:8090/api/v1///",
    ];
    const PATHS: [&str; 4] = ["books", "/books", "//books", "///books"];

    #[test]
    fn test_build_url_exactly_one_separator_for_all_slash_mixes() {
        for base in BASES {
            for path in PATHS {
                assert_eq!(
                    build_url(base, path),
                    "http://localhost:8090/api/v1/books",
                    "base={base:?} path={path:?}"
                );
            }
        }
    }

    #[test]
    fn test_build_url_keeps_nested_path_segments() {
        assert_eq!(
            build_url("http://host/api/v1/", "/borrow/42/renew"),
            "http://host/api/v1/borrow/42/renew"
        );
    }

    #[test]
    fn test_build_url_absolute_path_used_verbatim() {
        assert_eq!(
            build_url("http://host/api/v1", "https://other.example.com/x?y=1"),
            "https://other.example.com/x?y=1"
        );
        assert_eq!(
            build_url("http://host/api/v1", "HTTP://UPPER.example.com/"),
            "HTTP://UPPER.example.com/"
        );
    }

    #[test]
    fn test_apply_query_omits_none_values() {
        let params = QueryParams::new()
            .with("page", 0)
            .with_opt::<&str>("keyword", None)
            .with("size", 10);
        let url = apply_query("http://host/api/v1/books", &params).unwrap();
        assert_eq!(url.as_str(), "http://host/api/v1/books?page=0&size=10");
    }

    #[test]
    fn test_apply_query_merges_with_existing_query() {
        let params = QueryParams::new().with("newPassword", "b");
        let url = apply_query("http://host/api/v1/auth/password?oldPassword=a", &params).unwrap();
        assert_eq!(
            url.as_str(),
            "http://host/api/v1/auth/password?oldPassword=a&newPassword=b"
        );
    }

    #[test]
    fn test_apply_query_without_params_leaves_url_untouched() {
        let url = apply_query("http://host/api/v1/books", &QueryParams::new()).unwrap();
        assert_eq!(url.as_str(), "http://host/api/v1/books");
    }

    #[test]
    fn test_apply_query_stringifies_booleans() {
        let params = QueryParams::new().with_opt("available", Some(true));
        let url = apply_query("http://host/books/search", &params).unwrap();
        assert_eq!(url.query(), Some("available=true"));
    }

    #[test]
    fn test_encode_segment_escapes_reserved_characters() {
        assert_eq!(encode_segment("978-0/13"), "978-0%2F13");
        assert_eq!(encode_segment("a b"), "a%20b");
    }
}
