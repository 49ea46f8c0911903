use crate::encoding::percent_decode;
use crate::parameters::ParameterSet;

/// Key that malformed query pieces are stored under.
pub const FILTER_KEY: &str = "filter";

// Length of the `filter=` prefix dropped from malformed pieces.
const FILTER_PREFIX_LEN: usize = 7;

/// Split a raw URL into its base and query on the first `?`.
pub fn split_url(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (raw, None),
    }
}

#[test]
fn test_split_url() {
    assert_eq!(
        split_url("https://example.org/res?x=1&y=2"),
        ("https://example.org/res", Some("x=1&y=2"))
    );
    assert_eq!(split_url("https://example.org/res"), ("https://example.org/res", None));
    assert_eq!(
        split_url("https://example.org/res?a=1?b"),
        ("https://example.org/res", Some("a=1?b"))
    );
}

/// Parse a query string into decoded parameters.
///
/// Each `&`-separated piece is percent-decoded and split on `=`. Pieces
/// that do not split into exactly a key and a value are OneRoster filter
/// expressions such as `filter=familyName='Smith'`; they are stored under
/// `filter` with the first seven bytes dropped. If byte seven falls inside
/// a multi-byte character the cut moves forward to the next boundary.
pub fn query_to_params(query: &str) -> ParameterSet {
    let mut params = ParameterSet::new();
    for piece in query.split('&').filter(|s| !s.is_empty()) {
        let piece = percent_decode(piece);
        let parts = piece.split('=').collect::<Vec<&str>>();
        if let [key, value] = parts.as_slice() {
            params.insert(*key, *value);
        } else {
            params.insert(FILTER_KEY, strip_filter_prefix(&piece));
        }
    }
    params
}

fn strip_filter_prefix(piece: &str) -> &str {
    (FILTER_PREFIX_LEN..=piece.len())
        .find(|&i| piece.is_char_boundary(i))
        .map_or("", |i| &piece[i..])
}

#[test]
fn test_query_to_params() {
    let params = query_to_params("limit=100&offset=0");
    assert_eq!(params.len(), 2);
    assert_eq!(params.get("limit"), Some("100"));
    assert_eq!(params.get("offset"), Some("0"));

    let params = query_to_params("filter%3DfamilyName%3D%27Smith%27&limit=5");
    assert_eq!(params.get("filter"), Some("familyName='Smith'"));
    assert_eq!(params.get("limit"), Some("5"));

    let params = query_to_params("sort=familyName%20desc");
    assert_eq!(params.get("sort"), Some("familyName desc"));

    assert!(query_to_params("").is_empty());
    assert!(query_to_params("&&&").is_empty());
}

#[test]
fn test_query_to_params_filter_offset() {
    // no '=' at all still drops the fixed prefix
    let params = query_to_params("abcdefghij");
    assert_eq!(params.get("filter"), Some("hij"));
    let params = query_to_params("short");
    assert_eq!(params.get("filter"), Some(""));
    let params = query_to_params("filter=role='teacher'");
    assert_eq!(params.get("filter"), Some("role='teacher'"));
}

#[test]
fn test_filter_offset_counts_bytes() {
    // each 'é' is two bytes, so byte 7 is the 'x'
    let params = query_to_params("%C3%A9%C3%A9%C3%A9=x=y");
    assert_eq!(params.get("filter"), Some("x=y"));
    // byte 7 splits an 'é'; the cut moves to the next character
    let params = query_to_params("aa%C3%A9%C3%A9%C3%A9%C3%A9=b=c");
    assert_eq!(params.get("filter"), Some("é=b=c"));
}
