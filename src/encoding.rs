use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, PercentEncode};
use std::borrow::Cow;

// https://tools.ietf.org/html/rfc5849#section-3.6
// * ALPHA, DIGIT, '-', '.', '_', '~' MUST NOT be encoded.
// * All other characters MUST be encoded.
// * The two hexadecimal characters used to represent encoded
//   characters MUST be uppercase.
pub const TARGETS_FOR_PARAMS: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode with the RFC 3986 unreserved set. Space becomes `%20`.
pub fn percent_encode(input: &str) -> PercentEncode<'_> {
    utf8_percent_encode(input, TARGETS_FOR_PARAMS)
}

pub fn percent_encode_str<'a, T: Into<Cow<'a, str>>>(input: T) -> String {
    let input: Cow<'a, str> = input.into();
    percent_encode(&input).to_string()
}

/// Decode `%XX` sequences, replacing invalid UTF-8 rather than failing.
/// `+` is left alone; vendor URLs carry spaces as `%20`.
pub fn percent_decode(input: &str) -> Cow<'_, str> {
    percent_decode_str(input).decode_utf8_lossy()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_is_percent_twenty() {
        assert_eq!(percent_encode_str("a b"), "a%20b");
        assert!(!percent_encode_str("Hello Ladies + Gentlemen").contains('+'));
    }

    #[test]
    fn unreserved_pass_through() {
        assert_eq!(percent_encode_str("AZaz09-._~"), "AZaz09-._~");
    }

    #[test]
    fn reserved_are_uppercase_hex() {
        assert_eq!(
            percent_encode_str("https://example.org/res"),
            "https%3A%2F%2Fexample.org%2Fres"
        );
        assert_eq!(percent_encode_str("'=&*"), "%27%3D%26%2A");
        assert_eq!(percent_encode_str("パ"), "%E3%83%91");
    }

    #[test]
    fn decode_roundtrips_reserved() {
        assert_eq!(percent_decode("filter%3Dname%3D%27A%27"), "filter=name='A'");
        assert_eq!(percent_decode("a+b"), "a+b");
    }
}
