//! RFC 3986 percent-encoding shared by base-string construction and the HTTP layer.

// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except RFC 3986 unreserved characters (`ALPHA / DIGIT / "-" / "." / "_" / "~"`).
pub const RFC3986_ENCODE_SET: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-encodes the UTF-8 bytes of `value`, leaving only unreserved characters as-is.
///
/// Escapes use uppercase hex digits. Request builders that put parameters on the wire
/// must use this function as well, or the server will compute a different base string.
pub fn percent_encode(value: &str) -> String {
	utf8_percent_encode(value, RFC3986_ENCODE_SET).to_string()
}
