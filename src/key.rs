//! Secret key wrapper that redacts sensitive material.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::_prelude::*;

/// Decoded partner secret used as the HMAC-SHA1 key.
///
/// Partner secrets are handed out as standard (padded, non-URL-safe) base64. The
/// wrapper holds the decoded bytes and keeps them out of `Debug`/`Display` output.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct SecretKey(Vec<u8>);
impl SecretKey {
	/// Decodes a base64-encoded secret.
	pub fn from_base64(encoded: impl AsRef<str>) -> Result<Self> {
		Ok(Self(STANDARD.decode(encoded.as_ref())?))
	}

	/// Wraps already-decoded key bytes.
	pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
		Self(bytes.into())
	}

	/// Returns the raw key bytes. Callers must avoid logging them.
	pub fn expose(&self) -> &[u8] {
		&self.0
	}
}
impl TryFrom<String> for SecretKey {
	type Error = Error;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::from_base64(value)
	}
}
impl FromStr for SecretKey {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_base64(s)
	}
}
impl Debug for SecretKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SecretKey").field(&"<redacted>").finish()
	}
}
impl Display for SecretKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn decodes_standard_base64() {
		let key = SecretKey::from_base64("SmVmZQ==").expect("Fixture secret should decode.");

		assert_eq!(key.expose(), b"Jefe");
	}

	#[test]
	fn rejects_malformed_base64() {
		let err = SecretKey::from_base64("not-base64!!").expect_err("Malformed secret must fail.");

		assert!(matches!(err, Error::KeyDecode { .. }));
		// URL-safe alphabet is not accepted.
		assert!(SecretKey::from_base64("-_8=").is_err());
	}

	#[test]
	fn secret_formatters_redact() {
		let key = SecretKey::from_bytes(b"super-secret".to_vec());

		assert_eq!(format!("{key:?}"), "SecretKey(\"<redacted>\")");
		assert_eq!(format!("{key}"), "<redacted>");
	}
}
