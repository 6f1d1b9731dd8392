//! Error types shared by the signing, base-string, and session helpers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error exposed by public APIs.
///
/// Every variant is deterministic for a given input, so none of them is worth retrying.
/// A signature that fails to verify is not an error; see
/// [`validate_user_signature`](crate::signature::validate_user_signature) and
/// [`SessionCheck`](crate::session::SessionCheck).
#[derive(Debug, ThisError)]
pub enum Error {
	/// Secret key is not valid standard base64.
	#[error("Secret key is not valid base64.")]
	KeyDecode {
		/// Underlying decoding failure.
		#[source]
		source: base64::DecodeError,
	},
	/// URL is not a well-formed absolute URL.
	#[error("URL is not a well-formed absolute URL.")]
	UrlParse {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// URL parsed but carries no host to normalize.
	#[error("URL `{url}` has no host.")]
	UrlWithoutHost {
		/// URL that failed validation.
		url: String,
	},
	/// Input bytes cannot be read as UTF-8 text.
	#[error("Input is not valid UTF-8.")]
	Encoding {
		/// Underlying decoding failure.
		#[source]
		source: std::str::Utf8Error,
	},
	/// Dynamic session token does not follow `<expiration>_[<userKey>_]<signature>`.
	#[error("Dynamic session token is malformed: {reason}.")]
	MalformedSessionToken {
		/// Which part of the token was rejected.
		reason: &'static str,
	},
}
impl From<base64::DecodeError> for Error {
	fn from(source: base64::DecodeError) -> Self {
		Self::KeyDecode { source }
	}
}
impl From<url::ParseError> for Error {
	fn from(source: url::ParseError) -> Self {
		Self::UrlParse { source }
	}
}
impl From<std::str::Utf8Error> for Error {
	fn from(source: std::str::Utf8Error) -> Self {
		Self::Encoding { source }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn conversions_pick_the_matching_variant() {
		let err: Error =
			Url::parse("not a url").expect_err("Relative text should not parse.").into();

		assert!(matches!(err, Error::UrlParse { .. }));

		let bytes = [0xff_u8, 0xfe];
		let err: Error =
			std::str::from_utf8(&bytes).expect_err("Invalid UTF-8 should not decode.").into();

		assert!(matches!(err, Error::Encoding { .. }));
	}

	#[test]
	fn messages_do_not_leak_inputs() {
		let err = Error::MalformedSessionToken { reason: "missing signature" };

		assert_eq!(err.to_string(), "Dynamic session token is malformed: missing signature.");
	}
}
