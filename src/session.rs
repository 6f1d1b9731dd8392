//! Dynamic session tokens that extend a login session without server-side state.
//!
//! Wire formats (byte-exact):
//!
//! - Plain: `<expiration>_BASE64(HMAC-SHA1(secret, <login_token>_<expiration>))`
//! - User-signed: `<expiration>_<user_key>_BASE64(HMAC-SHA1(secret,
//!   <login_token>_<expiration>_<user_key>))`
//!
//! `expiration` is a Unix timestamp in whole seconds.

// self
use crate::{
	_prelude::*,
	key::SecretKey,
	obs::{OpKind, OpOutcome, OpSpan},
	signature::{self, SIGNABLE_SEPARATOR},
};

/// Issues a plain dynamic session token that expires `timeout` from now.
///
/// # Errors
///
/// Returns [`Error::KeyDecode`] when `secret` is not standard base64.
pub fn get_dynamic_session_signature(
	login_token: &str,
	timeout: Duration,
	secret: &str,
) -> Result<String> {
	get_dynamic_session_signature_at(login_token, timeout, secret, OffsetDateTime::now_utc())
}

/// Same as [`get_dynamic_session_signature`] with an explicit clock reading.
pub fn get_dynamic_session_signature_at(
	login_token: &str,
	timeout: Duration,
	secret: &str,
	now: OffsetDateTime,
) -> Result<String> {
	let key = SecretKey::from_base64(secret)?;

	Ok(dynamic_session_signature_with_key(login_token, timeout, &key, now))
}

/// Issues a user-signed dynamic session token that expires `timeout` from now.
///
/// # Errors
///
/// Returns [`Error::KeyDecode`] when `secret` is not standard base64.
pub fn get_dynamic_session_signature_user_signed(
	login_token: &str,
	timeout: Duration,
	user_key: &str,
	secret: &str,
) -> Result<String> {
	get_dynamic_session_signature_user_signed_at(
		login_token,
		timeout,
		user_key,
		secret,
		OffsetDateTime::now_utc(),
	)
}

/// Same as [`get_dynamic_session_signature_user_signed`] with an explicit clock reading.
pub fn get_dynamic_session_signature_user_signed_at(
	login_token: &str,
	timeout: Duration,
	user_key: &str,
	secret: &str,
	now: OffsetDateTime,
) -> Result<String> {
	let key = SecretKey::from_base64(secret)?;

	Ok(dynamic_session_signature_user_signed_with_key(login_token, timeout, user_key, &key, now))
}

/// Issues a plain token with an already-decoded key.
pub fn dynamic_session_signature_with_key(
	login_token: &str,
	timeout: Duration,
	key: &SecretKey,
	now: OffsetDateTime,
) -> String {
	let span = OpSpan::enter(OpKind::DynamicSession);
	let token = DynamicSessionToken::issue(login_token, expiration_at(now, timeout), None, key);

	span.finish(OpOutcome::Success);

	token.to_string()
}

/// Issues a user-signed token with an already-decoded key.
pub fn dynamic_session_signature_user_signed_with_key(
	login_token: &str,
	timeout: Duration,
	user_key: &str,
	key: &SecretKey,
	now: OffsetDateTime,
) -> String {
	let span = OpSpan::enter(OpKind::DynamicSessionUserSigned);
	let token =
		DynamicSessionToken::issue(login_token, expiration_at(now, timeout), Some(user_key), key);

	span.finish(OpOutcome::Success);

	token.to_string()
}

/// Verifies a dynamic session token (plain or user-signed) issued for `login_token`.
///
/// # Errors
///
/// Returns [`Error::KeyDecode`] for a malformed secret and
/// [`Error::MalformedSessionToken`] when `value` does not follow the wire format.
pub fn verify_dynamic_session_signature(
	login_token: &str,
	value: &str,
	secret: &str,
	now: OffsetDateTime,
) -> Result<SessionCheck> {
	let key = SecretKey::from_base64(secret)?;

	Ok(DynamicSessionToken::parse(value)?.verify(login_token, &key, now))
}

/// Result of checking a dynamic session token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionCheck {
	/// Signature matches and the token has not expired.
	Valid,
	/// Signature does not match the login token and secret.
	Mismatch,
	/// Token expired before the supplied clock reading.
	Expired,
}
impl SessionCheck {
	/// Returns true only for [`SessionCheck::Valid`].
	pub const fn is_valid(self) -> bool {
		matches!(self, SessionCheck::Valid)
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SessionCheck::Valid => "valid",
			SessionCheck::Mismatch => "mismatch",
			SessionCheck::Expired => "expired",
		}
	}
}
impl Display for SessionCheck {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Parsed dynamic session token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DynamicSessionToken {
	/// Unix timestamp (seconds) after which the token is no longer accepted.
	pub expiration: i64,
	/// User key for user-signed tokens.
	pub user_key: Option<String>,
	/// Base64 HMAC-SHA1 signature.
	pub signature: String,
}
impl DynamicSessionToken {
	/// Parses `<expiration>_[<user_key>_]<signature>`.
	///
	/// The expiration ends at the first `_` and the signature starts after the last one,
	/// so the user key may itself contain `_`. Base64 signatures never do.
	pub fn parse(value: &str) -> Result<Self> {
		let (expiration, rest) = value
			.split_once(SIGNABLE_SEPARATOR)
			.ok_or(Error::MalformedSessionToken { reason: "missing separator" })?;
		let digits = expiration.strip_prefix('-').unwrap_or(expiration);

		if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
			return Err(Error::MalformedSessionToken { reason: "expiration is not an integer" });
		}

		let expiration = expiration
			.parse::<i64>()
			.map_err(|_| Error::MalformedSessionToken { reason: "expiration is out of range" })?;
		let (user_key, signature) = match rest.rsplit_once(SIGNABLE_SEPARATOR) {
			Some((user_key, signature)) => (Some(user_key.to_owned()), signature),
			None => (None, rest),
		};

		if signature.is_empty() {
			return Err(Error::MalformedSessionToken { reason: "missing signature" });
		}

		Ok(Self { expiration, user_key, signature: signature.to_owned() })
	}

	/// Parses a token from raw cookie bytes.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		Self::parse(std::str::from_utf8(bytes)?)
	}

	/// Expiration as a UTC timestamp, if it fits the supported date range.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		OffsetDateTime::from_unix_timestamp(self.expiration).ok()
	}

	/// Checks expiry against `now`, then the signature against `login_token`.
	pub fn verify(&self, login_token: &str, key: &SecretKey, now: OffsetDateTime) -> SessionCheck {
		let span = OpSpan::enter(self.kind());
		let check = if now.unix_timestamp() > self.expiration {
			SessionCheck::Expired
		} else if signature::signatures_match(
			&signature::sign(&self.signable(login_token), key),
			&self.signature,
		) {
			SessionCheck::Valid
		} else {
			SessionCheck::Mismatch
		};

		span.finish_check(check.is_valid());

		check
	}

	fn issue(
		login_token: &str,
		expiration: i64,
		user_key: Option<&str>,
		key: &SecretKey,
	) -> Self {
		let mut token =
			Self { expiration, user_key: user_key.map(str::to_owned), signature: String::new() };

		token.signature = signature::sign(&token.signable(login_token), key);

		token
	}

	fn signable(&self, login_token: &str) -> String {
		let expiration = self.expiration.to_string();

		match &self.user_key {
			Some(user_key) =>
				signature::signable([login_token, expiration.as_str(), user_key.as_str()]),
			None => signature::signable([login_token, expiration.as_str()]),
		}
	}

	fn kind(&self) -> OpKind {
		if self.user_key.is_some() {
			OpKind::DynamicSessionUserSigned
		} else {
			OpKind::DynamicSession
		}
	}
}
impl Display for DynamicSessionToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match &self.user_key {
			Some(user_key) => write!(f, "{}_{user_key}_{}", self.expiration, self.signature),
			None => write!(f, "{}_{}", self.expiration, self.signature),
		}
	}
}
impl FromStr for DynamicSessionToken {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

/// `floor(now) + timeout`, in whole Unix seconds.
fn expiration_at(now: OffsetDateTime, timeout: Duration) -> i64 {
	now.unix_timestamp().saturating_add(timeout.whole_seconds())
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	// "Jefe" in base64.
	const SECRET: &str = "SmVmZQ==";

	#[test]
	fn expiration_floors_subsecond_clock() {
		let now = macros::datetime!(2024-01-01 00:00:00.999 UTC);

		assert_eq!(expiration_at(now, Duration::seconds(60)), 1_704_067_260);
	}

	#[test]
	fn plain_token_layout() {
		let now = macros::datetime!(2024-01-01 00:00 UTC);
		let value =
			get_dynamic_session_signature_at("tok123", Duration::seconds(3600), SECRET, now)
				.expect("Token should be issued.");
		let expected_sig = signature::calc_signature("tok123_1704070800", SECRET)
			.expect("Signing should succeed.");

		assert_eq!(value, format!("1704070800_{expected_sig}"));
	}

	#[test]
	fn user_signed_token_layout() {
		let now = macros::datetime!(2024-01-01 00:00 UTC);
		let value = get_dynamic_session_signature_user_signed_at(
			"tok123",
			Duration::seconds(60),
			"user_key",
			SECRET,
			now,
		)
		.expect("Token should be issued.");
		let expected_sig = signature::calc_signature("tok123_1704067260_user_key", SECRET)
			.expect("Signing should succeed.");

		assert_eq!(value, format!("1704067260_user_key_{expected_sig}"));

		let parsed = DynamicSessionToken::parse(&value).expect("Issued token should parse.");

		assert_eq!(parsed.user_key.as_deref(), Some("user_key"));
		assert_eq!(parsed.to_string(), value);
	}

	#[test]
	fn parse_rejects_malformed_tokens() {
		for value in
			["", "123", "abc_sig", "123_", "123_key_", "+123_sig", " 123_sig", "-_sig", "1e3_sig"]
		{
			assert!(
				matches!(
					DynamicSessionToken::parse(value),
					Err(Error::MalformedSessionToken { .. })
				),
				"{value:?} should be rejected."
			);
		}
	}

	#[test]
	fn parse_accepts_only_canonical_expirations() {
		let token = DynamicSessionToken::parse("-5_sig").expect("Negative expiration should parse.");

		assert_eq!(token.expiration, -5);
		assert!(matches!(
			DynamicSessionToken::parse("99999999999999999999_sig"),
			Err(Error::MalformedSessionToken { reason: "expiration is out of range" })
		));
	}

	#[test]
	fn from_bytes_requires_utf8() {
		let err = DynamicSessionToken::from_bytes(&[b'1', b'_', 0xff])
			.expect_err("Non-UTF-8 bytes must fail.");

		assert!(matches!(err, Error::Encoding { .. }));
	}

	#[test]
	fn verify_classifies_outcomes() {
		let key = SecretKey::from_base64(SECRET).expect("Fixture secret should decode.");
		let issued_at = macros::datetime!(2024-01-01 00:00 UTC);
		let value =
			dynamic_session_signature_with_key("tok", Duration::seconds(10), &key, issued_at);
		let token = DynamicSessionToken::parse(&value).expect("Issued token should parse.");

		assert_eq!(token.verify("tok", &key, issued_at), SessionCheck::Valid);
		assert_eq!(
			token.verify("tok", &key, issued_at + Duration::seconds(10)),
			SessionCheck::Valid,
			"Expiration second itself is still accepted."
		);
		assert_eq!(
			token.verify("tok", &key, issued_at + Duration::seconds(11)),
			SessionCheck::Expired
		);
		assert_eq!(token.verify("other", &key, issued_at), SessionCheck::Mismatch);
		assert_eq!(token.expires_at(), Some(issued_at + Duration::seconds(10)));
	}
}
