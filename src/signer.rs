//! Signer facade holding a decoded partner secret.
//!
//! The free functions in [`signature`](crate::signature), [`oauth1`](crate::oauth1), and
//! [`session`](crate::session) decode the base64 secret on every call. [`Signer`] decodes
//! it once and exposes the same operations as methods. It holds no mutable state, so a
//! single instance can be shared across threads.

// self
use crate::{
	_prelude::*,
	key::SecretKey,
	oauth1,
	params::ParameterSource,
	session::{self, DynamicSessionToken, SessionCheck},
	signature,
};

/// Session token settings applied by [`Signer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionPolicy {
	/// Lifetime, in seconds, of tokens issued without an explicit timeout.
	pub default_timeout_secs: i64,
}
impl SessionPolicy {
	/// Default token lifetime used when none is configured.
	pub const DEFAULT_TIMEOUT_SECS: i64 = 3_600;

	/// Default timeout as a [`Duration`].
	pub fn default_timeout(&self) -> Duration {
		Duration::seconds(self.default_timeout_secs)
	}
}
impl Default for SessionPolicy {
	fn default() -> Self {
		Self { default_timeout_secs: Self::DEFAULT_TIMEOUT_SECS }
	}
}

/// Deserializable signer configuration.
///
/// ```
/// let config: socialize_sig::signer::SignerConfig = serde_json::from_str(
/// 	r#"{ "secret": "SmVmZQ==", "session": { "default_timeout_secs": 600 } }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.session.default_timeout_secs, 600);
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct SignerConfig {
	/// Partner secret, base64-encoded.
	pub secret: SecretKey,
	/// Session token settings.
	#[serde(default)]
	pub session: SessionPolicy,
}

/// Signs and verifies with one partner secret.
#[derive(Clone, Debug)]
pub struct Signer {
	key: SecretKey,
	policy: SessionPolicy,
}
impl Signer {
	/// Creates a signer from a base64-encoded secret with the default [`SessionPolicy`].
	///
	/// # Errors
	///
	/// Returns [`Error::KeyDecode`] when `secret` is not standard base64.
	pub fn new(secret: &str) -> Result<Self> {
		Ok(Self::with_key(SecretKey::from_base64(secret)?))
	}

	/// Creates a signer from an already-decoded key.
	pub fn with_key(key: SecretKey) -> Self {
		Self { key, policy: SessionPolicy::default() }
	}

	/// Creates a signer from configuration.
	pub fn from_config(config: SignerConfig) -> Self {
		Self { key: config.secret, policy: config.session }
	}

	/// Overrides the session policy.
	pub fn with_policy(mut self, policy: SessionPolicy) -> Self {
		self.policy = policy;

		self
	}

	/// Session policy in effect.
	pub fn policy(&self) -> &SessionPolicy {
		&self.policy
	}

	/// `BASE64(HMAC-SHA1(secret, text))`.
	pub fn sign(&self, text: &str) -> String {
		signature::calc_signature_with_key(text, &self.key)
	}

	/// See [`signature::validate_user_signature`].
	pub fn validate_user_signature(&self, uid: &str, timestamp: &str, signature: &str) -> bool {
		signature::validate_user_signature_with_key(uid, timestamp, &self.key, signature)
	}

	/// See [`signature::validate_friend_signature`].
	pub fn validate_friend_signature(
		&self,
		uid: &str,
		timestamp: &str,
		friend_uid: &str,
		signature: &str,
	) -> bool {
		signature::validate_friend_signature_with_key(
			uid, timestamp, friend_uid, &self.key, signature,
		)
	}

	/// See [`oauth1::calc_oauth1_signature`].
	pub fn oauth1_signature<P>(&self, http_method: &str, url: &str, params: &P) -> Result<String>
	where
		P: ?Sized + ParameterSource,
	{
		oauth1::calc_oauth1_signature_with_key(http_method, url, params, &self.key)
	}

	/// Issues a plain dynamic session token valid for `timeout`.
	pub fn dynamic_session_signature(&self, login_token: &str, timeout: Duration) -> String {
		self.dynamic_session_signature_at(login_token, timeout, OffsetDateTime::now_utc())
	}

	/// Issues a plain dynamic session token using the policy's default timeout.
	pub fn dynamic_session_signature_default(&self, login_token: &str) -> String {
		self.dynamic_session_signature(login_token, self.policy.default_timeout())
	}

	/// Same as [`dynamic_session_signature`](Self::dynamic_session_signature) with an explicit
	/// clock reading.
	pub fn dynamic_session_signature_at(
		&self,
		login_token: &str,
		timeout: Duration,
		now: OffsetDateTime,
	) -> String {
		session::dynamic_session_signature_with_key(login_token, timeout, &self.key, now)
	}

	/// Issues a user-signed dynamic session token valid for `timeout`.
	pub fn dynamic_session_signature_user_signed(
		&self,
		login_token: &str,
		timeout: Duration,
		user_key: &str,
	) -> String {
		session::dynamic_session_signature_user_signed_with_key(
			login_token,
			timeout,
			user_key,
			&self.key,
			OffsetDateTime::now_utc(),
		)
	}

	/// Verifies a dynamic session token against `login_token` at `now`.
	///
	/// # Errors
	///
	/// Returns [`Error::MalformedSessionToken`] when `value` does not follow the wire format.
	pub fn verify_dynamic_session(
		&self,
		login_token: &str,
		value: &str,
		now: OffsetDateTime,
	) -> Result<SessionCheck> {
		Ok(DynamicSessionToken::parse(value)?.verify(login_token, &self.key, now))
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn config_defaults_session_policy() {
		let config: SignerConfig = serde_json::from_str(r#"{ "secret": "SmVmZQ==" }"#)
			.expect("Config without a session block should deserialize.");

		assert_eq!(config.session, SessionPolicy::default());
		assert_eq!(config.secret.expose(), b"Jefe");
	}

	#[test]
	fn from_config_applies_policy() {
		let config: SignerConfig = serde_json::from_str(
			r#"{ "secret": "SmVmZQ==", "session": { "default_timeout_secs": 90 } }"#,
		)
		.expect("Config with a session block should deserialize.");
		let signer = Signer::from_config(config);

		assert_eq!(signer.policy().default_timeout(), Duration::seconds(90));
		assert!(format!("{signer:?}").contains("<redacted>"));
	}

	#[test]
	fn config_rejects_malformed_secret() {
		let err = serde_json::from_str::<SignerConfig>(r#"{ "secret": "not-base64!!" }"#)
			.expect_err("Malformed secret must fail deserialization.");

		assert!(err.to_string().contains("base64"));
	}

	#[test]
	fn signer_matches_free_functions() {
		let signer = Signer::new("SmVmZQ==").expect("Fixture secret should decode.");
		let sig = signature::calc_signature("1_uid", "SmVmZQ==").expect("Signing should succeed.");

		assert_eq!(signer.sign("1_uid"), sig);
		assert!(signer.validate_user_signature("uid", "1", &sig));
		assert!(!signer.validate_friend_signature("uid", "1", "friend", &sig));
	}

	#[test]
	fn default_timeout_follows_policy() {
		let signer = Signer::new("SmVmZQ==")
			.expect("Fixture secret should decode.")
			.with_policy(SessionPolicy { default_timeout_secs: 30 });
		let now = macros::datetime!(2024-01-01 00:00 UTC);
		let value =
			signer.dynamic_session_signature_at("tok", signer.policy().default_timeout(), now);

		assert!(value.starts_with("1704067230_"));
		assert_eq!(
			signer.verify_dynamic_session("tok", &value, now).expect("Token should parse."),
			SessionCheck::Valid
		);
	}
}
