//! HMAC-SHA1 signatures over `_`-joined signable strings.
//!
//! The remote service signs responses as `BASE64(HMAC-SHA1(secret, text))`, where
//! `text` concatenates response fields in a protocol-fixed order. The helpers here
//! rebuild that text and compare signatures without leaking timing information.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;
// self
use crate::{
	_prelude::*,
	key::SecretKey,
	obs::{OpKind, OpSpan},
};

type HmacSha1 = Hmac<Sha1>;

/// Separator placed between fields of a signable string.
pub const SIGNABLE_SEPARATOR: char = '_';

/// Computes `BASE64(HMAC-SHA1(key, text))` with a base64-encoded secret.
///
/// # Errors
///
/// Returns [`Error::KeyDecode`] when `base64_key` is not standard base64.
pub fn calc_signature(text: &str, base64_key: &str) -> Result<String> {
	let span = OpSpan::enter(OpKind::Signature);

	span.finish_result(SecretKey::from_base64(base64_key).map(|key| sign(text, &key)))
}

/// Computes `BASE64(HMAC-SHA1(key, text))` with an already-decoded key.
pub fn calc_signature_with_key(text: &str, key: &SecretKey) -> String {
	sign(text, key)
}

/// Checks the `UIDSignature` returned for a user, signed over `<timestamp>_<uid>`.
///
/// # Errors
///
/// Returns [`Error::KeyDecode`] when `secret` is not standard base64. A wrong signature
/// yields `Ok(false)`.
pub fn validate_user_signature(
	uid: &str,
	timestamp: &str,
	secret: &str,
	signature: &str,
) -> Result<bool> {
	let key = SecretKey::from_base64(secret)?;

	Ok(validate_user_signature_with_key(uid, timestamp, &key, signature))
}

/// Same as [`validate_user_signature`] with an already-decoded key.
pub fn validate_user_signature_with_key(
	uid: &str,
	timestamp: &str,
	key: &SecretKey,
	signature: &str,
) -> bool {
	let span = OpSpan::enter(OpKind::UserSignature);

	span.finish_check(signatures_match(&sign(&signable([timestamp, uid]), key), signature))
}

/// Checks the `friendshipSignature` for a friend pair, signed over
/// `<timestamp>_<friend_uid>_<uid>`.
///
/// # Errors
///
/// Returns [`Error::KeyDecode`] when `secret` is not standard base64. A wrong signature
/// yields `Ok(false)`.
pub fn validate_friend_signature(
	uid: &str,
	timestamp: &str,
	friend_uid: &str,
	secret: &str,
	signature: &str,
) -> Result<bool> {
	let key = SecretKey::from_base64(secret)?;

	Ok(validate_friend_signature_with_key(uid, timestamp, friend_uid, &key, signature))
}

/// Same as [`validate_friend_signature`] with an already-decoded key.
pub fn validate_friend_signature_with_key(
	uid: &str,
	timestamp: &str,
	friend_uid: &str,
	key: &SecretKey,
	signature: &str,
) -> bool {
	let span = OpSpan::enter(OpKind::FriendSignature);
	let expected = sign(&signable([timestamp, friend_uid, uid]), key);

	span.finish_check(signatures_match(&expected, signature))
}

/// Compares two signature strings in constant time for equal lengths.
///
/// Lengths are compared first; signatures of a given algorithm have a public, fixed
/// length so the early return reveals nothing about the expected value.
pub fn signatures_match(expected: &str, provided: &str) -> bool {
	expected.len() == provided.len() && bool::from(expected.as_bytes().ct_eq(provided.as_bytes()))
}

/// Joins fields with [`SIGNABLE_SEPARATOR`] in the given order, without escaping.
pub(crate) fn signable<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
	let mut text = String::new();

	for (i, field) in fields.into_iter().enumerate() {
		if i > 0 {
			text.push(SIGNABLE_SEPARATOR);
		}

		text.push_str(field);
	}

	text
}

pub(crate) fn sign(text: &str, key: &SecretKey) -> String {
	let mut mac =
		HmacSha1::new_from_slice(key.expose()).expect("HMAC can take key of any size.");

	mac.update(text.as_bytes());

	STANDARD.encode(mac.finalize().into_bytes())
}
