//! Optional observability helpers for signing operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit debug-level spans named `socialize_sig.op` with the `op` and
//!   `outcome` fields. Secrets, signatures, and signed text are never recorded.
//! - Enable `metrics` to increment the `socialize_sig_op_total` counter for every
//!   completed operation, labeled by `op` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
	/// Raw HMAC-SHA1 signature over caller-supplied text.
	Signature,
	/// User signature check (`<timestamp>_<uid>`).
	UserSignature,
	/// Friendship signature check (`<timestamp>_<friend_uid>_<uid>`).
	FriendSignature,
	/// OAuth1 base-string construction.
	OAuth1Basestring,
	/// Plain dynamic session token.
	DynamicSession,
	/// User-signed dynamic session token.
	DynamicSessionUserSigned,
}
impl OpKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpKind::Signature => "signature",
			OpKind::UserSignature => "user_signature",
			OpKind::FriendSignature => "friend_signature",
			OpKind::OAuth1Basestring => "oauth1_basestring",
			OpKind::DynamicSession => "dynamic_session",
			OpKind::DynamicSessionUserSigned => "dynamic_session_user_signed",
		}
	}
}
impl Display for OpKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpOutcome {
	/// Value produced.
	Success,
	/// Error propagated back to the caller.
	Failure,
	/// Verification accepted the signature.
	Valid,
	/// Verification rejected the signature or the token expired.
	Invalid,
}
impl OpOutcome {
	/// Maps a result onto [`OpOutcome::Success`] or [`OpOutcome::Failure`].
	pub fn of<T, E>(result: &Result<T, E>) -> Self {
		if result.is_ok() { OpOutcome::Success } else { OpOutcome::Failure }
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpOutcome::Success => "success",
			OpOutcome::Failure => "failure",
			OpOutcome::Valid => "valid",
			OpOutcome::Invalid => "invalid",
		}
	}
}
impl Display for OpOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn outcome_follows_result() {
		assert_eq!(OpOutcome::of(&Ok::<_, ()>(1)), OpOutcome::Success);
		assert_eq!(OpOutcome::of(&Err::<(), _>("bad")), OpOutcome::Failure);
		assert_eq!(OpKind::OAuth1Basestring.to_string(), "oauth1_basestring");
		assert_eq!(OpOutcome::Invalid.to_string(), "invalid");
	}
}
