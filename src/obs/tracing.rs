// self
use crate::{
	_prelude::*,
	obs::{OpKind, OpOutcome, record_op_outcome},
};

/// Scope guard around one signing operation.
///
/// With the `tracing` feature the guard holds an entered `socialize_sig.op` span whose
/// `outcome` field is filled in by [`finish`](Self::finish). Dropping the guard without
/// finishing leaves the field empty and records no metric.
pub struct OpSpan {
	kind: OpKind,
	#[cfg(feature = "tracing")]
	span: tracing::span::EnteredSpan,
}
impl OpSpan {
	/// Opens and enters a span for `kind`.
	pub fn enter(kind: OpKind) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::debug_span!(
				"socialize_sig.op",
				op = kind.as_str(),
				outcome = tracing::field::Empty
			)
			.entered();

			Self { kind, span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			Self { kind }
		}
	}

	/// Operation this span covers.
	pub fn kind(&self) -> OpKind {
		self.kind
	}

	/// Records `outcome` on the span and the `socialize_sig_op_total` counter, then exits.
	pub fn finish(self, outcome: OpOutcome) -> OpOutcome {
		#[cfg(feature = "tracing")]
		self.span.record("outcome", outcome.as_str());

		record_op_outcome(self.kind, outcome);

		outcome
	}

	/// Finishes with [`OpOutcome::of`] and hands `result` back.
	pub fn finish_result<T, E>(self, result: Result<T, E>) -> Result<T, E> {
		self.finish(OpOutcome::of(&result));

		result
	}

	/// Finishes with [`OpOutcome::Valid`] or [`OpOutcome::Invalid`] and hands `valid` back.
	pub fn finish_check(self, valid: bool) -> bool {
		self.finish(if valid { OpOutcome::Valid } else { OpOutcome::Invalid });

		valid
	}
}
impl Debug for OpSpan {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "OpSpan({})", self.kind)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn finish_result_passes_errors_through() {
		let span = OpSpan::enter(OpKind::OAuth1Basestring);

		assert_eq!(format!("{span:?}"), "OpSpan(oauth1_basestring)");

		let result = span.finish_result(Err::<String, _>(Error::UrlWithoutHost {
			url: "mailto:someone@example.com".into(),
		}));

		assert!(matches!(result, Err(Error::UrlWithoutHost { .. })));
	}

	#[test]
	fn finish_check_maps_verdicts() {
		assert!(OpSpan::enter(OpKind::UserSignature).finish_check(true));
		assert!(!OpSpan::enter(OpKind::FriendSignature).finish_check(false));
	}

	#[test]
	fn nested_spans_keep_their_own_kind() {
		let outer = OpSpan::enter(OpKind::DynamicSessionUserSigned);
		let inner = OpSpan::enter(OpKind::Signature);

		assert_eq!(inner.kind(), OpKind::Signature);
		assert_eq!(inner.finish(OpOutcome::Success), OpOutcome::Success);
		assert_eq!(outer.kind(), OpKind::DynamicSessionUserSigned);
		assert_eq!(outer.finish(OpOutcome::Invalid), OpOutcome::Invalid);
	}
}
