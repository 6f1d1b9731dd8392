// self
use crate::obs::{OpKind, OpOutcome};

/// Metric name incremented once per finished operation.
pub const OP_TOTAL_METRIC: &str = "socialize_sig_op_total";

/// Increments [`OP_TOTAL_METRIC`] labeled by `op` and `outcome` (when `metrics` is enabled).
pub fn record_op_outcome(kind: OpKind, outcome: OpOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(OP_TOTAL_METRIC, "op" => kind.as_str(), "outcome" => outcome.as_str())
		.increment(1);

	#[cfg(not(feature = "metrics"))]
	let _ = (kind, outcome);
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashSet;
	// self
	use super::*;

	const KINDS: [OpKind; 6] = [
		OpKind::Signature,
		OpKind::UserSignature,
		OpKind::FriendSignature,
		OpKind::OAuth1Basestring,
		OpKind::DynamicSession,
		OpKind::DynamicSessionUserSigned,
	];
	const OUTCOMES: [OpOutcome; 4] =
		[OpOutcome::Success, OpOutcome::Failure, OpOutcome::Valid, OpOutcome::Invalid];

	#[test]
	fn label_pairs_are_distinct_snake_case() {
		let mut seen = HashSet::new();

		for kind in KINDS {
			for outcome in OUTCOMES {
				assert!(seen.insert((kind.as_str(), outcome.as_str())));

				record_op_outcome(kind, outcome);
			}
		}

		assert_eq!(seen.len(), KINDS.len() * OUTCOMES.len());
		assert!(seen.iter().all(|(op, outcome)| {
			op.bytes()
				.chain(outcome.bytes())
				.all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
		}));
		assert!(OP_TOTAL_METRIC.starts_with("socialize_sig_"));
	}
}
