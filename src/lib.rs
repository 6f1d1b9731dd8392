//! Signature helpers for social-login SDKs: HMAC-SHA1 user and friendship signature
//! checks, dynamic session tokens, and canonical OAuth1 base strings.
//!
//! Every operation is a pure, synchronous transformation (session issuance also reads the
//! wall clock once), so all of them are safe to call from any thread.
//!
//! ```
//! use socialize_sig::{oauth1, params::ParameterSet, signature};
//!
//! let params = ParameterSet::new().with("b", "2").with("a", "1");
//! let base = oauth1::calc_oauth1_basestring("get", "http://EXAMPLE.com:80/path", &params)?;
//!
//! assert_eq!(base, "GET&http%3A%2F%2Fexample.com%2Fpath&a%3D1%26b%3D2");
//!
//! let sig = signature::calc_signature(&base, "SmVmZQ==")?;
//!
//! assert_eq!(sig.len(), 28);
//! # Ok::<(), socialize_sig::error::Error>(())
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod encoding;
pub mod error;
pub mod key;
pub mod oauth1;
pub mod obs;
pub mod params;
pub mod session;
pub mod signature;
pub mod signer;

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		str::FromStr,
	};

	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use url;
