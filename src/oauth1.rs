//! OAuth1 signature base strings (RFC 5849 §3.4.1).
//!
//! The base string is `METHOD&enc(normalized_url)&enc(normalized_params)`, where `enc` is
//! [`percent_encode`]. Normalization lower-cases the scheme and host, drops default
//! ports, sorts parameters by name then value, and skips parameters without a value.

// crates.io
use percent_encoding::percent_decode_str;
// self
use crate::{
	_prelude::*,
	encoding::percent_encode,
	key::SecretKey,
	obs::{OpKind, OpSpan},
	params::ParameterSource,
	signature,
};

/// Builds the canonical OAuth1 base string for a request.
///
/// `url` must be absolute and should not carry a query string; query parameters belong
/// in `params`. Parameters are sorted here, so the container may iterate in any order.
///
/// # Errors
///
/// Returns [`Error::UrlParse`] for URLs that are not absolute,
/// [`Error::UrlWithoutHost`] for URLs without a host, and [`Error::Encoding`] for paths whose
/// escapes do not decode to UTF-8.
pub fn calc_oauth1_basestring<P>(http_method: &str, url: &str, params: &P) -> Result<String>
where
	P: ?Sized + ParameterSource,
{
	let span = OpSpan::enter(OpKind::OAuth1Basestring);
	let outcome = normalize_url(url).map(|normalized_url| {
		let query = normalize_parameters(params);

		format!(
			"{}&{}&{}",
			http_method.to_uppercase(),
			percent_encode(&normalized_url),
			percent_encode(&query)
		)
	});

	span.finish_result(outcome)
}

/// Signs the OAuth1 base string for a request with a base64-encoded secret.
///
/// # Errors
///
/// Propagates [`calc_oauth1_basestring`] failures and returns [`Error::KeyDecode`] for a
/// malformed secret.
pub fn calc_oauth1_signature<P>(
	http_method: &str,
	url: &str,
	params: &P,
	secret: &str,
) -> Result<String>
where
	P: ?Sized + ParameterSource,
{
	let key = SecretKey::from_base64(secret)?;

	calc_oauth1_signature_with_key(http_method, url, params, &key)
}

/// Same as [`calc_oauth1_signature`] with an already-decoded key.
pub fn calc_oauth1_signature_with_key<P>(
	http_method: &str,
	url: &str,
	params: &P,
	key: &SecretKey,
) -> Result<String>
where
	P: ?Sized + ParameterSource,
{
	let base = calc_oauth1_basestring(http_method, url, params)?;

	Ok(signature::calc_signature_with_key(&base, key))
}

/// Normalizes `url` to `scheme://host[:port]/path`.
///
/// The port survives unless it is the `http`/`https` default (80/443); ports of every other
/// scheme are kept even when `url` would call them default. Query and fragment are dropped.
/// The path is percent-decoded so the base string encodes each character exactly once.
///
/// # Errors
///
/// Besides the URL errors of [`calc_oauth1_basestring`], returns [`Error::Encoding`] when the
/// decoded path is not UTF-8.
pub fn normalize_url(url: &str) -> Result<String> {
	let parsed = Url::parse(url)?;
	let host = parsed.host_str().ok_or_else(|| Error::UrlWithoutHost { url: url.to_owned() })?;
	let scheme = parsed.scheme().to_ascii_lowercase();
	let path = percent_decode_str(parsed.path()).decode_utf8()?;
	let mut normalized = String::with_capacity(url.len());

	normalized.push_str(&scheme);
	normalized.push_str("://");
	normalized.push_str(&host.to_ascii_lowercase());

	if let Some(port) = parsed.port_or_known_default()
		&& default_port(&scheme) != Some(port)
	{
		normalized.push(':');
		normalized.push_str(&port.to_string());
	}

	normalized.push_str(&path);

	Ok(normalized)
}

/// Default port omitted from normalized URLs; `None` for schemes that always keep theirs.
fn default_port(scheme: &str) -> Option<u16> {
	match scheme {
		"http" => Some(80),
		"https" => Some(443),
		_ => None,
	}
}

/// Joins `name=enc(value)` pairs with `&`, sorted by name then value.
///
/// Names are emitted verbatim. Pairs without a value are skipped; empty values are kept.
pub fn normalize_parameters<P>(params: &P) -> String
where
	P: ?Sized + ParameterSource,
{
	let mut pairs = params
		.parameter_pairs()
		.into_iter()
		.filter_map(|(name, value)| value.map(|value| (name, value)))
		.collect::<Vec<_>>();

	pairs.sort_unstable();

	pairs
		.into_iter()
		.map(|(name, value)| format!("{name}={}", percent_encode(value)))
		.collect::<Vec<_>>()
		.join("&")
}
