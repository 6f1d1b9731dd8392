//! Request parameter containers consumed by base-string construction.
//!
//! The request object model lives in the calling SDK. This module only asks it for
//! `(name, optional value)` pairs through [`ParameterSource`] and ships
//! [`ParameterSet`] for callers that do not have a container of their own.

// self
use crate::_prelude::*;

/// Read-only view over request parameters.
///
/// Implementations may yield pairs in any order; base-string construction sorts them.
/// A `None` value marks a parameter that is present by name but has no value, which
/// is skipped when signing.
pub trait ParameterSource {
	/// Returns every parameter as a `(name, value)` pair.
	fn parameter_pairs(&self) -> Vec<(&str, Option<&str>)>;
}
impl<T> ParameterSource for &T
where
	T: ?Sized + ParameterSource,
{
	fn parameter_pairs(&self) -> Vec<(&str, Option<&str>)> {
		(**self).parameter_pairs()
	}
}
impl ParameterSource for BTreeMap<String, String> {
	fn parameter_pairs(&self) -> Vec<(&str, Option<&str>)> {
		self.iter().map(|(k, v)| (k.as_str(), Some(v.as_str()))).collect()
	}
}
impl ParameterSource for BTreeMap<String, Option<String>> {
	fn parameter_pairs(&self) -> Vec<(&str, Option<&str>)> {
		self.iter().map(|(k, v)| (k.as_str(), v.as_deref())).collect()
	}
}
impl ParameterSource for HashMap<String, String> {
	fn parameter_pairs(&self) -> Vec<(&str, Option<&str>)> {
		self.iter().map(|(k, v)| (k.as_str(), Some(v.as_str()))).collect()
	}
}
impl ParameterSource for HashMap<String, Option<String>> {
	fn parameter_pairs(&self) -> Vec<(&str, Option<&str>)> {
		self.iter().map(|(k, v)| (k.as_str(), v.as_deref())).collect()
	}
}
impl<K, V> ParameterSource for [(K, V)]
where
	K: AsRef<str>,
	V: AsRef<str>,
{
	fn parameter_pairs(&self) -> Vec<(&str, Option<&str>)> {
		self.iter().map(|(k, v)| (k.as_ref(), Some(v.as_ref()))).collect()
	}
}
impl<K, V, const N: usize> ParameterSource for [(K, V); N]
where
	K: AsRef<str>,
	V: AsRef<str>,
{
	fn parameter_pairs(&self) -> Vec<(&str, Option<&str>)> {
		self.as_slice().parameter_pairs()
	}
}

/// Ordered parameter container keyed by name.
///
/// Values are optional so a caller can carry a parameter that was explicitly cleared;
/// such entries are left out of the base string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet(BTreeMap<String, Option<String>>);
impl ParameterSet {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or replaces a parameter value.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.0.insert(name.into(), Some(value.into()));

		self
	}

	/// Records a parameter name without a value.
	pub fn insert_absent(&mut self, name: impl Into<String>) -> &mut Self {
		self.0.insert(name.into(), None);

		self
	}

	/// Builder-style variant of [`insert`](Self::insert).
	pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.insert(name, value);

		self
	}

	/// Removes a parameter, returning its previous value.
	pub fn remove(&mut self, name: &str) -> Option<Option<String>> {
		self.0.remove(name)
	}

	/// Returns the value stored for `name`, if any.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.0.get(name).and_then(|v| v.as_deref())
	}

	/// Returns true if `name` is present, with or without a value.
	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	/// Number of parameters, including ones without a value.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if the set holds no parameters.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates names in ascending order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}
}
impl ParameterSource for ParameterSet {
	fn parameter_pairs(&self) -> Vec<(&str, Option<&str>)> {
		self.0.parameter_pairs()
	}
}
impl<K, V> FromIterator<(K, V)> for ParameterSet
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		Self(iter.into_iter().map(|(k, v)| (k.into(), Some(v.into()))).collect())
	}
}
