//! Ordered allow-list of browsers trusted to host isolated sessions.

// std
use std::slice::Iter;
// crates.io
use serde::{Deserializer, Serializer, de::Error as DeError, ser::SerializeSeq};
// self
use crate::{
	_prelude::*,
	auth::{IdentifierError, PackageId},
};

/// Browsers trusted for isolated sessions when nothing else is configured.
pub const DEFAULT_ALLOWED_BROWSERS: [&str; 9] = [
	// Chrome stable, system, and beta.
	"com.android.chrome",
	"com.google.android.apps.chrome",
	"com.android.chrome.beta",
	// Edge.
	"com.microsoft.emmx",
	// Brave stable and beta.
	"com.brave.browser",
	"com.brave.browser_beta",
	// Opera stable and beta.
	"com.opera.browser",
	"com.opera.browser.beta",
	// Vivaldi.
	"com.vivaldi.browser",
];

/// Ordered, deduplicated list of trusted browser packages.
///
/// Unlike a plain set, order is significant: the first capable entry wins the
/// allow-listed scan. Duplicates keep their first position.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AllowList(Arc<[PackageId]>);
impl AllowList {
	/// Builds an allow-list from any iterator of package identifiers.
	pub fn new<I, S>(packages: I) -> Result<Self, IdentifierError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut ordered = Vec::new();

		for value in packages {
			let package = PackageId::new(value)?;

			if !ordered.contains(&package) {
				ordered.push(package);
			}
		}

		Ok(Self(Arc::from(ordered)))
	}

	/// An allow-list that trusts nothing.
	pub fn empty() -> Self {
		Self(Arc::from(Vec::new()))
	}

	/// Number of trusted browsers.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no browser is trusted.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns true if `package` is trusted.
	pub fn contains(&self, package: &str) -> bool {
		self.0.iter().any(|candidate| candidate.as_ref() == package)
	}

	/// Iterator over trusted packages in priority order.
	pub fn iter(&self) -> Iter<'_, PackageId> {
		self.0.iter()
	}

	/// Returns the underlying ordered slice.
	pub fn as_slice(&self) -> &[PackageId] {
		&self.0
	}
}
impl Default for AllowList {
	fn default() -> Self {
		let packages = DEFAULT_ALLOWED_BROWSERS
			.iter()
			.map(PackageId::new)
			.collect::<Result<Vec<_>, _>>()
			.unwrap_or_default();

		Self(Arc::from(packages))
	}
}
impl Debug for AllowList {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_list().entries(self.0.iter().map(|package| package.as_ref())).finish()
	}
}
impl<'a> IntoIterator for &'a AllowList {
	type IntoIter = Iter<'a, PackageId>;
	type Item = &'a PackageId;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}
impl Serialize for AllowList {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut seq = serializer.serialize_seq(Some(self.0.len()))?;

		for package in self.0.iter() {
			seq.serialize_element(package.as_ref())?;
		}

		seq.end()
	}
}
impl<'de> Deserialize<'de> for AllowList {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let values = <Vec<String>>::deserialize(deserializer)?;

		AllowList::new(values).map_err(DeError::custom)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn default_list_keeps_declared_order() {
		let list = AllowList::default();

		assert_eq!(list.len(), DEFAULT_ALLOWED_BROWSERS.len());
		assert_eq!(
			list.iter().map(|package| package.as_ref()).collect::<Vec<_>>(),
			DEFAULT_ALLOWED_BROWSERS.to_vec()
		);
	}

	#[test]
	fn duplicates_keep_first_position() {
		let list = AllowList::new(["b.browser", "a.browser", "b.browser"])
			.expect("Allow-list fixture should be valid.");

		assert_eq!(list.iter().map(|package| package.as_ref()).collect::<Vec<_>>(), vec![
			"b.browser",
			"a.browser"
		]);
		assert!(list.contains("a.browser"));
		assert!(!list.contains("c.browser"));
	}

	#[test]
	fn invalid_entries_are_rejected() {
		assert!(AllowList::new(["com.android.chrome", "with space"]).is_err());
		assert!(serde_json::from_str::<AllowList>("[\"\"]").is_err());
		assert!(AllowList::empty().is_empty());
	}
}
