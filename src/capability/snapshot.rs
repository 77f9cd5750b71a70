//! In-memory [`CapabilityQuery`] snapshot for tests, demos, and hosts that pre-compute
//! their package inventory.

// self
use crate::{
	_prelude::*,
	auth::PackageId,
	capability::{CapabilityQuery, HandlerQuery, PackageSet, QueryError},
};

const WEB_SCHEMES: [&str; 2] = ["http", "https"];

/// Canned package inventory answering capability queries without a real platform.
///
/// Browsers answer every URL of the schemes they are registered for; native apps answer
/// URLs that start with their registered prefix.
#[derive(Clone, Debug, Default)]
pub struct StaticCapabilities {
	browsers: HashMap<String, PackageSet>,
	native_apps: Vec<(String, PackageId)>,
	default_browser: Option<PackageId>,
	isolated_sessions: PackageSet,
	direct_exclusion: bool,
	failure: Option<String>,
}
impl StaticCapabilities {
	/// Registers a general-purpose browser for `http` and `https`.
	pub fn with_browser(mut self, package: PackageId) -> Self {
		for scheme in WEB_SCHEMES {
			self.browsers.entry(scheme.into()).or_default().insert(package.clone());
		}

		self
	}

	/// Registers a general-purpose handler for a single scheme.
	pub fn with_scheme_handler(mut self, scheme: impl Into<String>, package: PackageId) -> Self {
		self.browsers.entry(scheme.into()).or_default().insert(package);

		self
	}

	/// Registers a native app claiming every URL that starts with `prefix`.
	pub fn with_native_app(mut self, prefix: impl Into<String>, package: PackageId) -> Self {
		self.native_apps.push((prefix.into(), package));

		self
	}

	/// Sets the platform default browser.
	pub fn with_default_browser(mut self, package: PackageId) -> Self {
		self.default_browser = Some(package);

		self
	}

	/// Marks a package as exposing the isolated-session service.
	pub fn with_isolated_session(mut self, package: PackageId) -> Self {
		self.isolated_sessions.insert(package);

		self
	}

	/// Answers [`CapabilityQuery::resolve_non_browser_handler`] instead of reporting it
	/// unsupported.
	pub fn with_direct_exclusion(mut self) -> Self {
		self.direct_exclusion = true;

		self
	}

	/// Makes every query fail with [`QueryError::Platform`].
	pub fn failing(mut self, message: impl Into<String>) -> Self {
		self.failure = Some(message.into());

		self
	}

	fn check(&self) -> Result<(), QueryError> {
		match &self.failure {
			Some(message) => Err(QueryError::Platform { message: message.clone() }),
			None => Ok(()),
		}
	}

	fn generic_handlers(&self, scheme: &str) -> PackageSet {
		self.browsers.get(scheme).cloned().unwrap_or_default()
	}

	fn native_handlers(&self, url: &Url) -> impl Iterator<Item = &PackageId> {
		self.native_apps
			.iter()
			.filter(move |(prefix, _)| url.as_str().starts_with(prefix.as_str()))
			.map(|(_, package)| package)
	}
}
impl CapabilityQuery for StaticCapabilities {
	fn resolve_view_handlers(&self, query: HandlerQuery<'_>) -> Result<PackageSet, QueryError> {
		self.check()?;

		Ok(match query {
			HandlerQuery::Generic { scheme } => self.generic_handlers(scheme),
			HandlerQuery::Specific(url) => {
				let mut handlers = self.generic_handlers(url.scheme());

				handlers.extend(self.native_handlers(url).cloned());

				handlers
			},
		})
	}

	fn resolve_non_browser_handler(&self, url: &Url) -> Result<Option<PackageId>, QueryError> {
		self.check()?;

		if !self.direct_exclusion {
			return Err(QueryError::Unsupported { capability: "direct_exclusion" });
		}

		let browsers = self.generic_handlers(url.scheme());

		Ok(self.native_handlers(url).find(|package| !browsers.contains(*package)).cloned())
	}

	fn resolve_default_browser(&self) -> Result<Option<PackageId>, QueryError> {
		self.check()?;

		Ok(self.default_browser.clone())
	}

	fn supports_isolated_session(&self, package: &PackageId) -> Result<bool, QueryError> {
		self.check()?;

		Ok(self.isolated_sessions.contains(package))
	}

	fn isolated_session_providers(&self) -> Result<PackageSet, QueryError> {
		self.check()?;

		Ok(self.isolated_sessions.clone())
	}
}
