//! Browser selection: decides how an authentication URL should be opened.
//!
//! The decision walks five tiers and stops at the first match:
//!
//! 1. a native app that claims the exact URL,
//! 2. the default browser, when allow-listed and isolated-session capable,
//! 3. the first allow-listed browser that is isolated-session capable,
//! 4. an isolated session with no package named,
//! 5. the external browser.
//!
//! Capability query failures count as "capability absent", so selection always produces a
//! target.

pub mod allow_list;
pub mod config;

pub use allow_list::*;
pub use config::*;

// self
use crate::{
	_prelude::*,
	auth::PackageId,
	capability::{CapabilityQuery, HandlerQuery, QueryError},
	obs::{self, RedirectStage},
};

/// How the selector decides whether a native app handles a URL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeProbeMode {
	/// Ask the platform once, excluding general-purpose browsers from resolution.
	DirectExclusion,
	/// Subtract generic-URL handlers from specific-URL handlers.
	#[default]
	SetDifference,
}
impl NativeProbeMode {
	/// Picks the probe mode once at startup from the platform's capability.
	pub const fn from_direct_exclusion_support(supported: bool) -> Self {
		if supported { Self::DirectExclusion } else { Self::SetDifference }
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::DirectExclusion => "direct_exclusion",
			Self::SetDifference => "set_difference",
		}
	}
}

/// Launch decision produced by [`BrowserSelector::select`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LaunchTarget {
	/// Deep-link into a native app that claims the URL.
	NativeApp(PackageId),
	/// Open an isolated session hosted by the named browser.
	IsolatedSession(PackageId),
	/// Open an isolated session and let the platform choose the browser.
	IsolatedSessionUnspecified,
	/// Hand the URL to the platform's external browser.
	ExternalBrowser,
}
impl LaunchTarget {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn kind(&self) -> &'static str {
		match self {
			Self::NativeApp(_) => "native_app",
			Self::IsolatedSession(_) => "isolated_session",
			Self::IsolatedSessionUnspecified => "isolated_session_unspecified",
			Self::ExternalBrowser => "external_browser",
		}
	}

	/// Package named by the target, if any.
	pub fn package(&self) -> Option<&PackageId> {
		match self {
			Self::NativeApp(package) | Self::IsolatedSession(package) => Some(package),
			Self::IsolatedSessionUnspecified | Self::ExternalBrowser => None,
		}
	}
}
impl Display for LaunchTarget {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self.package() {
			Some(package) => write!(f, "{}({package})", self.kind()),
			None => f.write_str(self.kind()),
		}
	}
}

/// Stateless decision procedure over a capability snapshot.
///
/// The selector only holds its immutable configuration, so the same inputs always
/// produce the same decision (ties among native apps aside).
#[derive(Clone, Debug, Default)]
pub struct BrowserSelector {
	config: SelectorConfig,
}
impl BrowserSelector {
	/// Creates a selector from static configuration.
	pub fn new(config: SelectorConfig) -> Self {
		Self { config }
	}

	/// Configuration the selector was built with.
	pub fn config(&self) -> &SelectorConfig {
		&self.config
	}

	/// Trusted browsers in priority order.
	pub fn allow_list(&self) -> &AllowList {
		&self.config.allow_list
	}

	/// Decides how `url` should be opened.
	pub fn select(&self, url: &Url, query: &dyn CapabilityQuery) -> LaunchTarget {
		let _guard = obs::RedirectSpan::new(RedirectStage::Select, None).entered();
		let target = match self.find_native_app(url, query) {
			Some(package) => LaunchTarget::NativeApp(package),
			None => self.choose_browser(query),
		};

		obs::record_selection(&target);

		target
	}

	/// Decides how `url` should be opened once native apps are ruled out.
	///
	/// Used after a native-app launch fails.
	pub fn select_browser(&self, query: &dyn CapabilityQuery) -> LaunchTarget {
		let _guard = obs::RedirectSpan::new(RedirectStage::Select, None).entered();
		let target = self.choose_browser(query);

		obs::record_selection(&target);

		target
	}

	/// Runs the configured native-app probe.
	pub fn find_native_app(&self, url: &Url, query: &dyn CapabilityQuery) -> Option<PackageId> {
		match self.config.native_probe {
			NativeProbeMode::DirectExclusion => probe_direct_exclusion(url, query),
			NativeProbeMode::SetDifference => probe_set_difference(url, query),
		}
	}

	fn choose_browser(&self, query: &dyn CapabilityQuery) -> LaunchTarget {
		if let Some(package) = self.eligible_default_browser(query) {
			return LaunchTarget::IsolatedSession(package);
		}
		if !self.config.prefer_isolated_sessions {
			return LaunchTarget::ExternalBrowser;
		}
		if let Some(package) = self.first_allowed_isolated_browser(query) {
			return LaunchTarget::IsolatedSession(package);
		}

		let any_provider = query
			.isolated_session_providers()
			.map(|providers| !providers.is_empty())
			.unwrap_or_else(|e| absent("isolated_session_providers", e));

		if any_provider {
			LaunchTarget::IsolatedSessionUnspecified
		} else {
			LaunchTarget::ExternalBrowser
		}
	}

	fn eligible_default_browser(&self, query: &dyn CapabilityQuery) -> Option<PackageId> {
		let default = query
			.resolve_default_browser()
			.unwrap_or_else(|e| absent("resolve_default_browser", e))?;

		if self.config.allow_list.contains(&default) && supports_isolated_session(query, &default)
		{
			Some(default)
		} else {
			None
		}
	}

	fn first_allowed_isolated_browser(&self, query: &dyn CapabilityQuery) -> Option<PackageId> {
		self.config
			.allow_list
			.iter()
			.find(|package| supports_isolated_session(query, package))
			.cloned()
	}
}

fn probe_direct_exclusion(url: &Url, query: &dyn CapabilityQuery) -> Option<PackageId> {
	query
		.resolve_non_browser_handler(url)
		.unwrap_or_else(|e| absent("resolve_non_browser_handler", e))
}

fn probe_set_difference(url: &Url, query: &dyn CapabilityQuery) -> Option<PackageId> {
	let generic = query
		.resolve_view_handlers(HandlerQuery::Generic { scheme: url.scheme() })
		.unwrap_or_else(|e| absent("resolve_view_handlers(generic)", e));
	let specific = query
		.resolve_view_handlers(HandlerQuery::Specific(url))
		.unwrap_or_else(|e| absent("resolve_view_handlers(specific)", e));

	// Any member will do; the platform's set has no meaningful order.
	specific.into_iter().find(|package| !generic.contains(package))
}

fn supports_isolated_session(query: &dyn CapabilityQuery, package: &PackageId) -> bool {
	query
		.supports_isolated_session(package)
		.unwrap_or_else(|e| absent("supports_isolated_session", e))
}

fn absent<T>(query: &'static str, error: QueryError) -> T
where
	T: Default,
{
	obs::query_failed(query, &error);

	T::default()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::capability::StaticCapabilities;

	fn package(value: &str) -> PackageId {
		PackageId::new(value).expect("Package fixture should be valid.")
	}

	fn login_url() -> Url {
		Url::parse("https://accounts.example.com/authorize?client_id=demo")
			.expect("Login URL fixture should parse successfully.")
	}

	fn selector(allow: &[&str]) -> BrowserSelector {
		let config = SelectorConfig::builder()
			.allow_packages(allow.iter().copied())
			.expect("Allow-list fixture should be valid.")
			.build();

		BrowserSelector::new(config)
	}

	#[test]
	fn default_browser_wins_over_allow_list_order() {
		let caps = StaticCapabilities::default()
			.with_browser(package("b1.browser"))
			.with_browser(package("b2.browser"))
			.with_default_browser(package("b2.browser"))
			.with_isolated_session(package("b1.browser"))
			.with_isolated_session(package("b2.browser"));

		assert_eq!(
			selector(&["b1.browser", "b2.browser"]).select(&login_url(), &caps),
			LaunchTarget::IsolatedSession(package("b2.browser"))
		);
	}

	#[test]
	fn unlisted_default_browser_is_skipped() {
		let caps = StaticCapabilities::default()
			.with_default_browser(package("rogue.browser"))
			.with_isolated_session(package("rogue.browser"))
			.with_isolated_session(package("b2.browser"));

		assert_eq!(
			selector(&["b1.browser", "b2.browser"]).select(&login_url(), &caps),
			LaunchTarget::IsolatedSession(package("b2.browser"))
		);
	}

	#[test]
	fn preference_flag_only_gates_non_default_tiers() {
		let no_pref = BrowserSelector::new(
			SelectorConfig::builder()
				.allow_packages(["b1.browser"])
				.expect("Allow-list fixture should be valid.")
				.prefer_isolated_sessions(false)
				.build(),
		);
		let capable = StaticCapabilities::default().with_isolated_session(package("b1.browser"));

		assert_eq!(no_pref.select(&login_url(), &capable), LaunchTarget::ExternalBrowser);

		let default_capable = capable.with_default_browser(package("b1.browser"));

		assert_eq!(
			no_pref.select(&login_url(), &default_capable),
			LaunchTarget::IsolatedSession(package("b1.browser"))
		);
	}

	#[test]
	fn native_probe_modes_map_from_platform_support() {
		use NativeProbeMode::*;

		assert_eq!(NativeProbeMode::from_direct_exclusion_support(true), DirectExclusion);
		assert_eq!(NativeProbeMode::from_direct_exclusion_support(false), SetDifference);
	}

	#[test]
	fn targets_render_kind_and_package() {
		assert_eq!(
			LaunchTarget::IsolatedSession(package("com.android.chrome")).to_string(),
			"isolated_session(com.android.chrome)"
		);
		assert_eq!(LaunchTarget::ExternalBrowser.to_string(), "external_browser");
		assert_eq!(LaunchTarget::IsolatedSessionUnspecified.package(), None);
	}
}
