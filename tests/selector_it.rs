#![cfg(feature = "test")]

// self
use auth_redirect_broker::{
	_preludet::*,
	auth::PackageId,
	capability::{CapabilityQuery, HandlerQuery, PackageSet, QueryError, StaticCapabilities},
	selector::{BrowserSelector, LaunchTarget, NativeProbeMode, SelectorConfig},
};

const LOGIN_URL: &str = "https://accounts.example.com/oauth/authorize?client_id=demo";

fn login_url() -> Url {
	Url::parse(LOGIN_URL).expect("Login URL fixture should parse successfully.")
}

fn selector(mode: NativeProbeMode, allow: &[&str]) -> BrowserSelector {
	let config = SelectorConfig::builder()
		.allow_packages(allow.iter().copied())
		.expect("Allow-list fixture should be valid.")
		.native_probe(mode)
		.build();

	BrowserSelector::new(config)
}

fn both_modes(allow: &[&str]) -> [BrowserSelector; 2] {
	[
		selector(NativeProbeMode::DirectExclusion, allow),
		selector(NativeProbeMode::SetDifference, allow),
	]
}

fn browsers() -> StaticCapabilities {
	StaticCapabilities::default()
		.with_direct_exclusion()
		.with_browser(package("b1.browser"))
		.with_browser(package("b2.browser"))
}

#[test]
fn native_app_wins_in_both_probe_modes() {
	let caps = browsers()
		.with_default_browser(package("b1.browser"))
		.with_isolated_session(package("b1.browser"))
		.with_native_app("https://accounts.example.com/", package("com.example.wallet"));

	for selector in both_modes(&["b1.browser"]) {
		assert_eq!(
			selector.select(&login_url(), &caps),
			LaunchTarget::NativeApp(package("com.example.wallet")),
			"{:?} should find the native handler.",
			selector.config().native_probe
		);
	}
}

#[test]
fn browsers_claiming_the_url_are_not_native_apps() {
	// A browser registered for the URL prefix is also a generic handler, so it cancels out.
	let caps = browsers()
		.with_native_app("https://accounts.example.com/", package("b2.browser"))
		.with_isolated_session(package("b2.browser"));

	for selector in both_modes(&["b1.browser", "b2.browser"]) {
		assert_eq!(
			selector.select(&login_url(), &caps),
			LaunchTarget::IsolatedSession(package("b2.browser"))
		);
	}
}

#[test]
fn native_apps_for_other_urls_are_ignored() {
	let caps = browsers().with_native_app("https://shop.example.com/", package("com.example.shop"));

	for selector in both_modes(&[]) {
		assert_eq!(selector.select(&login_url(), &caps), LaunchTarget::ExternalBrowser);
	}
}

#[test]
fn eligible_default_browser_beats_allow_list_order() {
	let caps = browsers()
		.with_default_browser(package("b2.browser"))
		.with_isolated_session(package("b1.browser"))
		.with_isolated_session(package("b2.browser"));

	assert_eq!(
		selector(NativeProbeMode::SetDifference, &["b1.browser", "b2.browser"])
			.select(&login_url(), &caps),
		LaunchTarget::IsolatedSession(package("b2.browser"))
	);
}

#[test]
fn first_capable_allow_listed_browser_is_chosen() {
	let caps = browsers()
		.with_default_browser(package("b1.browser"))
		.with_isolated_session(package("b2.browser"));

	assert_eq!(
		selector(NativeProbeMode::SetDifference, &["b1.browser", "b2.browser"])
			.select(&login_url(), &caps),
		LaunchTarget::IsolatedSession(package("b2.browser"))
	);
}

#[test]
fn unlisted_provider_yields_unspecified_session() {
	let caps = browsers().with_isolated_session(package("com.unlisted.browser"));

	assert_eq!(
		selector(NativeProbeMode::SetDifference, &["b1.browser", "b2.browser"])
			.select(&login_url(), &caps),
		LaunchTarget::IsolatedSessionUnspecified
	);
}

#[test]
fn nothing_capable_yields_external_browser() {
	assert_eq!(
		selector(NativeProbeMode::SetDifference, &["b1.browser"]).select(&login_url(), &browsers()),
		LaunchTarget::ExternalBrowser
	);
}

#[test]
fn failing_platform_degrades_to_external_browser() {
	let caps = browsers()
		.with_default_browser(package("b1.browser"))
		.with_isolated_session(package("b1.browser"))
		.with_native_app("https://accounts.example.com/", package("com.example.wallet"))
		.failing("package manager unavailable");

	for selector in both_modes(&["b1.browser"]) {
		assert_eq!(selector.select(&login_url(), &caps), LaunchTarget::ExternalBrowser);
	}
}

/// Platform whose direct-exclusion query errors while everything else answers.
struct NoDirectExclusion(StaticCapabilities);
impl CapabilityQuery for NoDirectExclusion {
	fn resolve_view_handlers(&self, query: HandlerQuery<'_>) -> Result<PackageSet, QueryError> {
		self.0.resolve_view_handlers(query)
	}

	fn resolve_default_browser(&self) -> Result<Option<PackageId>, QueryError> {
		self.0.resolve_default_browser()
	}

	fn supports_isolated_session(&self, package: &PackageId) -> Result<bool, QueryError> {
		self.0.supports_isolated_session(package)
	}

	fn isolated_session_providers(&self) -> Result<PackageSet, QueryError> {
		self.0.isolated_session_providers()
	}
}

#[test]
fn unsupported_direct_exclusion_skips_native_tier_only() {
	let caps = NoDirectExclusion(
		browsers()
			.with_isolated_session(package("b1.browser"))
			.with_native_app("https://accounts.example.com/", package("com.example.wallet")),
	);

	assert_eq!(
		selector(NativeProbeMode::DirectExclusion, &["b1.browser"]).select(&login_url(), &caps),
		LaunchTarget::IsolatedSession(package("b1.browser"))
	);
	assert_eq!(
		selector(NativeProbeMode::SetDifference, &["b1.browser"]).select(&login_url(), &caps),
		LaunchTarget::NativeApp(package("com.example.wallet"))
	);
}

#[test]
fn select_browser_never_returns_native_apps() {
	let caps = browsers()
		.with_native_app("https://accounts.example.com/", package("com.example.wallet"))
		.with_isolated_session(package("b1.browser"));
	let selector = selector(NativeProbeMode::SetDifference, &["b1.browser"]);

	assert_eq!(
		selector.select_browser(&caps),
		LaunchTarget::IsolatedSession(package("b1.browser"))
	);
}

#[test]
fn custom_scheme_deep_links_use_the_scheme_handlers_as_baseline() {
	let url = Url::parse("wallet://login/authorize?state=s1")
		.expect("Deep link fixture should parse successfully.");
	let routed = browsers()
		.with_isolated_session(package("b1.browser"))
		.with_scheme_handler("wallet", package("com.example.router"));
	let claimed = routed.clone().with_native_app("wallet://login/", package("com.example.wallet"));

	for selector in both_modes(&["b1.browser"]) {
		let mode = selector.config().native_probe;

		assert_eq!(
			selector.select(&url, &claimed),
			LaunchTarget::NativeApp(package("com.example.wallet")),
			"{mode:?} should pick the app claiming the deep link."
		);
		assert_eq!(
			selector.select(&url, &routed),
			LaunchTarget::IsolatedSession(package("b1.browser")),
			"{mode:?} should not treat a scheme-wide handler as a native app."
		);
	}
}
