//! Static selection settings and the builder used to assemble them.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	selector::{AllowList, NativeProbeMode},
};

/// Static inputs for [`BrowserSelector`](crate::selector::BrowserSelector).
///
/// Every field has a default, so an empty JSON object is a valid configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
	/// Browsers trusted to host isolated sessions, in priority order.
	pub allow_list: AllowList,
	/// Try allow-listed and unspecified isolated sessions before the external browser.
	pub prefer_isolated_sessions: bool,
	/// Strategy used to probe for native app handlers.
	pub native_probe: NativeProbeMode,
}
impl SelectorConfig {
	/// Starts a builder seeded with the defaults.
	pub fn builder() -> SelectorConfigBuilder {
		SelectorConfigBuilder::default()
	}

	/// Parses a JSON payload, reporting the field path on failure.
	pub fn from_json(payload: &str) -> Result<Self, ConfigError> {
		let mut de = serde_json::Deserializer::from_str(payload);
		let config = serde_path_to_error::deserialize(&mut de)?;

		de.end().map_err(|source| ConfigError::Parse { path: ".".into(), source })?;

		Ok(config)
	}
}
impl Default for SelectorConfig {
	fn default() -> Self {
		Self {
			allow_list: AllowList::default(),
			prefer_isolated_sessions: true,
			native_probe: NativeProbeMode::default(),
		}
	}
}

/// Builder for [`SelectorConfig`] values.
#[derive(Debug, Default)]
pub struct SelectorConfigBuilder {
	config: SelectorConfig,
}
impl SelectorConfigBuilder {
	/// Replaces the allow-list.
	pub fn allow_list(mut self, allow_list: AllowList) -> Self {
		self.config.allow_list = allow_list;

		self
	}

	/// Replaces the allow-list from raw package identifiers.
	pub fn allow_packages<I, S>(mut self, packages: I) -> Result<Self, ConfigError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.config.allow_list = AllowList::new(packages)?;

		Ok(self)
	}

	/// Toggles isolated-session preference.
	pub fn prefer_isolated_sessions(mut self, prefer: bool) -> Self {
		self.config.prefer_isolated_sessions = prefer;

		self
	}

	/// Overrides the native probe strategy.
	pub fn native_probe(mut self, mode: NativeProbeMode) -> Self {
		self.config.native_probe = mode;

		self
	}

	/// Finalizes the configuration.
	pub fn build(self) -> SelectorConfig {
		self.config
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn empty_object_uses_defaults() {
		let config = SelectorConfig::from_json("{}").expect("Empty config should parse.");

		assert_eq!(config, SelectorConfig::default());
		assert!(config.prefer_isolated_sessions);
		assert_eq!(config.native_probe, NativeProbeMode::SetDifference);
	}

	#[test]
	fn json_overrides_fields() {
		let config = SelectorConfig::from_json(
			r#"{
				"allow_list": ["com.brave.browser", "com.android.chrome"],
				"prefer_isolated_sessions": false,
				"native_probe": "direct_exclusion"
			}"#,
		)
		.expect("Config fixture should parse.");

		assert_eq!(config.allow_list.as_slice()[0].as_ref(), "com.brave.browser");
		assert!(!config.prefer_isolated_sessions);
		assert_eq!(config.native_probe, NativeProbeMode::DirectExclusion);
	}

	#[test]
	fn parse_errors_name_the_field() {
		let err = SelectorConfig::from_json(r#"{"allow_list": ["ok.browser", "bad entry"]}"#)
			.expect_err("Whitespace in a package must be rejected.");

		assert!(matches!(&err, ConfigError::Parse { path, .. } if path.starts_with("allow_list")));

		let err = SelectorConfig::from_json(r#"{"native_probe": "guess"}"#)
			.expect_err("Unknown probe mode must be rejected.");

		assert!(matches!(&err, ConfigError::Parse { path, .. } if path == "native_probe"));
	}

	#[test]
	fn builder_sets_every_field() {
		let config = SelectorConfig::builder()
			.allow_packages(["com.vivaldi.browser"])
			.expect("Builder allow-list should be valid.")
			.prefer_isolated_sessions(false)
			.native_probe(NativeProbeMode::DirectExclusion)
			.build();

		assert_eq!(config.allow_list.len(), 1);
		assert!(!config.prefer_isolated_sessions);
		assert_eq!(config.native_probe, NativeProbeMode::DirectExclusion);
		assert!(SelectorConfig::builder().allow_packages([""]).is_err());
	}
}
