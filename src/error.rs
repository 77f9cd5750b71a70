//! Broker-level error types shared across selection, launching, and correlation.

// self
use crate::_prelude::*;

/// Broker-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical broker error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// Every launch strategy, external browser included, failed to open the URL.
	#[error("No application could open `{url}`.")]
	NoHandler {
		/// URL that could not be opened.
		url: String,
		/// Failure reported by the last launch attempt.
		#[source]
		source: crate::launch::LaunchError,
	},
	/// The pending login was torn down or replaced before it resolved.
	#[error("Login `{login}` was discarded before a response arrived.")]
	LoginDiscarded {
		/// Identifier of the discarded login.
		login: String,
	},
}

/// Configuration and validation failures raised by the broker.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Configuration payload could not be parsed.
	#[error("Selector configuration is malformed at `{path}`.")]
	Parse {
		/// Field path where parsing failed.
		path: String,
		/// Structured parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// An allow-list entry is not a valid package identifier.
	#[error("Allow-list contains an invalid package identifier.")]
	InvalidAllowList(#[from] crate::auth::IdentifierError),
}
impl From<serde_path_to_error::Error<serde_json::Error>> for ConfigError {
	fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = e.path().to_string();

		Self::Parse { path, source: e.into_inner() }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::launch::LaunchError;

	#[test]
	fn no_handler_exposes_last_launch_error_as_source() {
		let launch_error = LaunchError::NotFound { target: "external_browser".into() };
		let broker_error = Error::NoHandler {
			url: "https://accounts.example.com/authorize".into(),
			source: launch_error.clone(),
		};

		assert!(broker_error.to_string().contains("https://accounts.example.com/authorize"));

		let source = StdError::source(&broker_error)
			.expect("Broker error should expose the original launch error as its source.");

		assert_eq!(source.to_string(), launch_error.to_string());
	}

	#[test]
	fn parse_error_keeps_field_path() {
		let payload = r#"{"prefer_isolated_sessions":"yes"}"#;
		let mut de = serde_json::Deserializer::from_str(payload);
		let err = serde_path_to_error::deserialize::<_, crate::selector::SelectorConfig>(&mut de)
			.expect_err("A string flag must be rejected.");
		let config_error = ConfigError::from(err);

		assert!(matches!(
			&config_error,
			ConfigError::Parse { path, .. } if path == "prefer_isolated_sessions"
		));
	}
}
