//! Read-only view over installed applications and the capabilities they advertise.
//!
//! The host platform implements [`CapabilityQuery`]; selection treats every answer as a
//! consistent snapshot for the duration of one decision and never mutates it.

pub mod snapshot;

pub use snapshot::StaticCapabilities;

// self
use crate::{_prelude::*, auth::PackageId};

/// Set of packages returned by a handler query; iteration order carries no meaning.
pub type PackageSet = HashSet<PackageId>;

/// Which URL a VIEW handler query should resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandlerQuery<'a> {
	/// A generic URL of the given scheme, answered by general-purpose browsers.
	Generic {
		/// URL scheme (e.g. `https`).
		scheme: &'a str,
	},
	/// The exact URL about to be opened.
	Specific(&'a Url),
}

/// Platform query contract consulted by the browser selector.
///
/// Implementors are required to be `Send + Sync` and side-effect free. Errors are never
/// fatal: the selector treats a failed query as "capability absent" and falls through to
/// the next tier.
pub trait CapabilityQuery
where
	Self: Send + Sync,
{
	/// Packages that handle a browsable VIEW intent for the provided query.
	fn resolve_view_handlers(&self, query: HandlerQuery<'_>) -> Result<PackageSet, QueryError>;

	/// Resolves `url` while excluding general-purpose browsers.
	///
	/// Only platforms with direct browser exclusion answer this; the default
	/// implementation reports [`QueryError::Unsupported`].
	fn resolve_non_browser_handler(&self, _url: &Url) -> Result<Option<PackageId>, QueryError> {
		Err(QueryError::Unsupported { capability: "direct_exclusion" })
	}

	/// The platform's current default handler for generic web URLs.
	fn resolve_default_browser(&self) -> Result<Option<PackageId>, QueryError>;

	/// Whether `package` exposes the isolated-session (custom tab) service.
	fn supports_isolated_session(&self, package: &PackageId) -> Result<bool, QueryError>;

	/// Every package that exposes the isolated-session service.
	fn isolated_session_providers(&self) -> Result<PackageSet, QueryError>;
}

/// Failure reported by a [`CapabilityQuery`] implementation.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum QueryError {
	/// The platform could not answer the query.
	#[error("Platform query failed: {message}.")]
	Platform {
		/// Human-readable error payload.
		message: String,
	},
	/// The platform does not offer this kind of query.
	#[error("Platform does not support the {capability} query.")]
	Unsupported {
		/// Query label.
		capability: &'static str,
	},
}
