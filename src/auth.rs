//! Auth-domain identifiers and captured redirect responses.

pub mod id;
pub mod response;

pub use id::*;
pub use response::*;
