//! Web framework integration surface.
//!
//! This module is the boundary between HTTP frameworks and the strategy:
//! - [`ExtractCredentials`] describes the request parts a key can come from
//! - [`RequestAdapter`] is an owned request for frameworks without their own
//!   implementation, and for tests
//! - [`parse_cookie_header`] turns the raw `Cookie` header into a map
//!
//! No framework-specific code lives here.

mod adapter;
mod cookie;
mod extract;

pub use adapter::RequestAdapter;
pub use cookie::parse_cookie_header;
pub use extract::ExtractCredentials;
