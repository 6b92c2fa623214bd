//! timequiz-redirect — Path-to-URL redirect server.
//!
//! Maps request paths to destination URLs loaded from YAML, JSON or TOML,
//! answering hits with `302 Found` and everything else with a fallback page.

pub mod error;
pub mod path_map;
pub mod server;

pub use error::RedirectError;
pub use path_map::PathMap;
pub use server::{router, serve, serve_on};
