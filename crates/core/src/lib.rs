//! hostprep-core
//!
//! Core library for provisioning a host for peer-to-peer integration tests.
//!
//! A run detects the platform, resolves and downloads one binary artifact,
//! stages it into a client and a server peer tree, then clones source
//! dependencies and registers them in a build sandbox.
//!
//! Every external tool (HTTP, archive decoding, version control, the sandbox
//! tool) is reached through a trait in `backends`, so all orchestration logic
//! here is testable without a network.

pub mod backends;
pub mod error;
pub mod model;
pub mod platform;
pub mod services;
pub mod tree;
pub mod workspace;

pub use error::{ProvisionError, ProvisionResult};

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
