//! LTI v1.x launch protocol core.
//!
//! This crate implements the protocol-translation half of an LTI tool
//! provider, independent of any HTTP framework:
//!
//! - The fixed catalog of recognized launch parameters and extraction of
//!   the per-launch context ([`params`])
//! - Safe resolution of the internal tool redirect target from the
//!   `custom_tool` / `custom_dl_tool` launch parameters ([`tool`])
//! - OAuth 1.0 HMAC-SHA1 signing of outbound property sets ([`oauth`])
//! - The content-item selection return flow: descriptor construction,
//!   property signing and the auto-submitting launch form ([`content_item`])
//!
//! Verification of the *inbound* launch signature is out of scope; it is
//! assumed to have happened upstream before any of this runs. Consumer
//! credentials are consumed through the [`credentials::CredentialStore`]
//! trait and never cached beyond a request.

pub mod content_item;
pub mod credentials;
mod error;
pub mod oauth;
pub mod params;
pub mod tool;

pub use credentials::{ConsumerCredential, CredentialStore, StaticCredentialStore};
pub use error::SignError;
pub use params::{LaunchContext, extract_launch_context};
pub use tool::ToolRedirectTarget;
