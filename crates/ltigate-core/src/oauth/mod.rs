//! OAuth 1.0 HMAC-SHA1 signing for LTI.
//!
//! LTI v1.x authenticates form posts by signing the POSTed properties
//! with the consumer's shared secret (two-legged OAuth, no token). This
//! module produces the signed property set for the content-item return
//! flow.

mod signature;

pub use signature::{SIGNATURE_METHOD, sign_properties};
