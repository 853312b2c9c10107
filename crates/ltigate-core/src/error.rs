//! Error types for the LTI protocol core.

/// Error while producing a signed content-item return payload.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SignError {
    /// No credential is registered for the consumer key.
    ///
    /// A trust/configuration failure, not malformed input: the request
    /// cannot be answered with a signed payload at all.
    #[error("no consumer registered for key '{0}'")]
    UnknownConsumer(String),

    /// The return URL could not be parsed for signature computation.
    #[error("invalid content-item return URL '{url}'")]
    InvalidReturnUrl {
        /// The offending URL.
        url: String,
        /// Parse failure detail.
        #[source]
        source: url::ParseError,
    },
}
