//! OAuth 1.0 signature generation (RFC 5849).

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_encode};
use rand::RngExt;
use sha1::Sha1;
use url::Url;

use crate::SignError;

type HmacSha1 = Hmac<Sha1>;

/// `oauth_signature_method` value.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";

/// OAuth unreserved characters: A-Z a-z 0-9 - . _ ~
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode string per RFC 3986.
fn oauth_encode(input: &str) -> String {
    percent_encode(input.as_bytes(), OAUTH_ENCODE_SET).to_string()
}

/// Generate cryptographically random nonce (32 hex characters).
fn generate_nonce() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    hex::encode(bytes)
}

/// Generate Unix timestamp.
fn generate_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
        .to_string()
}

/// Sign data with HMAC-SHA1 and return base64-encoded signature.
///
/// Two-legged OAuth: the key is `encoded(secret)&` with an empty token
/// secret.
fn sign_hmac_sha1(consumer_secret: &str, data: &str) -> String {
    let key = format!("{}&", oauth_encode(consumer_secret));
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(data.as_bytes());
    BASE64_STANDARD.encode(mac.finalize().into_bytes())
}

/// Normalize the signature base URL per RFC 5849 Section 3.4.1.2.
///
/// Lowercased scheme and host, default ports omitted, query excluded.
fn normalize_base_url(url: &Url) -> String {
    let mut base = format!("{}://{}", url.scheme(), url.host_str().unwrap_or(""));
    if let Some(port) = url.port() {
        base.push_str(&format!(":{port}"));
    }
    base.push_str(url.path());
    base
}

/// Build OAuth signature base string per RFC 5849 Section 3.4.1.
///
/// Format: `HTTP_METHOD&encoded_base_url&encoded_parameters`
fn build_signature_base_string(
    method: &str,
    base_url: &str,
    params: &[(String, String)],
) -> String {
    // Normalize parameters: encode keys/values, sort by key then value
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (oauth_encode(k), oauth_encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        oauth_encode(base_url),
        oauth_encode(&param_string)
    )
}

/// Sign a property set for a form POST to `url`.
///
/// Adds the required OAuth parameters (`oauth_consumer_key`,
/// `oauth_nonce`, `oauth_timestamp`, `oauth_signature_method`,
/// `oauth_version`) and the computed `oauth_signature` over the given
/// properties. Query parameters already present on `url` take part in the
/// signature (RFC 5849 Section 3.4.1.3) but are not added to the returned
/// set.
///
/// # Errors
///
/// Returns [`SignError::InvalidReturnUrl`] if `url` cannot be parsed as an
/// absolute URL; an unsigned property set is never returned.
pub fn sign_properties(
    properties: &BTreeMap<String, String>,
    url: &str,
    method: &str,
    consumer_key: &str,
    consumer_secret: &str,
) -> Result<BTreeMap<String, String>, SignError> {
    sign_properties_with(
        properties,
        url,
        method,
        consumer_key,
        consumer_secret,
        &generate_nonce(),
        &generate_timestamp(),
    )
}

/// [`sign_properties`] with caller-provided nonce and timestamp.
///
/// Signing is a pure function of its inputs, which keeps signatures
/// reproducible under test.
pub(crate) fn sign_properties_with(
    properties: &BTreeMap<String, String>,
    url: &str,
    method: &str,
    consumer_key: &str,
    consumer_secret: &str,
    nonce: &str,
    timestamp: &str,
) -> Result<BTreeMap<String, String>, SignError> {
    let parsed = Url::parse(url).map_err(|source| SignError::InvalidReturnUrl {
        url: url.to_owned(),
        source,
    })?;

    let mut signed = properties.clone();
    signed.insert("oauth_consumer_key".to_owned(), consumer_key.to_owned());
    signed.insert("oauth_nonce".to_owned(), nonce.to_owned());
    signed.insert("oauth_timestamp".to_owned(), timestamp.to_owned());
    signed.insert(
        "oauth_signature_method".to_owned(),
        SIGNATURE_METHOD.to_owned(),
    );
    signed.insert("oauth_version".to_owned(), "1.0".to_owned());

    // Signature parameters: the signed properties plus any query
    // parameters carried by the target URL itself
    let mut signature_params: Vec<(String, String)> = signed
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    for (key, value) in parsed.query_pairs() {
        signature_params.push((key.into_owned(), value.into_owned()));
    }

    let base_url = normalize_base_url(&parsed);
    let base_string = build_signature_base_string(method, &base_url, &signature_params);
    let signature = sign_hmac_sha1(consumer_secret, &base_string);
    signed.insert("oauth_signature".to_owned(), signature);

    Ok(signed)
}
