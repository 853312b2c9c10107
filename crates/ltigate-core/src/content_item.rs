//! Content-item selection return flow.
//!
//! After the user picks a resource inside a tool, the selection goes back
//! to the LMS as a browser POST of OAuth-signed form properties. This
//! module builds the IMS `ContentItem` descriptor, assembles and signs the
//! property set, and renders the auto-submitting launch form.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde_json::json;

use crate::SignError;
use crate::credentials::CredentialStore;
use crate::oauth;
use crate::params::{DATA, LTI_MESSAGE_TYPE, LTI_VERSION};

/// `lti_message_type` of the return POST.
pub const MESSAGE_TYPE_SELECTION: &str = "ContentItemSelection";
/// Default `lti_version` applied when the property set carries none.
const DEFAULT_LTI_VERSION: &str = "LTI-1p0";
/// Submit-button label property of the basic LTI launch form.
const SUBMIT_PROPERTY: &str = "ext_basiclti_submit";
/// Default submit-button label.
const DEFAULT_SUBMIT_LABEL: &str = "Return content to Consumer";

/// A resource chosen inside a tool, to be described to the LMS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedResource {
    /// Human-readable title of the resource.
    pub title: Option<String>,
    /// Accompanying text (the source shows the creation date here).
    pub text: Option<String>,
    /// Tool path the LMS should launch for this resource.
    pub tool: Option<String>,
    /// Thumbnail image URL.
    pub thumbnail: Option<String>,
}

impl SelectedResource {
    /// Render the IMS `ContentItem` graph for this resource.
    #[must_use]
    pub fn to_content_items(&self) -> String {
        let mut item = json!({
            "@type": "LtiLinkItem",
            "mediaType": "application/vnd.ims.lti.v1.ltilink",
        });
        if let Some(title) = &self.title {
            item["title"] = json!(title);
        }
        if let Some(text) = &self.text {
            item["text"] = json!(text);
        }
        if let Some(tool) = &self.tool {
            item["custom"] = json!({ "tool": tool });
        }
        if let Some(thumbnail) = &self.thumbnail {
            item["thumbnail"] = json!({ "@id": thumbnail });
        }
        json!({
            "@context": "http://purl.imsglobal.org/ctx/lti/v1/ContentItem",
            "@graph": [item],
        })
        .to_string()
    }
}

/// Build the signed property set returning a selection to the LMS.
///
/// Resolves the consumer secret through `credentials`, assembles the base
/// properties, applies the LTI defaults and signs everything for a POST
/// to `return_url`.
///
/// # Errors
///
/// [`SignError::UnknownConsumer`] when no credential is registered for
/// `consumer_key`; [`SignError::InvalidReturnUrl`] when the return URL is
/// unusable for signature computation. Both are fatal for the request:
/// no partially signed payload is ever produced.
pub fn build_content_item_return(
    credentials: &dyn CredentialStore,
    consumer_key: &str,
    content_items: &str,
    data: Option<&str>,
    return_url: &str,
) -> Result<BTreeMap<String, String>, SignError> {
    let credential = credentials
        .lookup(consumer_key)
        .ok_or_else(|| SignError::UnknownConsumer(consumer_key.to_owned()))?;

    let mut properties = BTreeMap::new();
    properties.insert(LTI_MESSAGE_TYPE.to_owned(), MESSAGE_TYPE_SELECTION.to_owned());
    properties.insert("content_items".to_owned(), content_items.to_owned());
    if let Some(data) = data {
        properties.insert(DATA.to_owned(), data.to_owned());
    }
    apply_launch_defaults(&mut properties);

    oauth::sign_properties(
        &properties,
        return_url,
        "POST",
        &credential.key,
        &credential.secret,
    )
}

/// Fill in the properties every basic LTI POST is expected to carry.
fn apply_launch_defaults(properties: &mut BTreeMap<String, String>) {
    if !properties.contains_key(LTI_VERSION) {
        properties.insert(LTI_VERSION.to_owned(), DEFAULT_LTI_VERSION.to_owned());
    }
    if !properties.contains_key(SUBMIT_PROPERTY) {
        properties.insert(SUBMIT_PROPERTY.to_owned(), DEFAULT_SUBMIT_LABEL.to_owned());
    }
    if !properties.contains_key("oauth_callback") {
        properties.insert("oauth_callback".to_owned(), "about:blank".to_owned());
    }
}

/// Render the HTML form POSTing `payload` to `return_url`.
///
/// The regular form self-submits on load; in test mode the parameters are
/// listed next to a manual submit button so they can be inspected before
/// submission. All interpolated values are HTML-escaped.
#[must_use]
pub fn render_launch_form(
    payload: &BTreeMap<String, String>,
    return_url: &str,
    test_mode: bool,
) -> String {
    let submit_label = payload
        .get(SUBMIT_PROPERTY)
        .map_or(DEFAULT_SUBMIT_LABEL, String::as_str);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head><title>LTI Launch</title></head>\n");
    if test_mode {
        html.push_str("<body>\n");
    } else {
        html.push_str("<body onload=\"document.ltiLaunchForm.submit()\">\n");
    }
    let _ = writeln!(
        html,
        "<form action=\"{}\" name=\"ltiLaunchForm\" method=\"post\" \
         enctype=\"application/x-www-form-urlencoded\">",
        html_escape(return_url)
    );
    for (name, value) in payload {
        let _ = writeln!(
            html,
            "  <input type=\"hidden\" name=\"{}\" value=\"{}\">",
            html_escape(name),
            html_escape(value)
        );
    }
    if test_mode {
        html.push_str("  <ul>\n");
        for (name, value) in payload {
            let _ = writeln!(
                html,
                "    <li>{} = {}</li>",
                html_escape(name),
                html_escape(value)
            );
        }
        html.push_str("  </ul>\n");
    }
    let _ = writeln!(
        html,
        "  <input type=\"submit\" value=\"{}\">",
        html_escape(submit_label)
    );
    html.push_str("</form>\n</body>\n</html>\n");
    html
}

/// Escape a value for interpolation into HTML text or attribute content.
#[must_use]
pub fn html_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::StaticCredentialStore;
    use pretty_assertions::assert_eq;

    fn store() -> StaticCredentialStore {
        StaticCredentialStore::new([("consumerkey".to_owned(), "consumersecret".to_owned())])
    }

    #[test]
    fn test_selected_resource_json() {
        let resource = SelectedResource {
            title: Some("Lecture 1".to_owned()),
            text: Some("2026-08-01".to_owned()),
            tool: Some("/tools/player".to_owned()),
            thumbnail: Some("https://cdn.example.com/thumb.jpg".to_owned()),
        };

        let items: serde_json::Value =
            serde_json::from_str(&resource.to_content_items()).unwrap();

        assert_eq!(
            items["@context"],
            "http://purl.imsglobal.org/ctx/lti/v1/ContentItem"
        );
        let link = &items["@graph"][0];
        assert_eq!(link["@type"], "LtiLinkItem");
        assert_eq!(link["mediaType"], "application/vnd.ims.lti.v1.ltilink");
        assert_eq!(link["title"], "Lecture 1");
        assert_eq!(link["text"], "2026-08-01");
        assert_eq!(link["custom"]["tool"], "/tools/player");
        assert_eq!(link["thumbnail"]["@id"], "https://cdn.example.com/thumb.jpg");
    }

    #[test]
    fn test_selected_resource_omits_absent_fields() {
        let resource = SelectedResource::default();

        let items: serde_json::Value =
            serde_json::from_str(&resource.to_content_items()).unwrap();

        let link = &items["@graph"][0];
        assert!(link.get("title").is_none());
        assert!(link.get("custom").is_none());
        assert!(link.get("thumbnail").is_none());
    }

    #[test]
    fn test_return_payload_is_signed_and_complete() {
        let payload = build_content_item_return(
            &store(),
            "consumerkey",
            "{\"@graph\":[]}",
            Some("opaque-lms-state"),
            "https://lms.example.com/return",
        )
        .unwrap();

        assert_eq!(
            payload.get("lti_message_type").map(String::as_str),
            Some("ContentItemSelection")
        );
        assert_eq!(
            payload.get("content_items").map(String::as_str),
            Some("{\"@graph\":[]}")
        );
        assert_eq!(
            payload.get("data").map(String::as_str),
            Some("opaque-lms-state")
        );
        assert_eq!(payload.get("lti_version").map(String::as_str), Some("LTI-1p0"));
        assert_eq!(
            payload.get("ext_basiclti_submit").map(String::as_str),
            Some("Return content to Consumer")
        );
        assert_eq!(
            payload.get("oauth_callback").map(String::as_str),
            Some("about:blank")
        );
        for field in ["oauth_signature", "oauth_nonce", "oauth_timestamp", "oauth_version"] {
            assert!(payload.contains_key(field), "missing {field}");
        }
    }

    #[test]
    fn test_unknown_consumer_is_fatal() {
        let result = build_content_item_return(
            &store(),
            "other",
            "{}",
            None,
            "https://lms.example.com/return",
        );

        assert!(matches!(result, Err(SignError::UnknownConsumer(key)) if key == "other"));
    }

    #[test]
    fn test_invalid_return_url_is_fatal() {
        let result =
            build_content_item_return(&store(), "consumerkey", "{}", None, "not a url");

        assert!(matches!(result, Err(SignError::InvalidReturnUrl { .. })));
    }

    #[test]
    fn test_launch_form_auto_submits() {
        let mut payload = BTreeMap::new();
        payload.insert("oauth_signature".to_owned(), "sig".to_owned());

        let html = render_launch_form(&payload, "https://lms.example.com/return", false);

        assert!(html.contains("onload=\"document.ltiLaunchForm.submit()\""));
        assert!(html.contains("action=\"https://lms.example.com/return\""));
        assert!(html.contains("name=\"oauth_signature\" value=\"sig\""));
    }

    #[test]
    fn test_launch_form_test_mode_lists_parameters() {
        let mut payload = BTreeMap::new();
        payload.insert("data".to_owned(), "opaque".to_owned());

        let html = render_launch_form(&payload, "https://lms.example.com/return", true);

        assert!(!html.contains("onload"));
        assert!(html.contains("<li>data = opaque</li>"));
        assert!(html.contains("type=\"submit\""));
    }

    #[test]
    fn test_launch_form_escapes_values() {
        let mut payload = BTreeMap::new();
        payload.insert(
            "content_items".to_owned(),
            "{\"title\":\"<script>\"}".to_owned(),
        );

        let html = render_launch_form(&payload, "https://lms.example.com/return?a=b&c=d", false);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&amp;c=d"));
        assert!(html.contains("&quot;"));
    }
}
