//! Recognized LTI launch parameters.
//!
//! The launch parameter vocabulary is a closed catalog: only the names
//! listed in [`LAUNCH_PARAMETERS`] are ever extracted from an inbound
//! launch and exposed to tools. See the IMS LTI v1.x implementation guide
//! for the meaning of each parameter.

use std::collections::{BTreeMap, HashMap};

/// Prefix marking tool-specific (non-standard) launch parameters.
pub const CUSTOM_PREFIX: &str = "custom_";
/// Custom parameter selecting the destination tool of a basic launch.
pub const CUSTOM_TOOL: &str = "custom_tool";
/// Custom parameter selecting the destination tool of a content-item
/// selection launch, so the eventual return can carry a different tool.
pub const CUSTOM_DL_TOOL: &str = "custom_dl_tool";
/// Custom parameter enabling the debug confirmation page.
pub const CUSTOM_TEST: &str = "custom_test";

/// `lti_message_type` value of a basic launch.
pub const MESSAGE_TYPE_BASIC: &str = "basic-lti-launch-request";
/// `lti_message_type` value of a content-item selection launch.
pub const MESSAGE_TYPE_CONTENT_ITEM: &str = "ContentItemSelectionRequest";

pub const LTI_MESSAGE_TYPE: &str = "lti_message_type";
pub const LTI_VERSION: &str = "lti_version";
pub const RESOURCE_LINK_ID: &str = "resource_link_id";
pub const RESOURCE_LINK_TITLE: &str = "resource_link_title";
pub const RESOURCE_LINK_DESCRIPTION: &str = "resource_link_description";
pub const USER_ID: &str = "user_id";
pub const USER_IMAGE: &str = "user_image";
pub const ROLES: &str = "roles";
pub const GIVEN_NAME: &str = "lis_person_name_given";
pub const FAMILY_NAME: &str = "lis_person_name_family";
pub const FULL_NAME: &str = "lis_person_name_full";
pub const EMAIL: &str = "lis_person_contact_email_primary";
pub const CONTEXT_ID: &str = "context_id";
pub const CONTEXT_TYPE: &str = "context_type";
pub const CONTEXT_TITLE: &str = "context_title";
pub const CONTEXT_LABEL: &str = "context_label";
pub const LOCALE: &str = "launch_presentation_locale";
pub const TARGET: &str = "launch_presentation_document_target";
pub const WIDTH: &str = "launch_presentation_width";
pub const HEIGHT: &str = "launch_presentation_height";
pub const RETURN_URL: &str = "launch_presentation_return_url";
pub const CONSUMER_GUID: &str = "tool_consumer_instance_guid";
pub const CONSUMER_NAME: &str = "tool_consumer_instance_name";
pub const CONSUMER_DESCRIPTION: &str = "tool_consumer_instance_description";
pub const CONSUMER_URL: &str = "tool_consumer_instance_url";
pub const CONSUMER_CONTACT: &str = "tool_consumer_instance_contact_email";
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const COURSE_OFFERING: &str = "lis_course_offering_sourcedid";
pub const COURSE_SECTION: &str = "lis_course_section_sourcedid";
pub const DATA: &str = "data";
pub const CONTENT_ITEM_RETURN_URL: &str = "content_item_return_url";
pub const ACCEPT_PRESENTATION_DOCUMENT_TARGETS: &str = "accept_presentation_document_targets";

/// Renamed consumer-key query parameter forwarded to content-item tools.
pub const CONSUMER_KEY: &str = "consumer_key";

/// The closed catalog of recognized launch parameter names.
///
/// Sorted lexicographically; [`extract_launch_context`] never emits a key
/// outside this table.
pub const LAUNCH_PARAMETERS: [&str; 32] = [
    ACCEPT_PRESENTATION_DOCUMENT_TARGETS,
    CONTENT_ITEM_RETURN_URL,
    CONTEXT_ID,
    CONTEXT_LABEL,
    CONTEXT_TITLE,
    CONTEXT_TYPE,
    DATA,
    TARGET,
    HEIGHT,
    LOCALE,
    RETURN_URL,
    WIDTH,
    COURSE_OFFERING,
    COURSE_SECTION,
    EMAIL,
    FAMILY_NAME,
    FULL_NAME,
    GIVEN_NAME,
    LTI_MESSAGE_TYPE,
    LTI_VERSION,
    OAUTH_CONSUMER_KEY,
    RESOURCE_LINK_DESCRIPTION,
    RESOURCE_LINK_ID,
    RESOURCE_LINK_TITLE,
    ROLES,
    CONSUMER_CONTACT,
    CONSUMER_DESCRIPTION,
    CONSUMER_GUID,
    CONSUMER_NAME,
    CONSUMER_URL,
    USER_ID,
    USER_IMAGE,
];

/// Launch parameters extracted from a single launch request.
///
/// Keys are a subset of [`LAUNCH_PARAMETERS`]; values are trimmed and
/// never empty. `BTreeMap` keeps iteration (and JSON serialization)
/// deterministic.
pub type LaunchContext = BTreeMap<String, String>;

/// Extract the recognized launch parameters from a request parameter map.
///
/// Absent or blank parameters are omitted rather than stored as empty
/// strings; absence is a normal, silent outcome.
#[must_use]
pub fn extract_launch_context(params: &HashMap<String, String>) -> LaunchContext {
    let mut context = LaunchContext::new();
    for name in LAUNCH_PARAMETERS {
        if let Some(value) = params.get(name) {
            let value = value.trim();
            if !value.is_empty() {
                context.insert((*name).to_owned(), value.to_owned());
            }
        }
    }
    context
}

/// Interpret a debug/test flag value (case-insensitive `"true"`).
#[must_use]
pub fn is_truthy(value: Option<&String>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_catalog_is_sorted_and_unique() {
        let mut sorted = LAUNCH_PARAMETERS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), LAUNCH_PARAMETERS.len());
    }

    #[test]
    fn test_extract_keeps_only_catalog_keys() {
        let mut params = HashMap::new();
        params.insert(USER_ID.to_owned(), "jane".to_owned());
        params.insert("custom_tool".to_owned(), "/tool".to_owned());
        params.insert("oauth_signature".to_owned(), "sig".to_owned());

        let context = extract_launch_context(&params);

        assert_eq!(context.len(), 1);
        assert_eq!(context.get(USER_ID).map(String::as_str), Some("jane"));
    }

    #[test]
    fn test_extract_trims_and_drops_blank_values() {
        let mut params = HashMap::new();
        params.insert(ROLES.to_owned(), "  Instructor  ".to_owned());
        params.insert(CONTEXT_ID.to_owned(), "   ".to_owned());
        params.insert(CONTEXT_TITLE.to_owned(), String::new());

        let context = extract_launch_context(&params);

        assert_eq!(context.get(ROLES).map(String::as_str), Some("Instructor"));
        assert!(!context.contains_key(CONTEXT_ID));
        assert!(!context.contains_key(CONTEXT_TITLE));
    }

    #[test]
    fn test_extract_empty_request() {
        let context = extract_launch_context(&HashMap::new());
        assert!(context.is_empty());
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy(Some(&"true".to_owned())));
        assert!(is_truthy(Some(&"TRUE".to_owned())));
        assert!(is_truthy(Some(&" True ".to_owned())));
        assert!(!is_truthy(Some(&"1".to_owned())));
        assert!(!is_truthy(Some(&"false".to_owned())));
        assert!(!is_truthy(None));
    }
}
