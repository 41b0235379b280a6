//! Deep-link and web fallback URL construction.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::form_urlencoded;

use crate::config::LinkConfig;

/// Bytes escaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single path segment or query value.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Treat an empty identifier the same as a missing one.
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Build the native client URI, e.g.
/// `roblox://experiences/start?placeId=123&gameInstanceId=abc`.
///
/// Returns `None` without a place id. The instance parameter is only added
/// when an instance id is given.
pub fn build_deep_link_uri(
    config: &LinkConfig,
    place_id: Option<&str>,
    instance_id: Option<&str>,
) -> Option<String> {
    let place_id = present(place_id)?;

    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("placeId", place_id);
    if let Some(instance_id) = present(instance_id) {
        query.append_pair("gameInstanceId", instance_id);
    }

    Some(format!(
        "{}://experiences/start?{}",
        config.scheme,
        query.finish()
    ))
}

/// Build the public game page URL, e.g. `https://www.roblox.com/games/123`.
pub fn build_web_fallback_url(config: &LinkConfig, place_id: Option<&str>) -> Option<String> {
    let place_id = present(place_id)?;
    Some(format!(
        "https://{}/games/{}",
        config.web_host,
        encode_component(place_id)
    ))
}
