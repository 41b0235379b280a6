//! Browser adapters for the platform-agnostic invite logic.

use gloo_net::http::Request;
use invite_core::config::InviteConfig;
use invite_core::fetch::{FetchError, MetadataSource, game_info_url};
use invite_core::game_info::GameInfo;
use invite_core::invite::InviteParams;
use invite_core::meta::{HeadWriter, MetaAttr, MetaTag};
use invite_core::redirect::{NavigationError, Navigator};
use web_sys::{Document, Element};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Production defaults, with optional overrides baked in at build time.
pub fn load_config() -> InviteConfig {
    InviteConfig::default().with_overrides(
        option_env!("INVITE_PROXY_BASE"),
        option_env!("INVITE_SCHEME"),
        option_env!("INVITE_WEB_HOST"),
    )
}

/// Read `placeId` / `gameInstanceId` from the current page URL.
pub fn current_params() -> InviteParams {
    let search = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    InviteParams::from_query(&search)
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

/// Fetches game info from the metadata proxy with `fetch()`.
#[derive(Clone, Debug)]
pub struct GlooMetadataSource {
    proxy_base: String,
}

impl GlooMetadataSource {
    pub fn new(proxy_base: impl Into<String>) -> Self {
        Self {
            proxy_base: proxy_base.into(),
        }
    }
}

impl MetadataSource for GlooMetadataSource {
    async fn fetch_game_info(&self, place_id: &str) -> Result<GameInfo, FetchError> {
        let url = game_info_url(&self.proxy_base, place_id);
        tracing::debug!(%url, "Requesting game info");
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(FetchError::Status(response.status()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        GameInfo::decode(&body)
    }
}

// ---------------------------------------------------------------------------
// Document head
// ---------------------------------------------------------------------------

/// Writes title and meta tags straight into `document.head`.
///
/// Each tag is looked up by its `property` / `name` selector and updated in
/// place, so there is never more than one element per key.
pub struct DomHead;

impl DomHead {
    fn document() -> Option<Document> {
        let document = web_sys::window().and_then(|w| w.document());
        if document.is_none() {
            tracing::warn!("No document to write head tags into");
        }
        document
    }

    fn find(document: &Document, attr: MetaAttr, key: &str) -> Option<Element> {
        let selector = format!("meta[{}=\"{}\"]", attr.attribute(), key);
        document
            .query_selector(&selector)
            .inspect_err(|e| tracing::warn!(%selector, error = ?e, "Invalid meta selector"))
            .ok()
            .flatten()
    }

    fn create(document: &Document, tag: &MetaTag) -> Option<Element> {
        let head = document.head()?;
        let element = document.create_element("meta").ok()?;
        element.set_attribute(tag.attr.attribute(), tag.key).ok()?;
        head.append_child(&element).ok()?;
        Some(element)
    }
}

impl HeadWriter for DomHead {
    fn set_title(&self, title: &str) {
        if let Some(document) = Self::document() {
            document.set_title(title);
        }
    }

    fn upsert_meta(&self, tag: &MetaTag) {
        let Some(document) = Self::document() else {
            return;
        };
        let element = Self::find(&document, tag.attr, tag.key)
            .or_else(|| Self::create(&document, tag));
        match element {
            Some(element) => {
                if let Err(e) = element.set_attribute("content", &tag.content) {
                    tracing::warn!(key = tag.key, error = ?e, "Failed to set meta content");
                }
            }
            None => tracing::warn!(key = tag.key, "Failed to create meta tag"),
        }
    }

    fn remove_meta(&self, attr: MetaAttr, key: &str) {
        if let Some(element) = Self::document().and_then(|d| Self::find(&d, attr, key)) {
            element.remove();
        }
    }
}

// ---------------------------------------------------------------------------
// Navigation and timers
// ---------------------------------------------------------------------------

/// Navigates by assigning `window.location.href`.
pub struct LocationNavigator;

impl Navigator for LocationNavigator {
    fn navigate(&self, uri: &str) -> Result<(), NavigationError> {
        let failed = |reason: String| NavigationError {
            uri: uri.to_string(),
            reason,
        };
        let window = web_sys::window().ok_or_else(|| failed("no global `window`".to_string()))?;
        window
            .location()
            .set_href(uri)
            .map_err(|e| failed(format!("{e:?}")))
    }
}

/// Browser sleep backed by `setTimeout`.
pub async fn sleep_ms(ms: u64) {
    let ms = u32::try_from(ms).unwrap_or(u32::MAX);
    gloo_timers::future::TimeoutFuture::new(ms).await;
}
