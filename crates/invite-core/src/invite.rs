//! Invite view state machine.
//!
//! Owns the query parameters, the derived links and the loaded
//! [`GameInfo`], and tracks two independent lifecycles:
//!
//! - metadata: `Unloaded → Loading → Loaded` (a failed load is `Loaded`
//!   with empty defaults),
//! - redirect: `Pending → Attempted`.
//!
//! Frontends drive it in three steps so that no borrow is held across an
//! await point:
//! 1. [`InviteState::begin_load`] hands out a [`LoadTicket`].
//! 2. The ticket's place id is fetched through a [`MetadataSource`].
//! 3. [`InviteState::apply_load`] stores the result, discarding results for
//!    a place id that has since been replaced.
//!
//! [`load_metadata`] composes the three steps for callers that own the
//! state outright.

use url::form_urlencoded;

use crate::config::LinkConfig;
use crate::fetch::{FetchError, MetadataSource};
use crate::game_info::GameInfo;
use crate::links::{build_deep_link_uri, build_web_fallback_url, present};

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Parameters read from the invite URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InviteParams {
    pub place_id: Option<String>,
    pub game_instance_id: Option<String>,
}

impl InviteParams {
    pub fn new(place_id: Option<&str>, game_instance_id: Option<&str>) -> Self {
        Self {
            place_id: present(place_id).map(str::to_string),
            game_instance_id: present(game_instance_id).map(str::to_string),
        }
    }

    /// Parse a raw query string such as `?placeId=1&gameInstanceId=abc`.
    ///
    /// The first occurrence of each key wins; empty values count as absent.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut place_id = None;
        let mut game_instance_id = None;
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match &*key {
                "placeId" => &mut place_id,
                "gameInstanceId" => &mut game_instance_id,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        Self::new(place_id.as_deref(), game_instance_id.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Lifecycle states
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataState {
    Unloaded,
    Loading,
    /// Loaded, or failed and reset to defaults.
    Loaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectState {
    Pending,
    Attempted,
}

/// Permission to run one fetch. Results are only applied while the ticket's
/// generation is still current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub place_id: String,
    generation: u64,
}

// ---------------------------------------------------------------------------
// InviteState
// ---------------------------------------------------------------------------

/// Everything the invite view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct InviteState {
    pub params: InviteParams,
    /// Native client URI, `None` without a place id.
    pub deep_link: Option<String>,
    /// Public game page, `None` without a place id.
    pub web_fallback: Option<String>,
    pub info: GameInfo,
    pub metadata: MetadataState,
    pub redirect: RedirectState,
    generation: u64,
}

impl InviteState {
    pub fn new(params: InviteParams, links: &LinkConfig) -> Self {
        let mut state = Self {
            params: InviteParams::default(),
            deep_link: None,
            web_fallback: None,
            info: GameInfo::default(),
            metadata: MetadataState::Unloaded,
            redirect: RedirectState::Pending,
            generation: 0,
        };
        state.set_params(params, links);
        state
    }

    /// Whether the required `placeId` parameter is missing.
    pub fn missing_place(&self) -> bool {
        self.params.place_id.is_none()
    }

    /// Replace the query parameters and re-derive the links.
    ///
    /// A different place id discards the loaded info and re-arms both the
    /// fetch and the redirect. A different instance id only re-arms the
    /// redirect.
    pub fn set_params(&mut self, params: InviteParams, links: &LinkConfig) {
        let place_changed = params.place_id != self.params.place_id;
        let deep_link = build_deep_link_uri(
            links,
            params.place_id.as_deref(),
            params.game_instance_id.as_deref(),
        );

        if deep_link != self.deep_link {
            self.redirect = RedirectState::Pending;
        }
        if place_changed {
            self.info = GameInfo::default();
            self.metadata = MetadataState::Unloaded;
            // Invalidate any in-flight ticket for the old place.
            self.generation += 1;
        }

        self.web_fallback = build_web_fallback_url(links, params.place_id.as_deref());
        self.deep_link = deep_link;
        self.params = params;
    }

    /// Start a metadata load if one is due.
    ///
    /// Returns `None` when there is no place id or the metadata for the
    /// current place is already loading or loaded.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.metadata != MetadataState::Unloaded {
            return None;
        }
        let place_id = self.params.place_id.clone()?;

        self.generation += 1;
        self.metadata = MetadataState::Loading;
        tracing::debug!(place_id = %place_id, generation = self.generation, "Loading game info");

        Some(LoadTicket {
            place_id,
            generation: self.generation,
        })
    }

    /// Store the outcome of the fetch started with `ticket`.
    ///
    /// Returns `false` (and leaves the state untouched) when the ticket has
    /// been superseded. Failures are logged and reset the info to defaults.
    pub fn apply_load(&mut self, ticket: LoadTicket, result: Result<GameInfo, FetchError>) -> bool {
        if ticket.generation != self.generation {
            tracing::warn!(
                place_id = %ticket.place_id,
                "Ignoring game info for a superseded place"
            );
            return false;
        }

        self.info = match result {
            Ok(info) => info,
            Err(e) => {
                tracing::error!(place_id = %ticket.place_id, error = %e, "Failed to load game info");
                GameInfo::default()
            }
        };
        self.metadata = MetadataState::Loaded;
        true
    }

    /// The deep link to navigate to, while the redirect is still pending.
    pub fn pending_redirect(&self) -> Option<&str> {
        match self.redirect {
            RedirectState::Pending => self.deep_link.as_deref(),
            RedirectState::Attempted => None,
        }
    }

    pub fn mark_redirect_attempted(&mut self) {
        self.redirect = RedirectState::Attempted;
    }
}

/// Fetch the game info for the current place, if due, and apply it.
///
/// Issues no request without a place id. Returns whether the state changed.
pub async fn load_metadata<S: MetadataSource>(state: &mut InviteState, source: &S) -> bool {
    let Some(ticket) = state.begin_load() else {
        return false;
    };
    let result = source.fetch_game_info(&ticket.place_id).await;
    state.apply_load(ticket, result)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use super::*;
    use crate::game_info::{GameDetails, UNKNOWN_NAME};

    /// In-memory source returning a canned response.
    struct StubSource {
        response: Result<GameInfo, FetchError>,
        requests: RefCell<Vec<String>>,
    }

    impl StubSource {
        fn new(response: Result<GameInfo, FetchError>) -> Self {
            Self {
                response,
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl MetadataSource for StubSource {
        async fn fetch_game_info(&self, place_id: &str) -> Result<GameInfo, FetchError> {
            self.requests.borrow_mut().push(place_id.to_string());
            self.response.clone()
        }
    }

    /// Counts `ERROR` events.
    #[derive(Clone, Default)]
    struct ErrorCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for ErrorCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn count_errors<T>(f: impl FnOnce() -> T) -> (T, usize) {
        let counter = ErrorCounter::default();
        let subscriber = tracing_subscriber::registry().with(counter.clone());
        let out = tracing::subscriber::with_default(subscriber, f);
        (out, counter.0.load(Ordering::SeqCst))
    }

    fn foo_info() -> GameInfo {
        GameInfo {
            thumbnail: Some("x".into()),
            details: Some(GameDetails {
                name: Some("Foo".into()),
                description: Some("bar".into()),
                visits: Some(1234),
                ..GameDetails::default()
            }),
        }
    }

    fn state_for(place: Option<&str>, instance: Option<&str>) -> InviteState {
        InviteState::new(InviteParams::new(place, instance), &LinkConfig::default())
    }

    // -- query parsing -------------------------------------------------------

    #[test]
    fn parse_query() {
        let params = InviteParams::from_query("?placeId=123&gameInstanceId=abc-1");
        assert_eq!(params.place_id.as_deref(), Some("123"));
        assert_eq!(params.game_instance_id.as_deref(), Some("abc-1"));

        let params = InviteParams::from_query("placeId=1%202&other=x");
        assert_eq!(params.place_id.as_deref(), Some("1 2"));
        assert_eq!(params.game_instance_id, None);
    }

    #[test]
    fn parse_query_first_occurrence_and_empties() {
        let params = InviteParams::from_query("?placeId=1&placeId=2");
        assert_eq!(params.place_id.as_deref(), Some("1"));

        // An empty first value still wins and counts as missing.
        let params = InviteParams::from_query("?placeId=&placeId=2&gameInstanceId=");
        assert_eq!(params, InviteParams::default());

        assert_eq!(InviteParams::from_query(""), InviteParams::default());
    }

    // -- derived links -------------------------------------------------------

    #[test]
    fn new_state_derives_links() {
        let state = state_for(Some("123"), Some("7"));
        assert_eq!(
            state.deep_link.as_deref(),
            Some("roblox://experiences/start?placeId=123&gameInstanceId=7")
        );
        assert_eq!(
            state.web_fallback.as_deref(),
            Some("https://www.roblox.com/games/123")
        );
        assert_eq!(state.metadata, MetadataState::Unloaded);
        assert_eq!(state.redirect, RedirectState::Pending);
        assert_eq!(state.info.display_name(), UNKNOWN_NAME);
    }

    // -- metadata loading ----------------------------------------------------

    #[test]
    fn fetch_success_replaces_info() {
        let source = StubSource::new(Ok(foo_info()));
        let mut state = state_for(Some("123"), None);

        let (changed, errors) =
            count_errors(|| tokio_test::block_on(load_metadata(&mut state, &source)));

        assert!(changed);
        assert_eq!(errors, 0);
        assert_eq!(state.metadata, MetadataState::Loaded);
        assert_eq!(state.info.display_name(), "Foo");
        assert_eq!(state.info.image_url(), Some("x"));
        assert_eq!(*source.requests.borrow(), ["123"]);
    }

    #[test]
    fn fetch_failure_resets_to_defaults() {
        let source = StubSource::new(Err(FetchError::Network("connection refused".into())));
        let mut state = state_for(Some("123"), None);
        state.info = foo_info();

        let (changed, errors) =
            count_errors(|| tokio_test::block_on(load_metadata(&mut state, &source)));

        assert!(changed);
        assert_eq!(errors, 1);
        assert_eq!(state.metadata, MetadataState::Loaded);
        assert_eq!(state.info.display_name(), UNKNOWN_NAME);
        assert_eq!(state.info.thumbnail, None);
        assert_eq!(state.info.details, None);
    }

    #[test]
    fn status_and_decode_failures_are_handled_alike() {
        for err in [FetchError::Status(500), FetchError::Decode("eof".into())] {
            let source = StubSource::new(Err(err));
            let mut state = state_for(Some("9"), None);
            assert!(tokio_test::block_on(load_metadata(&mut state, &source)));
            assert_eq!(state.info, GameInfo::default());
        }
    }

    #[test]
    fn missing_place_issues_no_request() {
        let source = StubSource::new(Ok(foo_info()));
        let mut state = state_for(None, Some("7"));

        assert!(state.missing_place());
        assert!(!tokio_test::block_on(load_metadata(&mut state, &source)));
        assert!(source.requests.borrow().is_empty());
        assert_eq!(state.metadata, MetadataState::Unloaded);
        assert_eq!(state.deep_link, None);
        assert_eq!(state.web_fallback, None);
    }

    #[test]
    fn loads_once_per_place() {
        let source = StubSource::new(Ok(foo_info()));
        let mut state = state_for(Some("1"), None);

        tokio_test::block_on(async {
            assert!(load_metadata(&mut state, &source).await);
            assert!(!load_metadata(&mut state, &source).await);
        });
        assert_eq!(source.requests.borrow().len(), 1);
    }

    #[test]
    fn new_place_triggers_new_fetch() {
        let source = StubSource::new(Ok(foo_info()));
        let links = LinkConfig::default();
        let mut state = state_for(Some("1"), None);
        tokio_test::block_on(load_metadata(&mut state, &source));

        state.set_params(InviteParams::new(Some("2"), None), &links);
        assert_eq!(state.metadata, MetadataState::Unloaded);
        assert_eq!(state.info, GameInfo::default());

        tokio_test::block_on(load_metadata(&mut state, &source));
        assert_eq!(*source.requests.borrow(), ["1", "2"]);
    }

    #[test]
    fn stale_result_is_ignored() {
        let links = LinkConfig::default();
        let mut state = state_for(Some("1"), None);
        let stale = state.begin_load().unwrap();

        state.set_params(InviteParams::new(Some("2"), None), &links);
        let current = state.begin_load().unwrap();
        assert_eq!(current.place_id, "2");

        assert!(!state.apply_load(stale, Ok(foo_info())));
        assert_eq!(state.metadata, MetadataState::Loading);
        assert_eq!(state.info, GameInfo::default());

        assert!(state.apply_load(current, Err(FetchError::Status(404))));
        assert_eq!(state.metadata, MetadataState::Loaded);
    }

    #[test]
    fn begin_load_only_from_unloaded() {
        let mut state = state_for(Some("1"), None);
        assert!(state.begin_load().is_some());
        assert_eq!(state.metadata, MetadataState::Loading);
        assert!(state.begin_load().is_none());
    }

    // -- redirect ------------------------------------------------------------

    #[test]
    fn redirect_is_pending_once() {
        let mut state = state_for(Some("1"), None);
        assert_eq!(
            state.pending_redirect(),
            Some("roblox://experiences/start?placeId=1")
        );
        state.mark_redirect_attempted();
        assert_eq!(state.pending_redirect(), None);
    }

    #[test]
    fn no_redirect_without_place() {
        let state = state_for(None, None);
        assert_eq!(state.pending_redirect(), None);
    }

    #[test]
    fn changed_instance_rearms_redirect_but_keeps_info() {
        let links = LinkConfig::default();
        let source = StubSource::new(Ok(foo_info()));
        let mut state = state_for(Some("1"), None);
        tokio_test::block_on(load_metadata(&mut state, &source));
        state.mark_redirect_attempted();

        state.set_params(InviteParams::new(Some("1"), Some("9")), &links);
        assert_eq!(state.redirect, RedirectState::Pending);
        assert_eq!(state.metadata, MetadataState::Loaded);
        assert_eq!(state.info.display_name(), "Foo");
        assert!(state.pending_redirect().unwrap().contains("gameInstanceId=9"));

        // Same params again: nothing re-armed.
        state.mark_redirect_attempted();
        state.set_params(InviteParams::new(Some("1"), Some("9")), &links);
        assert_eq!(state.redirect, RedirectState::Attempted);
    }
}
