//! Platform-agnostic invite lifecycle.
//!
//! Both tasks are meant to run inside a Dioxus `use_resource` keyed on the
//! value they act on (place id, deep link). Dioxus drops the previous
//! future when that value changes or the view unmounts, which is what
//! cancels an outdated fetch or a pending redirect timer.

use std::future::Future;

use dioxus::prelude::*;
use invite_core::fetch::MetadataSource;
use invite_core::invite::InviteState;
use invite_core::redirect::{Navigator, redirect_after};

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Load the game info for the state's current place id, if due.
///
/// The state is only borrowed around the await point, never across it.
pub async fn run_metadata_load<S: MetadataSource>(mut state: Signal<InviteState>, source: &S) {
    let Some(ticket) = state.write().begin_load() else {
        return;
    };
    let result = source.fetch_game_info(&ticket.place_id).await;
    state.write().apply_load(ticket, result);
}

// ---------------------------------------------------------------------------
// Redirect
// ---------------------------------------------------------------------------

/// Navigate to `deep_link` after `delay_ms`, then record the attempt.
///
/// Does nothing without a link or when the redirect for it was already
/// attempted. `sleep_ms` is the platform sleep (e.g. `gloo_timers` on web).
pub async fn run_redirect<N, F, Fut>(
    mut state: Signal<InviteState>,
    deep_link: Option<String>,
    delay_ms: u64,
    navigator: &N,
    sleep_ms: F,
) where
    N: Navigator + ?Sized,
    F: FnOnce(u64) -> Fut,
    Fut: Future<Output = ()>,
{
    let Some(uri) = deep_link else {
        return;
    };
    if state.peek().pending_redirect() != Some(uri.as_str()) {
        return;
    }

    redirect_after(&uri, delay_ms, sleep_ms, navigator).await.ok();
    state.write().mark_redirect_attempted();
}
