//! Delayed one-shot deep-link redirect.
//!
//! [`redirect_after`] is an ordinary future: it is cancelled by dropping
//! it. Frontends run it in a task owned by the view so that unmounting the
//! view, or replacing the deep link, clears the pending timer.

use std::future::Future;

use thiserror::Error;

/// The browser refused to change location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("navigation to {uri} failed: {reason}")]
pub struct NavigationError {
    pub uri: String,
    pub reason: String,
}

/// Points the page at a new URI (`window.location.href = uri` on the web).
pub trait Navigator {
    fn navigate(&self, uri: &str) -> Result<(), NavigationError>;
}

/// Wait `delay_ms`, then navigate to `uri` exactly once.
///
/// `sleep_ms` is a platform sleep (`gloo_timers` on the web,
/// `tokio::time::sleep` in tests). Whether the native handler actually
/// accepted the URI is not observable.
pub async fn redirect_after<N, F, Fut>(
    uri: &str,
    delay_ms: u64,
    sleep_ms: F,
    navigator: &N,
) -> Result<(), NavigationError>
where
    N: Navigator + ?Sized,
    F: FnOnce(u64) -> Fut,
    Fut: Future<Output = ()>,
{
    sleep_ms(delay_ms).await;
    tracing::debug!(uri, "Attempting deep-link redirect");
    navigator.navigate(uri).inspect_err(|e| {
        tracing::warn!(error = %e, "Deep-link redirect failed");
    })
}
