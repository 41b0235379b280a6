//! Metadata fetch abstraction.
//!
//! Decouples the invite logic from any specific HTTP client. The web
//! frontend implements [`MetadataSource`] with `gloo-net`; tests use
//! in-memory stubs.

use std::future::Future;

use thiserror::Error;

use crate::game_info::GameInfo;
use crate::links::encode_component;

/// Errors that can occur while loading game metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The proxy answered with a non-success status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The body was not a valid game info document.
    #[error("invalid game info payload: {0}")]
    Decode(String),
}

/// URL of the game info endpoint for `place_id`.
pub fn game_info_url(proxy_base: &str, place_id: &str) -> String {
    format!(
        "{}/api/gameInfo?placeId={}",
        proxy_base.trim_end_matches('/'),
        encode_component(place_id)
    )
}

/// Something that can look up [`GameInfo`] for a place.
///
/// Implementations issue a single request per call and never retry. The
/// returned future is not required to be `Send`: browser futures are not.
pub trait MetadataSource {
    fn fetch_game_info(
        &self,
        place_id: &str,
    ) -> impl Future<Output = Result<GameInfo, FetchError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url() {
        assert_eq!(
            game_info_url("https://proxy.example", "123"),
            "https://proxy.example/api/gameInfo?placeId=123"
        );
    }

    #[test]
    fn endpoint_url_trims_trailing_slash_and_encodes() {
        assert_eq!(
            game_info_url("https://proxy.example/", "1 2&x"),
            "https://proxy.example/api/gameInfo?placeId=1%202%26x"
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(FetchError::Status(404).to_string(), "unexpected HTTP status 404");
        assert_eq!(
            FetchError::Network("offline".into()).to_string(),
            "network error: offline"
        );
    }
}
