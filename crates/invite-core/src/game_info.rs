//! Game metadata as returned by the proxy's `/api/gameInfo` endpoint.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::fetch::FetchError;

/// Name shown on the page when no details are available.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Owner of a game (user or group).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameCreator {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Descriptive fields and live counters of a game.
///
/// Keys the proxy sends that are not modelled here are kept in
/// [`extra`](GameDetails::extra).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    pub root_place_id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub creator: Option<GameCreator>,
    /// Players currently in game.
    pub playing: Option<u64>,
    /// Lifetime visits.
    pub visits: Option<u64>,
    /// Server capacity.
    pub max_players: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Thumbnail plus details. Either half may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub details: Option<GameDetails>,
}

impl GameInfo {
    /// Decode a response body.
    pub fn decode(body: &str) -> Result<Self, FetchError> {
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Game name, or [`UNKNOWN_NAME`].
    pub fn display_name(&self) -> &str {
        self.details
            .as_ref()
            .and_then(|d| d.name.as_deref())
            .unwrap_or(UNKNOWN_NAME)
    }

    /// Thumbnail URL, if one is set and non-empty.
    pub fn image_url(&self) -> Option<&str> {
        self.thumbnail.as_deref().filter(|t| !t.is_empty())
    }

    /// Creator name, if known.
    pub fn creator_name(&self) -> Option<&str> {
        self.details
            .as_ref()
            .and_then(|d| d.creator.as_ref())
            .map(|c| c.name.as_str())
            .filter(|n| !n.is_empty())
    }
}
