//! Game summary card: thumbnail, name, creator and live stats.

use dioxus::prelude::*;
use invite_core::format::format_compact;
use invite_core::game_info::GameInfo;

#[component]
pub fn GameCard(info: GameInfo, loading: bool) -> Element {
    let name = info.display_name().to_string();
    let creator = info.creator_name().map(str::to_string);
    let image = info.image_url().map(str::to_string);
    let stats = info.details.as_ref().map(|d| {
        [
            ("Playing", format_compact(d.playing.map(|v| v as f64))),
            ("Visits", format_compact(d.visits.map(|v| v as f64))),
            ("Max players", format_compact(d.max_players.map(|v| v as f64))),
        ]
    });

    rsx! {
        div { class: "flex flex-col sm:flex-row items-center gap-4 mb-4 p-4 rounded-xl border border-gray-200 bg-white text-left",
            match image {
                // Keyed so a new URL gets a fresh error flag.
                Some(url) => rsx! { Thumbnail { key: "{url}", url: url.clone() } },
                None => rsx! { ThumbnailPlaceholder { loading } },
            }

            div { class: "flex-1 min-w-0",
                h2 { class: "text-lg font-semibold truncate",
                    if loading { "Loading game…" } else { "{name}" }
                }
                if let Some(creator) = creator {
                    p { class: "text-sm text-gray-500", "by {creator}" }
                }
                if let Some(stats) = stats {
                    div { class: "flex gap-4 mt-2",
                        for (label, value) in stats {
                            div { class: "flex flex-col",
                                span { class: "font-semibold", "{value}" }
                                span { class: "text-xs text-gray-500", "{label}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Thumbnail image that falls back to the placeholder if it fails to load.
#[component]
fn Thumbnail(url: String) -> Element {
    let mut failed = use_signal(|| false);

    if failed() {
        return rsx! { ThumbnailPlaceholder { loading: false } };
    }

    rsx! {
        img {
            class: "w-32 h-32 rounded-lg object-cover bg-gray-100",
            src: "{url}",
            alt: "Game thumbnail",
            onerror: move |_| {
                tracing::debug!("Thumbnail failed to load");
                failed.set(true);
            },
        }
    }
}

#[component]
fn ThumbnailPlaceholder(loading: bool) -> Element {
    let pulse = if loading { "animate-pulse" } else { "" };
    rsx! {
        div { class: "w-32 h-32 rounded-lg bg-gray-200 flex items-center justify-center text-3xl text-gray-400 {pulse}",
            "🎮"
        }
    }
}
