//! Invite screen: join status, game card, manual links.

use dioxus::prelude::*;
use invite_core::invite::{InviteState, MetadataState, RedirectState};

use crate::components::game_card::GameCard;

#[component]
pub fn InviteScreen(state: Signal<InviteState>) -> Element {
    let st = state.read();

    rsx! {
        main { class: "min-h-[60vh] flex items-center justify-center p-6",
            div { class: "max-w-2xl w-full text-center",
                h1 { class: "text-xl mb-3", "Joining game..." }

                match st.params.place_id.as_deref() {
                    None => rsx! { MissingPlace {} },
                    Some(place_id) => {
                        let instance = st.params.game_instance_id.clone();
                        let loading = st.metadata != MetadataState::Loaded;
                        rsx! {
                            GameCard { info: st.info.clone(), loading }

                            p { class: "mb-3",
                                "We're attempting to open Roblox for place "
                                strong { "{place_id}" }
                                if let Some(instance) = instance {
                                    " in instance "
                                    strong { "{instance}" }
                                    "."
                                } else {
                                    "."
                                }
                            }

                            p { class: "mb-2",
                                "If your browser doesn't open Roblox automatically, use one of the links below."
                            }

                            div { class: "flex flex-wrap justify-center gap-3",
                                if let Some(uri) = st.deep_link.clone() {
                                    a {
                                        class: "inline-block px-4 py-2 bg-blue-600 text-white font-semibold rounded-md hover:bg-blue-700 transition-colors",
                                        href: "{uri}",
                                        "Open in Roblox"
                                    }
                                }
                                if let Some(url) = st.web_fallback.clone() {
                                    a {
                                        class: "inline-block px-4 py-2 border border-gray-200 rounded-md text-gray-900 bg-white hover:bg-gray-50 transition-colors",
                                        href: "{url}",
                                        target: "_blank",
                                        rel: "noopener noreferrer",
                                        "Open on Roblox Website"
                                    }
                                }
                            }

                            if st.redirect == RedirectState::Attempted {
                                p { class: "mt-3 text-gray-500 text-sm",
                                    "If nothing happened after a moment, try clicking \"Open in Roblox\" above or check your browser's popup / external application settings."
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn MissingPlace() -> Element {
    rsx! {
        div {
            p { class: "mb-3",
                "Missing required parameter "
                code { "placeId" }
                ". Make sure the invite link includes a "
                code { "?placeId=..." }
                " query parameter."
            }
        }
    }
}
