//! Root application component for the web frontend.
//!
//! Reads the invite parameters from the page URL, loads the game metadata
//! from the proxy, and attempts the deep-link redirect shortly after mount.
//! Both background tasks are Dioxus resources, so they are dropped with the
//! view and restarted only when the value they depend on changes.

use std::rc::Rc;

use dioxus::prelude::*;
use invite_core::invite::InviteState;
use invite_ui::app_logic;
use invite_ui::components::invite_screen::InviteScreen;
use invite_ui::components::social_meta::{HeadContext, SocialMetaHead};

use crate::platform::{self, DomHead, GlooMetadataSource, LocationNavigator};

const TAILWIND_CSS: Asset = asset!(
    "/assets/tailwind.css",
    AssetOptions::css()
        .with_preload(true)
        .with_static_head(true)
);

/// Root `<App>` component.
#[component]
pub fn App() -> Element {
    let config = use_hook(platform::load_config);
    use_context_provider(|| HeadContext::new(Rc::new(DomHead)));
    let link_config = config.link.clone();
    let state = use_signal(move || InviteState::new(platform::current_params(), &link_config));

    // Memos only notify when the value itself changes, so unrelated state
    // writes do not restart the tasks below.
    let place_id = use_memo(move || state.read().params.place_id.clone());
    let deep_link = use_memo(move || state.read().deep_link.clone());

    let source = GlooMetadataSource::new(config.proxy_base.clone());
    let _metadata = use_resource(move || {
        let source = source.clone();
        let _ = place_id();
        async move { app_logic::run_metadata_load(state, &source).await }
    });

    let delay_ms = config.redirect_delay_ms;
    let _redirect = use_resource(move || {
        let link = deep_link();
        async move {
            app_logic::run_redirect(state, link, delay_ms, &LocationNavigator, platform::sleep_ms)
                .await
        }
    });

    rsx! {
        document::Stylesheet { href: TAILWIND_CSS }
        SocialMetaHead { state }
        div { class: "min-h-screen bg-gray-50 text-gray-900 font-sans",
            InviteScreen { state }
        }
    }
}
