//! Document head tags for link previews (Discord, Twitter, ...).

use std::rc::Rc;

use dioxus::prelude::*;
use invite_core::invite::InviteState;
use invite_core::meta::{HeadWriter, SocialMeta};

/// The platform's head writer, provided as a root context.
#[derive(Clone)]
pub struct HeadContext(pub Rc<dyn HeadWriter>);

impl HeadContext {
    pub fn new(writer: Rc<dyn HeadWriter>) -> Self {
        Self(writer)
    }
}

/// Keeps the page title and the Open Graph / Twitter Card meta tags in sync
/// with the loaded game info.
///
/// Tags are written through [`HeadContext`] whenever the info changes, so a
/// late metadata load replaces the fallback tags in place. Renders nothing.
#[component]
pub fn SocialMetaHead(state: Signal<InviteState>) -> Element {
    let head = use_context::<HeadContext>();
    let info = use_memo(move || state.read().info.clone());

    use_effect(move || SocialMeta::from_info(&info.read()).apply(&*head.0));

    rsx! {}
}
