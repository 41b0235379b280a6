//! Framework-agnostic core of the invite page.
//!
//! Everything here is plain data and pure functions plus two small async
//! seams ([`fetch::MetadataSource`] and [`redirect::Navigator`]) so that the
//! Dioxus frontends only have to provide thin platform adapters.

pub mod config;
pub mod fetch;
pub mod format;
pub mod game_info;
pub mod invite;
pub mod links;
pub mod meta;
pub mod redirect;
