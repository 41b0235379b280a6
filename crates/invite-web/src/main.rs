//! Game invite page.
//!
//! Served as a static Dioxus web build; the invite link carries the target
//! as `?placeId=...&gameInstanceId=...`.

mod app;
mod platform;

fn main() {
    // tracing subscriber that writes to the browser console.
    dioxus::logger::initialize_default();
    dioxus::launch(app::App);
}
