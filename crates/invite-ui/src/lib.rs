//! Shared Dioxus UI components for the invite page.
//!
//! This crate is platform-agnostic: components take an
//! `invite_core::invite::InviteState` signal, and [`app_logic`] drives the
//! metadata load and the deep-link redirect through the traits in
//! `invite_core`, so the web crate only supplies an HTTP source, a navigator,
//! a head writer and a sleep function.

pub mod app_logic;
pub mod components;
