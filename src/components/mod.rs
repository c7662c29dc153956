//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shell chrome (navigation, notices) while reading shared
//! state from Leptos context providers.

pub mod forecast_card;
pub mod nav_bar;
pub mod notice_banner;
