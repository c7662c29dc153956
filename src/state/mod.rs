//! Client-side state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` and `notification` are the plain stores the auth flow mutates;
//! `auth` is the reactive projection the UI renders from.

pub mod auth;
pub mod notification;
pub mod session;
