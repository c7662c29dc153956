//! Utility helpers shared across the client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, clock,
//! routing hooks) from the stores and pages so the core runs natively in tests.

pub mod auth;
pub mod clock;
pub mod event_bus;
pub mod listeners;
pub mod navigation;
pub mod storage;
pub mod token;
pub mod validation;
