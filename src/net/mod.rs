//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` abstracts the HTTP client, `error` classifies failures into
//! user-facing messages, `auth_client` drives login/registration, `api`
//! serves the profile queries, and `types` defines the wire schema.

pub mod api;
pub mod auth_client;
pub mod error;
pub mod transport;
pub mod types;
