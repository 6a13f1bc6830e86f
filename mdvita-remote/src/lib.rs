//! # mdvita-remote: Remote Document Store for MDVita
//!
//! Implements [`mdvita_core::store::DocumentStore`] against a JSON document
//! service over HTTP, so the application can swap local storage for a
//! hosted backend without touching the controller.
//!
//! Every call goes through one retry loop:
//!   - transport errors and 5xx responses are retried up to `max_retries`
//!   - 404 means "no such document", not failure
//!   - other 4xx responses fail immediately
//!   - an optional bearer token is attached to every request

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;

pub use client::RemoteStore;
pub use error::RemoteError;
