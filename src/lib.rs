//! Placemark, a personal bookmark manager for saved places.
//!
//! This library crate exposes all modules for use by the server binary and
//! integration tests. The same CRUD contract is served three ways: a SQLite
//! store behind a REST API, a remote client for that API, and a local-only
//! store mirrored to a JSON file.

pub mod app;
pub mod database;
pub mod http;
pub mod query;
pub mod services;
pub mod stores;
pub mod types;
