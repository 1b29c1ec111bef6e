//! Circle: a minimal todo application split into an axum REST API, a
//! reqwest-backed remote store client, and the view controllers that keep
//! browser state synchronized with the server under optimistic updates.

pub mod controllers;
pub mod error;
pub mod models;
pub mod remote;
pub mod repository;
pub mod routes;
pub mod state;
