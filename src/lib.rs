// Trip personalization engine.
//
// Ranks trips for a visitor from their declared interests and viewing
// history, keeps a bounded persisted record of viewed trips, and serves the
// result over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
