//! German Credit risk scoring: the label/code tables, the request and
//! response types, a candle-backed tabular engine and the axum service that
//! exposes it, plus the client pieces the form front end uses.

pub mod client;
pub mod config;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod form;
pub mod interpret;
pub mod server;
pub mod tabular_engine;
pub mod types;
pub mod validation;
