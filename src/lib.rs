// Library exports for Folio
// This allows integration tests and external code to use Folio modules

pub mod auth;
pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod extractors;
pub mod kv;
pub mod routes;
pub mod state;
pub mod store;
pub mod uploads;
