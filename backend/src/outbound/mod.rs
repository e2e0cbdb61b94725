//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories and document store using
//!   Diesel
//! - **memory**: in-process document store used without a database and in
//!   tests
//! - **geocoding**: Google Maps address lookup over HTTP
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod geocoding;
pub mod memory;
pub mod persistence;
