//! # parcel-gateway
//!
//! REST gateway over shipment tracking data: per-user bookmarks, the
//! paid/delivered archive, and personal-rate pricing.
//!
//! The core of the service is bookmark reconciliation — matching
//! loosely-linked bookmark records to canonical track records, fixing up
//! stale or missing links, and computing display fields per requesting
//! user. Account management, status-update ingestion, and authentication
//! live elsewhere.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── BookmarkService (service/)
//!     │
//!     ├── Domain model (domain/)
//!     │
//!     └── BookmarkStore (persistence/) — PostgreSQL or in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
