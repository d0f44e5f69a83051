//! # hydration-tracker
//!
//! REST API backend for a hydration-tracking application.
//!
//! Users log physical activity and drinks. The service estimates sweat loss
//! per activity, derives a personal baseline goal from weight, age and
//! fragility, and keeps a per-day goal record whose target, intake and
//! completion flag are recomputed on every change.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── Bearer auth middleware (auth/)
//!     │
//!     ├── Services (service/)
//!     ├── Formula engine (hydration/)
//!     │
//!     └── Store (persistence/): PostgreSQL or in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod hydration;
pub mod persistence;
pub mod service;
