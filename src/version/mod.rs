//! Engine version resolution for clients talking to a data proxy
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ ClientConfig│────▶│  Resolver   │────▶│  Registry   │
//! │ Environment │     │ (decide)    │     │  (lookup)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            ▼                   ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │   Semver    │     │ Registries  │
//!                     │ (classify)  │     │  (unpkg)    │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`resolver`]: Maps a client version onto an engine version
//! - [`registry`]: Registry trait for looking up published versions
//! - [`registries`]: Concrete registry implementations (unpkg)
//! - [`error`]: Error types for resolution and registry lookups
//! - [`semver`]: Version classification and range helpers

pub mod error;
pub mod registries;
pub mod registry;
pub mod resolver;
pub mod semver;
