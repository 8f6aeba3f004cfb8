//! Dependency digest: latest versions, release notes and vulnerability status for npm packages
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Input    │────▶│  Pipeline   │────▶│   Output    │
//! │ (JSON map)  │     │  (enrich)   │     │(json / html)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!          ┌─────────────────┼─────────────────┐
//!          ▼                 ▼                 ▼
//!   ┌─────────────┐   ┌─────────────┐   ┌─────────────┐
//!   │  Registry   │   │  Changelog  │   │Vulnerability│
//!   │   (npm)     │   │  (GitHub)   │   │  (static)   │
//!   └─────────────┘   └─────────────┘   └─────────────┘
//! ```

pub mod changelog;
pub mod config;
pub mod error;
pub mod input;
pub mod markdown;
pub mod output;
pub mod pipeline;
pub mod registry;
pub mod types;
pub mod version;
pub mod vulnerability;
