//! Version lookup layer
//!
//! This module fetches raw version information from one source, extracts a
//! comparable version plus auxiliary fields, and maps failures onto two
//! caller-facing kinds (fetch, parse).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Facade    │────▶│   Handler   │────▶│   Source    │
//! │ (HaVersion) │     │(fetch/parse)│     │ (HTTP/file) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │    Sink     │     │Version/Data │
//! │  (records)  │     │  (values)   │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`facade`]: `HaVersion`, the single entry point bound to one handler
//! - [`handler`]: `SourceHandler` trait and shared JSON helpers
//! - [`handlers`]: Docker Hub, PyPI, manifests and local install
//! - [`value`]: Orderable `Version`
//! - [`data`]: `VersionData` auxiliary field map
//! - [`sink`]: Observability sink for resolved versions
//! - [`error`]: Input, fetch and parse error types

pub mod data;
pub mod error;
pub mod facade;
pub mod handler;
pub mod handlers;
pub mod sink;
pub mod value;
