//! buildlens — browser-based visualization for build-performance logs.
//!
//! Ingests timestamped build records (per-stage timing and heap-usage
//! measurements plus build configuration metadata), normalizes them into
//! time-series datasets, and serves linked interactive charts with a
//! configuration-diff inspector.
//!
//! The crate is organized around a pure, synchronous pipeline:
//!
//! ```text
//! raw text → repair → parse → (optional) window filter → normalize
//!          → series + extrema → chart rendering / CLI output
//! ```
//!
//! The pipeline itself holds no state; the most recent parse is retained in
//! a [`session::SessionStore`] owned by the hosting surface (web dashboard
//! or CLI) so that a window change re-derives the series without re-reading
//! the original input.

pub mod cli;
pub mod config;
pub mod inspect;
pub mod pipeline;
pub mod record;
pub mod session;
pub mod web;
