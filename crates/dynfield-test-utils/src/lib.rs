//! Test utilities and mock types for dynfield development.
//!
//! Provides a [`Fixture`] bundling a string table with a shared entry pool,
//! a [`MockObject`] implementing [`StaticFields`](dynfield_core::StaticFields), and [`capture_logs`] for
//! asserting on `tracing` output.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{capture_logs, Fixture, MockObject};
