//! Per-list completion statistics for reporting.
//!
//! # Responsibility
//! - Bucket completed cards by completion date and count overdue work.
//! - Stay read-only: aggregation never mutates entity state.

pub mod aggregate;
