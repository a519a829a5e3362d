//! Request middleware.
//!
//! Purpose: request lifecycle concerns that wrap every route, currently the
//! per-request trace identifier.

pub mod trace;

pub use trace::Trace;
