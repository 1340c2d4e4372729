//! Execution context module
//!
//! The [`ExecutionContext`] is the mutable parameter/result bag threaded through
//! every tool invocation.
//!
//! # Namespaces
//!
//! ```text
//! ┌─────────────────────────────┐   ┌─────────────────────────────┐
//! │ parameters                  │   │ results                     │
//! │   "a"     → 5.4             │   │   "Result.add"  → 10.2      │
//! │   "text"  → "Apple"         │   │   "Result.sum"  → 26        │
//! └─────────────────────────────┘   └─────────────────────────────┘
//! ```
//!
//! Parameters and results live in separate maps, so a user parameter can never
//! shadow a tool's stored result. Names starting with [`RESULT_PREFIX`] are
//! always routed to the result map.
//!
//! # Lifecycle
//!
//! A context is created per top-level call, or derived per pipeline stage and
//! per map-reduce element. The core never persists one.

pub mod entities;

pub use entities::{ExecutionContext, INPUT_PREFIX, RESULT_PREFIX, result_key};
