//! Core benchmark driver for `restybench`.
//!
//! Starts the server under test, runs the load generator against every case
//! (forwards, then backwards), prints the relevant metric lines and stops
//! the server again.

pub mod driver;
pub mod filter;
pub mod lifecycle;
pub mod loadgen;

pub use driver::Driver;
pub use filter::{filter_lines, is_relevant, RELEVANT_LABELS};
pub use lifecycle::{OpenResty, ServerLifecycle};
pub use loadgen::{ApacheBench, LoadGenerator};
