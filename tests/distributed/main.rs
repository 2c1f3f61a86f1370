//! Distributed lock integration tests.
//!
//! Runs the lock against the in-memory store (always) and a live Redis
//! server (feature `redis`, skipped when no server answers):
//! - Acquire / contend / release scenarios
//! - Token ownership on release
//! - Expiry reclaim
//! - Transport faults passed through verbatim

mod support;
