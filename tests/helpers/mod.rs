//! Test helpers module
//!
//! This module provides utilities and helpers for testing the Campus Connect
//! data layer: a mock HTTP fixture server, recorded bus traffic and a unified
//! test context.

pub mod fixture_mock;
pub mod test_context;
pub mod test_data;

#[allow(unused_imports)]
pub use fixture_mock::*;
#[allow(unused_imports)]
pub use test_context::*;
#[allow(unused_imports)]
pub use test_data::*;
