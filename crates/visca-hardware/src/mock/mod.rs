//! Mock transport implementations for testing and development.
//!
//! This module provides an in-memory line that can be controlled
//! programmatically without a camera attached.

pub mod transport;

pub use transport::{MockTransport, MockTransportHandle};
