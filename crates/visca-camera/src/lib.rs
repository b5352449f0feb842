//! VISCA camera sessions.
//!
//! This crate ties the codec and the transport together:
//!
//! - [`TransactionEngine`]: writes frames, polls for replies, filters by
//!   address and resolves or times out
//! - [`Camera`]: typed get/set accessors for one camera on a line
//! - [`SessionConfig`] / [`CameraConfig`]: timing and per-camera settings
//!
//! ```no_run
//! use visca_camera::{Camera, CameraConfig};
//! use visca_hardware::{SerialConfig, SerialTransport};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let port = SerialTransport::open(SerialConfig::new("/dev/ttyUSB0"))?;
//!     let mut camera = Camera::new(port, CameraConfig::default());
//!
//!     camera.set_power(true)?;
//!     println!("position: {}", camera.get_pan_tilt()?);
//!     Ok(())
//! }
//! ```

pub mod camera;
pub mod config;
pub mod decode;
pub mod engine;
pub mod error;

pub use camera::Camera;
pub use config::{CameraConfig, SessionConfig};
pub use engine::TransactionEngine;
pub use error::{CameraError, Result};
