//! Codec for the Unified Gamepad input protocol.
//!
//! A Unified Gamepad device is self-describing: it advertises its input
//! capabilities (buttons, axes, gyros, touch surfaces) in an input capability
//! report, and every subsequent input data report is laid out exactly as that
//! capability report describes. A consumer can decode any conforming device
//! without per-device knowledge by parsing the capability report into an
//! [InputCapabilityReport](reports::input_capability_report::InputCapabilityReport)
//! and decoding each data report against it.
//!
//! The codec itself is stateless; per-device state (the current capability
//! report and the last decoded frame) belongs to a [session::DeviceSession]
//! owned by the caller. Transport I/O is out of scope for this crate.

pub mod bits;
pub mod capability;
pub mod registry;
pub mod reports;
pub mod session;
pub mod value;
pub mod version;
