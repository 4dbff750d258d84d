//! Driver for the Ingenious Technology "OneTouch" transparent resistive
//! touchscreen overlay.
//!
//! The panel streams 3 or 5 byte reports at 19200 8N1:
//!
//!   0xFF 0xFE 0xFE    - touch released (also sent alone on short taps)
//!   0xFF X0 X1 Y0 Y1  - X and Y as little-endian u16, position in the high 10 bits
//!
//! Position noise is heavy at the start and end of each touch, so samples
//! are filtered before they become pointer motion, and the usable panel
//! area is learned from the extent of the averaged positions.
pub mod calibration;
pub mod clock;
pub mod decoder;
pub mod driver;
pub mod event;
pub mod filter;
pub mod serial_report;
pub mod session;

#[cfg(test)]
pub mod decoder_test;

/// Serial link speed of the panel
pub const BAUD_RATE: u32 = 19_200;
/// Default read timeout in milliseconds for the serial port
pub const TTY_TIMEOUT: u64 = 1000;
/// The panel reports at 200Hz while touched
pub const REPORT_RATE_HZ: u32 = 200;

/// Default number of samples dropped at the start of a touch
pub const DISCARD_START: u32 = 4;
/// Default number of samples averaged into one pointer position
pub const AVG_COUNT: usize = 6;
/// Default number of trailing samples that are never output
pub const DISCARD_END: usize = 4;

/// Default output range for the panel X axis
pub const TARGET_HEIGHT: u32 = 1280;
/// Default output range for the panel Y axis
pub const TARGET_WIDTH: u32 = 1024;
