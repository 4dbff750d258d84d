use packed_struct::prelude::*;

/// First byte of every report
pub const REPORT_MARKER: u8 = 0xFF;
/// Payload of a release report
pub const RELEASE_REPORT: [u8; 2] = [0xFE, 0xFE];
/// Size of a touch report payload, not counting the marker
pub const TOUCH_REPORT_SIZE: usize = 4;
/// Position lives in the high 10 bits of each axis field
pub const POSITION_SHIFT: u16 = 6;
/// Status flags live in the low 6 bits of each axis field
pub const FLAGS_MASK: u16 = 0x3F;

// Touch Data (marker stripped)
// [40, 1f, 80, 3e] -> x: 125, y: 250, no flags
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq, Eq, Default)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "4")]
pub struct TouchDataReport {
    #[packed_field(bytes = "0..=1", endian = "lsb")]
    pub x: u16,
    #[packed_field(bytes = "2..=3", endian = "lsb")]
    pub y: u16,
}

impl TouchDataReport {
    /// Build a report from panel positions and status flags
    pub fn new(x_position: u16, y_position: u16, x_flags: u8, y_flags: u8) -> Self {
        Self {
            x: (x_position << POSITION_SHIFT) | (x_flags as u16 & FLAGS_MASK),
            y: (y_position << POSITION_SHIFT) | (y_flags as u16 & FLAGS_MASK),
        }
    }

    /// Returns the 10-bit X position (0-1023)
    pub fn x_position(&self) -> u16 {
        self.x >> POSITION_SHIFT
    }

    /// Returns the 10-bit Y position (0-1023)
    pub fn y_position(&self) -> u16 {
        self.y >> POSITION_SHIFT
    }

    pub fn x_flags(&self) -> u8 {
        (self.x & FLAGS_MASK) as u8
    }

    pub fn y_flags(&self) -> u8 {
        (self.y & FLAGS_MASK) as u8
    }
}
