use super::serial_report::TouchDataReport;

/// Events that can be decoded from the OneTouch report stream
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Touch(TouchSample),
    Release,
}

/// A single decoded touch position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TouchSample {
    pub x: u16,
    pub y: u16,
    pub x_flags: u8,
    pub y_flags: u8,
}

impl TouchSample {
    /// Returns true if the panel set any status bits on this sample
    pub fn has_flags(&self) -> bool {
        self.x_flags != 0 || self.y_flags != 0
    }
}

impl From<TouchDataReport> for TouchSample {
    fn from(report: TouchDataReport) -> Self {
        Self {
            x: report.x_position(),
            y: report.y_position(),
            x_flags: report.x_flags(),
            y_flags: report.y_flags(),
        }
    }
}

/// Actions for the pointer device, produced by a [crate::drivers::onetouch::session::DragSession]
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Move the pointer to the given calibrated coordinates
    MoveTo { x: i32, y: i32 },
    ButtonDown,
    ButtonUp,
    Diagnostic(Diagnostic),
}

/// Observability events. These never affect pointer state.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// A sample arrived with non-zero status bits
    FlagBits { x_flags: u8, y_flags: u8 },
    /// A touch was released. Duration is in seconds.
    SessionEnded {
        samples: u32,
        duration: f64,
        sample_rate: f64,
    },
}
