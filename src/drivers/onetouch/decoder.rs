use std::io::{self, ErrorKind, Read};

use packed_struct::{PackedStruct, PackingError};
use thiserror::Error;

use super::{
    event::{Event, TouchSample},
    serial_report::{TouchDataReport, RELEASE_REPORT, REPORT_MARKER, TOUCH_REPORT_SIZE},
};

/// Errors that stop the decoder
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Transport ended: {0}")]
    TransportEnded(#[from] io::Error),
    #[error("Unable to unpack touch report: {0}")]
    InvalidReport(#[from] PackingError),
}

/// Turns a raw byte stream into [Event]s.
///
/// Bytes outside of a frame are dropped until the next report marker is
/// seen. Once a marker has been read, the rest of the frame must arrive or
/// decoding fails with [DecodeError::TransportEnded]; a partial frame is
/// never turned into an event.
#[derive(Debug)]
pub struct ReportDecoder<R> {
    reader: R,
    skipped_bytes: u64,
}

impl<R: Read> ReportDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            skipped_bytes: 0,
        }
    }

    /// Number of out-of-frame bytes that have been dropped
    pub fn skipped_bytes(&self) -> u64 {
        self.skipped_bytes
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Block until the next complete report is read and decode it
    pub fn next_event(&mut self) -> Result<Event, DecodeError> {
        self.find_marker()?;

        let mut buf = [0; TOUCH_REPORT_SIZE];
        self.reader.read_exact(&mut buf[..2])?;
        if buf[..2] == RELEASE_REPORT {
            return Ok(Event::Release);
        }
        self.reader.read_exact(&mut buf[2..])?;

        let report = TouchDataReport::unpack(&buf)?;
        let sample = TouchSample::from(report);
        if sample.has_flags() {
            log::debug!(
                "Touch report has status flags: {:x} {:x}",
                sample.x_flags,
                sample.y_flags
            );
        }

        Ok(Event::Touch(sample))
    }

    /// Read single bytes until a report marker is found. An idle serial
    /// port times out between touches, so timeouts here just keep waiting.
    fn find_marker(&mut self) -> Result<(), DecodeError> {
        let mut byte = [0; 1];
        loop {
            match self.reader.read_exact(&mut byte) {
                Ok(()) => (),
                Err(e) if e.kind() == ErrorKind::TimedOut => continue,
                Err(e) => return Err(e.into()),
            }
            if byte[0] == REPORT_MARKER {
                return Ok(());
            }
            log::trace!("Dropped out-of-frame byte: {:02x}", byte[0]);
            self.skipped_bytes += 1;
        }
    }
}
