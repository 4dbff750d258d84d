use std::{error::Error, io::Read, time::Duration};

use serialport::{DataBits, FlowControl, Parity, StopBits, TTYPort};

use crate::config::Config;

use super::{
    calibration::{CalibrationBounds, Calibrator},
    clock::{Clock, MonotonicClock},
    decoder::{DecodeError, ReportDecoder},
    event::Action,
    filter::NoiseFilter,
    session::{DragSession, Session},
    BAUD_RATE,
};

/// Reads OneTouch reports from a byte source and turns them into pointer
/// [Action]s.
#[derive(Debug)]
pub struct Driver<R = TTYPort, C: Clock = MonotonicClock> {
    decoder: ReportDecoder<R>,
    session: DragSession<C>,
}

impl Driver<TTYPort, MonotonicClock> {
    /// Open the serial port at the given device node
    pub fn new(devnode: &str, config: &Config) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let port = serialport::new(devnode, BAUD_RATE)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(Duration::from_millis(config.timeout_ms));
        let port = TTYPort::open(&port)?;

        log::info!("Started OneTouch TTY Driver on {devnode}");
        Ok(Self::from_reader(port, config, MonotonicClock::default()))
    }
}

impl<R: Read, C: Clock> Driver<R, C> {
    /// Create a driver over any byte source, e.g. a capture file
    pub fn from_reader(reader: R, config: &Config, clock: C) -> Self {
        let filter = NoiseFilter::new(config.filter);
        let bounds = config.calibration.unwrap_or_default();
        let calibrator = Calibrator::new(config.target, bounds);
        let session = DragSession::new(Session::new(filter, calibrator), clock);

        Self {
            decoder: ReportDecoder::new(reader),
            session,
        }
    }

    /// Block until the next report is read and return the actions it produced
    pub fn poll(&mut self) -> Result<Vec<Action>, DecodeError> {
        let event = self.decoder.next_event()?;
        log::trace!("Got event: {event:?}");
        Ok(self.session.handle_event(event))
    }

    /// Current calibration bounds
    pub fn calibration(&self) -> CalibrationBounds {
        self.session.calibration()
    }

    pub fn session(&self) -> &Session {
        self.session.session()
    }

    pub fn skipped_bytes(&self) -> u64 {
        self.decoder.skipped_bytes()
    }
}
