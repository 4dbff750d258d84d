use std::time::Duration;

use super::{
    calibration::{CalibrationBounds, Calibrator},
    clock::{Clock, MonotonicClock},
    event::{Action, Diagnostic, Event, TouchSample},
    filter::NoiseFilter,
};

/// Where the session is in the touch lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// No active touch
    #[default]
    Idle,
    /// Samples are arriving. `button_down` is set once the first filtered
    /// point has been emitted.
    Touching {
        start_time: Duration,
        button_down: bool,
    },
}

/// Complete state of the touch pipeline as a plain value. Every event is
/// applied with [Session::transition], which consumes the old state and
/// returns the new one along with the actions it produced.
#[derive(Debug, Clone, Default)]
pub struct Session {
    phase: Phase,
    filter: NoiseFilter,
    calibrator: Calibrator,
}

impl Session {
    pub fn new(filter: NoiseFilter, calibrator: Calibrator) -> Self {
        Self {
            phase: Phase::Idle,
            filter,
            calibrator,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn filter(&self) -> &NoiseFilter {
        &self.filter
    }

    pub fn calibrator(&self) -> &Calibrator {
        &self.calibrator
    }

    /// Returns true if a button press has been signaled and not yet released
    pub fn is_button_down(&self) -> bool {
        matches!(
            self.phase,
            Phase::Touching {
                button_down: true,
                ..
            }
        )
    }

    /// Apply an event that happened at `now`
    pub fn transition(mut self, event: Event, now: Duration) -> (Self, Vec<Action>) {
        let mut actions = Vec::new();
        match (self.phase, event) {
            (Phase::Idle, Event::Touch(sample)) => {
                log::debug!("Touch started");
                self.filter.reset();
                self.phase = Phase::Touching {
                    start_time: now,
                    button_down: false,
                };
                self.handle_sample(&sample, &mut actions);
            }
            (Phase::Touching { .. }, Event::Touch(sample)) => {
                self.handle_sample(&sample, &mut actions);
            }
            (
                Phase::Touching {
                    start_time,
                    button_down,
                },
                Event::Release,
            ) => {
                let samples = self.filter.sample_count();
                if samples > 0 {
                    let duration = now.saturating_sub(start_time).as_secs_f64();
                    let sample_rate = if duration > 0.0 {
                        samples as f64 / duration
                    } else {
                        0.0
                    };
                    log::debug!(
                        "Released {duration:.3}s later ({sample_rate:.3} reports/s)"
                    );
                    actions.push(Action::Diagnostic(Diagnostic::SessionEnded {
                        samples,
                        duration,
                        sample_rate,
                    }));
                }
                if button_down {
                    actions.push(Action::ButtonUp);
                }
                self.filter.reset();
                self.phase = Phase::Idle;
            }
            (Phase::Idle, Event::Release) => {
                log::trace!("Ignoring release while idle");
            }
        }

        (self, actions)
    }

    /// Run a sample through the filter and calibrator
    fn handle_sample(&mut self, sample: &TouchSample, actions: &mut Vec<Action>) {
        if sample.has_flags() {
            actions.push(Action::Diagnostic(Diagnostic::FlagBits {
                x_flags: sample.x_flags,
                y_flags: sample.y_flags,
            }));
        }

        for point in self.filter.push(sample) {
            let Some((x, y)) = self.calibrator.calibrate(point) else {
                continue;
            };
            actions.push(Action::MoveTo { x, y });
            if let Phase::Touching { button_down, .. } = &mut self.phase {
                if !*button_down {
                    actions.push(Action::ButtonDown);
                    *button_down = true;
                }
            }
        }
    }
}

/// Ties a [Session] to a [Clock] so events can be timestamped as they are
/// handled.
///
/// A [DragSession] is meant to be driven by a single consumer. It is not
/// safe to drive the same instance from more than one thread concurrently.
#[derive(Debug)]
pub struct DragSession<C: Clock = MonotonicClock> {
    session: Session,
    clock: C,
}

impl<C: Clock> DragSession<C> {
    pub fn new(session: Session, clock: C) -> Self {
        Self { session, clock }
    }

    /// Timestamp the event and apply it to the session
    pub fn handle_event(&mut self, event: Event) -> Vec<Action> {
        let now = self.clock.now();
        let session = std::mem::take(&mut self.session);
        let (session, actions) = session.transition(event, now);
        self.session = session;
        actions
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current calibration, which outlives individual touches
    pub fn calibration(&self) -> CalibrationBounds {
        self.session.calibrator.bounds()
    }
}
