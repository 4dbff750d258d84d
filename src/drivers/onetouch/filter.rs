use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::{event::TouchSample, AVG_COUNT, DISCARD_END, DISCARD_START};

/// An averaged position in panel units
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Tunables for the [NoiseFilter]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FilterConfig {
    /// Samples dropped at the start of every touch
    pub discard_start: u32,
    /// Number of samples averaged into each output point
    pub avg_count: usize,
    /// Samples at the end of every touch that are never output
    pub discard_end: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            discard_start: DISCARD_START,
            avg_count: AVG_COUNT,
            discard_end: DISCARD_END,
        }
    }
}

impl FilterConfig {
    /// Number of buffered samples needed before a point is emitted
    pub fn window(&self) -> usize {
        self.avg_count + self.discard_end
    }
}

/// Removes the unreliable samples at the leading and trailing edges of a
/// touch and smooths the rest with an overlapping moving average.
///
/// The first `discard_start` samples of a touch are dropped outright. After
/// that, samples are buffered and once `avg_count + discard_end` of them are
/// held, the oldest `avg_count` are averaged and the single oldest sample is
/// dropped. Whatever is left in the buffer when the touch is released is
/// thrown away, which hides the trailing noise.
#[derive(Debug, Clone, Default)]
pub struct NoiseFilter {
    config: FilterConfig,
    sample_count: u32,
    fifo: VecDeque<(u16, u16)>,
}

impl NoiseFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            config,
            sample_count: 0,
            fifo: VecDeque::with_capacity(config.window()),
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Number of samples seen since the last reset, including discarded ones
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Number of samples currently held in the buffer
    pub fn buffered(&self) -> usize {
        self.fifo.len()
    }

    /// Feed a sample and return any averaged points it produced
    pub fn push(&mut self, sample: &TouchSample) -> Vec<Point> {
        let mut points = Vec::new();
        self.sample_count = self.sample_count.saturating_add(1);
        if self.sample_count <= self.config.discard_start {
            log::trace!("Discarding leading sample {}", self.sample_count);
            return points;
        }

        self.fifo.push_back((sample.x, sample.y));

        // A zero window would never drain the buffer
        let window = self.config.window().max(1);
        while self.fifo.len() >= window {
            if let Some(point) = self.average() {
                points.push(point);
            }
            self.fifo.pop_front();
        }

        points
    }

    /// Drop all buffered samples and counters
    pub fn reset(&mut self) {
        self.sample_count = 0;
        self.fifo.clear();
    }

    /// Mean of the oldest `avg_count` buffered samples
    fn average(&self) -> Option<Point> {
        let count = self.config.avg_count;
        if count == 0 || self.fifo.len() < count {
            return None;
        }
        let (x_total, y_total) = self
            .fifo
            .iter()
            .take(count)
            .fold((0.0, 0.0), |(x, y), &(sx, sy)| {
                (x + sx as f64, y + sy as f64)
            });

        Some(Point::new(x_total / count as f64, y_total / count as f64))
    }
}
