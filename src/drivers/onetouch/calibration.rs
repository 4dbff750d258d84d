use serde::{Deserialize, Serialize};

use super::{filter::Point, TARGET_HEIGHT, TARGET_WIDTH};

/// Offset added to the first max bound so the initial span is never zero
pub const CALIBRATION_EPSILON: f64 = 0.1;

/// Output coordinate space. Panel X is scaled into `height` and panel Y
/// into `width` because of how the overlay is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TargetArea {
    pub height: u32,
    pub width: u32,
}

impl Default for TargetArea {
    fn default() -> Self {
        Self {
            height: TARGET_HEIGHT,
            width: TARGET_WIDTH,
        }
    }
}

/// Observed extent of averaged panel positions. The bounds only ever grow:
/// `min` never increases and `max` never decreases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CalibrationBounds {
    pub min: Option<Point>,
    pub max: Option<Point>,
}

impl CalibrationBounds {
    pub fn new(min: Point, max: Point) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Widen the bounds to include the given point
    pub fn update(&mut self, point: Point) {
        self.min = Some(match self.min {
            Some(min) => Point::new(min.x.min(point.x), min.y.min(point.y)),
            None => point,
        });
        self.max = Some(match self.max {
            Some(max) => Point::new(max.x.max(point.x), max.y.max(point.y)),
            None => Point::new(point.x + CALIBRATION_EPSILON, point.y + CALIBRATION_EPSILON),
        });
    }

    /// Returns true once both bounds have been observed
    pub fn is_set(&self) -> bool {
        self.min.is_some() && self.max.is_some()
    }
}

/// Maps averaged panel positions into the [TargetArea] using the
/// [CalibrationBounds] learned so far.
///
/// The bounds are handed in at construction and carried for the life of
/// the calibrator, across any number of touches. A [Calibrator] must not be
/// shared between threads that drive it concurrently.
#[derive(Debug, Clone, Default)]
pub struct Calibrator {
    target: TargetArea,
    bounds: CalibrationBounds,
}

impl Calibrator {
    pub fn new(target: TargetArea, bounds: CalibrationBounds) -> Self {
        Self { target, bounds }
    }

    pub fn bounds(&self) -> CalibrationBounds {
        self.bounds
    }

    pub fn target(&self) -> TargetArea {
        self.target
    }

    /// Update the bounds with the given point and scale it into the target
    /// area. Returns `None` if the bounds have zero width on either axis.
    pub fn calibrate(&mut self, point: Point) -> Option<(i32, i32)> {
        self.bounds.update(point);
        let (min, max) = (self.bounds.min?, self.bounds.max?);

        let x_span = max.x - min.x;
        let y_span = max.y - min.y;
        if !(x_span > 0.0 && y_span > 0.0) {
            log::debug!("Degenerate calibration bounds: {:?}", self.bounds);
            return None;
        }
        let x_scale = self.target.height as f64 / x_span;
        let y_scale = self.target.width as f64 / y_span;

        let x = scale_axis(point.x - min.x, x_scale, self.target.height);
        let y = scale_axis(point.y - min.y, y_scale, self.target.width);
        Some((x, y))
    }
}

/// Scale an offset and keep the result inside `[0, size)`
fn scale_axis(offset: f64, scale: f64, size: u32) -> i32 {
    let max = size.saturating_sub(1) as f64;
    (offset * scale).round().clamp(0.0, max) as i32
}
