//! Mock turtle: tracks position and the bounding box of everything visited
//!
//!     Heading is in degrees, 0 pointing up (+y), and grows clockwise:
//!
//!         move(d):   x += d * sin(h),  y += d * cos(h)
//!
//!     The bounding box always contains the origin. State saving and view centering do
//!     nothing here.

use super::backend::TurtleBackend;
use super::compiler::compile_str;
use super::error::TurtleError;
use serde::Serialize;
use std::fmt;

/// Axis-aligned box `(xmin, ymin) .. (xmax, ymax)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Bounds {
    const ORIGIN: Bounds = Bounds {
        xmin: 0.0,
        ymin: 0.0,
        xmax: 0.0,
        ymax: 0.0,
    };

    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.xmin, self.ymin, self.xmax, self.ymax)
    }

    fn include(&mut self, x: f64, y: f64) {
        self.xmin = self.xmin.min(x);
        self.ymin = self.ymin.min(y);
        self.xmax = self.xmax.max(x);
        self.ymax = self.ymax.max(y);
    }

    fn rounded(&self, decimals: u32) -> Bounds {
        Bounds {
            xmin: round_to(self.xmin, decimals),
            ymin: round_to(self.ymin, decimals),
            xmax: round_to(self.xmax, decimals),
            ymax: round_to(self.ymax, decimals),
        }
    }
}

/// Round to `decimals` places. Past the precision of `f64` the value is kept as is.
fn round_to(v: f64, decimals: u32) -> f64 {
    let scale = i32::try_from(decimals).map_or(f64::INFINITY, |d| 10f64.powi(d));
    let scaled = v * scale;
    let r = if scaled.is_finite() {
        scaled.round() / scale
    } else {
        v
    };
    // Keep -0.0 out of printed output.
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X = {} .. {}\nY = {} .. {}",
            self.xmin, self.xmax, self.ymin, self.ymax
        )
    }
}

#[derive(Debug, Clone)]
pub struct MockTurtle {
    x: f64,
    y: f64,
    heading: f64,
    bounds: Bounds,
}

impl Default for MockTurtle {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            heading: 0.0,
            bounds: Bounds::ORIGIN,
        }
    }
}

impl MockTurtle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Heading in degrees, unnormalized.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Bounding box rounded to `decimals` places.
    pub fn bounds(&self, decimals: u32) -> Bounds {
        self.bounds.rounded(decimals)
    }
}

impl TurtleBackend for MockTurtle {
    fn move_forward(&mut self, distance: f64) {
        let rads = self.heading.to_radians();
        let x = self.x + distance * rads.sin();
        let y = self.y + distance * rads.cos();
        self.move_to(x, y);
    }

    fn turn(&mut self, degrees: f64) {
        self.heading += degrees;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        self.bounds.include(x, y);
        log::trace!("mock turtle at ({x:.2}, {y:.2})");
    }

    fn save_state(&mut self) {}

    fn restore_state(&mut self) {}

    fn center_view(&mut self) {}

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Compile turtle source and run it on a fresh [`MockTurtle`]; bounds rounded to 2 places.
pub fn compute_bounds(text: &str) -> Result<Bounds, TurtleError> {
    compute_bounds_with(text, 2)
}

pub fn compute_bounds_with(text: &str, decimals: u32) -> Result<Bounds, TurtleError> {
    let program = compile_str(text)?;
    let mut mock = MockTurtle::new();
    program.run(&mut mock);
    Ok(mock.bounds(decimals))
}
