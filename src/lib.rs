#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
/*!
 * # sigmaview
 * _rulers and color gradients for seismic event maps_.
 *
 * This crate holds the numerical core shared by the map canvas and the styling panel
 * of the sigmaview desktop viewer:
 *  - an adaptive axis ruler engine ([`axis`], [`ruler`]) that turns a world range and a pixel
 *    density into legible `{1, 2, 5}×10ⁿ` tick marks,
 *  - a multi-stop color gradient engine ([`scheme`], [`gradient`]) that maps a scalar value
 *    (e.g. the energy of a seismic event) to a color,
 *  - an interactive stop editing model ([`editor`]) with pixel/world hit-testing
 *    and an explicit drag gesture state machine.
 *
 * Everything here is synchronous and single-threaded. The hosting views own the
 * [`ruler::Ruler`] and [`scheme::ColorScheme`] instances, mutate them from their UI
 * callbacks and ask for a repaint at the next frame.
 *
 * Drawing goes through the [`render::Surface`] trait, implemented in separate crates
 * (`sigmaview-pxl`, `sigmaview-svg`) and by the in-memory [`render::Recorder`].
 *
 * ```
 * use sigmaview::{ruler, scheme, render};
 *
 * let mut hz = ruler::Ruler::new(ruler::RulerConfig::horizontal()).unwrap();
 * hz.set_scale(20.0, false).unwrap();
 * hz.set_offset(-3.0, true);
 * assert_eq!(hz.config().factor(), 5.0);
 *
 * let levels = scheme::ColorScheme::default();
 * let c = levels.get_color_at(50.0, scheme::Interpolation::Linear);
 * assert_eq!(c.rgb(), [128, 0, 128]);
 *
 * let mut rec = render::Recorder::new();
 * hz.paint(&mut rec, &sigmaview::geom::Rect::from_xywh(0.0, 0.0, 400.0, 20.0), &Default::default());
 * assert!(!hz.needs_redraw());
 * ```
 */
// Sigmaview is released under the MIT License.

use std::{fmt, io};

pub mod axis;
pub mod editor;
pub mod gradient;
pub mod marker;
pub mod render;
pub mod ruler;
pub mod scheme;
pub mod settings;
pub mod viewport;

/// Rexports of [`sigmaview_base::color`]` items
pub mod color {
    pub use sigmaview_base::color::*;
}
pub use color::ColorU8;

/// Rexports of [`sigmaview_base::geom`]` items
pub mod geom {
    pub use sigmaview_base::geom::*;
}

/// Errors raised by the ruler and color scheme engines
#[derive(Debug)]
pub enum Error {
    /// Pixels per unit must be finite and strictly positive
    InvalidScale(f64),
    /// Tick threshold must be finite and strictly positive
    InvalidThreshold(f64),
    /// Major tick spacing must be finite and strictly positive
    InvalidFactor(f64),
    /// Exponent threshold must be finite and strictly positive
    InvalidExponentThreshold(f64),
    /// A ruler needs at least one minor division per major tick
    InvalidMinorDivisions(u32),
    /// Interpolation mode code or name is not known
    UnknownInterpolation(String),
    /// Interop color map length is not a multiple of 4
    InvalidInteropLength(usize),
    /// A stop index does not refer to an existing stop
    StopIndexOutOfRange(usize),
    /// Color stop positions must be finite
    InvalidPosition(f64),
    /// Marker radius is derived from `ln(energy)` and needs energy > 1
    InvalidEnergy(f64),
    /// Persisted color scheme could not be parsed
    Parse(scheme::ParseError),
    /// Settings file could not be (de)serialized
    Settings(serde_json::Error),
    /// Read or write failure
    Io(io::Error),
}

impl From<scheme::ParseError> for Error {
    fn from(err: scheme::ParseError) -> Self {
        Error::Parse(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidScale(v) => write!(f, "Invalid scale: {} pixels per unit", v),
            Error::InvalidThreshold(v) => write!(f, "Invalid tick threshold: {}", v),
            Error::InvalidFactor(v) => write!(f, "Invalid tick factor: {}", v),
            Error::InvalidExponentThreshold(v) => write!(f, "Invalid exponent threshold: {}", v),
            Error::InvalidMinorDivisions(n) => write!(f, "Invalid minor divisions: {}", n),
            Error::UnknownInterpolation(mode) => write!(f, "Unknown interpolation mode: {}", mode),
            Error::InvalidInteropLength(len) => {
                write!(f, "Interop color map length must be a multiple of 4, got {}", len)
            }
            Error::StopIndexOutOfRange(idx) => write!(f, "No color stop at index {}", idx),
            Error::InvalidPosition(pos) => write!(f, "Invalid color stop position: {}", pos),
            Error::InvalidEnergy(e) => write!(f, "Invalid event energy: {}", e),
            Error::Parse(err) => err.fmt(f),
            Error::Settings(err) => write!(f, "Settings error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Settings(err) => Some(err),
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// Module containing magic values that would require proper parameters
mod params {
    /// Distance in pixels within which a pointer grabs a stop handle
    pub const HIT_TOLERANCE: f32 = 5.0;
    /// Distance in pixels the pointer must travel before a press becomes a drag
    pub const DRAG_DEADZONE: f32 = 2.0;
    /// Side of the square stop handle
    pub const HANDLE_SIZE: f32 = 10.0;
    /// Gap between a major tick line and its label
    pub const LABEL_MARGIN: f32 = 2.0;
    /// Changes of scale smaller than this do not recompute the tick factor
    pub const SCALE_EPSILON: f64 = 0.00001;
    /// Scale between event radius and `ln(energy)`
    pub const MARKER_RADIUS_SCALE: f64 = 5.0;
    /// Vertical gap between an event marker and its label, in world units
    pub const MARKER_LABEL_GAP: f32 = 8.0;
    /// Height of event labels, in world units
    pub const MARKER_LABEL_HEIGHT: f32 = 16.0;
}
