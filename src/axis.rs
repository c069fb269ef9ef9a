//! Axis scale engine: tick spacing, tick positions and tick labels for a 1-D ruler.
//!
//! Major ticks are spaced by a *factor* taken from the `{1, 2, 5}×10ⁿ` family,
//! chosen so that two consecutive major ticks are at least `threshold` pixels apart.
//! Everything here is a pure function of its arguments.

use std::fmt;

use crate::Error;

/// Mantissas of the tick factor family
pub const FACTOR_STEPS: [f64; 3] = [1.0, 2.0, 5.0];

/// Upper bound of the minor divisions between two major ticks
pub const MAX_MINOR_DIVISIONS: u32 = 100;

/// Upper bound of the ticks generated for a single ruler
const MAX_TICKS: u64 = 1_000_000;

/// Relative tolerance under which a value is considered to be a member of the family
const FAMILY_EPS: f64 = 1e-9;

/// Walks the `{1, 2, 5}×10ⁿ` family with an integer exponent,
/// so that the produced values never accumulate floating point drift.
#[derive(Debug, Clone, Copy)]
struct FactorStepper {
    idx: usize,
    exp: i32,
}

impl FactorStepper {
    fn new(exp: i32) -> Self {
        FactorStepper { idx: 0, exp }
    }

    fn value(&self) -> f64 {
        FACTOR_STEPS[self.idx] * pow10(self.exp)
    }

    fn smaller(&self) -> Self {
        let mut s = *self;
        s.next_smaller();
        s
    }

    fn next_smaller(&mut self) {
        if self.idx == 0 {
            self.idx = FACTOR_STEPS.len();
            self.exp -= 1;
        }
        self.idx -= 1;
    }

    fn next_bigger(&mut self) {
        self.idx += 1;
        if self.idx == FACTOR_STEPS.len() {
            self.idx = 0;
            self.exp += 1;
        }
    }
}

/// 10 to the power `exp`, correctly rounded for negative exponents
fn pow10(exp: i32) -> f64 {
    if exp >= 0 {
        10f64.powi(exp)
    } else {
        1.0 / 10f64.powi(-exp)
    }
}

/// Split a strictly positive value into a mantissa in `[1, 10)` and a decimal exponent
fn decompose(x: f64) -> (f64, i32) {
    let mut exp = x.log10().floor() as i32;
    let mut mantissa = x / pow10(exp);
    // log10 can be off by one ulp around powers of ten
    if mantissa >= 10.0 {
        exp += 1;
        mantissa = x / pow10(exp);
    } else if mantissa < 1.0 {
        exp -= 1;
        mantissa = x / pow10(exp);
    }
    (mantissa, exp)
}

/// The smallest member of the `{1, 2, 5}×10ⁿ` family strictly greater than `x`.
///
/// `x` must be finite and strictly positive.
pub fn next_factor(x: f64) -> f64 {
    let (mantissa, exp) = decompose(x);
    for step in FACTOR_STEPS {
        if mantissa < step * (1.0 - FAMILY_EPS) {
            return step * pow10(exp);
        }
    }
    pow10(exp + 1)
}

/// The largest member of the `{1, 2, 5}×10ⁿ` family strictly smaller than `x`.
///
/// `x` must be finite and strictly positive.
pub fn prev_factor(x: f64) -> f64 {
    let (mantissa, exp) = decompose(x);
    for step in FACTOR_STEPS.iter().rev() {
        if mantissa > step * (1.0 + FAMILY_EPS) {
            return step * pow10(exp);
        }
    }
    FACTOR_STEPS[FACTOR_STEPS.len() - 1] * pow10(exp - 1)
}

/// Compute the major tick spacing, in world units, for the given scale.
///
/// The result is the smallest member of the `{1, 2, 5}×10ⁿ` family whose
/// pixel spacing `factor * pixels_per_unit` is at least `threshold`.
pub fn compute_factor(pixels_per_unit: f64, threshold: f64) -> Result<f64, Error> {
    if !pixels_per_unit.is_finite() || pixels_per_unit <= 0.0 {
        return Err(Error::InvalidScale(pixels_per_unit));
    }
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(Error::InvalidThreshold(threshold));
    }

    let target = threshold / pixels_per_unit;
    if !target.is_normal() {
        return Err(Error::InvalidScale(pixels_per_unit));
    }

    // start in the right decade and then settle on the exact member
    let mut stepper = FactorStepper::new(target.log10().floor() as i32);
    while stepper.smaller().value() * pixels_per_unit >= threshold {
        stepper.next_smaller();
    }
    while stepper.value() * pixels_per_unit < threshold {
        stepper.next_bigger();
    }

    let factor = stepper.value();
    if !factor.is_finite() || factor <= 0.0 {
        return Err(Error::InvalidScale(pixels_per_unit));
    }
    log::trace!(
        "tick factor {} for {} px/unit (threshold {} px)",
        factor,
        pixels_per_unit,
        threshold
    );
    Ok(factor)
}

/// A tick mark along an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// World value of the tick, snapped to a multiple of its spacing
    pub value: f64,
    /// Pixel position along the axis, before inversion
    pub pixel: f64,
    /// Whether this is a major (labeled) tick
    pub major: bool,
}

fn snap(value: f64, step: f64) -> f64 {
    // adding zero turns -0.0 into 0.0
    (value / step).round() * step + 0.0
}

/// Generate the ticks covering pixels `0` to `visible_pixels`.
///
/// `offset` is the world value added before scaling, such that a world value `v`
/// lands at pixel `(v + offset) * pixels_per_unit`.
/// The returned ticks are sorted by pixel position.
/// Minor ticks that coincide with a major tick are not emitted.
/// No ticks are produced when the offset or spacing cannot be represented in pixels.
pub fn generate_ticks(
    offset: f64,
    pixels_per_unit: f64,
    factor: f64,
    visible_pixels: f64,
    minor_divisions: u32,
) -> Result<Vec<Tick>, Error> {
    if !pixels_per_unit.is_finite() || pixels_per_unit <= 0.0 {
        return Err(Error::InvalidScale(pixels_per_unit));
    }
    if !factor.is_finite() || factor <= 0.0 {
        return Err(Error::InvalidFactor(factor));
    }
    if minor_divisions == 0 {
        return Err(Error::InvalidMinorDivisions(minor_divisions));
    }
    if minor_divisions > MAX_MINOR_DIVISIONS {
        return Err(Error::InvalidMinorDivisions(minor_divisions));
    }
    if !(visible_pixels > 0.0) || !visible_pixels.is_finite() || !offset.is_finite() {
        return Ok(Vec::new());
    }

    let pix_offset = offset * pixels_per_unit;
    let step = factor * pixels_per_unit;
    if !pix_offset.is_finite() || !step.is_normal() {
        log::debug!(
            "no ticks for offset {} at {} px/unit and factor {}",
            offset,
            pixels_per_unit,
            factor
        );
        return Ok(Vec::new());
    }

    let mut start = pix_offset.rem_euclid(step);
    if offset < 0.0 {
        start -= step;
    }
    if !start.is_finite() {
        return Ok(Vec::new());
    }

    let max_majors = (visible_pixels / step).ceil() + 2.0;
    if max_majors * minor_divisions as f64 > MAX_TICKS as f64 {
        return Err(Error::InvalidFactor(factor));
    }
    let max_majors = max_majors as u64;

    let mut ticks = Vec::new();

    for k in 0..max_majors {
        let pixel = start + k as f64 * step;
        if pixel >= visible_pixels {
            break;
        }
        ticks.push(Tick {
            value: snap((pixel - pix_offset) / pixels_per_unit, factor),
            pixel,
            major: true,
        });
    }

    let divs = minor_divisions as u64;
    if divs > 1 {
        let minor_step = step / divs as f64;
        let minor_factor = factor / divs as f64;
        let base = start - step;
        let lowest = start.min(0.0);
        for m in 1..(max_majors + 1) * divs {
            let pixel = base + m as f64 * minor_step;
            if pixel >= visible_pixels {
                break;
            }
            if m % divs != 0 && pixel >= lowest {
                ticks.push(Tick {
                    value: snap((pixel - pix_offset) / pixels_per_unit, minor_factor),
                    pixel,
                    major: false,
                });
            }
        }
    }

    ticks.sort_by(|a, b| a.pixel.total_cmp(&b.pixel));
    Ok(ticks)
}

/// Orientation of a ruler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Ruler laid out along the X axis
    #[default]
    Horizontal,
    /// Ruler laid out along the Y axis
    Vertical,
}

/// Orientation and inversion of a ruler.
///
/// The four combinations share one mapping rule from tick pixel
/// to position along the ruler's long axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Direction {
    /// Ruler orientation
    pub orientation: Orientation,
    /// Whether pixels are counted from the far end
    pub inverted: bool,
}

impl Direction {
    /// Map a tick pixel to a position along a ruler of the given length
    pub fn map(&self, pixel: f64, length: f64) -> f64 {
        if self.inverted { length - pixel } else { pixel }
    }

    /// Whether labels are rotated by 90°
    pub fn rotates_labels(&self) -> bool {
        self.orientation == Orientation::Vertical
    }
}

/// A formatted axis label: a mantissa and an optional power of ten
/// drawn as a smaller raised glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickLabel {
    mantissa: String,
    exponent: Option<i32>,
}

impl TickLabel {
    /// A label without exponent
    pub fn plain(text: impl Into<String>) -> Self {
        TickLabel {
            mantissa: text.into(),
            exponent: None,
        }
    }

    /// A label drawn as `mantissa⋅10^exponent`
    pub fn scientific(mantissa: impl Into<String>, exponent: i32) -> Self {
        TickLabel {
            mantissa: mantissa.into(),
            exponent: Some(exponent),
        }
    }

    /// The mantissa text
    pub fn mantissa(&self) -> &str {
        &self.mantissa
    }

    /// The power of ten, if any
    pub fn exponent(&self) -> Option<i32> {
        self.exponent
    }

    /// Text drawn at the main font size: the mantissa, followed by `⋅10` when scientific
    pub fn base_text(&self) -> String {
        match self.exponent {
            Some(_) => format!("{}\u{22c5}10", self.mantissa),
            None => self.mantissa.clone(),
        }
    }

    /// Text drawn as superscript, if any
    pub fn sup_text(&self) -> Option<String> {
        self.exponent.map(|e| e.to_string())
    }
}

impl fmt::Display for TickLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.exponent {
            Some(e) => write!(f, "{}\u{22c5}10^{}", self.mantissa, e),
            None => f.write_str(&self.mantissa),
        }
    }
}

/// Strip trailing zeros, then a trailing decimal point
pub(crate) fn trim_decimals(mut s: String) -> String {
    if s.contains('.') {
        let len = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(len);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Format a tick value.
///
/// Values whose magnitude reaches `exponent_threshold` are written in scientific form
/// with up to 5 mantissa decimals. Other values get the number of decimals implied
/// by the tick spacing `factor`, trailing zeros stripped.
pub fn format_tick_label(value: f64, factor: f64, exponent_threshold: f64) -> TickLabel {
    if value.is_finite() && value.abs() >= exponent_threshold {
        let mut mantissa = value;
        let mut exp = 0;
        while mantissa.abs() >= 10.0 {
            mantissa /= 10.0;
            exp += 1;
        }
        let mut text = format!("{:.5}", mantissa);
        // rounding to 5 decimals can carry up to the next decade
        if text.trim_start_matches('-').starts_with("10") {
            mantissa /= 10.0;
            exp += 1;
            text = format!("{:.5}", mantissa);
        }
        return TickLabel::scientific(trim_decimals(text), exp);
    }

    let decimals = if factor > 0.0 && factor < 1.0 {
        (-factor.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    TickLabel::plain(trim_decimals(format!("{:.*}", decimals, value)))
}
