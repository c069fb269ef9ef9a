//! Color schemes: an ordered list of color stops and the interpolation between them.
//!
//! A [`ColorScheme`] maps a scalar (e.g. the energy of a seismic event) to a color.
//! Stops are kept sorted by position after every public mutation,
//! and their positions are always finite.
//! Schemes are persisted as a JSON array of `[red, green, blue, position]` tuples.

use std::f64::consts::PI;
use std::{fmt, io, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ColorU8, Error, color};

/// A color anchored at a position of the scheme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Color of the stop. Only the RGB channels are used.
    pub color: ColorU8,
    /// Position of the stop, in the scheme value space
    pub position: f64,
}

impl ColorStop {
    /// Build a new color stop. The alpha channel of `color` is dropped.
    pub const fn new(color: ColorU8, position: f64) -> Self {
        ColorStop {
            color: color.without_opacity(),
            position,
        }
    }
}

/// Interpolation policy between two consecutive stops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interpolation {
    /// Linear blend from the lower to the upper stop
    #[default]
    Linear = 0,
    /// Linear blend from the upper to the lower stop
    Reverse = 1,
    /// Cosine eased blend
    Cosine = 2,
    /// Lower stop color over the whole bracket
    FlatStart = 3,
    /// Halfway color over the whole bracket
    FlatMiddle = 4,
    /// Upper stop color over the whole bracket
    FlatEnd = 5,
}

type BlendFn = fn(ColorU8, ColorU8, f64) -> ColorU8;

/// Blend functions, indexed by interpolation code
const BLEND_TABLE: [BlendFn; 6] = [
    blend_linear,
    blend_reverse,
    blend_cosine,
    blend_flat_start,
    blend_flat_middle,
    blend_flat_end,
];

fn blend_linear(c0: ColorU8, c1: ColorU8, ratio: f64) -> ColorU8 {
    mix(c0, c1, ratio)
}

fn blend_reverse(c0: ColorU8, c1: ColorU8, ratio: f64) -> ColorU8 {
    mix(c0, c1, 1.0 - ratio)
}

fn blend_cosine(c0: ColorU8, c1: ColorU8, ratio: f64) -> ColorU8 {
    mix(c0, c1, (1.0 - (ratio * PI).cos()) / 2.0)
}

fn blend_flat_start(c0: ColorU8, _c1: ColorU8, _ratio: f64) -> ColorU8 {
    c0
}

// one constant color per bracket, not a gradient
fn blend_flat_middle(c0: ColorU8, c1: ColorU8, _ratio: f64) -> ColorU8 {
    mix(c0, c1, 0.5)
}

fn blend_flat_end(_c0: ColorU8, c1: ColorU8, _ratio: f64) -> ColorU8 {
    c1
}

const NAMES: [&str; 6] = [
    "linear",
    "reverse",
    "cosine",
    "flat-start",
    "flat-middle",
    "flat-end",
];

/// Blend each RGB channel independently, rounding half away from zero
fn mix(c0: ColorU8, c1: ColorU8, ratio: f64) -> ColorU8 {
    let ch = |a: u8, b: u8| {
        let (a, b) = (a as f64, b as f64);
        (a + ratio * (b - a)).round().clamp(0.0, 255.0) as u8
    };
    ColorU8::from_rgb(
        ch(c0.red(), c1.red()),
        ch(c0.green(), c1.green()),
        ch(c0.blue(), c1.blue()),
    )
}

impl Interpolation {
    /// All interpolation modes, in code order
    pub const ALL: [Interpolation; 6] = [
        Interpolation::Linear,
        Interpolation::Reverse,
        Interpolation::Cosine,
        Interpolation::FlatStart,
        Interpolation::FlatMiddle,
        Interpolation::FlatEnd,
    ];

    /// Numeric code of the mode
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Name of the mode, as used in settings files
    pub const fn name(self) -> &'static str {
        NAMES[self as usize]
    }

    /// Color between `c0` and `c1` at `ratio` in `[0, 1]` of the bracket
    pub fn blend(self, c0: ColorU8, c1: ColorU8, ratio: f64) -> ColorU8 {
        BLEND_TABLE[self as usize](c0, c1, ratio)
    }
}

impl TryFrom<u8> for Interpolation {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Interpolation::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| Error::UnknownInterpolation(code.to_string()))
    }
}

impl FromStr for Interpolation {
    type Err = Error;

    /// Parse a mode from its name or its numeric code
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(idx) = NAMES.iter().position(|n| n.eq_ignore_ascii_case(s)) {
            return Ok(Interpolation::ALL[idx]);
        }
        match s.parse::<u8>() {
            Ok(code) => Interpolation::try_from(code),
            Err(_) => Err(Error::UnknownInterpolation(s.to_string())),
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error raised when a persisted color scheme cannot be parsed
#[derive(Debug)]
pub struct ParseError(serde_json::Error);

impl ParseError {
    /// Line of the error, starting at 1
    pub fn line(&self) -> usize {
        self.0.line()
    }

    /// Column of the error, starting at 1
    pub fn column(&self) -> usize {
        self.0.column()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid color scheme: {}", self.0)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Ordered list of color stops
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    stops: Vec<ColorStop>,
}

impl ColorScheme {
    /// Build a scheme from stops in any order.
    /// Stops at a non-finite position are dropped.
    pub fn new(mut stops: Vec<ColorStop>) -> Self {
        stops.retain(|s| {
            let finite = s.position.is_finite();
            if !finite {
                log::warn!("dropping color stop at position {}", s.position);
            }
            finite
        });
        let mut scheme = ColorScheme { stops };
        scheme.sort();
        scheme
    }

    /// A two stops scheme
    pub fn basic(c0: ColorU8, p0: f64, c1: ColorU8, p1: f64) -> Self {
        ColorScheme::new(vec![ColorStop::new(c0, p0), ColorStop::new(c1, p1)])
    }

    /// The default scheme used for event levels: blue at 0 to red at 100
    pub fn levels() -> Self {
        ColorScheme::basic(color::BLUE, 0.0, color::RED, 100.0)
    }

    /// The stops, sorted by position
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Number of stops
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the scheme has no stop
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Smallest stop position, `None` if empty
    pub fn min_pos(&self) -> Option<f64> {
        self.stops.iter().map(|s| s.position).reduce(f64::min)
    }

    /// Largest stop position, `None` if empty
    pub fn max_pos(&self) -> Option<f64> {
        self.stops.iter().map(|s| s.position).reduce(f64::max)
    }

    /// Span between the smallest and largest positions, `None` if empty
    pub fn range(&self) -> Option<f64> {
        Some((self.max_pos()? - self.min_pos()?).abs())
    }

    /// Insert a stop and return its index in the sorted list.
    /// A stop inserted at the position of existing stops goes after them.
    pub fn insert(&mut self, stop: ColorStop) -> Result<usize, Error> {
        if !stop.position.is_finite() {
            return Err(Error::InvalidPosition(stop.position));
        }
        let idx = self.stops.partition_point(|s| s.position <= stop.position);
        self.stops.insert(idx, stop);
        Ok(idx)
    }

    /// Remove the stop at `index`
    pub fn remove(&mut self, index: usize) -> Result<ColorStop, Error> {
        if index >= self.stops.len() {
            return Err(Error::StopIndexOutOfRange(index));
        }
        Ok(self.stops.remove(index))
    }

    /// Change the color of the stop at `index`, keeping its position
    pub fn set_color(&mut self, index: usize, color: ColorU8) -> Result<(), Error> {
        let stop = self
            .stops
            .get_mut(index)
            .ok_or(Error::StopIndexOutOfRange(index))?;
        stop.color = color.without_opacity();
        Ok(())
    }

    /// Sort the stops by position. Stops with equal positions keep their order.
    pub fn sort(&mut self) {
        self.stops.sort_by(|a, b| a.position.total_cmp(&b.position));
    }

    /// Whether the stops are sorted by position
    pub fn is_sorted(&self) -> bool {
        self.stops.windows(2).all(|w| w[0].position <= w[1].position)
    }

    /// Move a stop without sorting, so that its index stays valid during a drag
    pub(crate) fn shift_position(&mut self, index: usize, delta: f64) -> Result<(), Error> {
        let stop = self
            .stops
            .get_mut(index)
            .ok_or(Error::StopIndexOutOfRange(index))?;
        let position = stop.position + delta;
        if !position.is_finite() {
            return Err(Error::InvalidPosition(position));
        }
        stop.position = position;
        Ok(())
    }

    /// Sort the stops and return the new index of the stop that was at `index`
    pub(crate) fn sort_tracking(&mut self, index: usize) -> usize {
        let mut tagged: Vec<(usize, ColorStop)> = self.stops.drain(..).enumerate().collect();
        tagged.sort_by(|a, b| a.1.position.total_cmp(&b.1.position));
        let new_index = tagged.iter().position(|(i, _)| *i == index).unwrap_or(index);
        self.stops = tagged.into_iter().map(|(_, s)| s).collect();
        new_index
    }

    /// Index of the first pair of consecutive stops bracketing `position`,
    /// with the ratio of `position` within the pair.
    /// A pair of stops at the same position yields a ratio of 1.
    pub(crate) fn bracket(&self, position: f64) -> Option<(usize, f64)> {
        self.stops.windows(2).enumerate().find_map(|(i, w)| {
            let (p0, p1) = (w[0].position, w[1].position);
            if p0 <= position && position <= p1 {
                Some((i, bracket_ratio(p0, p1, position)))
            } else {
                None
            }
        })
    }

    /// Color of the scheme at `position`.
    ///
    /// An empty scheme is black and a single stop scheme has its color everywhere.
    /// Positions outside the stops take the color of the nearest end.
    pub fn get_color_at(&self, position: f64, mode: Interpolation) -> ColorU8 {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return color::BLACK,
        };
        if self.stops.len() == 1 {
            return first.color;
        }
        if let Some(min) = self.min_pos() {
            if position < min {
                return first.color;
            }
        }
        match self.bracket(position) {
            Some((i, ratio)) => mode.blend(self.stops[i].color, self.stops[i + 1].color, ratio),
            None => last.color,
        }
    }

    /// Replace the stops with those parsed from `s`.
    /// On error, the scheme is left untouched.
    pub fn replace_from_str(&mut self, s: &str) -> Result<(), ParseError> {
        *self = s.parse()?;
        Ok(())
    }

    /// Write the persisted form of the scheme
    pub fn save<W: io::Write>(&self, mut writer: W) -> Result<(), Error> {
        writer.write_all(self.to_string().as_bytes())?;
        log::debug!("saved color scheme with {} stops", self.stops.len());
        Ok(())
    }

    /// Read a scheme from its persisted form
    pub fn load<R: io::Read>(mut reader: R) -> Result<Self, Error> {
        let mut s = String::new();
        reader.read_to_string(&mut s)?;
        let scheme: ColorScheme = s.parse()?;
        log::debug!("loaded color scheme with {} stops", scheme.stops.len());
        Ok(scheme)
    }

    /// Flat `position, red, green, blue` list with channels in `[0, 1]`,
    /// as used by scientific visualization color maps
    pub fn to_paraview(&self) -> Vec<f64> {
        let mut res = Vec::with_capacity(self.stops.len() * 4);
        for s in &self.stops {
            res.push(s.position);
            res.push(s.color.red() as f64 / 255.0);
            res.push(s.color.green() as f64 / 255.0);
            res.push(s.color.blue() as f64 / 255.0);
        }
        res
    }

    /// Build a scheme from a flat `position, red, green, blue` list with channels in `[0, 1]`
    pub fn from_paraview(values: &[f64]) -> Result<Self, Error> {
        if values.len() % 4 != 0 {
            return Err(Error::InvalidInteropLength(values.len()));
        }
        if let Some(pos) = values.chunks_exact(4).map(|c| c[0]).find(|p| !p.is_finite()) {
            return Err(Error::InvalidPosition(pos));
        }
        let ch = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        let stops = values
            .chunks_exact(4)
            .map(|c| ColorStop::new(ColorU8::from_rgb(ch(c[1]), ch(c[2]), ch(c[3])), c[0]))
            .collect();
        Ok(ColorScheme::new(stops))
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme::levels()
    }
}

pub(crate) fn bracket_ratio(p0: f64, p1: f64, position: f64) -> f64 {
    let span = p1 - p0;
    if span > 0.0 {
        ((position - p0) / span).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

impl Serialize for ColorScheme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.stops.iter().map(|s| {
            let [r, g, b] = s.color.rgb();
            (r, g, b, s.position)
        }))
    }
}

impl<'de> Deserialize<'de> for ColorScheme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<(u8, u8, u8, f64)>::deserialize(deserializer)?;
        if let Some((.., p)) = raw.iter().find(|(.., p)| !p.is_finite()) {
            return Err(serde::de::Error::custom(format!(
                "color stop position must be finite, got {}",
                p
            )));
        }
        Ok(ColorScheme::new(
            raw.into_iter()
                .map(|(r, g, b, p)| ColorStop::new(ColorU8::from_rgb(r, g, b), p))
                .collect(),
        ))
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl FromStr for ColorScheme {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(ParseError)
    }
}
