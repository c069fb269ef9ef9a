//! Axis rulers drawn along the edges of the map canvas and above the gradient editor.
//!
//! A [`Ruler`] owns its [`RulerConfig`] and is mutated by the hosting view on resize,
//! pan, zoom and pointer motion. Mutations only mark the ruler dirty; the host calls
//! [`Ruler::paint`] at its next frame, so bursts of events result in a single paint
//! of the most recent configuration.
//!
//! [`draw_ruler`] is the stateless renderer behind [`Ruler::paint`].

use crate::axis::{self, Direction, Orientation, Tick};
use crate::render::{self, Surface};
use crate::{ColorU8, Error, color, geom, params};

mod defaults {
    pub const THRESHOLD: f64 = 50.0;
    pub const EXPONENT_THRESHOLD: f64 = 10000.0;
    pub const MINOR_DIVISIONS: u32 = 5;
}

/// Configuration and live state of a ruler
#[derive(Debug, Clone, PartialEq)]
pub struct RulerConfig {
    direction: Direction,
    pixels_per_unit: f64,
    offset: f64,
    factor: f64,
    threshold: f64,
    cursor: Option<f64>,
    exponent_threshold: f64,
    minor_divisions: u32,
}

impl RulerConfig {
    /// Create the configuration of a ruler with the given orientation.
    /// The scale is 1 pixel per unit and the offset is 0.
    pub fn new(orientation: Orientation) -> Self {
        RulerConfig {
            direction: Direction {
                orientation,
                inverted: false,
            },
            pixels_per_unit: 1.0,
            offset: 0.0,
            factor: 1.0,
            threshold: defaults::THRESHOLD,
            cursor: None,
            exponent_threshold: defaults::EXPONENT_THRESHOLD,
            minor_divisions: defaults::MINOR_DIVISIONS,
        }
    }

    /// Configuration of a horizontal ruler
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// Configuration of a vertical ruler
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    /// Set the minimum pixel spacing between major ticks and return self for chaining
    pub fn with_threshold(self, threshold: f64) -> Self {
        RulerConfig { threshold, ..self }
    }

    /// Set whether pixels are counted from the far end and return self for chaining
    pub fn with_inverted(self, inverted: bool) -> Self {
        RulerConfig {
            direction: Direction {
                inverted,
                ..self.direction
            },
            ..self
        }
    }

    /// Set the magnitude from which labels are written in scientific form
    /// and return self for chaining
    pub fn with_exponent_threshold(self, exponent_threshold: f64) -> Self {
        RulerConfig {
            exponent_threshold,
            ..self
        }
    }

    /// Set the number of minor divisions between major ticks and return self for chaining
    pub fn with_minor_divisions(self, minor_divisions: u32) -> Self {
        RulerConfig {
            minor_divisions,
            ..self
        }
    }

    /// Orientation and inversion
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Orientation of the ruler
    pub fn orientation(&self) -> Orientation {
        self.direction.orientation
    }

    /// Whether pixels are counted from the far end
    pub fn inverted(&self) -> bool {
        self.direction.inverted
    }

    /// Screen pixels per world unit
    pub fn pixels_per_unit(&self) -> f64 {
        self.pixels_per_unit
    }

    /// World offset, such that world value `-offset` lands at pixel 0
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// World spacing between major ticks
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Minimum pixel spacing between major ticks
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Last known pointer position, in pixels
    pub fn cursor(&self) -> Option<f64> {
        self.cursor
    }

    /// Magnitude from which labels are written in scientific form
    pub fn exponent_threshold(&self) -> f64 {
        self.exponent_threshold
    }

    /// Number of minor divisions between major ticks
    pub fn minor_divisions(&self) -> u32 {
        self.minor_divisions
    }

    /// Pixel position of a world value, before inversion
    pub fn world_to_pixel(&self, value: f64) -> f64 {
        (value + self.offset) * self.pixels_per_unit
    }

    /// World value at a pixel position, before inversion
    pub fn pixel_to_world(&self, pixel: f64) -> f64 {
        pixel / self.pixels_per_unit - self.offset
    }

    /// The ticks visible on a ruler of the given length,
    /// with pixels mapped through the ruler direction.
    pub fn ticks(&self, length: f64) -> Result<Vec<Tick>, Error> {
        let mut ticks = axis::generate_ticks(
            self.offset,
            self.pixels_per_unit,
            self.factor,
            length,
            self.minor_divisions,
        )?;
        for t in ticks.iter_mut() {
            t.pixel = self.direction.map(t.pixel, length);
        }
        Ok(ticks)
    }

    /// Check the configured threshold, exponent threshold and minor divisions
    pub fn validate(&self) -> Result<(), Error> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(Error::InvalidThreshold(self.threshold));
        }
        if !self.exponent_threshold.is_finite() || self.exponent_threshold <= 0.0 {
            return Err(Error::InvalidExponentThreshold(self.exponent_threshold));
        }
        if self.minor_divisions == 0 || self.minor_divisions > axis::MAX_MINOR_DIVISIONS {
            return Err(Error::InvalidMinorDivisions(self.minor_divisions));
        }
        Ok(())
    }
}

impl Default for RulerConfig {
    fn default() -> Self {
        RulerConfig::horizontal()
    }
}

/// Colors and fonts of a ruler
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RulerStyle {
    /// Background color on the outer edge
    pub background_start: ColorU8,
    /// Background color on the inner edge
    pub background_end: ColorU8,
    /// Color of ticks, labels and cursor
    pub tick_color: ColorU8,
    /// Color of the 1-pixel border
    pub border_color: ColorU8,
    /// Font size of labels
    pub font_size: f32,
    /// Font size scale of label exponents
    pub sup_scale: f32,
    /// Gap between a major tick and its label
    pub label_margin: f32,
}

impl Default for RulerStyle {
    fn default() -> Self {
        RulerStyle {
            background_start: color::WHITE,
            background_end: ColorU8::gray(220),
            tick_color: color::BLACK,
            border_color: ColorU8::gray(120),
            font_size: 8.0,
            sup_scale: 0.7,
            label_margin: params::LABEL_MARGIN,
        }
    }
}

/// An axis ruler widget model
#[derive(Debug, Clone)]
pub struct Ruler {
    config: RulerConfig,
    dirty: bool,
}

impl Ruler {
    /// Build a ruler, computing the initial tick factor for 1 pixel per unit
    pub fn new(config: RulerConfig) -> Result<Self, Error> {
        config.validate()?;
        let factor = axis::compute_factor(config.pixels_per_unit, config.threshold)?;
        Ok(Ruler {
            config: RulerConfig { factor, ..config },
            dirty: true,
        })
    }

    /// The current configuration
    pub fn config(&self) -> &RulerConfig {
        &self.config
    }

    /// Set the scale in pixels per world unit.
    ///
    /// The tick factor is recomputed unless the relative change is negligible.
    /// On error, the configuration is left unchanged.
    pub fn set_scale(&mut self, pixels_per_unit: f64, redraw: bool) -> Result<(), Error> {
        if !pixels_per_unit.is_finite() || pixels_per_unit <= 0.0 {
            return Err(Error::InvalidScale(pixels_per_unit));
        }
        let current = self.config.pixels_per_unit;
        if (current - pixels_per_unit).abs() > params::SCALE_EPSILON * current {
            let factor = axis::compute_factor(pixels_per_unit, self.config.threshold)?;
            self.config.pixels_per_unit = pixels_per_unit;
            self.config.factor = factor;
        }
        if redraw {
            self.draw();
        }
        Ok(())
    }

    /// Set the world value offset
    pub fn set_offset(&mut self, offset: f64, redraw: bool) {
        self.config.offset = offset;
        if redraw {
            self.draw();
        }
    }

    /// Set or clear the pointer position, in pixels along the ruler
    pub fn set_cursor(&mut self, cursor: Option<f64>, redraw: bool) {
        self.config.cursor = cursor;
        if redraw {
            self.draw();
        }
    }

    /// Request a repaint at the next frame.
    /// Nothing is drawn until [`paint`](Ruler::paint) is called.
    pub fn draw(&mut self) {
        self.dirty = true;
    }

    /// Whether the configuration changed since the last paint
    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// The ticks visible on a ruler of the given length
    pub fn ticks(&self, length: f64) -> Result<Vec<Tick>, Error> {
        self.config.ticks(length)
    }

    /// Paint the latest configuration and clear the pending repaint request
    pub fn paint<S>(&mut self, surface: &mut S, rect: &geom::Rect, style: &RulerStyle)
    where
        S: Surface + ?Sized,
    {
        draw_ruler(surface, &self.config, rect, style);
        self.dirty = false;
    }
}

/// Center of the pixel containing `v`, for crisp 1-pixel lines
fn crisp(v: f64) -> f32 {
    v.round() as f32 + 0.5
}

/// Draw a ruler in `rect`: background, ticks and labels, cursor and border.
///
/// Ticks are located with the configuration's offset and scale, pixel 0 being
/// the left (or top) side of `rect`, or the right (or bottom) side if inverted.
pub fn draw_ruler<S>(surface: &mut S, config: &RulerConfig, rect: &geom::Rect, style: &RulerStyle)
where
    S: Surface + ?Sized,
{
    if rect.is_empty() {
        return;
    }

    let vertical = config.orientation() == Orientation::Vertical;
    let (length, thickness) = if vertical {
        (rect.height(), rect.width())
    } else {
        (rect.width(), rect.height())
    };

    let (x0, y0) = (rect.x(), rect.y());
    // maps (along, across) ruler coordinates to the surface
    let pt = |along: f32, across: f32| {
        if vertical {
            geom::Point::from_xy(x0 + across, y0 + along)
        } else {
            geom::Point::from_xy(x0 + along, y0 + across)
        }
    };

    surface.push_clip(&render::Clip {
        rect,
        transform: None,
    });

    surface.draw_rect(&render::Rect {
        rect: *rect,
        fill: Some(render::Paint::LinearGradient(render::LinearGradient {
            start: pt(0.0, 0.0),
            end: pt(0.0, thickness),
            from: style.background_start,
            to: style.background_end,
        })),
        stroke: None,
        transform: None,
    });

    let ticks = match config.ticks(length as f64) {
        Ok(ticks) => ticks,
        Err(err) => {
            log::warn!("ruler drawn without ticks: {}", err);
            Vec::new()
        }
    };

    let stroke = render::Stroke::solid(style.tick_color, 1.0);
    for tick in ticks.iter() {
        let along = crisp(tick.pixel);
        let across = if tick.major { 0.0 } else { thickness / 2.0 };
        surface.draw_line(&render::Line {
            p1: pt(along, across),
            p2: pt(along, thickness),
            stroke,
        });

        if tick.major {
            let text = axis::format_tick_label(tick.value, config.factor, config.exponent_threshold);
            let (anchor, rotation) = if vertical {
                (pt(tick.pixel.round() as f32, style.label_margin), 90.0)
            } else {
                (pt(tick.pixel.round() as f32 + style.label_margin, 0.0), 0.0)
            };
            surface.draw_label(&render::Label {
                text: &text,
                anchor,
                font_size: style.font_size,
                sup_scale: style.sup_scale,
                color: style.tick_color,
                rotation,
            });
        }
    }

    if let Some(cursor) = config.cursor {
        let along = crisp(cursor);
        surface.draw_line(&render::Line {
            p1: pt(along, 0.0),
            p2: pt(along, thickness),
            stroke,
        });
    }

    surface.pop_clip();

    if let Some(border) = geom::Rect::try_from_xywh(
        x0 + 0.5,
        y0 + 0.5,
        (rect.width() - 1.0).max(0.0),
        (rect.height() - 1.0).max(0.0),
    ) {
        surface.draw_rect(&render::Rect {
            rect: border,
            fill: None,
            stroke: Some(render::Stroke::solid(style.border_color, 1.0)),
            transform: None,
        });
    }
}
