//! Rulers along the map canvas, kept in sync with the visible world rectangle.

use crate::ruler::{Ruler, RulerConfig, RulerStyle};
use crate::render::Surface;
use crate::{Error, geom};

/// The visible part of the world in the map canvas.
///
/// World Y grows upwards while pixel Y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldView {
    /// World X of the left pixel column
    pub x0: f64,
    /// World Y of the top pixel row
    pub y0: f64,
    /// World X of the right pixel column
    pub x1: f64,
    /// World Y of the bottom pixel row
    pub y1: f64,
    /// Size of the canvas in pixels
    pub size: geom::Size,
}

/// A horizontal ruler above the canvas and a vertical ruler on its side,
/// the latter counting pixels from the bottom
#[derive(Debug, Clone)]
pub struct ViewportRulers {
    horizontal: Ruler,
    vertical: Ruler,
}

impl ViewportRulers {
    /// Rulers with the canvas defaults: both divide major ticks in 10
    /// and the vertical ruler is inverted
    pub fn new() -> Result<Self, Error> {
        Self::with_configs(
            RulerConfig::horizontal().with_minor_divisions(10),
            RulerConfig::vertical()
                .with_inverted(true)
                .with_minor_divisions(10),
        )
    }

    /// Rulers built from explicit configurations
    pub fn with_configs(horizontal: RulerConfig, vertical: RulerConfig) -> Result<Self, Error> {
        Ok(ViewportRulers {
            horizontal: Ruler::new(horizontal)?,
            vertical: Ruler::new(vertical)?,
        })
    }

    /// The horizontal ruler
    pub fn horizontal(&self) -> &Ruler {
        &self.horizontal
    }

    /// The vertical ruler
    pub fn vertical(&self) -> &Ruler {
        &self.vertical
    }

    /// Follow a pan or zoom of the canvas.
    ///
    /// An empty canvas is ignored. A view without world span is rejected
    /// and both rulers are left unchanged.
    pub fn update(&mut self, view: &WorldView) -> Result<(), Error> {
        if view.size.is_empty() {
            log::trace!("rulers not updated for empty canvas");
            return Ok(());
        }
        let sx = view.size.width() as f64 / (view.x1 - view.x0).abs();
        let sy = view.size.height() as f64 / (view.y0 - view.y1).abs();
        for s in [sx, sy] {
            if !s.is_finite() || s <= 0.0 {
                return Err(Error::InvalidScale(s));
            }
        }

        self.horizontal.set_offset(-view.x0, false);
        self.horizontal.set_scale(sx, false)?;
        self.vertical.set_offset(-view.y1, false);
        self.vertical.set_scale(sy, false)?;
        self.horizontal.draw();
        self.vertical.draw();
        Ok(())
    }

    /// Follow the pointer over the canvas, in canvas pixels. `None` hides the cursors.
    pub fn set_pointer(&mut self, pointer: Option<geom::Point>) {
        self.horizontal.set_cursor(pointer.map(|p| p.x as f64), true);
        self.vertical.set_cursor(pointer.map(|p| p.y as f64), true);
    }

    /// Whether either ruler needs a repaint
    pub fn needs_redraw(&self) -> bool {
        self.horizontal.needs_redraw() || self.vertical.needs_redraw()
    }

    /// Paint both rulers in their respective rectangles
    pub fn paint<S>(&mut self, surface: &mut S, horizontal: &geom::Rect, vertical: &geom::Rect, style: &RulerStyle)
    where
        S: Surface + ?Sized,
    {
        self.horizontal.paint(surface, horizontal, style);
        self.vertical.paint(surface, vertical, style);
    }
}
