//! Interactive editing of color schemes.
//!
//! A [`StopEditor`] works on its own copy of a scheme: the host applies the result
//! with [`StopEditor::apply`] or discards it by dropping the editor.
//! Stops are located on a horizontal strip of `width` pixels, the smallest stop
//! position at pixel 0 and the largest at pixel `width`.
//!
//! Pointer input drives an explicit gesture machine:
//! a press on a stop becomes a drag once the pointer leaves a small deadzone,
//! and a press released without motion asks the host to open its color picker.

use crate::render::{self, Surface};
use crate::ruler::Ruler;
use crate::scheme::{ColorScheme, ColorStop, Interpolation, ParseError};
use crate::{ColorU8, Error, geom, gradient, params};

/// State of the pointer gesture
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// No button pressed
    #[default]
    Idle,
    /// Button pressed over a stop handle, pointer still within the deadzone
    PressedOnStop {
        /// Index of the pressed stop
        index: usize,
        /// Pointer position at press time
        x: f32,
    },
    /// Button pressed away from any handle
    PressedOnEmpty {
        /// Pointer position at press time
        x: f32,
    },
    /// A stop is being dragged. The stops are not sorted until release.
    Dragging {
        /// Index of the dragged stop
        index: usize,
        /// Last pointer position applied to the stop
        last_x: f32,
    },
}

/// What the host should do once the pointer is released
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Nothing to do
    None,
    /// A stop was clicked: open a color picker and call [`StopEditor::edit_color`]
    EditStop(usize),
    /// Empty space was clicked: open a color picker and call [`StopEditor::add_stop`]
    /// at this position
    AddStopAt(f64),
    /// A drag ended, the stops are sorted again and the dragged stop is at this index
    DragCommitted(usize),
}

/// Target of a context menu request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextTarget {
    /// Over a stop: edit or delete it
    Stop(usize),
    /// Over empty space: add a stop
    Empty,
}

/// Editing model of a color scheme strip
#[derive(Debug, Clone)]
pub struct StopEditor {
    scheme: ColorScheme,
    width: f32,
    gesture: Gesture,
}

impl StopEditor {
    /// Start editing `scheme` on a strip of `width` pixels
    pub fn new(scheme: ColorScheme, width: f32) -> Self {
        StopEditor {
            scheme,
            width,
            gesture: Gesture::Idle,
        }
    }

    /// The edited scheme. It may be unsorted while a stop is dragged.
    pub fn scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    /// Width of the strip in pixels
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Update the width of the strip, e.g. on resize
    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    /// The current gesture state
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Replace the edited scheme with a persisted one.
    /// On error, the edited scheme is left untouched.
    pub fn load_str(&mut self, s: &str) -> Result<(), ParseError> {
        self.scheme.replace_from_str(s)?;
        self.gesture = Gesture::Idle;
        Ok(())
    }

    /// Finish editing and return the edited scheme
    pub fn apply(mut self) -> ColorScheme {
        self.scheme.sort();
        self.scheme
    }

    /// Smallest position and span used for the pixel mapping.
    /// A scheme without span maps as a unit span so its stops stay reachable.
    fn span(&self) -> (f64, f64) {
        match (self.scheme.min_pos(), self.scheme.range()) {
            (Some(min), Some(range)) if range > 0.0 => (min, range),
            (Some(min), _) => (min, 1.0),
            _ => (0.0, 1.0),
        }
    }

    /// Pixel of a scheme position on the strip
    pub fn pixel_of(&self, position: f64) -> f32 {
        let (min, range) = self.span();
        ((position - min) / range * self.width as f64) as f32
    }

    /// Scheme position at a pixel of the strip
    pub fn position_at(&self, x: f32) -> f64 {
        let (min, range) = self.span();
        if self.width <= 0.0 {
            return min;
        }
        x as f64 * range / self.width as f64 + min
    }

    /// Index of the first stop whose handle is within reach of pixel `x`
    pub fn hit_test(&self, x: f32) -> Option<usize> {
        if self.width <= 0.0 {
            return None;
        }
        self.scheme
            .stops()
            .iter()
            .position(|s| (x - self.pixel_of(s.position)).abs() <= params::HIT_TOLERANCE)
    }

    /// Add a stop and return its index in the sorted list.
    /// A pressed stop keeps designating the same stop.
    pub fn add_stop(&mut self, color: ColorU8, position: f64) -> Result<usize, Error> {
        self.finish_drag();
        let idx = self.scheme.insert(ColorStop::new(color, position))?;
        if let Gesture::PressedOnStop { index, x } = self.gesture {
            if idx <= index {
                self.gesture = Gesture::PressedOnStop { index: index + 1, x };
            }
        }
        Ok(idx)
    }

    /// Add a stop at pixel `x` of the strip and return its index
    pub fn add_stop_at_pixel(&mut self, color: ColorU8, x: f32) -> Result<usize, Error> {
        let position = self.position_at(x);
        self.add_stop(color, position)
    }

    /// Add a stop in the middle of the strip and return its index
    pub fn add_stop_at_center(&mut self, color: ColorU8) -> Result<usize, Error> {
        self.add_stop_at_pixel(color, self.width / 2.0)
    }

    /// Remove the stop at `index`
    pub fn remove_stop(&mut self, index: usize) -> Result<ColorStop, Error> {
        let stop = self.scheme.remove(index)?;
        if let Gesture::Dragging { .. } = self.gesture {
            self.scheme.sort();
        }
        self.gesture = Gesture::Idle;
        Ok(stop)
    }

    /// Move the stop at `index` by `pixel_delta` pixels.
    /// The stops are not sorted, so `index` keeps designating the same stop.
    /// A move to a non-finite position fails and leaves the stop in place.
    pub fn drag(&mut self, index: usize, pixel_delta: f32) -> Result<(), Error> {
        if self.width <= 0.0 {
            return Ok(());
        }
        let (_, range) = self.span();
        let delta = pixel_delta as f64 * range / self.width as f64;
        self.scheme.shift_position(index, delta)
    }

    /// Change the color of the stop at `index`, keeping its position
    pub fn edit_color(&mut self, index: usize, color: ColorU8) -> Result<(), Error> {
        self.scheme.set_color(index, color)
    }

    /// What is under the pointer when a context menu is requested
    pub fn context_target(&self, x: f32) -> ContextTarget {
        match self.hit_test(x) {
            Some(index) => ContextTarget::Stop(index),
            None => ContextTarget::Empty,
        }
    }

    /// Primary button pressed at `x`
    pub fn pointer_down(&mut self, x: f32) {
        self.finish_drag();
        self.gesture = match self.hit_test(x) {
            Some(index) => Gesture::PressedOnStop { index, x },
            None => Gesture::PressedOnEmpty { x },
        };
    }

    /// Pointer moved to `x`. Returns whether the scheme changed.
    pub fn pointer_move(&mut self, x: f32) -> Result<bool, Error> {
        match self.gesture {
            Gesture::PressedOnStop { index, x: x0 } => {
                if (x - x0).abs() <= params::DRAG_DEADZONE {
                    return Ok(false);
                }
                log::trace!("dragging stop {}", index);
                self.drag_to(index, x0, x)?;
                Ok(true)
            }
            Gesture::Dragging { index, last_x } => {
                self.drag_to(index, last_x, x)?;
                Ok(true)
            }
            Gesture::Idle | Gesture::PressedOnEmpty { .. } => Ok(false),
        }
    }

    fn drag_to(&mut self, index: usize, from: f32, to: f32) -> Result<(), Error> {
        self.drag(index, to - from)?;
        self.gesture = Gesture::Dragging { index, last_x: to };
        Ok(())
    }

    /// Primary button released at `x`
    pub fn pointer_up(&mut self, x: f32) -> GestureOutcome {
        let outcome = match self.gesture {
            Gesture::Idle => GestureOutcome::None,
            Gesture::PressedOnStop { index, .. } => GestureOutcome::EditStop(index),
            Gesture::PressedOnEmpty { .. } => GestureOutcome::AddStopAt(self.position_at(x)),
            Gesture::Dragging { index, .. } => {
                let index = self.scheme.sort_tracking(index);
                log::trace!("stop dropped at index {}", index);
                GestureOutcome::DragCommitted(index)
            }
        };
        self.gesture = Gesture::Idle;
        outcome
    }

    /// Abort the current gesture, e.g. when the pointer capture is lost.
    /// A dragged stop stays where it is, and the stops are sorted again.
    pub fn cancel_gesture(&mut self) {
        self.finish_drag();
        self.gesture = Gesture::Idle;
    }

    fn finish_drag(&mut self) {
        if let Gesture::Dragging { index, .. } = self.gesture {
            self.scheme.sort_tracking(index);
            self.gesture = Gesture::Idle;
        }
    }

    /// Align a ruler on the strip: the smallest position at pixel 0,
    /// and `width / range` pixels per unit
    pub fn sync_ruler(&self, ruler: &mut Ruler) -> Result<(), Error> {
        if self.width <= 0.0 {
            return Ok(());
        }
        let (min, range) = self.span();
        ruler.set_scale(self.width as f64 / range, false)?;
        ruler.set_offset(-min, false);
        ruler.draw();
        Ok(())
    }

    /// Draw the gradient strip and the stop handles in `rect`
    pub fn draw<S>(&self, surface: &mut S, rect: &geom::Rect, mode: Interpolation)
    where
        S: Surface + ?Sized,
    {
        if rect.is_empty() {
            return;
        }
        if self.scheme.is_sorted() {
            gradient::render_gradient(surface, rect, &self.scheme, mode);
        } else {
            let mut sorted = self.scheme.clone();
            sorted.sort();
            gradient::render_gradient(surface, rect, &sorted, mode);
        }

        let half = params::HANDLE_SIZE / 2.0;
        let (min, range) = self.span();
        for stop in self.scheme.stops() {
            let x = rect.x() + ((stop.position - min) / range * rect.width() as f64) as f32;
            let Some(handle) = geom::Rect::try_from_xywh(
                x - half,
                rect.center_y() - half,
                params::HANDLE_SIZE,
                params::HANDLE_SIZE,
            ) else {
                continue;
            };
            surface.draw_rect(&render::Rect {
                rect: handle,
                fill: None,
                stroke: Some(render::Stroke::solid(stop.color.inverted(), 1.0)),
                transform: None,
            });
        }
    }
}
