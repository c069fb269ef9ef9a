//! Render module: provides abstraction over rendering surfaces, like pixel-based, SVG, or GUI.
//!
//! All rendering surfaces must implement the `Surface` trait.
//! See the `sigmaview-pxl` and `sigmaview-svg` crates for examples.
//! [`Recorder`] is an in-memory surface that keeps the emitted commands,
//! which is what hosting views use when they forward primitives to their own toolkit.

use crate::axis::TickLabel;
use crate::{ColorU8, geom};

/// Surface trait: defines the rendering surface API
pub trait Surface {
    /// Prepare the surface for drawing, with the given size in surface units
    fn prepare(&mut self, size: geom::Size);

    /// Fill the entire surface with the given fill pattern
    fn fill(&mut self, fill: Paint);

    /// Draw a rectangle
    ///
    /// Default implementation converts the rectangle to a path and call [`draw_path`](Surface::draw_path).
    /// Rectangles without area are skipped.
    fn draw_rect(&mut self, rect: &Rect) {
        let Some(path) = rect.rect.to_path() else {
            return;
        };
        let rpath = self::Path {
            path: &path,
            fill: rect.fill,
            stroke: rect.stroke,
            transform: rect.transform,
        };
        self.draw_path(&rpath);
    }

    /// Draw a straight line
    ///
    /// Default implementation converts the line to a path and call [`draw_path`](Surface::draw_path)
    fn draw_line(&mut self, line: &Line) {
        let mut pb = geom::PathBuilder::new();
        pb.move_to(line.p1.x, line.p1.y);
        pb.line_to(line.p2.x, line.p2.y);
        let Some(path) = pb.finish() else {
            return;
        };
        let rpath = self::Path {
            path: &path,
            fill: None,
            stroke: Some(line.stroke),
            transform: None,
        };
        self.draw_path(&rpath);
    }

    /// Draw a path
    fn draw_path(&mut self, path: &Path);

    /// Draw a label (tick value, event energy...)
    fn draw_label(&mut self, label: &Label);

    /// Push a clipping rect
    /// Subsequent draw operations will be clipped to this rect,
    /// until a matching [`pop_clip`](Surface::pop_clip) is called
    fn push_clip(&mut self, clip: &Clip);

    /// Pop a clipping rect that was pushed previously with [`push_clip`](Surface::push_clip)
    fn pop_clip(&mut self);
}

/// Paint pattern, used for fill operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// Solid color fill
    Solid(ColorU8),
    /// Two colors linear gradient
    LinearGradient(LinearGradient),
}

impl From<ColorU8> for Paint {
    fn from(value: ColorU8) -> Self {
        Paint::Solid(value)
    }
}

/// A linear gradient between two points, in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    /// Point where the gradient has the `from` color
    pub start: geom::Point,
    /// Point where the gradient has the `to` color
    pub end: geom::Point,
    /// Start color
    pub from: ColorU8,
    /// End color
    pub to: ColorU8,
}

/// Line pattern defines how the line is drawn
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum LinePattern<'a> {
    /// Solid line
    #[default]
    Solid,
    /// Dashed line. The pattern is relative to the line width.
    Dash(&'a [f32]),
}

/// Stroke style definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<'a> {
    /// Line color
    pub color: ColorU8,
    /// Line width in surface units
    pub width: f32,
    /// Line pattern
    pub pattern: LinePattern<'a>,
}

impl Stroke<'_> {
    /// A solid stroke of the given color and width
    pub const fn solid(color: ColorU8, width: f32) -> Self {
        Stroke {
            color,
            width,
            pattern: LinePattern::Solid,
        }
    }
}

/// Rectangle to draw
#[derive(Debug, Clone)]
pub struct Rect<'a> {
    /// Rectangle geometry
    pub rect: geom::Rect,
    /// Fill style
    pub fill: Option<Paint>,
    /// Stroke style
    pub stroke: Option<Stroke<'a>>,
    /// Optional transform to apply to the rectangle
    pub transform: Option<&'a geom::Transform>,
}

/// Straight line to draw
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    /// Start point
    pub p1: geom::Point,
    /// End point
    pub p2: geom::Point,
    /// Stroke style
    pub stroke: Stroke<'a>,
}

/// Path to draw
#[derive(Debug, Clone)]
pub struct Path<'a> {
    /// Path geometry
    pub path: &'a geom::Path,
    /// Fill style
    pub fill: Option<Paint>,
    /// Stroke style
    pub stroke: Option<Stroke<'a>>,
    /// Optional transform to apply to the path
    pub transform: Option<&'a geom::Transform>,
}

/// Text label to draw.
///
/// The text is kept structured so that each surface can render the exponent
/// with a smaller, raised glyph.
#[derive(Debug, Clone)]
pub struct Label<'a> {
    /// The label text
    pub text: &'a TickLabel,
    /// Top-left corner of the text box, before rotation
    pub anchor: geom::Point,
    /// Font size of the mantissa, in surface units
    pub font_size: f32,
    /// Font size scale applied to the exponent
    pub sup_scale: f32,
    /// Text color
    pub color: ColorU8,
    /// Rotation in degrees around the anchor, counter-clockwise
    pub rotation: f32,
}

/// Clipping rectangle
#[derive(Debug, Clone)]
pub struct Clip<'a> {
    /// Clipping rectangle
    pub rect: &'a geom::Rect,
    /// Optional transform to apply to the clipping rectangle
    pub transform: Option<&'a geom::Transform>,
}

/// An owned drawing command, as stored by [`Recorder`]
#[derive(Debug, Clone)]
pub enum Command {
    /// See [`Surface::prepare`]
    Prepare(geom::Size),
    /// See [`Surface::fill`]
    Fill(Paint),
    /// See [`Surface::draw_rect`]
    Rect {
        /// Rectangle geometry
        rect: geom::Rect,
        /// Fill style
        fill: Option<Paint>,
        /// Stroke color and width
        stroke: Option<(ColorU8, f32)>,
    },
    /// See [`Surface::draw_line`]
    Line {
        /// Start point
        p1: geom::Point,
        /// End point
        p2: geom::Point,
        /// Stroke color
        color: ColorU8,
        /// Stroke width
        width: f32,
    },
    /// See [`Surface::draw_path`]
    Path {
        /// Path geometry
        path: geom::Path,
        /// Fill style
        fill: Option<Paint>,
        /// Stroke color and width
        stroke: Option<(ColorU8, f32)>,
    },
    /// See [`Surface::draw_label`]
    Label {
        /// The label text
        text: TickLabel,
        /// Top-left corner of the text box
        anchor: geom::Point,
        /// Rotation in degrees
        rotation: f32,
    },
    /// See [`Surface::push_clip`]
    PushClip(geom::Rect),
    /// See [`Surface::pop_clip`]
    PopClip,
}

/// A surface that records drawing commands instead of rasterizing them
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    commands: Vec<Command>,
}

impl Recorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded commands, in emission order
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recorder empty
    pub fn take(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Iterate over the recorded lines, as `(p1, p2, color)`
    pub fn lines(&self) -> impl Iterator<Item = (geom::Point, geom::Point, ColorU8)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            Command::Line { p1, p2, color, .. } => Some((*p1, *p2, *color)),
            _ => None,
        })
    }

    /// Iterate over the recorded labels, as `(text, anchor)`
    pub fn labels(&self) -> impl Iterator<Item = (&TickLabel, geom::Point)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            Command::Label { text, anchor, .. } => Some((text, *anchor)),
            _ => None,
        })
    }
}

impl Surface for Recorder {
    fn prepare(&mut self, size: geom::Size) {
        self.commands.push(Command::Prepare(size));
    }

    fn fill(&mut self, fill: Paint) {
        self.commands.push(Command::Fill(fill));
    }

    fn draw_rect(&mut self, rect: &Rect) {
        self.commands.push(Command::Rect {
            rect: rect.rect,
            fill: rect.fill,
            stroke: rect.stroke.map(|s| (s.color, s.width)),
        });
    }

    fn draw_line(&mut self, line: &Line) {
        self.commands.push(Command::Line {
            p1: line.p1,
            p2: line.p2,
            color: line.stroke.color,
            width: line.stroke.width,
        });
    }

    fn draw_path(&mut self, path: &Path) {
        let mut owned = path.path.clone();
        if let Some(transform) = path.transform {
            match owned.transform(*transform) {
                Some(p) => owned = p,
                None => return,
            }
        }
        self.commands.push(Command::Path {
            path: owned,
            fill: path.fill,
            stroke: path.stroke.map(|s| (s.color, s.width)),
        });
    }

    fn draw_label(&mut self, label: &Label) {
        self.commands.push(Command::Label {
            text: label.text.clone(),
            anchor: label.anchor,
            rotation: label.rotation,
        });
    }

    fn push_clip(&mut self, clip: &Clip) {
        self.commands.push(Command::PushClip(*clip.rect));
    }

    fn pop_clip(&mut self) {
        self.commands.push(Command::PopClip);
    }
}
