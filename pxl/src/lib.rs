//! Raster rendering surface for sigmaview, backed by `tiny-skia`.
//!
//! Labels are not rasterized: this surface has no font support and
//! skips them. Hosting toolkits draw labels on top with their own text engine.

use std::{fmt, io};

use sigmaview::{ColorU8, geom, render};
use tiny_skia::{self, FillRule, Mask, Pixmap, PixmapMut};

/// Errors of the raster surface
#[derive(Debug)]
pub enum Error {
    /// Pixmap dimensions are zero or too large
    InvalidSize(u32, u32),
    /// Byte buffer does not match the pixmap dimensions
    InvalidBuffer(usize),
    /// PNG encoding or writing failed
    Io(io::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSize(w, h) => write!(f, "Invalid pixmap size: {}x{}", w, h),
            Error::InvalidBuffer(len) => write!(f, "Invalid pixel buffer length: {}", len),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// A surface owning its pixmap
#[derive(Debug, Clone)]
pub struct PxlSurface {
    pixmap: Pixmap,
    state: State,
}

impl PxlSurface {
    /// Create a transparent surface of the given size in pixels
    pub fn new(width: u32, height: u32) -> Result<Self, Error> {
        let pixmap = Pixmap::new(width, height).ok_or(Error::InvalidSize(width, height))?;
        let state = State::new(width, height);
        Ok(Self { pixmap, state })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// The color of the pixel at `(x, y)`, or `None` outside of the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<ColorU8> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(ColorU8::from_rgba(c.red(), c.green(), c.blue(), c.alpha()))
    }

    /// Encode the surface as PNG
    pub fn encode_png(&self) -> Result<Vec<u8>, Error> {
        let data = self.pixmap.encode_png().map_err(io::Error::from)?;
        Ok(data)
    }

    /// Write the surface as a PNG file
    pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Error> {
        self.pixmap.save_png(path).map_err(io::Error::from)?;
        Ok(())
    }

    /// Release the underlying pixmap
    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }
}

/// A surface drawing into a borrowed RGBA buffer, such as a toolkit image
pub struct PxlSurfaceRef<'a> {
    pixmap: PixmapMut<'a>,
    state: State,
}

impl fmt::Debug for PxlSurfaceRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PxlSurfaceRef")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("state", &self.state)
            .finish()
    }
}

impl<'a> PxlSurfaceRef<'a> {
    /// Draw into an existing pixmap
    pub fn from_pixmap_mut(pixmap: PixmapMut<'a>) -> Self {
        let state = State::new(pixmap.width(), pixmap.height());
        Self { pixmap, state }
    }

    /// Draw into premultiplied RGBA bytes of the given dimensions
    pub fn from_bytes(bytes: &'a mut [u8], width: u32, height: u32) -> Result<Self, Error> {
        let len = bytes.len();
        let pixmap = PixmapMut::from_bytes(bytes, width, height).ok_or(Error::InvalidBuffer(len))?;
        Ok(Self::from_pixmap_mut(pixmap))
    }
}

#[derive(Debug, Clone)]
struct State {
    width: u32,
    height: u32,
    transform: geom::Transform,
    clips: Vec<Option<Mask>>,
}

impl State {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            transform: geom::Transform::identity(),
            clips: Vec::new(),
        }
    }

    fn clip(&self) -> Option<&Mask> {
        self.clips.last().and_then(|m| m.as_ref())
    }

    fn prepare(&mut self, size: geom::Size) {
        if size.is_empty() {
            log::warn!("empty surface size {:?}, keeping current transform", size);
            return;
        }
        let sx = self.width as f32 / size.width();
        let sy = self.height as f32 / size.height();
        self.transform = geom::Transform::from_scale(sx, sy);
    }

    fn fill(&mut self, px: &mut PixmapMut<'_>, fill: render::Paint) {
        match fill {
            render::Paint::Solid(color) => px.fill(ts_color(color)),
            render::Paint::LinearGradient(_) => {
                let rect = tiny_skia::Rect::from_xywh(0.0, 0.0, self.width as f32, self.height as f32);
                if let Some(rect) = rect {
                    let mut paint = tiny_skia::Paint::default();
                    ts_fill(fill, &mut paint);
                    px.fill_rect(rect, &paint, self.transform, self.clip());
                }
            }
        }
    }

    fn draw_path(&mut self, px: &mut PixmapMut<'_>, path: &render::Path) {
        let transform = path
            .transform
            .map(|t| t.post_concat(self.transform))
            .unwrap_or(self.transform);

        if let Some(fill) = path.fill {
            let mut paint = tiny_skia::Paint::default();
            ts_fill(fill, &mut paint);
            px.fill_path(path.path, &paint, FillRule::Winding, transform, self.clip());
        }
        if let Some(stroke) = path.stroke {
            let mut paint = tiny_skia::Paint::default();
            let stroke = ts_stroke(stroke, &mut paint);
            px.stroke_path(path.path, &paint, &stroke, transform, self.clip());
        }
    }

    fn draw_label(&mut self, label: &render::Label) {
        log::trace!("raster surface skips label {}", label.text);
    }

    fn push_clip(&mut self, clip: &render::Clip) {
        let transform = clip
            .transform
            .map(|t| t.post_concat(self.transform))
            .unwrap_or(self.transform);
        let mask = clip.rect.to_path().and_then(|path| match self.clip() {
            Some(current) => {
                let mut mask = current.clone();
                mask.intersect_path(&path, FillRule::Winding, false, transform);
                Some(mask)
            }
            None => {
                let mut mask = Mask::new(self.width, self.height)?;
                mask.fill_path(&path, FillRule::Winding, false, transform);
                Some(mask)
            }
        });
        if mask.is_none() {
            log::warn!("could not build clip mask for {:?}", clip.rect);
        }
        self.clips.push(mask);
    }

    fn pop_clip(&mut self) {
        if self.clips.pop().is_none() {
            log::warn!("pop_clip without matching push_clip");
        }
    }
}

impl render::Surface for PxlSurface {
    fn prepare(&mut self, size: geom::Size) {
        self.state.prepare(size)
    }

    fn fill(&mut self, fill: render::Paint) {
        let mut px = self.pixmap.as_mut();
        self.state.fill(&mut px, fill)
    }

    fn draw_path(&mut self, path: &render::Path) {
        let mut px = self.pixmap.as_mut();
        self.state.draw_path(&mut px, path)
    }

    fn draw_label(&mut self, label: &render::Label) {
        self.state.draw_label(label)
    }

    fn push_clip(&mut self, clip: &render::Clip) {
        self.state.push_clip(clip)
    }

    fn pop_clip(&mut self) {
        self.state.pop_clip()
    }
}

impl render::Surface for PxlSurfaceRef<'_> {
    fn prepare(&mut self, size: geom::Size) {
        self.state.prepare(size)
    }

    fn fill(&mut self, fill: render::Paint) {
        self.state.fill(&mut self.pixmap, fill)
    }

    fn draw_path(&mut self, path: &render::Path) {
        self.state.draw_path(&mut self.pixmap, path)
    }

    fn draw_label(&mut self, label: &render::Label) {
        self.state.draw_label(label)
    }

    fn push_clip(&mut self, clip: &render::Clip) {
        self.state.push_clip(clip)
    }

    fn pop_clip(&mut self) {
        self.state.pop_clip()
    }
}

fn ts_color(color: ColorU8) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.red(), color.green(), color.blue(), color.alpha())
}

fn ts_fill(fill: render::Paint, paint: &mut tiny_skia::Paint) {
    match fill {
        render::Paint::Solid(color) => paint.set_color(ts_color(color)),
        render::Paint::LinearGradient(grad) => {
            let shader = tiny_skia::LinearGradient::new(
                grad.start,
                grad.end,
                vec![
                    tiny_skia::GradientStop::new(0.0, ts_color(grad.from)),
                    tiny_skia::GradientStop::new(1.0, ts_color(grad.to)),
                ],
                tiny_skia::SpreadMode::Pad,
                tiny_skia::Transform::identity(),
            );
            match shader {
                Some(shader) => paint.shader = shader,
                // degenerate gradient
                None => paint.set_color(ts_color(grad.from)),
            }
        }
    }
    paint.force_hq_pipeline = true;
}

fn ts_stroke(stroke: render::Stroke, paint: &mut tiny_skia::Paint) -> tiny_skia::Stroke {
    paint.force_hq_pipeline = true;
    paint.set_color(ts_color(stroke.color));

    let mut ts = tiny_skia::Stroke {
        width: stroke.width,
        ..Default::default()
    };

    match stroke.pattern {
        render::LinePattern::Solid => (),
        render::LinePattern::Dash(dash) => {
            let array = dash.iter().map(|d| d * stroke.width).collect();
            ts.dash = tiny_skia::StrokeDash::new(array, 0.0);
        }
    }
    ts
}
