//! SVG rendering surface for sigmaview.
//!
//! Labels are written as native `<text>` elements, the exponent of scientific
//! labels in a smaller raised `<tspan>`. Gradient paints become `<linearGradient>` definitions.

use std::path::Path;
use std::{fmt, io};

use sigmaview::geom::{self, Transform};
use sigmaview::render::{self, Surface};
use svg::Node;
use svg::node::element;

/// Errors of the SVG surface
#[derive(Debug)]
pub enum Error {
    /// Writing the document failed
    Io(io::Error),
    /// The document was written with clips still pushed
    UnbalancedClip(usize),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::UnbalancedClip(n) => write!(f, "Unbalanced clip stack: {} clip(s) still pushed", n),
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

/// A surface building an SVG document
#[derive(Debug)]
pub struct SvgSurface {
    doc: svg::Document,
    clip_num: u32,
    grad_num: u32,
    group_stack: Vec<element::Group>,
}

impl SvgSurface {
    /// Create a document of the given size in pixels
    pub fn new(width: u32, height: u32) -> Self {
        let doc = svg::Document::new()
            .set("width", width)
            .set("height", height);
        SvgSurface {
            doc,
            clip_num: 0,
            grad_num: 0,
            group_stack: vec![],
        }
    }

    /// Write the document to a file
    pub fn save_svg<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        self.check_balanced()?;
        svg::save(path, &self.doc)?;
        Ok(())
    }

    /// Write the document to `dest`
    pub fn write<W>(&self, dest: &mut W) -> Result<(), Error>
    where
        W: io::Write,
    {
        self.check_balanced()?;
        svg::write(dest, &self.doc)?;
        Ok(())
    }

    /// The document as a string
    pub fn to_svg(&self) -> Result<String, Error> {
        self.check_balanced()?;
        Ok(self.doc.to_string())
    }

    fn check_balanced(&self) -> Result<(), Error> {
        if self.group_stack.is_empty() {
            Ok(())
        } else {
            Err(Error::UnbalancedClip(self.group_stack.len()))
        }
    }
}

impl Surface for SvgSurface {
    fn prepare(&mut self, size: geom::Size) {
        self.doc
            .assign("viewBox", (0, 0, size.width(), size.height()));
    }

    fn fill(&mut self, fill: render::Paint) {
        let mut node = element::Rectangle::new()
            .set("width", "100%")
            .set("height", "100%");
        self.assign_fill(&mut node, Some(&fill));
        self.append_node(node);
    }

    fn draw_rect(&mut self, rect: &render::Rect) {
        let mut node = rectangle_node(&rect.rect);
        self.assign_fill(&mut node, rect.fill.as_ref());
        assign_stroke(&mut node, rect.stroke.as_ref());
        assign_transform(&mut node, rect.transform);
        self.append_node(node);
    }

    fn draw_line(&mut self, line: &render::Line) {
        let mut node = element::Line::new()
            .set("x1", line.p1.x)
            .set("y1", line.p1.y)
            .set("x2", line.p2.x)
            .set("y2", line.p2.y);
        assign_stroke(&mut node, Some(&line.stroke));
        self.append_node(node);
    }

    fn draw_path(&mut self, path: &render::Path) {
        let mut node = element::Path::new();
        self.assign_fill(&mut node, path.fill.as_ref());
        assign_stroke(&mut node, path.stroke.as_ref());
        assign_transform(&mut node, path.transform);
        node.assign("d", path_data(path.path));
        self.append_node(node);
    }

    fn draw_label(&mut self, label: &render::Label) {
        let text = label.text;
        let (x, y) = (label.anchor.x, label.anchor.y);
        let mut node = element::Text::new(text.base_text())
            .set("x", x)
            .set("y", y)
            .set("dominant-baseline", "hanging")
            .set("font-family", "sans-serif")
            .set("font-size", label.font_size)
            .set("fill", label.color.html());
        if let Some(sup) = text.sup_text() {
            let span = element::TSpan::new(sup)
                .set("font-size", label.font_size * label.sup_scale)
                .set("baseline-shift", "super");
            node.append(span);
        }
        if label.rotation != 0.0 {
            // SVG angles are clockwise
            node.assign("transform", format!("rotate({} {} {})", -label.rotation, x, y));
        }
        self.append_node(node);
    }

    fn push_clip(&mut self, clip: &render::Clip) {
        let clip_id = self.bump_clip_id();
        let clip_id_url = format!("url(#{})", clip_id);
        let mut rect_node = rectangle_node(clip.rect);
        assign_transform(&mut rect_node, clip.transform);
        let node = element::ClipPath::new()
            .set("id", clip_id)
            .add(rect_node);
        self.append_node(node);
        self.group_stack
            .push(element::Group::new().set("clip-path", clip_id_url));
    }

    fn pop_clip(&mut self) {
        match self.group_stack.pop() {
            Some(g) => self.append_node(g),
            None => log::warn!("pop_clip without matching push_clip"),
        }
    }
}

impl SvgSurface {
    fn append_node<T>(&mut self, node: T)
    where
        T: Node,
    {
        match self.group_stack.last_mut() {
            Some(group) => group.append(node),
            None => self.doc.append(node),
        }
    }

    fn bump_clip_id(&mut self) -> String {
        self.clip_num += 1;
        format!("sigmaview-clip{}", self.clip_num)
    }

    fn bump_grad_id(&mut self) -> String {
        self.grad_num += 1;
        format!("sigmaview-grad{}", self.grad_num)
    }

    fn assign_fill<N>(&mut self, node: &mut N, fill: Option<&render::Paint>)
    where
        N: Node,
    {
        match fill {
            Some(render::Paint::Solid(color)) => {
                node.assign("fill", color.html());
                if let Some(opacity) = color.opacity() {
                    node.assign("fill-opacity", opacity);
                }
            }
            Some(render::Paint::LinearGradient(grad)) => {
                let id = self.bump_grad_id();
                let def = element::LinearGradient::new()
                    .set("id", id.clone())
                    .set("gradientUnits", "userSpaceOnUse")
                    .set("x1", grad.start.x)
                    .set("y1", grad.start.y)
                    .set("x2", grad.end.x)
                    .set("y2", grad.end.y)
                    .add(gradient_stop(0.0, grad.from))
                    .add(gradient_stop(1.0, grad.to));
                self.append_node(element::Definitions::new().add(def));
                node.assign("fill", format!("url(#{})", id));
            }
            None => node.assign("fill", "none"),
        }
    }
}

fn gradient_stop(offset: f32, color: sigmaview::ColorU8) -> element::Stop {
    let mut stop = element::Stop::new()
        .set("offset", offset)
        .set("stop-color", color.html());
    if let Some(opacity) = color.opacity() {
        stop.assign("stop-opacity", opacity);
    }
    stop
}

fn assign_transform<N>(node: &mut N, transform: Option<&geom::Transform>)
where
    N: Node,
{
    if let Some(Transform {
        sx,
        kx,
        ky,
        sy,
        tx,
        ty,
    }) = transform
    {
        node.assign(
            "transform",
            format!("matrix({sx} {ky} {kx} {sy} {tx} {ty})"),
        );
    }
}

fn assign_stroke<N>(node: &mut N, stroke: Option<&render::Stroke>)
where
    N: Node,
{
    if let Some(stroke) = stroke {
        let w = stroke.width;
        node.assign("stroke", stroke.color.html());
        node.assign("stroke-width", w);
        if let Some(opacity) = stroke.color.opacity() {
            node.assign("stroke-opacity", opacity);
        }
        match stroke.pattern {
            render::LinePattern::Solid => (),
            render::LinePattern::Dash(dash) => {
                let array: Vec<f32> = dash.iter().map(|d| d * w).collect();
                node.assign("stroke-dasharray", array)
            }
        }
    } else {
        node.assign("stroke", "none");
    }
}

fn path_data(path: &geom::Path) -> element::path::Data {
    let mut data = element::path::Data::new();
    for segment in path.segments() {
        match segment {
            geom::PathSegment::MoveTo(p) => {
                data = data.move_to((p.x, p.y));
            }
            geom::PathSegment::LineTo(p) => {
                data = data.line_to((p.x, p.y));
            }
            geom::PathSegment::QuadTo(p1, p2) => {
                data = data.quadratic_curve_to((p1.x, p1.y, p2.x, p2.y));
            }
            geom::PathSegment::CubicTo(p1, p2, p3) => {
                data = data.cubic_curve_to((p1.x, p1.y, p2.x, p2.y, p3.x, p3.y));
            }
            geom::PathSegment::Close => {
                data = data.close();
            }
        }
    }
    data
}

fn rectangle_node(rect: &geom::Rect) -> element::Rectangle {
    element::Rectangle::new()
        .set("x", rect.x())
        .set("y", rect.y())
        .set("width", rect.width())
        .set("height", rect.height())
}
