//! Gradient strips: a color scheme sampled across a span of pixel columns.

use crate::render::{self, Surface};
use crate::scheme::{self, ColorScheme, Interpolation};
use crate::{ColorU8, color, geom};

/// Sample `scheme` at `columns` evenly spaced positions from its smallest stop position.
///
/// Column `x` samples position `min + x * range / columns`.
/// An empty scheme is white and a single stop scheme is uniformly colored.
pub fn sample_gradient(scheme: &ColorScheme, columns: usize, mode: Interpolation) -> Vec<ColorU8> {
    let stops = scheme.stops();
    let (min, range) = match (scheme.min_pos(), scheme.range()) {
        (Some(min), Some(range)) if stops.len() > 1 => (min, range),
        _ => {
            let c = stops.first().map(|s| s.color).unwrap_or(color::WHITE);
            return vec![c; columns];
        }
    };

    if !(range > 0.0) {
        log::warn!("gradient of {} stops without span, painted solid", stops.len());
        return vec![scheme.get_color_at(min, mode); columns];
    }

    let step = range / columns as f64;
    let last_pair = stops.len() - 2;
    let mut idx = 0;
    let mut res = Vec::with_capacity(columns);
    for x in 0..columns {
        let pos = min + x as f64 * step;
        while idx < last_pair && pos > stops[idx + 1].position {
            idx += 1;
        }
        let (c0, c1) = (&stops[idx], &stops[idx + 1]);
        let ratio = scheme::bracket_ratio(c0.position, c1.position, pos);
        res.push(mode.blend(c0.color, c1.color, ratio));
    }
    res
}

/// Paint `scheme` across `rect`, one sample per pixel column.
///
/// Neighbouring columns of identical color are merged in a single rectangle.
pub fn render_gradient<S>(surface: &mut S, rect: &geom::Rect, scheme: &ColorScheme, mode: Interpolation)
where
    S: Surface + ?Sized,
{
    if rect.is_empty() {
        return;
    }
    let columns = rect.width().round() as usize;
    if columns == 0 {
        return;
    }

    let colors = sample_gradient(scheme, columns, mode);

    let mut start = 0;
    while start < columns {
        let c = colors[start];
        let mut end = start + 1;
        while end < columns && colors[end] == c {
            end += 1;
        }
        let width = if end == columns {
            rect.width() - start as f32
        } else {
            (end - start) as f32
        };
        if let Some(run) = geom::Rect::try_from_xywh(rect.x() + start as f32, rect.y(), width, rect.height()) {
            surface.draw_rect(&render::Rect {
                rect: run,
                fill: Some(c.into()),
                stroke: None,
                transform: None,
            });
        }
        start = end;
    }
}
