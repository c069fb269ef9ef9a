//! Styling of seismic events on the map: color from the energy level scheme,
//! radius growing with the logarithm of the energy, and an energy label.

use crate::axis::{TickLabel, trim_decimals};
use crate::render::{self, Surface};
use crate::scheme::{ColorScheme, Interpolation};
use crate::{ColorU8, Error, color, geom, params};

/// Appearance of one seismic event
#[derive(Debug, Clone, PartialEq)]
pub struct EventMarker {
    /// Color of the circle, point and label
    pub color: ColorU8,
    /// Circle radius, in world units
    pub radius: f64,
    /// Energy label
    pub label: TickLabel,
}

/// Radius of an event circle, in world units: `5 * ln(energy)`
pub fn energy_radius(energy: f64) -> Result<f64, Error> {
    if !energy.is_finite() || energy <= 1.0 {
        return Err(Error::InvalidEnergy(energy));
    }
    Ok(params::MARKER_RADIUS_SCALE * energy.ln())
}

/// Energy label: plain below 100, otherwise a 2 decimals mantissa and a power of ten
pub fn energy_label(energy: f64) -> TickLabel {
    if !(energy >= 100.0) || !energy.is_finite() {
        return TickLabel::plain(energy.to_string());
    }
    let mut mantissa = energy;
    let mut exp = 0;
    while mantissa >= 10.0 {
        mantissa /= 10.0;
        exp += 1;
    }
    let mut text = format!("{:.2}", mantissa);
    if text.starts_with("10") {
        mantissa /= 10.0;
        exp += 1;
        text = format!("{:.2}", mantissa);
    }
    TickLabel::scientific(trim_decimals(text), exp)
}

/// Style an event of the given energy.
/// Without scheme, events are black.
pub fn style_event(
    energy: f64,
    scheme: Option<&ColorScheme>,
    mode: Interpolation,
) -> Result<EventMarker, Error> {
    let radius = energy_radius(energy)?;
    let color = match scheme {
        Some(scheme) => scheme.get_color_at(energy, mode),
        None => color::BLACK,
    };
    Ok(EventMarker {
        color,
        radius,
        label: energy_label(energy),
    })
}

/// Draw an event centered on pixel `center`, world units being scaled by `pixels_per_unit`.
/// The label is drawn under the circle center.
pub fn draw_marker<S>(surface: &mut S, center: geom::Point, pixels_per_unit: f32, marker: &EventMarker)
where
    S: Surface + ?Sized,
{
    let radius = marker.radius as f32 * pixels_per_unit;
    if let Some(circle) = geom::PathBuilder::from_circle(center.x, center.y, radius) {
        surface.draw_path(&render::Path {
            path: &circle,
            fill: None,
            stroke: Some(render::Stroke::solid(marker.color, 1.0)),
            transform: None,
        });
    }
    if let Some(point) = geom::PathBuilder::from_circle(center.x, center.y, 1.5) {
        surface.draw_path(&render::Path {
            path: &point,
            fill: Some(marker.color.into()),
            stroke: None,
            transform: None,
        });
    }
    surface.draw_label(&render::Label {
        text: &marker.label,
        anchor: geom::Point::from_xy(
            center.x,
            center.y + params::MARKER_LABEL_GAP * pixels_per_unit,
        ),
        font_size: params::MARKER_LABEL_HEIGHT * pixels_per_unit,
        sup_scale: 0.7,
        color: marker.color,
        rotation: 0.0,
    });
}
