use sigmaview::marker::{draw_marker, style_event};
use sigmaview::render::Surface;
use sigmaview::ruler::RulerStyle;
use sigmaview::scheme::{ColorScheme, Interpolation};
use sigmaview::settings::Settings;
use sigmaview::viewport::{ViewportRulers, WorldView};
use sigmaview::{color, geom};

use crate::{PxlHarness, SvgHarness, TestHarness, count_elements, is_ink, px};

const RULER: f32 = 20.0;

/// World x in 100..300 and y in -50..50 on a 400x200 canvas
fn view() -> WorldView {
    WorldView {
        x0: 100.0,
        y0: 50.0,
        x1: 300.0,
        y1: -50.0,
        size: geom::Size::new(400.0, 200.0),
    }
}

fn world_to_canvas(v: &WorldView, x: f64, y: f64) -> geom::Point {
    let sx = v.size.width() as f64 / (v.x1 - v.x0);
    let sy = v.size.height() as f64 / (v.y0 - v.y1);
    geom::Point::from_xy(
        (RULER as f64 + (x - v.x0) * sx) as f32,
        (RULER as f64 + (v.y0 - y) * sy) as f32,
    )
}

#[test]
fn map_rulers_pxl() {
    let mut rulers = ViewportRulers::new().unwrap();
    rulers.update(&view()).unwrap();
    let hz = geom::Rect::from_xywh(RULER, 0.0, 400.0, RULER);
    let vt = geom::Rect::from_xywh(0.0, RULER, RULER, 200.0);

    let pxl = PxlHarness::draw("map/rulers", 420, 220, |s| {
        rulers.paint(s, &hz, &vt, &RulerStyle::default())
    });
    assert!(!rulers.needs_redraw());

    // 2 px per unit: majors every 50 units, world x = 200 at canvas x = 200
    assert!(is_ink(px(&pxl, 20 + 200, 3)));
    // world y = 0 in the middle of the canvas height
    assert!(is_ink(px(&pxl, 3, 20 + 100)));
}

#[test]
fn map_events_svg() {
    let settings = Settings::from_json(r#"{"interpolation": "flat-end"}"#).unwrap();
    let v = view();
    let events = [(150.0, 0.0, 20.0), (250.0, 25.0, 80.0), (200.0, -40.0, 4000.0)];

    let svg = SvgHarness::draw("map/events", 420, 220, |s| {
        for (x, y, energy) in events {
            let marker = style_event(energy, Some(&settings.levels), settings.interpolation).unwrap();
            draw_marker(s, world_to_canvas(&v, x, y), 2.0, &marker);
        }
    });
    assert_eq!(count_elements(&svg, "text"), 3);
    assert_eq!(count_elements(&svg, "path"), 6);
    // flat-end paints every event inside the levels with the upper color
    assert!(svg.contains("stroke=\"#ff0000\""));
    assert!(!svg.contains("stroke=\"#0000ff\""));
    assert!(svg.contains("4\u{22c5}10"));
}

#[test]
fn map_event_without_levels_pxl() {
    let v = view();
    let marker = style_event(std::f64::consts::E, None, Interpolation::Linear).unwrap();
    let center = world_to_canvas(&v, 200.0, 0.0);
    let pxl = PxlHarness::draw("map/event", 420, 220, |s| {
        s.fill(color::WHITE.into());
        draw_marker(s, center, 2.0, &marker)
    });
    // radius 5 world units, 10 px
    assert!(is_ink(px(&pxl, center.x as u32, center.y as u32)));
    assert_eq!(px(&pxl, center.x as u32 + 5, center.y as u32), color::WHITE);
    assert!(px(&pxl, center.x as u32 + 10, center.y as u32).red() < 230);

    let scheme = ColorScheme::default();
    let red = style_event(1e5, Some(&scheme), Interpolation::Linear).unwrap();
    assert_eq!(red.color, color::RED);
}
