use sigmaview::geom;
use sigmaview::render::Recorder;
use sigmaview::ruler::{Ruler, RulerConfig, RulerStyle, draw_ruler};

use crate::{PxlHarness, SvgHarness, TestHarness, count_elements, is_ink, is_paper, px};

/// 20 pixels per unit: majors every 5 units (100 px), minors every 20 px
fn horizontal() -> Ruler {
    let mut ruler = Ruler::new(RulerConfig::horizontal()).unwrap();
    ruler.set_scale(20.0, false).unwrap();
    ruler.set_offset(0.0, true);
    ruler
}

#[test]
fn ruler_horizontal_pxl() {
    let mut ruler = horizontal();
    let rect = geom::Rect::from_xywh(0.0, 0.0, 200.0, 20.0);
    let pxl = PxlHarness::draw("ruler/horizontal", 200, 20, |s| {
        ruler.paint(s, &rect, &RulerStyle::default())
    });
    assert!(!ruler.needs_redraw());

    // major tick at 5 units, full height
    assert!(is_ink(px(&pxl, 100, 3)));
    assert!(is_ink(px(&pxl, 100, 17)));
    // minor tick at 1 unit, lower half only
    assert!(is_ink(px(&pxl, 20, 15)));
    assert!(is_paper(px(&pxl, 20, 4)));
    // background between ticks
    assert!(is_paper(px(&pxl, 50, 10)));
    // gradient background darkens towards the bottom
    assert!(px(&pxl, 50, 2).red() > px(&pxl, 50, 17).red());
    // border is drawn over the tick at pixel 0
    let border = px(&pxl, 0, 10);
    assert!((110..=130).contains(&border.red()), "border: {:?}", border);
}

#[test]
fn ruler_vertical_inverted_pxl() {
    let config = RulerConfig::vertical().with_inverted(true);
    let mut ruler = Ruler::new(config).unwrap();
    ruler.set_scale(20.0, false).unwrap();
    // world 0 lands 10 px above the bottom
    ruler.set_offset(0.5, false);
    let rect = geom::Rect::from_xywh(0.0, 0.0, 20.0, 200.0);
    let pxl = PxlHarness::draw("ruler/vertical-inverted", 20, 200, |s| {
        ruler.paint(s, &rect, &RulerStyle::default())
    });

    // majors at world 0 and 5, counted from the bottom
    assert!(is_ink(px(&pxl, 4, 190)));
    assert!(is_ink(px(&pxl, 4, 90)));
    assert!(is_paper(px(&pxl, 4, 110)));
    // minor at world 9, right half only
    assert!(is_ink(px(&pxl, 15, 10)));
    assert!(is_paper(px(&pxl, 4, 10)));
}

#[test]
fn ruler_cursor_pxl() {
    let mut ruler = horizontal();
    ruler.set_cursor(Some(57.0), true);
    let rect = geom::Rect::from_xywh(0.0, 0.0, 200.0, 20.0);
    let pxl = PxlHarness::draw("ruler/cursor", 200, 20, |s| {
        ruler.paint(s, &rect, &RulerStyle::default())
    });
    assert!(is_ink(px(&pxl, 57, 3)));
    assert!(is_paper(px(&pxl, 58, 3)));
}

#[test]
fn ruler_offset_rect_pxl() {
    let ruler = horizontal();
    let rect = geom::Rect::from_xywh(30.0, 10.0, 200.0, 20.0);
    let pxl = PxlHarness::draw("ruler/offset-rect", 260, 40, |s| {
        draw_ruler(s, ruler.config(), &rect, &RulerStyle::default())
    });
    assert!(is_ink(px(&pxl, 130, 15)));
    // clipped to the ruler rect
    assert_eq!(px(&pxl, 130, 5).alpha(), 0);
    assert_eq!(px(&pxl, 130, 35).alpha(), 0);
}

#[test]
fn ruler_svg_matches_commands() {
    let ruler = horizontal().config().clone();
    let rect = geom::Rect::from_xywh(0.0, 0.0, 400.0, 20.0);
    let style = RulerStyle::default();

    let mut rec = Recorder::new();
    draw_ruler(&mut rec, &ruler, &rect, &style);
    let lines = rec.lines().count();
    let labels: Vec<String> = rec.labels().map(|(l, _)| l.to_string()).collect();
    assert_eq!(labels, ["0", "5", "10", "15"]);

    let svg = SvgHarness::draw("ruler/horizontal", 400, 20, |s| {
        draw_ruler(s, &ruler, &rect, &style)
    });
    assert_eq!(count_elements(&svg, "line"), lines);
    assert_eq!(count_elements(&svg, "text"), labels.len());
    assert_eq!(count_elements(&svg, "clipPath"), 1);
    assert_eq!(count_elements(&svg, "linearGradient"), 1);
    assert!(svg.contains("stroke=\"#787878\""));
}

#[test]
fn ruler_scientific_labels_svg() {
    let mut ruler = Ruler::new(RulerConfig::horizontal()).unwrap();
    // 1 pixel per 1000 units: majors every 50000
    ruler.set_scale(0.001, false).unwrap();
    let rect = geom::Rect::from_xywh(0.0, 0.0, 200.0, 20.0);
    let svg = SvgHarness::draw("ruler/scientific", 200, 20, |s| {
        ruler.paint(s, &rect, &RulerStyle::default())
    });
    assert!(svg.contains("5\u{22c5}10"));
    assert!(svg.contains("baseline-shift=\"super\""));
}

#[test_log::test]
fn ruler_zoom_sequence() {
    let mut ruler = horizontal();
    let rect = geom::Rect::from_xywh(0.0, 0.0, 300.0, 20.0);
    let mut rec = Recorder::new();

    for (ppu, expected) in [(20.0, 5.0), (200.0, 0.5), (2.0, 50.0), (0.02, 5000.0)] {
        ruler.set_scale(ppu, true).unwrap();
        assert_eq!(ruler.config().factor(), expected);
        ruler.paint(&mut rec, &rect, &RulerStyle::default());
        let labels = rec.labels().count();
        assert!((2..=6).contains(&labels), "{} labels at {} ppu", labels, ppu);
        rec.take();
    }
}
