use sigmaview::gradient::render_gradient;
use sigmaview::scheme::{ColorScheme, ColorStop, Interpolation};
use sigmaview::{ColorU8, color, geom};

use crate::{PxlHarness, SvgHarness, TestHarness, count_elements, px};

fn rgb_scheme() -> ColorScheme {
    ColorScheme::new(vec![
        ColorStop::new(color::RED, 0.0),
        ColorStop::new(color::GREEN, 50.0),
        ColorStop::new(color::BLUE, 100.0),
    ])
}

#[test]
fn gradient_levels_pxl() {
    let scheme = ColorScheme::default();
    let rect = geom::Rect::from_xywh(0.0, 0.0, 100.0, 10.0);
    let pxl = PxlHarness::draw("gradient/levels", 100, 10, |s| {
        render_gradient(s, &rect, &scheme, Interpolation::Linear)
    });
    assert_eq!(px(&pxl, 0, 5), color::BLUE);
    assert_eq!(px(&pxl, 50, 5), ColorU8::from_rgb(128, 0, 128));
    assert_eq!(px(&pxl, 99, 5), ColorU8::from_rgb(252, 0, 3));
    for x in 0..100 {
        assert_eq!(px(&pxl, x, 0), px(&pxl, x, 9));
    }
}

#[test]
fn gradient_modes_pxl() {
    let scheme = rgb_scheme();
    let rect = geom::Rect::from_xywh(0.0, 0.0, 100.0, 4.0);
    let cases = [
        (Interpolation::FlatStart, color::RED, color::GREEN),
        (Interpolation::FlatEnd, color::GREEN, color::BLUE),
        (
            Interpolation::FlatMiddle,
            ColorU8::from_rgb(128, 128, 0),
            ColorU8::from_rgb(0, 128, 128),
        ),
    ];
    for (mode, first, second) in cases {
        let name = format!("gradient/{}", mode);
        let pxl = PxlHarness::draw(&name, 100, 4, |s| render_gradient(s, &rect, &scheme, mode));
        assert_eq!(px(&pxl, 25, 2), first, "{}", mode);
        assert_eq!(px(&pxl, 75, 2), second, "{}", mode);
    }

    let pxl = PxlHarness::draw("gradient/reverse", 100, 4, |s| {
        render_gradient(s, &rect, &scheme, Interpolation::Reverse)
    });
    // reverse starts each bracket at its upper stop
    assert_eq!(px(&pxl, 1, 2).green(), 250);
}

#[test]
fn gradient_degenerate_pxl() {
    let rect = geom::Rect::from_xywh(0.0, 0.0, 30.0, 3.0);

    let empty = ColorScheme::new(vec![]);
    let pxl = PxlHarness::draw("gradient/empty", 30, 3, |s| {
        render_gradient(s, &rect, &empty, Interpolation::Linear)
    });
    assert_eq!(px(&pxl, 15, 1), color::WHITE);

    let flat = ColorScheme::basic(color::RED, 5.0, color::BLUE, 5.0);
    let pxl = PxlHarness::draw("gradient/flat", 30, 3, |s| {
        render_gradient(s, &rect, &flat, Interpolation::Cosine)
    });
    assert_eq!(px(&pxl, 0, 1), px(&pxl, 29, 1));
}

#[test]
fn gradient_runs_svg() {
    let scheme = rgb_scheme();
    let rect = geom::Rect::from_xywh(0.0, 0.0, 100.0, 4.0);
    let flat = SvgHarness::draw("gradient/flat-start", 100, 4, |s| {
        render_gradient(s, &rect, &scheme, Interpolation::FlatStart)
    });
    assert_eq!(count_elements(&flat, "rect"), 2);
    assert!(flat.contains("fill=\"#ff0000\""));
    assert!(flat.contains("fill=\"#00ff00\""));
    assert!(!flat.contains("fill=\"#0000ff\""));

    let linear = SvgHarness::draw("gradient/linear", 100, 4, |s| {
        render_gradient(s, &rect, &scheme, Interpolation::Linear)
    });
    assert_eq!(count_elements(&linear, "rect"), 100);
}
