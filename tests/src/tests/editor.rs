use sigmaview::editor::{GestureOutcome, StopEditor};
use sigmaview::gradient::render_gradient;
use sigmaview::render::Recorder;
use sigmaview::ruler::{Ruler, RulerConfig, RulerStyle};
use sigmaview::scheme::{ColorScheme, Interpolation};
use sigmaview::{ColorU8, color, geom};

use crate::{PxlHarness, SvgHarness, TestHarness, count_elements, px};

const WIDTH: u32 = 200;

fn strip() -> geom::Rect {
    geom::Rect::from_xywh(0.0, 0.0, WIDTH as f32, 20.0)
}

#[test]
fn editor_handles_pxl() {
    let scheme = ColorScheme::default();
    let mut ed = StopEditor::new(scheme.clone(), WIDTH as f32);
    ed.add_stop(color::GREEN, 50.0).unwrap();

    let mut plain = ed.scheme().clone();
    plain.sort();
    let bare = PxlHarness::draw("editor/bare", WIDTH, 20, |s| {
        render_gradient(s, &strip(), &plain, Interpolation::Linear)
    });
    let edited = PxlHarness::draw("editor/handles", WIDTH, 20, |s| {
        ed.draw(s, &strip(), Interpolation::Linear)
    });

    // the green stop sits in the middle of the strip, its handle spans 95..105
    assert_eq!(px(&bare, 100, 10), color::GREEN);
    assert_ne!(px(&edited, 95, 10), px(&bare, 95, 10));
    assert_eq!(px(&edited, 100, 10), px(&bare, 100, 10));
    assert_eq!(px(&edited, 100, 1), px(&bare, 100, 1));
    assert_eq!(px(&edited, 50, 10), px(&bare, 50, 10));
}

#[test]
fn editor_drag_session() {
    let mut ed = StopEditor::new(ColorScheme::default(), WIDTH as f32);
    let mid = ed.add_stop(color::GREEN, 50.0).unwrap();
    assert_eq!(mid, 1);

    // drag the middle stop across the last one
    ed.pointer_down(100.0);
    assert!(ed.pointer_move(150.0).unwrap());
    assert!(ed.pointer_move(230.0).unwrap());
    assert!(!ed.scheme().is_sorted());

    // rendering during the drag uses sorted stops
    let svg = SvgHarness::draw("editor/dragging", WIDTH, 20, |s| {
        ed.draw(s, &strip(), Interpolation::FlatStart)
    });
    assert_eq!(count_elements(&svg, "rect"), 2 + 3);

    assert_eq!(ed.pointer_up(230.0), GestureOutcome::DragCommitted(2));
    let scheme = ed.apply();
    assert!(scheme.is_sorted());
    assert_eq!(scheme.stops()[2].color, color::GREEN);
    assert_eq!(scheme.stops()[2].position, 115.0);
    assert_eq!(scheme.stops()[1].color, color::RED);
}

#[test]
fn editor_click_to_add() {
    let mut ed = StopEditor::new(ColorScheme::default(), WIDTH as f32);
    ed.pointer_down(50.0);
    let outcome = ed.pointer_up(50.0);
    let GestureOutcome::AddStopAt(pos) = outcome else {
        panic!("unexpected outcome {:?}", outcome);
    };
    assert_eq!(pos, 25.0);
    let idx = ed.add_stop(ColorU8::from_rgb(10, 20, 30), pos).unwrap();
    assert_eq!(idx, 1);

    let mut rec = Recorder::new();
    ed.draw(&mut rec, &strip(), Interpolation::Linear);
    let handles = rec
        .commands()
        .iter()
        .filter(|c| matches!(c, sigmaview::render::Command::Rect { fill: None, .. }))
        .count();
    assert_eq!(handles, 3);
}

#[test]
fn editor_ruler_alignment() {
    let mut ed = StopEditor::new(ColorScheme::default(), WIDTH as f32);
    let mut ruler = Ruler::new(RulerConfig::horizontal()).unwrap();
    ed.sync_ruler(&mut ruler).unwrap();
    assert_eq!(ruler.config().pixels_per_unit(), 2.0);
    assert_eq!(ruler.config().factor(), 50.0);

    let mut rec = Recorder::new();
    ruler.paint(&mut rec, &strip(), &RulerStyle::default());
    let labels: Vec<String> = rec.labels().map(|(l, _)| l.to_string()).collect();
    assert_eq!(labels, ["0", "50"]);

    // stop at 50 sits under the "50" label
    ed.add_stop(color::GREEN, 50.0).unwrap();
    assert_eq!(ed.pixel_of(50.0), 100.0);

    // a wider strip rescales the ruler
    ed.set_width(400.0);
    ed.sync_ruler(&mut ruler).unwrap();
    assert_eq!(ruler.config().pixels_per_unit(), 4.0);
    assert_eq!(ruler.config().factor(), 20.0);
}
