#![cfg(test)]

use sigmaview::ColorU8;
use sigmaview_pxl::PxlSurface;

mod harness;
mod tests;

pub(crate) use harness::{PxlHarness, SvgHarness, TestHarness};

/// Whether `c` is close to the black ink used for ticks
fn is_ink(c: ColorU8) -> bool {
    c.red() < 40 && c.green() < 40 && c.blue() < 40
}

/// Whether `c` is a light background pixel
fn is_paper(c: ColorU8) -> bool {
    c.red() > 200 && c.green() > 200 && c.blue() > 200
}

fn px(surface: &PxlSurface, x: u32, y: u32) -> ColorU8 {
    surface
        .pixel(x, y)
        .unwrap_or_else(|| panic!("pixel ({}, {}) out of the surface", x, y))
}

/// Count the occurrences of an SVG element
fn count_elements(svg: &str, tag: &str) -> usize {
    svg.matches(&format!("<{} ", tag)).count() + svg.matches(&format!("<{}>", tag)).count()
}
