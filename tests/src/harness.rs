use std::path::{Path, PathBuf};

use sigmaview::geom;
use sigmaview::render::Surface;
use sigmaview_pxl::PxlSurface;
use sigmaview_svg::SvgSurface;

/// Renders a scene on a given surface kind.
///
/// Set `SIGMAVIEW_TEST_SAVE_ACTUAL` to keep the rendered files under `actual/`
/// for visual inspection.
pub trait TestHarness {
    type Drawn;

    fn id() -> &'static str;
    fn file_ext() -> &'static str;

    fn actual_file_path(name: &str) -> PathBuf {
        let file_name = format!("{}{}", name, Self::file_ext());
        let tests_dir = env!("CARGO_MANIFEST_DIR");
        Path::new(tests_dir).join("actual").join(file_name)
    }

    fn render<F>(width: u32, height: u32, scene: F) -> Self::Drawn
    where
        F: FnOnce(&mut dyn Surface);

    fn serialize(file: &Path, drawn: &Self::Drawn);

    fn draw<F>(name: &str, width: u32, height: u32, scene: F) -> Self::Drawn
    where
        F: FnOnce(&mut dyn Surface),
    {
        let drawn = Self::render(width, height, scene);
        if std::env::var("SIGMAVIEW_TEST_SAVE_ACTUAL").is_ok() {
            let file = Self::actual_file_path(name);
            std::fs::create_dir_all(file.parent().unwrap()).unwrap();
            Self::serialize(&file, &drawn);
            log::info!("{} scene \"{}\" written to {}", Self::id(), name, file.display());
        }
        drawn
    }
}

pub struct PxlHarness;

impl TestHarness for PxlHarness {
    type Drawn = PxlSurface;

    fn id() -> &'static str {
        "PXL"
    }

    fn file_ext() -> &'static str {
        ".png"
    }

    fn render<F>(width: u32, height: u32, scene: F) -> Self::Drawn
    where
        F: FnOnce(&mut dyn Surface),
    {
        let mut pxl = PxlSurface::new(width, height).unwrap();
        pxl.prepare(geom::Size::new(width as f32, height as f32));
        scene(&mut pxl);
        pxl
    }

    fn serialize(file: &Path, drawn: &Self::Drawn) {
        drawn.save_png(file).unwrap();
    }
}

pub struct SvgHarness;

impl TestHarness for SvgHarness {
    type Drawn = String;

    fn id() -> &'static str {
        "SVG"
    }

    fn file_ext() -> &'static str {
        ".svg"
    }

    fn render<F>(width: u32, height: u32, scene: F) -> Self::Drawn
    where
        F: FnOnce(&mut dyn Surface),
    {
        let mut svg = SvgSurface::new(width, height);
        svg.prepare(geom::Size::new(width as f32, height as f32));
        scene(&mut svg);
        svg.to_svg().unwrap()
    }

    fn serialize(file: &Path, drawn: &Self::Drawn) {
        std::fs::write(file, drawn).unwrap();
    }
}
