//! 8-bit RGBA colors.

/// An 8-bit per channel RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorU8 {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

/// Opaque black
pub const BLACK: ColorU8 = ColorU8::from_rgb(0, 0, 0);
/// Opaque white
pub const WHITE: ColorU8 = ColorU8::from_rgb(255, 255, 255);
/// Opaque red
pub const RED: ColorU8 = ColorU8::from_rgb(255, 0, 0);
/// Opaque green
pub const GREEN: ColorU8 = ColorU8::from_rgb(0, 255, 0);
/// Opaque blue
pub const BLUE: ColorU8 = ColorU8::from_rgb(0, 0, 255);
/// Fully transparent black
pub const TRANSPARENT: ColorU8 = ColorU8::from_rgba(0, 0, 0, 0);

impl ColorU8 {
    /// Build an opaque color from its red, green and blue channels
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        ColorU8 { r, g, b, a: 255 }
    }

    /// Build a color from its red, green, blue and alpha channels
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        ColorU8 { r, g, b, a }
    }

    /// Build an opaque gray color
    pub const fn gray(v: u8) -> Self {
        ColorU8::from_rgb(v, v, v)
    }

    /// The red, green and blue channels
    pub const fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// The red, green, blue and alpha channels
    pub const fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// The red channel
    pub const fn red(&self) -> u8 {
        self.r
    }

    /// The green channel
    pub const fn green(&self) -> u8 {
        self.g
    }

    /// The blue channel
    pub const fn blue(&self) -> u8 {
        self.b
    }

    /// The alpha channel
    pub const fn alpha(&self) -> u8 {
        self.a
    }

    /// The opacity in `[0, 1)`, or `None` if the color is fully opaque
    pub const fn opacity(&self) -> Option<f32> {
        if self.a == 255 {
            None
        } else {
            Some(self.a as f32 / 255.0)
        }
    }

    /// The `#rrggbb` representation, alpha excluded
    pub fn html(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// The same color with a new alpha channel
    pub const fn with_alpha(self, a: u8) -> Self {
        ColorU8 { a, ..self }
    }

    /// The same color, fully opaque
    pub const fn without_opacity(self) -> Self {
        ColorU8 { a: 255, ..self }
    }

    /// The complementary color (`255 - channel`), alpha preserved.
    /// Used to draw handles that stay visible over any background.
    pub const fn inverted(self) -> Self {
        ColorU8 {
            r: 255 - self.r,
            g: 255 - self.g,
            b: 255 - self.b,
            a: self.a,
        }
    }
}

impl From<[u8; 3]> for ColorU8 {
    fn from([r, g, b]: [u8; 3]) -> Self {
        ColorU8::from_rgb(r, g, b)
    }
}

impl From<(u8, u8, u8)> for ColorU8 {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        ColorU8::from_rgb(r, g, b)
    }
}
