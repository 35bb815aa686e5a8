/// An 8-bit RGBA color.
///
/// Constructors take alpha as an opacity percentage, where 0 is fully
/// transparent and 100 fully opaque.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Color {
    /// The red component of the color.
    pub r: u8,
    /// The green component of the color.
    pub g: u8,
    /// The blue component of the color.
    pub b: u8,
    /// The alpha component of the color, 0 to 255.
    pub a: u8,
}

impl Color {
    /// Creates a new color. Channels are clamped to `0..=255` and `alpha` is
    /// a percentage clamped to `0..=100`.
    ///
    /// The stored alpha is `alpha * 255 / 100` truncated toward zero, so an
    /// alpha of 50 is stored as 127.
    pub fn from_rgba(r: i32, g: i32, b: i32, alpha: f32) -> Color {
        Color {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
            a: (alpha * 255. / 100.).trunc().clamp(0., 255.) as u8,
        }
    }

    /// Creates a new opaque color.
    pub fn from_rgb(r: i32, g: i32, b: i32) -> Color {
        Color::from_rgba(r, g, b, 100.)
    }

    /// Creates a color from raw 8-bit components.
    pub const fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    /// Returns the alpha as an opacity percentage.
    pub fn alpha_percent(&self) -> f32 {
        self.a as f32 * 100. / 255.
    }

    /// Returns true if the color has no transparency.
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Returns the color with its alpha replaced by `a`.
    pub const fn with_alpha_byte(self, a: u8) -> Color {
        Color { a, ..self }
    }

    pub(crate) fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

fn clamp_channel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

#[allow(missing_docs)]
impl Color {
    pub const BLACK: Color = Color::from_bytes(0, 0, 0, 255);
    pub const WHITE: Color = Color::from_bytes(255, 255, 255, 255);
    pub const RED: Color = Color::from_bytes(255, 0, 0, 255);
    pub const GREEN: Color = Color::from_bytes(0, 255, 0, 255);
    pub const BLUE: Color = Color::from_bytes(0, 0, 255, 255);
    pub const YELLOW: Color = Color::from_bytes(255, 255, 0, 255);
    pub const CYAN: Color = Color::from_bytes(0, 255, 255, 255);
    pub const MAGENTA: Color = Color::from_bytes(255, 0, 255, 255);
    pub const TRANSPARENT: Color = Color::from_bytes(0, 0, 0, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_percent_is_truncated() {
        assert_eq!(Color::from_rgba(0, 0, 0, 50.).a, 127);
        assert_eq!(Color::from_rgba(0, 0, 0, 100.).a, 255);
        assert_eq!(Color::from_rgba(0, 0, 0, 0.).a, 0);
        assert_eq!(Color::from_rgba(0, 0, 0, 1.).a, 2);
    }

    #[test]
    fn components_are_clamped() {
        let c = Color::from_rgba(-20, 300, 128, 250.);
        assert_eq!(c, Color::from_bytes(0, 255, 128, 255));
        assert_eq!(Color::from_rgba(1, 2, 3, -5.).a, 0);
    }

    #[test]
    fn opaque_by_default() {
        assert!(Color::from_rgb(10, 20, 30).is_opaque());
        assert!(!Color::from_rgba(10, 20, 30, 99.).is_opaque());
        assert_eq!(Color::WHITE.alpha_percent(), 100.);
    }
}
