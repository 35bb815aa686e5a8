//! The anchor-relative coordinate system.
//!
//! User code works in a Y-up space whose origin `(0, 0)` sits on one of nine
//! reference points of the window, chosen by an [`Anchor`]. The backend
//! surface is Y-down with its origin at the top-left pixel. Every drawing
//! primitive goes through the functions in this module before touching a
//! pixel, so all of them agree on where a coordinate lands.

use std::fmt;

/// A reference point on a rectangle.
///
/// As a window setting, it names the pixel that user-space origin maps to.
/// When placing a sized shape (text, images), it names the point of the
/// shape that is aligned to the requested position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Anchor {
    #[default]
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Anchor {
    /// All anchors, in declaration order.
    pub const ALL: [Anchor; 9] = [
        Anchor::Center,
        Anchor::Top,
        Anchor::Bottom,
        Anchor::Left,
        Anchor::Right,
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
    ];

    /// Parses an anchor name such as `"center"` or `"topleft"`.
    ///
    /// Matching ignores case, `-` and `_`. Unknown names fall back to
    /// [`Anchor::Center`].
    pub fn from_name(name: &str) -> Anchor {
        match normalize_name(name).as_str() {
            "center" => Anchor::Center,
            "top" => Anchor::Top,
            "bottom" => Anchor::Bottom,
            "left" => Anchor::Left,
            "right" => Anchor::Right,
            "topleft" => Anchor::TopLeft,
            "topright" => Anchor::TopRight,
            "bottomleft" => Anchor::BottomLeft,
            "bottomright" => Anchor::BottomRight,
            _ => {
                log::warn!("unknown anchor {:?}, using center", name);
                Anchor::Center
            }
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Anchor::Center => "center",
            Anchor::Top => "top",
            Anchor::Bottom => "bottom",
            Anchor::Left => "left",
            Anchor::Right => "right",
            Anchor::TopLeft => "topleft",
            Anchor::TopRight => "topright",
            Anchor::BottomLeft => "bottomleft",
            Anchor::BottomRight => "bottomright",
        };
        f.write_str(name)
    }
}

/// How a window reacts when the user resizes it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Resizable {
    /// The window cannot be resized; resize events are ignored.
    #[default]
    Fixed,
    /// Only the width follows the resize.
    Width,
    /// Only the height follows the resize.
    Height,
    /// Both axes follow the resize.
    Both,
    /// Both axes follow, constrained to the window's original aspect ratio.
    Aspect,
}

impl Resizable {
    /// Parses a policy name such as `"both"` or `"aspect"`.
    ///
    /// Unknown names fall back to [`Resizable::Fixed`].
    pub fn from_name(name: &str) -> Resizable {
        match normalize_name(name).as_str() {
            "none" | "fixed" => Resizable::Fixed,
            "width" => Resizable::Width,
            "height" => Resizable::Height,
            "both" => Resizable::Both,
            "aspect" => Resizable::Aspect,
            _ => {
                log::warn!("unknown resize policy {:?}, ignoring resizes", name);
                Resizable::Fixed
            }
        }
    }

    /// Returns true if the backend window should accept resizing at all.
    pub fn is_resizable(self) -> bool {
        self != Resizable::Fixed
    }

    /// Reconciles a raw resize of `raw` against this policy.
    ///
    /// `current` is the window's present size and `base` the size it was
    /// created with. Returns `None` when the resize must be ignored.
    pub fn reconcile(
        self,
        raw: (u32, u32),
        current: (u32, u32),
        base: (u32, u32),
    ) -> Option<(u32, u32)> {
        let (w, h) = (raw.0.max(1), raw.1.max(1));
        match self {
            Resizable::Fixed => None,
            Resizable::Width => Some((w, current.1)),
            Resizable::Height => Some((current.0, h)),
            Resizable::Both => Some((w, h)),
            Resizable::Aspect => {
                let ratio = base.0.max(1) as f64 / base.1.max(1) as f64;
                if w as f64 / h as f64 > ratio {
                    Some((((h as f64 * ratio).round() as u32).max(1), h))
                } else {
                    Some((w, ((w as f64 / ratio).round() as u32).max(1)))
                }
            }
        }
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Pixel coordinates produced by [`to_screen`] are clamped to this distance
/// from the window's top-left corner.
pub const COORD_LIMIT: i32 = 1 << 22;

/// Largest width or height, in pixels, that sized shapes are drawn at.
pub const MAX_SPAN: u32 = 1 << 24;

/// An axis-aligned rectangle in pixel space (top-left origin, Y-down).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, width: u32, height: u32) -> Rect {
        Rect {
            left,
            top,
            width,
            height,
        }
    }

    /// Builds the rectangle covering `[left, right) × [top, bottom)`,
    /// saturating at the `i32` range. Inverted edges give an empty rectangle.
    pub fn from_edges(left: i64, top: i64, right: i64, bottom: i64) -> Rect {
        let (l, t) = (clamp_i32(left), clamp_i32(top));
        let (r, b) = (clamp_i32(right).max(l), clamp_i32(bottom).max(t));
        Rect::new(l, t, r.abs_diff(l), b.abs_diff(t))
    }

    /// One past the right edge, saturating at `i32::MAX`.
    pub fn right(&self) -> i32 {
        clamp_i32(self.left as i64 + self.width as i64)
    }

    /// One past the bottom edge, saturating at `i32::MAX`.
    pub fn bottom(&self) -> i32 {
        clamp_i32(self.top as i64 + self.height as i64)
    }

    /// Returns the overlap of two rectangles, or `None` if they do not
    /// overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (left < right && top < bottom)
            .then(|| Rect::new(left, top, right.abs_diff(left), bottom.abs_diff(top)))
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Returns the pixel that user-space origin maps to for a window of the given
/// size.
pub fn anchor_offset((width, height): (u32, u32), anchor: Anchor) -> (i32, i32) {
    let (w, h) = (saturate(width), saturate(height));
    match anchor {
        Anchor::Center => (w / 2, h / 2),
        Anchor::Top => (w / 2, 0),
        Anchor::Bottom => (w / 2, h),
        Anchor::Left => (0, h / 2),
        Anchor::Right => (w, h / 2),
        Anchor::TopLeft => (0, 0),
        Anchor::TopRight => (w, 0),
        Anchor::BottomLeft => (0, h),
        Anchor::BottomRight => (w, h),
    }
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

fn saturate(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

/// Maps a user-space point to pixel space, truncating toward zero.
///
/// Results are clamped to `±COORD_LIMIT`.
pub fn to_screen(x: f32, y: f32, (ox, oy): (i32, i32)) -> (i32, i32) {
    let clamp = |v: f32| (v as i32).clamp(-COORD_LIMIT, COORD_LIMIT);
    (clamp(ox as f32 + x), clamp(oy as f32 - y))
}

/// Maps a pixel back to user space.
pub fn to_user(px: i32, py: i32, (ox, oy): (i32, i32)) -> (f32, f32) {
    ((px - ox) as f32, (oy - py) as f32)
}

/// Builds a pixel-space rectangle from two opposite user-space corners given
/// in any order.
pub fn rect_from_points(ax: f32, ay: f32, bx: f32, by: f32, offset: (i32, i32)) -> Rect {
    let (x1, y1) = to_screen(ax, ay, offset);
    let (x2, y2) = to_screen(bx, by, offset);
    Rect {
        left: x1.min(x2),
        top: y1.min(y2),
        width: x1.abs_diff(x2),
        height: y1.abs_diff(y2),
    }
}

/// Returns the top-left pixel for a `w`×`h` shape whose `anchor` point must
/// land on the user-space point `(x, y)`.
///
/// The shape's anchor point is found with the same table as
/// [`anchor_offset`], applied to the shape instead of the window.
pub fn anchor_pos(
    x: f32,
    y: f32,
    w: u32,
    h: u32,
    anchor: Anchor,
    offset: (i32, i32),
) -> (i32, i32) {
    let (sx, sy) = to_screen(x, y, offset);
    let (ax, ay) = anchor_offset((w, h), anchor);
    (sx.saturating_sub(ax), sy.saturating_sub(ay))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_offset_stays_inside_window() {
        for &(w, h) in &[(1, 1), (2, 3), (800, 600), (1023, 767)] {
            for anchor in Anchor::ALL {
                let (ox, oy) = anchor_offset((w, h), anchor);
                assert!((0..=w as i32).contains(&ox), "{anchor} x {ox} in {w}");
                assert!((0..=h as i32).contains(&oy), "{anchor} y {oy} in {h}");
            }
        }
    }

    #[test]
    fn anchor_offset_table() {
        let dims = (800, 600);
        assert_eq!(anchor_offset(dims, Anchor::Center), (400, 300));
        assert_eq!(anchor_offset(dims, Anchor::Top), (400, 0));
        assert_eq!(anchor_offset(dims, Anchor::Bottom), (400, 600));
        assert_eq!(anchor_offset(dims, Anchor::Left), (0, 300));
        assert_eq!(anchor_offset(dims, Anchor::Right), (800, 300));
        assert_eq!(anchor_offset(dims, Anchor::TopLeft), (0, 0));
        assert_eq!(anchor_offset(dims, Anchor::TopRight), (800, 0));
        assert_eq!(anchor_offset(dims, Anchor::BottomLeft), (0, 600));
        assert_eq!(anchor_offset(dims, Anchor::BottomRight), (800, 600));
    }

    #[test]
    fn to_screen_flips_y() {
        let offset = anchor_offset((800, 600), Anchor::Center);
        assert_eq!(to_screen(0., 0., offset), (400, 300));
        assert_eq!(to_screen(10., 20., offset), (410, 280));
        assert_eq!(to_screen(-400., -300., offset), (0, 600));
    }

    #[test]
    fn to_screen_truncates() {
        assert_eq!(to_screen(1.9, -0.9, (0, 0)), (1, 0));
        assert_eq!(to_screen(-1.9, 0., (0, 0)), (-1, 0));
    }

    #[test]
    fn to_user_inverts_to_screen() {
        for anchor in Anchor::ALL {
            let offset = anchor_offset((640, 480), anchor);
            for &(x, y) in &[(0., 0.), (12., -7.), (-320., 240.), (5., 5.)] {
                let (px, py) = to_screen(x, y, offset);
                assert_eq!(to_user(px, py, offset), (x, y));
            }
        }
    }

    #[test]
    fn rect_from_points_is_symmetric() {
        let offset = anchor_offset((800, 600), Anchor::BottomLeft);
        let a = rect_from_points(10., 20., 110., 70., offset);
        let b = rect_from_points(110., 70., 10., 20., offset);
        let c = rect_from_points(10., 70., 110., 20., offset);
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a, Rect::new(10, 530, 100, 50));
    }

    #[test]
    fn rect_from_points_lower_left_quadrant() {
        let offset = anchor_offset((800, 600), Anchor::Center);
        let rect = rect_from_points(-400., -300., 0., 0., offset);
        assert_eq!(rect, Rect::new(0, 300, 400, 300));
    }

    #[test]
    fn far_points_are_clamped() {
        let offset = anchor_offset((800, 600), Anchor::Center);
        assert_eq!(to_screen(-3e9, 3e9, offset), (-COORD_LIMIT, -COORD_LIMIT));
        assert_eq!(to_screen(f32::INFINITY, f32::NEG_INFINITY, offset), (COORD_LIMIT, COORD_LIMIT));

        let rect = rect_from_points(-3e9, -10., 3e9, 10., offset);
        assert_eq!(rect, Rect::new(-COORD_LIMIT, 290, 2 * COORD_LIMIT as u32, 20));
        assert_eq!(rect.right(), COORD_LIMIT);
    }

    #[test]
    fn rect_edges_saturate() {
        let wide = Rect::new(-10, i32::MAX - 3, u32::MAX, 100);
        assert_eq!(wide.right(), i32::MAX);
        assert_eq!(wide.bottom(), i32::MAX);

        let screen = Rect::new(0, 0, 40, 30);
        assert_eq!(
            Rect::new(i32::MIN, 5, u32::MAX, 20).intersection(&screen),
            Some(Rect::new(0, 5, 40, 20))
        );
        assert_eq!(Rect::new(40, 0, 5, 5).intersection(&screen), None);
        assert_eq!(
            Rect::from_edges(-(1 << 40), 2, 1 << 40, 4),
            Rect::new(i32::MIN, 2, u32::MAX, 2)
        );
        assert!(Rect::from_edges(5, 5, 1, 9).is_empty());
        assert_eq!(anchor_offset((u32::MAX, 2), Anchor::BottomRight), (i32::MAX, 2));
    }

    #[test]
    fn anchor_pos_aligns_shape_point() {
        let offset = anchor_offset((100, 100), Anchor::TopLeft);
        // Point (50, -50) is pixel (50, 50).
        assert_eq!(anchor_pos(50., -50., 10, 4, Anchor::Center, offset), (45, 48));
        assert_eq!(anchor_pos(50., -50., 10, 4, Anchor::TopLeft, offset), (50, 50));
        assert_eq!(anchor_pos(50., -50., 10, 4, Anchor::BottomLeft, offset), (50, 46));
        assert_eq!(anchor_pos(50., -50., 10, 4, Anchor::BottomRight, offset), (40, 46));
        assert_eq!(anchor_pos(50., -50., 10, 4, Anchor::Right, offset), (40, 48));
        assert_eq!(anchor_pos(50., -50., 10, 4, Anchor::Top, offset), (45, 50));
    }

    #[test]
    fn names_fall_back() {
        assert_eq!(Anchor::from_name("top_left"), Anchor::TopLeft);
        assert_eq!(Anchor::from_name("BottomRight"), Anchor::BottomRight);
        assert_eq!(Anchor::from_name("middle"), Anchor::Center);
        assert_eq!(Resizable::from_name("aspect"), Resizable::Aspect);
        assert_eq!(Resizable::from_name("none"), Resizable::Fixed);
        assert_eq!(Resizable::from_name("diagonal"), Resizable::Fixed);
        for anchor in Anchor::ALL {
            assert_eq!(Anchor::from_name(&anchor.to_string()), anchor);
        }
    }

    #[test]
    fn reconcile_axis_policies() {
        let cur = (800, 600);
        assert_eq!(Resizable::Fixed.reconcile((900, 700), cur, cur), None);
        assert_eq!(Resizable::Width.reconcile((900, 700), cur, cur), Some((900, 600)));
        assert_eq!(Resizable::Height.reconcile((900, 700), cur, cur), Some((800, 700)));
        assert_eq!(Resizable::Both.reconcile((900, 700), cur, cur), Some((900, 700)));
    }

    #[test]
    fn reconcile_aspect_keeps_ratio() {
        let base = (800, 600);
        assert_eq!(
            Resizable::Aspect.reconcile((1000, 900), base, base),
            Some((1000, 750))
        );
        assert_eq!(
            Resizable::Aspect.reconcile((1600, 900), base, base),
            Some((1200, 900))
        );
        assert_eq!(
            Resizable::Aspect.reconcile((0, 0), base, base),
            Some((1, 1))
        );
    }
}
