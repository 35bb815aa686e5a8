//! Scan conversion of the shapes the drawing primitives need.
//!
//! All functions write pixels straight into the target surface without
//! blending, and clip against its bounds. Translucent drawing is done by
//! rasterizing into a transparent layer and [`blit`](super::Surface::blit)ting
//! that layer.

use super::{Color, Surface};
use crate::coords::Rect;

/// Fills the ellipse inscribed in `bounds`.
pub fn fill_ellipse(surface: &mut Surface, bounds: Rect, color: Color) {
    ellipse(surface, bounds, None, color);
}

/// Draws the outline of the ellipse inscribed in `bounds`, `thickness` pixels
/// wide, growing inward.
pub fn stroke_ellipse(surface: &mut Surface, bounds: Rect, thickness: u32, color: Color) {
    if thickness == 0 {
        return;
    }
    ellipse(surface, bounds, Some(thickness), color);
}

fn ellipse(surface: &mut Surface, bounds: Rect, thickness: Option<u32>, color: Color) {
    if bounds.is_empty() {
        return;
    }
    let Some(visible) = bounds.intersection(&surface.bounds()) else {
        return;
    };
    let rx = bounds.width as f64 / 2.;
    let ry = bounds.height as f64 / 2.;
    let cx = bounds.left as f64 + rx;
    let cy = bounds.top as f64 + ry;
    let inner = thickness
        .map(|t| (rx - t as f64, ry - t as f64))
        .filter(|&(irx, iry)| irx > 0. && iry > 0.);

    let inside = |x: f64, y: f64, rx: f64, ry: f64| {
        let nx = (x - cx) / rx;
        let ny = (y - cy) / ry;
        nx * nx + ny * ny <= 1.
    };

    for y in visible.top..visible.bottom() {
        for x in visible.left..visible.right() {
            let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
            if !inside(px, py, rx, ry) {
                continue;
            }
            if let Some((irx, iry)) = inner {
                if inside(px, py, irx, iry) {
                    continue;
                }
            }
            surface.put_pixel(x, y, color);
        }
    }
}

/// Fills a polygon using the even-odd rule, sampling at pixel centres.
///
/// Polygons with fewer than three vertices draw nothing.
pub fn fill_polygon(surface: &mut Surface, points: &[(f32, f32)], color: Color) {
    if points.len() < 3 {
        return;
    }
    let (min_y, max_y) = points
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
    let y_start = (min_y.floor() as i32).max(0);
    let y_end = (max_y.ceil() as i32).min(surface.height() as i32);

    let mut crossings = Vec::new();
    for y in y_start..y_end {
        let sy = y as f32 + 0.5;
        crossings.clear();
        for (i, &(x0, y0)) in points.iter().enumerate() {
            let (x1, y1) = points[(i + 1) % points.len()];
            if (y0 <= sy && y1 > sy) || (y1 <= sy && y0 > sy) {
                crossings.push(x0 + (sy - y0) / (y1 - y0) * (x1 - x0));
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));
        for span in crossings.chunks_exact(2) {
            let start = (span[0] - 0.5).ceil() as i64;
            let end = (span[1] - 0.5).ceil() as i64;
            if end > start {
                surface.fill_rect(Rect::from_edges(start, y as i64, end, y as i64 + 1), color);
            }
        }
    }
}

/// Draws the closed outline through `points`.
pub fn stroke_polygon(surface: &mut Surface, points: &[(i32, i32)], thickness: u32, color: Color) {
    if points.len() < 2 || thickness == 0 {
        return;
    }
    for (i, &from) in points.iter().enumerate() {
        let to = points[(i + 1) % points.len()];
        draw_line(surface, from, to, thickness, color);
    }
}

/// Draws a line between two pixels. Lines thicker than one pixel are filled
/// as a rectangle centred on the segment.
pub fn draw_line(surface: &mut Surface, from: (i32, i32), to: (i32, i32), thickness: u32, color: Color) {
    match thickness {
        0 => {}
        1 => bresenham(surface, from, to, color),
        t => {
            let (x0, y0) = (from.0 as f32 + 0.5, from.1 as f32 + 0.5);
            let (x1, y1) = (to.0 as f32 + 0.5, to.1 as f32 + 0.5);
            let (dx, dy) = (x1 - x0, y1 - y0);
            let len = (dx * dx + dy * dy).sqrt();
            let half = t as f32 / 2.;
            if len == 0. {
                let left = (x0 - half).floor() as i32;
                let top = (y0 - half).floor() as i32;
                surface.fill_rect(Rect::new(left, top, t, t), color);
                return;
            }
            let (nx, ny) = (-dy / len * half, dx / len * half);
            fill_polygon(
                surface,
                &[
                    (x0 + nx, y0 + ny),
                    (x1 + nx, y1 + ny),
                    (x1 - nx, y1 - ny),
                    (x0 - nx, y0 - ny),
                ],
                color,
            );
        }
    }
}

fn bresenham(surface: &mut Surface, (x0, y0): (i32, i32), (x1, y1): (i32, i32), color: Color) {
    let (mut x, mut y) = (x0 as i64, y0 as i64);
    let (x1, y1) = (x1 as i64, y1 as i64);
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        surface.put_pixel(x as i32, y as i32, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(surface: &Surface, color: Color) -> usize {
        surface
            .data()
            .chunks_exact(4)
            .filter(|p| *p == color.to_bytes())
            .count()
    }

    #[test]
    fn ellipse_fills_centre_not_corners() {
        let mut s = Surface::new(20, 10);
        fill_ellipse(&mut s, Rect::new(0, 0, 20, 10), Color::RED);
        assert_eq!(s.pixel(10, 5), Some(Color::RED));
        assert_eq!(s.pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(s.pixel(19, 9), Some(Color::TRANSPARENT));
        assert_eq!(s.pixel(0, 5), Some(Color::RED));
    }

    #[test]
    fn ellipse_outline_is_hollow() {
        let mut s = Surface::new(20, 20);
        stroke_ellipse(&mut s, Rect::new(0, 0, 20, 20), 2, Color::BLUE);
        assert_eq!(s.pixel(10, 10), Some(Color::TRANSPARENT));
        assert_eq!(s.pixel(0, 10), Some(Color::BLUE));
        assert_eq!(s.pixel(10, 19), Some(Color::BLUE));
    }

    #[test]
    fn polygon_square_fills_exactly() {
        let mut s = Surface::new(10, 10);
        fill_polygon(&mut s, &[(2., 2.), (6., 2.), (6., 6.), (2., 6.)], Color::GREEN);
        assert_eq!(count(&s, Color::GREEN), 16);
        assert_eq!(s.pixel(2, 2), Some(Color::GREEN));
        assert_eq!(s.pixel(6, 6), Some(Color::TRANSPARENT));
    }

    #[test]
    fn polygon_needs_three_points() {
        let mut s = Surface::new(4, 4);
        fill_polygon(&mut s, &[(0., 0.), (4., 4.)], Color::GREEN);
        assert_eq!(count(&s, Color::GREEN), 0);
    }

    #[test]
    fn line_hits_both_endpoints() {
        let mut s = Surface::new(10, 10);
        draw_line(&mut s, (1, 8), (8, 2), 1, Color::WHITE);
        assert_eq!(s.pixel(1, 8), Some(Color::WHITE));
        assert_eq!(s.pixel(8, 2), Some(Color::WHITE));
        assert_eq!(count(&s, Color::WHITE), 8);
    }

    #[test]
    fn thick_horizontal_line() {
        let mut s = Surface::new(10, 10);
        draw_line(&mut s, (1, 5), (8, 5), 3, Color::WHITE);
        for y in 4..=6 {
            assert_eq!(s.pixel(4, y), Some(Color::WHITE), "row {y}");
        }
        assert_eq!(s.pixel(4, 3), Some(Color::TRANSPARENT));
        assert_eq!(s.pixel(4, 7), Some(Color::TRANSPARENT));
    }

    #[test]
    fn shapes_far_larger_than_the_surface() {
        let mut s = Surface::new(8, 8);
        fill_ellipse(&mut s, Rect::new(-(1 << 23), -(1 << 23), 1 << 24, 1 << 24), Color::RED);
        assert_eq!(count(&s, Color::RED), 64);

        let mut s = Surface::new(8, 8);
        let far = (1 << 22) as f32;
        fill_polygon(&mut s, &[(-far, 2.), (far, 2.), (far, 4.), (-far, 4.)], Color::GREEN);
        assert_eq!(count(&s, Color::GREEN), 16);
        assert_eq!(s.pixel(0, 2), Some(Color::GREEN));
        assert_eq!(s.pixel(7, 3), Some(Color::GREEN));
    }
}
