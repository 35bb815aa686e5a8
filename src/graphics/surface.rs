use super::Color;
use crate::coords::Rect;

/// A CPU-side RGBA8 pixel buffer.
///
/// Pixels are stored row-major, four bytes each, with the top-left pixel
/// first. Drawing onto a surface replaces pixels; [`blit`](Surface::blit) is
/// the only operation that blends.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Creates a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Surface {
        Surface::filled(width, height, Color::TRANSPARENT)
    }

    /// Creates a surface filled with `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Surface {
        let pixels = color
            .to_bytes()
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Surface {
            width,
            height,
            pixels,
        }
    }

    /// Wraps existing RGBA8 data. Returns `None` if the buffer length does not
    /// match the dimensions.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Surface> {
        (pixels.len() == width as usize * height as usize * 4).then(|| Surface {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The rectangle covered by this surface.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Returns the raw RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let i = self.index(x, y)?;
        let p = &self.pixels[i..i + 4];
        Some(Color::from_bytes(p[0], p[1], p[2], p[3]))
    }

    /// Overwrites the pixel at `(x, y)`. Out-of-bounds writes are dropped.
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i..i + 4].copy_from_slice(&color.to_bytes());
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    /// Fills the whole surface with `color`.
    pub fn fill(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for p in self.pixels.chunks_exact_mut(4) {
            p.copy_from_slice(&bytes);
        }
    }

    /// Fills `rect`, clipped to the surface.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        let bytes = color.to_bytes();
        let stride = self.width as usize * 4;
        for y in y0..y1 {
            let row = y * stride;
            for p in self.pixels[row + x0 * 4..row + x1 * 4].chunks_exact_mut(4) {
                p.copy_from_slice(&bytes);
            }
        }
    }

    /// Draws the border of `rect`, `thickness` pixels wide, growing inward.
    pub fn stroke_rect(&mut self, rect: Rect, thickness: u32, color: Color) {
        if thickness == 0 || rect.is_empty() {
            return;
        }
        let t = thickness;
        if t.saturating_mul(2) >= rect.width || t.saturating_mul(2) >= rect.height {
            self.fill_rect(rect, color);
            return;
        }
        let inner_h = rect.height - 2 * t;
        let inner_top = rect.top.saturating_add(t as i32);
        self.fill_rect(Rect::new(rect.left, rect.top, rect.width, t), color);
        self.fill_rect(
            Rect::new(rect.left, rect.bottom() - t as i32, rect.width, t),
            color,
        );
        self.fill_rect(Rect::new(rect.left, inner_top, t, inner_h), color);
        self.fill_rect(
            Rect::new(rect.right() - t as i32, inner_top, t, inner_h),
            color,
        );
    }

    fn clip(&self, rect: Rect) -> Option<(usize, usize, usize, usize)> {
        let x0 = rect.left.max(0);
        let y0 = rect.top.max(0);
        let x1 = rect.right().min(self.width as i32);
        let y1 = rect.bottom().min(self.height as i32);
        (x0 < x1 && y0 < y1).then(|| (x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }

    /// Composites `src` onto this surface with its top-left corner at
    /// `(x, y)`, using source-over alpha blending.
    pub fn blit(&mut self, src: &Surface, x: i32, y: i32) {
        let Some((x0, y0, x1, y1)) = self.clip(Rect::new(x, y, src.width, src.height)) else {
            return;
        };
        for dy in y0..y1 {
            let sy = (dy as i32 - y) as usize;
            for dx in x0..x1 {
                let sx = (dx as i32 - x) as usize;
                let si = (sy * src.width as usize + sx) * 4;
                let di = (dy * self.width as usize + dx) * 4;
                let s = &src.pixels[si..si + 4];
                blend_over(&mut self.pixels[di..di + 4], [s[0], s[1], s[2], s[3]]);
            }
        }
    }

    /// Returns a copy resized to `width`×`height` with nearest-neighbour
    /// sampling.
    pub fn scaled(&self, width: u32, height: u32) -> Surface {
        if (width, height) == self.size() {
            return self.clone();
        }
        self.scaled_view(width, height, Rect::new(0, 0, width, height))
    }

    /// Returns only the `view` part of this surface resized to
    /// `width`×`height`. `view` is given in the resized image's pixels; the
    /// parts of it outside the image stay transparent.
    pub fn scaled_view(&self, width: u32, height: u32, view: Rect) -> Surface {
        let mut out = Surface::new(view.width, view.height);
        if self.width == 0 || self.height == 0 || width == 0 || height == 0 {
            return out;
        }
        for vy in 0..view.height {
            let y = view.top as i64 + vy as i64;
            if y < 0 || y >= height as i64 {
                continue;
            }
            let sy = (y as u64 * self.height as u64 / height as u64) as usize;
            for vx in 0..view.width {
                let x = view.left as i64 + vx as i64;
                if x < 0 || x >= width as i64 {
                    continue;
                }
                let sx = (x as u64 * self.width as u64 / width as u64) as usize;
                let si = (sy * self.width as usize + sx) * 4;
                let di = (vy as usize * view.width as usize + vx as usize) * 4;
                out.pixels[di..di + 4].copy_from_slice(&self.pixels[si..si + 4]);
            }
        }
        out
    }
}

/// Source-over compositing of one RGBA8 pixel onto another.
fn blend_over(dst: &mut [u8], src: [u8; 4]) {
    let sa = src[3] as u32;
    if sa == 255 {
        dst.copy_from_slice(&src);
        return;
    }
    if sa == 0 {
        return;
    }
    let da = dst[3] as u32;
    let inv = 255 - sa;
    let out_a = sa + (da * inv + 127) / 255;
    let denom = out_a * 255;
    for c in 0..3 {
        let v = src[c] as u32 * sa * 255 + dst[c] as u32 * da * inv;
        dst[c] = ((v + denom / 2) / denom).min(255) as u8;
    }
    dst[3] = out_a.min(255) as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_is_clipped() {
        let mut s = Surface::new(4, 4);
        s.fill_rect(Rect::new(-2, 2, 10, 10), Color::RED);
        assert_eq!(s.pixel(0, 2), Some(Color::RED));
        assert_eq!(s.pixel(3, 3), Some(Color::RED));
        assert_eq!(s.pixel(0, 1), Some(Color::TRANSPARENT));
        assert_eq!(s.pixel(4, 3), None);
    }

    #[test]
    fn stroke_rect_leaves_interior() {
        let mut s = Surface::new(10, 10);
        s.stroke_rect(Rect::new(0, 0, 10, 10), 2, Color::WHITE);
        assert_eq!(s.pixel(1, 5), Some(Color::WHITE));
        assert_eq!(s.pixel(8, 8), Some(Color::WHITE));
        assert_eq!(s.pixel(2, 2), Some(Color::TRANSPARENT));
        assert_eq!(s.pixel(7, 7), Some(Color::TRANSPARENT));
    }

    #[test]
    fn blit_opaque_copies() {
        let mut dst = Surface::filled(3, 3, Color::BLACK);
        let src = Surface::filled(2, 2, Color::GREEN);
        dst.blit(&src, 2, 2);
        assert_eq!(dst.pixel(2, 2), Some(Color::GREEN));
        assert_eq!(dst.pixel(1, 1), Some(Color::BLACK));
    }

    #[test]
    fn blit_blends_translucent_over_opaque() {
        let mut dst = Surface::filled(1, 1, Color::BLACK);
        let src = Surface::filled(1, 1, Color::WHITE.with_alpha_byte(127));
        dst.blit(&src, 0, 0);
        assert_eq!(dst.pixel(0, 0), Some(Color::from_bytes(127, 127, 127, 255)));
    }

    #[test]
    fn blit_over_transparent_keeps_source() {
        let mut dst = Surface::new(1, 1);
        let c = Color::from_bytes(10, 200, 30, 90);
        dst.blit(&Surface::filled(1, 1, c), 0, 0);
        assert_eq!(dst.pixel(0, 0), Some(c));
    }

    #[test]
    fn scaled_nearest() {
        let mut s = Surface::new(2, 1);
        s.put_pixel(0, 0, Color::RED);
        s.put_pixel(1, 0, Color::BLUE);
        let big = s.scaled(4, 2);
        assert_eq!(big.pixel(1, 1), Some(Color::RED));
        assert_eq!(big.pixel(2, 0), Some(Color::BLUE));
        assert_eq!(s.scaled(0, 5).size(), (0, 5));
    }

    #[test]
    fn scaled_view_samples_only_the_window() {
        let mut s = Surface::new(2, 1);
        s.put_pixel(0, 0, Color::RED);
        s.put_pixel(1, 0, Color::BLUE);
        let part = s.scaled_view(4, 2, Rect::new(1, 1, 4, 1));
        assert_eq!(part.size(), (4, 1));
        assert_eq!(part.pixel(0, 0), Some(Color::RED));
        assert_eq!(part.pixel(1, 0), Some(Color::BLUE));
        assert_eq!(part.pixel(2, 0), Some(Color::BLUE));
        assert_eq!(part.pixel(3, 0), Some(Color::TRANSPARENT));

        let huge = s.scaled_view(u32::MAX, u32::MAX, Rect::new(0, 0, 3, 3));
        assert_eq!(huge.pixel(2, 2), Some(Color::RED));
    }

    #[test]
    fn oversized_rects_are_clipped() {
        let mut s = Surface::new(4, 4);
        s.fill_rect(Rect::new(i32::MIN, 1, u32::MAX, 2), Color::RED);
        assert_eq!(s.pixel(0, 1), Some(Color::RED));
        assert_eq!(s.pixel(3, 2), Some(Color::RED));
        assert_eq!(s.pixel(0, 3), Some(Color::TRANSPARENT));

        let mut s = Surface::new(4, 4);
        s.stroke_rect(s.bounds(), u32::MAX, Color::GREEN);
        assert_eq!(s.pixel(2, 2), Some(Color::GREEN));
    }

    #[test]
    fn from_rgba_checks_length() {
        assert!(Surface::from_rgba(2, 2, vec![0; 16]).is_some());
        assert!(Surface::from_rgba(2, 2, vec![0; 15]).is_none());
    }
}
