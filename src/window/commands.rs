use super::Window;
use crate::assets::Image;
use crate::coords::{self, Anchor, Rect, MAX_SPAN};
use crate::graphics::{raster, Color, Surface};

/// Fills `rect` on `target` by compositing a layer over its visible part.
pub(crate) fn composite_rect(target: &mut Surface, rect: Rect, color: Color) {
    let Some(area) = rect.intersection(&target.bounds()) else {
        return;
    };
    let layer = Surface::filled(area.width, area.height, color);
    target.blit(&layer, area.left, area.top);
}

/// A transparent layer covering the part of some shape's bounds that is on
/// screen. Shapes are rasterized into it in layer-local pixels.
struct Layer {
    surface: Surface,
    origin: (i32, i32),
}

impl Layer {
    fn visible(screen: &Surface, bounds: Rect) -> Option<Layer> {
        let area = bounds.intersection(&screen.bounds())?;
        Some(Layer {
            surface: Surface::new(area.width, area.height),
            origin: (area.left, area.top),
        })
    }

    fn local(&self, (x, y): (i32, i32)) -> (i32, i32) {
        (x - self.origin.0, y - self.origin.1)
    }

    fn local_rect(&self, rect: Rect) -> Rect {
        let (left, top) = self.local((rect.left, rect.top));
        Rect::new(left, top, rect.width, rect.height)
    }

    fn composite(self, screen: &mut Surface) {
        screen.blit(&self.surface, self.origin.0, self.origin.1);
    }
}

/// A filled rectangle to be drawn.
///
/// This is a builder struct that allows you to specify extra parameters for the
/// rectangle via method chaining. The rectangle is commited to the [`Window`]
/// when [`FillRect`] is dropped.
///
/// This struct is created using the [`fill_rect`] method on [`Window`].
///
/// [`fill_rect`]: Window::fill_rect
pub struct FillRect<'a> {
    w: &'a mut Window,
    rect: Rect,
    color: Color,
    outline: Option<(u32, Color)>,
}

impl<'a> FillRect<'a> {
    pub(super) fn new(w: &'a mut Window, rect: Rect, color: Color) -> Self {
        FillRect {
            w,
            rect,
            color,
            outline: None,
        }
    }

    /// Draws an outline of the given thickness over the fill.
    pub fn outline(mut self, thickness: u32, color: Color) -> Self {
        self.outline = Some((thickness, color));
        self
    }

    fn commit(&mut self) {
        let screen = &mut self.w.screen;
        if self.color.is_opaque() {
            screen.fill_rect(self.rect, self.color);
        } else {
            composite_rect(screen, self.rect, self.color);
        }
        if let Some((thickness, color)) = self.outline {
            screen.stroke_rect(self.rect, thickness, color);
        }
    }
}

impl Drop for FillRect<'_> {
    fn drop(&mut self) {
        self.commit();
    }
}

/// A rectangle outline to be drawn.
///
/// Defaults to a one pixel black outline. Committed when dropped.
///
/// This struct is created using the [`draw_rect`] method on [`Window`].
///
/// [`draw_rect`]: Window::draw_rect
pub struct DrawRect<'a> {
    w: &'a mut Window,
    rect: Rect,
    thickness: u32,
    color: Color,
}

impl<'a> DrawRect<'a> {
    pub(super) fn new(w: &'a mut Window, rect: Rect) -> Self {
        DrawRect {
            w,
            rect,
            thickness: 1,
            color: Color::BLACK,
        }
    }

    /// Sets the outline thickness in pixels.
    pub fn thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness;
        self
    }

    /// Sets the outline color.
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Drop for DrawRect<'_> {
    fn drop(&mut self) {
        self.w
            .screen
            .stroke_rect(self.rect, self.thickness, self.color);
    }
}

/// A filled ellipse to be drawn. Committed when dropped.
///
/// The ellipse and its outline are rendered into a transparent layer first
/// and composited once, so a translucent fill and outline do not blend into
/// each other.
pub struct FillCircle<'a> {
    w: &'a mut Window,
    bounds: Rect,
    color: Color,
    outline: Option<(u32, Color)>,
}

impl<'a> FillCircle<'a> {
    pub(super) fn new(w: &'a mut Window, bounds: Rect, color: Color) -> Self {
        FillCircle {
            w,
            bounds,
            color,
            outline: None,
        }
    }

    /// Draws an outline of the given thickness over the fill.
    pub fn outline(mut self, thickness: u32, color: Color) -> Self {
        self.outline = Some((thickness, color));
        self
    }
}

impl Drop for FillCircle<'_> {
    fn drop(&mut self) {
        let Some(mut layer) = Layer::visible(&self.w.screen, self.bounds) else {
            return;
        };
        let local = layer.local_rect(self.bounds);
        raster::fill_ellipse(&mut layer.surface, local, self.color);
        if let Some((thickness, color)) = self.outline {
            raster::stroke_ellipse(&mut layer.surface, local, thickness, color);
        }
        layer.composite(&mut self.w.screen);
    }
}

/// An ellipse outline to be drawn. Defaults to a one pixel black outline.
/// Committed when dropped.
pub struct DrawCircle<'a> {
    w: &'a mut Window,
    bounds: Rect,
    thickness: u32,
    color: Color,
}

impl<'a> DrawCircle<'a> {
    pub(super) fn new(w: &'a mut Window, bounds: Rect) -> Self {
        DrawCircle {
            w,
            bounds,
            thickness: 1,
            color: Color::BLACK,
        }
    }

    /// Sets the outline thickness in pixels.
    pub fn thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness;
        self
    }

    /// Sets the outline color.
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Drop for DrawCircle<'_> {
    fn drop(&mut self) {
        let Some(mut layer) = Layer::visible(&self.w.screen, self.bounds) else {
            return;
        };
        let local = layer.local_rect(self.bounds);
        raster::stroke_ellipse(&mut layer.surface, local, self.thickness, self.color);
        layer.composite(&mut self.w.screen);
    }
}

/// A filled polygon to be drawn. Committed when dropped.
///
/// The polygon is rendered into a layer covering the on-screen part of its
/// bounding box, then composited.
pub struct FillPolygon<'a> {
    w: &'a mut Window,
    points: Vec<(i32, i32)>,
    color: Color,
    outline: Option<(u32, Color)>,
}

impl<'a> FillPolygon<'a> {
    pub(super) fn new(w: &'a mut Window, points: Vec<(i32, i32)>, color: Color) -> Self {
        FillPolygon {
            w,
            points,
            color,
            outline: None,
        }
    }

    /// Draws an outline of the given thickness over the fill.
    pub fn outline(mut self, thickness: u32, color: Color) -> Self {
        self.outline = Some((thickness, color));
        self
    }

    fn commit(&mut self) -> Option<()> {
        if self.points.len() < 3 {
            return None;
        }
        let min_x = self.points.iter().map(|p| p.0).min()?;
        let max_x = self.points.iter().map(|p| p.0).max()?;
        let min_y = self.points.iter().map(|p| p.1).min()?;
        let max_y = self.points.iter().map(|p| p.1).max()?;

        let bounds = Rect::from_edges(
            min_x as i64,
            min_y as i64,
            max_x as i64 + 1,
            max_y as i64 + 1,
        );
        let mut layer = Layer::visible(&self.w.screen, bounds)?;

        let shifted: Vec<(i32, i32)> = self.points.iter().map(|&p| layer.local(p)).collect();
        let corners: Vec<(f32, f32)> = shifted.iter().map(|&(x, y)| (x as f32, y as f32)).collect();

        raster::fill_polygon(&mut layer.surface, &corners, self.color);
        if let Some((thickness, color)) = self.outline {
            raster::stroke_polygon(&mut layer.surface, &shifted, thickness, color);
        }
        layer.composite(&mut self.w.screen);
        Some(())
    }
}

impl Drop for FillPolygon<'_> {
    fn drop(&mut self) {
        self.commit();
    }
}

/// A polygon outline to be drawn. Defaults to a one pixel black outline.
/// Committed when dropped.
pub struct DrawPolygon<'a> {
    w: &'a mut Window,
    points: Vec<(i32, i32)>,
    thickness: u32,
    color: Color,
}

impl<'a> DrawPolygon<'a> {
    pub(super) fn new(w: &'a mut Window, points: Vec<(i32, i32)>) -> Self {
        DrawPolygon {
            w,
            points,
            thickness: 1,
            color: Color::BLACK,
        }
    }

    /// Sets the outline thickness in pixels.
    pub fn thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness;
        self
    }

    /// Sets the outline color.
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Drop for DrawPolygon<'_> {
    fn drop(&mut self) {
        if self.points.len() >= 3 {
            raster::stroke_polygon(&mut self.w.screen, &self.points, self.thickness, self.color);
        }
    }
}

/// A line to be drawn. Defaults to one pixel thick. Committed when dropped.
pub struct DrawLine<'a> {
    w: &'a mut Window,
    from: (i32, i32),
    to: (i32, i32),
    color: Color,
    thickness: u32,
}

impl<'a> DrawLine<'a> {
    pub(super) fn new(w: &'a mut Window, from: (i32, i32), to: (i32, i32), color: Color) -> Self {
        DrawLine {
            w,
            from,
            to,
            color,
            thickness: 1,
        }
    }

    /// Sets the line thickness in pixels.
    pub fn thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness;
        self
    }

    fn commit(&mut self) -> Option<()> {
        let (from, to, t) = (self.from, self.to, self.thickness);
        if self.color.is_opaque() {
            raster::draw_line(&mut self.w.screen, from, to, t, self.color);
            return Some(());
        }

        // Pad the bounds by the thickness so wide ends are not clipped.
        let pad = t as i64;
        let bounds = Rect::from_edges(
            from.0.min(to.0) as i64 - pad,
            from.1.min(to.1) as i64 - pad,
            from.0.max(to.0) as i64 + pad,
            from.1.max(to.1) as i64 + pad,
        );
        let mut layer = Layer::visible(&self.w.screen, bounds)?;
        let (from, to) = (layer.local(from), layer.local(to));
        raster::draw_line(&mut layer.surface, from, to, t, self.color);
        layer.composite(&mut self.w.screen);
        Some(())
    }
}

impl Drop for DrawLine<'_> {
    fn drop(&mut self) {
        self.commit();
    }
}

/// Text to be drawn.
///
/// This is a builder struct that allows you to specify extra parameters for the
/// text via method chaining. The text is commited to the [`Window`] when
/// [`DrawText`] is dropped. Defaults to the system sans font at 24 pixels,
/// black, centred on the point.
///
/// This struct is created using the [`draw_text`] method on [`Window`].
///
/// [`draw_text`]: Window::draw_text
#[cfg(feature = "text")]
pub struct DrawText<'a> {
    w: &'a mut Window,
    pos: (f32, f32),
    text: &'a str,
    font: Option<&'a str>,
    size: u32,
    color: Color,
    anchor: Anchor,
}

#[cfg(feature = "text")]
impl<'a> DrawText<'a> {
    pub(super) fn new(w: &'a mut Window, text: &'a str, x: f32, y: f32) -> Self {
        DrawText {
            w,
            pos: (x, y),
            text,
            font: None,
            size: 24,
            color: Color::BLACK,
            anchor: Anchor::Center,
        }
    }

    /// Sets the font, either a path to a font file or the name of an
    /// installed font.
    pub fn font(mut self, font: &'a str) -> Self {
        self.font = Some(font);
        self
    }

    /// Sets the size of the text in pixels.
    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Sets the color of the text.
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets which point of the text lands on the position.
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    fn commit(&mut self) -> Option<()> {
        let surface = self
            .w
            .fonts
            .render(self.text, self.font, self.size, self.color)?;
        let (x, y) = self.pos;
        let (px, py) = coords::anchor_pos(
            x,
            y,
            surface.width(),
            surface.height(),
            self.anchor,
            self.w.offset(),
        );
        self.w.screen.blit(&surface, px, py);
        Some(())
    }
}

#[cfg(feature = "text")]
impl Drop for DrawText<'_> {
    fn drop(&mut self) {
        self.commit();
    }
}

/// An image to be drawn.
///
/// This is a builder struct that allows you to specify extra parameters for the
/// image via method chaining. The image is commited to the [`Window`] when
/// [`DrawImage`] is dropped.
///
/// This struct is created using the [`draw_image`] method on [`Window`].
///
/// [`draw_image`]: Window::draw_image
pub struct DrawImage<'a> {
    w: &'a mut Window,
    image: &'a Image,
    pos: (f32, f32),
    anchor: Anchor,
    scale: (f32, f32),
    outline: Option<(u32, Color)>,
}

impl<'a> DrawImage<'a> {
    pub(super) fn new(w: &'a mut Window, image: &'a Image, x: f32, y: f32) -> Self {
        DrawImage {
            w,
            image,
            pos: (x, y),
            anchor: Anchor::Center,
            scale: (1., 1.),
            outline: None,
        }
    }

    /// Sets which point of the image lands on the position.
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Scales the image independently along each axis.
    pub fn scale(mut self, x: f32, y: f32) -> Self {
        self.scale = (x, y);
        self
    }

    /// Draws an outline around the placed image.
    pub fn outline(mut self, thickness: u32, color: Color) -> Self {
        self.outline = Some((thickness, color));
        self
    }

    fn commit(&mut self) {
        let source = self.image.surface();
        let scaled_side =
            |side: u32, scale: f32| ((side as f32 * scale).max(0.) as u32).min(MAX_SPAN);
        let width = scaled_side(source.width(), self.scale.0);
        let height = scaled_side(source.height(), self.scale.1);

        let (x, y) = self.pos;
        let (px, py) = coords::anchor_pos(x, y, width, height, self.anchor, self.w.offset());
        let placed = Rect::new(px, py, width, height);
        if let Some(area) = placed.intersection(&self.w.screen.bounds()) {
            let view = Rect::new(area.left - px, area.top - py, area.width, area.height);
            let part = source.scaled_view(width, height, view);
            self.w.screen.blit(&part, area.left, area.top);
        }
        if let Some((thickness, color)) = self.outline {
            self.w.screen.stroke_rect(placed, thickness, color);
        }
    }
}

impl Drop for DrawImage<'_> {
    fn drop(&mut self) {
        self.commit();
    }
}
