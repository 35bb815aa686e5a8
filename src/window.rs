use crate::assets::{Image, Sound};
use crate::audio::Mixer;
use crate::coords::{self, Anchor, Rect, Resizable};
use crate::graphics::{Color, Surface};
use crate::input::{Input, KeyCode, MouseButton};
#[cfg(feature = "text")]
use crate::text::FontCache;

mod commands;
pub use commands::*;

/// The state of a game window, handed to every [`Game`](crate::Game) hook.
///
/// All positions taken and returned by a `Window` are in user space: Y points
/// up and `(0, 0)` sits on the window's [`Anchor`]. Drawing goes to an
/// in-memory screen surface that the backend presents after `draw`.
pub struct Window {
    size: (u32, u32),
    base_size: (u32, u32),
    anchor: Anchor,
    resizable: Resizable,
    screen: Surface,
    input: Input,
    deltatime: f32,
    mouse: (f32, f32),
    running: bool,
    mixer: Option<Mixer>,
    #[cfg(feature = "text")]
    fonts: FontCache,
}

impl Window {
    /// Creates a window state that is not attached to any backend.
    ///
    /// Everything except presenting and sound works, which makes this useful
    /// for rendering to memory and for tests.
    pub fn offscreen(width: u32, height: u32, resizable: Resizable, anchor: Anchor) -> Window {
        Window::new((width, height), resizable, anchor, None)
    }

    pub(crate) fn new(
        size: (u32, u32),
        resizable: Resizable,
        anchor: Anchor,
        mixer: Option<Mixer>,
    ) -> Window {
        let mut window = Window {
            size,
            base_size: size,
            anchor,
            resizable,
            screen: Surface::filled(size.0, size.1, Color::BLACK),
            input: Input::new(),
            deltatime: 0.,
            mouse: (0., 0.),
            running: true,
            mixer,
            #[cfg(feature = "text")]
            fonts: FontCache::new(),
        };
        window.refresh_mouse();
        window
    }

    pub fn width(&self) -> u32 {
        self.size.0
    }

    pub fn height(&self) -> u32 {
        self.size.1
    }

    /// Seconds elapsed between the start of the previous frame and this one.
    pub fn deltatime(&self) -> f32 {
        self.deltatime
    }

    pub fn mousex(&self) -> f32 {
        self.mouse.0
    }

    pub fn mousey(&self) -> f32 {
        self.mouse.1
    }

    pub fn mouse_left(&self) -> bool {
        self.input.is_button_down(MouseButton::Left)
    }

    pub fn mouse_middle(&self) -> bool {
        self.input.is_button_down(MouseButton::Middle)
    }

    pub fn mouse_right(&self) -> bool {
        self.input.is_button_down(MouseButton::Right)
    }

    /// Returns true while `key` is held.
    pub fn keydown(&self, key: KeyCode) -> bool {
        self.input.is_key_down(key)
    }

    /// Returns true only on the frame `key` went down.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.input.is_key_pressed(key)
    }

    /// Returns true only on the frame `key` went up.
    pub fn key_released(&self, key: KeyCode) -> bool {
        self.input.is_key_released(key)
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn resizable(&self) -> Resizable {
        self.resizable
    }

    /// The pixels drawn so far.
    pub fn screen(&self) -> &Surface {
        &self.screen
    }

    pub(crate) fn screen_mut(&mut self) -> &mut Surface {
        &mut self.screen
    }

    /// Asks the game loop to finish after the current frame.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The pixel that user-space origin maps to at the current size.
    pub fn offset(&self) -> (i32, i32) {
        coords::anchor_offset(self.size, self.anchor)
    }

    /// Converts a user-space point to a screen pixel.
    pub fn to_screen(&self, x: f32, y: f32) -> (i32, i32) {
        coords::to_screen(x, y, self.offset())
    }

    /// Converts a screen pixel to a user-space point.
    pub fn to_user(&self, px: i32, py: i32) -> (f32, f32) {
        coords::to_user(px, py, self.offset())
    }

    /// Starts a new frame that took `deltatime` seconds, forgetting the last
    /// frame's key presses and releases.
    ///
    /// The game loop calls this every frame. Call it yourself to step an
    /// [`offscreen`](Window::offscreen) window.
    pub fn begin_frame(&mut self, deltatime: f32) {
        self.deltatime = deltatime;
        self.input.update();
    }

    /// Records `key` going down during the current frame.
    pub fn press_key(&mut self, key: KeyCode) {
        self.input.press_key(key);
    }

    /// Records `key` going up during the current frame.
    pub fn release_key(&mut self, key: KeyCode) {
        self.input.release_key(key);
    }

    pub(crate) fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    pub(crate) fn set_mouse_pixel(&mut self, x: i32, y: i32) {
        self.input.set_mouse_pixel(x, y);
        self.refresh_mouse();
    }

    fn refresh_mouse(&mut self) {
        let (px, py) = self.input.mouse_pixel();
        self.mouse = self.to_user(px, py);
    }

    /// Applies a backend resize of `width`×`height` according to the resize
    /// policy. Returns the size actually adopted, or `None` if the resize was
    /// ignored.
    pub(crate) fn handle_resize(&mut self, width: u32, height: u32) -> Option<(u32, u32)> {
        let size = self
            .resizable
            .reconcile((width, height), self.size, self.base_size)?;
        if size != self.size {
            log::info!("window resized to {}x{}", size.0, size.1);
            self.size = size;
            self.screen = Surface::filled(size.0, size.1, Color::BLACK);
            self.refresh_mouse();
        }
        Some(size)
    }

    /// Fills the whole window.
    pub fn clear(&mut self, color: Color) {
        if color.is_opaque() {
            self.screen.fill(color);
        } else {
            let layer = Surface::filled(self.size.0, self.size.1, color);
            self.screen.blit(&layer, 0, 0);
        }
    }

    /// Fills the rectangle with corners `(ax, ay)` and `(bx, by)`, given in
    /// any order.
    pub fn fill_rect(&mut self, ax: f32, ay: f32, bx: f32, by: f32, color: Color) -> FillRect<'_> {
        let rect = coords::rect_from_points(ax, ay, bx, by, self.offset());
        FillRect::new(self, rect, color)
    }

    /// Outlines the rectangle with corners `(ax, ay)` and `(bx, by)`.
    pub fn draw_rect(&mut self, ax: f32, ay: f32, bx: f32, by: f32) -> DrawRect<'_> {
        let rect = coords::rect_from_points(ax, ay, bx, by, self.offset());
        DrawRect::new(self, rect)
    }

    /// Fills the ellipse of the given size centred on `(x, y)`.
    pub fn fill_circle(&mut self, x: f32, y: f32, width: u32, height: u32, color: Color) -> FillCircle<'_> {
        let bounds = self.ellipse_bounds(x, y, width, height);
        FillCircle::new(self, bounds, color)
    }

    /// Outlines the ellipse of the given size centred on `(x, y)`.
    pub fn draw_circle(&mut self, x: f32, y: f32, width: u32, height: u32) -> DrawCircle<'_> {
        let bounds = self.ellipse_bounds(x, y, width, height);
        DrawCircle::new(self, bounds)
    }

    fn ellipse_bounds(&self, x: f32, y: f32, width: u32, height: u32) -> Rect {
        let (sx, sy) = self.to_screen(x, y);
        let (width, height) = (width.min(coords::MAX_SPAN), height.min(coords::MAX_SPAN));
        Rect::new(sx - width as i32 / 2, sy - height as i32 / 2, width, height)
    }

    /// Fills the polygon with vertices `(xs[i], ys[i])`.
    pub fn fill_polygon(&mut self, xs: &[f32], ys: &[f32], color: Color) -> FillPolygon<'_> {
        let points = self.polygon_points(xs, ys);
        FillPolygon::new(self, points, color)
    }

    /// Outlines the closed polygon with vertices `(xs[i], ys[i])`.
    pub fn draw_polygon(&mut self, xs: &[f32], ys: &[f32]) -> DrawPolygon<'_> {
        let points = self.polygon_points(xs, ys);
        DrawPolygon::new(self, points)
    }

    fn polygon_points(&self, xs: &[f32], ys: &[f32]) -> Vec<(i32, i32)> {
        let offset = self.offset();
        xs.iter()
            .zip(ys)
            .map(|(&x, &y)| coords::to_screen(x, y, offset))
            .collect()
    }

    /// Draws a line from `(x1, y1)` to `(x2, y2)`.
    pub fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color) -> DrawLine<'_> {
        let from = self.to_screen(x1, y1);
        let to = self.to_screen(x2, y2);
        DrawLine::new(self, from, to, color)
    }

    /// Draws `text` with its centre on `(x, y)`.
    #[cfg(feature = "text")]
    pub fn draw_text<'a>(&'a mut self, text: &'a str, x: f32, y: f32) -> DrawText<'a> {
        DrawText::new(self, text, x, y)
    }

    /// Draws `image` with its centre on `(x, y)`.
    pub fn draw_image<'a>(&'a mut self, image: &'a Image, x: f32, y: f32) -> DrawImage<'a> {
        DrawImage::new(self, image, x, y)
    }

    /// Starts playing `sound`. Does nothing when audio is unavailable or the
    /// sound failed to load.
    pub fn play_sound(&mut self, sound: &Sound) {
        if let Some(mixer) = self.mixer.as_mut() {
            mixer.play(sound);
        }
    }

    /// Returns true if the window has a working audio device.
    pub fn has_audio(&self) -> bool {
        self.mixer.is_some()
    }
}
