use std::borrow::Cow;

use crate::coords::{Anchor, Resizable};
use crate::Window;

mod sdl;

/// The hooks a game implements. Every hook receives the [`Window`] for the
/// current frame.
///
/// An error returned from any hook stops the game loop and is returned from
/// [`App::run`].
pub trait Game {
    /// Called once, after the window opens and before the first frame.
    fn initialize(&mut self, _window: &mut Window) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called every frame before [`draw`](Game::draw).
    fn update(&mut self, _window: &mut Window) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called every frame to draw onto the window.
    fn draw(&mut self, _window: &mut Window) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Window configuration and entry point of the game loop.
pub struct App {
    title: Cow<'static, str>,
    size: (u32, u32),
    resizable: Resizable,
    anchor: Anchor,
    frame_rate: u32,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> App {
        App {
            title: "Panda2D Window".into(),
            size: (800, 600),
            resizable: Resizable::Fixed,
            anchor: Anchor::Center,
            frame_rate: 60,
        }
    }

    pub fn with_title(mut self, title: impl Into<Cow<'static, str>>) -> App {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> App {
        self.size = (width.max(1), height.max(1));
        self
    }

    pub fn with_resizable(mut self, resizable: Resizable) -> App {
        self.resizable = resizable;
        self
    }

    /// Sets where user-space origin sits in the window.
    pub fn with_anchor(mut self, anchor: Anchor) -> App {
        self.anchor = anchor;
        self
    }

    /// Caps the loop at `fps` frames per second. Zero removes the cap.
    pub fn with_frame_rate(mut self, fps: u32) -> App {
        self.frame_rate = fps;
        self
    }

    /// Opens the window and runs `game` until the window is closed or a hook
    /// calls [`Window::stop`].
    pub fn run<G: Game>(self, game: G) -> anyhow::Result<()> {
        sdl::run(self, game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let app = App::new();
        assert_eq!(app.title, "Panda2D Window");
        assert_eq!(app.size, (800, 600));
        assert_eq!(app.resizable, Resizable::Fixed);
        assert_eq!(app.anchor, Anchor::Center);
        assert_eq!(app.frame_rate, 60);
    }

    #[test]
    fn builder_overrides() {
        let app = App::new()
            .with_title(String::from("Test Window"))
            .with_size(0, 300)
            .with_resizable(Resizable::Both)
            .with_anchor(Anchor::BottomLeft)
            .with_frame_rate(30);
        assert_eq!(app.title, "Test Window");
        assert_eq!(app.size, (1, 300));
        assert_eq!(app.resizable, Resizable::Both);
        assert_eq!(app.anchor, Anchor::BottomLeft);
        assert_eq!(app.frame_rate, 30);
    }

    #[test]
    fn default_hooks_succeed() {
        struct Idle;
        impl Game for Idle {}

        let mut window = Window::offscreen(10, 10, Resizable::Fixed, Anchor::Center);
        let mut game = Idle;
        game.initialize(&mut window).unwrap();
        game.update(&mut window).unwrap();
        game.draw(&mut window).unwrap();
    }
}
