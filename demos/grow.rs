//! Two rectangles hug the left and right edges of the window. Hold `=` to
//! widen them and `-` to narrow them again.

use panda2d::logging::{init_logging, LoggingConfig};
use panda2d::{Anchor, App, Color, Game, KeyCode, Resizable, Window};

#[derive(Clone, Copy, Debug)]
#[allow(dead_code)]
enum ExtendMethod {
    Left,
    Right,
    Up,
    Down,
}

impl ExtendMethod {
    fn sign(self) -> f32 {
        match self {
            ExtendMethod::Left | ExtendMethod::Down => -1.,
            ExtendMethod::Right | ExtendMethod::Up => 1.,
        }
    }
}

struct Extension {
    scale: f32,
}

impl Extension {
    fn extend(&self, pivot: f32, value: f32, method: ExtendMethod) -> f32 {
        pivot + value * method.sign() * self.scale
    }
}

struct Grow {
    extension: Extension,
    change_factor: f32,
    change_offset: f32,
    plus_last_frame: bool,
    minus_last_frame: bool,
}

impl Grow {
    fn new() -> Grow {
        Grow {
            extension: Extension { scale: 1. },
            change_factor: 20.,
            change_offset: 1.,
            plus_last_frame: false,
            minus_last_frame: false,
        }
    }
}

impl Game for Grow {
    fn update(&mut self, window: &mut Window) -> anyhow::Result<()> {
        let growth = self.change_offset + self.change_factor * window.deltatime();

        let plus = window.keydown(KeyCode::Equals);
        let minus = window.keydown(KeyCode::Minus);
        if plus && !self.plus_last_frame {
            self.extension.scale *= growth;
        }
        if minus && !self.minus_last_frame {
            self.extension.scale /= growth;
        }
        self.plus_last_frame = plus;
        self.minus_last_frame = minus;
        Ok(())
    }

    fn draw(&mut self, window: &mut Window) -> anyhow::Result<()> {
        let half_w = window.width() as f32 / 2.;
        let half_h = window.height() as f32 / 2.;

        window.clear(Color::from_rgb(0, 0, 0));
        let right = self.extension.extend(-half_w, 5., ExtendMethod::Right);
        window.fill_rect(-half_w, -half_h, right, half_h, Color::from_rgb(255, 0, 0));
        let left = self.extension.extend(half_w, 5., ExtendMethod::Left);
        window.fill_rect(left, -half_h, half_w, half_h, Color::from_rgb(0, 0, 255));
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    App::new()
        .with_title("Test Window")
        .with_size(800, 600)
        .with_resizable(Resizable::Both)
        .with_anchor(Anchor::Center)
        .run(Grow::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(window: &mut Window, game: &mut Grow) {
        window.begin_frame(0.05);
        game.update(window).unwrap();
    }

    #[test]
    fn held_key_scales_once() {
        let mut window = Window::offscreen(800, 600, Resizable::Both, Anchor::Center);
        let mut game = Grow::new();

        window.begin_frame(0.05);
        window.press_key(KeyCode::Equals);
        game.update(&mut window).unwrap();
        assert_eq!(game.extension.scale, 2.);

        step(&mut window, &mut game);
        step(&mut window, &mut game);
        assert_eq!(game.extension.scale, 2.);

        window.begin_frame(0.05);
        window.release_key(KeyCode::Equals);
        window.press_key(KeyCode::Minus);
        game.update(&mut window).unwrap();
        assert_eq!(game.extension.scale, 1.);

        step(&mut window, &mut game);
        assert_eq!(game.extension.scale, 1.);
    }

    #[test]
    fn rectangles_hug_the_edges() {
        let mut window = Window::offscreen(800, 600, Resizable::Both, Anchor::Center);
        let mut game = Grow::new();
        game.extension.scale = 10.;
        game.draw(&mut window).unwrap();

        let screen = window.screen();
        assert_eq!(screen.pixel(0, 300), Some(Color::from_rgb(255, 0, 0)));
        assert_eq!(screen.pixel(49, 0), Some(Color::from_rgb(255, 0, 0)));
        assert_eq!(screen.pixel(50, 300), Some(Color::from_rgb(0, 0, 0)));
        assert_eq!(screen.pixel(750, 599), Some(Color::from_rgb(0, 0, 255)));
        assert_eq!(screen.pixel(749, 300), Some(Color::from_rgb(0, 0, 0)));
    }
}
