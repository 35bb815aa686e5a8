//! A small 2D game-window toolkit.
//!
//! Games implement [`Game`] and hand it to [`App::run`]. Every hook receives
//! the [`Window`], which draws in a Y-up coordinate space whose origin sits on
//! a configurable [`Anchor`].

mod app;
pub use app::*;

pub mod assets;
pub mod audio;
pub mod clock;
pub mod coords;
pub mod graphics;
pub mod input;
pub mod logging;
#[cfg(feature = "text")]
pub mod text;

mod window;
pub use window::*;

pub use assets::{Image, Sound};
pub use coords::{Anchor, Resizable};
pub use graphics::Color;
pub use input::{KeyCode, MouseButton};
