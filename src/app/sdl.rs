use anyhow::Context;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode as SDLKeyCode;
use sdl2::mouse::MouseButton as SDLMouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::BlendMode;
use sdl2::EventPump;

use super::{App, Game};
use crate::audio::Mixer;
use crate::clock::FrameClock;
use crate::graphics::Surface;
use crate::input::{KeyCode, MouseButton};
use crate::Window;

pub fn run<G: Game>(app: App, mut game: G) -> anyhow::Result<()> {
    let sdl_context = sdl2::init().map_err(anyhow::Error::msg)?;
    let video_subsystem = sdl_context.video().map_err(anyhow::Error::msg)?;

    let mut window_builder = video_subsystem.window(&app.title, app.size.0, app.size.1);
    window_builder.position_centered();
    if app.resizable.is_resizable() {
        window_builder.resizable();
    }
    let mut sdl_window = window_builder.build().context("failed to create window")?;
    log::info!(
        "opened window {:?} ({}x{}, resize: {:?}, anchor: {})",
        app.title,
        app.size.0,
        app.size.1,
        app.resizable,
        app.anchor
    );

    let mixer = match sdl_context
        .audio()
        .map_err(anyhow::Error::msg)
        .and_then(Mixer::open)
    {
        Ok(mixer) => Some(mixer),
        Err(e) => {
            log::warn!("audio unavailable, sounds will not play: {:#}", e);
            None
        }
    };

    let mut event_pump = sdl_context.event_pump().map_err(anyhow::Error::msg)?;

    let mut window = Window::new(app.size, app.resizable, app.anchor, mixer);
    let mut clock = FrameClock::new(app.frame_rate);
    game.initialize(&mut window)?;
    clock.reset();

    while window.is_running() {
        let frame = clock.tick();
        window.begin_frame(frame.dt);

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => window.stop(),
                Event::Window {
                    win_event: WindowEvent::Resized(w, h),
                    ..
                } => {
                    let raw = (w.max(1) as u32, h.max(1) as u32);
                    let size = window
                        .handle_resize(raw.0, raw.1)
                        .unwrap_or((window.width(), window.height()));
                    if size != raw {
                        sdl_window
                            .set_size(size.0, size.1)
                            .map_err(|e| anyhow::anyhow!("failed to resize window: {}", e))?;
                    }
                }
                Event::KeyDown {
                    keycode, repeat, ..
                } => {
                    if let (Some(key), false) = (convert_keycode(keycode), repeat) {
                        window.press_key(key);
                    }
                }
                Event::KeyUp {
                    keycode, repeat, ..
                } => {
                    if let (Some(key), false) = (convert_keycode(keycode), repeat) {
                        window.release_key(key);
                    }
                }
                Event::MouseButtonDown { mouse_btn, .. } => {
                    if let Some(button) = convert_button(mouse_btn) {
                        window.input_mut().set_button(button, true);
                    }
                }
                Event::MouseButtonUp { mouse_btn, .. } => {
                    if let Some(button) = convert_button(mouse_btn) {
                        window.input_mut().set_button(button, false);
                    }
                }
                _ => {}
            }
        }

        let mouse = event_pump.mouse_state();
        window.set_mouse_pixel(mouse.x(), mouse.y());

        game.update(&mut window)?;
        game.draw(&mut window)?;

        present(&sdl_window, &event_pump, window.screen_mut())?;
    }

    log::debug!("game loop finished");
    Ok(())
}

/// Copies the screen surface onto the window and shows it.
fn present(
    sdl_window: &sdl2::video::Window,
    event_pump: &EventPump,
    screen: &mut Surface,
) -> anyhow::Result<()> {
    let (width, height) = screen.size();
    let mut frame = sdl2::surface::Surface::from_data(
        screen.data_mut(),
        width,
        height,
        width * 4,
        PixelFormatEnum::RGBA32,
    )
    .map_err(anyhow::Error::msg)?;
    frame.set_blend_mode(BlendMode::None).map_err(anyhow::Error::msg)?;

    let mut target = sdl_window.surface(event_pump).map_err(anyhow::Error::msg)?;
    frame
        .blit(None, &mut target, None)
        .map_err(anyhow::Error::msg)?;
    target.update_window().map_err(anyhow::Error::msg)?;
    Ok(())
}

/// Maps SDL key codes to [`KeyCode`]s. Keys not listed are ignored.
const KEY_TABLE: &[(SDLKeyCode, KeyCode)] = &[
    (SDLKeyCode::A, KeyCode::A),
    (SDLKeyCode::B, KeyCode::B),
    (SDLKeyCode::C, KeyCode::C),
    (SDLKeyCode::D, KeyCode::D),
    (SDLKeyCode::E, KeyCode::E),
    (SDLKeyCode::F, KeyCode::F),
    (SDLKeyCode::G, KeyCode::G),
    (SDLKeyCode::H, KeyCode::H),
    (SDLKeyCode::I, KeyCode::I),
    (SDLKeyCode::J, KeyCode::J),
    (SDLKeyCode::K, KeyCode::K),
    (SDLKeyCode::L, KeyCode::L),
    (SDLKeyCode::M, KeyCode::M),
    (SDLKeyCode::N, KeyCode::N),
    (SDLKeyCode::O, KeyCode::O),
    (SDLKeyCode::P, KeyCode::P),
    (SDLKeyCode::Q, KeyCode::Q),
    (SDLKeyCode::R, KeyCode::R),
    (SDLKeyCode::S, KeyCode::S),
    (SDLKeyCode::T, KeyCode::T),
    (SDLKeyCode::U, KeyCode::U),
    (SDLKeyCode::V, KeyCode::V),
    (SDLKeyCode::W, KeyCode::W),
    (SDLKeyCode::X, KeyCode::X),
    (SDLKeyCode::Y, KeyCode::Y),
    (SDLKeyCode::Z, KeyCode::Z),
    (SDLKeyCode::Num0, KeyCode::Alpha0),
    (SDLKeyCode::Num1, KeyCode::Alpha1),
    (SDLKeyCode::Num2, KeyCode::Alpha2),
    (SDLKeyCode::Num3, KeyCode::Alpha3),
    (SDLKeyCode::Num4, KeyCode::Alpha4),
    (SDLKeyCode::Num5, KeyCode::Alpha5),
    (SDLKeyCode::Num6, KeyCode::Alpha6),
    (SDLKeyCode::Num7, KeyCode::Alpha7),
    (SDLKeyCode::Num8, KeyCode::Alpha8),
    (SDLKeyCode::Num9, KeyCode::Alpha9),
    (SDLKeyCode::F1, KeyCode::F1),
    (SDLKeyCode::F2, KeyCode::F2),
    (SDLKeyCode::F3, KeyCode::F3),
    (SDLKeyCode::F4, KeyCode::F4),
    (SDLKeyCode::F5, KeyCode::F5),
    (SDLKeyCode::F6, KeyCode::F6),
    (SDLKeyCode::F7, KeyCode::F7),
    (SDLKeyCode::F8, KeyCode::F8),
    (SDLKeyCode::F9, KeyCode::F9),
    (SDLKeyCode::F10, KeyCode::F10),
    (SDLKeyCode::F11, KeyCode::F11),
    (SDLKeyCode::F12, KeyCode::F12),
    (SDLKeyCode::Up, KeyCode::Up),
    (SDLKeyCode::Down, KeyCode::Down),
    (SDLKeyCode::Left, KeyCode::Left),
    (SDLKeyCode::Right, KeyCode::Right),
    (SDLKeyCode::LCtrl, KeyCode::LeftControl),
    (SDLKeyCode::LShift, KeyCode::LeftShift),
    (SDLKeyCode::LAlt, KeyCode::LeftAlt),
    (SDLKeyCode::RCtrl, KeyCode::RightControl),
    (SDLKeyCode::RShift, KeyCode::RightShift),
    (SDLKeyCode::RAlt, KeyCode::RightAlt),
    (SDLKeyCode::CapsLock, KeyCode::CapsLock),
    (SDLKeyCode::Space, KeyCode::Space),
    (SDLKeyCode::Return, KeyCode::Return),
    (SDLKeyCode::Tab, KeyCode::Tab),
    (SDLKeyCode::Backspace, KeyCode::Backspace),
    (SDLKeyCode::Escape, KeyCode::Escape),
    (SDLKeyCode::Delete, KeyCode::Delete),
    (SDLKeyCode::Insert, KeyCode::Insert),
    (SDLKeyCode::Home, KeyCode::Home),
    (SDLKeyCode::End, KeyCode::End),
    (SDLKeyCode::PageUp, KeyCode::PageUp),
    (SDLKeyCode::PageDown, KeyCode::PageDown),
    (SDLKeyCode::Minus, KeyCode::Minus),
    (SDLKeyCode::Equals, KeyCode::Equals),
    (SDLKeyCode::LeftBracket, KeyCode::LeftBracket),
    (SDLKeyCode::RightBracket, KeyCode::RightBracket),
    (SDLKeyCode::Backslash, KeyCode::Backslash),
    (SDLKeyCode::Semicolon, KeyCode::Semicolon),
    (SDLKeyCode::Quote, KeyCode::Quote),
    (SDLKeyCode::Comma, KeyCode::Comma),
    (SDLKeyCode::Period, KeyCode::Period),
    (SDLKeyCode::Slash, KeyCode::Slash),
    (SDLKeyCode::Backquote, KeyCode::Backquote),
    (SDLKeyCode::Kp0, KeyCode::Keypad0),
    (SDLKeyCode::Kp1, KeyCode::Keypad1),
    (SDLKeyCode::Kp2, KeyCode::Keypad2),
    (SDLKeyCode::Kp3, KeyCode::Keypad3),
    (SDLKeyCode::Kp4, KeyCode::Keypad4),
    (SDLKeyCode::Kp5, KeyCode::Keypad5),
    (SDLKeyCode::Kp6, KeyCode::Keypad6),
    (SDLKeyCode::Kp7, KeyCode::Keypad7),
    (SDLKeyCode::Kp8, KeyCode::Keypad8),
    (SDLKeyCode::Kp9, KeyCode::Keypad9),
    (SDLKeyCode::KpPeriod, KeyCode::KeypadPeriod),
    (SDLKeyCode::KpDivide, KeyCode::KeypadDivide),
    (SDLKeyCode::KpMultiply, KeyCode::KeypadMultiply),
    (SDLKeyCode::KpMinus, KeyCode::KeypadMinus),
    (SDLKeyCode::KpPlus, KeyCode::KeypadPlus),
    (SDLKeyCode::KpEnter, KeyCode::KeypadEnter),
];

fn convert_keycode(keycode: Option<SDLKeyCode>) -> Option<KeyCode> {
    let keycode = keycode?;
    KEY_TABLE
        .iter()
        .find(|(sdl, _)| *sdl == keycode)
        .map(|&(_, key)| key)
}

fn convert_button(button: SDLMouseButton) -> Option<MouseButton> {
    match button {
        SDLMouseButton::Left => Some(MouseButton::Left),
        SDLMouseButton::Middle => Some(MouseButton::Middle),
        SDLMouseButton::Right => Some(MouseButton::Right),
        _ => None,
    }
}
