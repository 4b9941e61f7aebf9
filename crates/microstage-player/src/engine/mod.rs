//! Demo engine — minifb-based window, input polling, and frame loop.
//!
//! Renders into a 120x120 pixel framebuffer with 32-bit ARGB pixels,
//! upscaled to the window by an integer factor.

pub mod font;
pub mod palette;
pub mod sound_engine;

use anyhow::Result;
use microstage_common::DemoConfig;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::assets::sheet::{SpriteSheet, Tile};
use crate::assets::AssetStore;
use crate::game::{cursor, GameState};

pub const CANVAS_WIDTH: usize = 120;
pub const CANVAS_HEIGHT: usize = 120;
const FPS: usize = 60;

/// Run the demo until the window closes or the quit key is pressed
pub fn run(assets: AssetStore, config: DemoConfig) -> Result<()> {
    let scale = config.window_scale.max(1) as usize;
    let win_w = CANVAS_WIDTH * scale;
    let win_h = CANVAS_HEIGHT * scale;

    let mut window = Window::new("Microstage", win_w, win_h, WindowOptions::default())
        .map_err(|e| anyhow::anyhow!("Window creation failed: {}", e))?;
    window.set_target_fps(FPS);
    window.set_cursor_visibility(false); // software cursor rendered on the canvas

    let mut game = GameState::new(assets, &config);

    // Internal framebuffer at native resolution, plus the scaled output
    let mut framebuffer = vec![0u32; CANVAS_WIDTH * CANVAS_HEIGHT];
    let mut scaled_buf = vec![0u32; win_w * win_h];
    let mut prev_mouse_down = false;
    let mut frame_count: u64 = 0;

    tracing::info!("Engine initialized, entering frame loop");
    tracing::info!("Controls: menu click | arrow keys move the dancer | Q quits");

    while window.is_open() {
        // Mouse → logical canvas coordinates
        let (mouse_x, mouse_y) = window
            .get_mouse_pos(MouseMode::Clamp)
            .unwrap_or((0.0, 0.0));
        let mx = ((mouse_x as usize) / scale).min(CANVAS_WIDTH - 1) as i32;
        let my = ((mouse_y as usize) / scale).min(CANVAS_HEIGHT - 1) as i32;

        let mouse_down = window.get_mouse_down(MouseButton::Left);
        let mouse_clicked = mouse_down && !prev_mouse_down;
        prev_mouse_down = mouse_down;

        if window.is_key_pressed(Key::Q, KeyRepeat::No) {
            tracing::info!("Quit key pressed, engine shutdown");
            return Ok(());
        }

        game.on_mouse_state(mx, my, mouse_down);
        game.update_move_keys(
            window.is_key_down(Key::Up),
            window.is_key_down(Key::Down),
            window.is_key_down(Key::Left),
            window.is_key_down(Key::Right),
        );
        game.update();
        if mouse_clicked {
            game.on_click(mx, my);
        }

        // Render: clear → menu + scene → cursor on top
        framebuffer.fill(palette::BLACK);
        game.draw(&mut framebuffer);
        if config.show_cursor {
            cursor::blit(&mut framebuffer, mx, my);
        }

        scale_canvas(&framebuffer, &mut scaled_buf, scale);

        frame_count += 1;
        if frame_count % 30 == 0 {
            let scene = match game.current_scene() {
                Some(s) => format!("{:?}", s),
                None => "Menu".to_string(),
            };
            window.set_title(&format!("Microstage – {}", scene));
        }

        window
            .update_with_buffer(&scaled_buf, win_w, win_h)
            .map_err(|e| anyhow::anyhow!("Display error: {}", e))?;
    }

    tracing::info!("Window closed, engine shutdown");
    Ok(())
}

/// Integer nearest-neighbor upscale of the canvas into the window buffer
fn scale_canvas(src: &[u32], dst: &mut [u32], scale: usize) {
    let dst_w = CANVAS_WIDTH * scale;
    for dy in 0..CANVAS_HEIGHT * scale {
        let src_row = (dy / scale) * CANVAS_WIDTH;
        let dst_row = dy * dst_w;
        for dx in 0..dst_w {
            dst[dst_row + dx] = src[src_row + dx / scale];
        }
    }
}

/// Blit one sheet tile onto the ARGB framebuffer with alpha blending,
/// clipped at the canvas edges
pub fn blit_tile(fb: &mut [u32], sheet: &SpriteSheet, x: i32, y: i32, tile: Tile) {
    debug_assert!(sheet.covers(tile), "tile outside the sheet");
    for sy in 0..tile.h as i32 {
        let dy = y + sy;
        if dy < 0 || dy >= CANVAS_HEIGHT as i32 {
            continue;
        }
        for sx in 0..tile.w as i32 {
            let dx = x + sx;
            if dx < 0 || dx >= CANVAS_WIDTH as i32 {
                continue;
            }

            let Some([r, g, b, a]) = sheet.pixel(tile.u + sx as u32, tile.v + sy as u32) else {
                continue;
            };
            let (r, g, b, a) = (r as u32, g as u32, b as u32, a as u32);

            if a == 0 {
                continue; // Fully transparent
            }

            let dst_idx = dy as usize * CANVAS_WIDTH + dx as usize;

            if a >= 255 {
                // Fully opaque — no blending needed
                fb[dst_idx] = 0xFF000000 | (r << 16) | (g << 8) | b;
            } else {
                // Alpha blend
                let dst = fb[dst_idx];
                let dr = (dst >> 16) & 0xFF;
                let dg = (dst >> 8) & 0xFF;
                let db = dst & 0xFF;
                let inv_a = 255 - a;
                let out_r = (r * a + dr * inv_a) / 255;
                let out_g = (g * a + dg * inv_a) / 255;
                let out_b = (b * a + db * inv_a) / 255;
                fb[dst_idx] = 0xFF000000 | (out_r << 16) | (out_g << 8) | out_b;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_sheet(color: [u8; 4]) -> SpriteSheet {
        let mut pixels = Vec::with_capacity(16 * 48 * 4);
        for _ in 0..16 * 48 {
            pixels.extend_from_slice(&color);
        }
        SpriteSheet::from_rgba(16, 48, pixels)
    }

    #[test]
    fn blit_clips_off_canvas() {
        let sheet = solid_sheet([255, 255, 255, 255]);
        let mut fb = vec![palette::BLACK; CANVAS_WIDTH * CANVAS_HEIGHT];
        let tile = Tile { u: 0, v: 0, w: 8, h: 8 };
        blit_tile(&mut fb, &sheet, -4, -4, tile);
        blit_tile(&mut fb, &sheet, CANVAS_WIDTH as i32 - 4, CANVAS_HEIGHT as i32 - 4, tile);
        // 4x4 visible at each corner
        let lit = fb.iter().filter(|&&p| p != palette::BLACK).count();
        assert_eq!(lit, 32);
    }

    #[test]
    fn transparent_pixels_leave_background() {
        let sheet = solid_sheet([255, 255, 255, 0]);
        let mut fb = vec![palette::BLACK; CANVAS_WIDTH * CANVAS_HEIGHT];
        blit_tile(&mut fb, &sheet, 10, 10, Tile { u: 0, v: 0, w: 8, h: 8 });
        assert!(fb.iter().all(|&p| p == palette::BLACK));
    }

    #[test]
    fn scale_duplicates_pixels() {
        let mut src = vec![palette::BLACK; CANVAS_WIDTH * CANVAS_HEIGHT];
        src[0] = palette::WHITE;
        let scale = 2;
        let mut dst = vec![0u32; CANVAS_WIDTH * scale * CANVAS_HEIGHT * scale];
        scale_canvas(&src, &mut dst, scale);
        let dst_w = CANVAS_WIDTH * scale;
        for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert_eq!(dst[dy * dst_w + dx], palette::WHITE);
        }
        assert_eq!(dst[2], palette::BLACK);
    }
}
