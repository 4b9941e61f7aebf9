//! Software cursor — a single arrow blitted over the canvas each frame
//!
//! The engine hides the OS cursor and draws this one last, so it stays
//! on top of the menu and the active scene. The hotspot is the arrow
//! tip at the pattern origin.

use crate::engine::palette;
use crate::engine::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// '#' = outline (black), 'X' = fill (white)
const ARROW: [&str; 8] = [
    "#.......",
    "##......",
    "#X#.....",
    "#XX#....",
    "#XXX#...",
    "#XXXX#..",
    "#XX###..",
    "#X#.....",
];

/// Draw the cursor with its hotspot at (mx, my), clipped at the edges
pub fn blit(fb: &mut [u32], mx: i32, my: i32) {
    for (cy, row) in ARROW.iter().enumerate() {
        let py = my + cy as i32;
        if py < 0 || py >= CANVAS_HEIGHT as i32 {
            continue;
        }
        for (cx, cell) in row.bytes().enumerate() {
            let color = match cell {
                b'#' => palette::BLACK,
                b'X' => palette::WHITE,
                _ => continue,
            };
            let px = mx + cx as i32;
            if px < 0 || px >= CANVAS_WIDTH as i32 {
                continue;
            }
            fb[py as usize * CANVAS_WIDTH + px as usize] = color;
        }
    }
}
