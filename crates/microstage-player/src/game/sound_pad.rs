//! Sound-pad scene — eight clickable tiles in a ring, one note each
//!
//! The pads sit clockwise from the top around a fixed anchor. A held
//! left click triggers the pad under the cursor; staying on the same
//! pad does not retrigger, sliding onto a different pad (or clicking
//! again) does. Triggered notes layer.

use crate::assets::sheet::{SpriteSheet, Tile};
use crate::engine;
use crate::engine::font;
use crate::engine::palette;

/// Sheet tiles for the eight pads, clockwise from the top
const PAD_TILES: [Tile; 8] = [
    Tile { u: 0, v: 16, w: 8, h: 8 },
    Tile { u: 8, v: 16, w: 8, h: 8 },
    Tile { u: 0, v: 24, w: 8, h: 8 },
    Tile { u: 8, v: 24, w: 8, h: 8 },
    Tile { u: 0, v: 32, w: 8, h: 8 },
    Tile { u: 8, v: 32, w: 8, h: 8 },
    Tile { u: 0, v: 40, w: 8, h: 8 },
    Tile { u: 8, v: 40, w: 8, h: 8 },
];

/// Canvas offsets of each pad from the anchor, clockwise from the top
const PAD_OFFSETS: [(i32, i32); 8] = [
    (0, 0),
    (8, 8),
    (16, 16),
    (8, 24),
    (0, 32),
    (-8, 24),
    (-16, 16),
    (-8, 8),
];

const PAD_ANCHOR: (i32, i32) = (32, 24);
const PAD_SIZE: i32 = 8;
const CAPTION: &str = "Push the buttons!";

/// Canvas position of pad `index`
fn pad_origin(index: usize) -> (i32, i32) {
    let (ox, oy) = PAD_OFFSETS[index];
    (PAD_ANCHOR.0 + ox, PAD_ANCHOR.1 + oy)
}

/// Hit-test a canvas point against the pads in list order, first match
/// wins. Boxes are 8x8 with inclusive edges.
pub fn hit_pad(x: i32, y: i32) -> Option<usize> {
    (0..PAD_OFFSETS.len()).find(|&index| {
        let (px, py) = pad_origin(index);
        x >= px && x <= px + PAD_SIZE && y >= py && y <= py + PAD_SIZE
    })
}

pub struct PadScene {
    /// Pad the held click is currently resting on, if any
    held_pad: Option<usize>,
}

impl PadScene {
    pub fn new() -> Self {
        Self { held_pad: None }
    }

    /// Resolve a held click at (x, y). Returns the pad index to trigger,
    /// or None when the cursor is off the pads or still on the same one.
    pub fn select(&mut self, x: i32, y: i32) -> Option<usize> {
        let hit = hit_pad(x, y);
        let trigger = match (hit, self.held_pad) {
            (Some(index), Some(held)) if index == held => None,
            (Some(index), _) => Some(index),
            (None, _) => None,
        };
        self.held_pad = hit;
        trigger
    }

    /// The click was released
    pub fn release(&mut self) {
        self.held_pad = None;
    }

    pub fn draw(&self, fb: &mut [u32], sheet: &SpriteSheet) {
        font::draw_text(fb, 10, 10, CAPTION, palette::RED);
        for (index, tile) in PAD_TILES.iter().enumerate() {
            let (x, y) = pad_origin(index);
            engine::blit_tile(fb, sheet, x, y, *tile);
        }
    }
}

impl Default for PadScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_each_pad_resolves_its_index() {
        for index in 0..8 {
            let (x, y) = pad_origin(index);
            assert_eq!(hit_pad(x + 4, y + 4), Some(index));
        }
    }

    #[test]
    fn points_off_the_ring_miss() {
        assert_eq!(hit_pad(0, 0), None);
        assert_eq!(hit_pad(119, 119), None);
        // dead center of the ring, between the pads
        assert_eq!(hit_pad(36, 45), None);
    }

    #[test]
    fn shared_corner_goes_to_the_earlier_pad() {
        // pad 0 spans (32,24)-(40,32) inclusive; pad 1 starts at (40,32)
        assert_eq!(hit_pad(40, 32), Some(0));
    }

    #[test]
    fn holding_on_one_pad_triggers_once() {
        let mut pad = PadScene::new();
        let (x, y) = pad_origin(3);
        assert_eq!(pad.select(x + 1, y + 1), Some(3));
        assert_eq!(pad.select(x + 1, y + 1), None);
        assert_eq!(pad.select(x + 2, y + 1), None);
    }

    #[test]
    fn sliding_to_another_pad_retriggers() {
        let mut pad = PadScene::new();
        let (x0, y0) = pad_origin(0);
        let (x1, y1) = pad_origin(1);
        assert_eq!(pad.select(x0 + 4, y0 + 4), Some(0));
        assert_eq!(pad.select(x1 + 4, y1 + 4), Some(1));
        assert_eq!(pad.select(x0 + 4, y0 + 4), Some(0));
    }

    #[test]
    fn release_rearms_the_same_pad() {
        let mut pad = PadScene::new();
        let (x, y) = pad_origin(5);
        assert_eq!(pad.select(x + 4, y + 4), Some(5));
        pad.release();
        assert_eq!(pad.select(x + 4, y + 4), Some(5));
    }

    #[test]
    fn sliding_off_and_back_retriggers() {
        let mut pad = PadScene::new();
        let (x, y) = pad_origin(6);
        assert_eq!(pad.select(x + 4, y + 4), Some(6));
        assert_eq!(pad.select(0, 0), None);
        assert_eq!(pad.select(x + 4, y + 4), Some(6));
    }
}
