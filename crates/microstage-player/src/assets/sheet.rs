//! Sprite sheet — an RGBA tile atlas decoded from a PNG
//!
//! The sheet is loaded once at startup. Widgets address it through
//! fixed `Tile` rectangles; drawing goes through `engine::blit_tile`.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Minimum atlas extent required by the tile tables in game/
pub const MIN_SHEET_WIDTH: u32 = 16;
pub const MIN_SHEET_HEIGHT: u32 = 48;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Failed to load sprite sheet {path}: {source}")]
    Load {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Sprite sheet {path} is {width}x{height}; the tile atlas needs at least 16x48")]
    TooSmall {
        path: PathBuf,
        width: u32,
        height: u32,
    },
}

/// One fixed rectangle of the sheet (source coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub u: u32,
    pub v: u32,
    pub w: u32,
    pub h: u32,
}

/// Decoded sheet pixels, row-major RGBA8
pub struct SpriteSheet {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl SpriteSheet {
    pub fn load(path: &Path) -> Result<Self, SheetError> {
        let img = image::open(path).map_err(|source| SheetError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width < MIN_SHEET_WIDTH || height < MIN_SHEET_HEIGHT {
            return Err(SheetError::TooSmall {
                path: path.to_path_buf(),
                width,
                height,
            });
        }
        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Build from raw RGBA bytes (row-major, 4 bytes per pixel)
    #[allow(dead_code)] // Used by unit tests across the crate
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        assert_eq!(pixels.len(), (width * height * 4) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA at sheet coordinates; None outside the sheet
    pub fn pixel(&self, u: u32, v: u32) -> Option<[u8; 4]> {
        if u >= self.width || v >= self.height {
            return None;
        }
        let idx = ((v * self.width + u) * 4) as usize;
        Some([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ])
    }

    /// Whether a tile lies fully inside the sheet
    pub fn covers(&self, tile: Tile) -> bool {
        tile.u + tile.w <= self.width && tile.v + tile.h <= self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> SpriteSheet {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for v in 0..height {
            for u in 0..width {
                let lum = if (u + v) % 2 == 0 { 255 } else { 0 };
                pixels.extend_from_slice(&[lum, lum, lum, 255]);
            }
        }
        SpriteSheet::from_rgba(width, height, pixels)
    }

    #[test]
    fn pixel_lookup() {
        let sheet = checker(16, 48);
        assert_eq!(sheet.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(sheet.pixel(1, 0), Some([0, 0, 0, 255]));
        assert_eq!(sheet.pixel(16, 0), None);
        assert_eq!(sheet.pixel(0, 48), None);
    }

    #[test]
    fn tile_coverage() {
        let sheet = checker(16, 48);
        let inside = Tile { u: 8, v: 40, w: 8, h: 8 };
        let past_right = Tile { u: 9, v: 0, w: 8, h: 8 };
        let past_bottom = Tile { u: 0, v: 41, w: 8, h: 8 };
        assert!(sheet.covers(inside));
        assert!(!sheet.covers(past_right));
        assert!(!sheet.covers(past_bottom));
    }
}
