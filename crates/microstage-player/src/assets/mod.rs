//! Sprite sheet loading and storage

pub mod sheet;

use std::path::{Path, PathBuf};

use self::sheet::{SheetError, SpriteSheet};

/// Central asset store — the decoded sprite sheet and where it came from
pub struct AssetStore {
    pub sheet: SpriteSheet,
    pub source: PathBuf,
}

impl AssetStore {
    pub fn load(path: &Path) -> Result<Self, SheetError> {
        let sheet = SpriteSheet::load(path)?;
        tracing::info!(
            "Loaded sprite sheet {}x{} from {}",
            sheet.width(),
            sheet.height(),
            path.display()
        );
        Ok(Self {
            sheet,
            source: path.to_path_buf(),
        })
    }
}
