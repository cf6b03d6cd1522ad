//! Sheet image decoding and per-tile cropping

use std::path::Path;

use image::{DynamicImage, GenericImageView};

use super::placement::SourceRect;
use crate::error::{Error, Result};

#[derive(Debug)]
pub struct SheetImage {
    image: DynamicImage,
}

impl SheetImage {
    pub fn open(path: &Path) -> Result<Self> {
        let image = image::open(path).map_err(|e| Error::SheetImage {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        tracing::info!(path = %path.display(), width = image.width(), height = image.height(), "loaded sheet image");
        Ok(Self { image })
    }

    pub fn from_image(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// The pixels of one sheet cell. `None` when the rectangle leaves the image.
    pub fn crop(&self, source: &SourceRect) -> Option<DynamicImage> {
        let (width, height) = self.dimensions();
        let right = source.x.checked_add(source.width)?;
        let bottom = source.y.checked_add(source.height)?;
        if right > width || bottom > height {
            return None;
        }
        Some(self.image.crop_imm(source.x, source.y, source.width, source.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_crop_cell() {
        let mut sheet = RgbaImage::new(32, 16);
        sheet.put_pixel(16, 0, Rgba([255, 0, 0, 255]));
        let sheet = SheetImage::from_image(DynamicImage::ImageRgba8(sheet));

        let cell = sheet.crop(&SourceRect { x: 16, y: 0, width: 16, height: 16 }).unwrap();
        assert_eq!(cell.dimensions(), (16, 16));
        assert_eq!(cell.get_pixel(0, 0), Rgba([255, 0, 0, 255]));

        assert!(sheet.crop(&SourceRect { x: 24, y: 0, width: 16, height: 16 }).is_none());
    }

    #[test]
    fn test_shipped_sheet_covers_every_rule() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
        let sheet = SheetImage::open(&root.join("terrain_sheet.png")).unwrap();
        let layout = crate::tiles::SheetLayout::load(&root.join("terrain_sheet.json")).unwrap();
        for rule in &layout.layout {
            let placement = crate::tiles::TilePlacement::new(rule, 0, 0, levelgen_noise::Point::new(8.0, 8.0));
            assert!(sheet.crop(&placement.source).is_some(), "{:?}", rule.cell_position);
        }
    }
}
