use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::{info, warn};

use super::texture_resource::Texture;

/// Texture assignment for a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureKind {
    #[default]
    None,
    Brick,
    Wood,
}

impl TextureKind {
    pub const ALL: [TextureKind; 3] = [TextureKind::None, TextureKind::Brick, TextureKind::Wood];

    pub fn label(&self) -> &'static str {
        match self {
            TextureKind::None => "None",
            TextureKind::Brick => "Brick",
            TextureKind::Wood => "Wood",
        }
    }

    fn file_stem(&self) -> Option<&'static str> {
        match self {
            TextureKind::None => None,
            TextureKind::Brick => Some("brick"),
            TextureKind::Wood => Some("wood"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TextureLoadError {
    #[error("failed to read texture file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode texture file {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Diffuse and normal map pair for one texture kind
pub struct TexturePair {
    pub diffuse: Texture,
    pub normal: Texture,
}

/// All textures the viewer can assign to objects
///
/// Missing or unreadable files are replaced by procedurally generated
/// patterns so the viewer always starts.
pub struct TextureSet {
    pub none: TexturePair,
    pub brick: TexturePair,
    pub wood: TexturePair,
}

impl TextureSet {
    pub fn load(device: &wgpu::Device, queue: &wgpu::Queue, asset_dir: &Path) -> Self {
        let none = TexturePair {
            diffuse: Texture::single_pixel(device, queue, [255, 255, 255, 255], "untextured"),
            normal: Texture::single_pixel(device, queue, [128, 128, 255, 255], "flat normal"),
        };
        let brick = load_pair(device, queue, asset_dir, TextureKind::Brick);
        let wood = load_pair(device, queue, asset_dir, TextureKind::Wood);

        Self { none, brick, wood }
    }

    pub fn pair(&self, kind: TextureKind) -> &TexturePair {
        match kind {
            TextureKind::None => &self.none,
            TextureKind::Brick => &self.brick,
            TextureKind::Wood => &self.wood,
        }
    }
}

fn load_pair(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    asset_dir: &Path,
    kind: TextureKind,
) -> TexturePair {
    // Only called for kinds that load from disk.
    let stem = kind.file_stem().unwrap_or("untextured");
    let diffuse = match load_rgba(&asset_dir.join(format!("{stem}_diffuse.jpg"))) {
        Ok(image) => {
            info!("loaded {stem} diffuse map from disk");
            Texture::from_image(device, queue, &image, &format!("{stem} diffuse"), true)
        }
        Err(err) => {
            warn!("{err}, generating fallback pattern");
            let image = match kind {
                TextureKind::Wood => generate_wood_diffuse(),
                _ => generate_brick_diffuse(),
            };
            Texture::from_image(device, queue, &image, &format!("{stem} diffuse"), true)
        }
    };

    let normal = match load_rgba(&asset_dir.join(format!("{stem}_normal.jpg"))) {
        Ok(image) => {
            info!("loaded {stem} normal map from disk");
            Texture::from_image(device, queue, &image, &format!("{stem} normal"), false)
        }
        Err(err) => {
            warn!("{err}, generating fallback pattern");
            let image = match kind {
                TextureKind::Wood => generate_wood_normal(),
                _ => generate_brick_normal(),
            };
            Texture::from_image(device, queue, &image, &format!("{stem} normal"), false)
        }
    };

    TexturePair { diffuse, normal }
}

fn load_rgba(path: &Path) -> Result<RgbaImage, TextureLoadError> {
    let bytes = std::fs::read(path).map_err(|source| TextureLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = image::load_from_memory(&bytes).map_err(|source| TextureLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

const PATTERN_SIZE: u32 = 256;

/// Staggered brick courses with mortar lines
fn generate_brick_diffuse() -> RgbaImage {
    RgbaImage::from_fn(PATTERN_SIZE, PATTERN_SIZE, |x, y| {
        let course = y / 32;
        let offset = if course % 2 == 0 { 0 } else { 32 };
        let in_mortar = y % 32 < 3 || (x + offset) % 64 < 3;
        if in_mortar {
            image::Rgba([180, 175, 170, 255])
        } else {
            let tint = ((x * 7 + y * 13) % 23) as u8;
            image::Rgba([150 + tint / 2, 70 + tint / 3, 55, 255])
        }
    })
}

fn generate_brick_normal() -> RgbaImage {
    RgbaImage::from_fn(PATTERN_SIZE, PATTERN_SIZE, |x, y| {
        let course = y / 32;
        let offset = if course % 2 == 0 { 0 } else { 32 };
        let in_mortar = y % 32 < 3 || (x + offset) % 64 < 3;
        if in_mortar {
            image::Rgba([128, 100, 240, 255])
        } else {
            image::Rgba([128, 128, 255, 255])
        }
    })
}

/// Vertical grain bands with slight waviness
fn generate_wood_diffuse() -> RgbaImage {
    RgbaImage::from_fn(PATTERN_SIZE, PATTERN_SIZE, |x, y| {
        let wave = (y as f32 * 0.08).sin() * 6.0;
        let band = (((x as f32 + wave) * 0.25).sin() * 0.5 + 0.5) * 40.0;
        let base = 120.0 + band;
        image::Rgba([base as u8, (base * 0.6) as u8, (base * 0.35) as u8, 255])
    })
}

fn generate_wood_normal() -> RgbaImage {
    RgbaImage::from_fn(PATTERN_SIZE, PATTERN_SIZE, |x, y| {
        let wave = (y as f32 * 0.08).sin() * 6.0;
        let slope = ((x as f32 + wave) * 0.25).cos() * 20.0;
        image::Rgba([(128.0 + slope) as u8, 128, 255, 255])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels_are_distinct() {
        let labels: Vec<_> = TextureKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(labels, vec!["None", "Brick", "Wood"]);
    }

    #[test]
    fn test_none_has_no_file() {
        assert!(TextureKind::None.file_stem().is_none());
        assert_eq!(TextureKind::Brick.file_stem(), Some("brick"));
    }

    #[test]
    fn test_fallback_patterns_have_expected_size() {
        assert_eq!(generate_brick_diffuse().dimensions(), (256, 256));
        assert_eq!(generate_wood_normal().dimensions(), (256, 256));
    }

    #[test]
    fn test_missing_file_reports_io_error() {
        let err = load_rgba(Path::new("/nonexistent/brick_diffuse.jpg")).unwrap_err();
        assert!(matches!(err, TextureLoadError::Io { .. }));
    }
}
