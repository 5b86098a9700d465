use crate::domain::ports::LogoSource;
use crate::utils::error::{QrisError, Result};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Conventional logo location, relative to the working directory.
pub const DEFAULT_LOGO_PATH: &str = "logo/qris.png";

/// Never overlays anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLogo;

impl LogoSource for NoLogo {
    fn load(&self) -> Result<Option<DynamicImage>> {
        Ok(None)
    }
}

/// Reads the logo from disk on every call. A missing file disables the overlay.
#[derive(Debug, Clone)]
pub struct FileLogo {
    path: PathBuf,
}

impl FileLogo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileLogo {
    fn default() -> Self {
        Self::new(DEFAULT_LOGO_PATH)
    }
}

impl LogoSource for FileLogo {
    fn load(&self) -> Result<Option<DynamicImage>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "Logo not found, rendering without overlay");
            return Ok(None);
        }

        let logo = image::open(&self.path).map_err(|e| QrisError::ImageGeneration {
            message: format!("cannot read logo {}: {}", self.path.display(), e),
        })?;
        Ok(Some(logo))
    }
}

/// Logo decoded once and shared across renders.
#[derive(Debug, Clone)]
pub struct MemoryLogo {
    image: Option<Arc<DynamicImage>>,
}

impl MemoryLogo {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image: Some(Arc::new(image)),
        }
    }

    /// Decode an encoded image (PNG) held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes).map_err(|e| QrisError::ImageGeneration {
            message: format!("cannot decode logo: {}", e),
        })?;
        Ok(Self::new(image))
    }

    /// Load through [`FileLogo`] once; a missing file yields an empty source.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let image = FileLogo::new(path).load()?;
        Ok(Self {
            image: image.map(Arc::new),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.image.is_none()
    }
}

impl LogoSource for MemoryLogo {
    fn load(&self) -> Result<Option<DynamicImage>> {
        Ok(self.image.as_deref().cloned())
    }
}

impl<L: LogoSource + ?Sized> LogoSource for Box<L> {
    fn load(&self) -> Result<Option<DynamicImage>> {
        (**self).load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn write_png(dir: &TempDir, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.path().join(name);
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_no_logo() {
        assert!(NoLogo.load().unwrap().is_none());
    }

    #[test]
    fn test_file_logo_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let logo = FileLogo::new(dir.path().join("absent.png"));
        assert!(logo.load().unwrap().is_none());
    }

    #[test]
    fn test_file_logo_reads_png() {
        let dir = TempDir::new().unwrap();
        let path = write_png(&dir, "logo.png", 40, 20);

        let image = FileLogo::new(&path).load().unwrap().unwrap();
        assert_eq!((image.width(), image.height()), (40, 20));
    }

    #[test]
    fn test_file_logo_corrupt_is_image_generation_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        let err = FileLogo::new(&path).load().unwrap_err();
        assert!(matches!(err, QrisError::ImageGeneration { .. }));
        assert!(err.to_string().contains("broken.png"));
    }

    #[test]
    fn test_memory_logo_from_path_and_bytes() {
        let dir = TempDir::new().unwrap();
        let path = write_png(&dir, "logo.png", 8, 8);

        let cached = MemoryLogo::from_path(&path).unwrap();
        assert!(!cached.is_empty());
        assert_eq!(cached.load().unwrap().unwrap().width(), 8);

        let bytes = std::fs::read(&path).unwrap();
        let decoded = MemoryLogo::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.load().unwrap().unwrap().height(), 8);

        assert!(MemoryLogo::from_path(dir.path().join("none.png"))
            .unwrap()
            .is_empty());
        assert!(MemoryLogo::from_bytes(b"garbage").is_err());
    }
}
