use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result, bail};
use raylib::prelude::*;
use exif::{Reader, Tag, Value, In};
use tracing::{debug, warn};
use crate::slideshow::placement::Size;

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let entries = fs::read_dir(dir_path)
        .with_context(|| format!("Failed to read directory {}", dir_path.display()))?;

    for entry in entries {
        let path = entry.context("Failed to read directory entry")?.path();
        if path.is_file() && is_supported_image(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        bail!("No image files found in directory: {}", dir_path.display());
    }
    Ok(paths)
}

fn is_supported_image(path: &Path) -> bool {
    let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();
    matches!(extension.as_str(), "png" | "jpg" | "jpeg" | "bmp" | "gif")
}

/// Largest size with the same aspect ratio that fits in `max`. Small images grow.
pub fn fit_within(size: Size, max: Size) -> Size {
    if size.width <= 0 || size.height <= 0 {
        return size;
    }
    let scale_x = max.width as f32 / size.width as f32;
    let scale_y = max.height as f32 / size.height as f32;
    let scale = scale_x.min(scale_y);
    Size::new(
        ((size.width as f32 * scale) as i32).max(1),
        ((size.height as f32 * scale) as i32).max(1),
    )
}

// --- Load Image, Apply EXIF Rotation, optionally rescale, Create Texture ---
pub fn load_texture(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
    max_size: Option<Size>,
) -> Result<Texture2D> {
    let mut image = load_image_with_exif_rotation(image_path)?;

    if let Some(max) = max_size {
        let fitted = fit_within(Size::new(image.width(), image.height()), max);
        image.resize(fitted.width, fitted.height);
    }

    let texture = rl
        .load_texture_from_image(thread, &image)
        .map_err(|e| anyhow::anyhow!("Failed to create texture for {}: {}", image_path.display(), e))?;
    debug!(path = %image_path.display(), width = texture.width(), height = texture.height(), "texture loaded");
    Ok(texture)
}

fn load_image_with_exif_rotation(image_path: &Path) -> Result<Image> {
    let file_bytes = fs::read(image_path)
        .with_context(|| format!("Failed to read file {}", image_path.display()))?;

    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();
    let orientation = if extension == "jpg" || extension == "jpeg" {
        read_orientation(image_path, &file_bytes)
    } else {
        1
    };

    let mut image = Image::load_image_from_mem(&(".".to_string() + &extension), &file_bytes)
        .map_err(|e| anyhow::anyhow!("Failed to load image data for {}: {}", image_path.display(), e))?;

    // 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise.
    // Flipped orientations are left alone.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    Ok(image)
}

// EXIF orientation tag, 1 (normal) when missing or unreadable
fn read_orientation(image_path: &Path, file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match &field.value {
                Value::Short(values) => values.first().copied(),
                _ => None,
            })
            .unwrap_or(1),
        Err(e) => {
            warn!(path = %image_path.display(), "could not read EXIF data: {}", e);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_keeps_aspect_ratio() {
        let max = Size::new(400, 400);
        assert_eq!(fit_within(Size::new(800, 400), max), Size::new(400, 200));
        assert_eq!(fit_within(Size::new(300, 600), max), Size::new(200, 400));
    }

    #[test]
    fn fit_grows_small_images() {
        assert_eq!(fit_within(Size::new(100, 50), Size::new(400, 400)), Size::new(400, 200));
    }

    #[test]
    fn fit_ignores_degenerate_sizes() {
        assert_eq!(fit_within(Size::new(0, 10), Size::new(400, 400)), Size::new(0, 10));
    }

    #[test]
    fn only_known_extensions_are_images() {
        assert!(is_supported_image(Path::new("logo.PNG")));
        assert!(is_supported_image(Path::new("a/b/photo.jpeg")));
        assert!(!is_supported_image(Path::new("notes.txt")));
        assert!(!is_supported_image(Path::new("README")));
    }

    #[test]
    fn directory_without_images_is_an_error() {
        let dir = std::env::temp_dir().join(format!("hackermode-empty-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("notes.txt"), "nothing to see").unwrap();

        let result = load_sorted_image_paths(&dir);
        fs::remove_dir_all(&dir).unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn image_paths_are_sorted_by_name() {
        let dir = std::env::temp_dir().join(format!("hackermode-sorted-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        for name in ["c.png", "a.jpg", "b.gif", "skip.md"] {
            fs::write(dir.join(name), b"").unwrap();
        }

        let paths = load_sorted_image_paths(&dir).unwrap();
        fs::remove_dir_all(&dir).unwrap();
        let names: Vec<_> = paths.iter().map(|p| p.file_name().unwrap().to_str().unwrap().to_string()).collect();
        assert_eq!(names, ["a.jpg", "b.gif", "c.png"]);
    }
}
