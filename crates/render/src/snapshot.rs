//! PNG export of software-rendered frames.

use std::path::{Path, PathBuf};

use chrono::Local;
use image::RgbaImage;
use sdf::Frame;

use crate::error::RenderError;

/// Write `frame` to `path` as an 8-bit RGBA PNG.
///
/// # Errors
///
/// [`RenderError::Snapshot`] if the frame is malformed or the file cannot
/// be written.
pub fn save(frame: &Frame, path: &Path) -> Result<(), RenderError> {
    let image = RgbaImage::from_raw(frame.width, frame.height, frame.to_rgba8()).ok_or_else(
        || {
            RenderError::Snapshot(format!(
                "{} pixels do not fill {}x{}",
                frame.pixels.len(),
                frame.width,
                frame.height
            ))
        },
    )?;
    image
        .save(path)
        .map_err(|e| RenderError::Snapshot(format!("{}: {e}", path.display())))?;
    tracing::info!(
        path = %path.display(),
        width = frame.width,
        height = frame.height,
        "snapshot saved"
    );
    Ok(())
}

/// Timestamped file name inside `dir`, e.g. `lava-20240131-235959.png`.
#[must_use]
pub fn default_path(dir: &Path) -> PathBuf {
    dir.join(format!("lava-{}.png", Local::now().format("%Y%m%d-%H%M%S")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdf::Resolution;

    #[test]
    fn saved_png_round_trips_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let frame = sdf::render(0.0, &Resolution::new(16, 9));

        save(&frame, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (16, 9));
        assert_eq!(decoded.into_raw(), frame.to_rgba8());
    }

    #[test]
    fn malformed_frame_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let frame = Frame {
            width: 4,
            height: 4,
            pixels: vec![sdf::BACKGROUND.extend(1.0); 3],
        };
        let err = save(&frame, &dir.path().join("bad.png")).unwrap_err();
        assert!(matches!(err, RenderError::Snapshot(_)));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let frame = sdf::render(0.0, &Resolution::new(2, 2));
        let path = dir.path().join("nope").join("frame.png");
        assert!(save(&frame, &path).is_err());
    }

    #[test]
    fn default_path_is_timestamped_png() {
        let path = default_path(Path::new("/tmp"));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("lava-") && name.ends_with(".png"), "{name}");
        assert_eq!(name.len(), "lava-20240131-235959.png".len());
    }
}
