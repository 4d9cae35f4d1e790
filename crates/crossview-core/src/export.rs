//! Writing the composite to disk.
//!
//! The output format follows the file extension, with `.png` appended when
//! the user gave none. Bytes are fully encoded in memory first, then written
//! to a hidden sibling file and renamed over the destination, so a failed
//! save never leaves a truncated image at the chosen path.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::composite::CompositeImage;
use crate::encode::{encode_composite, EncodeError, ExportFormat};

/// Extension appended to paths that have none.
pub const DEFAULT_EXTENSION: &str = "png";

/// Errors that can occur while saving.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The extension does not name a format we can write.
    #[error("Unsupported file type \".{0}\" (use png, jpg, bmp or tiff)")]
    UnsupportedFormat(String),

    /// Encoding failed before anything touched the disk.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Append the default extension when `path` has none.
pub fn resolve_output_path(path: &Path) -> PathBuf {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.is_empty() => path.to_path_buf(),
        _ => path.with_extension(DEFAULT_EXTENSION),
    }
}

/// Pick the export format from a path's extension.
pub fn format_for_path(path: &Path) -> Result<ExportFormat, ExportError> {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default();
    ExportFormat::from_extension(&ext).ok_or(ExportError::UnsupportedFormat(ext))
}

/// Encode and write the composite, returning the path actually written.
///
/// # Errors
///
/// Returns `ExportError::UnsupportedFormat` for unknown extensions,
/// `ExportError::Encode` if encoding fails and `ExportError::Io` if the
/// file cannot be written. In every error case the destination is left as it
/// was.
pub fn save_composite(composite: &CompositeImage, path: &Path) -> Result<PathBuf, ExportError> {
    let path = resolve_output_path(path);
    let format = format_for_path(&path)?;
    let bytes = encode_composite(composite, format)?;

    write_atomically(&path, &bytes).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;

    info!(
        path = %path.display(),
        format = format.extension(),
        bytes = bytes.len(),
        "composite saved"
    );
    Ok(path)
}

/// Sibling path used while writing.
fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "composite".to_string());
    path.with_file_name(format!(".{name}.partial"))
}

fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let partial = partial_path(path);

    let result = File::create(&partial)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&partial, path));

    if result.is_err() && partial.exists() {
        if let Err(e) = fs::remove_file(&partial) {
            warn!(path = %partial.display(), error = %e, "could not remove partial file");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composite::composite_side_by_side;
    use crate::decode::DecodedImage;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "crossview_export_{}_{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn composite() -> CompositeImage {
        let side = DecodedImage::new(4, 3, [90u8, 60, 30].repeat(12));
        composite_side_by_side(&side, &side, 1).unwrap()
    }

    #[test]
    fn test_resolve_output_path_appends_png() {
        assert_eq!(resolve_output_path(Path::new("out")), PathBuf::from("out.png"));
        assert_eq!(resolve_output_path(Path::new("dir/out.jpg")), PathBuf::from("dir/out.jpg"));
    }

    #[test]
    fn test_format_for_path() {
        assert_eq!(format_for_path(Path::new("a.JPEG")).unwrap(), ExportFormat::Jpeg);
        assert!(matches!(
            format_for_path(Path::new("a.gif")),
            Err(ExportError::UnsupportedFormat(ext)) if ext == "gif"
        ));
    }

    #[test]
    fn test_save_png_without_extension() {
        let dir = scratch_dir("png");
        let written = save_composite(&composite(), &dir.join("pair")).unwrap();

        assert_eq!(written, dir.join("pair.png"));
        let decoded = image::open(&written).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (9, 3));
        assert!(!partial_path(&written).exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_each_format() {
        let dir = scratch_dir("formats");
        for name in ["pair.jpg", "pair.bmp", "pair.tif"] {
            let written = save_composite(&composite(), &dir.join(name)).unwrap();
            let decoded = image::open(&written).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (9, 3), "{}", name);
        }
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_unsupported_extension_writes_nothing() {
        let dir = scratch_dir("unsupported");
        let target = dir.join("pair.gif");

        let result = save_composite(&composite(), &target);
        assert!(matches!(result, Err(ExportError::UnsupportedFormat(_))));
        assert!(!target.exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = scratch_dir("missing");
        let target = dir.join("no_such_subdir").join("pair.png");

        let result = save_composite(&composite(), &target);
        assert!(matches!(result, Err(ExportError::Io { .. })));
        assert!(!target.exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_overwrite_replaces_existing_file() {
        let dir = scratch_dir("overwrite");
        let target = dir.join("pair.png");
        fs::write(&target, b"old contents").unwrap();

        save_composite(&composite(), &target).unwrap();
        assert!(image::open(&target).is_ok());

        fs::remove_dir_all(&dir).unwrap();
    }
}
