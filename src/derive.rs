use std::{
    fs::{self, File},
    io::{self, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use image::{
    DynamicImage, GenericImageView, ImageError, ImageReader,
    codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder},
    imageops::FilterType,
};
use log::{debug, info};

use crate::DeriveError;

/// Progress reported by [`derive_icons_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconStatus {
    /// The source decoded successfully.
    Loaded { width: u32, height: u32 },
    /// The size matches the source's own edge length, so the source file stands in for it.
    Source { size: u32, path: PathBuf },
    Created { size: u32, path: PathBuf },
}

pub fn icon_file_name(size: u32) -> String {
    format!("icon-{size}.png")
}

/// Opens and decodes the source icon, checking that it is square.
///
/// The format is sniffed from the file contents, so the extension does not
/// have to match.
pub fn load_source(path: impl AsRef<Path>) -> Result<DynamicImage, DeriveError> {
    let path = path.as_ref();
    match path.try_exists() {
        Ok(true) => {}
        Ok(false) => {
            return Err(DeriveError::SourceNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(DeriveError::DecodeFailure {
                path: path.to_path_buf(),
                source: ImageError::IoError(e),
            });
        }
    }
    let image = decode_file(path).map_err(|source| DeriveError::DecodeFailure {
        path: path.to_path_buf(),
        source,
    })?;
    let (width, height) = image.dimensions();
    if width != height {
        return Err(DeriveError::NotSquare {
            path: path.to_path_buf(),
            width,
            height,
        });
    }
    Ok(image)
}

fn decode_file(path: &Path) -> Result<DynamicImage, ImageError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    reader.decode()
}

/// Resamples `source` to exactly `size`×`size` with Lanczos3.
pub fn resize_icon(source: &DynamicImage, size: u32) -> DynamicImage {
    source.resize_exact(size, size, FilterType::Lanczos3)
}

/// Writes `image` as a PNG, replacing whatever is at `path`.
///
/// Uses the slowest compression level with adaptive row filters. The output
/// bytes depend only on the pixels, so re-running produces identical files.
/// The whole image is encoded before `path` is touched, so an encode error
/// leaves an existing file intact.
pub fn save_png(image: &DynamicImage, path: impl AsRef<Path>) -> Result<(), ImageError> {
    let mut data = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut data, CompressionType::Best, PngFilter::Adaptive);
    image.write_with_encoder(encoder)?;
    save_data(path, &data)?;
    Ok(())
}

fn save_data(path: impl AsRef<Path>, data: &[u8]) -> io::Result<()> {
    let file = File::options()
        .read(false)
        .write(true)
        .append(false)
        .create(true)
        .truncate(true)
        .open(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(data)?;
    writer.flush()
}

/// Whether `path` names the same file as `source_path`, directly or through
/// a different spelling of the same location.
fn is_same_file(path: &Path, source_path: &Path) -> bool {
    if path == source_path {
        return true;
    }
    match (fs::canonicalize(path), fs::canonicalize(source_path)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Convenience function that calls `derive_icons_with` and ignores progress.
pub fn derive_icons(
    source_path: impl AsRef<Path>,
    target_sizes: &[u32],
    output_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, DeriveError> {
    derive_icons_with(source_path, target_sizes, output_dir, |_| {})
}

/// Derives one `icon-{size}.png` per target size from a square source icon.
///
/// Sizes are processed in order. The size equal to the source's edge length
/// is skipped. Returns the paths that were written.
///
/// Nothing is written unless the sizes are valid, the source decodes, its
/// edge length equals the largest target size, and no output path lands on
/// the source file. A failed write stops the run: icons written before it stay on disk and
/// the remaining sizes are not attempted.
pub fn derive_icons_with(
    source_path: impl AsRef<Path>,
    target_sizes: &[u32],
    output_dir: impl AsRef<Path>,
    mut on_status: impl FnMut(&IconStatus),
) -> Result<Vec<PathBuf>, DeriveError> {
    let source_path = source_path.as_ref();
    let output_dir = output_dir.as_ref();

    if target_sizes.is_empty() || target_sizes.contains(&0) {
        return Err(DeriveError::InvalidTargetSizes {
            sizes: target_sizes.to_vec(),
        });
    }

    let source_image = load_source(source_path)?;
    let (width, height) = source_image.dimensions();
    debug!("loaded {} ({width}x{height})", source_path.display());
    let expected = target_sizes.iter().copied().max().unwrap_or(width);
    if width != expected {
        return Err(DeriveError::SizeMismatch {
            path: source_path.to_path_buf(),
            expected,
            actual: width,
        });
    }
    for &size in target_sizes.iter().filter(|&&size| size != width) {
        if is_same_file(&output_dir.join(icon_file_name(size)), source_path) {
            return Err(DeriveError::OverwritesSource {
                size,
                path: source_path.to_path_buf(),
            });
        }
    }
    on_status(&IconStatus::Loaded { width, height });

    let mut written = Vec::with_capacity(target_sizes.len());
    for &size in target_sizes {
        if size == width {
            debug!("icon-{size}.png is the source, skipping");
            on_status(&IconStatus::Source {
                size,
                path: source_path.to_path_buf(),
            });
            continue;
        }
        let path = output_dir.join(icon_file_name(size));
        let icon = resize_icon(&source_image, size);
        save_png(&icon, &path).map_err(|source| DeriveError::WriteFailure {
            size,
            path: path.clone(),
            source,
        })?;
        info!("created {}", path.display());
        on_status(&IconStatus::Created {
            size,
            path: path.clone(),
        });
        written.push(path);
    }
    Ok(written)
}
