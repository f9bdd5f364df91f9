//! Single-item barcode encoding: identifier in, PNG artifact on disk out.
//!
//! The [`Encoder`] trait is the seam the batch synchroniser depends on; see
//! [`crate::synchronise`]. The concrete [`Code128Encoder`] validates the
//! identifier, derives the Code 128 module pattern, rasterizes bars plus a
//! human-readable label into a grayscale buffer and persists it as
//! `<stem>.png`. Rendering is fully deterministic: same identifier and
//! config, byte-identical file.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use image::{GrayImage, Luma};
use thiserror::Error;
use tracing::{debug, info};

use crate::code128;
use crate::font;

/// Raster resolution for converting the millimetre config values to pixels.
const DPI: f64 = 300.0;

const INK: Luma<u8> = Luma([0u8]);
const PAPER: Luma<u8> = Luma([255u8]);

/// Visual parameters of the rendered barcode. All lengths are millimetres,
/// `font_size` is points; defaults match the catalog's established look.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Bar height.
    pub module_height: f64,
    /// Width of one module (the narrowest bar or space).
    pub module_width: f64,
    /// Label font size, points. Zero suppresses the label.
    pub font_size: u32,
    /// Gap between the bars and the label.
    pub text_distance: f64,
    /// Blank margin on each side of the bars.
    pub quiet_zone: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            module_height: 15.0,
            module_width: 0.2,
            font_size: 10,
            text_distance: 5.0,
            quiet_zone: 6.5,
        }
    }
}

#[derive(Debug, Error)]
pub enum EncodeError {
    /// The identifier is empty or holds characters Code 128 set B cannot
    /// represent. Raised before anything touches the filesystem.
    #[error("identifier {0:?} is empty or contains characters unsupported by Code 128")]
    InvalidIdentifier(String),
    /// Directory creation or image persistence failed.
    #[error("failed to write barcode image: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders one identifier to a persisted image artifact.
///
/// Implementors must be side-effect free beyond the target path: no network,
/// no shared mutable state.
#[cfg_attr(any(test, feature = "test-export-mocks"), mockall::automock)]
pub trait Encoder: Send + Sync {
    /// Encodes `identifier` and writes the artifact at
    /// [`artifact_path`]`(output_stem)`, overwriting any previous file there.
    fn encode(&self, identifier: &str, output_stem: &Path) -> Result<(), EncodeError>;
}

/// The path the artifact for `output_stem` lands at: the stem with `.png`
/// appended. Appending keeps identifiers containing dots intact, which
/// `Path::with_extension` would truncate.
pub fn artifact_path(output_stem: &Path) -> PathBuf {
    let mut raw: OsString = output_stem.as_os_str().to_owned();
    raw.push(".png");
    PathBuf::from(raw)
}

/// Code 128 (set B) encoder rendering PNG artifacts via the `image` crate.
#[derive(Debug, Clone, Default)]
pub struct Code128Encoder {
    config: RenderConfig,
}

impl Code128Encoder {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    fn render(&self, runs: &[u8], label: &str) -> GrayImage {
        let cfg = &self.config;
        // One module never collapses below a pixel, otherwise bars vanish.
        let module_px = mm_to_px(cfg.module_width).max(1);
        let quiet_px = mm_to_px(cfg.quiet_zone);
        let bar_height_px = mm_to_px(cfg.module_height).max(1);

        let total_modules: u32 = runs.iter().map(|&w| u32::from(w)).sum();
        let width = 2 * quiet_px + total_modules * module_px;

        let glyph_scale = pt_to_px(cfg.font_size).div_euclid(font::GLYPH_HEIGHT).max(1);
        let label_height = if cfg.font_size == 0 {
            0
        } else {
            mm_to_px(cfg.text_distance) + font::GLYPH_HEIGHT * glyph_scale
        };
        let height = bar_height_px + label_height;

        let mut img = GrayImage::from_pixel(width, height, PAPER);

        let mut x = quiet_px;
        let mut is_bar = true;
        for &run in runs {
            let run_px = u32::from(run) * module_px;
            if is_bar {
                for xi in x..x + run_px {
                    for y in 0..bar_height_px {
                        img.put_pixel(xi, y, INK);
                    }
                }
            }
            x += run_px;
            is_bar = !is_bar;
        }

        if cfg.font_size > 0 {
            let label_top = bar_height_px + mm_to_px(cfg.text_distance);
            draw_label(&mut img, label, label_top, glyph_scale);
        }
        img
    }
}

impl Encoder for Code128Encoder {
    fn encode(&self, identifier: &str, output_stem: &Path) -> Result<(), EncodeError> {
        let runs = code128::module_runs(identifier)
            .ok_or_else(|| EncodeError::InvalidIdentifier(identifier.to_string()))?;

        if let Some(parent) = output_stem.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let img = self.render(&runs, identifier);
        let path = artifact_path(output_stem);
        debug!(
            identifier,
            width = img.width(),
            height = img.height(),
            "Rendered barcode raster"
        );
        img.save(&path).map_err(flatten_image_error)?;
        info!(identifier, path = %path.display(), "Barcode image written");
        Ok(())
    }
}

/// Draws `label` horizontally centered, clipping glyphs that would leave the
/// canvas on pathologically narrow configs.
fn draw_label(img: &mut GrayImage, label: &str, top: u32, scale: u32) {
    let advance = (font::GLYPH_WIDTH + font::GLYPH_SPACING) * scale;
    let label_width = (label.len() as u32) * advance - font::GLYPH_SPACING * scale;
    let left = img.width().saturating_sub(label_width) / 2;

    for (index, ch) in label.chars().enumerate() {
        let Some(columns) = font::glyph(ch) else {
            continue;
        };
        let origin_x = left + index as u32 * advance;
        for (col, &bits) in columns.iter().enumerate() {
            for row in 0..font::GLYPH_HEIGHT {
                if bits >> row & 1 == 0 {
                    continue;
                }
                for dx in 0..scale {
                    for dy in 0..scale {
                        let x = origin_x + col as u32 * scale + dx;
                        let y = top + row * scale + dy;
                        if x < img.width() && y < img.height() {
                            img.put_pixel(x, y, INK);
                        }
                    }
                }
            }
        }
    }
}

fn mm_to_px(mm: f64) -> u32 {
    (mm * DPI / 25.4).round() as u32
}

fn pt_to_px(pt: u32) -> u32 {
    (f64::from(pt) * DPI / 72.0).round() as u32
}

fn flatten_image_error(err: image::ImageError) -> EncodeError {
    match err {
        image::ImageError::IoError(io) => EncodeError::Io(io),
        other => EncodeError::Io(std::io::Error::new(std::io::ErrorKind::Other, other)),
    }
}
