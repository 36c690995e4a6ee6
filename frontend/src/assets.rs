//! Image import: PNG to palette-indexed surface.
//!
//! Decoded RGB(A) pixels are nearest-matched against the target palette;
//! fully transparent pixels map to index 0, the conventional transparent
//! index. This is the on-disk palette/atlas contract of the engine — the
//! PNG container is a host choice, the matching is not.

use std::path::Path;

use log::debug;
use png::ColorType;
use shadowmask_core::gfx::{Palette, Surface};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG decode error: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("unsupported PNG colour type {0:?}")]
    UnsupportedColorType(ColorType),

    #[error("unsupported PNG bit depth {0:?}")]
    UnsupportedBitDepth(png::BitDepth),

    #[error("degenerate image")]
    Degenerate,
}

/// Load a PNG and quantise it onto `palette`.
pub fn load_indexed(path: &Path, palette: &Palette) -> Result<Surface, AssetError> {
    let decoder = png::Decoder::new(std::fs::File::open(path)?);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let bytes = &buf[..info.buffer_size()];

    if info.bit_depth != png::BitDepth::Eight {
        return Err(AssetError::UnsupportedBitDepth(info.bit_depth));
    }
    let bpp = match info.color_type {
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        other => return Err(AssetError::UnsupportedColorType(other)),
    };

    let width = info.width as usize;
    let height = info.height as usize;

    let surface = Surface::decode(width, height, bytes, |surface, pixels: &[u8]| {
        let data = surface.data_mut();
        for (index, pixel) in pixels.chunks_exact(bpp).enumerate() {
            let alpha = if bpp == 4 { pixel[3] } else { 255 };
            data[index] = if alpha == 0 {
                0 // Zero alpha stays the transparent index.
            } else {
                palette.find_nearest(shadowmask_core::gfx::Color::rgb(
                    pixel[0], pixel[1], pixel[2],
                ))
            };
        }
    })
    .ok_or(AssetError::Degenerate)?;

    debug!("atlas loaded from {} ({width}x{height})", path.display());
    Ok(surface)
}
