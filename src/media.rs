//! Image probing and sizing
//!
//! Pixel dimensions come from the `image` crate. Resolution is read straight
//! from the JFIF APP0 segment or the PNG `pHYs` chunk; anything else is
//! taken to be 96 DPI.

use crate::error::{Error, Result};
use crate::opc::image_content_type;
use image::{ImageFormat, ImageReader};
use std::io::Cursor;

/// EMUs per inch
pub const EMU_PER_INCH: u64 = 914_400;
/// EMUs per centimetre
pub const EMU_PER_CM: u64 = 360_000;
/// Resolution assumed when the file does not declare one
pub const DEFAULT_DPI: f64 = 96.0;
/// Widest picture that fits an A4 page (21 cm)
pub const MAX_WIDTH_EMU: u64 = 21 * EMU_PER_CM;

/// Dimensions, resolution and format of an image file
#[derive(Clone, Debug, PartialEq)]
pub struct ImageInfo {
    pub width_px: u32,
    pub height_px: u32,
    pub dpi_x: f64,
    pub dpi_y: f64,
    /// Extension used for the media part name
    pub extension: &'static str,
    pub content_type: &'static str,
}

impl ImageInfo {
    /// Read dimensions and resolution from encoded image bytes
    pub fn probe(bytes: &[u8]) -> Result<Self> {
        let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
        let format = reader.format();
        let extension = match format {
            Some(ImageFormat::Png) => "png",
            Some(ImageFormat::Jpeg) => "jpeg",
            Some(ImageFormat::Gif) => "gif",
            Some(ImageFormat::Bmp) => "bmp",
            other => {
                return Err(Error::InvalidDocument(format!(
                    "unsupported image format: {:?}",
                    other
                )))
            }
        };
        let content_type = image_content_type(extension)
            .ok_or_else(|| Error::InvalidDocument(format!("no content type for .{}", extension)))?;
        let (width_px, height_px) = reader.into_dimensions()?;

        let (dpi_x, dpi_y) = match format {
            Some(ImageFormat::Png) => png_dpi(bytes),
            Some(ImageFormat::Jpeg) => jfif_dpi(bytes),
            _ => None,
        }
        .unwrap_or((DEFAULT_DPI, DEFAULT_DPI));

        Ok(ImageInfo {
            width_px,
            height_px,
            dpi_x,
            dpi_y,
            extension,
            content_type,
        })
    }

    /// Size in EMU at `scale`, shrunk to `max_width` keeping the aspect ratio
    pub fn extent_emu(&self, scale: f64, max_width: u64) -> (u64, u64) {
        let mut width = self.width_px as f64 / self.dpi_x * EMU_PER_INCH as f64 * scale;
        let mut height = self.height_px as f64 / self.dpi_y * EMU_PER_INCH as f64 * scale;

        let max_width = max_width as f64;
        if width > max_width {
            height *= max_width / width;
            width = max_width;
        }

        (width.round() as u64, height.round() as u64)
    }
}

/// Density from the JFIF APP0 segment
fn jfif_dpi(bytes: &[u8]) -> Option<(f64, f64)> {
    // SOI, APP0 marker, length, "JFIF\0", version
    if bytes.len() < 18 || bytes[0..4] != [0xFF, 0xD8, 0xFF, 0xE0] || &bytes[6..11] != b"JFIF\0" {
        return None;
    }
    let units = bytes[13];
    let x = u16::from_be_bytes([bytes[14], bytes[15]]) as f64;
    let y = u16::from_be_bytes([bytes[16], bytes[17]]) as f64;
    let factor = match units {
        1 => 1.0,
        2 => 2.54,
        _ => return None,
    };
    valid_density(x * factor, y * factor)
}

/// Density from the PNG `pHYs` chunk
fn png_dpi(bytes: &[u8]) -> Option<(f64, f64)> {
    let mut pos = 8;
    while pos + 8 <= bytes.len() {
        let len = u32::from_be_bytes(bytes[pos..pos + 4].try_into().ok()?) as usize;
        let kind = &bytes[pos + 4..pos + 8];
        let data = bytes.get(pos + 8..pos + 8 + len)?;

        match kind {
            b"pHYs" if len >= 9 => {
                // unit 1 is pixels per metre; 0 only gives the aspect ratio
                if data[8] != 1 {
                    return None;
                }
                let x = u32::from_be_bytes(data[0..4].try_into().ok()?) as f64;
                let y = u32::from_be_bytes(data[4..8].try_into().ok()?) as f64;
                return valid_density(x * 0.0254, y * 0.0254);
            }
            b"IDAT" | b"IEND" => return None,
            _ => {}
        }
        pos += 12 + len;
    }
    None
}

fn valid_density(x: f64, y: f64) -> Option<(f64, f64)> {
    (x > 0.0 && y > 0.0).then_some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::new(width, height);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    /// Insert a pHYs chunk right after IHDR
    fn with_phys(mut png: Vec<u8>, ppm: u32) -> Vec<u8> {
        let mut chunk = Vec::new();
        chunk.extend_from_slice(&9u32.to_be_bytes());
        chunk.extend_from_slice(b"pHYs");
        chunk.extend_from_slice(&ppm.to_be_bytes());
        chunk.extend_from_slice(&ppm.to_be_bytes());
        chunk.push(1);
        chunk.extend_from_slice(&[0, 0, 0, 0]);
        // signature (8) + IHDR (4 + 4 + 13 + 4)
        let at = 8 + 25;
        png.splice(at..at, chunk);
        png
    }

    #[test]
    fn test_probe_png_defaults_to_96_dpi() {
        let info = ImageInfo::probe(&png(96, 48)).unwrap();
        assert_eq!((info.width_px, info.height_px), (96, 48));
        assert_eq!(info.dpi_x, DEFAULT_DPI);
        assert_eq!(info.extension, "png");
        assert_eq!(info.content_type, "image/png");
        assert_eq!(info.extent_emu(1.0, MAX_WIDTH_EMU), (914_400, 457_200));
    }

    #[test]
    fn test_png_phys_resolution() {
        // 7874 pixels per metre is 200 DPI (199.99...)
        let bytes = with_phys(png(10, 10), 7874);
        let (x, y) = png_dpi(&bytes).unwrap();
        assert!((x - 200.0).abs() < 0.01);
        assert!((y - 200.0).abs() < 0.01);
    }

    #[test]
    fn test_jfif_density() {
        let mut header = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        header.extend_from_slice(b"JFIF\0");
        header.extend_from_slice(&[1, 1, 1, 0x01, 0x2C, 0x00, 0x48]);
        assert_eq!(jfif_dpi(&header), Some((300.0, 72.0)));

        header[13] = 0;
        assert_eq!(jfif_dpi(&header), None);
    }

    #[test]
    fn test_scale_and_clamp() {
        let info = ImageInfo {
            width_px: 960,
            height_px: 480,
            dpi_x: 96.0,
            dpi_y: 96.0,
            extension: "png",
            content_type: "image/png",
        };
        // 10 in x 5 in, halved
        assert_eq!(info.extent_emu(0.5, MAX_WIDTH_EMU), (4_572_000, 2_286_000));
        // full size is wider than 21 cm: width clamped, height follows
        assert_eq!(info.extent_emu(1.0, MAX_WIDTH_EMU), (7_560_000, 3_780_000));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(ImageInfo::probe(b"not an image").is_err());
    }
}
