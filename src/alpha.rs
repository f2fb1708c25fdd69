//! Decoded alpha surfaces for image shapes
//!
//! `shape-outside: <image>` floats derive their exclusion area from the alpha
//! channel of the image, drawn at the float's content-box size in device
//! pixels. This module adopts that surface from whichever rasterizer produced
//! it: a raw 8-bit buffer, a `tiny_skia::Pixmap`, or a decoded
//! `image::RgbaImage`.

use crate::error::{Result, ShapeImageError};

/// A tightly packed 8-bit alpha surface, one byte per device pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaPixels {
  width: u32,
  height: u32,
  data: Vec<u8>,
}

impl AlphaPixels {
  /// Adopts a raw alpha buffer laid out row-major with `stride` bytes per
  /// row. Rows are repacked tightly; trailing stride padding is dropped.
  pub fn from_luma_buffer(data: &[u8], width: u32, height: u32, stride: usize) -> Result<Self> {
    let expected = stride
      .checked_mul(height as usize)
      .unwrap_or(usize::MAX)
      .saturating_sub(stride.saturating_sub(width as usize));
    if stride < width as usize || data.len() < expected {
      return Err(
        ShapeImageError::BufferSizeMismatch {
          width,
          height,
          expected,
          actual: data.len(),
        }
        .into(),
      );
    }

    let mut packed = Vec::with_capacity((width as usize) * (height as usize));
    for row in 0..height as usize {
      let start = row * stride;
      packed.extend_from_slice(&data[start..start + width as usize]);
    }
    Ok(Self {
      width,
      height,
      data: packed,
    })
  }

  /// Extracts the alpha channel of a rasterized pixmap.
  pub fn from_pixmap(pixmap: &tiny_skia::Pixmap) -> Self {
    let mut data = Vec::with_capacity((pixmap.width() * pixmap.height()) as usize);
    for chunk in pixmap.data().chunks_exact(4) {
      data.push(chunk[3]);
    }
    Self {
      width: pixmap.width(),
      height: pixmap.height(),
      data,
    }
  }

  /// Extracts the alpha channel of a decoded RGBA image.
  pub fn from_rgba_image(image: &image::RgbaImage) -> Self {
    let (width, height) = image.dimensions();
    let mut data = Vec::with_capacity((width * height) as usize);
    for chunk in image.as_raw().chunks_exact(4) {
      data.push(chunk[3]);
    }
    Self {
      width,
      height,
      data,
    }
  }

  pub fn width(&self) -> u32 {
    self.width
  }

  pub fn height(&self) -> u32 {
    self.height
  }

  /// The alpha value at a device-pixel position.
  pub fn alpha_at(&self, col: u32, row: u32) -> u8 {
    debug_assert!(col < self.width && row < self.height);
    self.data[(row * self.width + col) as usize]
  }
}
