//! Conversions between render targets and the `image` crate

use image::{Rgba, RgbaImage};

use crate::color::{to_rgba8, Color};
use crate::error::RenderResult;
use crate::framebuffer::{Image, RenderBuffer};
use crate::geometry::Coordinate;
use crate::texture::Texture;

/// Copies the color of any image into an 8-bit RGBA image.
///
/// Rows are flipped, since render targets start at the bottom row and `image` buffers at the top one.
pub fn copy_to_image<I>(source: &I) -> RgbaImage where I: Image + ?Sized {
    let height = source.height();

    RgbaImage::from_fn(source.width(), height, |x, y| {
        Rgba(to_rgba8(source.pixel_color(Coordinate::new(x, height - 1 - y))))
    })
}

pub trait ImageRenderBuffer {
    fn copy_to_image(&self) -> RgbaImage;
}

impl ImageRenderBuffer for RenderBuffer {
    fn copy_to_image(&self) -> RgbaImage {
        copy_to_image(self)
    }
}

/// Creates a texture from an 8-bit RGBA image, flipping it so the bottom row becomes `v = 0`.
pub fn texture_from_image(source: &RgbaImage) -> RenderResult<Texture> {
    let (width, height) = source.dimensions();

    let mut texels = Vec::with_capacity(width as usize * height as usize);

    for y in (0..height).rev() {
        for x in 0..width {
            let Rgba([r, g, b, a]) = *source.get_pixel(x, y);

            texels.push(Color::new(r as f32, g as f32, b as f32, a as f32) / 255.0);
        }
    }

    Texture::new(width, height, texels)
}
