//! In-memory drawing surface for previews and snapshots.

use std::path::Path;

use embedded_graphics::{
	pixelcolor::Rgb565,
	prelude::{Dimensions, DrawTarget, RgbColor},
	primitives::Rectangle,
};
use image::{ImageBuffer, ImageResult, Rgba};

pub struct FrameOutput {
	pub buffer: ImageBuffer<Rgba<u8>, Vec<u8>>,
}

fn expand(color: Rgb565) -> Rgba<u8> {
	Rgba([color.r() << 3, color.g() << 2, color.b() << 3, 0xff])
}

impl FrameOutput {
	pub fn new(width: u32, height: u32) -> Self {
		FrameOutput {
			buffer: ImageBuffer::new(width, height),
		}
	}

	/// Pixel in the `0RGB` layout softbuffer expects.
	pub fn xrgb(&self, x: u32, y: u32) -> u32 {
		let pixel = self.buffer.get_pixel(x, y);
		pixel.0[2] as u32 | ((pixel.0[1] as u32) << 8) | ((pixel.0[0] as u32) << 16)
	}

	/// Number of pixels drawn in `color`.
	pub fn count(&self, color: Rgb565) -> usize {
		let rgba = expand(color);
		self.buffer.pixels().filter(|&&p| p == rgba).count()
	}

	pub fn save_png(&self, path: impl AsRef<Path>) -> ImageResult<()> {
		self.buffer.save_with_format(path, image::ImageFormat::Png)
	}
}

impl DrawTarget for FrameOutput {
	type Color = Rgb565;

	type Error = ();

	fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
	where
		I: IntoIterator<Item = embedded_graphics::Pixel<Self::Color>>,
	{
		for pos in pixels {
			if pos.0.x < 0
				|| pos.0.y < 0
				|| pos.0.x as u32 >= self.buffer.width()
				|| pos.0.y as u32 >= self.buffer.height()
			{
				continue;
			}
			self.buffer.put_pixel(pos.0.x as u32, pos.0.y as u32, expand(pos.1));
		}
		Ok(())
	}

	fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
		let area = area.intersection(&self.bounding_box());
		let Some(bottom_right) = area.bottom_right() else {
			return Ok(());
		};
		let rgba = expand(color);
		for y in area.top_left.y..=bottom_right.y {
			for x in area.top_left.x..=bottom_right.x {
				self.buffer.put_pixel(x as u32, y as u32, rgba);
			}
		}
		Ok(())
	}
}

impl Dimensions for FrameOutput {
	fn bounding_box(&self) -> Rectangle {
		Rectangle::new((0, 0).into(), (self.buffer.width(), self.buffer.height()).into())
	}
}
