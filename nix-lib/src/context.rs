use embedded_graphics::{pixelcolor::Rgb565, prelude::DrawTarget};

use crate::Rng;

pub trait Draw<D: DrawTarget<Color = Rgb565>> {
	/// Returns whether anything on `disp` changed.
	fn draw(&self, disp: &mut D, rng: &mut Rng) -> Result<bool, D::Error>;
}
