use embedded_graphics::{pixelcolor::Rgb565, prelude::DrawTarget};
use nix_lib::{Draw, Rng};
use tracing::warn;

/// Owns the face and the one generator that survives between redraws.
pub struct ContextDefault<D: DrawTarget<Color = Rgb565>> {
	active: Box<dyn Draw<D>>,
	rng: Rng,
}

impl<D: DrawTarget<Color = Rgb565>> ContextDefault<D> {
	pub fn new(active: Box<dyn Draw<D>>, rng: Rng) -> Self {
		ContextDefault { active, rng }
	}

	/// Runs one tick. Returns whether the display needs to be flushed.
	pub fn loop_iter(&mut self, disp: &mut D) -> bool {
		match self.active.draw(disp, &mut self.rng) {
			Ok(dirty) => dirty,
			Err(_) => {
				warn!("redraw failed");
				true
			},
		}
	}

	pub fn rng(&self) -> &Rng {
		&self.rng
	}
}
