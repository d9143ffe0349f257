use std::cell::RefCell;

use embedded_graphics::{
	pixelcolor::Rgb565,
	prelude::DrawTarget,
	primitives::{PrimitiveStyleBuilder, StyledDrawable},
};
use tracing::{debug, trace};

use crate::clock::Clock;
use crate::digits::{DigitGroup, decompose};
use crate::layout::LayoutConfig;
use crate::shuffle::{CellShuffler, ShuffleStrategy};
use crate::{BLACK, Draw, Rng, WHITE};

static GRID_COLOR: Rgb565 = Rgb565::new(0b00_111, 0b001_111, 0b00_111);

/// Watch face showing each digit as a number of randomly placed dots.
pub struct NixFace<C: Clock> {
	layout: LayoutConfig,
	clock: C,
	strategy: ShuffleStrategy,
	redraw_every: u32,
	show_grid: bool,
	ticks: RefCell<u32>,
}

impl<C: Clock> NixFace<C> {
	pub fn new(layout: LayoutConfig, clock: C) -> Self {
		NixFace {
			layout,
			clock,
			strategy: ShuffleStrategy::default(),
			redraw_every: 1,
			show_grid: false,
			ticks: RefCell::new(0),
		}
	}

	pub fn strategy(mut self, strategy: ShuffleStrategy) -> Self {
		self.strategy = strategy;
		self
	}

	/// Only every `n`th tick redraws. 0 is treated as 1.
	pub fn redraw_every(mut self, n: u32) -> Self {
		self.redraw_every = n.max(1);
		self
	}

	/// Outline the empty cells.
	pub fn show_grid(mut self, show: bool) -> Self {
		self.show_grid = show;
		self
	}

	/// Clears `disp` and draws the current time, reshuffling every pool.
	/// Returns the number of filled cells per group.
	pub fn render<D: DrawTarget<Color = Rgb565>>(&self, disp: &mut D, rng: &mut Rng) -> Result<[usize; 4], D::Error> {
		let (hour, minute) = self.clock.now();
		let digits = decompose(hour, minute, self.clock.is_24h());
		debug!(hour, minute, ?digits, "redraw");

		disp.clear(BLACK)?;
		let size = self.layout.cell_size();
		if self.show_grid {
			let outline = PrimitiveStyleBuilder::new()
				.stroke_color(GRID_COLOR)
				.stroke_width(1)
				.build();
			for group in DigitGroup::ALL {
				for cell in self.layout.pool(group).as_slice() {
					cell.rect(size).draw_styled(&outline, disp)?;
				}
			}
		}

		let mut filled = [0; 4];
		for group in DigitGroup::ALL {
			let digit = digits[group.index()] as usize;
			let mut pool = self.layout.pool(group);
			trace!(?group, digit, pool = pool.len(), "filling cells");
			let count = &mut filled[group.index()];
			CellShuffler::new(&mut *rng, self.strategy).select_and_draw(pool.as_mut_slice(), digit, |cell| {
				*count += 1;
				disp.fill_solid(&cell.rect(size), WHITE)
			})?;
		}
		Ok(filled)
	}
}

impl<C: Clock, D: DrawTarget<Color = Rgb565>> Draw<D> for NixFace<C> {
	fn draw(&self, disp: &mut D, rng: &mut Rng) -> Result<bool, D::Error> {
		let tick = {
			let mut ticks = self.ticks.borrow_mut();
			let tick = *ticks;
			*ticks = ticks.wrapping_add(1);
			tick
		};
		if tick % self.redraw_every != 0 {
			return Ok(false);
		}
		self.render(disp, rng)?;
		Ok(true)
	}
}
