use embedded_graphics::{
	prelude::{Point, Size},
	primitives::Rectangle,
};
use serde::{Deserialize, Serialize};

use crate::bit_source::{BitSource, SAMPLE_RANGE};

/// Cells per row.
pub const COLUMNS: usize = 3;
/// Rows a single digit group may use.
pub const MAX_ROWS: usize = 3;
pub const MAX_POOL: usize = COLUMNS * MAX_ROWS;

/// Top-left corner of one dot. The size is shared by all cells.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
	pub x: i32,
	pub y: i32,
}

impl Cell {
	pub const fn new(x: i32, y: i32) -> Self {
		Cell { x, y }
	}

	pub fn rect(self, size: Size) -> Rectangle {
		Rectangle::new(Point::new(self.x, self.y), size)
	}
}

/// Fixed-capacity list of the cells of one digit group, row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellPool {
	cells: [Cell; MAX_POOL],
	len: usize,
}

impl CellPool {
	/// Lays out `rows` rows of [`COLUMNS`] cells starting at `(left, top)`.
	pub fn grid(left: i32, top: i32, rows: usize, spacing_x: i32, spacing_y: i32) -> Self {
		debug_assert!(rows <= MAX_ROWS, "{rows} rows do not fit into a pool");
		let rows = rows.min(MAX_ROWS);
		let mut cells = [Cell::default(); MAX_POOL];
		for row in 0..rows {
			for column in 0..COLUMNS {
				cells[row * COLUMNS + column] =
					Cell::new(left + column as i32 * spacing_x, top + row as i32 * spacing_y);
			}
		}
		CellPool {
			cells,
			len: rows * COLUMNS,
		}
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn as_slice(&self) -> &[Cell] {
		&self.cells[..self.len]
	}

	pub fn as_mut_slice(&mut self) -> &mut [Cell] {
		&mut self.cells[..self.len]
	}
}

/// How the pool is put into random order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShuffleStrategy {
	/// Durstenfeld's Fisher-Yates shuffle, every permutation equally likely.
	#[default]
	FisherYates,
	/// Bubble passes with a coin flip instead of a comparison.
	/// Cheaper on bits but not uniform.
	BubblePass,
}

impl std::str::FromStr for ShuffleStrategy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"fisher-yates" => Ok(ShuffleStrategy::FisherYates),
			"bubble-pass" => Ok(ShuffleStrategy::BubblePass),
			_ => Err(format!("unknown shuffle strategy {s:?}")),
		}
	}
}

/// Picks the cells to fill for one digit, drawing from a borrowed generator.
pub struct CellShuffler<'a, R: BitSource> {
	bits: &'a mut R,
	strategy: ShuffleStrategy,
}

impl<'a, R: BitSource> CellShuffler<'a, R> {
	pub fn new(bits: &'a mut R, strategy: ShuffleStrategy) -> Self {
		CellShuffler { bits, strategy }
	}

	pub fn shuffle<T>(&mut self, items: &mut [T]) {
		match self.strategy {
			ShuffleStrategy::FisherYates => self.fisher_yates(items),
			ShuffleStrategy::BubblePass => self.bubble_pass(items),
		}
	}

	fn fisher_yates<T>(&mut self, items: &mut [T]) {
		debug_assert!(items.len() <= SAMPLE_RANGE as usize);
		for i in (2..=items.len()).rev() {
			let j = self.bits.next_int(i as u16) as usize;
			// j may equal i - 1
			items.swap(i - 1, j);
		}
	}

	fn bubble_pass<T>(&mut self, items: &mut [T]) {
		let mut end = items.len();
		while end > 1 {
			let mut last_swap = 0;
			for i in 1..end {
				if self.bits.next_bit() == 1 {
					items.swap(i - 1, i);
					last_swap = i;
				}
			}
			end = last_swap;
		}
	}

	/// Shuffles the whole pool and returns its first `digit` entries.
	pub fn select<'p, T>(&mut self, items: &'p mut [T], digit: usize) -> &'p [T] {
		debug_assert!(
			digit <= items.len(),
			"digit {digit} does not fit into a pool of {}",
			items.len()
		);
		self.shuffle(items);
		let digit = digit.min(items.len());
		&items[..digit]
	}

	/// Shuffles the pool and calls `draw_fn` once for each of the first `digit`
	/// entries, in shuffled order. Stops at the first error.
	pub fn select_and_draw<T, E, F>(&mut self, items: &mut [T], digit: usize, mut draw_fn: F) -> Result<(), E>
	where
		T: Copy,
		F: FnMut(T) -> Result<(), E>,
	{
		for &item in self.select(items, digit) {
			draw_fn(item)?;
		}
		Ok(())
	}
}
