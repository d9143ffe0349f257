use embedded_graphics::prelude::Size;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::digits::DigitGroup;
use crate::shuffle::{COLUMNS, CellPool, MAX_ROWS};

/// Surface the default layout was made for.
pub const WATCH_WIDTH: u32 = 144;
pub const WATCH_HEIGHT: u32 = 168;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
	#[error("cells must be at least one pixel wide and high")]
	EmptyCell,
	#[error("{axis} spacing {spacing} is smaller than the cell ({cell})")]
	Overlap { axis: &'static str, spacing: u32, cell: u32 },
	#[error("{group:?} uses {rows} rows, allowed are 1 to 3")]
	Rows { group: DigitGroup, rows: usize },
	#[error("{group:?} has {rows} rows, too few to show {max_digit}")]
	TooFewRows { group: DigitGroup, rows: usize, max_digit: u8 },
	#[error("{group:?} does not fit on a {width}x{height} surface")]
	OffSurface { group: DigitGroup, width: u32, height: u32 },
}

/// Geometry of the four cell pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	pub cell_width: u32,
	pub cell_height: u32,
	/// Distance between the left edges of neighbouring cells.
	pub cell_spacing_x: u32,
	/// Distance between the top edges of neighbouring rows.
	pub cell_spacing_y: u32,
	pub left_margin: i32,
	pub group_top_offset: [i32; 4],
	pub group_rows: [usize; 4],
}

impl Default for LayoutConfig {
	fn default() -> Self {
		LayoutConfig {
			cell_width: 16,
			cell_height: 14,
			cell_spacing_x: 16 + 3,
			cell_spacing_y: 14 + 3,
			left_margin: 45,
			group_top_offset: [4, 24, 79, 116],
			group_rows: [1, 3, 2, 3],
		}
	}
}

impl LayoutConfig {
	pub fn cell_size(&self) -> Size {
		Size::new(self.cell_width, self.cell_height)
	}

	pub fn pool(&self, group: DigitGroup) -> CellPool {
		CellPool::grid(
			self.left_margin,
			self.group_top_offset[group.index()],
			self.group_rows[group.index()],
			self.cell_spacing_x as i32,
			self.cell_spacing_y as i32,
		)
	}

	/// Checks that every group can show its largest digit in either hour
	/// format and lies within a `width` x `height` surface.
	pub fn validate(&self, width: u32, height: u32) -> Result<(), LayoutError> {
		if self.cell_width == 0 || self.cell_height == 0 {
			return Err(LayoutError::EmptyCell);
		}
		if self.cell_spacing_x < self.cell_width {
			return Err(LayoutError::Overlap {
				axis: "horizontal",
				spacing: self.cell_spacing_x,
				cell: self.cell_width,
			});
		}
		if self.cell_spacing_y < self.cell_height {
			return Err(LayoutError::Overlap {
				axis: "vertical",
				spacing: self.cell_spacing_y,
				cell: self.cell_height,
			});
		}
		for group in DigitGroup::ALL {
			let rows = self.group_rows[group.index()];
			if !(1..=MAX_ROWS).contains(&rows) {
				return Err(LayoutError::Rows { group, rows });
			}
			let max_digit = group.max_digit(true);
			if rows * COLUMNS < max_digit as usize {
				return Err(LayoutError::TooFewRows { group, rows, max_digit });
			}
			let top = self.group_top_offset[group.index()] as i64;
			let left = self.left_margin as i64;
			let right = left + (COLUMNS as i64 - 1) * self.cell_spacing_x as i64 + self.cell_width as i64;
			let bottom = top + (rows as i64 - 1) * self.cell_spacing_y as i64 + self.cell_height as i64;
			if left < 0 || top < 0 || right > width as i64 || bottom > height as i64 {
				return Err(LayoutError::OffSurface { group, width, height });
			}
		}
		Ok(())
	}
}
