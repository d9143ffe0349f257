pub use embedded_graphics::{pixelcolor::Rgb565, prelude::DrawTarget};

pub const BLACK: Rgb565 = Rgb565::new(0, 0, 0);
pub const WHITE: Rgb565 = Rgb565::new(0xff, 0xff, 0xff);

pub use embedded_graphics::prelude::{Point, Size};
pub use embedded_graphics::primitives::Rectangle;

pub mod bit_source;
pub use bit_source::{BitSource, DEFAULT_SEED, Lfsr, new_rng};

pub type Rng = Lfsr;

pub mod clock;
pub use clock::{Clock, FixedClock, SystemClock};

mod context;
pub use context::Draw;

pub mod digits;
pub use digits::{DigitGroup, decompose, display_hour};

mod face;
pub use face::NixFace;

pub mod layout;
pub use layout::{LayoutConfig, LayoutError, WATCH_HEIGHT, WATCH_WIDTH};

pub mod shuffle;
pub use shuffle::{Cell, CellPool, CellShuffler, ShuffleStrategy};
