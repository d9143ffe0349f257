//! Cheap pseudorandom bits for shuffling the dots.
//!
//! The generator is a 16-bit Galois LFSR (taps 16, 14, 13, 11; polynomial
//! `x^16 + x^14 + x^13 + x^11 + 1`) with period 65535 over the non-zero states.
//! It is not meant to be unpredictable to an adversary, only to make the
//! same digit look different on every redraw.

use rand_xoshiro::rand_core::{self, RngCore, SeedableRng};

/// Seed used at startup unless configured otherwise.
pub const DEFAULT_SEED: u16 = 0xACE1;

/// Feedback mask of the Galois form register.
pub const FEEDBACK_MASK: u16 = 0xB400;

/// Width of a single draw in [`BitSource::next_int`].
pub const SAMPLE_BITS: u32 = 8;
/// Number of distinct values one draw can take.
pub const SAMPLE_RANGE: u16 = 1 << SAMPLE_BITS;

/// Source of uniformly distributed random bits.
///
/// Only [`next_bit`](BitSource::next_bit) has to be implemented, the wider
/// draws are derived from it and consume bits in a fixed order.
pub trait BitSource {
	/// Returns 0 or 1.
	fn next_bit(&mut self) -> u16;

	/// Uniform value in `[0, 2^n)`, accumulated most significant bit first.
	fn next_bits(&mut self, n: u32) -> u16 {
		debug_assert!(n <= 16, "cannot draw {n} bits into a u16");
		let mut value = 0u16;
		for _ in 0..n {
			value = (value << 1) | self.next_bit();
		}
		value
	}

	/// Uniform value in `[0, max)` without modulo bias.
	///
	/// Draws of [`SAMPLE_BITS`] bits below `SAMPLE_RANGE % max` are rejected,
	/// which leaves every result with the same number of representations.
	/// Powers of two skip the rejection loop.
	///
	/// `max` has to be in `1..=SAMPLE_RANGE`. Release builds answer 0 for
	/// anything else.
	fn next_int(&mut self, max: u16) -> u16 {
		debug_assert!(
			(1..=SAMPLE_RANGE).contains(&max),
			"next_int bound {max} outside 1..={SAMPLE_RANGE}"
		);
		if max == 0 || max > SAMPLE_RANGE {
			return 0;
		}
		if max.is_power_of_two() {
			return self.next_bits(max.trailing_zeros());
		}
		let low = SAMPLE_RANGE % max;
		loop {
			let value = self.next_bits(SAMPLE_BITS);
			if value >= low {
				return value % max;
			}
		}
	}
}

/// 16-bit Galois linear-feedback shift register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lfsr {
	state: u16,
}

impl Lfsr {
	/// A zero seed would lock the register at zero, it is replaced by [`DEFAULT_SEED`].
	pub fn new(seed: u16) -> Self {
		let state = if seed == 0 { DEFAULT_SEED } else { seed };
		Lfsr { state }
	}

	pub fn state(&self) -> u16 {
		self.state
	}
}

impl Default for Lfsr {
	fn default() -> Self {
		Lfsr::new(DEFAULT_SEED)
	}
}

impl BitSource for Lfsr {
	fn next_bit(&mut self) -> u16 {
		let out = self.state & 1;
		self.state = (self.state >> 1) ^ (out.wrapping_neg() & FEEDBACK_MASK);
		out
	}
}

impl RngCore for Lfsr {
	fn next_u32(&mut self) -> u32 {
		let high = self.next_bits(16) as u32;
		let low = self.next_bits(16) as u32;
		high << 16 | low
	}

	fn next_u64(&mut self) -> u64 {
		rand_core::impls::next_u64_via_u32(self)
	}

	fn fill_bytes(&mut self, dest: &mut [u8]) {
		rand_core::impls::fill_bytes_via_next(self, dest)
	}

	fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
		self.fill_bytes(dest);
		Ok(())
	}
}

impl SeedableRng for Lfsr {
	type Seed = [u8; 2];

	fn from_seed(seed: Self::Seed) -> Self {
		Lfsr::new(u16::from_le_bytes(seed))
	}
}

/// Generator seeded from the operating system.
pub fn new_rng() -> Result<Lfsr, getrandom::Error> {
	let seed = getrandom::u64()?;
	Ok(Lfsr::seed_from_u64(seed))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn golden_bits_from_default_seed() {
		let mut rng = Lfsr::default();
		let bits: Vec<u16> = (0..32).map(|_| rng.next_bit()).collect();
		assert_eq!(
			bits,
			[
				1, 0, 0, 0, 0, 1, 1, 1, 0, 0, 1, 0, 0, 0, 1, 1, 0, 1, 0, 0, 0, 1, 1, 0, 1, 1, 0, 1, 1, 1, 0, 0
			]
		);
	}

	#[test]
	fn next_bits_is_msb_first() {
		let mut rng = Lfsr::default();
		assert_eq!(rng.next_bits(16), 0x8723);
		assert_eq!(rng.next_bits(16), 0x46DC);
		assert_eq!(rng.next_bits(0), 0);
	}

	#[test]
	fn full_period_without_zero_state() {
		let mut rng = Lfsr::default();
		let start = rng.state();
		for step in 1..=65535u32 {
			rng.next_bit();
			assert_ne!(rng.state(), 0);
			if step < 65535 {
				assert_ne!(rng.state(), start, "cycle closed early at step {step}");
			}
		}
		assert_eq!(rng.state(), start);
	}

	#[test]
	fn zero_seed_is_replaced() {
		assert_eq!(Lfsr::new(0), Lfsr::default());
		assert_eq!(Lfsr::from_seed([0, 0]).state(), DEFAULT_SEED);
		assert_eq!(Lfsr::from_seed([0x34, 0x12]).state(), 0x1234);
	}

	#[test]
	fn power_of_two_takes_fast_path() {
		let mut a = Lfsr::default();
		let mut b = Lfsr::default();
		a.next_bits(5);
		b.next_bits(5);
		assert_eq!(a.next_int(8), b.next_bits(3));
		assert_eq!(a, b);
		assert_eq!(a.next_int(1), 0);
		assert_eq!(a, b);
	}

	#[test]
	fn rejection_sampling_sequence() {
		let mut rng = Lfsr::default();
		let values: Vec<u16> = (0..10).map(|_| rng.next_int(10)).collect();
		assert_eq!(values, [5, 5, 0, 0, 6, 1, 8, 8, 3, 5]);
	}

	#[test]
	fn bounded_ints_are_uniform() {
		let mut rng = Lfsr::default();
		let mut counts = [0u32; 7];
		let draws = 100_000;
		for _ in 0..draws {
			counts[rng.next_int(7) as usize] += 1;
		}
		for (value, &count) in counts.iter().enumerate() {
			let freq = count as f64 / draws as f64;
			assert!((freq - 1.0 / 7.0).abs() < 0.01, "value {value} seen with frequency {freq}");
		}
	}

	#[test]
	#[cfg(debug_assertions)]
	#[should_panic]
	fn zero_bound_fails_fast() {
		Lfsr::default().next_int(0);
	}

	#[test]
	fn rng_core_packs_two_draws() {
		let mut rng = Lfsr::default();
		assert_eq!(rng.next_u32(), 0x8723_46DC);
		let mut a = Lfsr::seed_from_u64(17381);
		let mut b = Lfsr::seed_from_u64(17381);
		let mut buf_a = [0u8; 5];
		let mut buf_b = [0u8; 5];
		a.fill_bytes(&mut buf_a);
		b.fill_bytes(&mut buf_b);
		assert_eq!(buf_a, buf_b);
		assert_ne!(a.state(), 0);
	}
}
