use std::collections::HashSet;

use nix_lib::{BitSource, CellPool, CellShuffler, Lfsr, ShuffleStrategy};
use proptest::prelude::*;

fn strategy() -> impl Strategy<Value = ShuffleStrategy> {
	prop_oneof![Just(ShuffleStrategy::FisherYates), Just(ShuffleStrategy::BubblePass)]
}

proptest! {
	#[test]
	fn bounded_draws_stay_in_range(seed in any::<u16>(), max in 1u16..=256) {
		let mut rng = Lfsr::new(seed);
		for _ in 0..16 {
			prop_assert!(rng.next_int(max) < max);
		}
		prop_assert_ne!(rng.state(), 0);
	}

	#[test]
	fn selection_draws_digit_distinct_pool_cells(
		seed in any::<u16>(),
		rows in 1usize..=3,
		digit in 0usize..=9,
		strategy in strategy(),
	) {
		let digit = digit.min(rows * 3);
		let mut pool = CellPool::grid(45, 24, rows, 19, 17);
		let original: HashSet<_> = pool.as_slice().iter().copied().collect();
		let mut rng = Lfsr::new(seed);
		let mut drawn = Vec::new();
		CellShuffler::new(&mut rng, strategy)
			.select_and_draw(pool.as_mut_slice(), digit, |cell| {
				drawn.push(cell);
				Ok::<(), ()>(())
			})
			.unwrap();
		prop_assert_eq!(drawn.len(), digit);
		prop_assert_eq!(drawn.iter().collect::<HashSet<_>>().len(), digit);
		prop_assert!(drawn.iter().all(|cell| original.contains(cell)));
	}

	#[test]
	fn shuffle_is_a_permutation(seed in any::<u16>(), len in 0usize..=9, strategy in strategy()) {
		let mut items: Vec<usize> = (0..len).collect();
		CellShuffler::new(&mut Lfsr::new(seed), strategy).shuffle(&mut items);
		items.sort_unstable();
		prop_assert_eq!(items, (0..len).collect::<Vec<_>>());
	}
}
