/// One of the four positions on the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigitGroup {
	HoursTens,
	HoursOnes,
	MinutesTens,
	MinutesOnes,
}

impl DigitGroup {
	pub const ALL: [DigitGroup; 4] = [
		DigitGroup::HoursTens,
		DigitGroup::HoursOnes,
		DigitGroup::MinutesTens,
		DigitGroup::MinutesOnes,
	];

	pub fn index(self) -> usize {
		self as usize
	}

	/// Largest value this position can show.
	pub fn max_digit(self, format_24h: bool) -> u8 {
		match self {
			DigitGroup::HoursTens if format_24h => 2,
			DigitGroup::HoursTens => 1,
			DigitGroup::HoursOnes => 9,
			DigitGroup::MinutesTens => 5,
			DigitGroup::MinutesOnes => 9,
		}
	}
}

/// Hour as shown on the face. In 12 hour mode midnight and noon read 12.
pub fn display_hour(hour: u8, format_24h: bool) -> u8 {
	if format_24h {
		return hour;
	}
	match hour % 12 {
		0 => 12,
		h => h,
	}
}

/// Digits in [`DigitGroup::ALL`] order.
pub fn decompose(hour: u8, minute: u8, format_24h: bool) -> [u8; 4] {
	let hour = display_hour(hour, format_24h);
	[hour / 10, hour % 10, minute / 10, minute % 10]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn twelve_hour_conversion() {
		assert_eq!(display_hour(0, false), 12);
		assert_eq!(display_hour(12, false), 12);
		assert_eq!(display_hour(13, false), 1);
		assert_eq!(display_hour(23, false), 11);
		assert_eq!(display_hour(13, true), 13);
		assert_eq!(display_hour(0, true), 0);
	}

	#[test]
	fn split_into_digits() {
		assert_eq!(decompose(14, 5, false), [0, 2, 0, 5]);
		assert_eq!(decompose(14, 5, true), [1, 4, 0, 5]);
		assert_eq!(decompose(0, 7, false), [1, 2, 0, 7]);
		assert_eq!(decompose(23, 59, true), [2, 3, 5, 9]);
	}

	#[test]
	fn digits_never_exceed_group_maximum() {
		for format_24h in [false, true] {
			for hour in 0..24 {
				for minute in 0..60 {
					let digits = decompose(hour, minute, format_24h);
					for group in DigitGroup::ALL {
						assert!(digits[group.index()] <= group.max_digit(format_24h));
					}
				}
			}
		}
	}
}
