use time::OffsetDateTime;
use time_tz::{OffsetDateTimeExt, Tz, timezones};

/// Where the face gets the time from.
pub trait Clock {
	/// Current `(hour, minute)`, hour in `0..24`.
	fn now(&self) -> (u8, u8);
	fn is_24h(&self) -> bool;
}

/// Wall clock in a fixed time zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
	tz: &'static Tz,
	format_24h: bool,
}

impl SystemClock {
	pub fn new(tz: &'static Tz, format_24h: bool) -> Self {
		SystemClock { tz, format_24h }
	}

	/// `None` if the IANA name is unknown.
	pub fn by_name(name: &str, format_24h: bool) -> Option<Self> {
		timezones::get_by_name(name).map(|tz| SystemClock::new(tz, format_24h))
	}
}

impl Clock for SystemClock {
	fn now(&self) -> (u8, u8) {
		let time = OffsetDateTime::now_utc().to_timezone(self.tz);
		(time.hour(), time.minute())
	}

	fn is_24h(&self) -> bool {
		self.format_24h
	}
}

/// Always shows the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
	pub hour: u8,
	pub minute: u8,
	pub format_24h: bool,
}

impl FixedClock {
	/// Parses `HH:MM`.
	pub fn parse(text: &str, format_24h: bool) -> Option<Self> {
		let (hour, minute) = text.split_once(':')?;
		let hour: u8 = hour.trim().parse().ok()?;
		let minute: u8 = minute.trim().parse().ok()?;
		if hour > 23 || minute > 59 {
			return None;
		}
		Some(FixedClock {
			hour,
			minute,
			format_24h,
		})
	}
}

impl Clock for FixedClock {
	fn now(&self) -> (u8, u8) {
		(self.hour, self.minute)
	}

	fn is_24h(&self) -> bool {
		self.format_24h
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_fixed_time() {
		let clock = FixedClock::parse("14:05", false).unwrap();
		assert_eq!(clock.now(), (14, 5));
		assert!(!clock.is_24h());
		assert_eq!(FixedClock::parse("24:00", true), None);
		assert_eq!(FixedClock::parse("12:60", true), None);
		assert_eq!(FixedClock::parse("noon", true), None);
	}

	#[test]
	fn system_clock_zones() {
		let clock = SystemClock::by_name("Europe/Berlin", true).unwrap();
		let (hour, minute) = clock.now();
		assert!(hour < 24 && minute < 60);
		assert!(clock.is_24h());
		assert!(SystemClock::by_name("Mars/Olympus_Mons", true).is_none());
	}
}
