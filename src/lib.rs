use std::{fs, path::PathBuf};

use embedded_graphics::{pixelcolor::Rgb565, prelude::DrawTarget};
use nix_lib::{
	Draw, FixedClock, LayoutConfig, LayoutError, Lfsr, NixFace, ShuffleStrategy, SystemClock, WATCH_HEIGHT, WATCH_WIDTH,
};
use rand_xoshiro::rand_core::SeedableRng;
use serde::Deserialize;
use thiserror::Error;

pub mod context;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("cannot read {}: {source}", .path.display())]
	Io { path: PathBuf, source: std::io::Error },
	#[error("invalid config: {0}")]
	Json(#[from] serde_json::Error),
	#[error(transparent)]
	Layout(#[from] LayoutError),
	#[error("unknown time zone {0:?}")]
	TimeZone(String),
	#[error("bad value {value:?} for {flag}")]
	Flag { flag: String, value: String },
	#[error("{0} needs a value")]
	MissingValue(String),
	#[error("unknown argument {0:?}")]
	UnknownArgument(String),
	#[error("cannot seed from the OS: {0}")]
	Entropy(String),
}

/// Settings read from the JSON config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	pub width: u32,
	pub height: u32,
	pub timezone: String,
	pub format_24h: bool,
	pub tick_ms: u64,
	/// Redraw on every nth tick only.
	pub redraw_every: u32,
	/// Absent means the fixed default seed.
	pub seed: Option<u64>,
	pub random_seed: bool,
	pub strategy: ShuffleStrategy,
	pub show_grid: bool,
	pub layout: LayoutConfig,
}

impl Default for AppConfig {
	fn default() -> Self {
		AppConfig {
			width: WATCH_WIDTH,
			height: WATCH_HEIGHT,
			timezone: "Europe/Berlin".to_owned(),
			format_24h: false,
			tick_ms: 1000,
			redraw_every: 1,
			seed: None,
			random_seed: false,
			strategy: ShuffleStrategy::FisherYates,
			show_grid: false,
			layout: LayoutConfig::default(),
		}
	}
}

impl AppConfig {
	pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
		let path = path.into();
		let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io { path, source })?;
		Ok(serde_json::from_str(&text)?)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		self.layout.validate(self.width, self.height)?;
		self.clock()?;
		Ok(())
	}

	pub fn clock(&self) -> Result<SystemClock, ConfigError> {
		SystemClock::by_name(&self.timezone, self.format_24h).ok_or_else(|| ConfigError::TimeZone(self.timezone.clone()))
	}

	pub fn rng(&self) -> Result<Lfsr, ConfigError> {
		if self.random_seed {
			return nix_lib::new_rng().map_err(|e| ConfigError::Entropy(e.to_string()));
		}
		Ok(match self.seed {
			Some(seed) => Lfsr::seed_from_u64(seed),
			None => Lfsr::default(),
		})
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
	Run,
	/// Render a single frame to a PNG file.
	Snapshot(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
	pub config: AppConfig,
	pub fixed_time: Option<FixedClock>,
	pub mode: Mode,
}

impl Options {
	pub fn face<D: DrawTarget<Color = Rgb565> + 'static>(&self) -> Result<Box<dyn Draw<D>>, ConfigError> {
		let config = &self.config;
		let face: Box<dyn Draw<D>> = match self.fixed_time {
			Some(clock) => Box::new(configure(NixFace::new(config.layout.clone(), clock), config)),
			None => Box::new(configure(NixFace::new(config.layout.clone(), config.clock()?), config)),
		};
		Ok(face)
	}
}

fn configure<C: nix_lib::Clock>(face: NixFace<C>, config: &AppConfig) -> NixFace<C> {
	face.strategy(config.strategy)
		.redraw_every(config.redraw_every)
		.show_grid(config.show_grid)
}

fn flag_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, ConfigError> {
	let value = value.ok_or_else(|| ConfigError::MissingValue(flag.to_owned()))?;
	value.parse().map_err(|_| ConfigError::Flag {
		flag: flag.to_owned(),
		value: value.clone(),
	})
}

/// Reads the config file named by `--config` (if any), then applies the other
/// flags on top of it.
pub fn parse_args(args: &[String]) -> Result<Options, ConfigError> {
	let mut config = match args.iter().position(|a| a == "--config") {
		Some(idx) => AppConfig::load(flag_value::<PathBuf>("--config", args.get(idx + 1))?)?,
		None => AppConfig::default(),
	};
	let mut time = None;
	let mut mode = Mode::Run;

	let mut iter = args.iter();
	while let Some(arg) = iter.next() {
		match arg.as_str() {
			"--config" => {
				iter.next();
			},
			"--seed" => config.seed = Some(flag_value(arg, iter.next())?),
			"--random-seed" => config.random_seed = true,
			"--24h" => config.format_24h = true,
			"--12h" => config.format_24h = false,
			"--grid" => config.show_grid = true,
			"--timezone" => config.timezone = flag_value(arg, iter.next())?,
			"--redraw-every" => config.redraw_every = flag_value(arg, iter.next())?,
			"--strategy" => config.strategy = flag_value(arg, iter.next())?,
			"--time" => time = Some(flag_value::<String>(arg, iter.next())?),
			"--png" => mode = Mode::Snapshot(flag_value(arg, iter.next())?),
			_ => return Err(ConfigError::UnknownArgument(arg.clone())),
		}
	}

	let fixed_time = match time {
		Some(text) => Some(FixedClock::parse(&text, config.format_24h).ok_or(ConfigError::Flag {
			flag: "--time".to_owned(),
			value: text,
		})?),
		None => None,
	};
	Ok(Options {
		config,
		fixed_time,
		mode,
	})
}
