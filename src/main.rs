use std::{env, error::Error, process, thread, time::Duration};

use display_interface_spi::SPIInterface;
use embedded_graphics::prelude::DrawTarget;
use frame_output::FrameOutput;
use nix_face::{Mode, Options, context::ContextDefault, parse_args};
use nix_lib::{BLACK, Rng};
use rppal::{
	gpio::Gpio,
	hal::Delay,
	spi::{Bus, Mode as SpiMode, SimpleHalSpiDevice, SlaveSelect, Spi},
};
use ssd1351::display::display::Ssd1351;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const OLED_SIZE: u32 = 128;

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let args: Vec<_> = env::args().skip(1).collect();
	let result = parse_args(&args).map_err(Box::<dyn Error>::from).and_then(run);
	if let Err(e) = result {
		error!("{e}");
		process::exit(1);
	}
}

fn run(options: Options) -> Result<(), Box<dyn Error>> {
	options.config.validate()?;
	let rng = options.config.rng()?;
	info!(
		lfsr = rng.state(),
		strategy = ?options.config.strategy,
		format_24h = options.config.format_24h,
		"starting"
	);
	match &options.mode {
		Mode::Snapshot(path) => {
			let mut disp = FrameOutput::new(options.config.width, options.config.height);
			let mut ctx = ContextDefault::new(options.face()?, rng);
			ctx.loop_iter(&mut disp);
			disp.save_png(path)?;
			info!(path = %path.display(), "snapshot written");
			Ok(())
		},
		Mode::Run if rppal::system::DeviceInfo::new().is_ok() => rpi_main(&options, rng),
		Mode::Run => pc_main(&options, rng),
	}
}

#[cfg(not(feature = "pc"))]
fn pc_main(_options: &Options, _rng: Rng) -> Result<(), Box<dyn Error>> {
	Err("no display found and the desktop preview is not compiled in".into())
}

#[cfg(feature = "pc")]
fn pc_main(options: &Options, rng: Rng) -> Result<(), Box<dyn Error>> {
	use std::{num::NonZeroU32, time::Instant};

	use winit::{
		dpi::LogicalSize,
		event::{Event, WindowEvent},
		event_loop::EventLoop,
		window::WindowBuilder,
	};

	let (width, height) = (options.config.width, options.config.height);
	let tick = options.config.tick_ms;

	let event_loop = EventLoop::new();
	let window = WindowBuilder::new()
		.with_title("nix")
		.with_inner_size(LogicalSize::new(width, height))
		.build(&event_loop)?;
	let context = unsafe { softbuffer::Context::new(&window) }?;
	let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }?;

	let start = Instant::now();
	let mut ticks = 0;
	let mut disp = FrameOutput::new(width, height);
	let mut buffer_dirty = true;
	let mut ctx = ContextDefault::new(options.face()?, rng);

	event_loop.run(move |event, _, control_flow| {
		control_flow.set_poll();

		match event {
			Event::WindowEvent {
				event: WindowEvent::CloseRequested,
				..
			} => {
				info!("window closed");
				control_flow.set_exit();
			},
			Event::MainEventsCleared => {
				window.request_redraw();
			},
			Event::RedrawRequested(window_id) if window_id == window.id() => {
				let size = window.inner_size();
				let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
					return;
				};
				if let Err(e) = surface.resize(w, h) {
					error!("cannot resize surface: {e}");
					control_flow.set_exit();
					return;
				}

				if start.elapsed() >= Duration::from_millis(ticks * tick) {
					ticks += 1;
					buffer_dirty |= ctx.loop_iter(&mut disp);
				}

				if buffer_dirty {
					let mut buffer = match surface.buffer_mut() {
						Ok(buffer) => buffer,
						Err(e) => {
							error!("cannot map surface: {e}");
							control_flow.set_exit();
							return;
						},
					};
					for index in 0..(size.width * size.height) {
						let y = index / size.width;
						let x = index % size.width;
						buffer[index as usize] = if x < width && y < height { disp.xrgb(x, y) } else { 0 };
					}
					if let Err(e) = buffer.present() {
						error!("cannot present frame: {e}");
					}
					buffer_dirty = false;
				}
			},
			_ => (),
		}
	});
}

fn rpi_main(options: &Options, rng: Rng) -> Result<(), Box<dyn Error>> {
	if options.config.width > OLED_SIZE || options.config.height > OLED_SIZE {
		return Err(format!(
			"layout is made for {}x{}, the display has {OLED_SIZE}x{OLED_SIZE}",
			options.config.width, options.config.height
		)
		.into());
	}
	let spi = Spi::new(Bus::Spi0, SlaveSelect::Ss0, 19660800, SpiMode::Mode0)?;
	let gpio = Gpio::new()?;
	let dc = gpio.get(25)?.into_output();
	let mut rst = gpio.get(27)?.into_output();

	// Init SPI
	let spii = SPIInterface::new(SimpleHalSpiDevice::new(spi), dc);
	let mut disp = Ssd1351::new(spii);

	// Reset & init display
	disp.reset(&mut rst, &mut Delay)
		.map_err(|e| format!("display reset failed: {e:?}"))?;
	disp.turn_on().map_err(|e| format!("display did not turn on: {e:?}"))?;
	let _ = disp.clear(BLACK);

	let mut ctx = ContextDefault::new(options.face()?, rng);
	let tick = Duration::from_millis(options.config.tick_ms);
	loop {
		if ctx.loop_iter(&mut disp) {
			let _ = disp.flush(); // ignore bus write errors, they are harmless
		}
		thread::sleep(tick);
	}
}
