use std::{
    convert::Infallible,
    error::Error,
    f32::consts::PI,
    time::{Duration, Instant},
};

use bandscope_dsp::{
    config::{
        ADC_MAX, ADC_MIDPOINT, BAND_COUNT, PEAK_TIME_INTERVAL_MS, SAMPLE_COUNT, SAMPLE_RATE_HZ,
    },
    AnalogInput, Analyzer, MonotonicClock,
};
use bandscope_viz::{DisplayProfile, FramebufferSink, RenderSink, SpectrumRenderer};
use clap::Parser;
use embedded_graphics::{pixelcolor::Rgb888, prelude::*};
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use log::{debug, info};
use rand::{rngs::ThreadRng, Rng};

mod cli;

use cli::Args;

const SCALE: u32 = 4;
const SWEEP_LOW_HZ: f32 = 100.0;
const SWEEP_HIGH_HZ: f32 = 1_900.0;
const SWEEP_PERIOD_S: f32 = 8.0;
const TONE_COUNTS: f32 = 600.0;
const NOISE_COUNTS: f32 = 20.0;

struct StdClock {
    start: Instant,
}

impl MonotonicClock for StdClock {
    fn now_micros(&self) -> u32 {
        self.start.elapsed().as_micros() as u32
    }

    fn now_millis(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }
}

/// Microphone stand-in: a tone sweeping up and down plus a little hiss,
/// sampled from the wall clock so the sampler's timing shows in the output.
struct SyntheticMic<'a> {
    clock: &'a StdClock,
    phase: f32,
    last_s: Option<f32>,
    rng: ThreadRng,
}

impl<'a> SyntheticMic<'a> {
    fn new(clock: &'a StdClock) -> Self {
        Self {
            clock,
            phase: 0.0,
            last_s: None,
            rng: rand::rng(),
        }
    }

    fn frequency_at(t: f32) -> f32 {
        let pos = (t % SWEEP_PERIOD_S) / SWEEP_PERIOD_S;
        let tri = 1.0 - (2.0 * pos - 1.0).abs();
        SWEEP_LOW_HZ + (SWEEP_HIGH_HZ - SWEEP_LOW_HZ) * tri
    }
}

impl AnalogInput for SyntheticMic<'_> {
    fn read(&mut self) -> u16 {
        let t = self.clock.start.elapsed().as_secs_f32();
        let dt = self.last_s.replace(t).map_or(0.0, |last| t - last);
        self.phase = (self.phase + 2.0 * PI * Self::frequency_at(t) * dt) % (2.0 * PI);

        let noise = self.rng.random_range(-NOISE_COUNTS..NOISE_COUNTS);
        let value = ADC_MIDPOINT as f32 + TONE_COUNTS * self.phase.sin() + noise;
        value.round().clamp(0.0, ADC_MAX as f32) as u16
    }
}

/// Framebuffer sink that pushes to the simulator window on `present`.
struct WindowSink {
    inner: FramebufferSink<SimulatorDisplay<Rgb888>>,
    window: Window,
    closed: bool,
}

impl WindowSink {
    fn new(profile: &DisplayProfile, title: &str) -> Self {
        let display = SimulatorDisplay::new(Size::new(profile.width, profile.height));
        let settings = OutputSettingsBuilder::new().scale(SCALE).build();
        Self {
            inner: FramebufferSink::new(display),
            window: Window::new(title, &settings),
            closed: false,
        }
    }
}

impl RenderSink for WindowSink {
    type Error = Infallible;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.inner.clear()
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        color: Rgb888,
    ) -> Result<(), Self::Error> {
        self.inner.fill_rect(x, y, w, h, color)
    }

    fn draw_line(&mut self, x: i32, y: i32, w: u32, color: Rgb888) -> Result<(), Self::Error> {
        self.inner.draw_line(x, y, w, color)
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), Self::Error> {
        self.inner.draw_text(x, y, text)
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        self.inner.present()?;
        self.window.update(self.inner.target());
        if self.window.events().any(|e| matches!(e, SimulatorEvent::Quit)) {
            self.closed = true;
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::parse();
    let profile = args.profile();
    let name = args.display_name();

    let band_map = args.band_map().map_err(|e| e.to_string())?;
    debug!("band ranges: {:?}", band_map.band_ranges());
    let mut analyzer = Analyzer::<SAMPLE_COUNT, BAND_COUNT>::with_band_map(
        SAMPLE_RATE_HZ,
        band_map,
        args.levels(),
        PEAK_TIME_INTERVAL_MS,
    )
    .map_err(|e| e.to_string())?
    .with_summary(args.bin_summary());
    let mut renderer = SpectrumRenderer::<BAND_COUNT>::new(profile);
    let mut sink = WindowSink::new(&profile, &format!("Bandscope - {}", name));

    let clock = StdClock { start: Instant::now() };
    let mut mic = SyntheticMic::new(&clock);
    info!(
        "simulating {} at {} Hz, {} samples per frame, {:?} bin summary",
        name,
        SAMPLE_RATE_HZ,
        SAMPLE_COUNT,
        args.summary
    );

    let mut window_start = Instant::now();
    let mut window_cycles = 0u32;
    while !sink.closed {
        let snapshot = analyzer.run_cycle(&mut mic, &clock);
        renderer.render(&mut sink, &snapshot)?;

        window_cycles += 1;
        if window_start.elapsed() >= Duration::from_secs(1) {
            info!(
                "{} cycles/s, readout {:.1} dB at {:.0} Hz",
                window_cycles, snapshot.peak.level_db, snapshot.peak.frequency_hz
            );
            window_start = Instant::now();
            window_cycles = 0;
        }
    }

    info!("window closed after {} cycles", analyzer.cycles());
    Ok(())
}
