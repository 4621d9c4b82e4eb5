use bandscope_dsp::config::{
    BAND_COUNT, BAND_EDGES, BIN_COUNT, PEAK_TIME_INTERVAL_MS, SAMPLE_COUNT, SAMPLE_RATE_HZ,
};
use bandscope_dsp::{Analyzer, BandAggregator, BandMap, LevelConfig, Sampler, Spectrum};
pub mod common;
use approx::assert_abs_diff_eq;
use common::*;

fn analyzer() -> Analyzer<SAMPLE_COUNT, BAND_COUNT> {
    Analyzer::new(
        SAMPLE_RATE_HZ,
        &BAND_EDGES,
        LevelConfig::SSD1306,
        PEAK_TIME_INTERVAL_MS,
    )
    .unwrap()
}

#[test]
fn test_tone_magnitude_at_bin_20_lights_its_band() {
    // noiseFloor 60, dbMult 6, ampScale 2048: (3000 - 60) / 2048 * 6 saturates.
    let map = BandMap::<BAND_COUNT>::from_edges(&BAND_EDGES, BIN_COUNT).unwrap();
    let mut aggregator = BandAggregator::new(map, LevelConfig::SSD1306).unwrap();
    let mut mags = [0.0f32; BIN_COUNT];
    mags[20] = 3000.0;

    let bands = aggregator.update(&Spectrum::new(&mags, SAMPLE_RATE_HZ));
    assert_abs_diff_eq!(bands[9].current_level, 90.0, epsilon = 1e-4);
    assert_abs_diff_eq!(bands[9].peak_level, 90.0, epsilon = 1e-4);
}

#[test]
fn test_sine_frame_end_to_end() {
    let mut analyzer = analyzer();
    analyzer.frame_mut().load(&tone_frame(TONE_HZ, 1000.0));

    let snapshot = analyzer.analyze(0);
    assert_abs_diff_eq!(snapshot.bands[9].current_level, 90.0, epsilon = 1e-3);
    assert_abs_diff_eq!(snapshot.bands[9].peak_level, 90.0, epsilon = 1e-3);
    assert_eq!(snapshot.instant.bin, 20);
    assert_eq!(snapshot.peak.frequency_hz, 625.0);
    // 1000 counts * 0.54 coherent gain * 64 = ~34560, about 90.8 dB.
    assert!(
        snapshot.peak.level_db > 85.0 && snapshot.peak.level_db < 95.0,
        "level {}",
        snapshot.peak.level_db
    );
    let tone_band = snapshot.bands[9].current_level;
    assert!(snapshot.bands.iter().all(|b| b.current_level <= tone_band));
}

#[test]
fn test_transform_leaves_magnitudes_in_place() {
    let mut analyzer = analyzer();
    analyzer.frame_mut().load(&tone_frame(TONE_HZ, 500.0));
    analyzer.analyze(0);

    let frame = analyzer.frame();
    let loudest = frame.re[..SAMPLE_COUNT / 2]
        .iter()
        .enumerate()
        .fold((0, 0.0f32), |best, (i, &m)| if m > best.1 { (i, m) } else { best });
    assert_eq!(loudest.0, 20);
    assert!(frame.re[SAMPLE_COUNT / 2..].iter().all(|&v| v == 0.0));
    assert!(frame.im.iter().all(|&v| v == 0.0));
}

#[test]
fn test_run_cycle_samples_on_schedule() {
    let clock = FakeClock::new(10_000, 7);
    let mut adc = ToneAdc::new(&clock, TONE_HZ, 800.0);
    let mut analyzer = analyzer();

    let snapshot = analyzer.run_cycle(&mut adc, &clock);
    assert_eq!(snapshot.instant.bin, 20);
    assert_eq!(snapshot.peak.frequency_hz, 625.0);
    assert_abs_diff_eq!(snapshot.bands[9].current_level, 90.0, epsilon = 1e-3);

    // Sample k is taken in [start + k * 250, start + k * 250 + 2 * step).
    let interval = Sampler::new(SAMPLE_RATE_HZ).unwrap().interval_us();
    let start = adc.read_times[0];
    assert_eq!(adc.read_times.len(), SAMPLE_COUNT);
    for (k, &t) in adc.read_times.iter().enumerate() {
        let ideal = start + k as u32 * interval;
        assert!(t >= ideal && t < ideal + 14, "sample {} at {} (ideal {})", k, t, ideal);
    }
}

#[test]
fn test_readout_holds_between_refreshes() {
    let clock = FakeClock::new(0, 3);
    let mut analyzer = analyzer();

    let mut adc = ToneAdc::new(&clock, TONE_HZ, 800.0);
    let first = analyzer.run_cycle(&mut adc, &clock).peak;
    assert_eq!(first.frequency_hz, 625.0);

    // A different tone 100 ms later does not move the readout.
    clock.advance_millis(100);
    let mut adc = ToneAdc::new(&clock, 1250.0, 800.0);
    let held = analyzer.run_cycle(&mut adc, &clock);
    assert_eq!(held.peak, first);
    assert_eq!(held.instant.bin, 40);

    // Past the interval it does.
    clock.advance_millis(PEAK_TIME_INTERVAL_MS);
    let refreshed = analyzer.run_cycle(&mut adc, &clock).peak;
    assert_eq!(refreshed.frequency_hz, 1250.0);
}
