// core/tests/test_analyze_session.rs

use dischargegraph_core::analyze_session::{analyze_session, AnalyzeInputs};
use dischargegraph_core::calibration::Calibration;
use dischargegraph_core::errors::CalibrationError;
use dischargegraph_core::metrics::scaled_voltage;
use dischargegraph_core::models::{Sample, TimeAnchor};
use dischargegraph_core::types::Analysis;

/// Lineært fallende avlesning, 1 Hz, starter på t0 (loggerens klokke).
fn make_samples(n: usize, t0: f64) -> Vec<Sample> {
    (0..n)
        .map(|i| Sample::new(t0 + i as f64, 0.80 - i as f64 * 0.0005))
        .collect()
}

fn run(samples: &[Sample], cal: &Calibration, anchor: TimeAnchor, window: usize) -> Analysis {
    analyze_session(AnalyzeInputs {
        samples,
        calibration: cal,
        anchor,
        smoothing_window: window,
    })
    .expect("gyldig kalibrering")
}

#[test]
fn empty_input_gives_no_data() {
    let cal = Calibration::default();
    let out = run(&[], &cal, TimeAnchor::First, 21);
    assert!(out.is_no_data());
    assert!(out.curve().is_none());
}

#[test]
fn sentinel_first_gives_no_data() {
    let cal = Calibration::default();
    let samples = [Sample::new(0.0, 0.0), Sample::new(1.0, 0.5)];
    assert!(run(&samples, &cal, TimeAnchor::First, 3).is_no_data());
}

#[test]
fn invalid_calibration_rejected_before_computation() {
    let cal = Calibration::default().with_resistance(0.0);
    // også med tom input: konfigurasjonsfeil vinner
    let err = analyze_session(AnalyzeInputs {
        samples: &[],
        calibration: &cal,
        anchor: TimeAnchor::First,
        smoothing_window: 21,
    })
    .unwrap_err();
    assert!(matches!(err, CalibrationError::NonPositive { field: "resistance_ohm", .. }));

    let cal = Calibration::default().with_rated_capacity(-1.0);
    let samples = make_samples(10, 0.0);
    assert!(analyze_session(AnalyzeInputs {
        samples: &samples,
        calibration: &cal,
        anchor: TimeAnchor::First,
        smoothing_window: 3,
    })
    .is_err());
}

#[test]
fn curve_series_lengths_and_first_anchor() {
    let cal = Calibration::default();
    let samples = make_samples(100, 5_000.0);
    let analysis = run(&samples, &cal, TimeAnchor::First, 21);
    let c = analysis.curve().expect("kurve");

    assert_eq!(c.elapsed_s.len(), 100);
    assert_eq!(c.voltage_v.len(), 100);
    assert_eq!(c.current_a.len(), 100);
    assert_eq!(c.battery_pct.len(), 100);
    assert_eq!(c.amp_hours.len(), 100);
    assert_eq!(c.remaining_ah.len(), 100);
    assert!(c.remaining_pct.is_none(), "ingen oppgitt kapasitet");

    assert_eq!(c.elapsed_s[0], 0.0);
    assert_eq!(c.elapsed_s[99], 99.0);
    assert_eq!(c.elapsed_pct[0], 0.0);
    assert!((c.elapsed_pct[99] - 100.0).abs() < 1e-9);

    // Valid-glatting: n - (w - 1)
    assert_eq!(c.smoothing_window, 21);
    assert_eq!(c.smoothed_voltage_v.len(), 80);
    assert_eq!(c.smoothed_current_a.len(), 80);
    assert_eq!(c.smoothed_elapsed_s.len(), 80);
    assert_eq!(c.smoothed_elapsed_s[0], 10.0, "vindu sentrert på sample w/2");
    assert_eq!(c.smoothed_amp_hours.len(), 79);

    // lineær serie: glattet verdi = verdien i midten av vinduet
    assert!((c.smoothed_voltage_v[0] - c.voltage_v[10]).abs() < 1e-9);
}

#[test]
fn curve_values_follow_calibration() {
    let cal = Calibration::default(); // 16.5 V/enhet, 1.25 Ω
    let samples = [Sample::new(0.0, 0.5), Sample::new(1.0, 0.5)];
    let analysis = run(&samples, &cal, TimeAnchor::First, 1);
    let c = analysis.curve().unwrap();

    assert_eq!(c.voltage_v, vec![8.25, 8.25]);
    assert!((c.current_a[0] - 6.6).abs() < 1e-12);
    assert!((c.amp_hours[1] - 2.0 * 6.6 / 3600.0).abs() < 1e-12);
    assert!((c.remaining_ah[0] - 6.6 / 3600.0).abs() < 1e-12);
    assert_eq!(c.remaining_ah[1], 0.0);
    // 8.25 V er under tom-terskelen
    assert_eq!(c.battery_pct, vec![0, 0]);
}

#[test]
fn last_anchor_puts_final_sample_at_zero() {
    let cal = Calibration::default();
    let samples = make_samples(30, 100.0);
    let analysis = run(&samples, &cal, TimeAnchor::Last, 5);
    let c = analysis.curve().unwrap();

    assert_eq!(c.anchor, TimeAnchor::Last);
    assert_eq!(c.elapsed_s[29], 0.0);
    assert_eq!(c.elapsed_s[0], -29.0);
    // varighet i sammendraget er uavhengig av anker
    assert_eq!(c.summary.discharge_time_s, 29.0);
    // trapes-Ah bruker tidsdifferanser, ikke fortegn
    assert!(c.smoothed_amp_hours.iter().all(|&ah| ah >= 0.0));
}

#[test]
fn sentinel_inside_input_truncates_session() {
    let cal = Calibration::default();
    let mut samples = make_samples(10, 0.0);
    samples[6].reading = 0.0;
    let analysis = run(&samples, &cal, TimeAnchor::First, 3);
    let c = analysis.curve().unwrap();
    assert_eq!(c.voltage_v.len(), 6);
    assert!(c.voltage_v.iter().all(|&v| v > 0.0));
}

#[test]
fn remaining_percent_and_summary_with_rated_capacity() {
    // 10 A konstant: avlesning 0.5 * 25 V/enhet / 1.25 Ω
    let mut cal = Calibration::default().with_rated_capacity(1.0);
    cal.voltage_scale = 25.0;
    let samples: Vec<Sample> = (0..720).map(|i| Sample::new(i as f64, 0.5)).collect();
    let analysis = run(&samples, &cal, TimeAnchor::First, 21);
    let c = analysis.curve().unwrap();

    // 720 s * 10 A = 2 Ah => 2x oppgitt kapasitet, -100 % til slutt
    let rem = c.remaining_pct.as_ref().expect("remaining_pct");
    assert_eq!(rem.len(), 720);
    assert!(rem[0] < 100.0 && rem[0] > 99.0);
    assert!((rem[719] - (-100.0)).abs() < 1e-6);

    let s = &c.summary;
    assert_eq!(s.sample_count, 720);
    assert_eq!(s.discharge_time_s, 719.0);
    assert_eq!(s.discharge_time_h, 0.2);
    assert_eq!(s.final_voltage_v, 12.5);
    assert_eq!(s.min_voltage_v, 12.5);
    assert_eq!(s.max_voltage_v, 12.5);
    assert_eq!(s.total_ah, 2.0);
    // 12.5 V * 10 A = 125 W i 0.2 h
    assert_eq!(s.total_wh, 25.0);
    // 12.8 V / 1.25 Ω * 719/3600 h
    assert_eq!(s.expected_ah, Some(2.05));
    assert_eq!(s.rated_capacity_ah, Some(1.0));
    assert_eq!(s.remaining_pct_final, Some(-100.0));

    // konstant strøm: trapes og nominell integrasjon stemmer overens
    let trap_total = *c.smoothed_amp_hours.last().unwrap();
    assert!((trap_total - 10.0 * 699.0 / 3600.0).abs() < 1e-9);
}

#[test]
fn single_sample_session() {
    let cal = Calibration::default();
    let analysis = run(&[Sample::new(42.0, 0.8)], &cal, TimeAnchor::First, 21);
    let c = analysis.curve().unwrap();
    assert_eq!(c.elapsed_s, vec![0.0]);
    assert_eq!(c.elapsed_pct, vec![0.0]);
    assert!(c.smoothed_voltage_v.is_empty());
    assert!(c.smoothed_amp_hours.is_empty());
    assert_eq!(c.summary.discharge_time_s, 0.0);
}

#[test]
fn same_inputs_give_identical_curves() {
    let cal = Calibration::default().with_rated_capacity(100.0);
    let samples = make_samples(50, 1000.0);
    let a = run(&samples, &cal, TimeAnchor::First, 5);
    let b = run(&samples, &cal, TimeAnchor::First, 5);
    let ja = serde_json::to_string(a.curve().unwrap()).unwrap();
    let jb = serde_json::to_string(b.curve().unwrap()).unwrap();
    assert_eq!(ja, jb, "analysen skal være deterministisk");
}

#[test]
fn remaining_rated_ah_and_scaled_voltage() {
    // 10 A konstant, 360 s => 1 Ah brukt av 5 Ah
    let mut cal = Calibration::default().with_rated_capacity(5.0);
    cal.voltage_scale = 25.0;
    let samples: Vec<Sample> = (0..360).map(|i| Sample::new(i as f64, 0.5)).collect();
    let analysis = run(&samples, &cal, TimeAnchor::First, 3);
    let c = analysis.curve().unwrap();

    let rated = c.remaining_rated_ah.as_ref().expect("remaining_rated_ah");
    assert_eq!(rated.len(), 360);
    assert!((rated[0] - (5.0 - 10.0 / 3600.0)).abs() < 1e-12);
    assert!((rated[359] - 4.0).abs() < 1e-9);
    // konstant spenning kan ikke skaleres
    assert!(c.scaled_voltage.is_none());

    // uten oppgitt kapasitet finnes ingen rated-serie
    let plain = run(&make_samples(20, 0.0), &Calibration::default(), TimeAnchor::First, 3);
    let pc = plain.curve().unwrap();
    assert!(pc.remaining_rated_ah.is_none());
    let scaled = pc.scaled_voltage.as_ref().expect("fallende spenning skaleres");
    assert_eq!(scaled.len(), 20);
    assert_eq!(scaled[0], 1.0);
    assert_eq!(scaled[19], 0.0);
    assert!(scaled.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn scaled_voltage_helper() {
    assert_eq!(scaled_voltage(&[]), None);
    assert_eq!(scaled_voltage(&[12.0, 12.0]), None);
    assert_eq!(scaled_voltage(&[12.0, 13.0, 14.0]), Some(vec![0.0, 0.5, 1.0]));
}
