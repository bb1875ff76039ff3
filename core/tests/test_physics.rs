// core/tests/test_physics.rs
use dischargegraph_core::physics::{
    battery_percentage, cumulative_amp_hours, cumulative_amp_hours_trapezoid,
    expected_amp_hours, power_watt, remaining_capacity_percent, time_remaining_hours,
    to_current, to_voltage, total_watt_hours, RoundTo,
};

#[test]
fn test_voltage_current_and_ah_scenario() {
    let v = to_voltage(0.5, 16.5);
    assert_eq!(v, 8.25);

    let i = to_current(v, 1.25);
    assert!((i - 6.6).abs() < 1e-12, "I = V/R feil: {i}");

    let ah = cumulative_amp_hours(&[6.6, 6.6], 1.0);
    assert_eq!(ah.len(), 2);
    assert!((ah[0] - 6.6 / 3600.0).abs() < 1e-12);
    assert!((ah[1] - 2.0 * 6.6 / 3600.0).abs() < 1e-12);
    assert!((ah[1] - 0.003667).abs() < 1e-6);
}

#[test]
fn test_to_voltage_does_not_clamp() {
    // avlesning > 1 og negativ slippes gjennom
    assert_eq!(to_voltage(1.5, 10.0), 15.0);
    assert_eq!(to_voltage(-0.25, 10.0), -2.5);
}

#[test]
fn test_cumulative_ah_empty_and_interval_scaling() {
    assert!(cumulative_amp_hours(&[], 1.0).is_empty());

    // 10 A i 360 s med 2 s intervall = 180 samples => 1 Ah
    let currents = vec![10.0; 180];
    let ah = cumulative_amp_hours(&currents, 2.0);
    assert!((ah.last().unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn test_trapezoid_uses_actual_elapsed_time() {
    // nominelt 1 s, men faktisk 2 s mellom samplene
    let currents = [4.0, 6.0, 6.0];
    let times = [0.0, 2.0, 4.0];
    let ah = cumulative_amp_hours_trapezoid(&currents, &times);

    assert_eq!(ah.len(), 2, "én verdi per midtpunkt");
    assert!((ah[0] - 5.0 * 2.0 / 3600.0).abs() < 1e-12);
    assert!((ah[1] - (10.0 + 12.0) / 3600.0).abs() < 1e-12);
}

#[test]
fn test_trapezoid_out_of_order_time_adds_nothing() {
    let ah = cumulative_amp_hours_trapezoid(&[5.0, 5.0, 5.0], &[0.0, 10.0, 5.0]);
    assert_eq!(ah.len(), 2);
    assert_eq!(ah[0], ah[1]);
}

#[test]
fn test_battery_percentage_edges() {
    let (full, empty) = (14.6, 12.0);
    assert_eq!(battery_percentage(full, full, empty), 100);
    assert_eq!(battery_percentage(15.2, full, empty), 100);
    assert_eq!(battery_percentage(empty, full, empty), 0);
    assert_eq!(battery_percentage(3.0, full, empty), 0);

    // 13.3 V => 50 %, trunkert
    assert_eq!(battery_percentage(13.3, full, empty), 50);
    // 12.0 + 2.6 * 0.999 => 99.9 % trunkeres til 99
    assert_eq!(battery_percentage(12.0 + 2.6 * 0.999, full, empty), 99);
}

#[test]
fn test_remaining_capacity_can_go_negative() {
    assert_eq!(remaining_capacity_percent(0.0, 100.0), 100.0);
    assert_eq!(remaining_capacity_percent(25.0, 100.0), 75.0);
    let over = remaining_capacity_percent(120.0, 100.0);
    assert!((over - (-20.0)).abs() < 1e-9, "forventet -20 %, fikk {over}");
}

#[test]
fn test_expected_ah_and_energy() {
    // 12.8 V / 1.25 Ω = 10.24 A i 1 time
    let exp = expected_amp_hours(12.8, 1.25, 3600.0);
    assert!((exp - 10.24).abs() < 1e-9);

    // 10 V over 5 Ω = 20 W, 3600 samples à 1 s => 20 Wh
    assert!((power_watt(10.0, 5.0) - 20.0).abs() < 1e-12);
    let wh = total_watt_hours(&vec![10.0; 3600], 5.0, 1.0);
    assert!((wh - 20.0).abs() < 1e-6);
}

#[test]
fn test_time_remaining() {
    let h = time_remaining_hours(50, 100.0, 10.0).unwrap();
    assert!((h - 5.0).abs() < 1e-12);
    assert!(time_remaining_hours(50, 100.0, 0.0).is_none());
    assert!(time_remaining_hours(50, 100.0, -1.0).is_none());
}

#[test]
fn test_round_to() {
    assert_eq!(0.0036666_f64.round_to(3), 0.004);
    assert_eq!(1.005_f64.round_to(0), 1.0);
    assert_eq!(12.34567_f64.round_to(2), 12.35);
}
