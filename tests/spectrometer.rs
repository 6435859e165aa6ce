// tests/spectrometer.rs

mod common;

use as7265x::common::registers;
use as7265x::common::{As7265xError, ChannelIndex, Gain, HandshakeConfig, HandshakePhase, LedCurrent, Parameter};
use as7265x::spectrometer::HardwareVersion;
use as7265x::{DeviceId, Spectrometer};
use common::{BusFault, SimulatedHub};

// Physical slot (1-based) found at each logical position after reordering.
const EXPECTED_SOURCE_SLOTS: [usize; 18] = [1, 2, 3, 4, 5, 6, 7, 8, 13, 9, 14, 10, 15, 16, 17, 18, 11, 12];

fn test_config() -> HandshakeConfig {
    HandshakeConfig {
        poll_interval_ms: 1,
        max_polls: 10,
        reset_settle_ms: 4000,
    }
}

fn spectrometer(hub: SimulatedHub) -> Spectrometer<SimulatedHub> {
    Spectrometer::with_config(hub, test_config())
}

/// Raw value stored for a physical slot (1-based).
fn raw_value(slot: usize) -> u16 {
    ((slot as u16) << 8) | (0xA0 + slot as u16)
}

fn calibrated_value(slot: usize) -> f32 {
    slot as f32 * 1.5 - 4.0
}

fn hub_with_spectrum() -> SimulatedHub {
    let mut hub = SimulatedHub::new();
    for die in 0..3u8 {
        for k in 0..registers::CHANNELS_PER_DEVICE {
            let slot = die as usize * 6 + k + 1;

            let [hi, lo] = raw_value(slot).to_be_bytes();
            let raw = registers::raw_register(k);
            hub.set_reg(die, raw, hi);
            hub.set_reg(die, raw + 1, lo);

            let cal = registers::cal_register(k);
            for (i, b) in calibrated_value(slot).to_be_bytes().into_iter().enumerate() {
                hub.set_reg(die, cal + i as u8, b);
            }
        }
    }
    hub
}

#[test]
fn board_presence() {
    let mut spec = spectrometer(SimulatedHub::new());
    assert!(spec.is_present());

    let mut hub = SimulatedHub::new();
    hub.unplugged = true;
    assert!(!spectrometer(hub).is_present());

    let mut hub = SimulatedHub::new();
    hub.mute = true;
    assert!(!spectrometer(hub).is_present());
}

#[test]
fn reset_waits_for_settle() {
    let mut spec = spectrometer(SimulatedHub::new());
    spec.reset().unwrap();

    let hub = spec.release();
    assert_eq!(hub.reg(0, registers::CONFIG), registers::CONFIG_RESET);
    assert!(hub.elapsed_ms >= 4000);
}

#[test]
fn hardware_version_reads_both_registers() {
    let mut hub = SimulatedHub::new();
    hub.set_reg(0, registers::DEVICE_TYPE, 0x40);
    hub.set_reg(0, registers::HW_VERSION, 0x41);
    let mut spec = spectrometer(hub);

    assert_eq!(
        spec.hardware_version().unwrap(),
        HardwareVersion { device_type: 0x40, hw_version: 0x41 }
    );
}

#[test]
fn stale_byte_is_discarded_before_read() {
    let mut hub = SimulatedHub::new();
    hub.set_reg(0, registers::DEVICE_TYPE, 0x40);
    hub.leave_stale_byte(0xEE);
    let mut spec = spectrometer(hub);

    assert_eq!(spec.hardware_version().unwrap().device_type, 0x40);
}

#[test]
fn temperatures_of_all_dies() {
    let mut hub = SimulatedHub::new();
    hub.set_reg(0, registers::DEVICE_TEMP, 25);
    hub.set_reg(1, registers::DEVICE_TEMP, 27);
    hub.set_reg(2, registers::DEVICE_TEMP, 31);
    let mut spec = spectrometer(hub);

    assert_eq!(spec.temperatures().unwrap(), [25, 27, 31]);
    assert_eq!(spec.interface().devsel_writes, [0, 1, 2]);
}

#[test]
fn reads_route_to_last_selected_device() {
    let mut hub = SimulatedHub::new();
    hub.set_reg(1, registers::DEVICE_TEMP, 27);
    hub.set_reg(2, registers::DEVICE_TEMP, 31);
    let mut spec = spectrometer(hub);

    assert_eq!(spec.temperature(DeviceId::As72653).unwrap(), 31);
    assert_eq!(spec.temperature(DeviceId::As72652).unwrap(), 27);

    let hub = spec.interface();
    assert_eq!(hub.devsel_writes.last(), Some(&DeviceId::As72652.devsel_code()));
    assert_eq!(hub.served_reads.last(), Some(&(0b01, registers::DEVICE_TEMP)));

    // Raw register access goes to the same die.
    spec.channel_mut().read_register(registers::DEVICE_TEMP).unwrap();
    assert_eq!(spec.interface().served_reads.last(), Some(&(0b01, registers::DEVICE_TEMP)));
}

#[test]
fn failed_operation_keeps_selection() {
    let mut spec = spectrometer(SimulatedHub::new());
    spec.temperature(DeviceId::As72652).unwrap();

    spec.interface_mut().unplugged = true;
    let result = spec.temperature(DeviceId::As72653);
    assert!(matches!(result, Err(As7265xError::Io(BusFault))));
    assert_eq!(spec.channel().selected_device(), Some(DeviceId::As72652));
}

#[test]
fn indicator_led_toggles_bit_zero_on_master() {
    let mut hub = SimulatedHub::new();
    hub.set_reg(0, registers::LED_CONFIG, 0b1000_0000);
    hub.set_reg(1, registers::LED_CONFIG, 0b0000_0000);
    let mut spec = spectrometer(hub);

    spec.set_indicator_led(true).unwrap();
    assert_eq!(spec.interface().reg(0, registers::LED_CONFIG), 0b1000_0001);
    assert_eq!(spec.interface().reg(1, registers::LED_CONFIG), 0);

    spec.set_indicator_led(false).unwrap();
    assert_eq!(spec.interface().reg(0, registers::LED_CONFIG), 0b1000_0000);
}

#[test]
fn shutter_led_toggles_bit_three() {
    let mut hub = SimulatedHub::new();
    hub.set_reg(2, registers::LED_CONFIG, 0b0011_0001);
    let mut spec = spectrometer(hub);

    spec.set_shutter_led(DeviceId::As72653, true).unwrap();
    assert_eq!(spec.interface().reg(2, registers::LED_CONFIG), 0b0011_1001);
    spec.set_shutter_led(DeviceId::As72653, false).unwrap();
    assert_eq!(spec.interface().reg(2, registers::LED_CONFIG), 0b0011_0001);
    assert_eq!(spec.interface().reg(0, registers::LED_CONFIG), 0);
}

#[test]
fn led_drive_current_is_broadcast() {
    let mut hub = SimulatedHub::new();
    for die in 0..3 {
        hub.set_reg(die, registers::LED_CONFIG, 0b1100_1001);
    }
    let mut spec = spectrometer(hub);

    spec.set_led_drive_current(2).unwrap();
    for die in 0..3 {
        assert_eq!(spec.interface().reg(die, registers::LED_CONFIG), 0b1110_1001);
    }
    assert_eq!(spec.led_drive_currents().unwrap(), [LedCurrent::Ma50; 3]);
}

#[test]
fn gain_is_broadcast() {
    let mut hub = SimulatedHub::new();
    for die in 0..3 {
        hub.set_reg(die, registers::CONFIG, 0b0000_1100);
    }
    let mut spec = spectrometer(hub);

    spec.set_gain(3).unwrap();
    for die in 0..3 {
        assert_eq!(spec.interface().reg(die, registers::CONFIG), 0b0011_1100);
    }
    assert_eq!(spec.gains().unwrap(), [Gain::X64; 3]);

    spec.set_gain(Gain::X3_7.into()).unwrap();
    assert_eq!(spec.gains().unwrap(), [Gain::X3_7; 3]);
}

#[test]
fn integration_time_is_broadcast() {
    let mut spec = spectrometer(SimulatedHub::new());

    spec.set_integration_time(255).unwrap();
    assert_eq!(spec.integration_times().unwrap(), [255; 3]);
    spec.set_integration_time(0).unwrap();
    assert_eq!(spec.integration_times().unwrap(), [0; 3]);
}

#[test]
fn invalid_settings_issue_no_bus_traffic() {
    let mut spec = spectrometer(SimulatedHub::new());

    for gain in [4u8, 7, 0xFF] {
        assert!(matches!(
            spec.set_gain(gain),
            Err(As7265xError::InvalidParameter { parameter: Parameter::Gain, .. })
        ));
    }
    assert!(matches!(
        spec.set_led_drive_current(4),
        Err(As7265xError::InvalidParameter { parameter: Parameter::LedCurrent, value: 4 })
    ));
    for cycles in [256u16, 1000, u16::MAX] {
        assert!(matches!(
            spec.set_integration_time(cycles),
            Err(As7265xError::InvalidParameter { parameter: Parameter::IntegrationTime, .. })
        ));
    }

    assert!(spec.interface().ops.is_empty());
}

#[test]
fn raw_spectrum_is_permuted() {
    let mut spec = spectrometer(hub_with_spectrum());
    let spectrum = spec.read_raw().unwrap();

    for (logical, source_slot) in EXPECTED_SOURCE_SLOTS.iter().enumerate() {
        let index = ChannelIndex::new::<()>(logical as u8 + 1).unwrap();
        assert_eq!(spectrum[index], raw_value(*source_slot), "channel {}", logical + 1);
    }
    // Six pairs per die.
    assert_eq!(spec.interface().served_reads.len(), 36);
    assert_eq!(spec.interface().devsel_writes, [0, 1, 2]);
}

#[test]
fn calibrated_spectrum_is_decoded_and_permuted() {
    let mut spec = spectrometer(hub_with_spectrum());
    let spectrum = spec.read_calibrated().unwrap();

    let expected: Vec<f32> = EXPECTED_SOURCE_SLOTS.iter().map(|&s| calibrated_value(s)).collect();
    assert_eq!(spectrum.as_array().as_slice(), expected.as_slice());
    assert_eq!(spec.interface().served_reads.len(), 72);
}

#[test]
fn per_device_reads_are_in_register_order() {
    let mut spec = spectrometer(hub_with_spectrum());

    let raw = spec.read_raw_channels(DeviceId::As72652).unwrap();
    assert_eq!(raw, [7, 8, 9, 10, 11, 12].map(raw_value));

    let cal = spec.read_calibrated_channels(DeviceId::As72653).unwrap();
    assert_eq!(cal, [13, 14, 15, 16, 17, 18].map(calibrated_value));
}

#[test]
fn slow_hub_still_reads_correctly() {
    let mut hub = hub_with_spectrum();
    hub.busy_polls_per_command = 3;
    hub.rx_latency_polls = 2;
    let mut spec = spectrometer(hub);

    let spectrum = spec.read_raw().unwrap();
    assert_eq!(spectrum.channel(ChannelIndex::LAST), raw_value(12));
    assert!(spec.interface().elapsed_ms > 0);
}

#[test]
fn mute_hub_read_times_out_within_budget() {
    let mut hub = SimulatedHub::new();
    hub.mute = true;
    let mut spec = spectrometer(hub);

    let result = spec.channel_mut().read_register(registers::DEVICE_TEMP);
    assert!(matches!(result, Err(As7265xError::Timeout(HandshakePhase::ReadData))));
    // stale check + one TX poll + the RX budget
    assert_eq!(spec.interface().status_reads(), 1 + 1 + 10);

    let result = spec.read_raw();
    assert!(matches!(result, Err(ref e) if e.is_timeout()));
}

#[test]
fn stuck_hub_write_times_out() {
    let mut hub = SimulatedHub::new();
    hub.busy_polls_per_command = u32::MAX;
    let mut spec = spectrometer(hub);

    // First command goes out on an idle hub, then it stays busy.
    let result = spec.set_integration_time(10);
    assert!(matches!(result, Err(As7265xError::Timeout(HandshakePhase::WritePayload))));
    assert_eq!(spec.channel().selected_device(), None);
    assert_eq!(spec.interface().writes_to_write_register(), 1);
}
