//! Fuzzes full decoder dispatch: arbitrary frames through every decoder
//! variant, canonical state in place.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_decoder_dispatch
#![no_main]
use libfuzzer_sys::fuzz_target;
use openpad_registry::{Decoder, DeviceState};

fuzz_target!(|data: &[u8]| {
    // Must never panic on arbitrary bytes — errors are expected, panics are not.
    let mut decoders = [
        Decoder::Lite2,
        Decoder::SwitchPro {
            requested_standard_mode: false,
        },
        Decoder::DualShock4,
    ];
    for decoder in &mut decoders {
        let mut state = DeviceState::default();
        let _ = decoder.process(data, &mut state);
    }
});
