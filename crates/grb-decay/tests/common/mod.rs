#![allow(dead_code)]

use grb_decay::TemporalDecayModel;

/// Trigger epoch used by the reference cases (an arbitrary mission time).
pub const TRIGGER: f64 = 5.0e8;

pub fn reference_model() -> TemporalDecayModel {
    TemporalDecayModel::new(1.0, TRIGGER, -1.6).expect("reference model")
}

pub fn assert_rel_close(actual: f64, expected: f64, rel: f64) {
    let err = ((actual - expected) / expected).abs();
    assert!(
        err <= rel,
        "actual {actual:e} vs expected {expected:e}: relative error {err:e} > {rel:e}"
    );
}
