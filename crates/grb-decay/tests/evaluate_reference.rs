mod common;

use common::{assert_rel_close, reference_model, TRIGGER};
use grb_decay::{
    evaluate, evaluate_many, evaluate_raw, DecayError, DecayParams, TemporalDecayModel,
};

#[test]
fn matches_reference_values() {
    let model = reference_model();
    assert_rel_close(model.evaluate(TRIGGER + 80.0), 9.016_874_411_920_081e-4, 1e-6);
    assert_rel_close(model.evaluate(TRIGGER + 1000.0), 1.584_893_192_461_112_4e-5, 1e-6);
    // Published four-digit approximations.
    assert_rel_close(model.evaluate(TRIGGER + 80.0), 9.0169e-4, 1e-4);
    assert_rel_close(model.evaluate(TRIGGER + 1000.0), 1.5849e-5, 1e-4);
}

#[test]
fn free_function_matches_model() {
    let model = reference_model();
    let params = *model.params();
    for dt in [1.0, 10.0, 80.0, 1234.5] {
        let t = TRIGGER + dt;
        assert_eq!(evaluate(t, &params), model.evaluate(t));
        assert_eq!(evaluate_raw(t, 1.0, TRIGGER, -1.6), model.evaluate(t));
    }
}

#[test]
fn repeated_calls_are_bit_identical() {
    let model = reference_model();
    let t = TRIGGER + 321.0;
    let first = model.evaluate(t);
    for _ in 0..16 {
        assert_eq!(model.evaluate(t).to_bits(), first.to_bits());
    }
}

#[test]
fn raw_evaluation_surfaces_singularity() {
    assert_eq!(evaluate_raw(10.0, 1.0, 10.0, -1.6), f64::INFINITY);
    assert!(evaluate_raw(5.0, 1.0, 10.0, -1.6).is_nan());
    // Integer exponents stay real for negative bases.
    assert_eq!(evaluate_raw(8.0, 1.0, 10.0, -2.0), 0.25);
}

#[test]
fn checked_evaluation_rejects_reference_epoch() {
    let err = reference_model().evaluate_checked(TRIGGER).unwrap_err();
    assert!(matches!(err, DecayError::Domain(_)));
    assert_eq!(err.code(), "singular_at_reference");
    assert!(err.info().hint.is_some());
}

#[test]
fn checked_evaluation_rejects_times_before_reference() {
    let err = reference_model()
        .evaluate_checked(TRIGGER - 10.0)
        .unwrap_err();
    assert_eq!(err.code(), "negative_base_fractional_index");
    assert_eq!(err.info().context["time"], (TRIGGER - 10.0).to_string());
}

#[test]
fn checked_evaluation_passes_finite_values() {
    let model = reference_model();
    let value = model.evaluate_checked(TRIGGER + 80.0).unwrap();
    assert_eq!(value, model.evaluate(TRIGGER + 80.0));
}

#[test]
fn batch_matches_scalar_evaluation() {
    let params = DecayParams::new(2.5, 100.0, -1.2).unwrap();
    // Large enough to take the parallel path.
    let times: Vec<f64> = (1..=5000).map(|i| 100.0 + i as f64 * 0.75).collect();
    let batch = evaluate_many(&times, &params);
    assert_eq!(batch.len(), times.len());
    for (t, value) in times.iter().zip(&batch) {
        assert_eq!(value.to_bits(), evaluate(*t, &params).to_bits());
    }
}

#[test]
fn checked_batch_reports_failing_index() {
    let model = reference_model();
    let times = [TRIGGER + 1.0, TRIGGER + 2.0, TRIGGER, TRIGGER + 3.0];
    let err = model.evaluate_many_checked(&times).unwrap_err();
    assert_eq!(err.code(), "singular_at_reference");
    assert_eq!(err.info().context["index"], "2");
}

#[test]
fn index_derivative_matches_log_form() {
    let model = reference_model();
    let t = TRIGGER + 80.0;
    let expected = model.evaluate(t) * 80.0_f64.ln();
    assert_eq!(model.d_index(t).unwrap(), expected);
    assert_rel_close(model.d_index(t).unwrap(), 3.951_218_383_454_319e-3, 1e-9);
    assert!(model.d_index(TRIGGER).is_err());
}

#[test]
fn index_derivative_vanishes_at_reference_for_rising_index() {
    let model = TemporalDecayModel::new(1.0, TRIGGER, 2.0).unwrap();
    assert_eq!(model.evaluate(TRIGGER), 0.0);
    assert_eq!(model.d_index(TRIGGER).unwrap(), 0.0);
    let model = model.with_t_index(0.5).unwrap();
    assert_eq!(model.d_index(TRIGGER).unwrap(), 0.0);
}

#[test]
fn index_derivative_agrees_with_finite_difference() {
    let model = reference_model();
    let t = TRIGGER + 250.0;
    let h = 1e-6;
    let up = model.with_t_index(-1.6 + h).unwrap().evaluate(t);
    let down = model.with_t_index(-1.6 - h).unwrap().evaluate(t);
    assert_rel_close(model.d_index(t).unwrap(), (up - down) / (2.0 * h), 1e-6);
}
