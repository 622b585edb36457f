use grb_decay::{
    from_json_slice, normalise, to_canonical_json_bytes, NormalisationReport, ObservationWindow,
    TemporalDecayModel, WindowSchedule, REPORT_SCHEMA,
};

fn sample_windows() -> Vec<ObservationWindow> {
    WindowSchedule::default().windows(0.0).unwrap()
}

#[test]
fn report_is_deterministic() {
    let model = TemporalDecayModel::new(1.0, 0.0, -1.6).unwrap();
    let windows = sample_windows();
    let first = normalise(&model, &windows).unwrap();
    let second = normalise(&model, &windows).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.digest.len(), 64);
    assert_eq!(first.schema_version, REPORT_SCHEMA);
    assert_eq!(
        to_canonical_json_bytes(&first).unwrap(),
        to_canonical_json_bytes(&second).unwrap()
    );
}

#[test]
fn digest_tracks_parameters() {
    let model = TemporalDecayModel::new(1.0, 0.0, -1.6).unwrap();
    let windows = sample_windows();
    let base = normalise(&model, &windows).unwrap();
    let other = normalise(&model.with_t_index(-1.7).unwrap(), &windows).unwrap();
    assert_ne!(base.digest, other.digest);
}

#[test]
fn entries_are_bracketed_and_ordered() {
    let model = TemporalDecayModel::new(1.0, 0.0, -1.6).unwrap();
    let windows = sample_windows();
    let report = normalise(&model, &windows).unwrap();
    assert_eq!(report.windows.len(), windows.len());
    for (entry, window) in report.windows.iter().zip(&windows) {
        assert_eq!(entry.t_min, window.t_min);
        assert_eq!(entry.norm, model.integral_window(window).unwrap());
        assert!(entry.bracketed, "{entry:?}");
    }
    for pair in report.windows.windows(2) {
        assert!(pair[1].norm < pair[0].norm);
    }
}

#[test]
fn singular_endpoint_is_recorded_as_missing() {
    let model = TemporalDecayModel::new(1.0, 0.0, -0.5).unwrap();
    let window = ObservationWindow::new(0.0, 4.0).unwrap();
    let report = normalise(&model, &[window]).unwrap();
    let entry = &report.windows[0];
    assert_eq!(entry.f_start, None);
    assert_eq!(entry.f_end, Some(0.5));
    assert!(!entry.bracketed);
}

#[test]
fn failing_window_aborts_report() {
    let model = TemporalDecayModel::new(1.0, 0.0, -1.0).unwrap();
    let err = normalise(&model, &sample_windows()).unwrap_err();
    assert_eq!(err.code(), "index_minus_one");
    assert_eq!(err.info().context["index"], "0");
}

#[test]
fn report_round_trips_through_json() {
    let model = TemporalDecayModel::new(2.0, 50.0, -2.1).unwrap();
    let report = normalise(&model, &WindowSchedule::default().windows(50.0).unwrap()).unwrap();
    let bytes = to_canonical_json_bytes(&report).unwrap();
    let decoded: NormalisationReport = from_json_slice(&bytes).unwrap();
    assert_eq!(decoded, report);
}
