use plotline::transition::{
    Easing, PathTarget, PathTransitionEngine, TransitionConfig, TransitionDecision,
};

fn engine(duration_ms: f64, easing: Easing) -> PathTransitionEngine {
    PathTransitionEngine::new(TransitionConfig {
        duration_ms,
        easing,
    })
    .expect("valid config")
}

fn target(line: &str, period: Option<&str>) -> PathTarget {
    PathTarget {
        line: line.to_owned(),
        area: None,
        period: period.map(str::to_owned),
    }
}

#[test]
fn invalid_duration_is_rejected() {
    let config = TransitionConfig {
        duration_ms: 0.0,
        easing: Easing::Linear,
    };
    assert!(PathTransitionEngine::new(config).is_err());
}

#[test]
fn first_submission_applies_instantly() {
    let mut engine = engine(100.0, Easing::Linear);
    let decision = engine.submit(target("M0 0L10 10", None), None, None);
    let TransitionDecision::Instant(frame) = decision else {
        panic!("first paint should be instant");
    };
    assert_eq!(frame.line, "M0 0L10 10");
    assert!(!engine.is_animating());
}

#[test]
fn identical_consecutive_input_writes_nothing() {
    let mut engine = engine(100.0, Easing::Linear);
    engine.submit(target("M0 0L10 10", None), None, None);

    let decision = engine.submit(target("M0 0L10 10", None), None, None);
    assert_eq!(decision, TransitionDecision::Unchanged);
    assert!(!engine.is_animating());
    assert!(engine.tick(16.0).is_none());
}

#[test]
fn line_change_tweens_between_compatible_paths() {
    let mut engine = engine(100.0, Easing::Linear);
    engine.submit(target("M0 0L10 10", None), None, None);

    let decision = engine.submit(target("M0 20L10 30", None), None, None);
    assert_eq!(decision, TransitionDecision::Animated);
    assert!(engine.is_animating());

    let midpoint = engine.tick(50.0).expect("frame");
    assert_eq!(midpoint.line, "M0 10L10 20");

    let done = engine.tick(50.0).expect("final frame");
    assert_eq!(done.line, "M0 20L10 30");
    assert!(!engine.is_animating());
    assert!(engine.tick(16.0).is_none());
}

#[test]
fn period_change_cuts_instantly() {
    let mut engine = engine(100.0, Easing::Linear);
    engine.submit(target("M0 0L10 10", Some("1W")), None, None);

    let decision = engine.submit(target("M0 20L10 30", Some("1M")), None, None);
    let TransitionDecision::Instant(frame) = decision else {
        panic!("bucket switch must not morph");
    };
    assert_eq!(frame.line, "M0 20L10 30");
    assert!(!engine.is_animating());
}

#[test]
fn fallback_is_replaced_exactly_once_without_animation() {
    let mut engine = engine(100.0, Easing::Linear);
    engine.show_fallback("M0 5L10 5".to_owned(), None);

    let decision = engine.submit(target("M0 0L10 10", None), None, None);
    assert!(matches!(decision, TransitionDecision::Instant(_)));
    assert!(!engine.is_animating());

    // The flag is cleared: the next change animates normally.
    let decision = engine.submit(target("M0 20L10 30", None), None, None);
    assert_eq!(decision, TransitionDecision::Animated);
}

#[test]
fn area_only_change_applies_instantly() {
    let mut engine = engine(100.0, Easing::Linear);
    engine.submit(
        PathTarget {
            line: "M0 0L10 10".to_owned(),
            area: Some("M0 0L10 10L10 40L0 40Z".to_owned()),
            period: None,
        },
        None,
        None,
    );

    let decision = engine.submit(
        PathTarget {
            line: "M0 0L10 10".to_owned(),
            area: Some("M0 0L10 10L10 50L0 50Z".to_owned()),
            period: None,
        },
        None,
        None,
    );
    let TransitionDecision::Instant(frame) = decision else {
        panic!("area-only updates have no line geometry to tween");
    };
    assert_eq!(frame.area.as_deref(), Some("M0 0L10 10L10 50L0 50Z"));
    assert!(!engine.is_animating());
}

#[test]
fn tween_starts_from_the_currently_rendered_path() {
    let mut engine = engine(100.0, Easing::Linear);
    engine.submit(target("M0 0L10 10", None), None, None);
    engine.submit(target("M0 20L10 30", None), None, None);

    // Partway through, new data arrives; the host reports what is
    // actually on screen right now.
    let rendered = engine.tick(25.0).expect("frame");
    let decision = engine.submit(target("M0 40L10 50", None), Some(&rendered.line), None);
    assert_eq!(decision, TransitionDecision::Animated);

    // The superseding tween composes from the rendered frame instead of
    // jumping to the previous target.
    let start = engine.tick(0.0).expect("frame");
    assert_eq!(start.line, rendered.line);

    let done = engine.tick(100.0).expect("final frame");
    assert_eq!(done.line, "M0 40L10 50");
}

#[test]
fn later_submissions_supersede_inflight_tweens() {
    let mut engine = engine(100.0, Easing::Linear);
    engine.submit(target("M0 0L10 10", None), None, None);
    engine.submit(target("M0 20L10 30", None), None, None);
    engine.tick(30.0);

    engine.submit(target("M0 100L10 100", None), None, None);
    let done = engine.tick(100.0).expect("final frame");
    assert_eq!(done.line, "M0 100L10 100");
    assert!(!engine.is_animating());
}

#[test]
fn cancel_stops_the_active_tween() {
    let mut engine = engine(100.0, Easing::Linear);
    engine.submit(target("M0 0L10 10", None), None, None);
    engine.submit(target("M0 20L10 30", None), None, None);
    assert!(engine.is_animating());

    engine.cancel();
    assert!(!engine.is_animating());
    assert!(engine.tick(16.0).is_none());
    // The accepted target sticks even though the tween was stopped.
    assert_eq!(engine.current().expect("target").line, "M0 20L10 30");
}

#[test]
fn structurally_incompatible_paths_cut_instead_of_morphing() {
    let mut engine = engine(100.0, Easing::Linear);
    engine.submit(target("M0 0L10 10", None), None, None);

    let decision = engine.submit(target("M0 0L10 10L20 20", None), None, None);
    let TransitionDecision::Instant(frame) = decision else {
        panic!("mismatched skeletons cannot interpolate");
    };
    assert_eq!(frame.line, "M0 0L10 10L20 20");
    assert!(!engine.is_animating());
}

#[test]
fn easing_endpoints_are_exact() {
    for easing in [Easing::Linear, Easing::EaseInOutCubic] {
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(1.0), 1.0);
        assert!((easing.apply(0.5) - 0.5).abs() <= 1e-12);
    }
    // Out-of-range progress is clamped.
    assert_eq!(Easing::EaseInOutCubic.apply(-1.0), 0.0);
    assert_eq!(Easing::EaseInOutCubic.apply(2.0), 1.0);
}
