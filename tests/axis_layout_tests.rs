use plotline::ChartError;
use plotline::api::{AxisEdge, AxisKind, AxisOverride, ChartView, RegisteredAxis};
use plotline::core::{AxisId, Insets, PlotSize, ScaleType, Series, SeriesPoint};

fn sample_series(id: &str, values: &[f64]) -> Series {
    let points = values
        .iter()
        .enumerate()
        .map(|(index, value)| SeriesPoint::new(index as f64, *value))
        .collect();
    Series::new(id, points)
}

fn claim(id: &str, kind: AxisKind, edge: AxisEdge, size: f64) -> RegisteredAxis {
    RegisteredAxis {
        id: AxisId::new(id),
        kind,
        edge,
        size,
    }
}

#[test]
fn session_before_any_layout_pass_is_a_loud_error() {
    let view = ChartView::new();
    let result = view.session();
    assert!(matches!(result, Err(ChartError::LayoutNotComputed)));
}

#[test]
fn unmeasured_chart_resolves_everything_to_not_ready() {
    let mut view = ChartView::new();
    view.set_series(vec![sample_series("a", &[1.0, 2.0])]);

    let session = view.session().expect("layout computed");
    assert!(!session.plot_rect().is_drawable());
    assert!(session.x_scale().is_none());
    assert!(session.default_y_scale().is_none());
}

#[test]
fn padding_accumulation_is_order_independent() {
    let mut forward = ChartView::new();
    let mut reversed = ChartView::new();
    for view in [&mut forward, &mut reversed] {
        view.measure(PlotSize::new(800.0, 400.0));
        view.set_series(vec![sample_series("a", &[1.0, 2.0])]);
    }

    forward
        .register_axis(claim("a", AxisKind::Y, AxisEdge::Start, 20.0))
        .expect("register a");
    forward
        .register_axis(claim("b", AxisKind::Y, AxisEdge::Start, 30.0))
        .expect("register b");

    reversed
        .register_axis(claim("b", AxisKind::Y, AxisEdge::Start, 30.0))
        .expect("register b");
    reversed
        .register_axis(claim("a", AxisKind::Y, AxisEdge::Start, 20.0))
        .expect("register a");

    for view in [&forward, &reversed] {
        assert_eq!(
            view.registry().edge_padding(AxisKind::Y, AxisEdge::Start),
            50.0
        );
        let session = view.session().expect("session");
        assert_eq!(session.plot_rect().x, 50.0);
        assert_eq!(session.plot_rect().width, 750.0);

        let a = session.axis_bounds(&AxisId::new("a")).expect("a bounds");
        let b = session.axis_bounds(&AxisId::new("b")).expect("b bounds");
        assert_eq!(a.x, 0.0);
        assert_eq!(a.width, 20.0);
        assert_eq!(b.x, 20.0);
        assert_eq!(b.width, 30.0);
    }
}

#[test]
fn unregistering_releases_the_claimed_padding() {
    let mut view = ChartView::new();
    view.measure(PlotSize::new(800.0, 400.0));
    view.set_series(vec![sample_series("a", &[1.0, 2.0])]);
    view.register_axis(claim("left", AxisKind::Y, AxisEdge::Start, 40.0))
        .expect("register");

    assert_eq!(view.session().expect("session").plot_rect().x, 40.0);

    assert!(view.unregister_axis(&AxisId::new("left")));
    let session = view.session().expect("session");
    assert_eq!(session.plot_rect().x, 0.0);
    assert!(session.axis_bounds(&AxisId::new("left")).is_none());
}

#[test]
fn decorations_on_every_edge_shrink_the_plot_rect() {
    let mut view = ChartView::new();
    view.measure(PlotSize::new(800.0, 400.0));
    view.set_series(vec![sample_series("a", &[1.0, 2.0])]);
    view.set_outer_padding(Insets::uniform(10.0))
        .expect("padding");
    view.register_axis(claim("left", AxisKind::Y, AxisEdge::Start, 40.0))
        .expect("register");
    view.register_axis(claim("right", AxisKind::Y, AxisEdge::End, 30.0))
        .expect("register");
    view.register_axis(claim("bottom", AxisKind::X, AxisEdge::End, 24.0))
        .expect("register");

    let session = view.session().expect("session");
    let rect = session.plot_rect();
    assert_eq!(rect.x, 50.0);
    assert_eq!(rect.y, 10.0);
    assert_eq!(rect.width, 800.0 - 50.0 - 40.0);
    assert_eq!(rect.height, 400.0 - 10.0 - 34.0);

    let right = session.axis_bounds(&AxisId::new("right")).expect("bounds");
    assert_eq!(right.x, rect.right());
    let bottom = session.axis_bounds(&AxisId::new("bottom")).expect("bounds");
    assert_eq!(bottom.y, rect.bottom());
    assert_eq!(bottom.width, rect.width);
}

#[test]
fn oversized_decorations_clamp_the_rect_to_zero() {
    let mut view = ChartView::new();
    view.measure(PlotSize::new(100.0, 100.0));
    view.set_series(vec![sample_series("a", &[1.0, 2.0])]);
    view.register_axis(claim("huge", AxisKind::Y, AxisEdge::Start, 500.0))
        .expect("register");

    let session = view.session().expect("session");
    assert_eq!(session.plot_rect().width, 0.0);
    assert!(session.x_scale().is_none());
    assert!(session.axis_bounds(&AxisId::new("huge")).is_none());
}

#[test]
fn y_range_is_inverted_relative_to_x() {
    let mut view = ChartView::new();
    view.measure(PlotSize::new(500.0, 300.0));
    view.set_series(vec![sample_series("a", &[0.0, 100.0])]);

    let session = view.session().expect("session");
    let x = session.x_scale().expect("x scale").as_linear().expect("linear");
    assert_eq!(x.range(), (0.0, 500.0));

    let y = session
        .default_y_scale()
        .expect("y scale")
        .as_linear()
        .expect("linear");
    assert_eq!(y.range(), (300.0, 0.0));
    // Larger values sit higher on screen.
    assert!(y.position(100.0) < y.position(0.0));
}

#[test]
fn series_domains_fold_across_assigned_series() {
    let mut view = ChartView::new();
    view.measure(PlotSize::new(500.0, 300.0));
    view.configure_y_axis("volume", AxisOverride::default())
        .expect("configure");
    view.set_series(vec![
        sample_series("a", &[5.0, 15.0]),
        sample_series("b", &[-5.0, 8.0]),
        sample_series("vol", &[100.0, 900.0]).with_y_axis("volume"),
    ]);

    let session = view.session().expect("session");
    let default_domain = session
        .default_y_scale()
        .expect("default scale")
        .as_linear()
        .expect("linear")
        .domain();
    assert_eq!(default_domain, (-5.0, 15.0));

    let volume_domain = session
        .y_scale(&AxisId::new("volume"))
        .expect("volume scale")
        .as_linear()
        .expect("linear")
        .domain();
    assert_eq!(volume_domain, (100.0, 900.0));
}

#[test]
fn unknown_axis_reference_falls_back_to_the_default() {
    let mut view = ChartView::new();
    view.measure(PlotSize::new(500.0, 300.0));
    view.set_series(vec![
        sample_series("a", &[0.0, 10.0]),
        sample_series("stray", &[50.0, 60.0]).with_y_axis("never-configured"),
    ]);

    let session = view.session().expect("session");
    let domain = session
        .default_y_scale()
        .expect("default scale")
        .as_linear()
        .expect("linear")
        .domain();
    // The stray series contributes to the default domain instead of
    // failing the chart.
    assert_eq!(domain, (0.0, 60.0));
}

#[test]
fn axis_without_assigned_series_has_no_scale() {
    let mut view = ChartView::new();
    view.measure(PlotSize::new(500.0, 300.0));
    view.configure_y_axis("empty", AxisOverride::default())
        .expect("configure");
    view.set_series(vec![sample_series("a", &[1.0, 2.0])]);

    let session = view.session().expect("session");
    let axis = session.y_axis(&AxisId::new("empty")).expect("axis listed");
    assert!(axis.scale.is_none());
    assert!(axis.config.domain.is_none());
}

#[test]
fn explicit_domain_override_wins_over_data() {
    let mut view = ChartView::new();
    view.measure(PlotSize::new(500.0, 300.0));
    view.configure_y_axis(
        AxisId::default_y(),
        AxisOverride {
            domain: Some((0.0, 100.0)),
            ..AxisOverride::default()
        },
    )
    .expect("configure");
    view.set_series(vec![sample_series("a", &[40.0, 60.0])]);

    let session = view.session().expect("session");
    let domain = session
        .default_y_scale()
        .expect("scale")
        .as_linear()
        .expect("linear")
        .domain();
    assert_eq!(domain, (0.0, 100.0));
}

#[test]
fn categorical_x_axis_uses_category_count() {
    let mut view = ChartView::new();
    view.measure(PlotSize::new(600.0, 300.0));
    view.configure_x_axis(AxisOverride {
        scale_type: Some(ScaleType::Band),
        categories: Some(vec!["Q1".into(), "Q2".into(), "Q3".into()]),
        ..AxisOverride::default()
    })
    .expect("configure");
    view.set_series(vec![sample_series("a", &[1.0, 2.0, 3.0])]);

    let session = view.session().expect("session");
    let band = session.x_scale().expect("x scale").as_band().expect("band");
    assert_eq!(band.len(), 3);
    assert_eq!(
        session.x_axis().category_labels().map(<[String]>::len),
        Some(3)
    );
}

#[test]
fn linear_axis_exposes_tick_values() {
    let mut view = ChartView::new();
    view.measure(PlotSize::new(500.0, 300.0));
    view.set_series(vec![sample_series("a", &[0.0, 10.0])]);

    let session = view.session().expect("session");
    let ticks = session
        .y_axis(&AxisId::default_y())
        .expect("axis")
        .ticks(5)
        .expect("ticks");
    assert!(!ticks.is_empty());
    assert!(ticks.iter().all(|tick| (0.0..=10.0).contains(tick)));
}
