use csvchart::data::interaction::*;
use csvchart::data::series::Series;
use csvchart::data::view::{AxisId, AxisRange, AxisSide, DragMode, LayoutMode, ViewState};

fn two_series() -> Vec<Series> {
    vec![
        Series::from_numbers("a", &[0.0, 1.0], &[1.0, 2.0]),
        Series::from_numbers("b", &[0.0, 1.0], &[3.0, 4.0]),
    ]
}

fn approx(a: AxisRange, b: AxisRange) -> bool {
    (a.min - b.min).abs() < 1e-9 && (a.max - b.max).abs() < 1e-9
}

#[test]
fn zoom_scales_about_the_midpoint() {
    let r = AxisRange::new(0.0, 10.0);
    assert!(approx(scale_range(r, 0.8), AxisRange::new(1.0, 9.0)));
    assert!(approx(scale_range(r, 1.25), AxisRange::new(-1.25, 11.25)));
}

#[test]
fn zoom_event_pins_the_scaled_range() {
    let series = two_series();
    let view = ViewState::for_series(&series);
    let next = reduce(
        &view,
        &series,
        &ViewEvent::Zoom {
            direction: ZoomDirection::In,
            axis: AxisId::X,
            current: AxisRange::new(2.0, 4.0),
        },
    );
    assert!(approx(next.range_of(AxisId::X).unwrap(), AxisRange::new(2.2, 3.8)));
    assert_eq!(next.range_of(AxisId::Y), None);
    assert!(view.axis_ranges.is_empty());
}

#[test]
fn zoom_in_then_out_restores_range_up_to_rounding() {
    let series = two_series();
    let view = ViewState::for_series(&series);
    let start = AxisRange::new(-3.7, 12.9);
    let zoomed = reduce(
        &view,
        &series,
        &ViewEvent::Zoom {
            direction: ZoomDirection::In,
            axis: AxisId::Y,
            current: start,
        },
    );
    let back = reduce(
        &zoomed,
        &series,
        &ViewEvent::Zoom {
            direction: ZoomDirection::Out,
            axis: AxisId::Y,
            current: zoomed.range_of(AxisId::Y).unwrap(),
        },
    );
    assert!(approx(back.range_of(AxisId::Y).unwrap(), start));
}

#[test]
fn custom_zoom_factors_are_used() {
    let series = two_series();
    let zoom = ZoomSettings {
        zoom_in_factor: 0.5,
        zoom_out_factor: 2.0,
    };
    let next = reduce_with(
        &ViewState::for_series(&series),
        &series,
        &ViewEvent::Zoom {
            direction: ZoomDirection::In,
            axis: AxisId::X,
            current: AxisRange::new(0.0, 8.0),
        },
        &zoom,
    );
    assert!(approx(next.range_of(AxisId::X).unwrap(), AxisRange::new(2.0, 6.0)));
}

#[test]
fn reset_clears_all_ranges() {
    let series = two_series();
    let mut view = ViewState::for_series(&series);
    view.axis_ranges.insert(AxisId::X, AxisRange::new(0.0, 1.0));
    view.axis_ranges.insert(AxisId::Y2, AxisRange::new(0.0, 1.0));
    let next = reduce(&view, &series, &ViewEvent::ResetZoom);
    assert!(next.axis_ranges.is_empty());
}

#[test]
fn assign_secondary_moves_second_series_only() {
    let series = two_series();
    let view = ViewState::for_series(&series);
    let once = reduce(&view, &series, &ViewEvent::AssignSecondaryAxis);
    assert_eq!(once.side_of("a"), AxisSide::Primary);
    assert_eq!(once.side_of("b"), AxisSide::Secondary);
    let twice = reduce(&once, &series, &ViewEvent::AssignSecondaryAxis);
    assert_eq!(once, twice);
}

#[test]
fn assign_secondary_is_a_no_op_with_one_series_or_stacked() {
    let one = vec![Series::from_numbers("a", &[0.0], &[1.0])];
    let view = ViewState::for_series(&one);
    assert_eq!(reduce(&view, &one, &ViewEvent::AssignSecondaryAxis), view);

    let series = two_series();
    let stacked = reduce(
        &ViewState::for_series(&series),
        &series,
        &ViewEvent::SetLayoutMode(LayoutMode::Stacked),
    );
    assert_eq!(reduce(&stacked, &series, &ViewEvent::AssignSecondaryAxis), stacked);
}

#[test]
fn layout_switch_keeps_ranges() {
    let series = two_series();
    let mut view = ViewState::for_series(&series);
    view.axis_ranges.insert(AxisId::X, AxisRange::new(0.0, 1.0));
    let next = reduce(&view, &series, &ViewEvent::SetLayoutMode(LayoutMode::Stacked));
    assert_eq!(next.layout_mode, LayoutMode::Stacked);
    assert_eq!(next.axis_ranges, view.axis_ranges);
}

#[test]
fn momentary_box_zoom_press_and_release() {
    let series = two_series();
    let view = ViewState::for_series(&series);
    let held = reduce(&view, &series, &ViewEvent::MomentaryBoxZoom { held: true });
    assert_eq!(held.drag_mode, DragMode::BoxZoom);
    let again = reduce(&held, &series, &ViewEvent::MomentaryBoxZoom { held: true });
    assert_eq!(again, held);
    let released = reduce(&held, &series, &ViewEvent::MomentaryBoxZoom { held: false });
    assert_eq!(released.drag_mode, DragMode::Pan);
    let stray = reduce(&released, &series, &ViewEvent::MomentaryBoxZoom { held: false });
    assert_eq!(stray, released);
}

#[test]
fn range_changes_are_normalised() {
    let series = two_series();
    let view = ViewState::for_series(&series);
    let inverted = reduce(
        &view,
        &series,
        &ViewEvent::RangeChanged {
            axis: AxisId::X,
            range: AxisRange::new(5.0, 1.0),
        },
    );
    assert_eq!(inverted.range_of(AxisId::X), Some(AxisRange::new(1.0, 5.0)));

    for bad in [
        AxisRange::new(f64::NAN, 1.0),
        AxisRange::new(0.0, f64::INFINITY),
        AxisRange::new(2.0, 2.0),
    ] {
        let next = reduce(&view, &series, &ViewEvent::RangeChanged { axis: AxisId::Y, range: bad });
        assert_eq!(next, view);
    }
}

fn wheel(delta: f64, x_only: bool, y_only: bool) -> WheelInput {
    WheelInput {
        delta,
        modifiers: WheelModifiers { x_only, y_only },
        x: Some((AxisId::X, AxisRange::new(0.0, 10.0))),
        y: Some((AxisId::Y, AxisRange::new(0.0, 100.0))),
    }
}

#[test]
fn wheel_without_modifiers_zooms_both_axes() {
    let series = two_series();
    let next = reduce(&ViewState::for_series(&series), &series, &ViewEvent::Wheel(wheel(-1.0, false, false)));
    assert!(approx(next.range_of(AxisId::X).unwrap(), AxisRange::new(1.0, 9.0)));
    assert!(approx(next.range_of(AxisId::Y).unwrap(), AxisRange::new(10.0, 90.0)));
}

#[test]
fn wheel_modifiers_restrict_to_one_axis() {
    let x_only = wheel_zoom_events(&wheel(1.0, true, false));
    assert_eq!(x_only.len(), 1);
    assert!(matches!(
        x_only[0],
        ViewEvent::Zoom { direction: ZoomDirection::Out, axis: AxisId::X, .. }
    ));

    let y_only = wheel_zoom_events(&wheel(-1.0, false, true));
    assert_eq!(y_only.len(), 1);
    assert!(matches!(
        y_only[0],
        ViewEvent::Zoom { direction: ZoomDirection::In, axis: AxisId::Y, .. }
    ));

    let both_held = wheel_zoom_events(&wheel(-1.0, true, true));
    assert_eq!(both_held.len(), 1);
}

#[test]
fn zero_wheel_delta_does_nothing() {
    let series = two_series();
    let view = ViewState::for_series(&series);
    assert!(wheel_zoom_events(&wheel(0.0, false, false)).is_empty());
    assert_eq!(reduce(&view, &series, &ViewEvent::Wheel(wheel(0.0, false, false))), view);
}

#[test]
fn toolbar_zoom_covers_every_listed_axis() {
    let axes = [
        (AxisId::X, AxisRange::new(0.0, 1.0)),
        (AxisId::Y, AxisRange::new(0.0, 2.0)),
    ];
    let events = toolbar_zoom_events(ZoomDirection::Out, &axes);
    assert_eq!(events.len(), 2);
    assert!(toolbar_zoom_events(ZoomDirection::In, &[]).is_empty());
}
