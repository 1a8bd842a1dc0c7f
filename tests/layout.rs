use csvchart::data::interaction::{reduce, ViewEvent};
use csvchart::data::layout::*;
use csvchart::data::series::Series;
use csvchart::data::tabs::Tab;
use csvchart::data::view::{AxisId, AxisRange, LayoutMode};
use csvchart::ingest;

fn tab_with(n: usize) -> Tab {
    let series = (0..n)
        .map(|i| Series::from_numbers(format!("s{i}"), &[0.0, 1.0, 2.0], &[i as f64, 1.0, 2.0]))
        .collect();
    Tab::new("/data/run.csv", series, "time")
}

fn stacked(mut tab: Tab, fit: bool) -> Tab {
    tab.view_state = reduce(
        &tab.view_state,
        &tab.series,
        &ViewEvent::SetLayoutMode(LayoutMode::Stacked),
    );
    tab.view_state = reduce(&tab.view_state, &tab.series, &ViewEvent::SetFitToScreen(fit));
    tab
}

#[test]
fn derivation_is_deterministic() {
    let mut tab = tab_with(3);
    tab.view_state.axis_ranges.insert(AxisId::X, AxisRange::new(0.5, 1.5));
    let a = derive_render_spec(&tab, 600.0).to_json().unwrap();
    let b = derive_render_spec(&tab, 600.0).to_json().unwrap();
    assert_eq!(a, b);

    let tab = stacked(tab, false);
    assert_eq!(derive_render_spec(&tab, 600.0), derive_render_spec(&tab, 600.0));
}

#[test]
fn example_file_renders_both_traces_on_primary_axis() {
    let ingested = ingest("t,a,b\n0,1,4\n1,2,5\n2,3,6\n").unwrap();
    let tab = Tab::new("example.csv", ingested.series, &ingested.x_column_name);
    let spec = derive_render_spec(&tab, 500.0);

    assert_eq!(spec.traces.len(), 2);
    assert!(spec.traces.iter().all(|t| t.y_axis == AxisId::Y && t.x_axis == AxisId::X));
    assert!(spec.layout.axis(AxisId::Y2).is_none());
    assert_eq!(spec.layout.title, "Chart for example.csv");
    assert_eq!(spec.layout.axis(AxisId::X).unwrap().title, "t");
    assert_eq!(spec.layout.axis(AxisId::Y).unwrap().title, "Value");
    assert_eq!(spec.layout.height, 500.0);
    assert!(spec.layout.grid.is_none());
    assert!(spec.layout.show_legend);
}

#[test]
fn secondary_axis_overlays_on_the_right() {
    let mut tab = tab_with(2);
    tab.view_state = reduce(&tab.view_state, &tab.series, &ViewEvent::AssignSecondaryAxis);
    let spec = derive_render_spec(&tab, 400.0);
    assert_eq!(spec.traces[0].y_axis, AxisId::Y);
    assert_eq!(spec.traces[1].y_axis, AxisId::Y2);

    let y2 = spec.layout.axis(AxisId::Y2).unwrap();
    assert_eq!(y2.title, "Secondary Value");
    assert_eq!(y2.overlaying, Some(AxisId::Y));
    assert_eq!(y2.side, Some(AxisEdge::Right));

    let json = spec.to_json().unwrap();
    assert!(json.contains("\"yaxis2\""));
    assert!(json.contains("\"overlaying\":\"y\""));
}

#[test]
fn stacked_panel_count_matches_series() {
    for n in 1..=4 {
        let spec_tab = stacked(tab_with(n), false);
        let spec = derive_render_spec(&spec_tab, 300.0);
        assert_eq!(spec.panel_count(), n);
        assert_eq!(spec.traces.len(), n);
        let grid = spec.layout.grid.as_ref().unwrap();
        assert_eq!((grid.rows, grid.columns, grid.pattern), (n, 1, "independent"));
    }
}

#[test]
fn stacked_traces_use_their_own_axis_pair() {
    let tab = stacked(tab_with(3), false);
    let spec = derive_render_spec(&tab, 300.0);
    for (i, t) in spec.traces.iter().enumerate() {
        assert_eq!(t.x_axis, AxisId::x_for_panel(i));
        assert_eq!(t.y_axis, AxisId::y_for_panel(i));
    }
    assert_eq!(spec.traces[2].x_axis.name(), "x3");
}

#[test]
fn stacked_x_axes_follow_the_first_panel() {
    let tab = stacked(tab_with(3), false);
    let spec = derive_render_spec(&tab, 300.0);
    assert_eq!(spec.layout.axis(AxisId::X).unwrap().matches, None);
    for i in 1..3 {
        let x = spec.layout.axis(AxisId::x_for_panel(i)).unwrap();
        assert_eq!(x.matches, Some(AxisId::X));
    }
    assert!(spec.to_json().unwrap().contains("\"matches\":\"x\""));
}

#[test]
fn stacked_with_zero_series_is_empty_but_valid() {
    let tab = stacked(tab_with(0), false);
    let spec = derive_render_spec(&tab, 300.0);
    assert!(spec.traces.is_empty());
    assert_eq!(spec.panel_count(), 0);
    assert_eq!(spec.layout.height, 300.0);
    assert!(spec.to_json().is_ok());
}

#[test]
fn stacked_height_depends_on_fit() {
    let spec_tab = stacked(tab_with(3), false);
    assert_eq!(derive_render_spec(&spec_tab, 500.0).layout.height, 720.0);
    let fit_tab = stacked(tab_with(3), true);
    assert_eq!(derive_render_spec(&fit_tab, 500.0).layout.height, 500.0);
}

#[test]
fn fit_to_screen_hides_titles_and_inner_tick_labels() {
    let tab = stacked(tab_with(3), true);
    let spec = derive_render_spec(&tab, 500.0);
    for i in 0..3 {
        let y = spec.layout.axis(AxisId::y_for_panel(i)).unwrap();
        assert_eq!(y.title, "");
        let x = spec.layout.axis(AxisId::x_for_panel(i)).unwrap();
        assert_eq!(x.shows_tick_labels(), i == 2);
    }

    let tab = stacked(tab_with(3), false);
    let spec = derive_render_spec(&tab, 500.0);
    for i in 0..3 {
        assert_eq!(spec.layout.axis(AxisId::y_for_panel(i)).unwrap().title, format!("s{i}"));
        assert!(spec.layout.axis(AxisId::x_for_panel(i)).unwrap().shows_tick_labels());
    }
}

#[test]
fn pinned_ranges_show_up_and_reset_restores_autorange() {
    let tab = tab_with(2);
    let mut view = reduce(
        &tab.view_state,
        &tab.series,
        &ViewEvent::RangeChanged {
            axis: AxisId::X,
            range: AxisRange::new(0.2, 1.2),
        },
    );
    view = reduce(
        &view,
        &tab.series,
        &ViewEvent::RangeChanged {
            axis: AxisId::Y,
            range: AxisRange::new(-1.0, 3.0),
        },
    );
    let pinned = Tab {
        view_state: view.clone(),
        ..tab.clone()
    };
    let spec = derive_render_spec(&pinned, 400.0);
    let x = spec.layout.axis(AxisId::X).unwrap();
    assert!(!x.autorange);
    assert_eq!(x.range, Some([0.2, 1.2]));

    for mode in [LayoutMode::Combined, LayoutMode::Stacked] {
        let mut reset = reduce(&view, &tab.series, &ViewEvent::ResetZoom);
        reset = reduce(&reset, &tab.series, &ViewEvent::SetLayoutMode(mode));
        let reset_tab = Tab {
            view_state: reset,
            ..tab.clone()
        };
        let spec = derive_render_spec(&reset_tab, 400.0);
        assert!(!spec.layout.axes.is_empty());
        for axis in spec.layout.axes.values() {
            assert!(axis.autorange);
            assert_eq!(axis.range, None);
        }
    }
}

#[test]
fn drag_mode_is_reported_in_the_layout() {
    let tab = tab_with(1);
    assert_eq!(derive_render_spec(&tab, 300.0).layout.drag_mode, "pan");
    let mut boxed = tab.clone();
    boxed.view_state = reduce(
        &tab.view_state,
        &tab.series,
        &ViewEvent::MomentaryBoxZoom { held: true },
    );
    assert_eq!(derive_render_spec(&boxed, 300.0).layout.drag_mode, "zoom");
}

#[test]
fn custom_settings_change_panel_height_and_mode() {
    let tab = stacked(tab_with(2), false);
    let settings = LayoutSettings {
        panel_height: 100.0,
        trace_mode: TraceMode::LinesMarkers,
        ..Default::default()
    };
    let spec = derive_render_spec_with(&tab, 500.0, &settings);
    assert_eq!(spec.layout.height, 200.0);
    assert!(spec.traces.iter().all(|t| t.mode.draws_markers() && t.mode.draws_lines()));
    assert!(spec.to_json().unwrap().contains("\"lines+markers\""));
}
