use csvchart::app::{ViewerApp, READ_ERROR_NOTICE};
use csvchart::config::ViewerConfig;
use csvchart::data::hotkeys::HotkeyName;
use csvchart::data::interaction::{ViewEvent, ZoomDirection};
use csvchart::data::view::{AxisId, AxisRange, DragMode, LayoutMode};
use csvchart::host::HostShell;
use csvchart::panels::ChartAction;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(5);

#[derive(Default)]
struct FakeHost {
    files: HashMap<PathBuf, String>,
    prompt: Option<PathBuf>,
    prompts: AtomicUsize,
}

impl FakeHost {
    fn with_file(mut self, path: &str, text: &str) -> Self {
        self.files.insert(PathBuf::from(path), text.to_string());
        self
    }
}

impl HostShell for FakeHost {
    fn open_file_prompt(&self) -> Option<PathBuf> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        self.prompt.clone()
    }

    fn read_file(&self, path: &Path) -> Option<String> {
        self.files.get(path).cloned()
    }
}

fn app_with(host: FakeHost) -> (ViewerApp, Arc<FakeHost>) {
    let host = Arc::new(host);
    let app = ViewerApp::new(ViewerConfig::default(), host.clone());
    (app, host)
}

#[test]
fn opening_a_file_creates_an_active_tab() {
    let (mut app, _) = app_with(FakeHost::default().with_file("/data/a.csv", "t,v\n0,1\n1,2\n"));
    app.open_path(PathBuf::from("/data/a.csv"));
    assert!(app.wait_for_load(WAIT));
    let tab = app.store().active().unwrap();
    assert_eq!(tab.display_name, "a.csv");
    assert_eq!(tab.series.len(), 1);
    assert!(app.notices().is_empty());
}

#[test]
fn unreadable_and_empty_files_show_a_notice() {
    let (mut app, _) = app_with(FakeHost::default().with_file("/data/empty.csv", ""));
    app.open_path(PathBuf::from("/data/missing.csv"));
    assert!(app.wait_for_load(WAIT));
    app.open_path(PathBuf::from("/data/empty.csv"));
    assert!(app.wait_for_load(WAIT));
    assert!(app.store().is_empty());
    let texts: Vec<_> = app.notices().iter().map(|n| n.text.clone()).collect();
    assert_eq!(texts, vec![READ_ERROR_NOTICE, READ_ERROR_NOTICE]);
}

#[test]
fn menu_trigger_runs_the_host_prompt() {
    let host = FakeHost {
        prompt: Some(PathBuf::from("/data/b.csv")),
        ..FakeHost::default()
    }
    .with_file("/data/b.csv", "x,y1,y2\n0,1,2\n");
    let (mut app, host) = app_with(host);

    app.handle_open_requests();
    assert_eq!(host.prompts.load(Ordering::SeqCst), 0);

    app.menu_controller().trigger_open_csv();
    app.handle_open_requests();
    assert_eq!(host.prompts.load(Ordering::SeqCst), 1);
    assert!(app.wait_for_load(WAIT));
    assert_eq!(app.store().active().unwrap().series.len(), 2);
}

#[test]
fn cancelled_prompt_opens_nothing() {
    let (mut app, host) = app_with(FakeHost::default());
    app.apply_action(ChartAction::OpenCsv);
    app.handle_open_requests();
    assert_eq!(host.prompts.load(Ordering::SeqCst), 1);
    assert!(!app.wait_for_load(Duration::from_millis(50)));
}

fn loaded_app() -> ViewerApp {
    let (mut app, _) = app_with(FakeHost::default().with_file("/d/c.csv", "t,a,b\n0,1,2\n1,3,4\n"));
    app.open_path(PathBuf::from("/d/c.csv"));
    assert!(app.wait_for_load(WAIT));
    app
}

#[test]
fn view_actions_reach_the_active_tab() {
    let mut app = loaded_app();
    app.apply_action(ChartAction::View(ViewEvent::RangeChanged {
        axis: AxisId::X,
        range: AxisRange::new(0.0, 0.5),
    }));
    app.apply_action(ChartAction::View(ViewEvent::SetLayoutMode(LayoutMode::Stacked)));
    let view = &app.store().active().unwrap().view_state;
    assert_eq!(view.layout_mode, LayoutMode::Stacked);
    assert_eq!(view.range_of(AxisId::X), Some(AxisRange::new(0.0, 0.5)));
}

#[test]
fn toolbar_zoom_before_first_draw_does_nothing() {
    let mut app = loaded_app();
    let before = app.store().active().unwrap().view_state.clone();
    app.apply_action(ChartAction::Zoom(ZoomDirection::In));
    assert_eq!(app.store().active().unwrap().view_state, before);
}

#[test]
fn hotkeys_map_to_actions() {
    let app = loaded_app();
    let actions = app.actions_for_hotkeys(&[HotkeyName::ToggleLayout, HotkeyName::BoxZoom, HotkeyName::ZoomOut]);
    assert_eq!(
        actions,
        vec![
            ChartAction::View(ViewEvent::SetLayoutMode(LayoutMode::Stacked)),
            ChartAction::View(ViewEvent::SetDragMode(DragMode::BoxZoom)),
            ChartAction::Zoom(ZoomDirection::Out),
        ]
    );
    let id = app.store().active_id().cloned().unwrap();
    assert_eq!(app.actions_for_hotkeys(&[HotkeyName::CloseTab]), vec![ChartAction::CloseTab(id)]);
}

#[test]
fn tab_only_hotkeys_are_dropped_without_tabs() {
    let (app, _) = app_with(FakeHost::default());
    assert!(app
        .actions_for_hotkeys(&[HotkeyName::CloseTab, HotkeyName::ToggleLayout, HotkeyName::FitToScreen])
        .is_empty());
}

#[test]
fn momentary_box_zoom_follows_key_transitions() {
    let mut app = loaded_app();
    app.set_box_zoom_held(true);
    assert_eq!(app.store().active().unwrap().view_state.drag_mode, DragMode::BoxZoom);
    app.apply_action(ChartAction::View(ViewEvent::SetDragMode(DragMode::Pan)));
    // Still held: no new transition, the explicit mode stays.
    app.set_box_zoom_held(true);
    assert_eq!(app.store().active().unwrap().view_state.drag_mode, DragMode::Pan);
    app.set_box_zoom_held(false);
    assert_eq!(app.store().active().unwrap().view_state.drag_mode, DragMode::Pan);
}

#[test]
fn closing_the_active_tab_via_action() {
    let mut app = loaded_app();
    let id = app.store().active_id().cloned().unwrap();
    app.apply_action(ChartAction::CloseTab(id));
    assert!(app.store().is_empty());
    assert!(app.store().active().is_none());
}

#[test]
fn box_zoom_release_goes_to_the_tab_that_saw_the_press() {
    let (mut app, _) = app_with(
        FakeHost::default()
            .with_file("/d/one.csv", "t,a\n0,1\n")
            .with_file("/d/two.csv", "t,b\n0,1\n"),
    );
    app.open_path(PathBuf::from("/d/one.csv"));
    assert!(app.wait_for_load(WAIT));
    app.open_path(PathBuf::from("/d/two.csv"));
    assert!(app.wait_for_load(WAIT));
    let first = app.store().tabs()[0].id.clone();
    let second = app.store().tabs()[1].id.clone();

    app.apply_action(ChartAction::ActivateTab(first.clone()));
    app.set_box_zoom_held(true);
    app.apply_action(ChartAction::ActivateTab(second.clone()));
    app.set_box_zoom_held(false);

    let mode = |id: &csvchart::TabId| app.store().get(id).unwrap().view_state.drag_mode;
    assert_eq!(mode(&first), DragMode::Pan);
    assert_eq!(mode(&second), DragMode::Pan);
}

#[test]
fn reset_hotkeys_action_restores_defaults() {
    let mut config = ViewerConfig::default();
    config.hotkeys.zoom_in = None;
    let mut app = ViewerApp::new(config, Arc::new(FakeHost::default()));
    app.apply_action(ChartAction::ResetHotkeys);
    assert_eq!(app.config().hotkeys, ViewerConfig::default().hotkeys);
}

#[test]
fn save_settings_action_writes_the_config_file() {
    let dir = std::env::temp_dir().join(format!("csvchart-app-{}", std::process::id()));
    let path = dir.join("settings.yaml");
    let (mut app, _) = app_with(FakeHost::default());
    app.set_settings_path(path.clone());
    app.apply_action(ChartAction::SaveSettings);
    assert!(app.notices().is_empty());
    assert_eq!(ViewerConfig::load_from(&path).unwrap(), *app.config());
    let _ = std::fs::remove_dir_all(dir);
}
