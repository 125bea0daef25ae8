//! Window registry and configuration.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use veneer::backend::{Backend, HeadlessBackend};
use veneer::{Application, StatusBar, TreeView, VeneerConfig, VeneerError, Widget, events};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_make_window_generates_sequential_ids() {
    init_tracing();
    let backend: Backend = Arc::new(HeadlessBackend::new());
    let app = Application::new(backend, VeneerConfig::default());

    let first = app.make_window("one", None).unwrap();
    let second = app.make_window("two", None).unwrap();

    assert_eq!(first.window_id().as_deref(), Some("win0"));
    assert_eq!(second.window_id().as_deref(), Some("win1"));
    assert!(matches!(app.get_window("win7"), Err(VeneerError::NotFound(_))));
}

#[test]
fn test_closed_window_stays_registered_until_removed() {
    init_tracing();
    let headless = Arc::new(HeadlessBackend::new());
    let app = Application::new(headless.clone(), VeneerConfig::default());
    let window = app.make_window("main", Some("main")).unwrap();

    let closed = Arc::new(AtomicUsize::new(0));
    let closed_clone = closed.clone();
    let app_clone = app.clone();
    window
        .add_callback(events::CLOSED, move |_| {
            closed_clone.fetch_add(1, Ordering::SeqCst);
            assert!(app_clone.has_window("main"));
            Ok(())
        })
        .unwrap();

    headless.request_close(window.native_id()).unwrap();
    assert_eq!(closed.load(Ordering::SeqCst), 1);
    assert!(app.has_window("main"));

    app.remove_window("main").unwrap();
    assert_eq!(app.window_ids(), Vec::<String>::new());
}

#[test]
fn test_config_file_drives_defaults() {
    init_tracing();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        status_clear_delay_ms = 2000
        window_id_prefix = "view"

        [tree_view]
        sortable = true
        "#
    )
    .unwrap();
    let config = VeneerConfig::load(file.path()).unwrap();

    let headless = Arc::new(HeadlessBackend::new());
    let backend: Backend = headless.clone();
    let app = Application::new(backend.clone(), config);

    let window = app.make_window("main", None).unwrap();
    assert_eq!(window.window_id().as_deref(), Some("view0"));

    let tree = TreeView::from_config(&backend, app.config());
    assert!(tree.is_sortable());

    let status = StatusBar::with_delay(&backend, app.config().status_clear_delay());
    status.set_message("saved").unwrap();
    headless.advance(Duration::from_secs(2));
    assert_eq!(status.get_message().unwrap(), "");
}

#[test]
fn test_missing_config_file() {
    let err = VeneerConfig::load("/nonexistent/veneer.toml").unwrap_err();
    assert!(matches!(err, VeneerError::ConfigIo { .. }));
}
