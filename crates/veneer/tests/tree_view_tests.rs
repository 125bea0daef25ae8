//! Tree view selection and sorting through the public surface.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::json;
use veneer::backend::{Backend, HeadlessBackend};
use veneer::{EventArgs, TreeView, Widget, events};

fn setup() -> (Arc<HeadlessBackend>, Backend) {
    let headless = Arc::new(HeadlessBackend::new());
    let backend: Backend = headless.clone();
    (headless, backend)
}

fn selections(view: &TreeView) -> Arc<Mutex<Vec<(String, String)>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    view.add_callback(events::SELECTED, move |args| {
        if let EventArgs::Selection { group, item } = args {
            seen_clone.lock().push((group.clone(), item.clone()));
        }
        Ok(())
    })
    .unwrap();
    seen
}

#[test]
fn test_selecting_leaf_reports_its_group() {
    let (headless, backend) = setup();
    let view = TreeView::new(&backend, true, false);
    view.set_headers(&["Name", "Value"]).unwrap();
    view.set_tree_json(&json!({
        "g1": { "x": { "__terminal__": true, "Name": "x", "Value": "1" } },
    }))
    .unwrap();
    let seen = selections(&view);

    headless.select_row(view.view_native_id(), &[0]).unwrap();
    assert!(seen.lock().is_empty());

    headless.select_row(view.view_native_id(), &[0, 0]).unwrap();
    assert_eq!(*seen.lock(), vec![("g1".to_string(), "x".to_string())]);
}

#[test]
fn test_header_click_sorts_each_level() {
    let (headless, backend) = setup();
    let view = TreeView::new(&backend, false, true);
    view.set_headers(&["Name", "Size"]).unwrap();
    view.set_tree_json(&json!({
        "files": {
            "b": { "__terminal__": true, "Name": "b.txt", "Size": 30 },
            "a": { "__terminal__": true, "Name": "A.txt", "Size": 200 },
            "c": { "__terminal__": true, "Name": "c.txt", "Size": 4 },
        },
    }))
    .unwrap();

    headless.click_column(view.view_native_id(), 1).unwrap();
    let by_size: Vec<_> = view.rows()[0].children.iter().map(|r| r.key.clone()).collect();
    assert_eq!(by_size, vec!["c", "b", "a"]);

    headless.click_column(view.view_native_id(), 0).unwrap();
    let by_name: Vec<_> = view.rows()[0].children.iter().map(|r| r.key.clone()).collect();
    assert_eq!(by_name, vec!["a", "b", "c"]);
    assert_eq!(view.cell_text(&[0, 0], 1).as_deref(), Some("200"));
}

#[test]
fn test_selection_after_sort_uses_new_order() {
    let (_headless, backend) = setup();
    let view = TreeView::new(&backend, false, true);
    view.set_headers(&["Name"]).unwrap();
    view.set_tree_json(&json!({
        "g": {
            "zeta": { "__terminal__": true, "Name": "zeta" },
            "alpha": { "__terminal__": true, "Name": "alpha" },
        },
    }))
    .unwrap();
    let seen = selections(&view);

    view.sort_by_column(0).unwrap();
    view.select_path(&[0, 0]).unwrap();
    assert_eq!(*seen.lock(), vec![("g".to_string(), "alpha".to_string())]);
}
