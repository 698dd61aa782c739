use boid_wasm::FlockApp;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

/// Attach a fresh canvas with the given id to the page
fn mount_canvas(id: &str) {
    let document = web_sys::window()
        .expect("no global window")
        .document()
        .expect("no document");

    if let Some(existing) = document.get_element_by_id(id) {
        existing.remove();
    }

    let canvas = document
        .create_element("canvas")
        .expect("failed to create canvas")
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .expect("not a canvas");
    canvas.set_id(id);
    document
        .body()
        .expect("no body")
        .append_child(&canvas)
        .expect("failed to attach canvas");
}

#[wasm_bindgen_test]
fn test_app_starts_with_default_flock() {
    mount_canvas("flock-default");
    let app = FlockApp::new("flock-default", 640.0, 480.0).unwrap();
    assert_eq!(app.boid_count(), 100);
}

#[wasm_bindgen_test]
fn test_missing_canvas_is_an_error() {
    assert!(FlockApp::new("no-such-canvas", 640.0, 480.0).is_err());
}

#[wasm_bindgen_test]
fn test_reset_and_frames() {
    mount_canvas("flock-reset");
    let mut app = FlockApp::new("flock-reset", 320.0, 240.0).unwrap();

    app.reset(25).unwrap();
    assert_eq!(app.boid_count(), 25);

    app.set_follow_cursor(true);
    app.set_cursor(160.0, 120.0);
    app.set_lanes(true);
    app.set_grid_search(true);
    for _ in 0..10 {
        app.frame().unwrap();
    }
    assert_eq!(app.boid_count(), 25);

    app.reset(0).unwrap();
    app.frame().unwrap();
    assert_eq!(app.boid_count(), 0);
}

#[wasm_bindgen_test]
fn test_negative_count_is_rejected() {
    mount_canvas("flock-negative");
    let mut app = FlockApp::new("flock-negative", 320.0, 240.0).unwrap();

    assert!(app.reset(-1).is_err());
    assert!(app.set_agent_count(-5).is_err());
    assert_eq!(app.boid_count(), 100);
}

#[wasm_bindgen_test]
fn test_settings_round_trip() {
    mount_canvas("flock-settings");
    let mut app = FlockApp::new("flock-settings", 320.0, 240.0).unwrap();

    app.apply_settings_json(r#"{"agentCount": 12, "visualRange": 50, "width": 300, "height": 200, "lanes": true}"#)
        .unwrap();
    app.restart();
    assert_eq!(app.boid_count(), 12);

    let json = app.settings_json();
    assert!(json.contains("\"visualRange\": 50.0"));
    assert!(json.contains("\"lanes\": true"));

    assert!(app.apply_settings_json(r#"{"width": 0}"#).is_err());
}
