//! Browser-target smoke tests. Run with `wasm-pack test --headless`.

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, KeyboardEvent, KeyboardEventInit, Window};

use village_engine::{Village, VillageCore, World};

wasm_bindgen_test_configure!(run_in_browser);

fn mounted_canvas() -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

fn dispatch_key(window: &Window, kind: &str, code: &str, repeat: bool) {
    let init = KeyboardEventInit::new();
    init.set_code(code);
    init.set_repeat(repeat);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict(kind, &init).unwrap();
    window.dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
fn core_ticks_under_wasm() {
    let world = World::default();
    let mut core = VillageCore::new(world);
    core.set_viewport(640.0, 480.0);
    for _ in 0..60 {
        core.tick(0.016, false);
    }
    let plan = core.draw_plan();
    assert!(!plan.items.is_empty());
}

#[wasm_bindgen_test]
fn bad_json_is_rejected_not_trapped() {
    assert!(VillageCore::from_json("not json").is_err());
}

#[wasm_bindgen_test]
fn dispose_twice_is_a_no_op() {
    let canvas = mounted_canvas();
    let noop = Function::new_no_args("");
    let mut village = Village::new(canvas, "{}", noop.clone(), noop.clone(), noop);

    village.dispose();
    // Second teardown must find nothing left to tear down.
    village.dispose();
}

#[wasm_bindgen_test]
fn held_interact_key_opens_the_stop_once_per_press() {
    let window = web_sys::window().unwrap();
    let canvas = mounted_canvas();

    // Player spawns on the knight anchor so the stop is in reach.
    let world = r#"{
        "seed": 3,
        "size": {"w": 1200, "h": 900},
        "playerSpawn": {"x": 300, "y": 300},
        "neighborhoods": [{"id": "nb", "name": "N", "stops": [
            {"id": "stop-door", "title": "T",
             "house": {"x": 240, "y": 160, "w": 80, "h": 60},
             "knight": {"x": 300, "y": 300}}
        ]}],
        "npcs": []
    }"#;

    let opened = Rc::new(Cell::new(0u32));
    let on_open_stop = {
        let opened = Rc::clone(&opened);
        Closure::<dyn FnMut(JsValue)>::new(move |_id: JsValue| {
            opened.set(opened.get() + 1);
        })
    };
    let noop = Function::new_no_args("");
    let mut village = Village::new(
        canvas,
        world,
        noop.clone(),
        on_open_stop.as_ref().clone().unchecked_into(),
        noop,
    );

    // One press edge followed by key-repeat frames.
    dispatch_key(&window, "keydown", "KeyE", false);
    dispatch_key(&window, "keydown", "KeyE", true);
    dispatch_key(&window, "keydown", "KeyE", true);
    assert_eq!(opened.get(), 1, "repeats must not re-fire the callback");

    // Releasing and pressing again is a new edge.
    dispatch_key(&window, "keyup", "KeyE", false);
    dispatch_key(&window, "keydown", "KeyE", false);
    assert_eq!(opened.get(), 2);

    village.dispose();
}
