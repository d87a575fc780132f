//! wasm-bindgen facade.
//!
//! The host constructs a [`Village`] with a canvas, the world JSON, a
//! pause predicate and two callbacks; the engine owns its animation
//! loop, input listeners and resize handling from then on.
//! Construction never throws: an unusable canvas yields an inert
//! instance whose `dispose` is a no-op, and an unparseable world
//! degrades to an empty default world.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Event, HtmlCanvasElement, KeyboardEvent, ResizeObserver, Window,
};

use crate::api::render::CanvasRenderer;
use crate::domain::world::World;
use crate::simulation::{KeyCode, VillageCore};
use crate::systems::interact::HitKind;

/// Shared per-mount state reachable from every listener closure.
struct Mount {
    core: RefCell<VillageCore>,
    renderer: RefCell<CanvasRenderer>,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    is_paused: Function,
    on_open_stop: Function,
    on_open_npc: Function,
    raf: Cell<Option<i32>>,
    last_ts: Cell<Option<f64>>,
    disposed: Cell<bool>,
}

impl Mount {
    fn paused(&self) -> bool {
        self.is_paused
            .call0(&JsValue::NULL)
            .map(|v| v.is_truthy())
            .unwrap_or(false)
    }

    /// Re-derive the DPR-scaled backing store and logical viewport from
    /// the canvas's current layout size.
    fn resize(&self) {
        let Some(window) = web_sys::window() else { return };
        let rect = self.canvas.get_bounding_client_rect();
        let dpr = window.device_pixel_ratio().max(1.0);
        let view_w = rect.width().floor().max(1.0);
        let view_h = rect.height().floor().max(1.0);

        self.canvas.set_width((view_w * dpr).floor() as u32);
        self.canvas.set_height((view_h * dpr).floor() as u32);
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);

        self.core.borrow_mut().set_viewport(view_w, view_h);
    }

    /// One display frame: measure dt, step the simulation (unless
    /// paused), render. A draw fault abandons the frame; the loop was
    /// already rescheduled by the caller.
    fn frame(&self, ts_ms: f64) {
        if self.disposed.get() {
            return;
        }

        let dt = match self.last_ts.replace(Some(ts_ms)) {
            Some(prev) => ((ts_ms - prev) / 1000.0).max(0.0),
            None => 0.0,
        };
        let paused = self.paused();

        // Mutate before render, never interleave.
        let mut core = self.core.borrow_mut();
        core.tick(dt, paused);
        let plan = core.draw_plan();

        // A failed draw abandons this frame only; the next callback is
        // already scheduled.
        let _ = self
            .renderer
            .borrow_mut()
            .render(&core, &plan, ts_ms / 1000.0, paused);
    }

    fn handle_key_down(&self, event: &KeyboardEvent) {
        let Some(key) = KeyCode::from_code(&event.code()) else { return };
        // Keep game keys from scrolling the page or moving the caret.
        event.prevent_default();

        self.core.borrow_mut().input_mut().press(key);
        if event.repeat() || !key.is_interact() {
            return;
        }

        // Edge-triggered interact. Resolve the hit with the core borrow
        // released before calling into the host, which may re-enter us.
        let paused = self.paused();
        let hit = self.core.borrow().interact(paused);
        if let Some(hit) = hit {
            let id = JsValue::from_str(&hit.id);
            let _ = match hit.kind {
                HitKind::Stop => self.on_open_stop.call1(&JsValue::NULL, &id),
                HitKind::Npc => self.on_open_npc.call1(&JsValue::NULL, &id),
            };
        }
    }

    fn handle_key_up(&self, event: &KeyboardEvent) {
        if let Some(key) = KeyCode::from_code(&event.code()) {
            self.core.borrow_mut().input_mut().release(key);
        }
    }
}

/// Listener closures and the observer; dropped on dispose after
/// detaching everything they are registered with.
struct Hooks {
    tick: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
    keyup: Closure<dyn FnMut(KeyboardEvent)>,
    blur: Closure<dyn FnMut(Event)>,
    pointerdown: Closure<dyn FnMut(Event)>,
    win_resize: Option<Closure<dyn FnMut(Event)>>,
    observer: Option<ResizeObserver>,
    _observer_cb: Option<Closure<dyn FnMut(js_sys::Array)>>,
}

/// The mounted engine. Host contract: construct once per canvas, call
/// `dispose()` on unmount; everything else runs off browser events.
#[wasm_bindgen]
pub struct Village {
    mount: Option<Rc<Mount>>,
    hooks: Option<Hooks>,
}

#[wasm_bindgen]
impl Village {
    /// Mount the engine. `world_json` follows the world document
    /// schema; `is_paused` is polled once per frame; the two callbacks
    /// receive a stop id / NPC id on an interact edge.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        world_json: &str,
        is_paused: Function,
        on_open_stop: Function,
        on_open_npc: Function,
    ) -> Village {
        let inert = Village { mount: None, hooks: None };

        let Some(window) = web_sys::window() else { return inert };
        let Some(ctx) = get_context_2d(&canvas) else { return inert };

        let world = World::from_json(world_json).unwrap_or_else(|err| {
            web_sys::console::warn_1(&format!("village: bad world document: {err}").into());
            World::default()
        });
        let grass_seed = world.seed ^ 0x9e37_79b9;
        let core = VillageCore::new(world);
        let renderer = CanvasRenderer::new(ctx.clone(), grass_seed);

        let mount = Rc::new(Mount {
            core: RefCell::new(core),
            renderer: RefCell::new(renderer),
            canvas,
            ctx,
            is_paused,
            on_open_stop,
            on_open_npc,
            raf: Cell::new(None),
            last_ts: Cell::new(None),
            disposed: Cell::new(false),
        });
        mount.resize();

        let hooks = install_hooks(&window, &mount);
        schedule_first_frame(&window, &mount, &hooks.tick);

        Village { mount: Some(mount), hooks: Some(hooks) }
    }

    /// Tear down synchronously: cancel the pending frame, remove every
    /// listener, disconnect the observer. Safe to call twice.
    pub fn dispose(&mut self) {
        let (Some(mount), Some(hooks)) = (self.mount.take(), self.hooks.take()) else {
            return;
        };
        mount.disposed.set(true);

        if let Some(window) = web_sys::window() {
            if let Some(handle) = mount.raf.take() {
                let _ = window.cancel_animation_frame(handle);
            }
            remove_window_listener(&window, "keydown", hooks.keydown.as_ref());
            remove_window_listener(&window, "keyup", hooks.keyup.as_ref());
            remove_window_listener(&window, "blur", hooks.blur.as_ref());
            if let Some(resize) = &hooks.win_resize {
                remove_window_listener(&window, "resize", resize.as_ref());
            }
        }
        let _ = mount
            .canvas
            .remove_event_listener_with_callback(
                "pointerdown",
                hooks.pointerdown.as_ref().unchecked_ref(),
            );
        if let Some(observer) = &hooks.observer {
            observer.disconnect();
        }

        // Break the tick closure's self-reference so it can drop.
        hooks.tick.borrow_mut().take();
    }
}

fn get_context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn add_window_listener(window: &Window, kind: &str, callback: &JsValue) {
    let _ = window.add_event_listener_with_callback(kind, callback.unchecked_ref());
}

fn remove_window_listener(window: &Window, kind: &str, callback: &JsValue) {
    let _ = window.remove_event_listener_with_callback(kind, callback.unchecked_ref());
}

fn install_hooks(window: &Window, mount: &Rc<Mount>) -> Hooks {
    let keydown = {
        let mount = Rc::clone(mount);
        Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
            mount.handle_key_down(&e);
        })
    };
    let keyup = {
        let mount = Rc::clone(mount);
        Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
            mount.handle_key_up(&e);
        })
    };
    // Clear pressed keys when the tab loses focus so a key released
    // while unfocused does not appear stuck.
    let blur = {
        let mount = Rc::clone(mount);
        Closure::<dyn FnMut(Event)>::new(move |_| {
            mount.core.borrow_mut().input_mut().clear();
        })
    };
    // Pointer presses only restore keyboard focus to the surface.
    let pointerdown = {
        let mount = Rc::clone(mount);
        Closure::<dyn FnMut(Event)>::new(move |_| {
            let _ = mount.canvas.focus();
        })
    };

    add_window_listener(window, "keydown", keydown.as_ref());
    add_window_listener(window, "keyup", keyup.as_ref());
    add_window_listener(window, "blur", blur.as_ref());
    let _ = mount
        .canvas
        .add_event_listener_with_callback("pointerdown", pointerdown.as_ref().unchecked_ref());

    // Prefer a ResizeObserver on the canvas; fall back to the window
    // resize event when the observer cannot be constructed.
    let mut observer = None;
    let mut observer_cb = None;
    let mut win_resize = None;
    {
        let mount_r = Rc::clone(mount);
        let cb = Closure::<dyn FnMut(js_sys::Array)>::new(move |_entries: js_sys::Array| {
            mount_r.resize();
        });
        match ResizeObserver::new(cb.as_ref().unchecked_ref()) {
            Ok(ro) => {
                ro.observe(&mount.canvas);
                observer = Some(ro);
                observer_cb = Some(cb);
            }
            Err(_) => {
                let mount_r = Rc::clone(mount);
                let resize = Closure::<dyn FnMut(Event)>::new(move |_| {
                    mount_r.resize();
                });
                add_window_listener(window, "resize", resize.as_ref());
                win_resize = Some(resize);
            }
        }
    }

    Hooks {
        tick: Rc::new(RefCell::new(None)),
        keydown,
        keyup,
        blur,
        pointerdown,
        win_resize,
        observer,
        _observer_cb: observer_cb,
    }
}

/// The self-rescheduling frame callback. Each invocation schedules the
/// next frame first, then runs the tick, so a draw fault never stops
/// the loop.
fn schedule_first_frame(
    window: &Window,
    mount: &Rc<Mount>,
    slot: &Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
) {
    let mount_t = Rc::clone(mount);
    let slot_t = Rc::clone(slot);
    *slot.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |ts: f64| {
        if mount_t.disposed.get() {
            return;
        }
        if let Some(window) = web_sys::window() {
            if let Some(cb) = slot_t.borrow().as_ref() {
                if let Ok(handle) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    mount_t.raf.set(Some(handle));
                }
            }
        }
        mount_t.frame(ts);
    }));

    if let Some(cb) = slot.borrow().as_ref() {
        if let Ok(handle) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            mount.raf.set(Some(handle));
        }
    }
}
