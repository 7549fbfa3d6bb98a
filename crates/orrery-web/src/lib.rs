pub mod runner;

pub use runner::OrreryRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<OrreryRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut OrreryRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Orrery not initialized. Call orrery_init() first.");
        f(runner)
    })
}

#[wasm_bindgen]
pub fn orrery_init() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = OrreryRunner::new().map_err(|e| JsValue::from_str(&e))?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("orrery: initialized");
    Ok(())
}

/// Replace the default catalog with a user-supplied JSON document.
#[wasm_bindgen]
pub fn orrery_load_catalog(json: &str) -> Result<(), JsValue> {
    with_runner(|r| r.load_catalog(json)).map_err(|e| JsValue::from_str(&e))
}

/// Advance one frame. `now_ms` is `performance.now()`.
#[wasm_bindgen]
pub fn orrery_tick(now_ms: f64) {
    with_runner(|r| r.tick(now_ms));
}

// ---- Input ----

#[wasm_bindgen]
pub fn orrery_key(code: &str, down: bool) {
    with_runner(|r| r.world_mut().on_key(code, down));
}

#[wasm_bindgen]
pub fn orrery_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.world_mut().on_mouse_down(x, y));
}

#[wasm_bindgen]
pub fn orrery_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.world_mut().on_mouse_move(x, y));
}

#[wasm_bindgen]
pub fn orrery_pointer_up() {
    with_runner(|r| r.world_mut().on_mouse_up());
}

#[wasm_bindgen]
pub fn orrery_wheel(delta_y: f32) {
    with_runner(|r| r.world_mut().on_wheel(delta_y));
}

#[wasm_bindgen]
pub fn orrery_resize(width: f32, height: f32) {
    with_runner(|r| r.world_mut().on_resize(width, height));
}

// ---- Simulation controls ----

#[wasm_bindgen]
pub fn orrery_set_focus(name: &str) {
    with_runner(|r| r.world_mut().set_focus(name));
}

#[wasm_bindgen]
pub fn orrery_clear_focus() {
    with_runner(|r| r.world_mut().clear_focus());
}

#[wasm_bindgen]
pub fn orrery_set_time_speed(speed: f32) {
    with_runner(|r| r.world_mut().set_time_speed(speed));
}

#[wasm_bindgen]
pub fn orrery_set_paused(paused: bool) {
    with_runner(|r| r.world_mut().set_paused(paused));
}

#[wasm_bindgen]
pub fn orrery_set_movement_speed(speed: f32) {
    with_runner(|r| r.world_mut().set_movement_speed(speed));
}

#[wasm_bindgen]
pub fn orrery_set_zoom(value: f32) {
    with_runner(|r| r.world_mut().set_zoom_from_slider(value));
}

#[wasm_bindgen]
pub fn orrery_sync_zoom() -> f32 {
    with_runner(|r| r.world_mut().sync_slider_from_camera())
}

// ---- Data accessors ----

/// Body names in slot order, for the focus picker UI.
#[wasm_bindgen]
pub fn orrery_body_names() -> js_sys::Array {
    with_runner(|r| r.body_names().map(JsValue::from_str).collect())
}

/// Focused-body info panel payload as JSON, or null.
#[wasm_bindgen]
pub fn orrery_focused_info() -> Option<String> {
    with_runner(|r| r.focused_info_json())
}

#[wasm_bindgen]
pub fn get_bodies_ptr() -> *const f32 {
    with_runner(|r| r.bodies_ptr())
}

#[wasm_bindgen]
pub fn get_body_count() -> u32 {
    with_runner(|r| r.body_count())
}

#[wasm_bindgen]
pub fn get_body_floats() -> u32 {
    with_runner(|r| r.body_floats())
}

#[wasm_bindgen]
pub fn get_comets_ptr() -> *const f32 {
    with_runner(|r| r.comets_ptr())
}

#[wasm_bindgen]
pub fn get_comet_count() -> u32 {
    with_runner(|r| r.comet_count())
}

#[wasm_bindgen]
pub fn get_comet_floats() -> u32 {
    with_runner(|r| r.comet_floats())
}

#[wasm_bindgen]
pub fn get_camera_ptr() -> *const f32 {
    with_runner(|r| r.camera_ptr())
}

#[wasm_bindgen]
pub fn get_ion_positions_ptr(comet: u32) -> *const f32 {
    with_runner(|r| r.ion_positions_ptr(comet))
}

#[wasm_bindgen]
pub fn get_ion_colors_ptr(comet: u32) -> *const f32 {
    with_runner(|r| r.ion_colors_ptr(comet))
}

#[wasm_bindgen]
pub fn get_ion_particle_count(comet: u32) -> u32 {
    with_runner(|r| r.ion_particle_count(comet))
}

#[wasm_bindgen]
pub fn get_dust_positions_ptr(comet: u32) -> *const f32 {
    with_runner(|r| r.dust_positions_ptr(comet))
}

#[wasm_bindgen]
pub fn get_dust_colors_ptr(comet: u32) -> *const f32 {
    with_runner(|r| r.dust_colors_ptr(comet))
}

#[wasm_bindgen]
pub fn get_dust_particle_count(comet: u32) -> u32 {
    with_runner(|r| r.dust_particle_count(comet))
}

/// Whether a comet's particle buffers need re-upload; clears the flag.
#[wasm_bindgen]
pub fn take_particles_dirty(comet: u32) -> bool {
    with_runner(|r| r.take_particles_dirty(comet))
}
