//! C ABI for a renderer host. The host owns the handle, drives `Simulation_Step`
//! once per frame and copies body state out between steps.

use crate::{
    body::Body,
    config::SimulationConfig,
    simulation::Simulation,
    vector::Vector2,
};
use std::ffi::{CStr, c_char};

/// Render-facing view of a body.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyView {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: u32,
}

impl From<&Body> for BodyView {
    fn from(body: &Body) -> Self {
        Self {
            x: body.pos.x,
            y: body.pos.y,
            radius: body.radius,
            color: body.color.0,
        }
    }
}

/// Copies up to `capacity` points as interleaved `x, y` pairs into `out`.
///
/// # Safety
/// `out` must be valid for `2 * capacity` writes. It need not be initialized.
unsafe fn copy_points(points: &[Vector2], out: *mut f64, capacity: usize) -> usize {
    if out.is_null() {
        return 0;
    }
    let count = points.len().min(capacity);
    for (i, point) in points.iter().take(count).enumerate() {
        unsafe {
            out.add(2 * i).write(point.x);
            out.add(2 * i + 1).write(point.y);
        }
    }
    count
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Create() -> *mut Simulation {
    Box::into_raw(Box::new(Simulation::new()))
}

/// Creates a simulation from a TOML file, or returns null if it cannot be loaded.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_CreateFromConfig(path: *const c_char) -> *mut Simulation {
    if path.is_null() {
        return std::ptr::null_mut();
    }
    let Ok(path) = unsafe { CStr::from_ptr(path) }.to_str() else {
        return std::ptr::null_mut();
    };
    match SimulationConfig::load(path) {
        Ok(config) => Box::into_raw(Box::new(Simulation::from_config(&config))),
        Err(err) => {
            tracing::error!(%err, "could not create simulation");
            std::ptr::null_mut()
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Destroy(handle: *mut Simulation) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Step(handle: *mut Simulation) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.step();
    }
}

/// Rebuilds the scenario the simulation was created with.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Reset(handle: *mut Simulation) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.restart();
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_SpawnBegin(handle: *mut Simulation, x: f64, y: f64) -> bool {
    unsafe { handle.as_mut() }
        .is_some_and(|sim| sim.spawn_begin(Vector2::new(x, y)).is_ok())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_SpawnEnd(handle: *mut Simulation, x: f64, y: f64) -> bool {
    unsafe { handle.as_mut() }
        .is_some_and(|sim| sim.spawn_end(Vector2::new(x, y)).is_ok())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_ToggleTrails(handle: *mut Simulation) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.toggle_trails();
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetTime(handle: *const Simulation) -> f64 {
    unsafe { handle.as_ref() }.map_or(0.0, Simulation::time)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetBodyCount(handle: *const Simulation) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.bodies().len())
}

/// Writes up to `capacity` bodies into `out` and returns how many were written.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_CopyBodies(
    handle: *const Simulation,
    out: *mut BodyView,
    capacity: usize,
) -> usize {
    let Some(sim) = (unsafe { handle.as_ref() }) else {
        return 0;
    };
    if out.is_null() {
        return 0;
    }
    let count = sim.bodies().len().min(capacity);
    for (i, body) in sim.bodies().iter().take(count).enumerate() {
        unsafe { out.add(i).write(BodyView::from(body)) };
    }
    count
}

/// Writes the pending spawn body into `out`; returns false when none is pending.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetPendingBody(
    handle: *const Simulation,
    out: *mut BodyView,
) -> bool {
    let pending = unsafe { handle.as_ref() }.and_then(Simulation::pending_body);
    match pending {
        Some(body) if !out.is_null() => {
            unsafe { out.write(BodyView::from(body)) };
            true
        }
        _ => false,
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetTrailLength(handle: *const Simulation, index: usize) -> usize {
    unsafe { handle.as_ref() }
        .and_then(|sim| sim.bodies().get(index))
        .map_or(0, |body| body.trail.len())
}

/// Copies the trail of body `index` as interleaved `x, y` pairs.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_CopyTrail(
    handle: *const Simulation,
    index: usize,
    out_xy: *mut f64,
    capacity: usize,
) -> usize {
    match unsafe { handle.as_ref() }.and_then(|sim| sim.bodies().get(index)) {
        Some(body) => unsafe { copy_points(&body.trail, out_xy, capacity) },
        None => 0,
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetDeletedTrailCount(handle: *const Simulation) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.deleted_trails().len())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetDeletedTrailLength(
    handle: *const Simulation,
    index: usize,
) -> usize {
    unsafe { handle.as_ref() }
        .and_then(|sim| sim.deleted_trails().get(index))
        .map_or(0, |trail| trail.points.len())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_CopyDeletedTrail(
    handle: *const Simulation,
    index: usize,
    out_xy: *mut f64,
    capacity: usize,
) -> usize {
    match unsafe { handle.as_ref() }.and_then(|sim| sim.deleted_trails().get(index)) {
        Some(trail) => unsafe { copy_points(&trail.points, out_xy, capacity) },
        None => 0,
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_AddBody(
    handle: *mut Simulation,
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    mass: f64,
    radius: f64,
) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.add_body(Body::new(
            mass,
            radius,
            Vector2::new(x, y),
            Vector2::new(vx, vy),
        ));
    }
}
