use bevy::input::mouse::MouseMotion;
use bevy::math::EulerRot;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use constants::controls::{LOOK_SENSITIVITY, MOVE_ACCELERATION, MOVE_DAMPING, PITCH_LIMIT};

use crate::engine::scene::scene_setup::PlayerCamera;

/// Held movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveState {
    pub fn from_keyboard(keyboard: &ButtonInput<KeyCode>) -> Self {
        Self {
            forward: keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]),
            backward: keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]),
            left: keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]),
            right: keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]),
        }
    }
}

/// Pointer-lock walking camera state.
#[derive(Resource, Debug, Clone)]
pub struct FirstPersonController {
    pub yaw: f32,
    pub pitch: f32,
    /// x: strafe right, y: forward. Metres per second.
    pub velocity: Vec2,
    pub move_acceleration: f32,
    pub move_damping: f32,
    pub look_sensitivity: f32,
}

impl Default for FirstPersonController {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            velocity: Vec2::ZERO,
            move_acceleration: MOVE_ACCELERATION,
            move_damping: MOVE_DAMPING,
            look_sensitivity: LOOK_SENSITIVITY,
        }
    }
}

impl FirstPersonController {
    pub fn look(&mut self, mouse_delta: Vec2) {
        self.yaw -= mouse_delta.x * self.look_sensitivity;
        self.pitch = (self.pitch - mouse_delta.y * self.look_sensitivity)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// World-space displacement for `velocity` over `dt`, in the yaw-only frame.
    pub fn horizontal_offset(&self, dt: f32) -> Vec3 {
        let yaw = Quat::from_rotation_y(self.yaw);
        let right = yaw * Vec3::X;
        let forward = yaw * Vec3::NEG_Z;
        (right * self.velocity.x + forward * self.velocity.y) * dt
    }
}

/// Damped velocity update: decay first, then accelerate along each held axis.
pub fn integrate_velocity(
    velocity: Vec2,
    move_state: MoveState,
    dt: f32,
    acceleration: f32,
    damping: f32,
) -> Vec2 {
    let mut velocity = velocity - velocity * (damping * dt).min(1.0);

    let direction = Vec2::new(
        move_state.right as i32 as f32 - move_state.left as i32 as f32,
        move_state.forward as i32 as f32 - move_state.backward as i32 as f32,
    )
    .normalize_or_zero();

    if move_state.forward || move_state.backward {
        velocity.y += direction.y * acceleration * dt;
    }
    if move_state.left || move_state.right {
        velocity.x += direction.x * acceleration * dt;
    }

    velocity
}

fn is_locked(window: &Window) -> bool {
    window.cursor_options.grab_mode != CursorGrabMode::None
}

/// Mirror the browser's pointer-lock state into `window`. Returns `true` when it changed.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub fn apply_browser_lock_state(window: &mut Window, browser_locked: bool) -> bool {
    if is_locked(window) == browser_locked {
        return false;
    }

    if browser_locked {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    } else {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
    true
}

/// The browser releases pointer lock on its own (Escape, tab switch) without
/// telling winit, so read it back from `document.pointerLockElement`.
/// `requestPointerLock` resolves asynchronously, so a release is only mirrored
/// after the lock was seen.
#[cfg(target_arch = "wasm32")]
pub fn sync_browser_pointer_lock(
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut lock_seen: Local<bool>,
) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };

    let browser_locked = document.pointer_lock_element().is_some();
    if browser_locked {
        *lock_seen = true;
        return;
    }

    // Checked through a shared borrow so change detection only fires on a real release.
    if *lock_seen && is_locked(&window) {
        *lock_seen = false;
        apply_browser_lock_state(&mut window, false);
        info!("Pointer released by the browser");
    }
}

/// Click locks the pointer; Escape releases it on native builds.
pub fn pointer_lock_system(
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    #[cfg(not(target_arch = "wasm32"))] keyboard: Res<ButtonInput<KeyCode>>,
) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    if mouse_button.just_pressed(MouseButton::Left) && !is_locked(&window) {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
        info!("Pointer locked");
    }

    // Browsers release pointer lock on Escape by themselves.
    #[cfg(not(target_arch = "wasm32"))]
    {
        if keyboard.just_pressed(KeyCode::Escape) && is_locked(&window) {
            window.cursor_options.grab_mode = CursorGrabMode::None;
            window.cursor_options.visible = true;
            info!("Pointer released");
        }
    }
}

pub fn first_person_controller(
    mut camera_query: Query<&mut Transform, With<PlayerCamera>>,
    mut controller: ResMut<FirstPersonController>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut mouse_motion: EventReader<MouseMotion>,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };
    let locked = windows.single().map(is_locked).unwrap_or(false);

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    if !locked {
        controller.velocity = Vec2::ZERO;
        return;
    }

    if mouse_delta != Vec2::ZERO {
        controller.look(mouse_delta);
    }

    let dt = time.delta_secs();
    controller.velocity = integrate_velocity(
        controller.velocity,
        MoveState::from_keyboard(&keyboard),
        dt,
        controller.move_acceleration,
        controller.move_damping,
    );

    camera_transform.translation += controller.horizontal_offset(dt);
    camera_transform.rotation = controller.rotation();
}
