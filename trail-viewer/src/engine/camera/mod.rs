//! First-person camera for walking the scene.
//!
//! Pointer-lock mouse look with damped WASD/arrow-key movement on the ground plane.

/// Pointer lock, look and movement systems.
pub mod first_person;
