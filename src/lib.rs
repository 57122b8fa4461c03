//! Per-frame simulation core for a bounded-field arcade game: an actor that
//! moves and fires, hazards that bounce, explosions that fade, and the frame
//! loop that orders all of it.
//!
//! Nothing in this crate touches a terminal or a window directly; drawing goes
//! through [`render::Canvas`] and input arrives through [`input::InputSource`].

pub mod actor;
pub mod config;
pub mod effect;
pub mod error;
pub mod frame_loop;
pub mod geometry;
pub mod hazard;
pub mod input;
pub mod projectile;
pub mod render;
pub mod score;
