//! Starship courier — fly randomized distance missions, manage the tank,
//! and catch drifting pickups, all on a 128×64 monochrome playfield.
//!
//! The library is split the same way the binary consumes it:
//! * [`entities`] — pure data, no logic.
//! * [`compute`]  — pure per-tick simulation; all randomness is injected.
//! * [`display`]  — translates state into draw calls on an abstract canvas.
//! * [`sprite`]   — the 16×16 ship sprite asset and its loader.

pub mod compute;
pub mod display;
pub mod entities;
pub mod sprite;
