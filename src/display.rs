/// Rendering layer.
///
/// Each function receives a mutable canvas and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into draw calls.  The canvas itself is abstract so the same
/// renderer drives a terminal framebuffer and the in-memory canvas the
/// tests record into.

use std::io;

use crate::compute::{boost_active, pickup_is_active, HEIGHT, MAX_FUEL, WIDTH};
use crate::entities::{GameState, Mode, Pickup};
use crate::sprite::{ShipSprite, SPRITE_SIZE};

// ── Screen layout (pixel rows) ────────────────────────────────────────────────

/// Mission progress bar row.
pub const MISSION_BAR_Y: i32 = 17;
/// Fuel label row (6th 8-px text row); the bar sits in the 4 rows below it.
pub const FUEL_ROW: i32 = 48;
/// Mode label row (7th 8-px text row).
pub const MODE_ROW: i32 = 56;
/// Left edge of the fuel bar, clearing the "fuel" label.
pub const FUEL_BAR_X: i32 = 36;

// ── Abstract render capabilities ─────────────────────────────────────────────

/// A monochrome pixel canvas.  Implementations must clip out-of-range
/// pixels silently and must not present until told to.
pub trait Canvas {
    /// Blank the backing buffer (not the visible frame).
    fn clear(&mut self);
    fn pixel(&mut self, x: i32, y: i32);
    /// Queue a text line with its top-left corner at (x, y).
    fn text(&mut self, s: &str, x: i32, y: i32);
    /// Flip the backing buffer onto the visible surface.
    fn present(&mut self) -> io::Result<()>;

    fn hline(&mut self, x: i32, y: i32, len: i32) {
        for dx in 0..len.max(0) {
            self.pixel(x + dx, y);
        }
    }

    fn vline(&mut self, x: i32, y: i32, len: i32) {
        for dy in 0..len.max(0) {
            self.pixel(x, y + dy);
        }
    }

    fn blit(&mut self, sprite: &ShipSprite, x: i32, y: i32) {
        for sy in 0..SPRITE_SIZE {
            for sx in 0..SPRITE_SIZE {
                if sprite.pixel(sx, sy) {
                    self.pixel(x + sx as i32, y + sy as i32);
                }
            }
        }
    }
}

/// A 4-character numeric segment display.
pub trait SegmentDisplay {
    fn show(&mut self, text: &str);
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame: draw everything, present, then blank the
/// buffer so the next tick starts clean.  Callers never clear the canvas
/// themselves.
pub fn render<C: Canvas>(
    canvas: &mut C,
    state: &GameState,
    sprite: &ShipSprite,
    now_ms: u64,
) -> io::Result<()> {
    // Star streaks still above the top edge are skipped, not clipped.
    for drop in &state.starfield.drops {
        if drop.y >= 0 {
            canvas.vline(drop.x, drop.y, drop.len);
        }
    }

    draw_mission(canvas, state);
    draw_fuel(canvas, state);
    canvas.text(mode_label(state.mode), 0, MODE_ROW);

    for (idx, line) in state.starfield.text.iter().enumerate() {
        canvas.text(line, 0, idx as i32 * 8);
    }

    canvas.blit(sprite, state.ship.x, state.ship.y);

    if pickup_is_active(&state.fuel_pickup, now_ms) {
        draw_fuel_pickup(canvas, &state.fuel_pickup);
    }
    if pickup_is_active(&state.boost_pickup, now_ms) && !boost_active(state, now_ms) {
        draw_boost_pickup(canvas, &state.boost_pickup);
    }

    canvas.present()?;
    canvas.clear();
    Ok(())
}

/// The status line shown on the segment display: fuel, zero-padded to the
/// 4 digits the hardware has.
pub fn fuel_readout(fuel: i32) -> String {
    format!("{:04}", fuel.clamp(0, 9999))
}

pub fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Flying => "flying",
        Mode::Fueling => "refueling",
        Mode::Parked => "orbiting",
    }
}

// ── Widgets ───────────────────────────────────────────────────────────────────

fn draw_mission<C: Canvas>(canvas: &mut C, state: &GameState) {
    let mission = &state.mission;
    // Goal is positive by construction; guard anyway rather than divide by 0.
    if mission.done || mission.goal_distance <= 0 {
        return;
    }
    let len = (WIDTH as i64 * mission.flown as i64 / mission.goal_distance as i64) as i32;
    canvas.hline(0, MISSION_BAR_Y, len.clamp(0, WIDTH));
}

fn draw_fuel<C: Canvas>(canvas: &mut C, state: &GameState) {
    canvas.text("fuel", 0, FUEL_ROW);
    let fuel = state.fuel.fuel.clamp(0, MAX_FUEL);
    let len = ((WIDTH - FUEL_BAR_X) as i64 * fuel as i64 / MAX_FUEL as i64) as i32;
    for dy in 1..5 {
        canvas.hline(FUEL_BAR_X, FUEL_ROW + dy, len);
    }
}

/// Fuel canister: a 5-px cross.
fn draw_fuel_pickup<C: Canvas>(canvas: &mut C, pickup: &Pickup) {
    canvas.hline(pickup.x - 2, pickup.y, 5);
    canvas.vline(pickup.x, pickup.y - 2, 5);
}

/// Boost charge: a 3×3 hollow diamond.
fn draw_boost_pickup<C: Canvas>(canvas: &mut C, pickup: &Pickup) {
    canvas.pixel(pickup.x, pickup.y - 1);
    canvas.pixel(pickup.x - 1, pickup.y);
    canvas.pixel(pickup.x + 1, pickup.y);
    canvas.pixel(pickup.x, pickup.y + 1);
}

// Keep the row constants honest relative to the 64-px panel.
const _: () = assert!(MODE_ROW + 8 <= HEIGHT);
