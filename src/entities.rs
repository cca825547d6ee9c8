/// All game entity types — pure data, no logic.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Burning fuel, flying the current mission.
    Flying,
    /// Refilling the tank; mission progress is paused.
    Fueling,
    /// Docked in orbit, waiting for the next mission to be accepted.
    Parked,
}

// ── Fuel & missions ───────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct FuelGauge {
    /// Remaining fuel, always within `[0, MAX_FUEL]`.
    pub fuel: i32,
}

#[derive(Clone, Debug)]
pub struct Mission {
    pub goal_distance: i32,
    /// Distance covered so far, never negative.
    pub flown: i32,
    /// Fuel credited on completion.  Fixed at creation, never recomputed.
    pub reward: i32,
    pub done: bool,
}

// ── Player ship ───────────────────────────────────────────────────────────────

/// Top-left corner of the 16×16 ship sprite, in playfield pixels.
#[derive(Clone, Debug)]
pub struct Ship {
    pub x: i32,
    pub y: i32,
}

// ── Pickups ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupKind {
    /// Credits `amount` fuel when collected.
    Fuel { amount: i32 },
    /// Arms a timed speed boost lasting `duration_ms` when collected.
    Boost { duration_ms: u64 },
}

/// A transient collectible.  Inert (invisible, not collidable) until
/// `active_deadline`; once active it drifts slowly around the playfield.
#[derive(Clone, Debug)]
pub struct Pickup {
    pub x: i32,
    pub y: i32,
    /// Absolute time (ms) at which the pickup wakes up.
    pub active_deadline: u64,
    /// Absolute time (ms) of the last drift step.
    pub last_moved: u64,
    pub kind: PickupKind,
}

// ── Starfield ─────────────────────────────────────────────────────────────────

/// One falling star streak.
#[derive(Clone, Debug)]
pub struct Drop {
    pub x: i32,
    pub y: i32,
    pub len: i32,
    pub speed: i32,
}

#[derive(Clone, Debug)]
pub struct Starfield {
    pub drops: Vec<Drop>,
    /// Overlay text lines (0–2), drawn one per 8-px row from the top.
    /// Persists until overwritten by whoever speaks next.
    pub text: Vec<String>,
}

// ── Sampled inputs for one tick ───────────────────────────────────────────────

/// Everything the simulation reads from the outside world in one tick:
/// the monotonic clock, the two stick axes, the throttle pot, and the
/// debounced button edge (true at most once per physical press).
#[derive(Clone, Debug)]
pub struct TickInput {
    pub now_ms: u64,
    /// Throttle pot, full scale 0..=65535.
    pub throttle: u16,
    pub axis_x: u16,
    pub axis_y: u16,
    pub button: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire session state.  Cloneable so the pure tick function can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub mode: Mode,
    pub fuel: FuelGauge,
    pub mission: Mission,
    pub ship: Ship,
    /// At most one live instance of each pickup kind at a time.
    pub fuel_pickup: Pickup,
    pub boost_pickup: Pickup,
    /// Absolute expiry time (ms) of the running boost, if any.
    pub boost_until: Option<u64>,
    pub starfield: Starfield,
    pub frame: u64,
}
