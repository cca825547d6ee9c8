/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG, so a seeded
/// `StdRng` makes every run reproducible.

use rand::Rng;

use crate::entities::{
    Drop, FuelGauge, GameState, Mission, Mode, Pickup, PickupKind, Ship, Starfield, TickInput,
};

// ── Playfield ────────────────────────────────────────────────────────────────

pub const WIDTH: i32 = 128;
pub const HEIGHT: i32 = 64;

// ── Fuel economy ─────────────────────────────────────────────────────────────

pub const MAX_FUEL: i32 = 9999;
/// Fuel always burned per Flying tick, before the throttle component.
pub const BURN_BASE: i32 = 1;
/// Throttle-derived burn on top of the base, scaled into `0..=BURN_RATE_MAX`.
pub const BURN_RATE_MAX: i32 = 10;
/// Fixed elevated burn rate while a boost is running.
pub const BOOST_BURN_RATE: i32 = 8;
pub const REFILL_PER_TICK: i32 = 1;

// ── Missions ─────────────────────────────────────────────────────────────────

pub const GOAL_MIN: i32 = 2000;
pub const GOAL_MAX: i32 = 5000;
/// Distance per Flying tick: baseline plus throttle scaled into `0..=2`.
pub const DISTANCE_BASE: i32 = 1;
pub const DISTANCE_RANGE: i32 = 2;
/// Fixed distance per tick while a boost is running.
pub const BOOST_DISTANCE: i32 = 3;

// ── Ship ─────────────────────────────────────────────────────────────────────

pub const SHIP_SIZE: i32 = 16;
/// Lowest row the ship's top edge may occupy (header rows stay free).
pub const SHIP_MAX_Y: i32 = 48;
pub const MOVE_SIZE: i32 = 2;
/// Stick dead zone: readings below/above these move the ship -/+.
pub const AXIS_LOW: u16 = 16384;
pub const AXIS_HIGH: u16 = 49152;

// ── Pickups ──────────────────────────────────────────────────────────────────

pub const FUEL_PICKUP_DORMANCY_MS: u64 = 120_000;
pub const BOOST_PICKUP_DORMANCY_MS: u64 = 60_000;
pub const FUEL_PICKUP_MIN: i32 = 1000;
pub const FUEL_PICKUP_MAX: i32 = 4000;
pub const BOOST_DURATION_MS: u64 = 4000;
/// Minimum interval between drift steps of an active pickup.
pub const DRIFT_INTERVAL_MS: u64 = 500;

// ── Starfield ────────────────────────────────────────────────────────────────

pub const DROP_COUNT: usize = 10;

/// Analog full scale (16-bit ADC reading).
pub const ADC_FULL_SCALE: u16 = u16::MAX;

/// Scale a raw analog reading into `0..=max`.
fn scale_reading(reading: u16, max: i32) -> i32 {
    (max as i64 * reading as i64 / ADC_FULL_SCALE as i64) as i32
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial session state: parked, tank full, a mission already on
/// offer, both pickups spawned dormant.
pub fn init_state(now_ms: u64, rng: &mut impl Rng) -> GameState {
    let mission = new_mission(rng);
    let drops = (0..DROP_COUNT)
        .map(|_| Drop {
            x: rng.gen_range(0..WIDTH),
            y: rng.gen_range(-32..=0),
            len: rng.gen_range(1..=3),
            speed: rng.gen_range(1..=3),
        })
        .collect();
    GameState {
        mode: Mode::Parked,
        fuel: FuelGauge { fuel: MAX_FUEL },
        starfield: Starfield {
            drops,
            text: mission_text(&mission),
        },
        ship: Ship {
            x: (WIDTH - SHIP_SIZE) / 2,
            y: SHIP_MAX_Y / 2,
        },
        fuel_pickup: spawn_fuel_pickup(now_ms, rng),
        boost_pickup: spawn_boost_pickup(now_ms, rng),
        boost_until: None,
        mission,
        frame: 0,
    }
}

/// Roll a fresh mission: goal uniform in `[GOAL_MIN, GOAL_MAX]`, reward a
/// fixed 10–50% cut of the goal, integer-truncated.  The reward is never
/// recomputed after this point.
pub fn new_mission(rng: &mut impl Rng) -> Mission {
    let goal_distance = rng.gen_range(GOAL_MIN..=GOAL_MAX);
    let cut = rng.gen_range(0.1..=0.5);
    Mission {
        goal_distance,
        flown: 0,
        reward: (goal_distance as f64 * cut) as i32,
        done: false,
    }
}

/// Spawn a dormant fuel pickup at a random spot with a random payload.
pub fn spawn_fuel_pickup(now_ms: u64, rng: &mut impl Rng) -> Pickup {
    Pickup {
        x: rng.gen_range(0..WIDTH),
        y: rng.gen_range(0..HEIGHT),
        active_deadline: now_ms + FUEL_PICKUP_DORMANCY_MS,
        last_moved: now_ms,
        kind: PickupKind::Fuel {
            amount: rng.gen_range(FUEL_PICKUP_MIN..=FUEL_PICKUP_MAX),
        },
    }
}

/// Spawn a dormant boost pickup at a random spot.
pub fn spawn_boost_pickup(now_ms: u64, rng: &mut impl Rng) -> Pickup {
    Pickup {
        x: rng.gen_range(0..WIDTH),
        y: rng.gen_range(0..HEIGHT),
        active_deadline: now_ms + BOOST_PICKUP_DORMANCY_MS,
        last_moved: now_ms,
        kind: PickupKind::Boost {
            duration_ms: BOOST_DURATION_MS,
        },
    }
}

// ── Queries ──────────────────────────────────────────────────────────────────

/// True while an armed boost has not yet expired.
pub fn boost_active(state: &GameState, now_ms: u64) -> bool {
    state.boost_until.map_or(false, |until| now_ms < until)
}

/// A pickup is collidable (and drawn) only once its dormancy has elapsed.
pub fn pickup_is_active(pickup: &Pickup, now_ms: u64) -> bool {
    now_ms >= pickup.active_deadline
}

/// AABB test: true iff the pickup's point falls within the ship's 16×16 box.
pub fn ship_collides(ship: &Ship, pickup: &Pickup) -> bool {
    pickup.x >= ship.x
        && pickup.x < ship.x + SHIP_SIZE
        && pickup.y >= ship.y
        && pickup.y < ship.y + SHIP_SIZE
}

fn mission_text(mission: &Mission) -> Vec<String> {
    vec![
        "mission distance".to_string(),
        format!("{}/{}", mission.flown, mission.goal_distance),
    ]
}

// ── Per-frame tick (nearly pure — RNG is injected) ───────────────────────────

/// Advance the simulation by one tick.  Update order is fixed: mode machine,
/// starfield, ship, fuel, mission, pickups.  All randomness comes through
/// `rng` so callers control determinism.
pub fn tick(state: &GameState, input: &TickInput, rng: &mut impl Rng) -> GameState {
    let mut s = state.clone();
    s.frame += 1;
    let now = input.now_ms;

    // ── 1. Mode machine ──────────────────────────────────────────────────────
    // The button edge arrives already debounced (at most one true per
    // physical press) and is consumed here whether or not it does anything.
    if input.button {
        match s.mode {
            Mode::Parked => {
                s.mission = new_mission(rng);
                s.ship = Ship {
                    x: (WIDTH - SHIP_SIZE) / 2,
                    y: SHIP_MAX_Y / 2,
                };
                s.starfield.text = mission_text(&s.mission);
                s.mode = Mode::Flying;
            }
            Mode::Flying => s.mode = Mode::Fueling,
            Mode::Fueling => s.mode = Mode::Flying,
        }
    }

    let boosted = boost_active(&s, now);

    // ── 2. Starfield drops ───────────────────────────────────────────────────
    let multiplier = match (s.mode, boosted) {
        (Mode::Flying, true) => 5,
        (Mode::Flying, false) => 3,
        _ => 1,
    };
    for drop in &mut s.starfield.drops {
        drop.y += drop.speed * multiplier;
        if drop.y > HEIGHT {
            drop.y = rng.gen_range(-3..=0);
            drop.x = rng.gen_range(0..WIDTH);
            // Longer streaks while boosted sell the extra speed.
            drop.len = if boosted {
                rng.gen_range(2..=6)
            } else {
                rng.gen_range(1..=3)
            };
        }
    }

    // ── 3. Ship movement ─────────────────────────────────────────────────────
    s.ship.x = (s.ship.x + axis_step(input.axis_x)).clamp(0, WIDTH - SHIP_SIZE);
    s.ship.y = (s.ship.y + axis_step(input.axis_y)).clamp(0, SHIP_MAX_Y);

    // ── 4. Fuel economy ──────────────────────────────────────────────────────
    let burn_rate = if boosted {
        BOOST_BURN_RATE
    } else {
        scale_reading(input.throttle, BURN_RATE_MAX)
    };
    match s.mode {
        Mode::Flying if s.fuel.fuel > 0 => s.fuel.fuel -= BURN_BASE + burn_rate,
        Mode::Fueling => s.fuel.fuel += REFILL_PER_TICK,
        _ => {}
    }
    // Clamp before the zero check: the burn may have gone negative, and the
    // forced switch must land in the same tick as the burn.
    s.fuel.fuel = s.fuel.fuel.clamp(0, MAX_FUEL);
    if s.fuel.fuel == 0 {
        s.mode = Mode::Fueling;
    }

    // ── 5. Mission progress ──────────────────────────────────────────────────
    if s.mode == Mode::Flying && !s.mission.done {
        let distance_mod = if boosted {
            BOOST_DISTANCE
        } else {
            DISTANCE_BASE + scale_reading(input.throttle, DISTANCE_RANGE)
        };
        s.mission.flown += distance_mod;
        if s.mission.flown >= s.mission.goal_distance {
            s.mission.done = true;
            s.mode = Mode::Parked;
            add_fuel(&mut s.fuel, s.mission.reward);
            s.starfield.text = vec![
                "mission complete".to_string(),
                format!("reward {} fuel", s.mission.reward),
            ];
        } else {
            s.starfield.text = mission_text(&s.mission);
        }
    }

    // ── 6. Pickups ───────────────────────────────────────────────────────────
    // Boost expiry runs once per tick, collision or not.  The spent pickup is
    // replaced by a fresh dormant one the moment the boost runs out.
    if let Some(until) = s.boost_until {
        if now >= until {
            s.boost_until = None;
            s.boost_pickup = spawn_boost_pickup(now, rng);
        }
    }

    s.fuel_pickup = drift_pickup(&s.fuel_pickup, now, rng);
    s.boost_pickup = drift_pickup(&s.boost_pickup, now, rng);

    if pickup_is_active(&s.fuel_pickup, now) && ship_collides(&s.ship, &s.fuel_pickup) {
        if let PickupKind::Fuel { amount } = s.fuel_pickup.kind {
            add_fuel(&mut s.fuel, amount);
        }
        s.fuel_pickup = spawn_fuel_pickup(now, rng);
    }

    if s.boost_until.is_none()
        && pickup_is_active(&s.boost_pickup, now)
        && ship_collides(&s.ship, &s.boost_pickup)
    {
        if let PickupKind::Boost { duration_ms } = s.boost_pickup.kind {
            s.boost_until = Some(now + duration_ms);
        }
    }

    s
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// External fuel credit (mission reward, pickup).  Clamps at the ceiling and
/// never reduces fuel.
fn add_fuel(gauge: &mut FuelGauge, amount: i32) {
    gauge.fuel = (gauge.fuel + amount.max(0)).min(MAX_FUEL);
}

/// Map a stick reading to a step: low third → −MOVE_SIZE, high third →
/// +MOVE_SIZE, dead zone in between → hold.
fn axis_step(reading: u16) -> i32 {
    if reading < AXIS_LOW {
        -MOVE_SIZE
    } else if reading > AXIS_HIGH {
        MOVE_SIZE
    } else {
        0
    }
}

/// Random-walk an active pickup by −1/0/+1 per axis, at most once per
/// `DRIFT_INTERVAL_MS`, clamped to the playfield.  Dormant pickups hold still.
fn drift_pickup(pickup: &Pickup, now_ms: u64, rng: &mut impl Rng) -> Pickup {
    if now_ms < pickup.active_deadline
        || now_ms.saturating_sub(pickup.last_moved) < DRIFT_INTERVAL_MS
    {
        return pickup.clone();
    }
    Pickup {
        x: (pickup.x + rng.gen_range(-1..=1)).clamp(0, WIDTH - 1),
        y: (pickup.y + rng.gen_range(-1..=1)).clamp(0, HEIGHT - 1),
        last_moved: now_ms,
        ..pickup.clone()
    }
}
