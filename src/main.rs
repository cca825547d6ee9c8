mod term;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use star_courier::compute::{init_state, tick, ADC_FULL_SCALE};
use star_courier::display::{self, fuel_readout, SegmentDisplay};
use star_courier::entities::TickInput;
use star_courier::sprite::ShipSprite;
use term::TermCanvas;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// The ship sprite asset, loaded once at startup; missing or corrupt is fatal.
const SPRITE_PATH: &str = "assets/ship.sprite";

// ── Virtual potentiometers ───────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Throttle change per ↑/↓ press or repeat, on the 0..=65535 pot scale.
const THROTTLE_STEP: u16 = 4096;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

/// Fake a stick pot from a held key pair: pinned low, pinned high, or the
/// dead-zone centre when neither (or both) is held.
fn virtual_axis(low: bool, high: bool) -> u16 {
    match (low, high) {
        (true, false) => 0,
        (false, true) => ADC_FULL_SCALE,
        _ => ADC_FULL_SCALE / 2,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: the event thread owns the blocking reads.  The accept/refuel
/// button (Space) never travels through the channel — the thread sets a
/// single pending-press flag, and the loop drains that flag exactly once per
/// tick, so one physical press can never produce two mode transitions.  All
/// other keys arrive over the channel and feed the virtual pots: A/D and
/// ←/→ pin the X stick, W/S the Y stick, ↑/↓ nudge the throttle.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    pressed: &AtomicBool,
    sprite: &ShipSprite,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let start = Instant::now();
    let mut canvas = TermCanvas::new(out);

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut throttle: u16 = 0;
    let mut frame: u64 = 0;

    let mut state = init_state(0, &mut rng);

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(());
                        }
                        KeyCode::Char('c')
                            if modifiers.contains(KeyModifiers::CONTROL) =>
                        {
                            return Ok(());
                        }
                        KeyCode::Up => throttle = throttle.saturating_add(THROTTLE_STEP),
                        KeyCode::Down => throttle = throttle.saturating_sub(THROTTLE_STEP),
                        _ => {}
                    }
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let left = is_held(&key_frame, &KeyCode::Left, frame)
            || is_held(&key_frame, &KeyCode::Char('a'), frame);
        let right = is_held(&key_frame, &KeyCode::Right, frame)
            || is_held(&key_frame, &KeyCode::Char('d'), frame);
        let up = is_held(&key_frame, &KeyCode::Char('w'), frame);
        let down = is_held(&key_frame, &KeyCode::Char('s'), frame);

        let input = TickInput {
            now_ms: start.elapsed().as_millis() as u64,
            throttle,
            axis_x: virtual_axis(left, right),
            axis_y: virtual_axis(up, down),
            // Drain the button mailbox — read and cleared once per tick.
            button: pressed.swap(false, Ordering::Relaxed),
        };

        state = tick(&state, &input, &mut rng);

        display::render(&mut canvas, &state, sprite, input.now_ms)?;
        canvas.show(&fuel_readout(state.fuel.fuel));

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load the sprite before touching the terminal so a bad asset fails
    // with a plain error message on a sane screen.
    let sprite = ShipSprite::load(Path::new(SPRITE_PATH))?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads.  It plays the
    // role of the button interrupt handler: on a Space press it sets the
    // one pending-press flag and touches nothing else; every other event
    // goes through the channel for the game loop to interpret.
    let pressed = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel::<Event>();
    {
        let pressed = Arc::clone(&pressed);
        thread::spawn(move || loop {
            match event::read() {
                Ok(Event::Key(KeyEvent {
                    code: KeyCode::Char(' '),
                    kind: KeyEventKind::Press,
                    ..
                })) => {
                    pressed.store(true, Ordering::Relaxed);
                }
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        });
    }

    let result = game_loop(&mut out, &rx, &pressed, &sprite);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.map_err(Into::into)
}
