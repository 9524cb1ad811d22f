//! Light shows built from the public light operations.
//!
//! None of these remember which lights were on beforehand; they all finish
//! with every light off. The session lock is only held for one step at a
//! time, so inbound events keep flowing while an effect runs.

use std::thread;
use std::time::Duration;

use crate::error::Result;
use crate::faderport::{button_from_name, Handler, Session, BUTTONS};

pub const COUNTDOWN_INTERVAL: Duration = Duration::from_millis(500);
pub const SNAKE_STEP: Duration = Duration::from_millis(30);
pub const BLINK_INTERVAL: Duration = Duration::from_millis(200);
pub const BLINK_TIMES: usize = 3;
pub const CHASE_STEP: Duration = Duration::from_millis(80);
pub const CHASE_LIGHTS: usize = 2;
pub const CHASE_TICKS: usize = 20;

/// Outer ring of buttons the chase runs around.
const CHASE_RING: [&str; 12] = [
    "Chan Down",
    "Bank",
    "Chan Up",
    "Output",
    "Off",
    "Undo",
    "Loop",
    "User",
    "Punch",
    "Shift",
    "Mix",
    "Read",
];

/// Count down from 5 to 1, each digit shown for two thirds of `interval`.
pub fn countdown<H: Handler>(session: &Session<H>, interval: Duration) -> Result<()> {
    for c in ['5', '4', '3', '2', '1'] {
        session.char_on(c)?;
        thread::sleep(interval.mul_f64(2.0 / 3.0));
        session.all_off()?;
        thread::sleep(interval.mul_f64(1.0 / 3.0));
    }
    Ok(())
}

/// Light the buttons one by one from top to bottom, then darken them in
/// reverse.
pub fn snake<H: Handler>(session: &Session<H>, step: Duration) -> Result<()> {
    for button in BUTTONS {
        session.light_on(button)?;
        thread::sleep(step);
    }
    for button in BUTTONS.iter().rev() {
        session.light_off(*button)?;
        thread::sleep(step);
    }
    Ok(())
}

/// Flash every light `times` times; `interval` is one on/off cycle.
pub fn blink<H: Handler>(session: &Session<H>, interval: Duration, times: usize) -> Result<()> {
    let half = interval / 2;
    for _ in 0..times {
        session.all_on()?;
        thread::sleep(half);
        session.all_off()?;
        thread::sleep(half);
    }
    Ok(())
}

/// Run `lights` evenly spaced lights around the outer ring for `ticks`
/// steps. `lights` outside `1..=4` falls back to 2.
pub fn chase<H: Handler>(
    session: &Session<H>,
    step: Duration,
    lights: usize,
    ticks: usize,
) -> Result<()> {
    let ring = CHASE_RING
        .iter()
        .map(|name| button_from_name(name))
        .collect::<Result<Vec<_>>>()?;
    let lights = if (1..=4).contains(&lights) {
        lights
    } else {
        CHASE_LIGHTS
    };

    for tick in 0..ticks {
        for position in chase_positions(lights, tick) {
            session.light_on(ring[position])?;
        }
        thread::sleep(step);
        session.all_off()?;
    }
    Ok(())
}

/// Positions in the chase ring lit on `tick`.
fn chase_positions(lights: usize, tick: usize) -> Vec<usize> {
    let spacing = CHASE_RING.len() / lights;
    (0..lights)
        .map(|light| (tick + light * spacing) % CHASE_RING.len())
        .collect()
}
