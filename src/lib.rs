//! Driver for the PreSonus FaderPort, a USB MIDI control surface with a
//! motorized fader, an endless "Pan" rotary and 24 lit buttons.
//!
//! Implement [`Handler`] for your application and open the device with
//! [`FaderPort::open`]. Inbound MIDI is decoded into button, fader, fader
//! touch and rotary events; lights, hex characters and the fader position
//! are driven through [`Controller`].
//!
//! If the "Off" button is lit the device stops sending fader updates.

pub mod config;
pub mod effects;
pub mod error;
pub mod faderport;

pub use config::Config;
pub use error::{Error, Result};
pub use faderport::{
    button_from_name, button_from_press, glyph_indices, Button, Controller, Direction, Event,
    FaderPort, Handler, MidiMessage, Output, Session, BUTTONS,
};
