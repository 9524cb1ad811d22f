mod button;
mod dispatch;
mod fader;
mod glyph;
mod message;
mod ports;
mod session;

pub use button::{button_from_name, button_from_press, Button, BUTTONS};
pub use dispatch::{dispatch, Direction, Dispatch, Event, FADER_TOUCH_NOTE};
pub use fader::{FaderCodec, FADER_LSB_CONTROL, FADER_MAX, FADER_MSB_CONTROL};
pub use glyph::glyph_indices;
pub use message::MidiMessage;
pub use ports::{select_port, FaderPort};
pub use session::{Controller, Handler, Output, Session};
