use super::button::{button_from_press, Button};
use super::fader::{FaderCodec, FADER_LSB_CONTROL, FADER_MSB_CONTROL};
use super::message::MidiMessage;

/// Note the device sends on poly aftertouch when the fader is touched or
/// let go. It shares the message type with button presses.
pub const FADER_TOUCH_NOTE: u8 = 127;

/// Which way the "Pan" rotary was turned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    AntiClockwise,
}

impl Direction {
    /// `1` for clockwise, `-1` for anticlockwise.
    pub fn signum(self) -> i8 {
        match self {
            Direction::Clockwise => 1,
            Direction::AntiClockwise => -1,
        }
    }

    /// The device reports clockwise turns as negative pitch bend.
    pub fn from_pitch(pitch: i16) -> Self {
        if pitch < 0 {
            Direction::Clockwise
        } else {
            Direction::AntiClockwise
        }
    }
}

/// Semantic device event decoded from inbound MIDI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Button { button: Button, pressed: bool },
    FaderTouch { touched: bool },
    Fader { position: u16 },
    Rotary { direction: Direction },
}

/// Result of feeding one inbound message to [`dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Event(Event),
    /// Coarse fader half stored; the event follows with the fine half.
    FaderMsb,
    /// Not something the FaderPort protocol defines. Carries the raw bytes.
    Unhandled(Vec<u8>),
}

/// Classify one raw inbound message.
///
/// Button presses are checked before the touch sentinel; both arrive as
/// poly aftertouch and differ only in the note number.
pub fn dispatch(bytes: &[u8], codec: &mut FaderCodec) -> Dispatch {
    let Some(message) = MidiMessage::parse(bytes) else {
        return Dispatch::Unhandled(bytes.to_vec());
    };

    match message {
        MidiMessage::PolyAftertouch { note, value, .. } => {
            if let Some(button) = button_from_press(note) {
                Dispatch::Event(Event::Button {
                    button,
                    pressed: value != 0,
                })
            } else if note == FADER_TOUCH_NOTE {
                Dispatch::Event(Event::FaderTouch {
                    touched: value != 0,
                })
            } else {
                Dispatch::Unhandled(bytes.to_vec())
            }
        }
        MidiMessage::ControlChange {
            control: FADER_MSB_CONTROL,
            value,
            ..
        } => {
            codec.set_msb(value);
            Dispatch::FaderMsb
        }
        MidiMessage::ControlChange {
            control: FADER_LSB_CONTROL,
            value,
            ..
        } => Dispatch::Event(Event::Fader {
            position: codec.combine(value),
        }),
        MidiMessage::PitchBend { pitch, .. } => Dispatch::Event(Event::Rotary {
            direction: Direction::from_pitch(pitch),
        }),
        MidiMessage::ControlChange { .. } => Dispatch::Unhandled(bytes.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faderport::button::button_from_name;

    fn pitch_bend(pitch: i16) -> [u8; 3] {
        MidiMessage::PitchBend { channel: 0, pitch }.to_bytes()
    }

    #[test]
    fn button_press_and_release() {
        let mut codec = FaderCodec::new();
        let mute = button_from_name("Mute").unwrap();

        assert_eq!(
            dispatch(&[0xA0, mute.press, 0x7F], &mut codec),
            Dispatch::Event(Event::Button {
                button: mute,
                pressed: true
            })
        );
        assert_eq!(
            dispatch(&[0xA0, mute.press, 0], &mut codec),
            Dispatch::Event(Event::Button {
                button: mute,
                pressed: false
            })
        );
    }

    #[test]
    fn touch_sentinel_is_never_a_button() {
        let mut codec = FaderCodec::new();
        assert_eq!(
            dispatch(&[0xA0, FADER_TOUCH_NOTE, 1], &mut codec),
            Dispatch::Event(Event::FaderTouch { touched: true })
        );
        assert_eq!(
            dispatch(&[0xA0, FADER_TOUCH_NOTE, 0], &mut codec),
            Dispatch::Event(Event::FaderTouch { touched: false })
        );
    }

    #[test]
    fn light_codes_are_not_press_codes() {
        // "Rec" lights on 23, but 23 is the press code of "Off".
        let mut codec = FaderCodec::new();
        let rec = button_from_name("Rec").unwrap();
        match dispatch(&[0xA0, rec.light, 1], &mut codec) {
            Dispatch::Event(Event::Button { button, .. }) => assert_eq!(button.name, "Off"),
            other => panic!("expected button event, got {other:?}"),
        }
    }

    #[test]
    fn fader_needs_both_halves() {
        let mut codec = FaderCodec::new();
        assert_eq!(dispatch(&[0xB0, 0, 10], &mut codec), Dispatch::FaderMsb);
        assert_eq!(
            dispatch(&[0xB0, 32, 64], &mut codec),
            Dispatch::Event(Event::Fader { position: 84 })
        );
        assert_eq!(
            dispatch(&[0xB0, 32, 0], &mut codec),
            Dispatch::Event(Event::Fader { position: 80 })
        );
    }

    #[test]
    fn rotary_direction_is_inverted() {
        let mut codec = FaderCodec::new();
        let direction = |pitch, codec: &mut FaderCodec| match dispatch(&pitch_bend(pitch), codec) {
            Dispatch::Event(Event::Rotary { direction }) => direction.signum(),
            other => panic!("expected rotary event, got {other:?}"),
        };
        assert_eq!(direction(-5, &mut codec), 1);
        assert_eq!(direction(5, &mut codec), -1);
        assert_eq!(direction(0, &mut codec), -1);
    }

    #[test]
    fn unknown_messages_are_unhandled() {
        let mut codec = FaderCodec::new();
        for bytes in [
            vec![0xA0, 100, 1],
            vec![0xB0, 7, 100],
            vec![0x90, 60, 100],
            vec![0xF8],
            vec![],
        ] {
            assert_eq!(
                dispatch(&bytes, &mut codec),
                Dispatch::Unhandled(bytes.clone())
            );
        }
        assert_eq!(codec.pending_msb(), 0);
    }
}
