//! The slice of MIDI the FaderPort speaks.
//!
//! Buttons and the fader touch strip use polyphonic aftertouch, the fader
//! uses two control changes and the "Pan" rotary uses pitch bend. Anything
//! else is left as raw bytes for the dispatcher to report.

const POLY_AFTERTOUCH: u8 = 0xA0;
const CONTROL_CHANGE: u8 = 0xB0;
const PITCH_BEND: u8 = 0xE0;

const ALL_NOTES_OFF: u8 = 123;
const RESET_ALL_CONTROLLERS: u8 = 121;

/// Pitch bend centre; raw 14-bit values below it are negative.
const PITCH_CENTRE: i16 = 8192;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiMessage {
    /// Note-like message used for button presses, button lights and the
    /// fader touch sentinel.
    PolyAftertouch { channel: u8, note: u8, value: u8 },
    ControlChange { channel: u8, control: u8, value: u8 },
    /// `pitch` is signed, in `-8192..=8191`.
    PitchBend { channel: u8, pitch: i16 },
}

impl MidiMessage {
    /// Parse one message. Returns `None` for anything that is not one of
    /// the three shapes above, including truncated messages.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let (&status, data) = bytes.split_first()?;
        let channel = status & 0x0F;
        let (first, second) = match data {
            [first, second, ..] if first & 0x80 == 0 && second & 0x80 == 0 => (*first, *second),
            _ => return None,
        };

        match status & 0xF0 {
            POLY_AFTERTOUCH => Some(MidiMessage::PolyAftertouch {
                channel,
                note: first,
                value: second,
            }),
            CONTROL_CHANGE => Some(MidiMessage::ControlChange {
                channel,
                control: first,
                value: second,
            }),
            PITCH_BEND => {
                let raw = (i16::from(second) << 7) | i16::from(first);
                Some(MidiMessage::PitchBend {
                    channel,
                    pitch: raw - PITCH_CENTRE,
                })
            }
            _ => None,
        }
    }

    /// Wire representation of the message.
    pub fn to_bytes(&self) -> [u8; 3] {
        match *self {
            MidiMessage::PolyAftertouch {
                channel,
                note,
                value,
            } => [POLY_AFTERTOUCH | (channel & 0x0F), note & 0x7F, value & 0x7F],
            MidiMessage::ControlChange {
                channel,
                control,
                value,
            } => [CONTROL_CHANGE | (channel & 0x0F), control & 0x7F, value & 0x7F],
            MidiMessage::PitchBend { channel, pitch } => {
                let raw = (pitch.clamp(-PITCH_CENTRE, PITCH_CENTRE - 1) + PITCH_CENTRE) as u16;
                [
                    PITCH_BEND | (channel & 0x0F),
                    (raw & 0x7F) as u8,
                    (raw >> 7) as u8,
                ]
            }
        }
    }
}

/// Message that lights (`on`) or darkens the LED with the given light code.
pub fn light(note: u8, on: bool) -> MidiMessage {
    MidiMessage::PolyAftertouch {
        channel: 0,
        note,
        value: u8::from(on),
    }
}

pub fn control_change(control: u8, value: u8) -> MidiMessage {
    MidiMessage::ControlChange {
        channel: 0,
        control,
        value,
    }
}

/// "All Notes Off" and "Reset All Controllers" on every channel.
pub fn reset_messages() -> impl Iterator<Item = MidiMessage> {
    (0..16u8).flat_map(|channel| {
        [ALL_NOTES_OFF, RESET_ALL_CONTROLLERS]
            .into_iter()
            .map(move |control| MidiMessage::ControlChange {
                channel,
                control,
                value: 0,
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_poly_aftertouch_on_any_channel() {
        assert_eq!(
            MidiMessage::parse(&[0xA0, 18, 1]),
            Some(MidiMessage::PolyAftertouch {
                channel: 0,
                note: 18,
                value: 1
            })
        );
        assert_eq!(
            MidiMessage::parse(&[0xA5, 127, 0]),
            Some(MidiMessage::PolyAftertouch {
                channel: 5,
                note: 127,
                value: 0
            })
        );
    }

    #[test]
    fn parses_control_change() {
        assert_eq!(
            MidiMessage::parse(&[0xB0, 32, 64]),
            Some(MidiMessage::ControlChange {
                channel: 0,
                control: 32,
                value: 64
            })
        );
    }

    #[test]
    fn pitch_bend_is_signed_around_centre() {
        let pitch = |lsb: u8, msb: u8| match MidiMessage::parse(&[0xE0, lsb, msb]) {
            Some(MidiMessage::PitchBend { pitch, .. }) => pitch,
            other => panic!("expected pitch bend, got {other:?}"),
        };
        assert_eq!(pitch(0x00, 0x40), 0);
        assert_eq!(pitch(0x00, 0x00), -8192);
        assert_eq!(pitch(0x7F, 0x7F), 8191);
        assert_eq!(pitch(0x7B, 0x3F), -5);
    }

    #[test]
    fn rejects_other_and_truncated_messages() {
        assert_eq!(MidiMessage::parse(&[]), None);
        assert_eq!(MidiMessage::parse(&[0x90, 60, 100]), None);
        assert_eq!(MidiMessage::parse(&[0xB0, 32]), None);
        assert_eq!(MidiMessage::parse(&[0xF0, 0x7E, 0x7F, 0xF7]), None);
        assert_eq!(MidiMessage::parse(&[0xA0, 0x80, 0]), None);
    }

    #[test]
    fn outbound_messages_use_channel_zero() {
        assert_eq!(light(21, true).to_bytes(), [0xA0, 21, 1]);
        assert_eq!(light(21, false).to_bytes(), [0xA0, 21, 0]);
        assert_eq!(control_change(32, 0x7F).to_bytes(), [0xB0, 32, 0x7F]);
    }

    #[test]
    fn pitch_bend_bytes_match_parse() {
        let bend = MidiMessage::PitchBend {
            channel: 2,
            pitch: -5,
        };
        assert_eq!(bend.to_bytes(), [0xE2, 0x7B, 0x3F]);
        assert_eq!(MidiMessage::parse(&bend.to_bytes()), Some(bend));
    }

    #[test]
    fn reset_covers_all_channels() {
        let messages: Vec<[u8; 3]> = reset_messages().map(|m| m.to_bytes()).collect();
        assert_eq!(messages.len(), 32);
        assert_eq!(messages[0], [0xB0, 123, 0]);
        assert_eq!(messages[1], [0xB0, 121, 0]);
        assert_eq!(messages[31], [0xBF, 121, 0]);
    }
}
