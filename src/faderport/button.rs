use crate::error::{Error, Result};

/// A FaderPort button.
///
/// `press` is the note the device sends when the button goes down or up,
/// `light` is the note used to drive its LED. The two are separate number
/// spaces and rarely agree for the same button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Button {
    /// Label printed on the physical button.
    pub name: &'static str,
    pub press: u8,
    pub light: u8,
}

impl Button {
    const fn new(name: &'static str, press: u8, light: u8) -> Self {
        Self { name, press, light }
    }
}

/// Every button on the device, ordered to snake from the top of the
/// surface to the bottom. Glyphs and the snake effect index into this
/// order, so it must not be rearranged.
pub const BUTTONS: [Button; 24] = [
    Button::new("Mute", 18, 21),
    Button::new("Solo", 17, 22),
    Button::new("Rec", 16, 23),
    Button::new("Output", 22, 17),
    Button::new("Chan Up", 21, 18),
    Button::new("Bank", 20, 19),
    Button::new("Chan Down", 19, 20),
    Button::new("Read", 10, 13),
    Button::new("Write", 9, 14),
    Button::new("Touch", 8, 15),
    Button::new("Off", 23, 16),
    Button::new("Undo", 14, 9),
    Button::new("Trns", 13, 10),
    Button::new("Proj", 12, 11),
    Button::new("Mix", 11, 12),
    Button::new("Shift", 2, 5),
    Button::new("Punch", 1, 6),
    Button::new("User", 0, 7),
    Button::new("Loop", 15, 8),
    Button::new("Record", 7, 0),
    Button::new("Play", 6, 1),
    Button::new("Stop", 5, 2),
    Button::new("Fast Fwd", 4, 3),
    Button::new("Rewind", 3, 4),
];

/// Alternative names, mapped to the canonical button name.
const ALIASES: &[(&str, &str)] = &[("Rec Arm", "Rec")];

/// Look a button up by its label. Case is ignored and aliases resolve to
/// the button they stand for.
pub fn button_from_name(name: &str) -> Result<Button> {
    let wanted = title_case(name);
    let canonical = ALIASES
        .iter()
        .find(|(alias, _)| *alias == wanted)
        .map(|(_, target)| *target)
        .unwrap_or(wanted.as_str());

    BUTTONS
        .iter()
        .find(|button| button.name == canonical)
        .copied()
        .ok_or_else(|| Error::NotFound(name.to_string()))
}

/// Look a button up by the note it sends. Unknown notes (the fader touch
/// sentinel among them) give `None`.
pub fn button_from_press(press: u8) -> Option<Button> {
    BUTTONS.iter().find(|button| button.press == press).copied()
}

/// Upper-case the first letter of every word and lower-case the rest.
fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_word = false;
    for ch in raw.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_button_round_trips_through_press_code() {
        for button in BUTTONS {
            let by_name = button_from_name(button.name).unwrap();
            assert_eq!(button_from_press(by_name.press), Some(by_name));
        }
    }

    #[test]
    fn codes_are_unique_within_each_space() {
        let presses: HashSet<u8> = BUTTONS.iter().map(|b| b.press).collect();
        let lights: HashSet<u8> = BUTTONS.iter().map(|b| b.light).collect();
        assert_eq!(presses.len(), BUTTONS.len());
        assert_eq!(lights.len(), BUTTONS.len());
    }

    #[test]
    fn rec_arm_is_rec() {
        assert_eq!(
            button_from_name("Rec Arm").unwrap(),
            button_from_name("Rec").unwrap()
        );
        assert_eq!(button_from_name("rec arm").unwrap().name, "Rec");
    }

    #[test]
    fn name_lookup_ignores_case() {
        assert_eq!(button_from_name("fast fwd").unwrap().press, 4);
        assert_eq!(button_from_name("CHAN DOWN").unwrap().light, 20);
        assert_eq!(button_from_name("tRNS").unwrap().name, "Trns");
    }

    #[test]
    fn unknown_name_is_not_found() {
        match button_from_name("Eject") {
            Err(Error::NotFound(name)) => assert_eq!(name, "Eject"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn fader_touch_sentinel_is_not_a_button() {
        assert_eq!(button_from_press(127), None);
        assert_eq!(button_from_press(24), None);
    }
}
