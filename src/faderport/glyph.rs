//! Hexadecimal characters drawn with the button LEDs.
//!
//! Each glyph is the set of positions in [`BUTTONS`](super::button::BUTTONS)
//! that form the character when lit together, treating the 24 buttons as a
//! coarse dot matrix.

const GLYPHS: [(char, &[usize]); 16] = [
    ('0', &[0, 1, 3, 6, 7, 9, 10, 11, 13, 14, 15, 18, 20, 21, 22]),
    ('1', &[1, 4, 5, 9, 12, 17, 19, 20, 21, 22]),
    ('2', &[0, 1, 3, 6, 10, 12, 16, 19, 20, 21, 22, 23]),
    ('3', &[0, 1, 3, 6, 9, 11, 15, 18, 20, 21, 22]),
    ('4', &[1, 4, 5, 7, 9, 11, 12, 13, 14, 17, 20, 21]),
    ('5', &[0, 1, 2, 6, 7, 8, 9, 11, 15, 18, 20, 21, 22]),
    ('6', &[0, 1, 2, 6, 7, 8, 9, 11, 14, 15, 18, 20, 21, 22]),
    ('7', &[3, 4, 5, 6, 10, 12, 16, 23]),
    ('8', &[0, 1, 3, 6, 8, 9, 11, 14, 15, 18, 20, 21, 22]),
    ('9', &[0, 1, 3, 6, 8, 9, 10, 11, 15, 18, 20, 21, 22]),
    ('A', &[4, 5, 7, 10, 11, 12, 13, 14, 15, 18, 19, 23]),
    ('B', &[4, 5, 6, 7, 10, 12, 13, 14, 15, 18, 20, 21, 22, 23]),
    ('C', &[4, 5, 7, 10, 14, 15, 18, 20, 21, 22]),
    ('D', &[4, 5, 6, 7, 10, 11, 14, 15, 18, 20, 21, 22, 23]),
    ('E', &[4, 5, 6, 7, 13, 14, 15, 20, 21, 22, 23]),
    ('F', &[4, 5, 6, 7, 13, 14, 15, 23]),
];

/// Button positions that draw `c`, or `None` when `c` is not a hex digit.
pub fn glyph_indices(c: char) -> Option<&'static [usize]> {
    let wanted = c.to_ascii_uppercase();
    GLYPHS
        .iter()
        .find(|(glyph, _)| *glyph == wanted)
        .map(|(_, indices)| *indices)
}
