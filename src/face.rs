//! Die faces and their LED pip patterns.
//!
//! The seven LEDs are laid out like the pips of a real die:
//!
//! ```text
//!   [A]     [B]
//!   [C] [D] [E]
//!   [F]     [G]
//! ```
//!
//! Bit `n` of a pattern drives segment `n` (A = bit 0 ... G = bit 6). Bit 7 is
//! never set, so boards sharing the display port with the button input can
//! write patterns without touching the input bit.

/// Top left.
pub const SEG_A: u8 = 1 << 0;
/// Top right.
pub const SEG_B: u8 = 1 << 1;
/// Middle left.
pub const SEG_C: u8 = 1 << 2;
/// Center pip, lit for odd faces only.
pub const SEG_D: u8 = 1 << 3;
/// Middle right.
pub const SEG_E: u8 = 1 << 4;
/// Bottom left.
pub const SEG_F: u8 = 1 << 5;
/// Bottom right.
pub const SEG_G: u8 = 1 << 6;

/// All segments off.
pub const BLANK: u8 = 0x00;

/// Mask of the bits a display pattern may use.
pub const SEGMENT_MASK: u8 = 0x7F;

/// Pip patterns, index 0 = face 1.
const PATTERNS: [u8; 6] = [
    SEG_D,
    SEG_B | SEG_F,
    SEG_B | SEG_D | SEG_F,
    SEG_A | SEG_B | SEG_F | SEG_G,
    SEG_A | SEG_B | SEG_D | SEG_F | SEG_G,
    SEG_A | SEG_B | SEG_C | SEG_E | SEG_F | SEG_G,
];

/// One of the six die outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Face {
    #[default]
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
}

impl Face {
    /// All faces in ascending order.
    pub const ALL: [Face; 6] = [
        Face::One,
        Face::Two,
        Face::Three,
        Face::Four,
        Face::Five,
        Face::Six,
    ];

    /// Returns the face at zero-based `index`, wrapping modulo 6.
    #[inline]
    pub const fn from_index(index: u8) -> Self {
        Self::ALL[(index % 6) as usize]
    }

    /// Reduces an entropy sample to a face.
    ///
    /// This is a plain `sample % 6`. Since 256 is not a multiple of 6, faces
    /// 1-4 are hit 43 times and faces 5-6 only 42 times over the full range
    /// of an 8-bit sample.
    #[inline]
    pub const fn from_entropy(sample: u8) -> Self {
        Self::from_index(sample)
    }

    /// Zero-based index (face 1 = 0).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Pip count, 1..=6.
    #[inline]
    pub const fn value(self) -> u8 {
        self as u8 + 1
    }

    /// The LED pattern for this face.
    #[inline]
    pub const fn pattern(self) -> u8 {
        PATTERNS[self as usize]
    }
}

impl core::fmt::Display for Face {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_match_pip_layout() {
        assert_eq!(Face::One.pattern(), SEG_D);
        assert_eq!(Face::Two.pattern(), SEG_B | SEG_F);
        assert_eq!(Face::Three.pattern(), SEG_B | SEG_D | SEG_F);
        assert_eq!(Face::Four.pattern(), SEG_A | SEG_B | SEG_F | SEG_G);
        assert_eq!(Face::Five.pattern(), SEG_A | SEG_B | SEG_D | SEG_F | SEG_G);
        assert_eq!(
            Face::Six.pattern(),
            SEG_A | SEG_B | SEG_C | SEG_E | SEG_F | SEG_G
        );
    }

    #[test]
    fn patterns_are_distinct() {
        for (i, a) in Face::ALL.iter().enumerate() {
            for b in &Face::ALL[i + 1..] {
                assert_ne!(a.pattern(), b.pattern());
            }
        }
    }

    #[test]
    fn center_pip_tracks_parity() {
        for face in Face::ALL {
            let lit = face.pattern() & SEG_D != 0;
            assert_eq!(lit, face.value() % 2 == 1, "face {}", face.value());
        }
    }

    #[test]
    fn pip_count_matches_value() {
        for face in Face::ALL {
            assert_eq!(face.pattern().count_ones(), face.value() as u32);
            assert_eq!(face.pattern() & !SEGMENT_MASK, 0);
        }
    }

    #[test]
    fn entropy_reduction_is_modulo_six() {
        assert_eq!(Face::from_entropy(0), Face::One);
        assert_eq!(Face::from_entropy(5), Face::Six);
        assert_eq!(Face::from_entropy(6), Face::One);
        assert_eq!(Face::from_entropy(255), Face::Four);
    }

    #[test]
    fn entropy_reduction_bias_is_bounded() {
        let mut hits = [0u16; 6];
        for sample in 0..=255u8 {
            hits[Face::from_entropy(sample).index() as usize] += 1;
        }
        assert_eq!(hits, [43, 43, 43, 43, 42, 42]);
    }
}
