//! Display orientation of the rendered device frame.

use serde::{Deserialize, Serialize};

/// One of the eight display orientations: a clockwise rotation, optionally
/// preceded by a horizontal flip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Rotate0,
    Rotate90,
    Rotate180,
    Rotate270,
    Flip0,
    Flip90,
    Flip180,
    Flip270,
}

const ALL: [Orientation; 8] = [
    Orientation::Rotate0,
    Orientation::Rotate90,
    Orientation::Rotate180,
    Orientation::Rotate270,
    Orientation::Flip0,
    Orientation::Flip90,
    Orientation::Flip180,
    Orientation::Flip270,
];

impl Orientation {
    fn bits(self) -> u8 {
        self as u8
    }

    fn from_bits(bits: u8) -> Self {
        ALL[usize::from(bits & 7)]
    }

    /// Quarter turns, 0..=3.
    #[must_use]
    pub fn rotation(self) -> u8 {
        self.bits() & 3
    }

    #[must_use]
    pub fn is_flipped(self) -> bool {
        self.bits() & 4 != 0
    }

    /// Whether width and height are swapped relative to the source frame.
    #[must_use]
    pub fn swaps_dimensions(self) -> bool {
        self.rotation() & 1 != 0
    }

    /// Compose `transform` on top of `self`.
    #[must_use]
    pub fn apply(self, transform: Orientation) -> Orientation {
        let mut rotation = self.rotation();
        // Flipping a frame already turned by 90 or 270 degrees reverses the
        // order of the composed operations, which costs an extra half turn.
        if self.swaps_dimensions() && transform.is_flipped() {
            rotation += 2;
        }
        let flip = (self.bits() ^ transform.bits()) & 4;
        let rotation = (rotation + transform.rotation()) % 4;
        Self::from_bits(flip | rotation)
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let degrees = u16::from(self.rotation()) * 90;
        if self.is_flipped() {
            write!(f, "flip{degrees}")
        } else {
            write!(f, "{degrees}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotations_accumulate() {
        let o = Orientation::Rotate90.apply(Orientation::Rotate90);
        assert_eq!(o, Orientation::Rotate180);
        let o = o.apply(Orientation::Rotate270);
        assert_eq!(o, Orientation::Rotate90);
    }

    #[test]
    fn double_flip_is_identity() {
        for o in ALL {
            assert_eq!(o.apply(Orientation::Flip0).apply(Orientation::Flip0), o);
        }
    }

    #[test]
    fn flip_after_quarter_turn() {
        assert_eq!(
            Orientation::Rotate90.apply(Orientation::Flip0),
            Orientation::Flip270
        );
        assert_eq!(
            Orientation::Rotate0.apply(Orientation::Flip180),
            Orientation::Flip180
        );
    }

    #[test]
    fn display() {
        assert_eq!(Orientation::Rotate270.to_string(), "270");
        assert_eq!(Orientation::Flip90.to_string(), "flip90");
    }
}
