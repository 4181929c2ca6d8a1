// colors.rs
// The fixed paint palette

use palette::Srgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaintColor {
    Pink,
    Violet,
    Gold,
    Emerald,
    Blue,
}

impl PaintColor {
    pub const ALL: [PaintColor; 5] = [
        PaintColor::Pink,
        PaintColor::Violet,
        PaintColor::Gold,
        PaintColor::Emerald,
        PaintColor::Blue,
    ];

    /// Uniformly pick a palette entry.
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self::ALL[rng.usize(..Self::ALL.len())]
    }

    pub fn srgb(self) -> Srgb<u8> {
        match self {
            PaintColor::Pink => Srgb::new(0xec, 0x48, 0x99),
            PaintColor::Violet => Srgb::new(0x8b, 0x5c, 0xf6),
            PaintColor::Gold => Srgb::new(0xf5, 0x9e, 0x0b),
            PaintColor::Emerald => Srgb::new(0x10, 0xb9, 0x81),
            PaintColor::Blue => Srgb::new(0x3b, 0x82, 0xf6),
        }
    }
}

/// Background the trail fade paints toward.
pub fn fade_color() -> Srgb<u8> {
    Srgb::new(0, 0, 0)
}
