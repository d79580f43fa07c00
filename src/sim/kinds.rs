//! Egg and item variants
//!
//! Fixed tables: each variant carries immutable data looked up by match.

use serde::{Deserialize, Serialize};

/// Egg grades, best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EggKind {
    /// Grade 1 - free range
    Premium,
    /// Grade 2 - barn
    Standard,
    /// Grade 3 - enriched cage
    Caged,
    /// Grade 4 - battery cage
    Battery,
}

impl EggKind {
    pub const ALL: [EggKind; 4] = [
        EggKind::Premium,
        EggKind::Standard,
        EggKind::Caged,
        EggKind::Battery,
    ];

    /// Digit printed at the end of the farm code
    pub const fn label(self) -> &'static str {
        match self {
            EggKind::Premium => "1",
            EggKind::Standard => "2",
            EggKind::Caged => "3",
            EggKind::Battery => "4",
        }
    }

    /// Base score change when caught
    pub const fn score(self) -> i64 {
        match self {
            EggKind::Premium => 10,
            EggKind::Standard => 5,
            EggKind::Caged => -5,
            EggKind::Battery => -10,
        }
    }

    pub const fn is_good(self) -> bool {
        matches!(self, EggKind::Premium | EggKind::Standard)
    }

    /// Cages added when a bad egg is caught
    pub const fn cage_penalty(self) -> u32 {
        match self {
            EggKind::Premium | EggKind::Standard => 0,
            EggKind::Caged => 1,
            EggKind::Battery => 2,
        }
    }

    /// Grade color (0xRRGGBB)
    pub const fn color(self) -> u32 {
        match self {
            EggKind::Premium => 0x28A745,
            EggKind::Standard => 0x17A2B8,
            EggKind::Caged => 0xFD7E14,
            EggKind::Battery => 0xDC3545,
        }
    }
}

/// Power-up and hazard items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Pulls eggs toward the basket for a while
    Magnet,
    /// Ends the game
    Bomb,
}

impl ItemKind {
    pub const ALL: [ItemKind; 2] = [ItemKind::Magnet, ItemKind::Bomb];

    /// Effect duration in ticks (None for instant items)
    pub const fn duration(self) -> Option<u32> {
        match self {
            ItemKind::Magnet => Some(300),
            ItemKind::Bomb => None,
        }
    }

    pub const fn is_hazard(self) -> bool {
        matches!(self, ItemKind::Bomb)
    }
}
