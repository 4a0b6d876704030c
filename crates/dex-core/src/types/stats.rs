//! Base stat block.

use serde::{Deserialize, Serialize};

/// The six base stats of a Pokémon, each in `0..=255`.
///
/// The API reports stats positionally in this field order, which
/// [`from_positional`](Self::from_positional) relies on.
///
/// # Examples
///
/// ```
/// use dex_core::BaseStats;
///
/// let pikachu = BaseStats::from_positional(&[35, 55, 40, 50, 50, 90]).unwrap();
/// assert_eq!(pikachu.total(), 320);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseStats {
    /// Hit points.
    pub hp: u8,
    /// Physical attack.
    pub attack: u8,
    /// Physical defense.
    pub defense: u8,
    /// Special attack.
    pub special_attack: u8,
    /// Special defense.
    pub special_defense: u8,
    /// Speed.
    pub speed: u8,
}

impl BaseStats {
    /// Number of stats in a block.
    pub const COUNT: usize = 6;

    /// Display labels in positional order.
    pub const LABELS: [&'static str; Self::COUNT] =
        ["HP", "Attack", "Defense", "Sp. Atk", "Sp. Def", "Speed"];

    /// Builds a stat block from values in API order.
    ///
    /// Returns `None` when fewer than six values are given. Extra values are
    /// ignored.
    #[must_use]
    pub fn from_positional(values: &[u8]) -> Option<Self> {
        match *values {
            [hp, attack, defense, special_attack, special_defense, speed, ..] => Some(Self {
                hp,
                attack,
                defense,
                special_attack,
                special_defense,
                speed,
            }),
            _ => None,
        }
    }

    /// Returns the values in API order.
    #[inline]
    #[must_use]
    pub const fn values(&self) -> [u8; Self::COUNT] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.special_attack,
            self.special_defense,
            self.speed,
        ]
    }

    /// Sum of the six stats.
    #[must_use]
    pub fn total(&self) -> u16 {
        self.values().iter().map(|v| u16::from(*v)).sum()
    }
}
