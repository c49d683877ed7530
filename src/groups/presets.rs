use crate::types::Symbol;
use serde::{Deserialize, Serialize};

pub const RED_NUMBERS: [Symbol; 18] = [1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36];
pub const BLACK_NUMBERS: [Symbol; 18] = [2, 4, 6, 8, 10, 11, 13, 15, 17, 20, 22, 24, 26, 28, 29, 31, 33, 35];

pub const VOISINS: [Symbol; 17] = [22, 18, 29, 7, 28, 12, 35, 3, 26, 0, 32, 15, 19, 4, 21, 2, 25];
pub const ORPHELINS: [Symbol; 8] = [1, 20, 14, 31, 9, 17, 34, 6];
pub const TIERS: [Symbol; 12] = [27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33];

/// Single-zero wheel, clockwise from zero.
pub const EUROPEAN_WHEEL: [Symbol; 37] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20,
    14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

pub const DOZENS: [(Symbol, Symbol); 3] = [(1, 12), (13, 24), (25, 36)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Green,
    Red,
    Black,
}

impl Color {
    pub fn of(symbol: Symbol) -> Self {
        if symbol == 0 {
            Self::Green
        } else if RED_NUMBERS.contains(&symbol) {
            Self::Red
        } else {
            Self::Black
        }
    }
}

/// The three classic wheel sectors; every symbol belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sector {
    Voisins,
    Orphelins,
    Tiers,
}

impl Sector {
    pub fn of(symbol: Symbol) -> Self {
        if VOISINS.contains(&symbol) {
            Self::Voisins
        } else if ORPHELINS.contains(&symbol) {
            Self::Orphelins
        } else {
            Self::Tiers
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Voisins => "Voisins",
            Self::Orphelins => "Orphelins",
            Self::Tiers => "Tiers",
        }
    }
}

/// Dozen index 0..3 for symbols 1..=36, `None` for zero.
pub fn dozen_of(symbol: Symbol) -> Option<usize> {
    DOZENS
        .iter()
        .position(|&(start, end)| (start..=end).contains(&symbol))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sectors_partition_the_wheel() {
        let mut seen = HashSet::new();
        for s in VOISINS.iter().chain(ORPHELINS.iter()).chain(TIERS.iter()) {
            assert!(seen.insert(*s), "symbol {} in two sectors", s);
        }
        assert_eq!(seen.len(), 37);
    }

    #[test]
    fn test_wheel_is_a_permutation() {
        let set: HashSet<_> = EUROPEAN_WHEEL.iter().collect();
        assert_eq!(set.len(), 37);
        assert!(EUROPEAN_WHEEL.iter().all(|&s| s <= 36));
    }

    #[test]
    fn test_colors() {
        assert_eq!(Color::of(0), Color::Green);
        assert_eq!(Color::of(32), Color::Red);
        assert_eq!(Color::of(15), Color::Black);
        assert_eq!(Sector::of(0), Sector::Voisins);
        assert_eq!(Sector::of(1), Sector::Orphelins);
        assert_eq!(Sector::of(33), Sector::Tiers);
    }

    #[test]
    fn test_dozens() {
        assert_eq!(dozen_of(0), None);
        assert_eq!(dozen_of(12), Some(0));
        assert_eq!(dozen_of(13), Some(1));
        assert_eq!(dozen_of(36), Some(2));
    }
}
