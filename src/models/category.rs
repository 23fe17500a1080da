//! Budget category model
//!
//! The category set is fixed. Each category carries a stable integer id that
//! doubles as its menu index on the command line.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A spending classification with its own limit per account
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetCategory {
    GamesEntertainment,
    ClothingAccessories,
    EatingOut,
    Miscellaneous,
}

impl BudgetCategory {
    /// All categories in id order
    pub const ALL: [BudgetCategory; 4] = [
        Self::GamesEntertainment,
        Self::ClothingAccessories,
        Self::EatingOut,
        Self::Miscellaneous,
    ];

    /// Stable numeric id (1-4)
    pub const fn id(&self) -> u8 {
        match self {
            Self::GamesEntertainment => 1,
            Self::ClothingAccessories => 2,
            Self::EatingOut => 3,
            Self::Miscellaneous => 4,
        }
    }

    /// Look up a category by its numeric id
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    /// Short machine-friendly key, as accepted on the command line
    pub const fn key(&self) -> &'static str {
        match self {
            Self::GamesEntertainment => "games",
            Self::ClothingAccessories => "clothing",
            Self::EatingOut => "eating-out",
            Self::Miscellaneous => "misc",
        }
    }

    /// Parse a category from its id, key, or full name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(id) = s.parse::<u8>() {
            return Self::from_id(id);
        }

        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "games" | "gamesentertainment" | "gamesandentertainment" | "entertainment" => {
                Some(Self::GamesEntertainment)
            }
            "clothing" | "clothingaccessories" | "clothingandaccessories" | "accessories" => {
                Some(Self::ClothingAccessories)
            }
            "eatingout" | "eating" | "food" => Some(Self::EatingOut),
            "misc" | "miscellaneous" | "other" => Some(Self::Miscellaneous),
            _ => None,
        }
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GamesEntertainment => write!(f, "Games & Entertainment"),
            Self::ClothingAccessories => write!(f, "Clothing & Accessories"),
            Self::EatingOut => write!(f, "Eating Out"),
            Self::Miscellaneous => write!(f, "Miscellaneous"),
        }
    }
}
