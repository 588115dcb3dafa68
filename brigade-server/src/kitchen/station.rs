//! Station routing - maps menu categories to preparation stations
//!
//! Stations are a closed enumeration; unmapped categories deterministically
//! fall back to the general station so routing is a total function.

use serde::{Deserialize, Serialize};

/// A physical kitchen preparation station
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Station {
    Grill,
    Cold,
    Hot,
    Dessert,
    Oven,
    General,
}

impl Station {
    /// All stations, in display/ticket order
    pub const ALL: [Station; 6] = [
        Station::Grill,
        Station::Cold,
        Station::Hot,
        Station::Dessert,
        Station::Oven,
        Station::General,
    ];

    /// Route a menu category to its station.
    ///
    /// Pure, total, stable: unknown or empty categories resolve to
    /// `General`, never an error.
    pub fn for_category(category: &str) -> Station {
        match category.trim().to_ascii_lowercase().as_str() {
            "kebab" | "burger" => Station::Grill,
            "pizza" => Station::Oven,
            "salad" | "drink" | "beverage" => Station::Cold,
            "dessert" => Station::Dessert,
            "soup" | "stew" | "pasta" => Station::Hot,
            _ => Station::General,
        }
    }

    /// Parse a station from its wire name (case-insensitive).
    ///
    /// Used for API station filters; returns `None` for unknown names.
    pub fn parse(value: &str) -> Option<Station> {
        match value.trim().to_ascii_lowercase().as_str() {
            "grill" => Some(Station::Grill),
            "cold" => Some(Station::Cold),
            "hot" => Some(Station::Hot),
            "dessert" => Some(Station::Dessert),
            "oven" => Some(Station::Oven),
            "general" => Some(Station::General),
            _ => None,
        }
    }

    /// Wire name of this station
    pub fn as_str(&self) -> &'static str {
        match self {
            Station::Grill => "grill",
            Station::Cold => "cold",
            Station::Hot => "hot",
            Station::Dessert => "dessert",
            Station::Oven => "oven",
            Station::General => "general",
        }
    }
}

impl std::fmt::Display for Station {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
