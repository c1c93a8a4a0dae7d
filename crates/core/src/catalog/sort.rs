//! Sort keys and comparators for catalog listings.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::CarRecord;

/// Sortable dimension of a catalog listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Price,
    Year,
    Mileage,
    Power,
    Name,
}

impl SortKey {
    /// Parse a sort key, returning `None` for unknown values.
    ///
    /// An unrecognized key means "no sort" (source order), never an error.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "price" => Some(Self::Price),
            "year" => Some(Self::Year),
            "mileage" | "km" => Some(Self::Mileage),
            "power" => Some(Self::Power),
            "name" | "title" => Some(Self::Name),
            _ => None,
        }
    }
}

/// Sort direction; ascending unless explicitly descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a direction; anything other than a descending marker is `Asc`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "desc" | "descending" => Self::Desc,
            _ => Self::Asc,
        }
    }
}

/// Stable sort of `cars` by `key` in `direction`.
///
/// Numeric keys compare numerically; the name key compares case-folded
/// titles. Equal records keep their source order.
pub fn sort_cars(cars: &mut [CarRecord], key: SortKey, direction: SortDirection) {
    cars.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare(a: &CarRecord, b: &CarRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Price => a.price.cmp(&b.price),
        SortKey::Year => a.year.cmp(&b.year),
        SortKey::Mileage => a.mileage_km.cmp(&b.mileage_km),
        SortKey::Power => a.power_cv.cmp(&b.power_cv),
        SortKey::Name => a.title().to_lowercase().cmp(&b.title().to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_keys() {
        assert_eq!(SortKey::parse("price"), Some(SortKey::Price));
        assert_eq!(SortKey::parse("KM"), Some(SortKey::Mileage));
        assert_eq!(SortKey::parse("title"), Some(SortKey::Name));
    }

    #[test]
    fn test_parse_unknown_key_is_none() {
        assert_eq!(SortKey::parse("horsepower"), None);
        assert_eq!(SortKey::parse(""), None);
    }

    #[test]
    fn test_direction_defaults_to_asc() {
        assert_eq!(SortDirection::parse("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("up"), SortDirection::Asc);
        assert_eq!(SortDirection::parse(""), SortDirection::Asc);
    }
}
