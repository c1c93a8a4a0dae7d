//! Shopping cart with add-time snapshots.

use serde::{Deserialize, Serialize};

use crate::types::{CarId, CarRecord};

/// One cart line.
///
/// `title`, `price` and `image` are a snapshot captured when the car was
/// added: a later price change on the live record does not retroactively
/// alter an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub car: CarId,
    pub title: String,
    /// Unit price in whole euros at add time.
    pub price: u32,
    pub image: Option<String>,
    pub quantity: u32,
}

impl CartLine {
    /// Line total, `price * quantity`.
    #[must_use]
    pub const fn line_total(&self) -> u64 {
        self.price as u64 * self.quantity as u64
    }
}

/// The shopping cart.
///
/// Adding the same car twice collapses into one line with an incremented
/// quantity; removal deletes the whole line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Add `car` to the cart.
    ///
    /// Increments the quantity of an existing line for the same id, else
    /// appends a new line with quantity 1 and a display snapshot.
    pub fn add(&mut self, car: &CarRecord) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.car == car.id) {
            line.quantity += 1;
            return;
        }

        self.lines.push(CartLine {
            car: car.id,
            title: car.title(),
            price: car.price,
            image: car.primary_image().map(String::from),
            quantity: 1,
        });
    }

    /// Remove the line for `id` entirely (not a decrement).
    ///
    /// Returns whether a line was removed.
    pub fn remove(&mut self, id: CarId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.car != id);
        self.lines.len() != before
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `price * quantity` across all lines, in whole euros.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total number of items (quantities summed).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{BodyStyle, CarStatus, FuelType, Transmission};

    fn car(id: i64, price: u32) -> CarRecord {
        CarRecord {
            id: CarId::new(id),
            slug: format!("car-{id}"),
            brand: "Fiat".to_string(),
            model: "Panda".to_string(),
            year: 2021,
            price,
            mileage_km: 30_000,
            fuel: FuelType::Petrol,
            transmission: Transmission::Manual,
            power_cv: 70,
            color: "white".to_string(),
            body: BodyStyle::Citycar,
            doors: 5,
            seats: 4,
            images: vec!["panda.jpg".to_string()],
            status: CarStatus::Active,
            featured: false,
            description: String::new(),
        }
    }

    #[test]
    fn test_repeated_add_collapses_into_one_line() {
        let mut cart = Cart::default();
        let panda = car(1, 9_500);

        cart.add(&panda);
        cart.add(&panda);

        assert_eq!(cart.lines().len(), 1);
        let line = cart.lines().first().unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(cart.total(), 19_000);
    }

    #[test]
    fn test_snapshot_is_decoupled_from_live_record() {
        let mut cart = Cart::default();
        let mut panda = car(1, 9_500);
        cart.add(&panda);

        // Price drop after the line was created.
        panda.price = 7_000;

        assert_eq!(cart.lines().first().unwrap().price, 9_500);
        assert_eq!(cart.total(), 9_500);
    }

    #[test]
    fn test_remove_deletes_the_whole_line() {
        let mut cart = Cart::default();
        let panda = car(1, 9_500);
        cart.add(&panda);
        cart.add(&panda);
        cart.add(&car(2, 12_000));

        assert!(cart.remove(CarId::new(1)));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total(), 12_000);
        assert!(!cart.remove(CarId::new(1)));
    }

    #[test]
    fn test_clear_and_counts() {
        let mut cart = Cart::default();
        cart.add(&car(1, 1_000));
        cart.add(&car(1, 1_000));
        cart.add(&car(2, 2_000));
        assert_eq!(cart.item_count(), 3);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn test_snapshot_captures_title_and_primary_image() {
        let mut cart = Cart::default();
        cart.add(&car(1, 9_500));

        let line = cart.lines().first().unwrap();
        assert_eq!(line.title, "Fiat Panda");
        assert_eq!(line.image.as_deref(), Some("panda.jpg"));
    }
}
