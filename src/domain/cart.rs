use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};

/// One line of a cart. Within a cart, `name` is the identity key: there is
/// never more than one line per distinct name.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub name: String,
    pub unit_price: BigDecimal,
    pub image_url: String,
    pub description: String,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

/// Requested cart mutation: add one unit of the named item.
#[derive(Debug, Clone)]
pub struct NewCartItem {
    pub name: String,
    pub unit_price: BigDecimal,
    pub image_url: String,
    pub description: String,
}

/// An account's pending purchase items, ordered by `added_at`.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Sum of all quantities; 0 for an empty cart.
    pub fn total_item_count(&self) -> i64 {
        self.items.iter().map(|i| i64::from(i.quantity)).sum()
    }

    /// Sum of quantity × unit price over all lines.
    pub fn total_amount(&self) -> BigDecimal {
        self.items.iter().fold(BigDecimal::zero(), |acc, i| {
            acc + &i.unit_price * BigDecimal::from(i.quantity)
        })
    }

    /// Merge one requested unit into the cart: increment the matching line's
    /// quantity, or append a fresh line with quantity 1. The first write wins
    /// on price, image and description; later adds only accumulate quantity.
    ///
    /// The Postgres adapter enforces the same rule atomically with an
    /// `ON CONFLICT` upsert; this form exists for in-memory use.
    pub fn merge_one(&mut self, item: &NewCartItem, added_at: DateTime<Utc>) {
        match self.items.iter_mut().find(|i| i.name == item.name) {
            Some(existing) => existing.quantity += 1,
            None => self.items.push(CartItem {
                name: item.name.clone(),
                unit_price: item.unit_price.clone(),
                image_url: item.image_url.clone(),
                description: item.description.clone(),
                quantity: 1,
                added_at,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn new_item(name: &str, price: &str) -> NewCartItem {
        NewCartItem {
            name: name.to_string(),
            unit_price: BigDecimal::from_str(price).expect("valid decimal"),
            image_url: format!("https://img.example/{name}.jpg"),
            description: format!("{name} description"),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn empty_cart_counts_zero() {
        assert_eq!(Cart::default().total_item_count(), 0);
    }

    #[test]
    fn merge_appends_then_increments() {
        let mut cart = Cart::default();
        cart.merge_one(&new_item("Widget", "10"), now());
        cart.merge_one(&new_item("Widget", "10"), now());
        cart.merge_one(&new_item("Gadget", "5"), now());

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].name, "Widget");
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.items[1].name, "Gadget");
        assert_eq!(cart.items[1].quantity, 1);
        assert_eq!(cart.total_item_count(), 3);
    }

    #[test]
    fn one_line_per_distinct_name() {
        let mut cart = Cart::default();
        for _ in 0..5 {
            cart.merge_one(&new_item("Widget", "10"), now());
        }
        cart.merge_one(&new_item("Gadget", "5"), now());
        cart.merge_one(&new_item("Gadget", "5"), now());

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].quantity, 5);
        assert_eq!(cart.items[1].quantity, 2);
    }

    #[test]
    fn first_write_wins_on_price_image_description() {
        let mut cart = Cart::default();
        cart.merge_one(&new_item("Widget", "10"), now());

        let mut changed = new_item("Widget", "12.50");
        changed.image_url = "https://img.example/other.jpg".to_string();
        changed.description = "different".to_string();
        cart.merge_one(&changed, now());

        let line = &cart.items[0];
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price, BigDecimal::from_str("10").unwrap());
        assert_eq!(line.image_url, "https://img.example/Widget.jpg");
        assert_eq!(line.description, "Widget description");
    }

    #[test]
    fn total_amount_sums_quantity_times_price() {
        let mut cart = Cart::default();
        cart.merge_one(&new_item("Widget", "10.00"), now());
        cart.merge_one(&new_item("Widget", "10.00"), now());
        cart.merge_one(&new_item("Gadget", "5.00"), now());

        assert_eq!(cart.total_amount(), BigDecimal::from_str("25.00").unwrap());
    }

    #[test]
    fn merge_is_commutative_in_quantity_totals() {
        let adds = [
            new_item("A", "1"),
            new_item("B", "2"),
            new_item("A", "1"),
            new_item("C", "3"),
            new_item("B", "2"),
        ];

        let mut forward = Cart::default();
        for a in &adds {
            forward.merge_one(a, now());
        }
        let mut reverse = Cart::default();
        for a in adds.iter().rev() {
            reverse.merge_one(a, now());
        }

        assert_eq!(forward.total_item_count(), reverse.total_item_count());
        for line in &forward.items {
            let other = reverse
                .items
                .iter()
                .find(|i| i.name == line.name)
                .expect("line present in both");
            assert_eq!(line.quantity, other.quantity);
        }
    }
}
