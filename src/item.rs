// 📦 Item Entity - one catalog entry
//
// Identity (id, name) and the variant attributes are fixed at construction.
// Stock and pricing values (quantity, price, weight, unit, category) can change.

use chrono::{DateTime, Months, Utc};
use std::cmp::Ordering;
use std::fmt;

pub const DEFAULT_UNIT: &str = "pcs";
pub const GENERAL: &str = "General";
pub const ELECTRONICS: &str = "Electronics";
pub const GROCERY: &str = "Grocery";

/// Months a grocery item stays fresh after it is registered.
pub const SHELF_LIFE_MONTHS: u32 = 6;

// ============================================================================
// ITEM KIND (category-specific attributes)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    General,
    Electronics {
        warranty_months: i32,
        brand: String,
    },
    Grocery {
        expiry_date: DateTime<Utc>,
        perishable: bool,
    },
}

impl ItemKind {
    /// Category label forced onto items of this kind.
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::General => GENERAL,
            ItemKind::Electronics { .. } => ELECTRONICS,
            ItemKind::Grocery { .. } => GROCERY,
        }
    }

    /// Grocery attributes with the expiry date derived from `registered_at`.
    pub fn grocery_from(registered_at: DateTime<Utc>, perishable: bool) -> Self {
        let expiry_date = registered_at
            .checked_add_months(Months::new(SHELF_LIFE_MONTHS))
            .unwrap_or(registered_at);
        ItemKind::Grocery {
            expiry_date,
            perishable,
        }
    }
}

// ============================================================================
// ITEM
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: i32,
    name: String,
    price: f64,
    quantity: i32,
    weight: f64,
    unit: String,
    category: String,
    kind: ItemKind,
}

impl Item {
    /// General item with default weight, unit and category.
    ///
    /// Sessions mint items through `ItemFactory`, which assigns the id and
    /// counts the construction.
    pub(crate) fn new(id: i32, name: impl Into<String>, price: f64, quantity: i32) -> Self {
        Item {
            id,
            name: name.into(),
            price,
            quantity,
            weight: 0.0,
            unit: DEFAULT_UNIT.to_string(),
            category: GENERAL.to_string(),
            kind: ItemKind::General,
        }
    }

    /// General item with explicit weight and unit.
    pub(crate) fn with_measure(
        id: i32,
        name: impl Into<String>,
        price: f64,
        quantity: i32,
        weight: f64,
        unit: impl Into<String>,
    ) -> Self {
        let mut item = Self::new(id, name, price, quantity);
        item.weight = weight;
        item.unit = unit.into();
        item
    }

    pub(crate) fn electronics(
        id: i32,
        name: impl Into<String>,
        price: f64,
        quantity: i32,
        warranty_months: i32,
        brand: impl Into<String>,
    ) -> Self {
        Self::new(id, name, price, quantity).into_variant(ItemKind::Electronics {
            warranty_months,
            brand: brand.into(),
        })
    }

    /// Grocery item expiring six months from now.
    pub(crate) fn grocery(
        id: i32,
        name: impl Into<String>,
        price: f64,
        quantity: i32,
        weight: f64,
        unit: impl Into<String>,
        perishable: bool,
    ) -> Self {
        Self::with_measure(id, name, price, quantity, weight, unit)
            .into_variant(ItemKind::grocery_from(Utc::now(), perishable))
    }

    /// Attach variant attributes. The category label always follows the kind,
    /// whatever was set before.
    pub fn into_variant(mut self, kind: ItemKind) -> Self {
        self.category = kind.label().to_string();
        self.kind = kind;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn set_quantity(&mut self, quantity: i32) {
        self.quantity = quantity;
    }

    pub fn set_price(&mut self, price: f64) {
        self.price = price;
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    pub fn set_unit(&mut self, unit: impl Into<String>) {
        self.unit = unit.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    /// Stock value, recomputed on every call.
    pub fn total_value(&self) -> f64 {
        self.price * self.quantity as f64
    }

    /// Lowercased name used for ordering and search.
    pub fn name_key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Case-insensitive name ordering. Equal names compare as `Equal`.
    pub fn cmp_by_name(&self, other: &Item) -> Ordering {
        self.name_key().cmp(&other.name_key())
    }

    /// Ascending price ordering. Every NaN ties with every other NaN and
    /// sorts after all numbers; `-0.0` sorts before `0.0`.
    pub fn cmp_by_price(&self, other: &Item) -> Ordering {
        let (a, b) = (self.price, other.price);
        a.is_nan()
            .cmp(&b.is_nan())
            .then_with(|| if a.is_nan() { Ordering::Equal } else { a.total_cmp(&b) })
    }

    /// Details record for this item, stamped with the current time.
    pub fn details(&self, supplier: impl Into<String>) -> ItemDetails {
        ItemDetails::new(self.id, supplier, Utc::now())
    }

    /// Fixed-width display row. The trailing columns depend on the kind.
    pub fn render(&self) -> String {
        let head = format!(
            "{:<5} | {:<20} | {:<5} | ₹{:<10.2}",
            self.id, self.name, self.quantity, self.price
        );
        match &self.kind {
            ItemKind::General => format!("{} | {:.2} {}", head, self.weight, self.unit),
            ItemKind::Electronics {
                warranty_months,
                brand,
            } => format!("{} | {} | {} months", head, brand, warranty_months),
            ItemKind::Grocery { perishable, .. } => format!(
                "{} | {:.2} {} | {}",
                head,
                self.weight,
                self.unit,
                if *perishable { "Perishable" } else { "Non-Perishable" }
            ),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Column titles matching `Item::render`.
pub fn render_header() -> String {
    format!(
        "{:<5} | {:<20} | {:<5} | {:<12} | {:<15}",
        "ID", "Name", "Qty", "Price", "Weight"
    )
}

// ============================================================================
// ITEM DETAILS
// ============================================================================

/// Supplier and registration date for an item. Holds the item id by value only.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetails {
    pub item_id: i32,
    pub supplier: String,
    pub added_date: DateTime<Utc>,
}

impl ItemDetails {
    pub fn new(item_id: i32, supplier: impl Into<String>, added_date: DateTime<Utc>) -> Self {
        ItemDetails {
            item_id,
            supplier: supplier.into(),
            added_date,
        }
    }
}

// ============================================================================
// ITEM FACTORY
// ============================================================================

/// Mints items for one session: assigns ids 1, 2, 3, ... and counts every
/// item it constructs. The count never goes down, even when items are
/// removed from the catalog. Clones are not counted.
#[derive(Debug, Clone)]
pub struct ItemFactory {
    next_id: i32,
    constructed: usize,
}

impl ItemFactory {
    pub fn new() -> Self {
        ItemFactory {
            next_id: 1,
            constructed: 0,
        }
    }

    /// Id the next minted item will receive.
    pub fn next_id(&self) -> i32 {
        self.next_id
    }

    /// Number of items constructed so far.
    pub fn constructed(&self) -> usize {
        self.constructed
    }

    fn mint(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        self.constructed += 1;
        id
    }

    pub fn general(
        &mut self,
        name: impl Into<String>,
        price: f64,
        quantity: i32,
        weight: f64,
        unit: impl Into<String>,
    ) -> Item {
        let id = self.mint();
        Item::with_measure(id, name, price, quantity, weight, unit)
    }

    pub fn electronics(
        &mut self,
        name: impl Into<String>,
        price: f64,
        quantity: i32,
        warranty_months: i32,
        brand: impl Into<String>,
    ) -> Item {
        let id = self.mint();
        Item::electronics(id, name, price, quantity, warranty_months, brand)
    }

    pub fn grocery(
        &mut self,
        name: impl Into<String>,
        price: f64,
        quantity: i32,
        weight: f64,
        unit: impl Into<String>,
        perishable: bool,
    ) -> Item {
        let id = self.mint();
        Item::grocery(id, name, price, quantity, weight, unit, perishable)
    }
}

impl Default for ItemFactory {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_item_defaults() {
        let item = Item::new(1, "Pencil", 0.5, 100);

        assert_eq!(item.id(), 1);
        assert_eq!(item.weight(), 0.0);
        assert_eq!(item.unit(), "pcs");
        assert_eq!(item.category(), "General");
        assert_eq!(item.kind(), &ItemKind::General);
    }

    #[test]
    fn test_item_with_measure() {
        let item = Item::with_measure(2, "Rice", 60.0, 10, 5.0, "kg");

        assert_eq!(item.weight(), 5.0);
        assert_eq!(item.unit(), "kg");
        assert_eq!(item.category(), "General");
    }

    #[test]
    fn test_total_value_follows_mutations() {
        let mut item = Item::new(1, "Pen", 2.5, 4);
        assert_eq!(item.total_value(), 10.0);

        item.set_quantity(10);
        assert_eq!(item.total_value(), 25.0);

        item.set_price(-1.0);
        assert_eq!(item.total_value(), -10.0);
    }

    #[test]
    fn test_electronics_category_is_forced() {
        let item = Item::new(3, "Phone", 15000.0, 2)
            .with_category("Toys")
            .into_variant(ItemKind::Electronics {
                warranty_months: 12,
                brand: "Acme".to_string(),
            });

        assert_eq!(item.category(), "Electronics");

        let direct = Item::electronics(4, "Laptop", 50000.0, 1, 24, "Zen");
        assert_eq!(direct.category(), "Electronics");
    }

    #[test]
    fn test_grocery_expires_six_months_after_registration() {
        let registered = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let kind = ItemKind::grocery_from(registered, true);

        match kind {
            ItemKind::Grocery {
                expiry_date,
                perishable,
            } => {
                assert_eq!(expiry_date, Utc.with_ymd_and_hms(2024, 7, 15, 10, 0, 0).unwrap());
                assert!(perishable);
            }
            other => panic!("expected grocery kind, got {:?}", other),
        }
    }

    #[test]
    fn test_grocery_constructor() {
        let before = Utc::now();
        let item = Item::grocery(5, "Milk", 30.0, 20, 1.0, "L", true);

        assert_eq!(item.category(), "Grocery");
        assert_eq!(item.unit(), "L");
        match item.kind() {
            ItemKind::Grocery { expiry_date, .. } => {
                assert!(*expiry_date >= before + Duration::days(180));
                assert!(*expiry_date <= Utc::now() + Duration::days(185));
            }
            other => panic!("expected grocery kind, got {:?}", other),
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Item::with_measure(6, "Flour", 40.0, 3, 1.0, "kg");
        let mut copy = original.clone();
        copy.set_quantity(99);
        copy.set_unit("g");

        assert_eq!(original.quantity(), 3);
        assert_eq!(original.unit(), "kg");
        assert_eq!(copy.id(), original.id());
        assert_eq!(copy.name(), original.name());
    }

    #[test]
    fn test_cmp_by_name_ignores_case() {
        let a = Item::new(1, "apple", 1.0, 1);
        let b = Item::new(2, "Banana", 1.0, 1);
        let a2 = Item::new(3, "APPLE", 9.0, 9);

        assert_eq!(a.cmp_by_name(&b), Ordering::Less);
        assert_eq!(b.cmp_by_name(&a), Ordering::Greater);
        assert_eq!(a.cmp_by_name(&a2), Ordering::Equal);
        assert_eq!(a2.name_key(), "apple");
    }

    #[test]
    fn test_cmp_by_price_puts_every_nan_last() {
        let negative_nan: f64 = "-NaN".parse().unwrap();
        let neg = Item::new(1, "A", -1.0, 1);
        let pos = Item::new(2, "B", 5.0, 1);
        let nan = Item::new(3, "C", f64::NAN, 1);
        let signed_nan = Item::new(4, "D", negative_nan, 1);

        assert!(negative_nan.is_sign_negative());
        assert_eq!(signed_nan.cmp_by_price(&neg), Ordering::Greater);
        assert_eq!(nan.cmp_by_price(&pos), Ordering::Greater);
        assert_eq!(nan.cmp_by_price(&signed_nan), Ordering::Equal);
        assert_eq!(signed_nan.cmp_by_price(&nan), Ordering::Equal);

        let minus_zero = Item::new(5, "E", -0.0, 1);
        let zero = Item::new(6, "F", 0.0, 1);
        assert_eq!(minus_zero.cmp_by_price(&zero), Ordering::Less);
    }

    #[test]
    fn test_render_general() {
        let item = Item::with_measure(1, "Rice", 60.0, 10, 5.0, "kg");
        assert_eq!(
            item.render(),
            "1     | Rice                 | 10    | ₹60.00      | 5.00 kg"
        );
    }

    #[test]
    fn test_render_electronics() {
        let item = Item::electronics(2, "Phone", 1999.5, 3, 12, "Acme");
        assert_eq!(
            item.render(),
            "2     | Phone                | 3     | ₹1999.50    | Acme | 12 months"
        );
    }

    #[test]
    fn test_render_grocery() {
        let item = Item::grocery(3, "Salt", 20.0, 7, 1.0, "kg", false);
        assert!(item.render().ends_with("| 1.00 kg | Non-Perishable"));

        let fresh = Item::grocery(4, "Milk", 30.0, 7, 1.0, "L", true);
        assert!(fresh.render().ends_with("| 1.00 L | Perishable"));
    }

    #[test]
    fn test_details_carry_item_id() {
        let item = Item::new(42, "Chair", 500.0, 1);
        let details = item.details("Woodworks");

        assert_eq!(details.item_id, 42);
        assert_eq!(details.supplier, "Woodworks");
    }

    #[test]
    fn test_factory_assigns_ids_and_counts() {
        let mut factory = ItemFactory::new();
        assert_eq!(factory.next_id(), 1);

        let a = factory.general("A", 1.0, 1, 0.0, "pcs");
        let b = factory.electronics("B", 1.0, 1, 6, "X");
        let c = factory.grocery("C", 1.0, 1, 1.0, "kg", false);

        assert_eq!((a.id(), b.id(), c.id()), (1, 2, 3));
        assert_eq!(factory.constructed(), 3);
        assert_eq!(factory.next_id(), 4);

        let _copy = a.clone();
        assert_eq!(factory.constructed(), 3);
    }
}
