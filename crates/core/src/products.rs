//! Products

use rusty_money::{Money, iso::Currency};

/// Denormalized product snapshot carried by a cart line.
///
/// Frozen when the item is added to the cart; later catalog changes do not
/// retroactively alter a pending cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Backend product identifier
    pub id: u64,

    /// Product display name
    pub name: String,

    /// Catalog price at the time the snapshot was taken
    pub price: Money<'a, Currency>,
}

impl<'a> Product<'a> {
    /// Create a new product snapshot.
    pub fn new(id: u64, name: impl Into<String>, price: Money<'a, Currency>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}
