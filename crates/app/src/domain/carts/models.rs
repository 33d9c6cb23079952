//! Cart Models

use jiff::Timestamp;

use farmgate::pricing::{PricedLine, PricingError, totals};

use crate::{
    domain::{
        buyers::BuyerUuid,
        products::models::{Product, ProductUuid},
    },
    uuids::TypedUuid,
};

/// Largest quantity a cart line may hold, bounded by the `INTEGER` quantity column.
pub const MAX_QUANTITY: u32 = 2_147_483_647;

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItem>;

/// Cart Item Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub uuid: CartItemUuid,
    pub buyer: BuyerUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,

    /// The product as currently listed, `None` when it no longer resolves.
    pub product: Option<Product>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PricedLine for CartItem {
    fn unit_price(&self) -> Option<u64> {
        self.product.as_ref().map(|product| product.price)
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// New Cart Item Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}

/// Cart Model
///
/// A derived view over a buyer's persisted items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    pub items: Vec<CartItem>,

    /// Sum of unit price × quantity, in minor units.
    pub total: u64,

    /// Sum of quantities.
    pub count: u64,
}

impl Cart {
    /// Build a cart from its items, deriving the totals.
    ///
    /// # Errors
    ///
    /// Returns an error when the total overflows.
    pub fn from_items(items: Vec<CartItem>) -> Result<Self, PricingError> {
        let totals = totals(&items)?;

        Ok(Self {
            items,
            total: totals.total,
            count: totals.count,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The line for `product`, if it is in the cart.
    pub fn item_for_product(&self, product: ProductUuid) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_uuid == product)
    }
}
