//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use farmgate::pricing::{PricingError, find_currency};
use farmgate_app::{
    context::AppContext,
    domain::{
        buyers::BuyerUuid,
        carts::{
            MockCartsService,
            models::{Cart, CartItem, CartItemUuid},
        },
        checkout::MockCheckoutService,
        orders::{
            MockOrdersService,
            models::{Order, OrderItem, OrderItemUuid, OrderStatus, OrderUuid, PaymentMethod},
        },
        products::{
            MockProductsService,
            models::{Product, ProductUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_BUYER_UUID: BuyerUuid = BuyerUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_buyer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_buyer_uuid(TEST_BUYER_UUID);
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn make_product(uuid: ProductUuid, name: &str, price: u64) -> Product {
    Product {
        uuid,
        name: name.to_string(),
        category: "vegetables".to_string(),
        price,
        unit: "kg".to_string(),
        stock: 50,
        description: format!("Fresh {name}"),
        image_url: String::new(),
        farmer: "farmer1".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart(lines: Vec<(Product, u32)>) -> Result<Cart, PricingError> {
    Cart::from_items(
        lines
            .into_iter()
            .map(|(product, quantity)| CartItem {
                uuid: CartItemUuid::new(),
                buyer: TEST_BUYER_UUID,
                product_uuid: product.uuid,
                quantity,
                product: Some(product),
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            })
            .collect(),
    )
}

/// A pending cash order with one item per `(product, quantity, price_at_purchase)`.
pub(crate) fn make_order(lines: Vec<(Product, u32, u64)>) -> Order {
    let uuid = OrderUuid::new();

    let total_amount = lines
        .iter()
        .map(|(_, quantity, price)| u64::from(*quantity) * price)
        .sum();

    Order {
        uuid,
        buyer: TEST_BUYER_UUID,
        total_amount,
        status: OrderStatus::Pending,
        delivery_address: "12 Orchard Lane".to_string(),
        payment_method: PaymentMethod::Cash,
        items: lines
            .into_iter()
            .map(|(product, quantity, price_at_purchase)| OrderItem {
                uuid: OrderItemUuid::new(),
                order_uuid: uuid,
                product_uuid: product.uuid,
                quantity,
                price_at_purchase,
                product: Some(product),
                created_at: Timestamp::UNIX_EPOCH,
            })
            .collect(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_search_products().never();
    products.expect_create_product().never();

    products
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_to_cart().never();
    carts.expect_update_quantity().never();
    carts.expect_remove_from_cart().never();

    carts
}

fn strict_checkout_mock() -> MockCheckoutService {
    let mut checkout = MockCheckoutService::new();

    checkout.expect_checkout().never();

    checkout
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_list_orders().never();

    orders
}

fn state(
    products: MockProductsService,
    carts: MockCartsService,
    checkout: MockCheckoutService,
    orders: MockOrdersService,
) -> Arc<State> {
    let app = AppContext {
        products: Arc::new(products),
        carts: Arc::new(carts),
        checkout: Arc::new(checkout),
        orders: Arc::new(orders),
    };

    let currency = find_currency("USD").unwrap_or_else(|| unreachable!("USD is supported"));

    State::from_app_context(app, currency)
}

fn service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_buyer)
            .push(route),
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    service(
        state(
            products,
            strict_carts_mock(),
            strict_checkout_mock(),
            strict_orders_mock(),
        ),
        route,
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    service(
        state(
            strict_products_mock(),
            carts,
            strict_checkout_mock(),
            strict_orders_mock(),
        ),
        route,
    )
}

pub(crate) fn checkout_service(
    carts: MockCartsService,
    checkout: MockCheckoutService,
    route: Router,
) -> Service {
    service(
        state(strict_products_mock(), carts, checkout, strict_orders_mock()),
        route,
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    service(
        state(
            strict_products_mock(),
            strict_carts_mock(),
            strict_checkout_mock(),
            orders,
        ),
        route,
    )
}
