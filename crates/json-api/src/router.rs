//! App Router

use salvo::Router;

use crate::{buyers, carts, checkout, orders, products};

/// Storefront routes. Catalog browsing is public; everything else is scoped to the buyer
/// named in the `x-buyer-uuid` header.
pub fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::new()
                .hoop(buyers::middleware::handler)
                .push(
                    Router::with_path("cart").get(carts::get::handler).push(
                        Router::with_path("items")
                            .post(carts::items::create::handler)
                            .push(
                                Router::with_path("{item}")
                                    .put(carts::items::update::handler)
                                    .delete(carts::items::delete::handler),
                            ),
                    ),
                )
                .push(Router::with_path("checkout").post(checkout::create::handler))
                .push(Router::with_path("orders").get(orders::index::handler)),
        )
}
