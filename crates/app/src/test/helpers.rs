//! Test Helpers

use crate::{
    domain::products::{
        ProductsService, ProductsServiceError,
        models::{NewProduct, Product, ProductUuid},
    },
    test::TestContext,
};

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: u64,
) -> Result<Product, ProductsServiceError> {
    ctx.app
        .products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            category: "vegetables".to_string(),
            price,
            unit: "kg".to_string(),
            stock: 50,
            description: format!("Fresh {name}"),
            image_url: String::new(),
            farmer: "farmer1".to_string(),
        })
        .await
}
