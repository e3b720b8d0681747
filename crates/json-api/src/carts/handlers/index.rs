//! Cart Page Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{
    carts::resources::VendorCartGroupResource,
    extensions::*,
    pages::{Page, SharedProps, shared_props},
};

/// Front-end component for the cart page.
pub(crate) const COMPONENT: &str = "Cart/Index";

/// Props for the cart page.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartIndexProps {
    #[serde(flatten)]
    pub shared: SharedProps,

    /// Cart lines grouped by vendor.
    #[serde(rename = "cartItems")]
    pub cart_items: Vec<VendorCartGroupResource>,
}

/// Cart Page Handler
///
/// Returns the cart grouped by vendor.
#[endpoint(tags("cart"), summary = "Cart Page")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Page<CartIndexProps>>, StatusError> {
    let shared = shared_props(req, depot).await?;

    let groups = depot
        .cart_session_or_500()?
        .grouped()
        .await
        .unwrap_or_else(|source| {
            error!("failed to group cart for cart page: {source}");

            Vec::new()
        });

    Ok(Json(Page::new(
        COMPONENT,
        req,
        CartIndexProps {
            shared,
            cart_items: groups.iter().map(Into::into).collect(),
        },
    )))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use uuid::Uuid;

    use storefront_app::domain::{
        carts::stores::GuestCartEntry,
        products::{MockProductsService, records::ProductId},
    };

    use crate::{
        carts::handlers::selection_from,
        test_helpers::{
            cart_cookie_header, expect_cart_reads, make_summary, make_summary_for, page_service,
        },
    };

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        page_service(products, Router::with_path("cart").get(handler))
    }

    fn line(product: i64, option: i64, quantity: u32) -> GuestCartEntry {
        GuestCartEntry {
            id: Uuid::now_v7(),
            product_id: ProductId::from_i64(product),
            quantity,
            price: Decimal::new(1999, 2),
            option_ids: selection_from([(1, option)].into()),
        }
    }

    #[tokio::test]
    async fn test_cart_page_groups_by_vendor() -> TestResult {
        let mut products = MockProductsService::new();

        expect_cart_reads(
            &mut products,
            vec![
                make_summary(1, "mug"),
                make_summary_for(2, "tea", 20, "Tea House"),
            ],
        );

        let page: Page<CartIndexProps> = TestClient::get("http://example.com/cart")
            .add_header(
                "cookie",
                cart_cookie_header(&[line(1, 5, 1), line(2, 5, 1), line(1, 6, 2)])?,
                true,
            )
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert_eq!(page.component, "Cart/Index");
        assert_eq!(page.url, "/cart");
        assert_eq!(page.props.cart_items.len(), 2);
        assert_eq!(page.props.cart_items[0].vendor.id, 7);
        assert_eq!(page.props.cart_items[0].items.len(), 2);
        assert_eq!(page.props.cart_items[0].total_quantity, 3);
        assert_eq!(page.props.cart_items[1].vendor.name, "Tea House");
        assert_eq!(page.props.shared.total_quantity, 4);
        assert_eq!(page.props.shared.total_price, Decimal::new(7996, 2));
        assert_eq!(page.props.shared.mini_cart_items.len(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_cart_page_drops_lines_for_unlisted_products() -> TestResult {
        let mut products = MockProductsService::new();

        expect_cart_reads(&mut products, vec![make_summary(1, "mug")]);

        let page: Page<CartIndexProps> = TestClient::get("http://example.com/cart")
            .add_header(
                "cookie",
                cart_cookie_header(&[line(1, 5, 1), line(3, 5, 4)])?,
                true,
            )
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert_eq!(page.props.cart_items.len(), 1);
        assert_eq!(page.props.shared.total_quantity, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_cart_page_drops_lines_whose_total_overflows() -> TestResult {
        let mut products = MockProductsService::new();

        expect_cart_reads(&mut products, vec![make_summary(1, "mug"), make_summary(2, "vase")]);

        let tampered = GuestCartEntry {
            quantity: 4_000_000_000,
            price: Decimal::from_scientific("7e27")?,
            ..line(2, 5, 1)
        };

        let page: Page<CartIndexProps> = TestClient::get("http://example.com/cart")
            .add_header("cookie", cart_cookie_header(&[line(1, 5, 2), tampered])?, true)
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert_eq!(page.props.cart_items.len(), 1);
        assert_eq!(page.props.shared.total_quantity, 2);
        assert_eq!(page.props.shared.total_price, Decimal::new(3998, 2));

        Ok(())
    }

    #[tokio::test]
    async fn test_cart_page_renders_unreadable_cookie_as_empty() -> TestResult {
        let products = MockProductsService::new();

        let page: Page<CartIndexProps> = TestClient::get("http://example.com/cart")
            .add_header("cookie", "cartItems=not-base64!", true)
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert!(page.props.cart_items.is_empty());
        assert_eq!(page.props.shared.total_quantity, 0);
        assert_eq!(page.props.shared.total_price, Decimal::ZERO);

        Ok(())
    }
}
