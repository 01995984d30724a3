//! Checkout cart table

use crate::locator::Locator;
use crate::pages::BasePage;
use crate::result::{VitrinaError, VitrinaResult};
use crate::session::{PageContext, PageKind, PageObject};
use crate::validation::cart::{parse_money, CartSnapshot};

/// Cart step of the checkout
#[derive(Debug, Clone)]
pub struct CartPage {
    base: BasePage,
}

impl PageObject for CartPage {
    const KIND: PageKind = PageKind::Cart;

    fn from_context(ctx: PageContext) -> Self {
        Self {
            base: BasePage::from_context(ctx),
        }
    }

    fn base(&self) -> &BasePage {
        &self.base
    }
}

impl CartPage {
    #[must_use]
    pub fn table() -> Locator {
        Locator::css("table.table-hover")
    }

    #[must_use]
    pub fn rows() -> Locator {
        Locator::css("table.table-hover tbody tr.ng-star-inserted")
    }

    #[must_use]
    pub fn product_titles() -> Locator {
        Locator::test_id("product-title")
    }

    #[must_use]
    pub fn quantities_inputs() -> Locator {
        Locator::test_id("product-quantity")
    }

    #[must_use]
    pub fn unit_prices() -> Locator {
        Locator::test_id("product-price")
    }

    #[must_use]
    pub fn line_prices() -> Locator {
        Locator::test_id("line-price")
    }

    #[must_use]
    pub fn cart_total_cell() -> Locator {
        Locator::test_id("cart-total")
    }

    /// Table, first row and total visible
    pub async fn wait_for_cart_load(&self) -> VitrinaResult<()> {
        let budget = self.base.config().timeouts.products_ms;
        self.base.wait_visible(&Self::table(), budget).await?;
        self.base.wait_visible(&Self::rows(), budget).await?;
        self.base
            .wait_visible(&Self::cart_total_cell(), budget)
            .await
    }

    pub async fn product_names(&self) -> VitrinaResult<Vec<String>> {
        self.base.all_texts(&Self::product_titles()).await
    }

    /// Quantity inputs, in row order
    pub async fn quantities(&self) -> VitrinaResult<Vec<u32>> {
        let inputs = Self::quantities_inputs();
        let count = self.base.driver().count(&inputs).await?;
        let mut quantities = Vec::with_capacity(count);
        for i in 0..count {
            let raw = self.base.driver().input_value(&inputs.clone().nth(i)).await?;
            let quantity = raw.trim().parse().map_err(|_| {
                VitrinaError::driver(format!("cart row {} has quantity {raw:?}", i + 1))
            })?;
            quantities.push(quantity);
        }
        Ok(quantities)
    }

    pub async fn prices(&self) -> VitrinaResult<Vec<f64>> {
        self.money_column(&Self::unit_prices()).await
    }

    pub async fn line_totals(&self) -> VitrinaResult<Vec<f64>> {
        self.money_column(&Self::line_prices()).await
    }

    pub async fn cart_total(&self) -> VitrinaResult<f64> {
        parse_money(&self.base.element_text(&Self::cart_total_cell()).await?)
    }

    async fn money_column(&self, cells: &Locator) -> VitrinaResult<Vec<f64>> {
        self.base
            .all_texts(cells)
            .await?
            .iter()
            .map(|text| parse_money(text))
            .collect()
    }

    /// Every column plus the total
    pub async fn snapshot(&self) -> VitrinaResult<CartSnapshot> {
        Ok(CartSnapshot {
            names: self.product_names().await?,
            quantities: self.quantities().await?,
            prices: self.prices().await?,
            line_totals: self.line_totals().await?,
            total: self.cart_total().await?,
        })
    }
}
