//! Multi-page workflows shared by the UI scenarios.
//!
//! Each flow drives one [`Session`] through several pages and hands back the
//! page (or data) the scenario goes on to assert against.

use crate::catalog::{
    generate_valid_user, Brand, Category, FilterSelection, Language, Subcategory, UserProfile,
};
use crate::pages::{CartPage, ContactPage, ProductDetailPage, ProductsPage, ProfilePage};
use crate::result::VitrinaResult;
use crate::session::Session;
use crate::validation::cart::{CartSnapshot, ProductRecord};
use crate::validation::translation::ContactTranslations;
use tracing::{info, instrument};

/// Open the listing and wait for the first products
pub async fn navigate_to_products(session: &Session) -> VitrinaResult<ProductsPage> {
    let products = session.products();
    products.navigate().await?;
    Ok(products)
}

/// Find `name` through search, open it and add `quantity` units.
///
/// Returns what the cart should later show for this product.
#[instrument(parent = session.span(), skip(session))]
pub async fn add_product_to_cart(
    session: &Session,
    name: &str,
    quantity: u32,
) -> VitrinaResult<ProductRecord> {
    let products = navigate_to_products(session).await?;
    products.search_and_select_product(name).await?;

    let detail = session.product_detail();
    detail.wait_for_product_data().await?;
    let price = detail.product_price().await?;
    detail.add_to_cart(quantity).await?;
    info!(price, "added to cart");
    Ok(ProductRecord::new(name, quantity, price))
}

/// [`add_product_to_cart`] for each name, same quantity each
pub async fn add_products_and_collect_data(
    session: &Session,
    names: &[&str],
    quantity_per_product: u32,
) -> VitrinaResult<Vec<ProductRecord>> {
    let mut records = Vec::with_capacity(names.len());
    for name in names {
        records.push(add_product_to_cart(session, name, quantity_per_product).await?);
    }
    Ok(records)
}

/// From a product page, open the cart and read every column
pub async fn cart_data(session: &Session) -> VitrinaResult<CartSnapshot> {
    session.product_detail().go_to_cart().await?;
    let cart: CartPage = session.cart();
    cart.wait_for_cart_load().await?;
    cart.snapshot().await
}

/// Open a listed product by name
pub async fn go_to_product_detail(
    session: &Session,
    name: &str,
) -> VitrinaResult<ProductDetailPage> {
    let products = navigate_to_products(session).await?;
    products.open_product(name).await?;
    let detail = session.product_detail();
    detail.wait_for_product_data().await?;
    Ok(detail)
}

pub async fn filter_by_category(
    session: &Session,
    category: Category,
) -> VitrinaResult<ProductsPage> {
    let products = navigate_to_products(session).await?;
    products.navigation().open_category(category).await?;
    products.wait_for_initial_products_load().await?;
    Ok(products)
}

/// Tick a subcategory and wait until products or "no results" show
pub async fn filter_by_subcategory(
    session: &Session,
    subcategory: Subcategory,
) -> VitrinaResult<ProductsPage> {
    let products = navigate_to_products(session).await?;
    products.filter().click_subcategory(subcategory).await?;
    products.filter().wait_for_filter_results().await?;
    Ok(products)
}

/// Untick a subcategory on the current listing
pub async fn clear_subcategory_filter(
    session: &Session,
    subcategory: Subcategory,
) -> VitrinaResult<()> {
    let products = session.products();
    products.filter().click_subcategory(subcategory).await?;
    products.wait_for_initial_products_load().await
}

pub async fn filter_by_brand(session: &Session, brand: Brand) -> VitrinaResult<ProductsPage> {
    let products = navigate_to_products(session).await?;
    products.filter().select_brand(brand).await?;
    Ok(products)
}

pub async fn deselect_brand(session: &Session, brand: Brand) -> VitrinaResult<()> {
    session.products().filter().deselect_brand(brand).await
}

pub async fn filter_by_eco_friendly(session: &Session) -> VitrinaResult<ProductsPage> {
    let products = navigate_to_products(session).await?;
    products.filter().check_eco_friendly().await?;
    Ok(products)
}

/// Category from the header menu, then brand from the sidebar
pub async fn apply_multiple_filters(
    session: &Session,
    selection: FilterSelection,
) -> VitrinaResult<ProductsPage> {
    let products = navigate_to_products(session).await?;
    products.apply_filters(selection).await?;
    Ok(products)
}

/// Brand badge text of the open product
pub async fn verify_product_brand(session: &Session) -> VitrinaResult<String> {
    let detail = session.product_detail();
    detail.wait_for_product_data().await?;
    detail.brand_badge_text().await
}

/// Open the contact page in `language` and return the texts it should show
#[instrument(parent = session.span(), skip(session))]
pub async fn change_language_and_get_translations(
    session: &Session,
    language: Language,
) -> VitrinaResult<(ContactPage, &'static ContactTranslations)> {
    let contact = session.contact();
    contact.navigate().await?;
    contact.navigation().change_language(language).await?;
    Ok((contact, ContactTranslations::for_language(language)))
}

/// Register a fresh synthetic user and sign in as them
#[instrument(parent = session.span(), skip(session))]
pub async fn create_and_login_user(session: &Session) -> VitrinaResult<UserProfile> {
    let user = generate_valid_user();
    let sign_up = session.sign_up();
    sign_up.navigate().await?;
    sign_up.complete_registration(&user).await?;
    session.sign_in().log_in(&user.email, &user.password).await?;
    info!(email = %user.email, "signed in");
    Ok(user)
}

/// From the account page, open the profile and submit a new phone number
pub async fn update_profile_phone_number(
    session: &Session,
    phone: &str,
) -> VitrinaResult<ProfilePage> {
    session.my_account().open_profile().await?;
    let profile = session.profile();
    profile.update_phone_number(phone).await?;
    Ok(profile)
}
