use crate::api::models::Product;
use crate::app::allergens;
use crate::util::first_present;

pub const NAME_PLACEHOLDER: &str = "Nome não disponível";
pub const IMAGE_PLACEHOLDER: &str = "https://via.placeholder.com/200x200.png?text=Sem+Imagem";
pub const INGREDIENTS_PLACEHOLDER: &str = "Lista de ingredientes não disponível.";

/// Display-ready fields extracted from a product payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductView {
    pub name: String,
    pub image_url: String,
    pub ingredients: String,
    /// Normalized labels; empty when the product declares no allergen.
    pub allergens: Vec<String>,
}

impl ProductView {
    pub fn from_product(product: &Product, language: &str) -> Self {
        let name = first_present([
            product.localized("product_name", language),
            product.product_name.as_deref(),
        ])
        .unwrap_or(NAME_PLACEHOLDER);

        let image_url =
            first_present([product.image_front_url.as_deref()]).unwrap_or(IMAGE_PLACEHOLDER);

        let ingredients = first_present([
            product.localized("ingredients_text", language),
            product.ingredients_text.as_deref(),
        ])
        .unwrap_or(INGREDIENTS_PLACEHOLDER);

        Self {
            name: name.to_string(),
            image_url: image_url.to_string(),
            ingredients: ingredients.to_string(),
            allergens: allergens::normalize(
                product.tags(),
                product.hierarchy(),
                product.free_text(),
            ),
        }
    }
}
