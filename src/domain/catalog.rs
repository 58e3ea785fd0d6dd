use crate::core::query::locale_compare;
use crate::domain::model::{PriceRow, Product};

/// Built-in catalog, usable in place of an uploaded sheet.
const SEED: &[(&str, &str, &str, f64)] = &[
    ("Samsung", "A01 BIG/SMALL", "ORG", 120.0),
    ("Samsung", "A02", "ORG", 110.0),
    ("Samsung", "A04", "ORG", 110.0),
    ("Samsung", "A05", "ORG", 130.0),
    ("Samsung", "A11", "ORG W/F", 160.0),
    ("Samsung", "A21S", "ORG W/F", 160.0),
    ("Samsung", "A31", "INCELL W/F", 180.0),
    ("Samsung", "A50", "INCELL W/F", 170.0),
    ("Samsung", "A53", "BIG OLED W/F", 550.0),
    ("Huawei", "Y5 2019", "ORG", 130.0),
    ("Huawei", "Y6 2019", "GOOD", 130.0),
    ("Huawei", "Y9A", "COG", 150.0),
    ("Huawei", "Nova 8i", "INCELL", 200.0),
    ("Huawei", "P40 Lite", "NORMAL", 140.0),
    ("iPhone", "iPhone 11", "INCELL", 220.0),
    ("iPhone", "iPhone 11 Pro", "INCELL", 300.0),
    ("iPhone", "iPhone 12", "INCELL", 350.0),
    ("iPhone", "iPhone 13", "INCELL", 400.0),
    ("Nokia", "C12", "COMBO", 160.0),
    ("Vivo", "Y11", "COMBO", 150.0),
    ("Tecno", "Spark 7", "COMBO", 140.0),
    ("Redmi", "A2", "COMBO", 150.0),
    ("Itel", "A60", "COMBO", 150.0),
];

pub fn products() -> Vec<Product> {
    SEED.iter()
        .map(|(brand, model, r#type, base_price)| Product {
            brand: brand.to_string(),
            model: model.to_string(),
            r#type: r#type.to_string(),
            base_price: *base_price,
        })
        .collect()
}

/// Brand, then model.
pub fn all_products_sorted() -> Vec<Product> {
    let mut products = products();
    products.sort_by(|a, b| {
        locale_compare(&a.brand, &b.brand).then_with(|| locale_compare(&a.model, &b.model))
    });
    products
}

pub fn catalog_rows() -> Vec<PriceRow> {
    all_products_sorted().iter().map(PriceRow::from).collect()
}
