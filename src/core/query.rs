use crate::core::markup::derive;
use crate::domain::model::PriceRow;
use icu_collator::{Collator, CollatorOptions};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

thread_local! {
    static COLLATOR: Option<Collator> =
        match Collator::try_new(&Default::default(), CollatorOptions::new()) {
            Ok(collator) => Some(collator),
            Err(e) => {
                tracing::warn!("Root collation unavailable, comparing case-folded text: {:?}", e);
                None
            }
        };
}

/// Text ordering under the Unicode root collation: accents and case are
/// secondary to the base letters, and lower case sorts before upper case.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => case_folded_compare(a, b),
    })
}

fn case_folded_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| {
        for (x, y) in a.chars().zip(b.chars()) {
            if x == y {
                continue;
            }
            return match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => x.cmp(&y),
            };
        }
        a.len().cmp(&b.len())
    })
}

/// Case-insensitive substring filters, ANDed. A blank filter matches all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFilter {
    brand: Option<String>,
    text: Option<String>,
}

fn needle(raw: Option<&str>) -> Option<String> {
    raw.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty())
}

impl RowFilter {
    pub fn new(brand: Option<&str>, text: Option<&str>) -> Self {
        Self {
            brand: needle(brand),
            text: needle(text),
        }
    }

    pub fn brand(brand: &str) -> Self {
        Self::new(Some(brand), None)
    }

    pub fn text(text: &str) -> Self {
        Self::new(None, Some(text))
    }

    pub fn is_empty(&self) -> bool {
        self.brand.is_none() && self.text.is_none()
    }

    pub fn matches(&self, row: &PriceRow) -> bool {
        if let Some(brand) = &self.brand {
            if !row.brand.to_lowercase().contains(brand.as_str()) {
                return false;
            }
        }
        if let Some(text) = &self.text {
            let haystack = format!("{} {}", row.model, row.r#type).to_lowercase();
            if !haystack.contains(text.as_str()) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SortKey {
    #[default]
    Brand,
    Model,
    Type,
    Price,
    /// Base price plus the markup.
    #[serde(alias = "updated", alias = "updated_price")]
    #[cfg_attr(feature = "cli", value(alias = "updated"))]
    DerivedPrice,
}

impl SortKey {
    /// Ascending comparison for this key.
    pub fn compare(&self, a: &PriceRow, b: &PriceRow, add_amount: f64) -> Ordering {
        match self {
            SortKey::Brand => locale_compare(&a.brand, &b.brand),
            SortKey::Model => locale_compare(&a.model, &b.model),
            SortKey::Type => locale_compare(&a.r#type, &b.r#type),
            SortKey::Price => a.price.total_cmp(&b.price),
            SortKey::DerivedPrice => {
                derive(a.price, add_amount).total_cmp(&derive(b.price, add_amount))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn from_descending(descending: bool) -> Self {
        if descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }

    /// Clicking the active column flips it; a new column starts ascending.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

pub fn filter_rows(rows: &[PriceRow], filter: &RowFilter) -> Vec<PriceRow> {
    rows.iter().filter(|row| filter.matches(row)).cloned().collect()
}

/// Stable: rows equal on the key keep their input order.
pub fn sort_rows(
    rows: &[PriceRow],
    key: SortKey,
    direction: SortDirection,
    add_amount: f64,
) -> Vec<PriceRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| match direction {
        SortDirection::Ascending => key.compare(a, b, add_amount),
        SortDirection::Descending => key.compare(b, a, add_amount),
    });
    sorted
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowQuery {
    pub filter: RowFilter,
    pub sort_key: SortKey,
    pub direction: SortDirection,
    pub add_amount: f64,
}

impl RowQuery {
    pub fn new(filter: RowFilter, sort_key: SortKey, direction: SortDirection, add_amount: f64) -> Self {
        Self {
            filter,
            sort_key,
            direction,
            add_amount,
        }
    }

    /// Header click semantics of the price table.
    pub fn select_column(&mut self, key: SortKey) {
        self.direction = if self.sort_key == key {
            self.direction.toggled()
        } else {
            SortDirection::Ascending
        };
        self.sort_key = key;
    }

    pub fn apply(&self, rows: &[PriceRow]) -> Vec<PriceRow> {
        let filtered = filter_rows(rows, &self.filter);
        sort_rows(&filtered, self.sort_key, self.direction, self.add_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(brand: &str, model: &str, r#type: &str, price: f64) -> PriceRow {
        PriceRow {
            brand: brand.to_string(),
            model: model.to_string(),
            r#type: r#type.to_string(),
            price,
        }
    }

    fn sample() -> Vec<PriceRow> {
        vec![
            row("Samsung", "A04", "ORG", 110.0),
            row("Huawei", "P40 Lite", "NORMAL", 140.0),
            row("iPhone", "iPhone 11", "INCELL", 220.0),
            row("Samsung", "A31", "INCELL W/F", 180.0),
            row("huawei", "Y9A", "COG", 110.0),
        ]
    }

    fn models(rows: &[PriceRow]) -> Vec<&str> {
        rows.iter().map(|r| r.model.as_str()).collect()
    }

    #[test]
    fn test_locale_compare() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("iPhone", "Itel"), Ordering::Less);
        assert_eq!(locale_compare("huawei", "Huawei"), Ordering::Less);
        assert_eq!(locale_compare("Huawei", "Huawei"), Ordering::Equal);
        assert_eq!(locale_compare("A04", "A04 Pro"), Ordering::Less);
    }

    #[test]
    fn test_locale_compare_orders_accented_labels_by_base_letter() {
        assert_eq!(locale_compare("Émile", "Zed"), Ordering::Less);
        assert_eq!(locale_compare("Émile", "Emily"), Ordering::Less);
        assert_eq!(locale_compare("Oppo", "Öppo"), Ordering::Less);
        assert_eq!(locale_compare("Öppo", "Pixel"), Ordering::Less);

        let rows = vec![
            row("Zte", "Blade A3", "ORG", 120.0),
            row("Échelon", "E1", "ORG", 100.0),
            row("Alcatel", "1B", "ORG", 90.0),
        ];
        let sorted = sort_rows(&rows, SortKey::Brand, SortDirection::Ascending, 0.0);
        assert_eq!(models(&sorted), vec!["1B", "E1", "Blade A3"]);
    }

    #[test]
    fn test_case_folded_fallback_matches_collation_on_ascii() {
        for (a, b) in [("apple", "Banana"), ("iPhone", "Itel"), ("huawei", "Huawei"), ("A04", "A04 Pro")] {
            assert_eq!(case_folded_compare(a, b), locale_compare(a, b), "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_brand_filter_is_case_insensitive() {
        let rows = sample();
        let matched = filter_rows(&rows, &RowFilter::brand("sam"));
        assert_eq!(models(&matched), vec!["A04", "A31"]);
        assert!(matched.iter().all(|r| r.brand == "Samsung"));
    }

    #[test]
    fn test_text_filter_spans_model_and_type() {
        let rows = sample();
        assert_eq!(models(&filter_rows(&rows, &RowFilter::text("incell"))), vec!["iPhone 11", "A31"]);
        // model and type joined with a single space
        assert_eq!(models(&filter_rows(&rows, &RowFilter::text("a04 org"))), vec!["A04"]);
    }

    #[test]
    fn test_filters_are_anded_and_blank_means_all() {
        let rows = sample();
        let both = RowFilter::new(Some("SAMSUNG"), Some("w/f"));
        assert_eq!(models(&filter_rows(&rows, &both)), vec!["A31"]);

        let blank = RowFilter::new(Some("  "), Some(""));
        assert!(blank.is_empty());
        assert_eq!(filter_rows(&rows, &blank), rows);
    }

    #[test]
    fn test_sort_by_brand_is_stable() {
        let rows = sample();
        let sorted = sort_rows(&rows, SortKey::Brand, SortDirection::Ascending, 30.0);
        assert_eq!(models(&sorted), vec!["Y9A", "P40 Lite", "iPhone 11", "A04", "A31"]);
    }

    #[test]
    fn test_sort_descending_keeps_ties_in_input_order() {
        let rows = sample();
        let sorted = sort_rows(&rows, SortKey::Price, SortDirection::Descending, 0.0);
        assert_eq!(models(&sorted), vec!["iPhone 11", "A31", "P40 Lite", "A04", "Y9A"]);
    }

    #[test]
    fn test_sort_by_derived_price_matches_price_order() {
        let rows = sample();
        let by_price = sort_rows(&rows, SortKey::Price, SortDirection::Ascending, 0.0);
        let by_derived = sort_rows(&rows, SortKey::DerivedPrice, SortDirection::Ascending, 30.0);
        assert_eq!(by_price, by_derived);
    }

    #[test]
    fn test_resort_is_idempotent() {
        let rows = sample();
        for key in [SortKey::Brand, SortKey::Model, SortKey::Type, SortKey::Price, SortKey::DerivedPrice] {
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                let once = sort_rows(&rows, key, direction, 30.0);
                let twice = sort_rows(&once, key, direction, 30.0);
                assert_eq!(once, twice, "{:?} {:?}", key, direction);
            }
        }
    }

    #[test]
    fn test_query_does_not_touch_input() {
        let rows = sample();
        let before = rows.clone();
        let query = RowQuery::new(RowFilter::brand("hua"), SortKey::Model, SortDirection::Descending, 30.0);
        let view = query.apply(&rows);
        assert_eq!(models(&view), vec!["Y9A", "P40 Lite"]);
        assert_eq!(rows, before);
    }

    #[test]
    fn test_select_column_toggles_direction() {
        let mut query = RowQuery::default();
        assert_eq!(query.sort_key, SortKey::Brand);
        query.select_column(SortKey::Brand);
        assert_eq!(query.direction, SortDirection::Descending);
        query.select_column(SortKey::Price);
        assert_eq!((query.sort_key, query.direction), (SortKey::Price, SortDirection::Ascending));
    }

    #[test]
    fn test_sort_key_accepts_updated_alias() {
        #[derive(Deserialize)]
        struct Wrapper {
            sort: SortKey,
        }
        let parsed: Wrapper = serde_json::from_str(r#"{"sort":"updated"}"#).unwrap();
        assert_eq!(parsed.sort, SortKey::DerivedPrice);
        let parsed: Wrapper = serde_json::from_str(r#"{"sort":"derived_price"}"#).unwrap();
        assert_eq!(parsed.sort, SortKey::DerivedPrice);
    }
}
