use pricelist::core::markup::{derive, round_money};
use pricelist::core::query::{filter_rows, sort_rows, RowFilter, SortDirection, SortKey};
use pricelist::{parse, serialize, PriceRow};
use proptest::prelude::*;

fn row(brand: &str, model: &str, r#type: &str, price: f64) -> PriceRow {
    PriceRow {
        brand: brand.to_string(),
        model: model.to_string(),
        r#type: r#type.to_string(),
        price,
    }
}

#[test]
fn test_parse_two_rows_and_skip_trailing_blank_line() {
    let input = "brand,model,type,price\nSamsung,A04,ORG,110\nHuawei,\"P40, Lite\",NORMAL,140\n\n";
    assert_eq!(
        parse(input),
        vec![
            row("Samsung", "A04", "ORG", 110.0),
            row("Huawei", "P40, Lite", "NORMAL", 140.0),
        ]
    );
}

#[test]
fn test_row_without_brand_and_model_is_dropped() {
    assert!(parse("brand,model,type,price\n,,ORG,50\n").is_empty());
}

#[test]
fn test_export_with_markup() {
    let rows = vec![row("Samsung", "A04", "ORG", 110.0)];
    assert_eq!(
        serialize(&rows, true, 30.0),
        "brand,model,type,price,updated_price\nSamsung,A04,ORG,110,140"
    );
}

#[test]
fn test_brand_filter_ignores_case() {
    let rows = vec![row("Samsung", "A04", "ORG", 110.0), row("Huawei", "Y9A", "COG", 150.0)];
    let matched = filter_rows(&rows, &RowFilter::brand("sam"));
    assert_eq!(matched, vec![row("Samsung", "A04", "ORG", 110.0)]);
}

#[test]
fn test_huge_price_survives_export_and_reparse() {
    let sheet = format!("brand,model,type,price\nSamsung,A04,ORG,1{}\n", "0".repeat(307));
    let rows = parse(&sheet);
    assert_eq!(rows[0].price, 1e307);

    let exported = serialize(&rows, false, 0.0);
    assert!(!exported.contains("inf"));
    assert_eq!(parse(&exported), rows);
}

#[test]
fn test_export_is_readable_by_a_standard_csv_reader() {
    let rows = vec![
        row("Samsung", "A04, Special", "ORG", 110.0),
        row("iPhone", "11 \"Pro\"", "INCELL", 300.5),
    ];
    let text = serialize(&rows, true, 30.0);

    let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["brand", "model", "type", "price", "updated_price"]
    );

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[0][1], "A04, Special");
    assert_eq!(&records[1][1], "11 \"Pro\"");
    assert_eq!(&records[1][4], "330.5");
}

/// Trimmed, single-line text that survives a round trip.
fn label() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[A-Za-z0-9][A-Za-z0-9 ,\"/()+-]{0,14}[A-Za-z0-9)]",
        "[A-Za-z0-9]{1,8}",
    ]
}

fn price() -> impl Strategy<Value = f64> {
    (0u32..2_000_000).prop_map(|cents| f64::from(cents) / 100.0)
}

fn price_row() -> impl Strategy<Value = PriceRow> {
    (label(), label(), label(), price())
        .prop_filter("brand or model required", |(brand, model, _, _)| {
            !brand.is_empty() || !model.is_empty()
        })
        .prop_map(|(brand, model, r#type, price)| PriceRow {
            brand,
            model,
            r#type,
            price,
        })
}

fn sort_key() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::Brand),
        Just(SortKey::Model),
        Just(SortKey::Type),
        Just(SortKey::Price),
        Just(SortKey::DerivedPrice),
    ]
}

fn direction() -> impl Strategy<Value = SortDirection> {
    prop_oneof![Just(SortDirection::Ascending), Just(SortDirection::Descending)]
}

proptest! {
    #[test]
    fn prop_serialize_then_parse_round_trips(
        rows in prop::collection::vec(price_row(), 0..20),
        include_updated in any::<bool>(),
        add_amount in -50.0f64..500.0,
    ) {
        let parsed = parse(&serialize(&rows, include_updated, add_amount));
        prop_assert_eq!(parsed.len(), rows.len());
        for (back, original) in parsed.iter().zip(rows.iter()) {
            prop_assert_eq!(&back.brand, &original.brand);
            prop_assert_eq!(&back.model, &original.model);
            prop_assert_eq!(&back.r#type, &original.r#type);
            prop_assert!((back.price - round_money(original.price)).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_resorting_is_idempotent(
        rows in prop::collection::vec(price_row(), 0..30),
        key in sort_key(),
        direction in direction(),
        add_amount in -50.0f64..500.0,
    ) {
        let once = sort_rows(&rows, key, direction, add_amount);
        let twice = sort_rows(&once, key, direction, add_amount);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_narrowing_filters_never_grows_results(
        rows in prop::collection::vec(price_row(), 0..30),
        brand in "[a-zA-Z ]{0,3}",
        text in "[a-zA-Z0-9 ]{0,3}",
    ) {
        let both = RowFilter::new(Some(brand.as_str()), Some(text.as_str()));
        let brand_only = RowFilter::new(Some(brand.as_str()), Some(""));
        let text_only = RowFilter::new(Some(""), Some(text.as_str()));
        for row in &rows {
            if both.matches(row) {
                prop_assert!(brand_only.matches(row));
                prop_assert!(text_only.matches(row));
            }
        }
        prop_assert!(filter_rows(&rows, &both).len() <= filter_rows(&rows, &brand_only).len());
    }

    #[test]
    fn prop_derivation_is_linear(
        p in 0.0f64..100_000.0,
        a1 in -1_000.0f64..1_000.0,
        a2 in -1_000.0f64..1_000.0,
    ) {
        let difference = derive(p, a1) - derive(p, a2);
        prop_assert!((difference - (a1 - a2)).abs() < 1e-6);
    }
}
