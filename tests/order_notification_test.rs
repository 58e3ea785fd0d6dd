use httpmock::prelude::*;
use pricelist::app::cart::CART_DOCUMENT;
use pricelist::domain::catalog;
use pricelist::{
    Cart, CartKey, ContactRequest, Customer, Delivery, HttpNotificationSink, LocalStorage,
    NotificationSink, Order, RepairRequest, TomlConfig,
};
use tempfile::TempDir;

fn catalog_cart() -> Cart {
    let rows = catalog::catalog_rows();
    let mut cart = Cart::new();
    for key in ["Samsung|A04|ORG", "Samsung|A04|ORG", "Nokia|C12|COMBO"] {
        let key = CartKey::from(key);
        let row = rows.iter().find(|r| r.key() == key).unwrap();
        cart.add(row, row.derived_price(30.0));
    }
    cart
}

fn customer() -> Customer {
    Customer {
        name: "Thandi".to_string(),
        phone: Some("082 555 0101".to_string()),
        email: Some("thandi@example.com".to_string()),
    }
}

#[tokio::test]
async fn test_cart_persists_only_on_save() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

    let empty = Cart::load(&storage, CART_DOCUMENT).await.unwrap();
    assert!(empty.is_empty());

    let mut cart = catalog_cart();
    cart.save(&storage, CART_DOCUMENT).await.unwrap();

    cart.set_quantity(&CartKey::of("Nokia", "C12", "COMBO"), 5);
    let reloaded = Cart::load(&storage, CART_DOCUMENT).await.unwrap();
    assert_eq!(reloaded, catalog_cart());
    assert_eq!(reloaded.item_count(), 3);
    assert_eq!(reloaded.total(), 2.0 * 140.0 + 190.0);
}

#[tokio::test]
async fn test_corrupt_cart_document_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(CART_DOCUMENT), "{not json").unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

    assert!(Cart::load(&storage, CART_DOCUMENT).await.is_err());
}

#[tokio::test]
async fn test_order_delivered_through_http_sink() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/emails")
            .header("authorization", "Bearer re_test")
            .json_body_partial(
                r#"{"from":"orders@resend.dev","to":"owner@example.com","subject":"New Order - Thandi"}"#,
            );
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"id": "email_123"}));
    });

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[source]
catalog = true

[notification]
endpoint = "{}"
api_key = "re_test"
from = "orders@resend.dev"
to = "owner@example.com"
timeout_seconds = 5
"#,
        server.url("/emails")
    ))
    .unwrap();
    let notification_config = config.notification().unwrap();

    let order = Order::from_cart(customer(), &catalog_cart());
    let notification = order
        .to_notification(&notification_config.from, &notification_config.to)
        .unwrap();
    assert!(notification.html.contains("Samsung - A04 (ORG) x2 @ R140 = R280"));
    assert!(notification.html.contains("R470"));

    let sink = HttpNotificationSink::from_config(notification_config).unwrap();
    let outcome = sink.deliver(&notification).await;

    api_mock.assert();
    assert_eq!(outcome, Delivery::Delivered);
}

#[tokio::test]
async fn test_rejected_delivery_reports_reason() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/emails");
        then.status(401).body("invalid api key");
    });

    let order = Order::from_cart(customer(), &catalog_cart());
    let notification = order
        .to_notification("orders@resend.dev", "owner@example.com")
        .unwrap();
    let sink = HttpNotificationSink::new(server.url("/emails"), Some("bad".to_string()));
    let outcome = sink.deliver(&notification).await;

    api_mock.assert();
    assert_eq!(
        outcome,
        Delivery::Failed("HTTP 401: invalid api key".to_string())
    );
}

#[tokio::test]
async fn test_repair_ticket_delivered_through_http_sink() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/emails")
            .body_contains("New Repair Ticket #REP-")
            .body_contains("Cracked screen");
        then.status(200).json_body(serde_json::json!({"id": "email_456"}));
    });

    let form: RepairRequest = serde_json::from_str(
        r#"{"formNumber":"0042","customerName":"Thandi","telephone":"082 555 0101",
            "model":"Samsung A04","natureOfFault":"Cracked screen","battery":"YES"}"#,
    )
    .unwrap();
    let (ticket, notification) = form
        .to_notification("forms@resend.dev", "owner@example.com")
        .unwrap();
    assert!(ticket.id.starts_with("REP-"));

    let sink = HttpNotificationSink::new(server.url("/emails"), Some("re_test".to_string()));
    let outcome = sink.deliver(&notification).await;

    api_mock.assert();
    assert!(outcome.is_delivered());
}

#[test]
fn test_incomplete_forms_are_rejected_before_sending() {
    let repair: RepairRequest =
        serde_json::from_str(r#"{"customerName":"Thandi","model":"A04"}"#).unwrap();
    let err = repair.to_notification("a", "b").unwrap_err();
    assert!(err
        .user_friendly_message()
        .contains("Missing required fields: telephone, natureOfFault"));

    let contact: ContactRequest =
        serde_json::from_str(r#"{"name":"Sipho","phone":"071","urgent":true}"#).unwrap();
    assert!(contact.to_notification("a", "b").is_err());
}
