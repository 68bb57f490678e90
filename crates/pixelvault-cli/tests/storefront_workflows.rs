// SPDX-License-Identifier: Apache-2.0

mod common;

use common::{approx, Shop};
use serde_json::Value;

fn ids(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("array")
        .iter()
        .map(|item| {
            item.get("uniqueIdentifier")
                .or_else(|| item.get("id"))
                .and_then(Value::as_str)
                .expect("id")
                .to_string()
        })
        .collect()
}

#[test]
fn catalog_pages_through_the_dataset() {
    let shop = Shop::new();
    let first = shop.json(&["catalog", "list"]);
    assert_eq!(first["total_items"], 8);
    assert_eq!(first["total_pages"], 2);
    assert_eq!(
        ids(&first["items"]),
        ["starfall", "turbo", "kingdoms", "neon", "dragon", "farm"]
    );

    let beyond = shop.json(&["catalog", "list", "--page", "9"]);
    assert_eq!(beyond["page"], 2);
    assert_eq!(ids(&beyond["items"]), ["siege", "orbit"]);
}

#[test]
fn catalog_filters_and_sorts() {
    let shop = Shop::new();
    let racing = shop.json(&["catalog", "list", "--category", "racing", "--sort", "price-high"]);
    assert_eq!(ids(&racing["items"]), ["neon", "turbo"]);

    let xbox = shop.json(&["catalog", "list", "--platform", "Xbox", "--price", "50-70"]);
    assert_eq!(ids(&xbox["items"]), ["siege"]);

    let search = shop.json(&["catalog", "list", "--search", "DRAGON"]);
    assert_eq!(ids(&search["items"]), ["dragon"]);

    let none = shop.json(&["catalog", "list", "--category", "puzzle"]);
    assert_eq!(none["total_items"], 0);
    assert!(none["items"].as_array().expect("items").is_empty());

    let text = shop
        .cmd()
        .args(["catalog", "list", "--category", "puzzle"])
        .output()
        .expect("run");
    assert_eq!(
        String::from_utf8_lossy(&text.stdout).trim(),
        "No games match your filters."
    );
}

#[test]
fn query_hash_ignores_pagination() {
    let shop = Shop::new();
    let a = shop.json(&["catalog", "list", "--sort", "rating"]);
    let b = shop.json(&["catalog", "list", "--sort", "rating", "--page", "2"]);
    let c = shop.json(&["catalog", "list", "--sort", "newest"]);
    assert_eq!(a["query_hash"], b["query_hash"]);
    assert_ne!(a["query_hash"], c["query_hash"]);
}

#[test]
fn bad_list_arguments_are_validation_errors() {
    let shop = Shop::new();
    for args in [
        ["catalog", "list", "--price", "cheap"],
        ["catalog", "list", "--sort", "random"],
        ["catalog", "list", "--page-size", "0"],
    ] {
        let (code, _) = shop.json_err(&args);
        assert_eq!(code, 3, "{args:?}");
    }
}

#[test]
fn featured_selections() {
    let shop = Shop::new();
    let trending = shop.json(&["catalog", "trending"]);
    assert_eq!(
        ids(&trending["items"]),
        ["starfall", "dragon", "kingdoms", "farm", "orbit", "turbo"]
    );
    let fresh = shop.json(&["catalog", "new-releases"]);
    assert_eq!(ids(&fresh["items"]), ["dragon", "orbit", "starfall"]);
}

#[test]
fn show_and_validate() {
    let shop = Shop::new();
    let details = shop.json(&["catalog", "show", "--id", "kingdoms"]);
    assert_eq!(details["product"]["title"], "Iron Kingdoms");
    assert_eq!(details["similar"], serde_json::json!(["siege"]));
    assert_eq!(details["in_wishlist"], false);

    let (code, err) = shop.json_err(&["catalog", "show", "--id", "nothing"]);
    assert_eq!(code, 3);
    assert_eq!(err["message"], "Could not load game data.");

    let report = shop.json(&["catalog", "validate"]);
    assert_eq!(report["products"], 8);
    let sha = report["sha256"].as_str().expect("sha");
    assert_eq!(sha.len(), 64);
    assert!(sha.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn cart_round_trip_through_the_data_dir() {
    let shop = Shop::new();
    shop.json(&["cart", "add", "--id", "starfall"]);
    shop.json(&["cart", "add", "--id", "starfall"]);
    let cart = shop.json(&["cart", "add", "--id", "turbo"]);
    assert_eq!(cart["message"], "Turbo Drift added to cart!");
    assert_eq!(cart["item_label"], "3 items");
    assert!(approx(&cart["totals"]["subtotal"], 99.97));
    assert!(approx(&cart["totals"]["tax"], 99.97 * 0.08));
    assert!(shop.data_dir().join("pixelVaultCart.json").exists());

    let cart = shop.json(&["cart", "set", "--id", "starfall", "--quantity", "1"]);
    assert_eq!(cart["stats"]["item_count"], 2);
    assert_eq!(cart["stats"]["unique_items"], 2);

    let cart = shop.json(&["cart", "set", "--id", "turbo", "--quantity", "-1"]);
    assert_eq!(cart["message"], "Item removed from cart");
    assert_eq!(cart["lines"].as_array().expect("lines").len(), 1);

    let cart = shop.json(&["cart", "remove", "--id", "starfall"]);
    assert_eq!(cart["checkout_enabled"], false);
    assert_eq!(cart["item_label"], "0 items");

    let (code, _) = shop.json_err(&["cart", "add", "--id", "missing"]);
    assert_eq!(code, 3);
}

#[test]
fn cart_clear_removes_the_key() {
    let shop = Shop::new();
    shop.json(&["cart", "add", "--id", "orbit"]);
    let cart = shop.json(&["cart", "clear"]);
    assert_eq!(cart["lines"].as_array().expect("lines").len(), 0);
    assert!(!shop.data_dir().join("pixelVaultCart.json").exists());
}

#[test]
fn checkout_places_an_order_and_empties_the_cart() {
    let shop = Shop::new();
    let (code, err) = shop.json_err(&["checkout", "--name", "Ada", "--email", "ada@example.com"]);
    assert_eq!(code, 3);
    assert_eq!(err["message"], "Your cart is empty!");

    shop.json(&["cart", "add", "--id", "dragon"]);
    let (code, err) = shop.json_err(&["checkout", "--name", "Ada", "--email", "ada@"]);
    assert_eq!(code, 3);
    assert_eq!(err["message"], "Please enter a valid email address.");

    let order = shop.json(&[
        "checkout",
        "--name",
        "Ada",
        "--email",
        "ada@example.com",
        "--phone",
        "5551234567",
    ]);
    let order_id = order["order_id"].as_str().expect("order id");
    assert!(order_id.starts_with("OGFL-"));
    assert_eq!(order_id, order_id.to_uppercase());
    assert!(approx(&order["total"], 69.99 * 1.08));
    assert_eq!(order["contact"]["phone"], "(555) 123-4567");
    assert!(shop.data_dir().join("pixelVaultCheckout.json").exists());

    let cart = shop.json(&["cart", "show"]);
    assert_eq!(cart["item_label"], "0 items");
}

#[test]
fn newsletter_wishlist_and_consent() {
    let shop = Shop::new();
    let (code, _) = shop.json_err(&["newsletter", "subscribe", "--email", "nope"]);
    assert_eq!(code, 3);
    let sub = shop.json(&["newsletter", "subscribe", "--email", "fan@example.com"]);
    assert_eq!(sub["subscribers"], 1);
    let sub = shop.json(&["newsletter", "subscribe", "--email", "FAN@example.com"]);
    assert_eq!(sub["subscribers"], 1);

    let added = shop.json(&["wishlist", "add", "--id", "farm"]);
    assert_eq!(added["message"], "Game added to wishlist!");
    let again = shop.json(&["wishlist", "add", "--id", "farm"]);
    assert_eq!(again["items"], 1);
    let details = shop.json(&["catalog", "show", "--id", "farm"]);
    assert_eq!(details["in_wishlist"], true);
    let removed = shop.json(&["wishlist", "remove", "--id", "farm"]);
    assert_eq!(removed["message"], "Game removed from wishlist!");
    let list = shop.json(&["wishlist", "list"]);
    assert!(list["items"].as_array().expect("items").is_empty());

    assert_eq!(shop.json(&["consent", "status"])["consented"], false);
    assert_eq!(shop.json(&["consent", "accept"])["consented"], true);
    assert_eq!(shop.json(&["consent", "status"])["banner_visible"], false);
}

#[test]
fn contact_form_reports_field_errors() {
    let shop = Shop::new();
    let (code, err) = shop.json_err(&[
        "contact",
        "--first-name",
        "A",
        "--email",
        "ada@example.com",
        "--message",
        "short",
    ]);
    assert_eq!(code, 3);
    assert_eq!(err["code"], "invalid_form");
    assert_eq!(
        err["details"]["first_name"],
        "Name must be at least 2 characters long."
    );
    assert_eq!(err["details"]["last_name"], "This field is required.");
    assert_eq!(err["details"]["subject"], "Please select a subject.");
    assert_eq!(
        err["details"]["message"],
        "Message must be at least 10 characters long."
    );

    let sent = shop.json(&[
        "contact",
        "--first-name",
        "Ada",
        "--last-name",
        "Lovelace",
        "--email",
        "ada@example.com",
        "--subject",
        "support",
        "--message",
        "My download stalls at 99%.",
    ]);
    assert_eq!(sent["status"], "sent");
}
