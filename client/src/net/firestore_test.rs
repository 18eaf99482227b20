use super::*;

// =============================================================
// decode
// =============================================================

#[test]
fn decode_value_handles_scalars() {
    assert_eq!(decode_value(&json!({ "stringValue": "hi" })), json!("hi"));
    assert_eq!(decode_value(&json!({ "integerValue": "42" })), json!(42));
    assert_eq!(decode_value(&json!({ "doubleValue": 1.5 })), json!(1.5));
    assert_eq!(decode_value(&json!({ "booleanValue": true })), json!(true));
    assert_eq!(decode_value(&json!({ "nullValue": null })), Value::Null);
    assert_eq!(
        decode_value(&json!({ "timestampValue": "2026-03-01T10:00:00Z" })),
        json!("2026-03-01T10:00:00Z")
    );
}

#[test]
fn decode_value_bad_integer_is_null() {
    assert_eq!(decode_value(&json!({ "integerValue": "12abc" })), Value::Null);
}

#[test]
fn decode_value_handles_nested_map_and_array() {
    let raw = json!({
        "arrayValue": { "values": [
            { "mapValue": { "fields": {
                "id": { "stringValue": "c1" },
                "requiresPhoto": { "booleanValue": true }
            }}},
            { "integerValue": "7" }
        ]}
    });
    assert_eq!(decode_value(&raw), json!([{ "id": "c1", "requiresPhoto": true }, 7]));
}

#[test]
fn decode_value_empty_containers() {
    assert_eq!(decode_value(&json!({ "arrayValue": {} })), json!([]));
    assert_eq!(decode_value(&json!({ "mapValue": {} })), json!({}));
}

#[test]
fn decode_document_injects_id() {
    let doc = json!({
        "name": "projects/p/databases/(default)/documents/users/u42",
        "fields": { "displayName": { "stringValue": "Ada" } },
        "createTime": "2026-01-01T00:00:00Z"
    });
    assert_eq!(decode_document(&doc), Some(json!({ "id": "u42", "displayName": "Ada" })));
}

#[test]
fn decode_document_without_name_is_none() {
    assert_eq!(decode_document(&json!({ "fields": {} })), None);
}

#[test]
fn decode_query_response_skips_empty_entries() {
    let response = json!([
        { "readTime": "2026-01-01T00:00:00Z" },
        { "document": { "name": "a/b/tasks/t1", "fields": { "title": { "stringValue": "Clean" } } } },
    ]);
    assert_eq!(decode_query_response(&response), vec![json!({ "id": "t1", "title": "Clean" })]);
    assert!(decode_query_response(&json!({})).is_empty());
}

// =============================================================
// encode
// =============================================================

#[test]
fn encode_value_distinguishes_integers_and_doubles() {
    assert_eq!(encode_value(&json!(3)), json!({ "integerValue": "3" }));
    assert_eq!(encode_value(&json!(2.5)), json!({ "doubleValue": 2.5 }));
}

#[test]
fn encode_value_nests_maps_and_arrays() {
    let encoded = encode_value(&json!({ "items": [{ "done": false }] }));
    assert_eq!(
        encoded,
        json!({ "mapValue": { "fields": { "items": { "arrayValue": { "values": [
            { "mapValue": { "fields": { "done": { "booleanValue": false } } } }
        ]}}}}})
    );
}

#[test]
fn encode_then_decode_preserves_plain_json() {
    let plain = json!({ "guestName": "Lee", "guestCount": 4, "notes": null, "tags": ["vip"] });
    let encoded = encode_value(&plain);
    assert_eq!(decode_value(&encoded), plain);
}

#[test]
fn update_mask_query_repeats_field_paths() {
    assert_eq!(
        update_mask_query(&["guestName", "guestCount"]),
        "updateMask.fieldPaths=guestName&updateMask.fieldPaths=guestCount"
    );
    assert_eq!(update_mask_query(&[]), "");
}

// =============================================================
// Query
// =============================================================

#[test]
fn query_without_filters_has_only_from() {
    let body = Query::collection("subscriptions").to_request_body();
    assert_eq!(body, json!({ "structuredQuery": { "from": [{ "collectionId": "subscriptions" }] } }));
}

#[test]
fn query_single_filter_is_field_filter() {
    let body = Query::collection("users").where_eq("role", &json!("client")).to_request_body();
    assert_eq!(
        body["structuredQuery"]["where"],
        json!({ "fieldFilter": {
            "field": { "fieldPath": "role" },
            "op": "EQUAL",
            "value": { "stringValue": "client" }
        }})
    );
}

#[test]
fn query_multiple_filters_become_composite_and() {
    let body = Query::collection("subscriptions")
        .where_eq("status", &json!("active"))
        .filter("createdAt", FilterOp::GreaterThanOrEqual, timestamp("2026-01-01T00:00:00Z"))
        .order_by("createdAt", Direction::Descending)
        .limit(25)
        .to_request_body();
    let q = &body["structuredQuery"];
    assert_eq!(q["where"]["compositeFilter"]["op"], "AND");
    assert_eq!(q["where"]["compositeFilter"]["filters"].as_array().unwrap().len(), 2);
    assert_eq!(
        q["where"]["compositeFilter"]["filters"][1]["fieldFilter"]["op"],
        "GREATER_THAN_OR_EQUAL"
    );
    assert_eq!(q["orderBy"], json!([{ "field": { "fieldPath": "createdAt" }, "direction": "DESCENDING" }]));
    assert_eq!(q["limit"], 25);
}
