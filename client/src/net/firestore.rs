//! Document-database REST codec: typed value encoding and structured queries.
//!
//! DESIGN
//! ======
//! The REST API wraps every field in a type tag (`stringValue`,
//! `integerValue`, `mapValue`, ...). Read models never see those tags: a
//! document is decoded to plain JSON first (integers become numbers,
//! timestamps stay RFC 3339 strings) and then deserialized with serde.
//! Writes go the other way through [`encode_value`].

#[cfg(test)]
#[path = "firestore_test.rs"]
mod firestore_test;

use serde_json::{Map, Value, json};

// =============================================================================
// VALUE CODEC
// =============================================================================

/// Convert one typed REST value into plain JSON.
#[must_use]
pub fn decode_value(value: &Value) -> Value {
    let Some(obj) = value.as_object() else {
        return Value::Null;
    };
    if let Some(s) = obj.get("stringValue").and_then(Value::as_str) {
        return Value::String(s.to_owned());
    }
    if let Some(raw) = obj.get("integerValue") {
        // int64 travels as a string on the wire.
        let parsed = match raw {
            Value::String(s) => s.parse::<i64>().ok(),
            Value::Number(n) => n.as_i64(),
            _ => None,
        };
        return parsed.map_or(Value::Null, Value::from);
    }
    if let Some(d) = obj.get("doubleValue") {
        return match d {
            Value::Number(_) => d.clone(),
            Value::String(s) => s.parse::<f64>().ok().map_or(Value::Null, Value::from),
            _ => Value::Null,
        };
    }
    if let Some(b) = obj.get("booleanValue").and_then(Value::as_bool) {
        return Value::Bool(b);
    }
    if let Some(ts) = obj.get("timestampValue").and_then(Value::as_str) {
        return Value::String(ts.to_owned());
    }
    if let Some(r) = obj.get("referenceValue").and_then(Value::as_str) {
        return Value::String(r.to_owned());
    }
    if let Some(map) = obj.get("mapValue") {
        let fields = map.get("fields").and_then(Value::as_object);
        return Value::Object(fields.map(decode_fields).unwrap_or_default());
    }
    if let Some(array) = obj.get("arrayValue") {
        let values = array
            .get("values")
            .and_then(Value::as_array)
            .map(|vals| vals.iter().map(decode_value).collect())
            .unwrap_or_default();
        return Value::Array(values);
    }
    if let Some(geo) = obj.get("geoPointValue") {
        return geo.clone();
    }
    Value::Null
}

/// Decode a `fields` map into a plain JSON object.
#[must_use]
pub fn decode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields.iter().map(|(k, v)| (k.clone(), decode_value(v))).collect()
}

/// Decode a REST document into plain JSON with its id injected as `"id"`.
///
/// Returns `None` when the value is not a document (no `name`).
#[must_use]
pub fn decode_document(doc: &Value) -> Option<Value> {
    let name = doc.get("name")?.as_str()?;
    let mut out = doc
        .get("fields")
        .and_then(Value::as_object)
        .map(decode_fields)
        .unwrap_or_default();
    out.insert("id".to_owned(), Value::String(document_id(name).to_owned()));
    Some(Value::Object(out))
}

/// Last path segment of a fully-qualified document name.
#[must_use]
pub fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Convert plain JSON into the typed REST encoding.
///
/// Integral numbers become `integerValue`, everything else numeric becomes
/// `doubleValue`. Use [`timestamp`] for timestamp fields, since plain JSON has
/// no way to tell them apart from strings.
#[must_use]
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64().unwrap_or_default() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            json!({ "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

/// Encode every entry of a plain object as a typed field.
#[must_use]
pub fn encode_fields(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter().map(|(k, v)| (k.clone(), encode_value(v))).collect()
}

/// Typed timestamp value from an RFC 3339 string.
#[must_use]
pub fn timestamp(rfc3339: &str) -> Value {
    json!({ "timestampValue": rfc3339 })
}

/// Query-string suffix restricting a PATCH to `fields`.
#[must_use]
pub fn update_mask_query(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| format!("updateMask.fieldPaths={f}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Decode a `:runQuery` response stream into plain documents.
///
/// The response is an array of `{ "document": ..., "readTime": ... }`
/// entries; entries without a document (empty result marker) are skipped.
#[must_use]
pub fn decode_query_response(response: &Value) -> Vec<Value> {
    response
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry.get("document"))
                .filter_map(decode_document)
                .collect()
        })
        .unwrap_or_default()
}

// =============================================================================
// STRUCTURED QUERY
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOp {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    In,
    ArrayContains,
}

impl FilterOp {
    fn as_wire(self) -> &'static str {
        match self {
            Self::Equal => "EQUAL",
            Self::NotEqual => "NOT_EQUAL",
            Self::LessThan => "LESS_THAN",
            Self::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
            Self::GreaterThan => "GREATER_THAN",
            Self::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
            Self::In => "IN",
            Self::ArrayContains => "ARRAY_CONTAINS",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Clone, Debug, PartialEq)]
struct FieldFilter {
    field: String,
    op: FilterOp,
    value: Value,
}

/// Builder for a single-collection structured query.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    collection: String,
    filters: Vec<FieldFilter>,
    order_by: Vec<(String, Direction)>,
    limit: Option<u32>,
}

impl Query {
    #[must_use]
    pub fn collection(collection: &str) -> Self {
        Self { collection: collection.to_owned(), filters: Vec::new(), order_by: Vec::new(), limit: None }
    }

    /// Add a field filter. `value` must already be a typed REST value
    /// (see [`encode_value`] and [`timestamp`]).
    #[must_use]
    pub fn filter(mut self, field: &str, op: FilterOp, value: Value) -> Self {
        self.filters.push(FieldFilter { field: field.to_owned(), op, value });
        self
    }

    /// Shorthand for an equality filter on a plain JSON value.
    #[must_use]
    pub fn where_eq(self, field: &str, value: &Value) -> Self {
        self.filter(field, FilterOp::Equal, encode_value(value))
    }

    #[must_use]
    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order_by.push((field.to_owned(), direction));
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Request body for `:runQuery`.
    #[must_use]
    pub fn to_request_body(&self) -> Value {
        let mut query = Map::new();
        query.insert("from".to_owned(), json!([{ "collectionId": self.collection }]));

        let mut filters: Vec<Value> = self
            .filters
            .iter()
            .map(|f| {
                json!({
                    "fieldFilter": {
                        "field": { "fieldPath": f.field },
                        "op": f.op.as_wire(),
                        "value": f.value,
                    }
                })
            })
            .collect();
        match filters.len() {
            0 => {}
            1 => {
                query.insert("where".to_owned(), filters.remove(0));
            }
            _ => {
                query.insert(
                    "where".to_owned(),
                    json!({ "compositeFilter": { "op": "AND", "filters": filters } }),
                );
            }
        }

        if !self.order_by.is_empty() {
            let orders: Vec<Value> = self
                .order_by
                .iter()
                .map(|(field, dir)| {
                    let direction = match dir {
                        Direction::Ascending => "ASCENDING",
                        Direction::Descending => "DESCENDING",
                    };
                    json!({ "field": { "fieldPath": field }, "direction": direction })
                })
                .collect();
            query.insert("orderBy".to_owned(), Value::Array(orders));
        }
        if let Some(limit) = self.limit {
            query.insert("limit".to_owned(), Value::from(limit));
        }
        json!({ "structuredQuery": query })
    }
}
