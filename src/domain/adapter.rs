//! Normalization of raw store and user records
//!
//! The backend is not consistent about field names: a store may carry its id
//! as `store_id` or `id`, a user as `user_id` or `id`, and labels move
//! around in the same way. Records are adapted once, at ingestion, into
//! [`Store`] and [`User`]. Nothing downstream looks at raw fields.

use serde_json::Value;
use thiserror::Error;

use crate::domain::value_objects::{StoreId, UserId};
use crate::{Store, User};

/// Field layout of an entity that needs normalizing.
pub trait Adaptable: Sized {
    /// Used in the synthesized fallback label, e.g. `Store #7`.
    const KIND: &'static str;
    /// Identifier fields, in priority order.
    const ID_FIELDS: &'static [&'static str];
    /// Label fields, in priority order.
    const LABEL_FIELDS: &'static [&'static str];

    fn from_parts(id: i64, label: String) -> Self;
}

impl Adaptable for Store {
    const KIND: &'static str = "Store";
    const ID_FIELDS: &'static [&'static str] = &["store_id", "id"];
    const LABEL_FIELDS: &'static [&'static str] = &["store_location", "name"];

    fn from_parts(id: i64, label: String) -> Self {
        Store { id: StoreId::new(id), label }
    }
}

impl Adaptable for User {
    const KIND: &'static str = "User";
    const ID_FIELDS: &'static [&'static str] = &["user_id", "id"];
    const LABEL_FIELDS: &'static [&'static str] = &["username", "name"];

    fn from_parts(id: i64, label: String) -> Self {
        User { id: UserId::new(id), label }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} record has no usable identifier (looked for {})", .fields.join(", "))]
pub struct SchemaError {
    pub kind: &'static str,
    pub fields: &'static [&'static str],
}

/// Integer ids may arrive as JSON numbers or numeric strings.
fn as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn adapt<T: Adaptable>(raw: &Value) -> Result<T, SchemaError> {
    let id = T::ID_FIELDS
        .iter()
        .find_map(|field| raw.get(field).and_then(as_id))
        .ok_or(SchemaError { kind: T::KIND, fields: T::ID_FIELDS })?;

    let label = T::LABEL_FIELDS
        .iter()
        .find_map(|field| raw.get(field).and_then(as_label))
        .unwrap_or_else(|| format!("{} #{}", T::KIND, id));

    Ok(T::from_parts(id, label))
}

/// Adapts a whole collection; the first record without an id fails it.
pub fn adapt_all<T: Adaptable>(raws: &[Value]) -> Result<Vec<T>, SchemaError> {
    raws.iter().map(adapt::<T>).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_store_prefers_store_id_and_location() {
        let store: Store = adapt(&json!({"store_id": 7, "id": 1, "store_location": "5th Avenue"})).unwrap();
        assert_eq!(store, Store { id: StoreId::new(7), label: "5th Avenue".into() });
    }

    #[test]
    fn test_falls_back_to_generic_fields() {
        let store: Store = adapt(&json!({"id": "12", "name": "Depot"})).unwrap();
        assert_eq!(store.id, StoreId::new(12));
        assert_eq!(store.label, "Depot");

        let user: User = adapt(&json!({"id": 3, "username": "", "name": null})).unwrap();
        assert_eq!(user.label, "User #3");
    }

    #[test]
    fn test_unusable_id_field_falls_through() {
        let user: User = adapt(&json!({"user_id": null, "id": 5, "username": "ops"})).unwrap();
        assert_eq!(user, User { id: UserId::new(5), label: "ops".into() });
    }

    #[test]
    fn test_missing_id_is_schema_error() {
        let err = adapt::<Store>(&json!({"store_location": "Nowhere"})).unwrap_err();
        assert_eq!(err.kind, "Store");
        assert_eq!(err.to_string(), "Store record has no usable identifier (looked for store_id, id)");

        let all = adapt_all::<User>(&[json!({"id": 1}), json!({"name": "ghost"})]);
        assert!(all.is_err());
    }
}
