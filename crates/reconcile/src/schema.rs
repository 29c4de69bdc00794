//! Field schemas and the desired-document builder.
//!
//! A [`Schema`] is static configuration: the resource kind, where its
//! collection lives on the API, and which spec fields it accepts.
//! [`build_document`] turns a schema plus caller [`Params`] into the
//! canonical desired document. The document is constructed directly as
//! structured JSON — an unset parameter is an absent `Params` entry, never
//! a sentinel string — and elision guarantees that unset fields and
//! mappings emptied by elision never appear. Empty sequences are kept.

use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One spec field a resource kind accepts.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Field name as it appears in the document's `spec` mapping.
    pub name: &'static str,
    /// Whether building fails when the field is unset.
    pub required: bool,
}

/// Static description of a resource kind.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    /// Document `kind`, e.g. `BuildConfig`.
    pub kind: &'static str,
    /// API group prefix, `/oapi/v1` or `/api/v1`.
    pub api_base: &'static str,
    /// Collection segment, e.g. `buildconfigs`.
    pub collection: &'static str,
    /// Accepted spec fields.
    pub fields: &'static [Field],
}

impl Schema {
    /// Path of a named resource.
    #[must_use]
    pub fn resource_path(&self, namespace: &str, name: &str) -> String {
        format!(
            "{}/namespaces/{}/{}/{}",
            self.api_base, namespace, self.collection, name
        )
    }

    /// Path of the resource collection, used for create.
    #[must_use]
    pub fn collection_path(&self, namespace: &str) -> String {
        format!("{}/namespaces/{}/{}", self.api_base, namespace, self.collection)
    }
}

/// Caller-supplied field values.
///
/// An unset parameter is simply absent. JSON `null` is an ordinary value a
/// caller may set; it is not an absence marker.
#[derive(Debug, Clone, Default)]
pub struct Params(BTreeMap<String, Value>);

impl Params {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    /// Look up a field value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

/// Build the canonical desired document for one resource.
///
/// Fails with [`Error::Schema`] if a required field is unset. The result
/// carries `kind`, `apiVersion`, `metadata {name, namespace}` and a `spec`
/// mapping — the latter omitted entirely when no spec field survives
/// elision (service accounts have none to begin with).
pub fn build_document(
    schema: &Schema,
    name: &str,
    namespace: &str,
    params: &Params,
) -> Result<Value> {
    let mut spec = Map::new();
    for field in schema.fields {
        match params.get(field.name) {
            Some(value) => {
                spec.insert(field.name.to_string(), value.clone());
            }
            None if field.required => {
                return Err(Error::Schema {
                    field: field.name.to_string(),
                });
            }
            None => {}
        }
    }

    let mut document = Map::new();
    document.insert("kind".to_string(), Value::String(schema.kind.to_string()));
    document.insert("apiVersion".to_string(), Value::String("v1".to_string()));
    document.insert(
        "metadata".to_string(),
        serde_json::json!({ "name": name, "namespace": namespace }),
    );
    if let Some(spec) = prune(Value::Object(spec)) {
        document.insert("spec".to_string(), spec);
    }

    Ok(Value::Object(document))
}

/// Recursively drop mappings that are (or become) empty.
///
/// Scalars, nulls and sequences pass through untouched; only mappings are
/// examined, matching the elision contract.
fn prune(value: Value) -> Option<Value> {
    match value {
        Value::Object(map) => {
            let pruned: Map<String, Value> = map
                .into_iter()
                .filter_map(|(key, value)| prune(value).map(|value| (key, value)))
                .collect();
            if pruned.is_empty() {
                None
            } else {
                Some(Value::Object(pruned))
            }
        }
        other => Some(other),
    }
}
