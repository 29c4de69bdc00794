//! Role-attachment sub-reconciler.
//!
//! Ensures an identity is a member of each named role binding, creating
//! the binding when it does not exist. Attachment is additive and
//! idempotent: an identity already on the list causes no network write.

use crate::error::Result;
use serde_json::{Value, json};
use transport::Api;

/// Format the identity of a service account.
#[must_use]
pub fn service_account_identity(namespace: &str, name: &str) -> String {
    format!("system:serviceaccount:{namespace}:{name}")
}

/// Ensure `identity` is bound to every role in `roles`.
///
/// Returns true if any role caused a mutation. Callers must OR this into
/// the changed flag of the enclosing reconcile pass: a resource can be
/// unchanged while role attachment still mutates state.
pub fn attach(api: &dyn Api, namespace: &str, identity: &str, roles: &[String]) -> Result<bool> {
    let mut changed = false;
    for role in roles {
        if attach_role(api, namespace, identity, role)? {
            changed = true;
        }
    }
    Ok(changed)
}

fn binding_path(namespace: &str, role: &str) -> String {
    format!("/oapi/v1/namespaces/{namespace}/rolebindings/{role}")
}

fn attach_role(api: &dyn Api, namespace: &str, identity: &str, role: &str) -> Result<bool> {
    let path = binding_path(namespace, role);
    match api.get(&path) {
        Ok(mut binding) => {
            let already_member = binding
                .get("userNames")
                .and_then(Value::as_array)
                .is_some_and(|users| users.iter().any(|user| user.as_str() == Some(identity)));
            if already_member {
                return Ok(false);
            }

            // userNames may be null or missing on a binding created
            // through other channels; treat both as empty.
            match binding.get_mut("userNames").and_then(Value::as_array_mut) {
                Some(users) => users.push(Value::String(identity.to_string())),
                None => {
                    if let Some(map) = binding.as_object_mut() {
                        map.insert("userNames".to_string(), json!([identity]));
                    }
                }
            }
            api.update(&path, &binding)?;
            Ok(true)
        }
        Err(transport::Error::NotFound { .. }) => {
            let binding = new_binding(namespace, role, identity);
            api.create(
                &format!("/oapi/v1/namespaces/{namespace}/rolebindings"),
                &binding,
            )?;
            Ok(true)
        }
        Err(err) => Err(err.into()),
    }
}

/// A fresh role binding naming exactly one identity.
fn new_binding(namespace: &str, role: &str, identity: &str) -> Value {
    json!({
        "kind": "RoleBinding",
        "apiVersion": "v1",
        "metadata": { "name": role, "namespace": namespace },
        "userNames": [identity],
        "groupNames": null,
        "subjects": [],
        "roleRef": { "name": role },
    })
}
