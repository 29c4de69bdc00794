//! The reconcile pass: probe, compare, converge.
//!
//! One invocation performs exactly one bounded pass — build the desired
//! document, GET the resource, branch on the outcome — and returns. There
//! is no requeue, no retry, no caching. Optimistic concurrency is the
//! server's job: a stale resourceVersion comes back as a conflict and is
//! surfaced as-is.

use crate::compliance::is_compliant;
use crate::error::{Error, Result};
use crate::schema::{Params, Schema, build_document};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use transport::Api;

/// Namespace-existence probes go through the projects endpoint.
const PROJECTS_BASE: &str = "/oapi/v1/projects";

/// Whether the caller wants the resource to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Converge towards the desired document.
    Present,
    /// Remove the resource if it exists.
    Absent,
}

/// Terminal outcome of a reconcile pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Resource was absent and has been created.
    Created {
        /// Document returned by the create call.
        resource: Value,
    },
    /// Resource drifted and has been replaced.
    Updated {
        /// Document returned by the update call.
        resource: Value,
    },
    /// Resource already satisfies the desired state.
    Unchanged {
        /// The current server document, unmodified.
        resource: Value,
    },
    /// Resource existed and has been deleted.
    Deleted,
    /// Intent was absent and there was nothing to delete.
    NoOp,
}

impl Outcome {
    /// Check if the outcome represents a mutation of server state.
    #[must_use]
    pub fn is_change(&self) -> bool {
        matches!(
            self,
            Self::Created { .. } | Self::Updated { .. } | Self::Deleted
        )
    }

    /// The resulting document, if the resource still exists.
    #[must_use]
    pub fn resource(&self) -> Option<&Value> {
        match self {
            Self::Created { resource } | Self::Updated { resource } | Self::Unchanged { resource } => {
                Some(resource)
            }
            Self::Deleted | Self::NoOp => None,
        }
    }

    /// Short human-readable label for status output.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Updated { .. } => "updated",
            Self::Unchanged { .. } => "unchanged",
            Self::Deleted => "deleted",
            Self::NoOp => "nothing to do",
        }
    }
}

/// Run one reconcile pass for a single resource.
///
/// Builds the desired document (failing on schema violations before any
/// network call), probes the resource path, and converges:
///
/// - present + intent absent → delete
/// - present + compliant → unchanged
/// - present + drifted → update, carrying the current resourceVersion
/// - absent + namespace missing → [`Error::NamespaceNotFound`]
/// - absent + intent present → create against the collection path
/// - absent + intent absent → no-op
///
/// Any other transport error propagates unchanged; nothing is retried.
pub fn reconcile(
    api: &dyn Api,
    schema: &Schema,
    name: &str,
    namespace: &str,
    params: &Params,
    intent: Intent,
) -> Result<Outcome> {
    let desired = build_document(schema, name, namespace, params)?;
    let path = schema.resource_path(namespace, name);

    match api.get(&path) {
        Ok(current) => converge_present(api, &path, current, desired, intent),
        Err(transport::Error::NotFound { .. }) => {
            converge_absent(api, schema, namespace, &desired, intent)
        }
        Err(err) => Err(err.into()),
    }
}

fn converge_present(
    api: &dyn Api,
    path: &str,
    current: Value,
    mut desired: Value,
    intent: Intent,
) -> Result<Outcome> {
    if intent == Intent::Absent {
        api.delete(path)?;
        return Ok(Outcome::Deleted);
    }

    if is_compliant(&current, &desired) {
        return Ok(Outcome::Unchanged { resource: current });
    }

    // Carry the concurrency token into the replacement document. This is
    // the only place a resourceVersion is ever written.
    if let Some(version) = current.pointer("/metadata/resourceVersion") {
        if let Some(metadata) = desired.get_mut("metadata").and_then(Value::as_object_mut) {
            metadata.insert("resourceVersion".to_string(), version.clone());
        }
    }

    let resource = api.update(path, &desired)?;
    Ok(Outcome::Updated { resource })
}

fn converge_absent(
    api: &dyn Api,
    schema: &Schema,
    namespace: &str,
    desired: &Value,
    intent: Intent,
) -> Result<Outcome> {
    // A missing namespace is a missing container, not a first creation.
    // Probe before acting, whatever the intent.
    if !namespace_exists(api, namespace)? {
        return Err(Error::NamespaceNotFound {
            namespace: namespace.to_string(),
        });
    }

    match intent {
        Intent::Present => {
            let resource = api.create(&schema.collection_path(namespace), desired)?;
            Ok(Outcome::Created { resource })
        }
        Intent::Absent => Ok(Outcome::NoOp),
    }
}

fn namespace_exists(api: &dyn Api, namespace: &str) -> Result<bool> {
    match api.get(&format!("{PROJECTS_BASE}/{namespace}")) {
        Ok(_) => Ok(true),
        Err(transport::Error::NotFound { .. }) => Ok(false),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    const DEPLOY_CONFIG: Schema = Schema {
        kind: "DeploymentConfig",
        api_base: "/oapi/v1",
        collection: "deploymentconfigs",
        fields: &[
            Field { name: "replicas", required: false },
            Field { name: "selector", required: false },
            Field { name: "template", required: false },
        ],
    };

    const STRICT: Schema = Schema {
        kind: "Strict",
        api_base: "/oapi/v1",
        collection: "stricts",
        fields: &[Field { name: "template", required: true }],
    };

    /// In-memory master: a path-keyed document store that hands out
    /// resourceVersions the way the real API does.
    #[derive(Default)]
    struct FakeApi {
        state: RefCell<BTreeMap<String, Value>>,
        calls: RefCell<Vec<String>>,
        writes: RefCell<Vec<Value>>,
        poison: RefCell<Option<transport::Error>>,
    }

    impl FakeApi {
        fn with_project(namespace: &str) -> Self {
            let api = Self::default();
            api.seed(
                &format!("/oapi/v1/projects/{namespace}"),
                json!({ "kind": "Project", "metadata": { "name": namespace } }),
            );
            api
        }

        fn seed(&self, path: &str, doc: Value) {
            self.state.borrow_mut().insert(path.to_string(), doc);
        }

        fn poison_next(&self, err: transport::Error) {
            *self.poison.borrow_mut() = Some(err);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn writes(&self) -> Vec<Value> {
            self.writes.borrow().clone()
        }

        fn stored(&self, path: &str) -> Option<Value> {
            self.state.borrow().get(path).cloned()
        }
    }

    impl Api for FakeApi {
        fn get(&self, path: &str) -> transport::Result<Value> {
            self.calls.borrow_mut().push(format!("GET {path}"));
            if let Some(err) = self.poison.borrow_mut().take() {
                return Err(err);
            }
            self.state
                .borrow()
                .get(path)
                .cloned()
                .ok_or(transport::Error::NotFound {
                    path: path.to_string(),
                })
        }

        fn create(&self, path: &str, body: &Value) -> transport::Result<Value> {
            self.calls.borrow_mut().push(format!("POST {path}"));
            self.writes.borrow_mut().push(body.clone());
            let name = body
                .pointer("/metadata/name")
                .and_then(Value::as_str)
                .unwrap_or("unnamed")
                .to_string();
            let mut stored = body.clone();
            if let Some(metadata) = stored.get_mut("metadata").and_then(Value::as_object_mut) {
                metadata.insert("resourceVersion".to_string(), json!("1"));
            }
            self.state
                .borrow_mut()
                .insert(format!("{path}/{name}"), stored.clone());
            Ok(stored)
        }

        fn update(&self, path: &str, body: &Value) -> transport::Result<Value> {
            self.calls.borrow_mut().push(format!("PUT {path}"));
            self.writes.borrow_mut().push(body.clone());
            let mut stored = body.clone();
            if let Some(metadata) = stored.get_mut("metadata").and_then(Value::as_object_mut) {
                metadata.insert("resourceVersion".to_string(), json!("2"));
            }
            self.state
                .borrow_mut()
                .insert(path.to_string(), stored.clone());
            Ok(stored)
        }

        fn delete(&self, path: &str) -> transport::Result<Value> {
            self.calls.borrow_mut().push(format!("DELETE {path}"));
            self.state.borrow_mut().remove(path);
            Ok(json!({ "kind": "Status", "status": "Success" }))
        }
    }

    fn replicas(n: i64) -> Params {
        let mut params = Params::new();
        params.set("replicas", json!(n));
        params
    }

    #[test]
    fn test_creates_when_absent_and_namespace_exists() {
        // 404 on the resource, project probe succeeds.
        let api = FakeApi::with_project("ci");
        let outcome =
            reconcile(&api, &DEPLOY_CONFIG, "app", "ci", &replicas(3), Intent::Present).unwrap();

        assert!(matches!(outcome, Outcome::Created { .. }));
        assert!(outcome.is_change());
        assert!(
            api.calls()
                .contains(&"POST /oapi/v1/namespaces/ci/deploymentconfigs".to_string()),
            "create must go to the collection path: {:?}",
            api.calls()
        );
    }

    #[test]
    fn test_create_carries_no_resource_version() {
        let api = FakeApi::with_project("ci");
        reconcile(&api, &DEPLOY_CONFIG, "app", "ci", &replicas(3), Intent::Present).unwrap();

        let posted = &api.writes()[0];
        assert!(posted.pointer("/metadata/resourceVersion").is_none());
    }

    #[test]
    fn test_namespace_not_found_gates_create() {
        // Resource 404 and project probe 404: the container is missing.
        let api = FakeApi::default();
        let err = reconcile(&api, &DEPLOY_CONFIG, "app", "ci", &replicas(3), Intent::Present)
            .unwrap_err();

        assert!(matches!(err, Error::NamespaceNotFound { .. }));
        assert!(api.writes().is_empty(), "no create may be attempted");
    }

    #[test]
    fn test_namespace_not_found_is_fatal_even_for_absent_intent() {
        let api = FakeApi::default();
        let err = reconcile(&api, &DEPLOY_CONFIG, "app", "ci", &replicas(3), Intent::Absent)
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::NamespaceNotFound);
    }

    #[test]
    fn test_unchanged_when_compliant() {
        let api = FakeApi::with_project("ci");
        api.seed(
            "/oapi/v1/namespaces/ci/deploymentconfigs/app",
            json!({
                "kind": "DeploymentConfig",
                "apiVersion": "v1",
                "metadata": { "name": "app", "namespace": "ci", "resourceVersion": "7" },
                "spec": { "replicas": 3, "paused": false },
                "status": { "readyReplicas": 3 },
            }),
        );

        let outcome =
            reconcile(&api, &DEPLOY_CONFIG, "app", "ci", &replicas(3), Intent::Present).unwrap();

        assert!(!outcome.is_change());
        // The current document comes back unmodified, extra fields included.
        let resource = outcome.resource().unwrap();
        assert_eq!(resource["status"]["readyReplicas"], 3);
        assert!(api.writes().is_empty());
    }

    #[test]
    fn test_update_copies_resource_version() {
        // Replica drift: the PUT must carry the current token.
        let api = FakeApi::with_project("ci");
        api.seed(
            "/oapi/v1/namespaces/ci/deploymentconfigs/app",
            json!({
                "kind": "DeploymentConfig",
                "metadata": { "name": "app", "namespace": "ci", "resourceVersion": "41" },
                "spec": { "replicas": 1 },
            }),
        );

        let outcome =
            reconcile(&api, &DEPLOY_CONFIG, "app", "ci", &replicas(3), Intent::Present).unwrap();

        assert!(matches!(outcome, Outcome::Updated { .. }));
        let put = &api.writes()[0];
        assert_eq!(put["metadata"]["resourceVersion"], "41");
        assert_eq!(put["spec"]["replicas"], 3);
        assert!(
            api.calls()
                .contains(&"PUT /oapi/v1/namespaces/ci/deploymentconfigs/app".to_string())
        );
    }

    #[test]
    fn test_second_pass_is_unchanged() {
        // Idempotence: against a faithful store, the second pass of the
        // same desired state must not write.
        let api = FakeApi::with_project("ci");
        let params = replicas(3);

        let first = reconcile(&api, &DEPLOY_CONFIG, "app", "ci", &params, Intent::Present).unwrap();
        let second =
            reconcile(&api, &DEPLOY_CONFIG, "app", "ci", &params, Intent::Present).unwrap();

        assert!(matches!(first, Outcome::Created { .. }));
        assert!(matches!(second, Outcome::Unchanged { .. }));
        assert_eq!(api.writes().len(), 1, "only the create may write");
    }

    #[test]
    fn test_delete_when_present_and_intent_absent() {
        let api = FakeApi::with_project("ci");
        let path = "/oapi/v1/namespaces/ci/deploymentconfigs/app";
        api.seed(path, json!({ "kind": "DeploymentConfig", "metadata": { "name": "app" } }));

        let outcome =
            reconcile(&api, &DEPLOY_CONFIG, "app", "ci", &replicas(3), Intent::Absent).unwrap();

        assert_eq!(outcome, Outcome::Deleted);
        assert!(outcome.is_change());
        assert!(outcome.resource().is_none());
        assert!(api.stored(path).is_none());
    }

    #[test]
    fn test_delete_on_absent_resource_is_noop() {
        let api = FakeApi::with_project("ci");
        let outcome =
            reconcile(&api, &DEPLOY_CONFIG, "app", "ci", &replicas(3), Intent::Absent).unwrap();

        assert_eq!(outcome, Outcome::NoOp);
        assert!(!outcome.is_change());
        assert!(api.writes().is_empty());
    }

    #[test]
    fn test_transport_errors_propagate_without_probe() {
        let api = FakeApi::with_project("ci");
        api.poison_next(transport::Error::Unauthorized {
            message: "token expired".to_string(),
        });

        let err = reconcile(&api, &DEPLOY_CONFIG, "app", "ci", &replicas(3), Intent::Present)
            .unwrap_err();

        assert_eq!(err.kind(), crate::ErrorKind::Unauthorized);
        // Only the initial GET may have run; a 401 is not a reason to
        // probe the namespace.
        assert_eq!(api.calls().len(), 1);
    }

    #[test]
    fn test_schema_error_precedes_any_network_call() {
        let api = FakeApi::with_project("ci");
        let err =
            reconcile(&api, &STRICT, "x", "ci", &Params::new(), Intent::Present).unwrap_err();

        assert_eq!(err.kind(), crate::ErrorKind::Schema);
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(Outcome::Deleted.describe(), "deleted");
        assert_eq!(Outcome::NoOp.describe(), "nothing to do");
        assert!(!Outcome::NoOp.is_change());
    }
}
