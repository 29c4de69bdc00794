//! Static field schemas for the supported resource kinds.
//!
//! These tables are configuration, not logic: the reconciliation core in
//! the `reconcile` crate is identical for every kind. Build and deployment
//! configs live under the OpenShift API group, services and service
//! accounts under the Kubernetes core group.

use reconcile::{Field, Schema};

pub const BUILD_CONFIG: Schema = Schema {
    kind: "BuildConfig",
    api_base: "/oapi/v1",
    collection: "buildconfigs",
    fields: &[
        Field { name: "triggers", required: false },
        Field { name: "runPolicy", required: false },
        Field { name: "serviceAccount", required: false },
        Field { name: "source", required: false },
        Field { name: "strategy", required: false },
        Field { name: "output", required: false },
        Field { name: "resources", required: false },
        Field { name: "postCommit", required: false },
    ],
};

pub const DEPLOYMENT_CONFIG: Schema = Schema {
    kind: "DeploymentConfig",
    api_base: "/oapi/v1",
    collection: "deploymentconfigs",
    fields: &[
        Field { name: "strategy", required: false },
        Field { name: "triggers", required: false },
        Field { name: "replicas", required: false },
        Field { name: "test", required: false },
        Field { name: "selector", required: false },
        Field { name: "template", required: false },
    ],
};

pub const SERVICE: Schema = Schema {
    kind: "Service",
    api_base: "/api/v1",
    collection: "services",
    fields: &[
        Field { name: "ports", required: false },
        Field { name: "selector", required: false },
        Field { name: "clusterIP", required: false },
        Field { name: "type", required: false },
        Field { name: "externalIPs", required: false },
        Field { name: "sessionAffinity", required: false },
    ],
};

/// Service accounts carry no spec; the document is metadata only.
pub const SERVICE_ACCOUNT: Schema = Schema {
    kind: "ServiceAccount",
    api_base: "/api/v1",
    collection: "serviceaccounts",
    fields: &[],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_groups() {
        assert_eq!(BUILD_CONFIG.api_base, "/oapi/v1");
        assert_eq!(DEPLOYMENT_CONFIG.api_base, "/oapi/v1");
        assert_eq!(SERVICE.api_base, "/api/v1");
        assert_eq!(SERVICE_ACCOUNT.api_base, "/api/v1");
    }

    #[test]
    fn test_resource_paths() {
        assert_eq!(
            SERVICE.resource_path("prod", "web"),
            "/api/v1/namespaces/prod/services/web"
        );
        assert_eq!(
            DEPLOYMENT_CONFIG.collection_path("prod"),
            "/oapi/v1/namespaces/prod/deploymentconfigs"
        );
    }

    #[test]
    fn test_service_account_has_no_spec_fields() {
        assert!(SERVICE_ACCOUNT.fields.is_empty());
    }
}
