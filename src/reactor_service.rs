//! Tower service that turns Kubernetes API requests into actions
//!
//! Lets a plain `kube::Client` (and `kube::Api<K>`) run against a [`Fake`]:
//! each HTTP request is parsed into an [`Action`], dispatched to the reactors,
//! and the reaction is rendered back as the JSON an API server would send.

use crate::action::{Action, GenericAction};
use crate::error::Error;
use crate::fake::Fake;
use bytes::Bytes;
use futures::future::{BoxFuture, FutureExt};
use http::{Method, Request, Response, StatusCode};
use http_body_util::Full;
use kube::client::Body as KubeBody;
use serde_json::{json, Value};
use std::task::{Context, Poll};
use tower::Service;
use tracing::trace;

type ServiceResult =
    std::result::Result<Response<Full<Bytes>>, Box<dyn std::error::Error + Send + Sync>>;

/// Parsed Kubernetes API path information
#[derive(Debug, PartialEq)]
struct ParsedPath {
    group: Option<String>,
    version: String,
    namespace: Option<String>,
    resource: String,
    name: Option<String>,
}

impl ParsedPath {
    fn api_version(&self) -> String {
        match &self.group {
            Some(group) => format!("{}/{}", group, self.version),
            None => self.version.clone(),
        }
    }
}

/// HTTP service that routes requests into a [`Fake`]
///
/// When no reactor handles a request, a delete succeeds with a `Status` body
/// and a list comes back empty. Create, get and update answer 404, and any
/// other verb answers 405.
#[derive(Clone)]
pub struct ReactorService {
    fake: Fake,
}

impl ReactorService {
    pub fn new(fake: Fake) -> Self {
        Self { fake }
    }

    /// Parse URL path to extract API info
    /// Examples:
    /// - /apis/eventing.knative.dev/v1alpha1/namespaces/test-ns/triggers
    /// - /apis/eventing.knative.dev/v1alpha1/namespaces/test-ns/triggers/my-trigger
    /// - /api/v1/namespaces/default/configmaps (core group)
    /// - /api/v1/nodes/node-1 (cluster-scoped)
    fn parse_path(path: &str) -> Option<ParsedPath> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let (group, version_idx) = match parts.first() {
            Some(&"api") => (None, 1),
            Some(&"apis") if parts.len() > 2 => (Some(parts[1].to_string()), 2),
            _ => return None,
        };

        // Need at least version + resource
        if parts.len() < version_idx + 2 {
            return None;
        }
        let version = parts[version_idx].to_string();

        let (namespace, rest) = if parts[version_idx + 1] == "namespaces" {
            if parts.len() < version_idx + 4 {
                return None;
            }
            (
                Some(parts[version_idx + 2].to_string()),
                &parts[version_idx + 3..],
            )
        } else {
            (None, &parts[version_idx + 1..])
        };

        // Subresources are not modelled
        if rest.len() > 2 {
            return None;
        }

        Some(ParsedPath {
            group,
            version,
            namespace,
            resource: rest[0].to_string(),
            name: rest.get(1).map(|s| s.to_string()),
        })
    }

    /// Convert resource plural to singular kind (simplified)
    fn resource_to_kind(resource: &str) -> String {
        let singular = if let Some(base) = resource.strip_suffix("ies") {
            format!("{}y", base)
        } else if resource.ends_with("ses") || resource.ends_with("xes") {
            resource[..resource.len() - 2].to_string()
        } else if let Some(base) = resource.strip_suffix('s') {
            base.to_string()
        } else {
            resource.to_string()
        };

        let mut chars = singular.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => singular,
        }
    }

    /// Build the action a request represents
    fn request_to_action(
        method: &Method,
        parsed: &ParsedPath,
        body: &Bytes,
    ) -> Result<Action, Error> {
        let namespace = parsed.namespace.as_deref().unwrap_or("");
        let resource = parsed.resource.as_str();

        let action = match (method, parsed.name.as_deref()) {
            (&Method::GET, Some(name)) => Action::get(resource, namespace, name),
            (&Method::GET, None) => Action::list(resource, namespace),
            (&Method::POST, None) => {
                let object = Self::body_object(parsed, body)?;
                Action::create(resource, namespace, object)
            }
            (&Method::PUT, Some(_)) => {
                let object = Self::body_object(parsed, body)?;
                Action::update(resource, namespace, object)
            }
            (&Method::DELETE, Some(name)) => Action::delete(resource, namespace, name),
            (method, name) => {
                let verb = match (method, name) {
                    (&Method::DELETE, None) => "deletecollection".to_string(),
                    _ => method.as_str().to_ascii_lowercase(),
                };
                let object = if body.is_empty() {
                    None
                } else {
                    serde_json::from_slice(body).ok()
                };
                Action::Generic(GenericAction {
                    verb,
                    resource: resource.to_string(),
                    namespace: namespace.to_string(),
                    name: name.map(str::to_string),
                    object,
                })
            }
        };
        Ok(action)
    }

    /// Decode a request body, filling in apiVersion and kind when absent
    fn body_object(parsed: &ParsedPath, body: &Bytes) -> Result<Value, Error> {
        let mut obj: Value = serde_json::from_slice(body)
            .map_err(|e| Error::InvalidRequest(format!("malformed request body: {}", e)))?;
        if !obj.is_object() {
            return Err(Error::InvalidRequest(
                "request body must be an object".to_string(),
            ));
        }
        if obj.get("apiVersion").is_none() {
            obj["apiVersion"] = json!(parsed.api_version());
        }
        if obj.get("kind").is_none() {
            obj["kind"] = json!(Self::resource_to_kind(&parsed.resource));
        }
        Ok(obj)
    }

    async fn handle_request(&self, req: Request<KubeBody>) -> ServiceResult {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        trace!("{} {}", method, path);

        let body = {
            use http_body_util::BodyExt;
            req.into_body().collect().await?.to_bytes()
        };

        let Some(parsed) = Self::parse_path(&path) else {
            return Self::error_response(
                StatusCode::NOT_FOUND,
                "the server could not find the requested resource",
            );
        };

        let action = match Self::request_to_action(&method, &parsed, &body) {
            Ok(action) => action,
            Err(e) => return Self::error_to_response(e),
        };

        let verb = action.verb();
        let is_generic = matches!(action, Action::Generic(_));
        match self.fake.invoke(action) {
            Ok(Some(value)) if method == Method::POST => {
                Self::json_response(StatusCode::CREATED, value)
            }
            Ok(Some(value)) => Self::json_response(StatusCode::OK, value),
            Ok(None) => match verb.as_str() {
                "delete" => Self::json_response(
                    StatusCode::OK,
                    json!({
                        "kind": "Status",
                        "apiVersion": "v1",
                        "metadata": {},
                        "status": "Success"
                    }),
                ),
                "list" => Self::json_response(
                    StatusCode::OK,
                    json!({
                        "apiVersion": parsed.api_version(),
                        "kind": format!("{}List", Self::resource_to_kind(&parsed.resource)),
                        "metadata": {},
                        "items": []
                    }),
                ),
                _ if is_generic => {
                    Self::error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
                }
                _ => Self::error_to_response(Error::EmptyResponse {
                    verb: verb.to_string(),
                    resource: parsed.resource.clone(),
                }),
            },
            Err(e) => Self::error_to_response(e),
        }
    }

    fn error_to_response(err: Error) -> ServiceResult {
        // Convert to kube::Error to get proper ErrorResponse
        match err.into_kube_err() {
            kube::Error::Api(error_response) => {
                let status_code = StatusCode::from_u16(error_response.code)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

                // Return Status object matching Kubernetes API format
                let body = json!({
                    "kind": "Status",
                    "apiVersion": "v1",
                    "metadata": {},
                    "status": error_response.status,
                    "message": error_response.message,
                    "reason": error_response.reason,
                    "code": error_response.code
                });
                Self::json_response(status_code, body)
            }
            other => Self::error_response(StatusCode::INTERNAL_SERVER_ERROR, &other.to_string()),
        }
    }

    fn error_response(status: StatusCode, message: &str) -> ServiceResult {
        let body = json!({
            "kind": "Status",
            "apiVersion": "v1",
            "metadata": {},
            "status": "Failure",
            "message": message,
            "reason": status.canonical_reason().unwrap_or("Unknown"),
            "code": status.as_u16()
        });
        Self::json_response(status, body)
    }

    fn json_response(status: StatusCode, data: Value) -> ServiceResult {
        Ok(Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Full::new(Bytes::from(data.to_string())))?)
    }
}

impl Service<Request<KubeBody>> for ReactorService {
    type Response = Response<Full<Bytes>>;
    type Error = Box<dyn std::error::Error + Send + Sync>;
    type Future = BoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<KubeBody>) -> Self::Future {
        let this = self.clone();
        async move { this.handle_request(req).await }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_namespaced_path() {
        let parsed = ReactorService::parse_path(
            "/apis/eventing.knative.dev/v1alpha1/namespaces/test-ns/triggers/mytrigger",
        )
        .unwrap();
        assert_eq!(parsed.group.as_deref(), Some("eventing.knative.dev"));
        assert_eq!(parsed.version, "v1alpha1");
        assert_eq!(parsed.namespace.as_deref(), Some("test-ns"));
        assert_eq!(parsed.resource, "triggers");
        assert_eq!(parsed.name.as_deref(), Some("mytrigger"));
        assert_eq!(parsed.api_version(), "eventing.knative.dev/v1alpha1");
    }

    #[test]
    fn test_parse_core_and_cluster_paths() {
        let parsed = ReactorService::parse_path("/api/v1/nodes/node-1").unwrap();
        assert_eq!(parsed.group, None);
        assert_eq!(parsed.namespace, None);
        assert_eq!(parsed.resource, "nodes");
        assert_eq!(parsed.name.as_deref(), Some("node-1"));

        assert!(ReactorService::parse_path("/version").is_none());
        assert!(ReactorService::parse_path("/api/v1/namespaces/ns/pods/p/status").is_none());
    }

    #[test]
    fn test_resource_to_kind() {
        assert_eq!(ReactorService::resource_to_kind("triggers"), "Trigger");
        assert_eq!(ReactorService::resource_to_kind("policies"), "Policy");
        assert_eq!(ReactorService::resource_to_kind("ingresses"), "Ingress");
    }

    #[test]
    fn test_request_to_action_uses_path_namespace() {
        let parsed = ReactorService::parse_path(
            "/apis/eventing.knative.dev/v1alpha1/namespaces/test-ns/triggers",
        )
        .unwrap();
        let body = Bytes::from(
            json!({"metadata": {"name": "t1", "namespace": "other"}}).to_string(),
        );

        let action = ReactorService::request_to_action(&Method::POST, &parsed, &body).unwrap();
        assert_eq!(action.namespace(), "test-ns");
        assert_eq!(action.name(), Some("t1"));
        let object = action.object().unwrap();
        assert_eq!(object["kind"], "Trigger");
        assert_eq!(object["apiVersion"], "eventing.knative.dev/v1alpha1");
    }

    #[test]
    fn test_request_to_action_generic_verbs() {
        let parsed = ReactorService::parse_path(
            "/apis/eventing.knative.dev/v1alpha1/namespaces/test-ns/triggers",
        )
        .unwrap();
        let action =
            ReactorService::request_to_action(&Method::DELETE, &parsed, &Bytes::new()).unwrap();
        assert_eq!(action.verb().as_str(), "deletecollection");
        assert!(action.matches("deletecollection", "triggers"));
    }

    #[test]
    fn test_malformed_body_is_bad_request() {
        let parsed = ReactorService::parse_path(
            "/apis/eventing.knative.dev/v1alpha1/namespaces/test-ns/triggers",
        )
        .unwrap();
        let body = Bytes::from_static(b"{not json");

        let err = ReactorService::request_to_action(&Method::POST, &parsed, &body).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
        assert!(matches!(err.into_kube_err(), kube::Error::Api(ref e) if e.code == 400));
    }
}
