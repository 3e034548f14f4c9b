//! Convenience REST routes.
//!
//! Maps the gateway's `/api/networks/...` shapes onto upstream paths:
//!
//! ```text
//! GET    /api/networks                      → GET    /network
//! GET    /api/networks/:net                 → GET    /network/:net
//! GET    /api/networks/:net/members         → GET    /network/:net/member
//! GET    /api/networks/:net/members/:member → GET    /network/:net/member/:member
//! PATCH  /api/networks/:net/members/:member → POST   /network/:net/member/:member
//! DELETE /api/networks/:net/members/:member → DELETE /network/:net/member/:member
//! ```
//!
//! Identifiers are interpolated verbatim. Callers are trusted to send
//! well-formed ids; this is not a validation boundary.

use axum::http::Method;

use crate::error::GatewayError;
use crate::http::request::UpstreamPath;

/// Prefix under which the convenience routes live.
pub const NETWORKS_PREFIX: &str = "/api/networks";

/// A resolved convenience route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shortcut {
    ListNetworks,
    GetNetwork { net_id: String },
    ListMembers { net_id: String },
    GetMember { net_id: String, member_id: String },
    UpdateMember { net_id: String, member_id: String },
    DeleteMember { net_id: String, member_id: String },
}

/// What a shortcut sends upstream as its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    None,
    /// A JSON body is mandatory.
    Json,
}

impl Shortcut {
    pub fn upstream_method(&self) -> Method {
        match self {
            Shortcut::ListNetworks
            | Shortcut::GetNetwork { .. }
            | Shortcut::ListMembers { .. }
            | Shortcut::GetMember { .. } => Method::GET,
            Shortcut::UpdateMember { .. } => Method::POST,
            Shortcut::DeleteMember { .. } => Method::DELETE,
        }
    }

    pub fn upstream_path(&self) -> UpstreamPath {
        let path = match self {
            Shortcut::ListNetworks => "/network".to_string(),
            Shortcut::GetNetwork { net_id } => format!("/network/{net_id}"),
            Shortcut::ListMembers { net_id } => format!("/network/{net_id}/member"),
            Shortcut::GetMember { net_id, member_id }
            | Shortcut::UpdateMember { net_id, member_id }
            | Shortcut::DeleteMember { net_id, member_id } => {
                format!("/network/{net_id}/member/{member_id}")
            }
        };
        UpstreamPath::from_template(path)
    }

    pub fn payload(&self) -> Payload {
        match self {
            Shortcut::UpdateMember { .. } => Payload::Json,
            _ => Payload::None,
        }
    }

    /// Metrics/log label.
    pub fn name(&self) -> &'static str {
        match self {
            Shortcut::ListNetworks => "list_networks",
            Shortcut::GetNetwork { .. } => "get_network",
            Shortcut::ListMembers { .. } => "list_members",
            Shortcut::GetMember { .. } => "get_member",
            Shortcut::UpdateMember { .. } => "update_member",
            Shortcut::DeleteMember { .. } => "delete_member",
        }
    }
}

/// Resolve a convenience route from the method and the path segments that
/// follow [`NETWORKS_PREFIX`].
///
/// Unknown shapes yield `RouteNotFound`; known shapes with an unmapped method
/// yield `MethodNotAllowed`.
pub fn route_rest_shortcut(method: &Method, params: &[&str]) -> Result<Shortcut, GatewayError> {
    let shortcut = match (method, params) {
        (&Method::GET, []) => Shortcut::ListNetworks,
        (&Method::GET, [net]) => Shortcut::GetNetwork { net_id: net.to_string() },
        (&Method::GET, [net, "members"]) => Shortcut::ListMembers { net_id: net.to_string() },
        (&Method::GET, [net, "members", member]) => Shortcut::GetMember {
            net_id: net.to_string(),
            member_id: member.to_string(),
        },
        (&Method::PATCH, [net, "members", member]) => Shortcut::UpdateMember {
            net_id: net.to_string(),
            member_id: member.to_string(),
        },
        (&Method::DELETE, [net, "members", member]) => Shortcut::DeleteMember {
            net_id: net.to_string(),
            member_id: member.to_string(),
        },
        (_, []) | (_, [_]) | (_, [_, "members"]) | (_, [_, "members", _]) => {
            return Err(GatewayError::MethodNotAllowed(method.clone()));
        }
        _ => {
            return Err(GatewayError::RouteNotFound(format!(
                "{}/{}",
                NETWORKS_PREFIX,
                params.join("/")
            )));
        }
    };

    Ok(shortcut)
}

/// Split a request path under [`NETWORKS_PREFIX`] into its parameters.
/// Empty segments (trailing or doubled slashes) are skipped.
pub fn shortcut_params(path: &str) -> Vec<&str> {
    path.strip_prefix(NETWORKS_PREFIX)
        .unwrap_or_default()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(method: Method, path: &str) -> Result<Shortcut, GatewayError> {
        route_rest_shortcut(&method, &shortcut_params(path))
    }

    #[test]
    fn test_list_networks() {
        let sc = resolve(Method::GET, "/api/networks").unwrap();
        assert_eq!(sc, Shortcut::ListNetworks);
        assert_eq!(sc.upstream_method(), Method::GET);
        assert_eq!(sc.upstream_path().as_str(), "/network");
    }

    #[test]
    fn test_get_network_and_members() {
        let sc = resolve(Method::GET, "/api/networks/8056c2e21c000001").unwrap();
        assert_eq!(sc.upstream_path().as_str(), "/network/8056c2e21c000001");

        let sc = resolve(Method::GET, "/api/networks/net1/members/").unwrap();
        assert_eq!(sc.upstream_path().as_str(), "/network/net1/member");
        assert_eq!(sc.payload(), Payload::None);
    }

    #[test]
    fn test_member_routes() {
        let get = resolve(Method::GET, "/api/networks/net1/members/member1").unwrap();
        assert_eq!(get.upstream_method(), Method::GET);
        assert_eq!(get.upstream_path().as_str(), "/network/net1/member/member1");

        let update = resolve(Method::PATCH, "/api/networks/net1/members/member1").unwrap();
        assert_eq!(update.upstream_method(), Method::POST);
        assert_eq!(update.upstream_path().as_str(), "/network/net1/member/member1");
        assert_eq!(update.payload(), Payload::Json);

        let delete = resolve(Method::DELETE, "/api/networks/net1/members/member1").unwrap();
        assert_eq!(delete.upstream_method(), Method::DELETE);
        assert_eq!(delete.name(), "delete_member");
    }

    #[test]
    fn test_unmapped_method_on_known_shape() {
        let err = resolve(Method::POST, "/api/networks").unwrap_err();
        assert!(matches!(err, GatewayError::MethodNotAllowed(m) if m == Method::POST));

        let err = resolve(Method::PUT, "/api/networks/net1/members/member1").unwrap_err();
        assert!(matches!(err, GatewayError::MethodNotAllowed(_)));
    }

    #[test]
    fn test_unknown_shape() {
        let err = resolve(Method::GET, "/api/networks/net1/peers").unwrap_err();
        assert!(matches!(err, GatewayError::RouteNotFound(p) if p == "/api/networks/net1/peers"));

        let err = resolve(Method::GET, "/api/networks/a/members/b/c").unwrap_err();
        assert!(matches!(err, GatewayError::RouteNotFound(_)));
    }

    #[test]
    fn test_ids_are_not_escaped() {
        let sc = resolve(Method::GET, "/api/networks/a%20b").unwrap();
        assert_eq!(sc.upstream_path().as_str(), "/network/a%20b");
    }
}
