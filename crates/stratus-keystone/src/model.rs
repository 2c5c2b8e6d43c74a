//! Identity v2.0 wire models

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Token request
// ============================================================================

#[derive(Clone, Debug, Serialize)]
pub(crate) struct AuthRequest<'a> {
    pub auth: AuthBody<'a>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_credentials: Option<PasswordCredentials<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_access_key_credentials: Option<ApiAccessKeyCredentials<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<&'a str>,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct PasswordCredentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiAccessKeyCredentials<'a> {
    pub access_key: &'a str,
    pub secret_key: &'a str,
}

// ============================================================================
// Token response
// ============================================================================

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct AccessResponse {
    pub access: Access,
}

/// Result of a successful login: the token, the user and the service catalog
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Access {
    pub token: Token,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub service_catalog: Vec<Service>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Token {
    pub id: String,
    #[serde(deserialize_with = "deserialize_expires")]
    pub expires: DateTime<Utc>,
    #[serde(default)]
    pub tenant: Option<Tenant>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<Role>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Role {
    pub name: String,
}

/// A catalog entry such as `network` or `object-store`
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Service {
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(rename = "publicURL", default)]
    pub public_url: Option<String>,
    #[serde(rename = "internalURL", default)]
    pub internal_url: Option<String>,
    #[serde(rename = "adminURL", default)]
    pub admin_url: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
}

/// Accepts RFC 3339 timestamps as well as the zone-less form older servers emit
fn deserialize_expires<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("bad timestamp {raw}")))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCESS: &str = r#"{
        "access": {
            "token": {
                "expires": "2012-06-06T20:44:21Z",
                "id": "Auth_4f173437e4b013bee56d1007",
                "tenant": {"id": "40806637803162", "name": "user@stratus.example-default-tenant"}
            },
            "user": {
                "id": "36980896575174",
                "name": "user@stratus.example",
                "roles": [{"id": "00000000004022", "name": "Admin"}]
            },
            "serviceCatalog": [{
                "name": "Object Storage",
                "type": "object-store",
                "endpoints": [{
                    "tenantId": "40806637803162",
                    "publicURL": "https://objects.stratus.example/v1.0/40806637803162",
                    "region": "region-a.geo-1",
                    "id": "1.0"
                }]
            }]
        }
    }"#;

    #[test]
    fn test_access_deserialization() {
        let response: AccessResponse = serde_json::from_str(ACCESS).unwrap();
        let access = response.access;
        assert_eq!(access.token.id, "Auth_4f173437e4b013bee56d1007");
        assert_eq!(access.token.expires.to_rfc3339(), "2012-06-06T20:44:21+00:00");
        assert_eq!(access.token.tenant.unwrap().id, "40806637803162");
        assert_eq!(access.user.unwrap().roles[0].name, "Admin");

        let service = &access.service_catalog[0];
        assert_eq!(service.service_type, "object-store");
        assert_eq!(
            service.endpoints[0].public_url.as_deref(),
            Some("https://objects.stratus.example/v1.0/40806637803162")
        );
        assert_eq!(service.endpoints[0].internal_url, None);
    }

    #[test]
    fn test_parse_timestamp_variants() {
        assert!(parse_timestamp("2013-04-26T00:20:33Z").is_some());
        assert!(parse_timestamp("2013-04-26T00:20:33.123456").is_some());
        assert!(parse_timestamp("2013-04-26T00:20:33-05:00").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_password_request_serialization() {
        let request = AuthRequest {
            auth: AuthBody {
                password_credentials: Some(PasswordCredentials {
                    username: "demo",
                    password: "secret",
                }),
                api_access_key_credentials: None,
                tenant_name: Some("demo-tenant"),
                tenant_id: None,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "auth": {
                    "passwordCredentials": {"username": "demo", "password": "secret"},
                    "tenantName": "demo-tenant"
                }
            })
        );
    }

    #[test]
    fn test_access_key_request_serialization() {
        let request = AuthRequest {
            auth: AuthBody {
                password_credentials: None,
                api_access_key_credentials: Some(ApiAccessKeyCredentials {
                    access_key: "AK",
                    secret_key: "SK",
                }),
                tenant_name: None,
                tenant_id: Some("1234"),
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["auth"]["apiAccessKeyCredentials"],
            serde_json::json!({"accessKey": "AK", "secretKey": "SK"})
        );
        assert_eq!(json["auth"]["tenantId"], "1234");
    }
}
