//! AWS Signature Version 4
//!
//! The signer runs as the [`Authenticator`] of each regional client, so it
//! signs the request exactly as reqwest is about to send it. The signature
//! itself comes from `reqsign`; this wrapper hashes the form body into
//! `x-amz-content-sha256` first, because reqsign signs that header as the
//! payload hash.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqsign::{AwsCredential, AwsV4Signer};
use reqwest::header::{HOST, HeaderValue};
use sha2::{Digest, Sha256};
use stratus_core::{Authenticator, Error, Result};
use tracing::trace;

use crate::config::AwsCredentials;

const CONTENT_SHA256: &str = "x-amz-content-sha256";

pub const EC2_SERVICE: &str = "ec2";

#[derive(Clone, Debug)]
pub struct SigV4Signer {
    credentials: Arc<AwsCredentials>,
    region: String,
    service: String,
}

impl SigV4Signer {
    pub fn new(credentials: Arc<AwsCredentials>, region: &str, service: &str) -> Self {
        Self {
            credentials,
            region: region.to_string(),
            service: service.to_string(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    fn credential(&self) -> AwsCredential {
        AwsCredential {
            access_key_id: self.credentials.access_key_id.clone(),
            secret_access_key: self.credentials.secret_access_key.clone(),
            session_token: self.credentials.session_token.clone(),
            ..Default::default()
        }
    }

    /// Sign `request` as of `now`, adding the payload hash, `x-amz-date`,
    /// the session token and `Authorization`
    pub fn sign_at(&self, request: &mut reqwest::Request, now: DateTime<Utc>) -> Result<()> {
        let payload = request
            .body()
            .and_then(|body| body.as_bytes())
            .unwrap_or_default();
        let payload_hash = const_hex::encode(Sha256::digest(payload));
        request
            .headers_mut()
            .insert(CONTENT_SHA256, header_value(&payload_hash)?);

        let mut signable = http::Request::builder()
            .method(request.method().clone())
            .uri(request.url().as_str())
            .body(())
            .map_err(|e| Error::InvalidConfig(format!("unsignable request: {e}")))?;
        *signable.headers_mut() = request.headers().clone();

        AwsV4Signer::new(&self.service, &self.region)
            .time(now)
            .sign(&mut signable, &self.credential())
            .map_err(|e| Error::AuthenticationFailed(format!("failed to sign request: {e}")))?;

        // reqwest derives Host from the URL
        let mut headers = std::mem::take(signable.headers_mut());
        headers.remove(HOST);
        *request.headers_mut() = headers;
        trace!(target: "stratus::wire", "Signed {} {} for {}", request.method(), request.url(), self.region);
        Ok(())
    }
}

#[async_trait]
impl Authenticator for SigV4Signer {
    async fn authorize(&self, request: &mut reqwest::Request) -> Result<()> {
        self.sign_at(request, Utc::now())
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| Error::InvalidConfig(format!("unusable signing header value: {e}")))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use hmac::{Hmac, Mac};
    use reqwest::Method;
    use reqwest::header::AUTHORIZATION;

    use super::*;

    const SECRET: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";
    const FORM: &str = "application/x-www-form-urlencoded; charset=utf-8";

    fn hmac_sha256(key: &[u8], data: &str) -> Vec<u8> {
        let mut mac = Hmac::<Sha256>::new_from_slice(key).unwrap();
        mac.update(data.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    fn signing_key(date: &str, region: &str, service: &str) -> Vec<u8> {
        let k_date = hmac_sha256(format!("AWS4{SECRET}").as_bytes(), date);
        let k_region = hmac_sha256(&k_date, region);
        let k_service = hmac_sha256(&k_region, service);
        hmac_sha256(&k_service, "aws4_request")
    }

    fn signature(canonical_request: &str, amz_date: &str, region: &str, service: &str) -> String {
        let date = &amz_date[..8];
        let string_to_sign = format!(
            "AWS4-HMAC-SHA256\n{}\n{}/{}/{}/aws4_request\n{}",
            amz_date,
            date,
            region,
            service,
            const_hex::encode(Sha256::digest(canonical_request.as_bytes()))
        );
        const_hex::encode(hmac_sha256(&signing_key(date, region, service), &string_to_sign))
    }

    fn header<'a>(request: &'a reqwest::Request, name: &str) -> &'a str {
        request.headers().get(name).unwrap().to_str().unwrap()
    }

    /// Recompute the signature of a signed request from its final headers
    fn expected_signature(request: &reqwest::Request, region: &str, service: &str) -> String {
        let authorization = header(request, AUTHORIZATION.as_str());
        let signed_headers = authorization
            .split("SignedHeaders=")
            .nth(1)
            .and_then(|rest| rest.split(',').next())
            .unwrap();

        let url = request.url();
        let host = match url.port() {
            Some(port) => format!("{}:{}", url.host_str().unwrap(), port),
            None => url.host_str().unwrap().to_string(),
        };
        let canonical_headers: String = signed_headers
            .split(';')
            .map(|name| {
                let value = if name == "host" {
                    host.clone()
                } else {
                    header(request, name).trim().to_string()
                };
                format!("{name}:{value}\n")
            })
            .collect();

        let mut query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        query.sort();
        let query = query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let canonical_request = format!(
            "{}\n{}\n{}\n{}\n{}\n{}",
            request.method().as_str(),
            url.path(),
            query,
            canonical_headers,
            signed_headers,
            header(request, CONTENT_SHA256)
        );
        signature(&canonical_request, header(request, "x-amz-date"), region, service)
    }

    fn describe_vpcs_request(endpoint: &str) -> reqwest::Request {
        let url = reqwest::Url::parse(endpoint).unwrap();
        let mut request = reqwest::Request::new(Method::POST, url);
        request
            .headers_mut()
            .insert("content-type", HeaderValue::from_static(FORM));
        *request.body_mut() = Some("Action=DescribeVpcs&Version=2016-11-15".into());
        request
    }

    #[test]
    fn test_signing_key_vector() {
        assert_eq!(
            const_hex::encode(signing_key("20150830", "us-east-1", "iam")),
            "c4afb1cc5771d871763a393e44b703571b55cc28424d1a5e86da6ed3c154a4b9"
        );
    }

    #[test]
    fn test_list_users_vector() {
        let canonical_request = "GET\n/\nAction=ListUsers&Version=2010-05-08\n\
             content-type:application/x-www-form-urlencoded; charset=utf-8\n\
             host:iam.amazonaws.com\n\
             x-amz-date:20150830T123600Z\n\n\
             content-type;host;x-amz-date\n\
             e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
        assert_eq!(
            signature(canonical_request, "20150830T123600Z", "us-east-1", "iam"),
            "5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7"
        );
    }

    #[test]
    fn test_sign_form_request() {
        let credentials = Arc::new(AwsCredentials::new("AKIDEXAMPLE", SECRET));
        let signer = SigV4Signer::new(credentials, "us-east-1", EC2_SERVICE);
        let mut request = describe_vpcs_request("https://ec2.us-east-1.amazonaws.com/");
        let now = Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap();

        signer.sign_at(&mut request, now).unwrap();

        assert_eq!(header(&request, "x-amz-date"), "20150830T123600Z");
        assert_eq!(
            header(&request, CONTENT_SHA256),
            const_hex::encode(Sha256::digest(b"Action=DescribeVpcs&Version=2016-11-15"))
        );
        assert!(request.headers().get(HOST).is_none());

        let authorization = header(&request, AUTHORIZATION.as_str());
        assert!(authorization.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/ec2/aws4_request, SignedHeaders="
        ));
        for signed in ["content-type", "host", CONTENT_SHA256, "x-amz-date"] {
            assert!(authorization.contains(signed), "{signed} not signed: {authorization}");
        }
        let expected = expected_signature(&request, "us-east-1", EC2_SERVICE);
        assert!(
            authorization.ends_with(&format!("Signature={expected}")),
            "{authorization}"
        );
    }

    #[test]
    fn test_session_token_is_signed() {
        let credentials =
            Arc::new(AwsCredentials::new("AKIDEXAMPLE", SECRET).with_session_token("session"));
        let signer = SigV4Signer::new(credentials, "eu-west-1", EC2_SERVICE);
        let mut request = describe_vpcs_request("http://127.0.0.1:4566/");

        signer.sign_at(&mut request, Utc::now()).unwrap();

        assert_eq!(header(&request, "x-amz-security-token"), "session");
        let authorization = header(&request, AUTHORIZATION.as_str());
        assert!(authorization.contains("x-amz-security-token"));
        assert!(authorization.contains("/eu-west-1/ec2/aws4_request"));
        let expected = expected_signature(&request, "eu-west-1", EC2_SERVICE);
        assert!(authorization.ends_with(&format!("Signature={expected}")));
    }
}
