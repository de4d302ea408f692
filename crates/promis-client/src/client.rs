//! The Assessment Center API client.

use reqwest::header::ACCEPT;
use reqwest::RequestBuilder;
use serde_json::Value;
use tracing::instrument;

use promis_core::model::ItemResponse;

use crate::config::PromisConfig;
use crate::error::ApiError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How item responses are encoded in the stateless request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyEncoding {
    /// JSON array body with the `BodyParam=true` query parameter.
    #[default]
    Json,
    /// `ItemID=ItemResponseOID` pairs, form-urlencoded.
    Form,
}

/// Thin wrapper around the PROMIS Assessment Center REST endpoints.
///
/// All endpoints are POST and speak JSON; responses are returned as raw
/// `serde_json::Value` since the API's shapes are controlled by the
/// service, not by this crate.
#[derive(Debug)]
pub struct PromisClient {
    registration: String,
    token: String,
    base_url: String,
    api_version: String,
    client: reqwest::Client,
}

impl PromisClient {
    /// Build a client from configuration.
    ///
    /// Fails with [`ApiError::MissingCredentials`] before any request is
    /// made if the registration or token is empty.
    pub fn new(config: &PromisConfig) -> Result<Self, ApiError> {
        if config.registration.is_empty() || config.token.is_empty() {
            return Err(ApiError::MissingCredentials);
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Ok(Self {
            registration: config.registration.clone(),
            token: config.token.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.trim_matches('/').to_string(),
            client,
        })
    }

    /// Return metadata for all available forms.
    #[instrument(skip(self))]
    pub async fn list_forms(&self) -> Result<Value, ApiError> {
        self.send(self.post("Forms/.json")).await
    }

    /// Return question and response-option data for one form.
    #[instrument(skip(self))]
    pub async fn form_details(&self, form_oid: &str) -> Result<Value, ApiError> {
        if form_oid.is_empty() {
            return Err(ApiError::EmptyFormOid);
        }

        self.send(self.post(&format!("Forms/{form_oid}.json")))
            .await
            .map_err(|e| not_found_as_form(e, form_oid))
    }

    /// Run one stateless adaptive-assessment step.
    ///
    /// With no responses the endpoint returns the first item to
    /// administer; with responses it returns the next item, or final
    /// scores once the assessment is complete.
    #[instrument(skip(self, responses), fields(responses = responses.len()))]
    pub async fn stateless_next(
        &self,
        form_oid: &str,
        responses: &[ItemResponse],
        encoding: BodyEncoding,
    ) -> Result<Value, ApiError> {
        if form_oid.is_empty() {
            return Err(ApiError::EmptyFormOid);
        }

        let mut request = self.post(&format!("StatelessParticipants/{form_oid}.json"));
        if !responses.is_empty() {
            request = match encoding {
                BodyEncoding::Json => request
                    .query(&[("BodyParam", "true")])
                    .json(&responses),
                BodyEncoding::Form => {
                    let pairs: Vec<(&str, &str)> = responses
                        .iter()
                        .map(|r| (r.item_id.as_str(), r.item_response_oid.as_str()))
                        .collect();
                    request.form(&pairs)
                }
            };
        }

        self.send(request)
            .await
            .map_err(|e| not_found_as_form(e, form_oid))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        let url = format!("{}/{}/{}", self.base_url, self.api_version, path);
        self.client
            .post(url)
            .basic_auth(&self.registration, Some(&self.token))
            .header(ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(DEFAULT_TIMEOUT_SECS)
            } else {
                ApiError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status == 401 {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::AuthenticationFailed(body));
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status,
                message: body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidJson(e.to_string()))
    }
}

/// A 404 on a form-scoped endpoint means the OID does not exist.
fn not_found_as_form(error: ApiError, form_oid: &str) -> ApiError {
    match error {
        ApiError::Api { status: 404, .. } => ApiError::FormNotFound(form_oid.to_string()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promis_core::model::to_item_responses;
    use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str) -> PromisConfig {
        PromisConfig {
            registration: "reg".to_string(),
            token: "tok".to_string(),
            base_url: base_url.to_string(),
            api_version: "2014-01".to_string(),
        }
    }

    #[test]
    fn empty_credentials_rejected_before_any_request() {
        let config = PromisConfig {
            registration: String::new(),
            ..PromisConfig::default()
        };
        let err = PromisClient::new(&config).unwrap_err();
        assert!(matches!(err, ApiError::MissingCredentials));
    }

    #[tokio::test]
    async fn list_forms_sends_basic_auth() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2014-01/Forms/.json"))
            // base64("reg:tok")
            .and(header("Authorization", "Basic cmVnOnRvaw=="))
            .and(header("Accept", "application/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"Form": [{"Name": "F", "OID": "X"}]})),
            )
            .mount(&server)
            .await;

        let client = PromisClient::new(&test_config(&server.uri())).unwrap();
        let data = client.list_forms().await.unwrap();
        assert_eq!(data["Form"][0]["OID"], "X");
    }

    #[tokio::test]
    async fn form_details_hits_oid_path() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2014-01/Forms/ABC-123.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"OID": "ABC-123"})),
            )
            .mount(&server)
            .await;

        let client = PromisClient::new(&test_config(&server.uri())).unwrap();
        let data = client.form_details("ABC-123").await.unwrap();
        assert_eq!(data["OID"], "ABC-123");
    }

    #[tokio::test]
    async fn form_details_rejects_empty_oid() {
        let client = PromisClient::new(&test_config("http://unused")).unwrap();
        let err = client.form_details("").await.unwrap_err();
        assert!(matches!(err, ApiError::EmptyFormOid));
    }

    #[tokio::test]
    async fn stateless_without_responses_sends_empty_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2014-01/StatelessParticipants/ABC-123.json"))
            .and(body_string(""))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"Items": []})),
            )
            .mount(&server)
            .await;

        let client = PromisClient::new(&test_config(&server.uri())).unwrap();
        client
            .stateless_next("ABC-123", &[], BodyEncoding::Json)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn stateless_json_body_sets_body_param() {
        let server = MockServer::start().await;

        let responses = to_item_responses(&["PAININ9=Somewhat".parse().unwrap()]);
        Mock::given(method("POST"))
            .and(path("/2014-01/StatelessParticipants/ABC-123.json"))
            .and(query_param("BodyParam", "true"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!([{
                "ItemID": "PAININ9",
                "ItemResponseOID": "Somewhat",
                "Order": 1
            }])))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"Items": []})),
            )
            .mount(&server)
            .await;

        let client = PromisClient::new(&test_config(&server.uri())).unwrap();
        client
            .stateless_next("ABC-123", &responses, BodyEncoding::Json)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn stateless_form_body_preserves_pair_order() {
        let server = MockServer::start().await;

        let responses = to_item_responses(&[
            "PAININ9=Somewhat".parse().unwrap(),
            "EDANX01=Never".parse().unwrap(),
        ]);
        Mock::given(method("POST"))
            .and(path("/2014-01/StatelessParticipants/ABC-123.json"))
            .and(header("Content-Type", "application/x-www-form-urlencoded"))
            .and(body_string("PAININ9=Somewhat&EDANX01=Never"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"Items": []})),
            )
            .mount(&server)
            .await;

        let client = PromisClient::new(&test_config(&server.uri())).unwrap();
        client
            .stateless_next("ABC-123", &responses, BodyEncoding::Form)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn authentication_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2014-01/Forms/.json"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
            .mount(&server)
            .await;

        let config = PromisConfig {
            registration: "bad".to_string(),
            token: "creds".to_string(),
            base_url: server.uri(),
            api_version: "2014-01".to_string(),
        };
        let client = PromisClient::new(&config).unwrap();
        let err = client.list_forms().await.unwrap_err();
        assert!(matches!(err, ApiError::AuthenticationFailed(ref body) if body == "bad credentials"));
        assert!(err.is_permanent());
    }

    #[tokio::test]
    async fn missing_form_maps_to_form_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2014-01/Forms/NOPE.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = PromisClient::new(&test_config(&server.uri())).unwrap();
        let err = client.form_details("NOPE").await.unwrap_err();
        assert!(matches!(err, ApiError::FormNotFound(ref oid) if oid == "NOPE"));
    }

    #[tokio::test]
    async fn server_error_carries_status_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2014-01/Forms/.json"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = PromisClient::new(&test_config(&server.uri())).unwrap();
        let err = client.list_forms().await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Api {
                status: 500,
                ref message
            } if message == "boom"
        ));
    }

    #[tokio::test]
    async fn non_json_success_body_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2014-01/Forms/.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = PromisClient::new(&test_config(&server.uri())).unwrap();
        let err = client.list_forms().await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidJson(_)));
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_trimmed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2014-01/Forms/.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let base = format!("{}/", server.uri());
        let client = PromisClient::new(&test_config(&base)).unwrap();
        client.list_forms().await.unwrap();
    }
}
