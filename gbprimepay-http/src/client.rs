//! The GB Prime Pay HTTP client.
//!
//! [`GbPrimePayClient`] holds the merchant [`Credentials`], the target base
//! URL and the response mode, and exposes one async method per provider call.
//! Each method issues exactly one HTTP request; there is no retry and no
//! timeout unless one is configured with [`GbPrimePayClient::with_timeout`].
//!
//! ## Error Handling
//!
//! The read-only calls (merchant info, key and token validation, status
//! check) come in two forms:
//!
//! - `merchant_info()` style methods return `Option<T>` and collapse every
//!   failure to `None`, whether network error, non-2xx status or bad JSON.
//! - `try_merchant_info()` style methods return `Result<T, ClientError>`
//!   and say which of those it was.
//!
//! Create-payment and the OTP calls only have the `Result` form; a non-2xx
//! status is a [`ClientError::HttpStatus`].

use std::fmt::Display;
use std::time::Duration;

use gbprimepay::{
    Channel, ClientConfig, Credentials, Environment, MerchantInfo, PaymentRequest,
    PaymentResponse, ShortMerchantInfo, decode_response,
};
use http::HeaderMap;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::{Span, field::Empty, instrument};

use crate::constants::{
    CHECK_PUBLIC_KEY_PATH, CHECK_SECRET_KEY_PATH, CHECK_STATUS_PATH, CHECK_TOKEN_PATH,
    MERCHANT_INFO_PATH, create_payment_path,
};
use crate::error::ClientError;

/// A client for the GB Prime Pay API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct GbPrimePayClient {
    /// Merchant credentials
    credentials: Credentials,
    /// Base URL, always ending in `/`
    base_url: Url,
    /// Return create-payment bodies unmodified
    raw: bool,
    /// Shared Reqwest HTTP client
    client: Client,
    /// Optional custom headers sent with each request
    headers: HeaderMap,
    /// Optional request timeout
    timeout: Option<Duration>,
}

impl GbPrimePayClient {
    /// Constructs a decoded-mode client for `environment`.
    ///
    /// Credentials are not checked; use the validation calls for that.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UrlParse`] if the environment URL cannot be parsed.
    pub fn try_new(credentials: Credentials, environment: Environment) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(environment.base_url()).map_err(|e| ClientError::UrlParse {
                context: "Failed to parse environment base URL",
                source: e,
            })?;
        Ok(Self::with_parts(credentials, base_url))
    }

    /// Constructs a client from a [`ClientConfig`].
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        let client = Self::with_parts(config.credentials.clone(), config.base_url()).with_raw(config.raw);
        match config.timeout_secs {
            Some(secs) => client.with_timeout(Duration::from_secs(secs)),
            None => client,
        }
    }

    fn with_parts(credentials: Credentials, base_url: Url) -> Self {
        Self {
            credentials,
            base_url: normalize_base_url(base_url),
            raw: false,
            client: Client::new(),
            headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// Points the client at a different host, e.g. a mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    /// Switches create-payment between raw and decoded responses.
    #[must_use]
    pub const fn with_raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    /// Attaches custom headers to all future requests.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets a timeout for all future requests.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replaces the underlying `reqwest` client.
    #[must_use]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Returns the base URL used by this client.
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the credentials used by this client.
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns `true` if create-payment returns bodies unmodified.
    pub const fn is_raw(&self) -> bool {
        self.raw
    }

    /// Returns the configured timeout, if any.
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns any custom headers configured on the client.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Fetches the full merchant profile, or `None` on any failure.
    pub async fn merchant_info(&self) -> Option<MerchantInfo> {
        soft(self.try_merchant_info().await)
    }

    /// Sends a `GET /getmerchantinfo` request, authenticated with the public key.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the status is not 2xx or
    /// the body is not a JSON object.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "gbprimepay.client.merchant_info",
            skip_all,
            fields(otel.status_code = Empty, error.message = Empty),
            err
        )
    )]
    pub async fn try_merchant_info(&self) -> Result<MerchantInfo, ClientError> {
        let result = self
            .fetch_json(MERCHANT_INFO_PATH, "GET /getmerchantinfo", |url| {
                self.client
                    .get(url)
                    .basic_auth(&self.credentials.public_key, Some(""))
            })
            .await;
        record_result_on_span(&result);
        result
    }

    /// Validates the public key, returning `None` on any failure.
    pub async fn validate_public_key(&self) -> Option<ShortMerchantInfo> {
        soft(self.try_validate_public_key().await)
    }

    /// Sends a `GET /checkPublicKey` request, authenticated with the public key.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the status is not 2xx or
    /// the body is not a JSON object.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "gbprimepay.client.validate_public_key",
            skip_all,
            fields(otel.status_code = Empty, error.message = Empty),
            err
        )
    )]
    pub async fn try_validate_public_key(&self) -> Result<ShortMerchantInfo, ClientError> {
        let result = self
            .fetch_json(CHECK_PUBLIC_KEY_PATH, "GET /checkPublicKey", |url| {
                self.client
                    .get(url)
                    .basic_auth(&self.credentials.public_key, Some(""))
            })
            .await;
        record_result_on_span(&result);
        result
    }

    /// Validates the secret key, returning `None` on any failure.
    pub async fn validate_secret_key(&self) -> Option<ShortMerchantInfo> {
        soft(self.try_validate_secret_key().await)
    }

    /// Sends a `GET /checkPrivateKey` request, authenticated with the secret key.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the status is not 2xx or
    /// the body is not a JSON object.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "gbprimepay.client.validate_secret_key",
            skip_all,
            fields(otel.status_code = Empty, error.message = Empty),
            err
        )
    )]
    pub async fn try_validate_secret_key(&self) -> Result<ShortMerchantInfo, ClientError> {
        let result = self
            .fetch_json(CHECK_SECRET_KEY_PATH, "GET /checkPrivateKey", |url| {
                self.client
                    .get(url)
                    .basic_auth(&self.credentials.secret_key, Some(""))
            })
            .await;
        record_result_on_span(&result);
        result
    }

    /// Validates the token, returning `None` on any failure.
    pub async fn validate_token(&self) -> Option<ShortMerchantInfo> {
        soft(self.try_validate_token().await)
    }

    /// Sends a `POST /checkCustomerKey` form with the token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the status is not 2xx or
    /// the body is not a JSON object.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "gbprimepay.client.validate_token",
            skip_all,
            fields(otel.status_code = Empty, error.message = Empty),
            err
        )
    )]
    pub async fn try_validate_token(&self) -> Result<ShortMerchantInfo, ClientError> {
        let result = self
            .fetch_json(CHECK_TOKEN_PATH, "POST /checkCustomerKey", |url| {
                self.client
                    .post(url)
                    .form(&[("token", self.credentials.token.as_str())])
            })
            .await;
        record_result_on_span(&result);
        result
    }

    /// Creates a payment on the request's channel.
    ///
    /// The form body, including the token or checksum and public key, is
    /// built by [`PaymentRequest::to_form`]. In raw mode the response body is
    /// returned as [`PaymentResponse::Body`]; otherwise the channel's
    /// decoding rule applies (see [`gbprimepay::response`]).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the status is not 2xx.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "gbprimepay.client.create_payment",
            skip_all,
            fields(
                channel = %request.channel(),
                raw = self.raw,
                otel.status_code = Empty,
                error.message = Empty
            ),
            err
        )
    )]
    pub async fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentResponse, ClientError> {
        let result = self.post_payment(request).await;
        record_result_on_span(&result);
        result
    }

    async fn post_payment(&self, request: &PaymentRequest) -> Result<PaymentResponse, ClientError> {
        let channel = request.channel();
        let context = create_payment_context(channel);
        let url = self.endpoint(create_payment_path(channel), context)?;
        let form = request.to_form(&self.credentials);

        let response = self
            .send(self.client.post(url).form(form.as_pairs()), context)
            .await?;
        let final_url = response.url().to_string();
        let body = read_text(response, context).await?;

        if self.raw {
            return Ok(PaymentResponse::Body(body));
        }
        Ok(decode_response(request, &final_url, body))
    }

    /// Checks a transaction's status, returning `None` on any failure.
    pub async fn check_status(&self, reference_no: &str) -> Option<Value> {
        soft(self.try_check_status(reference_no).await)
    }

    /// Sends a `POST /v1/check_status_txn` JSON request, authenticated with the secret key.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the status is not 2xx or
    /// the body is not JSON.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "gbprimepay.client.check_status",
            skip_all,
            fields(otel.status_code = Empty, error.message = Empty),
            err
        )
    )]
    pub async fn try_check_status(&self, reference_no: &str) -> Result<Value, ClientError> {
        let result = self
            .fetch_json(CHECK_STATUS_PATH, "POST /v1/check_status_txn", |url| {
                self.client
                    .post(url)
                    .basic_auth(&self.credentials.secret_key, Some(""))
                    .json(&serde_json::json!({ "referenceNo": reference_no }))
            })
            .await;
        record_result_on_span(&result);
        result
    }

    /// Builds a request for `path`, sends it and decodes the JSON body.
    async fn fetch_json<R: DeserializeOwned>(
        &self,
        path: &str,
        context: &'static str,
        build: impl FnOnce(Url) -> RequestBuilder,
    ) -> Result<R, ClientError> {
        let url = self.endpoint(path, context)?;
        let response = self.send(build(url), context).await?;
        read_json(response, context).await
    }

    pub(crate) const fn http(&self) -> &Client {
        &self.client
    }

    /// Resolves `path` against the base URL.
    pub(crate) fn endpoint(&self, path: &str, context: &'static str) -> Result<Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::UrlParse { context, source: e })
    }

    /// Applies headers and timeout, sends, and turns non-2xx statuses into errors.
    ///
    /// `context` is a human-readable identifier used in tracing and error messages (e.g. `"POST /v2/wechat"`).
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        context: &'static str,
    ) -> Result<Response, ClientError> {
        let mut request = request;
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Http { context, source: e })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = read_text(response, context).await?;
            Err(ClientError::HttpStatus {
                context,
                status,
                body,
            })
        }
    }
}

/// Reads the body as text.
pub(crate) async fn read_text(
    response: Response,
    context: &'static str,
) -> Result<String, ClientError> {
    response
        .text()
        .await
        .map_err(|e| ClientError::ResponseBodyRead { context, source: e })
}

async fn read_json<R: DeserializeOwned>(
    response: Response,
    context: &'static str,
) -> Result<R, ClientError> {
    let body = read_text(response, context).await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Decode { context, source: e })
}

const fn create_payment_context(channel: Channel) -> &'static str {
    match channel {
        Channel::QrCash => "POST /v3/qrcode/text",
        Channel::LinePay => "POST /v2/linepay",
        Channel::TrueWallet => "POST /v2/trueWallet",
        Channel::ShopeePay => "POST /v1/shopeePay",
        Channel::WeChat => "POST /v2/wechat",
        Channel::Alipay => "POST /alipay/api/alipay",
        Channel::MobileBanking => "POST /v2/mobileBanking",
    }
}

/// Ensures the path ends in `/` so relative joins keep any path prefix.
fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Records the outcome of a call on the current span.
#[cfg(feature = "telemetry")]
pub(crate) fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
        }
    }
}

/// Records the outcome of a call on the current span.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
pub(crate) const fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}

/// Collapses a read-only call's error to `None`.
fn soft<T>(result: Result<T, ClientError>) -> Option<T> {
    result.inspect_err(record_soft_failure).ok()
}

/// Logs the error a soft call is about to discard.
#[cfg(feature = "telemetry")]
fn record_soft_failure(err: &ClientError) {
    tracing::debug!(error = %err, status = ?err.status(), "read-only call failed, returning None");
}

/// Logs the error a soft call is about to discard.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
const fn record_soft_failure(_err: &ClientError) {}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{basic_auth, body_json, body_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> GbPrimePayClient {
        GbPrimePayClient::try_new(
            Credentials::new("tok", "pub", "sec"),
            Environment::Sandbox,
        )
        .unwrap()
        .with_base_url(server.uri().parse().unwrap())
    }

    #[test]
    fn test_environment_selects_base_url() {
        let creds = Credentials::new("t", "p", "s");
        let prod = GbPrimePayClient::try_new(creds.clone(), Environment::Production).unwrap();
        let sandbox = GbPrimePayClient::try_new(creds, Environment::Sandbox).unwrap();
        assert_eq!(prod.base_url().as_str(), "https://api.gbprimepay.com/");
        assert_eq!(sandbox.base_url().as_str(), "https://api.globalprimepay.com/");
        assert!(!prod.is_raw());
    }

    #[test]
    fn test_from_config() {
        let mut config = ClientConfig::new(Credentials::new("t", "p", "s"));
        config.sandbox = true;
        config.raw = true;
        config.timeout_secs = Some(5);
        let client = GbPrimePayClient::from_config(&config);
        assert_eq!(client.base_url().as_str(), "https://api.globalprimepay.com/");
        assert!(client.is_raw());
        assert_eq!(client.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let client = GbPrimePayClient::try_new(Credentials::new("t", "p", "s"), Environment::Sandbox)
            .unwrap()
            .with_base_url("http://localhost:9000/gateway".parse().unwrap());
        let url = client.endpoint("/v2/wechat", "test").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/gateway/v2/wechat");
    }

    #[tokio::test]
    async fn test_merchant_info_uses_public_key_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/getmerchantinfo"))
            .and(basic_auth("pub", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"merchantName": "Shop"})))
            .expect(1)
            .mount(&server)
            .await;

        let info = test_client(&server).merchant_info().await.unwrap();
        assert_eq!(info.get_str("merchantName"), Some("Shop"));
    }

    #[tokio::test]
    async fn test_secret_key_validation_uses_secret_key_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/checkPrivateKey"))
            .and(basic_auth("sec", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let info = test_client(&server).validate_secret_key().await.unwrap();
        assert_eq!(info.get_str("status"), Some("ok"));
    }

    #[tokio::test]
    async fn test_public_key_validation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/checkPublicKey"))
            .and(basic_auth("pub", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"merchantId": 7})))
            .mount(&server)
            .await;

        let info = test_client(&server).try_validate_public_key().await.unwrap();
        assert_eq!(info.get("merchantId"), Some(&json!(7)));
    }

    #[tokio::test]
    async fn test_token_validation_posts_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/checkCustomerKey"))
            .and(body_string("token=tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        assert!(test_client(&server).validate_token().await.is_some());
    }

    #[tokio::test]
    async fn test_soft_call_returns_none_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/getmerchantinfo"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        assert!(client.merchant_info().await.is_none());

        let err = client.try_merchant_info().await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert!(matches!(
            err,
            ClientError::HttpStatus { ref body, .. } if body == "unauthorized"
        ));
    }

    #[tokio::test]
    async fn test_soft_call_returns_none_on_bad_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/checkPublicKey"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        assert!(client.validate_public_key().await.is_none());
        assert!(matches!(
            client.try_validate_public_key().await,
            Err(ClientError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_soft_call_returns_none_when_unreachable() {
        // Nothing listens on a port once its listener is dropped.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = GbPrimePayClient::try_new(Credentials::new("t", "p", "s"), Environment::Sandbox)
            .unwrap()
            .with_base_url(format!("http://127.0.0.1:{port}").parse().unwrap())
            .with_timeout(Duration::from_secs(5));

        assert!(client.validate_token().await.is_none());
        assert!(client.check_status("REF").await.is_none());
        assert!(matches!(
            client.try_validate_token().await,
            Err(ClientError::Http { .. })
        ));
        let err = client.try_check_status("REF").await.unwrap_err();
        assert!(matches!(err, ClientError::Http { context: "POST /v1/check_status_txn", .. }));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_check_status_posts_json_with_secret_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/check_status_txn"))
            .and(basic_auth("sec", ""))
            .and(body_json(json!({"referenceNo": "REF-9"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"resultCode": "00", "txn": {"status": "S"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let status = test_client(&server).check_status("REF-9").await.unwrap();
        assert_eq!(status["txn"]["status"], "S");
    }

    #[tokio::test]
    async fn test_custom_headers_are_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/checkPublicKey"))
            .and(wiremock::matchers::header("x-request-source", "pos-7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let mut headers = HeaderMap::new();
        headers.insert("x-request-source", "pos-7".parse().unwrap());
        let client = test_client(&server).with_headers(headers);
        assert!(client.validate_public_key().await.is_some());
    }

    #[cfg(feature = "telemetry")]
    mod span_outcome {
        use std::sync::{Arc, Mutex};

        use tracing::field::{Field, Visit};
        use tracing::span::{Id, Record};
        use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

        use super::*;

        /// Collects every value recorded on a span after creation.
        #[derive(Clone, Default)]
        struct RecordedFields(Arc<Mutex<Vec<(String, String)>>>);

        impl RecordedFields {
            fn last(&self, name: &str) -> Option<String> {
                self.0
                    .lock()
                    .unwrap()
                    .iter()
                    .rev()
                    .find(|(field, _)| field == name)
                    .map(|(_, value)| value.clone())
            }

            fn clear(&self) {
                self.0.lock().unwrap().clear();
            }
        }

        impl<S: tracing::Subscriber> Layer<S> for RecordedFields {
            fn on_record(&self, _span: &Id, values: &Record<'_>, _ctx: Context<'_, S>) {
                let mut fields = self.0.lock().unwrap();
                values.record(&mut FieldVisitor(&mut *fields));
            }
        }

        struct FieldVisitor<'a>(&'a mut Vec<(String, String)>);

        impl Visit for FieldVisitor<'_> {
            fn record_str(&mut self, field: &Field, value: &str) {
                self.0.push((field.name().to_owned(), value.to_owned()));
            }

            fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
                self.0.push((field.name().to_owned(), format!("{value:?}")));
            }
        }

        #[tokio::test]
        async fn test_outcome_recorded_on_span() {
            let recorded = RecordedFields::default();
            let subscriber = tracing_subscriber::registry().with(recorded.clone());
            let _guard = tracing::subscriber::set_default(subscriber);

            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/getmerchantinfo"))
                .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path("/checkPublicKey"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
                .mount(&server)
                .await;
            let client = test_client(&server);

            assert!(client.try_merchant_info().await.is_err());
            assert_eq!(recorded.last("otel.status_code").as_deref(), Some("ERROR"));
            let message = recorded.last("error.message").unwrap();
            assert!(message.contains("GET /getmerchantinfo"), "{message}");
            assert!(message.contains("401"), "{message}");

            recorded.clear();
            assert!(client.try_validate_public_key().await.is_ok());
            assert_eq!(recorded.last("otel.status_code").as_deref(), Some("OK"));
            assert_eq!(recorded.last("error.message"), None);
        }
    }
}
