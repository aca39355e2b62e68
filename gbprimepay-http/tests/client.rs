//! End-to-end tests of the public client API against a mock GB Prime Pay.

use gbprimepay::{
    AlipayOptions, BankCode, Credentials, Environment, FormTokens, LinePayOptions,
    MobileBankingOptions, PaymentDetails, PaymentRequest, PaymentResponse, QrCashOptions,
    ShopeePayOptions, TrueWalletOptions, WeChatOptions, checksum,
};
use gbprimepay_http::{ClientError, GbPrimePayClient};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "token-abc";
const PUBLIC_KEY: &str = "pk-123";
const SECRET_KEY: &str = "sk-456";

fn client(server: &MockServer) -> GbPrimePayClient {
    GbPrimePayClient::try_new(
        Credentials::new(TOKEN, PUBLIC_KEY, SECRET_KEY),
        Environment::Sandbox,
    )
    .unwrap()
    .with_base_url(server.uri().parse().unwrap())
}

fn details() -> PaymentDetails {
    PaymentDetails::new(250u32, "ORDER1")
}

#[tokio::test]
async fn test_qr_cash_sends_token_and_decodes_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/qrcode/text"))
        .and(body_string_contains("amount=250.00"))
        .and(body_string_contains("referenceNo=ORDER1"))
        .and(body_string_contains("token=token-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "referenceNo": "ORDER1",
            "qrcode": "00020101021230830016A000000677010112"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = PaymentRequest::from(QrCashOptions::new(details()));
    let response = client(&server).create_payment(&request).await.unwrap();
    assert_eq!(
        response.as_json().unwrap()["qrcode"],
        "00020101021230830016A000000677010112"
    );
}

#[tokio::test]
async fn test_wechat_sends_checksum_and_public_key() {
    let server = MockServer::start().await;
    let expected = checksum(SECRET_KEY, ["250.00", "ORDER1", "bg"]);
    Mock::given(method("POST"))
        .and(path("/v2/wechat"))
        .and(body_string_contains(format!("checksum={expected}")))
        .and(body_string_contains("publicKey=pk-123"))
        .and(body_string_contains("detail=Latte"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<img src=\"qr.png\">"))
        .expect(1)
        .mount(&server)
        .await;

    let mut details = details();
    details.customer_email = Some("buyer".into());
    let request = PaymentRequest::from(WeChatOptions::new(details, "bg", "Latte"));
    let response = client(&server).create_payment(&request).await.unwrap();
    assert_eq!(response, PaymentResponse::Body("<img src=\"qr.png\">".into()));
}

#[tokio::test]
async fn test_alipay_posts_to_its_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/alipay/api/alipay"))
        .and(body_string_contains("publicKey=pk-123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let request = PaymentRequest::from(AlipayOptions::new(details(), "bg", "Tea"));
    let response = client(&server).create_payment(&request).await.unwrap();
    assert_eq!(response.as_str(), Some("ok"));
}

#[tokio::test]
async fn test_shopeepay_signs_response_and_background_url() {
    let server = MockServer::start().await;
    let expected = checksum(SECRET_KEY, ["250.00", "ORDER1", "resp", "bg"]);
    Mock::given(method("POST"))
        .and(path("/v1/shopeePay"))
        .and(body_string_contains(format!("checksum={expected}")))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"link\":\"shopee\"}"))
        .expect(1)
        .mount(&server)
        .await;

    let request = PaymentRequest::from(ShopeePayOptions::new(details(), "bg", "resp"));
    let response = client(&server).create_payment(&request).await.unwrap();
    assert!(response.is_body());
}

#[tokio::test]
async fn test_linepay_returns_final_redirect_url() {
    let server = MockServer::start().await;
    let landing = format!("{}/linepay/landing", server.uri());
    Mock::given(method("POST"))
        .and(path("/v2/linepay"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", landing.as_str()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/linepay/landing"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>LINE Pay</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let request = PaymentRequest::from(LinePayOptions::new(details(), "Item", "resp"));
    let response = client(&server).create_payment(&request).await.unwrap();
    assert_eq!(response, PaymentResponse::RedirectUrl(landing));
}

#[tokio::test]
async fn test_truewallet_returns_ptx_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/trueWallet"))
        .and(body_string_contains("customerTelephone=0811111111"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<form><input type="hidden" name="ptx_id" value="4000123"/></form>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let request = PaymentRequest::from(TrueWalletOptions::new(
        details(),
        "bg",
        "resp",
        "0811111111",
    ));
    let response = client(&server).create_payment(&request).await.unwrap();
    assert_eq!(response, PaymentResponse::PtxId("4000123".into()));
}

#[tokio::test]
async fn test_mobile_banking_scb_returns_form_action() {
    let server = MockServer::start().await;
    let expected = checksum(SECRET_KEY, ["250.00", "ORDER1", "resp", "bg", "014"]);
    Mock::given(method("POST"))
        .and(path("/v2/mobileBanking"))
        .and(body_string_contains("bankCode=014"))
        .and(body_string_contains(format!("checksum={expected}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<body onload="submit()"><form action="https://x/y" method="get"></form></body>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let request = PaymentRequest::from(MobileBankingOptions::new(
        details(),
        "bg",
        "resp",
        BankCode::ScbEasy,
    ));
    let response = client(&server).create_payment(&request).await.unwrap();
    assert_eq!(response, PaymentResponse::FormAction("https://x/y".into()));
}

#[tokio::test]
async fn test_mobile_banking_bbl_returns_deep_link() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/mobileBanking"))
        .and(body_string_contains("bankCode=002"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"
            <!--<input type="hidden" name="debug" id="debug" value="1">-->
            <input type="hidden" name="a" value="1">
            <input type="hidden" name="b" value="2">
            "#,
        ))
        .mount(&server)
        .await;

    let request = PaymentRequest::from(MobileBankingOptions::new(
        details(),
        "bg",
        "resp",
        BankCode::Bbl,
    ));
    let response = client(&server).create_payment(&request).await.unwrap();
    assert_eq!(
        response,
        PaymentResponse::DeepLink("bualuangmbanking://mbanking.payment?a=1&b=2".into())
    );
}

#[tokio::test]
async fn test_raw_mode_returns_body_unmodified() {
    let server = MockServer::start().await;
    let page = r#"<input type="hidden" name="ptx_id" value="4000123"/>"#;
    Mock::given(method("POST"))
        .and(path("/v2/trueWallet"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&server)
        .await;

    let request = PaymentRequest::from(TrueWalletOptions::new(
        details(),
        "bg",
        "resp",
        "0811111111",
    ));
    let response = client(&server)
        .with_raw(true)
        .create_payment(&request)
        .await
        .unwrap();
    assert_eq!(response, PaymentResponse::Body(page.into()));
}

#[tokio::test]
async fn test_create_payment_propagates_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/wechat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let request = PaymentRequest::from(WeChatOptions::new(details(), "bg", "Latte"));
    let err = client(&server).create_payment(&request).await.unwrap_err();
    match err {
        ClientError::HttpStatus {
            context,
            status,
            body,
        } => {
            assert_eq!(context, "POST /v2/wechat");
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
}

const OTP_PAGE: &str = r#"
    <form action="/true/payments/verifytokens" method="post">
      <input type="hidden" name="paymentTransaction" value="4000123" />
      <input type="hidden" name="authToken" value="first-token" />
      <input type="text" name="otp_code" />
    </form>
"#;

const RESEND_PAGE: &str = r#"
    <input type="hidden" name="paymentTransaction" value="4000123">
    <input type="hidden" name="authToken" value="second-token">
"#;

#[tokio::test]
async fn test_truemoney_otp_flow() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/trueWallet/payment"))
        .and(body_string_contains("mobile_number=0811111111"))
        .and(body_string_contains("ptx_id=4000123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OTP_PAGE))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/true/payments/repeatauthapply"))
        .and(query_param("paymentTransaction", "4000123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESEND_PAGE))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/true/payments/verifytokens"))
        .and(body_string_contains("otp_code=654321"))
        .and(body_string_contains("paymentTransaction=4000123"))
        .and(body_string_contains("authToken=second-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("verified"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);

    let first = client.truemoney_send_otp("0811111111", "4000123").await.unwrap();
    assert_eq!(first.get("authToken"), Some("first-token"));
    assert_eq!(first.len(), 2);

    let second = client.truemoney_resend_otp("4000123").await.unwrap();
    assert_eq!(second.get("authToken"), Some("second-token"));

    client.truemoney_submit_otp("654321", &second).await.unwrap();
}

#[tokio::test]
async fn test_truemoney_submit_sends_opaque_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/true/payments/verifytokens"))
        .and(body_string_contains("otp_code=111111"))
        .and(body_string_contains("anything_the_page_had=x+y"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let tokens: FormTokens = [("anything_the_page_had", "x y")].into_iter().collect();
    client(&server)
        .truemoney_submit_otp("111111", &tokens)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_truemoney_send_otp_propagates_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/trueWallet/payment"))
        .respond_with(ResponseTemplate::new(400).set_body_string("expired"))
        .mount(&server)
        .await;

    let err = client(&server)
        .truemoney_send_otp("0811111111", "4000123")
        .await
        .unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
}
