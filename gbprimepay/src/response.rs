//! Create-payment response decoding.
//!
//! In decoded mode the client reduces the provider's answer to the one value
//! a caller acts on:
//!
//! | Channel | Result | No match |
//! |---|---|---|
//! | `QR_CASH` | the JSON object | body |
//! | `LINEPAY` | final URL after redirects | - |
//! | `TRUEWALLET` | `ptx_id` hidden input | body |
//! | `MOBILE_BANKING` / `014` | `<form action>` URL | body |
//! | `MOBILE_BANKING` / `002` | Bangkok Bank deep link | body |
//! | anything else | body | - |

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::channel::BankCode;
use crate::request::PaymentRequest;
use crate::scrape::scrape_bbl_form;

/// Scheme and path prefix of Bangkok Bank mobile-banking deep links.
pub const BBL_DEEP_LINK_PREFIX: &str = "bualuangmbanking://mbanking.payment?";

static PTX_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<input type="hidden" name="ptx_id" value="(\d+)"\s?/?>"#)
        .expect("ptx_id pattern is valid")
});

static FORM_ACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<form action="(\S+)" method="get">"#).expect("form action pattern is valid")
});

/// The outcome of a create-payment call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PaymentResponse {
    /// The response body, unmodified.
    Body(String),
    /// The decoded JSON body of a QR cash request.
    Json(Value),
    /// The URL the LINE Pay redirect chain ended on.
    RedirectUrl(String),
    /// The TrueMoney payment transaction id, input to the OTP flow.
    PtxId(String),
    /// The SCB Easy payment page URL.
    FormAction(String),
    /// The Bangkok Bank app deep link.
    DeepLink(String),
}

impl PaymentResponse {
    /// Returns the textual value, or `None` for [`PaymentResponse::Json`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Body(s)
            | Self::RedirectUrl(s)
            | Self::PtxId(s)
            | Self::FormAction(s)
            | Self::DeepLink(s) => Some(s),
            Self::Json(_) => None,
        }
    }

    /// Returns the JSON value of a QR cash response.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` if no decoding rule applied.
    #[must_use]
    pub const fn is_body(&self) -> bool {
        matches!(self, Self::Body(_))
    }
}

impl fmt::Display for PaymentResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::Body(s)
            | Self::RedirectUrl(s)
            | Self::PtxId(s)
            | Self::FormAction(s)
            | Self::DeepLink(s) => f.write_str(s),
        }
    }
}

/// Applies the channel's decoding rule to a create-payment response.
///
/// `final_url` is the URL the HTTP exchange ended on after redirects; only
/// LINE Pay uses it.
#[must_use]
pub fn decode_response(request: &PaymentRequest, final_url: &str, body: String) -> PaymentResponse {
    let decoded = match request {
        PaymentRequest::LinePay(_) => return PaymentResponse::RedirectUrl(final_url.to_owned()),
        PaymentRequest::QrCash(_) => serde_json::from_str(&body).ok().map(PaymentResponse::Json),
        PaymentRequest::TrueWallet(_) => first_capture(&PTX_ID, &body).map(PaymentResponse::PtxId),
        PaymentRequest::MobileBanking(options) => match options.bank_code {
            BankCode::ScbEasy => first_capture(&FORM_ACTION, &body).map(PaymentResponse::FormAction),
            BankCode::Bbl => bbl_deep_link(&body).map(PaymentResponse::DeepLink),
            BankCode::KPlus | BankCode::Kma | BankCode::Ktb => return PaymentResponse::Body(body),
        },
        PaymentRequest::ShopeePay(_) | PaymentRequest::WeChat(_) | PaymentRequest::Alipay(_) => {
            return PaymentResponse::Body(body);
        }
    };

    decoded.unwrap_or_else(|| {
        #[cfg(feature = "telemetry")]
        tracing::debug!(
            channel = %request.channel(),
            "no decodable value in create-payment response, returning body"
        );
        PaymentResponse::Body(body)
    })
}

/// Builds the Bangkok Bank deep link from the page's hidden inputs.
///
/// Returns `None` when the page has no uncommented hidden inputs.
#[must_use]
pub fn bbl_deep_link(body: &str) -> Option<String> {
    let fields = scrape_bbl_form(body);
    if fields.is_empty() {
        return None;
    }
    Some(format!("{BBL_DEEP_LINK_PREFIX}{}", fields.to_query_string()))
}

fn first_capture(pattern: &Regex, body: &str) -> Option<String> {
    pattern
        .captures(body)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_owned())
}
