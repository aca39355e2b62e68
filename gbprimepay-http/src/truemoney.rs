//! TrueMoney Wallet OTP flow.
//!
//! After a [`TrueWallet`](gbprimepay::Channel::TrueWallet) payment is created,
//! the payer confirms it with a one-time password:
//!
//! 1. [`GbPrimePayClient::truemoney_send_otp`] asks TrueMoney to text an OTP
//!    and returns the hidden form tokens of the OTP page.
//! 2. [`GbPrimePayClient::truemoney_resend_otp`] requests a new OTP; its tokens
//!    supersede the previous ones.
//! 3. [`GbPrimePayClient::truemoney_submit_otp`] posts the code together with
//!    the latest tokens.
//!
//! The provider only accepts a submission within 60 seconds of the OTP being
//! sent. The client neither orders the steps nor tracks that window.

use gbprimepay::FormTokens;
use gbprimepay::scrape::scrape_otp_form;

use reqwest::RequestBuilder;
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::{field::Empty, instrument};

use crate::client::{GbPrimePayClient, read_text, record_result_on_span};
use crate::constants::{
    TRUEMONEY_RESEND_OTP_PATH, TRUEMONEY_SEND_OTP_PATH, TRUEMONEY_SUBMIT_OTP_PATH,
};
use crate::error::ClientError;

/// Form field carrying the OTP code on submission.
pub const OTP_CODE_FIELD: &str = "otp_code";

impl GbPrimePayClient {
    /// Requests an OTP for `ptx_id` and returns the OTP page's form tokens.
    ///
    /// `ptx_id` is the value returned by creating a TrueMoney payment.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the status is not 2xx.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "gbprimepay.client.truemoney_send_otp",
            skip_all,
            fields(otel.status_code = Empty, error.message = Empty),
            err
        )
    )]
    pub async fn truemoney_send_otp(
        &self,
        mobile_number: &str,
        ptx_id: &str,
    ) -> Result<FormTokens, ClientError> {
        let result = self
            .request_otp_form(TRUEMONEY_SEND_OTP_PATH, "POST /v1/trueWallet/payment", |url| {
                self.http()
                    .post(url)
                    .form(&[("mobile_number", mobile_number), ("ptx_id", ptx_id)])
            })
            .await;
        record_result_on_span(&result);
        result
    }

    /// Requests a fresh OTP and returns the new form tokens.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the status is not 2xx.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "gbprimepay.client.truemoney_resend_otp",
            skip_all,
            fields(otel.status_code = Empty, error.message = Empty),
            err
        )
    )]
    pub async fn truemoney_resend_otp(&self, ptx_id: &str) -> Result<FormTokens, ClientError> {
        let result = self
            .request_otp_form(
                TRUEMONEY_RESEND_OTP_PATH,
                "GET /true/payments/repeatauthapply",
                |url| self.http().get(url).query(&[("paymentTransaction", ptx_id)]),
            )
            .await;
        record_result_on_span(&result);
        result
    }

    /// Submits the OTP code with the latest form tokens.
    ///
    /// Every token is sent under its original name; a token called
    /// `otp_code` overrides `otp_code`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the status is not 2xx.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "gbprimepay.client.truemoney_submit_otp",
            skip_all,
            fields(
                tokens = tokens.len(),
                otel.status_code = Empty,
                error.message = Empty
            ),
            err
        )
    )]
    pub async fn truemoney_submit_otp(
        &self,
        otp_code: &str,
        tokens: &FormTokens,
    ) -> Result<(), ClientError> {
        let result = self.post_otp_submission(otp_code, tokens).await;
        record_result_on_span(&result);
        result
    }

    /// Sends an OTP page request and scrapes the tokens from the reply.
    async fn request_otp_form(
        &self,
        path: &str,
        context: &'static str,
        build: impl FnOnce(Url) -> RequestBuilder,
    ) -> Result<FormTokens, ClientError> {
        let url = self.endpoint(path, context)?;
        let response = self.send(build(url), context).await?;
        let body = read_text(response, context).await?;
        Ok(scrape_otp_form(&body))
    }

    async fn post_otp_submission(
        &self,
        otp_code: &str,
        tokens: &FormTokens,
    ) -> Result<(), ClientError> {
        let context = "POST /true/payments/verifytokens";
        let url = self.endpoint(TRUEMONEY_SUBMIT_OTP_PATH, context)?;
        let form = otp_submission(otp_code, tokens);
        let request = self.http().post(url).form(form.as_pairs());
        self.send(request, context).await?;
        Ok(())
    }
}

/// Builds the submission form: the OTP code first, then every token.
fn otp_submission(otp_code: &str, tokens: &FormTokens) -> FormTokens {
    let mut form = FormTokens::new();
    form.insert(OTP_CODE_FIELD, otp_code);
    form.merge(tokens);
    form
}
