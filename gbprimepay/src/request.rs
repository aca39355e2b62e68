//! Per-channel payment options and form synthesis.
//!
//! A [`PaymentRequest`] is one variant per [`Channel`], each carrying the
//! options that channel accepts. [`PaymentRequest::to_form`] turns it into
//! the exact form body GB Prime Pay expects, adding the credential fields
//! each channel group needs:
//!
//! | Channels | Added fields | Checksum over |
//! |---|---|---|
//! | `QR_CASH` | `token` | - |
//! | `LINEPAY`, `TRUEWALLET`, `SHOPEEPAY` | `checksum`, `publicKey` | amount, referenceNo, responseUrl, backgroundUrl |
//! | `MOBILE_BANKING` | `checksum`, `publicKey` | amount, referenceNo, responseUrl, backgroundUrl, bankCode |
//! | `WECHAT`, `ALIPAY` | `checksum`, `publicKey` | amount, referenceNo, backgroundUrl |
//!
//! Absent optional values contribute an empty string to the checksum.
//! Required fields are not validated; the provider's response is the only
//! signal for a malformed request.

use crate::amount::Amount;
use crate::channel::{BankCode, Channel};
use crate::checksum::checksum;
use crate::config::Credentials;
use crate::form::FormFields;

/// Fields shared by every channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDetails {
    /// Amount to charge, normalised to two decimals.
    pub amount: Amount,
    /// Merchant-defined reference, unique per payment.
    pub reference_no: String,
    /// Server-to-server notification URL.
    pub background_url: Option<String>,
    /// Free-text description shown to the payer.
    pub detail: Option<String>,
    /// Payer name.
    pub customer_name: Option<String>,
    /// Payer e-mail.
    pub customer_email: Option<String>,
    /// Free-form merchant field 1.
    pub merchant_defined1: Option<String>,
    /// Free-form merchant field 2.
    pub merchant_defined2: Option<String>,
    /// Free-form merchant field 3.
    pub merchant_defined3: Option<String>,
    /// Free-form merchant field 4.
    pub merchant_defined4: Option<String>,
    /// Free-form merchant field 5.
    pub merchant_defined5: Option<String>,
    /// Payer telephone number.
    pub customer_telephone: Option<String>,
    /// Payer postal address.
    pub customer_address: Option<String>,
}

impl PaymentDetails {
    /// Creates details with only the mandatory amount and reference.
    #[must_use]
    pub fn new(amount: impl Into<Amount>, reference_no: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            reference_no: reference_no.into(),
            background_url: None,
            detail: None,
            customer_name: None,
            customer_email: None,
            merchant_defined1: None,
            merchant_defined2: None,
            merchant_defined3: None,
            merchant_defined4: None,
            merchant_defined5: None,
            customer_telephone: None,
            customer_address: None,
        }
    }

    /// Sets the background (notification) URL.
    #[must_use]
    pub fn with_background_url(mut self, url: impl Into<String>) -> Self {
        self.background_url = Some(url.into());
        self
    }

    /// Sets the free-text detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the payer's name, e-mail and telephone where given.
    #[must_use]
    pub fn with_customer(
        mut self,
        name: Option<String>,
        email: Option<String>,
        telephone: Option<String>,
    ) -> Self {
        self.customer_name = name.or(self.customer_name);
        self.customer_email = email.or(self.customer_email);
        self.customer_telephone = telephone.or(self.customer_telephone);
        self
    }

    /// Sets the payer's postal address.
    #[must_use]
    pub fn with_customer_address(mut self, address: impl Into<String>) -> Self {
        self.customer_address = Some(address.into());
        self
    }

    fn write_fields(&self, form: &mut FormFields) {
        form.insert("amount", self.amount.to_string());
        form.insert("referenceNo", self.reference_no.as_str());
        form.insert_opt("backgroundUrl", self.background_url.as_deref());
        form.insert_opt("detail", self.detail.as_deref());
        form.insert_opt("customerName", self.customer_name.as_deref());
        form.insert_opt("customerEmail", self.customer_email.as_deref());
        form.insert_opt("merchantDefined1", self.merchant_defined1.as_deref());
        form.insert_opt("merchantDefined2", self.merchant_defined2.as_deref());
        form.insert_opt("merchantDefined3", self.merchant_defined3.as_deref());
        form.insert_opt("merchantDefined4", self.merchant_defined4.as_deref());
        form.insert_opt("merchantDefined5", self.merchant_defined5.as_deref());
        form.insert_opt("customerTelephone", self.customer_telephone.as_deref());
        form.insert_opt("customerAddress", self.customer_address.as_deref());
    }
}

/// Options for [`Channel::QrCash`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCashOptions {
    /// Shared payment fields.
    pub details: PaymentDetails,
}

impl QrCashOptions {
    /// Creates QR cash options.
    #[must_use]
    pub const fn new(details: PaymentDetails) -> Self {
        Self { details }
    }
}

/// Options for [`Channel::LinePay`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinePayOptions {
    /// Shared payment fields; `detail` is required.
    pub details: PaymentDetails,
    /// Where LINE Pay sends the payer after confirmation.
    pub response_url: String,
    /// Opt-in flag for LINE Pay token payments.
    pub remember_with_token: Option<String>,
}

impl LinePayOptions {
    /// Creates LINE Pay options with the required detail and response URL.
    #[must_use]
    pub fn new(
        details: PaymentDetails,
        detail: impl Into<String>,
        response_url: impl Into<String>,
    ) -> Self {
        Self {
            details: details.with_detail(detail),
            response_url: response_url.into(),
            remember_with_token: None,
        }
    }
}

/// Options for [`Channel::TrueWallet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrueWalletOptions {
    /// Shared payment fields; `background_url` and `customer_telephone` are required.
    pub details: PaymentDetails,
    /// Where the payer lands after paying.
    pub response_url: String,
}

impl TrueWalletOptions {
    /// Creates TrueMoney Wallet options.
    #[must_use]
    pub fn new(
        details: PaymentDetails,
        background_url: impl Into<String>,
        response_url: impl Into<String>,
        customer_telephone: impl Into<String>,
    ) -> Self {
        let mut details = details.with_background_url(background_url);
        details.customer_telephone = Some(customer_telephone.into());
        Self {
            details,
            response_url: response_url.into(),
        }
    }
}

/// Options for [`Channel::ShopeePay`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopeePayOptions {
    /// Shared payment fields; `background_url` is required.
    pub details: PaymentDetails,
    /// Where the payer lands after paying.
    pub response_url: String,
}

impl ShopeePayOptions {
    /// Creates ShopeePay options.
    #[must_use]
    pub fn new(
        details: PaymentDetails,
        background_url: impl Into<String>,
        response_url: impl Into<String>,
    ) -> Self {
        Self {
            details: details.with_background_url(background_url),
            response_url: response_url.into(),
        }
    }
}

/// Options for [`Channel::WeChat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeChatOptions {
    /// Shared payment fields; `background_url` and `detail` are required.
    pub details: PaymentDetails,
}

impl WeChatOptions {
    /// Creates WeChat Pay options.
    #[must_use]
    pub fn new(
        details: PaymentDetails,
        background_url: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            details: details.with_background_url(background_url).with_detail(detail),
        }
    }
}

/// Options for [`Channel::Alipay`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlipayOptions {
    /// Shared payment fields; `background_url` and `detail` are required.
    pub details: PaymentDetails,
}

impl AlipayOptions {
    /// Creates Alipay options.
    #[must_use]
    pub fn new(
        details: PaymentDetails,
        background_url: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            details: details.with_background_url(background_url).with_detail(detail),
        }
    }
}

/// Options for [`Channel::MobileBanking`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobileBankingOptions {
    /// Shared payment fields; `background_url` is required.
    pub details: PaymentDetails,
    /// Where the payer lands after paying.
    pub response_url: String,
    /// Bank whose app handles the payment.
    pub bank_code: BankCode,
}

impl MobileBankingOptions {
    /// Creates mobile-banking options.
    #[must_use]
    pub fn new(
        details: PaymentDetails,
        background_url: impl Into<String>,
        response_url: impl Into<String>,
        bank_code: BankCode,
    ) -> Self {
        Self {
            details: details.with_background_url(background_url),
            response_url: response_url.into(),
            bank_code,
        }
    }
}

/// A create-payment request for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentRequest {
    /// Thai QR cash.
    QrCash(QrCashOptions),
    /// LINE Pay.
    LinePay(LinePayOptions),
    /// TrueMoney Wallet.
    TrueWallet(TrueWalletOptions),
    /// ShopeePay.
    ShopeePay(ShopeePayOptions),
    /// WeChat Pay.
    WeChat(WeChatOptions),
    /// Alipay.
    Alipay(AlipayOptions),
    /// Mobile banking.
    MobileBanking(MobileBankingOptions),
}

impl PaymentRequest {
    /// Returns the channel this request targets.
    #[must_use]
    pub const fn channel(&self) -> Channel {
        match self {
            Self::QrCash(_) => Channel::QrCash,
            Self::LinePay(_) => Channel::LinePay,
            Self::TrueWallet(_) => Channel::TrueWallet,
            Self::ShopeePay(_) => Channel::ShopeePay,
            Self::WeChat(_) => Channel::WeChat,
            Self::Alipay(_) => Channel::Alipay,
            Self::MobileBanking(_) => Channel::MobileBanking,
        }
    }

    /// Returns the fields shared by every channel.
    #[must_use]
    pub const fn details(&self) -> &PaymentDetails {
        match self {
            Self::QrCash(o) => &o.details,
            Self::LinePay(o) => &o.details,
            Self::TrueWallet(o) => &o.details,
            Self::ShopeePay(o) => &o.details,
            Self::WeChat(o) => &o.details,
            Self::Alipay(o) => &o.details,
            Self::MobileBanking(o) => &o.details,
        }
    }

    /// Returns the response URL, for channels that take one.
    #[must_use]
    pub fn response_url(&self) -> Option<&str> {
        match self {
            Self::LinePay(o) => Some(&o.response_url),
            Self::TrueWallet(o) => Some(&o.response_url),
            Self::ShopeePay(o) => Some(&o.response_url),
            Self::MobileBanking(o) => Some(&o.response_url),
            Self::QrCash(_) | Self::WeChat(_) | Self::Alipay(_) => None,
        }
    }

    /// Returns the bank code of a mobile-banking request.
    #[must_use]
    pub const fn bank_code(&self) -> Option<BankCode> {
        match self {
            Self::MobileBanking(o) => Some(o.bank_code),
            _ => None,
        }
    }

    /// Returns the values the checksum is computed over, in signing order.
    ///
    /// `None` for channels that are not signed.
    #[must_use]
    pub fn checksum_fields(&self) -> Option<Vec<String>> {
        let details = self.details();
        let amount = details.amount.to_string();
        let reference_no = details.reference_no.clone();
        let background_url = details.background_url.clone().unwrap_or_default();
        let response_url = self.response_url().unwrap_or_default().to_owned();

        match self {
            Self::QrCash(_) => None,
            Self::LinePay(_) | Self::TrueWallet(_) | Self::ShopeePay(_) => {
                Some(vec![amount, reference_no, response_url, background_url])
            }
            Self::MobileBanking(o) => Some(vec![
                amount,
                reference_no,
                response_url,
                background_url,
                o.bank_code.code().to_owned(),
            ]),
            Self::WeChat(_) | Self::Alipay(_) => Some(vec![amount, reference_no, background_url]),
        }
    }

    /// Builds the form body for this request.
    ///
    /// The channel's own fields come first, then the credential fields:
    /// `token` for QR cash, `checksum` and `publicKey` for signed channels.
    #[must_use]
    pub fn to_form(&self, credentials: &Credentials) -> FormFields {
        let mut form = FormFields::new();
        self.details().write_fields(&mut form);

        form.insert_opt("responseUrl", self.response_url());
        if let Self::LinePay(o) = self {
            form.insert_opt("rememberWithToken", o.remember_with_token.as_deref());
        }
        if let Some(bank) = self.bank_code() {
            form.insert("bankCode", bank.code());
        }

        if let Self::QrCash(_) = self {
            form.insert("token", credentials.token.as_str());
        }
        if let Some(fields) = self.checksum_fields() {
            form.insert("checksum", checksum(&credentials.secret_key, &fields));
            form.insert("publicKey", credentials.public_key.as_str());
        }

        form
    }
}

impl From<QrCashOptions> for PaymentRequest {
    fn from(options: QrCashOptions) -> Self {
        Self::QrCash(options)
    }
}

impl From<LinePayOptions> for PaymentRequest {
    fn from(options: LinePayOptions) -> Self {
        Self::LinePay(options)
    }
}

impl From<TrueWalletOptions> for PaymentRequest {
    fn from(options: TrueWalletOptions) -> Self {
        Self::TrueWallet(options)
    }
}

impl From<ShopeePayOptions> for PaymentRequest {
    fn from(options: ShopeePayOptions) -> Self {
        Self::ShopeePay(options)
    }
}

impl From<WeChatOptions> for PaymentRequest {
    fn from(options: WeChatOptions) -> Self {
        Self::WeChat(options)
    }
}

impl From<AlipayOptions> for PaymentRequest {
    fn from(options: AlipayOptions) -> Self {
        Self::Alipay(options)
    }
}

impl From<MobileBankingOptions> for PaymentRequest {
    fn from(options: MobileBankingOptions) -> Self {
        Self::MobileBanking(options)
    }
}
