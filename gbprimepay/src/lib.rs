#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the GB Prime Pay payment gateway.
//!
//! This crate holds everything about talking to GB Prime Pay that does not
//! need a network connection: credentials and environments, the closed set
//! of payment channels, amount normalisation, request signing, per-channel
//! form synthesis and the extraction of useful values from the provider's
//! HTML responses. The HTTP client lives in `gbprimepay-http`.
//!
//! # Modules
//!
//! - [`amount`] - Two-decimal amount normalisation
//! - [`channel`] - Payment channels and mobile-banking bank codes
//! - [`checksum`] - HMAC-SHA256 request checksums
//! - [`config`] - Credentials, environments and client configuration
//! - [`form`] - Ordered form field bags
//! - [`merchant`] - Merchant info models returned by the validation endpoints
//! - [`request`] - Per-channel payment options and form synthesis
//! - [`response`] - Decoding of create-payment responses
//! - [`scrape`] - Hidden-input scraping from HTML bodies
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing of response decoding fallbacks

pub mod amount;
pub mod channel;
pub mod checksum;
pub mod config;
pub mod form;
pub mod merchant;
pub mod request;
pub mod response;
pub mod scrape;

pub use amount::{Amount, AmountError};
pub use channel::{BankCode, BankCodeError, Channel, ChannelError};
pub use checksum::checksum;
pub use config::{ClientConfig, Credentials, Environment, EnvironmentError};
pub use form::{FormFields, FormTokens};
pub use merchant::{MerchantInfo, ShortMerchantInfo};
pub use request::{
    AlipayOptions, LinePayOptions, MobileBankingOptions, PaymentDetails, PaymentRequest,
    QrCashOptions, ShopeePayOptions, TrueWalletOptions, WeChatOptions,
};
pub use response::{PaymentResponse, decode_response};
