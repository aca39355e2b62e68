//! HTTP client for the GB Prime Pay payment gateway.
//!
//! [`GbPrimePayClient`] wraps the provider's REST/HTML endpoints: merchant
//! lookups, key and token validation, payment creation for every
//! [`Channel`](gbprimepay::Channel), status checks and the TrueMoney Wallet
//! OTP flow. Request signing and response decoding come from the
//! [`gbprimepay`] core crate.
//!
//! # Modules
//!
//! - [`client`] - [`GbPrimePayClient`] and its read-only and create-payment calls
//! - [`constants`] - Endpoint paths
//! - [`error`] - Transport error types
//! - [`truemoney`] - TrueMoney Wallet OTP flow
//!
//! # Feature Flags
//!
//! - `telemetry` - Instruments every outbound call with a `tracing` span
//!
//! # Example
//!
//! ```no_run
//! use gbprimepay::{Credentials, Environment, PaymentDetails, PaymentRequest, WeChatOptions};
//! use gbprimepay_http::GbPrimePayClient;
//!
//! # async fn run() -> Result<(), gbprimepay_http::ClientError> {
//! let client = GbPrimePayClient::try_new(
//!     Credentials::new("token", "public-key", "secret-key"),
//!     Environment::Sandbox,
//! )?;
//!
//! let request = PaymentRequest::from(WeChatOptions::new(
//!     PaymentDetails::new(100u32, "ORDER-0001"),
//!     "https://merchant.example/notify",
//!     "Coffee",
//! ));
//! let response = client.create_payment(&request).await?;
//! println!("{response}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod constants;
pub mod error;
pub mod truemoney;

pub use client::GbPrimePayClient;
pub use error::ClientError;
