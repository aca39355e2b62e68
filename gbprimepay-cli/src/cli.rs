//! Command-line arguments and command dispatch.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use gbprimepay::{
    AlipayOptions, Amount, BankCode, Channel, FormTokens, LinePayOptions, MobileBankingOptions,
    PaymentDetails, PaymentRequest, PaymentResponse, QrCashOptions, ShopeePayOptions,
    TrueWalletOptions, WeChatOptions,
};
use gbprimepay_http::GbPrimePayClient;
use serde::Serialize;

use crate::config::CliConfig;
use crate::error::CliError;

/// GB Prime Pay command-line client.
#[derive(Debug, Parser)]
#[command(name = "gbprimepay", author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Use the sandbox environment
    #[arg(long, global = true)]
    pub sandbox: bool,

    /// Print create-payment responses unmodified
    #[arg(long, global = true)]
    pub raw: bool,

    /// Fail with the provider error instead of printing `null`
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the full merchant profile
    MerchantInfo,

    /// Check that a credential is accepted by the provider
    Validate {
        /// Credential to check
        #[arg(value_enum)]
        credential: CredentialKind,
    },

    /// Create a payment on a channel
    Create(CreateArgs),

    /// Look up a transaction by reference number
    Check {
        /// Merchant reference number of the transaction
        reference_no: String,
    },

    /// TrueMoney Wallet OTP flow
    Otp {
        #[command(subcommand)]
        command: OtpCommand,
    },
}

/// Credentials that can be validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CredentialKind {
    /// The public key
    PublicKey,
    /// The secret key
    SecretKey,
    /// The customer token
    Token,
}

/// Arguments of `create`.
#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    /// Payment channel, e.g. `wechat`, `qr-cash` or `mobile-banking`
    pub channel: Channel,

    /// Amount in baht; rounded to two decimal places
    #[arg(long)]
    pub amount: Amount,

    /// Merchant reference number
    #[arg(long)]
    pub reference_no: String,

    /// Server-to-server notification URL
    #[arg(long)]
    pub background_url: Option<String>,

    /// Where the payer lands after paying
    #[arg(long)]
    pub response_url: Option<String>,

    /// Product description
    #[arg(long)]
    pub detail: Option<String>,

    /// Payer name
    #[arg(long)]
    pub customer_name: Option<String>,

    /// Payer email
    #[arg(long)]
    pub customer_email: Option<String>,

    /// Payer phone number
    #[arg(long)]
    pub customer_telephone: Option<String>,

    /// Payer address
    #[arg(long)]
    pub customer_address: Option<String>,

    /// Bank for mobile banking, by code (`014`) or name (`SCB_EASY`)
    #[arg(long)]
    pub bank_code: Option<BankCode>,

    /// LINE Pay token payment flag
    #[arg(long)]
    pub remember_with_token: Option<String>,
}

/// OTP subcommands.
#[derive(Debug, Subcommand)]
pub enum OtpCommand {
    /// Ask TrueMoney to text an OTP and print the form tokens
    Send {
        /// Payer mobile number
        mobile_number: String,
        /// Transaction id returned by `create truewallet`
        ptx_id: String,
    },

    /// Ask for a new OTP and print the new form tokens
    Resend {
        /// Transaction id returned by `create truewallet`
        ptx_id: String,
    },

    /// Submit an OTP with the latest form tokens
    Submit {
        /// The code the payer received
        otp_code: String,

        /// Form token as `name=value`; repeat for each token
        #[arg(long = "token", value_parser = parse_token)]
        tokens: Vec<(String, String)>,
    },
}

impl CreateArgs {
    /// Builds the channel's request, checking the channel's required fields.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidArgument`] if a required flag is missing.
    pub fn into_request(self) -> Result<PaymentRequest, CliError> {
        let channel = self.channel;
        let mut details = PaymentDetails::new(self.amount, self.reference_no).with_customer(
            self.customer_name,
            self.customer_email,
            self.customer_telephone,
        );
        details.detail = self.detail;
        details.background_url = self.background_url;
        details.customer_address = self.customer_address;

        let request: PaymentRequest = match channel {
            Channel::QrCash => QrCashOptions::new(details).into(),
            Channel::LinePay => {
                let detail = required(details.detail.take(), "--detail", channel)?;
                let mut options = LinePayOptions::new(
                    details,
                    detail,
                    required(self.response_url, "--response-url", channel)?,
                );
                options.remember_with_token = self.remember_with_token;
                options.into()
            }
            Channel::TrueWallet => {
                let background_url =
                    required(details.background_url.take(), "--background-url", channel)?;
                let telephone = required(
                    details.customer_telephone.take(),
                    "--customer-telephone",
                    channel,
                )?;
                TrueWalletOptions::new(
                    details,
                    background_url,
                    required(self.response_url, "--response-url", channel)?,
                    telephone,
                )
                .into()
            }
            Channel::ShopeePay => {
                let background_url =
                    required(details.background_url.take(), "--background-url", channel)?;
                ShopeePayOptions::new(
                    details,
                    background_url,
                    required(self.response_url, "--response-url", channel)?,
                )
                .into()
            }
            Channel::WeChat | Channel::Alipay => {
                let background_url =
                    required(details.background_url.take(), "--background-url", channel)?;
                let detail = required(details.detail.take(), "--detail", channel)?;
                if channel == Channel::WeChat {
                    WeChatOptions::new(details, background_url, detail).into()
                } else {
                    AlipayOptions::new(details, background_url, detail).into()
                }
            }
            Channel::MobileBanking => {
                let background_url =
                    required(details.background_url.take(), "--background-url", channel)?;
                MobileBankingOptions::new(
                    details,
                    background_url,
                    required(self.response_url, "--response-url", channel)?,
                    required(self.bank_code, "--bank-code", channel)?,
                )
                .into()
            }
        };
        Ok(request)
    }
}

fn required<T>(value: Option<T>, flag: &str, channel: Channel) -> Result<T, CliError> {
    value.ok_or_else(|| CliError::InvalidArgument(format!("{flag} is required for {channel}")))
}

/// Parses a `name=value` token argument.
fn parse_token(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .ok_or_else(|| format!("expected name=value, got {s:?}"))
}

/// Runs the parsed command and returns what should be printed on stdout.
///
/// # Errors
///
/// Returns [`CliError`] if the configuration cannot be loaded, the arguments
/// are incomplete, or a call fails in strict mode or on a mutating command.
pub async fn run(cli: Cli) -> Result<String, CliError> {
    let mut config = CliConfig::load(cli.config.as_deref())?;
    config.sandbox |= cli.sandbox;
    config.raw |= cli.raw;
    let config = config.into_client_config();
    tracing::debug!(
        environment = %config.environment(),
        raw = config.raw,
        credentials = ?config.credentials,
        "Loaded configuration"
    );

    let client = GbPrimePayClient::from_config(&config);
    let strict = cli.strict;

    match cli.command {
        Command::MerchantInfo => {
            if strict {
                to_json(&client.try_merchant_info().await?)
            } else {
                to_json(&client.merchant_info().await)
            }
        }
        Command::Validate { credential } => {
            let info = match (credential, strict) {
                (CredentialKind::PublicKey, true) => Some(client.try_validate_public_key().await?),
                (CredentialKind::PublicKey, false) => client.validate_public_key().await,
                (CredentialKind::SecretKey, true) => Some(client.try_validate_secret_key().await?),
                (CredentialKind::SecretKey, false) => client.validate_secret_key().await,
                (CredentialKind::Token, true) => Some(client.try_validate_token().await?),
                (CredentialKind::Token, false) => client.validate_token().await,
            };
            to_json(&info)
        }
        Command::Create(args) => {
            let request = args.into_request()?;
            let response = client.create_payment(&request).await?;
            tracing::info!(
                channel = %request.channel(),
                reference_no = %request.details().reference_no,
                "Payment created"
            );
            render_payment(&response)
        }
        Command::Check { reference_no } => {
            if strict {
                to_json(&client.try_check_status(&reference_no).await?)
            } else {
                to_json(&client.check_status(&reference_no).await)
            }
        }
        Command::Otp { command } => run_otp(&client, command).await,
    }
}

async fn run_otp(client: &GbPrimePayClient, command: OtpCommand) -> Result<String, CliError> {
    match command {
        OtpCommand::Send {
            mobile_number,
            ptx_id,
        } => to_json(&client.truemoney_send_otp(&mobile_number, &ptx_id).await?),
        OtpCommand::Resend { ptx_id } => to_json(&client.truemoney_resend_otp(&ptx_id).await?),
        OtpCommand::Submit { otp_code, tokens } => {
            let tokens: FormTokens = tokens.into_iter().collect();
            client.truemoney_submit_otp(&otp_code, &tokens).await?;
            Ok("OTP submitted".to_owned())
        }
    }
}

/// JSON responses are pretty-printed; every other variant prints as text.
fn render_payment(response: &PaymentResponse) -> Result<String, CliError> {
    match response {
        PaymentResponse::Json(value) => to_json(value),
        other => Ok(other.to_string()),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}
