//! Payment channels and bank codes.
//!
//! - [`Channel`] - The closed set of payment methods the client can create
//! - [`BankCode`] - Banks reachable through the mobile-banking channel
//!
//! Both serialise to the provider's wire names (`"QR_CASH"`, `"014"`).
//!
//! The provider's documentation also mentions `QR_CREDIT`, `BILL_PAYMENT`
//! and `ATOME`. None of them has an endpoint or an option set, so they are
//! not representable here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A payment method offered by GB Prime Pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Thai QR (PromptPay) cash payment.
    #[serde(rename = "QR_CASH")]
    QrCash,
    /// LINE Pay.
    #[serde(rename = "LINEPAY")]
    LinePay,
    /// TrueMoney Wallet.
    #[serde(rename = "TRUEWALLET")]
    TrueWallet,
    /// ShopeePay.
    #[serde(rename = "SHOPEEPAY")]
    ShopeePay,
    /// WeChat Pay.
    #[serde(rename = "WECHAT")]
    WeChat,
    /// Alipay.
    #[serde(rename = "ALIPAY")]
    Alipay,
    /// Mobile banking app deep links.
    #[serde(rename = "MOBILE_BANKING")]
    MobileBanking,
}

impl Channel {
    /// Every channel, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::QrCash,
        Self::LinePay,
        Self::TrueWallet,
        Self::ShopeePay,
        Self::WeChat,
        Self::Alipay,
        Self::MobileBanking,
    ];

    /// Returns the provider's name for this channel.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::QrCash => "QR_CASH",
            Self::LinePay => "LINEPAY",
            Self::TrueWallet => "TRUEWALLET",
            Self::ShopeePay => "SHOPEEPAY",
            Self::WeChat => "WECHAT",
            Self::Alipay => "ALIPAY",
            Self::MobileBanking => "MOBILE_BANKING",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown channel name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown payment channel {0:?}")]
pub struct ChannelError(String);

impl FromStr for Channel {
    type Err = ChannelError;

    /// Parses the provider's name, case-insensitively, with `-` accepted for `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|channel| channel.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| ChannelError(s.to_owned()))
    }
}

/// A bank reachable through [`Channel::MobileBanking`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BankCode {
    /// Kasikorn Bank K PLUS.
    #[serde(rename = "004")]
    KPlus,
    /// SCB Easy.
    #[serde(rename = "014")]
    ScbEasy,
    /// Krungsri KMA.
    #[serde(rename = "025")]
    Kma,
    /// Bangkok Bank mobile banking.
    #[serde(rename = "002")]
    Bbl,
    /// Krungthai NEXT.
    #[serde(rename = "006")]
    Ktb,
}

impl BankCode {
    /// Every bank code, in declaration order.
    pub const ALL: [Self; 5] = [Self::KPlus, Self::ScbEasy, Self::Kma, Self::Bbl, Self::Ktb];

    /// Returns the three-digit code sent to the provider.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::KPlus => "004",
            Self::ScbEasy => "014",
            Self::Kma => "025",
            Self::Bbl => "002",
            Self::Ktb => "006",
        }
    }

    /// Returns the symbolic name of the bank (`"SCB_EASY"`).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::KPlus => "KPLUS",
            Self::ScbEasy => "SCB_EASY",
            Self::Kma => "KMA",
            Self::Bbl => "BBL",
            Self::Ktb => "KTB",
        }
    }
}

impl fmt::Display for BankCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unknown bank code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown bank code {0:?}")]
pub struct BankCodeError(String);

impl FromStr for BankCode {
    type Err = BankCodeError;

    /// Accepts either the three-digit code or the symbolic name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|bank| bank.code() == normalized || bank.name().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| BankCodeError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_serialize_wire_names() {
        assert_eq!(
            serde_json::to_string(&Channel::MobileBanking).unwrap(),
            "\"MOBILE_BANKING\""
        );
        assert_eq!(serde_json::to_string(&Channel::LinePay).unwrap(), "\"LINEPAY\"");
    }

    #[test]
    fn test_channel_display_matches_serde() {
        for channel in Channel::ALL {
            let json = serde_json::to_string(&channel).unwrap();
            assert_eq!(json, format!("\"{channel}\""));
        }
    }

    #[test]
    fn test_channel_from_str_is_lenient() {
        assert_eq!("qr-cash".parse::<Channel>().unwrap(), Channel::QrCash);
        assert_eq!("TRUEWALLET".parse::<Channel>().unwrap(), Channel::TrueWallet);
        assert_eq!("wechat".parse::<Channel>().unwrap(), Channel::WeChat);
    }

    #[test]
    fn test_legacy_channels_rejected() {
        for legacy in ["QR_CREDIT", "BILL_PAYMENT", "ATOME"] {
            assert!(legacy.parse::<Channel>().is_err(), "{legacy} should not parse");
        }
    }

    #[test]
    fn test_bank_code_values() {
        assert_eq!(BankCode::KPlus.code(), "004");
        assert_eq!(BankCode::ScbEasy.code(), "014");
        assert_eq!(BankCode::Kma.code(), "025");
        assert_eq!(BankCode::Bbl.code(), "002");
        assert_eq!(BankCode::Ktb.code(), "006");
    }

    #[test]
    fn test_bank_code_from_code_or_name() {
        assert_eq!("014".parse::<BankCode>().unwrap(), BankCode::ScbEasy);
        assert_eq!("scb-easy".parse::<BankCode>().unwrap(), BankCode::ScbEasy);
        assert_eq!("BBL".parse::<BankCode>().unwrap(), BankCode::Bbl);
        assert!("999".parse::<BankCode>().is_err());
    }

    #[test]
    fn test_bank_code_serde_roundtrip() {
        let bank: BankCode = serde_json::from_str("\"002\"").unwrap();
        assert_eq!(bank, BankCode::Bbl);
        assert_eq!(serde_json::to_string(&bank).unwrap(), "\"002\"");
    }
}
