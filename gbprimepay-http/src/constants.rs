//! Endpoint paths of the GB Prime Pay API.

use gbprimepay::Channel;

/// `GET` full merchant profile.
pub const MERCHANT_INFO_PATH: &str = "/getmerchantinfo";

/// `GET` public key validation.
pub const CHECK_PUBLIC_KEY_PATH: &str = "/checkPublicKey";

/// `GET` secret key validation.
pub const CHECK_SECRET_KEY_PATH: &str = "/checkPrivateKey";

/// `POST` (form) token validation.
pub const CHECK_TOKEN_PATH: &str = "/checkCustomerKey";

/// `POST` (JSON) transaction status.
pub const CHECK_STATUS_PATH: &str = "/v1/check_status_txn";

/// `POST` (form) TrueMoney OTP request.
pub const TRUEMONEY_SEND_OTP_PATH: &str = "/v1/trueWallet/payment";

/// `GET` TrueMoney OTP re-send.
pub const TRUEMONEY_RESEND_OTP_PATH: &str = "/true/payments/repeatauthapply";

/// `POST` (form) TrueMoney OTP verification.
pub const TRUEMONEY_SUBMIT_OTP_PATH: &str = "/true/payments/verifytokens";

/// Returns the create-payment path of `channel`.
#[must_use]
pub const fn create_payment_path(channel: Channel) -> &'static str {
    match channel {
        Channel::QrCash => "/v3/qrcode/text",
        Channel::LinePay => "/v2/linepay",
        Channel::TrueWallet => "/v2/trueWallet",
        Channel::ShopeePay => "/v1/shopeePay",
        Channel::WeChat => "/v2/wechat",
        Channel::Alipay => "/alipay/api/alipay",
        Channel::MobileBanking => "/v2/mobileBanking",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_paths_are_distinct() {
        let mut paths: Vec<_> = Channel::ALL.into_iter().map(create_payment_path).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), Channel::ALL.len());
    }

    #[test]
    fn test_create_paths() {
        assert_eq!(create_payment_path(Channel::QrCash), "/v3/qrcode/text");
        assert_eq!(create_payment_path(Channel::Alipay), "/alipay/api/alipay");
        assert_eq!(create_payment_path(Channel::MobileBanking), "/v2/mobileBanking");
    }
}
