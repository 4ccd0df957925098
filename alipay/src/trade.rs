//! Trade operations.
//!
//! Request types implement [`Request`]; their business fields serialize into
//! `biz_content` while `notify_url` / `return_url` travel in the envelope.
//! Unset optional fields and empty strings are omitted.
//!
//! | request                   | method                    | delivery         |
//! |---------------------------|---------------------------|------------------|
//! | [`TradeQueryRequest`]     | `alipay.trade.query`      | server execute   |
//! | [`TradePayRequest`]       | `alipay.trade.pay`        | server execute   |
//! | [`TradePrecreateRequest`] | `alipay.trade.precreate`  | server execute   |
//! | [`TradeAppPayRequest`]    | `alipay.trade.app.pay`    | SDK query string |
//! | [`TradeWapPayRequest`]    | `alipay.trade.wap.pay`    | page redirect    |
//! | [`TradePagePayRequest`]   | `alipay.trade.page.pay`   | page redirect    |

use serde::{Deserialize, Serialize};

use crate::request::Request;
use crate::response::ResponseCommon;

/// Product code of desktop website payments.
pub const PRODUCT_CODE_FAST_INSTANT_TRADE_PAY: &str = "FAST_INSTANT_TRADE_PAY";

/// Product code of mobile website payments.
pub const PRODUCT_CODE_QUICK_WAP_WAY: &str = "QUICK_WAP_WAY";

/// Scene of a barcode payment.
pub const SCENE_BAR_CODE: &str = "bar_code";

fn push_url<'a>(
    fields: &mut Vec<(&'static str, &'a str)>,
    name: &'static str,
    value: Option<&'a str>,
) {
    if let Some(value) = value {
        fields.push((name, value));
    }
}

/// Queries a trade (`alipay.trade.query`).
///
/// At least one of `out_trade_no` and `trade_no` must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TradeQueryRequest {
    /// Merchant order number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_trade_no: Option<String>,
    /// Gateway trade number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_no: Option<String>,
}

impl TradeQueryRequest {
    /// Queries by merchant order number.
    #[must_use]
    pub fn by_out_trade_no(out_trade_no: impl Into<String>) -> Self {
        Self {
            out_trade_no: Some(out_trade_no.into()),
            trade_no: None,
        }
    }

    /// Queries by gateway trade number.
    #[must_use]
    pub fn by_trade_no(trade_no: impl Into<String>) -> Self {
        Self {
            out_trade_no: None,
            trade_no: Some(trade_no.into()),
        }
    }
}

impl Request for TradeQueryRequest {
    fn method(&self) -> &'static str {
        "alipay.trade.query"
    }
}

/// Result of [`TradeQueryRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeQueryResponse {
    /// Status fields.
    #[serde(flatten)]
    pub common: ResponseCommon,
    /// Gateway trade number.
    pub trade_no: String,
    /// Merchant order number.
    pub out_trade_no: String,
    /// Masked buyer account.
    pub buyer_logon_id: String,
    /// Trade status, e.g. `WAIT_BUYER_PAY` or `TRADE_SUCCESS`.
    pub trade_status: String,
    /// Order amount in yuan.
    pub total_amount: String,
    /// Buyer user id.
    pub buyer_user_id: String,
}

/// Charges a buyer's payment barcode (`alipay.trade.pay`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TradePayRequest {
    /// Notification callback URL.
    #[serde(skip)]
    pub notify_url: Option<String>,
    /// Merchant order number.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub out_trade_no: String,
    /// Payment scene, normally [`SCENE_BAR_CODE`].
    #[serde(skip_serializing_if = "String::is_empty")]
    pub scene: String,
    /// Code scanned from the buyer's app.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub auth_code: String,
    /// Order title.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subject: String,
    /// Order amount in yuan, two decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<String>,
}

impl Request for TradePayRequest {
    fn method(&self) -> &'static str {
        "alipay.trade.pay"
    }

    fn envelope_fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = Vec::new();
        push_url(&mut fields, "notify_url", self.notify_url.as_deref());
        fields
    }
}

/// Result of [`TradePayRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradePayResponse {
    /// Status fields.
    #[serde(flatten)]
    pub common: ResponseCommon,
    /// Gateway trade number.
    pub trade_no: String,
    /// Merchant order number.
    pub out_trade_no: String,
    /// Masked buyer account.
    pub buyer_logon_id: String,
    /// Order amount in yuan.
    pub total_amount: String,
    /// Amount received by the merchant.
    pub receipt_amount: String,
    /// Payment time (`YYYY-MM-DD HH:MM:SS`).
    pub gmt_payment: String,
    /// Buyer user id.
    pub buyer_user_id: String,
}

/// Creates a trade paid by scanning a QR code (`alipay.trade.precreate`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TradePrecreateRequest {
    /// Notification callback URL.
    #[serde(skip)]
    pub notify_url: Option<String>,
    /// Merchant order number.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub out_trade_no: String,
    /// Order amount in yuan, two decimals.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub total_amount: String,
    /// Order title.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subject: String,
}

impl TradePrecreateRequest {
    /// Creates a request without a notification URL.
    #[must_use]
    pub fn new(
        out_trade_no: impl Into<String>,
        total_amount: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            notify_url: None,
            out_trade_no: out_trade_no.into(),
            total_amount: total_amount.into(),
            subject: subject.into(),
        }
    }

    /// Sets the notification callback URL.
    #[must_use]
    pub fn with_notify_url(mut self, url: impl Into<String>) -> Self {
        self.notify_url = Some(url.into());
        self
    }
}

impl Request for TradePrecreateRequest {
    fn method(&self) -> &'static str {
        "alipay.trade.precreate"
    }

    fn envelope_fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = Vec::new();
        push_url(&mut fields, "notify_url", self.notify_url.as_deref());
        fields
    }
}

/// Result of [`TradePrecreateRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradePrecreateResponse {
    /// Status fields.
    #[serde(flatten)]
    pub common: ResponseCommon,
    /// Merchant order number.
    pub out_trade_no: String,
    /// Content of the QR code to show the buyer.
    pub qr_code: String,
}

/// Pays from a native app through the mobile SDK (`alipay.trade.app.pay`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TradeAppPayRequest {
    /// Page shown after payment.
    #[serde(skip)]
    pub return_url: Option<String>,
    /// Notification callback URL.
    #[serde(skip)]
    pub notify_url: Option<String>,
    /// Order amount in yuan, two decimals.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub total_amount: String,
    /// Order title.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subject: String,
    /// Merchant order number.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub out_trade_no: String,
}

impl Request for TradeAppPayRequest {
    fn method(&self) -> &'static str {
        "alipay.trade.app.pay"
    }

    fn envelope_fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = Vec::new();
        push_url(&mut fields, "return_url", self.return_url.as_deref());
        push_url(&mut fields, "notify_url", self.notify_url.as_deref());
        fields
    }
}

/// Pays from a mobile browser (`alipay.trade.wap.pay`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TradeWapPayRequest {
    /// Page shown after payment.
    #[serde(skip)]
    pub return_url: Option<String>,
    /// Notification callback URL.
    #[serde(skip)]
    pub notify_url: Option<String>,
    /// Order title.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subject: String,
    /// Merchant order number.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub out_trade_no: String,
    /// Order amount in yuan, two decimals.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub total_amount: String,
    /// Page the buyer returns to when abandoning payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quit_url: Option<String>,
    /// Product code, normally [`PRODUCT_CODE_QUICK_WAP_WAY`].
    #[serde(skip_serializing_if = "String::is_empty")]
    pub product_code: String,
}

impl Request for TradeWapPayRequest {
    fn method(&self) -> &'static str {
        "alipay.trade.wap.pay"
    }

    fn envelope_fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = Vec::new();
        push_url(&mut fields, "return_url", self.return_url.as_deref());
        push_url(&mut fields, "notify_url", self.notify_url.as_deref());
        fields
    }
}

/// Pays from a desktop browser (`alipay.trade.page.pay`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TradePagePayRequest {
    /// Page shown after payment.
    #[serde(skip)]
    pub return_url: Option<String>,
    /// Notification callback URL.
    #[serde(skip)]
    pub notify_url: Option<String>,
    /// Merchant order number.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub out_trade_no: String,
    /// Product code, normally [`PRODUCT_CODE_FAST_INSTANT_TRADE_PAY`].
    #[serde(skip_serializing_if = "String::is_empty")]
    pub product_code: String,
    /// Order amount in yuan, two decimals.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub total_amount: String,
    /// Order title.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subject: String,
}

impl Request for TradePagePayRequest {
    fn method(&self) -> &'static str {
        "alipay.trade.page.pay"
    }

    fn envelope_fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = Vec::new();
        push_url(&mut fields, "return_url", self.return_url.as_deref());
        push_url(&mut fields, "notify_url", self.notify_url.as_deref());
        fields
    }
}
