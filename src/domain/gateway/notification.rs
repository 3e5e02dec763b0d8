//! Inbound payment notification payload.
//!
//! Notifications arrive as form-encoded key/value pairs and are untrusted
//! until their MAC has been verified. The payload keeps its fields in a
//! sorted map so canonicalization is independent of delivery order.

use std::collections::BTreeMap;

/// Field prefix covered by the notification MAC.
pub const MAC_FIELD_PREFIX: &str = "viettel_";

/// Field carrying the received signature.
pub const SECURE_HASH_FIELD: &str = "viettel_SecureHash";

/// Field naming the signature scheme; excluded from the MAC input.
pub const SECURE_HASH_TYPE_FIELD: &str = "viettel_SecureHashType";

/// Field carrying the gateway's payment result code.
pub const RESPONSE_CODE_FIELD: &str = "viettel_ResponseCode";

/// Field carrying the merchant reference (sent unprefixed by the gateway).
pub const ORDER_ID_FIELD: &str = "order_id";

/// Field carrying the paid amount in minor units (sent unprefixed).
pub const TRANS_AMOUNT_FIELD: &str = "trans_amount";

/// A single inbound notification, keyed by field name.
///
/// Backed by a `BTreeMap` so iteration is always in ascending byte-wise
/// key order, which the canonicalizer relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationPayload {
    fields: BTreeMap<String, String>,
}

impl NotificationPayload {
    /// Builds a payload from decoded form fields.
    pub fn from_fields(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    /// True when the notification carried no fields at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks up a field by exact name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The received signature, if present.
    pub fn signature(&self) -> Option<&str> {
        self.get(SECURE_HASH_FIELD)
    }

    /// The gateway's raw response code, if present.
    pub fn response_code(&self) -> Option<&str> {
        self.get(RESPONSE_CODE_FIELD)
    }

    /// The merchant reference correlating this notification to a transaction.
    pub fn order_id(&self) -> Option<&str> {
        self.get(ORDER_ID_FIELD)
    }

    /// The notified amount in minor units, still unparsed.
    pub fn trans_amount(&self) -> Option<&str> {
        self.get(TRANS_AMOUNT_FIELD)
    }

    /// Iterates fields in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NotificationPayload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Gateway payment result codes carried in `viettel_ResponseCode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayResponseCode {
    /// Payment completed ("00").
    Success,
    /// Customer cancelled at the gateway ("24").
    CustomerCancelled,
    /// Any other value; kept verbatim for diagnostics.
    Unknown(String),
}

impl GatewayResponseCode {
    /// Parses a raw response code value.
    pub fn from_code(code: &str) -> Self {
        match code {
            "00" => Self::Success,
            "24" => Self::CustomerCancelled,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The wire representation of this code.
    pub fn as_code(&self) -> &str {
        match self {
            Self::Success => "00",
            Self::CustomerCancelled => "24",
            Self::Unknown(code) => code,
        }
    }
}
