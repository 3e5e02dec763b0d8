//! Canonical MAC input serialization.
//!
//! Two canonical forms exist and are never interchangeable: inbound
//! verification joins the sorted `viettel_`-prefixed fields as form-encoded
//! `key=value` pairs, while outbound link signing concatenates a fixed,
//! ordered field list with no separators.

use super::notification::{
    NotificationPayload, MAC_FIELD_PREFIX, SECURE_HASH_FIELD, SECURE_HASH_TYPE_FIELD,
};

/// The fields covered by the outbound link checksum, in signing order.
#[derive(Debug, Clone, Copy)]
pub struct PaymentLinkFields<'a> {
    pub access_code: &'a str,
    pub bill_code: &'a str,
    pub command: &'a str,
    pub merchant_code: &'a str,
    pub order_id: &'a str,
    pub trans_amount: &'a str,
    pub version: &'a str,
}

/// Serializes a notification into its MAC input string.
///
/// Drops the signature and signature-type fields, keeps only fields whose
/// name starts with `viettel_`, and joins them in ascending key order as
/// `key=ENCODED(value)` pairs separated by `&`. Values use form encoding
/// (percent-encoding with space as `+`). An empty payload yields an empty
/// string.
pub fn notification_mac_input(payload: &NotificationPayload) -> String {
    let mut canonical = String::new();
    for (key, value) in payload.iter() {
        if !key.starts_with(MAC_FIELD_PREFIX) {
            continue;
        }
        if key == SECURE_HASH_FIELD || key == SECURE_HASH_TYPE_FIELD {
            continue;
        }
        if !canonical.is_empty() {
            canonical.push('&');
        }
        canonical.push_str(key);
        canonical.push('=');
        canonical.extend(form_urlencoded::byte_serialize(value.as_bytes()));
    }
    canonical
}

/// Concatenates the outbound checksum fields in their fixed order.
///
/// Values are joined directly adjacent with no separators; amounts must
/// already be rendered in plain decimal.
pub fn payment_mac_input(fields: &PaymentLinkFields<'_>) -> String {
    format!(
        "{}{}{}{}{}{}{}",
        fields.access_code,
        fields.bill_code,
        fields.command,
        fields.merchant_code,
        fields.order_id,
        fields.trans_amount,
        fields.version,
    )
}
