//! Raw field extraction for `-field` style output.
//!
//! A field name is first matched against the aliases of the secret's shape
//! (auth, wrap info or plain lease); anything else falls through to the
//! secret's `data` map. The alias names are relied on by scripts and must
//! not change.

use chrono::{DateTime, FixedOffset, Timelike};
use serde_json::Value;

use crate::types::{Secret, SecretKind};

const NIL: &str = "<nil>";

/// Resolve `field` on `secret` to a printable string.
///
/// The flag is false when nothing was found. A `data` entry holding JSON
/// `null` counts as not found, the same as a missing key.
pub fn raw_field(secret: &Secret, field: &str) -> (String, bool) {
    let val = match &secret.kind {
        SecretKind::Auth(auth) => match field {
            "token" => Some(Value::from(auth.client_token.as_str())),
            "token_accessor" => Some(Value::from(auth.accessor.as_str())),
            "token_duration" => Some(Value::from(auth.lease_duration)),
            "token_renewable" => Some(Value::from(auth.renewable)),
            "token_policies" => Some(Value::from(auth.policies.clone())),
            _ => secret.data.get(field).cloned(),
        },

        SecretKind::WrapInfo(wrap) => match field {
            "wrapping_token" => Some(Value::from(wrap.token.as_str())),
            "wrapping_token_ttl" => Some(Value::from(wrap.ttl)),
            "wrapping_token_creation_time" => {
                Some(Value::from(format_rfc3339_nano(&wrap.creation_time)))
            }
            "wrapping_token_creation_path" => Some(Value::from(wrap.creation_path.as_str())),
            "wrapped_accessor" => Some(Value::from(wrap.wrapped_accessor.as_str())),
            _ => secret.data.get(field).cloned(),
        },

        SecretKind::Lease(lease) => match field {
            "refresh_interval" => Some(Value::from(lease.lease_duration)),
            _ => secret.data.get(field).cloned(),
        },
    };

    let present = matches!(&val, Some(v) if !v.is_null());
    (display_value(val.as_ref()), present)
}

/// Default string form of a value: strings unquoted, lists as `[a b]`,
/// maps as `map[k:v]` with sorted keys.
pub fn display_value(val: Option<&Value>) -> String {
    match val {
        None | Some(Value::Null) => NIL.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Array(items)) => {
            let parts: Vec<String> = items.iter().map(|v| display_value(Some(v))).collect();
            format!("[{}]", parts.join(" "))
        }
        Some(Value::Object(map)) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let parts: Vec<String> = keys
                .into_iter()
                .map(|k| format!("{}:{}", k, display_value(map.get(k))))
                .collect();
            format!("map[{}]", parts.join(" "))
        }
    }
}

/// RFC 3339 with up to nanosecond precision. Trailing zeros of the fraction
/// are dropped and a zero offset is written as `Z`. The stored offset is
/// kept as is.
pub fn format_rfc3339_nano(t: &DateTime<FixedOffset>) -> String {
    let mut out = t.format("%Y-%m-%dT%H:%M:%S").to_string();

    // chrono encodes a leap second as nanos >= 1e9
    let nanos = t.nanosecond() % 1_000_000_000;
    if nanos != 0 {
        let frac = format!("{:09}", nanos);
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }

    if t.offset().local_minus_utc() == 0 {
        out.push('Z');
    } else {
        out.push_str(&t.format("%:z").to_string());
    }
    out
}
