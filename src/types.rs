use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Auth block of a login or token-creation response.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AuthResult {
    #[serde(default, deserialize_with = "null_default")]
    pub client_token: String,
    #[serde(default, deserialize_with = "null_default")]
    pub accessor: String,
    #[serde(default, deserialize_with = "null_default")]
    pub lease_duration: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub renewable: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub policies: Vec<String>,
}

/// Response-wrapping metadata.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct WrapInfo {
    #[serde(default, deserialize_with = "null_default")]
    pub token: String,
    #[serde(default, deserialize_with = "null_default")]
    pub ttl: i64,
    #[serde(default = "zero_time", deserialize_with = "time_or_zero")]
    pub creation_time: DateTime<FixedOffset>,
    #[serde(default, deserialize_with = "null_default")]
    pub creation_path: String,
    #[serde(default, deserialize_with = "null_default")]
    pub wrapped_accessor: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlainLease {
    pub lease_duration: i64,
}

/// Exactly one shape per secret.
#[derive(Debug, Clone, PartialEq)]
pub enum SecretKind {
    Auth(AuthResult),
    WrapInfo(WrapInfo),
    Lease(PlainLease),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Secret {
    pub kind: SecretKind,
    pub data: Map<String, Value>,
}

impl Secret {
    pub fn new(kind: SecretKind) -> Self {
        Secret { kind, data: Map::new() }
    }

    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }

    /// Decode an API response body.
    pub fn from_json(input: &str) -> Result<Secret> {
        let raw: RawSecret =
            serde_json::from_str(input).context("Failed to parse secret JSON")?;
        Ok(raw.into())
    }
}

/// Wire shape of a response, where `auth` and `wrap_info` are independently
/// nullable.
#[derive(Deserialize, Debug)]
struct RawSecret {
    #[serde(default)]
    lease_duration: Option<i64>,
    #[serde(default)]
    data: Option<Map<String, Value>>,
    #[serde(default)]
    auth: Option<AuthResult>,
    #[serde(default)]
    wrap_info: Option<WrapInfo>,
}

impl From<RawSecret> for Secret {
    fn from(raw: RawSecret) -> Self {
        // auth takes precedence if a response somehow carries both
        let kind = match (raw.auth, raw.wrap_info) {
            (Some(auth), _) => SecretKind::Auth(auth),
            (None, Some(wrap)) => SecretKind::WrapInfo(wrap),
            (None, None) => SecretKind::Lease(PlainLease {
                lease_duration: raw.lease_duration.unwrap_or_default(),
            }),
        };
        Secret::new(kind).with_data(raw.data.unwrap_or_default())
    }
}

/// API responses send `null` for empty lists and strings.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `0001-01-01T00:00:00Z`, used when a response carries no creation time.
pub fn zero_time() -> DateTime<FixedOffset> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
        .fixed_offset()
}

fn time_or_zero<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DateTime<FixedOffset>>::deserialize(deserializer)?.unwrap_or_else(zero_time))
}
