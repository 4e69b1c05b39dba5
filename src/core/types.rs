use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::str::FromStr;

fn millis_to_utc(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
}

/// Epoch-millisecond timestamps sent as any JSON number.
///
/// The platform is not strict about integer encoding, so `1700000000000.0`
/// is read the same as `1700000000000`.
mod epoch_millis {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use serde_json::Number;

    #[allow(clippy::cast_possible_truncation)]
    pub(super) fn from_number(number: &Number) -> Option<i64> {
        number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        })
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let number = Number::deserialize(deserializer)?;
        from_number(&number)
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {}", number)))
    }

    pub mod option {
        use super::{from_number, Error};
        use serde::{Deserialize, Deserializer};
        use serde_json::Number;

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<Number>::deserialize(deserializer)? {
                Some(number) => from_number(&number).map(Some).ok_or_else(|| {
                    D::Error::custom(format!("timestamp out of range: {}", number))
                }),
                None => Ok(None),
            }
        }
    }
}

// Partner

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerRouting {
    pub identifier: String,
}

/// Organisation bound to an API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// The platform spells this field `juridisctions`.
    #[serde(rename = "juridisctions", alias = "jurisdictions", default)]
    pub jurisdictions: Vec<String>,
    #[serde(default)]
    pub currencies: Vec<String>,
    #[serde(default)]
    pub routing: Option<PartnerRouting>,
    pub is_cbs_partner: bool,
    #[serde(deserialize_with = "epoch_millis::deserialize")]
    pub joined_at: i64,
    #[serde(default, deserialize_with = "epoch_millis::option::deserialize")]
    pub revoked_at: Option<i64>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl Partner {
    pub fn joined_at_utc(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.joined_at)
    }

    pub fn revoked_at_utc(&self) -> Option<DateTime<Utc>> {
        self.revoked_at.and_then(millis_to_utc)
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    pub fn routing_identifier(&self) -> Option<&str> {
        self.routing.as_ref().map(|r| r.identifier.as_str())
    }
}

// Account holders

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountHolderType {
    Individual,
    Business,
    Institution,
}

/// Fields shared by every account holder kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountHolderBase {
    #[serde(rename = "_id")]
    pub id: String,
    pub responsible_partner: String,
    pub name: String,
    #[serde(deserialize_with = "epoch_millis::deserialize")]
    pub created_at: i64,
    #[serde(default, deserialize_with = "epoch_millis::option::deserialize")]
    pub updated_at: Option<i64>,
    #[serde(default, deserialize_with = "epoch_millis::option::deserialize")]
    pub revoked_at: Option<i64>,
}

impl AccountHolderBase {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.created_at)
    }

    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        self.updated_at.and_then(millis_to_utc)
    }

    pub fn revoked_at_utc(&self) -> Option<DateTime<Utc>> {
        self.revoked_at.and_then(millis_to_utc)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualAccountHolder {
    #[serde(flatten)]
    pub base: AccountHolderBase,
    #[serde(default)]
    pub discord_id: Option<String>,
    #[serde(default)]
    pub minecraft_id: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
}

/// Account holder, discriminated by its `type` field.
///
/// Only individuals are modelled. Business and institution holders, and any
/// individual body that does not match the typed shape, are kept as raw JSON
/// in `Other` so one unfamiliar record never fails a whole listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountHolder {
    Individual(IndividualAccountHolder),
    Other(Value),
}

impl AccountHolder {
    /// Holder kind, if the `type` field names one this crate knows.
    pub fn kind(&self) -> Option<AccountHolderType> {
        match self {
            Self::Individual(_) => Some(AccountHolderType::Individual),
            Self::Other(raw) => raw
                .get("type")
                .and_then(|kind| AccountHolderType::deserialize(kind).ok()),
        }
    }

    pub const fn base(&self) -> Option<&AccountHolderBase> {
        match self {
            Self::Individual(holder) => Some(&holder.base),
            Self::Other(_) => None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Individual(holder) => Some(&holder.base.id),
            Self::Other(raw) => raw.get("_id").and_then(Value::as_str),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Individual(holder) => Some(&holder.base.name),
            Self::Other(raw) => raw.get("name").and_then(Value::as_str),
        }
    }

    pub const fn as_individual(&self) -> Option<&IndividualAccountHolder> {
        match self {
            Self::Individual(holder) => Some(holder),
            Self::Other(_) => None,
        }
    }

    pub const fn as_raw(&self) -> Option<&Value> {
        match self {
            Self::Individual(_) => None,
            Self::Other(raw) => Some(raw),
        }
    }
}

impl Serialize for AccountHolder {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct Tagged<'a> {
            #[serde(rename = "type")]
            kind: AccountHolderType,
            #[serde(flatten)]
            holder: &'a IndividualAccountHolder,
        }

        match self {
            Self::Individual(holder) => Tagged {
                kind: AccountHolderType::Individual,
                holder,
            }
            .serialize(serializer),
            Self::Other(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for AccountHolder {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        if raw.get("type").and_then(Value::as_str) == Some("individual") {
            if let Ok(holder) = IndividualAccountHolder::deserialize(&raw) {
                return Ok(Self::Individual(holder));
            }
        }
        Ok(Self::Other(raw))
    }
}

/// Payload for creating an individual account holder.
///
/// `metadata` is free-form: an object, a string, or absent. Any extra
/// top-level fields go in `extra` and are sent as-is, except `type`, which is
/// always forced to `individual`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndividualAccountHolderCreationData {
    pub name: String,
    pub discord_id: Option<String>,
    pub minecraft_id: Option<String>,
    pub external_id: Option<String>,
    pub metadata: Option<Value>,
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

impl IndividualAccountHolderCreationData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_discord_id(mut self, discord_id: impl Into<String>) -> Self {
        self.discord_id = Some(discord_id.into());
        self
    }

    pub fn with_minecraft_id(mut self, minecraft_id: impl Into<String>) -> Self {
        self.minecraft_id = Some(minecraft_id.into());
        self
    }

    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

// Accounts

/// Account record. No schema is published for accounts yet, so the body is
/// kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Account(pub Value);

impl Account {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn id(&self) -> Option<&str> {
        self.get("_id").and_then(Value::as_str)
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// A filter value: one string or several, sent comma-joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    One(String),
    Many(Vec<String>),
}

impl QueryValue {
    pub fn to_value(&self) -> Value {
        match self {
            Self::One(v) => Value::String(v.clone()),
            Self::Many(vs) => Value::Array(vs.iter().cloned().map(Value::String).collect()),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for QueryValue {
    fn from(values: [&str; N]) -> Self {
        Self::Many(values.iter().map(|v| (*v).to_string()).collect())
    }
}

/// Filters for listing accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner: Option<QueryValue>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<QueryValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder: Option<QueryValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<QueryValue>,
}

impl AccountListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn partner(mut self, partner: impl Into<QueryValue>) -> Self {
        self.partner = Some(partner.into());
        self
    }

    pub fn account_type(mut self, account_type: impl Into<QueryValue>) -> Self {
        self.account_type = Some(account_type.into());
        self
    }

    pub fn holder(mut self, holder: impl Into<QueryValue>) -> Self {
        self.holder = Some(holder.into());
        self
    }

    pub fn currency(mut self, currency: impl Into<QueryValue>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Set filters as `(wire key, value)` pairs, in wire order.
    pub fn pairs(&self) -> Vec<(&'static str, Value)> {
        [
            ("partner", &self.partner),
            ("type", &self.account_type),
            ("holder", &self.holder),
            ("currency", &self.currency),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| (key, v.to_value())))
        .collect()
    }

    pub fn to_query_string(&self) -> String {
        crate::core::kernel::query::build_query(self.pairs())
    }
}

// Currencies

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySymbol {
    pub value: String,
    pub is_after: bool,
}

/// Any number or numeric string that fits a `Decimal`, else `None`.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let parse = |raw: &str| {
        Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .ok()
    };

    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => parse(&number.to_string()),
        Value::String(raw) => parse(raw.trim()),
        _ => None,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyExchangeRate {
    pub currency: String,
    /// `None` when the platform sent a rate `Decimal` cannot represent.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub rate: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    #[serde(rename = "_id")]
    pub id: String,
    pub code: String,
    pub name: String,
    pub symbol: CurrencySymbol,
    #[serde(default)]
    pub exchange_rates: Vec<CurrencyExchangeRate>,
}

impl Currency {
    /// Rate against the currency with the given code, matched case-insensitively.
    pub fn rate_for(&self, code: &str) -> Option<Decimal> {
        self.exchange_rates
            .iter()
            .find(|r| r.currency.eq_ignore_ascii_case(code))
            .and_then(|r| r.rate)
    }

    pub fn format_amount(&self, amount: Decimal) -> String {
        if self.symbol.is_after {
            format!("{}{}", amount, self.symbol.value)
        } else {
            format!("{}{}", self.symbol.value, amount)
        }
    }
}
