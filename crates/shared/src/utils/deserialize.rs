use serde::{Deserialize, Deserializer, de};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    fn into_id<E: de::Error>(self) -> Result<Option<i64>, E> {
        match self {
            RawId::Number(n) => Ok(Some(n)),
            RawId::Text(s) if s.trim().is_empty() => Ok(None),
            RawId::Text(s) => s
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| E::custom(format!("invalid id '{s}'"))),
        }
    }
}

/// Accepts `12` or `"12"`; the backend emits role and permission ids as strings.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer)?
        .into_id()?
        .ok_or_else(|| de::Error::custom("empty id"))
}

pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawId>::deserialize(deserializer)? {
        Some(raw) => raw.into_id(),
        None => Ok(None),
    }
}

/// `null` decodes as `T::default()`, so nil slices arrive as empty vectors.
pub fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNullableString {
    Plain(String),
    Sql {
        #[serde(rename = "String")]
        string: String,
        #[serde(rename = "Valid")]
        valid: bool,
    },
}

/// Accepts a plain string, `null`, or a `{"String": .., "Valid": ..}` object.
/// Empty and invalid values become `None`.
pub fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<RawNullableString>::deserialize(deserializer)? {
        Some(RawNullableString::Plain(s)) => Some(s),
        Some(RawNullableString::Sql { string, valid }) if valid => Some(string),
        _ => None,
    };
    Ok(value.filter(|s| !s.is_empty()))
}
