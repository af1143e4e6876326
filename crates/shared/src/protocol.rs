use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{domain::Pro, error::PayloadError};

pub const ANALYZE_AUDIO_ROUTE: &str = "/analyze-audio";
pub const HEALTH_ROUTE: &str = "/health";
pub const AUDIO_FIELD_NAME: &str = "file";

/// Ordered list of display strings decoded from a loosely typed JSON value.
///
/// Absent, `null` and `[]` all decode to an empty list. A lone string or
/// object counts as a one-element list, object entries are flattened to
/// text and `null` entries are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TextList(Vec<String>);

impl TextList {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Self::default(),
            Value::Array(items) => Self(items.into_iter().filter_map(entry_text).collect()),
            other => Self(entry_text(other).into_iter().collect()),
        }
    }
}

impl<'de> Deserialize<'de> for TextList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

impl<'a> IntoIterator for &'a TextList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn entry_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Object(fields) => Some(describe_object(&fields)),
        other => Some(other.to_string()),
    }
}

// Licensing entries arrive as {type, organization, url} objects.
fn describe_object(fields: &Map<String, Value>) -> String {
    let field = |key: &str| {
        fields
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
    };
    let kind = field("type");
    let holder = field("organization").or_else(|| field("name"));
    let url = field("url");

    let mut text = match (kind, holder) {
        (Some(kind), Some(holder)) => format!("{kind}: {holder}"),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => String::new(),
    };
    match url {
        Some(url) if text.is_empty() => text.push_str(url),
        Some(url) => text = format!("{text} ({url})"),
        None if text.is_empty() => text = Value::Object(fields.clone()).to_string(),
        None => {}
    }
    text
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(
        Option::<Value>::deserialize(deserializer)?,
        Some(Value::Bool(true))
    ))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let score = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(score.filter(|score| score.is_finite()))
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default, deserialize_with = "lenient_flag")]
    pub success: bool,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(default)]
    pub artists: TextList,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub album: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence_score: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub acrid: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub official_search_links: Option<OfficialSearchLinks>,
    #[serde(
        default,
        deserialize_with = "lenient_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub copyright_report: Option<CopyrightReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficialSearchLinks {
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub bmi: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub ascap: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub socan: Option<String>,
}

impl OfficialSearchLinks {
    pub fn get(&self, pro: Pro) -> Option<&str> {
        match pro {
            Pro::Bmi => self.bmi.as_deref(),
            Pro::Ascap => self.ascap.as_deref(),
            Pro::Socan => self.socan.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyrightReport {
    #[serde(default)]
    pub publisher: TextList,
    #[serde(default)]
    pub master_rights_holder: TextList,
    #[serde(default)]
    pub pros: TextList,
    #[serde(
        default,
        deserialize_with = "lenient_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub licensing_paths: Option<LicensingPaths>,
    /// Older backends name the licensing object `licensing_sources`.
    #[serde(
        default,
        deserialize_with = "lenient_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub licensing_sources: Option<LicensingPaths>,
    #[serde(default)]
    pub source_links: TextList,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub raw_output: Option<String>,
}

impl CopyrightReport {
    pub fn composition_licensing(&self) -> Option<&TextList> {
        self.preferred_licensing(|paths| &paths.composition)
    }

    pub fn master_recording_licensing(&self) -> Option<&TextList> {
        self.preferred_licensing(|paths| &paths.master_recording)
    }

    // `licensing_paths` wins per field; an empty list there falls back to
    // the legacy object.
    fn preferred_licensing(
        &self,
        pick: impl Fn(&LicensingPaths) -> &TextList,
    ) -> Option<&TextList> {
        let current = self.licensing_paths.as_ref().map(&pick);
        let legacy = self.licensing_sources.as_ref().map(&pick);
        match current {
            Some(list) if !list.is_empty() => Some(list),
            _ => legacy.filter(|list| !list.is_empty()).or(current),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicensingPaths {
    #[serde(default)]
    pub composition: TextList,
    #[serde(default)]
    pub master_recording: TextList,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

/// Decodes a backend body. Only invalid JSON or a non-object top level is
/// fatal; every field-level problem degrades to "absent".
pub fn parse_analysis_response(body: &[u8]) -> Result<AnalysisResponse, PayloadError> {
    let value: Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(PayloadError::not_an_object(&value));
    }
    Ok(serde_json::from_value(value)?)
}
