use crate::utils::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Author of a mention
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionUser {
    pub id: String,

    #[serde(default)]
    pub name: String,
}

impl MentionUser {
    /// Build from a raw JSON object; null or missing fields become empty,
    /// numeric ids are kept as their decimal text
    fn from_value(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;
        Some(Self {
            id: lenient_string(fields.get("id")),
            name: lenient_string(fields.get("name")),
        })
    }
}

fn lenient_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// An unusable `user` value makes the mention anonymous instead of
/// rejecting the whole record
fn deserialize_user<'de, D>(deserializer: D) -> Result<Option<MentionUser>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(MentionUser::from_value))
}

/// A single ticker mention as stored in the mention log
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MentionRecord {
    /// Ticker as typed by the poster (any case, may carry whitespace)
    #[serde(default)]
    pub ticker: String,

    /// ISO-8601 timestamp of the message
    #[serde(default)]
    pub timestamp: String,

    /// Link to the originating message
    #[serde(default)]
    pub link: Option<String>,

    #[serde(default, deserialize_with = "deserialize_user")]
    pub user: Option<MentionUser>,
}

impl MentionRecord {
    pub fn new(ticker: &str, timestamp: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            timestamp: timestamp.to_string(),
            link: None,
            user: None,
        }
    }

    pub fn with_user(mut self, id: &str, name: &str) -> Self {
        self.user = Some(MentionUser {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn with_link(mut self, link: &str) -> Self {
        self.link = Some(link.to_string());
        self
    }

    /// Trimmed, uppercased ticker; `None` when nothing is left
    pub fn normalized_ticker(&self) -> Option<String> {
        let ticker = self.ticker.trim().to_uppercase();
        if ticker.is_empty() {
            None
        } else {
            Some(ticker)
        }
    }

    /// Parsed timestamp; `None` for missing or malformed values
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp).ok()
    }

    pub fn link_or_empty(&self) -> &str {
        self.link.as_deref().unwrap_or("")
    }

    pub fn user_id(&self) -> &str {
        self.user.as_ref().map(|u| u.id.as_str()).unwrap_or("")
    }

    pub fn user_name(&self) -> &str {
        self.user.as_ref().map(|u| u.name.as_str()).unwrap_or("")
    }
}
