// API response models
// Shapes returned by the profile backend

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// =========================
// Generic wrapper
// =========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Server-supplied message, ignoring blank strings.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// Reply to `connect`: only the envelope matters.
pub type ConnectResponse = ApiResponse<Value>;

// =========================
// Profile
// =========================

/// Accepts a string, number or boolean as display text; `null` and anything else is absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Only a literal `true` marks the profile active; `null`, missing or any other value is inactive.
fn active_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(matches!(raw, Some(Value::Bool(true))))
}

/// Public profile as served for a shared link. Read-only on this side.
///
/// Decoding is lenient: an odd display field never turns a profile into a decode error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    #[serde(rename = "_id", default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub view_id: Option<String>,
    #[serde(default, deserialize_with = "active_flag")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient_text")]
    pub design_type: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub designation: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub bio: Option<String>,

    /// Any other display fields the backend sends; kept opaque.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProfileRecord {
    /// Non-empty profile id, if the backend sent one.
    pub fn profile_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Unnamed profile")
    }

    /// `(label, value)` pairs for the contact section, skipping empty fields.
    pub fn contact_lines(&self) -> Vec<(&'static str, &str)> {
        [
            ("Phone", self.phone_number.as_deref()),
            ("Email", self.email.as_deref()),
            ("Website", self.website.as_deref()),
            ("Address", self.address.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, v)| v.filter(|s| !s.trim().is_empty()).map(|s| (label, s)))
        .collect()
    }
}
