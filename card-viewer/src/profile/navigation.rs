// Navigation context: where the view id comes from

use url::Url;

use crate::utils::validation::usable_view_id;

/// The `id` query parameter of the link a visitor opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileViewRequest {
    view_id: Option<String>,
}

impl ProfileViewRequest {
    pub fn new(view_id: impl Into<String>) -> Self {
        Self {
            view_id: Some(view_id.into()),
        }
    }

    /// Read `id` from a raw query string (`"id=abc&ref=nfc"`, leading `?` allowed).
    /// When `id` repeats, the first occurrence wins.
    pub fn from_query(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        let view_id = url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == "id")
            .map(|(_, v)| v.into_owned());
        Self { view_id }
    }

    pub fn from_url(url: &Url) -> Self {
        Self::from_query(url.query().unwrap_or(""))
    }

    /// Accepts a full profile link, a bare query string, or a bare view id.
    pub fn from_link(link: &str) -> Self {
        let link = link.trim();
        if let Ok(url) = Url::parse(link) {
            return Self::from_url(&url);
        }
        match link.split_once('?') {
            Some((_, query)) => Self::from_query(query),
            None if link.contains('=') => Self::from_query(link),
            None if link.is_empty() => Self::default(),
            None => Self::new(link),
        }
    }

    /// Non-empty view id, if any.
    pub fn view_id(&self) -> Option<&str> {
        usable_view_id(self.view_id.as_deref())
    }
}
