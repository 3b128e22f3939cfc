// API request models

use serde::{Deserialize, Serialize};

use crate::share::form::ContactForm;
use crate::utils::validation::normalize_phone;

/// Body of the "submit connect request" call. Built fresh per submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectPayload {
    pub view_id: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub designation: String,
    pub business_name: String,
    pub business_phone: String,
    pub website: String,
    pub business_category: String,
    pub business_address: String,
    pub notes: String,
}

impl ConnectPayload {
    /// Project the form onto the wire shape. This is the only place phone numbers are
    /// normalized; hidden "additional" fields are included as typed.
    pub fn from_form(view_id: &str, form: &ContactForm) -> Self {
        Self {
            view_id: view_id.to_string(),
            full_name: form.full_name.clone(),
            email: form.email.clone(),
            phone_number: normalize_phone(&form.phone),
            designation: form.designation.clone(),
            business_name: form.business_name.clone(),
            business_phone: normalize_phone(&form.business_phone),
            website: form.website.clone(),
            business_category: form.business_category.clone(),
            business_address: form.business_address.clone(),
            notes: form.notes.clone(),
        }
    }
}
