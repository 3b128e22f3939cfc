// Contact form state for one share-dialog session

use serde::{Deserialize, Serialize};

/// Everything a visitor can type into the share dialog. Plain value type: a new session starts
/// from `ContactForm::default()` and nothing is merged across sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub designation: String,
    pub business_name: String,
    pub business_phone: String,
    pub website: String,
    pub business_category: String,
    pub business_address: String,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    FullName,
    Email,
    Phone,
    Designation,
    BusinessName,
    BusinessPhone,
    Website,
    BusinessCategory,
    BusinessAddress,
    Notes,
}

impl ContactField {
    /// Primary fieldset, in display order.
    pub const PRIMARY: [ContactField; 4] = [
        ContactField::FullName,
        ContactField::Email,
        ContactField::Phone,
        ContactField::Designation,
    ];

    /// "Additional Details" fieldset, in display order.
    pub const ADDITIONAL: [ContactField; 6] = [
        ContactField::BusinessName,
        ContactField::BusinessPhone,
        ContactField::Website,
        ContactField::BusinessCategory,
        ContactField::BusinessAddress,
        ContactField::Notes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContactField::FullName => "Full Name",
            ContactField::Email => "Email",
            ContactField::Phone => "Phone Number",
            ContactField::Designation => "Designation",
            ContactField::BusinessName => "Business Name",
            ContactField::BusinessPhone => "Business Phone",
            ContactField::Website => "Website",
            ContactField::BusinessCategory => "Business Category",
            ContactField::BusinessAddress => "Business Address",
            ContactField::Notes => "Notes",
        }
    }

    /// Input-level required marker. The controller still enforces the rule on submit.
    pub fn is_required(&self) -> bool {
        matches!(self, ContactField::FullName | ContactField::Phone)
    }

    pub fn is_additional(&self) -> bool {
        Self::ADDITIONAL.contains(self)
    }

    pub fn is_phone(&self) -> bool {
        matches!(self, ContactField::Phone | ContactField::BusinessPhone)
    }

    /// Multi-line text areas in the dialog.
    pub fn is_multiline(&self) -> bool {
        matches!(self, ContactField::BusinessAddress | ContactField::Notes)
    }
}

impl ContactForm {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::FullName => &self.full_name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::Designation => &self.designation,
            ContactField::BusinessName => &self.business_name,
            ContactField::BusinessPhone => &self.business_phone,
            ContactField::Website => &self.website,
            ContactField::BusinessCategory => &self.business_category,
            ContactField::BusinessAddress => &self.business_address,
            ContactField::Notes => &self.notes,
        }
    }

    pub fn get_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::FullName => &mut self.full_name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::Designation => &mut self.designation,
            ContactField::BusinessName => &mut self.business_name,
            ContactField::BusinessPhone => &mut self.business_phone,
            ContactField::Website => &mut self.website,
            ContactField::BusinessCategory => &mut self.business_category,
            ContactField::BusinessAddress => &mut self.business_address,
            ContactField::Notes => &mut self.notes,
        }
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }

    pub fn is_empty(&self) -> bool {
        *self == ContactForm::default()
    }
}
