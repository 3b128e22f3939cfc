// Share dialog session
//
// One `ShareFormDialog` value exists per open dialog. It owns the form, the disclosure toggle and
// the scroll lock; dropping it is the full reset.

use thiserror::Error;

use super::form::{ContactField, ContactForm};
use super::scroll_lock::{ScrollHost, ScrollLockGuard};
use crate::utils::validation::{is_international_phone, is_phone_input_char, is_plausible_email};

/// Input-level problem that blocks a submission before it is handed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputProblem {
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please enter {} in international format, e.g. +91 98765 43210.", .0.label())]
    InvalidPhone(ContactField),
}

#[derive(Debug)]
pub struct ShareFormDialog {
    form: ContactForm,
    show_additional: bool,
    _scroll_lock: ScrollLockGuard,
}

impl ShareFormDialog {
    pub const TITLE: &'static str = "Share Your Information";
    pub const DESCRIPTION: &'static str =
        "Provide your details below. Fields marked with * are required.";

    /// Start a session with an empty form; locks background scrolling until dropped.
    pub fn open(host: &ScrollHost) -> Self {
        Self {
            form: ContactForm::default(),
            show_additional: false,
            _scroll_lock: host.lock(),
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Dial prefix put in front of a phone number typed without one.
    pub const DEFAULT_DIAL_PREFIX: &'static str = "+91";

    /// Replace a field's value. Phone fields drop characters a phone input would not accept.
    pub fn update(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        if field.is_phone() {
            self.form
                .set(field, value.chars().filter(|c| is_phone_input_char(*c)).collect::<String>());
        } else {
            self.form.set(field, value);
        }
    }

    /// Type one character into `field`. Returns false when the field refuses it.
    ///
    /// Phone fields take digits, spaces and a single leading `+`; a digit typed into an empty
    /// phone field starts from `DEFAULT_DIAL_PREFIX`.
    pub fn input_char(&mut self, field: ContactField, c: char) -> bool {
        let value = self.form.get_mut(field);
        if field.is_phone() {
            if !is_phone_input_char(c) || (c == '+' && !value.is_empty()) {
                return false;
            }
            if value.is_empty() && c.is_ascii_digit() {
                value.push_str(Self::DEFAULT_DIAL_PREFIX);
                value.push(' ');
            }
        }
        value.push(c);
        true
    }

    pub fn backspace(&mut self, field: ContactField) {
        self.form.get_mut(field).pop();
    }

    /// Shape checks the inputs themselves enforce: email when given, phone numbers when given.
    pub fn check_inputs(&self) -> Result<(), InputProblem> {
        if !is_plausible_email(&self.form.email) {
            return Err(InputProblem::InvalidEmail);
        }
        for field in [ContactField::Phone, ContactField::BusinessPhone] {
            if !is_international_phone(self.form.get(field)) {
                return Err(InputProblem::InvalidPhone(field));
            }
        }
        Ok(())
    }

    pub fn show_additional(&self) -> bool {
        self.show_additional
    }

    /// Show/hide the business fieldset. Values typed there are kept (and submitted) either way.
    pub fn toggle_additional(&mut self) {
        self.show_additional = !self.show_additional;
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.show_additional {
            "Hide Additional Details"
        } else {
            "Add More Details"
        }
    }

    /// Fields currently on screen, in display order.
    pub fn visible_fields(&self) -> Vec<ContactField> {
        let mut fields = ContactField::PRIMARY.to_vec();
        if self.show_additional {
            fields.extend_from_slice(&ContactField::ADDITIONAL);
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_starts_empty_and_locks_scroll() {
        let host = ScrollHost::new();
        let dialog = ShareFormDialog::open(&host);
        assert!(dialog.form().is_empty());
        assert!(!dialog.show_additional());
        assert!(host.is_locked());

        drop(dialog);
        assert!(!host.is_locked());
    }

    #[test]
    fn toggling_twice_restores_visibility_and_keeps_values() {
        let host = ScrollHost::new();
        let mut dialog = ShareFormDialog::open(&host);

        dialog.toggle_additional();
        assert!(dialog.show_additional());
        dialog.update(ContactField::BusinessName, "Rao Traders");
        dialog.update(ContactField::Website, "https://rao.example");

        dialog.toggle_additional();
        assert!(!dialog.show_additional());
        assert_eq!(dialog.form().business_name, "Rao Traders");
        assert_eq!(dialog.form().website, "https://rao.example");
    }

    #[test]
    fn visible_fields_follow_disclosure() {
        let host = ScrollHost::new();
        let mut dialog = ShareFormDialog::open(&host);
        assert_eq!(dialog.visible_fields().len(), 4);
        assert_eq!(dialog.toggle_label(), "Add More Details");

        dialog.toggle_additional();
        assert_eq!(dialog.visible_fields().len(), 10);
        assert_eq!(dialog.visible_fields()[4], ContactField::BusinessName);
        assert_eq!(dialog.toggle_label(), "Hide Additional Details");
    }

    #[test]
    fn typed_characters_land_in_the_canonical_form() {
        let host = ScrollHost::new();
        let mut dialog = ShareFormDialog::open(&host);
        for c in "Janet".chars() {
            assert!(dialog.input_char(ContactField::FullName, c));
        }
        dialog.backspace(ContactField::FullName);
        assert_eq!(dialog.form().full_name, "Jane");
    }

    #[test]
    fn phone_input_refuses_letters_and_inner_plus() {
        let host = ScrollHost::new();
        let mut dialog = ShareFormDialog::open(&host);
        assert!(dialog.input_char(ContactField::Phone, '+'));
        assert!(dialog.input_char(ContactField::Phone, '1'));
        assert!(!dialog.input_char(ContactField::Phone, 'a'));
        assert!(!dialog.input_char(ContactField::Phone, '+'));
        assert!(!dialog.input_char(ContactField::Phone, '-'));
        assert_eq!(dialog.form().phone, "+1");

        dialog.update(ContactField::BusinessPhone, "abc +44 (20) 7946");
        assert_eq!(dialog.form().business_phone, " +44 20 7946");
    }

    #[test]
    fn digit_in_empty_phone_starts_from_default_prefix() {
        let host = ScrollHost::new();
        let mut dialog = ShareFormDialog::open(&host);
        for c in "98765".chars() {
            dialog.input_char(ContactField::Phone, c);
        }
        assert_eq!(dialog.form().phone, "+91 98765");
        assert_eq!(dialog.check_inputs(), Ok(()));
    }

    #[test]
    fn check_inputs_flags_malformed_email_and_phone() {
        let host = ScrollHost::new();
        let mut dialog = ShareFormDialog::open(&host);
        assert_eq!(dialog.check_inputs(), Ok(()));

        dialog.update(ContactField::Email, "not-an-email");
        assert_eq!(dialog.check_inputs(), Err(InputProblem::InvalidEmail));
        dialog.update(ContactField::Email, "jane@example.com");

        dialog.update(ContactField::Phone, "98765 43210");
        assert_eq!(
            dialog.check_inputs(),
            Err(InputProblem::InvalidPhone(ContactField::Phone))
        );
        dialog.update(ContactField::Phone, "+91 98765 43210");

        dialog.update(ContactField::BusinessPhone, "+");
        assert_eq!(
            dialog.check_inputs(),
            Err(InputProblem::InvalidPhone(ContactField::BusinessPhone))
        );
        dialog.update(ContactField::BusinessPhone, "");
        assert_eq!(dialog.check_inputs(), Ok(()));
    }
}
