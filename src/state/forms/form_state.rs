//! Quote form record, field-change transitions and validation

use super::field::{FieldId, FieldKind, FieldValue};
use crate::error::{FieldError, ValidationError};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Whitespace as browsers define it for `\s`: unlike Unicode `White_Space` it
/// includes U+FEFF and excludes U+0085.
const WHITESPACE: &str =
    r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

lazy_static! {
    static ref EMAIL_PATTERN: Regex = Regex::new(&format!(
        "^[^{WHITESPACE}@]+@[^{WHITESPACE}@]+\\.[^{WHITESPACE}@]+$"
    ))
    .expect("email pattern compiles");
}

/// Result of a field-change event that passed type checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// The value was written
    Applied,
    /// The change would break the deep/regular cleaning coupling and was dropped
    Blocked,
    /// The form is not accepting edits
    Ignored,
}

/// Every value the quote form collects.
///
/// An empty string means "not answered" for both text and choice fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub bedrooms: String,
    pub custom_bedrooms: String,
    pub dens: String,
    pub washrooms: String,
    pub custom_washrooms: String,
    pub bathtubs: String,
    pub custom_bathtubs: String,
    pub powder_rooms: String,
    pub custom_powder_rooms: String,
    pub offices: String,
    pub residence_type: String,
    pub custom_residence_type: String,
    pub central_vacuum: String,
    pub parking: String,
    pub extra_details: String,
    pub deep_cleaning: bool,
    pub regular_cleaning: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text value of a text or choice field; `None` for checkboxes
    pub fn text(&self, field: FieldId) -> Option<&str> {
        let value = match field {
            FieldId::Name => &self.name,
            FieldId::Email => &self.email,
            FieldId::Phone => &self.phone,
            FieldId::Address => &self.address,
            FieldId::Bedrooms => &self.bedrooms,
            FieldId::CustomBedrooms => &self.custom_bedrooms,
            FieldId::Dens => &self.dens,
            FieldId::Washrooms => &self.washrooms,
            FieldId::CustomWashrooms => &self.custom_washrooms,
            FieldId::Bathtubs => &self.bathtubs,
            FieldId::CustomBathtubs => &self.custom_bathtubs,
            FieldId::PowderRooms => &self.powder_rooms,
            FieldId::CustomPowderRooms => &self.custom_powder_rooms,
            FieldId::Offices => &self.offices,
            FieldId::ResidenceType => &self.residence_type,
            FieldId::CustomResidenceType => &self.custom_residence_type,
            FieldId::CentralVacuum => &self.central_vacuum,
            FieldId::Parking => &self.parking,
            FieldId::ExtraDetails => &self.extra_details,
            FieldId::DeepCleaning | FieldId::RegularCleaning => return None,
        };
        Some(value)
    }

    fn text_mut(&mut self, field: FieldId) -> Option<&mut String> {
        let value = match field {
            FieldId::Name => &mut self.name,
            FieldId::Email => &mut self.email,
            FieldId::Phone => &mut self.phone,
            FieldId::Address => &mut self.address,
            FieldId::Bedrooms => &mut self.bedrooms,
            FieldId::CustomBedrooms => &mut self.custom_bedrooms,
            FieldId::Dens => &mut self.dens,
            FieldId::Washrooms => &mut self.washrooms,
            FieldId::CustomWashrooms => &mut self.custom_washrooms,
            FieldId::Bathtubs => &mut self.bathtubs,
            FieldId::CustomBathtubs => &mut self.custom_bathtubs,
            FieldId::PowderRooms => &mut self.powder_rooms,
            FieldId::CustomPowderRooms => &mut self.custom_powder_rooms,
            FieldId::Offices => &mut self.offices,
            FieldId::ResidenceType => &mut self.residence_type,
            FieldId::CustomResidenceType => &mut self.custom_residence_type,
            FieldId::CentralVacuum => &mut self.central_vacuum,
            FieldId::Parking => &mut self.parking,
            FieldId::ExtraDetails => &mut self.extra_details,
            FieldId::DeepCleaning | FieldId::RegularCleaning => return None,
        };
        Some(value)
    }

    /// Checkbox value; `None` for text and choice fields
    pub fn flag(&self, field: FieldId) -> Option<bool> {
        match field {
            FieldId::DeepCleaning => Some(self.deep_cleaning),
            FieldId::RegularCleaning => Some(self.regular_cleaning),
            _ => None,
        }
    }

    /// Whether a field holds a non-empty / checked value
    pub fn is_filled(&self, field: FieldId) -> bool {
        match self.flag(field) {
            Some(checked) => checked,
            None => self.text(field).is_some_and(|v| !v.is_empty()),
        }
    }

    /// Apply a single field-change event as one atomic transition.
    ///
    /// Unchecking regular cleaning while deep cleaning is checked is dropped
    /// before anything is written. Checking deep cleaning also checks regular
    /// cleaning, so `deep_cleaning` implies `regular_cleaning` after every call.
    pub fn apply(&mut self, field: FieldId, value: FieldValue) -> Result<ChangeOutcome, FieldError> {
        match (field.kind(), value) {
            (FieldKind::Flag, FieldValue::Flag(checked)) => {
                if field == FieldId::RegularCleaning && !checked && self.deep_cleaning {
                    return Ok(ChangeOutcome::Blocked);
                }
                match field {
                    FieldId::DeepCleaning => {
                        self.deep_cleaning = checked;
                        if checked {
                            self.regular_cleaning = true;
                        }
                    }
                    _ => self.regular_cleaning = checked,
                }
                Ok(ChangeOutcome::Applied)
            }
            (FieldKind::Flag, FieldValue::Text(_)) => Err(FieldError::WrongKind {
                field,
                given: "text",
            }),
            (_, FieldValue::Flag(_)) => Err(FieldError::WrongKind {
                field,
                given: "checkbox",
            }),
            (FieldKind::Choice(options), FieldValue::Text(text)) => {
                if !text.is_empty() && !options.contains(&text.as_str()) {
                    return Err(FieldError::UnknownOption { field, value: text });
                }
                self.write_text(field, text);
                Ok(ChangeOutcome::Applied)
            }
            (FieldKind::Text { .. }, FieldValue::Text(text)) => {
                self.write_text(field, text);
                Ok(ChangeOutcome::Applied)
            }
        }
    }

    fn write_text(&mut self, field: FieldId, text: String) {
        if let Some(slot) = self.text_mut(field) {
            *slot = text;
        }
    }

    /// Whether the overflow input paired with `field` should be shown.
    ///
    /// Computed from the current selection on every read.
    pub fn shows_overflow(&self, field: FieldId) -> bool {
        match (field.overflow_sentinel(), self.text(field)) {
            (Some(sentinel), Some(value)) => value == sentinel,
            _ => false,
        }
    }

    /// Whether a field is currently part of the form.
    ///
    /// Overflow inputs are only visible while their parent selection is on its sentinel.
    pub fn is_visible(&self, field: FieldId) -> bool {
        field
            .overflow_parent()
            .map_or(true, |parent| self.shows_overflow(parent))
    }

    /// Fields currently shown, in display order
    pub fn visible_fields(&self) -> Vec<FieldId> {
        FieldId::ALL
            .into_iter()
            .filter(|f| self.is_visible(*f))
            .collect()
    }

    /// Check the form before submission, stopping at the first problem.
    ///
    /// Overflow inputs and the custom residence type are not checked even
    /// when their selection is on the sentinel.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(missing) = FieldId::REQUIRED.into_iter().find(|f| !self.is_filled(*f)) {
            return Err(ValidationError::MissingField(missing));
        }

        if !self.deep_cleaning && !self.regular_cleaning {
            return Err(ValidationError::NoCleaningType);
        }

        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(())
    }
}

/// Loose email shape check: `local@domain.tld` without spaces or extra `@`
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::test_support::complete_form;
    use pretty_assertions::assert_eq;

    mod cleaning_flags {
        use super::*;
        use pretty_assertions::assert_eq;

        #[derive(Debug, Clone, Copy)]
        enum Event {
            Deep(bool),
            Regular(bool),
        }

        const EVENTS: [Event; 4] = [
            Event::Deep(true),
            Event::Deep(false),
            Event::Regular(true),
            Event::Regular(false),
        ];

        fn fire(form: &mut FormState, event: Event) {
            let result = match event {
                Event::Deep(v) => form.apply(FieldId::DeepCleaning, v.into()),
                Event::Regular(v) => form.apply(FieldId::RegularCleaning, v.into()),
            };
            assert!(result.is_ok());
        }

        #[test]
        fn test_deep_implies_regular_after_every_transition() {
            // Every sequence of four events
            for n in 0..EVENTS.len().pow(4) {
                let mut form = FormState::default();
                let mut code = n;
                for _ in 0..4 {
                    let event = EVENTS[code % EVENTS.len()];
                    code /= EVENTS.len();
                    fire(&mut form, event);
                    assert!(
                        !form.deep_cleaning || form.regular_cleaning,
                        "invariant broken after {event:?} in sequence {n}"
                    );
                }
            }
        }

        #[test]
        fn test_checking_deep_checks_regular() {
            let mut form = FormState::default();
            let outcome = form.apply(FieldId::DeepCleaning, true.into()).unwrap();
            assert_eq!(outcome, ChangeOutcome::Applied);
            assert!(form.deep_cleaning);
            assert!(form.regular_cleaning);
        }

        #[test]
        fn test_unchecking_regular_while_deep_is_blocked() {
            let mut form = complete_form();
            form.apply(FieldId::DeepCleaning, true.into()).unwrap();
            let before = form.clone();

            let outcome = form.apply(FieldId::RegularCleaning, false.into()).unwrap();

            assert_eq!(outcome, ChangeOutcome::Blocked);
            assert_eq!(form, before);
        }

        #[test]
        fn test_unchecking_deep_keeps_regular() {
            let mut form = FormState::default();
            form.apply(FieldId::DeepCleaning, true.into()).unwrap();
            form.apply(FieldId::DeepCleaning, false.into()).unwrap();
            assert!(!form.deep_cleaning);
            assert!(form.regular_cleaning);

            form.apply(FieldId::RegularCleaning, false.into()).unwrap();
            assert!(!form.regular_cleaning);
        }
    }

    mod field_changes {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_text_field_is_written() {
            let mut form = FormState::default();
            form.apply(FieldId::Name, "Ana".into()).unwrap();
            assert_eq!(form.name, "Ana");
            assert_eq!(form.text(FieldId::Name), Some("Ana"));
        }

        #[test]
        fn test_choice_outside_options_is_rejected() {
            let mut form = FormState::default();
            let err = form.apply(FieldId::Bedrooms, "5+".into()).unwrap_err();
            assert_eq!(
                err,
                FieldError::UnknownOption {
                    field: FieldId::Bedrooms,
                    value: "5+".to_string()
                }
            );
            assert_eq!(form, FormState::default());
        }

        #[test]
        fn test_choice_can_be_cleared() {
            let mut form = complete_form();
            form.apply(FieldId::Bedrooms, "".into()).unwrap();
            assert!(form.bedrooms.is_empty());
        }

        #[test]
        fn test_wrong_kind_is_rejected() {
            let mut form = FormState::default();
            assert!(matches!(
                form.apply(FieldId::DeepCleaning, "yes".into()),
                Err(FieldError::WrongKind { .. })
            ));
            assert!(matches!(
                form.apply(FieldId::Email, true.into()),
                Err(FieldError::WrongKind { .. })
            ));
            assert_eq!(form, FormState::default());
        }

        #[test]
        fn test_flag_accessor_only_for_checkboxes() {
            let form = FormState::default();
            assert_eq!(form.flag(FieldId::DeepCleaning), Some(false));
            assert_eq!(form.flag(FieldId::Name), None);
            assert_eq!(form.text(FieldId::RegularCleaning), None);
        }
    }

    mod overflow {
        use super::*;
        use pretty_assertions::assert_eq;

        fn check(field: FieldId, sentinel: &str, other: &str) {
            let mut form = FormState::default();
            assert!(!form.shows_overflow(field));

            form.apply(field, sentinel.into()).unwrap();
            assert!(form.shows_overflow(field), "{field} = {sentinel}");

            form.apply(field, other.into()).unwrap();
            assert!(!form.shows_overflow(field), "{field} = {other}");
        }

        #[test]
        fn test_bedrooms_sentinel() {
            check(FieldId::Bedrooms, "+5", "4");
        }

        #[test]
        fn test_washrooms_sentinel() {
            check(FieldId::Washrooms, "5+", "1");
        }

        #[test]
        fn test_bathtubs_sentinel() {
            check(FieldId::Bathtubs, "4+", "0");
        }

        #[test]
        fn test_powder_rooms_sentinel() {
            check(FieldId::PowderRooms, "5+", "4");
        }

        #[test]
        fn test_residence_type_sentinel() {
            check(FieldId::ResidenceType, "other", "apartment");
        }

        #[test]
        fn test_every_non_sentinel_option_hides_overflow() {
            for field in FieldId::ALL {
                let (Some(sentinel), FieldKind::Choice(options)) =
                    (field.overflow_sentinel(), field.kind())
                else {
                    continue;
                };
                for option in options.iter().filter(|o| **o != sentinel) {
                    let mut form = FormState::default();
                    form.apply(field, (*option).into()).unwrap();
                    assert!(!form.shows_overflow(field), "{field} = {option}");
                }
            }
        }

        #[test]
        fn test_visible_fields_follow_selection() {
            let mut form = FormState::default();
            assert!(!form.visible_fields().contains(&FieldId::CustomBedrooms));

            form.apply(FieldId::Bedrooms, "+5".into()).unwrap();
            let visible = form.visible_fields();
            let parent = visible.iter().position(|f| *f == FieldId::Bedrooms);
            let child = visible.iter().position(|f| *f == FieldId::CustomBedrooms);
            assert_eq!(child, parent.map(|p| p + 1));
        }

        #[test]
        fn test_fields_without_sentinel_never_show_overflow() {
            let mut form = FormState::default();
            form.apply(FieldId::Dens, "3+".into()).unwrap();
            assert!(!form.shows_overflow(FieldId::Dens));
        }
    }

    mod validation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_complete_form_is_valid() {
            assert_eq!(complete_form().validate(), Ok(()));
        }

        #[test]
        fn test_each_missing_required_field_is_reported() {
            for field in FieldId::REQUIRED {
                let mut form = complete_form();
                form.apply(field, "".into()).unwrap();
                assert_eq!(form.validate(), Err(ValidationError::MissingField(field)));
            }
        }

        #[test]
        fn test_first_missing_field_wins() {
            let form = FormState::default();
            assert_eq!(
                form.validate(),
                Err(ValidationError::MissingField(FieldId::Name))
            );
        }

        #[test]
        fn test_optional_fields_may_be_empty() {
            let form = complete_form();
            assert!(form.dens.is_empty());
            assert!(form.extra_details.is_empty());
            assert!(form.validate().is_ok());
        }

        #[test]
        fn test_requires_a_cleaning_type() {
            let form = FormState {
                regular_cleaning: false,
                ..complete_form()
            };
            assert_eq!(form.validate(), Err(ValidationError::NoCleaningType));
        }

        #[test]
        fn test_cleaning_type_checked_before_email() {
            let form = FormState {
                regular_cleaning: false,
                email: "not-an-email".to_string(),
                ..complete_form()
            };
            assert_eq!(form.validate(), Err(ValidationError::NoCleaningType));
        }

        #[test]
        fn test_invalid_email_is_reported() {
            let form = FormState {
                email: "a@b".to_string(),
                ..complete_form()
            };
            assert_eq!(form.validate(), Err(ValidationError::InvalidEmail));
        }

        #[test]
        fn test_overflow_inputs_are_not_required() {
            let mut form = complete_form();
            form.apply(FieldId::Bedrooms, "+5".into()).unwrap();
            form.apply(FieldId::ResidenceType, "other".into()).unwrap();
            assert!(form.custom_bedrooms.is_empty());
            assert!(form.custom_residence_type.is_empty());
            assert_eq!(form.validate(), Ok(()));
        }

        #[test]
        fn test_email_shapes() {
            assert!(is_valid_email("a@b.co"));
            assert!(is_valid_email("first.last@mail.example.org"));
            assert!(!is_valid_email("a@b"));
            assert!(!is_valid_email("a.com"));
            assert!(!is_valid_email("a@@b.com"));
            assert!(!is_valid_email("a b@c.com"));
            assert!(!is_valid_email(""));
        }

        #[test]
        fn test_email_whitespace_matches_browser_rules() {
            assert!(!is_valid_email("a\u{FEFF}b@c.co"));
            assert!(!is_valid_email("a@b\u{00A0}c.co"));
            assert!(!is_valid_email("a@b.c\u{3000}o"));
            // NEL is not whitespace for browsers
            assert!(is_valid_email("a\u{0085}b@c.co"));
        }
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(complete_form()).unwrap();
        assert_eq!(json["powderRooms"], "1");
        assert_eq!(json["regularCleaning"], true);
        assert_eq!(json["customResidenceType"], "");
    }
}
