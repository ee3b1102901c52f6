//! Quote form domain layer
//!
//! Field identities and option sets live in `field`; the form record with its
//! change transitions and validation lives in `form_state`.

mod field;
mod form_state;

pub use field::{option_label, FieldId, FieldKind, FieldValue};
pub use form_state::{ChangeOutcome, FormState};

#[cfg(test)]
pub(crate) mod test_support {
    use super::FormState;

    /// A form that passes validation
    pub fn complete_form() -> FormState {
        FormState {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "416-555-0100".to_string(),
            address: "12 Maple Ave".to_string(),
            bedrooms: "3".to_string(),
            washrooms: "2".to_string(),
            bathtubs: "1".to_string(),
            powder_rooms: "1".to_string(),
            offices: "0".to_string(),
            residence_type: "townhouse".to_string(),
            central_vacuum: "no".to_string(),
            parking: "yes".to_string(),
            regular_cleaning: true,
            ..Default::default()
        }
    }
}
