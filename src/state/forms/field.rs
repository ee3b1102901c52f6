//! Form field identities, values and option sets

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bedroom counts offered by the form
pub const BEDROOM_OPTIONS: &[&str] = &["1", "2", "3", "4", "+5"];
/// Washroom counts offered by the form
pub const WASHROOM_OPTIONS: &[&str] = &["1", "2", "3", "4", "5+"];
/// Bathtub counts offered by the form
pub const BATHTUB_OPTIONS: &[&str] = &["0", "1", "2", "3", "4+"];
/// Powder room counts offered by the form
pub const POWDER_ROOM_OPTIONS: &[&str] = &["0", "1", "2", "3", "4", "5+"];
/// Den and office counts share the same option set
pub const SMALL_ROOM_OPTIONS: &[&str] = &["0", "1", "2", "3+"];
pub const RESIDENCE_OPTIONS: &[&str] = &[
    "2story-basement",
    "2story-no-basement",
    "bungalow-basement",
    "bungalow-main",
    "townhouse",
    "apartment",
    "other",
];
pub const CENTRAL_VACUUM_OPTIONS: &[&str] = &["yes", "no"];
pub const PARKING_OPTIONS: &[&str] = &["yes", "no-cover"];

/// Identity of every field in the quote form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    Name,
    Email,
    Phone,
    Address,
    Bedrooms,
    CustomBedrooms,
    Dens,
    Washrooms,
    CustomWashrooms,
    Bathtubs,
    CustomBathtubs,
    PowderRooms,
    CustomPowderRooms,
    Offices,
    ResidenceType,
    CustomResidenceType,
    CentralVacuum,
    Parking,
    ExtraDetails,
    DeepCleaning,
    RegularCleaning,
}

/// How a field accepts input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, optionally multiline
    Text { multiline: bool },
    /// One value out of a fixed option set
    Choice(&'static [&'static str]),
    /// Checkbox
    Flag,
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl FieldId {
    /// Every field in display order
    pub const ALL: [FieldId; 21] = [
        FieldId::Name,
        FieldId::Email,
        FieldId::Phone,
        FieldId::Address,
        FieldId::Bedrooms,
        FieldId::CustomBedrooms,
        FieldId::Dens,
        FieldId::Washrooms,
        FieldId::CustomWashrooms,
        FieldId::Bathtubs,
        FieldId::CustomBathtubs,
        FieldId::PowderRooms,
        FieldId::CustomPowderRooms,
        FieldId::Offices,
        FieldId::ResidenceType,
        FieldId::CustomResidenceType,
        FieldId::CentralVacuum,
        FieldId::Parking,
        FieldId::ExtraDetails,
        FieldId::DeepCleaning,
        FieldId::RegularCleaning,
    ];

    /// Fields that must be filled before a quote can be submitted, in check order
    pub const REQUIRED: [FieldId; 12] = [
        FieldId::Name,
        FieldId::Email,
        FieldId::Phone,
        FieldId::Address,
        FieldId::Bedrooms,
        FieldId::Washrooms,
        FieldId::Bathtubs,
        FieldId::PowderRooms,
        FieldId::Offices,
        FieldId::ResidenceType,
        FieldId::CentralVacuum,
        FieldId::Parking,
    ];

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldId::Bedrooms => FieldKind::Choice(BEDROOM_OPTIONS),
            FieldId::Washrooms => FieldKind::Choice(WASHROOM_OPTIONS),
            FieldId::Bathtubs => FieldKind::Choice(BATHTUB_OPTIONS),
            FieldId::PowderRooms => FieldKind::Choice(POWDER_ROOM_OPTIONS),
            FieldId::Dens | FieldId::Offices => FieldKind::Choice(SMALL_ROOM_OPTIONS),
            FieldId::ResidenceType => FieldKind::Choice(RESIDENCE_OPTIONS),
            FieldId::CentralVacuum => FieldKind::Choice(CENTRAL_VACUUM_OPTIONS),
            FieldId::Parking => FieldKind::Choice(PARKING_OPTIONS),
            FieldId::DeepCleaning | FieldId::RegularCleaning => FieldKind::Flag,
            FieldId::ExtraDetails => FieldKind::Text { multiline: true },
            _ => FieldKind::Text { multiline: false },
        }
    }

    /// The selection value that unlocks this field's overflow input.
    ///
    /// Compared as an exact string: "+5" and "5+" are different sentinels.
    pub fn overflow_sentinel(&self) -> Option<&'static str> {
        match self {
            FieldId::Bedrooms => Some("+5"),
            FieldId::Washrooms | FieldId::PowderRooms => Some("5+"),
            FieldId::Bathtubs => Some("4+"),
            FieldId::ResidenceType => Some("other"),
            _ => None,
        }
    }

    /// The free-text field unlocked by this field's sentinel
    pub fn overflow_field(&self) -> Option<FieldId> {
        match self {
            FieldId::Bedrooms => Some(FieldId::CustomBedrooms),
            FieldId::Washrooms => Some(FieldId::CustomWashrooms),
            FieldId::Bathtubs => Some(FieldId::CustomBathtubs),
            FieldId::PowderRooms => Some(FieldId::CustomPowderRooms),
            FieldId::ResidenceType => Some(FieldId::CustomResidenceType),
            _ => None,
        }
    }

    /// The selection field an overflow input belongs to
    pub fn overflow_parent(&self) -> Option<FieldId> {
        match self {
            FieldId::CustomBedrooms => Some(FieldId::Bedrooms),
            FieldId::CustomWashrooms => Some(FieldId::Washrooms),
            FieldId::CustomBathtubs => Some(FieldId::Bathtubs),
            FieldId::CustomPowderRooms => Some(FieldId::PowderRooms),
            FieldId::CustomResidenceType => Some(FieldId::ResidenceType),
            _ => None,
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }

    /// Wire name, as used in the submitted payload
    pub fn key(&self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Email => "email",
            FieldId::Phone => "phone",
            FieldId::Address => "address",
            FieldId::Bedrooms => "bedrooms",
            FieldId::CustomBedrooms => "customBedrooms",
            FieldId::Dens => "dens",
            FieldId::Washrooms => "washrooms",
            FieldId::CustomWashrooms => "customWashrooms",
            FieldId::Bathtubs => "bathtubs",
            FieldId::CustomBathtubs => "customBathtubs",
            FieldId::PowderRooms => "powderRooms",
            FieldId::CustomPowderRooms => "customPowderRooms",
            FieldId::Offices => "offices",
            FieldId::ResidenceType => "residenceType",
            FieldId::CustomResidenceType => "customResidenceType",
            FieldId::CentralVacuum => "centralVacuum",
            FieldId::Parking => "parking",
            FieldId::ExtraDetails => "extraDetails",
            FieldId::DeepCleaning => "deepCleaning",
            FieldId::RegularCleaning => "regularCleaning",
        }
    }

    /// Label shown next to the input, without the required marker
    pub fn label(&self) -> &'static str {
        match self {
            FieldId::Name => "Name",
            FieldId::Email => "Email Address",
            FieldId::Phone => "Phone Number",
            FieldId::Address => "Address",
            FieldId::Bedrooms => "How many bedrooms are there?",
            FieldId::CustomBedrooms => "Number of bedrooms",
            FieldId::Dens => "How many dens are there?",
            FieldId::Washrooms => "How many washrooms are there?",
            FieldId::CustomWashrooms => "Number of washrooms",
            FieldId::Bathtubs => "How many bathtubs are there?",
            FieldId::CustomBathtubs => "Number of bathtubs",
            FieldId::PowderRooms => "How many powder rooms are there?",
            FieldId::CustomPowderRooms => "Number of powder rooms",
            FieldId::Offices => "How many offices are there?",
            FieldId::ResidenceType => "What type of residence is it?",
            FieldId::CustomResidenceType => "Residence type",
            FieldId::CentralVacuum => "Do you have a central vacuum?",
            FieldId::Parking => "Is there parking available?",
            FieldId::ExtraDetails => "Extra details",
            FieldId::DeepCleaning => "Deep Cleaning",
            FieldId::RegularCleaning => "Regular Cleaning",
        }
    }

    /// Hint shown while the input is empty
    pub fn placeholder(&self) -> &'static str {
        match self {
            FieldId::Name => "Your full name",
            FieldId::Email => "Your email address",
            FieldId::Phone => "Your phone number",
            FieldId::Address => "Your complete address",
            FieldId::CustomBedrooms
            | FieldId::CustomWashrooms
            | FieldId::CustomBathtubs
            | FieldId::CustomPowderRooms => "Enter the exact number",
            FieldId::CustomResidenceType => "Describe your residence",
            FieldId::ExtraDetails => {
                "Pets (extra fur!), lots of mirrors or glass, or anything else needing special care..."
            }
            _ => "Select an option",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Human-readable text for a choice option
pub fn option_label(value: &str) -> &str {
    match value {
        "2story-basement" => "2-story with basement",
        "2story-no-basement" => "2-story without basement",
        "bungalow-basement" => "Bungalow with basement",
        "bungalow-main" => "Bungalow (main floor only)",
        "townhouse" => "Townhouse",
        "apartment" => "Apartment / Condo",
        "other" => "Other",
        "yes" => "Yes",
        "no" => "No",
        "no-cover" => "No, but I will cover any parking fees",
        other => other,
    }
}
