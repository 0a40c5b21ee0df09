use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnknownProfileField;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl $name {
            pub fn next(self) -> Self {
                Self(self.0.wrapping_add(1))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(SubmissionId);

/// The editable profile shown by the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub receive_newsletter: bool,
}

impl ProfileRecord {
    pub fn text(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::FirstName => &self.first_name,
            ProfileField::LastName => &self.last_name,
            ProfileField::PhoneNumber => &self.phone_number,
        }
    }

    pub fn set_text(&mut self, field: ProfileField, value: impl Into<String>) {
        let slot = match field {
            ProfileField::FirstName => &mut self.first_name,
            ProfileField::LastName => &mut self.last_name,
            ProfileField::PhoneNumber => &mut self.phone_number,
        };
        *slot = value.into();
    }
}

/// Text fields that take part in validation. `receiveNewsletter` has no
/// variant; it never carries an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    FirstName,
    LastName,
    PhoneNumber,
}

impl ProfileField {
    pub const ALL: [ProfileField; 3] = [
        ProfileField::FirstName,
        ProfileField::LastName,
        ProfileField::PhoneNumber,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ProfileField::FirstName => "firstName",
            ProfileField::LastName => "lastName",
            ProfileField::PhoneNumber => "phoneNumber",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::FirstName => "First name:",
            ProfileField::LastName => "Last name:",
            ProfileField::PhoneNumber => "Phone number:",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ProfileField {
    type Err = UnknownProfileField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileField::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| UnknownProfileField(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub message: String,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Field-level errors keyed by validated field. One slot per field keeps the
/// key set closed over `ProfileField`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<FieldError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<FieldError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<FieldError>,
}

impl ErrorSet {
    pub fn get(&self, field: ProfileField) -> Option<&FieldError> {
        match field {
            ProfileField::FirstName => self.first_name.as_ref(),
            ProfileField::LastName => self.last_name.as_ref(),
            ProfileField::PhoneNumber => self.phone_number.as_ref(),
        }
    }

    pub fn insert(&mut self, field: ProfileField, error: FieldError) {
        let slot = match field {
            ProfileField::FirstName => &mut self.first_name,
            ProfileField::LastName => &mut self.last_name,
            ProfileField::PhoneNumber => &mut self.phone_number,
        };
        *slot = Some(error);
    }

    pub fn message(&self, field: ProfileField) -> Option<&str> {
        self.get(field).map(|error| error.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProfileField, &FieldError)> + '_ {
        ProfileField::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|error| (field, error)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
