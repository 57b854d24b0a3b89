use snafu::Snafu;
use std::collections::BTreeMap;

/// Field name to the first rule that field broke.
pub type FieldErrors = BTreeMap<String, ValidationError>;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum ValidationError {
    #[snafu(display("cannot be blank"))]
    Required,
    #[snafu(display("the length must be no more than {max}"))]
    TooLong { max: usize },
    #[snafu(display("must be a valid email address"))]
    InvalidEmail,
    #[snafu(display("must be a valid phone number"))]
    InvalidPhone,
}

pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// Uppercases the first character, so `name` becomes `Name` to match the posted form keys.
pub fn capitalise(field: &str) -> String {
    let mut chars = field.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Accepts 7-15 digits with an optional leading `+`. Spaces and dashes are ignored.
pub fn is_valid_phone(phone: &str) -> bool {
    let phone = phone.trim();
    let digits = phone.strip_prefix('+').unwrap_or(phone);

    let mut count = 0;
    for c in digits.chars().filter(|c| !matches!(c, ' ' | '-')) {
        if !c.is_ascii_digit() {
            return false;
        }
        count += 1;
    }

    (7..=15).contains(&count)
}
