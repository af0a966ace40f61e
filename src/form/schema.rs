//! Declarative field schema for the experience editor.
//!
//! Every editable field is enumerated with its default value and validation
//! rules, so the editor, the validator and the tests all read from one
//! definition. Values are kept as strings until submission; the numeric
//! rules imply a parse check.

/// Scalar fields of the experience form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Title,
    ShortDescription,
    Description,
    Location,
    Duration,
    Price,
    Currency,
    MaxParticipants,
    Category,
    Difficulty,
    MeetingPoint,
    CancellationPolicy,
    IsActive,
}

impl Field {
    /// All scalar fields, in form order.
    pub const ALL: [Field; 13] = [
        Field::Title,
        Field::ShortDescription,
        Field::Description,
        Field::Location,
        Field::Duration,
        Field::Price,
        Field::Currency,
        Field::MaxParticipants,
        Field::Category,
        Field::Difficulty,
        Field::MeetingPoint,
        Field::CancellationPolicy,
        Field::IsActive,
    ];

    /// Label used in validation messages.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::ShortDescription => "Short description",
            Field::Description => "Description",
            Field::Location => "Location",
            Field::Duration => "Duration",
            Field::Price => "Price",
            Field::Currency => "Currency",
            Field::MaxParticipants => "Maximum participants",
            Field::Category => "Category",
            Field::Difficulty => "Difficulty",
            Field::MeetingPoint => "Meeting point",
            Field::CancellationPolicy => "Cancellation policy",
            Field::IsActive => "Active",
        }
    }
}

/// Repeatable list fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ArrayField {
    Images,
    Highlights,
    Included,
    Excluded,
    Languages,
}

impl ArrayField {
    /// All list fields, in form order.
    pub const ALL: [ArrayField; 5] = [
        ArrayField::Images,
        ArrayField::Highlights,
        ArrayField::Included,
        ArrayField::Excluded,
        ArrayField::Languages,
    ];
}

/// Currencies the backend accepts.
pub const CURRENCIES: [&str; 6] = ["USD", "EUR", "GBP", "CAD", "AUD", "JPY"];

const CATEGORIES: [&str; 8] = [
    "adventure",
    "cultural",
    "food-drink",
    "nature",
    "historical",
    "entertainment",
    "sports",
    "wellness",
];

const DIFFICULTIES: [&str; 4] = ["easy", "moderate", "challenging", "extreme"];

/// A single validation rule. String rules measure character count; numeric
/// rules additionally require the value to parse as a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    Required,
    MinLen(usize),
    MaxLen(usize),
    Min(f64),
    Max(f64),
    OneOf(&'static [&'static str]),
}

/// Default value and rules for one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub default: &'static str,
    pub rules: &'static [Rule],
}

/// The schema entry for a field.
#[must_use]
pub fn spec(field: Field) -> FieldSpec {
    match field {
        Field::Title => FieldSpec {
            default: "",
            rules: &[Rule::Required, Rule::MinLen(3), Rule::MaxLen(100)],
        },
        Field::ShortDescription => FieldSpec {
            default: "",
            rules: &[Rule::Required, Rule::MinLen(10), Rule::MaxLen(200)],
        },
        Field::Description => FieldSpec {
            default: "",
            rules: &[Rule::Required, Rule::MinLen(50), Rule::MaxLen(2000)],
        },
        Field::Location => FieldSpec {
            default: "",
            rules: &[Rule::Required, Rule::MinLen(3), Rule::MaxLen(100)],
        },
        Field::Duration => FieldSpec {
            default: "1",
            rules: &[Rule::Required, Rule::Min(0.5), Rule::Max(168.0)],
        },
        Field::Price => FieldSpec {
            default: "0",
            rules: &[Rule::Required, Rule::Min(0.0), Rule::Max(10000.0)],
        },
        Field::Currency => FieldSpec {
            default: "USD",
            rules: &[Rule::Required, Rule::OneOf(&CURRENCIES)],
        },
        Field::MaxParticipants => FieldSpec {
            default: "1",
            rules: &[Rule::Required, Rule::Min(1.0), Rule::Max(100.0)],
        },
        Field::Category => FieldSpec {
            default: "adventure",
            rules: &[Rule::Required, Rule::OneOf(&CATEGORIES)],
        },
        Field::Difficulty => FieldSpec {
            default: "easy",
            rules: &[Rule::Required, Rule::OneOf(&DIFFICULTIES)],
        },
        Field::MeetingPoint => FieldSpec {
            default: "",
            rules: &[Rule::Required, Rule::MinLen(10), Rule::MaxLen(200)],
        },
        Field::CancellationPolicy => FieldSpec {
            default: "",
            rules: &[Rule::Required, Rule::MinLen(20), Rule::MaxLen(500)],
        },
        Field::IsActive => FieldSpec {
            default: "true",
            rules: &[],
        },
    }
}

/// Validates one value against a field's rules, returning the first
/// violation message.
#[must_use]
pub fn check(field: Field, value: &str) -> Option<String> {
    let label = field.label();
    let trimmed = value.trim();
    for rule in spec(field).rules {
        match rule {
            Rule::Required => {
                if trimmed.is_empty() {
                    return Some(format!("{label} is required"));
                }
            }
            Rule::MinLen(min) => {
                if !trimmed.is_empty() && trimmed.chars().count() < *min {
                    return Some(format!("{label} is too short"));
                }
            }
            Rule::MaxLen(max) => {
                if trimmed.chars().count() > *max {
                    return Some(format!("{label} is too long"));
                }
            }
            Rule::Min(min) => match trimmed.parse::<f64>() {
                Err(_) if !trimmed.is_empty() => {
                    return Some(format!("{label} must be a number"));
                }
                Ok(n) if n < *min => {
                    return Some(format!("{label} value is too low"));
                }
                _ => {}
            },
            Rule::Max(max) => match trimmed.parse::<f64>() {
                Err(_) if !trimmed.is_empty() => {
                    return Some(format!("{label} must be a number"));
                }
                Ok(n) if n > *max => {
                    return Some(format!("{label} value is too high"));
                }
                _ => {}
            },
            Rule::OneOf(allowed) => {
                if !trimmed.is_empty() && !allowed.contains(&trimmed) {
                    return Some(format!("{label} is invalid"));
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_wins_over_length() {
        assert_eq!(check(Field::Title, "  "), Some("Title is required".to_string()));
    }

    #[test]
    fn length_bounds_are_inclusive() {
        assert_eq!(check(Field::Title, "abc"), None);
        assert_eq!(check(Field::Title, "ab"), Some("Title is too short".to_string()));
        let long = "x".repeat(101);
        assert_eq!(check(Field::Title, &long), Some("Title is too long".to_string()));
    }

    #[test]
    fn numeric_rules_reject_non_numbers() {
        assert_eq!(
            check(Field::Price, "abc"),
            Some("Price must be a number".to_string())
        );
        assert_eq!(
            check(Field::Duration, "0.25"),
            Some("Duration value is too low".to_string())
        );
        assert_eq!(
            check(Field::Price, "10001"),
            Some("Price value is too high".to_string())
        );
        assert_eq!(check(Field::Duration, "0.5"), None);
    }

    #[test]
    fn one_of_rejects_unknown_values() {
        assert_eq!(check(Field::Currency, "USD"), None);
        assert_eq!(
            check(Field::Currency, "BTC"),
            Some("Currency is invalid".to_string())
        );
    }

    #[test]
    fn category_choices_match_the_backend_enum() {
        use crate::domain::Category;
        for cat in Category::ALL {
            assert_eq!(check(Field::Category, cat.as_str()), None);
        }
        assert_eq!(
            check(Field::Category, "educational"),
            Some("Category is invalid".to_string())
        );
    }

    #[test]
    fn inactive_checkbox_has_no_rules() {
        assert_eq!(check(Field::IsActive, ""), None);
    }
}
