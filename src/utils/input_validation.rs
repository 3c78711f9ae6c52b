//! Field-level validation rules for authors and posts.
//!
//! Shape checks are pure functions of the incoming value. The only rule that
//! needs the record store, author name uniqueness, receives it explicitly
//! through [`AuthorLookup`].

use derive_more::derive::Display;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;
use thiserror::Error;

use crate::models::AuthorID;

/// Minimum number of characters in a post body
pub const MIN_CONTENT_LENGTH: usize = 250;
/// Maximum number of characters in a post summary
pub const MAX_SUMMARY_LENGTH: usize = 250;
/// Exact number of digits in a phone number
pub const PHONE_NUMBER_LENGTH: usize = 10;
/// A post title must contain at least one of these
pub const CLICKBAIT_KEYWORDS: [&str; 4] = ["Won't Believe", "Secret", "Top", "Guess"];

static DIGITS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("Failed to compile digits regex"));

/// A field that failed its contract. The message is meant for end users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Author name cannot be empty.")]
    EmptyAuthorName,
    #[error("An author with this name already exists.")]
    DuplicateAuthorName,
    #[error("Phone number must be a number.")]
    PhoneNotNumeric,
    #[error("Phone number must have 10 digits.")]
    PhoneWrongLength,
    #[error("Post title cannot be empty.")]
    EmptyTitle,
    #[error("Title must contain one of the following: 'Won't Believe', 'Secret', 'Top', 'Guess'.")]
    TitleNotClickbait,
    #[error("Post content cannot be empty.")]
    EmptyContent,
    #[error("Post content cannot be less than 250.")]
    ContentTooShort,
    #[error("Post summary cannot be empty.")]
    EmptySummary,
    #[error("Post summary cannot be more than 250.")]
    SummaryTooLong,
    #[error("Post category must be either Fiction or Non-Fiction.")]
    InvalidCategory,
}

/// Read-only view of the record store used by the name uniqueness rule.
pub trait AuthorLookup {
    fn find_author_by_name(&self, name: &str) -> Option<AuthorID>;
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Wrapper type for an author name that has been validated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Display)]
pub struct AuthorName(String);

impl AuthorName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Checks that the name is present and not already taken in `store`.
/// The value is kept as given, surrounding whitespace included.
pub fn validate_name(
    store: &impl AuthorLookup,
    value: &str,
) -> Result<AuthorName, ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::EmptyAuthorName);
    }

    if store.find_author_by_name(value).is_some() {
        return Err(ValidationError::DuplicateAuthorName);
    }

    Ok(AuthorName(value.to_owned()))
}

/// Wrapper type for a phone number that has been validated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Display)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A blank phone number means "no phone number" and is not an error.
pub fn validate_phone_number(value: &str) -> Result<Option<PhoneNumber>, ValidationError> {
    if is_blank(value) {
        return Ok(None);
    }

    if !DIGITS_REGEX.is_match(value) {
        return Err(ValidationError::PhoneNotNumeric);
    }

    if value.chars().count() != PHONE_NUMBER_LENGTH {
        return Err(ValidationError::PhoneWrongLength);
    }

    Ok(Some(PhoneNumber(value.to_owned())))
}

/// Wrapper type for a post title that has been validated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Display)]
pub struct PostTitle(String);

impl PostTitle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Presence and clickbait keyword in a single rule
pub fn validate_title(value: &str) -> Result<PostTitle, ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::EmptyTitle);
    }

    if !CLICKBAIT_KEYWORDS.iter().any(|keyword| value.contains(keyword)) {
        return Err(ValidationError::TitleNotClickbait);
    }

    Ok(PostTitle(value.to_owned()))
}

/// Wrapper type for a post body that has been validated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Display)]
pub struct PostContent(String);

impl PostContent {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn validate_content(value: &str) -> Result<PostContent, ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::EmptyContent);
    }

    if value.chars().count() < MIN_CONTENT_LENGTH {
        return Err(ValidationError::ContentTooShort);
    }

    Ok(PostContent(value.to_owned()))
}

/// Wrapper type for a post summary that has been validated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Display)]
pub struct PostSummary(String);

impl PostSummary {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn validate_summary(value: &str) -> Result<PostSummary, ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::EmptySummary);
    }

    if value.chars().count() > MAX_SUMMARY_LENGTH {
        return Err(ValidationError::SummaryTooLong);
    }

    Ok(PostSummary(value.to_owned()))
}

/// The two categories a post may be filed under
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumIter, Display,
)]
pub enum Category {
    #[display("Fiction")]
    Fiction,
    #[display("Non-Fiction")]
    #[serde(rename = "Non-Fiction")]
    NonFiction,
}

impl TryFrom<&str> for Category {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        validate_category(value)
    }
}

/// Exact, case-sensitive match only
pub fn validate_category(value: &str) -> Result<Category, ValidationError> {
    match value {
        "Fiction" => Ok(Category::Fiction),
        "Non-Fiction" => Ok(Category::NonFiction),
        _ => Err(ValidationError::InvalidCategory),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Store stand-in holding only names
    struct Names(HashMap<String, AuthorID>);

    impl Names {
        fn with(names: &[&str]) -> Self {
            Self(
                names
                    .iter()
                    .enumerate()
                    .map(|(i, n)| (n.to_string(), AuthorID::from(i as u64 + 1)))
                    .collect(),
            )
        }
    }

    impl AuthorLookup for Names {
        fn find_author_by_name(&self, name: &str) -> Option<AuthorID> {
            self.0.get(name).copied()
        }
    }

    mod author_name_tests {
        use super::*;

        #[test]
        fn test_valid_names() {
            let store = Names::with(&["Ursula K. Le Guin"]);
            let valid_cases = vec!["Octavia Butler", "bell hooks", "X", "Ursula Le Guin"];

            for name in valid_cases {
                let result = validate_name(&store, name);
                assert!(
                    matches!(&result, Ok(accepted) if accepted.as_str() == name),
                    "Valid name {} was rejected !",
                    name
                );
            }
        }

        #[test]
        fn test_blank_names() {
            let store = Names::with(&[]);
            for name in vec!["", " ", "\t\n"] {
                assert_eq!(
                    validate_name(&store, name),
                    Err(ValidationError::EmptyAuthorName),
                    "Blank name {:?} was accepted !",
                    name
                );
            }
        }

        #[test]
        fn test_duplicate_name() {
            let store = Names::with(&["Octavia Butler", "N. K. Jemisin"]);
            assert_eq!(
                validate_name(&store, "Octavia Butler"),
                Err(ValidationError::DuplicateAuthorName)
            );
            assert_eq!(
                validate_name(&store, "N. K. Jemisin"),
                Err(ValidationError::DuplicateAuthorName)
            );
        }

        #[test]
        fn test_name_kept_untrimmed() {
            let store = Names::with(&[]);
            let name = validate_name(&store, "  Spaced  ").unwrap();
            assert_eq!(name.as_str(), "  Spaced  ");
        }
    }

    mod phone_number_tests {
        use super::*;

        #[test]
        fn test_blank_phone_is_absent() {
            for phone in vec!["", "   "] {
                assert_eq!(validate_phone_number(phone), Ok(None));
            }
        }

        #[test]
        fn test_invalid_phone_numbers() {
            let invalid_cases = vec![
                ("12345", ValidationError::PhoneWrongLength),
                ("12345678901", ValidationError::PhoneWrongLength),
                ("12345abcde", ValidationError::PhoneNotNumeric),
                ("123-456-7890", ValidationError::PhoneNotNumeric),
                (" 1234567890", ValidationError::PhoneNotNumeric),
                ("+123456789", ValidationError::PhoneNotNumeric),
            ];

            for (phone, expected) in invalid_cases {
                assert_eq!(
                    validate_phone_number(phone),
                    Err(expected),
                    "Phone number {} gave an unexpected result",
                    phone
                );
            }
        }

        #[test]
        fn test_valid_phone_number() {
            let phone = validate_phone_number("1234567890").unwrap().unwrap();
            assert_eq!(phone.as_str(), "1234567890");
        }
    }

    mod post_tests {
        use super::*;

        #[test]
        fn test_titles() {
            let test_cases = vec![
                ("", Err(ValidationError::EmptyTitle)),
                ("   ", Err(ValidationError::EmptyTitle)),
                ("Top 10 Facts", Ok(())),
                ("You Won't Believe This", Ok(())),
                ("The Secret Garden", Ok(())),
                ("Guess Who", Ok(())),
                ("A Day in the Life", Err(ValidationError::TitleNotClickbait)),
                ("top 10 facts", Err(ValidationError::TitleNotClickbait)),
            ];

            for (title, expected) in test_cases {
                assert_eq!(
                    validate_title(title).map(|_| ()),
                    expected,
                    "Title '{}' validation result was unexpected",
                    title
                );
            }
        }

        #[test]
        fn test_content_length_boundaries() {
            assert_eq!(
                validate_content(&"a".repeat(MIN_CONTENT_LENGTH - 1)),
                Err(ValidationError::ContentTooShort)
            );
            assert!(validate_content(&"a".repeat(MIN_CONTENT_LENGTH)).is_ok());
            assert_eq!(
                validate_content(&" ".repeat(300)),
                Err(ValidationError::EmptyContent)
            );
        }

        #[test]
        fn test_content_counts_characters() {
            // 250 characters, 500 bytes
            assert!(validate_content(&"é".repeat(MIN_CONTENT_LENGTH)).is_ok());
        }

        #[test]
        fn test_summary_length_boundaries() {
            assert_eq!(
                validate_summary(&"a".repeat(MAX_SUMMARY_LENGTH + 1)),
                Err(ValidationError::SummaryTooLong)
            );
            assert!(validate_summary(&"a".repeat(MAX_SUMMARY_LENGTH)).is_ok());
            assert!(validate_summary(&"é".repeat(MAX_SUMMARY_LENGTH)).is_ok());
            assert_eq!(validate_summary("\n"), Err(ValidationError::EmptySummary));
        }

        #[test]
        fn test_categories() {
            assert_eq!(validate_category("Fiction"), Ok(Category::Fiction));
            assert_eq!(validate_category("Non-Fiction"), Ok(Category::NonFiction));

            for category in vec!["Drama", "fiction", "Nonfiction", "", " Fiction"] {
                assert_eq!(
                    Category::try_from(category),
                    Err(ValidationError::InvalidCategory),
                    "Category {:?} was accepted !",
                    category
                );
            }
        }

        #[test]
        fn test_category_display_and_serde() {
            assert_eq!(Category::NonFiction.to_string(), "Non-Fiction");
            assert_eq!(
                serde_json::to_string(&Category::NonFiction).unwrap(),
                "\"Non-Fiction\""
            );
            let parsed: Category = serde_json::from_str("\"Fiction\"").unwrap();
            assert_eq!(parsed, Category::Fiction);
        }

        #[test]
        fn test_error_messages() {
            assert_eq!(
                ValidationError::ContentTooShort.to_string(),
                "Post content cannot be less than 250."
            );
            assert_eq!(
                ValidationError::PhoneWrongLength.to_string(),
                "Phone number must have 10 digits."
            );
        }

        #[test]
        fn test_title_message_lists_keywords() {
            let message = validate_title("A Day in the Life").unwrap_err().to_string();
            assert_eq!(
                message,
                "Title must contain one of the following: 'Won't Believe', 'Secret', 'Top', 'Guess'."
            );
            for keyword in CLICKBAIT_KEYWORDS {
                assert!(message.contains(keyword), "Keyword {} missing from message", keyword);
            }
        }
    }
}
