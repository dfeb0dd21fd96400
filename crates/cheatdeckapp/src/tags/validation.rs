//! Tag name normalization for cheatsheets.
//!
//! Tags are normalized before they are stored:
//! - Surrounding whitespace is trimmed
//! - Letters are lowercased
//!
//! A normalized tag is valid when, ignoring hyphens (`-`) and underscores
//! (`_`), it is non-empty and entirely alphanumeric. Unicode letters and
//! digits count as alphanumeric.

/// Normalizes a tag name, or explains why it is not acceptable.
///
/// # Examples
/// ```
/// use cheatdeckapp::tags::validation::normalize_tag;
///
/// assert_eq!(normalize_tag("  Docker ").unwrap(), "docker");
/// assert_eq!(normalize_tag("version-control").unwrap(), "version-control");
/// assert_eq!(normalize_tag("snake_case").unwrap(), "snake_case");
///
/// assert!(normalize_tag("").is_err());
/// assert!(normalize_tag("   ").is_err());
/// assert!(normalize_tag("c++").is_err());
/// assert!(normalize_tag("--").is_err());
/// ```
pub fn normalize_tag(name: &str) -> Result<String, TagValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TagValidationError::Empty);
    }

    let normalized = trimmed.to_lowercase();

    let mut saw_alphanumeric = false;
    for ch in normalized.chars() {
        if ch == '-' || ch == '_' {
            continue;
        }
        if !ch.is_alphanumeric() {
            return Err(TagValidationError::InvalidCharacter(ch));
        }
        saw_alphanumeric = true;
    }

    if !saw_alphanumeric {
        return Err(TagValidationError::NoAlphanumeric);
    }

    Ok(normalized)
}

/// Error type for tag name validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValidationError {
    /// Tag name is empty or whitespace only
    Empty,
    /// Tag name contains only separators
    NoAlphanumeric,
    /// Tag name contains an invalid character
    InvalidCharacter(char),
}

impl std::fmt::Display for TagValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagValidationError::Empty => write!(f, "tag name cannot be empty"),
            TagValidationError::NoAlphanumeric => {
                write!(f, "tag name must contain at least one letter or digit")
            }
            TagValidationError::InvalidCharacter(ch) => {
                write!(
                    f,
                    "tag name contains invalid character '{}' (only alphanumeric, underscore, and hyphen allowed)",
                    ch
                )
            }
        }
    }
}

impl std::error::Error for TagValidationError {}
