//! Project name normalisation.

use crate::error::TypeError;

/// Longest accepted project name, in characters.
pub const MAX_PROJECT_NAME_LEN: usize = 200;

/// Trim a raw project name and validate it.
///
/// # Examples
///
/// ```
/// use pm_types::project_name;
///
/// assert_eq!(project_name("  Cats ").unwrap(), "Cats");
/// assert!(project_name("   ").is_err());
/// ```
pub fn project_name(raw: &str) -> Result<String, TypeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TypeError::EmptyName);
    }
    let len = trimmed.chars().count();
    if len > MAX_PROJECT_NAME_LEN {
        return Err(TypeError::NameTooLong {
            len,
            max: MAX_PROJECT_NAME_LEN,
        });
    }
    Ok(trimmed.to_string())
}
