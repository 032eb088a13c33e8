//! Display names derived from account email addresses.
//!
//! Student accounts look like `first.last@domain`, faculty accounts like
//! `flast@domain` (initial followed by surname).

use super::error::FeedError;

/// Resolve a human display name from an account email.
///
/// Only the local part (before `@`) is used. Segments beyond the second in a
/// dotted local part are ignored.
pub fn resolve(email: &str) -> Result<String, FeedError> {
    let Some((local, _domain)) = email.split_once('@') else {
        return Err(FeedError::InvalidIdentity(format!(
            "no `@` in account identifier {email:?}"
        )));
    };

    if local.is_empty() {
        return Err(FeedError::InvalidIdentity(format!(
            "empty local part in account identifier {email:?}"
        )));
    }

    if local.contains('.') {
        let mut segments = local.split('.');
        let first = segments.next().unwrap_or_default();
        let last = segments.next().unwrap_or_default();
        return Ok(format!("{} {}", capitalize(first), capitalize(last)));
    }

    let split_at = local.chars().next().map_or(0, char::len_utf8);
    let (initial, surname) = local.split_at(split_at);
    Ok(format!("{} {}", capitalize(initial), capitalize(surname)))
}

/// Uppercase the first character, leaving the rest untouched.
fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_address() {
        assert_eq!(
            resolve("cameron.labounty@mymail.champlain.edu").unwrap(),
            "Cameron Labounty"
        );
        assert_eq!(resolve("a.b@x.com").unwrap(), "A B");
    }

    #[test]
    fn test_faculty_address() {
        assert_eq!(resolve("dkopec@champlain.edu").unwrap(), "D Kopec");
    }

    #[test]
    fn test_extra_segments_are_ignored() {
        assert_eq!(resolve("mary.ann.smith@x.edu").unwrap(), "Mary Ann");
    }

    #[test]
    fn test_casing_is_passed_through() {
        assert_eq!(resolve("jANE.mcDonald@x.edu").unwrap(), "JANE McDonald");
    }

    #[test]
    fn test_single_letter_faculty_local_part() {
        assert_eq!(resolve("d@x.edu").unwrap(), "D ");
    }

    #[test]
    fn test_missing_at_is_invalid() {
        assert!(matches!(
            resolve("dkopec"),
            Err(FeedError::InvalidIdentity(_))
        ));
        assert!(matches!(
            resolve("@x.edu"),
            Err(FeedError::InvalidIdentity(_))
        ));
    }
}
