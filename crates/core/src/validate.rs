//! Input validation rules enforced at the API boundary.
//!
//! The analytics engine assumes records that already satisfy these rules;
//! anything that fails here is rejected with a 400 before it reaches
//! storage or aggregation.

use rust_decimal::Decimal;
use thiserror::Error;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Validation errors for incoming payloads.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Transaction amount must be strictly positive.
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    /// Goal target must not be negative.
    #[error("Target amount cannot be negative")]
    NegativeTarget,

    /// Month must be between 1 and 12.
    #[error("Month must be between 1 and 12")]
    InvalidMonth,

    /// Transaction kind must be income or expense.
    #[error("Type must be either 'income' or 'expense'")]
    InvalidKind,

    /// Category must not be empty.
    #[error("Category is required")]
    EmptyCategory,

    /// Email address is malformed.
    #[error("A valid email address is required")]
    InvalidEmail,

    /// Password is too short.
    #[error("Password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,

    /// Full name must not be empty.
    #[error("Full name is required")]
    EmptyName,
}

/// Validates a transaction amount.
///
/// # Errors
///
/// Returns `ValidationError::NonPositiveAmount` for zero or negative amounts.
pub fn validate_amount(amount: Decimal) -> Result<(), ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(())
}

/// Validates a goal target amount.
///
/// A zero target is allowed; it is achieved whenever the month's net is
/// non-negative.
///
/// # Errors
///
/// Returns `ValidationError::NegativeTarget` for negative targets.
pub fn validate_target_amount(amount: Decimal) -> Result<(), ValidationError> {
    if amount < Decimal::ZERO {
        return Err(ValidationError::NegativeTarget);
    }
    Ok(())
}

/// Validates a month number.
///
/// # Errors
///
/// Returns `ValidationError::InvalidMonth` outside 1-12.
pub fn validate_month(month: u32) -> Result<(), ValidationError> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::InvalidMonth);
    }
    Ok(())
}

/// Validates and normalizes a category label.
///
/// # Errors
///
/// Returns `ValidationError::EmptyCategory` when blank after trimming.
pub fn validate_category(category: &str) -> Result<String, ValidationError> {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyCategory);
    }
    Ok(trimmed.to_string())
}

/// Normalizes a free-text description. Blank descriptions are allowed.
#[must_use]
pub fn normalize_description(description: &str) -> String {
    description.trim().to_string()
}

/// Validates and normalizes an email address.
///
/// # Errors
///
/// Returns `ValidationError::InvalidEmail` when blank or missing an `@`.
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(trimmed.to_string())
}

/// Validates a password against the minimum length.
///
/// # Errors
///
/// Returns `ValidationError::PasswordTooShort` below [`MIN_PASSWORD_LEN`].
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Validates and normalizes a full name.
///
/// # Errors
///
/// Returns `ValidationError::EmptyName` when blank after trimming.
pub fn validate_full_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(0.01))]
    #[case(dec!(1000))]
    fn test_valid_amounts(#[case] amount: Decimal) {
        assert!(validate_amount(amount).is_ok());
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-5))]
    fn test_invalid_amounts(#[case] amount: Decimal) {
        assert_eq!(
            validate_amount(amount),
            Err(ValidationError::NonPositiveAmount)
        );
    }

    #[test]
    fn test_target_amount_allows_zero() {
        assert!(validate_target_amount(dec!(0)).is_ok());
        assert!(validate_target_amount(dec!(500)).is_ok());
        assert_eq!(
            validate_target_amount(dec!(-1)),
            Err(ValidationError::NegativeTarget)
        );
    }

    #[rstest]
    #[case(1)]
    #[case(6)]
    #[case(12)]
    fn test_valid_months(#[case] month: u32) {
        assert!(validate_month(month).is_ok());
    }

    #[rstest]
    #[case(0)]
    #[case(13)]
    fn test_invalid_months(#[case] month: u32) {
        assert_eq!(validate_month(month), Err(ValidationError::InvalidMonth));
    }

    #[test]
    fn test_category_trimmed() {
        assert_eq!(validate_category("  Food  ").unwrap(), "Food");
        assert_eq!(
            validate_category("   "),
            Err(ValidationError::EmptyCategory)
        );
    }

    #[test]
    fn test_email() {
        assert_eq!(
            validate_email(" user@example.com ").unwrap(),
            "user@example.com"
        );
        assert_eq!(validate_email("nope"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email(""), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("12345678").is_ok());
        assert_eq!(
            validate_password("1234567"),
            Err(ValidationError::PasswordTooShort)
        );
    }

    #[test]
    fn test_description_normalized() {
        assert_eq!(normalize_description("  coffee  "), "coffee");
        assert_eq!(normalize_description(""), "");
    }
}
