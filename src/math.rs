//! Checked arithmetic trait for domain wrapper types.
//!
//! The [`CheckedArithmetic`] trait provides fallible arithmetic operations
//! that return [`Result<Self, TokenError>`](crate::error::TokenError)
//! instead of panicking on overflow, underflow, or division by zero.
//!
//! # Examples
//!
//! ```
//! use remora_token::domain::{Amount, Rounding};
//! use remora_token::math::CheckedArithmetic;
//!
//! let a = Amount::new(100);
//! let b = Amount::new(200);
//! assert!(a.safe_add(&b).is_ok());
//! assert!(a.safe_sub(&b).is_err());
//! ```

use crate::domain::{Amount, Rounding};
use crate::error::TokenError;

/// Fallible arithmetic for domain wrapper types.
///
/// Every method returns a specific error variant so callers can
/// distinguish overflow from underflow from division by zero.
///
/// # Contract
///
/// - **No panics** — all error conditions produce `Err`.
/// - **No saturation** — saturation hides bugs; errors propagate instead.
/// - Implementations must delegate to the inner type's checked operations.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_add(&self, other: &Self) -> Result<Self, TokenError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, TokenError>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_mul(&self, other: &Self) -> Result<Self, TokenError>;

    /// Checked division with explicit [`Rounding`] direction.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, TokenError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, TokenError> {
        self.checked_add(other)
            .ok_or(TokenError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, TokenError> {
        self.checked_sub(other)
            .ok_or(TokenError::Underflow("amount subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, TokenError> {
        self.checked_mul(other)
            .ok_or(TokenError::Overflow("amount multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, TokenError> {
        self.checked_div(other, rounding)
            .ok_or(TokenError::DivisionByZero)
    }
}
