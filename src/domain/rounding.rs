//! Explicit rounding direction for arithmetic operations.

/// Specifies the rounding direction for division operations on domain types.
///
/// All division in the ledger requires an explicit `Rounding` parameter to
/// prevent silent precision loss. Fee and redistribution arithmetic always
/// truncates ([`Rounding::Down`], floor toward zero); ceiling
/// division exists for callers that must never under-charge.
///
/// # Examples
///
/// ```
/// use remora_token::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert!(Rounding::Down.is_down());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}
