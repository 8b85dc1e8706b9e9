//! Checked fixed-point helpers. Every conversion between value and shares
//! goes through a u128 intermediate and fails instead of saturating.

use anchor_lang::prelude::*;

use crate::{constants::BPS_DENOMINATOR, errors::VaultError};

/// floor(a * b / c). Fails on `c == 0` or a quotient above `u64::MAX`.
pub fn mul_div_floor(a: u64, b: u64, c: u64) -> Result<u64> {
    let product = (a as u128)
        .checked_mul(b as u128)
        .ok_or(VaultError::MathOverflow)?;
    let quotient = product
        .checked_div(c as u128)
        .ok_or(VaultError::MathOverflow)?;
    u64::try_from(quotient).map_err(|_| error!(VaultError::MathOverflow))
}

/// floor(amount * bps / 10_000)
pub fn bps_of(amount: u64, bps: u64) -> Result<u64> {
    mul_div_floor(amount, bps, BPS_DENOMINATOR)
}

/// Full 256-bit product of two u128 values as `(high, low)` limbs.
/// Tuples compare lexicographically, so the result orders like the product.
pub fn widening_mul_u128(a: u128, b: u128) -> (u128, u128) {
    const MASK: u128 = u64::MAX as u128;

    let (a_hi, a_lo) = (a >> 64, a & MASK);
    let (b_hi, b_lo) = (b >> 64, b & MASK);

    let lo_lo = a_lo * b_lo;
    let lo_hi = a_lo * b_hi;
    let hi_lo = a_hi * b_lo;
    let hi_hi = a_hi * b_hi;

    // each term < 2^64, sum < 2^66
    let middle = (lo_lo >> 64) + (lo_hi & MASK) + (hi_lo & MASK);

    let low = (lo_lo & MASK) | ((middle & MASK) << 64);
    let high = hi_hi + (lo_hi >> 64) + (hi_lo >> 64) + (middle >> 64);
    (high, low)
}
