//! GSM 06.10 basic arithmetic operators
//!
//! All codec arithmetic runs on 16-bit words and 32-bit long words with the
//! saturation and rounding rules fixed by the recommendation. Intermediate
//! products are formed in a wider type and truncated explicitly.

/// Smallest 16-bit word
pub const MIN_WORD: i16 = i16::MIN;

/// Largest 16-bit word
pub const MAX_WORD: i16 = i16::MAX;

/// Saturating word addition
#[inline]
pub fn add(a: i16, b: i16) -> i16 {
    a.saturating_add(b)
}

/// Saturating word subtraction
#[inline]
pub fn sub(a: i16, b: i16) -> i16 {
    a.saturating_sub(b)
}

/// Saturating long word addition
#[inline]
pub fn l_add(a: i32, b: i32) -> i32 {
    a.saturating_add(b)
}

/// Absolute value, with `MIN_WORD` mapped to `MAX_WORD`
#[inline]
pub fn abs(a: i16) -> i16 {
    a.saturating_abs()
}

/// Q15 multiply, truncating
#[inline]
pub fn mult(a: i16, b: i16) -> i16 {
    if a == MIN_WORD && b == MIN_WORD {
        MAX_WORD
    } else {
        ((i32::from(a) * i32::from(b)) >> 15) as i16
    }
}

/// Q15 multiply with rounding
#[inline]
pub fn mult_r(a: i16, b: i16) -> i16 {
    if a == MIN_WORD && b == MIN_WORD {
        MAX_WORD
    } else {
        ((i32::from(a) * i32::from(b) + 16384) >> 15) as i16
    }
}

/// Number of left shifts needed to normalize a long word
///
/// Returns 31 for zero, and 0 for values at or below `-2^30`.
pub fn norm(a: i32) -> i16 {
    let a = if a < 0 {
        if a <= -1_073_741_824 {
            return 0;
        }
        !a
    } else {
        a
    };

    a.leading_zeros() as i16 - 1
}

/// Fractional division of two positive words with `num <= denum`
///
/// The result is the Q15 quotient computed by restoring division.
pub fn div(num: i16, denum: i16) -> i16 {
    debug_assert!(num >= 0 && denum >= num);
    if num == 0 {
        return 0;
    }

    let mut l_num = i32::from(num);
    let l_denum = i32::from(denum);
    let mut quotient = 0i16;

    for _ in 0..15 {
        quotient <<= 1;
        l_num <<= 1;
        if l_num >= l_denum {
            l_num -= l_denum;
            quotient += 1;
        }
    }

    quotient
}

/// Arithmetic shift left; negative counts shift right
pub fn asl(a: i16, n: i16) -> i16 {
    if n >= 16 {
        0
    } else if n <= -16 {
        if a < 0 { -1 } else { 0 }
    } else if n < 0 {
        asr(a, -n)
    } else {
        (i32::from(a) << n) as i16
    }
}

/// Arithmetic shift right; negative counts shift left
pub fn asr(a: i16, n: i16) -> i16 {
    if n >= 16 {
        if a < 0 { -1 } else { 0 }
    } else if n <= -16 {
        0
    } else if n < 0 {
        (i32::from(a) << -n) as i16
    } else {
        a >> n
    }
}
