pub fn gcd_unsigned(mut a: u64, mut b: u64) -> u64 {
    let mut c;
    while a != 0 {
        c = a;
        a = b % a;
        b = c;
    }
    b
}

pub fn gcd_signed(mut a: i64, mut b: i64) -> u64 {
    let mut c;
    while a != 0 {
        c = a;
        // only wraps when i64::MIN % -1 and that still yields 0
        a = b.wrapping_rem(a);
        b = c;
    }
    b.unsigned_abs()
}

/// The least common multiple of `a` and `b`, or `None` on overflow.
/// The lcm with zero is zero.
pub fn lcm_unsigned(a: u64, b: u64) -> Option<u64> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd_unsigned(a, b)).checked_mul(b)
}

pub fn lcm_signed(a: i64, b: i64) -> Option<u64> {
    lcm_unsigned(a.unsigned_abs(), b.unsigned_abs())
}
