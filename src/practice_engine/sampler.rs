use rand::Rng;

/// An inclusive integer range that operands are drawn from uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitRange {
    pub lo: u128,
    pub hi: u128,
}

impl DigitRange {
    pub fn new(lo: u128, hi: u128) -> Self {
        DigitRange { lo, hi }
    }

    /// All numbers with exactly `digits` decimal digits: `[10^(d-1), 10^d - 1]`.
    ///
    /// One digit gives `[1, 9]`; zero is never drawn.
    pub fn for_digits(digits: u32) -> Self {
        let digits = digits.max(1);
        DigitRange { lo: 10u128.pow(digits - 1), hi: 10u128.pow(digits) - 1 }
    }

    pub fn is_empty(&self) -> bool {
        self.lo > self.hi
    }

    pub fn contains(&self, value: u128) -> bool {
        self.lo <= value && value <= self.hi
    }

    /// Draw one value; panics on an empty range, so callers check first.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> u128 {
        assert!(!self.is_empty(), "sampling from empty range {}..={}", self.lo, self.hi);
        rng.gen_range(self.lo..=self.hi)
    }
}

/// Uniform draw of a single decimal digit `0..=9`.
pub fn decimal_digit<R: Rng>(rng: &mut R) -> u8 {
    rng.gen_range(0..=9)
}
