use crate::signal::{CompletionSignal, CompletionTag};
use std::hint::black_box;

/// Bounds of both loop indices, and the left-shift applied before halving.
pub const N: usize = 10;

/// Result of [`shift_accumulate`] with zero-initialized accumulators.
pub const EXPECTED: i32 = 94095;

/// Divides `value << 10` by `2^shift_count` one arithmetic shift at a time.
///
/// The loop is kept so the instruction trace shows `shift_count` separate
/// shifts. Shifting a negative value past zero settles at `-1`.
#[inline(never)]
pub fn halve_by_shift(value: i32, shift_count: u32) -> i32 {
    let mut answer = value << N;
    for _ in 0..shift_count {
        answer >>= 1;
    }
    answer
}

/// Multiplies by repeated addition of `a`, `b` times.
///
/// A non-positive `b` adds nothing.
#[inline(never)]
pub fn repeated_add_multiply(a: i32, b: i32) -> i32 {
    if a == 0 || b == 0 {
        return 0;
    }
    let mut answer = 0i32;
    for _ in 0..b {
        answer = answer.wrapping_add(a);
    }
    answer
}

/// Runs the 10x10 shift/multiply sweep and returns the folded sum.
#[inline(never)]
pub fn shift_accumulate<S>(signal: &mut S) -> i32
where
    S: CompletionSignal + ?Sized,
{
    let mut accumulator = [0i32; N];

    for i in 0..N {
        for j in 0..N {
            let quotient = halve_by_shift(black_box(j as i32), black_box(i as u32));
            let product = repeated_add_multiply(black_box(i as i32), black_box(j as i32));
            accumulator[i] += quotient + product;
        }
    }

    let mut sum = 0i32;
    for slot in accumulator {
        sum += slot;
    }
    log::debug!("shift_accumulate slots: {:?}", accumulator);

    signal.complete(CompletionTag::SHIFT_ACCUMULATE);
    sum
}
