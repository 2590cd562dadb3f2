use crate::signal::{CompletionSignal, CompletionTag};

pub const OUTER_ITERATIONS: usize = 10;
pub const GROUPS_PER_ITERATION: usize = 10;
pub const NOPS_PER_GROUP: usize = 32;
pub const NOP_UNITS: usize = OUTER_ITERATIONS * GROUPS_PER_ITERATION * NOPS_PER_GROUP;

/// Success value returned once the delay has elapsed.
pub const EXPECTED: i32 = 0;

/// Exactly 32 `nop` instructions.
#[cfg(any(
    target_arch = "x86",
    target_arch = "x86_64",
    target_arch = "arm",
    target_arch = "aarch64",
    target_arch = "riscv32",
    target_arch = "riscv64"
))]
#[inline(always)]
fn nop_group() {
    // SAFETY: `nop` touches no registers, memory, or flags.
    unsafe {
        core::arch::asm!(
            ".rept 32",
            "nop",
            ".endr",
            options(nomem, nostack, preserves_flags)
        );
    }
}

#[cfg(not(any(
    target_arch = "x86",
    target_arch = "x86_64",
    target_arch = "arm",
    target_arch = "aarch64",
    target_arch = "riscv32",
    target_arch = "riscv64"
)))]
#[inline(always)]
fn nop_group() {
    for _ in 0..NOPS_PER_GROUP {
        std::hint::black_box(());
    }
}

#[inline(always)]
fn delay_iteration<G: FnMut()>(group: &mut G) {
    group();
    group();
    group();
    group();
    group();
    group();
    group();
    group();
    group();
    group();
}

#[inline(always)]
fn delay_loop<G: FnMut()>(mut group: G) {
    for _ in 0..OUTER_ITERATIONS {
        delay_iteration(&mut group);
    }
}

/// Burns [`NOP_UNITS`] no-op instructions, then signals completion.
#[inline(never)]
pub fn fixed_delay<S>(signal: &mut S) -> i32
where
    S: CompletionSignal + ?Sized,
{
    log::debug!(
        "delay: {} nops over {} iterations of {} groups",
        NOP_UNITS,
        OUTER_ITERATIONS,
        GROUPS_PER_ITERATION
    );
    delay_loop(nop_group);

    signal.complete(CompletionTag::FIXED_DELAY);
    EXPECTED
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal;

    #[test]
    fn emits_tag_six_once() {
        let (mut signal, receiver) = signal::channel();
        assert_eq!(fixed_delay(&mut signal), EXPECTED);
        let tags: Vec<_> = receiver.try_iter().collect();
        assert_eq!(tags, [CompletionTag(6)]);
    }

    #[test]
    fn one_iteration_runs_ten_groups() {
        let mut groups = 0;
        delay_iteration(&mut || groups += 1);
        assert_eq!(groups, GROUPS_PER_ITERATION);
    }

    #[test]
    fn loop_runs_every_outer_iteration() {
        let mut groups = 0;
        delay_loop(|| groups += 1);
        assert_eq!(groups, OUTER_ITERATIONS * GROUPS_PER_ITERATION);
        assert_eq!(groups * NOPS_PER_GROUP, NOP_UNITS);
    }

    #[test]
    fn shape_constants() {
        assert_eq!(NOP_UNITS, 3200);
        assert_eq!(OUTER_ITERATIONS, 10);
        assert_eq!(OUTER_ITERATIONS * GROUPS_PER_ITERATION, 100);
    }

    #[test]
    fn closure_hook_called_once() {
        let mut calls = 0;
        let result = fixed_delay(&mut |tag: CompletionTag| {
            assert_eq!(tag, CompletionTag::FIXED_DELAY);
            calls += 1;
        });
        assert_eq!(result, 0);
        assert_eq!(calls, 1);
    }
}
