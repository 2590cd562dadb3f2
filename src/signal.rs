//! Out-of-band completion signalling.
//!
//! Each kernel hands a fixed tag to a [`CompletionSignal`] right before it
//! returns, so a trace harness can spot the end of the measured region
//! without relying on the return value surviving optimization.

use crate::Error;
use std::fmt;

/// Literal written by a kernel when it finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompletionTag(pub u32);

impl CompletionTag {
    pub const SHIFT_ACCUMULATE: Self = Self(7);
    pub const FIXED_DELAY: Self = Self(6);
}

impl fmt::Display for CompletionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub trait CompletionSignal {
    fn complete(&mut self, tag: CompletionTag);
}

impl<F> CompletionSignal for F
where
    F: FnMut(CompletionTag),
{
    fn complete(&mut self, tag: CompletionTag) {
        (*self)(tag)
    }
}

/// Drops every tag.
#[derive(Debug, Default)]
pub struct Silent;

impl CompletionSignal for Silent {
    fn complete(&mut self, _tag: CompletionTag) {}
}

#[derive(Debug, Default)]
pub struct LogSignal;

impl CompletionSignal for LogSignal {
    fn complete(&mut self, tag: CompletionTag) {
        log::info!("benchmark complete (tag {})", tag);
    }
}

/// Forwards tags into a flume channel.
#[derive(Debug, Clone)]
pub struct ChannelSignal {
    sender: flume::Sender<CompletionTag>,
}

/// Creates a channel-backed signal together with the receiving end.
pub fn channel() -> (ChannelSignal, flume::Receiver<CompletionTag>) {
    let (sender, receiver) = flume::unbounded();
    (ChannelSignal { sender }, receiver)
}

impl CompletionSignal for ChannelSignal {
    fn complete(&mut self, tag: CompletionTag) {
        if self.sender.send(tag).is_err() {
            log::warn!("completion tag {} dropped, receiver is gone", tag);
        }
    }
}

/// Writes the tag into general purpose register `x26`, where a RISC-V
/// trace inspector expects it.
#[derive(Debug)]
pub struct RegisterSignal {
    _private: (),
}

impl RegisterSignal {
    pub fn new() -> Result<Self, Error> {
        if cfg!(any(target_arch = "riscv32", target_arch = "riscv64")) {
            Ok(Self { _private: () })
        } else {
            Err(Error::RegisterUnavailable {
                arch: std::env::consts::ARCH,
            })
        }
    }
}

impl CompletionSignal for RegisterSignal {
    fn complete(&mut self, tag: CompletionTag) {
        write_marker_register(tag.0);
    }
}

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
#[inline(always)]
fn write_marker_register(value: u32) {
    // SAFETY: only x26 is written and it is declared as an output, so the
    // compiler saves and restores it around this block as needed.
    unsafe {
        core::arch::asm!(
            "mv x26, {value}",
            value = in(reg) value as usize,
            out("x26") _,
            options(nomem, nostack, preserves_flags),
        );
    }
}

#[cfg(not(any(target_arch = "riscv32", target_arch = "riscv64")))]
fn write_marker_register(_value: u32) {
    // `RegisterSignal::new` refuses to build on these targets.
    unreachable!("register signal constructed on an unsupported target");
}

/// Selects which [`CompletionSignal`] a run reports to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SignalKind {
    Silent,
    Log,
    Register,
}

impl SignalKind {
    pub fn build(self) -> Result<Box<dyn CompletionSignal>, Error> {
        Ok(match self {
            SignalKind::Silent => Box::new(Silent),
            SignalKind::Log => Box::new(LogSignal),
            SignalKind::Register => Box::new(RegisterSignal::new()?),
        })
    }
}

/// The register signal where the target has one, the log signal otherwise.
pub fn default_signal() -> Box<dyn CompletionSignal> {
    match RegisterSignal::new() {
        Ok(signal) => Box::new(signal),
        Err(err) => {
            log::debug!("{}; falling back to log signal", err);
            Box::new(LogSignal)
        }
    }
}
