//! Core crate of the Action Replay cheat engine.
//!
//! AR codes are a compact bit-packed instruction format that patches guest
//! memory once per emulated tick. This crate holds the virtual machine: the
//! command-word decoder, the guest-memory seam, the per-code interpreter
//! with its conditional-skip and composite semantics, and the store that
//! owns the active set.

/// Packed command-word decoding.
pub mod addr;
pub use addr::{CodeAddr, CompareOp, DataSize, SkipSpan, WriteOp, GCADDR_MASK, GC_RAM_BASE};

/// Code and instruction data model.
pub mod code;
pub use code::{ArCode, ArEntry};

/// Interpreter failure taxonomy and reporting seam.
pub mod error;
pub use error::{CodeError, CollectedReports, ErrorReporter};

/// Per-code interpreter.
pub mod execute;
pub use execute::run_code;

/// Self-log plumbing.
pub mod log;
pub use log::SelfLog;

/// Guest memory access.
pub mod memory;
pub use memory::{mem_check, GuestMemory, MainRam, MAIN_RAM_BYTES, MAIN_RAM_END, MAIN_RAM_START};

/// Active-code store and per-tick executor.
pub mod store;
pub use store::CodeStore;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
