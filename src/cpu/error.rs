use thiserror::Error;

use super::addressable::AddressableTarget;

/// Errors the core can surface to a host driving [`crate::cpu::Cpu::tick`].
///
/// Both variants are fatal to the tick in which they occur: the core does not retry or
/// paper over them. A host that wants to keep running after one must `reset()` first.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CpuError {
    /// A read or write landed on an address no attached [`crate::bus::BusDevice`] claims.
    #[error("bus address {0:#06x} is not mapped to any device")]
    BusUnmapped(u16),

    /// The byte fetched at `pc` isn't a legal opcode.
    #[error("illegal opcode {opcode:#04x} at pc {pc:#06x}")]
    IllegalOpcode { pc: u16, opcode: u8 },

    /// An addressing-mode target was asked for an operation it doesn't support, e.g. taking
    /// the memory address of an `Accumulator` target. This only happens if the executor
    /// routes an opcode through the wrong addressable operation, so it never escapes `tick`.
    #[error("addressing target {0:?} does not support this operation")]
    UnsupportedAddressableOperation(AddressableTarget),
}
