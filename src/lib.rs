//! A MOS 6502 CPU core.
//!
//! [`Cpu`] owns its registers, its processor status, and an ordered list of [`BusDevice`]s it
//! drives through [`Bus`]. A host constructs the device list once, builds a [`Cpu`] from it,
//! and then drives emulation one clock cycle at a time with [`Cpu::tick`].

pub mod bus;
pub mod cpu;

pub use bus::{Bus, BusDevice, Ram};
pub use cpu::addressing_mode::AddressingMode;
pub use cpu::error::CpuError;
pub use cpu::opcode::Opcode;
pub use cpu::status::{Status, StatusFlag};
pub use cpu::Cpu;
