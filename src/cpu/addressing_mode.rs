use std::fmt;

use crate::bus::Bus;
use crate::cpu::error::CpuError;

use super::addressable::{Addressable, AddressableTarget};

/// Tags one of the 13 addressing modes. Carried on [`super::instruction::InstructionSignature`]
/// so the decode table stays a flat, allocation-free array of value records.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum AddressingMode {
    Implicit,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    /// Used only by `JMP (addr)`; reproduces the hardware page-wrap bug (see [`Self::resolve`]).
    Indirect,
    Relative,
    /// `(zp,X)`.
    IndexedIndirect,
    /// `(zp),Y`.
    IndirectIndexed,
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl AddressingMode {
    /// Reads whatever operand bytes this mode needs starting at `pc`, combines them with the
    /// current `x`/`y` index registers, and produces the fully resolved [`Addressable`].
    ///
    /// Returns the resolved addressable and the number of operand bytes consumed (the caller
    /// advances `pc` by this amount; it does not include the opcode byte itself).
    pub fn resolve(&self, pc: u16, x: u8, y: u8, bus: &Bus) -> Result<(Addressable, u16), CpuError> {
        let (target, bytes_consumed, page_boundary_crossed) = match self {
            AddressingMode::Implicit => (AddressableTarget::Implicit, 0, false),

            AddressingMode::Accumulator => (AddressableTarget::Accumulator, 0, false),

            AddressingMode::Immediate => {
                let value = bus.read_u8(pc)?;
                (AddressableTarget::Immediate(value), 1, false)
            }

            AddressingMode::ZeroPage => {
                let zp = bus.read_u8(pc)?;
                (AddressableTarget::Memory(zp as u16), 1, false)
            }

            AddressingMode::ZeroPageX => {
                let zp = bus.read_u8(pc)?;
                let address = zp.wrapping_add(x) as u16;
                (AddressableTarget::Memory(address), 1, false)
            }

            AddressingMode::ZeroPageY => {
                let zp = bus.read_u8(pc)?;
                let address = zp.wrapping_add(y) as u16;
                (AddressableTarget::Memory(address), 1, false)
            }

            AddressingMode::Absolute => {
                let address = bus.read_u16(pc)?;
                (AddressableTarget::Memory(address), 2, false)
            }

            AddressingMode::AbsoluteX => {
                let base = bus.read_u16(pc)?;
                let address = base.wrapping_add(x as u16);
                (AddressableTarget::Memory(address), 2, page_crossed(base, address))
            }

            AddressingMode::AbsoluteY => {
                let base = bus.read_u16(pc)?;
                let address = base.wrapping_add(y as u16);
                (AddressableTarget::Memory(address), 2, page_crossed(base, address))
            }

            AddressingMode::Indirect => {
                let pointer = bus.read_u16(pc)?;
                let address = read_u16_with_page_wrap_bug(bus, pointer)?;
                (AddressableTarget::Memory(address), 2, false)
            }

            AddressingMode::Relative => {
                let offset = bus.read_u8(pc)? as i8;
                let next_instruction = pc.wrapping_add(1);
                let address = (next_instruction as i32 + offset as i32) as u16;
                (AddressableTarget::Memory(address), 1, page_crossed(next_instruction, address))
            }

            AddressingMode::IndexedIndirect => {
                let zp = bus.read_u8(pc)?;
                let pointer = zp.wrapping_add(x);
                let address = read_u16_zero_page_wrapped(bus, pointer)?;
                (AddressableTarget::Memory(address), 1, false)
            }

            AddressingMode::IndirectIndexed => {
                let zp = bus.read_u8(pc)?;
                let base = read_u16_zero_page_wrapped(bus, zp)?;
                let address = base.wrapping_add(y as u16);
                (AddressableTarget::Memory(address), 1, page_crossed(base, address))
            }
        };

        let addressable = Addressable {
            target,
            mode: *self,
            page_boundary_crossed,
        };

        Ok((addressable, bytes_consumed))
    }
}

fn page_crossed(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

/// Reads a little-endian `u16` pointer whose two bytes both live in page 0, wrapping the
/// high-byte fetch back to the start of the page instead of spilling into page 1. Used by
/// `(zp,X)` and `(zp),Y`.
fn read_u16_zero_page_wrapped(bus: &Bus, zero_page_address: u8) -> Result<u16, CpuError> {
    let lo = bus.read_u8(zero_page_address as u16)?;
    let hi = bus.read_u8(zero_page_address.wrapping_add(1) as u16)?;
    Ok(u16::from_le_bytes([lo, hi]))
}

/// Reads the 16-bit value pointed to by `pointer`, reproducing the 6502's indirect-JMP bug:
/// if `pointer`'s low byte is `0xFF`, the high byte is fetched from `pointer & 0xFF00` rather
/// than `pointer + 1`, because the CPU never carries into the high byte of the address latch.
fn read_u16_with_page_wrap_bug(bus: &Bus, pointer: u16) -> Result<u16, CpuError> {
    let lo = bus.read_u8(pointer)?;
    let hi_address = if pointer & 0x00FF == 0x00FF {
        pointer & 0xFF00
    } else {
        pointer.wrapping_add(1)
    };
    let hi = bus.read_u8(hi_address)?;
    Ok(u16::from_le_bytes([lo, hi]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Ram;

    fn bus_with(bytes: &[u8]) -> Bus {
        Bus::new(vec![Box::new(Ram::new().with_bytes_at(0, bytes))])
    }

    #[test]
    fn zero_page_x_wraps_within_page_zero() {
        let bus = bus_with(&[0xFF]);
        let (addressable, bytes) = AddressingMode::ZeroPageX.resolve(0, 0x02, 0, &bus).unwrap();
        assert_eq!(bytes, 1);
        assert_eq!(addressable.target, AddressableTarget::Memory(0x0001));
    }

    #[test]
    fn absolute_x_detects_page_crossing() {
        let bus = bus_with(&[0xFF, 0x00]); // base = 0x00FF
        let (addressable, _) = AddressingMode::AbsoluteX.resolve(0, 0x01, 0, &bus).unwrap();
        assert_eq!(addressable.target, AddressableTarget::Memory(0x0100));
        assert!(addressable.page_boundary_crossed);
    }

    #[test]
    fn absolute_x_without_page_crossing() {
        let bus = bus_with(&[0x00, 0x01]); // base = 0x0100
        let (addressable, _) = AddressingMode::AbsoluteX.resolve(0, 0x01, 0, &bus).unwrap();
        assert_eq!(addressable.target, AddressableTarget::Memory(0x0101));
        assert!(!addressable.page_boundary_crossed);
    }

    #[test]
    fn indirect_reproduces_the_page_wrap_bug() {
        let mut ram = Ram::new();
        ram = ram.with_bytes_at(0x00, &[0xFF, 0x02]); // operand = 0x02FF
        ram = ram.with_bytes_at(0x02FF, &[0x34]);
        ram = ram.with_bytes_at(0x0200, &[0x12]); // high byte wraps back to 0x0200, not 0x0300
        let bus = Bus::new(vec![Box::new(ram)]);

        let (addressable, bytes) = AddressingMode::Indirect.resolve(0, 0, 0, &bus).unwrap();
        assert_eq!(bytes, 2);
        assert_eq!(addressable.target, AddressableTarget::Memory(0x1234));
    }

    #[test]
    fn indexed_indirect_adds_x_before_dereferencing() {
        let mut ram = Ram::new();
        ram = ram.with_bytes_at(0x00, &[0x20]); // zp operand
        ram = ram.with_bytes_at(0x24, &[0x74, 0x20]); // (0x20 + 4) -> pointer to 0x2074
        let bus = Bus::new(vec![Box::new(ram)]);

        let (addressable, _) = AddressingMode::IndexedIndirect.resolve(0, 0x04, 0, &bus).unwrap();
        assert_eq!(addressable.target, AddressableTarget::Memory(0x2074));
    }

    #[test]
    fn indirect_indexed_adds_y_after_dereferencing() {
        let mut ram = Ram::new();
        ram = ram.with_bytes_at(0x00, &[0x10]); // zp operand
        ram = ram.with_bytes_at(0x10, &[0x00, 0x30]); // base = 0x3000
        let bus = Bus::new(vec![Box::new(ram)]);

        let (addressable, _) = AddressingMode::IndirectIndexed.resolve(0, 0, 0x05, &bus).unwrap();
        assert_eq!(addressable.target, AddressableTarget::Memory(0x3005));
    }

    #[test]
    fn relative_adds_signed_offset_to_the_following_instruction() {
        let bus = bus_with(&[0x02]);
        let (addressable, _) = AddressingMode::Relative.resolve(0x00FE, 0, 0, &bus).unwrap();
        // pc=0x00FE, operand byte consumed -> next_instruction=0x00FF, +2 => 0x0101
        assert_eq!(addressable.target, AddressableTarget::Memory(0x0101));
        assert!(addressable.page_boundary_crossed);
    }

    #[test]
    fn relative_handles_negative_offsets() {
        let bus = bus_with(&[0xFC]); // -4
        let (addressable, _) = AddressingMode::Relative.resolve(0x0010, 0, 0, &bus).unwrap();
        assert_eq!(addressable.target, AddressableTarget::Memory(0x000D));
    }
}
