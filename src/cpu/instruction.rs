use crate::bus::Bus;

use super::addressable::Addressable;
use super::addressing_mode::AddressingMode;
use super::error::CpuError;
use super::opcode::Opcode;

/// The `(mnemonic, addressing mode)` pair a single opcode byte decodes to.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct InstructionSignature {
    pub opcode: Opcode,
    pub addressing_mode: AddressingMode,
}

impl InstructionSignature {
    const fn new(opcode: Opcode, addressing_mode: AddressingMode) -> InstructionSignature {
        InstructionSignature { opcode, addressing_mode }
    }
}

/// A fully decoded instruction ready for the executor: the mnemonic plus its resolved operand.
#[derive(Debug)]
pub struct Instruction {
    pub opcode: Opcode,
    pub addressing_mode: AddressingMode,
    pub addressable: Addressable,
}

impl Instruction {
    /// Decode the instruction at `pc` without consuming any cycles. Returns the instruction
    /// and the total number of bytes it occupies (opcode + operand), so the caller can both
    /// advance `pc` and account for the extra operand-fetch cycles.
    pub fn fetch(pc: u16, x: u8, y: u8, bus: &Bus) -> Result<(Instruction, u16), CpuError> {
        let opcode_byte = bus.read_u8(pc)?;
        let signature = DECODE_TABLE[opcode_byte as usize].ok_or(CpuError::IllegalOpcode {
            pc,
            opcode: opcode_byte,
        })?;

        let (addressable, operand_bytes) = signature
            .addressing_mode
            .resolve(pc.wrapping_add(1), x, y, bus)?;

        let instruction = Instruction {
            opcode: signature.opcode,
            addressing_mode: signature.addressing_mode,
            addressable,
        };

        Ok((instruction, 1 + operand_bytes))
    }
}

use AddressingMode::{
    Absolute, AbsoluteX, AbsoluteY, Accumulator, Immediate, Implicit, IndexedIndirect, Indirect,
    IndirectIndexed, Relative, ZeroPage, ZeroPageX, ZeroPageY,
};
use Opcode::*;

/// Decode table for every legal 6502 opcode, indexed directly by the opcode byte. Bytes with
/// no documented instruction decode to `None`, which [`Instruction::fetch`] turns into
/// [`CpuError::IllegalOpcode`].
static DECODE_TABLE: [Option<InstructionSignature>; 256] = [
    /*0x00*/ Some(InstructionSignature::new(Brk, Implicit)),
    /*0x01*/ Some(InstructionSignature::new(Ora, IndexedIndirect)),
    /*0x02*/ None,
    /*0x03*/ None,
    /*0x04*/ None,
    /*0x05*/ Some(InstructionSignature::new(Ora, ZeroPage)),
    /*0x06*/ Some(InstructionSignature::new(Asl, ZeroPage)),
    /*0x07*/ None,
    /*0x08*/ Some(InstructionSignature::new(Php, Implicit)),
    /*0x09*/ Some(InstructionSignature::new(Ora, Immediate)),
    /*0x0A*/ Some(InstructionSignature::new(Asl, Accumulator)),
    /*0x0B*/ None,
    /*0x0C*/ None,
    /*0x0D*/ Some(InstructionSignature::new(Ora, Absolute)),
    /*0x0E*/ Some(InstructionSignature::new(Asl, Absolute)),
    /*0x0F*/ None,
    /*0x10*/ Some(InstructionSignature::new(Bpl, Relative)),
    /*0x11*/ Some(InstructionSignature::new(Ora, IndirectIndexed)),
    /*0x12*/ None,
    /*0x13*/ None,
    /*0x14*/ None,
    /*0x15*/ Some(InstructionSignature::new(Ora, ZeroPageX)),
    /*0x16*/ Some(InstructionSignature::new(Asl, ZeroPageX)),
    /*0x17*/ None,
    /*0x18*/ Some(InstructionSignature::new(Clc, Implicit)),
    /*0x19*/ Some(InstructionSignature::new(Ora, AbsoluteY)),
    /*0x1A*/ None,
    /*0x1B*/ None,
    /*0x1C*/ None,
    /*0x1D*/ Some(InstructionSignature::new(Ora, AbsoluteX)),
    /*0x1E*/ Some(InstructionSignature::new(Asl, AbsoluteX)),
    /*0x1F*/ None,
    /*0x20*/ Some(InstructionSignature::new(Jsr, Absolute)),
    /*0x21*/ Some(InstructionSignature::new(And, IndexedIndirect)),
    /*0x22*/ None,
    /*0x23*/ None,
    /*0x24*/ Some(InstructionSignature::new(Bit, ZeroPage)),
    /*0x25*/ Some(InstructionSignature::new(And, ZeroPage)),
    /*0x26*/ Some(InstructionSignature::new(Rol, ZeroPage)),
    /*0x27*/ None,
    /*0x28*/ Some(InstructionSignature::new(Plp, Implicit)),
    /*0x29*/ Some(InstructionSignature::new(And, Immediate)),
    /*0x2A*/ Some(InstructionSignature::new(Rol, Accumulator)),
    /*0x2B*/ None,
    /*0x2C*/ Some(InstructionSignature::new(Bit, Absolute)),
    /*0x2D*/ Some(InstructionSignature::new(And, Absolute)),
    /*0x2E*/ Some(InstructionSignature::new(Rol, Absolute)),
    /*0x2F*/ None,
    /*0x30*/ Some(InstructionSignature::new(Bmi, Relative)),
    /*0x31*/ Some(InstructionSignature::new(And, IndirectIndexed)),
    /*0x32*/ None,
    /*0x33*/ None,
    /*0x34*/ None,
    /*0x35*/ Some(InstructionSignature::new(And, ZeroPageX)),
    /*0x36*/ Some(InstructionSignature::new(Rol, ZeroPageX)),
    /*0x37*/ None,
    /*0x38*/ Some(InstructionSignature::new(Sec, Implicit)),
    /*0x39*/ Some(InstructionSignature::new(And, AbsoluteY)),
    /*0x3A*/ None,
    /*0x3B*/ None,
    /*0x3C*/ None,
    /*0x3D*/ Some(InstructionSignature::new(And, AbsoluteX)),
    /*0x3E*/ Some(InstructionSignature::new(Rol, AbsoluteX)),
    /*0x3F*/ None,
    /*0x40*/ Some(InstructionSignature::new(Rti, Implicit)),
    /*0x41*/ Some(InstructionSignature::new(Eor, IndexedIndirect)),
    /*0x42*/ None,
    /*0x43*/ None,
    /*0x44*/ None,
    /*0x45*/ Some(InstructionSignature::new(Eor, ZeroPage)),
    /*0x46*/ Some(InstructionSignature::new(Lsr, ZeroPage)),
    /*0x47*/ None,
    /*0x48*/ Some(InstructionSignature::new(Pha, Implicit)),
    /*0x49*/ Some(InstructionSignature::new(Eor, Immediate)),
    /*0x4A*/ Some(InstructionSignature::new(Lsr, Accumulator)),
    /*0x4B*/ None,
    /*0x4C*/ Some(InstructionSignature::new(Jmp, Absolute)),
    /*0x4D*/ Some(InstructionSignature::new(Eor, Absolute)),
    /*0x4E*/ Some(InstructionSignature::new(Lsr, Absolute)),
    /*0x4F*/ None,
    /*0x50*/ Some(InstructionSignature::new(Bvc, Relative)),
    /*0x51*/ Some(InstructionSignature::new(Eor, IndirectIndexed)),
    /*0x52*/ None,
    /*0x53*/ None,
    /*0x54*/ None,
    /*0x55*/ Some(InstructionSignature::new(Eor, ZeroPageX)),
    /*0x56*/ Some(InstructionSignature::new(Lsr, ZeroPageX)),
    /*0x57*/ None,
    /*0x58*/ Some(InstructionSignature::new(Cli, Implicit)),
    /*0x59*/ Some(InstructionSignature::new(Eor, AbsoluteY)),
    /*0x5A*/ None,
    /*0x5B*/ None,
    /*0x5C*/ None,
    /*0x5D*/ Some(InstructionSignature::new(Eor, AbsoluteX)),
    /*0x5E*/ Some(InstructionSignature::new(Lsr, AbsoluteX)),
    /*0x5F*/ None,
    /*0x60*/ Some(InstructionSignature::new(Rts, Implicit)),
    /*0x61*/ Some(InstructionSignature::new(Adc, IndexedIndirect)),
    /*0x62*/ None,
    /*0x63*/ None,
    /*0x64*/ None,
    /*0x65*/ Some(InstructionSignature::new(Adc, ZeroPage)),
    /*0x66*/ Some(InstructionSignature::new(Ror, ZeroPage)),
    /*0x67*/ None,
    /*0x68*/ Some(InstructionSignature::new(Pla, Implicit)),
    /*0x69*/ Some(InstructionSignature::new(Adc, Immediate)),
    /*0x6A*/ Some(InstructionSignature::new(Ror, Accumulator)),
    /*0x6B*/ None,
    /*0x6C*/ Some(InstructionSignature::new(Jmp, Indirect)),
    /*0x6D*/ Some(InstructionSignature::new(Adc, Absolute)),
    /*0x6E*/ Some(InstructionSignature::new(Ror, Absolute)),
    /*0x6F*/ None,
    /*0x70*/ Some(InstructionSignature::new(Bvs, Relative)),
    /*0x71*/ Some(InstructionSignature::new(Adc, IndirectIndexed)),
    /*0x72*/ None,
    /*0x73*/ None,
    /*0x74*/ None,
    /*0x75*/ Some(InstructionSignature::new(Adc, ZeroPageX)),
    /*0x76*/ Some(InstructionSignature::new(Ror, ZeroPageX)),
    /*0x77*/ None,
    /*0x78*/ Some(InstructionSignature::new(Sei, Implicit)),
    /*0x79*/ Some(InstructionSignature::new(Adc, AbsoluteY)),
    /*0x7A*/ None,
    /*0x7B*/ None,
    /*0x7C*/ None,
    /*0x7D*/ Some(InstructionSignature::new(Adc, AbsoluteX)),
    /*0x7E*/ Some(InstructionSignature::new(Ror, AbsoluteX)),
    /*0x7F*/ None,
    /*0x80*/ None,
    /*0x81*/ Some(InstructionSignature::new(Sta, IndexedIndirect)),
    /*0x82*/ None,
    /*0x83*/ None,
    /*0x84*/ Some(InstructionSignature::new(Sty, ZeroPage)),
    /*0x85*/ Some(InstructionSignature::new(Sta, ZeroPage)),
    /*0x86*/ Some(InstructionSignature::new(Stx, ZeroPage)),
    /*0x87*/ None,
    /*0x88*/ Some(InstructionSignature::new(Dey, Implicit)),
    /*0x89*/ None,
    /*0x8A*/ Some(InstructionSignature::new(Txa, Implicit)),
    /*0x8B*/ None,
    /*0x8C*/ Some(InstructionSignature::new(Sty, Absolute)),
    /*0x8D*/ Some(InstructionSignature::new(Sta, Absolute)),
    /*0x8E*/ Some(InstructionSignature::new(Stx, Absolute)),
    /*0x8F*/ None,
    /*0x90*/ Some(InstructionSignature::new(Bcc, Relative)),
    /*0x91*/ Some(InstructionSignature::new(Sta, IndirectIndexed)),
    /*0x92*/ None,
    /*0x93*/ None,
    /*0x94*/ Some(InstructionSignature::new(Sty, ZeroPageX)),
    /*0x95*/ Some(InstructionSignature::new(Sta, ZeroPageX)),
    /*0x96*/ Some(InstructionSignature::new(Stx, ZeroPageY)),
    /*0x97*/ None,
    /*0x98*/ Some(InstructionSignature::new(Tya, Implicit)),
    /*0x99*/ Some(InstructionSignature::new(Sta, AbsoluteY)),
    /*0x9A*/ Some(InstructionSignature::new(Txs, Implicit)),
    /*0x9B*/ None,
    /*0x9C*/ None,
    /*0x9D*/ Some(InstructionSignature::new(Sta, AbsoluteX)),
    /*0x9E*/ None,
    /*0x9F*/ None,
    /*0xA0*/ Some(InstructionSignature::new(Ldy, Immediate)),
    /*0xA1*/ Some(InstructionSignature::new(Lda, IndexedIndirect)),
    /*0xA2*/ Some(InstructionSignature::new(Ldx, Immediate)),
    /*0xA3*/ None,
    /*0xA4*/ Some(InstructionSignature::new(Ldy, ZeroPage)),
    /*0xA5*/ Some(InstructionSignature::new(Lda, ZeroPage)),
    /*0xA6*/ Some(InstructionSignature::new(Ldx, ZeroPage)),
    /*0xA7*/ None,
    /*0xA8*/ Some(InstructionSignature::new(Tay, Implicit)),
    /*0xA9*/ Some(InstructionSignature::new(Lda, Immediate)),
    /*0xAA*/ Some(InstructionSignature::new(Tax, Implicit)),
    /*0xAB*/ None,
    /*0xAC*/ Some(InstructionSignature::new(Ldy, Absolute)),
    /*0xAD*/ Some(InstructionSignature::new(Lda, Absolute)),
    /*0xAE*/ Some(InstructionSignature::new(Ldx, Absolute)),
    /*0xAF*/ None,
    /*0xB0*/ Some(InstructionSignature::new(Bcs, Relative)),
    /*0xB1*/ Some(InstructionSignature::new(Lda, IndirectIndexed)),
    /*0xB2*/ None,
    /*0xB3*/ None,
    /*0xB4*/ Some(InstructionSignature::new(Ldy, ZeroPageX)),
    /*0xB5*/ Some(InstructionSignature::new(Lda, ZeroPageX)),
    /*0xB6*/ Some(InstructionSignature::new(Ldx, ZeroPageY)),
    /*0xB7*/ None,
    /*0xB8*/ Some(InstructionSignature::new(Clv, Implicit)),
    /*0xB9*/ Some(InstructionSignature::new(Lda, AbsoluteY)),
    /*0xBA*/ Some(InstructionSignature::new(Tsx, Implicit)),
    /*0xBB*/ None,
    /*0xBC*/ Some(InstructionSignature::new(Ldy, AbsoluteX)),
    /*0xBD*/ Some(InstructionSignature::new(Lda, AbsoluteX)),
    /*0xBE*/ Some(InstructionSignature::new(Ldx, AbsoluteY)),
    /*0xBF*/ None,
    /*0xC0*/ Some(InstructionSignature::new(Cpy, Immediate)),
    /*0xC1*/ Some(InstructionSignature::new(Cmp, IndexedIndirect)),
    /*0xC2*/ None,
    /*0xC3*/ None,
    /*0xC4*/ Some(InstructionSignature::new(Cpy, ZeroPage)),
    /*0xC5*/ Some(InstructionSignature::new(Cmp, ZeroPage)),
    /*0xC6*/ Some(InstructionSignature::new(Dec, ZeroPage)),
    /*0xC7*/ None,
    /*0xC8*/ Some(InstructionSignature::new(Iny, Implicit)),
    /*0xC9*/ Some(InstructionSignature::new(Cmp, Immediate)),
    /*0xCA*/ Some(InstructionSignature::new(Dex, Implicit)),
    /*0xCB*/ None,
    /*0xCC*/ Some(InstructionSignature::new(Cpy, Absolute)),
    /*0xCD*/ Some(InstructionSignature::new(Cmp, Absolute)),
    /*0xCE*/ Some(InstructionSignature::new(Dec, Absolute)),
    /*0xCF*/ None,
    /*0xD0*/ Some(InstructionSignature::new(Bne, Relative)),
    /*0xD1*/ Some(InstructionSignature::new(Cmp, IndirectIndexed)),
    /*0xD2*/ None,
    /*0xD3*/ None,
    /*0xD4*/ None,
    /*0xD5*/ Some(InstructionSignature::new(Cmp, ZeroPageX)),
    /*0xD6*/ Some(InstructionSignature::new(Dec, ZeroPageX)),
    /*0xD7*/ None,
    /*0xD8*/ Some(InstructionSignature::new(Cld, Implicit)),
    /*0xD9*/ Some(InstructionSignature::new(Cmp, AbsoluteY)),
    /*0xDA*/ None,
    /*0xDB*/ None,
    /*0xDC*/ None,
    /*0xDD*/ Some(InstructionSignature::new(Cmp, AbsoluteX)),
    /*0xDE*/ Some(InstructionSignature::new(Dec, AbsoluteX)),
    /*0xDF*/ None,
    /*0xE0*/ Some(InstructionSignature::new(Cpx, Immediate)),
    /*0xE1*/ Some(InstructionSignature::new(Sbc, IndexedIndirect)),
    /*0xE2*/ None,
    /*0xE3*/ None,
    /*0xE4*/ Some(InstructionSignature::new(Cpx, ZeroPage)),
    /*0xE5*/ Some(InstructionSignature::new(Sbc, ZeroPage)),
    /*0xE6*/ Some(InstructionSignature::new(Inc, ZeroPage)),
    /*0xE7*/ None,
    /*0xE8*/ Some(InstructionSignature::new(Inx, Implicit)),
    /*0xE9*/ Some(InstructionSignature::new(Sbc, Immediate)),
    /*0xEA*/ Some(InstructionSignature::new(Nop, Implicit)),
    /*0xEB*/ None,
    /*0xEC*/ Some(InstructionSignature::new(Cpx, Absolute)),
    /*0xED*/ Some(InstructionSignature::new(Sbc, Absolute)),
    /*0xEE*/ Some(InstructionSignature::new(Inc, Absolute)),
    /*0xEF*/ None,
    /*0xF0*/ Some(InstructionSignature::new(Beq, Relative)),
    /*0xF1*/ Some(InstructionSignature::new(Sbc, IndirectIndexed)),
    /*0xF2*/ None,
    /*0xF3*/ None,
    /*0xF4*/ None,
    /*0xF5*/ Some(InstructionSignature::new(Sbc, ZeroPageX)),
    /*0xF6*/ Some(InstructionSignature::new(Inc, ZeroPageX)),
    /*0xF7*/ None,
    /*0xF8*/ Some(InstructionSignature::new(Sed, Implicit)),
    /*0xF9*/ Some(InstructionSignature::new(Sbc, AbsoluteY)),
    /*0xFA*/ None,
    /*0xFB*/ None,
    /*0xFC*/ None,
    /*0xFD*/ Some(InstructionSignature::new(Sbc, AbsoluteX)),
    /*0xFE*/ Some(InstructionSignature::new(Inc, AbsoluteX)),
    /*0xFF*/ None,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Ram;

    #[test]
    fn decodes_lda_immediate() {
        let bus = Bus::new(vec![Box::new(Ram::new().with_bytes_at(0, &[0xA9, 0x42]))]);
        let (instruction, bytes_used) = Instruction::fetch(0, 0, 0, &bus).unwrap();

        assert_eq!(instruction.opcode, Opcode::Lda);
        assert_eq!(instruction.addressing_mode, AddressingMode::Immediate);
        assert_eq!(bytes_used, 2);
    }

    #[test]
    fn unassigned_opcode_is_illegal() {
        let bus = Bus::new(vec![Box::new(Ram::new().with_bytes_at(0, &[0x02]))]);
        let err = Instruction::fetch(0, 0, 0, &bus).unwrap_err();
        assert_eq!(err, CpuError::IllegalOpcode { pc: 0, opcode: 0x02 });
    }

    #[test]
    fn every_legal_entry_agrees_with_its_own_addressing_mode_byte_count() {
        // Smoke-check that decoding never panics for any populated table entry.
        for opcode_byte in 0..=255u8 {
            if DECODE_TABLE[opcode_byte as usize].is_none() {
                continue;
            }
            let bus = Bus::new(vec![Box::new(Ram::new().with_bytes_at(0, &[opcode_byte, 0, 0]))]);
            Instruction::fetch(0, 0, 0, &bus).unwrap();
        }
    }
}
