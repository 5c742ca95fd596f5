/// One of the 56 documented 6502 mnemonics, independent of addressing mode.
///
/// Undocumented/illegal opcodes are out of scope for this core: the decode table simply has
/// no entry for those bytes, and fetching one surfaces as [`crate::cpu::error::CpuError::IllegalOpcode`].
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Opcode {
    // Register operations
    /// Load a byte of memory into `A`.
    Lda,
    /// Load a byte of memory into `X`.
    Ldx,
    /// Load a byte of memory into `Y`.
    Ldy,
    /// Store the contents of `A` into memory.
    Sta,
    /// Store the contents of `X` into memory.
    Stx,
    /// Store the contents of `Y` into memory.
    Sty,
    Tax,
    Tay,
    Txa,
    Tya,

    // Stack operations
    Tsx,
    Txs,
    Pha,
    Php,
    Pla,
    Plp,

    // Logical operations
    And,
    Eor,
    Ora,
    /// Bit Test: AND `A` with memory without storing the result, setting `Z`/`V`/`N`.
    Bit,

    // Arithmetic
    Adc,
    Sbc,
    Cmp,
    Cpx,
    Cpy,

    // Increments & decrements
    Inc,
    Inx,
    Iny,
    Dec,
    Dex,
    Dey,

    // Shifts
    Asl,
    Lsr,
    Rol,
    Ror,

    // Jumps & calls
    Jmp,
    Jsr,
    Rts,

    // Branches
    Bcs,
    Bcc,
    Beq,
    Bne,
    Bmi,
    Bpl,
    Bvc,
    Bvs,

    // Status flag changes
    Clc,
    Cld,
    Cli,
    Clv,
    Sec,
    Sed,
    Sei,

    // System functions
    Brk,
    Nop,
    Rti,
}

impl Opcode {
    /// The conventional uppercase assembly mnemonic, used for trace logging.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Lda => "LDA",
            Opcode::Ldx => "LDX",
            Opcode::Ldy => "LDY",
            Opcode::Sta => "STA",
            Opcode::Stx => "STX",
            Opcode::Sty => "STY",
            Opcode::Tax => "TAX",
            Opcode::Tay => "TAY",
            Opcode::Txa => "TXA",
            Opcode::Tya => "TYA",
            Opcode::Tsx => "TSX",
            Opcode::Txs => "TXS",
            Opcode::Pha => "PHA",
            Opcode::Php => "PHP",
            Opcode::Pla => "PLA",
            Opcode::Plp => "PLP",
            Opcode::And => "AND",
            Opcode::Eor => "EOR",
            Opcode::Ora => "ORA",
            Opcode::Bit => "BIT",
            Opcode::Adc => "ADC",
            Opcode::Sbc => "SBC",
            Opcode::Cmp => "CMP",
            Opcode::Cpx => "CPX",
            Opcode::Cpy => "CPY",
            Opcode::Inc => "INC",
            Opcode::Inx => "INX",
            Opcode::Iny => "INY",
            Opcode::Dec => "DEC",
            Opcode::Dex => "DEX",
            Opcode::Dey => "DEY",
            Opcode::Asl => "ASL",
            Opcode::Lsr => "LSR",
            Opcode::Rol => "ROL",
            Opcode::Ror => "ROR",
            Opcode::Jmp => "JMP",
            Opcode::Jsr => "JSR",
            Opcode::Rts => "RTS",
            Opcode::Bcs => "BCS",
            Opcode::Bcc => "BCC",
            Opcode::Beq => "BEQ",
            Opcode::Bne => "BNE",
            Opcode::Bmi => "BMI",
            Opcode::Bpl => "BPL",
            Opcode::Bvc => "BVC",
            Opcode::Bvs => "BVS",
            Opcode::Clc => "CLC",
            Opcode::Cld => "CLD",
            Opcode::Cli => "CLI",
            Opcode::Clv => "CLV",
            Opcode::Sec => "SEC",
            Opcode::Sed => "SED",
            Opcode::Sei => "SEI",
            Opcode::Brk => "BRK",
            Opcode::Nop => "NOP",
            Opcode::Rti => "RTI",
        }
    }
}
