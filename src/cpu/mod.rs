pub mod addressable;
pub mod addressing_mode;
pub mod error;
pub mod instruction;
pub mod opcode;
pub mod register;
pub mod status;

use crate::bus::{Bus, BusDevice};

use addressable::Addressable;
use error::CpuError;
use instruction::Instruction;
use opcode::Opcode;
use register::Register;
use status::{Status, StatusFlag};

const RESET_VECTOR_ADDRESS: u16 = 0xFFFC;
const IRQ_VECTOR_ADDRESS: u16 = 0xFFFE;

const STACK_PAGE: u16 = 0x0100;

/// A MOS 6502 core: registers, processor status, and the bus of devices it drives.
///
/// The CPU owns its device list rather than borrowing one per call, so a host only has to
/// build a [`Cpu`] once and then repeatedly call [`Cpu::tick`].
pub struct Cpu {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub p: Status,
    bus: Bus,
    /// Cycles still owed for the instruction currently in flight. `tick` decrements this
    /// before fetching anything new.
    wait_cycles: u8,
    elapsed_cycles: u64,
}

impl Cpu {
    pub fn new(devices: Vec<Box<dyn BusDevice>>) -> Cpu {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            sp: 0,
            pc: 0,
            p: Status::initial(),
            bus: Bus::new(devices),
            wait_cycles: 0,
            elapsed_cycles: 0,
        }
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    pub fn elapsed_cycles(&self) -> u64 {
        self.elapsed_cycles
    }

    /// True while an instruction is still mid-flight (i.e. the last [`Cpu::tick`] only
    /// consumed a wait cycle rather than fetching a new instruction).
    pub fn is_mid_instruction(&self) -> bool {
        self.wait_cycles > 0
    }

    /// Reads `PC` from the reset vector at `0xFFFC` and initializes registers to their
    /// power-on values. Fallible because reading the vector itself goes through the bus.
    pub fn reset(&mut self) -> Result<(), CpuError> {
        let pc = self.bus.read_u16(RESET_VECTOR_ADDRESS)?;
        self.reset_to(pc);
        Ok(())
    }

    /// Initializes registers to their power-on values and jumps straight to `pc`, bypassing
    /// the reset vector. Infallible: no bus access is needed when the entry point is already
    /// known, which is what the conformance harness and most unit tests want.
    pub fn reset_to(&mut self, pc: u16) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0;
        self.p = Status::initial();
        self.pc = pc;
        // A real reset takes seven cycles before the CPU fetches its first instruction.
        self.wait_cycles = 7;
        self.elapsed_cycles = 0;
    }

    /// Advances the CPU by a single clock cycle. Most cycles just decrement the wait counter
    /// left over from the previous instruction; only when that counter reaches zero does this
    /// fetch, decode, and execute the next one, charging it its base cycle count (plus
    /// whatever page-crossing or taken-branch cycles the executor charges along the way).
    pub fn tick(&mut self) -> Result<(), CpuError> {
        if self.wait_cycles > 0 {
            self.wait_cycles -= 1;
            self.elapsed_cycles += 1;
            return Ok(());
        }

        let pc_at_fetch = self.pc;
        let (instruction, bytes_used) = Instruction::fetch(self.pc, self.x, self.y, &self.bus)?;
        self.pc = self.pc.wrapping_add(bytes_used);
        self.wait_cycles = base_cycles(instruction.opcode, instruction.addressing_mode) - 1;

        log::trace!(
            "{:04X}  {:<3} {}  a={:02X} x={:02X} y={:02X} sp={:02X} p={:?}",
            pc_at_fetch,
            instruction.opcode.mnemonic(),
            instruction.addressing_mode,
            self.a,
            self.x,
            self.y,
            self.sp,
            self.p,
        );

        let mut bus = std::mem::replace(&mut self.bus, Bus::new(Vec::new()));
        let result = self.execute_instruction(instruction.opcode, &instruction.addressable, &mut bus);
        self.bus = bus;
        result?;

        self.elapsed_cycles += 1;
        Ok(())
    }

    fn execute_instruction(
        &mut self,
        opcode: Opcode,
        addressable: &Addressable,
        bus: &mut Bus,
    ) -> Result<(), CpuError> {
        match opcode {
            Opcode::Lda => {
                let value = addressable.read(self, &*bus)?;
                self.write_register(Register::A, value);
            }
            Opcode::Ldx => {
                let value = addressable.read(self, &*bus)?;
                self.write_register(Register::X, value);
            }
            Opcode::Ldy => {
                let value = addressable.read(self, &*bus)?;
                self.write_register(Register::Y, value);
            }
            Opcode::Sta => addressable.try_write(self, bus, self.a)?,
            Opcode::Stx => addressable.try_write(self, bus, self.x)?,
            Opcode::Sty => addressable.try_write(self, bus, self.y)?,
            Opcode::Tax => self.write_register(Register::X, self.a),
            Opcode::Tay => self.write_register(Register::Y, self.a),
            Opcode::Txa => self.write_register(Register::A, self.x),
            Opcode::Tya => self.write_register(Register::A, self.y),
            Opcode::Tsx => self.write_register(Register::X, self.sp),
            Opcode::Txs => self.sp = self.x,

            Opcode::Pha => self.push_u8(bus, self.a)?,
            Opcode::Php => self.op_php(bus)?,
            Opcode::Pla => self.op_pla(bus)?,
            Opcode::Plp => self.op_plp(bus)?,

            Opcode::And => {
                let value = addressable.read(self, &*bus)?;
                self.write_register(Register::A, self.a & value);
            }
            Opcode::Eor => {
                let value = addressable.read(self, &*bus)?;
                self.write_register(Register::A, self.a ^ value);
            }
            Opcode::Ora => {
                let value = addressable.read(self, &*bus)?;
                self.write_register(Register::A, self.a | value);
            }
            Opcode::Bit => self.op_bit(addressable, &*bus)?,

            Opcode::Adc => self.op_adc(addressable, &*bus)?,
            Opcode::Sbc => self.op_sbc(addressable, &*bus)?,
            Opcode::Cmp => self.compare(self.a, addressable, &*bus)?,
            Opcode::Cpx => self.compare(self.x, addressable, &*bus)?,
            Opcode::Cpy => self.compare(self.y, addressable, &*bus)?,

            Opcode::Inc => {
                addressable.try_modify(self, bus, |v| v.wrapping_add(1))?;
            }
            Opcode::Inx => self.write_register(Register::X, self.x.wrapping_add(1)),
            Opcode::Iny => self.write_register(Register::Y, self.y.wrapping_add(1)),
            Opcode::Dec => {
                addressable.try_modify(self, bus, |v| v.wrapping_sub(1))?;
            }
            Opcode::Dex => self.write_register(Register::X, self.x.wrapping_sub(1)),
            Opcode::Dey => self.write_register(Register::Y, self.y.wrapping_sub(1)),

            Opcode::Asl => {
                let (input, _) = addressable.try_modify(self, bus, |v| v << 1)?;
                self.p.set(StatusFlag::Carry, input & 0b1000_0000 != 0);
            }
            Opcode::Lsr => {
                let (input, _) = addressable.try_modify(self, bus, |v| v >> 1)?;
                self.p.set(StatusFlag::Carry, input & 0b0000_0001 != 0);
            }
            Opcode::Rol => {
                let carry_in = self.p.get(StatusFlag::Carry) as u8;
                let (input, _) = addressable.try_modify(self, bus, move |v| (v << 1) | carry_in)?;
                self.p.set(StatusFlag::Carry, input & 0b1000_0000 != 0);
            }
            Opcode::Ror => {
                let carry_in = self.p.get(StatusFlag::Carry) as u8;
                let (input, _) = addressable.try_modify(self, bus, move |v| (v >> 1) | (carry_in << 7))?;
                self.p.set(StatusFlag::Carry, input & 0b0000_0001 != 0);
            }

            Opcode::Jmp => self.pc = addressable.address()?,
            Opcode::Jsr => self.op_jsr(addressable, bus)?,
            Opcode::Rts => self.op_rts(&*bus)?,

            Opcode::Bcc => self.branch(!self.p.get(StatusFlag::Carry), addressable)?,
            Opcode::Bcs => self.branch(self.p.get(StatusFlag::Carry), addressable)?,
            Opcode::Beq => self.branch(self.p.get(StatusFlag::Zero), addressable)?,
            Opcode::Bne => self.branch(!self.p.get(StatusFlag::Zero), addressable)?,
            Opcode::Bmi => self.branch(self.p.get(StatusFlag::Negative), addressable)?,
            Opcode::Bpl => self.branch(!self.p.get(StatusFlag::Negative), addressable)?,
            Opcode::Bvc => self.branch(!self.p.get(StatusFlag::Overflow), addressable)?,
            Opcode::Bvs => self.branch(self.p.get(StatusFlag::Overflow), addressable)?,

            Opcode::Clc => self.p.set(StatusFlag::Carry, false),
            Opcode::Cld => self.p.set(StatusFlag::DecimalMode, false),
            Opcode::Cli => self.p.set(StatusFlag::InterruptDisable, false),
            Opcode::Clv => self.p.set(StatusFlag::Overflow, false),
            Opcode::Sec => self.p.set(StatusFlag::Carry, true),
            Opcode::Sed => self.p.set(StatusFlag::DecimalMode, true),
            Opcode::Sei => self.p.set(StatusFlag::InterruptDisable, true),

            Opcode::Brk => self.op_brk(bus)?,
            Opcode::Nop => {}
            Opcode::Rti => self.op_rti(&*bus)?,
        }

        Ok(())
    }

    fn op_adc(&mut self, addressable: &Addressable, bus: &Bus) -> Result<(), CpuError> {
        let value = addressable.read(self, bus)?;
        let carry_in = self.p.get(StatusFlag::Carry) as u16;
        let sum = self.a as u16 + value as u16 + carry_in;
        let result = sum as u8;
        self.p.set(StatusFlag::Carry, sum > 0xFF);
        self.p
            .set(StatusFlag::Overflow, (!(self.a ^ value) & (self.a ^ result) & 0x80) != 0);
        self.write_register(Register::A, result);
        Ok(())
    }

    fn op_sbc(&mut self, addressable: &Addressable, bus: &Bus) -> Result<(), CpuError> {
        let value = addressable.read(self, bus)?;
        let inverted = !value;
        let carry_in = self.p.get(StatusFlag::Carry) as u16;
        let sum = self.a as u16 + inverted as u16 + carry_in;
        let result = sum as u8;
        self.p.set(StatusFlag::Carry, sum > 0xFF);
        self.p
            .set(StatusFlag::Overflow, (!(self.a ^ inverted) & (self.a ^ result) & 0x80) != 0);
        self.write_register(Register::A, result);
        Ok(())
    }

    fn compare(&mut self, register_value: u8, addressable: &Addressable, bus: &Bus) -> Result<(), CpuError> {
        let value = addressable.read(self, bus)?;
        let result = register_value.wrapping_sub(value);
        self.p.set(StatusFlag::Carry, register_value >= value);
        self.p.set(StatusFlag::Zero, register_value == value);
        self.p.set(StatusFlag::Negative, result & 0b1000_0000 != 0);
        Ok(())
    }

    fn op_bit(&mut self, addressable: &Addressable, bus: &Bus) -> Result<(), CpuError> {
        let value = addressable.read(self, bus)?;
        self.p.set(StatusFlag::Zero, (self.a & value) == 0);
        self.p.set(StatusFlag::Overflow, value & 0b0100_0000 != 0);
        self.p.set(StatusFlag::Negative, value & 0b1000_0000 != 0);
        Ok(())
    }

    fn branch(&mut self, condition: bool, addressable: &Addressable) -> Result<(), CpuError> {
        if !condition {
            return Ok(());
        }
        self.charge_internal_cycle();
        if addressable.page_boundary_crossed {
            self.charge_internal_cycle();
        }
        self.pc = addressable.address()?;
        Ok(())
    }

    fn op_jsr(&mut self, addressable: &Addressable, bus: &mut Bus) -> Result<(), CpuError> {
        let return_address = self.pc.wrapping_sub(1);
        self.push_u16(bus, return_address)?;
        self.pc = addressable.address()?;
        Ok(())
    }

    fn op_rts(&mut self, bus: &Bus) -> Result<(), CpuError> {
        let return_address = self.pull_u16(bus)?;
        self.pc = return_address.wrapping_add(1);
        Ok(())
    }

    fn op_brk(&mut self, bus: &mut Bus) -> Result<(), CpuError> {
        let return_address = self.pc.wrapping_add(1);
        self.push_u16(bus, return_address)?;

        let mut pushed_status = self.p;
        pushed_status.set(StatusFlag::Break, true);
        pushed_status.set(StatusFlag::Unused, true);
        self.push_u8(bus, pushed_status.0)?;

        self.p.set(StatusFlag::InterruptDisable, true);
        self.pc = bus.read_u16(IRQ_VECTOR_ADDRESS)?;
        Ok(())
    }

    fn op_rti(&mut self, bus: &Bus) -> Result<(), CpuError> {
        let status_byte = self.pull_u8(bus)?;
        self.write_register(Register::P, status_byte);
        self.pc = self.pull_u16(bus)?;
        Ok(())
    }

    fn op_php(&mut self, bus: &mut Bus) -> Result<(), CpuError> {
        let mut pushed_status = self.p;
        pushed_status.set(StatusFlag::Break, true);
        pushed_status.set(StatusFlag::Unused, true);
        self.push_u8(bus, pushed_status.0)
    }

    fn op_pla(&mut self, bus: &Bus) -> Result<(), CpuError> {
        let value = self.pull_u8(bus)?;
        self.write_register(Register::A, value);
        Ok(())
    }

    fn op_plp(&mut self, bus: &Bus) -> Result<(), CpuError> {
        let value = self.pull_u8(bus)?;
        self.write_register(Register::P, value);
        Ok(())
    }

    /// Writes a register, routing through the right flag/invariant rules for that register:
    /// `A`/`X`/`Y` update `Z`/`N`, `P` forces `Break` clear and `Unused` set, `Sp` is raw.
    fn write_register(&mut self, register: Register, value: u8) {
        match register {
            Register::A => {
                self.a = value;
                self.set_zero_negative(value);
            }
            Register::X => {
                self.x = value;
                self.set_zero_negative(value);
            }
            Register::Y => {
                self.y = value;
                self.set_zero_negative(value);
            }
            Register::Sp => self.sp = value,
            Register::P => {
                let mut status = Status(value);
                status.set(StatusFlag::Break, false);
                status.set(StatusFlag::Unused, true);
                self.p = status;
            }
        }
    }

    fn set_zero_negative(&mut self, value: u8) {
        self.p.set(StatusFlag::Zero, value == 0);
        self.p.set(StatusFlag::Negative, value & 0b1000_0000 != 0);
    }

    fn read_u8(&mut self, bus: &Bus, address: u16) -> Result<u8, CpuError> {
        bus.read_u8(address)
    }

    fn write_u8(&mut self, bus: &mut Bus, address: u16, value: u8) -> Result<(), CpuError> {
        bus.write_u8(address, value)
    }

    fn charge_internal_cycle(&mut self) {
        self.wait_cycles += 1;
    }

    fn push_u8(&mut self, bus: &mut Bus, value: u8) -> Result<(), CpuError> {
        let address = STACK_PAGE + self.sp as u16;
        bus.write_u8(address, value)?;
        self.sp = self.sp.wrapping_sub(1);
        Ok(())
    }

    fn pull_u8(&mut self, bus: &Bus) -> Result<u8, CpuError> {
        self.sp = self.sp.wrapping_add(1);
        let address = STACK_PAGE + self.sp as u16;
        bus.read_u8(address)
    }

    fn push_u16(&mut self, bus: &mut Bus, value: u16) -> Result<(), CpuError> {
        let [lo, hi] = value.to_le_bytes();
        self.push_u8(bus, hi)?;
        self.push_u8(bus, lo)?;
        Ok(())
    }

    fn pull_u16(&mut self, bus: &Bus) -> Result<u16, CpuError> {
        let lo = self.pull_u8(bus)?;
        let hi = self.pull_u8(bus)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }
}

/// Base cycle count for an (opcode, addressing mode) pair, not counting the extra cycles a
/// taken branch or an indexed access crossing a page boundary charges at execution time.
///
/// This core doesn't implement decimal-mode arithmetic: `D` is a plain status bit that `SED`/
/// `CLD` can flip, but `ADC`/`SBC` always do binary addition, matching the 2A03 variant the
/// reference conformance ROM was built against.
fn base_cycles(opcode: Opcode, mode: crate::cpu::addressing_mode::AddressingMode) -> u8 {
    use crate::cpu::addressing_mode::AddressingMode::*;

    match opcode {
        Opcode::Lda | Opcode::And | Opcode::Eor | Opcode::Ora | Opcode::Adc | Opcode::Sbc | Opcode::Cmp => {
            match mode {
                Immediate => 2,
                ZeroPage => 3,
                ZeroPageX => 4,
                Absolute => 4,
                AbsoluteX | AbsoluteY => 4,
                IndexedIndirect => 6,
                IndirectIndexed => 5,
                _ => unreachable!("no such addressing mode for {:?}", opcode),
            }
        }
        Opcode::Ldx => match mode {
            Immediate => 2,
            ZeroPage => 3,
            ZeroPageY => 4,
            Absolute => 4,
            AbsoluteY => 4,
            _ => unreachable!(),
        },
        Opcode::Ldy => match mode {
            Immediate => 2,
            ZeroPage => 3,
            ZeroPageX => 4,
            Absolute => 4,
            AbsoluteX => 4,
            _ => unreachable!(),
        },
        Opcode::Cpx | Opcode::Cpy => match mode {
            Immediate => 2,
            ZeroPage => 3,
            Absolute => 4,
            _ => unreachable!(),
        },
        Opcode::Sta => match mode {
            ZeroPage => 3,
            ZeroPageX => 4,
            Absolute => 4,
            AbsoluteX | AbsoluteY => 5,
            IndexedIndirect | IndirectIndexed => 6,
            _ => unreachable!(),
        },
        Opcode::Stx => match mode {
            ZeroPage => 3,
            ZeroPageY => 4,
            Absolute => 4,
            _ => unreachable!(),
        },
        Opcode::Sty => match mode {
            ZeroPage => 3,
            ZeroPageX => 4,
            Absolute => 4,
            _ => unreachable!(),
        },
        Opcode::Bit => match mode {
            ZeroPage => 3,
            Absolute => 4,
            _ => unreachable!(),
        },
        Opcode::Asl | Opcode::Lsr | Opcode::Rol | Opcode::Ror => match mode {
            Accumulator => 2,
            ZeroPage => 5,
            ZeroPageX => 6,
            Absolute => 6,
            AbsoluteX => 7,
            _ => unreachable!(),
        },
        Opcode::Inc | Opcode::Dec => match mode {
            ZeroPage => 5,
            ZeroPageX => 6,
            Absolute => 6,
            AbsoluteX => 7,
            _ => unreachable!(),
        },
        Opcode::Tax | Opcode::Tay | Opcode::Txa | Opcode::Tya | Opcode::Tsx | Opcode::Txs => 2,
        Opcode::Inx | Opcode::Iny | Opcode::Dex | Opcode::Dey => 2,
        Opcode::Pha | Opcode::Php => 3,
        Opcode::Pla | Opcode::Plp => 4,
        Opcode::Jmp => match mode {
            Absolute => 3,
            Indirect => 5,
            _ => unreachable!(),
        },
        Opcode::Jsr => 6,
        Opcode::Rts => 6,
        Opcode::Rti => 6,
        Opcode::Bcc
        | Opcode::Bcs
        | Opcode::Beq
        | Opcode::Bne
        | Opcode::Bmi
        | Opcode::Bpl
        | Opcode::Bvc
        | Opcode::Bvs => 2,
        Opcode::Clc | Opcode::Cld | Opcode::Cli | Opcode::Clv | Opcode::Sec | Opcode::Sed | Opcode::Sei => 2,
        Opcode::Brk => 7,
        Opcode::Nop => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Ram;

    fn cpu_with_program(bytes: &[u8]) -> Cpu {
        let ram = Ram::new().with_bytes_at(0, bytes);
        let mut cpu = Cpu::new(vec![Box::new(ram)]);
        cpu.reset_to(0);
        // Drain the seven reset cycles so callers can count instruction cycles from a clean
        // slate, same as a host would after waiting out a real hardware reset.
        for _ in 0..7 {
            cpu.tick().unwrap();
        }
        cpu
    }

    fn run(cpu: &mut Cpu, cycles: u32) {
        for _ in 0..cycles {
            cpu.tick().unwrap();
        }
    }

    #[test]
    fn lda_immediate_loads_accumulator_and_sets_flags() {
        let mut cpu = cpu_with_program(&[0xA9, 0x00]);
        run(&mut cpu, 2);
        assert_eq!(cpu.a, 0x00);
        assert!(cpu.p.get(StatusFlag::Zero));
        assert!(!cpu.p.get(StatusFlag::Negative));
    }

    #[test]
    fn adc_without_carry_in_adds_operands() {
        let mut cpu = cpu_with_program(&[0xA9, 0x10, 0x69, 0x05]); // LDA #$10; ADC #$05
        run(&mut cpu, 2 + 2);
        assert_eq!(cpu.a, 0x15);
        assert!(!cpu.p.get(StatusFlag::Carry));
    }

    #[test]
    fn adc_sets_carry_and_overflow_on_signed_overflow() {
        let mut cpu = cpu_with_program(&[0xA9, 0x7F, 0x69, 0x01]); // LDA #$7F; ADC #$01
        run(&mut cpu, 2 + 2);
        assert_eq!(cpu.a, 0x80);
        assert!(cpu.p.get(StatusFlag::Overflow));
        assert!(!cpu.p.get(StatusFlag::Carry));
    }

    #[test]
    fn sbc_borrows_when_carry_clear() {
        let mut cpu = cpu_with_program(&[0xA9, 0x05, 0xE9, 0x01]); // LDA #$05; SBC #$01 (C=0 -> borrow of 1)
        run(&mut cpu, 2 + 2);
        assert_eq!(cpu.a, 0x03);
        assert!(cpu.p.get(StatusFlag::Carry));
    }

    #[test]
    fn jsr_then_rts_returns_to_the_instruction_after_the_call() {
        // JSR $0006; BRK; BRK; INX
        let mut cpu = cpu_with_program(&[0x20, 0x06, 0x00, 0x00, 0x00, 0x00, 0x60]);
        run(&mut cpu, 6); // JSR
        assert_eq!(cpu.pc, 0x0006);
        run(&mut cpu, 6); // RTS
        assert_eq!(cpu.pc, 0x0003);
    }

    #[test]
    fn branch_crossing_a_page_costs_an_extra_cycle() {
        // BNE with a forward offset large enough to cross from page 0 to page 1.
        let mut program = vec![0xD0, 0x7F]; // BNE +127
        program.resize(0x81, 0xEA);
        let mut cpu = cpu_with_program(&program);
        cpu.p.set(StatusFlag::Zero, false);

        run(&mut cpu, 4); // base 2 + taken 1 + page-cross 1
        assert_eq!(cpu.pc, 0x0081);
    }

    #[test]
    fn reset_reads_the_reset_vector() {
        let mut ram = Ram::new();
        ram = ram.with_bytes_at(0xFFFC, &[0x00, 0x80]);
        let mut cpu = Cpu::new(vec![Box::new(ram)]);
        cpu.reset().unwrap();
        assert_eq!(cpu.pc, 0x8000);
        assert_eq!(cpu.sp, 0x00);
    }

    #[test]
    fn reset_primes_the_cycles_remaining_counter_to_seven() {
        let mut cpu = cpu_with_program(&[0xEA]);
        cpu.reset_to(0);
        assert_eq!(cpu.wait_cycles, 7);
        assert!(cpu.is_mid_instruction());
    }

    #[test]
    fn pha_then_pla_round_trips_the_accumulator() {
        let mut cpu = cpu_with_program(&[0xA9, 0x42, 0x48, 0xA9, 0x00, 0x68]); // LDA #$42; PHA; LDA #$00; PLA
        run(&mut cpu, 2 + 3 + 2 + 4);
        assert_eq!(cpu.a, 0x42);
    }

    #[test]
    fn php_then_plp_round_trips_status_with_break_forced_low() {
        let mut cpu = cpu_with_program(&[0x08, 0x28]); // PHP; PLP
        cpu.p.set(StatusFlag::Carry, true);
        run(&mut cpu, 3 + 4);
        assert!(cpu.p.get(StatusFlag::Carry));
        assert!(!cpu.p.get(StatusFlag::Break));
        assert!(cpu.p.get(StatusFlag::Unused));
    }

    #[test]
    fn illegal_opcode_surfaces_as_an_error() {
        let mut cpu = cpu_with_program(&[0x02]);
        assert_eq!(cpu.tick().unwrap_err(), CpuError::IllegalOpcode { pc: 0, opcode: 0x02 });
    }
}
