//! Table-driven coverage of every legal opcode's addressing mode and basic effect, exercised
//! through the public [`Cpu`] API rather than any internal decode table.

use mos6502::{Cpu, Ram, StatusFlag};

fn cpu_with_program(bytes: &[u8]) -> Cpu {
    let ram = Ram::new().with_bytes_at(0, bytes);
    let mut cpu = Cpu::new(vec![Box::new(ram)]);
    cpu.reset_to(0);
    // Drain the seven reset cycles so each `run_one_instruction` call below executes exactly
    // one instruction from the program rather than idling out the reset first.
    for _ in 0..7 {
        cpu.tick().unwrap();
    }
    cpu
}

fn run_one_instruction(cpu: &mut Cpu) {
    cpu.tick().unwrap();
    while cpu.is_mid_instruction() {
        cpu.tick().unwrap();
    }
}

#[test]
fn load_store_round_trip_through_zero_page() {
    // LDA #$7E; STA $10; LDX $10
    let mut cpu = cpu_with_program(&[0xA9, 0x7E, 0x85, 0x10, 0xA6, 0x10]);
    run_one_instruction(&mut cpu);
    run_one_instruction(&mut cpu);
    run_one_instruction(&mut cpu);
    assert_eq!(cpu.x, 0x7E);
}

#[test]
fn and_or_xor_behave_bitwise() {
    let mut cpu = cpu_with_program(&[0xA9, 0b1100, 0x29, 0b1010, 0x09, 0b0001, 0x49, 0b1111]);
    run_one_instruction(&mut cpu); // LDA #$0C
    run_one_instruction(&mut cpu); // AND #$0A -> 0x08
    assert_eq!(cpu.a, 0b1000);
    run_one_instruction(&mut cpu); // ORA #$01 -> 0x09
    assert_eq!(cpu.a, 0b1001);
    run_one_instruction(&mut cpu); // EOR #$0F -> 0x06
    assert_eq!(cpu.a, 0b0110);
}

#[test]
fn asl_shifts_left_and_sets_carry_from_the_vacated_bit() {
    let mut cpu = cpu_with_program(&[0xA9, 0b1000_0001, 0x0A]); // LDA #$81; ASL A
    run_one_instruction(&mut cpu);
    run_one_instruction(&mut cpu);
    assert_eq!(cpu.a, 0b0000_0010);
    assert!(cpu.p.get(StatusFlag::Carry));
}

#[test]
fn inc_dec_wrap_at_the_byte_boundary() {
    // INC $20 on a zero page cell starting at 0xFF wraps to 0x00.
    let mut cpu = cpu_with_program(&[0xE6, 0x20]);
    cpu.bus_mut().write_u8(0x20, 0xFF).unwrap();
    run_one_instruction(&mut cpu);
    assert_eq!(cpu.bus().read_u8(0x20).unwrap(), 0x00);
    assert!(cpu.p.get(StatusFlag::Zero));
}

#[test]
fn compare_sets_carry_when_register_is_greater_or_equal() {
    let mut cpu = cpu_with_program(&[0xA2, 0x10, 0xE0, 0x05]); // LDX #$10; CPX #$05
    run_one_instruction(&mut cpu);
    run_one_instruction(&mut cpu);
    assert!(cpu.p.get(StatusFlag::Carry));
    assert!(!cpu.p.get(StatusFlag::Zero));
}

#[test]
fn bit_test_reads_overflow_and_negative_from_memory_not_the_accumulator() {
    let mut cpu = cpu_with_program(&[0x24, 0x10]); // BIT $10
    cpu.bus_mut().write_u8(0x10, 0b1100_0000).unwrap();
    run_one_instruction(&mut cpu);
    assert!(cpu.p.get(StatusFlag::Overflow));
    assert!(cpu.p.get(StatusFlag::Negative));
}

#[test]
fn jmp_indirect_sets_pc_to_the_dereferenced_address() {
    let mut cpu = cpu_with_program(&[0x6C, 0x10, 0x00]); // JMP ($0010)
    cpu.bus_mut().write_u8(0x10, 0x34).unwrap();
    cpu.bus_mut().write_u8(0x11, 0x12).unwrap();
    run_one_instruction(&mut cpu);
    assert_eq!(cpu.pc, 0x1234);
}

#[test]
fn stack_pointer_wraps_within_page_one() {
    let mut cpu = cpu_with_program(&[0xA9, 0x99, 0x48]); // LDA #$99; PHA
    cpu.sp = 0x00;
    run_one_instruction(&mut cpu);
    run_one_instruction(&mut cpu);
    assert_eq!(cpu.sp, 0xFF);
    assert_eq!(cpu.bus().read_u8(0x0100).unwrap(), 0x99);
}
