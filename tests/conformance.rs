//! Runs Klaus Dormann's `6502_functional_test` binary against the core.
//!
//! The ROM isn't vendored in this repository. Point `MOS6502_FUNCTIONAL_TEST_ROM` at a copy of
//! `6502_functional_test.bin` to run it:
//!
//! ```text
//! MOS6502_FUNCTIONAL_TEST_ROM=/path/to/6502_functional_test.bin cargo test --test conformance -- --ignored
//! ```
//!
//! The test loads the image flat at address 0, starts execution at 0x0400 (the entry point the
//! test ROM expects), and runs until either the success trap (PC stops advancing, parked on a
//! `JMP *` at 0x3469) or a step budget is exhausted.

use std::env;
use std::fs;

use mos6502::{Cpu, Ram};

#[test]
#[ignore]
fn functional_test_rom_reaches_its_success_trap() {
    let rom_path = match env::var("MOS6502_FUNCTIONAL_TEST_ROM") {
        Ok(path) => path,
        Err(_) => {
            eprintln!("skipping: MOS6502_FUNCTIONAL_TEST_ROM not set");
            return;
        }
    };

    let image = fs::read(&rom_path).expect("failed to read functional test ROM");
    let ram = Ram::new().with_bytes_at(0, &image);
    let mut cpu = Cpu::new(vec![Box::new(ram)]);
    cpu.reset_to(0x0400);

    let mut last_pc = cpu.pc;
    let mut stall_count = 0;

    for _ in 0..100_000_000u64 {
        cpu.tick().expect("functional test ROM hit an unexpected core error");

        if cpu.pc == last_pc {
            stall_count += 1;
            if stall_count > 8 {
                break;
            }
        } else {
            stall_count = 0;
        }
        last_pc = cpu.pc;
    }

    assert_eq!(
        cpu.pc, 0x3469,
        "test ROM trapped at {:#06x} instead of the documented success address",
        cpu.pc
    );
}
