//! Countdown example
//!
//! Assembles a small program that counts down from 5, storing each value
//! to consecutive bytes, prints its listing, then traces every step with
//! its cycle cost.
//! Run with: `cargo run --example countdown`

use sim6502::{assemble, TraceKind, CPU, FlatMemory, MemoryBus};

const SOURCE: &str = r#"
        .ORG $0200
COUNT   .EQU 5
OUT     .EQU $40
START   LDX #COUNT
LOOP    TXA
        STA OUT-1,X     ; store COUNT..1 at OUT+COUNT-1..OUT
        DEX
        BNE LOOP
DONE    JMP DONE
"#;

fn main() {
    println!("=== 6502 Countdown ===\n");

    let output = match assemble(SOURCE) {
        Ok(output) => output,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
            std::process::exit(1);
        }
    };

    println!("Listing:");
    print!("{}", output.render_listing(SOURCE));
    println!();

    println!("Symbols:");
    for symbol in &output.symbols {
        println!("  {:<8} = ${:04X}", symbol.name, symbol.value);
    }
    println!();

    let start = output.symbol("START").unwrap_or(0x0200);
    let done = output.symbol("DONE").unwrap_or(0x0200);

    let mut memory = FlatMemory::new();
    memory.load(&output.image);
    memory.write(0xFFFC, start as u8);
    memory.write(0xFFFD, (start >> 8) as u8);

    let mut cpu = CPU::new(memory);

    println!("ADDR  OP   A  X  Y  SP  NV-BDIZC  CYC");
    while cpu.pc() != done {
        let result = cpu.step_traced(|record| {
            let name = match &record.kind {
                TraceKind::Instruction { metadata, .. } => metadata.mnemonic.to_string(),
                TraceKind::Interrupt { vector } => format!("INT ${:04X}", vector),
            };
            println!(
                "{:04X}  {:<4} {:02X} {:02X} {:02X} {:02X}  {:08b}  {}",
                record.address,
                name,
                record.a,
                record.x,
                record.y,
                record.sp,
                record.status,
                record.cycles
            );
        });
        if let Err(e) = result {
            eprintln!("Execution stopped: {}", e);
            std::process::exit(1);
        }
    }

    println!("\nTotal cycles: {}", cpu.cycles());
    print!("Memory at $40:");
    for address in 0x40..0x45 {
        print!(" {:02X}", cpu.memory().read(address));
    }
    println!();
}
