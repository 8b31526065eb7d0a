//! WASM API for the simulator.
//!
//! Provides JavaScript-callable interfaces for processor control, state
//! inspection, interrupt lines and program loading.

use crate::{assemble, parse_intel_hex, FlatMemory, MemoryBus, MemoryImage, CPU};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// Result of assembly operation
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct AssemblyResult {
    success: bool,
    start_addr: u16,
    byte_count: usize,
    error_message: Option<String>,
    error_line: Option<usize>,
}

#[wasm_bindgen]
impl AssemblyResult {
    #[wasm_bindgen(getter)]
    pub fn success(&self) -> bool {
        self.success
    }

    /// Lowest address written by the program.
    #[wasm_bindgen(getter)]
    pub fn start_addr(&self) -> u16 {
        self.start_addr
    }

    #[wasm_bindgen(getter)]
    pub fn byte_count(&self) -> usize {
        self.byte_count
    }

    #[wasm_bindgen(getter)]
    pub fn error_message(&self) -> Option<String> {
        self.error_message.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn error_line(&self) -> Option<usize> {
        self.error_line
    }
}

/// Main simulator interface for JavaScript
#[wasm_bindgen]
pub struct Simulator {
    cpu: CPU<FlatMemory>,
    on_step: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl Simulator {
    /// Create a simulator with zeroed memory
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Simulator {
            cpu: CPU::new(FlatMemory::new()),
            on_step: None,
        }
    }

    /// Register a callback invoked with the address of every executed step
    pub fn set_step_callback(&mut self, callback: js_sys::Function) {
        self.on_step = Some(callback);
    }

    /// Execute a single instruction after servicing pending interrupts.
    ///
    /// An exception thrown by the step callback is returned as the error once
    /// the step has finished.
    pub fn step(&mut self) -> Result<(), JsError> {
        let on_step = self.on_step.as_ref();
        let mut callback_error = None;
        self.cpu
            .step_traced(|record| {
                let Some(callback) = on_step else { return };
                if callback_error.is_none() {
                    callback_error = callback
                        .call1(&JsValue::NULL, &JsValue::from(record.address))
                        .err();
                }
            })
            .map_err(|e| JsError::new(&e.to_string()))?;

        match callback_error {
            Some(thrown) => Err(JsError::new(&format!(
                "step callback failed: {}",
                thrown.as_string().unwrap_or_else(|| format!("{:?}", thrown))
            ))),
            None => Ok(()),
        }
    }

    /// Execute multiple cycles and return actual cycles executed
    pub fn run_for_cycles(&mut self, cycles: u32) -> Result<u32, JsError> {
        self.cpu
            .run_for_cycles(cycles as u64)
            .map(|c| c as u32)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Re-run the reset sequence; memory is kept
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Zero all memory and reset the processor
    pub fn clear(&mut self) {
        self.cpu.memory_mut().reset();
        self.cpu.reset();
    }

    /// Raise the IRQ line
    pub fn request_irq(&mut self) {
        self.cpu.request_irq();
    }

    /// Latch a non-maskable interrupt
    pub fn request_nmi(&mut self) {
        self.cpu.request_nmi();
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64 // Convert u64 to f64 for JavaScript
    }

    // Flag getters
    #[wasm_bindgen(getter)]
    pub fn flag_n(&self) -> bool {
        self.cpu.flag_n()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_v(&self) -> bool {
        self.cpu.flag_v()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_b(&self) -> bool {
        self.cpu.flag_b()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_d(&self) -> bool {
        self.cpu.flag_d()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_i(&self) -> bool {
        self.cpu.flag_i()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_z(&self) -> bool {
        self.cpu.flag_z()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_c(&self) -> bool {
        self.cpu.flag_c()
    }

    /// Set the program counter
    pub fn set_pc(&mut self, addr: u16) {
        self.cpu.set_pc(addr);
    }

    // Memory access methods

    /// Read a single byte from memory
    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.memory().read(addr)
    }

    /// Write a single byte to memory
    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.cpu.memory_mut().write(addr, value);
    }

    /// Copy a 256-byte page of memory (for efficient display)
    pub fn memory_page(&self, page: u8) -> js_sys::Uint8Array {
        let start = (page as usize) << 8;
        js_sys::Uint8Array::from(&self.cpu.memory().as_slice()[start..start + 256])
    }

    /// Assemble source, load it and point PC at its lowest address
    pub fn assemble_and_load(&mut self, source: String) -> AssemblyResult {
        match assemble(&source) {
            Ok(output) => {
                let start_addr = self.load_image(&output.image);
                AssemblyResult {
                    success: true,
                    start_addr,
                    byte_count: output.image.len(),
                    error_message: None,
                    error_line: None,
                }
            }
            Err(errors) => {
                // Report the first error
                let first_error = errors.first();
                AssemblyResult {
                    success: false,
                    start_addr: 0,
                    byte_count: 0,
                    error_message: first_error.map(|e| e.message.clone()),
                    error_line: first_error.map(|e| e.line),
                }
            }
        }
    }

    /// Load Intel HEX text and point PC at its lowest address
    pub fn load_hex(&mut self, text: &str) -> Result<u16, JsError> {
        let image = parse_intel_hex(text).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(self.load_image(&image))
    }
}

impl Simulator {
    fn load_image(&mut self, image: &MemoryImage) -> u16 {
        self.cpu.memory_mut().load(image);
        let start = image.iter().next().map(|(address, _)| address).unwrap_or(0);
        self.cpu.set_pc(start);
        start
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn step_reports_callback_exception() {
        let mut simulator = Simulator::new();
        simulator.set_step_callback(js_sys::Function::new_no_args("throw 'stop here'"));

        let err = simulator.step().err().map(|e| e.message());

        assert_eq!(err.as_deref(), Some("step callback failed: stop here"));
        // The BRK at $0000 still ran
        assert_eq!(simulator.cycles(), 7.0);
    }

    #[wasm_bindgen_test]
    fn step_with_quiet_callback_succeeds() {
        let mut simulator = Simulator::new();
        simulator.set_step_callback(js_sys::Function::new_with_args("address", "return address;"));

        assert!(simulator.step().is_ok());
        assert!(simulator.flag_i());
    }

    #[wasm_bindgen_test]
    fn assemble_and_load_points_pc_at_program() {
        let mut simulator = Simulator::new();
        let result = simulator.assemble_and_load(" .ORG $0300\n LDA #$42".to_string());

        assert!(result.success());
        assert_eq!(result.start_addr(), 0x0300);
        simulator.step().map_err(|e| e.message()).unwrap();
        assert_eq!(simulator.a(), 0x42);
    }
}
