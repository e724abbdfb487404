//! Intel 8085 opcode and register names.
//!
//! Only the names are kept here. The scanner uses them to tag
//! identifiers; nothing in the front-end validates operands against them.

/// Every 8085 mnemonic, upper-case.
pub static OPCODES: [&str; 80] = [
    "ACI", "ADC", "ADD", "ADI", "ANA", "ANI", "CALL", "CC",
    "CM", "CMA", "CMC", "CMP", "CNC", "CNZ", "CP", "CPE",
    "CPI", "CPO", "CZ", "DAA", "DAD", "DCR", "DCX", "DI",
    "EI", "HLT", "IN", "INR", "INX", "JC", "JM", "JMP",
    "JNC", "JNZ", "JP", "JPE", "JPO", "JZ", "LDA", "LDAX",
    "LHLD", "LXI", "MOV", "MVI", "NOP", "ORA", "ORI", "OUT",
    "PCHL", "POP", "PUSH", "RAL", "RAR", "RC", "RET", "RIM",
    "RLC", "RM", "RNC", "RNZ", "RP", "RPE", "RPO", "RRC",
    "RST", "RZ", "SBB", "SBI", "SHLD", "SIM", "SPHL", "STA",
    "STAX", "STC", "SUB", "SUI", "XCHG", "XRA", "XRI", "XTHL",
];

/// Registers, the stack pointer and the PSW pseudo-register, upper-case.
pub static REGISTERS: [&str; 10] = ["A", "B", "C", "D", "E", "H", "L", "M", "SP", "PSW"];

/// Expects upper-cased text.
pub fn is_opcode_name(name: &str) -> bool {
    OPCODES.binary_search(&name).is_ok()
}

/// Expects upper-cased text.
pub fn is_register_name(name: &str) -> bool {
    REGISTERS.contains(&name)
}

pub fn is_known_mnemonic_or_register(name: &str) -> bool {
    is_opcode_name(name) || is_register_name(name)
}
