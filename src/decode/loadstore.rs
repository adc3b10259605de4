// License below.

//! Load/store decoders: unsigned-immediate, register-offset, unscaled/
//! pre/post-index, pairs, PC-relative literal loads, exclusive/ordered
//! accesses and the ARMv8.1 atomic-memory-operation/CAS families.

use crate::bits::{bit, bits, sign_extend};
use crate::decode::{decode_with_table, DecodeEntry};
use crate::instruction::{AddrMode, ExtendType, InstrType, Instruction, Mnemonic, RegType};

/// Entry point for the load/store class table.
pub fn decode(word: u32, address: u64, inst: &mut Instruction) -> bool {
    decode_with_table(TABLE, word, address, inst)
}

fn set_mnemonic(inst: &mut Instruction, name: &str) {
    inst.mnemonic = Mnemonic::from_str(name);
}

/// One row of the `(size<<2)|opc` general-register load/store table.
struct GprLsInfo {
    size_opc: u8,
    mnemonic: &'static str,
    kind: InstrType,
    reg_type: RegType,
    is_64bit: bool,
}

const GPR_LS_INFO: &[GprLsInfo] = &[
    GprLsInfo { size_opc: 0x00, mnemonic: "strb",  kind: InstrType::Strb,  reg_type: RegType::W, is_64bit: false },
    GprLsInfo { size_opc: 0x01, mnemonic: "ldrb",  kind: InstrType::Ldrb,  reg_type: RegType::W, is_64bit: false },
    GprLsInfo { size_opc: 0x02, mnemonic: "ldrsb", kind: InstrType::Ldrsb, reg_type: RegType::X, is_64bit: true  },
    GprLsInfo { size_opc: 0x03, mnemonic: "ldrsb", kind: InstrType::Ldrsb, reg_type: RegType::W, is_64bit: false },
    GprLsInfo { size_opc: 0x04, mnemonic: "strh",  kind: InstrType::Strh,  reg_type: RegType::W, is_64bit: false },
    GprLsInfo { size_opc: 0x05, mnemonic: "ldrh",  kind: InstrType::Ldrh,  reg_type: RegType::W, is_64bit: false },
    GprLsInfo { size_opc: 0x06, mnemonic: "ldrsh", kind: InstrType::Ldrsh, reg_type: RegType::X, is_64bit: true  },
    GprLsInfo { size_opc: 0x07, mnemonic: "ldrsh", kind: InstrType::Ldrsh, reg_type: RegType::W, is_64bit: false },
    GprLsInfo { size_opc: 0x08, mnemonic: "str",   kind: InstrType::Str,   reg_type: RegType::W, is_64bit: false },
    GprLsInfo { size_opc: 0x09, mnemonic: "ldr",   kind: InstrType::Ldr,   reg_type: RegType::W, is_64bit: false },
    GprLsInfo { size_opc: 0x0A, mnemonic: "ldrsw", kind: InstrType::Ldrsw, reg_type: RegType::X, is_64bit: true  },
    GprLsInfo { size_opc: 0x0C, mnemonic: "str",   kind: InstrType::Str,   reg_type: RegType::X, is_64bit: true  },
    GprLsInfo { size_opc: 0x0D, mnemonic: "ldr",   kind: InstrType::Ldr,   reg_type: RegType::X, is_64bit: true  },
];

fn find_gpr_ls_info(size_opc: u8) -> Option<&'static GprLsInfo> {
    GPR_LS_INFO.iter().find(|e| e.size_opc == size_opc)
}

const SIMD_TYPES: [RegType; 4] = [RegType::B, RegType::H, RegType::S, RegType::D];

fn decode_ls_unsigned_imm(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let size = bits(word, 30, 31);
    let v = bit(word, 26);
    let opc = bits(word, 22, 23);
    let imm12 = bits(word, 10, 21);
    let rn = bits(word, 5, 9) as u8;
    let rt = bits(word, 0, 4) as u8;

    inst.rn = rn;
    inst.rd = rt;
    inst.rn_type = if rn == 31 { RegType::Sp } else { RegType::X };
    inst.addr_mode = AddrMode::ImmUnsigned;
    inst.has_imm = true;
    inst.imm = (imm12 as i64) << size;

    if v == 0 {
        let size_opc = ((size << 2) | opc) as u8;
        let info = match find_gpr_ls_info(size_opc) {
            Some(info) => info,
            None => return false,
        };
        set_mnemonic(inst, info.mnemonic);
        inst.kind = info.kind;
        inst.rd_type = info.reg_type;
        inst.is_64bit = info.is_64bit;
    } else {
        if size > 3 {
            return false;
        }
        inst.rd_type = SIMD_TYPES[size as usize];
        match opc {
            0 => { set_mnemonic(inst, "str"); inst.kind = InstrType::Str; }
            1 => { set_mnemonic(inst, "ldr"); inst.kind = InstrType::Ldr; }
            _ => return false,
        }
    }
    true
}

fn decode_ls_reg_offset(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let size = bits(word, 30, 31);
    let v = bit(word, 26);
    let opc = bits(word, 22, 23);
    let rm = bits(word, 16, 20) as u8;
    let option = bits(word, 13, 15);
    let s = bit(word, 12);
    let rn = bits(word, 5, 9) as u8;
    let rt = bits(word, 0, 4) as u8;

    inst.rn = rn;
    inst.rd = rt;
    inst.rm = rm;
    inst.rn_type = if rn == 31 { RegType::Sp } else { RegType::X };
    inst.has_imm = false;

    inst.extend_type = ExtendType::from_option(option);
    inst.shift_amount = if s != 0 { size as u8 } else { 0 };
    inst.rm_type = if option == 0b011 || option == 0b111 { RegType::X } else { RegType::W };
    inst.addr_mode = if option == 0b011 { AddrMode::RegOffset } else { AddrMode::RegExtend };

    if v == 0 {
        let size_opc = ((size << 2) | opc) as u8;
        let info = match find_gpr_ls_info(size_opc) {
            Some(info) => info,
            None => return false,
        };
        set_mnemonic(inst, info.mnemonic);
        inst.kind = info.kind;
        inst.rd_type = info.reg_type;
        inst.is_64bit = info.is_64bit;
    } else {
        if size > 3 {
            return false;
        }
        inst.rd_type = SIMD_TYPES[size as usize];
        match opc {
            0 => { set_mnemonic(inst, "str"); inst.kind = InstrType::Str; }
            1 => { set_mnemonic(inst, "ldr"); inst.kind = InstrType::Ldr; }
            _ => return false,
        }
    }
    true
}

struct UnscaledInfo {
    size_opc: u8,
    base_name: &'static str,
    unscaled_name: &'static str,
    kind: InstrType,
    reg_type: RegType,
    is_64bit: bool,
}

const UNSCALED_INFO: &[UnscaledInfo] = &[
    UnscaledInfo { size_opc: 0x00, base_name: "strb",  unscaled_name: "sturb",  kind: InstrType::Strb,  reg_type: RegType::W, is_64bit: false },
    UnscaledInfo { size_opc: 0x01, base_name: "ldrb",  unscaled_name: "ldurb",  kind: InstrType::Ldrb,  reg_type: RegType::W, is_64bit: false },
    UnscaledInfo { size_opc: 0x02, base_name: "ldrsb", unscaled_name: "ldursb", kind: InstrType::Ldrsb, reg_type: RegType::X, is_64bit: true  },
    UnscaledInfo { size_opc: 0x03, base_name: "ldrsb", unscaled_name: "ldursb", kind: InstrType::Ldrsb, reg_type: RegType::W, is_64bit: false },
    UnscaledInfo { size_opc: 0x04, base_name: "strh",  unscaled_name: "sturh",  kind: InstrType::Strh,  reg_type: RegType::W, is_64bit: false },
    UnscaledInfo { size_opc: 0x05, base_name: "ldrh",  unscaled_name: "ldurh",  kind: InstrType::Ldrh,  reg_type: RegType::W, is_64bit: false },
    UnscaledInfo { size_opc: 0x06, base_name: "ldrsh", unscaled_name: "ldursh", kind: InstrType::Ldrsh, reg_type: RegType::X, is_64bit: true  },
    UnscaledInfo { size_opc: 0x07, base_name: "ldrsh", unscaled_name: "ldursh", kind: InstrType::Ldrsh, reg_type: RegType::W, is_64bit: false },
    UnscaledInfo { size_opc: 0x08, base_name: "str",   unscaled_name: "stur",   kind: InstrType::Str,   reg_type: RegType::W, is_64bit: false },
    UnscaledInfo { size_opc: 0x09, base_name: "ldr",   unscaled_name: "ldur",   kind: InstrType::Ldr,   reg_type: RegType::W, is_64bit: false },
    UnscaledInfo { size_opc: 0x0A, base_name: "ldrsw", unscaled_name: "ldursw", kind: InstrType::Ldrsw, reg_type: RegType::X, is_64bit: true  },
    UnscaledInfo { size_opc: 0x0C, base_name: "str",   unscaled_name: "stur",   kind: InstrType::Str,   reg_type: RegType::X, is_64bit: true  },
    UnscaledInfo { size_opc: 0x0D, base_name: "ldr",   unscaled_name: "ldur",   kind: InstrType::Ldr,   reg_type: RegType::X, is_64bit: true  },
];

fn decode_ls_unscaled_imm(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let size = bits(word, 30, 31);
    let v = bit(word, 26);
    let opc = bits(word, 22, 23);
    let imm9 = bits(word, 12, 20);
    let idx = bits(word, 10, 11);
    let rn = bits(word, 5, 9) as u8;
    let rt = bits(word, 0, 4) as u8;

    inst.imm = sign_extend(imm9, 9);
    inst.rn = rn;
    inst.rd = rt;
    inst.rn_type = if rn == 31 { RegType::Sp } else { RegType::X };
    inst.has_imm = true;

    inst.addr_mode = match idx {
        0 => AddrMode::ImmSigned,
        1 => AddrMode::PostIndex,
        2 => return false,
        _ => AddrMode::PreIndex,
    };

    if v == 0 {
        let size_opc = ((size << 2) | opc) as u8;
        let info = match UNSCALED_INFO.iter().find(|e| e.size_opc == size_opc) {
            Some(info) => info,
            None => return false,
        };
        set_mnemonic(inst, if idx == 0 { info.unscaled_name } else { info.base_name });
        inst.kind = info.kind;
        inst.rd_type = info.reg_type;
        inst.is_64bit = info.is_64bit;
    } else {
        if size > 3 {
            return false;
        }
        inst.rd_type = SIMD_TYPES[size as usize];
        match opc {
            0 => { set_mnemonic(inst, if idx == 0 { "stur" } else { "str" }); inst.kind = InstrType::Str; }
            1 => { set_mnemonic(inst, if idx == 0 { "ldur" } else { "ldr" }); inst.kind = InstrType::Ldr; }
            _ => return false,
        }
    }
    true
}

fn decode_ls_pair(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let opc = bits(word, 30, 31);
    let v = bit(word, 26);
    let idx = bits(word, 23, 24);
    let l = bit(word, 22);
    let imm7 = bits(word, 15, 21);
    let rt2 = bits(word, 10, 14) as u8;
    let rn = bits(word, 5, 9) as u8;
    let rt = bits(word, 0, 4) as u8;

    inst.rd = rt;
    inst.rt2 = rt2;
    inst.rn = rn;
    inst.rn_type = if rn == 31 { RegType::Sp } else { RegType::X };
    inst.has_imm = true;

    inst.addr_mode = match idx {
        1 => AddrMode::PostIndex,
        2 => AddrMode::ImmSigned,
        3 => AddrMode::PreIndex,
        _ => return false,
    };

    if v == 0 {
        match opc {
            0x00 => {
                inst.imm = sign_extend(imm7, 7) << 2;
                inst.rd_type = RegType::W;
                set_mnemonic(inst, if l != 0 { "ldp" } else { "stp" });
                inst.kind = if l != 0 { InstrType::Ldp } else { InstrType::Stp };
            }
            0x01 => {
                if l == 0 {
                    return false;
                }
                inst.imm = sign_extend(imm7, 7) << 2;
                inst.rd_type = RegType::X;
                inst.is_64bit = true;
                set_mnemonic(inst, "ldpsw");
                inst.kind = InstrType::Ldpsw;
            }
            0x02 => {
                inst.imm = sign_extend(imm7, 7) << 3;
                inst.rd_type = RegType::X;
                inst.is_64bit = true;
                set_mnemonic(inst, if l != 0 { "ldp" } else { "stp" });
                inst.kind = if l != 0 { InstrType::Ldp } else { InstrType::Stp };
            }
            _ => return false,
        }
    } else {
        const SIMD_PAIR_SHIFT: [u32; 3] = [2, 3, 4];
        const SIMD_PAIR_TYPE: [RegType; 3] = [RegType::S, RegType::D, RegType::Q];
        if opc > 2 {
            return false;
        }
        let opc = opc as usize;
        inst.imm = sign_extend(imm7, 7) << SIMD_PAIR_SHIFT[opc];
        inst.rd_type = SIMD_PAIR_TYPE[opc];
        set_mnemonic(inst, if l != 0 { "ldp" } else { "stp" });
        inst.kind = if l != 0 { InstrType::Ldp } else { InstrType::Stp };
    }
    true
}

fn decode_load_literal(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let opc = bits(word, 30, 31);
    let v = bit(word, 26);
    let imm19 = bits(word, 5, 23);
    let rt = bits(word, 0, 4) as u8;

    inst.imm = sign_extend(imm19, 19) << 2;
    inst.rd = rt;
    inst.has_imm = true;
    inst.addr_mode = AddrMode::Literal;

    set_mnemonic(inst, "ldr");
    inst.kind = InstrType::Ldr;

    if v == 0 {
        const GPR_LITERAL: [(RegType, bool, &str); 3] = [
            (RegType::W, false, "ldr"),
            (RegType::X, true, "ldr"),
            (RegType::X, true, "ldrsw"),
        ];
        if opc > 2 {
            return false;
        }
        let (reg_type, is_64bit, name) = GPR_LITERAL[opc as usize];
        inst.rd_type = reg_type;
        inst.is_64bit = is_64bit;
        set_mnemonic(inst, name);
        if opc == 2 {
            inst.kind = InstrType::Ldrsw;
        }
    } else {
        const SIMD_LITERAL: [RegType; 3] = [RegType::S, RegType::D, RegType::Q];
        if opc > 2 {
            return false;
        }
        inst.rd_type = SIMD_LITERAL[opc as usize];
    }
    true
}

fn append_suffix(inst: &mut Instruction, suffix: char) {
    let mut s = inst.mnemonic.as_str().to_string();
    s.push(suffix);
    set_mnemonic(inst, &s);
}

fn decode_load_store_exclusive(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let size = bits(word, 30, 31);
    let o2 = bit(word, 23);
    let l = bit(word, 22);
    let o1 = bit(word, 21);
    let rs = bits(word, 16, 20) as u8;
    let o0 = bit(word, 15);
    let rt2 = bits(word, 10, 14) as u8;
    let rn = bits(word, 5, 9) as u8;
    let rt = bits(word, 0, 4) as u8;

    inst.rd = rt;
    inst.rn = rn;
    inst.rm = rs;
    inst.rt2 = rt2;
    inst.rn_type = if rn == 31 { RegType::Sp } else { RegType::X };
    inst.has_imm = false;
    inst.addr_mode = AddrMode::ImmUnsigned;

    inst.is_64bit = size == 3;
    inst.rd_type = if inst.is_64bit { RegType::X } else { RegType::W };
    inst.rm_type = RegType::W;

    inst.is_acquire = o0 != 0;
    inst.is_release = o1 != 0;

    if o2 == 0 {
        if l == 1 {
            match (o1, o0) {
                (0, 0) => { set_mnemonic(inst, "ldxr"); inst.kind = InstrType::Ldxr; }
                (0, _) => { set_mnemonic(inst, "ldaxr"); inst.kind = InstrType::Ldaxr; }
                (_, 0) => { set_mnemonic(inst, "ldxp"); inst.kind = InstrType::Ldxp; }
                _ => { set_mnemonic(inst, "ldaxp"); inst.kind = InstrType::Ldaxp; }
            }
        } else {
            match (o1, o0) {
                (0, 0) => { set_mnemonic(inst, "stxr"); inst.kind = InstrType::Stxr; }
                (0, _) => { set_mnemonic(inst, "stlxr"); inst.kind = InstrType::Stlxr; }
                (_, 0) => { set_mnemonic(inst, "stxp"); inst.kind = InstrType::Stxp; }
                _ => { set_mnemonic(inst, "stlxp"); inst.kind = InstrType::Stlxp; }
            }
        }
    } else if l == 1 {
        if o0 == 1 {
            set_mnemonic(inst, "ldar");
            inst.kind = InstrType::Ldar;
        } else {
            set_mnemonic(inst, "ldlar");
            inst.kind = InstrType::Ldlar;
        }
    } else if o0 == 1 {
        set_mnemonic(inst, "stlr");
        inst.kind = InstrType::Stlr;
    } else {
        set_mnemonic(inst, "stllr");
        inst.kind = InstrType::Stllr;
    }

    if size == 0 {
        append_suffix(inst, 'b');
        inst.rd_type = RegType::W;
    } else if size == 1 {
        append_suffix(inst, 'h');
        inst.rd_type = RegType::W;
    }
    true
}

fn atomic_suffix(acquire: bool, release: bool) -> &'static str {
    match (acquire, release) {
        (true, true) => "al",
        (true, false) => "a",
        (false, true) => "l",
        (false, false) => "",
    }
}

const ATOMIC_OPS: [(&str, InstrType); 8] = [
    ("ldadd", InstrType::Ldadd),
    ("ldclr", InstrType::Ldclr),
    ("ldeor", InstrType::Ldeor),
    ("ldset", InstrType::Ldset),
    ("ldsmax", InstrType::Ldsmax),
    ("ldsmin", InstrType::Ldsmin),
    ("ldumax", InstrType::Ldumax),
    ("ldumin", InstrType::Ldumin),
];

fn decode_atomic_memory_ops(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let size = bits(word, 30, 31);
    let v = bit(word, 26);
    let a = bit(word, 23);
    let r = bit(word, 22);
    let rs = bits(word, 16, 20) as u8;
    let o3 = bit(word, 15);
    let opc = bits(word, 12, 14);
    let rn = bits(word, 5, 9) as u8;
    let rt = bits(word, 0, 4) as u8;

    if v != 0 {
        return false;
    }

    inst.rd = rt;
    inst.rn = rn;
    inst.rm = rs;
    inst.rn_type = if rn == 31 { RegType::Sp } else { RegType::X };
    inst.has_imm = false;
    inst.addr_mode = AddrMode::ImmUnsigned;
    inst.is_acquire = a != 0;
    inst.is_release = r != 0;

    inst.is_64bit = size == 3;
    inst.rd_type = if inst.is_64bit { RegType::X } else { RegType::W };
    inst.rm_type = inst.rd_type;

    let suffix = atomic_suffix(a != 0, r != 0);
    let size_suffix = if size == 0 {
        inst.rd_type = RegType::W;
        inst.rm_type = RegType::W;
        "b"
    } else if size == 1 {
        inst.rd_type = RegType::W;
        inst.rm_type = RegType::W;
        "h"
    } else {
        ""
    };

    if o3 == 0 {
        let (name, kind) = ATOMIC_OPS[opc as usize];
        set_mnemonic(inst, &format!("{name}{suffix}{size_suffix}"));
        inst.kind = kind;
    } else {
        set_mnemonic(inst, &format!("swp{suffix}{size_suffix}"));
        inst.kind = InstrType::Swp;
    }
    true
}

fn decode_cas(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let size = bits(word, 30, 31);
    let o1 = bit(word, 22);
    let rs = bits(word, 16, 20) as u8;
    let o0 = bit(word, 15);
    let rn = bits(word, 5, 9) as u8;
    let rt = bits(word, 0, 4) as u8;

    inst.rd = rt;
    inst.rn = rn;
    inst.rm = rs;
    inst.rn_type = if rn == 31 { RegType::Sp } else { RegType::X };
    inst.has_imm = false;
    inst.addr_mode = AddrMode::ImmUnsigned;
    inst.is_acquire = o0 != 0;
    inst.is_release = o1 != 0;
    inst.kind = InstrType::Cas;

    inst.is_64bit = size == 3;
    inst.rd_type = if inst.is_64bit { RegType::X } else { RegType::W };
    inst.rm_type = inst.rd_type;

    let suffix = atomic_suffix(o0 != 0, o1 != 0);
    let size_suffix = if size == 0 {
        inst.rd_type = RegType::W;
        inst.rm_type = RegType::W;
        "b"
    } else if size == 1 {
        inst.rd_type = RegType::W;
        inst.rm_type = RegType::W;
        "h"
    } else {
        ""
    };

    set_mnemonic(inst, &format!("cas{suffix}{size_suffix}"));
    true
}

static TABLE: &[DecodeEntry] = &[
    DecodeEntry { mask: 0x3F000000, value: 0x08000000, handler: decode_load_store_exclusive, name: "load_store_exclusive" },
    DecodeEntry { mask: 0x3FA07C00, value: 0x08A07C00, handler: decode_cas, name: "cas" },
    DecodeEntry { mask: 0x3B200C00, value: 0x38200000, handler: decode_atomic_memory_ops, name: "atomic_memory_ops" },
    DecodeEntry { mask: 0x3A000000, value: 0x28000000, handler: decode_ls_pair, name: "ls_pair" },
    DecodeEntry { mask: 0x3B000000, value: 0x18000000, handler: decode_load_literal, name: "load_literal" },
    DecodeEntry { mask: 0x3B000000, value: 0x39000000, handler: decode_ls_unsigned_imm, name: "ls_unsigned_imm" },
    DecodeEntry { mask: 0x3B200C00, value: 0x38200800, handler: decode_ls_reg_offset, name: "ls_reg_offset" },
    DecodeEntry { mask: 0x3B200000, value: 0x38000000, handler: decode_ls_unscaled_imm, name: "ls_unscaled_imm" },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Instruction;

    #[test]
    fn decodes_ldr_unsigned_offset() {
        let mut inst = Instruction::unknown(0, 0x1000);
        // ldr x0, [x1, #8]
        let word = 0xF9400420u32;
        assert!(decode(word, 0x1000, &mut inst));
        assert_eq!(inst.mnemonic, "ldr");
        assert_eq!(inst.imm, 8);
    }

    #[test]
    fn decodes_stp_pre_index() {
        let mut inst = Instruction::unknown(0, 0x1000);
        // stp x29, x30, [sp, #-16]!
        let word = 0xA9BF7BFDu32;
        assert!(decode(word, 0x1000, &mut inst));
        assert_eq!(inst.mnemonic, "stp");
        assert_eq!(inst.addr_mode, AddrMode::PreIndex);
    }

    #[test]
    fn decodes_ldaxr() {
        let mut inst = Instruction::unknown(0, 0x1000);
        let word = 0xC85FFC00u32;
        assert!(decode(word, 0x1000, &mut inst));
        assert_eq!(inst.mnemonic, "ldaxr");
    }
}

/*
Licensed to the Apache Software Foundation (ASF) under one
or more contributor license agreements.  See the NOTICE file
distributed with this work for additional information
regarding copyright ownership.  The ASF licenses this file
to you under the Apache License, Version 2.0 (the
"License"); you may not use this file except in compliance
with the License.  You may obtain a copy of the License at

  http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing,
software distributed under the License is distributed on an
"AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
KIND, either express or implied.  See the License for the
specific language governing permissions and limitations
under the License.
*/
