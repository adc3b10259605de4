// License below.

//! Branch, exception and system decoders: unconditional/conditional/compare/
//! test-bit branches, register-indirect branches, HINT family, MRS.

use crate::bits::{bit, bits, sign_extend};
use crate::decode::{decode_with_table, DecodeEntry};
use crate::instruction::{InstrType, Instruction, Mnemonic, RegType};

/// Entry point for the branch/exception/system class table.
pub fn decode(word: u32, address: u64, inst: &mut Instruction) -> bool {
    decode_with_table(TABLE, word, address, inst)
}

fn set_mnemonic(inst: &mut Instruction, name: &str) {
    inst.mnemonic = Mnemonic::from_str(name);
}

fn decode_uncond_branch_imm(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let op = bit(word, 31);
    let imm26 = bits(word, 0, 25);

    inst.imm = sign_extend(imm26, 26) << 2;
    inst.has_imm = true;

    if op == 0 {
        set_mnemonic(inst, "b");
        inst.kind = InstrType::B;
    } else {
        set_mnemonic(inst, "bl");
        inst.kind = InstrType::Bl;
    }
    true
}

const COND_NAMES: [&str; 16] = [
    "eq", "ne", "cs", "cc", "mi", "pl", "vs", "vc",
    "hi", "ls", "ge", "lt", "gt", "le", "al", "nv",
];

fn decode_cond_branch_imm(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let imm19 = bits(word, 5, 23);
    let cond = bits(word, 0, 3) as u8;

    inst.imm = sign_extend(imm19, 19) << 2;
    inst.has_imm = true;
    inst.cond = cond;
    inst.kind = InstrType::BCond;

    set_mnemonic(inst, &format!("b.{}", COND_NAMES[cond as usize]));
    true
}

fn decode_compare_branch(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let sf = bit(word, 31);
    let op = bit(word, 24);
    let imm19 = bits(word, 5, 23);
    let rt = bits(word, 0, 4) as u8;

    inst.rd = rt;
    inst.rd_type = reg_or_zero(rt, sf != 0);
    inst.imm = sign_extend(imm19, 19) << 2;
    inst.has_imm = true;
    inst.is_64bit = sf != 0;

    if op == 0 {
        set_mnemonic(inst, "cbz");
        inst.kind = InstrType::Cbz;
    } else {
        set_mnemonic(inst, "cbnz");
        inst.kind = InstrType::Cbnz;
    }
    true
}

fn decode_test_branch(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let b5 = bit(word, 31);
    let op = bit(word, 24);
    let b40 = bits(word, 19, 23);
    let imm14 = bits(word, 5, 18);
    let rt = bits(word, 0, 4) as u8;

    let bit_pos = ((b5 << 5) | b40) as u8;

    inst.rd = rt;
    let is_64 = bit_pos >= 32;
    inst.rd_type = reg_or_zero(rt, is_64);
    inst.imm = sign_extend(imm14, 14) << 2;
    inst.shift_amount = bit_pos;
    inst.has_imm = true;
    inst.is_64bit = is_64;

    if op == 0 {
        set_mnemonic(inst, "tbz");
        inst.kind = InstrType::Tbz;
    } else {
        set_mnemonic(inst, "tbnz");
        inst.kind = InstrType::Tbnz;
    }
    true
}

fn decode_uncond_branch_reg(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let opc = bits(word, 21, 24);
    let op2 = bits(word, 16, 20);
    let op3 = bits(word, 10, 15);
    let rn = bits(word, 5, 9) as u8;
    let op4 = bits(word, 0, 4);

    inst.rn = rn;
    inst.rn_type = if rn == 31 { RegType::Xzr } else { RegType::X };
    inst.has_imm = false;
    inst.is_64bit = true;

    if op2 != 31 || op4 != 0 {
        return false;
    }

    match opc {
        0x00 if op3 == 0 => {
            set_mnemonic(inst, "br");
            inst.kind = InstrType::Br;
            true
        }
        0x01 if op3 == 0 => {
            set_mnemonic(inst, "blr");
            inst.kind = InstrType::Blr;
            true
        }
        0x02 if op3 == 0 => {
            set_mnemonic(inst, "ret");
            inst.kind = InstrType::Ret;
            true
        }
        0x04 if op3 == 0 && rn == 31 => {
            set_mnemonic(inst, "eret");
            inst.kind = InstrType::Eret;
            true
        }
        0x05 if op3 == 0 && rn == 31 => {
            set_mnemonic(inst, "drps");
            inst.kind = InstrType::Drps;
            true
        }
        _ => false,
    }
}

const HINT_NAMES: [&str; 6] = ["nop", "yield", "wfe", "wfi", "sev", "sevl"];
const HINT_KINDS: [InstrType; 6] = [
    InstrType::Nop, InstrType::Yield, InstrType::Wfe,
    InstrType::Wfi, InstrType::Sev, InstrType::Sevl,
];

fn decode_system(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let op0 = bits(word, 19, 20);
    let op1 = bits(word, 16, 18);
    let crn = bits(word, 12, 15);
    let crm = bits(word, 8, 11);
    let op2 = bits(word, 5, 7);
    let rt = bits(word, 0, 4) as u8;
    let l = bit(word, 21);

    if op0 == 0 && op1 == 3 && crn == 2 && rt == 31 && crm == 0 && op2 < 6 {
        let i = op2 as usize;
        set_mnemonic(inst, HINT_NAMES[i]);
        inst.kind = HINT_KINDS[i];
        return true;
    }

    if l == 1 && rt != 31 {
        inst.rd = rt;
        inst.rd_type = RegType::X;
        inst.is_64bit = true;
        inst.has_imm = false;
        set_mnemonic(inst, "mrs");
        inst.kind = InstrType::Mrs;
        return true;
    }

    false
}

fn reg_or_zero(idx: u8, is_64: bool) -> RegType {
    if idx == 31 {
        if is_64 { RegType::Xzr } else { RegType::Wzr }
    } else if is_64 {
        RegType::X
    } else {
        RegType::W
    }
}

static TABLE: &[DecodeEntry] = &[
    DecodeEntry { mask: 0x7C000000, value: 0x14000000, handler: decode_uncond_branch_imm, name: "uncond_branch_imm" },
    DecodeEntry { mask: 0x7E000000, value: 0x34000000, handler: decode_compare_branch, name: "compare_branch" },
    DecodeEntry { mask: 0x7E000000, value: 0x36000000, handler: decode_test_branch, name: "test_branch" },
    DecodeEntry { mask: 0xFF000010, value: 0x54000000, handler: decode_cond_branch_imm, name: "cond_branch_imm" },
    DecodeEntry { mask: 0xFE000000, value: 0xD6000000, handler: decode_uncond_branch_reg, name: "uncond_branch_reg" },
    DecodeEntry { mask: 0xFFC00000, value: 0xD5000000, handler: decode_system, name: "system" },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Instruction;

    #[test]
    fn decodes_unconditional_branch() {
        let mut inst = Instruction::unknown(0, 0x1000);
        assert!(decode(0x14000010, 0x1000, &mut inst));
        assert_eq!(inst.mnemonic, "b");
        assert_eq!(inst.imm, 0x40);
    }

    #[test]
    fn decodes_ret() {
        let mut inst = Instruction::unknown(0, 0x1000);
        assert!(decode(0xD65F03C0, 0x1000, &mut inst));
        assert_eq!(inst.mnemonic, "ret");
        assert_eq!(inst.rn, 30);
    }

    #[test]
    fn decodes_mrs_sp_el0() {
        let mut inst = Instruction::unknown(0, 0x1000);
        assert!(decode(0xD5384100, 0x1000, &mut inst));
        assert_eq!(inst.mnemonic, "mrs");
        assert_eq!(inst.rd, 0);
    }

    #[test]
    fn register_branch_requires_fixed_fields() {
        let mut inst = Instruction::unknown(0, 0x1000);
        // op2 != 0b11111 must fail.
        let word = 0xD6000000 | (0b11110 << 16);
        assert!(!decode_uncond_branch_reg(word, 0x1000, &mut inst));
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
