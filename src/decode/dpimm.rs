// License below.

//! Data-processing-immediate decoders: PC-relative address, add/sub
//! immediate, logical immediate, wide move, bitfield, extract.

use crate::bits::{bit, bits, sign_extend};
use crate::decode::{decode_with_table, DecodeEntry};
use crate::instruction::{ExtendType, InstrType, Instruction, RegType};

/// Entry point for the data-processing-immediate class table.
pub fn decode(word: u32, address: u64, inst: &mut Instruction) -> bool {
    decode_with_table(TABLE, word, address, inst)
}

fn decode_pc_rel_addr(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let op = bit(word, 31);
    let immlo = bits(word, 29, 30);
    let immhi = bits(word, 5, 23);
    let rd = bits(word, 0, 4) as u8;

    inst.rd = rd;
    inst.rd_type = RegType::X;
    inst.has_imm = true;
    inst.is_64bit = true;

    let imm21 = (immhi << 2) | immlo;
    let offset = sign_extend(imm21, 21);

    if op == 0 {
        inst.imm = offset;
        inst.mnemonic = crate::instruction::Mnemonic::from_str("adr");
        inst.kind = InstrType::Adr;
    } else {
        inst.imm = offset << 12;
        inst.mnemonic = crate::instruction::Mnemonic::from_str("adrp");
        inst.kind = InstrType::Adrp;
    }
    true
}

fn decode_add_sub_imm(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let sf = bit(word, 31);
    let op = bit(word, 30);
    let s = bit(word, 29);
    let shift = bits(word, 22, 23);
    let imm12 = bits(word, 10, 21);
    let rn = bits(word, 5, 9) as u8;
    let rd = bits(word, 0, 4) as u8;

    if shift > 1 {
        return false;
    }

    inst.rd = rd;
    inst.rn = rn;
    inst.imm = imm12 as i64;
    inst.shift_amount = if shift == 1 { 12 } else { 0 };
    inst.has_imm = true;
    inst.is_64bit = sf != 0;
    inst.set_flags = s != 0;

    inst.rd_type = if sf != 0 { RegType::X } else { RegType::W };
    inst.rn_type = inst.rd_type;

    if op == 0 {
        set_mnemonic(inst, if s != 0 { "adds" } else { "add" });
        inst.kind = if s != 0 { InstrType::Adds } else { InstrType::Add };

        if s == 0 && imm12 == 0 && shift == 0 {
            set_mnemonic(inst, "mov");
            inst.kind = InstrType::Mov;
            inst.has_imm = false;
            inst.rm = rn;
            inst.rm_type = inst.rn_type;
        }
    } else {
        set_mnemonic(inst, if s != 0 { "subs" } else { "sub" });
        inst.kind = if s != 0 { InstrType::Subs } else { InstrType::Sub };
    }

    if s != 0 && rd == 31 {
        if op == 1 {
            set_mnemonic(inst, "cmp");
            inst.kind = InstrType::Cmp;
        } else {
            set_mnemonic(inst, "cmn");
            inst.kind = InstrType::Cmn;
        }
        inst.rd_type = if sf != 0 { RegType::X } else { RegType::W };
    }

    if s == 0 {
        if rn == 31 {
            inst.rn_type = RegType::Sp;
        }
        if rd == 31 {
            inst.rd_type = RegType::Sp;
        }
    }

    if inst.kind == InstrType::Mov {
        inst.rm_type = inst.rn_type;
    }

    true
}

fn decode_logical_imm(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let sf = bit(word, 31);
    let opc = bits(word, 29, 30);
    let immr = bits(word, 16, 21);
    let imms = bits(word, 10, 15);
    let rn = bits(word, 5, 9) as u8;
    let rd = bits(word, 0, 4) as u8;

    // Packed (immr:imms) form, not the fully decoded bitmask — see DESIGN.md.
    inst.imm = ((immr << 6) | imms) as i64;
    inst.rd = rd;
    inst.rn = rn;
    inst.has_imm = true;
    inst.is_64bit = sf != 0;
    inst.rd_type = if sf != 0 { RegType::X } else { RegType::W };
    inst.rn_type = inst.rd_type;

    match opc {
        0x00 => {
            set_mnemonic(inst, "and");
            inst.kind = InstrType::And;
        }
        0x01 => {
            set_mnemonic(inst, "orr");
            inst.kind = InstrType::Orr;
            if rn == 31 {
                set_mnemonic(inst, "mov");
                inst.kind = InstrType::Mov;
            }
        }
        0x02 => {
            set_mnemonic(inst, "eor");
            inst.kind = InstrType::Eor;
        }
        0x03 => {
            set_mnemonic(inst, "ands");
            inst.kind = InstrType::Ands;
            inst.set_flags = true;
            if rd == 31 {
                set_mnemonic(inst, "tst");
                inst.kind = InstrType::Tst;
            }
        }
        _ => return false,
    }
    true
}

fn decode_move_wide_imm(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let sf = bit(word, 31);
    let opc = bits(word, 29, 30);
    let hw = bits(word, 21, 22);
    let imm16 = bits(word, 5, 20);
    let rd = bits(word, 0, 4) as u8;

    if sf == 0 && hw >= 2 {
        return false;
    }

    inst.rd = rd;
    inst.imm = imm16 as i64;
    inst.shift_amount = (hw * 16) as u8;
    inst.has_imm = true;
    inst.is_64bit = sf != 0;
    inst.rd_type = if sf != 0 { RegType::X } else { RegType::W };

    match opc {
        0x00 => {
            set_mnemonic(inst, "movn");
            inst.kind = InstrType::Movn;
        }
        0x02 => {
            set_mnemonic(inst, "movz");
            inst.kind = InstrType::Movz;
        }
        0x03 => {
            set_mnemonic(inst, "movk");
            inst.kind = InstrType::Movk;
        }
        _ => return false,
    }
    true
}

fn decode_bitfield(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let sf = bit(word, 31);
    let opc = bits(word, 29, 30);
    let n = bit(word, 22);
    let immr = bits(word, 16, 21);
    let imms = bits(word, 10, 15);
    let rn = bits(word, 5, 9) as u8;
    let rd = bits(word, 0, 4) as u8;

    if n != sf {
        return false;
    }

    let width_max = if sf != 0 { 63 } else { 31 };

    inst.rd = rd;
    inst.rn = rn;
    inst.has_imm = true;
    inst.is_64bit = sf != 0;
    inst.rd_type = if sf != 0 { RegType::X } else { RegType::W };
    inst.rn_type = inst.rd_type;
    inst.imm = ((immr << 6) | imms) as i64;
    inst.shift_amount = immr as u8;

    match opc {
        0x00 => {
            set_mnemonic(inst, "sbfm");
            inst.kind = InstrType::Lsl;
            if immr != 0 && imms == width_max {
                set_mnemonic(inst, "asr");
                inst.kind = InstrType::Asr;
            }
        }
        0x01 => {
            set_mnemonic(inst, "bfm");
            inst.kind = InstrType::Lsl;
        }
        0x02 => {
            set_mnemonic(inst, "ubfm");
            inst.kind = InstrType::Lsl;
            if imms == width_max {
                set_mnemonic(inst, "lsr");
                inst.kind = InstrType::Lsr;
            }
            if immr == 0 && imms < width_max {
                set_mnemonic(inst, "lsl");
                inst.kind = InstrType::Lsl;
            }
        }
        _ => return false,
    }
    true
}

fn decode_extract(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let sf = bit(word, 31);
    let n = bit(word, 22);
    let rm = bits(word, 16, 20) as u8;
    let imms = bits(word, 10, 15);
    let rn = bits(word, 5, 9) as u8;
    let rd = bits(word, 0, 4) as u8;

    if sf != n {
        return false;
    }
    if sf == 0 && imms >= 32 {
        return false;
    }

    inst.rd = rd;
    inst.rn = rn;
    inst.rm = rm;
    inst.imm = imms as i64;
    inst.has_imm = true;
    inst.is_64bit = sf != 0;
    inst.rd_type = if sf != 0 { RegType::X } else { RegType::W };
    inst.rn_type = inst.rd_type;
    inst.rm_type = inst.rd_type;
    inst.extend_type = ExtendType::Lsl;

    if rn == rm {
        set_mnemonic(inst, "ror");
        inst.kind = InstrType::Ror;
    } else {
        set_mnemonic(inst, "extr");
        inst.kind = InstrType::Extr;
    }
    true
}

fn set_mnemonic(inst: &mut Instruction, name: &str) {
    inst.mnemonic = crate::instruction::Mnemonic::from_str(name);
}

static TABLE: &[DecodeEntry] = &[
    DecodeEntry { mask: 0x1F000000, value: 0x10000000, handler: decode_pc_rel_addr, name: "pc_rel_addr" },
    DecodeEntry { mask: 0x1F000000, value: 0x11000000, handler: decode_add_sub_imm, name: "add_sub_imm" },
    DecodeEntry { mask: 0x1F800000, value: 0x12000000, handler: decode_logical_imm, name: "logical_imm" },
    DecodeEntry { mask: 0x1F800000, value: 0x12800000, handler: decode_move_wide_imm, name: "move_wide_imm" },
    DecodeEntry { mask: 0x1F800000, value: 0x13000000, handler: decode_bitfield, name: "bitfield" },
    DecodeEntry { mask: 0x7FA00000, value: 0x13800000, handler: decode_extract, name: "extract" },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Instruction;

    #[test]
    fn decodes_add_immediate() {
        let mut inst = Instruction::unknown(0x91000420, 0x1000);
        assert!(decode(0x91000420, 0x1000, &mut inst));
        assert_eq!(inst.mnemonic, "add");
        assert_eq!(inst.rd, 0);
        assert_eq!(inst.rn, 1);
        assert_eq!(inst.imm, 1);
    }

    #[test]
    fn subs_to_xzr_becomes_cmp() {
        // cmp x1, x0  ==  subs xzr, x1, x0 (register form lives in dpreg, this
        // exercises the immediate form's own CMP alias instead).
        let mut inst = Instruction::unknown(0, 0x1000);
        // SUBS XZR, X1, #0  => 0xF1 00 00 3F : sf=1 op=1 S=1 shift=0 imm12=0 Rn=1 Rd=31
        let word = 0xF100003Fu32;
        assert!(decode(word, 0x1000, &mut inst));
        assert_eq!(inst.mnemonic, "cmp");
        assert_eq!(inst.kind, InstrType::Cmp);
        assert_eq!(inst.rd_type, RegType::X);
    }

    #[test]
    fn movz_decodes() {
        let mut inst = Instruction::unknown(0, 0x1000);
        assert!(decode(0xD2800020, 0x1000, &mut inst));
        assert_eq!(inst.mnemonic, "movz");
        assert_eq!(inst.imm, 1);
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
