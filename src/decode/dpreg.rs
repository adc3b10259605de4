// License below.

//! Data-processing-register decoders: shifted add/sub, shifted logical,
//! conditional select family, 1-/2-/3-source register ops.

use crate::bits::{bit, bits};
use crate::decode::{decode_with_table, DecodeEntry};
use crate::instruction::{ExtendType, InstrType, Instruction, Mnemonic, RegType};

/// Entry point for the data-processing-register class table.
pub fn decode(word: u32, address: u64, inst: &mut Instruction) -> bool {
    decode_with_table(TABLE, word, address, inst)
}

fn set_mnemonic(inst: &mut Instruction, name: &str) {
    inst.mnemonic = Mnemonic::from_str(name);
}

fn decode_add_sub_shifted_reg(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let sf = bit(word, 31);
    let op = bit(word, 30);
    let s = bit(word, 29);
    let shift = bits(word, 22, 23);
    let rm = bits(word, 16, 20) as u8;
    let imm6 = bits(word, 10, 15) as u8;
    let rn = bits(word, 5, 9) as u8;
    let rd = bits(word, 0, 4) as u8;

    inst.rd = rd;
    inst.rn = rn;
    inst.rm = rm;
    inst.shift_amount = imm6;
    inst.has_imm = false;
    inst.is_64bit = sf != 0;
    inst.set_flags = s != 0;

    inst.rd_type = if sf != 0 { RegType::X } else { RegType::W };
    inst.rn_type = inst.rd_type;
    inst.rm_type = inst.rd_type;

    inst.extend_type = match shift {
        0 => ExtendType::Lsl,
        1 => ExtendType::Lsr,
        2 => ExtendType::Asr,
        _ => return false,
    };

    if op == 0 {
        set_mnemonic(inst, if s != 0 { "adds" } else { "add" });
        inst.kind = if s != 0 { InstrType::Adds } else { InstrType::Add };
    } else {
        set_mnemonic(inst, if s != 0 { "subs" } else { "sub" });
        inst.kind = if s != 0 { InstrType::Subs } else { InstrType::Sub };
    }

    if s != 0 && rd == 31 {
        set_mnemonic(inst, if op == 1 { "cmp" } else { "cmn" });
        inst.kind = if op == 1 { InstrType::Cmp } else { InstrType::Cmn };
        inst.rd_type = if sf != 0 { RegType::X } else { RegType::W };
    }

    if op == 1 && rn == 31 && s == 0 {
        set_mnemonic(inst, "neg");
        inst.kind = InstrType::Neg;
        inst.rn_type = if sf != 0 { RegType::X } else { RegType::W };
    }

    if s == 0 && !(op == 1 && rn == 31 && rd != 31) {
        if rn == 31 {
            inst.rn_type = RegType::Sp;
        }
        if rd == 31 {
            inst.rd_type = RegType::Sp;
        }
    }
    true
}

fn decode_logical_shifted_reg(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let sf = bit(word, 31);
    let opc = bits(word, 29, 30);
    let shift = bits(word, 22, 23);
    let n = bit(word, 21);
    let rm = bits(word, 16, 20) as u8;
    let imm6 = bits(word, 10, 15) as u8;
    let rn = bits(word, 5, 9) as u8;
    let rd = bits(word, 0, 4) as u8;

    inst.rd = rd;
    inst.rn = rn;
    inst.rm = rm;
    inst.shift_amount = imm6;
    inst.has_imm = false;
    inst.is_64bit = sf != 0;

    inst.rd_type = if sf != 0 { RegType::X } else { RegType::W };
    inst.rn_type = inst.rd_type;
    inst.rm_type = inst.rd_type;

    inst.extend_type = match shift {
        0 => ExtendType::Lsl,
        1 => ExtendType::Lsr,
        2 => ExtendType::Asr,
        _ => ExtendType::Ror,
    };

    let op_code = (opc << 1) | n;
    match op_code {
        0x00 => {
            set_mnemonic(inst, "and");
            inst.kind = InstrType::And;
        }
        0x01 => {
            set_mnemonic(inst, "bic");
            inst.kind = InstrType::Bic;
        }
        0x02 => {
            set_mnemonic(inst, "orr");
            inst.kind = InstrType::Orr;
            if rn == 31 && imm6 == 0 && shift == 0 {
                set_mnemonic(inst, "mov");
                inst.kind = InstrType::Mov;
            }
        }
        0x03 => {
            set_mnemonic(inst, "orn");
            inst.kind = InstrType::Orn;
            if rn == 31 {
                set_mnemonic(inst, "mvn");
                inst.kind = InstrType::Mvn;
            }
        }
        0x04 => {
            set_mnemonic(inst, "eor");
            inst.kind = InstrType::Eor;
        }
        0x05 => {
            set_mnemonic(inst, "eon");
            inst.kind = InstrType::Eon;
        }
        0x06 => {
            set_mnemonic(inst, "ands");
            inst.kind = InstrType::Ands;
            inst.set_flags = true;
            if rd == 31 {
                set_mnemonic(inst, "tst");
                inst.kind = InstrType::Tst;
            }
        }
        0x07 => {
            set_mnemonic(inst, "bics");
            inst.kind = InstrType::Bics;
            inst.set_flags = true;
        }
        _ => return false,
    }
    true
}

fn decode_cond_select(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let sf = bit(word, 31);
    let op = bit(word, 30);
    let s = bit(word, 29);
    let rm = bits(word, 16, 20) as u8;
    let cond = bits(word, 12, 15) as u8;
    let op2 = bits(word, 10, 11);
    let rn = bits(word, 5, 9) as u8;
    let rd = bits(word, 0, 4) as u8;

    if s != 0 || op2 > 1 {
        return false;
    }

    inst.rd = rd;
    inst.rn = rn;
    inst.rm = rm;
    inst.cond = cond;
    inst.has_imm = false;
    inst.is_64bit = sf != 0;
    inst.rd_type = if sf != 0 { RegType::X } else { RegType::W };
    inst.rn_type = inst.rd_type;
    inst.rm_type = inst.rd_type;

    let opcode = (op << 1) | op2;
    match opcode {
        0x00 => {
            set_mnemonic(inst, "csel");
            inst.kind = InstrType::Csel;
        }
        0x01 => {
            if rm == 31 && rn == 31 {
                set_mnemonic(inst, "cset");
                inst.kind = InstrType::Cset;
                inst.cond = cond ^ 1;
            } else if rm == rn && cond != 14 && cond != 15 {
                set_mnemonic(inst, "cinc");
                inst.kind = InstrType::Cinc;
                inst.cond = cond ^ 1;
            } else {
                set_mnemonic(inst, "csinc");
                inst.kind = InstrType::Csinc;
            }
        }
        0x02 => {
            if rm == 31 && rn == 31 {
                set_mnemonic(inst, "csetm");
                inst.kind = InstrType::Csetm;
                inst.cond = cond ^ 1;
            } else if rm == rn && cond != 14 && cond != 15 {
                set_mnemonic(inst, "cinv");
                inst.kind = InstrType::Cinv;
                inst.cond = cond ^ 1;
            } else {
                set_mnemonic(inst, "csinv");
                inst.kind = InstrType::Csinv;
            }
        }
        0x03 => {
            if rm == rn && cond != 14 && cond != 15 {
                set_mnemonic(inst, "cneg");
                inst.kind = InstrType::Cneg;
                inst.cond = cond ^ 1;
            } else {
                set_mnemonic(inst, "csneg");
                inst.kind = InstrType::Csneg;
            }
        }
        _ => return false,
    }
    true
}

fn decode_data_proc_1src(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let sf = bit(word, 31);
    let s = bit(word, 29);
    let opcode2 = bits(word, 16, 20);
    let opcode = bits(word, 10, 15);
    let rn = bits(word, 5, 9) as u8;
    let rd = bits(word, 0, 4) as u8;

    if s != 0 || opcode2 != 0 {
        return false;
    }

    inst.rd = rd;
    inst.rn = rn;
    inst.has_imm = false;
    inst.is_64bit = sf != 0;
    inst.rd_type = if sf != 0 { RegType::X } else { RegType::W };
    inst.rn_type = inst.rd_type;

    match opcode {
        0x00 => {
            set_mnemonic(inst, "rbit");
            inst.kind = InstrType::Rbit;
        }
        0x01 => {
            set_mnemonic(inst, "rev16");
            inst.kind = InstrType::Rev16;
        }
        0x02 => {
            if sf != 0 {
                set_mnemonic(inst, "rev32");
                inst.kind = InstrType::Rev32;
            } else {
                set_mnemonic(inst, "rev");
                inst.kind = InstrType::Rev;
            }
        }
        0x03 => {
            if sf == 0 {
                return false;
            }
            set_mnemonic(inst, "rev");
            inst.kind = InstrType::Rev;
        }
        0x04 => {
            set_mnemonic(inst, "clz");
            inst.kind = InstrType::Clz;
        }
        0x05 => {
            set_mnemonic(inst, "cls");
            inst.kind = InstrType::Cls;
        }
        _ => return false,
    }
    true
}

fn decode_data_proc_2src(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let sf = bit(word, 31);
    let s = bit(word, 29);
    let rm = bits(word, 16, 20) as u8;
    let opcode = bits(word, 10, 15);
    let rn = bits(word, 5, 9) as u8;
    let rd = bits(word, 0, 4) as u8;

    if s != 0 {
        return false;
    }

    inst.rd = rd;
    inst.rn = rn;
    inst.rm = rm;
    inst.has_imm = false;
    inst.is_64bit = sf != 0;
    inst.rd_type = if sf != 0 { RegType::X } else { RegType::W };
    inst.rn_type = inst.rd_type;
    inst.rm_type = inst.rd_type;

    match opcode {
        0x02 => {
            set_mnemonic(inst, "udiv");
            inst.kind = InstrType::Udiv;
        }
        0x03 => {
            set_mnemonic(inst, "sdiv");
            inst.kind = InstrType::Sdiv;
        }
        0x08 => {
            set_mnemonic(inst, "lsl");
            inst.kind = InstrType::Lsl;
        }
        0x09 => {
            set_mnemonic(inst, "lsr");
            inst.kind = InstrType::Lsr;
        }
        0x0A => {
            set_mnemonic(inst, "asr");
            inst.kind = InstrType::Asr;
        }
        0x0B => {
            set_mnemonic(inst, "ror");
            inst.kind = InstrType::Ror;
        }
        _ => return false,
    }
    true
}

fn decode_data_proc_3src(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let sf = bit(word, 31);
    let op54 = bits(word, 29, 30);
    let op31 = bits(word, 21, 23);
    let rm = bits(word, 16, 20) as u8;
    let o0 = bit(word, 15);
    let ra = bits(word, 10, 14) as u8;
    let rn = bits(word, 5, 9) as u8;
    let rd = bits(word, 0, 4) as u8;

    if op54 != 0 {
        return false;
    }

    inst.rd = rd;
    inst.rn = rn;
    inst.rm = rm;
    inst.ra = ra;
    inst.has_imm = false;
    inst.is_64bit = sf != 0;
    inst.rd_type = if sf != 0 { RegType::X } else { RegType::W };
    inst.rn_type = inst.rd_type;
    inst.rm_type = inst.rd_type;

    let opcode = (op31 << 1) | o0;
    match opcode {
        0x00 => {
            if ra == 31 {
                set_mnemonic(inst, "mul");
                inst.kind = InstrType::Mul;
            } else {
                set_mnemonic(inst, "madd");
                inst.kind = InstrType::Madd;
            }
        }
        0x01 => {
            if ra == 31 {
                set_mnemonic(inst, "mneg");
                inst.kind = InstrType::Mneg;
            } else {
                set_mnemonic(inst, "msub");
                inst.kind = InstrType::Msub;
            }
        }
        _ => return false,
    }
    true
}

static TABLE: &[DecodeEntry] = &[
    DecodeEntry { mask: 0x1F000000, value: 0x0A000000, handler: decode_logical_shifted_reg, name: "logical_shifted_reg" },
    DecodeEntry { mask: 0x1F200000, value: 0x0B000000, handler: decode_add_sub_shifted_reg, name: "add_sub_shifted_reg" },
    DecodeEntry { mask: 0x1FE00000, value: 0x1A800000, handler: decode_cond_select, name: "cond_select" },
    DecodeEntry { mask: 0x5FE00000, value: 0x5AC00000, handler: decode_data_proc_1src, name: "data_proc_1src" },
    DecodeEntry { mask: 0x5FE00000, value: 0x1AC00000, handler: decode_data_proc_2src, name: "data_proc_2src" },
    DecodeEntry { mask: 0x1F000000, value: 0x1B000000, handler: decode_data_proc_3src, name: "data_proc_3src" },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Instruction;

    #[test]
    fn cmp_register_alias() {
        let mut inst = Instruction::unknown(0, 0x1000);
        assert!(decode(0xEB00003F, 0x1000, &mut inst));
        assert_eq!(inst.mnemonic, "cmp");
        assert_eq!(inst.rn, 1);
        assert_eq!(inst.rm, 0);
    }

    #[test]
    fn cset_alias_inverts_condition() {
        let mut inst = Instruction::unknown(0, 0x1000);
        assert!(decode(0x9A9F07E0, 0x1000, &mut inst));
        assert_eq!(inst.mnemonic, "cset");
        assert_eq!(inst.kind, InstrType::Cset);
    }

    #[test]
    fn add_sub_shifted_rejects_reserved_shift() {
        // shift field == 0b11 is undefined for add/sub shifted-register.
        let mut inst = Instruction::unknown(0, 0x1000);
        let word = 0x0B00_0000 | (0b11 << 22);
        assert!(!decode_add_sub_shifted_reg(word, 0x1000, &mut inst));
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
