// License below.

//! Floating-point and scalar Advanced SIMD decoders: 1-/2-/3-source FP data
//! processing, FP compare/conditional-compare/conditional-select, FP/integer
//! conversion, FP immediate move, and the scalar SIMD dup/3-same/2-reg-misc
//! families.

use crate::bits::{bit, bits};
use crate::decode::{decode_with_table, DecodeEntry};
use crate::instruction::{InstrType, Instruction, Mnemonic, RegType};

/// Entry point for the floating-point/SIMD class table.
pub fn decode(word: u32, address: u64, inst: &mut Instruction) -> bool {
    decode_with_table(TABLE, word, address, inst)
}

fn set_mnemonic(inst: &mut Instruction, name: &str) {
    inst.mnemonic = Mnemonic::from_str(name);
}

/// Maps the 2-bit `ftype` field to a register width.
///
/// `ftype == 2` has no defined scalar FP size; the reference decoder
/// silently falls back to single precision here, but that masks a
/// genuinely unencodable instruction, so this decoder fails instead — see
/// DESIGN.md.
fn fp_reg_type(ftype: u32) -> Option<RegType> {
    match ftype {
        0 => Some(RegType::S),
        1 => Some(RegType::D),
        3 => Some(RegType::H),
        _ => None,
    }
}

const FP_1SRC_OPS: &[(u32, &str, InstrType)] = &[
    (0x00, "fmov", InstrType::Fmov),
    (0x01, "fabs", InstrType::Fabs),
    (0x02, "fneg", InstrType::Fneg),
    (0x03, "fsqrt", InstrType::Fsqrt),
    (0x04, "fcvt", InstrType::Fcvt),
    (0x05, "fcvt", InstrType::Fcvt),
    (0x07, "fcvt", InstrType::Fcvt),
    (0x08, "frintn", InstrType::Frint),
    (0x09, "frintp", InstrType::Frint),
    (0x0A, "frintm", InstrType::Frint),
    (0x0B, "frintz", InstrType::Frint),
    (0x0C, "frinta", InstrType::Frint),
    (0x0E, "frintx", InstrType::Frint),
    (0x0F, "frinti", InstrType::Frint),
];

fn decode_fp_data_proc_1src(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let m = bit(word, 31);
    let s = bit(word, 29);
    let ftype = bits(word, 22, 23);
    let opcode = bits(word, 15, 20);
    let rn = bits(word, 5, 9) as u8;
    let rd = bits(word, 0, 4) as u8;

    if m != 0 || s != 0 {
        return false;
    }
    let reg_type = match fp_reg_type(ftype) {
        Some(t) => t,
        None => return false,
    };

    inst.rd = rd;
    inst.rn = rn;
    inst.has_imm = false;
    inst.rd_type = reg_type;
    inst.rn_type = reg_type;

    let (_, name, kind) = match FP_1SRC_OPS.iter().find(|e| e.0 == opcode) {
        Some(e) => *e,
        None => return false,
    };
    set_mnemonic(inst, name);
    inst.kind = kind;

    if (0x04..=0x07).contains(&opcode) {
        match opcode & 0x03 {
            0 => inst.rd_type = RegType::S,
            1 => inst.rd_type = RegType::D,
            3 => inst.rd_type = RegType::H,
            _ => {}
        }
    }
    true
}

const FP_2SRC_OPS: &[(u32, &str, InstrType)] = &[
    (0x00, "fmul", InstrType::Fmul),
    (0x01, "fdiv", InstrType::Fdiv),
    (0x02, "fadd", InstrType::Fadd),
    (0x03, "fsub", InstrType::Fsub),
    (0x04, "fmax", InstrType::Fmax),
    (0x05, "fmin", InstrType::Fmin),
    (0x06, "fmaxnm", InstrType::Fmax),
    (0x07, "fminnm", InstrType::Fmin),
    (0x08, "fnmul", InstrType::Fmul),
];

fn decode_fp_data_proc_2src(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let m = bit(word, 31);
    let s = bit(word, 29);
    let ftype = bits(word, 22, 23);
    let rm = bits(word, 16, 20) as u8;
    let opcode = bits(word, 12, 15);
    let rn = bits(word, 5, 9) as u8;
    let rd = bits(word, 0, 4) as u8;

    if m != 0 || s != 0 {
        return false;
    }
    let reg_type = match fp_reg_type(ftype) {
        Some(t) => t,
        None => return false,
    };

    inst.rd = rd;
    inst.rn = rn;
    inst.rm = rm;
    inst.has_imm = false;
    inst.rd_type = reg_type;
    inst.rn_type = reg_type;
    inst.rm_type = reg_type;

    let (_, name, kind) = match FP_2SRC_OPS.iter().find(|e| e.0 == opcode) {
        Some(e) => *e,
        None => return false,
    };
    set_mnemonic(inst, name);
    inst.kind = kind;
    true
}

const FP_3SRC_OPS: [(&str, InstrType); 4] = [
    ("fmadd", InstrType::Fmadd),
    ("fmsub", InstrType::Fmsub),
    ("fnmadd", InstrType::Fnmadd),
    ("fnmsub", InstrType::Fnmsub),
];

fn decode_fp_data_proc_3src(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let m = bit(word, 31);
    let s = bit(word, 29);
    let ftype = bits(word, 22, 23);
    let o1 = bit(word, 21);
    let rm = bits(word, 16, 20) as u8;
    let o0 = bit(word, 15);
    let ra = bits(word, 10, 14) as u8;
    let rn = bits(word, 5, 9) as u8;
    let rd = bits(word, 0, 4) as u8;

    if m != 0 || s != 0 {
        return false;
    }
    let reg_type = match fp_reg_type(ftype) {
        Some(t) => t,
        None => return false,
    };

    inst.rd = rd;
    inst.rn = rn;
    inst.rm = rm;
    inst.ra = ra;
    inst.has_imm = false;
    inst.rd_type = reg_type;
    inst.rn_type = reg_type;
    inst.rm_type = reg_type;

    let op = (o1 << 1) | o0;
    if op >= 4 {
        return false;
    }
    let (name, kind) = FP_3SRC_OPS[op as usize];
    set_mnemonic(inst, name);
    inst.kind = kind;
    true
}

fn decode_fp_compare(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let m = bit(word, 31);
    let s = bit(word, 29);
    let ftype = bits(word, 22, 23);
    let rm = bits(word, 16, 20) as u8;
    let op = bits(word, 14, 15);
    let rn = bits(word, 5, 9) as u8;
    let opcode2 = bits(word, 0, 4);

    if m != 0 || s != 0 || op != 0 {
        return false;
    }
    let reg_type = match fp_reg_type(ftype) {
        Some(t) => t,
        None => return false,
    };

    inst.rn = rn;
    inst.rm = rm;
    inst.has_imm = false;
    inst.rn_type = reg_type;
    inst.rm_type = reg_type;

    match opcode2 {
        0x00 => {
            set_mnemonic(inst, "fcmp");
            inst.kind = InstrType::Fcmp;
        }
        0x08 => {
            set_mnemonic(inst, "fcmp");
            inst.kind = InstrType::Fcmp;
            inst.has_imm = true;
            inst.imm = 0;
        }
        0x10 => {
            set_mnemonic(inst, "fcmpe");
            inst.kind = InstrType::Fcmpe;
        }
        0x18 => {
            set_mnemonic(inst, "fcmpe");
            inst.kind = InstrType::Fcmpe;
            inst.has_imm = true;
            inst.imm = 0;
        }
        _ => return false,
    }
    true
}

fn decode_fp_cond_compare(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let m = bit(word, 31);
    let s = bit(word, 29);
    let ftype = bits(word, 22, 23);
    let rm = bits(word, 16, 20) as u8;
    let cond = bits(word, 12, 15) as u8;
    let rn = bits(word, 5, 9) as u8;
    let op = bit(word, 4);
    let nzcv = bits(word, 0, 3);

    if m != 0 || s != 0 {
        return false;
    }
    let reg_type = match fp_reg_type(ftype) {
        Some(t) => t,
        None => return false,
    };

    inst.rn = rn;
    inst.rm = rm;
    inst.cond = cond;
    inst.imm = nzcv as i64;
    inst.has_imm = true;
    inst.rn_type = reg_type;
    inst.rm_type = reg_type;
    inst.kind = InstrType::Fccmp;

    set_mnemonic(inst, if op != 0 { "fccmpe" } else { "fccmp" });
    true
}

fn decode_fp_cond_select(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let m = bit(word, 31);
    let s = bit(word, 29);
    let ftype = bits(word, 22, 23);
    let rm = bits(word, 16, 20) as u8;
    let cond = bits(word, 12, 15) as u8;
    let rn = bits(word, 5, 9) as u8;
    let rd = bits(word, 0, 4) as u8;

    if m != 0 || s != 0 {
        return false;
    }
    let reg_type = match fp_reg_type(ftype) {
        Some(t) => t,
        None => return false,
    };

    inst.rd = rd;
    inst.rn = rn;
    inst.rm = rm;
    inst.cond = cond;
    inst.has_imm = false;
    inst.rd_type = reg_type;
    inst.rn_type = reg_type;
    inst.rm_type = reg_type;
    inst.kind = InstrType::Fcsel;

    set_mnemonic(inst, "fcsel");
    true
}

fn decode_fp_int_conv(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let sf = bit(word, 31);
    let s = bit(word, 29);
    let ftype = bits(word, 22, 23);
    let rmode = bits(word, 19, 20);
    let opcode = bits(word, 16, 18);
    let rn = bits(word, 5, 9) as u8;
    let rd = bits(word, 0, 4) as u8;

    if s != 0 {
        return false;
    }
    let fp_type = match fp_reg_type(ftype) {
        Some(t) => t,
        None => return false,
    };
    let gpr_type = if sf != 0 { RegType::X } else { RegType::W };

    inst.rd = rd;
    inst.rn = rn;
    inst.has_imm = false;

    let op = (rmode << 3) | opcode;
    match op {
        0x18 => { set_mnemonic(inst, "fcvtzs"); inst.rd_type = gpr_type; inst.rn_type = fp_type; inst.kind = InstrType::Fcvtzs; }
        0x19 => { set_mnemonic(inst, "fcvtzu"); inst.rd_type = gpr_type; inst.rn_type = fp_type; inst.kind = InstrType::Fcvtzu; }
        0x02 => { set_mnemonic(inst, "scvtf"); inst.rd_type = fp_type; inst.rn_type = gpr_type; inst.kind = InstrType::Scvtf; }
        0x03 => { set_mnemonic(inst, "ucvtf"); inst.rd_type = fp_type; inst.rn_type = gpr_type; inst.kind = InstrType::Ucvtf; }
        0x06 => { set_mnemonic(inst, "fmov"); inst.rd_type = fp_type; inst.rn_type = gpr_type; inst.kind = InstrType::Fmov; }
        0x07 => { set_mnemonic(inst, "fmov"); inst.rd_type = gpr_type; inst.rn_type = fp_type; inst.kind = InstrType::Fmov; }
        0x00 => { set_mnemonic(inst, "fcvtns"); inst.rd_type = gpr_type; inst.rn_type = fp_type; inst.kind = InstrType::Fcvtzs; }
        0x01 => { set_mnemonic(inst, "fcvtnu"); inst.rd_type = gpr_type; inst.rn_type = fp_type; inst.kind = InstrType::Fcvtzu; }
        0x08 => { set_mnemonic(inst, "fcvtps"); inst.rd_type = gpr_type; inst.rn_type = fp_type; inst.kind = InstrType::Fcvtzs; }
        0x09 => { set_mnemonic(inst, "fcvtpu"); inst.rd_type = gpr_type; inst.rn_type = fp_type; inst.kind = InstrType::Fcvtzu; }
        0x10 => { set_mnemonic(inst, "fcvtms"); inst.rd_type = gpr_type; inst.rn_type = fp_type; inst.kind = InstrType::Fcvtzs; }
        0x11 => { set_mnemonic(inst, "fcvtmu"); inst.rd_type = gpr_type; inst.rn_type = fp_type; inst.kind = InstrType::Fcvtzu; }
        0x04 => { set_mnemonic(inst, "fcvtas"); inst.rd_type = gpr_type; inst.rn_type = fp_type; inst.kind = InstrType::Fcvtzs; }
        0x05 => { set_mnemonic(inst, "fcvtau"); inst.rd_type = gpr_type; inst.rn_type = fp_type; inst.kind = InstrType::Fcvtzu; }
        _ => return false,
    }

    inst.is_64bit = sf != 0;
    true
}

fn decode_fp_imm(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let m = bit(word, 31);
    let s = bit(word, 29);
    let ftype = bits(word, 22, 23);
    let imm8 = bits(word, 13, 20);
    let imm5 = bits(word, 5, 9);
    let rd = bits(word, 0, 4) as u8;

    if m != 0 || s != 0 || imm5 != 0 {
        return false;
    }
    let reg_type = match fp_reg_type(ftype) {
        Some(t) => t,
        None => return false,
    };

    inst.rd = rd;
    inst.imm = imm8 as i64;
    inst.has_imm = true;
    inst.rd_type = reg_type;
    inst.kind = InstrType::Fmov;

    set_mnemonic(inst, "fmov");
    true
}

fn decode_simd_scalar_dup(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let imm5 = bits(word, 16, 20);
    let imm4 = bits(word, 11, 14);
    let rn = bits(word, 5, 9) as u8;
    let rd = bits(word, 0, 4) as u8;

    if imm4 != 0 {
        return false;
    }

    inst.rd = rd;
    inst.rn = rn;
    inst.has_imm = false;

    if imm5 & 0x01 != 0 {
        inst.rd_type = RegType::B;
        inst.imm = ((imm5 >> 1) & 0x0F) as i64;
    } else if imm5 & 0x02 != 0 {
        inst.rd_type = RegType::H;
        inst.imm = ((imm5 >> 2) & 0x07) as i64;
    } else if imm5 & 0x04 != 0 {
        inst.rd_type = RegType::S;
        inst.imm = ((imm5 >> 3) & 0x03) as i64;
    } else if imm5 & 0x08 != 0 {
        inst.rd_type = RegType::D;
        inst.imm = ((imm5 >> 4) & 0x01) as i64;
    } else {
        return false;
    }

    inst.rn_type = RegType::V;
    inst.has_imm = true;
    inst.kind = InstrType::SimdScalar;

    set_mnemonic(inst, "dup");
    true
}

const SIZE_TO_TYPE: [RegType; 4] = [RegType::B, RegType::H, RegType::S, RegType::D];

pub(crate) const SIMD_SCALAR_3SAME_OPS: &[(u32, &str)] = &[
    (0x10, "add"),
    (0x30, "sub"),
    (0x1B, "fmulx"),
    (0x1C, "fcmeq"),
    (0x1F, "frecps"),
    (0x3C, "fcmge"),
    (0x3D, "facge"),
    (0x3F, "frsqrts"),
    (0x1A, "fadd"),
    (0x3A, "fsub"),
    (0x1E, "fmax"),
    (0x3E, "fmin"),
    (0x1D, "fmul"),
    (0x3D, "fdiv"),
];

fn decode_simd_scalar_3same(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let u = bit(word, 29);
    let size = bits(word, 22, 23) as usize;
    let rm = bits(word, 16, 20) as u8;
    let opcode = bits(word, 11, 15);
    let rn = bits(word, 5, 9) as u8;
    let rd = bits(word, 0, 4) as u8;

    inst.rd = rd;
    inst.rn = rn;
    inst.rm = rm;
    inst.has_imm = false;

    inst.rd_type = SIZE_TO_TYPE[size];
    inst.rn_type = SIZE_TO_TYPE[size];
    inst.rm_type = SIZE_TO_TYPE[size];

    let op = (u << 5) | opcode;
    let (_, name) = match SIMD_SCALAR_3SAME_OPS.iter().find(|e| e.0 == op) {
        Some(e) => *e,
        None => return false,
    };
    set_mnemonic(inst, name);
    inst.kind = InstrType::SimdScalar;
    true
}

pub(crate) const SIMD_SCALAR_2REG_MISC_OPS: &[(u32, &str)] = &[
    (0x03, "suqadd"),
    (0x07, "sqabs"),
    (0x08, "cmgt"),
    (0x09, "cmeq"),
    (0x0A, "cmlt"),
    (0x0B, "abs"),
    (0x0C, "fcmgt"),
    (0x0D, "fcmeq"),
    (0x0E, "fcmlt"),
    (0x1A, "fcvtns"),
    (0x1B, "fcvtms"),
    (0x1C, "fcvtas"),
    (0x1D, "scvtf"),
    (0x23, "usqadd"),
    (0x27, "sqneg"),
    (0x28, "cmge"),
    (0x29, "cmle"),
    (0x2B, "neg"),
    (0x2C, "fcmge"),
    (0x2D, "fcmle"),
    (0x3A, "fcvtpu"),
    (0x3B, "fcvtzu"),
    (0x3D, "ucvtf"),
];

fn decode_simd_scalar_2reg_misc(word: u32, _address: u64, inst: &mut Instruction) -> bool {
    let u = bit(word, 29);
    let size = bits(word, 22, 23) as usize;
    let opcode = bits(word, 12, 16);
    let rn = bits(word, 5, 9) as u8;
    let rd = bits(word, 0, 4) as u8;

    inst.rd = rd;
    inst.rn = rn;
    inst.has_imm = false;

    inst.rd_type = SIZE_TO_TYPE[size];
    inst.rn_type = SIZE_TO_TYPE[size];

    let op = (u << 5) | opcode;
    let (_, name) = match SIMD_SCALAR_2REG_MISC_OPS.iter().find(|e| e.0 == op) {
        Some(e) => *e,
        None => return false,
    };
    set_mnemonic(inst, name);
    inst.kind = InstrType::SimdScalar;
    true
}

static TABLE: &[DecodeEntry] = &[
    DecodeEntry { mask: 0x5F203C00, value: 0x1E202000, handler: decode_fp_compare, name: "fp_compare" },
    DecodeEntry { mask: 0x5F200C00, value: 0x1E200400, handler: decode_fp_cond_compare, name: "fp_cond_compare" },
    DecodeEntry { mask: 0x5F200C00, value: 0x1E200C00, handler: decode_fp_cond_select, name: "fp_cond_select" },
    DecodeEntry { mask: 0x5F200C00, value: 0x1E200800, handler: decode_fp_data_proc_2src, name: "fp_data_proc_2src" },
    DecodeEntry { mask: 0x5F207C00, value: 0x1E204000, handler: decode_fp_data_proc_1src, name: "fp_data_proc_1src" },
    DecodeEntry { mask: 0x5F201C00, value: 0x1E201000, handler: decode_fp_imm, name: "fp_imm" },
    DecodeEntry { mask: 0x5F20FC00, value: 0x1E200000, handler: decode_fp_int_conv, name: "fp_int_conv" },
    DecodeEntry { mask: 0x5F000000, value: 0x1F000000, handler: decode_fp_data_proc_3src, name: "fp_data_proc_3src" },
    DecodeEntry { mask: 0xFFE0FC00, value: 0x5E000400, handler: decode_simd_scalar_dup, name: "simd_scalar_dup" },
    DecodeEntry { mask: 0xDF200400, value: 0x5E200400, handler: decode_simd_scalar_3same, name: "simd_scalar_3same" },
    DecodeEntry { mask: 0xDF3E0C00, value: 0x5E200800, handler: decode_simd_scalar_2reg_misc, name: "simd_scalar_2reg_misc" },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Instruction;

    #[test]
    fn decodes_fmov_register() {
        let mut inst = Instruction::unknown(0, 0x1000);
        // fmov s0, s1 (ftype=00, opcode=000000)
        let word = 0x1E204020u32;
        assert!(decode(word, 0x1000, &mut inst));
        assert_eq!(inst.mnemonic, "fmov");
        assert_eq!(inst.rd_type, RegType::S);
    }

    #[test]
    fn decodes_fadd_double() {
        let mut inst = Instruction::unknown(0, 0x1000);
        // fadd d0, d1, d2 : ftype=01 rm=00010 opcode=0010
        let word = 0x1E622820u32;
        assert!(decode(word, 0x1000, &mut inst));
        assert_eq!(inst.mnemonic, "fadd");
        assert_eq!(inst.rd_type, RegType::D);
    }

    #[test]
    fn ftype_two_is_rejected() {
        assert!(fp_reg_type(2).is_none());
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
