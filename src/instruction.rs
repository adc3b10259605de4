// License below.

//! The decoded instruction record and its small, read-only query helpers.

use std::fmt;

use crate::decode;

/// The semantic class of a decoded instruction, already alias-rewritten.
///
/// Several SIMD-scalar forms share a single coarse tag the way the source
/// decoder does (it tags `dup` and the 2-register-misc family as `mov`-like,
/// and the 3-same family as `add`-like) — the actual mnemonic text is what
/// the formatter prints, `type` only needs to group instructions into the
/// families the formatter and the `is_branch`/`is_load_store` helpers switch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum InstrType {
    Unknown,

    // Loads/stores.
    Ldr, Ldrb, Ldrh, Ldrsw, Ldrsb, Ldrsh,
    Str, Strb, Strh,
    Ldp, Stp, Ldpsw,
    Ldxr, Ldaxr, Ldxp, Ldaxp, Stxr, Stlxr, Stxp, Stlxp,
    Ldar, Stlr, Ldlar, Stllr,
    Ldadd, Ldclr, Ldeor, Ldset, Ldsmax, Ldsmin, Ldumax, Ldumin, Swp, Cas,

    // Moves / arithmetic / logical (and their aliases).
    Mov, Mvn, Movz, Movn, Movk,
    Add, Sub, Adds, Subs, Cmp, Cmn, Neg, Negs,
    And, Orr, Eor, Ands, Bic, Orn, Eon, Bics, Tst,
    Adr, Adrp,
    Sbfm, Bfm, Ubfm, Asr, Lsr, Lsl, Extr, Ror,

    // Branches.
    B, Bl, BCond, Cbz, Cbnz, Tbz, Tbnz, Br, Blr, Ret, Eret, Drps,
    Nop, Yield, Wfe, Wfi, Sev, Sevl, Mrs,

    // Conditional select family.
    Csel, Csinc, Csinv, Csneg, Cset, Csetm, Cinc, Cinv, Cneg,

    // 1-/2-/3-source data processing.
    Rbit, Rev16, Rev, Rev32, Clz, Cls,
    Udiv, Sdiv, Madd, Msub, Mul, Mneg,

    // Floating point.
    Fmov, Fabs, Fneg, Fsqrt, Fcvt, Frint,
    Fmul, Fdiv, Fadd, Fsub, Fmax, Fmin,
    Fmadd, Fmsub, Fnmadd, Fnmsub,
    Fcmp, Fcmpe, Fccmp, Fcsel,
    Fcvtzs, Fcvtzu, Scvtf, Ucvtf,

    // SIMD scalar (representative subset; see module docs).
    SimdScalar,
}

/// Register width/role class. Tagged by decoders, never inferred by the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum RegType {
    X, W, Sp, Xzr, Wzr,
    V, B, H, S, D, Q,
}

/// Memory-operand shape for loads/stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum AddrMode {
    None,
    ImmUnsigned,
    ImmSigned,
    PreIndex,
    PostIndex,
    RegOffset,
    RegExtend,
    Literal,
}

/// Register-operand extend/shift modifier.
///
/// `Lsl` and the register-shift kinds `Lsr`/`Asr`/`Ror` are encoded as
/// contiguous values above the extend kinds, per the data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ExtendType {
    Uxtb, Uxth, Uxtw, Uxtx,
    Sxtb, Sxth, Sxtw, Sxtx,
    Lsl, Lsr, Asr, Ror,
}

impl ExtendType {
    /// Decodes the 3-bit `option` field of a register-offset load/store.
    pub fn from_option(option: u32) -> ExtendType {
        match option & 0b111 {
            0b000 => ExtendType::Uxtb,
            0b001 => ExtendType::Uxth,
            0b010 => ExtendType::Uxtw,
            0b011 => ExtendType::Uxtx,
            0b100 => ExtendType::Sxtb,
            0b101 => ExtendType::Sxth,
            0b110 => ExtendType::Sxtw,
            _     => ExtendType::Sxtx,
        }
    }

    /// Decodes the 2-bit `shift` field of a shifted-register data-processing form.
    pub fn from_shift(shift: u32) -> Option<ExtendType> {
        match shift & 0b11 {
            0b00 => Some(ExtendType::Lsl),
            0b01 => Some(ExtendType::Lsr),
            0b10 => Some(ExtendType::Asr),
            0b11 => Some(ExtendType::Ror),
            _ => None,
        }
    }
}

/// A bounded-length mnemonic string, at most 16 bytes, mirroring the source's
/// `char mnemonic[16]` field without a heap allocation.
#[derive(Clone, Copy)]
pub struct Mnemonic {
    buf: [u8; 16],
    len: u8,
}

impl Mnemonic {
    /// The empty mnemonic, used to initialise a record before decoding.
    pub const fn empty() -> Mnemonic {
        Mnemonic { buf: [0; 16], len: 0 }
    }

    /// Builds a mnemonic from a `&str`, truncating to 15 bytes (the 16th is
    /// reserved the way the source's `SAFE_STRCPY` reserves room for `'\0'`).
    pub fn from_str(s: &str) -> Mnemonic {
        let mut buf = [0u8; 16];
        let bytes = s.as_bytes();
        let n = bytes.len().min(15);
        buf[..n].copy_from_slice(&bytes[..n]);
        Mnemonic { buf, len: n as u8 }
    }

    /// Borrows the mnemonic text.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.buf[..self.len as usize]).unwrap_or("")
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Mnemonic({:?})", self.as_str())
    }
}

impl PartialEq<&str> for Mnemonic {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// A fully decoded A64 instruction.
///
/// Allocated by the caller, zero/unknown-initialised, then either mutated to
/// the decoded form by [`Instruction::decode`] or left unknown.
#[derive(Clone, Copy, Debug)]
pub struct Instruction {
    pub raw: u32,
    pub address: u64,
    pub kind: InstrType,
    pub mnemonic: Mnemonic,

    pub rd: u8,
    pub rn: u8,
    pub rm: u8,
    pub rt2: u8,
    pub ra: u8,

    pub rd_type: RegType,
    pub rn_type: RegType,
    pub rm_type: RegType,

    pub imm: i64,
    pub has_imm: bool,

    pub addr_mode: AddrMode,
    pub extend_type: ExtendType,
    pub shift_amount: u8,

    pub cond: u8,

    pub is_64bit: bool,
    pub set_flags: bool,
    pub is_acquire: bool,
    pub is_release: bool,
}

impl Instruction {
    /// Builds the "unknown" record a decode attempt starts from.
    pub fn unknown(raw: u32, address: u64) -> Instruction {
        Instruction {
            raw,
            address,
            kind: InstrType::Unknown,
            mnemonic: Mnemonic::from_str("unknown"),
            rd: 0, rn: 0, rm: 0, rt2: 0, ra: 0,
            rd_type: RegType::X, rn_type: RegType::X, rm_type: RegType::X,
            imm: 0, has_imm: false,
            addr_mode: AddrMode::None,
            extend_type: ExtendType::Lsl,
            shift_amount: 0,
            cond: 0,
            is_64bit: false, set_flags: false,
            is_acquire: false, is_release: false,
        }
    }

    /// Decodes one 32-bit instruction word at `address`.
    ///
    /// Returns `None` if the word does not match any supported encoding,
    /// mirroring [`disassemble`](crate::decode::disassemble)'s boolean contract.
    pub fn decode(word: u32, address: u64) -> Option<Instruction> {
        let mut inst = Instruction::unknown(word, address);
        if decode::disassemble(word, address, &mut inst) {
            Some(inst)
        } else {
            None
        }
    }

    /// Writes the disassembly into `buf`, truncating safely, and returns the
    /// number of bytes written. Mirrors the source's `format_instruction`
    /// buffer contract for parity with the C-side invariant of never
    /// overrunning the caller's buffer.
    pub fn format_into(&self, buf: &mut [u8]) -> usize {
        use std::io::Write;
        let text = self.to_string();
        let mut cursor = &mut buf[..];
        let n = text.len().min(cursor.len());
        let _ = cursor.write(&text.as_bytes()[..n]);
        n
    }

    /// The branch target address, for the eight PC-relative branch/`ADR` families.
    pub fn branch_target(&self) -> Option<u64> {
        match self.kind {
            InstrType::B | InstrType::Bl | InstrType::BCond
            | InstrType::Cbz | InstrType::Cbnz
            | InstrType::Tbz | InstrType::Tbnz
            | InstrType::Adr | InstrType::Adrp =>
                Some(self.address.wrapping_add(self.imm as u64)),
            _ => None,
        }
    }

    /// Whether this is any branch family, including register-indirect and `RET`.
    pub fn is_branch(&self) -> bool {
        matches!(self.kind,
            InstrType::B | InstrType::Bl | InstrType::BCond
            | InstrType::Cbz | InstrType::Cbnz
            | InstrType::Tbz | InstrType::Tbnz
            | InstrType::Br | InstrType::Blr | InstrType::Ret
            | InstrType::Eret | InstrType::Drps)
    }

    /// Whether this is a load/store family, including pairs. Deliberately
    /// excludes the exclusive/atomic/CAS families, which the source's
    /// `is_load_store_instruction` does not count either.
    pub fn is_load_store(&self) -> bool {
        matches!(self.kind,
            InstrType::Ldr | InstrType::Ldrb | InstrType::Ldrh
            | InstrType::Ldrsw | InstrType::Ldrsb | InstrType::Ldrsh
            | InstrType::Str | InstrType::Strb | InstrType::Strh
            | InstrType::Ldp | InstrType::Stp | InstrType::Ldpsw)
    }

    /// The decoded immediate, if this instruction carries one.
    pub fn immediate(&self) -> Option<i64> {
        if self.has_imm { Some(self.imm) } else { None }
    }

    /// De-duplicated list of encoded register indices referenced by
    /// `rd`/`rn`/`rm`/`rt2`, skipping index 31 unless the slot is typed SP.
    ///
    /// Implemented as a linear dedup scan rather than a `HashSet`, matching
    /// the source's `ADD_REG` macro pattern for this kind of small fixed-size
    /// operand list. `rt2` is checked against `rd_type`, exactly as the
    /// source's `get_used_registers` does — there is no separate `rt2_type`.
    pub fn used_registers(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4);
        let mut add = |reg: u8, ty: RegType| {
            if reg == 31 && ty != RegType::Sp {
                return;
            }
            if !out.contains(&reg) {
                out.push(reg);
            }
        };
        add(self.rd, self.rd_type);
        add(self.rn, self.rn_type);
        add(self.rm, self.rm_type);
        add(self.rt2, self.rd_type);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mnemonic_roundtrips_short_strings() {
        let m = Mnemonic::from_str("ldrsb");
        assert_eq!(m.as_str(), "ldrsb");
        assert_eq!(m, "ldrsb");
    }

    #[test]
    fn unknown_instruction_has_unknown_mnemonic() {
        let inst = Instruction::unknown(0, 0x1000);
        assert_eq!(inst.kind, InstrType::Unknown);
        assert_eq!(inst.mnemonic, "unknown");
    }

    #[test]
    fn used_registers_skips_zero_register_but_keeps_sp() {
        let mut inst = Instruction::unknown(0, 0x1000);
        inst.rd = 31; inst.rd_type = RegType::Sp;
        inst.rn = 31; inst.rn_type = RegType::Xzr;
        inst.rm = 2;  inst.rm_type = RegType::X;
        inst.rt2 = 2; // dedups against rm via rd_type (X, not SP) -> kept once via rm
        let regs = inst.used_registers();
        assert!(regs.contains(&31));
        assert!(regs.contains(&2));
        assert_eq!(regs.iter().filter(|&&r| r == 2).count(), 1);
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
