// License below.

//! The decode engine: a small table-driven dispatcher shared by every
//! instruction class, plus the top-level classifier that picks a class
//! from the raw word's `op0` field and falls back to trying them all.

pub mod dpimm;
pub mod dpreg;
pub mod branch;
pub mod loadstore;
pub mod fpsimd;

use crate::bits::bits;
use crate::instruction::Instruction;

/// One row of a class decode table: a `(mask, match)` pair and the handler
/// to run when `word & mask == value`. `name` exists only for logging.
#[derive(Clone, Copy)]
pub struct DecodeEntry {
    pub mask: u32,
    pub value: u32,
    pub handler: fn(u32, u64, &mut Instruction) -> bool,
    pub name: &'static str,
}

/// Walks `table` in order, running the first handler whose mask/value
/// matches `word`. A handler returning `false` does not stop the walk —
/// later entries with different mask/value bits may still apply to
/// encodings a single mask can't distinguish on its own (e.g. bitfield vs
/// extract both have the `sf`/`N` agreement check done inside the handler).
pub fn decode_with_table(
    table: &[DecodeEntry],
    word: u32,
    address: u64,
    inst: &mut Instruction,
) -> bool {
    for entry in table {
        if word & entry.mask == entry.value {
            log::trace!("trying {} for word {:#010x}", entry.name, word);
            if (entry.handler)(word, address, inst) {
                return true;
            }
        }
    }
    false
}

/// Top-level instruction-class classifier, keyed off bits `[28:25]` (`op0`).
///
/// Grouping follows the A64 encoding table: `100x` is data-processing
/// immediate, `101x` is branch/exception/system, `x101` is data-processing
/// register, `x1x0` is load/store, and `x111` is floating-point/SIMD.
fn classify(word: u32) -> &'static [fn(u32, u64, &mut Instruction) -> bool] {
    match bits(word, 25, 28) {
        0b1000 | 0b1001 => &[dpimm::decode],
        0b1010 | 0b1011 => &[branch::decode],
        0b0100 | 0b0110 | 0b1100 | 0b1110 => &[loadstore::decode],
        0b0101 | 0b1101 => &[dpreg::decode],
        0b0111 | 0b1111 => &[fpsimd::decode],
        _ => &[],
    }
}

/// Disassembles one instruction word.
///
/// First tries the class the top-level `op0` classification predicts; if
/// that fails (or `op0` doesn't land in a known group), falls back to
/// trying every class decoder in a fixed order. Unlike the reference
/// decoder's fallback chain, FP/SIMD is included here — see DESIGN.md.
pub fn disassemble(word: u32, address: u64, inst: &mut Instruction) -> bool {
    for decode_fn in classify(word) {
        if decode_fn(word, address, inst) {
            return true;
        }
    }

    const FALLBACK: &[fn(u32, u64, &mut Instruction) -> bool] = &[
        branch::decode,
        dpimm::decode,
        dpreg::decode,
        loadstore::decode,
        fpsimd::decode,
    ];

    for decode_fn in FALLBACK {
        if decode_fn(word, address, inst) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_word_fails_to_decode() {
        let mut inst = Instruction::unknown(0, 0x1000);
        assert!(!disassemble(0x0000_0000, 0x1000, &mut inst));
    }

    #[test]
    fn nop_round_trips_through_top_level_classifier() {
        let mut inst = Instruction::unknown(0, 0x1000);
        assert!(disassemble(0xD503201F, 0x1000, &mut inst));
        assert_eq!(inst.mnemonic, "nop");
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
