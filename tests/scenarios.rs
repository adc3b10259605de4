// License below.

//! End-to-end scenarios: one raw word, one address, one expected `Display`
//! line, asserted from a table the way `arminstruction/test.rs` does it.

use a64dasm::Instruction;

const SCENARIOS: &[(u32, u64, &str)] = &[
    (0xF9400421, 0x1000, "ldr      x1, [x1, #8]"),
    (0xA9BF7BFD, 0x1000, "stp      x29, x30, [sp, #-16]!"),
    (0x91000420, 0x1000, "add      x0, x1, #0x1"),
    (0xEB00003F, 0x1000, "cmp      x1, x0"),
    (0xD2800020, 0x1000, "movz     x0, #0x1"),
    (0x14000010, 0x1000, "b        0x1040"),
    (0xD65F03C0, 0x1000, "ret"),
    (0xD5384100, 0x1000, "mrs      x0, SP_EL0"),
    (0x9A9F07E0, 0x1000, "cset     x0, ne"),
    (0xF8200020, 0x1000, "ldadd    x0, x0, [x1]"),
];

#[test]
fn decodes_canonical_scenarios() {
    for &(word, address, expected) in SCENARIOS {
        let inst = Instruction::decode(word, address)
            .unwrap_or_else(|| panic!("word {word:#010x} failed to decode"));
        assert_eq!(
            inst.to_string(),
            expected,
            "word {word:#010x} at {address:#x}"
        );
    }
}

#[test]
fn mov_alias_from_orr_with_zero_register() {
    // orr x0, xzr, #<mask>  ==  mov x0, #<mask>
    let inst = Instruction::decode(0xB24003E0, 0x1000).unwrap();
    assert_eq!(inst.mnemonic, "mov");
}

#[test]
fn cmp_alias_keeps_x_register_type_not_sp() {
    // subs xzr, x1, #0  ==  cmp x1, #0
    let inst = Instruction::decode(0xF100003F, 0x1000).unwrap();
    assert_eq!(inst.mnemonic, "cmp");
    assert_eq!(inst.rd_type, a64dasm::RegType::X);
}

#[test]
fn branch_target_is_address_plus_immediate() {
    let inst = Instruction::decode(0x14000010, 0x1000).unwrap();
    assert_eq!(inst.branch_target(), Some(0x1040));
}

#[test]
fn unknown_word_decodes_to_none() {
    assert!(Instruction::decode(0x0000_0000, 0x1000).is_none());
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
