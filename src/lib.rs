// License below.

//! A single-instruction A64 (AArch64/ARMv8-A) disassembler.
//!
//! The entry point is [`Instruction::decode`], which turns one 32-bit
//! instruction word plus the address it was fetched from into a decoded
//! [`Instruction`]. Formatting it with `{}` renders a GNU-as-style
//! mnemonic line, e.g. `add      x0, x1, #0x1`.
//!
//! ```
//! use a64dasm::Instruction;
//!
//! let inst = Instruction::decode(0x91000420, 0x1000).unwrap();
//! assert_eq!(inst.to_string(), "add      x0, x1, #0x1");
//! ```

pub mod bits;
pub mod decode;
pub mod error;
pub mod format;
pub mod instruction;

pub use error::DemoError;
pub use instruction::{AddrMode, ExtendType, InstrType, Instruction, Mnemonic, RegType};

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
