// License below.

//! Error type for the `dasm` demo binary.
//!
//! The library itself never fails with an error type — a decode attempt
//! either produces an [`Instruction`](crate::instruction::Instruction) or it
//! doesn't, represented as `Option`. This type exists only for the CLI's
//! own concerns: malformed arguments, bad hex input.

use std::error;
use std::fmt;

/// Everything that can go wrong running the `dasm` demo.
#[derive(Debug)]
pub enum DemoError {
    /// The `<WORD>` argument was not a valid 32-bit hex number.
    InvalidHexWord(String),
    /// The word decoded without error but matched no known encoding.
    UndecodableInstruction(u32),
}

impl error::Error for DemoError {}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DemoError::InvalidHexWord(s) => write!(f, "not a valid hex instruction word: `{s}`"),
            DemoError::UndecodableInstruction(w) => write!(f, "no known encoding for word {w:#010x}"),
        }
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
