// License below.

//! Command-line front end for the disassembler: decodes one A64
//! instruction word given on the command line and prints its disassembly.

use clap::Parser;

use a64dasm::error::DemoError;
use a64dasm::instruction::Instruction;

/// Disassembles a single A64 (AArch64) instruction word.
#[derive(Parser)]
#[command(name = "dasm", version, about)]
struct Cli {
    /// The 32-bit instruction word to decode, as hex (with or without a
    /// leading `0x`).
    word: String,

    /// The address this word was fetched from; affects PC-relative operands
    /// such as branch targets and ADR/ADRP.
    #[arg(long, default_value = "0x1000")]
    address: String,

    /// Log extra diagnostic messages (which decode table entry matched, etc).
    #[arg(short, long)]
    verbose: bool,
}

fn parse_hex_u64(s: &str) -> Result<u64, std::num::ParseIntError> {
    u64::from_str_radix(s.trim_start_matches("0x").trim_start_matches("0X"), 16)
}

fn parse_hex_u32(s: &str) -> Result<u32, std::num::ParseIntError> {
    u32::from_str_radix(s.trim_start_matches("0x").trim_start_matches("0X"), 16)
}

fn init_logging(verbose: bool) {
    let level = if verbose { "trace" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: &Cli) -> Result<(), DemoError> {
    let word = parse_hex_u32(&cli.word).map_err(|_| DemoError::InvalidHexWord(cli.word.clone()))?;
    let address = parse_hex_u64(&cli.address).map_err(|_| DemoError::InvalidHexWord(cli.address.clone()))?;

    log::debug!("decoding word {word:#010x} at address {address:#x}");

    match Instruction::decode(word, address) {
        Some(inst) => {
            println!("{address:#018x}:  {word:08x}  {inst}");
            Ok(())
        }
        None => Err(DemoError::UndecodableInstruction(word)),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
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
