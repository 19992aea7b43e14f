/*++

Licensed under the Apache-2.0 license.

File Name:

    main.rs

Abstract:

    File contains main entrypoint for the AXI4-Lite register file emulator.

--*/

mod cli;
mod script;

use anyhow::Context;
use clap::Parser;
use cli::Args;
use regfile_emu_bus::{AxiInputs, AxiLiteMaster, AxiOutputs, Clocked, ResponseDelay};
use regfile_emu_periph::AxiRegfile;
use regfile_emu_types::ByteStrobe;
use script::Command;
use simple_logger::SimpleLogger;
use std::{fs, io};

/// Drive every command against the register file.
///
/// # Arguments
///
/// * `master` - Requester attached to the register file
/// * `commands` - Parsed script
/// * `full_strobe` - Strobe used by writes that do not name one
fn run<D>(
    master: &mut AxiLiteMaster<D>,
    commands: &[Command],
    full_strobe: ByteStrobe,
) -> anyhow::Result<()>
where
    D: Clocked<Inputs = AxiInputs, Outputs = AxiOutputs>,
{
    for cmd in commands {
        match *cmd {
            Command::Write { addr, data, strobe } => {
                master.write(addr, data, strobe.unwrap_or(full_strobe))?;
            }
            Command::Read { addr } => {
                master.read(addr)?;
            }
            Command::Idle(steps) => master.idle(steps),
            Command::Reset => master.reset(),
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _ = SimpleLogger::new().with_level(args.log_level.into()).init();

    let text = match &args.script {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => io::read_to_string(io::stdin()).context("failed to read stdin")?,
    };
    let commands = script::parse(&text)?;

    let regfile_args = args.regfile_args();
    let full_strobe = regfile_args.data_width.strobe_mask();
    let regfile = AxiRegfile::new(regfile_args).context("invalid register file configuration")?;

    let delay = match args.max_response_delay {
        0 => ResponseDelay::None,
        max => ResponseDelay::random(args.seed, max),
    };
    let mut master = AxiLiteMaster::new(regfile).with_response_delay(delay);
    let transcript = master.transcript();

    let result = run(&mut master, &commands, full_strobe);
    print!("{}", &*transcript.as_str());
    log::info!("{} steps", master.steps());
    result
}
