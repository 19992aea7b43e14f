/*++

Licensed under the Apache-2.0 license.

File Name:

    axi_regfile.rs

Abstract:

    File contains the AXI4-Lite register file: both channel state machines
    sharing one register storage engine.

--*/

use crate::axi_read::ReadChannel;
use crate::axi_write::WriteChannel;
use crate::config::{ConfigError, RegfileArgs};
use crate::csr_regfile::CsrRegfile;
use regfile_emu_bus::{AxiInputs, AxiOutputs, Clocked};

/// AXI4-Lite register file
///
/// Outputs are registered: the values returned from [`Clocked::tick`] are the
/// state committed at the end of that step and are what the requester samples
/// on the next one.
pub struct AxiRegfile {
    regfile: CsrRegfile,
    write: WriteChannel,
    read: ReadChannel,

    /// Steps since construction or the last reset
    cycle: u64,
}

impl AxiRegfile {
    /// Create a register file.
    ///
    /// # Error
    ///
    /// * `ConfigError` - The arguments describe an unbuildable register file
    pub fn new(args: RegfileArgs) -> Result<Self, ConfigError> {
        args.validate()?;
        log::debug!(
            "regfile: {} data registers + status, {}-bit data, {}-bit address, timeout {}",
            args.num_data_regs,
            u32::from(args.data_width),
            args.addr_width,
            args.timeout_limit
        );
        Ok(Self {
            regfile: CsrRegfile::new(&args),
            write: WriteChannel::new(&args),
            read: ReadChannel::new(&args),
            cycle: 0,
        })
    }

    pub fn regfile(&self) -> &CsrRegfile {
        &self.regfile
    }

    pub fn write_channel(&self) -> &WriteChannel {
        &self.write
    }

    pub fn read_channel(&self) -> &ReadChannel {
        &self.read
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }
}

impl Clocked for AxiRegfile {
    type Inputs = AxiInputs;
    type Outputs = AxiOutputs;

    fn tick(&mut self, inputs: &AxiInputs) -> AxiOutputs {
        if !inputs.aresetn {
            self.reset();
            return self.outputs();
        }

        // Both channels decide against the storage committed by the previous
        // step before any of this step's requests land.
        let write_req = self.write.step(inputs, &self.regfile);
        let read_req = self.read.step(inputs, &self.regfile);
        self.regfile.tick(write_req, read_req);
        self.cycle += 1;

        let outputs = self.outputs();
        log::trace!("[{}] {}", self.cycle, outputs);
        outputs
    }

    fn outputs(&self) -> AxiOutputs {
        AxiOutputs {
            awready: self.write.awready(),
            wready: self.write.wready(),
            bresp: self.write.bresp(),
            bvalid: self.write.bvalid(),
            arready: self.read.arready(),
            rdata: self.read.rdata(),
            rresp: self.read.rresp(),
            rvalid: self.read.rvalid(),
            access_violation: self.regfile.access_violation(),
        }
    }

    fn reset(&mut self) {
        log::debug!("regfile: reset");
        self.regfile.reset();
        self.write.reset();
        self.read.reset();
        self.cycle = 0;
    }
}
