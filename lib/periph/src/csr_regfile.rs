/*++

Licensed under the Apache-2.0 license.

File Name:

    csr_regfile.rs

Abstract:

    File contains the permission-checked register storage engine shared by
    the AXI read and write channels.

--*/

use crate::config::{RegfileArgs, StatusReg, NUM_STATUS_REGS};
use regfile_emu_bus::{AccessRegister, BusError, Register};
use regfile_emu_types::{BusAddr, BusData, DataWidth, Permission};

/// Full-word write issued by the write channel
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct WriteRequest {
    pub addr: BusAddr,
    pub data: BusData,
}

/// Read issued by the read channel
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ReadRequest {
    pub addr: BusAddr,
}

/// Region an in-range index resolves to, with the offset inside it
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Region {
    Data(usize),
    Status(usize),
}

/// Register storage engine.
///
/// Cells are laid out as the data region followed by the status region and
/// are only reachable through the permission checks below. Requests are
/// resolved on [`CsrRegfile::tick`]; their results become visible through
/// [`CsrRegfile::read_result`] and [`CsrRegfile::write_result`] on the
/// following step.
pub struct CsrRegfile {
    regs: Vec<AccessRegister>,
    num_data_regs: usize,
    width: DataWidth,

    /// Last successfully read value. Held while no read is requested.
    rdata: BusData,
    read_fault: Option<BusError>,
    write_fault: Option<BusError>,
}

impl CsrRegfile {
    /// Build the bank from validated arguments. The permission table is fixed
    /// from here on.
    pub fn new(args: &RegfileArgs) -> Self {
        let regs = args
            .data_access
            .iter()
            .chain(StatusReg::ACCESS.iter())
            .map(|access| AccessRegister::new(*access, 0))
            .collect();
        Self {
            regs,
            num_data_regs: args.num_data_regs,
            width: args.data_width,
            rdata: 0,
            read_fault: None,
            write_fault: None,
        }
    }

    /// Total number of cells in both regions
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    pub fn region(&self, addr: BusAddr) -> Option<Region> {
        let index = addr as usize;
        if index < self.num_data_regs {
            Some(Region::Data(index))
        } else if index < self.num_data_regs + NUM_STATUS_REGS {
            Some(Region::Status(index - self.num_data_regs))
        } else {
            None
        }
    }

    /// Permission of the cell at `addr`, `None` when out of range
    pub fn permission(&self, addr: BusAddr) -> Option<Permission> {
        self.regs.get(addr as usize).map(AccessRegister::access)
    }

    /// Committed contents of `addr` without a permission check, zero when out
    /// of range. Used to merge partial writes; never mutates.
    pub fn peek(&self, addr: BusAddr) -> BusData {
        self.regs
            .get(addr as usize)
            .map(AccessRegister::peek)
            .unwrap_or(0)
    }

    /// Resolve this step's requests. Either, both or neither may be present.
    ///
    /// # Arguments
    ///
    /// * `write` - Full-word write request
    /// * `read` - Read request
    pub fn tick(&mut self, write: Option<WriteRequest>, read: Option<ReadRequest>) {
        // Reads observe the contents committed before this step's write.
        self.read_fault = None;
        if let Some(req) = read {
            match self.read_reg(req.addr) {
                Ok(val) => {
                    log::debug!("regfile: read {} -> {val:#x}", self.describe(req.addr));
                    self.rdata = val;
                }
                Err(err) => {
                    log::warn!("regfile: read {} rejected: {err}", self.describe(req.addr));
                    self.rdata = 0;
                    self.read_fault = Some(err);
                }
            }
        }

        self.write_fault = None;
        if let Some(req) = write {
            let val = req.data & self.width.mask();
            match self.write_reg(req.addr, val) {
                Ok(()) => log::debug!("regfile: write {} <- {val:#x}", self.describe(req.addr)),
                Err(err) => {
                    log::warn!("regfile: write {} rejected: {err}", self.describe(req.addr));
                    self.write_fault = Some(err);
                }
            }
        }
    }

    /// Outcome of the read requested on the previous step. With no read
    /// requested the previously returned value is repeated without a fault.
    pub fn read_result(&self) -> Result<BusData, BusError> {
        match self.read_fault {
            Some(err) => Err(err),
            None => Ok(self.rdata),
        }
    }

    /// Outcome of the write requested on the previous step
    pub fn write_result(&self) -> Result<(), BusError> {
        match self.write_fault {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Registered read data output
    pub fn rdata(&self) -> BusData {
        self.rdata
    }

    /// True when either request of the previous step was rejected
    pub fn access_violation(&self) -> bool {
        self.read_fault.is_some() || self.write_fault.is_some()
    }

    /// Zero every cell and output
    pub fn reset(&mut self) {
        self.regs.iter_mut().for_each(AccessRegister::clear);
        self.rdata = 0;
        self.read_fault = None;
        self.write_fault = None;
    }

    fn read_reg(&self, addr: BusAddr) -> Result<BusData, BusError> {
        self.regs
            .get(addr as usize)
            .ok_or(BusError::OutOfRange)?
            .read()
    }

    fn write_reg(&mut self, addr: BusAddr, val: BusData) -> Result<(), BusError> {
        self.regs
            .get_mut(addr as usize)
            .ok_or(BusError::OutOfRange)?
            .write(val)
    }

    fn describe(&self, addr: BusAddr) -> String {
        match self.region(addr) {
            Some(Region::Data(i)) => format!("data[{i}]"),
            Some(Region::Status(i)) => StatusReg::NAMES[i].to_string(),
            None => format!("{addr:#x}"),
        }
    }
}
