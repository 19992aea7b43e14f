/*++

Licensed under the Apache-2.0 license.

File Name:

    register.rs

Abstract:

    File contains the permission-checked register cell used by register
    files.

--*/

use crate::BusError;
use regfile_emu_types::{BusData, Permission};
use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::InMemoryRegister;

pub trait Register {
    /// Read the full register value
    ///
    /// # Error
    ///
    /// * `BusError` - `BusError::ReadViolation` if the register is not readable
    fn read(&self) -> Result<BusData, BusError>;

    /// Overwrite the full register value
    ///
    /// # Arguments
    ///
    /// * `val` - Data to write
    ///
    /// # Error
    ///
    /// * `BusError` - `BusError::WriteViolation` if the register is not writable
    fn write(&mut self, val: BusData) -> Result<(), BusError>;
}

/// Register cell whose access permission is fixed at construction.
pub struct AccessRegister {
    reg: InMemoryRegister<BusData>,
    access: Permission,
}

impl AccessRegister {
    /// Create a register with the given permission and initial value
    pub fn new(access: Permission, val: BusData) -> Self {
        Self {
            reg: InMemoryRegister::new(val),
            access,
        }
    }

    pub fn access(&self) -> Permission {
        self.access
    }

    /// Current contents, bypassing the permission check. Never mutates.
    pub fn peek(&self) -> BusData {
        self.reg.get()
    }

    /// Return the register to its reset value of zero
    pub fn clear(&mut self) {
        self.reg.set(0);
    }
}

impl Register for AccessRegister {
    fn read(&self) -> Result<BusData, BusError> {
        if !self.access.readable() {
            Err(BusError::ReadViolation)?
        }

        Ok(self.reg.get())
    }

    fn write(&mut self, val: BusData) -> Result<(), BusError> {
        if !self.access.writable() {
            Err(BusError::WriteViolation)?
        }

        self.reg.set(val);

        Ok(())
    }
}
