/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for Register File Emulator Bus library.

--*/
mod bus;
mod master;
mod register;
mod signals;
pub mod testing;

pub use crate::bus::{BusError, Clocked};
pub use crate::master::{AxiLiteMaster, MasterError, ResponseDelay};
pub use crate::register::{AccessRegister, Register};
pub use crate::signals::{AxiInputs, AxiOutputs, Channel};
