/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for Register File Emulator Peripheral library.

--*/
mod axi_read;
mod axi_regfile;
mod axi_write;
mod config;
mod csr_regfile;
mod helpers;

pub use axi_read::{ReadChannel, ReadState};
pub use axi_regfile::AxiRegfile;
pub use axi_write::{merge_strobed, PendingWrite, WriteChannel, WriteState};
pub use config::{ConfigError, RegfileArgs, StatusReg, NUM_STATUS_REGS};
pub use csr_regfile::{CsrRegfile, ReadRequest, Region, WriteRequest};
