/*++

Licensed under the Apache-2.0 license.

File Name:

    signals.rs

Abstract:

    File contains the AXI4-Lite signal bundles exchanged with a slave
    each step.

--*/

use regfile_emu_types::{BusAddr, BusData, ByteStrobe, Resp};
use std::fmt;

/// Requester-driven signals.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct AxiInputs {
    /// Active-low reset
    pub aresetn: bool,

    pub awaddr: BusAddr,
    pub awvalid: bool,

    pub wdata: BusData,
    pub wstrb: ByteStrobe,
    pub wvalid: bool,

    pub bready: bool,

    pub araddr: BusAddr,
    pub arvalid: bool,

    pub rready: bool,
}

impl Default for AxiInputs {
    /// Reset de-asserted, every valid and ready low.
    fn default() -> Self {
        Self {
            aresetn: true,
            awaddr: 0,
            awvalid: false,
            wdata: 0,
            wstrb: 0,
            wvalid: false,
            bready: false,
            araddr: 0,
            arvalid: false,
            rready: false,
        }
    }
}

/// Slave-driven signals.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct AxiOutputs {
    pub awready: bool,
    pub wready: bool,

    pub bresp: Resp,
    pub bvalid: bool,

    pub arready: bool,

    pub rdata: BusData,
    pub rresp: Resp,
    pub rvalid: bool,

    /// Storage engine flagged the previous step's request
    pub access_violation: bool,
}

impl Default for AxiOutputs {
    /// Values driven out of reset: readies asserted, valids low.
    fn default() -> Self {
        Self {
            awready: true,
            wready: true,
            bresp: Resp::Okay,
            bvalid: false,
            arready: true,
            rdata: 0,
            rresp: Resp::Okay,
            rvalid: false,
            access_violation: false,
        }
    }
}

impl fmt::Display for AxiOutputs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let bit = |b: bool| if b { '1' } else { '0' };
        write!(
            f,
            "awready={} wready={} bvalid={} bresp={} arready={} rvalid={} rresp={} rdata={:#x} violation={}",
            bit(self.awready),
            bit(self.wready),
            bit(self.bvalid),
            self.bresp,
            bit(self.arready),
            bit(self.rvalid),
            self.rresp,
            self.rdata,
            bit(self.access_violation),
        )
    }
}

/// One of the five AXI4-Lite channels.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Channel {
    WriteAddress,
    WriteData,
    WriteResponse,
    ReadAddress,
    ReadResponse,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Channel::WriteAddress => "write address",
            Channel::WriteData => "write data",
            Channel::WriteResponse => "write response",
            Channel::ReadAddress => "read address",
            Channel::ReadResponse => "read response",
        };
        f.write_str(name)
    }
}
