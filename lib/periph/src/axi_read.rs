/*++

Licensed under the Apache-2.0 license.

File Name:

    axi_read.rs

Abstract:

    File contains the AXI4-Lite read channel state machine.

--*/

use crate::config::RegfileArgs;
use crate::csr_regfile::{CsrRegfile, ReadRequest};
use crate::helpers::TimeoutCounter;
use regfile_emu_bus::AxiInputs;
use regfile_emu_types::{BusAddr, BusData, Resp};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ReadState {
    /// Accepting an address
    Idle,

    /// Address latched and storage read issued; the result is available on
    /// the next step
    AddressCaptured { addr: BusAddr },

    /// Response presented until `rready`
    Responding { data: BusData, resp: Resp },

    /// Timed out. A forced SLVERR is presented until `rready`. An address
    /// accepted meanwhile is held in `pending` and read once the forced
    /// response retires.
    Abandoned { pending: Option<BusAddr> },
}

pub struct ReadChannel {
    state: ReadState,
    timeout: TimeoutCounter,
    addr_mask: BusAddr,
}

impl ReadChannel {
    pub fn new(args: &RegfileArgs) -> Self {
        Self {
            state: ReadState::Idle,
            timeout: TimeoutCounter::new(args.timeout_limit),
            addr_mask: args.addr_mask(),
        }
    }

    pub fn state(&self) -> ReadState {
        self.state
    }

    pub fn timeout_count(&self) -> u32 {
        self.timeout.count()
    }

    pub fn arready(&self) -> bool {
        matches!(
            self.state,
            ReadState::Idle | ReadState::Abandoned { pending: None }
        )
    }

    pub fn rvalid(&self) -> bool {
        matches!(
            self.state,
            ReadState::Responding { .. } | ReadState::Abandoned { .. }
        )
    }

    pub fn rdata(&self) -> BusData {
        match self.state {
            ReadState::Responding { data, .. } => data,
            _ => 0,
        }
    }

    pub fn rresp(&self) -> Resp {
        match self.state {
            ReadState::Responding { resp, .. } => resp,
            ReadState::Abandoned { .. } => Resp::SlvErr,
            _ => Resp::Okay,
        }
    }

    pub fn reset(&mut self) {
        self.state = ReadState::Idle;
        self.timeout.clear();
    }

    /// Advance one step.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Requester signals for this step
    /// * `regfile` - Storage as committed by the previous step
    ///
    /// # Returns
    ///
    /// * `Option<ReadRequest>` - Storage read to resolve at the end of this step
    pub fn step(&mut self, inputs: &AxiInputs, regfile: &CsrRegfile) -> Option<ReadRequest> {
        let r_handshake = inputs.rready && self.rvalid();
        let captured =
            (inputs.arvalid && self.arready()).then_some(inputs.araddr & self.addr_mask);
        if let Some(addr) = captured {
            log::debug!("read channel: address {addr:#x} accepted");
        }

        let (next, request) = match self.state {
            ReadState::Idle => match captured {
                Some(addr) => (
                    ReadState::AddressCaptured { addr },
                    Some(ReadRequest { addr }),
                ),
                None => (ReadState::Idle, None),
            },
            ReadState::AddressCaptured { addr } => match regfile.read_result() {
                Ok(data) => (
                    ReadState::Responding {
                        data,
                        resp: Resp::Okay,
                    },
                    None,
                ),
                Err(err) => {
                    log::warn!("read channel: {addr:#x} answered SLVERR: {err}");
                    (
                        ReadState::Responding {
                            data: 0,
                            resp: Resp::SlvErr,
                        },
                        None,
                    )
                }
            },
            ReadState::Responding { .. } if r_handshake => (ReadState::Idle, None),
            ReadState::Responding { .. } => (self.state, None),
            ReadState::Abandoned { pending } => match pending.or(captured) {
                Some(addr) if r_handshake => (
                    ReadState::AddressCaptured { addr },
                    Some(ReadRequest { addr }),
                ),
                None if r_handshake => (ReadState::Idle, None),
                pending => (ReadState::Abandoned { pending }, None),
            },
        };

        // Only a response left waiting for `rready` counts.
        let stalled = matches!(self.state, ReadState::Responding { .. }) && next == self.state;
        self.state = if !stalled {
            self.timeout.clear();
            next
        } else if self.timeout.advance() {
            log::warn!("read channel: timed out in {next:?}, forcing SLVERR");
            ReadState::Abandoned { pending: None }
        } else {
            next
        };
        request
    }
}
