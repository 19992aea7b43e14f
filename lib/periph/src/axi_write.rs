/*++

Licensed under the Apache-2.0 license.

File Name:

    axi_write.rs

Abstract:

    File contains the AXI4-Lite write channel state machine.

--*/

use crate::config::RegfileArgs;
use crate::csr_regfile::{CsrRegfile, WriteRequest};
use crate::helpers::TimeoutCounter;
use regfile_emu_bus::AxiInputs;
use regfile_emu_types::{BusAddr, BusData, ByteStrobe, DataWidth, Resp};

/// Write channel progress. Address and data phases complete independently;
/// the storage write is issued exactly once, on the step after both have.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum WriteState {
    /// Accepting address and data
    Idle,

    /// Address latched, waiting for data
    AddressCaptured { addr: BusAddr },

    /// Data latched, waiting for address
    DataCaptured { data: BusData, strobe: ByteStrobe },

    /// Both phases latched. The storage write fires on the next step.
    Armed {
        addr: BusAddr,
        data: BusData,
        strobe: ByteStrobe,
    },

    /// Storage write issued, waiting for its outcome
    Committing { addr: BusAddr },

    /// Response presented until `bready`
    Responding { resp: Resp },

    /// Timed out. A forced SLVERR is presented until `bready`. Phases of the
    /// next request accepted meanwhile are held in `pending`.
    Abandoned { pending: PendingWrite },
}

impl WriteState {
    /// States in which only the requester can make progress
    fn awaits_requester(&self) -> bool {
        matches!(
            self,
            WriteState::AddressCaptured { .. }
                | WriteState::DataCaptured { .. }
                | WriteState::Responding { .. }
        )
    }
}

/// Request phases accepted while a forced response is still presented.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct PendingWrite {
    pub addr: Option<BusAddr>,
    pub data: Option<(BusData, ByteStrobe)>,
}

impl PendingWrite {
    /// State to enter once the forced response is accepted
    fn resume(self) -> WriteState {
        match (self.addr, self.data) {
            (Some(addr), Some((data, strobe))) => WriteState::Armed { addr, data, strobe },
            (Some(addr), None) => WriteState::AddressCaptured { addr },
            (None, Some((data, strobe))) => WriteState::DataCaptured { data, strobe },
            (None, None) => WriteState::Idle,
        }
    }
}

/// Read-modify-write merge. Lanes whose strobe bit is set take the byte from
/// `data`; the rest keep the byte from `current`.
///
/// # Arguments
///
/// * `current` - Value currently held by the register
/// * `data` - Incoming write data
/// * `strobe` - Byte-enable mask, bit `i` selects lane `i`
/// * `width` - Register width, which bounds the lanes considered
pub fn merge_strobed(
    current: BusData,
    data: BusData,
    strobe: ByteStrobe,
    width: DataWidth,
) -> BusData {
    let merged = (0..width.lanes())
        .filter(|lane| strobe & (1 << lane) != 0)
        .fold(current, |acc, lane| {
            let lane_mask: BusData = 0xff << (lane * 8);
            (acc & !lane_mask) | (data & lane_mask)
        });
    merged & width.mask()
}

pub struct WriteChannel {
    state: WriteState,
    timeout: TimeoutCounter,
    width: DataWidth,
    addr_mask: BusAddr,
}

impl WriteChannel {
    pub fn new(args: &RegfileArgs) -> Self {
        Self {
            state: WriteState::Idle,
            timeout: TimeoutCounter::new(args.timeout_limit),
            width: args.data_width,
            addr_mask: args.addr_mask(),
        }
    }

    pub fn state(&self) -> WriteState {
        self.state
    }

    /// Consecutive steps the requester has left the channel waiting
    pub fn timeout_count(&self) -> u32 {
        self.timeout.count()
    }

    pub fn awready(&self) -> bool {
        match self.state {
            WriteState::Idle | WriteState::DataCaptured { .. } => true,
            WriteState::Abandoned { pending } => pending.addr.is_none(),
            _ => false,
        }
    }

    pub fn wready(&self) -> bool {
        match self.state {
            WriteState::Idle | WriteState::AddressCaptured { .. } => true,
            WriteState::Abandoned { pending } => pending.data.is_none(),
            _ => false,
        }
    }

    pub fn bvalid(&self) -> bool {
        matches!(
            self.state,
            WriteState::Responding { .. } | WriteState::Abandoned { .. }
        )
    }

    pub fn bresp(&self) -> Resp {
        match self.state {
            WriteState::Responding { resp } => resp,
            WriteState::Abandoned { .. } => Resp::SlvErr,
            _ => Resp::Okay,
        }
    }

    pub fn reset(&mut self) {
        self.state = WriteState::Idle;
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
    /// * `Option<WriteRequest>` - Storage write to resolve at the end of this step
    pub fn step(&mut self, inputs: &AxiInputs, regfile: &CsrRegfile) -> Option<WriteRequest> {
        let aw_handshake = inputs.awvalid && self.awready();
        let w_handshake = inputs.wvalid && self.wready();
        let b_handshake = inputs.bready && self.bvalid();

        let addr = inputs.awaddr & self.addr_mask;
        let data = inputs.wdata & self.width.mask();
        let strobe = inputs.wstrb & self.width.strobe_mask();

        let mut request = None;
        let next = match self.state {
            WriteState::Idle => match (aw_handshake, w_handshake) {
                (true, true) => WriteState::Armed { addr, data, strobe },
                (true, false) => WriteState::AddressCaptured { addr },
                (false, true) => WriteState::DataCaptured { data, strobe },
                (false, false) => WriteState::Idle,
            },
            WriteState::AddressCaptured { addr } if w_handshake => {
                WriteState::Armed { addr, data, strobe }
            }
            WriteState::DataCaptured { data, strobe } if aw_handshake => {
                WriteState::Armed { addr, data, strobe }
            }
            WriteState::AddressCaptured { .. } | WriteState::DataCaptured { .. } => self.state,
            WriteState::Armed { addr, data, strobe } => {
                let merged = merge_strobed(regfile.peek(addr), data, strobe, self.width);
                request = Some(WriteRequest { addr, data: merged });
                WriteState::Committing { addr }
            }
            WriteState::Committing { addr } => {
                let resp = match regfile.write_result() {
                    Ok(()) => Resp::Okay,
                    Err(err) => {
                        log::warn!("write channel: {addr:#x} answered SLVERR: {err}");
                        Resp::SlvErr
                    }
                };
                WriteState::Responding { resp }
            }
            WriteState::Responding { .. } if b_handshake => WriteState::Idle,
            WriteState::Responding { .. } => self.state,
            WriteState::Abandoned { mut pending } => {
                if aw_handshake {
                    pending.addr = Some(addr);
                }
                if w_handshake {
                    pending.data = Some((data, strobe));
                }
                if b_handshake {
                    pending.resume()
                } else {
                    WriteState::Abandoned { pending }
                }
            }
        };

        if aw_handshake {
            log::debug!("write channel: address {addr:#x} accepted");
        }
        if w_handshake {
            log::debug!("write channel: data {data:#x} strobe {strobe:#x} accepted");
        }

        // Only steps where the requester held up progress count.
        let stalled = self.state.awaits_requester() && next == self.state;
        self.state = if !stalled {
            self.timeout.clear();
            next
        } else if self.timeout.advance() {
            log::warn!("write channel: timed out in {next:?}, forcing SLVERR");
            WriteState::Abandoned {
                pending: PendingWrite::default(),
            }
        } else {
            next
        };
        request
    }
}
