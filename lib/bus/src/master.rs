/*++

Licensed under the Apache-2.0 license.

File Name:

    master.rs

Abstract:

    File contains an AXI4-Lite requester that drives a clocked slave one
    transaction at a time.

--*/

use crate::testing::Transcript;
use crate::{AxiInputs, AxiOutputs, Channel, Clocked};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regfile_emu_types::{BusAddr, BusData, ByteStrobe, Resp};
use std::fmt;

/// How long the requester waits before asserting `bready`/`rready`.
pub enum ResponseDelay {
    /// Ready is asserted as soon as the request handshake completes
    None,

    /// Fixed number of steps
    Fixed(u32),

    /// Uniformly random number of steps in `1..=max`
    Random { rng: StdRng, max: u32 },
}

impl ResponseDelay {
    /// Reproducible random delay of 1 to `max` steps.
    pub fn random(seed: u64, max: u32) -> Self {
        ResponseDelay::Random {
            rng: StdRng::seed_from_u64(seed),
            max: max.max(1),
        }
    }

    fn next(&mut self) -> u32 {
        match self {
            ResponseDelay::None => 0,
            ResponseDelay::Fixed(steps) => *steps,
            ResponseDelay::Random { rng, max } => rng.gen_range(1..=*max),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MasterError {
    /// A handshake did not complete within the step budget. The requester
    /// withdraws its valid/ready signal before returning.
    Stalled { channel: Channel, steps: u32 },
}

impl fmt::Display for MasterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MasterError::Stalled { channel, steps } => {
                write!(f, "{channel} handshake stalled after {steps} steps")
            }
        }
    }
}

impl std::error::Error for MasterError {}

/// Single-outstanding AXI4-Lite requester.
///
/// Owns the slave and acts as its tick source: every call that waits on the
/// bus advances the slave by exactly one step per iteration.
pub struct AxiLiteMaster<D> {
    device: D,
    inputs: AxiInputs,
    outputs: AxiOutputs,
    delay: ResponseDelay,
    max_steps: u32,
    steps: u64,
    transcript: Transcript,
}

impl<D: Clocked<Inputs = AxiInputs, Outputs = AxiOutputs>> AxiLiteMaster<D> {
    /// Handshake budget used unless overridden with [`AxiLiteMaster::with_max_steps`]
    pub const DEFAULT_MAX_STEPS: u32 = 1024;

    pub fn new(device: D) -> Self {
        let outputs = device.outputs();
        Self {
            device,
            inputs: AxiInputs::default(),
            outputs,
            delay: ResponseDelay::None,
            max_steps: Self::DEFAULT_MAX_STEPS,
            steps: 0,
            transcript: Transcript::new(),
        }
    }

    pub fn with_response_delay(mut self, delay: ResponseDelay) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Handle to the transcript of completed transactions.
    pub fn transcript(&self) -> Transcript {
        self.transcript.clone()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn into_inner(self) -> D {
        self.device
    }

    /// Slave outputs sampled after the most recent step.
    pub fn outputs(&self) -> AxiOutputs {
        self.outputs
    }

    /// Signals currently driven into the slave.
    pub fn inputs(&self) -> AxiInputs {
        self.inputs
    }

    /// Total steps driven since construction.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Advance the slave by one step with the current input levels.
    pub fn step(&mut self) -> AxiOutputs {
        self.outputs = self.device.tick(&self.inputs);
        self.steps += 1;
        self.outputs
    }

    /// Advance `steps` steps without starting any transaction.
    pub fn idle(&mut self, steps: u32) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Hold `aresetn` low for one step, withdrawing every request.
    pub fn reset(&mut self) {
        self.inputs = AxiInputs {
            aresetn: false,
            ..AxiInputs::default()
        };
        self.step();
        self.inputs.aresetn = true;
        self.transcript.record(format_args!("reset"));
    }

    /// Perform one write transaction.
    ///
    /// # Arguments
    ///
    /// * `addr` - Register index
    /// * `data` - Write data
    /// * `strobe` - Byte-enable mask
    ///
    /// # Returns
    ///
    /// * `Resp` - Response code presented on `bresp`
    ///
    /// # Error
    ///
    /// * `MasterError::Stalled` - The slave never accepted the request or
    ///   never presented a response
    pub fn write(
        &mut self,
        addr: BusAddr,
        data: BusData,
        strobe: ByteStrobe,
    ) -> Result<Resp, MasterError> {
        self.discard_stale_response(Channel::WriteResponse);
        self.inputs.awaddr = addr;
        self.inputs.awvalid = true;
        self.inputs.wdata = data;
        self.inputs.wstrb = strobe;
        self.inputs.wvalid = true;

        let mut waited = 0;
        while self.inputs.awvalid || self.inputs.wvalid {
            if waited == self.max_steps {
                let channel = if self.inputs.awvalid {
                    Channel::WriteAddress
                } else {
                    Channel::WriteData
                };
                self.inputs.awvalid = false;
                self.inputs.wvalid = false;
                return Err(MasterError::Stalled {
                    channel,
                    steps: waited,
                });
            }
            let aw_handshake = self.inputs.awvalid && self.outputs.awready;
            let w_handshake = self.inputs.wvalid && self.outputs.wready;
            self.step();
            if aw_handshake {
                self.inputs.awvalid = false;
            }
            if w_handshake {
                self.inputs.wvalid = false;
            }
            waited += 1;
        }

        let resp = self.accept_response(Channel::WriteResponse)?.1;
        log::debug!("write({addr:#x}, {data:#x}, {strobe:#x}) -> {resp}");
        self.transcript
            .record(format_args!("write({addr:#x}, {data:#x}, {strobe:#x}) -> {resp}"));
        Ok(resp)
    }

    /// Perform one read transaction.
    ///
    /// # Arguments
    ///
    /// * `addr` - Register index
    ///
    /// # Returns
    ///
    /// * `(BusData, Resp)` - Values presented on `rdata` and `rresp`
    ///
    /// # Error
    ///
    /// * `MasterError::Stalled` - The slave never accepted the request or
    ///   never presented a response
    pub fn read(&mut self, addr: BusAddr) -> Result<(BusData, Resp), MasterError> {
        self.discard_stale_response(Channel::ReadResponse);
        self.inputs.araddr = addr;
        self.inputs.arvalid = true;

        let mut waited = 0;
        while self.inputs.arvalid {
            if waited == self.max_steps {
                self.inputs.arvalid = false;
                return Err(MasterError::Stalled {
                    channel: Channel::ReadAddress,
                    steps: waited,
                });
            }
            let ar_handshake = self.outputs.arready;
            self.step();
            if ar_handshake {
                self.inputs.arvalid = false;
            }
            waited += 1;
        }

        let (data, resp) = self.accept_response(Channel::ReadResponse)?;
        log::debug!("read({addr:#x}) -> {data:#x} {resp}");
        self.transcript
            .record(format_args!("read({addr:#x}) -> {data:#x} {resp}"));
        Ok((data, resp))
    }

    /// Wait out the response delay, then hold ready until the response
    /// handshake completes.
    fn accept_response(&mut self, channel: Channel) -> Result<(BusData, Resp), MasterError> {
        let delay = self.delay.next();
        self.idle(delay);

        self.set_response_ready(channel, true);
        let mut waited = 0;
        loop {
            if waited == self.max_steps {
                self.set_response_ready(channel, false);
                return Err(MasterError::Stalled {
                    channel,
                    steps: waited,
                });
            }
            let out = self.outputs;
            let (valid, data, resp) = match channel {
                Channel::ReadResponse => (out.rvalid, out.rdata, out.rresp),
                _ => (out.bvalid, 0, out.bresp),
            };
            self.step();
            waited += 1;
            if valid {
                self.set_response_ready(channel, false);
                return Ok((data, resp));
            }
        }
    }

    /// Accept a response presented before this request was issued, such as a
    /// forced SLVERR left behind by an abandoned transaction.
    fn discard_stale_response(&mut self, channel: Channel) {
        let (valid, resp) = match channel {
            Channel::ReadResponse => (self.outputs.rvalid, self.outputs.rresp),
            _ => (self.outputs.bvalid, self.outputs.bresp),
        };
        if !valid {
            return;
        }
        self.set_response_ready(channel, true);
        self.step();
        self.set_response_ready(channel, false);
        log::warn!("{channel} {resp} discarded");
        self.transcript.record(format_args!("{channel} discarded: {resp}"));
    }

    fn set_response_ready(&mut self, channel: Channel, ready: bool) {
        match channel {
            Channel::ReadResponse => self.inputs.rready = ready,
            _ => self.inputs.bready = ready,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Slave that never asserts any ready or valid.
    struct DeadSlave {
        ticks: u32,
    }

    impl Clocked for DeadSlave {
        type Inputs = AxiInputs;
        type Outputs = AxiOutputs;

        fn tick(&mut self, _inputs: &AxiInputs) -> AxiOutputs {
            self.ticks += 1;
            self.outputs()
        }

        fn outputs(&self) -> AxiOutputs {
            AxiOutputs {
                awready: false,
                wready: false,
                arready: false,
                ..AxiOutputs::default()
            }
        }

        fn reset(&mut self) {}
    }

    #[test]
    fn test_write_stalls_on_dead_slave() {
        let mut master = AxiLiteMaster::new(DeadSlave { ticks: 0 }).with_max_steps(5);
        assert_eq!(
            master.write(0, 0, 0xf),
            Err(MasterError::Stalled {
                channel: Channel::WriteAddress,
                steps: 5
            })
        );
        assert_eq!(master.device().ticks, 5);
        assert!(!master.inputs().awvalid && !master.inputs().wvalid);
        assert!(master.transcript().is_empty());
    }

    #[test]
    fn test_read_stalls_on_dead_slave() {
        let mut master = AxiLiteMaster::new(DeadSlave { ticks: 0 }).with_max_steps(3);
        let err = master.read(4).unwrap_err();
        assert_eq!(
            err,
            MasterError::Stalled {
                channel: Channel::ReadAddress,
                steps: 3
            }
        );
        assert_eq!(err.to_string(), "read address handshake stalled after 3 steps");
        assert!(!master.inputs().arvalid);
    }

    /// Slave that presents a write response nobody asked for, then never
    /// accepts a request.
    struct StaleResponseSlave {
        bvalid: bool,
    }

    impl Clocked for StaleResponseSlave {
        type Inputs = AxiInputs;
        type Outputs = AxiOutputs;

        fn tick(&mut self, inputs: &AxiInputs) -> AxiOutputs {
            if inputs.bready {
                self.bvalid = false;
            }
            self.outputs()
        }

        fn outputs(&self) -> AxiOutputs {
            AxiOutputs {
                awready: false,
                wready: false,
                bvalid: self.bvalid,
                bresp: Resp::SlvErr,
                ..AxiOutputs::default()
            }
        }

        fn reset(&mut self) {}
    }

    #[test]
    fn test_stale_response_discarded_before_write() {
        let mut master =
            AxiLiteMaster::new(StaleResponseSlave { bvalid: true }).with_max_steps(2);
        assert!(master.write(1, 2, 0xf).is_err());
        assert!(!master.device().bvalid);
        assert!(!master.inputs().bready);
        assert_eq!(master.steps(), 3);
        assert_eq!(
            master.transcript().take(),
            "write response discarded: SlvErr\n"
        );
    }

    #[test]
    fn test_reset_pulses_aresetn() {
        let mut master = AxiLiteMaster::new(DeadSlave { ticks: 0 });
        master.reset();
        assert!(master.inputs().aresetn);
        assert_eq!(master.steps(), 1);
        assert_eq!(master.transcript().take(), "reset\n");
    }

    #[test]
    fn test_random_delay_is_bounded() {
        let mut delay = ResponseDelay::random(7, 10);
        for _ in 0..100 {
            let steps = delay.next();
            assert!((1..=10).contains(&steps));
        }
        assert_eq!(ResponseDelay::Fixed(3).next(), 3);
        assert_eq!(ResponseDelay::None.next(), 0);
    }
}
