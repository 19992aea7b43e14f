/*++

Licensed under the Apache-2.0 license.

File Name:

    bus.rs

Abstract:

    File contains definition of the Clocked trait and bus access faults.

--*/

/// Reason a register access could not be honored. Every variant is reported
/// to the requester as `Resp::SlvErr`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BusError {
    /// Target register is not writable
    WriteViolation,

    /// Target register is not readable
    ReadViolation,

    /// Index is beyond the data and status regions
    OutOfRange,
}

impl std::fmt::Display for BusError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BusError::WriteViolation => write!(f, "write violation"),
            BusError::ReadViolation => write!(f, "read violation"),
            BusError::OutOfRange => write!(f, "address out of range"),
        }
    }
}

/// Represents a synchronous device advanced one discrete step at a time by an
/// external tick source.
///
/// All outputs are registered: the value returned by [`Clocked::outputs`]
/// during step `t` was committed at the end of step `t - 1`, and inputs
/// supplied to [`Clocked::tick`] only become visible on the outputs after the
/// step completes.
pub trait Clocked {
    /// Signals driven into the device by the requester
    type Inputs;

    /// Signals driven by the device
    type Outputs;

    /// Sample `inputs`, compute the next state and commit it.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Input signal levels for this step
    ///
    /// # Returns
    ///
    /// * `Self::Outputs` - Outputs committed at the end of this step
    fn tick(&mut self, inputs: &Self::Inputs) -> Self::Outputs;

    /// Outputs committed by the most recent step
    fn outputs(&self) -> Self::Outputs;

    /// Asynchronous reset. Takes effect immediately regardless of pending
    /// requests.
    fn reset(&mut self);
}
