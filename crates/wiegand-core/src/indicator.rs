//! Notification sink for the "transmitting" indicator.
//!
//! The editor does not know how the indicator is shown; it only issues
//! [`IndicatorCommand`]s to whatever [`IndicatorSink`] it owns. Commands are
//! fire-and-forget and never fail from the editor's point of view.

/// Opaque commands sent to the notification sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorCommand {
    /// Begin the transmitting indication (LED blink).
    Start,
    /// End the transmitting indication.
    Stop,
}

/// Receiver of indicator commands.
pub trait IndicatorSink {
    fn send(&mut self, command: IndicatorCommand);
}

/// Lets a caller lend a sink to the editor and inspect it after teardown.
impl<T: IndicatorSink + ?Sized> IndicatorSink for &mut T {
    fn send(&mut self, command: IndicatorCommand) {
        (**self).send(command)
    }
}

/// Sink that records every command, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub commands: alloc::vec::Vec<IndicatorCommand>,
}

#[cfg(test)]
impl IndicatorSink for RecordingSink {
    fn send(&mut self, command: IndicatorCommand) {
        self.commands.push(command);
    }
}
