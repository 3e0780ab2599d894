//! Test host implementation for in-memory I/O testing.
//!
//! This module provides a test implementation of the `IoHost` trait that uses
//! in-memory buffers instead of a real terminal. This enables testing the REPL
//! loop without requiring terminal interaction.

use std::collections::VecDeque;

use super::{InputLine, IoError, IoHost, Output, OutputStyle, PromptConfig, Signal};

#[derive(Debug)]
enum Event {
    Line(String),
    Signal(Signal),
}

/// Test host with in-memory I/O buffers.
///
/// Input lines and signals share one queue and are consumed in the order
/// they were queued. Once the queue is empty the host reports end of input.
#[derive(Debug, Default)]
pub struct TestHost {
    events: VecDeque<Event>,
    pending_input: Option<InputLine>,
    pending_signal: Option<Signal>,
    output_buffer: Vec<Output>,
    prompts: Vec<PromptConfig>,
    flush_count: usize,
}

impl TestHost {
    /// Create a new empty test host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an input line.
    pub fn queue_input(&mut self, line: impl Into<String>) {
        self.events.push_back(Event::Line(line.into()));
    }

    /// Queue multiple input lines.
    pub fn queue_inputs(&mut self, lines: impl IntoIterator<Item = impl Into<String>>) {
        for line in lines {
            self.queue_input(line);
        }
    }

    /// Queue a signal.
    pub fn queue_signal(&mut self, signal: Signal) {
        self.events.push_back(Event::Signal(signal));
    }

    /// Get all output that was written.
    pub fn output(&self) -> &[Output] {
        &self.output_buffer
    }

    /// Get output of a specific style.
    pub fn output_with_style(&self, style: OutputStyle) -> Vec<&str> {
        self.output_buffer
            .iter()
            .filter(|o| o.style == style)
            .map(|o| o.text.as_str())
            .collect()
    }

    /// Get all error output.
    pub fn errors(&self) -> Vec<&str> {
        self.output_with_style(OutputStyle::Error)
    }

    /// Every prompt the core asked for, oldest first.
    pub fn prompts(&self) -> &[PromptConfig] {
        &self.prompts
    }

    /// Get the number of times `flush()` was called.
    pub fn flush_count(&self) -> usize {
        self.flush_count
    }

    /// Check if there are queued events left.
    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }
}

impl IoHost for TestHost {
    fn wait_for_input(&mut self) -> Result<(), IoError> {
        match self.events.pop_front() {
            Some(Event::Line(line)) => self.pending_input = Some(InputLine { line }),
            Some(Event::Signal(signal)) => self.pending_signal = Some(signal),
            None => self.pending_signal = Some(Signal::Eof),
        }
        Ok(())
    }

    fn read_input(&mut self) -> Result<Option<InputLine>, IoError> {
        Ok(self.pending_input.take())
    }

    fn read_signal(&mut self) -> Result<Option<Signal>, IoError> {
        Ok(self.pending_signal.take())
    }

    fn write_output(&mut self, output: Output) -> Result<(), IoError> {
        self.output_buffer.push(output);
        Ok(())
    }

    fn write_prompt(&mut self, config: PromptConfig) -> Result<(), IoError> {
        self.prompts.push(config);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), IoError> {
        self.flush_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_consumed_in_order() {
        let mut host = TestHost::new();
        host.queue_input("first");
        host.queue_signal(Signal::Interrupt);
        host.queue_input("second");

        host.wait_for_input().unwrap();
        assert_eq!(host.read_signal().unwrap(), None);
        assert_eq!(host.read_input().unwrap().unwrap().line, "first");

        host.wait_for_input().unwrap();
        assert_eq!(host.read_signal().unwrap(), Some(Signal::Interrupt));
        assert!(host.read_input().unwrap().is_none());

        host.wait_for_input().unwrap();
        assert_eq!(host.read_input().unwrap().unwrap().line, "second");
        assert!(!host.has_pending_events());
    }

    #[test]
    fn empty_queue_reports_eof() {
        let mut host = TestHost::new();

        host.wait_for_input().unwrap();

        assert_eq!(host.read_signal().unwrap(), Some(Signal::Eof));
    }

    #[test]
    fn records_output_and_prompts() {
        let mut host = TestHost::new();

        host.write_output(Output::error("bad")).unwrap();
        host.write_output(Output::info("note")).unwrap();
        host.write_prompt(PromptConfig::default()).unwrap();
        host.flush().unwrap();

        assert_eq!(host.errors(), vec!["bad"]);
        assert_eq!(host.output_with_style(OutputStyle::Info), vec!["note"]);
        assert_eq!(host.prompts().len(), 1);
        assert_eq!(host.flush_count(), 1);
        assert_eq!(host.output().len(), 2);
    }
}
