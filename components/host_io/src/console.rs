//! Console trace sink.

use core_types::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Console output writer trait
pub trait ConsoleWriter {
    /// Write a trace line to the console output
    fn write(&self, message: &str);
}

/// Default console writer that prints to stdout
struct StdoutWriter;

impl ConsoleWriter for StdoutWriter {
    fn write(&self, message: &str) {
        println!("{}", message);
    }
}

/// Write-only sink for human-readable trace lines.
///
/// Lines are retained in an output buffer so tests can assert on what was
/// traced; the writer decides where lines actually go.
pub struct Console {
    output: Rc<RefCell<Vec<String>>>,
    writer: Box<dyn ConsoleWriter>,
}

impl Console {
    /// Create a console that prints to stdout
    pub fn new() -> Self {
        Console {
            output: Rc::new(RefCell::new(Vec::new())),
            writer: Box::new(StdoutWriter),
        }
    }

    /// Create a console with custom output capture
    pub fn new_with_output(output: Rc<RefCell<Vec<String>>>) -> Self {
        Console {
            output,
            writer: Box::new(CaptureWriter),
        }
    }

    /// Format values for output
    fn format_values(values: &[Value]) -> String {
        values
            .iter()
            .map(Value::to_text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Trace a preformatted line
    pub fn print(&self, message: &str) {
        self.output.borrow_mut().push(message.to_string());
        self.writer.write(message);
    }

    /// Trace a line built from values
    pub fn log(&self, values: &[Value]) {
        let message = Self::format_values(values);
        self.output.borrow_mut().push(message.clone());
        self.writer.write(&message);
    }

    /// Trace an error line
    pub fn error(&self, values: &[Value]) {
        let message = format!("Error: {}", Self::format_values(values));
        self.output.borrow_mut().push(message.clone());
        self.writer.write(&message);
    }

    /// Trace a warning line
    pub fn warn(&self, values: &[Value]) {
        let message = format!("Warning: {}", Self::format_values(values));
        self.output.borrow_mut().push(message.clone());
        self.writer.write(&message);
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

/// Writer for captured consoles; lines are already retained in the buffer
struct CaptureWriter;

impl ConsoleWriter for CaptureWriter {
    fn write(&self, _message: &str) {}
}
