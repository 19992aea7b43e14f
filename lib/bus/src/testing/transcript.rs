/*++

Licensed under the Apache-2.0 license.

File Name:

    transcript.rs

Abstract:

    File contains a shared transaction transcript used by bus drivers and
    unit tests.

--*/
use std::{
    cell::{Ref, RefCell},
    fmt::Write,
    ops::Deref,
    rc::Rc,
};

/// A line-oriented record of completed bus transactions that can be appended
/// to without `&mut self`.
///
/// Clones share the same buffer, so a test can keep one handle while a
/// driver owns another.
///
/// * Example
///
/// ```
/// use regfile_emu_bus::testing::Transcript;
///
/// let transcript = Transcript::new();
/// transcript.record(format_args!("write({:#x}, {:#x})", 9, 0x1234));
/// transcript.record(format_args!("read({:#x})", 9));
/// assert_eq!(transcript.len(), 2);
/// assert_eq!("write(0x9, 0x1234)\nread(0x9)\n", transcript.take());
/// assert!(transcript.is_empty());
/// ```
#[derive(Clone, Default)]
pub struct Transcript {
    buf: Rc<RefCell<String>>,
}

impl Transcript {
    /// Construct an empty `Transcript`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line.
    pub fn record(&self, line: std::fmt::Arguments<'_>) {
        let mut buf = self.buf.borrow_mut();
        // Writing into a String cannot fail.
        let _ = buf.write_fmt(line);
        buf.push('\n');
    }

    /// Access the contents without modifying them.
    pub fn as_str(&self) -> impl Deref<Target = str> + '_ {
        Ref::map(self.buf.borrow(), String::as_str)
    }

    /// Number of recorded lines.
    pub fn len(&self) -> usize {
        self.buf.borrow().lines().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.borrow().is_empty()
    }

    /// Empty the transcript and return what it held. Useful for asserting on
    /// the most recent transactions.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.buf.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_take() {
        let transcript = Transcript::new();
        transcript.record(format_args!("line {}", 1));
        transcript.record(format_args!("line {}", 2));
        assert_eq!("line 1\nline 2\n", &*transcript.as_str());
        assert_eq!(transcript.len(), 2);
        assert_eq!("line 1\nline 2\n", transcript.take());
        assert_eq!("", transcript.take());
    }

    #[test]
    #[allow(clippy::redundant_clone)]
    fn test_clones_share_buffer() {
        let transcript = Transcript::new();
        transcript.clone().record(format_args!("from clone"));
        assert_eq!("from clone\n", &*transcript.as_str());
    }
}
