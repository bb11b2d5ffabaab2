use std::fmt;

use crate::message::MessageBuf;

/// Messages shorter than this are stored inside the [`Violation`] itself.
pub const INLINE_MESSAGE_CAPACITY: usize = 1024;

/// Details of a check escalated to [`Action::Throw`](crate::Action::Throw).
///
/// Location strings are borrowed from the call site (`file!()`, `stringify!`, ...), only the
/// message is owned. The value travels as the payload of a panic and can be recovered with
/// [`catch_violation`](crate::catch_violation) or by downcasting the payload directly.
pub struct Violation {
    file: &'static str,
    line: u32,
    function: &'static str,
    expression: &'static str,
    message: MessageBuf<INLINE_MESSAGE_CAPACITY>,
}

impl Violation {
    pub fn new(
        file: &'static str,
        line: u32,
        function: &'static str,
        expression: &'static str,
        message: Option<&str>,
    ) -> Self {
        Self {
            file,
            line,
            function,
            expression,
            message: message.map(MessageBuf::new).unwrap_or_default(),
        }
    }

    #[inline]
    pub fn file(&self) -> &'static str {
        self.file
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn function(&self) -> &'static str {
        self.function
    }

    #[inline]
    pub fn expression(&self) -> &'static str {
        self.expression
    }

    /// The rendered message, `""` when the check had none.
    #[inline]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    #[inline]
    pub fn what(&self) -> &str {
        self.message()
    }
}

impl Clone for Violation {
    fn clone(&self) -> Self {
        Self {
            file: self.file,
            line: self.line,
            function: self.function,
            expression: self.expression,
            message: self.message.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.message.clone_from(&source.message);
        self.file = source.file;
        self.line = source.line;
        self.function = source.function;
        self.expression = source.expression;
    }
}

impl fmt::Debug for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Violation")
            .field("file", &self.file)
            .field("line", &self.line)
            .field("function", &self.function)
            .field("expression", &self.expression)
            .field("message", &self.message())
            .finish()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "assertion '{}' failed in {}:{} ({})",
            self.expression, self.file, self.line, self.function
        )?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for Violation {}
