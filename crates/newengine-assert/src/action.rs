/// Resolution returned by a handler for a failed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Nothing further happens.
    None,
    /// Terminate the process on the spot.
    Abort,
    /// Trap into an attached debugger, then continue.
    Break,
    /// Skip this occurrence only.
    Ignore,
    /// Silence this call site for the rest of the process.
    IgnoreLine,
    /// Silence every call site for the rest of the process.
    IgnoreAll,
    /// Raise a [`Violation`](crate::Violation).
    Throw,
}

impl Action {
    /// Maps one prompt keystroke to an action.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'i' => Some(Self::Ignore),
            'f' => Some(Self::IgnoreLine),
            'a' => Some(Self::IgnoreAll),
            'd' => Some(Self::Break),
            'b' => Some(Self::Abort),
            _ => None,
        }
    }
}
