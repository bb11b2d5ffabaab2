#![forbid(unsafe_op_in_unsafe_fn)]

//! Runtime checks for NewEngine.
//!
//! A failed check goes through one pipeline: the message is rendered, the active handler
//! picks an [`Action`], and the dispatcher carries it out. The built-in handler prints the
//! failure and escalates by [`Level`]: warnings pass, debug-range checks ask on stdin,
//! errors raise a [`Violation`], fatal checks abort.
//!
//! ```ignore
//! use newengine_assert::{check, check_error};
//!
//! check!(frame_index > 0);
//! check_error!(ptr.is_some(), "invalid ptr: must not be null");
//! ```

#[macro_use]
mod macros;

pub mod action;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod level;
pub mod message;
pub mod used;
pub mod violation;

pub use action::Action;
pub use config::{default_level, message_capacity, prompt_enabled, AssertConfig, ENABLED};
pub use dispatch::{
    catch_violation, handle, ignore_all, is_ignoring_all, raise, set_raise_hook,
    silence_violation_panics, CallSite, RaiseHook,
};
pub use error::{ConfigError, ConfigResult};
pub use handler::{current_handler, set_handler, AssertHandler, DefaultHandler, HandlerRef, Report};
pub use level::Level;
pub use message::MessageBuf;
pub use used::{MustUse, MustUseDebug, MustUseError, MustUseFatal, MustUseWarning};
pub use violation::{Violation, INLINE_MESSAGE_CAPACITY};

#[doc(hidden)]
pub mod __private {
    #[inline]
    pub fn type_name_of<T>(_: T) -> &'static str {
        std::any::type_name::<T>()
    }

    #[inline]
    pub fn strip_probe(name: &'static str) -> &'static str {
        name.strip_suffix("::__probe").unwrap_or(name)
    }

    /// Always inlined so the trap stops in the frame of the failed check.
    #[inline(always)]
    pub fn debug_break() {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        // SAFETY: `int3` only raises a breakpoint trap; no memory or registers are touched.
        unsafe {
            ::core::arch::asm!("int3", options(nomem, nostack));
        }
        #[cfg(target_arch = "aarch64")]
        // SAFETY: same as above for the aarch64 breakpoint instruction.
        unsafe {
            ::core::arch::asm!("brk #0xf000", options(nomem, nostack));
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn function_name_names_the_enclosing_fn() {
        let name = function_name!();
        assert!(name.ends_with("tests::function_name_names_the_enclosing_fn"), "{name}");
    }
}
