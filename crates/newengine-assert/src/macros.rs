/// Fully qualified name of the enclosing function.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __probe() {}
        $crate::__private::strip_probe($crate::__private::type_name_of(__probe))
    }};
}

/// Traps into an attached debugger. Without one the process receives `SIGTRAP`.
///
/// Expands to no `unsafe` code, so crates under `#![forbid(unsafe_code)]` can use it.
#[macro_export]
macro_rules! debug_break {
    () => {
        $crate::__private::debug_break()
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __check {
    (@site $level:expr, $cond:expr, $message:expr) => {{
        static __SITE: $crate::CallSite =
            $crate::CallSite::new(::core::file!(), ::core::line!(), ::core::stringify!($cond));

        if $crate::ENABLED && !($cond) && !__SITE.is_silenced() {
            let action = $crate::handle(
                &__SITE,
                $crate::function_name!(),
                $crate::Level::from($level),
                $message,
            );
            if action == $crate::Action::Break {
                $crate::debug_break!();
            }
        }
    }};
    ($level:expr, $cond:expr $(,)?) => {
        $crate::__check!(@site $level, $cond, ::core::option::Option::None)
    };
    ($level:expr, $cond:expr, $($arg:tt)+) => {
        $crate::__check!(
            @site $level,
            $cond,
            ::core::option::Option::Some(::core::format_args!($($arg)+))
        )
    };
}

/// Checks `cond` at the configured default level (`DEBUG` unless changed).
///
/// ```ignore
/// check!(idx < len);
/// check!(idx < len, "index {} out of {}", idx, len);
/// ```
#[macro_export]
macro_rules! check {
    ($($args:tt)+) => {
        $crate::__check!($crate::default_level(), $($args)+)
    };
}

#[macro_export]
macro_rules! check_warning {
    ($($args:tt)+) => {
        $crate::__check!($crate::Level::WARNING, $($args)+)
    };
}

#[macro_export]
macro_rules! check_debug {
    ($($args:tt)+) => {
        $crate::__check!($crate::Level::DEBUG, $($args)+)
    };
}

/// Raises a [`Violation`](crate::Violation) under the default handler.
#[macro_export]
macro_rules! check_error {
    ($($args:tt)+) => {
        $crate::__check!($crate::Level::ERROR, $($args)+)
    };
}

/// Aborts the process under the default handler.
#[macro_export]
macro_rules! check_fatal {
    ($($args:tt)+) => {
        $crate::__check!($crate::Level::FATAL, $($args)+)
    };
}

/// Checks at an arbitrary level, given as a [`Level`](crate::Level) or an `i32`.
#[macro_export]
macro_rules! check_custom {
    ($level:expr, $($args:tt)+) => {
        $crate::__check!($level, $($args)+)
    };
}
