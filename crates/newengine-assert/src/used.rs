use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::mem::ManuallyDrop;
use std::panic::Location;

use crate::config;
use crate::dispatch::{self, CallSite};
use crate::level::Level;

const EXPRESSION: &str = "used";
const MESSAGE: &str = "unused value";

type SiteKey = (&'static str, u32, u32);

static SITES: Mutex<Option<HashMap<SiteKey, &'static CallSite>>> = parking_lot::const_mutex(None);

/// Ignore flag for the `MustUse::new` call at `location`, created on first use.
fn site_for(location: &'static Location<'static>) -> &'static CallSite {
    let key = (location.file(), location.line(), location.column());
    let mut sites = SITES.lock();
    let map = sites.get_or_insert_with(HashMap::new);
    let site = *map
        .entry(key)
        .or_insert_with(|| &*Box::leak(Box::new(CallSite::new(key.0, key.1, EXPRESSION))));
    site
}

/// A value that has to be consumed.
///
/// Dropping it without calling [`MustUse::into_inner`] (or [`MustUse::mark_used`]) reports an
/// `unused value` check at `LEVEL`, located where the wrapper was created. Each clone tracks
/// its own consumption.
///
/// `LEVEL` is fixed at compile time and defaults to `DEBUG`. The runtime default level from
/// [`AssertConfig`](crate::AssertConfig) only applies to `check!`.
///
/// ```ignore
/// fn spawn() -> MustUse<Handle> { MustUse::new(Handle::new()) }
///
/// let handle = spawn().into_inner();
/// ```
#[must_use = "dropping a MustUse without into_inner() reports an unused value"]
pub struct MustUse<T, const LEVEL: i32 = { Level::DEBUG.value() }> {
    value: ManuallyDrop<T>,
    used: bool,
    location: &'static Location<'static>,
}

pub type MustUseWarning<T> = MustUse<T, { Level::WARNING.value() }>;
pub type MustUseDebug<T> = MustUse<T, { Level::DEBUG.value() }>;
pub type MustUseError<T> = MustUse<T, { Level::ERROR.value() }>;
pub type MustUseFatal<T> = MustUse<T, { Level::FATAL.value() }>;

impl<T, const LEVEL: i32> MustUse<T, LEVEL> {
    pub const SEVERITY: Level = Level::custom(LEVEL);

    #[track_caller]
    #[inline]
    pub fn new(value: T) -> Self {
        Self {
            value: ManuallyDrop::new(value),
            used: false,
            location: Location::caller(),
        }
    }

    /// Consumes the wrapper and hands out the value.
    #[inline]
    pub fn into_inner(self) -> T {
        let mut this = ManuallyDrop::new(self);
        this.used = true;
        // SAFETY: `this` is never dropped, so the value is moved out exactly once.
        unsafe { ManuallyDrop::take(&mut this.value) }
    }

    /// Acknowledges that the value is deliberately discarded.
    #[inline]
    pub fn mark_used(&mut self) {
        self.used = true;
    }

    #[inline]
    pub fn is_used(&self) -> bool {
        self.used
    }

    /// Where the wrapper was created.
    #[inline]
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl<T: Clone, const LEVEL: i32> Clone for MustUse<T, LEVEL> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            used: self.used,
            location: self.location,
        }
    }
}

impl<T: fmt::Debug, const LEVEL: i32> fmt::Debug for MustUse<T, LEVEL> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MustUse")
            .field("value", &*self.value)
            .field("used", &self.used)
            .field("level", &Self::SEVERITY)
            .finish()
    }
}

impl<T, const LEVEL: i32> Drop for MustUse<T, LEVEL> {
    fn drop(&mut self) {
        // SAFETY: `into_inner` bypasses this destructor, so the value is still here.
        unsafe { ManuallyDrop::drop(&mut self.value) };

        if self.used || !config::ENABLED {
            return;
        }

        let site = site_for(self.location);
        if site.is_silenced() {
            return;
        }

        if std::thread::panicking() {
            log::warn!(
                "unused value created at {}:{} dropped during unwinding, not reported",
                self.location.file(),
                self.location.line()
            );
            return;
        }

        let action = dispatch::handle(
            site,
            std::any::type_name::<Self>(),
            Self::SEVERITY,
            Some(format_args!("{}", MESSAGE)),
        );
        if action == crate::Action::Break {
            crate::debug_break!();
        }
    }
}
