// src/theme.rs

//! The light/dark display mode and the capability components use to query it.
//!
//! Nothing in this crate reads a global theme. Components are handed a
//! [`ThemeProvider`] and ask it for the current theme every time they need a
//! color, so a theme switch takes effect on the next frame without any cache
//! invalidation.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::VisError;

/// One of the two global display modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    #[default]
    Light,
    Dark,
}

impl ThemeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::Light => "light",
            ThemeId::Dark => "dark",
        }
    }

    /// The other theme; used by toggle controls.
    pub fn toggled(self) -> Self {
        match self {
            ThemeId::Light => ThemeId::Dark,
            ThemeId::Dark => ThemeId::Light,
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeId {
    type Err = VisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeId::Light),
            "dark" => Ok(ThemeId::Dark),
            other => Err(VisError::UnsupportedTheme(other.to_string())),
        }
    }
}

/// Callback invoked with the new theme after every change.
pub type ThemeListener = Box<dyn Fn(ThemeId)>;

/// Source of the current theme.
pub trait ThemeProvider {
    /// Returns the current theme. Sources that hand out raw strings report
    /// anything other than `"light"`/`"dark"` as `UnsupportedTheme`.
    fn current(&self) -> Result<ThemeId, VisError>;

    /// Registers a listener notified on every theme change.
    fn on_change(&self, listener: ThemeListener);
}

/// Picks the theme at startup: a valid stored preference wins, otherwise the
/// operating system's dark-mode preference decides.
pub fn initial_theme(stored: Option<&str>, prefers_dark: bool) -> ThemeId {
    if let Some(raw) = stored {
        match raw.parse::<ThemeId>() {
            Ok(theme) => return theme,
            Err(e) => warn!("Ignoring stored theme preference: {}", e),
        }
    }
    if prefers_dark {
        ThemeId::Dark
    } else {
        ThemeId::Light
    }
}

#[derive(Default)]
struct ThemeStateInner {
    theme: Cell<ThemeId>,
    listeners: RefCell<Vec<Rc<dyn Fn(ThemeId)>>>,
}

/// Single-threaded, shareable theme holder.
///
/// Cloning yields another handle to the same state. Listeners run
/// synchronously, in registration order, on every call to [`ThemeState::set`].
#[derive(Clone, Default)]
pub struct ThemeState {
    inner: Rc<ThemeStateInner>,
}

impl ThemeState {
    pub fn new(theme: ThemeId) -> Self {
        let state = Self::default();
        state.inner.theme.set(theme);
        state
    }

    pub fn get(&self) -> ThemeId {
        self.inner.theme.get()
    }

    /// Sets the theme and notifies every listener, even when the value is
    /// unchanged.
    pub fn set(&self, theme: ThemeId) {
        debug!("Theme set to {}", theme);
        self.inner.theme.set(theme);
        // Snapshot so listeners may register further listeners.
        let listeners: Vec<_> = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(theme);
        }
    }

    /// Flips between light and dark, returning the new theme.
    pub fn toggle(&self) -> ThemeId {
        let next = self.get().toggled();
        self.set(next);
        next
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

impl fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeState")
            .field("theme", &self.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl ThemeProvider for ThemeState {
    fn current(&self) -> Result<ThemeId, VisError> {
        Ok(self.get())
    }

    fn on_change(&self, listener: ThemeListener) {
        self.inner.listeners.borrow_mut().push(Rc::from(listener));
    }
}

/// Adapts a zero-argument getter returning a theme name.
///
/// The getter is polled on every query; there is no change notification, so
/// registered listeners are dropped.
pub struct FnTheme<F> {
    getter: F,
}

impl<F, S> FnTheme<F>
where
    F: Fn() -> S,
    S: AsRef<str>,
{
    pub fn new(getter: F) -> Self {
        Self { getter }
    }
}

impl<F, S> ThemeProvider for FnTheme<F>
where
    F: Fn() -> S,
    S: AsRef<str>,
{
    fn current(&self) -> Result<ThemeId, VisError> {
        (self.getter)().as_ref().parse()
    }

    fn on_change(&self, _listener: ThemeListener) {
        debug!("FnTheme is polled; change listener ignored");
    }
}
