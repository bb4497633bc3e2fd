//! Scoped interpolation overrides.

use std::cell::Cell;

/// Shared interpolation settings with stack-discipline scoped overrides.
///
/// A context carries the "allow extrapolation" flag and an optional override
/// for the newest sample's timestamp. [`enter`](Self::enter) snapshots both
/// and returns a guard; dropping the guard restores them, however the scope
/// is left. Guards nest: each restores the values it saw on entry.
#[derive(Debug)]
pub struct InterpolationContext {
    allow_extrapolation: Cell<bool>,
    last_timestamp: Cell<Option<f64>>,
}

impl Default for InterpolationContext {
    fn default() -> Self {
        Self {
            allow_extrapolation: Cell::new(true),
            last_timestamp: Cell::new(None),
        }
    }
}

impl InterpolationContext {
    /// Creates a context with extrapolation allowed and no timestamp
    /// override.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether extrapolation past the newest sample is allowed.
    #[must_use]
    pub fn allow_extrapolation(&self) -> bool {
        self.allow_extrapolation.get()
    }

    /// Returns the timestamp override for the newest sample, if any.
    #[must_use]
    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp.get()
    }

    /// Sets whether extrapolation is allowed.
    pub fn set_allow_extrapolation(&self, allow: bool) {
        self.allow_extrapolation.set(allow);
    }

    /// Sets or clears the newest-sample timestamp override.
    pub fn set_last_timestamp(&self, timestamp: Option<f64>) {
        self.last_timestamp.set(timestamp);
    }

    /// Opens a scope: the returned guard restores the current values when
    /// dropped, no matter how the scope exits.
    #[must_use]
    pub fn enter(&self) -> ContextGuard<'_> {
        ContextGuard {
            ctx: self,
            prev_allow: self.allow_extrapolation.get(),
            prev_timestamp: self.last_timestamp.get(),
        }
    }
}

/// Restores an [`InterpolationContext`]'s previous values on drop.
#[derive(Debug)]
pub struct ContextGuard<'a> {
    ctx: &'a InterpolationContext,
    prev_allow: bool,
    prev_timestamp: Option<f64>,
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        self.ctx.allow_extrapolation.set(self.prev_allow);
        self.ctx.last_timestamp.set(self.prev_timestamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_allow_extrapolation() {
        let ctx = InterpolationContext::new();
        assert!(ctx.allow_extrapolation());
        assert!(ctx.last_timestamp().is_none());
    }

    #[test]
    fn guard_restores_on_drop() {
        let ctx = InterpolationContext::new();
        {
            let _guard = ctx.enter();
            ctx.set_allow_extrapolation(false);
            ctx.set_last_timestamp(Some(12.5));
            assert!(!ctx.allow_extrapolation());
            assert_eq!(ctx.last_timestamp(), Some(12.5));
        }
        assert!(ctx.allow_extrapolation());
        assert!(ctx.last_timestamp().is_none());
    }

    #[test]
    fn nested_guards_restore_in_order() {
        let ctx = InterpolationContext::new();
        let outer = ctx.enter();
        ctx.set_allow_extrapolation(false);
        {
            let _inner = ctx.enter();
            ctx.set_allow_extrapolation(true);
            ctx.set_last_timestamp(Some(1.0));
        }
        // Inner scope restored the outer scope's override.
        assert!(!ctx.allow_extrapolation());
        assert!(ctx.last_timestamp().is_none());
        drop(outer);
        assert!(ctx.allow_extrapolation());
    }

    #[test]
    fn guard_restores_across_panic() {
        let ctx = InterpolationContext::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = ctx.enter();
            ctx.set_allow_extrapolation(false);
            panic!("scope left by panic");
        }));
        assert!(result.is_err());
        assert!(ctx.allow_extrapolation());
    }
}
