//! Core identifier types for the codec.

/// A simulation tick number.
///
/// Ticks are monotonically increasing identifiers for authority steps. All
/// temporal comparisons on the authority side are tick-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tick(u32);

impl Tick {
    /// Creates a new tick.
    #[must_use]
    pub const fn new(tick: u32) -> Self {
        Self(tick)
    }

    /// Returns the raw tick value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns `true` if this tick is zero (often used as "before any data").
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Tick {
    fn from(tick: u32) -> Self {
        Self(tick)
    }
}

impl From<Tick> for u32 {
    fn from(tick: Tick) -> Self {
        tick.0
    }
}

/// A stable object identifier.
///
/// Object IDs are assigned by the simulation layer and must remain stable for
/// the lifetime of an object. Reusing an id for a new object requires evicting
/// the old baseline first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Creates a new object ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw object ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for ObjectId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<ObjectId> for u32 {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

/// An interest-zone identifier.
///
/// Which recipients care about which zones is decided by an external interest
/// layer; the codec only filters snapshot entries by zone membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ZoneId(u32);

impl ZoneId {
    /// Creates a new zone ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw zone ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for ZoneId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<ZoneId> for u32 {
    fn from(id: ZoneId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_new_and_raw() {
        let tick = Tick::new(100);
        assert_eq!(tick.raw(), 100);
    }

    #[test]
    fn tick_zero() {
        assert!(Tick::new(0).is_zero());
        assert!(!Tick::new(1).is_zero());
    }

    #[test]
    fn tick_ordering() {
        assert!(Tick::new(1) < Tick::new(2));
        assert!(Tick::new(2) >= Tick::new(2));
    }

    #[test]
    fn tick_conversions() {
        let tick: Tick = 42u32.into();
        assert_eq!(u32::from(tick), 42);
    }

    #[test]
    fn tick_default_is_zero() {
        assert!(Tick::default().is_zero());
    }

    #[test]
    fn object_id_roundtrip() {
        let id = ObjectId::new(99);
        assert_eq!(id.raw(), 99);
        let from: ObjectId = 7u32.into();
        assert_eq!(u32::from(from), 7);
    }

    #[test]
    fn object_id_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ObjectId::new(1));
        set.insert(ObjectId::new(1));
        set.insert(ObjectId::new(2));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn zone_id_roundtrip() {
        let zone = ZoneId::new(5);
        assert_eq!(zone.raw(), 5);
        assert_ne!(ZoneId::new(5), ZoneId::new(6));
    }

    #[test]
    fn ids_are_const_constructible() {
        const TICK: Tick = Tick::new(1);
        const OBJ: ObjectId = ObjectId::new(2);
        const ZONE: ZoneId = ZoneId::new(3);
        assert_eq!(TICK.raw(), 1);
        assert_eq!(OBJ.raw(), 2);
        assert_eq!(ZONE.raw(), 3);
    }
}
