//! Newtype IDs for type-safe identification of manifest elements.
//!
//! Using newtypes prevents accidentally mixing up different kinds of IDs
//! (e.g., passing an object ID where an image ID is expected).
//!
//! The newtypes accept any `u32`, including the reserved value `0`, so that
//! a parsed manifest can carry an invalid ID through to validation, which
//! reports it instead of the parser rejecting it outright.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The smallest valid identifier. `0` is reserved.
pub const MIN_ID: u32 = 1;

/// The largest valid identifier.
pub const MAX_ID: u32 = u32::MAX;

/// A unique identifier for an image (and therefore a plane) in a manifest.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub u32);

impl ImageId {
    /// Creates a new ImageId.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the underlying u32 value.
    #[inline]
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Returns true if the ID lies in the valid range `1..=u32::MAX`.
    #[inline]
    pub fn is_in_range(&self) -> bool {
        self.0 >= MIN_ID
    }
}

impl From<u32> for ImageId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Debug for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageId({})", self.0)
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for an object in a manifest.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// Creates a new ObjectId.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the underlying u32 value.
    #[inline]
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Returns true if the ID lies in the valid range `1..=u32::MAX`.
    #[inline]
    pub fn is_in_range(&self) -> bool {
        self.0 >= MIN_ID
    }
}

impl From<u32> for ObjectId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_equality() {
        assert_eq!(ImageId(1), ImageId(1));
        assert_ne!(ImageId(1), ImageId(2));
    }

    #[test]
    fn test_id_ordering() {
        assert!(ImageId(1) < ImageId(2));
        assert!(ObjectId(10) > ObjectId(5));
    }

    #[test]
    fn test_id_range() {
        assert!(!ImageId(0).is_in_range());
        assert!(ImageId(1).is_in_range());
        assert!(ImageId(u32::MAX).is_in_range());
        assert!(!ObjectId(0).is_in_range());
    }

    #[test]
    fn test_id_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ObjectId(1));
        set.insert(ObjectId(2));
        set.insert(ObjectId(1)); // duplicate
        assert_eq!(set.len(), 2);
    }
}
