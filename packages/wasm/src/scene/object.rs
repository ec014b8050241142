//! Managed object identifiers.
//!
//! A managed object is the positioned panel bound to one record. Its id is
//! the record's index, so objects can never be reordered independently of
//! the records they show.

use std::fmt;

use crate::records::RecordId;

/// Managed object identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// Create a new ObjectId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Get the id as a slot index into per-object buffers.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({})", self.0)
    }
}

impl From<u32> for ObjectId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<RecordId> for ObjectId {
    #[inline]
    fn from(id: RecordId) -> Self {
        Self(id.raw())
    }
}

impl From<ObjectId> for RecordId {
    #[inline]
    fn from(id: ObjectId) -> Self {
        RecordId(id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id() {
        let id = ObjectId::new(9);
        assert_eq!(id.raw(), 9);
        assert_eq!(id.index(), 9);
        assert_eq!(format!("{}", id), "Object(9)");
    }

    #[test]
    fn test_object_record_binding() {
        let record = RecordId(17);
        let object: ObjectId = record.into();
        assert_eq!(object, ObjectId(17));
        assert_eq!(RecordId::from(object), record);
    }
}
