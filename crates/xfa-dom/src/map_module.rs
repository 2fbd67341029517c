//! Map module (per-node sparse attribute store)
//!
//! A node allocates its store on the first write, so nodes without extra
//! attributes pay nothing. Values come in three shapes:
//!
//! - [`Scalar`]: boolean, integer, enumerated or measurement, stored inline
//! - `String`: owned character data
//! - [`Blob`]: an opaque payload, either owned (duplicated on clone through
//!   [`CloneBlob`]) or explicitly shared (the clone aliases the same `Arc`)
//!
//! Blob payloads are released by `Drop` exactly once.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::attribute::{AttrEnum, Attribute, Measurement};

/// Four-character-tag key for host-defined data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserKey(pub u32);

impl UserKey {
    /// Calculation reference count kept by the script runtime
    pub const CALC_REF_COUNT: UserKey = UserKey::from_tag(*b"XFAR");
    /// Calculation payload
    pub const CALC_DATA: UserKey = UserKey::from_tag(*b"XFAC");
    /// Layout item attached by the layout layer
    pub const LAYOUT_ITEM: UserKey = UserKey::from_tag(*b"LYIM");

    pub const fn from_tag(tag: [u8; 4]) -> Self {
        UserKey(u32::from_be_bytes(tag))
    }
}

/// Key of a map entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    Attribute(Attribute),
    /// Attribute outside the known set, keyed by its markup name
    Custom(Box<str>),
    User(UserKey),
}

impl From<Attribute> for MapKey {
    fn from(attr: Attribute) -> Self {
        MapKey::Attribute(attr)
    }
}

impl From<UserKey> for MapKey {
    fn from(key: UserKey) -> Self {
        MapKey::User(key)
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Attribute(attr) => f.write_str(attr.name()),
            MapKey::Custom(name) => f.write_str(name),
            MapKey::User(UserKey(tag)) => {
                let bytes = tag.to_be_bytes();
                write!(f, "user:{}", String::from_utf8_lossy(&bytes))
            }
        }
    }
}

/// Inline value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Boolean(bool),
    Integer(i32),
    Enum(AttrEnum),
    Measure(Measurement),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Boolean(true) => f.write_str("1"),
            Scalar::Boolean(false) => f.write_str("0"),
            Scalar::Integer(value) => write!(f, "{value}"),
            Scalar::Enum(value) => f.write_str(value.name()),
            Scalar::Measure(value) => write!(f, "{value}"),
        }
    }
}

/// Payload that knows how to duplicate itself
pub trait CloneBlob: Any + fmt::Debug + Send + Sync {
    fn clone_blob(&self) -> Box<dyn CloneBlob>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> CloneBlob for T
where
    T: Any + Clone + fmt::Debug + Send + Sync,
{
    fn clone_blob(&self) -> Box<dyn CloneBlob> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Opaque payload
pub enum Blob {
    /// Independent copy per node; cloning duplicates the payload
    Owned(Box<dyn CloneBlob>),
    /// Aliased payload; cloning shares the same allocation
    Shared(Arc<dyn Any + Send + Sync>),
}

impl Blob {
    pub fn owned<T>(value: T) -> Self
    where
        T: Any + Clone + fmt::Debug + Send + Sync,
    {
        Blob::Owned(Box::new(value))
    }

    pub fn shared<T>(value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Blob::Shared(Arc::new(value))
    }

    /// Copy according to the blob's ownership mode
    pub fn duplicate(&self) -> Blob {
        match self {
            Blob::Owned(inner) => Blob::Owned((**inner).clone_blob()),
            Blob::Shared(inner) => Blob::Shared(Arc::clone(inner)),
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, Blob::Shared(_))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Blob::Owned(inner) => (**inner).as_any().downcast_ref(),
            Blob::Shared(inner) => inner.downcast_ref(),
        }
    }

    /// Mutable access; shared payloads are read-only
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        match self {
            Blob::Owned(inner) => (**inner).as_any_mut().downcast_mut(),
            Blob::Shared(_) => None,
        }
    }

    /// Identity comparison: same allocation
    pub fn ptr_eq(&self, other: &Blob) -> bool {
        match (self, other) {
            (Blob::Owned(a), Blob::Owned(b)) => std::ptr::addr_eq(&**a, &**b),
            (Blob::Shared(a), Blob::Shared(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Clone for Blob {
    fn clone(&self) -> Self {
        self.duplicate()
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Blob::Owned(inner) => f.debug_tuple("Owned").field(inner).finish(),
            Blob::Shared(_) => f.write_str("Shared(..)"),
        }
    }
}

/// Stored value
#[derive(Debug, Clone)]
pub enum MapValue {
    Scalar(Scalar),
    String(String),
    Blob(Blob),
}

impl MapValue {
    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            MapValue::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MapValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            MapValue::Blob(blob) => Some(blob),
            _ => None,
        }
    }

    /// Markup text of scalar and string values
    pub fn to_text(&self) -> Option<String> {
        match self {
            MapValue::Scalar(value) => Some(value.to_string()),
            MapValue::String(value) => Some(value.clone()),
            MapValue::Blob(_) => None,
        }
    }
}

impl From<Scalar> for MapValue {
    fn from(value: Scalar) -> Self {
        MapValue::Scalar(value)
    }
}

impl From<String> for MapValue {
    fn from(value: String) -> Self {
        MapValue::String(value)
    }
}

impl From<&str> for MapValue {
    fn from(value: &str) -> Self {
        MapValue::String(value.to_string())
    }
}

impl From<Blob> for MapValue {
    fn from(blob: Blob) -> Self {
        MapValue::Blob(blob)
    }
}

/// Sparse key/value table, at most one entry per key
#[derive(Debug, Clone, Default)]
pub struct MapModule {
    entries: HashMap<MapKey, MapValue>,
}

impl MapModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &MapKey) -> Option<&MapValue> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &MapKey) -> Option<&mut MapValue> {
        self.entries.get_mut(key)
    }

    /// Store a value, returning the one it replaced
    pub fn insert(&mut self, key: MapKey, value: MapValue) -> Option<MapValue> {
        self.entries.insert(key, value)
    }

    pub fn remove(&mut self, key: &MapKey) -> Option<MapValue> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &MapKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MapKey, &MapValue)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &MapKey> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Copy every entry of `src` into `self`.
    ///
    /// With `use_src` set, keys already present are overwritten; otherwise
    /// existing entries win.
    pub fn merge_from(&mut self, src: &MapModule, use_src: bool) {
        for (key, value) in &src.entries {
            if use_src || !self.entries.contains_key(key) {
                self.entries.insert(key.clone(), value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Payload(Vec<u8>);

    #[test]
    fn test_user_key_tags() {
        assert_eq!(UserKey::CALC_DATA.0, 0x5846_4143);
        assert_eq!(MapKey::from(UserKey::LAYOUT_ITEM).to_string(), "user:LYIM");
    }

    #[test]
    fn test_owned_blob_duplicates() {
        let blob = Blob::owned(Payload(vec![1, 2, 3]));
        let copy = blob.clone();
        assert!(!blob.ptr_eq(&copy));
        assert_eq!(copy.downcast_ref::<Payload>(), Some(&Payload(vec![1, 2, 3])));
    }

    #[test]
    fn test_shared_blob_aliases() {
        let blob = Blob::shared(Payload(vec![9]));
        let copy = blob.clone();
        assert!(blob.ptr_eq(&copy));
        assert!(copy.is_shared());
    }

    #[test]
    fn test_owned_blob_mutation_is_independent() {
        let mut original = Blob::owned(Payload(vec![1]));
        let copy = original.duplicate();
        if let Some(payload) = original.downcast_mut::<Payload>() {
            payload.0.push(2);
        }
        assert_eq!(original.downcast_ref::<Payload>(), Some(&Payload(vec![1, 2])));
        assert_eq!(copy.downcast_ref::<Payload>(), Some(&Payload(vec![1])));
    }

    #[test]
    fn test_drop_runs_once() {
        let counter = Arc::new(());
        {
            let blob = Blob::shared(Arc::clone(&counter));
            let _alias = blob.clone();
            assert_eq!(Arc::strong_count(&counter), 2);
        }
        assert_eq!(Arc::strong_count(&counter), 1);
    }

    #[test]
    fn test_merge_preserves_or_overwrites() {
        let mut dst = MapModule::new();
        dst.insert(Attribute::Name.into(), "dst".into());

        let mut src = MapModule::new();
        src.insert(Attribute::Name.into(), "src".into());
        src.insert(Attribute::Lock.into(), Scalar::Integer(1).into());

        let mut kept = dst.clone();
        kept.merge_from(&src, false);
        assert_eq!(kept.get(&Attribute::Name.into()).and_then(MapValue::as_str), Some("dst"));
        assert_eq!(kept.len(), 2);

        dst.merge_from(&src, true);
        assert_eq!(dst.get(&Attribute::Name.into()).and_then(MapValue::as_str), Some("src"));
    }
}
