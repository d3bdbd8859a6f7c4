//! Port data: the values that flow along graph edges.
//!
//! The host owns every value in a [`PortData`] store. Operators hold typed
//! [`DataRef`] keys into that store, bound once at construction, and resolve
//! them on each `execute` call. Keys are plain `Copy` handles, so operators
//! and the store can be moved to the audio thread together.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::dsp::{Time, Trigger};

new_key_type! { pub struct DataKey; }

/// Kinds of data a port can carry.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Audio,
    Trigger,
    Float,
    Time,
}

/// Fixed-length block of samples.
///
/// The length is chosen at construction and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Box<[f32]>,
}

impl AudioBuffer {
    /// A silent buffer of `block_size` frames.
    pub fn new(block_size: usize) -> Self {
        Self {
            samples: vec![0.0; block_size].into_boxed_slice(),
        }
    }

    pub fn from_slice(samples: &[f32]) -> Self {
        Self {
            samples: samples.into(),
        }
    }
}

impl Deref for AudioBuffer {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.samples
    }
}

impl DerefMut for AudioBuffer {
    fn deref_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }
}

/// A value stored behind a port reference.
#[derive(Debug, Clone)]
pub enum PortValue {
    Audio(AudioBuffer),
    Trigger(Trigger),
    Float(f32),
    Time(Time),
}

impl PortValue {
    pub fn data_type(&self) -> DataType {
        match self {
            PortValue::Audio(_) => DataType::Audio,
            PortValue::Trigger(_) => DataType::Trigger,
            PortValue::Float(_) => DataType::Float,
            PortValue::Time(_) => DataType::Time,
        }
    }

    /// Frame count for block-shaped values.
    pub fn frames(&self) -> Option<usize> {
        match self {
            PortValue::Audio(buffer) => Some(buffer.len()),
            PortValue::Trigger(trigger) => Some(trigger.block_size()),
            PortValue::Float(_) | PortValue::Time(_) => None,
        }
    }
}

/// Rust types that can live in a [`PortValue`].
pub trait PortType: Sized + 'static {
    const DATA_TYPE: DataType;

    fn from_value(value: &PortValue) -> Option<&Self>;
    fn from_value_mut(value: &mut PortValue) -> Option<&mut Self>;
    fn from_owned(value: PortValue) -> Option<Self>;
    fn into_value(self) -> PortValue;
}

macro_rules! impl_port_type {
    ($ty:ty, $variant:ident) => {
        impl PortType for $ty {
            const DATA_TYPE: DataType = DataType::$variant;

            fn from_value(value: &PortValue) -> Option<&Self> {
                match value {
                    PortValue::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn from_value_mut(value: &mut PortValue) -> Option<&mut Self> {
                match value {
                    PortValue::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn from_owned(value: PortValue) -> Option<Self> {
                match value {
                    PortValue::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn into_value(self) -> PortValue {
                PortValue::$variant(self)
            }
        }
    };
}

impl_port_type!(AudioBuffer, Audio);
impl_port_type!(Trigger, Trigger);
impl_port_type!(f32, Float);
impl_port_type!(Time, Time);

/// Typed handle to a value in a [`PortData`] store.
pub struct DataRef<T> {
    key: DataKey,
    _marker: PhantomData<fn() -> T>,
}

impl<T> DataRef<T> {
    fn new(key: DataKey) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> DataKey {
        self.key
    }
}

impl<T> Clone for DataRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DataRef<T> {}

impl<T> PartialEq for DataRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for DataRef<T> {}

impl<T: PortType> fmt::Debug for DataRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataRef")
            .field("key", &self.key)
            .field("type", &T::DATA_TYPE)
            .finish()
    }
}

/// Type-erased reference, used where references of mixed types are listed
/// by port name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnyRef {
    key: DataKey,
    data_type: DataType,
}

impl AnyRef {
    pub fn key(&self) -> DataKey {
        self.key
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn downcast<T: PortType>(self) -> Option<DataRef<T>> {
        (self.data_type == T::DATA_TYPE).then(|| DataRef::new(self.key))
    }
}

impl<T: PortType> From<DataRef<T>> for AnyRef {
    fn from(r: DataRef<T>) -> Self {
        Self {
            key: r.key,
            data_type: T::DATA_TYPE,
        }
    }
}

/// Host-owned storage for every port value in a patch.
#[derive(Debug, Default)]
pub struct PortData {
    values: SlotMap<DataKey, PortValue>,
}

impl PortData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: SlotMap::with_capacity_and_key(capacity),
        }
    }

    pub fn insert<T: PortType>(&mut self, value: T) -> DataRef<T> {
        DataRef::new(self.values.insert(value.into_value()))
    }

    /// Insert a silent audio block.
    pub fn audio(&mut self, block_size: usize) -> DataRef<AudioBuffer> {
        self.insert(AudioBuffer::new(block_size))
    }

    /// Insert a trigger that has not fired.
    pub fn trigger(&mut self, block_size: usize) -> DataRef<Trigger> {
        self.insert(Trigger::new(block_size))
    }

    pub fn float(&mut self, value: f32) -> DataRef<f32> {
        self.insert(value)
    }

    pub fn time(&mut self, value: Time) -> DataRef<Time> {
        self.insert(value)
    }

    pub fn get<T: PortType>(&self, r: DataRef<T>) -> Option<&T> {
        self.values.get(r.key).and_then(T::from_value)
    }

    pub fn get_mut<T: PortType>(&mut self, r: DataRef<T>) -> Option<&mut T> {
        self.values.get_mut(r.key).and_then(T::from_value_mut)
    }

    /// Copy out a scalar value.
    pub fn read<T: PortType + Copy>(&self, r: DataRef<T>) -> Option<T> {
        self.get(r).copied()
    }

    /// Overwrite a value. Returns `false` if the reference is dangling.
    pub fn set<T: PortType>(&mut self, r: DataRef<T>, value: T) -> bool {
        match self.get_mut(r) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn remove<T: PortType>(&mut self, r: DataRef<T>) -> Option<T> {
        if self.values.get(r.key)?.data_type() != T::DATA_TYPE {
            return None;
        }
        self.values.remove(r.key).and_then(T::from_owned)
    }

    /// The stored type and frame count behind an erased reference.
    pub fn describe(&self, r: AnyRef) -> Option<(DataType, Option<usize>)> {
        self.values
            .get(r.key)
            .map(|value| (value.data_type(), value.frames()))
    }

    /// Borrow one value for reading and another for writing.
    ///
    /// Returns `None` if either reference is dangling, has the wrong type,
    /// or both point at the same value.
    pub fn read_write<R: PortType, W: PortType>(
        &mut self,
        read: DataRef<R>,
        write: DataRef<W>,
    ) -> Option<(&R, &mut W)> {
        let [r, w] = self.values.get_disjoint_mut([read.key, write.key])?;
        Some((R::from_value(r)?, W::from_value_mut(w)?))
    }

    /// Clear every trigger in the store ahead of a new block.
    pub fn advance_triggers(&mut self) {
        for value in self.values.values_mut() {
            if let PortValue::Trigger(trigger) = value {
                trigger.advance_block();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
