//! Typed per-vertex shader outputs
//!
//! A vertex shader emits a fixed-size record of `f32` components for every vertex it shades. The
//! [`VaryingLayout`] of a pipeline names the fields of that record, and the [`Field`] handles returned
//! by it are used to write values from the vertex shader and to read them back, interpolated, from the
//! fragment shader.

use std::any::{type_name, TypeId};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;
use std::ops::{Mul, Sub};

use nalgebra::SVector;
use smallvec::SmallVec;

use crate::error::{RenderError, RenderResult};
use crate::interpolate::Interpolate;

/// A value that can be stored in a varying record and interpolated across a triangle.
pub trait Varying: Interpolate + Copy + Sub<Output=Self> + Mul<f32, Output=Self> + 'static {
    /// Number of `f32` components the value occupies
    const COMPONENTS: usize;

    /// Reads the value from the start of `data`
    fn read(data: &[f32]) -> Self;

    /// Writes the value to the start of `data`
    fn write(&self, data: &mut [f32]);
}

impl Varying for f32 {
    const COMPONENTS: usize = 1;

    #[inline(always)]
    fn read(data: &[f32]) -> f32 { data[0] }

    #[inline(always)]
    fn write(&self, data: &mut [f32]) { data[0] = *self; }
}

impl<const D: usize> Varying for SVector<f32, D> {
    const COMPONENTS: usize = D;

    #[inline(always)]
    fn read(data: &[f32]) -> Self {
        SVector::from_column_slice(&data[..D])
    }

    #[inline(always)]
    fn write(&self, data: &mut [f32]) {
        data[..D].copy_from_slice(self.as_slice());
    }
}

/// Typed handle to a field of a varying record.
///
/// Handles are only meaningful for the layout that created them.
pub struct Field<T> {
    offset: usize,
    _type: PhantomData<fn() -> T>,
}

impl<T> Field<T> {
    /// Offset of the first component, in `f32` components from the start of the record
    #[inline]
    pub fn offset(&self) -> usize { self.offset }
}

impl<T> Clone for Field<T> {
    #[inline]
    fn clone(&self) -> Field<T> { *self }
}

impl<T> Copy for Field<T> {}

impl<T> PartialEq for Field<T> {
    fn eq(&self, other: &Field<T>) -> bool { self.offset == other.offset }
}

impl<T> Debug for Field<T> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "Field<{}> {{ offset: {} }}", type_name::<T>(), self.offset)
    }
}

/// Description of one named field in a [`VaryingLayout`]
#[derive(Debug, Clone, PartialEq)]
pub struct VaryingField {
    name: String,
    offset: usize,
    components: usize,
    type_id: TypeId,
    type_name: &'static str,
}

impl VaryingField {
    pub fn name(&self) -> &str { &self.name }
    pub fn offset(&self) -> usize { self.offset }
    pub fn components(&self) -> usize { self.components }
    pub fn type_name(&self) -> &'static str { self.type_name }
}

/// Ordered list of named, typed fields making up a vertex shader's output record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VaryingLayout {
    fields: SmallVec<[VaryingField; 8]>,
    stride: usize,
}

impl VaryingLayout {
    pub fn new() -> VaryingLayout {
        VaryingLayout::default()
    }

    /// Appends a new field to the layout.
    ///
    /// # Panics
    ///
    /// If a field with the same name already exists.
    pub fn add<T: Varying>(&mut self, name: &str) -> Field<T> {
        assert!(self.get(name).is_none(), "varying `{}` is declared twice", name);

        let offset = self.stride;

        self.fields.push(VaryingField {
            name: name.to_owned(),
            offset,
            components: T::COMPONENTS,
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        });

        self.stride += T::COMPONENTS;

        Field { offset, _type: PhantomData }
    }

    /// Looks up the handle of an existing field, checking that it holds a `T`.
    pub fn find<T: Varying>(&self, name: &str) -> RenderResult<Field<T>> {
        let field = self.get(name).ok_or_else(|| RenderError::UnknownVarying(name.to_owned()))?;

        if field.type_id != TypeId::of::<T>() {
            return Err(RenderError::VaryingTypeMismatch {
                name: name.to_owned(),
                actual: field.type_name,
                requested: type_name::<T>(),
            });
        }

        Ok(Field { offset: field.offset, _type: PhantomData })
    }

    pub fn get(&self, name: &str) -> Option<&VaryingField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Size of one record in `f32` components
    #[inline]
    pub fn stride(&self) -> usize { self.stride }

    #[inline]
    pub fn len(&self) -> usize { self.fields.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    pub fn fields(&self) -> impl Iterator<Item=&VaryingField> {
        self.fields.iter()
    }
}

/// Mutable view of one vertex's varying record, handed to the vertex shader.
pub struct VaryingsMut<'a> {
    data: &'a mut [f32],
}

impl<'a> VaryingsMut<'a> {
    #[inline]
    pub(crate) fn new(data: &'a mut [f32]) -> VaryingsMut<'a> {
        VaryingsMut { data }
    }

    #[inline]
    pub fn set<T: Varying>(&mut self, field: Field<T>, value: T) {
        value.write(&mut self.data[field.offset..]);
    }

    #[inline]
    pub fn get<T: Varying>(&self, field: Field<T>) -> T {
        T::read(&self.data[field.offset..])
    }

    /// Raw components of the record
    #[inline]
    pub fn as_slice(&self) -> &[f32] { self.data }
}
