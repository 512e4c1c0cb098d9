use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

use crate::error::FillError;
use crate::provider::TypeProvider;
use crate::record::nested;

/// A value whose shape [`TypeProvider::fill`] knows how to populate.
///
/// `fill` overwrites `self` in place from the provider's input. `depth`
/// is the record nesting depth of the value being filled: collections,
/// options, boxes, arrays and tuples pass it through unchanged, and only
/// records (via [`TypeProvider::record`]) step it up by one for their
/// fields.
///
/// ```text
/// ┌──────────────────────────┬─────────────────────────────────────────────┐
/// │ Shape                    │ Consumes                                    │
/// ├──────────────────────────┼─────────────────────────────────────────────┤
/// │ bool, ints, floats       │ one fixed-width read                        │
/// │ Complex<f32/f64>         │ two float reads (re, im)                    │
/// │ String                   │ string_len decision + that many bytes       │
/// │ Vec<u8>                  │ slice nil decision, slice_len, one bulk read│
/// │ Vec<T>                   │ slice nil decision, slice_len, each element │
/// │ BTreeMap / HashMap       │ map nil decision, map_len, key then value   │
/// │ Option<T>                │ ptr nil decision, then a fresh T            │
/// │ Box<T>                   │ the pointee, in place                       │
/// │ [T; N], tuples           │ every element in order                      │
/// │ #[derive(Fill)] structs  │ per field: skip decision, then the field    │
/// │ (), PhantomData          │ nothing                                     │
/// └──────────────────────────┴─────────────────────────────────────────────┘
/// ```
///
/// Types that have no sensible byte-driven construction simply don't
/// implement `Fill`; inside a derived struct such fields are marked
/// `#[fill(skip)]` and keep their current value.
pub trait Fill {
    /// Populate `self` from `provider` at record depth `depth`.
    ///
    /// # Errors
    ///
    /// Returns the first read failure. `self` may be left partially
    /// filled.
    fn fill(&mut self, provider: &mut TypeProvider<'_>, depth: usize) -> Result<(), FillError>;

    /// Build `len` freshly filled elements for a `Vec<Self>`.
    ///
    /// Overridden by `u8` to read the whole blob in one go.
    #[doc(hidden)]
    fn fill_vec(provider: &mut TypeProvider<'_>, depth: usize, len: usize) -> Result<Vec<Self>, FillError>
    where
        Self: Sized + Default,
    {
        // Reserve no more elements than the remaining input could hold.
        let cap = provider.bytes_left() / std::mem::size_of::<Self>().max(1);
        let mut out = Vec::with_capacity(len.min(cap));
        for _ in 0..len {
            let mut element = Self::default();
            element.fill(provider, depth)?;
            out.push(element);
        }
        Ok(out)
    }
}

// ── Primitives ────────────────────────────────────────────────────────────────

macro_rules! impl_fill_primitive {
    ($($ty:ty => $get:ident),* $(,)?) => {
        $(
            impl Fill for $ty {
                fn fill(&mut self, provider: &mut TypeProvider<'_>, _depth: usize) -> Result<(), FillError> {
                    *self = provider.$get()?;
                    Ok(())
                }
            }
        )*
    };
}

impl_fill_primitive! {
    bool => get_bool,
    i8 => get_i8,
    u16 => get_u16,
    i16 => get_i16,
    u32 => get_u32,
    i32 => get_i32,
    u64 => get_u64,
    i64 => get_i64,
    usize => get_usize,
    isize => get_isize,
    f32 => get_f32,
    f64 => get_f64,
}

impl Fill for u8 {
    fn fill(&mut self, provider: &mut TypeProvider<'_>, _depth: usize) -> Result<(), FillError> {
        *self = provider.get_u8()?;
        Ok(())
    }

    fn fill_vec(provider: &mut TypeProvider<'_>, _depth: usize, len: usize) -> Result<Vec<Self>, FillError> {
        Ok(provider.get_n_bytes(len)?.to_vec())
    }
}

impl Fill for String {
    fn fill(&mut self, provider: &mut TypeProvider<'_>, _depth: usize) -> Result<(), FillError> {
        *self = provider.get_string()?.into_owned();
        Ok(())
    }
}

#[cfg(unix)]
impl Fill for std::ffi::OsString {
    /// Same length rule as `String`, but the bytes are kept verbatim.
    fn fill(&mut self, provider: &mut TypeProvider<'_>, _depth: usize) -> Result<(), FillError> {
        use std::os::unix::ffi::OsStringExt;

        let len = provider.string_len();
        *self = Self::from_vec(provider.get_n_bytes(len)?.to_vec());
        Ok(())
    }
}

impl Fill for () {
    fn fill(&mut self, _provider: &mut TypeProvider<'_>, _depth: usize) -> Result<(), FillError> {
        Ok(())
    }
}

impl<T: ?Sized> Fill for PhantomData<T> {
    fn fill(&mut self, _provider: &mut TypeProvider<'_>, _depth: usize) -> Result<(), FillError> {
        Ok(())
    }
}

// ── Collections ───────────────────────────────────────────────────────────────

impl<T: Fill + Default> Fill for Vec<T> {
    fn fill(&mut self, provider: &mut TypeProvider<'_>, depth: usize) -> Result<(), FillError> {
        if provider.slice_is_nil() {
            *self = Vec::new();
            return Ok(());
        }

        let len = provider.slice_len();
        *self = T::fill_vec(provider, depth, len)?;
        Ok(())
    }
}

impl<K, V> Fill for BTreeMap<K, V>
where
    K: Fill + Default + Ord,
    V: Fill + Default,
{
    fn fill(&mut self, provider: &mut TypeProvider<'_>, depth: usize) -> Result<(), FillError> {
        self.clear();
        if provider.map_is_nil() {
            return Ok(());
        }

        // Duplicate keys overwrite, so the final size can be below `len`.
        let len = provider.map_len();
        for _ in 0..len {
            let mut key = K::default();
            key.fill(provider, depth)?;
            let mut value = V::default();
            value.fill(provider, depth)?;
            self.insert(key, value);
        }
        Ok(())
    }
}

impl<K, V, S> Fill for HashMap<K, V, S>
where
    K: Fill + Default + Eq + Hash,
    V: Fill + Default,
    S: BuildHasher,
{
    fn fill(&mut self, provider: &mut TypeProvider<'_>, depth: usize) -> Result<(), FillError> {
        self.clear();
        if provider.map_is_nil() {
            return Ok(());
        }

        let len = provider.map_len();
        for _ in 0..len {
            let mut key = K::default();
            key.fill(provider, depth)?;
            let mut value = V::default();
            value.fill(provider, depth)?;
            self.insert(key, value);
        }
        Ok(())
    }
}

// ── References ────────────────────────────────────────────────────────────────

impl<T: Fill + Default> Fill for Option<T> {
    fn fill(&mut self, provider: &mut TypeProvider<'_>, depth: usize) -> Result<(), FillError> {
        if provider.ptr_is_nil() {
            *self = None;
            return Ok(());
        }

        let mut value = T::default();
        nested(|| value.fill(provider, depth))?;
        *self = Some(value);
        Ok(())
    }
}

impl<T: Fill + ?Sized> Fill for Box<T> {
    fn fill(&mut self, provider: &mut TypeProvider<'_>, depth: usize) -> Result<(), FillError> {
        (**self).fill(provider, depth)
    }
}

// ── Fixed-size aggregates ─────────────────────────────────────────────────────

impl<T: Fill, const N: usize> Fill for [T; N] {
    fn fill(&mut self, provider: &mut TypeProvider<'_>, depth: usize) -> Result<(), FillError> {
        for element in self.iter_mut() {
            element.fill(provider, depth)?;
        }
        Ok(())
    }
}

macro_rules! impl_fill_tuple {
    ($($name:ident . $idx:tt),+) => {
        impl<$($name: Fill),+> Fill for ($($name,)+) {
            fn fill(&mut self, provider: &mut TypeProvider<'_>, depth: usize) -> Result<(), FillError> {
                $( self.$idx.fill(provider, depth)?; )+
                Ok(())
            }
        }
    };
}

impl_fill_tuple!(A.0);
impl_fill_tuple!(A.0, B.1);
impl_fill_tuple!(A.0, B.1, C.2);
impl_fill_tuple!(A.0, B.1, C.2, D.3);
impl_fill_tuple!(A.0, B.1, C.2, D.3, E.4);
impl_fill_tuple!(A.0, B.1, C.2, D.3, E.4, F.5);
