use crate::error::FillError;
use crate::fill::Fill;
use crate::provider::TypeProvider;

/// Remaining stack below which a nested fill moves to a fresh segment.
const STACK_RED_ZONE: usize = 64 * 1024;

/// Size of each extra stack segment.
const STACK_SEGMENT: usize = 1024 * 1024;

/// Run one level of a recursive fill, growing the stack on the heap when
/// it runs low.
///
/// With no depth limit and a small nil bias, self-referential types
/// nest once per few input bytes; the input length is then the only bound
/// on recursion and must end in `EndOfStream`, not a stack overflow.
pub(crate) fn nested<R>(fill: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, fill)
}

/// Field-by-field filler for one record (struct) value.
///
/// Obtained from [`TypeProvider::record`], which has already checked the
/// depth limit. `#[derive(Fill)]` expands to one call per field in
/// declaration order; hand-written `Fill` impls for records use it the
/// same way:
///
/// ```rust
/// use fuzzfill::{Fill, FillError, TypeProvider};
///
/// #[derive(Default)]
/// struct Span {
///     pub start: u32,
///     len: u16,
/// }
///
/// impl Fill for Span {
///     fn fill(&mut self, provider: &mut TypeProvider<'_>, depth: usize) -> Result<(), FillError> {
///         if let Some(mut record) = provider.record(depth) {
///             record.field(&mut self.start)?;
///             record.private_field(&mut self.len)?;
///         }
///         Ok(())
///     }
/// }
/// ```
///
/// For each field the skip decision is drawn first. Private fields then
/// consult `fill_private_fields`. Surviving fields recurse at the record's
/// depth plus one.
pub struct RecordFill<'p, 'a> {
    provider: &'p mut TypeProvider<'a>,
    field_depth: usize,
}

impl<'p, 'a> RecordFill<'p, 'a> {
    pub(crate) fn new(provider: &'p mut TypeProvider<'a>, field_depth: usize) -> Self {
        Self {
            provider,
            field_depth,
        }
    }

    /// Depth at which this record's fields are filled.
    #[must_use]
    pub fn field_depth(&self) -> usize {
        self.field_depth
    }

    /// Fill a publicly writable field unless the skip decision fires.
    ///
    /// # Errors
    ///
    /// Propagates any read failure from the field's own fill.
    pub fn field<T: Fill + ?Sized>(&mut self, value: &mut T) -> Result<&mut Self, FillError> {
        if !self.provider.skip_field() {
            let depth = self.field_depth;
            nested(|| value.fill(self.provider, depth))?;
        }
        Ok(self)
    }

    /// Fill a non-`pub` field unless the skip decision fires or private
    /// fields are disabled.
    ///
    /// # Errors
    ///
    /// Propagates any read failure from the field's own fill.
    pub fn private_field<T: Fill + ?Sized>(&mut self, value: &mut T) -> Result<&mut Self, FillError> {
        if !self.provider.skip_field() && self.provider.fill_private_fields() {
            let depth = self.field_depth;
            nested(|| value.fill(self.provider, depth))?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Fill, TypeProvider};

    #[derive(Debug, Default, Fill)]
    struct Inner {
        pub value: u16,
    }

    #[derive(Debug, Default, Fill)]
    struct Outer {
        pub head: u8,
        pub inner: Inner,
        hidden: u32,
    }

    fn input() -> Vec<u8> {
        let mut data = vec![0u8; 8];
        data.extend(1..=64u8);
        data
    }

    #[test]
    fn fields_fill_in_declaration_order() {
        let data = input();
        let mut provider = TypeProvider::new(&data).unwrap();

        let mut outer = Outer::default();
        provider.fill(&mut outer).unwrap();

        assert_eq!(outer.head, 1);
        assert_eq!(outer.inner.value, 0x0203);
        assert_eq!(outer.hidden, 0x0405_0607);
        assert_eq!(provider.position(), 15);
    }

    #[test]
    fn private_fields_respect_flag() {
        let data = input();
        let mut provider = TypeProvider::new(&data).unwrap();
        provider.set_fill_private_fields(false);

        let mut outer = Outer {
            hidden: 77,
            ..Outer::default()
        };
        provider.fill(&mut outer).unwrap();

        assert_eq!(outer.hidden, 77);
        assert_eq!(provider.position(), 11);
    }

    #[test]
    fn depth_limit_one_leaves_nested_record_default() {
        let data = input();
        let mut provider = TypeProvider::new(&data).unwrap();
        provider.set_depth_limit(1);

        let mut outer = Outer::default();
        provider.fill(&mut outer).unwrap();

        assert_eq!(outer.head, 1);
        assert_eq!(outer.inner.value, 0);
        assert_eq!(outer.hidden, 0x0203_0405);
    }

    #[test]
    fn skip_bias_one_keeps_prefill_state() {
        let data = input();
        let mut provider = TypeProvider::new(&data).unwrap();
        provider.set_biases_common(1.0, 1.0).unwrap();

        let mut outer = Outer {
            head: 9,
            inner: Inner { value: 10 },
            hidden: 11,
        };
        provider.fill(&mut outer).unwrap();

        assert_eq!(outer.head, 9);
        assert_eq!(outer.inner.value, 10);
        assert_eq!(outer.hidden, 11);
        assert_eq!(provider.position(), 8);
    }

    #[test]
    fn field_depth_is_record_depth_plus_one() {
        let mut provider = TypeProvider::new(&[0; 8]).unwrap();
        let record = provider.record(3).unwrap();
        assert_eq!(record.field_depth(), 4);
    }
}
