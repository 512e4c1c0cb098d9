use crate::error::FillError;
use crate::fill::Fill;
use crate::provider::TypeProvider;

/// A complex number as a `(real, imaginary)` pair of floats.
///
/// Filling reads the real part first, then the imaginary part, each with
/// the float read of matching width.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

pub type Complex32 = Complex<f32>;
pub type Complex64 = Complex<f64>;

impl Fill for Complex<f32> {
    fn fill(&mut self, provider: &mut TypeProvider<'_>, _depth: usize) -> Result<(), FillError> {
        let re = provider.get_f32()?;
        let im = provider.get_f32()?;
        *self = Self::new(re, im);
        Ok(())
    }
}

impl Fill for Complex<f64> {
    fn fill(&mut self, provider: &mut TypeProvider<'_>, _depth: usize) -> Result<(), FillError> {
        let re = provider.get_f64()?;
        let im = provider.get_f64()?;
        *self = Self::new(re, im);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_then_imaginary() {
        let mut data = vec![0u8; 8];
        data.extend_from_slice(&1.5f32.to_be_bytes());
        data.extend_from_slice(&(-2.0f32).to_be_bytes());
        let mut provider = TypeProvider::new(&data).unwrap();

        let mut value = Complex32::default();
        provider.fill(&mut value).unwrap();
        assert_eq!(value, Complex::new(1.5, -2.0));
    }

    #[test]
    fn half_a_complex_is_end_of_stream() {
        let mut data = vec![0u8; 8];
        data.extend_from_slice(&1.0f64.to_be_bytes());
        let mut provider = TypeProvider::new(&data).unwrap();

        let mut value = Complex64::default();
        assert!(provider.fill(&mut value).unwrap_err().is_end_of_stream());
    }
}
