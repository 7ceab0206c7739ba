//! Fixed-width field layouts.
//!
//! A [`Field`] knows its encoded width and how to build itself from exactly
//! that many little-endian bytes. Tuples of fields are fields too, so a
//! whole post-header can be read in one call:
//!
//! ```
//! use replicant_codec::FieldDecoder;
//!
//! let body = [1, 0, 0, 0, 7, 0];
//! let mut decoder = FieldDecoder::new(&body);
//! let (thread_id, error_code) = decoder.read::<(u32, u16)>().unwrap();
//! assert_eq!((thread_id, error_code), (1, 7));
//! ```

/// A value with a fixed little-endian encoding.
pub trait Field: Sized {
    /// Number of bytes the encoding occupies.
    const WIDTH: usize;

    /// Builds the value from exactly [`Self::WIDTH`] bytes.
    ///
    /// Callers guarantee the slice length; [`crate::FieldDecoder`] checks it
    /// before calling.
    fn from_le_slice(bytes: &[u8]) -> Self;
}

macro_rules! impl_field_int {
    ($($ty:ty),+) => {
        $(
            impl Field for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&bytes[..Self::WIDTH]);
                    <$ty>::from_le_bytes(raw)
                }
            }
        )+
    };
}

impl_field_int!(u8, u16, u32, u64, i8, i16, i32, i64, f64);

impl Field for bool {
    const WIDTH: usize = 1;

    #[inline]
    fn from_le_slice(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

impl<const N: usize> Field for [u8; N] {
    const WIDTH: usize = N;

    #[inline]
    fn from_le_slice(bytes: &[u8]) -> Self {
        let mut raw = [0u8; N];
        raw.copy_from_slice(&bytes[..N]);
        raw
    }
}

macro_rules! impl_field_tuple {
    ($($ty:ident $var:ident),+) => {
        impl<$($ty: Field),+> Field for ($($ty,)+) {
            const WIDTH: usize = 0 $(+ $ty::WIDTH)+;

            #[inline]
            #[allow(unused_assignments)]
            fn from_le_slice(bytes: &[u8]) -> Self {
                let mut at = 0;
                $(
                    let $var = $ty::from_le_slice(&bytes[at..at + $ty::WIDTH]);
                    at += $ty::WIDTH;
                )+
                ($($var,)+)
            }
        }
    };
}

impl_field_tuple!(A a);
impl_field_tuple!(A a, B b);
impl_field_tuple!(A a, B b, C c);
impl_field_tuple!(A a, B b, C c, D d);
impl_field_tuple!(A a, B b, C c, D d, E e);
impl_field_tuple!(A a, B b, C c, D d, E e, F f);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_widths() {
        assert_eq!(<u8 as Field>::WIDTH, 1);
        assert_eq!(<u16 as Field>::WIDTH, 2);
        assert_eq!(<u32 as Field>::WIDTH, 4);
        assert_eq!(<u64 as Field>::WIDTH, 8);
        assert_eq!(<f64 as Field>::WIDTH, 8);
    }

    #[test]
    fn tuple_width_is_sum() {
        assert_eq!(<(u32, u32, u8, u16, u16) as Field>::WIDTH, 13);
        assert_eq!(<(u16, [u8; 50], u32) as Field>::WIDTH, 56);
    }

    #[test]
    fn little_endian_integers() {
        assert_eq!(u16::from_le_slice(&[0x34, 0x12]), 0x1234);
        assert_eq!(u32::from_le_slice(&[0x78, 0x56, 0x34, 0x12]), 0x1234_5678);
        assert_eq!(i64::from_le_slice(&[0xff; 8]), -1);
    }

    #[test]
    fn tuple_fields_in_order() {
        let bytes = [0x01, 0x02, 0x00, 0xaa, 0xbb, 0xcc, 0xdd];
        let (a, b, c) = <(u8, u16, u32)>::from_le_slice(&bytes);
        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(c, 0xddcc_bbaa);
    }

    #[test]
    fn bool_nonzero_is_true() {
        assert!(!bool::from_le_slice(&[0]));
        assert!(bool::from_le_slice(&[1]));
        assert!(bool::from_le_slice(&[7]));
    }
}
