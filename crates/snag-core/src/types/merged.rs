//! Merged integer values.
//!
//! A merged value is a few bytes of storage, kept in native byte order, that
//! can be read and written as a full-width signed or unsigned integer or as
//! narrower sub-fields. Every bit pattern is valid under every view, and a
//! write through one view is visible through all the others.
//!
//! Sub-fields are named by significance: `A` is the most significant byte,
//! `D` (or `B` for 16 bits) the least. Halves of a 32-bit value are `BA`
//! (high) and `DC` (low).
//!
//! ```text
//!   Merged32::new(0x11223344)
//!
//!   u32      0x11223344
//!   u16      BA=0x1122  DC=0x3344
//!   u8       A=0x11  B=0x22  C=0x33  D=0x44
//! ```
//!
//! ## Example
//!
//! ```rust
//! use snag_core::types::Merged32;
//!
//! let mut rgba = Merged32::new(0x11223344);
//! assert_eq!(rgba.u8_a(), 0x11);
//! assert_eq!(rgba.u16_dc(), 0x3344);
//!
//! rgba.set_u8_d(0xff);
//! assert_eq!(rgba.u32(), 0x112233ff);
//! assert_eq!(rgba.s8_d(), -1);
//! ```

use std::fmt;

use super::{s16, s32, s8};

macro_rules! merged {
    (
        $(#[$meta:meta])*
        $name:ident([u8; $bytes:literal]): $u:ident / $set_u:ident, $s:ident / $set_s:ident;
        $(
            $(#[$fmeta:meta])*
            $get:ident / $set:ident: $ft:ty as $fu:ty, shift $shift:literal;
        )*
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[repr(transparent)]
        pub struct $name
        {
            bytes: [u8; $bytes],
        }

        impl $name
        {
            /// All bits clear
            pub const ZERO: Self = $name { bytes: [0; $bytes] };

            /// Merged value holding `value`
            pub const fn new(value: $u) -> Self
            {
                $name { bytes: value.to_ne_bytes() }
            }

            /// Merged value holding the bits of `value`
            pub const fn from_signed(value: $s) -> Self
            {
                $name { bytes: value.to_ne_bytes() }
            }

            /// Merged value over raw storage in native byte order
            pub const fn from_ne_bytes(bytes: [u8; $bytes]) -> Self
            {
                $name { bytes }
            }

            /// Raw storage in native byte order
            pub const fn to_ne_bytes(self) -> [u8; $bytes]
            {
                self.bytes
            }

            /// Unsigned full-width view
            pub const fn $u(self) -> $u
            {
                <$u>::from_ne_bytes(self.bytes)
            }

            /// Signed full-width view
            pub const fn $s(self) -> $s
            {
                <$s>::from_ne_bytes(self.bytes)
            }

            /// Overwrite all bits through the unsigned view
            pub fn $set_u(&mut self, value: $u)
            {
                self.bytes = value.to_ne_bytes();
            }

            /// Overwrite all bits through the signed view
            pub fn $set_s(&mut self, value: $s)
            {
                self.bytes = value.to_ne_bytes();
            }

            $(
                $(#[$fmeta])*
                pub const fn $get(self) -> $ft
                {
                    (self.$u() >> $shift) as $fu as $ft
                }

                /// Overwrite this sub-field, leaving the others untouched
                pub fn $set(&mut self, value: $ft)
                {
                    let mask = (<$fu>::MAX as $u) << $shift;
                    let bits = (value as $fu as $u) << $shift;
                    self.$set_u((self.$u() & !mask) | bits);
                }
            )*
        }

        impl From<$u> for $name
        {
            fn from(value: $u) -> Self
            {
                $name::new(value)
            }
        }

        impl From<$s> for $name
        {
            fn from(value: $s) -> Self
            {
                $name::from_signed(value)
            }
        }

        impl From<$name> for $u
        {
            fn from(merged: $name) -> Self
            {
                merged.$u()
            }
        }

        impl From<$name> for $s
        {
            fn from(merged: $name) -> Self
            {
                merged.$s()
            }
        }

        impl fmt::Debug for $name
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
            {
                write!(f, "{}({:#0width$x})", stringify!($name), self.$u(), width = 2 + 2 * $bytes)
            }
        }

        impl fmt::Display for $name
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
            {
                write!(f, "{:#0width$x}", self.$u(), width = 2 + 2 * $bytes)
            }
        }
    };
}

merged! {
    /// 32 bits viewed as `u32`/`i32`, two 16-bit halves or four bytes
    Merged32([u8; 4]): u32 / set_u32, s32 / set_s32;
    /// High half (bytes A and B)
    u16_ba / set_u16_ba: u16 as u16, shift 16;
    /// Low half (bytes C and D)
    u16_dc / set_u16_dc: u16 as u16, shift 0;
    /// High half, signed
    s16_ba / set_s16_ba: i16 as u16, shift 16;
    /// Low half, signed
    s16_dc / set_s16_dc: i16 as u16, shift 0;
    /// Most significant byte
    u8_a / set_u8_a: u8 as u8, shift 24;
    /// Second most significant byte
    u8_b / set_u8_b: u8 as u8, shift 16;
    /// Second least significant byte
    u8_c / set_u8_c: u8 as u8, shift 8;
    /// Least significant byte
    u8_d / set_u8_d: u8 as u8, shift 0;
    /// Most significant byte, signed
    s8_a / set_s8_a: i8 as u8, shift 24;
    /// Second most significant byte, signed
    s8_b / set_s8_b: i8 as u8, shift 16;
    /// Second least significant byte, signed
    s8_c / set_s8_c: i8 as u8, shift 8;
    /// Least significant byte, signed
    s8_d / set_s8_d: i8 as u8, shift 0;
}

merged! {
    /// 16 bits viewed as `u16`/`i16` or two bytes
    Merged16([u8; 2]): u16 / set_u16, s16 / set_s16;
    /// Most significant byte
    u8_a / set_u8_a: u8 as u8, shift 8;
    /// Least significant byte
    u8_b / set_u8_b: u8 as u8, shift 0;
    /// Most significant byte, signed
    s8_a / set_s8_a: i8 as u8, shift 8;
    /// Least significant byte, signed
    s8_b / set_s8_b: i8 as u8, shift 0;
}

merged! {
    /// 8 bits viewed as `u8` or `i8`
    Merged8([u8; 1]): u8 / set_u8, s8 / set_s8;
}

impl Merged32
{
    /// Build from the high (`BA`) and low (`DC`) halves
    pub const fn from_halves(ba: u16, dc: u16) -> Self
    {
        Merged32::new(((ba as u32) << 16) | dc as u32)
    }

    /// Build from bytes ordered most significant first
    pub const fn from_bytes(a: u8, b: u8, c: u8, d: u8) -> Self
    {
        Merged32::new(u32::from_be_bytes([a, b, c, d]))
    }

    /// Both halves, high first
    pub const fn halves(self) -> [u16; 2]
    {
        [self.u16_ba(), self.u16_dc()]
    }

    /// All four bytes, most significant first
    pub const fn bytes(self) -> [u8; 4]
    {
        self.u32().to_be_bytes()
    }

    /// Pointer view
    ///
    /// Only available where pointers are 32 bits wide, so the storage holds a
    /// whole address.
    #[cfg(target_pointer_width = "32")]
    pub fn ptr(self) -> *mut core::ffi::c_void
    {
        self.u32() as usize as *mut core::ffi::c_void
    }

    /// Merged value holding the address of `ptr`
    #[cfg(target_pointer_width = "32")]
    pub fn from_ptr<T>(ptr: *const T) -> Self
    {
        Merged32::new(ptr as usize as u32)
    }

    /// Overwrite all bits with the address of `ptr`
    #[cfg(target_pointer_width = "32")]
    pub fn set_ptr<T>(&mut self, ptr: *const T)
    {
        self.set_u32(ptr as usize as u32);
    }
}

impl Merged16
{
    /// Build from bytes ordered most significant first
    pub const fn from_bytes(a: u8, b: u8) -> Self
    {
        Merged16::new(u16::from_be_bytes([a, b]))
    }

    /// Both bytes, most significant first
    pub const fn bytes(self) -> [u8; 2]
    {
        self.u16().to_be_bytes()
    }
}

impl From<Merged16> for Merged32
{
    /// Zero-extends into the low half
    fn from(merged: Merged16) -> Self
    {
        Merged32::new(u32::from(merged.u16()))
    }
}

impl From<Merged8> for Merged16
{
    /// Zero-extends into the low byte
    fn from(merged: Merged8) -> Self
    {
        Merged16::new(u16::from(merged.u8()))
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_merged32_bytes_by_significance()
    {
        let merged = Merged32::new(0x1122_3344);
        assert_eq!(merged.u8_a(), 0x11);
        assert_eq!(merged.u8_b(), 0x22);
        assert_eq!(merged.u8_c(), 0x33);
        assert_eq!(merged.u8_d(), 0x44);
        assert_eq!(merged.bytes(), [0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn test_merged32_storage_is_native_order()
    {
        let merged = Merged32::new(0x1122_3344);
        assert_eq!(merged.to_ne_bytes(), 0x1122_3344u32.to_ne_bytes());
        #[cfg(target_endian = "little")]
        assert_eq!(merged.to_ne_bytes(), [0x44, 0x33, 0x22, 0x11]);
    }

    #[test]
    fn test_merged32_halves()
    {
        let merged = Merged32::new(0x1122_3344);
        assert_eq!(merged.u16_ba(), 0x1122);
        assert_eq!(merged.u16_dc(), 0x3344);
        assert_eq!(merged.halves(), [0x1122, 0x3344]);
        assert_eq!(Merged32::from_halves(0x1122, 0x3344), merged);
    }

    #[test]
    fn test_merged32_signed_views()
    {
        let merged = Merged32::new(0xff80_7f01);
        assert_eq!(merged.s32(), 0xff80_7f01u32 as i32);
        assert_eq!(merged.s16_ba(), -128);
        assert_eq!(merged.s16_dc(), 0x7f01);
        assert_eq!(merged.s8_a(), -1);
        assert_eq!(merged.s8_b(), -128);
        assert_eq!(merged.s8_c(), 127);
        assert_eq!(merged.s8_d(), 1);
    }

    #[test]
    fn test_merged32_setters_touch_one_field()
    {
        let mut merged = Merged32::new(0x1122_3344);
        merged.set_u8_b(0xaa);
        assert_eq!(merged.u32(), 0x11aa_3344);
        merged.set_s8_c(-1);
        assert_eq!(merged.u32(), 0x11aa_ff44);
        merged.set_u16_ba(0xbeef);
        assert_eq!(merged.u32(), 0xbeef_ff44);
        merged.set_s16_dc(-2);
        assert_eq!(merged.u32(), 0xbeef_fffe);
        merged.set_s32(-1);
        assert_eq!(merged.u32(), u32::MAX);
    }

    #[test]
    fn test_merged16_views()
    {
        let mut merged = Merged16::new(0x1234);
        assert_eq!(merged.u8_a(), 0x12);
        assert_eq!(merged.u8_b(), 0x34);
        assert_eq!(merged.bytes(), [0x12, 0x34]);
        merged.set_s8_a(-1);
        assert_eq!(merged.u16(), 0xff34);
        assert_eq!(merged.s16(), 0xff34u16 as i16);
        assert_eq!(Merged16::from_bytes(0xff, 0x34), merged);
    }

    #[test]
    fn test_merged8_views()
    {
        let mut merged = Merged8::new(0x80);
        assert_eq!(merged.s8(), -128);
        merged.set_s8(-1);
        assert_eq!(merged.u8(), 0xff);
    }

    #[test]
    fn test_conversions_and_formatting()
    {
        let merged = Merged32::from(-2i32);
        assert_eq!(u32::from(merged), 0xffff_fffe);
        assert_eq!(format!("{merged:?}"), "Merged32(0xfffffffe)");
        assert_eq!(Merged16::new(0x0a).to_string(), "0x000a");
        assert_eq!(format!("{:?}", Merged8::new(7)), "Merged8(0x07)");
        assert_eq!(Merged32::from(Merged16::from(Merged8::new(0x7f))).u32(), 0x7f);
        assert_eq!(Merged32::default(), Merged32::ZERO);
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn test_merged32_pointer_view()
    {
        let value = 9u8;
        let merged = Merged32::from_ptr(&value as *const u8);
        assert_eq!(merged.ptr() as *const u8, &value as *const u8);
    }
}
