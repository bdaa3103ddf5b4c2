//! Tests for merged values and integer aliases

use snag_core::types::{s16, s32, s64, s8, Merged16, Merged32, Merged8};

#[test]
fn test_merged32_byte_views_from_u32()
{
    let mut merged = Merged32::ZERO;
    merged.set_u32(0x1122_3344);

    assert_eq!(merged.u8_a(), 0x11);
    assert_eq!(merged.u8_b(), 0x22);
    assert_eq!(merged.u8_c(), 0x33);
    assert_eq!(merged.u8_d(), 0x44);
}

#[test]
fn test_merged16_byte_views_from_u16()
{
    let mut merged = Merged16::ZERO;
    merged.set_u16(0x1234);

    assert_eq!(merged.u8_a(), 0x12);
    assert_eq!(merged.u8_b(), 0x34);
}

#[test]
fn test_merged32_writes_visible_through_every_view()
{
    let mut merged = Merged32::from_bytes(0x01, 0x02, 0x03, 0x04);
    assert_eq!(merged.u32(), 0x0102_0304);

    merged.set_s16_ba(-1);
    assert_eq!(merged.u8_a(), 0xff);
    assert_eq!(merged.u8_b(), 0xff);
    assert_eq!(merged.u16_dc(), 0x0304);
    assert_eq!(merged.s32(), 0xffff_0304u32 as i32);

    merged.set_u8_a(0x7f);
    assert_eq!(merged.s16_ba(), 0x7fff);
}

#[test]
fn test_merged_native_storage_round_trip()
{
    let bytes = 0xdead_beefu32.to_ne_bytes();
    let merged = Merged32::from_ne_bytes(bytes);
    assert_eq!(merged.u32(), 0xdead_beef);
    assert_eq!(merged.to_ne_bytes(), bytes);
    assert_eq!(merged.halves(), [0xdead, 0xbeef]);
}

#[test]
fn test_every_bit_pattern_is_valid()
{
    for value in [0u8, 1, 0x7f, 0x80, 0xfe, 0xff] {
        let merged = Merged8::new(value);
        assert_eq!(merged.u8(), value);
        assert_eq!(merged.s8(), value as i8);
        assert_eq!(Merged8::from_signed(merged.s8()), merged);
    }
}

#[test]
fn test_signed_aliases()
{
    assert_eq!(std::mem::size_of::<s8>(), 1);
    assert_eq!(std::mem::size_of::<s16>(), 2);
    assert_eq!(std::mem::size_of::<s32>(), 4);
    assert_eq!(std::mem::size_of::<s64>(), 8);
    assert_eq!(s8::MIN, i8::MIN);
}

#[test]
fn test_merged_sizes_match_storage()
{
    assert_eq!(std::mem::size_of::<Merged32>(), 4);
    assert_eq!(std::mem::size_of::<Merged16>(), 2);
    assert_eq!(std::mem::size_of::<Merged8>(), 1);
}
