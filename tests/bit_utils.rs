//! 按位展开与打包

use fastmp3::core::{BitReader, BitWriter};
use fastmp3::{Mp3Error, pack_bits, unpack_bits};

#[test]
fn test_展开长度与位序() {
    assert!(unpack_bits(&[]).is_empty());
    assert_eq!(unpack_bits(&[0x80]), vec![1, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(
        unpack_bits(&[0x0F, 0xA5]),
        vec![0, 0, 0, 0, 1, 1, 1, 1, 1, 0, 1, 0, 0, 1, 0, 1]
    );
    for len in [1usize, 7, 64, 1000] {
        assert_eq!(unpack_bits(&vec![0x5Au8; len]).len(), 8 * len);
    }
}

#[test]
fn test_展开后打包还原() {
    for len in [0usize, 1, 2, 3, 17, 255, 4096] {
        let bytes: Vec<u8> = (0..len).map(|i| (i * 37 + 11) as u8).collect();
        assert_eq!(pack_bits(&unpack_bits(&bytes)), bytes, "len={len}");
    }
}

#[test]
fn test_不足一字节补零() {
    assert_eq!(pack_bits(&[1, 1, 1]), vec![0xE0]);
}

#[test]
fn test_读写器配合() {
    let mut bw = BitWriter::new();
    bw.write_bits(0b101, 3);
    bw.write_bits(0x1234, 16);
    bw.write_bit(true);
    let data = bw.finish();

    let mut br = BitReader::new(&data);
    assert_eq!(br.read_bits(3).unwrap(), 0b101);
    assert_eq!(br.peek_bits(16).unwrap(), 0x1234);
    assert_eq!(br.read_bits(16).unwrap(), 0x1234);
    assert!(br.read_bit().unwrap());
    assert_eq!(br.bits_left(), 4);
    assert!(matches!(br.read_bits(5), Err(Mp3Error::Underrun { .. })));
}
