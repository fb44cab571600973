//! MSB-first bit packing for encoded frames
//!
//! A single cursor is shared by the writer and the reader: an encoder packs
//! fields into a fresh [`Bits`] and hands out the bytes, a decoder loads a
//! packet with [`Bits::read_from`] and unpacks the same fields in order.

use bytes::Bytes;

const INITIAL_CAPACITY: usize = 2000;

/// Bit-level read/write cursor over a growable byte buffer
#[derive(Debug, Clone)]
pub struct Bits {
    chars: Vec<u8>,
    /// Total number of valid bits in the buffer
    nb_bits: usize,
    char_ptr: usize,
    bit_ptr: usize,
    overflow: bool,
}

impl Default for Bits {
    fn default() -> Self {
        Self::new()
    }
}

impl Bits {
    /// Create an empty bit buffer
    pub fn new() -> Self {
        Self {
            chars: vec![0; INITIAL_CAPACITY],
            nb_bits: 0,
            char_ptr: 0,
            bit_ptr: 0,
            overflow: false,
        }
    }

    /// Create a reader positioned at the start of `bytes`
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut bits = Self::new();
        bits.read_from(bytes);
        bits
    }

    /// Clear all content and rewind the cursor
    pub fn reset(&mut self) {
        self.chars.iter_mut().for_each(|c| *c = 0);
        self.nb_bits = 0;
        self.char_ptr = 0;
        self.bit_ptr = 0;
        self.overflow = false;
    }

    /// Load a new packet and rewind the cursor
    pub fn read_from(&mut self, bytes: &[u8]) {
        if self.chars.len() < bytes.len() {
            self.chars.resize(bytes.len(), 0);
        }
        self.chars[..bytes.len()].copy_from_slice(bytes);
        self.chars[bytes.len()..].iter_mut().for_each(|c| *c = 0);
        self.nb_bits = bytes.len() << 3;
        self.char_ptr = 0;
        self.bit_ptr = 0;
        self.overflow = false;
    }

    /// Rewind the read cursor without touching the content
    pub fn rewind(&mut self) {
        self.char_ptr = 0;
        self.bit_ptr = 0;
        self.overflow = false;
    }

    /// Append the low `nb_bits` of `value`, most significant bit first
    pub fn pack(&mut self, value: u32, nb_bits: u32) {
        debug_assert!(nb_bits <= 32);
        if self.char_ptr + ((nb_bits as usize + self.bit_ptr) >> 3) + 1 >= self.chars.len() {
            let new_len = ((self.chars.len() + 5) * 3) >> 1;
            self.chars.resize(new_len, 0);
        }
        let mut remaining = nb_bits;
        while remaining > 0 {
            let bit = ((value >> (remaining - 1)) & 1) as u8;
            self.chars[self.char_ptr] |= bit << (7 - self.bit_ptr);
            self.bit_ptr += 1;
            if self.bit_ptr == 8 {
                self.bit_ptr = 0;
                self.char_ptr += 1;
                self.chars[self.char_ptr] = 0;
            }
            self.nb_bits += 1;
            remaining -= 1;
        }
    }

    /// Read `nb_bits` as an unsigned value
    ///
    /// Reading past the end marks the buffer as overflowed and yields 0 from
    /// then on.
    pub fn unpack(&mut self, nb_bits: u32) -> u32 {
        if self.position() + nb_bits as usize > self.nb_bits {
            self.overflow = true;
        }
        if self.overflow {
            return 0;
        }
        let mut d = 0u32;
        for _ in 0..nb_bits {
            d <<= 1;
            d |= u32::from((self.chars[self.char_ptr] >> (7 - self.bit_ptr)) & 1);
            self.bit_ptr += 1;
            if self.bit_ptr == 8 {
                self.bit_ptr = 0;
                self.char_ptr += 1;
            }
        }
        d
    }

    /// Read `nb_bits` as a sign-extended two's complement value
    pub fn unpack_signed(&mut self, nb_bits: u32) -> i32 {
        let d = self.unpack(nb_bits);
        if nb_bits > 0 && nb_bits < 32 && (d >> (nb_bits - 1)) & 1 == 1 {
            (d | (u32::MAX << nb_bits)) as i32
        } else {
            d as i32
        }
    }

    /// Look at the next bit without consuming it
    pub fn peek(&mut self) -> u32 {
        if self.position() + 1 > self.nb_bits {
            self.overflow = true;
        }
        if self.overflow {
            return 0;
        }
        u32::from((self.chars[self.char_ptr] >> (7 - self.bit_ptr)) & 1)
    }

    /// Look at the next `nb_bits` without consuming them
    pub fn peek_unsigned(&mut self, nb_bits: u32) -> u32 {
        let (char_ptr, bit_ptr, overflow) = (self.char_ptr, self.bit_ptr, self.overflow);
        let d = self.unpack(nb_bits);
        self.char_ptr = char_ptr;
        self.bit_ptr = bit_ptr;
        self.overflow = overflow;
        d
    }

    /// Skip `n` bits
    pub fn advance(&mut self, n: usize) {
        if self.position() + n > self.nb_bits {
            self.overflow = true;
        }
        if self.overflow {
            return;
        }
        self.char_ptr += (self.bit_ptr + n) >> 3;
        self.bit_ptr = (self.bit_ptr + n) & 7;
    }

    /// Number of bits left to read; zero once the reader has overflowed
    pub fn remaining(&self) -> usize {
        if self.overflow {
            0
        } else {
            self.nb_bits.saturating_sub(self.position())
        }
    }

    /// Whether a read went past the end of the packet
    pub fn is_overflowed(&self) -> bool {
        self.overflow
    }

    /// Pad to the next byte boundary with a 0 followed by 1s
    ///
    /// The pattern cannot be confused with a packed mode id, so a decoder
    /// reading the padding sees the end of the packet.
    pub fn insert_terminator(&mut self) {
        if self.bit_ptr != 0 {
            self.pack(0, 1);
        }
        while self.bit_ptr != 0 {
            self.pack(1, 1);
        }
    }

    /// Number of valid bits written or loaded
    pub fn bit_len(&self) -> usize {
        self.nb_bits
    }

    /// Number of bytes needed to hold the content
    pub fn nbytes(&self) -> usize {
        (self.nb_bits + 7) >> 3
    }

    /// Copy the content into `out`, terminator-padding the last byte
    ///
    /// Returns the number of bytes written, limited by `out.len()`.
    pub fn write(&self, out: &mut [u8]) -> usize {
        let n = self.nbytes().min(out.len());
        out[..n].copy_from_slice(&self.chars[..n]);
        if n == self.nbytes() && self.nb_bits & 7 != 0 && n > 0 {
            let used = self.nb_bits & 7;
            out[n - 1] |= (1u8 << (7 - used)) - 1;
        }
        n
    }

    /// Content as an owned byte buffer, terminator-padded
    pub fn to_bytes(&self) -> Bytes {
        let mut out = vec![0u8; self.nbytes()];
        self.write(&mut out);
        Bytes::from(out)
    }

    fn position(&self) -> usize {
        (self.char_ptr << 3) + self.bit_ptr
    }
}
