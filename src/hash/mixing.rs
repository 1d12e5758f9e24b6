//! Bit-level coordinate hashing over IEEE-754 doubles
//!
//! Each coordinate is split into its low and high 32-bit words through
//! `f64::to_bits`, so the hash is defined over bit patterns rather than
//! numeric values: `-0.0` and `0.0` hash differently, as do NaNs with
//! different payloads. Words are mixed with a wrapping multiply followed by a
//! rotation, and each later word is seeded with an earlier word from the
//! other coordinate before mixing so a single flipped input bit reaches about
//! half of the output bits.

/// Odd multipliers applied to successive input words
const MULTIPLIERS: [u32; 6] = [
    0x9E37_79B1,
    0x85EB_CA77,
    0xC2B2_AE3D,
    0x27D4_EB2F,
    0x1656_67B1,
    0xFD70_46C5,
];

/// Split a double into its `(low, high)` 32-bit words
#[inline]
pub const fn split_words(value: f64) -> (u32, u32) {
    let bits = value.to_bits();
    (bits as u32, (bits >> 32) as u32)
}

/// Multiply with 32-bit wraparound, then rotate left
#[inline]
pub const fn mix(word: u32, multiplier: u32, shift: u32) -> u32 {
    word.wrapping_mul(multiplier).rotate_left(shift)
}

/// Hash a coordinate pair to a signed 32-bit key
///
/// Total over every `f64` bit pattern, including infinities and NaN.
#[inline]
pub const fn hash2(x: f64, y: f64) -> i32 {
    let (x_low, x_high) = split_words(x);
    let (y_low, y_high) = split_words(y);

    let a = mix(x_low, MULTIPLIERS[0], 13);
    let b = mix(x_high, MULTIPLIERS[1], 17);
    let c = mix(y_low ^ b, MULTIPLIERS[2], 7);
    let d = mix(y_high ^ a, MULTIPLIERS[3], 19);

    (mix(a ^ d, MULTIPLIERS[0], 11) ^ mix(b ^ c, MULTIPLIERS[2], 5) ^ d) as i32
}

/// Hash a coordinate triple to a signed 32-bit key
#[inline]
pub const fn hash3(x: f64, y: f64, z: f64) -> i32 {
    let (x_low, x_high) = split_words(x);
    let (y_low, y_high) = split_words(y);
    let (z_low, z_high) = split_words(z);

    let a = mix(x_low, MULTIPLIERS[0], 13);
    let b = mix(x_high, MULTIPLIERS[1], 17);
    let c = mix(y_low ^ b, MULTIPLIERS[2], 7);
    let d = mix(y_high ^ a, MULTIPLIERS[3], 19);
    let e = mix(z_low ^ d, MULTIPLIERS[4], 11);
    let f = mix(z_high ^ c, MULTIPLIERS[5], 23);

    (mix(a ^ f, MULTIPLIERS[0], 11)
        ^ mix(b ^ e, MULTIPLIERS[2], 5)
        ^ mix(c ^ d, MULTIPLIERS[4], 29)
        ^ f) as i32
}

/// Fold an arbitrary list of numbers into one key
///
/// Values are consumed two at a time through `hash3(running, a, b)` starting
/// from a running hash of `0`; a trailing unpaired value goes through
/// `hash2(running, value)`. An empty list hashes to `0`.
pub fn hash_n(values: &[f64]) -> i32 {
    let mut pairs = values.chunks_exact(2);
    let mut running = pairs.by_ref().fold(0_i32, |running, pair| match pair {
        [a, b] => hash3(f64::from(running), *a, *b),
        _ => running,
    });

    if let [last] = pairs.remainder() {
        running = hash2(f64::from(running), *last);
    }

    running
}
