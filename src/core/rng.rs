/// Seeded randomness — the string-keyed stream and the choice primitive.
///
/// Every random decision in the engine goes through [`UniformRng`], and every
/// discrete "pick one of N" goes through [`choose_index`], so the number of
/// draws a build consumes is a function of the decisions it made and nothing
/// else.

use rand::rngs::StdRng;
use rand::{Rng, RngCore};

const WIDTH: usize = 256;
const CHUNKS: usize = 6;
/// 256^6
const START_DENOM: f64 = 281_474_976_710_656.0;
/// 2^52
const SIGNIFICANCE: f64 = 4_503_599_627_370_496.0;
/// 2^53
const OVERFLOW: f64 = 9_007_199_254_740_992.0;

/// A source of uniform numbers in `[0, 1)`.
pub trait UniformRng {
    fn next_f64(&mut self) -> f64;
}

impl<R: UniformRng + ?Sized> UniformRng for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

impl UniformRng for StdRng {
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// ARC4 keystream state.
#[derive(Clone)]
struct Arc4 {
    i: u8,
    j: u8,
    s: [u8; WIDTH],
}

impl Arc4 {
    fn new(key: &[u8]) -> Self {
        let key: &[u8] = if key.is_empty() { &[0] } else { key };
        let mut s = [0u8; WIDTH];
        for (i, slot) in s.iter_mut().enumerate() {
            *slot = i as u8;
        }

        let mut j: u8 = 0;
        for i in 0..WIDTH {
            let t = s[i];
            j = j.wrapping_add(key[i % key.len()]).wrapping_add(t);
            s[i] = s[j as usize];
            s[j as usize] = t;
        }

        let mut arc4 = Arc4 { i: 0, j: 0, s };
        // Drop the first WIDTH bytes of keystream.
        for _ in 0..WIDTH {
            arc4.next_byte();
        }
        arc4
    }

    fn next_byte(&mut self) -> u8 {
        self.i = self.i.wrapping_add(1);
        let t = self.s[self.i as usize];
        self.j = self.j.wrapping_add(t);
        self.s[self.i as usize] = self.s[self.j as usize];
        self.s[self.j as usize] = t;
        let idx = self.s[self.i as usize].wrapping_add(self.s[self.j as usize]);
        self.s[idx as usize]
    }

    /// Big-endian concatenation of the next `count` bytes (`count <= 7`).
    fn take(&mut self, count: usize) -> u64 {
        let mut r = 0u64;
        for _ in 0..count {
            r = (r << 8) | u64::from(self.next_byte());
        }
        r
    }
}

/// Derive the ARC4 key from a string seed.
fn mix_key(seed: &str) -> Vec<u8> {
    let units: Vec<u16> = seed.encode_utf16().collect();
    let mut key = vec![0u8; units.len().min(WIDTH)];
    let mut smear: u32 = 0;
    for (j, unit) in units.iter().enumerate() {
        let idx = j & (WIDTH - 1);
        smear ^= u32::from(key[idx]) * 19;
        key[idx] = (smear.wrapping_add(u32::from(*unit)) & 0xff) as u8;
    }
    key
}

/// String-keyed deterministic RNG.
///
/// The stream is bit-compatible with the widely deployed ARC4 `seedrandom`
/// construction: 52 bits of keystream per double, so a given key yields the
/// same sequence on every platform and every release of this crate.
#[derive(Clone)]
pub struct SeededRng {
    arc4: Arc4,
}

impl SeededRng {
    pub fn new(seed: &str) -> Self {
        Self {
            arc4: Arc4::new(&mix_key(seed)),
        }
    }
}

impl UniformRng for SeededRng {
    fn next_f64(&mut self) -> f64 {
        let mut n = self.arc4.take(CHUNKS) as f64;
        let mut d = START_DENOM;
        let mut x = 0u64;
        while n < SIGNIFICANCE {
            n = (n + x as f64) * WIDTH as f64;
            d *= WIDTH as f64;
            x = self.arc4.take(1);
        }
        while n >= OVERFLOW {
            n /= 2.0;
            d /= 2.0;
            x >>= 1;
        }
        (n + x as f64) / d
    }
}

/// Raw keystream access for code that wants `rand`'s distributions.
///
/// Reading through this interface advances the same stream as
/// [`UniformRng::next_f64`].
impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.arc4.take(4) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.next_u32());
        let lo = u64::from(self.next_u32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest.iter_mut() {
            *byte = self.arc4.next_byte();
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl std::fmt::Debug for SeededRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeededRng")
            .field("i", &self.arc4.i)
            .field("j", &self.arc4.j)
            .finish_non_exhaustive()
    }
}

/// Wraps another RNG and counts how many values were drawn through it.
#[derive(Debug)]
pub struct CountingRng<R> {
    inner: R,
    draws: usize,
}

impl<R: UniformRng> CountingRng<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, draws: 0 }
    }

    pub fn draws(&self) -> usize {
        self.draws
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: UniformRng> UniformRng for CountingRng<R> {
    fn next_f64(&mut self) -> f64 {
        self.draws += 1;
        self.inner.next_f64()
    }
}

/// Replays a fixed list of values, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Number of values handed out so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl UniformRng for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

/// The choice primitive: one draw, scaled by `len`, floored to an index.
///
/// Returns `None` without drawing when `len` is zero.
pub fn choose_index(rng: &mut dyn UniformRng, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let index = (rng.next_f64() * len as f64).floor() as usize;
    Some(index.min(len - 1))
}

/// Pick one element of an ordered sequence.
pub fn choose<'a, T>(rng: &mut dyn UniformRng, items: &'a [T]) -> Option<&'a T> {
    choose_index(rng, items.len()).map(|i| &items[i])
}

/// Weighted pick over `weights`, still consuming a single draw.
///
/// The draw selects a ticket in `0..total`; the ticket falls into the bucket
/// of the element that owns it. With all weights equal to 1 this is exactly
/// [`choose_index`].
pub fn choose_weighted(rng: &mut dyn UniformRng, weights: &[u32]) -> Option<usize> {
    let total: u64 = weights.iter().map(|w| u64::from(*w)).sum();
    if total == 0 {
        return None;
    }
    let ticket = choose_index(rng, total as usize)? as u64;
    let mut upper = 0u64;
    for (i, weight) in weights.iter().enumerate() {
        upper += u64::from(*weight);
        if ticket < upper {
            return Some(i);
        }
    }
    None
}

/// One draw compared against `chance`.
pub fn roll(rng: &mut dyn UniformRng, chance: f64) -> bool {
    rng.next_f64() < chance
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn seeded_stream_matches_reference_values() {
        let mut rng = SeededRng::new("hello.");
        assert_eq!(rng.next_f64(), 0.9282578795792454);
        assert_eq!(rng.next_f64(), 0.3752569768646784);
        assert_eq!(rng.next_f64(), 0.7316977468919549);
    }

    #[test]
    fn seeded_stream_for_test2() {
        let mut rng = SeededRng::new("test2");
        assert_eq!(rng.next_f64(), 0.6701106006016342);
        assert_eq!(rng.next_f64(), 0.41381131327997867);
        assert_eq!(rng.next_f64(), 0.19783862491664683);
    }

    #[test]
    fn seeded_stream_is_deterministic() {
        let mut a = SeededRng::new("same key");
        let mut b = SeededRng::new("same key");
        for _ in 0..100 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn seeded_stream_stays_in_unit_interval() {
        for key in ["", "a", "a much longer key than usual", "漢字"] {
            let mut rng = SeededRng::new(key);
            for _ in 0..500 {
                let v = rng.next_f64();
                assert!((0.0..1.0).contains(&v), "{} out of range for {:?}", v, key);
            }
        }
    }

    #[test]
    fn different_keys_diverge() {
        let mut a = SeededRng::new("alpha");
        let mut b = SeededRng::new("beta");
        let va: Vec<f64> = (0..5).map(|_| a.next_f64()).collect();
        let vb: Vec<f64> = (0..5).map(|_| b.next_f64()).collect();
        assert_ne!(va, vb);
    }

    #[test]
    fn choose_index_consumes_one_draw() {
        let mut rng = CountingRng::new(ScriptedRng::new(vec![0.5]));
        assert_eq!(choose_index(&mut rng, 10), Some(5));
        assert_eq!(rng.draws(), 1);
        assert_eq!(choose_index(&mut rng, 0), None);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn choose_index_floors() {
        let mut rng = ScriptedRng::new(vec![0.0, 0.249, 0.25, 0.999_999]);
        assert_eq!(choose_index(&mut rng, 4), Some(0));
        assert_eq!(choose_index(&mut rng, 4), Some(0));
        assert_eq!(choose_index(&mut rng, 4), Some(1));
        assert_eq!(choose_index(&mut rng, 4), Some(3));
    }

    #[test]
    fn choose_returns_element() {
        let mut rng = ScriptedRng::new(vec![0.7]);
        assert_eq!(choose(&mut rng, &["a", "b", "c"]), Some(&"c"));
        let empty: [&str; 0] = [];
        assert_eq!(choose(&mut rng, &empty), None);
    }

    #[test]
    fn weighted_with_unit_weights_matches_uniform() {
        for seed in 0..200 {
            let mut a = StdRng::seed_from_u64(seed);
            let mut b = StdRng::seed_from_u64(seed);
            assert_eq!(
                choose_weighted(&mut a, &[1, 1, 1, 1, 1]),
                choose_index(&mut b, 5)
            );
        }
    }

    #[test]
    fn weighted_respects_buckets() {
        // total 4: tickets 0..3 → bucket 0, ticket 3 → bucket 1
        let mut rng = ScriptedRng::new(vec![0.0, 0.74, 0.75]);
        assert_eq!(choose_weighted(&mut rng, &[3, 1]), Some(0));
        assert_eq!(choose_weighted(&mut rng, &[3, 1]), Some(0));
        assert_eq!(choose_weighted(&mut rng, &[3, 1]), Some(1));
        assert_eq!(choose_weighted(&mut rng, &[0, 0]), None);
        assert_eq!(rng.consumed(), 3);
    }

    #[test]
    fn rng_core_shares_the_stream() {
        let mut a = SeededRng::new("shared");
        let mut b = SeededRng::new("shared");
        let mut bytes = [0u8; 4];
        a.fill_bytes(&mut bytes);
        assert_eq!(u32::from_be_bytes(bytes), b.next_u32());
        assert_eq!(a.next_f64(), b.next_f64());
    }

    #[test]
    fn scripted_rng_cycles() {
        let mut rng = ScriptedRng::new(vec![0.1, 0.2]);
        assert_eq!(rng.next_f64(), 0.1);
        assert_eq!(rng.next_f64(), 0.2);
        assert_eq!(rng.next_f64(), 0.1);
    }

    #[test]
    fn roll_compares_strictly() {
        let mut rng = ScriptedRng::new(vec![0.25]);
        assert!(!roll(&mut rng, 0.25));
        assert!(roll(&mut rng, 0.26));
    }
}
