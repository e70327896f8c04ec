#[derive(Debug,Clone,PartialEq,Eq)]
pub struct BitVector{
    data: Vec<u64>,
    bits: usize
}

impl BitVector {

    pub fn new(n: usize) -> BitVector{
        assert!(n > 0 && n % 64 == 0);
        BitVector{data: vec![0; n/64], bits: n }
    }

    pub fn bits_per_element() -> usize {
        64
    }

    pub fn len(&self) -> usize {
        self.bits
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn set(&mut self, idx: usize, value: bool) -> () {
        assert!(idx < self.bits);
        let element = idx / BitVector::bits_per_element();
        let mask = 1u64 << (idx % BitVector::bits_per_element());
        match value {
            true => self.data[element] |= mask,
            false => self.data[element] &= !mask
        }
    }

    pub fn get(&self, idx: usize) -> bool {
        assert!(idx < self.bits);
        self.data[idx / BitVector::bits_per_element()] & (1u64 << (idx % BitVector::bits_per_element())) != 0
    }

    pub fn hamming_distance(&self, other: &BitVector) -> u64 {
        assert_eq!(self.bits, other.bits);
        self.data.iter().zip(other.data.iter()).map(|(a,b)| (a ^ b).count_ones() as u64).sum()
    }

    /// Bit `i` ends up in byte `i / 8` at position `i % 8`.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|element| element.to_le_bytes()).collect()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_bits_show_up_in_bytes_and_distance() {
        let mut a = BitVector::new(256);
        let b = BitVector::new(256);
        a.set(0, true);
        a.set(9, true);
        a.set(255, true);
        assert!(a.get(9));
        assert_eq!(a.hamming_distance(&b), 3);

        let bytes = a.to_bytes();
        assert_eq!(bytes.len(), 32);
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[1], 2);
        assert_eq!(bytes[31], 128);

        a.set(9, false);
        assert_eq!(a.hamming_distance(&b), 2);
    }
}
