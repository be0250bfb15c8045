//! Sponge construction over [`crate::keccak`], with `pad10*1` padding and domain separation.
//!
//! `Absorb` is a one-shot accumulator: feed it all the input (in as many calls as convenient),
//! then turn it into a `Squeeze` with the domain-separation suffix baked in via `finalize`. The
//! `Squeeze` side supports interleaved multi-call reads, resuming mid rate-block rather than
//! re-permuting from scratch, as required for `XofReader`-style repeated `squeeze(n)` calls.

use crate::keccak::State;

/// SHA-3 fixed-output domain separation suffix (bits `01`, pad-started).
pub(crate) const SHA3_SUFFIX: u8 = 0b0000_0110;
/// SHAKE / XOF domain separation suffix (bits `1111`, pad-started).
pub(crate) const SHAKE_SUFFIX: u8 = 0b0001_1111;

/// Absorbing half of the sponge, parameterized by its rate in bytes.
pub(crate) struct Absorb<const RATE: usize> {
    state: State,
    pos: usize,
}

impl<const RATE: usize> Absorb<RATE> {
    pub(crate) fn new() -> Self { Self { state: State::new(), pos: 0 } }

    pub(crate) fn absorb(&mut self, data: &[u8]) {
        let mut data = data;
        if self.pos > 0 {
            let take = (RATE - self.pos).min(data.len());
            self.state.xor_bytes(self.pos, &data[..take]);
            self.pos += take;
            data = &data[take..];
            if self.pos == RATE {
                self.state.permute();
                self.pos = 0;
            } else {
                return;
            }
        }
        let mut chunks = data.chunks_exact(RATE);
        for block in &mut chunks {
            self.state.xor_bytes(0, block);
            self.state.permute();
        }
        let rest = chunks.remainder();
        self.state.xor_bytes(0, rest);
        self.pos = rest.len();
    }

    /// Apply the domain-separation suffix and `pad10*1` padding, yielding the squeeze phase.
    pub(crate) fn finalize(mut self, suffix: u8) -> Squeeze<RATE> {
        self.state.xor_bytes(self.pos, &[suffix]);
        self.state.xor_bytes(RATE - 1, &[0x80]);
        Squeeze { state: self.state, pos: RATE }
    }
}

/// Squeezing half of the sponge. Supports repeated `squeeze` calls that resume within the
/// current rate block rather than re-absorbing.
pub(crate) struct Squeeze<const RATE: usize> {
    state: State,
    pos: usize,
}

impl<const RATE: usize> Squeeze<RATE> {
    pub(crate) fn squeeze(&mut self, mut out: &mut [u8]) {
        while !out.is_empty() {
            if self.pos == RATE {
                self.state.permute();
                self.pos = 0;
            }
            let take = (RATE - self.pos).min(out.len());
            let (head, tail) = out.split_at_mut(take);
            self.state.read_bytes(self.pos, head);
            self.pos += take;
            out = tail;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha3_256_empty_input() {
        // NIST SHA3-256("") known-answer value.
        let mut a = Absorb::<136>::new();
        a.absorb(&[]);
        let mut sq = a.finalize(SHA3_SUFFIX);
        let mut out = [0u8; 32];
        sq.squeeze(&mut out);
        assert_eq!(hex_literal::hex!("a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434"), out);
    }
}
