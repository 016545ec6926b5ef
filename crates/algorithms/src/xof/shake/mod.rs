//! SHAKE and cSHAKE extendable-output functions (FIPS 202, SP 800-185)
//!
//! `Shake128`/`Shake256` are the plain XOFs. The `customized`
//! constructors absorb the SP 800-185 `bytepad(encode_string(N) ||
//! encode_string(S), rate)` prefix and switch the domain byte to the
//! cSHAKE value; with both strings empty they fall back to plain
//! SHAKE, as the standard requires.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::Xof;
use crate::error::{Error, Result};
use crate::hash::keccak::{absorb_customization, KeccakSponge};

const SHAKE_DOMAIN: u8 = 0x1F;
const CSHAKE_DOMAIN: u8 = 0x04;

const SHAKE128_RATE: usize = 168;
const SHAKE256_RATE: usize = 136;

macro_rules! shake_impl {
    ($name:ident, $rate:expr, $label:expr) => {
        /// SHAKE extendable-output function at this security level.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct $name {
            sponge: KeccakSponge,
            domain: u8,
        }

        impl $name {
            /// cSHAKE variant with a function name `name` and a
            /// customization string `customization`.
            pub fn customized(name: &[u8], customization: &[u8]) -> Self {
                let mut sponge = KeccakSponge::new($rate);
                if name.is_empty() && customization.is_empty() {
                    return Self {
                        sponge,
                        domain: SHAKE_DOMAIN,
                    };
                }
                absorb_customization(&mut sponge, name, customization);
                Self {
                    sponge,
                    domain: CSHAKE_DOMAIN,
                }
            }

            /// One-shot convenience: absorb `data`, squeeze `len` bytes.
            pub fn hash(data: &[u8], len: usize) -> Result<Vec<u8>> {
                let mut xof = <Self as Xof>::new();
                xof.update(data)?;
                let mut out = vec![0u8; len];
                xof.squeeze(&mut out)?;
                Ok(out)
            }
        }

        impl Xof for $name {
            fn new() -> Self {
                Self {
                    sponge: KeccakSponge::new($rate),
                    domain: SHAKE_DOMAIN,
                }
            }

            fn update(&mut self, data: &[u8]) -> Result<()> {
                if self.sponge.is_squeezing() {
                    return Err(Error::state($label, "update after squeeze"));
                }
                self.sponge.absorb(data);
                Ok(())
            }

            fn squeeze(&mut self, output: &mut [u8]) -> Result<()> {
                if !self.sponge.is_squeezing() {
                    self.sponge.finish(self.domain);
                }
                self.sponge.squeeze(output);
                Ok(())
            }

            fn reset(&mut self) {
                self.sponge.reset();
                self.domain = SHAKE_DOMAIN;
            }

            fn name() -> &'static str {
                $label
            }

            fn rate() -> usize {
                $rate
            }
        }
    };
}

shake_impl!(Shake128, SHAKE128_RATE, "SHAKE-128");
shake_impl!(Shake256, SHAKE256_RATE, "SHAKE-256");

#[cfg(test)]
mod tests;
