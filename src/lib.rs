//! # korix
//!
//! A symmetric cryptography suite: digests, extendable-output
//! functions, HMAC, streaming KDFs, entropy sources, DRBGs, PRNGs,
//! block ciphers with HKDF-extended key schedules, cipher modes, a
//! GCM AEAD, block paddings, and the AEAD envelope that protects KEM
//! shared secrets.
//!
//! ## Crate structure
//!
//! This is a facade crate re-exporting the workspace members:
//!
//! - [`common`]: zeroizing containers and endian helpers
//! - [`algorithms`]: the symmetric engine
//! - [`kem`]: the KEM shared-secret envelope
//!
//! ## Example
//!
//! ```
//! use korix::prelude::*;
//!
//! # fn main() -> korix::algorithms::Result<()> {
//! // seal a message with Rijndael-GCM
//! let key = [0x24u8; 32];
//! let nonce = [0x10u8; 12];
//! let mut gcm = Gcm::new(Rhx::new());
//! gcm.initialize(true, &SymmetricKey::with_nonce(&key, &nonce))?;
//! let sealed = gcm.seal(b"header", b"payload")?;
//!
//! let mut gcm = Gcm::new(Rhx::new());
//! gcm.initialize(false, &SymmetricKey::with_nonce(&key, &nonce))?;
//! let opened = gcm.open(b"header", &sealed)?;
//! assert_eq!(opened, b"payload");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub use algorithms;
pub use common;
pub use kem;

/// Common imports for korix users.
pub mod prelude {
    pub use algorithms::aead::{AeadMode, Gcm, TAG_SIZE};
    pub use algorithms::block::{BlockCipher, BlockCipherKind, Rhx, Shx};
    pub use algorithms::drbg::{Bcg, Csg, Drbg, Hcg, Hmg, ShakeMode};
    pub use algorithms::hash::{
        Blake2b512, Digest, DigestKind, Sha256, Sha3_256, Sha3_512, Sha512, Skein512,
    };
    pub use algorithms::kdf::{Hkdf, Kdf, Kdf2, Pbkdf2, ShakeKdf, ShakeStrength};
    pub use algorithms::mac::Hmac;
    pub use algorithms::modes::{Cbc, Cfb, CipherMode, Ctr, Ecb, Icm, Ofb};
    pub use algorithms::padding::{BlockPadding, Iso7816, Pkcs7, Tbc, X923};
    pub use algorithms::prng::{Bcr, Csr, Prng};
    pub use algorithms::provider::{Acp, EntropySource, Jsp, Osp, ProviderKind, Rdp};
    pub use algorithms::types::{SymmetricKey, SymmetricKeySize};
    pub use algorithms::xof::{Shake128, Shake256, Xof};
    pub use kem::{Kem, SecretEnvelope, SharedSecret};
}
