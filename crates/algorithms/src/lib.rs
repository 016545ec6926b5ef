//! Symmetric cryptographic engine
//!
//! A self-contained suite of symmetric primitives built around a small
//! set of algorithm-agnostic contracts:
//!
//! - message digests and extendable-output functions
//! - HMAC and the streaming key derivation functions
//! - entropy sources and deterministic random bit generators
//! - pseudo-random number generators over the DRBGs
//! - block ciphers with standard and HKDF-extended key schedules
//! - cipher modes, an authenticated (GCM) mode, and block paddings
//!
//! The layers are deliberately interlocked: the extended key schedule
//! is a KDF, the sponge generator is a XOF driven as a DRBG, and the
//! authenticated mode composes the counter keystream with the
//! polynomial MAC. Hot paths are monomorphic over generic parameters;
//! the tagged `*Kind` enumerations and boxed factories provide
//! runtime dispatch at the library edge.
//!
//! Every instance is single-threaded; independent instances are safe
//! to use from different threads. Secret state is scrubbed on drop.

#![deny(unsafe_code)]

pub mod aead;
pub mod block;
pub mod drbg;
pub mod error;
pub mod hash;
pub mod kdf;
pub mod mac;
pub mod modes;
pub mod padding;
pub mod prng;
pub mod provider;
pub mod types;
pub mod xof;

pub use error::{Error, Result};

pub use aead::{AeadMode, Gcm, TAG_SIZE};
pub use block::{BlockCipher, BlockCipherKind, Rhx, Shx};
pub use drbg::{Bcg, Csg, Drbg, Hcg, Hmg, ShakeMode};
pub use hash::{Blake2b512, Digest, DigestKind, Sha256, Sha3_256, Sha3_512, Sha512, Skein512};
pub use kdf::{Hkdf, Kdf, Kdf2, Pbkdf2, ShakeKdf, ShakeStrength};
pub use mac::Hmac;
pub use modes::{Cbc, Cfb, CipherMode, Ctr, Ecb, Icm, Ofb, ParallelProfile};
pub use padding::{BlockPadding, Iso7816, Pkcs7, Tbc, X923};
pub use prng::{Bcr, Csr, Prng};
pub use provider::{Acp, EntropySource, Jsp, Osp, ProviderKind, Rdp};
pub use types::{SymmetricKey, SymmetricKeySize};
pub use xof::{Shake128, Shake256, Xof};
