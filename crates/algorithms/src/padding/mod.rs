//! Block paddings
//!
//! Four final-block padding conventions behind one contract:
//! `add_padding` fills a block from an offset to its end, and
//! `padding_length` recovers the pad byte count from a padded block.

mod iso7816;
mod pkcs7;
mod tbc;
mod x923;

pub use iso7816::Iso7816;
pub use pkcs7::Pkcs7;
pub use tbc::Tbc;
pub use x923::X923;

/// Common contract for block paddings.
pub trait BlockPadding {
    /// Fills `block` from `offset` to the end with the padding
    /// convention, returning the number of bytes written.
    fn add_padding(&self, block: &mut [u8], offset: usize) -> usize;

    /// Recovers the pad byte count from a padded block; zero when the
    /// block does not end in valid padding.
    fn padding_length(&self, block: &[u8]) -> usize;

    /// Recovers the pad byte count scanning from `offset`.
    fn padding_length_from(&self, block: &[u8], offset: usize) -> usize {
        self.padding_length(&block[offset..])
    }

    /// Padding name.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests;
