//! Read-only view over the interned name blob (terminal, variable and
//! production names), written by [`lrkit_core::Interner::to_blob`].

use lrkit_core::Symbol;

pub struct NamesView<'a> {
    blob: &'a [u8],
    offsets: &'a [u8],
    count: u32,
}

impl<'a> NamesView<'a> {
    pub(crate) fn new(blob: &'a [u8], offsets: &'a [u8], count: u32) -> Self {
        Self {
            blob,
            offsets,
            count,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    fn offset(&self, index: u32) -> u32 {
        let start = index as usize * 4;
        u32::from_le_bytes(self.offsets[start..start + 4].try_into().unwrap())
    }

    /// Resolve a symbol to its name.
    ///
    /// # Panics
    /// Panics if `symbol` is out of range for this table's name count.
    pub fn resolve(&self, symbol: Symbol) -> &'a str {
        let index = symbol.as_u32();
        let start = self.offset(index) as usize;
        let end = self.offset(index + 1) as usize;
        std::str::from_utf8(&self.blob[start..end]).expect("name blob is not valid UTF-8")
    }
}
