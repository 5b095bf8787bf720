//! Interned wire names for cheap copying and O(1) equality comparison.

use lasso::Rodeo;
use serde::{Deserialize, Serialize};

/// The interned name of a wire (or any other named netlist entity).
///
/// An `Ident` is a `u32` index into the [`Interner`] owned by the block that
/// created it. Comparing two idents from different interners is meaningless.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Ident(u32);

impl Ident {
    /// Creates an `Ident` from a raw `u32` index.
    ///
    /// Intended for deserialization and tests. Names are normally created
    /// through [`Interner::get_or_intern`].
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw `u32` index of this identifier.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

// SAFETY: `Ident` wraps a `u32` which is always a valid `usize` on 32-bit and
// 64-bit platforms. `try_from_usize` rejects values that don't fit in `u32`.
unsafe impl lasso::Key for Ident {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(Ident)
    }
}

/// String interner backed by [`lasso::Rodeo`].
///
/// One interner lives inside each netlist container. Construction of a
/// container is single-threaded, so the non-threaded rodeo is enough; the
/// container as a whole is `Send` and can be moved behind a lock.
#[derive(Debug, Serialize, Deserialize)]
pub struct Interner {
    rodeo: Rodeo<Ident>,
}

impl Interner {
    /// Creates a new empty interner.
    pub fn new() -> Self {
        Self {
            rodeo: Rodeo::new(),
        }
    }

    /// Interns a string, returning its [`Ident`]. If the string was already
    /// interned, returns the existing identifier without allocating.
    pub fn get_or_intern(&mut self, s: &str) -> Ident {
        self.rodeo.get_or_intern(s)
    }

    /// Returns the identifier of an already-interned string.
    pub fn get(&self, s: &str) -> Option<Ident> {
        self.rodeo.get(s)
    }

    /// Resolves an [`Ident`] back to its string value.
    ///
    /// # Panics
    ///
    /// Panics if the `Ident` was not created by this interner.
    pub fn resolve(&self, ident: Ident) -> &str {
        self.rodeo.resolve(&ident)
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_resolve_roundtrip() {
        let mut interner = Interner::new();
        let id = interner.get_or_intern("counter");
        assert_eq!(interner.resolve(id), "counter");
    }

    #[test]
    fn same_string_same_ident() {
        let mut interner = Interner::new();
        let a = interner.get_or_intern("tmp0");
        let b = interner.get_or_intern("tmp0");
        assert_eq!(a, b);
    }

    #[test]
    fn different_strings_different_idents() {
        let mut interner = Interner::new();
        let a = interner.get_or_intern("tmp0");
        let b = interner.get_or_intern("tmp1");
        assert_ne!(a, b);
    }

    #[test]
    fn lookup_without_interning() {
        let mut interner = Interner::new();
        assert!(interner.get("a").is_none());
        let id = interner.get_or_intern("a");
        assert_eq!(interner.get("a"), Some(id));
    }

    #[test]
    fn interner_serde_roundtrip() {
        let mut interner = Interner::new();
        let id = interner.get_or_intern("acc");
        let json = serde_json::to_string(&interner).unwrap();
        let back: Interner = serde_json::from_str(&json).unwrap();
        assert_eq!(back.resolve(id), "acc");
    }
}
