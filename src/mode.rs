//! Mode eligibility: which links a travel mode may traverse.
//!
//! A link is usable by `mode` iff the query is the wildcard, or the link's descriptor
//! lists `mode`, or the descriptor lists the wildcard. Two descriptor widths exist:
//! one byte per mode (`CharMode`, descriptor is a set of bytes such as `"abw"`) and
//! whole tokens (`TokenMode`, descriptor such as `"auto;bike;walk"`) for networks with
//! more modes than single characters can name.

use core::ffi::{c_char, CStr};

/// Byte separators accepted between tokens in a descriptor.
pub const TOKEN_SEPARATORS: &[u8] = b";, ";

/// Per-link mode descriptor storage.
pub trait ModeDescriptors {
    fn uses(&self, link: usize) -> &[u8];
}

impl<S: AsRef<[u8]>> ModeDescriptors for [S] {
    #[inline(always)]
    fn uses(&self, link: usize) -> &[u8] { self[link].as_ref() }
}

/// Descriptors handed over the C ABI as NUL-terminated strings. A null entry is an
/// empty descriptor (no mode but a wildcard query may use the link). Hosts that treat a
/// blank descriptor as "all modes" must write the wildcard before calling.
#[derive(Clone, Copy)]
pub struct RawDescriptors<'a> {
    ptrs: &'a [*const c_char],
}

impl<'a> RawDescriptors<'a> {
    /// # Safety
    /// Every non-null pointer must reference a NUL-terminated string that outlives `'a`.
    pub unsafe fn new(ptrs: &'a [*const c_char]) -> Self { Self { ptrs } }
}

impl ModeDescriptors for RawDescriptors<'_> {
    #[inline(always)]
    fn uses(&self, link: usize) -> &[u8] {
        let p = self.ptrs[link];
        if p.is_null() { return &[]; }
        // SAFETY: guaranteed by the contract of `RawDescriptors::new`.
        unsafe { CStr::from_ptr(p) }.to_bytes()
    }
}

/// Checked before every relaxation; a `false` link is skipped entirely.
pub trait ModeFilter {
    fn allows(&self, link: usize) -> bool;
}

impl<F: ModeFilter + ?Sized> ModeFilter for &F {
    #[inline(always)]
    fn allows(&self, link: usize) -> bool { (**self).allows(link) }
}

/// No filtering: every link is usable.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllModes;

impl ModeFilter for AllModes {
    #[inline(always)]
    fn allows(&self, _link: usize) -> bool { true }
}

/// Single-byte mode against a per-link set of bytes.
pub struct CharMode<'a, D: ?Sized> {
    uses: &'a D,
    mode: u8,
    wildcard: u8,
}

impl<'a, D: ModeDescriptors + ?Sized> CharMode<'a, D> {
    pub fn new(uses: &'a D, mode: u8) -> Self {
        Self { uses, mode, wildcard: crate::config::DEFAULT_CHAR_WILDCARD }
    }
    pub fn with_wildcard(mut self, wildcard: u8) -> Self { self.wildcard = wildcard; self }
}

impl<D: ModeDescriptors + ?Sized> ModeFilter for CharMode<'_, D> {
    #[inline(always)]
    fn allows(&self, link: usize) -> bool {
        if self.mode == self.wildcard { return true; }
        let d = self.uses.uses(link);
        d.contains(&self.mode) || d.contains(&self.wildcard)
    }
}

/// Whole mode token against a per-link list of tokens.
pub struct TokenMode<'a, D: ?Sized> {
    uses: &'a D,
    mode: &'a [u8],
    wildcard: &'a [u8],
}

impl<'a, D: ModeDescriptors + ?Sized> TokenMode<'a, D> {
    pub fn new(uses: &'a D, mode: &'a str) -> Self {
        Self { uses, mode: mode.as_bytes(), wildcard: crate::config::DEFAULT_TOKEN_WILDCARD.as_bytes() }
    }
    /// Byte-level constructor for tokens that arrived over the C ABI.
    pub fn from_bytes(uses: &'a D, mode: &'a [u8], wildcard: &'a [u8]) -> Self {
        Self { uses, mode, wildcard }
    }
    pub fn with_wildcard(mut self, wildcard: &'a str) -> Self { self.wildcard = wildcard.as_bytes(); self }
}

#[inline]
fn tokens(descriptor: &[u8]) -> impl Iterator<Item = &[u8]> {
    descriptor.split(|b| TOKEN_SEPARATORS.contains(b)).filter(|t| !t.is_empty())
}

impl<D: ModeDescriptors + ?Sized> ModeFilter for TokenMode<'_, D> {
    #[inline]
    fn allows(&self, link: usize) -> bool {
        if self.mode == self.wildcard { return true; }
        tokens(self.uses.uses(link)).any(|t| t == self.mode || t == self.wildcard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_predicate() {
        let uses = ["ab", "w", "", "a"];
        let bike = CharMode::new(&uses[..], b'b');
        assert!(bike.allows(0));
        assert!(!bike.allows(1));
        assert!(!bike.allows(2));
        // descriptor carries the wildcard marker
        assert!(bike.allows(3));
        let any = CharMode::new(&uses[..], b'a');
        assert!((0..4).all(|l| any.allows(l)));
    }

    #[test]
    fn token_predicate() {
        let uses = vec!["auto;bike".to_string(), "walk".into(), "all".into(), "autobus".into()];
        let auto = TokenMode::new(&uses[..], "auto");
        assert!(auto.allows(0));
        assert!(!auto.allows(1));
        assert!(auto.allows(2));
        // whole-token match only
        assert!(!auto.allows(3));
        assert!((0..4).all(|l| TokenMode::new(&uses[..], "all").allows(l)));
    }

    #[test]
    fn raw_descriptors() {
        let a = c"auto, bike";
        let ptrs = [a.as_ptr(), core::ptr::null()];
        let raw = unsafe { RawDescriptors::new(&ptrs) };
        let bike = TokenMode::new(&raw, "bike");
        assert!(bike.allows(0));
        assert!(!bike.allows(1));
        // a null entry stays empty; only a wildcard query may use it
        assert!(TokenMode::new(&raw, "all").allows(1));
    }
}
