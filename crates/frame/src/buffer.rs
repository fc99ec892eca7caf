//! Destination buffer sizing.
//!
//! Output buffers are caller-owned `Vec<u8>` values that are reused across
//! calls. These helpers change a buffer's length without ever shrinking its
//! allocation: growth reserves exactly the shortfall (existing bytes are
//! preserved by the reallocation), and when the capacity already suffices the
//! length changes in place without touching the allocator.

/// Sets `buf.len()` to exactly `need`, reserving only the shortfall.
pub(crate) fn fit(buf: &mut Vec<u8>, need: usize) {
    buf.reserve_exact(need.saturating_sub(buf.len()));
    buf.resize(need, 0);
}

/// Extends `buf` to at least `need` bytes; longer buffers are left alone.
pub(crate) fn grow_to(buf: &mut Vec<u8>, need: usize) {
    if buf.len() < need {
        fit(buf, need);
    }
}

/// Extends `buf` to its full capacity.
pub(crate) fn widen(buf: &mut Vec<u8>) {
    let capacity = buf.capacity();
    buf.resize(capacity, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_grows_by_shortfall_and_keeps_prefix() {
        let mut buf = b"abc".to_vec();
        fit(&mut buf, 10);
        assert_eq!(buf.len(), 10);
        assert_eq!(&buf[..3], b"abc");
        assert!(buf[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn fit_within_capacity_does_not_reallocate() {
        let mut buf = Vec::with_capacity(64);
        buf.extend_from_slice(&[7; 40]);
        let ptr = buf.as_ptr();
        let capacity = buf.capacity();
        fit(&mut buf, 16);
        assert_eq!(buf.len(), 16);
        fit(&mut buf, 64);
        assert_eq!(buf.len(), 64);
        assert_eq!(buf.as_ptr(), ptr);
        assert_eq!(buf.capacity(), capacity);
    }

    #[test]
    fn grow_to_never_shrinks() {
        let mut buf = vec![1u8; 32];
        grow_to(&mut buf, 8);
        assert_eq!(buf.len(), 32);
        grow_to(&mut buf, 48);
        assert_eq!(buf.len(), 48);
        assert_eq!(&buf[..32], &[1u8; 32]);
    }

    #[test]
    fn widen_uses_full_capacity() {
        let mut buf = Vec::with_capacity(128);
        buf.push(9);
        widen(&mut buf);
        assert_eq!(buf.len(), buf.capacity());
        assert_eq!(buf[0], 9);
    }

    #[test]
    fn widen_of_empty_vec_stays_empty() {
        let mut buf = Vec::new();
        widen(&mut buf);
        assert!(buf.is_empty());
    }
}
