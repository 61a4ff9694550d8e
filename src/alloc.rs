//! Pluggable raw allocation for the containers.
//!
//! Goals:
//! - Keep the containers usable on targets where memory is budgeted: every
//!   buffer they own is requested through a `RawAlloc` handle instead of
//!   calling the global allocator directly.
//! - Make allocation failure a first-class, testable outcome. `QuotaAlloc`
//!   enforces a byte budget and starts refusing requests once it is spent,
//!   which exercises the same failure paths a real OOM would.
//!
//! `SysAlloc` is the default and simply forwards to `std::alloc`.

use std::alloc::Layout;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Raw memory provider. `None` means the request was refused; callers must
/// leave their own state untouched in that case.
///
/// Contract mirrors `std::alloc`: `realloc`/`dealloc` take the layout the
/// block was allocated with, and zero-sized requests are never issued.
pub trait RawAlloc {
    fn alloc(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// # Safety
    /// `ptr` must denote a live block previously returned by this allocator
    /// with `old_layout`. On success the old pointer is invalidated; on
    /// refusal the old block stays valid and untouched.
    unsafe fn realloc(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>>;

    /// # Safety
    /// `ptr` must denote a live block previously returned by this allocator
    /// with `layout`.
    unsafe fn dealloc(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The system allocator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SysAlloc;

impl RawAlloc for SysAlloc {
    fn alloc(&self, layout: Layout) -> Option<NonNull<u8>> {
        debug_assert!(layout.size() > 0, "zero-sized alloc request");
        NonNull::new(unsafe { std::alloc::alloc(layout) })
    }

    unsafe fn realloc(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        debug_assert!(new_size > 0, "zero-sized realloc request");
        NonNull::new(std::alloc::realloc(ptr.as_ptr(), old_layout, new_size))
    }

    unsafe fn dealloc(&self, ptr: NonNull<u8>, layout: Layout) {
        std::alloc::dealloc(ptr.as_ptr(), layout)
    }
}

struct QuotaState {
    limit: AtomicUsize,
    used: AtomicUsize,
}

/// Byte-budgeted allocator on top of `SysAlloc`.
///
/// Clones share one budget, so a map and all the sequences inside it are
/// accounted together. `set_limit` may be called at any time; lowering the
/// limit below `used_bytes()` refuses further growth but never invalidates
/// live blocks.
#[derive(Clone)]
pub struct QuotaAlloc {
    state: Arc<QuotaState>,
}

impl QuotaAlloc {
    pub fn new(limit_bytes: usize) -> Self {
        Self {
            state: Arc::new(QuotaState {
                limit: AtomicUsize::new(limit_bytes),
                used: AtomicUsize::new(0),
            }),
        }
    }

    /// Budget ceiling in bytes.
    pub fn limit_bytes(&self) -> usize {
        self.state.limit.load(Ordering::Relaxed)
    }

    /// Bytes currently held by live blocks.
    pub fn used_bytes(&self) -> usize {
        self.state.used.load(Ordering::Relaxed)
    }

    pub fn set_limit(&self, limit_bytes: usize) {
        self.state.limit.store(limit_bytes, Ordering::Relaxed);
    }

    fn try_reserve(&self, bytes: usize) -> bool {
        let limit = self.state.limit.load(Ordering::Relaxed);
        self.state
            .used
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |used| {
                let next = used.checked_add(bytes)?;
                if next > limit {
                    None
                } else {
                    Some(next)
                }
            })
            .is_ok()
    }

    fn release(&self, bytes: usize) {
        self.state.used.fetch_sub(bytes, Ordering::Relaxed);
    }
}

impl RawAlloc for QuotaAlloc {
    fn alloc(&self, layout: Layout) -> Option<NonNull<u8>> {
        if !self.try_reserve(layout.size()) {
            return None;
        }
        match SysAlloc.alloc(layout) {
            Some(p) => Some(p),
            None => {
                self.release(layout.size());
                None
            }
        }
    }

    unsafe fn realloc(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        if new_size > old_layout.size() {
            let grow = new_size - old_layout.size();
            if !self.try_reserve(grow) {
                return None;
            }
            match SysAlloc.realloc(ptr, old_layout, new_size) {
                Some(p) => Some(p),
                None => {
                    self.release(grow);
                    None
                }
            }
        } else {
            let p = SysAlloc.realloc(ptr, old_layout, new_size)?;
            self.release(old_layout.size() - new_size);
            Some(p)
        }
    }

    unsafe fn dealloc(&self, ptr: NonNull<u8>, layout: Layout) {
        SysAlloc.dealloc(ptr, layout);
        self.release(layout.size());
    }
}
