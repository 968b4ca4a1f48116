// SPDX-License-Identifier: Apache-2.0

//! The allocator capability consumed by the parser and its containers.
//!
//! Callers implement [`MemoryAllocator`] for their own heap, arena or pool
//! and hand the parser an [`AllocatorRef`] to it. `AllocatorRef` speaks the
//! `allocator-api2` [`Allocator`] protocol, which is what the `Vec` and
//! `HashMap` backing every [`Value`](crate::Value) tree are generic over.

use core::alloc::Layout;
use core::ptr::{self, NonNull};

use allocator_api2::alloc::{AllocError, Allocator};

/// A caller-owned memory source.
///
/// All four operations take `&self`: one allocator is shared by every
/// container of a tree, so implementations keep their bookkeeping behind
/// interior mutability (`Cell`, a spin lock, ...).
///
/// # Safety
///
/// Implementations must behave like a heap: a pointer returned by
/// [`allocate`](Self::allocate) or [`reallocate`](Self::reallocate) must be
/// valid for reads and writes of `layout.size()` bytes, aligned to
/// `layout.align()`, and must not overlap any other live allocation until
/// it is released through `free`, `deallocate` or `reallocate`.
pub unsafe trait MemoryAllocator {
    /// Returns storage for `layout`, or `None` if the request cannot be met.
    ///
    /// `layout.size()` is never zero.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Releases storage without size information.
    ///
    /// # Safety
    ///
    /// `ptr` must come from this allocator and must not be used afterwards.
    unsafe fn free(&self, ptr: NonNull<u8>);

    /// Releases storage whose layout is known.
    ///
    /// Allocators that do not track sizes can rely on the default, which
    /// forwards to [`free`](Self::free).
    ///
    /// # Safety
    ///
    /// `ptr` must come from this allocator with the given `layout`.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        let _ = layout;
        // SAFETY: forwarded caller contract
        unsafe { self.free(ptr) }
    }

    /// Resizes storage to `new_size` bytes keeping the alignment of
    /// `old_layout`. The first `min(old, new)` bytes are preserved.
    ///
    /// The default allocates, copies and releases the old block.
    ///
    /// # Safety
    ///
    /// `ptr` must come from this allocator with `old_layout`, and
    /// `new_size` must be non-zero.
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        let new_layout = Layout::from_size_align(new_size, old_layout.align()).ok()?;
        let new_ptr = self.allocate(new_layout)?;
        // SAFETY: both blocks are live, distinct, and at least this long
        unsafe {
            ptr::copy_nonoverlapping(
                ptr.as_ptr(),
                new_ptr.as_ptr(),
                old_layout.size().min(new_size),
            );
            self.deallocate(ptr, old_layout);
        }
        Some(new_ptr)
    }
}

/// A cheap, copyable handle to a [`MemoryAllocator`].
///
/// The borrow ties every tree built with this handle to the allocator's
/// lifetime. Requests the allocator cannot satisfy are contract violations:
/// the handle panics rather than reporting `AllocError`.
pub struct AllocatorRef<'m, M: MemoryAllocator + ?Sized> {
    inner: &'m M,
}

impl<'m, M: MemoryAllocator + ?Sized> AllocatorRef<'m, M> {
    pub fn new(inner: &'m M) -> Self {
        Self { inner }
    }

    /// The allocator behind this handle.
    pub fn get(&self) -> &'m M {
        self.inner
    }

    fn resize(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<[u8]>, AllocError> {
        if old_layout.size() == 0 {
            return self.allocate(new_layout);
        }
        if new_layout.size() == 0 {
            // SAFETY: ptr is live with old_layout per the Allocator contract
            unsafe { self.deallocate(ptr, old_layout) };
            return Ok(dangling(new_layout));
        }
        if old_layout.align() != new_layout.align() {
            let new_ptr = self.allocate(new_layout)?;
            // SAFETY: distinct live blocks, copy bounded by both sizes
            unsafe {
                ptr::copy_nonoverlapping(
                    ptr.as_ptr(),
                    new_ptr.cast::<u8>().as_ptr(),
                    old_layout.size().min(new_layout.size()),
                );
                self.deallocate(ptr, old_layout);
            }
            return Ok(new_ptr);
        }
        // SAFETY: ptr is live with old_layout, new size is non-zero
        match unsafe { self.inner.reallocate(ptr, old_layout, new_layout.size()) } {
            Some(new_ptr) => Ok(NonNull::slice_from_raw_parts(new_ptr, new_layout.size())),
            None => fault!(
                "allocator could not resize {} bytes to {} bytes",
                old_layout.size(),
                new_layout.size()
            ),
        }
    }
}

impl<M: MemoryAllocator + ?Sized> Clone for AllocatorRef<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: MemoryAllocator + ?Sized> Copy for AllocatorRef<'_, M> {}

impl<M: MemoryAllocator + ?Sized> core::fmt::Debug for AllocatorRef<'_, M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AllocatorRef")
            .field("inner", &(self.inner as *const M as *const ()))
            .finish()
    }
}

/// Zero-sized requests never reach the [`MemoryAllocator`].
fn dangling(layout: Layout) -> NonNull<[u8]> {
    let ptr = NonNull::new(layout.align() as *mut u8).unwrap_or(NonNull::dangling());
    NonNull::slice_from_raw_parts(ptr, 0)
}

// SAFETY: every block handed out comes from the underlying MemoryAllocator,
// whose contract guarantees validity until released through this handle.
unsafe impl<M: MemoryAllocator + ?Sized> Allocator for AllocatorRef<'_, M> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        if layout.size() == 0 {
            return Ok(dangling(layout));
        }
        match self.inner.allocate(layout) {
            Some(ptr) => Ok(NonNull::slice_from_raw_parts(ptr, layout.size())),
            None => fault!(
                "allocator could not provide {} bytes (align {})",
                layout.size(),
                layout.align()
            ),
        }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() != 0 {
            // SAFETY: forwarded Allocator contract
            unsafe { self.inner.deallocate(ptr, layout) }
        }
    }

    unsafe fn grow(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<[u8]>, AllocError> {
        self.resize(ptr, old_layout, new_layout)
    }

    unsafe fn shrink(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<[u8]>, AllocError> {
        self.resize(ptr, old_layout, new_layout)
    }
}
