// Test allocators shared by the integration tests

#![allow(dead_code)]

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::ptr::NonNull;

use allocjson::MemoryAllocator;

/// System-backed allocator that keeps count of live blocks and bytes.
#[derive(Default)]
pub struct CountingAllocator {
    live_blocks: Cell<usize>,
    live_bytes: Cell<usize>,
    allocations: Cell<usize>,
    reallocations: Cell<usize>,
}

impl CountingAllocator {
    pub fn live_blocks(&self) -> usize {
        self.live_blocks.get()
    }

    pub fn live_bytes(&self) -> usize {
        self.live_bytes.get()
    }

    pub fn allocations(&self) -> usize {
        self.allocations.get()
    }

    pub fn reallocations(&self) -> usize {
        self.reallocations.get()
    }
}

unsafe impl MemoryAllocator for CountingAllocator {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        let ptr = NonNull::new(unsafe { System.alloc(layout) })?;
        self.live_blocks.set(self.live_blocks.get() + 1);
        self.live_bytes.set(self.live_bytes.get() + layout.size());
        self.allocations.set(self.allocations.get() + 1);
        Some(ptr)
    }

    unsafe fn free(&self, _ptr: NonNull<u8>) {
        unreachable!("CountingAllocator expects sized releases");
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.live_blocks.set(self.live_blocks.get() - 1);
        self.live_bytes.set(self.live_bytes.get() - layout.size());
        unsafe { System.dealloc(ptr.as_ptr(), layout) }
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        let new_ptr = NonNull::new(unsafe { System.realloc(ptr.as_ptr(), old_layout, new_size) })?;
        self.live_bytes
            .set(self.live_bytes.get() - old_layout.size() + new_size);
        self.reallocations.set(self.reallocations.get() + 1);
        Some(new_ptr)
    }
}

/// Fixed-capacity bump arena: `free` only counts, memory comes back when
/// the arena itself is dropped.
pub struct BumpArena {
    base: NonNull<u8>,
    layout: Layout,
    offset: Cell<usize>,
    frees: Cell<usize>,
}

impl BumpArena {
    pub fn with_capacity(capacity: usize) -> Self {
        let layout = Layout::from_size_align(capacity.max(1), 16).unwrap();
        let base = NonNull::new(unsafe { System.alloc(layout) }).expect("arena backing store");
        Self {
            base,
            layout,
            offset: Cell::new(0),
            frees: Cell::new(0),
        }
    }

    pub fn used(&self) -> usize {
        self.offset.get()
    }

    pub fn frees(&self) -> usize {
        self.frees.get()
    }
}

impl Drop for BumpArena {
    fn drop(&mut self) {
        unsafe { System.dealloc(self.base.as_ptr(), self.layout) }
    }
}

unsafe impl MemoryAllocator for BumpArena {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        let base = self.base.as_ptr() as usize;
        let unaligned = base + self.offset.get();
        let start = unaligned.checked_add(layout.align() - 1)? & !(layout.align() - 1);
        let end = start.checked_add(layout.size())?;
        if end > base + self.layout.size() {
            return None;
        }
        self.offset.set(end - base);
        NonNull::new(unsafe { self.base.as_ptr().add(start - base) })
    }

    unsafe fn free(&self, _ptr: NonNull<u8>) {
        self.frees.set(self.frees.get() + 1);
    }
}
