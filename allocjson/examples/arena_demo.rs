// Example parsing JSON into a fixed-size arena through a custom allocator

use std::alloc::Layout;
use std::cell::{Cell, UnsafeCell};
use std::ptr::NonNull;

use allocjson::{AllocatorRef, Array, JsonParser, JsonString, MemoryAllocator, ParseError, Value};

/// Bump allocator over a static-sized buffer, the kind of memory source a
/// firmware image would hand the parser.
struct Arena<const N: usize> {
    buffer: UnsafeCell<[u8; N]>,
    offset: Cell<usize>,
    allocations: Cell<usize>,
}

impl<const N: usize> Arena<N> {
    fn new() -> Self {
        Self {
            buffer: UnsafeCell::new([0; N]),
            offset: Cell::new(0),
            allocations: Cell::new(0),
        }
    }
}

unsafe impl<const N: usize> MemoryAllocator for Arena<N> {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        let base = self.buffer.get() as *mut u8;
        let start = (base as usize + self.offset.get()).next_multiple_of(layout.align());
        let end = start.checked_add(layout.size())?;
        if end > base as usize + N {
            return None;
        }
        self.offset.set(end - base as usize);
        self.allocations.set(self.allocations.get() + 1);
        NonNull::new(unsafe { base.add(start - base as usize) })
    }

    unsafe fn free(&self, _ptr: NonNull<u8>) {}
}

fn describe<A: allocjson::Allocator>(value: &Value<A>, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        Value::Object(object) => {
            for (key, member) in object.iter() {
                println!("{pad}{key}: {}", member.kind());
                describe(member, indent + 1);
            }
        }
        Value::Array(array) => {
            for (i, element) in array.iter().enumerate() {
                println!("{pad}[{i}]: {}", element.kind());
                describe(element, indent + 1);
            }
        }
        _ => println!("{pad}= {value:?}"),
    }
}

fn main() -> Result<(), ParseError> {
    println!("Arena-backed JSON parsing");
    println!("=========================");

    let arena = Arena::<4096>::new();
    let json = concat!(
        r#"{"device": "thermostat", "readings": [21, 21.5, -3], "#,
        r#""online": true, "config": {"interval": 30, "unit": null}}"#,
    );

    let mut parser = JsonParser::new(json, AllocatorRef::new(&arena));
    let root = parser.parse()?;
    describe(&root, 0);

    let readings = root["readings"].get::<Array<_>>();
    println!("\n{} readings, device {}", readings.len(), root["device"].get::<JsonString<_>>());
    println!(
        "arena: {} allocations, {} of 4096 bytes used",
        arena.allocations.get(),
        arena.offset.get()
    );

    println!("\nTruncated input is reported, not panicked on:");
    let mut parser = JsonParser::new(r#"{"device": [1, 2"#, AllocatorRef::new(&arena));
    match parser.parse() {
        Ok(_) => println!("  unexpectedly parsed"),
        Err(e) => println!("  error: {e}"),
    }

    Ok(())
}
