//! Garbage-collected heap.
//!
//! A single-threaded mark-and-sweep arena. Every string and object cell the
//! interpreter creates lives here, and [`Heap::allocate`] is the only way to
//! create one.
//!
//! # Handles
//!
//! [`HeapRef<T>`] is an `(index, generation)` pair. Sweeping a slot bumps its
//! generation, so a handle that outlived its cell never resolves again, even
//! after the slot is reused: `get`/`get_mut` return `None` instead of handing
//! out someone else's data.
//!
//! # Collection
//!
//! The heap does not know what is live. [`Heap::collect_garbage`] takes the
//! root set as a [`Trace`] implementation, marks everything reachable from it
//! with an iterative worklist, and sweeps the rest. Callers must make sure
//! every value they still need is reachable from the roots they pass.

use std::cell::Cell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::value::{ObjectCell, StringCell};

/// Untyped handle identity: slot index plus the generation it was issued for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RawRef {
    index: u32,
    generation: u32,
}

/// Typed handle to a heap cell.
///
/// Handles compare by identity: two handles are equal only if they name the
/// same allocation.
pub struct HeapRef<T> {
    raw: RawRef,
    _marker: PhantomData<fn() -> T>,
}

impl<T> HeapRef<T> {
    fn new(raw: RawRef) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    /// Untyped identity of this handle.
    #[inline]
    pub fn raw(self) -> RawRef {
        self.raw
    }
}

impl<T> Clone for HeapRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for HeapRef<T> {}

impl<T> PartialEq for HeapRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for HeapRef<T> {}

impl<T> Hash for HeapRef<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T> fmt::Debug for HeapRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HeapRef({}#{})", self.raw.index, self.raw.generation)
    }
}

/// Something that can report the heap cells it references.
pub trait Trace {
    fn trace(&self, tracer: &mut dyn Tracer);
}

/// Receives the edges reported by [`Trace`] implementations.
pub trait Tracer {
    fn mark(&mut self, cell: RawRef);
}

impl<T> Trace for HeapRef<T> {
    fn trace(&self, tracer: &mut dyn Tracer) {
        tracer.mark(self.raw);
    }
}

/// Storage for one heap cell.
///
/// Lives in a private module, so it cannot be named outside this crate.
#[derive(Debug)]
pub enum CellData {
    String(StringCell),
    Object(ObjectCell),
}

impl Trace for CellData {
    fn trace(&self, tracer: &mut dyn Tracer) {
        match self {
            CellData::String(_) => {}
            CellData::Object(object) => object.trace(tracer),
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for crate::value::StringCell {}
    impl Sealed for crate::value::ObjectCell {}
}

/// A type that can be stored on the heap.
///
/// Sealed: the heap's cell set is closed.
pub trait HeapCell: sealed::Sealed + Sized {
    fn into_data(self) -> CellData;
    fn from_data(data: &CellData) -> Option<&Self>;
    fn from_data_mut(data: &mut CellData) -> Option<&mut Self>;
}

impl HeapCell for StringCell {
    fn into_data(self) -> CellData {
        CellData::String(self)
    }

    fn from_data(data: &CellData) -> Option<&Self> {
        match data {
            CellData::String(s) => Some(s),
            CellData::Object(_) => None,
        }
    }

    fn from_data_mut(data: &mut CellData) -> Option<&mut Self> {
        match data {
            CellData::String(s) => Some(s),
            CellData::Object(_) => None,
        }
    }
}

impl HeapCell for ObjectCell {
    fn into_data(self) -> CellData {
        CellData::Object(self)
    }

    fn from_data(data: &CellData) -> Option<&Self> {
        match data {
            CellData::Object(o) => Some(o),
            CellData::String(_) => None,
        }
    }

    fn from_data_mut(data: &mut CellData) -> Option<&mut Self> {
        match data {
            CellData::Object(o) => Some(o),
            CellData::String(_) => None,
        }
    }
}

/// Heap counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HeapStats {
    /// Cells currently allocated.
    pub live: usize,
    /// Cells ever allocated.
    pub total_allocated: usize,
    /// Cells ever swept.
    pub total_freed: usize,
    /// Completed collections.
    pub collections: usize,
}

/// Outcome of one collection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CollectionReport {
    pub freed: usize,
    pub live: usize,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    marked_epoch: Cell<u32>,
    data: Option<CellData>,
}

/// Mark-and-sweep heap owning every string and object cell.
#[derive(Debug, Default)]
pub struct Heap {
    slots: Vec<Slot>,
    free: Vec<u32>,
    epoch: u32,
    stats: HeapStats,
    since_collection: usize,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, raw: RawRef) -> Option<&Slot> {
        let slot = self.slots.get(raw.index as usize)?;
        if slot.generation != raw.generation {
            return None;
        }
        slot.data.as_ref()?;
        Some(slot)
    }

    fn slot_mut(&mut self, raw: RawRef) -> Option<&mut Slot> {
        let slot = self.slots.get_mut(raw.index as usize)?;
        if slot.generation != raw.generation {
            return None;
        }
        slot.data.as_ref()?;
        Some(slot)
    }

    /// Allocate a cell and return its handle.
    ///
    /// # Panics
    /// Panics if the heap would exceed `u32::MAX` slots.
    pub fn allocate<T: HeapCell>(&mut self, cell: T) -> HeapRef<T> {
        let data = cell.into_data();
        self.stats.live += 1;
        self.stats.total_allocated += 1;
        self.since_collection += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            debug_assert!(slot.data.is_none(), "free list points at live slot");
            slot.data = Some(data);
            slot.marked_epoch.set(0);
            return HeapRef::new(RawRef {
                index,
                generation: slot.generation,
            });
        }

        let index = u32::try_from(self.slots.len())
            .unwrap_or_else(|_| panic!("heap exceeded {} cells", u32::MAX));
        self.slots.push(Slot {
            generation: 0,
            marked_epoch: Cell::new(0),
            data: Some(data),
        });
        HeapRef::new(RawRef {
            index,
            generation: 0,
        })
    }

    /// Resolve a handle. `None` if the cell has been collected.
    pub fn get<T: HeapCell>(&self, handle: HeapRef<T>) -> Option<&T> {
        T::from_data(self.slot(handle.raw)?.data.as_ref()?)
    }

    /// Resolve a handle mutably. `None` if the cell has been collected.
    pub fn get_mut<T: HeapCell>(&mut self, handle: HeapRef<T>) -> Option<&mut T> {
        T::from_data_mut(self.slot_mut(handle.raw)?.data.as_mut()?)
    }

    /// Whether `cell` still names a live allocation.
    pub fn is_live(&self, cell: RawRef) -> bool {
        self.slot(cell).is_some()
    }

    pub fn stats(&self) -> HeapStats {
        self.stats
    }

    /// Allocations since the last collection finished.
    pub fn allocations_since_collection(&self) -> usize {
        self.since_collection
    }

    /// Mark everything reachable from `roots` and sweep the rest.
    pub fn collect_garbage(&mut self, roots: &dyn Trace) -> CollectionReport {
        // A slot is marked iff `marked_epoch == self.epoch`.
        self.epoch = self.epoch.wrapping_add(1);
        if self.epoch == 0 {
            for slot in &self.slots {
                slot.marked_epoch.set(0);
            }
            self.epoch = 1;
        }

        {
            let heap: &Heap = &*self;
            let mut tracer = MarkTracer {
                heap,
                worklist: Vec::new(),
            };
            roots.trace(&mut tracer);
            while let Some(cell) = tracer.worklist.pop() {
                if let Some(data) = heap.slot(cell).and_then(|slot| slot.data.as_ref()) {
                    data.trace(&mut tracer);
                }
            }
        }

        let mut freed = 0;
        for (index, slot) in (0u32..).zip(self.slots.iter_mut()) {
            if slot.data.is_none() || slot.marked_epoch.get() == self.epoch {
                continue;
            }
            slot.data = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(index);
            freed += 1;
        }

        self.stats.live -= freed;
        self.stats.total_freed += freed;
        self.stats.collections += 1;
        self.since_collection = 0;

        let report = CollectionReport {
            freed,
            live: self.stats.live,
        };
        tracing::debug!(
            freed = report.freed,
            live = report.live,
            collections = self.stats.collections,
            "heap collected"
        );
        report
    }
}

struct MarkTracer<'a> {
    heap: &'a Heap,
    worklist: Vec<RawRef>,
}

impl Tracer for MarkTracer<'_> {
    fn mark(&mut self, cell: RawRef) {
        let Some(slot) = self.heap.slot(cell) else {
            return;
        };
        if slot.marked_epoch.get() == self.heap.epoch {
            return;
        }
        slot.marked_epoch.set(self.heap.epoch);
        self.worklist.push(cell);
    }
}
