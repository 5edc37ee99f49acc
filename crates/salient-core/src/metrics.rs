//! Wall-clock and peak-allocation instrumentation
//!
//! Every measured operation reports its execution time and the peak heap
//! allocation observed while it ran. Allocation tracking needs the
//! counting allocator installed as the process global allocator; without
//! it every measurement reports zero bytes and only timing is meaningful.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

static ALLOCATED: AtomicU64 = AtomicU64::new(0);
static PEAK: AtomicU64 = AtomicU64::new(0);

/// Counting wrapper over the system allocator. Install in the binary:
///
/// ```ignore
/// #[global_allocator]
/// static ALLOCATOR: TrackingAllocator = TrackingAllocator;
/// ```
pub struct TrackingAllocator;

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            let now = ALLOCATED.fetch_add(layout.size() as u64, Ordering::Relaxed)
                + layout.size() as u64;
            PEAK.fetch_max(now, Ordering::Relaxed);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        ALLOCATED.fetch_sub(layout.size() as u64, Ordering::Relaxed);
    }
}

/// Region gauge over the tracking allocator.
///
/// The gauge is process-wide: overlapping tracers bleed into each other,
/// the same way a per-process tracer would. The figures are a relative
/// signal for comparing serving modes, not an absolute accounting.
pub struct MemoryTracer {
    start_allocated: u64,
}

impl MemoryTracer {
    /// Snapshot the current allocation level and reset the high-water
    /// mark to it.
    pub fn start() -> Self {
        let current = ALLOCATED.load(Ordering::Relaxed);
        PEAK.store(current, Ordering::Relaxed);
        Self {
            start_allocated: current,
        }
    }

    /// Peak bytes allocated above the starting level since `start`.
    pub fn peak_bytes(&self) -> u64 {
        PEAK.load(Ordering::Relaxed)
            .saturating_sub(self.start_allocated)
    }
}

/// Outcome of a measured call.
#[derive(Debug, Clone)]
pub struct Measured<T> {
    pub value: T,
    pub execution_time: Duration,
    pub peak_memory_bytes: u64,
}

/// Run `f`, reporting wall-clock time and the peak traced allocation for
/// the region.
pub fn measure<T>(f: impl FnOnce() -> T) -> Measured<T> {
    let tracer = MemoryTracer::start();
    let started = Instant::now();
    let value = f();
    let execution_time = started.elapsed();
    let peak_memory_bytes = tracer.peak_bytes();
    Measured {
        value,
        execution_time,
        peak_memory_bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_reports_elapsed_time() {
        let measured = measure(|| {
            std::thread::sleep(Duration::from_millis(5));
            42
        });
        assert_eq!(measured.value, 42);
        assert!(measured.execution_time >= Duration::from_millis(5));
    }

    #[test]
    fn peak_is_zero_without_installed_allocator() {
        // The test binary does not install the tracking allocator, so the
        // counters never move.
        let measured = measure(|| vec![0u8; 4096]);
        assert_eq!(measured.value.len(), 4096);
        assert_eq!(measured.peak_memory_bytes, 0);
    }
}
