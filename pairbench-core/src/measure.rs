//! Measurement harness: wall-clock time and peak traced heap usage.
//!
//! Heap usage is observed through [`TracingAllocator`], a [`GlobalAlloc`]
//! wrapper that a binary installs with `#[global_allocator]`. The allocator
//! only counts while a [`TraceSession`] is alive. Sessions are obtained from
//! [`MemoryTracer::begin`] and end when dropped, so tracing is switched off
//! even if the measured closure panics.
//!
//! Counters are process-wide. Sessions on different threads are serialised
//! by a lock, but allocations made by unrelated threads during a session are
//! still counted.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicIsize, Ordering};
use std::time::{Duration, Instant};

use parking_lot::{const_mutex, Mutex, MutexGuard};

use crate::error::{Error, Result};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

static TRACING: AtomicBool = AtomicBool::new(false);
static INSTALLED: AtomicBool = AtomicBool::new(false);
static CURRENT: AtomicIsize = AtomicIsize::new(0);
static PEAK: AtomicIsize = AtomicIsize::new(0);
static SESSION_LOCK: Mutex<()> = const_mutex(());

thread_local! {
    static IN_SESSION: Cell<bool> = const { Cell::new(false) };
}

#[inline]
fn record_alloc(size: usize) {
    if !INSTALLED.load(Ordering::Relaxed) {
        INSTALLED.store(true, Ordering::Relaxed);
    }
    if TRACING.load(Ordering::Relaxed) {
        let size = size as isize;
        let now = CURRENT.fetch_add(size, Ordering::Relaxed) + size;
        PEAK.fetch_max(now, Ordering::Relaxed);
    }
}

#[inline]
fn record_dealloc(size: usize) {
    if TRACING.load(Ordering::Relaxed) {
        CURRENT.fetch_sub(size as isize, Ordering::Relaxed);
    }
}

/// Allocator wrapper that feeds the memory tracer.
///
/// # Example
///
/// ```no_run
/// use pairbench_core::measure::TracingAllocator;
///
/// #[global_allocator]
/// static GLOBAL: TracingAllocator = TracingAllocator::system();
/// ```
#[derive(Debug, Default)]
pub struct TracingAllocator<A = System> {
    inner: A,
}

impl TracingAllocator<System> {
    /// Wraps the system allocator.
    pub const fn system() -> Self {
        Self { inner: System }
    }
}

impl<A> TracingAllocator<A> {
    /// Wraps an arbitrary allocator.
    pub const fn new(inner: A) -> Self {
        Self { inner }
    }
}

unsafe impl<A: GlobalAlloc> GlobalAlloc for TracingAllocator<A> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = self.inner.alloc(layout);
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = self.inner.alloc_zeroed(layout);
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        self.inner.dealloc(ptr, layout);
        record_dealloc(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = self.inner.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            record_dealloc(layout.size());
            record_alloc(new_size);
        }
        new_ptr
    }
}

/// Entry point for scoped memory tracing.
pub struct MemoryTracer;

impl MemoryTracer {
    /// Starts a trace session, resetting the current and peak counters.
    ///
    /// Blocks while another thread holds a session. Returns
    /// [`Error::NestedTrace`] if the calling thread already holds one.
    pub fn begin() -> Result<TraceSession> {
        if IN_SESSION.with(Cell::get) {
            return Err(Error::NestedTrace);
        }
        let guard = SESSION_LOCK.lock();
        IN_SESSION.with(|s| s.set(true));

        CURRENT.store(0, Ordering::SeqCst);
        PEAK.store(0, Ordering::SeqCst);
        TRACING.store(true, Ordering::SeqCst);

        Ok(TraceSession { _guard: guard })
    }

    /// Returns true once a [`TracingAllocator`] has served an allocation.
    ///
    /// When false, sessions still work but always report zero bytes.
    pub fn is_installed() -> bool {
        INSTALLED.load(Ordering::Relaxed)
    }
}

/// An active trace session. Tracing stops when this is dropped.
pub struct TraceSession {
    _guard: MutexGuard<'static, ()>,
}

impl TraceSession {
    /// Highest net traced allocation seen since the session began.
    pub fn peak_bytes(&self) -> usize {
        PEAK.load(Ordering::SeqCst).max(0) as usize
    }

    /// Net bytes allocated since the session began. Negative if the session
    /// freed memory that was allocated before it started.
    pub fn current_bytes(&self) -> isize {
        CURRENT.load(Ordering::SeqCst)
    }
}

impl Drop for TraceSession {
    fn drop(&mut self) {
        TRACING.store(false, Ordering::SeqCst);
        IN_SESSION.with(|s| s.set(false));
    }
}

/// One timed, traced invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    /// Wall-clock time of the call.
    pub elapsed: Duration,
    /// Peak traced heap usage during the call.
    pub peak_bytes: usize,
}

impl Measurement {
    /// Elapsed time in seconds.
    #[inline]
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Peak traced memory in MiB.
    #[inline]
    pub fn peak_mb(&self) -> f64 {
        self.peak_bytes as f64 / BYTES_PER_MB
    }
}

/// Runs `f` exactly once inside a trace session and times it.
///
/// The closure's output is returned alongside the measurement so the caller
/// decides when it is dropped. Panics in `f` propagate after tracing has been
/// switched off.
pub fn measure<T, F>(f: F) -> Result<(Measurement, T)>
where
    F: FnOnce() -> T,
{
    let session = MemoryTracer::begin()?;
    let start = Instant::now();
    let output = f();
    let elapsed = start.elapsed();
    let peak_bytes = session.peak_bytes();
    drop(session);

    Ok((
        Measurement {
            elapsed,
            peak_bytes,
        },
        output,
    ))
}
