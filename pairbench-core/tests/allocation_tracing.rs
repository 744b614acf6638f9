//! Runs with the tracing allocator installed, as the binary does.

use pairbench_core::distance::Implementation;
use pairbench_core::measure::{measure, MemoryTracer, TracingAllocator};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[global_allocator]
static GLOBAL: TracingAllocator = TracingAllocator::system();

#[test]
fn test_peak_memory_tracks_allocations() {
    let (small, _) = measure(|| vec![0u8; 1024]).unwrap();
    let (large, buf) = measure(|| vec![1u8; 8 * 1024 * 1024]).unwrap();
    assert_eq!(buf.len(), 8 * 1024 * 1024);
    assert!(MemoryTracer::is_installed());

    assert!(large.peak_bytes >= 8 * 1024 * 1024);
    assert!(large.peak_mb() >= 8.0);
    assert!(small.peak_bytes < large.peak_bytes);

    // Memory freed inside the call still counts toward the peak.
    let (transient, _) = measure(|| {
        let v = vec![0u64; 1 << 20];
        v.len()
    })
    .unwrap();
    assert!(transient.peak_bytes >= 8 << 20);

    let mut rng = StdRng::seed_from_u64(8);
    let (baseline, matrix) = measure(|| Implementation::Baseline.run::<f64, _>(256, &mut rng)).unwrap();
    assert_eq!(matrix.len(), 256);
    // At least the 256 x 256 f64 payload.
    assert!(baseline.peak_bytes >= 256 * 256 * 8);
}
