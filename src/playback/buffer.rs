//! Shared sample ring between the UI thread and the audio output callback.

use parking_lot::Mutex;
use ringbuf::{traits::*, HeapRb};
use std::sync::Arc;

/// Lock-wrapped f32 ring. Cloning shares the buffer.
#[derive(Clone)]
pub struct SampleRing {
    inner: Arc<Mutex<HeapRb<f32>>>,
    capacity: usize,
}

impl SampleRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HeapRb::new(capacity))),
            capacity,
        }
    }

    /// Push samples, returning how many fit.
    pub fn write(&self, samples: &[f32]) -> usize {
        let mut rb = self.inner.lock();
        rb.push_slice(samples)
    }

    /// Pop up to `out.len()` samples, returning how many were read.
    pub fn read(&self, out: &mut [f32]) -> usize {
        let mut rb = self.inner.lock();
        rb.pop_slice(out)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().occupied_len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}
