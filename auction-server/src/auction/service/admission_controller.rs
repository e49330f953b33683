use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};

/// Bounded count of the auctions this process is monitoring for expiration.
#[derive(Debug)]
pub struct AdmissionController {
    admitted:       AtomicUsize,
    max_concurrent: usize,
}

impl AdmissionController {
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            admitted: AtomicUsize::new(0),
            max_concurrent,
        }
    }

    /// Takes one slot if the ceiling has not been reached.
    pub fn try_admit(&self) -> bool {
        self.admitted
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |admitted| {
                (admitted < self.max_concurrent).then_some(admitted + 1)
            })
            .is_ok()
    }

    pub fn release(&self) {
        if self
            .admitted
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |admitted| {
                admitted.checked_sub(1)
            })
            .is_err()
        {
            tracing::error!("Admission slot released while no auction was admitted");
        }
    }

    pub fn admitted(&self) -> usize {
        self.admitted.load(Ordering::Acquire)
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }
}
