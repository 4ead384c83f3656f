//! Page view counter
//!
//! A thread-safe tally of served pages. Shared between request tasks behind
//! an `Arc`; every read and increment goes through a single atomic.

use std::sync::atomic::{AtomicI64, Ordering};

/// Records page view counts in a thread-safe manner.
///
/// The count starts at zero and only moves through [`PageViews::add`].
/// Overflow wraps around, like a plain two's complement increment.
#[derive(Debug, Default)]
pub struct PageViews {
    count: AtomicI64,
}

impl PageViews {
    pub const fn new() -> Self {
        Self {
            count: AtomicI64::new(0),
        }
    }

    /// Increment the count by one.
    pub fn add(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of page views recorded so far.
    pub fn count(&self) -> i64 {
        self.count.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_fresh_counter_is_zero() {
        let views = PageViews::new();
        assert_eq!(views.count(), 0);
        assert_eq!(PageViews::default().count(), 0);
    }

    #[test]
    fn test_reads_are_stable() {
        let views = PageViews::new();
        views.add();
        views.add();
        assert_eq!(views.count(), 2);
        assert_eq!(views.count(), 2);
    }

    #[test]
    fn test_ten_callers_hundred_each() {
        let views = Arc::new(PageViews::new());
        let handles: Vec<_> = (0..10)
            .map(|_| {
                let views = Arc::clone(&views);
                thread::spawn(move || {
                    for _ in 0..100 {
                        views.add();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(views.count(), 1000);
    }

    #[test]
    fn test_no_lost_updates_under_contention() {
        let views = PageViews::new();
        thread::scope(|s| {
            for _ in 0..32 {
                s.spawn(|| {
                    for _ in 0..5_000 {
                        views.add();
                    }
                });
            }
        });
        assert_eq!(views.count(), 160_000);
    }

    #[test]
    fn test_sequential_adds_are_visible() {
        let views = Arc::new(PageViews::new());

        let first = Arc::clone(&views);
        thread::spawn(move || first.add()).join().unwrap();
        let second = Arc::clone(&views);
        thread::spawn(move || second.add()).join().unwrap();

        let reader = Arc::clone(&views);
        let seen = thread::spawn(move || reader.count()).join().unwrap();
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_count_never_decreases_while_adding() {
        let views = PageViews::new();
        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..10_000 {
                        views.add();
                    }
                });
            }
            s.spawn(|| {
                let mut last = 0;
                for _ in 0..10_000 {
                    let now = views.count();
                    assert!(now >= last);
                    last = now;
                }
            });
        });
        assert_eq!(views.count(), 40_000);
    }

    #[test]
    fn test_wraps_on_overflow() {
        let views = PageViews {
            count: AtomicI64::new(i64::MAX),
        };
        views.add();
        assert_eq!(views.count(), i64::MIN);
    }
}
