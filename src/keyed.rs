use crate::error::WindowError;
use crate::options::WindowOptions;
use crate::window::SlidingWindow;
use fxhash::FxHashMap;
use std::hash::Hash;

/// One [`SlidingWindow`] per series key, all with the same shape.
///
/// Windows are created on the first sample for a key and live until
/// [`KeyedWindows::retain_active`] finds them empty.
#[derive(Debug, Clone)]
pub struct KeyedWindows<K> {
    template: SlidingWindow,
    windows: FxHashMap<K, SlidingWindow>,
}

impl<K: Hash + Eq> KeyedWindows<K> {
    pub fn new(options: WindowOptions) -> Result<Self, WindowError> {
        Ok(Self {
            template: SlidingWindow::with_options(options)?,
            windows: FxHashMap::default(),
        })
    }

    pub fn add_sample(&mut self, key: K, now: u64, value: f64) {
        let template = &self.template;
        self.windows
            .entry(key)
            .or_insert_with(|| template.clone())
            .add_sample(now, value);
    }

    /// Advances every window to `now`.
    pub fn touch(&mut self, now: u64) {
        for window in self.windows.values_mut() {
            window.touch(now);
        }
    }

    /// Advances every window to `now` and forgets the ones left empty.
    pub fn retain_active(&mut self, now: u64) {
        self.windows.retain(|_, window| {
            window.touch(now);
            window.count() > 0
        });
    }

    pub fn get(&self, key: &K) -> Option<&SlidingWindow> {
        self.windows.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &SlidingWindow)> {
        self.windows.iter()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[cfg(test)]
mod keyed_tests {
    use super::*;
    use std::time::Duration;

    const SEC: u64 = 1_000_000_000;

    fn options() -> WindowOptions {
        WindowOptions {
            period: Duration::from_secs(9),
            buckets: 3,
        }
    }

    #[test]
    fn test_keys_aggregate_independently() {
        let mut windows = KeyedWindows::new(options()).unwrap();
        windows.add_sample("GET /", 10 * SEC, 5.0);
        windows.add_sample("GET /", 11 * SEC, 7.0);
        windows.add_sample("POST /", 11 * SEC, 100.0);

        assert_eq!(windows.len(), 2);
        let get = windows.get(&"GET /").unwrap();
        assert_eq!(get.count(), 2);
        assert_eq!(get.average(), 6.0);
        assert_eq!(windows.get(&"POST /").unwrap().max(), 100.0);
        assert!(windows.get(&"PUT /").is_none());
    }

    #[test]
    fn test_retain_active_drops_expired_series() {
        let mut windows = KeyedWindows::new(options()).unwrap();
        windows.add_sample(1u16, 10 * SEC, 1.0);
        windows.add_sample(2u16, 20 * SEC, 2.0);

        windows.retain_active(21 * SEC);
        assert_eq!(windows.len(), 1);
        assert!(windows.get(&1).is_none());
        assert_eq!(windows.get(&2).unwrap().sum(), 2.0);

        windows.retain_active(40 * SEC);
        assert!(windows.is_empty());
    }

    #[test]
    fn test_new_rejects_invalid_options() {
        let err = KeyedWindows::<u32>::new(WindowOptions {
            period: Duration::from_secs(1),
            buckets: 0,
        })
        .unwrap_err();
        assert_eq!(err, WindowError::ZeroBuckets);
    }
}
