/// Lifecycle of a cached query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum QueryStatus {
    #[default]
    Idle,
    Fetching,
    Ready,
}

/// Single-key query cache.
///
/// Every fetch gets a generation number; only the result of the most recent
/// fetch is accepted, so a slow response can never overwrite a newer one.
#[derive(Clone, Debug)]
pub struct QueryCache<T> {
    data: T,
    status: QueryStatus,
    loaded: bool,
    generation: u64,
}

impl<T: Default> QueryCache<T> {
    pub fn new() -> Self {
        Self {
            data: T::default(),
            status: QueryStatus::Idle,
            loaded: false,
            generation: 0,
        }
    }
}

impl<T: Default> Default for QueryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> QueryCache<T> {
    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn status(&self) -> QueryStatus {
        self.status
    }

    /// Forgets the cached data. The generation keeps counting so a fetch
    /// still in flight cannot repopulate the cleared cache.
    pub fn clear(&mut self)
    where
        T: Default,
    {
        self.generation += 1;
        self.data = T::default();
        self.status = QueryStatus::Idle;
        self.loaded = false;
    }

    /// Starts a fetch and returns its generation.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.status = QueryStatus::Fetching;
        self.generation
    }

    /// Stores a successful result. Returns `false` if `generation` was superseded.
    pub fn resolve(&mut self, generation: u64, data: T) -> bool {
        if generation != self.generation {
            return false;
        }
        self.data = data;
        self.status = QueryStatus::Ready;
        self.loaded = true;
        true
    }

    /// Ends a failed fetch, keeping whatever data was cached before.
    pub fn reject(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.status = if self.loaded { QueryStatus::Ready } else { QueryStatus::Idle };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_fetching_ready() {
        let mut cache: QueryCache<Vec<u32>> = QueryCache::new();
        assert_eq!(cache.status(), QueryStatus::Idle);

        let fetch = cache.begin_fetch();
        assert_eq!(cache.status(), QueryStatus::Fetching);

        assert!(cache.resolve(fetch, vec![1, 2]));
        assert_eq!(cache.status(), QueryStatus::Ready);
        assert_eq!(cache.data(), &vec![1, 2]);
    }

    #[test]
    fn test_superseded_fetch_is_dropped() {
        let mut cache: QueryCache<Vec<u32>> = QueryCache::new();
        let first = cache.begin_fetch();
        let second = cache.begin_fetch();

        assert!(cache.resolve(second, vec![2]));
        assert!(!cache.resolve(first, vec![1]));
        assert_eq!(cache.data(), &vec![2]);
    }

    #[test]
    fn test_failed_first_fetch_returns_to_idle() {
        let mut cache: QueryCache<Vec<u32>> = QueryCache::new();
        let fetch = cache.begin_fetch();
        assert!(cache.reject(fetch));
        assert_eq!(cache.status(), QueryStatus::Idle);
        assert!(cache.data().is_empty());
    }

    #[test]
    fn test_failed_refetch_keeps_previous_data() {
        let mut cache: QueryCache<Vec<u32>> = QueryCache::new();
        let fetch = cache.begin_fetch();
        cache.resolve(fetch, vec![7]);

        let fetch = cache.begin_fetch();
        assert!(cache.reject(fetch));
        assert_eq!(cache.status(), QueryStatus::Ready);
        assert_eq!(cache.data(), &vec![7]);
    }

    #[test]
    fn test_clear_drops_data_and_in_flight_fetch() {
        let mut cache: QueryCache<Vec<u32>> = QueryCache::new();
        let fetch = cache.begin_fetch();
        cache.resolve(fetch, vec![3]);

        let in_flight = cache.begin_fetch();
        cache.clear();

        assert_eq!(cache.status(), QueryStatus::Idle);
        assert!(cache.data().is_empty());
        assert!(!cache.resolve(in_flight, vec![4]));
        assert!(cache.data().is_empty());

        let fetch = cache.begin_fetch();
        assert!(cache.reject(fetch));
        assert_eq!(cache.status(), QueryStatus::Idle);
        assert!(cache.data().is_empty());
    }
}
