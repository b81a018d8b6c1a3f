use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::{Cursor, FetchError, Page, PeopleSource, Person};

const FIRST_NAMES: [&str; 8] = [
    "Ada", "Alan", "Grace", "Edsger", "Barbara", "Donald", "Frances", "Ken",
];
const LAST_NAMES: [&str; 6] = ["Lovelace", "Turing", "Hopper", "Dijkstra", "Liskov", "Knuth"];

const CURSOR_PREFIX: &str = "page-";

#[derive(Debug, Clone)]
pub struct SimulatedSettings {
    pub total_people: usize,
    pub page_size: usize,
    /// Each page after the first repeats this many people from the previous one.
    pub overlap: usize,
    pub latency: Duration,
    /// Fail every n-th request when set.
    pub fail_every: Option<u32>,
}

impl Default for SimulatedSettings {
    fn default() -> Self {
        Self {
            total_people: 45,
            page_size: 10,
            overlap: 2,
            latency: Duration::from_millis(300),
            fail_every: None,
        }
    }
}

/// Deterministic in-process source that pages through a generated population.
#[derive(Debug)]
pub struct SimulatedPeopleSource {
    settings: SimulatedSettings,
    requests: AtomicU64,
}

impl SimulatedPeopleSource {
    pub fn new(settings: SimulatedSettings) -> Self {
        Self {
            settings,
            requests: AtomicU64::new(0),
        }
    }

    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    fn page_index(&self, cursor: Option<&Cursor>) -> Result<usize, FetchError> {
        let Some(cursor) = cursor else {
            return Ok(0);
        };
        cursor
            .as_str()
            .strip_prefix(CURSOR_PREFIX)
            .and_then(|index| index.parse::<usize>().ok())
            .filter(|&index| {
                index
                    .checked_mul(self.page_size())
                    .is_some_and(|start| start < self.settings.total_people)
            })
            .ok_or_else(|| FetchError::new("Parameter error"))
    }

    fn page_size(&self) -> usize {
        self.settings.page_size.max(1)
    }

    fn build_page(&self, index: usize) -> Page {
        let page_size = self.page_size();
        let total = self.settings.total_people;
        let start = index * page_size;
        let end = (start + page_size).min(total);
        let first = if index == 0 {
            start
        } else {
            start.saturating_sub(self.settings.overlap)
        };

        Page {
            people: (first..end).map(person_at).collect(),
            next: (end < total).then(|| Cursor::new(format!("{CURSOR_PREFIX}{}", index + 1))),
        }
    }
}

#[async_trait::async_trait]
impl PeopleSource for SimulatedPeopleSource {
    async fn fetch(&self, cursor: Option<&Cursor>) -> Result<Page, FetchError> {
        let request = self.requests.fetch_add(1, Ordering::Relaxed) + 1;
        if !self.settings.latency.is_zero() {
            tokio::time::sleep(self.settings.latency).await;
        }
        if let Some(every) = self.settings.fail_every.filter(|&every| every > 0) {
            if request % u64::from(every) == 0 {
                return Err(FetchError::new("Simulated server failure"));
            }
        }
        let index = self.page_index(cursor)?;
        Ok(self.build_page(index))
    }
}

fn person_at(index: usize) -> Person {
    let first = FIRST_NAMES[index % FIRST_NAMES.len()];
    let last = LAST_NAMES[(index / FIRST_NAMES.len()) % LAST_NAMES.len()];
    Person {
        id: index as i64 + 1,
        full_name: format!("{first} {last}"),
    }
}
