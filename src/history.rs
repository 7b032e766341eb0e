use crate::models::{HabitSnapshot, HistoryRecord};
use chrono::{Duration, Local, NaiveDate};
use rand::Rng;

const SEED_DAYS: i64 = 6;

/// Past daily records for the chart. Lives for one session and is never written to disk.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    records: Vec<HistoryRecord>,
}

impl HistoryStore {
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn seed(&mut self) {
        self.seed_at(Local::now().date_naive(), &mut rand::thread_rng());
    }

    /// Fills an empty store with six demo days ending yesterday. No-op once seeded.
    pub fn seed_at<R: Rng + ?Sized>(&mut self, today: NaiveDate, rng: &mut R) {
        if !self.records.is_empty() {
            return;
        }

        for offset in (1..=SEED_DAYS).rev() {
            let date = today - Duration::days(offset);
            self.records.push(HistoryRecord {
                date: date_key(date),
                completion_rate: rng.gen_range(20..=100),
                mood: rng.gen_range(3..=9),
            });
        }
    }

    /// Seeded records plus a trailing record for today. The store itself is left untouched.
    pub fn append_today(&self, snapshot: &HabitSnapshot) -> Vec<HistoryRecord> {
        let mut chart = Vec::with_capacity(self.records.len() + 1);
        chart.extend(self.records.iter().cloned());
        chart.push(HistoryRecord {
            date: snapshot.date.clone(),
            completion_rate: snapshot.completion_rate,
            mood: snapshot.mood,
        });
        chart
    }
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habits::build_snapshot_at;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    #[test]
    fn seed_creates_six_days_ending_yesterday() {
        let mut store = HistoryStore::default();
        store.seed_at(today(), &mut StdRng::seed_from_u64(7));

        let dates: Vec<&str> = store.records().iter().map(|r| r.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["2025-12-30", "2025-12-31", "2026-01-01", "2026-01-02", "2026-01-03", "2026-01-04"]
        );
        for record in store.records() {
            assert!((20..=100).contains(&record.completion_rate));
            assert!((3..=9).contains(&record.mood));
        }
    }

    #[test]
    fn seed_is_idempotent() {
        let mut store = HistoryStore::default();
        let mut rng = StdRng::seed_from_u64(1);
        store.seed_at(today(), &mut rng);
        let first = store.records().to_vec();

        store.seed_at(today(), &mut rng);
        assert_eq!(store.records(), first.as_slice());
    }

    #[test]
    fn append_today_does_not_touch_store() {
        let mut store = HistoryStore::default();
        store.seed_at(today(), &mut StdRng::seed_from_u64(3));
        let snapshot = build_snapshot_at(today(), [true, true, true, false, false], 8);

        let chart = store.append_today(&snapshot);
        assert_eq!(chart.len(), 7);
        let last = chart.last().expect("today missing");
        assert_eq!(last.date, "2026-01-05");
        assert_eq!(last.completion_rate, 60);
        assert_eq!(last.mood, 8);
        assert_eq!(store.records().len(), 6);
    }
}
