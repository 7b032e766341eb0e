use crate::models::{HABIT_COUNT, HABITS, HabitSnapshot};
use chrono::{Local, NaiveDate};

pub fn build_snapshot(flags: [bool; HABIT_COUNT], mood: u8) -> HabitSnapshot {
    build_snapshot_at(Local::now().date_naive(), flags, mood)
}

pub fn build_snapshot_at(today: NaiveDate, flags: [bool; HABIT_COUNT], mood: u8) -> HabitSnapshot {
    let labels_completed: Vec<String> = HABITS
        .iter()
        .zip(flags)
        .filter(|(_, done)| *done)
        .map(|((_, label), _)| (*label).to_string())
        .collect();

    HabitSnapshot {
        date: today.format("%Y-%m-%d").to_string(),
        completion_rate: completion_rate(labels_completed.len()),
        labels_completed,
        mood,
    }
}

/// Always a multiple of 20 for five habits.
pub fn completion_rate(completed: usize) -> u8 {
    let completed = completed.min(HABIT_COUNT);
    (100 * completed / HABIT_COUNT) as u8
}

/// Maps checked habit keys onto the fixed slots. Returns the first unknown key as the error.
pub fn flags_from_keys<I, S>(keys: I) -> Result<[bool; HABIT_COUNT], String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut flags = [false; HABIT_COUNT];
    for key in keys {
        let key = key.as_ref().trim();
        match HABITS.iter().position(|(habit_key, _)| *habit_key == key) {
            Some(slot) => flags[slot] = true,
            None => return Err(key.to_string()),
        }
    }
    Ok(flags)
}
