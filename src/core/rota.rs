use crate::domain::model::{Apprentice, FridayLunch};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// First Friday on or after `date`.
pub fn next_friday(date: NaiveDate) -> NaiveDate {
    let ahead = (7 + Weekday::Fri.num_days_from_monday() - date.weekday().num_days_from_monday()) % 7;
    date + Duration::days(i64::from(ahead))
}

/// Rolls `schedule` forward to `today`.
///
/// Lunches dated before `today` are dropped, then Fridays are appended
/// until the schedule holds `weeks` lunches. New lunches take apprentices
/// in roster order, picking up after whoever has the last existing lunch.
/// Returns how many past lunches were dropped.
pub fn update(
    schedule: &mut Vec<FridayLunch>,
    apprentices: &[Apprentice],
    today: NaiveDate,
    weeks: usize,
) -> usize {
    let before = schedule.len();
    schedule.retain(|lunch| lunch.date() >= today);
    let dropped = before - schedule.len();

    let mut next_date = match schedule.last() {
        Some(last) => last.date() + Duration::weeks(1),
        None => next_friday(today),
    };
    let mut turn = schedule
        .last()
        .and_then(FridayLunch::apprentice)
        .and_then(|current| apprentices.iter().position(|a| a == current))
        .map(|index| index + 1)
        .unwrap_or(0);

    while schedule.len() < weeks {
        let mut lunch = FridayLunch::new(next_date);
        if !apprentices.is_empty() {
            lunch.assign_apprentice(apprentices[turn % apprentices.len()].clone());
            turn += 1;
        }
        tracing::debug!(
            "Scheduled {} for {}",
            lunch.apprentice().map(Apprentice::name).unwrap_or("nobody"),
            next_date
        );
        schedule.push(lunch);
        next_date += Duration::weeks(1);
    }

    dropped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Restaurant;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn roster() -> Vec<Apprentice> {
        ["Priya", "Mollie", "Nick", "Rabea"]
            .into_iter()
            .map(Apprentice::new)
            .collect()
    }

    fn names(schedule: &[FridayLunch]) -> Vec<&str> {
        schedule
            .iter()
            .map(|l| l.apprentice().map(Apprentice::name).unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_next_friday() {
        // 2020-01-03 was a Friday
        assert_eq!(next_friday(date(2020, 1, 3)), date(2020, 1, 3));
        assert_eq!(next_friday(date(2020, 1, 4)), date(2020, 1, 10));
        assert_eq!(next_friday(date(2020, 1, 6)), date(2020, 1, 10));
        assert_eq!(next_friday(date(2020, 1, 9)), date(2020, 1, 10));
    }

    #[test]
    fn test_fills_empty_schedule_from_next_friday() {
        let mut schedule = Vec::new();
        let dropped = update(&mut schedule, &roster(), date(2020, 1, 1), 3);

        assert_eq!(dropped, 0);
        assert_eq!(names(&schedule), vec!["Priya", "Mollie", "Nick"]);
        let dates: Vec<_> = schedule.iter().map(FridayLunch::date).collect();
        assert_eq!(dates, vec![date(2020, 1, 3), date(2020, 1, 10), date(2020, 1, 17)]);
    }

    #[test]
    fn test_drops_past_lunches_and_continues_rotation() {
        let mut schedule = Vec::new();
        update(&mut schedule, &roster(), date(2020, 1, 1), 4);
        schedule[0].assign_restaurant(Restaurant::new("Deliveroo", "http://menu"));

        let dropped = update(&mut schedule, &roster(), date(2020, 1, 6), 4);

        assert_eq!(dropped, 1);
        assert_eq!(names(&schedule), vec!["Mollie", "Nick", "Rabea", "Priya"]);
        assert_eq!(schedule[0].date(), date(2020, 1, 10));
        assert!(schedule.iter().all(|l| l.restaurant().is_none()));
    }

    #[test]
    fn test_unknown_last_apprentice_restarts_roster() {
        let mut lunch = FridayLunch::new(date(2020, 1, 3));
        lunch.assign_apprentice(Apprentice::new("Ced"));
        let mut schedule = vec![lunch];

        update(&mut schedule, &roster(), date(2020, 1, 1), 2);
        assert_eq!(names(&schedule), vec!["Ced", "Priya"]);
    }

    #[test]
    fn test_empty_roster_leaves_lunches_unassigned() {
        let mut schedule = Vec::new();
        update(&mut schedule, &[], date(2020, 1, 1), 2);

        assert_eq!(schedule.len(), 2);
        assert!(schedule.iter().all(|l| l.apprentice().is_none()));
    }

    #[test]
    fn test_lunch_on_today_is_kept() {
        let mut schedule = Vec::new();
        update(&mut schedule, &roster(), date(2020, 1, 3), 2);
        let dropped = update(&mut schedule, &roster(), date(2020, 1, 3), 2);

        assert_eq!(dropped, 0);
        assert_eq!(schedule[0].date(), date(2020, 1, 3));
    }
}
