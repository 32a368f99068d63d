use std::collections::BTreeMap;

use uuid::Uuid;

use crate::dto::ranking::RankedEntry;
use crate::models::{RaceTime, ResultRecord};

/// Number of ranked entries kept per category.
pub const PODIUM_SIZE: usize = 3;

/// Leaderboards keyed by category label.
pub type Rankings = BTreeMap<String, Vec<RankedEntry>>;

/// Builds per-category leaderboards from a roster and the recorded results.
///
/// `roster` yields each participant with the category they are on record under, in
/// participant-list order. Participants without a time still create their category's
/// (possibly empty) leaderboard but are never ranked. Results of athletes absent from
/// the roster are ignored. Ties keep roster order.
pub fn rank_results<'a, I>(roster: I, results: &BTreeMap<Uuid, ResultRecord>) -> Rankings
where
    I: IntoIterator<Item = (Uuid, &'a str)>,
{
    let mut groups: BTreeMap<String, Vec<(Uuid, Option<&RaceTime>)>> = BTreeMap::new();

    for (athlete_id, category) in roster {
        let time = results.get(&athlete_id).and_then(|r| r.time.as_ref());
        groups
            .entry(category.to_string())
            .or_default()
            .push((athlete_id, time));
    }

    groups
        .into_iter()
        .map(|(category, mut entries)| {
            // None sorts first; those entries are dropped right after.
            entries.sort_by(|a, b| a.1.cmp(&b.1));

            let leaderboard = entries
                .into_iter()
                .filter_map(|(athlete_id, time)| time.map(|t| (athlete_id, t.clone())))
                .take(PODIUM_SIZE)
                .enumerate()
                .map(|(position, (athlete_id, time))| RankedEntry {
                    category: category.clone(),
                    rank: position as u32 + 1,
                    athlete_id,
                    time,
                })
                .collect();

            (category, leaderboard)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn record(time: Option<&str>) -> ResultRecord {
        ResultRecord {
            time: time.map(|t| RaceTime::parse(t).unwrap()),
            recorded_at: NaiveDate::from_ymd_opt(2025, 6, 10)
                .unwrap()
                .and_hms_opt(15, 0, 0)
                .unwrap(),
        }
    }

    fn ids<const N: usize>() -> [Uuid; N] {
        std::array::from_fn(|_| Uuid::new_v4())
    }

    #[test]
    fn test_ranks_by_time_and_excludes_missing() {
        let [a, b, c] = ids();
        let results = BTreeMap::from([
            (a, record(Some("00:15:32"))),
            (b, record(Some("00:14:50"))),
            (c, record(None)),
        ]);

        let rankings = rank_results([(a, "м21"), (b, "м21"), (c, "м21")], &results);
        let board = &rankings["м21"];

        assert_eq!(board.len(), 2);
        assert_eq!((board[0].rank, board[0].athlete_id), (1, b));
        assert_eq!((board[1].rank, board[1].athlete_id), (2, a));
        assert_eq!(board[0].time.as_str(), "00:14:50");
    }

    #[test]
    fn test_truncates_to_podium() {
        let athletes: [Uuid; 5] = ids();
        let times = ["00:40:00", "00:35:00", "00:50:00", "00:30:00", "00:45:00"];
        let results: BTreeMap<Uuid, ResultRecord> = athletes
            .iter()
            .zip(times)
            .map(|(id, t)| (*id, record(Some(t))))
            .collect();

        let rankings = rank_results(athletes.iter().map(|id| (*id, "ж19")), &results);
        let board = &rankings["ж19"];

        assert_eq!(board.len(), PODIUM_SIZE);
        let ranked: Vec<Uuid> = board.iter().map(|e| e.athlete_id).collect();
        assert_eq!(ranked, vec![athletes[3], athletes[1], athletes[0]]);
        assert_eq!(board.iter().map(|e| e.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_groups_by_assigned_category() {
        let [a, b] = ids();
        let results = BTreeMap::from([(a, record(Some("00:20:00"))), (b, record(Some("00:25:00")))]);

        let rankings = rank_results([(a, "м40"), (b, "м21")], &results);

        assert_eq!(rankings.len(), 2);
        assert_eq!(rankings["м21"][0].athlete_id, b);
        assert_eq!(rankings["м40"][0].athlete_id, a);
        assert_eq!(rankings["м21"][0].rank, 1);
    }

    #[test]
    fn test_category_without_times_is_empty() {
        let [a, b] = ids();
        let results = BTreeMap::from([(a, record(None))]);

        let rankings = rank_results([(a, "ж14"), (b, "ж14")], &results);

        assert_eq!(rankings.len(), 1);
        assert!(rankings["ж14"].is_empty());
    }

    #[test]
    fn test_results_without_roster_entry_are_ignored() {
        let [a, withdrawn] = ids();
        let results = BTreeMap::from([
            (a, record(Some("00:33:00"))),
            (withdrawn, record(Some("00:10:00"))),
        ]);

        let rankings = rank_results([(a, "м16")], &results);

        assert_eq!(rankings["м16"].len(), 1);
        assert_eq!(rankings["м16"][0].athlete_id, a);
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let [a, b] = ids();
        let results = BTreeMap::from([(a, record(Some("00:20:00"))), (b, record(Some("00:20:00")))]);

        let rankings = rank_results([(b, "м21"), (a, "м21")], &results);

        assert_eq!(rankings["м21"][0].athlete_id, b);
        assert_eq!(rankings["м21"][1].rank, 2);
    }

    #[test]
    fn test_empty_roster() {
        assert!(rank_results(std::iter::empty::<(Uuid, &str)>(), &BTreeMap::new()).is_empty());
    }
}
