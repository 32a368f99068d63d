use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::dto::competition::{ParticipantGroup, ParticipantInfo};
use crate::dto::ranking::CompetitionResults;
use crate::error::RosterError;
use crate::models::{Athlete, Competition, Principal, RaceTime, ResultRecord};
use crate::services::eligibility::is_eligible;
use crate::services::registration_window::window_state;
use crate::services::results::{Rankings, rank_results};
use crate::store::CompetitionStore;

type Result<T> = std::result::Result<T, RosterError>;

async fn load_competition<S>(store: &S, competition_id: Uuid) -> Result<Competition>
where
    S: CompetitionStore + ?Sized,
{
    store
        .competition(competition_id)
        .await?
        .ok_or(RosterError::CompetitionNotFound)
}

/// Registers `athlete_id` for the competition under `category`.
///
/// Preconditions are checked in a fixed order and the first failure is returned.
/// On success the athlete joins the roster and their assigned category becomes
/// `category`, both in one conditional update.
pub async fn register_athlete<S>(
    store: &S,
    principal: &Principal,
    competition_id: Uuid,
    athlete_id: Uuid,
    category: &str,
    as_of: NaiveDateTime,
) -> Result<()>
where
    S: CompetitionStore + ?Sized,
{
    if !principal.may_act_for(athlete_id) {
        return Err(RosterError::Forbidden);
    }

    let competition = load_competition(store, competition_id).await?;

    let window = window_state(competition.date, as_of);
    if window.is_past_event {
        return Err(RosterError::EventAlreadyOccurred);
    }
    if !window.registration_permitted() {
        return Err(RosterError::RegistrationWindowClosed);
    }

    if competition.is_participant(athlete_id) {
        return Err(RosterError::AlreadyRegistered);
    }

    let athlete = store
        .athlete(athlete_id)
        .await?
        .ok_or(RosterError::AthleteNotFound)?;
    if !is_eligible(athlete.birth_date, athlete.gender, as_of.date(), category) {
        return Err(RosterError::CategoryNotEligibleForAthlete(category.to_string()));
    }

    if !competition.offers_category(category) {
        return Err(RosterError::CategoryNotOfferedByCompetition(category.to_string()));
    }

    if !store
        .add_participant_if_absent(competition_id, athlete_id, category)
        .await?
    {
        tracing::debug!(%competition_id, %athlete_id, "Lost registration race");
        return Err(RosterError::AlreadyRegistered);
    }

    tracing::info!(%competition_id, %athlete_id, category, "Athlete registered");
    Ok(())
}

/// Withdraws `athlete_id` from the competition. Recorded results are kept.
pub async fn unregister_athlete<S>(
    store: &S,
    principal: &Principal,
    competition_id: Uuid,
    athlete_id: Uuid,
    as_of: NaiveDateTime,
) -> Result<()>
where
    S: CompetitionStore + ?Sized,
{
    if !principal.may_act_for(athlete_id) {
        return Err(RosterError::Forbidden);
    }

    let competition = load_competition(store, competition_id).await?;

    if !competition.is_participant(athlete_id) {
        return Err(RosterError::NotRegistered);
    }

    if !window_state(competition.date, as_of).withdrawal_permitted() {
        return Err(RosterError::RegistrationWindowClosed);
    }

    if !store
        .remove_participant_if_present(competition_id, athlete_id)
        .await?
    {
        return Err(RosterError::NotRegistered);
    }

    tracing::info!(%competition_id, %athlete_id, "Athlete withdrawn");
    Ok(())
}

/// Records a participant's time. `None` records that no time was set.
pub async fn record_result<S>(
    store: &S,
    principal: &Principal,
    competition_id: Uuid,
    athlete_id: Uuid,
    time: Option<RaceTime>,
    recorded_at: NaiveDateTime,
) -> Result<ResultRecord>
where
    S: CompetitionStore + ?Sized,
{
    if !principal.is_admin() {
        return Err(RosterError::Forbidden);
    }

    let competition = load_competition(store, competition_id).await?;

    if !competition.is_participant(athlete_id) {
        return Err(RosterError::NotRegistered);
    }

    if !store
        .put_result_if_participant(competition_id, athlete_id, time.as_ref(), recorded_at)
        .await?
    {
        return Err(RosterError::NotRegistered);
    }

    tracing::info!(
        %competition_id,
        %athlete_id,
        time = time.as_ref().map(RaceTime::as_str).unwrap_or("none"),
        "Result recorded"
    );

    Ok(ResultRecord { time, recorded_at })
}

/// Records several participants' times at once. Every athlete must be a participant,
/// otherwise the whole batch is rejected and nothing is written.
pub async fn record_results<S>(
    store: &S,
    principal: &Principal,
    competition_id: Uuid,
    results: BTreeMap<Uuid, Option<RaceTime>>,
    recorded_at: NaiveDateTime,
) -> Result<BTreeMap<Uuid, ResultRecord>>
where
    S: CompetitionStore + ?Sized,
{
    if !principal.is_admin() {
        return Err(RosterError::Forbidden);
    }

    let competition = load_competition(store, competition_id).await?;

    if let Some(stranger) = results.keys().find(|id| !competition.is_participant(**id)) {
        tracing::debug!(%competition_id, athlete_id = %stranger, "Batch names a non-participant");
        return Err(RosterError::NotRegistered);
    }

    let batch: Vec<(Uuid, Option<RaceTime>)> = results.into_iter().collect();
    if !store
        .put_results_if_participants(competition_id, &batch, recorded_at)
        .await?
    {
        return Err(RosterError::NotRegistered);
    }

    tracing::info!(%competition_id, count = batch.len(), "Results recorded");

    Ok(batch
        .into_iter()
        .map(|(athlete_id, time)| (athlete_id, ResultRecord { time, recorded_at }))
        .collect())
}

/// Participants paired with their athlete record, in roster order.
///
/// Roster entries whose athlete record no longer exists are skipped.
async fn roster_athletes<S>(store: &S, competition: &Competition) -> Result<Vec<Athlete>>
where
    S: CompetitionStore + ?Sized,
{
    let mut by_id: HashMap<Uuid, Athlete> = store
        .athletes(&competition.participant_ids)
        .await?
        .into_iter()
        .map(|athlete| (athlete.athlete_id, athlete))
        .collect();

    Ok(competition
        .participant_ids
        .iter()
        .filter_map(|id| by_id.remove(id))
        .collect())
}

async fn rankings_for<S>(store: &S, competition: &Competition) -> Result<Rankings>
where
    S: CompetitionStore + ?Sized,
{
    let athletes = roster_athletes(store, competition).await?;

    let roster = athletes.iter().filter_map(|athlete| {
        let category = athlete.assigned_category.as_deref();
        if category.is_none() {
            tracing::debug!(athlete_id = %athlete.athlete_id, "Participant has no category");
        }
        category.map(|c| (athlete.athlete_id, c))
    });

    Ok(rank_results(roster, &competition.results))
}

/// Fresh per-category leaderboards for the competition.
pub async fn compute_rankings<S>(store: &S, competition_id: Uuid) -> Result<Rankings>
where
    S: CompetitionStore + ?Sized,
{
    let competition = load_competition(store, competition_id).await?;
    rankings_for(store, &competition).await
}

/// Podiums of every competition that has participants, most recent first.
pub async fn results_overview<S>(store: &S) -> Result<Vec<CompetitionResults>>
where
    S: CompetitionStore + ?Sized,
{
    let mut overview = Vec::new();
    for competition in store.competitions().await? {
        if competition.participant_ids.is_empty() {
            continue;
        }

        let rankings = rankings_for(store, &competition).await?;
        overview.push(CompetitionResults {
            competition_id: competition.competition_id,
            name: competition.name,
            date: competition.date,
            rankings,
        });
    }

    Ok(overview)
}

/// Participants grouped by assigned category, each with their recorded time.
pub async fn list_participants<S>(store: &S, competition_id: Uuid) -> Result<Vec<ParticipantGroup>>
where
    S: CompetitionStore + ?Sized,
{
    let competition = load_competition(store, competition_id).await?;
    let athletes = roster_athletes(store, &competition).await?;

    let mut groups: BTreeMap<String, Vec<ParticipantInfo>> = BTreeMap::new();
    for athlete in athletes {
        let Some(category) = athlete.assigned_category else {
            continue;
        };
        let result = competition.results.get(&athlete.athlete_id);

        groups.entry(category).or_default().push(ParticipantInfo {
            athlete_id: athlete.athlete_id,
            full_name: athlete.full_name,
            time: result.and_then(|r| r.time.clone()).map(String::from),
            recorded_at: result.map(|r| r.recorded_at),
        });
    }

    Ok(groups
        .into_iter()
        .map(|(category, participants)| ParticipantGroup {
            category,
            participants,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::Gender;
    use crate::store::MemoryStore;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn competition(categories: &[&str]) -> Competition {
        Competition {
            competition_id: Uuid::new_v4(),
            name: "Sofia Open".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            location: "Vitosha".to_string(),
            entry_fee: Decimal::new(10, 0),
            description: None,
            categories: categories.iter().map(|c| c.to_string()).collect(),
            participant_ids: Vec::new(),
            results: BTreeMap::new(),
            created_at: at(2025, 1, 1),
        }
    }

    fn athlete(birth_year: i32, gender: Gender) -> Athlete {
        Athlete {
            athlete_id: Uuid::new_v4(),
            full_name: format!("Athlete {birth_year}"),
            email: format!("{birth_year}@example.com"),
            birth_date: NaiveDate::from_ymd_opt(birth_year, 4, 20).unwrap(),
            gender,
            assigned_category: None,
            created_at: at(2025, 1, 1),
        }
    }

    struct Fixture {
        store: MemoryStore,
        competition_id: Uuid,
    }

    fn fixture(categories: &[&str]) -> Fixture {
        let store = MemoryStore::new();
        let comp = competition(categories);
        let competition_id = comp.competition_id;
        store.insert_competition(comp);
        Fixture {
            store,
            competition_id,
        }
    }

    impl Fixture {
        fn add_athlete(&self, birth_year: i32, gender: Gender) -> Uuid {
            let athlete = athlete(birth_year, gender);
            let id = athlete.athlete_id;
            self.store.insert_athlete(athlete);
            id
        }

        async fn register(&self, athlete_id: Uuid, category: &str) -> Result<()> {
            register_athlete(
                &self.store,
                &Principal::Athlete(athlete_id),
                self.competition_id,
                athlete_id,
                category,
                at(2025, 6, 1),
            )
            .await
        }

        async fn record(&self, athlete_id: Uuid, time: Option<&str>) -> Result<ResultRecord> {
            record_result(
                &self.store,
                &Principal::Admin,
                self.competition_id,
                athlete_id,
                time.map(|t| RaceTime::parse(t).unwrap()),
                at(2025, 6, 10),
            )
            .await
        }

        async fn participants(&self) -> Vec<Uuid> {
            self.store
                .competition(self.competition_id)
                .await
                .unwrap()
                .unwrap()
                .participant_ids
        }
    }

    #[tokio::test]
    async fn test_register_sets_assigned_category() {
        let fx = fixture(&["м16", "м19", "м21"]);
        let athlete_id = fx.add_athlete(2010, Gender::Male);

        fx.register(athlete_id, "м19").await.unwrap();

        assert_eq!(fx.participants().await, vec![athlete_id]);
        let stored = fx.store.athlete(athlete_id).await.unwrap().unwrap();
        assert_eq!(stored.assigned_category.as_deref(), Some("м19"));
    }

    #[tokio::test]
    async fn test_second_registration_is_rejected_not_duplicated() {
        let fx = fixture(&["м21"]);
        let athlete_id = fx.add_athlete(2000, Gender::Male);

        fx.register(athlete_id, "м21").await.unwrap();
        let second = fx.register(athlete_id, "м21").await;

        assert!(matches!(second, Err(RosterError::AlreadyRegistered)));
        assert_eq!(fx.participants().await, vec![athlete_id]);
    }

    #[tokio::test]
    async fn test_rejects_ineligible_category() {
        let fx = fixture(&["м14", "м16", "м21"]);
        let athlete_id = fx.add_athlete(2010, Gender::Male);

        let result = fx.register(athlete_id, "м14").await;

        assert!(matches!(
            result,
            Err(RosterError::CategoryNotEligibleForAthlete(ref c)) if c == "м14"
        ));
        assert!(fx.participants().await.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_other_gender_track() {
        let fx = fixture(&["ж21", "м21"]);
        let athlete_id = fx.add_athlete(2000, Gender::Female);

        let result = fx.register(athlete_id, "м21").await;

        assert!(matches!(result, Err(RosterError::CategoryNotEligibleForAthlete(_))));
    }

    #[tokio::test]
    async fn test_rejects_category_not_offered() {
        let fx = fixture(&["м21"]);
        let athlete_id = fx.add_athlete(1980, Gender::Male);

        let result = fx.register(athlete_id, "м40").await;

        assert!(matches!(result, Err(RosterError::CategoryNotOfferedByCompetition(_))));
    }

    #[tokio::test]
    async fn test_eligibility_is_checked_before_offer() {
        let fx = fixture(&["м21"]);
        let athlete_id = fx.add_athlete(1980, Gender::Male);

        let result = fx.register(athlete_id, "м60").await;

        assert!(matches!(result, Err(RosterError::CategoryNotEligibleForAthlete(_))));
    }

    #[tokio::test]
    async fn test_unknown_competition_and_athlete() {
        let fx = fixture(&["м21"]);
        let stranger = Uuid::new_v4();

        let missing_competition = register_athlete(
            &fx.store,
            &Principal::Admin,
            Uuid::new_v4(),
            stranger,
            "м21",
            at(2025, 6, 1),
        )
        .await;
        assert!(matches!(missing_competition, Err(RosterError::CompetitionNotFound)));

        let missing_athlete = register_athlete(
            &fx.store,
            &Principal::Admin,
            fx.competition_id,
            stranger,
            "м21",
            at(2025, 6, 1),
        )
        .await;
        assert!(matches!(missing_athlete, Err(RosterError::AthleteNotFound)));
    }

    #[tokio::test]
    async fn test_window_rules_for_registration() {
        let fx = fixture(&["м21"]);
        let athlete_id = fx.add_athlete(2000, Gender::Male);
        let principal = Principal::Athlete(athlete_id);

        let blackout = register_athlete(
            &fx.store,
            &principal,
            fx.competition_id,
            athlete_id,
            "м21",
            at(2025, 6, 9),
        )
        .await;
        assert!(matches!(blackout, Err(RosterError::RegistrationWindowClosed)));

        let past = register_athlete(
            &fx.store,
            &principal,
            fx.competition_id,
            athlete_id,
            "м21",
            at(2025, 6, 11),
        )
        .await;
        assert!(matches!(past, Err(RosterError::EventAlreadyOccurred)));
    }

    #[tokio::test]
    async fn test_athlete_cannot_register_someone_else() {
        let fx = fixture(&["м21"]);
        let athlete_id = fx.add_athlete(2000, Gender::Male);

        let result = register_athlete(
            &fx.store,
            &Principal::Athlete(Uuid::new_v4()),
            fx.competition_id,
            athlete_id,
            "м21",
            at(2025, 6, 1),
        )
        .await;

        assert!(matches!(result, Err(RosterError::Forbidden)));
    }

    #[tokio::test]
    async fn test_unregister_not_registered() {
        let fx = fixture(&["м21"]);
        let registered = fx.add_athlete(2000, Gender::Male);
        let other = fx.add_athlete(1999, Gender::Male);
        fx.register(registered, "м21").await.unwrap();

        let result = unregister_athlete(
            &fx.store,
            &Principal::Admin,
            fx.competition_id,
            other,
            at(2025, 6, 1),
        )
        .await;

        assert!(matches!(result, Err(RosterError::NotRegistered)));
        assert_eq!(fx.participants().await, vec![registered]);
    }

    #[tokio::test]
    async fn test_unregister_respects_blackout_and_keeps_results() {
        let fx = fixture(&["м21"]);
        let athlete_id = fx.add_athlete(2000, Gender::Male);
        let principal = Principal::Athlete(athlete_id);
        fx.register(athlete_id, "м21").await.unwrap();
        fx.record(athlete_id, Some("00:40:00")).await.unwrap();

        let blackout =
            unregister_athlete(&fx.store, &principal, fx.competition_id, athlete_id, at(2025, 6, 9))
                .await;
        assert!(matches!(blackout, Err(RosterError::RegistrationWindowClosed)));

        unregister_athlete(&fx.store, &principal, fx.competition_id, athlete_id, at(2025, 6, 2))
            .await
            .unwrap();

        let stored = fx.store.competition(fx.competition_id).await.unwrap().unwrap();
        assert!(stored.participant_ids.is_empty());
        assert!(stored.results.contains_key(&athlete_id));
        assert!(fx.register(athlete_id, "м21").await.is_ok());
    }

    #[tokio::test]
    async fn test_record_result_requires_admin_and_participant() {
        let fx = fixture(&["м21"]);
        let athlete_id = fx.add_athlete(2000, Gender::Male);

        let not_registered = fx.record(athlete_id, Some("00:30:00")).await;
        assert!(matches!(not_registered, Err(RosterError::NotRegistered)));

        fx.register(athlete_id, "м21").await.unwrap();
        let as_athlete = record_result(
            &fx.store,
            &Principal::Athlete(athlete_id),
            fx.competition_id,
            athlete_id,
            None,
            at(2025, 6, 10),
        )
        .await;
        assert!(matches!(as_athlete, Err(RosterError::Forbidden)));

        let recorded = fx.record(athlete_id, Some("00:30:00")).await.unwrap();
        assert_eq!(recorded.time.unwrap().as_str(), "00:30:00");
    }

    #[tokio::test]
    async fn test_compute_rankings_end_to_end() {
        let fx = fixture(&["м21", "ж21"]);
        let a = fx.add_athlete(2000, Gender::Male);
        let b = fx.add_athlete(2001, Gender::Male);
        let c = fx.add_athlete(2002, Gender::Male);
        let d = fx.add_athlete(2000, Gender::Female);
        for id in [a, b, c] {
            fx.register(id, "м21").await.unwrap();
        }
        fx.register(d, "ж21").await.unwrap();

        fx.record(a, Some("00:15:32")).await.unwrap();
        fx.record(b, Some("00:14:50")).await.unwrap();
        fx.record(c, None).await.unwrap();

        let rankings = compute_rankings(&fx.store, fx.competition_id).await.unwrap();

        let men = &rankings["м21"];
        assert_eq!(men.len(), 2);
        assert_eq!((men[0].athlete_id, men[0].rank), (b, 1));
        assert_eq!((men[1].athlete_id, men[1].rank), (a, 2));
        assert!(rankings["ж21"].is_empty());
    }

    #[tokio::test]
    async fn test_compute_rankings_is_idempotent() {
        let fx = fixture(&["м21"]);
        let a = fx.add_athlete(2000, Gender::Male);
        let b = fx.add_athlete(2001, Gender::Male);
        fx.register(a, "м21").await.unwrap();
        fx.register(b, "м21").await.unwrap();
        fx.record(a, Some("01:02:03")).await.unwrap();
        fx.record(b, Some("00:59:59")).await.unwrap();

        let first = compute_rankings(&fx.store, fx.competition_id).await.unwrap();
        let second = compute_rankings(&fx.store, fx.competition_id).await.unwrap();

        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_rankings_for_unknown_competition() {
        let store = MemoryStore::new();
        let result = compute_rankings(&store, Uuid::new_v4()).await;
        assert!(matches!(result, Err(RosterError::CompetitionNotFound)));
    }

    #[tokio::test]
    async fn test_list_participants_groups_by_category() {
        let fx = fixture(&["м19", "м21"]);
        let junior = fx.add_athlete(2008, Gender::Male);
        let senior = fx.add_athlete(1995, Gender::Male);
        fx.register(junior, "м19").await.unwrap();
        fx.register(senior, "м21").await.unwrap();
        fx.record(senior, Some("00:52:10")).await.unwrap();

        let groups = list_participants(&fx.store, fx.competition_id).await.unwrap();

        let labels: Vec<&str> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(labels, vec!["м19", "м21"]);
        assert_eq!(groups[0].participants[0].athlete_id, junior);
        assert_eq!(groups[0].participants[0].time, None);
        assert_eq!(groups[1].participants[0].time.as_deref(), Some("00:52:10"));
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let fx = fixture(&["м21"]);
        let athlete_id = fx.add_athlete(2000, Gender::Male);
        let store: &dyn CompetitionStore = &fx.store;

        register_athlete(
            store,
            &Principal::Admin,
            fx.competition_id,
            athlete_id,
            "м21",
            at(2025, 6, 1),
        )
        .await
        .unwrap();

        assert!(compute_rankings(store, fx.competition_id).await.unwrap()["м21"].is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_registrations_admit_athlete_once() {
        let store = Arc::new(MemoryStore::new());
        let comp = competition(&["м21"]);
        let competition_id = comp.competition_id;
        store.insert_competition(comp);
        let racer = athlete(2000, Gender::Male);
        let athlete_id = racer.athlete_id;
        store.insert_athlete(racer);

        let attempts: Vec<_> = (0..64)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    register_athlete(
                        &*store,
                        &Principal::Athlete(athlete_id),
                        competition_id,
                        athlete_id,
                        "м21",
                        at(2025, 6, 1),
                    )
                    .await
                })
            })
            .collect();

        let mut admitted = 0;
        let mut duplicates = 0;
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(()) => admitted += 1,
                Err(RosterError::AlreadyRegistered) => duplicates += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!((admitted, duplicates), (1, 63));
        let stored = store.competition(competition_id).await.unwrap().unwrap();
        assert_eq!(stored.participant_ids, vec![athlete_id]);
    }

    #[tokio::test]
    async fn test_record_results_saves_whole_batch() {
        let fx = fixture(&["м21"]);
        let a = fx.add_athlete(2000, Gender::Male);
        let b = fx.add_athlete(2001, Gender::Male);
        fx.register(a, "м21").await.unwrap();
        fx.register(b, "м21").await.unwrap();

        let batch = BTreeMap::from([
            (a, Some(RaceTime::parse("00:48:00").unwrap())),
            (b, None),
        ]);
        let saved = record_results(
            &fx.store,
            &Principal::Admin,
            fx.competition_id,
            batch,
            at(2025, 6, 10),
        )
        .await
        .unwrap();

        assert_eq!(saved.len(), 2);
        let stored = fx.store.competition(fx.competition_id).await.unwrap().unwrap();
        assert_eq!(stored.results[&a].time.as_ref().unwrap().as_str(), "00:48:00");
        assert_eq!(stored.results[&b].time, None);
    }

    #[tokio::test]
    async fn test_record_results_rejects_batch_with_non_participant() {
        let fx = fixture(&["м21"]);
        let registered = fx.add_athlete(2000, Gender::Male);
        let stranger = fx.add_athlete(2001, Gender::Male);
        fx.register(registered, "м21").await.unwrap();

        let batch = BTreeMap::from([
            (registered, Some(RaceTime::parse("00:48:00").unwrap())),
            (stranger, Some(RaceTime::parse("00:47:00").unwrap())),
        ]);
        let result = record_results(
            &fx.store,
            &Principal::Admin,
            fx.competition_id,
            batch,
            at(2025, 6, 10),
        )
        .await;

        assert!(matches!(result, Err(RosterError::NotRegistered)));
        let stored = fx.store.competition(fx.competition_id).await.unwrap().unwrap();
        assert!(stored.results.is_empty());
    }

    #[tokio::test]
    async fn test_record_results_requires_admin() {
        let fx = fixture(&["м21"]);
        let athlete_id = fx.add_athlete(2000, Gender::Male);
        fx.register(athlete_id, "м21").await.unwrap();

        let result = record_results(
            &fx.store,
            &Principal::Athlete(athlete_id),
            fx.competition_id,
            BTreeMap::from([(athlete_id, None)]),
            at(2025, 6, 10),
        )
        .await;

        assert!(matches!(result, Err(RosterError::Forbidden)));
    }

    #[tokio::test]
    async fn test_results_overview_skips_empty_competitions() {
        let fx = fixture(&["м21"]);
        let athlete_id = fx.add_athlete(2000, Gender::Male);
        fx.register(athlete_id, "м21").await.unwrap();
        fx.record(athlete_id, Some("00:33:33")).await.unwrap();

        let mut empty = competition(&["м21"]);
        empty.date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        fx.store.insert_competition(empty);

        let overview = results_overview(&fx.store).await.unwrap();

        assert_eq!(overview.len(), 1);
        assert_eq!(overview[0].competition_id, fx.competition_id);
        assert_eq!(overview[0].name, "Sofia Open");
        assert_eq!(overview[0].rankings["м21"][0].athlete_id, athlete_id);
    }
}
