use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use super::CompetitionStore;
use crate::error::Result;
use crate::models::{Athlete, Competition, RaceTime, ResultRecord};

#[derive(Default)]
struct State {
    competitions: HashMap<Uuid, Competition>,
    athletes: HashMap<Uuid, Athlete>,
}

/// Process-local store. Each operation runs under one lock, which gives the same
/// conditional-update guarantees as the database store.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_competition(&self, competition: Competition) {
        self.lock()
            .competitions
            .insert(competition.competition_id, competition);
    }

    pub fn insert_athlete(&self, athlete: Athlete) {
        self.lock().athletes.insert(athlete.athlete_id, athlete);
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CompetitionStore for MemoryStore {
    async fn competition(&self, competition_id: Uuid) -> Result<Option<Competition>> {
        Ok(self.lock().competitions.get(&competition_id).cloned())
    }

    async fn competitions(&self) -> Result<Vec<Competition>> {
        let mut competitions: Vec<Competition> =
            self.lock().competitions.values().cloned().collect();
        competitions.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(competitions)
    }

    async fn athlete(&self, athlete_id: Uuid) -> Result<Option<Athlete>> {
        Ok(self.lock().athletes.get(&athlete_id).cloned())
    }

    async fn athletes(&self, athlete_ids: &[Uuid]) -> Result<Vec<Athlete>> {
        let state = self.lock();
        Ok(athlete_ids
            .iter()
            .filter_map(|id| state.athletes.get(id).cloned())
            .collect())
    }

    async fn add_participant_if_absent(
        &self,
        competition_id: Uuid,
        athlete_id: Uuid,
        category: &str,
    ) -> Result<bool> {
        let mut state = self.lock();
        let State {
            competitions,
            athletes,
        } = &mut *state;

        let Some(competition) = competitions.get_mut(&competition_id) else {
            return Ok(false);
        };
        let Some(athlete) = athletes.get_mut(&athlete_id) else {
            return Ok(false);
        };
        if competition.is_participant(athlete_id) {
            return Ok(false);
        }

        competition.participant_ids.push(athlete_id);
        athlete.assigned_category = Some(category.to_string());
        Ok(true)
    }

    async fn remove_participant_if_present(
        &self,
        competition_id: Uuid,
        athlete_id: Uuid,
    ) -> Result<bool> {
        let mut state = self.lock();
        let Some(competition) = state.competitions.get_mut(&competition_id) else {
            return Ok(false);
        };

        let before = competition.participant_ids.len();
        competition.participant_ids.retain(|id| *id != athlete_id);
        Ok(competition.participant_ids.len() != before)
    }

    async fn put_result_if_participant(
        &self,
        competition_id: Uuid,
        athlete_id: Uuid,
        time: Option<&RaceTime>,
        recorded_at: NaiveDateTime,
    ) -> Result<bool> {
        let mut state = self.lock();
        let Some(competition) = state.competitions.get_mut(&competition_id) else {
            return Ok(false);
        };
        if !competition.is_participant(athlete_id) {
            return Ok(false);
        }

        competition.results.insert(
            athlete_id,
            ResultRecord {
                time: time.cloned(),
                recorded_at,
            },
        );
        Ok(true)
    }

    async fn put_results_if_participants(
        &self,
        competition_id: Uuid,
        results: &[(Uuid, Option<RaceTime>)],
        recorded_at: NaiveDateTime,
    ) -> Result<bool> {
        let mut state = self.lock();
        let Some(competition) = state.competitions.get_mut(&competition_id) else {
            return Ok(false);
        };
        if !results
            .iter()
            .all(|(athlete_id, _)| competition.is_participant(*athlete_id))
        {
            return Ok(false);
        }

        for (athlete_id, time) in results {
            competition.results.insert(
                *athlete_id,
                ResultRecord {
                    time: time.clone(),
                    recorded_at,
                },
            );
        }
        Ok(true)
    }
}
