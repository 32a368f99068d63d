//! Persistence seam for the roster services.
//!
//! Every mutating method is a single conditional, atomic update against the stored
//! record: it reports whether the condition held instead of letting the caller
//! read, modify and write back a cached copy.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Athlete, Competition, RaceTime};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait CompetitionStore: Send + Sync {
    /// Full competition record including roster and results.
    async fn competition(&self, competition_id: Uuid) -> Result<Option<Competition>>;

    /// Every competition with roster and results, most recent first.
    async fn competitions(&self) -> Result<Vec<Competition>>;

    async fn athlete(&self, athlete_id: Uuid) -> Result<Option<Athlete>>;

    /// Athletes with the given ids. Unknown ids are skipped; order is not guaranteed.
    async fn athletes(&self, athlete_ids: &[Uuid]) -> Result<Vec<Athlete>>;

    /// Adds the athlete to the roster unless already present and, in the same update,
    /// sets the athlete's assigned category. Returns `false` if the athlete was already
    /// on the roster, in which case nothing changes.
    async fn add_participant_if_absent(
        &self,
        competition_id: Uuid,
        athlete_id: Uuid,
        category: &str,
    ) -> Result<bool>;

    /// Removes the athlete from the roster. Returns `false` if they were not on it.
    async fn remove_participant_if_present(&self, competition_id: Uuid, athlete_id: Uuid)
    -> Result<bool>;

    /// Writes the athlete's result only if they are on the roster. Returns `false`
    /// otherwise.
    async fn put_result_if_participant(
        &self,
        competition_id: Uuid,
        athlete_id: Uuid,
        time: Option<&RaceTime>,
        recorded_at: NaiveDateTime,
    ) -> Result<bool>;

    /// Writes every result of the batch only if all of its athletes are on the roster.
    /// Returns `false` and writes nothing otherwise. Athlete ids must be distinct.
    async fn put_results_if_participants(
        &self,
        competition_id: Uuid,
        results: &[(Uuid, Option<RaceTime>)],
        recorded_at: NaiveDateTime,
    ) -> Result<bool>;
}
