use uuid::Uuid;

/// The authenticated caller of a roster operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    Admin,
    Athlete(Uuid),
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Admins may act for anyone; athletes only for themselves.
    pub fn may_act_for(&self, athlete_id: Uuid) -> bool {
        match self {
            Self::Admin => true,
            Self::Athlete(id) => *id == athlete_id,
        }
    }
}
