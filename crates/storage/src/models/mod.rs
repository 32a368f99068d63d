pub mod athlete;
pub mod category;
pub mod competition;
pub mod gender;
pub mod principal;
pub mod race_time;

pub use athlete::{Athlete, AthleteRow};
pub use category::{
    Category, FEMALE_CATEGORIES, MALE_CATEGORIES, OPEN_CATEGORY_AGE, all_categories,
    categories_for, find_category,
};
pub use competition::{Competition, CompetitionListRow, CompetitionRow, ResultRecord, ResultRow};
pub use gender::Gender;
pub use principal::Principal;
pub use race_time::{NO_TIME_SENTINEL, RaceTime};
