use chrono::{Datelike, NaiveDate};

use crate::models::{Category, Gender, OPEN_CATEGORY_AGE, categories_for};

/// Age used for category eligibility: the difference of calendar years.
///
/// Month and day are ignored, so the value changes on January 1st rather than
/// on the athlete's birthday.
pub fn competition_age(birth_date: NaiveDate, as_of: NaiveDate) -> i32 {
    as_of.year() - birth_date.year()
}

/// Categories of the athlete's gender track they may enter on `as_of`.
///
/// Juniors may move up to any bracket between their age and the open category;
/// adults may move down to any bracket between their age and the open category.
pub fn eligible_categories(
    birth_date: NaiveDate,
    gender: Gender,
    as_of: NaiveDate,
) -> Vec<&'static Category> {
    let age = competition_age(birth_date, as_of);
    let open = i32::from(OPEN_CATEGORY_AGE);

    categories_for(gender)
        .iter()
        .filter(|category| {
            let threshold = i32::from(category.age);
            if age < open {
                threshold <= open && threshold >= age
            } else {
                threshold >= open && threshold <= age
            }
        })
        .collect()
}

pub fn is_eligible(birth_date: NaiveDate, gender: Gender, as_of: NaiveDate, label: &str) -> bool {
    eligible_categories(birth_date, gender, as_of)
        .iter()
        .any(|category| category.label == label)
}
