use super::Gender;

/// A competition age bracket for one gender track.
///
/// The label encodes the gender letter and the age threshold (`м21`, `ж35`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub label: &'static str,
    pub gender: Gender,
    pub age: u16,
}

impl Category {
    const fn new(label: &'static str, gender: Gender, age: u16) -> Self {
        Self { label, gender, age }
    }
}

/// Age of the open adult category, reachable from both the junior and the veteran side.
pub const OPEN_CATEGORY_AGE: u16 = 21;

pub const MALE_CATEGORIES: &[Category] = &[
    Category::new("м14", Gender::Male, 14),
    Category::new("м16", Gender::Male, 16),
    Category::new("м19", Gender::Male, 19),
    Category::new("м21", Gender::Male, 21),
    Category::new("м40", Gender::Male, 40),
    Category::new("м50", Gender::Male, 50),
    Category::new("м60", Gender::Male, 60),
    Category::new("м70", Gender::Male, 70),
];

pub const FEMALE_CATEGORIES: &[Category] = &[
    Category::new("ж14", Gender::Female, 14),
    Category::new("ж16", Gender::Female, 16),
    Category::new("ж19", Gender::Female, 19),
    Category::new("ж21", Gender::Female, 21),
    Category::new("ж35", Gender::Female, 35),
    Category::new("ж50", Gender::Female, 50),
];

/// Categories of one gender track, youngest bracket first.
pub fn categories_for(gender: Gender) -> &'static [Category] {
    match gender {
        Gender::Male => MALE_CATEGORIES,
        Gender::Female => FEMALE_CATEGORIES,
    }
}

pub fn all_categories() -> impl Iterator<Item = &'static Category> {
    MALE_CATEGORIES.iter().chain(FEMALE_CATEGORIES.iter())
}

/// Looks up a category by its exact label.
pub fn find_category(label: &str) -> Option<&'static Category> {
    all_categories().find(|c| c.label == label)
}
