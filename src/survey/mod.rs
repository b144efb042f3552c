//! Survey module
//!
//! Loads the survey responses from a CSV file, filters them by country and
//! computes the statistics shown on the dashboard.

mod aggregation;
mod filter;
mod load;
mod table;

pub use aggregation::{
    CategoryCount, GroupedCounts, Histogram, count_by_category, grouped_counts,
};
pub use filter::filter_by_country;
pub use load::{SurveySource, load_survey};
pub use table::SurveyTable;

#[cfg(test)]
pub(crate) use table::test_tables;

/// The names of the survey columns used by the dashboard.
pub mod columns {
    pub const COUNTRY: &str = "Country";
    pub const GENDER: &str = "Gender";
    pub const MENTAL_HEALTH_CONDITION: &str = "Mental_Health_Condition";
    pub const AGE: &str = "Age";
    pub const STRESS_LEVEL: &str = "Stress_Level";
    pub const SLEEP_HOURS: &str = "Sleep_Hours";
    pub const PHYSICAL_ACTIVITY_HOURS: &str = "Physical_Activity_Hours";
    pub const SOCIAL_MEDIA_USAGE: &str = "Social_Media_Usage";
}
