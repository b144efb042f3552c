//! The fixed set of charts shown on the dashboard.
//!
//! Each panel reads one or two columns of the filtered survey table and turns
//! them into a chart. Panels share no state, so a panel that fails (e.g.,
//! because its column is missing) does not stop the others from rendering.

use crate::{
    Error,
    dashboard::charts::{
        DashboardChart, category_count_chart, grouped_count_chart, histogram_chart,
    },
    survey::{Histogram, SurveyTable, columns, count_by_category, grouped_counts},
};

/// What a panel computes from the survey table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum PanelKind {
    /// Counts of `primary` broken down by `hue`.
    GroupedCounts {
        primary: &'static str,
        hue: &'static str,
    },
    /// Counts of `column`, most frequent first.
    CategoryCounts { column: &'static str },
    /// A histogram of `column` with a fixed number of `bins`.
    Histogram {
        column: &'static str,
        bins: usize,
        colour: &'static str,
    },
}

/// One chart on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Panel {
    /// The HTML element ID for the chart container (kebab-case).
    pub id: &'static str,
    pub title: &'static str,
    pub kind: PanelKind,
}

pub(super) const CONDITION_BY_GENDER: Panel = Panel {
    id: "condition-by-gender-chart",
    title: "Mental Health Condition vs Gender",
    kind: PanelKind::GroupedCounts {
        primary: columns::GENDER,
        hue: columns::MENTAL_HEALTH_CONDITION,
    },
};

pub(super) const AGE_DISTRIBUTION: Panel = Panel {
    id: "age-chart",
    title: "Age Distribution",
    kind: PanelKind::Histogram {
        column: columns::AGE,
        bins: 20,
        colour: "teal",
    },
};

pub(super) const STRESS_LEVEL_DISTRIBUTION: Panel = Panel {
    id: "stress-level-chart",
    title: "Stress Level Distribution",
    kind: PanelKind::CategoryCounts {
        column: columns::STRESS_LEVEL,
    },
};

pub(super) const SLEEP_HOURS_DISTRIBUTION: Panel = Panel {
    id: "sleep-hours-chart",
    title: "Sleep Hours Distribution",
    kind: PanelKind::Histogram {
        column: columns::SLEEP_HOURS,
        bins: 15,
        colour: "purple",
    },
};

pub(super) const PHYSICAL_ACTIVITY_HOURS: Panel = Panel {
    id: "physical-activity-chart",
    title: "Physical Activity Hours",
    kind: PanelKind::Histogram {
        column: columns::PHYSICAL_ACTIVITY_HOURS,
        bins: 15,
        colour: "green",
    },
};

pub(super) const SOCIAL_MEDIA_USAGE: Panel = Panel {
    id: "social-media-chart",
    title: "Social Media Usage",
    kind: PanelKind::Histogram {
        column: columns::SOCIAL_MEDIA_USAGE,
        bins: 15,
        colour: "orange",
    },
};

/// A titled group of panels displayed side by side.
pub(super) struct PanelSection {
    /// The section heading, the first section has none.
    pub heading: Option<&'static str>,
    pub panels: [Panel; 2],
}

/// Every panel on the dashboard in display order.
pub(super) const PANEL_SECTIONS: [PanelSection; 3] = [
    PanelSection {
        heading: None,
        panels: [CONDITION_BY_GENDER, AGE_DISTRIBUTION],
    },
    PanelSection {
        heading: Some("Lifestyle and Work-Related Insights"),
        panels: [STRESS_LEVEL_DISTRIBUTION, SLEEP_HOURS_DISTRIBUTION],
    },
    PanelSection {
        heading: Some("Other Health & Lifestyle Factors"),
        panels: [PHYSICAL_ACTIVITY_HOURS, SOCIAL_MEDIA_USAGE],
    },
];

impl Panel {
    /// Compute the panel's statistics from `table` and build its chart.
    ///
    /// # Errors
    /// Returns [Error::MissingColumn] if a column the panel needs is not in
    /// `table`, or [Error::NonNumericValue] if a histogram column contains text.
    pub(super) fn build_chart(&self, table: &SurveyTable) -> Result<DashboardChart, Error> {
        let chart = match self.kind {
            PanelKind::GroupedCounts { primary, hue } => {
                let primary = table.categorical_column(primary)?;
                let hue = table.categorical_column(hue)?;
                grouped_count_chart(self.title, &grouped_counts(&primary, &hue))
            }
            PanelKind::CategoryCounts { column } => {
                let values = table.categorical_column(column)?;
                category_count_chart(self.title, &count_by_category(&values))
            }
            PanelKind::Histogram {
                column,
                bins,
                colour,
            } => {
                let values = table.numeric_column(column)?;
                histogram_chart(self.title, &Histogram::new(&values, bins), colour)
            }
        };

        Ok(DashboardChart::new(self.id, chart))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::{
        Error,
        survey::{
            columns,
            test_tables::{sample_survey, table_from},
        },
    };

    use super::{AGE_DISTRIBUTION, PANEL_SECTIONS, PanelKind, STRESS_LEVEL_DISTRIBUTION};

    #[test]
    fn there_are_six_panels_with_unique_ids() {
        let ids: HashSet<_> = PANEL_SECTIONS
            .iter()
            .flat_map(|section| section.panels.iter().map(|panel| panel.id))
            .collect();

        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn histogram_bin_counts_are_fixed() {
        let bins: Vec<usize> = PANEL_SECTIONS
            .iter()
            .flat_map(|section| section.panels.iter())
            .filter_map(|panel| match panel.kind {
                PanelKind::Histogram { bins, .. } => Some(bins),
                _ => None,
            })
            .collect();

        assert_eq!(bins, vec![20, 15, 15, 15]);
    }

    #[test]
    fn every_panel_builds_from_complete_table() {
        let table = sample_survey();

        for section in &PANEL_SECTIONS {
            for panel in &section.panels {
                let chart = panel.build_chart(&table);

                assert!(chart.is_ok(), "panel {} failed: {chart:?}", panel.id);
                assert_eq!(chart.unwrap().id, panel.id);
            }
        }
    }

    #[test]
    fn every_panel_builds_from_empty_table() {
        let table = sample_survey().with_rows(Vec::new());

        for section in &PANEL_SECTIONS {
            for panel in &section.panels {
                assert!(panel.build_chart(&table).is_ok(), "panel {} failed", panel.id);
            }
        }
    }

    #[test]
    fn missing_age_column_only_fails_age_panel() {
        let table = table_from(
            &[columns::COUNTRY, columns::STRESS_LEVEL, columns::SLEEP_HOURS],
            &[&["USA", "High", "7"], &["India", "Low", "6"]],
        );

        assert_eq!(
            AGE_DISTRIBUTION.build_chart(&table),
            Err(Error::MissingColumn(columns::AGE.to_owned()))
        );
        assert!(STRESS_LEVEL_DISTRIBUTION.build_chart(&table).is_ok());
    }

    #[test]
    fn text_in_numeric_column_fails_panel() {
        let table = table_from(&[columns::AGE], &[&["thirty"]]);

        assert!(matches!(
            AGE_DISTRIBUTION.build_chart(&table),
            Err(Error::NonNumericValue { .. })
        ));
    }
}
