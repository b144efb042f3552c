//! Descriptive statistics for the dashboard panels.
//!
//! Provides category counts, counts grouped by a second category, binned
//! histograms and a Gaussian kernel density estimate for the histogram
//! overlays.

use std::collections::HashMap;

use crate::survey::table::is_missing;

/// How many times a category occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Counts each category in `values`, most frequent first.
///
/// Categories with the same count keep the order in which they first appear.
/// Blank and "NaN" values are not counted.
pub fn count_by_category(values: &[&str]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for value in values.iter().filter(|value| !is_missing(value)) {
        match positions.get(value) {
            Some(&position) => counts[position].count += 1,
            None => {
                positions.insert(*value, counts.len());
                counts.push(CategoryCount {
                    category: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort, so ties stay in order of first appearance.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Counts of a primary category broken down by a secondary (hue) category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedCounts {
    /// The primary categories in order of first appearance.
    pub categories: Vec<String>,
    /// One entry per hue group in order of first appearance. Each entry has a
    /// count for every primary category, in the same order as `categories`.
    pub groups: Vec<(String, Vec<usize>)>,
}

/// Counts each pair of values from `primary` and `hue`.
///
/// `primary` and `hue` are two columns of the same table, so they are expected
/// to have the same length. Extra values in the longer slice are ignored, as
/// are pairs where either value is blank or "NaN".
pub fn grouped_counts(primary: &[&str], hue: &[&str]) -> GroupedCounts {
    let mut categories: Vec<String> = Vec::new();
    let mut category_positions: HashMap<&str, usize> = HashMap::new();
    let mut group_names: Vec<String> = Vec::new();
    let mut group_positions: HashMap<&str, usize> = HashMap::new();
    let mut pairs: HashMap<(usize, usize), usize> = HashMap::new();

    for (category, group) in primary
        .iter()
        .zip(hue)
        .filter(|(category, group)| !is_missing(category) && !is_missing(group))
    {
        let category_position = *category_positions.entry(*category).or_insert_with(|| {
            categories.push(category.to_string());
            categories.len() - 1
        });
        let group_position = *group_positions.entry(*group).or_insert_with(|| {
            group_names.push(group.to_string());
            group_names.len() - 1
        });

        *pairs.entry((group_position, category_position)).or_insert(0) += 1;
    }

    let groups = group_names
        .into_iter()
        .enumerate()
        .map(|(group_position, name)| {
            let counts = (0..categories.len())
                .map(|category_position| {
                    pairs
                        .get(&(group_position, category_position))
                        .copied()
                        .unwrap_or(0)
                })
                .collect();

            (name, counts)
        })
        .collect();

    GroupedCounts { categories, groups }
}

/// A frequency distribution over equal-width bins.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// The left edge of the first bin.
    pub start: f64,
    /// The width of every bin.
    pub bin_width: f64,
    /// The number of values in each bin.
    pub counts: Vec<usize>,
    values: Vec<f64>,
}

impl Histogram {
    /// Split `values` into `bins` equal-width bins spanning the range of the
    /// values.
    ///
    /// Every bin is closed on the left, the last bin is also closed on the
    /// right so the largest value is counted. If all values are equal the
    /// range is widened by 0.5 either side, and if there are no values the
    /// range is 0 to 1. There are always exactly `bins` bins (at least one).
    pub fn new(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);

        let (start, end) = match min_max(values) {
            None => (0.0, 1.0),
            Some((min, max)) if min == max => (min - 0.5, max + 0.5),
            Some(range) => range,
        };
        let bin_width = (end - start) / bins as f64;

        let mut counts = vec![0; bins];

        for value in values {
            let bin = ((value - start) / bin_width).floor() as usize;
            counts[bin.min(bins - 1)] += 1;
        }

        Self {
            start,
            bin_width,
            counts,
            values: values.to_vec(),
        }
    }

    /// The left and right edge of each bin.
    pub fn bin_edges(&self) -> Vec<(f64, f64)> {
        (0..self.counts.len())
            .map(|bin| {
                let left = self.start + bin as f64 * self.bin_width;
                (left, left + self.bin_width)
            })
            .collect()
    }

    /// The middle of each bin.
    pub fn bin_centres(&self) -> Vec<f64> {
        self.bin_edges()
            .into_iter()
            .map(|(left, right)| (left + right) / 2.0)
            .collect()
    }

    /// The total number of values in the histogram.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// A smoothed version of the histogram at each bin centre.
    ///
    /// The kernel density estimate is scaled from a probability density to
    /// counts so that it lines up with the bars. Returns `None` when a density
    /// cannot be estimated, see [kernel_density].
    pub fn density_overlay(&self) -> Option<Vec<f64>> {
        let centres = self.bin_centres();
        let scale = self.values.len() as f64 * self.bin_width;

        kernel_density(&self.values, &centres)
            .map(|densities| densities.into_iter().map(|d| d * scale).collect())
    }
}

/// Estimate the probability density of `values` at each of `points`.
///
/// Uses a Gaussian kernel with the bandwidth from Scott's rule, i.e., the
/// sample standard deviation times `n^(-1/5)`.
///
/// Returns `None` if there are fewer than two values or all values are equal,
/// since the bandwidth would be zero.
pub fn kernel_density(values: &[f64], points: &[f64]) -> Option<Vec<f64>> {
    let n = values.len();

    if n < 2 {
        return None;
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let bandwidth = variance.sqrt() * (n as f64).powf(-0.2);

    if bandwidth <= 0.0 || !bandwidth.is_finite() {
        return None;
    }

    let normalisation = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());

    Some(
        points
            .iter()
            .map(|point| {
                values
                    .iter()
                    .map(|value| (-0.5 * ((point - value) / bandwidth).powi(2)).exp())
                    .sum::<f64>()
                    * normalisation
            })
            .collect(),
    )
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |range, &value| match range {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::survey::{columns, filter_by_country, test_tables::sample_survey};

    use super::{
        CategoryCount, GroupedCounts, Histogram, count_by_category, grouped_counts,
        kernel_density,
    };

    fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
        let step = (end - start) / (count - 1) as f64;
        (0..count).map(|i| start + step * i as f64).collect()
    }

    fn count(category: &str, count: usize) -> CategoryCount {
        CategoryCount {
            category: category.to_owned(),
            count,
        }
    }

    #[test]
    fn count_by_category_orders_by_descending_count() {
        let values = ["Low", "High", "Medium", "High", "Medium", "High"];

        assert_eq!(
            count_by_category(&values),
            vec![count("High", 3), count("Medium", 2), count("Low", 1)]
        );
    }

    #[test]
    fn count_by_category_breaks_ties_by_first_appearance() {
        let values = ["Medium", "Low", "Low", "Medium", "High"];

        assert_eq!(
            count_by_category(&values),
            vec![count("Medium", 2), count("Low", 2), count("High", 1)]
        );
    }

    #[test]
    fn count_by_category_handles_empty_input() {
        assert!(count_by_category(&[]).is_empty());
    }

    #[test]
    fn counts_over_an_empty_selection_are_zero() {
        let table = filter_by_country(&sample_survey(), &HashSet::new()).unwrap();

        let stress = table.categorical_column(columns::STRESS_LEVEL).unwrap();
        let gender = table.categorical_column(columns::GENDER).unwrap();
        let condition = table
            .categorical_column(columns::MENTAL_HEALTH_CONDITION)
            .unwrap();

        let stress_total: usize = count_by_category(&stress).iter().map(|c| c.count).sum();
        let grouped_total: usize = grouped_counts(&gender, &condition)
            .groups
            .iter()
            .flat_map(|(_, counts)| counts.iter())
            .sum();

        assert_eq!(stress_total, 0);
        assert_eq!(grouped_total, 0);
    }

    #[test]
    fn count_by_category_skips_blank_values() {
        let values = ["High", "", "Low", "  ", "NaN", "High"];

        assert_eq!(
            count_by_category(&values),
            vec![count("High", 2), count("Low", 1)]
        );
    }

    #[test]
    fn grouped_counts_skips_pairs_with_blank_values() {
        let gender = ["Male", "", "Female", "Male"];
        let condition = ["Yes", "No", "", "No"];

        let counts = grouped_counts(&gender, &condition);

        assert_eq!(
            counts,
            GroupedCounts {
                categories: vec!["Male".to_owned()],
                groups: vec![("Yes".to_owned(), vec![1]), ("No".to_owned(), vec![1])],
            }
        );
    }

    #[test]
    fn grouped_counts_fills_in_missing_pairs() {
        let gender = ["Male", "Female", "Male", "Non-binary"];
        let condition = ["Yes", "No", "No", "Yes"];

        let counts = grouped_counts(&gender, &condition);

        assert_eq!(
            counts,
            GroupedCounts {
                categories: vec![
                    "Male".to_owned(),
                    "Female".to_owned(),
                    "Non-binary".to_owned()
                ],
                groups: vec![
                    ("Yes".to_owned(), vec![1, 0, 1]),
                    ("No".to_owned(), vec![1, 1, 0]),
                ],
            }
        );
    }

    #[test]
    fn grouped_counts_handles_empty_input() {
        let counts = grouped_counts(&[], &[]);

        assert!(counts.categories.is_empty());
        assert!(counts.groups.is_empty());
    }

    #[test]
    fn histogram_has_fixed_number_of_bins() {
        let inputs: [&[f64]; 4] = [&[], &[3.0], &[1.0, 2.0, 3.0], &[0.5, 100.0, 42.0, 7.0, 7.0]];

        for values in inputs {
            for bins in [15, 20] {
                let histogram = Histogram::new(values, bins);

                assert_eq!(histogram.counts.len(), bins, "values: {values:?}");
                assert_eq!(histogram.bin_edges().len(), bins);
                assert_eq!(histogram.total(), values.len());
            }
        }
    }

    #[test]
    fn histogram_spans_value_range() {
        let histogram = Histogram::new(&[0.0, 2.0, 10.0], 5);

        assert_eq!(histogram.start, 0.0);
        assert_eq!(histogram.bin_width, 2.0);
        // 2.0 is the left edge of the second bin, 10.0 belongs in the last bin.
        assert_eq!(histogram.counts, vec![1, 1, 0, 0, 1]);
    }

    #[test]
    fn histogram_of_equal_values_is_centred_on_the_value() {
        let histogram = Histogram::new(&[4.0, 4.0], 2);

        assert_eq!(histogram.bin_edges(), vec![(3.5, 4.0), (4.0, 4.5)]);
        assert_eq!(histogram.counts, vec![0, 2]);
    }

    #[test]
    fn histogram_of_no_values_covers_unit_range() {
        let histogram = Histogram::new(&[], 4);

        assert_eq!(histogram.start, 0.0);
        assert_eq!(histogram.bin_width, 0.25);
        assert_eq!(histogram.counts, vec![0; 4]);
        assert_eq!(histogram.density_overlay(), None);
    }

    #[test]
    fn kernel_density_needs_spread() {
        assert_eq!(kernel_density(&[], &[0.0]), None);
        assert_eq!(kernel_density(&[1.0], &[0.0]), None);
        assert_eq!(kernel_density(&[2.0, 2.0, 2.0], &[2.0]), None);
    }

    #[test]
    fn kernel_density_is_a_probability_density() {
        let values = [1.0, 2.0, 2.5, 3.0, 7.0];
        let points = linspace(-20.0, 30.0, 5001);
        let step = points[1] - points[0];

        let densities = kernel_density(&values, &points).unwrap();
        let area: f64 = densities.iter().sum::<f64>() * step;

        assert!(densities.iter().all(|density| *density >= 0.0));
        assert!((area - 1.0).abs() < 1e-3, "area under curve was {area}");
    }

    #[test]
    fn density_overlay_matches_bins() {
        let values: Vec<f64> = (0..100).map(|i| (i % 17) as f64).collect();
        let histogram = Histogram::new(&values, 15);

        let overlay = histogram.density_overlay().unwrap();

        assert_eq!(overlay.len(), 15);
        assert!(overlay.iter().all(|count| *count > 0.0));
    }
}
