/// Year ranges used to color markers.
///
/// This one table drives both marker classification and the legend rows.
/// Buckets are ordered newest first; a record falls into the first bucket
/// whose lower bound it meets. The last bucket has no lower bound and
/// catches everything older.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodBucket {
    pub lower_bound: Option<i32>,
    pub color: &'static str,
    pub label: &'static str,
}

impl PeriodBucket {
    pub fn contains(&self, year: i32) -> bool {
        self.lower_bound.map_or(true, |lb| year >= lb)
    }
}

pub static PERIODS: [PeriodBucket; 5] = [
    PeriodBucket {
        lower_bound: Some(2025),
        color: "#e63946",
        label: "2025\u{2013}2026",
    },
    PeriodBucket {
        lower_bound: Some(2022),
        color: "#457b9d",
        label: "2022\u{2013}2024",
    },
    PeriodBucket {
        lower_bound: Some(2018),
        color: "#2a9d8f",
        label: "2018\u{2013}2021",
    },
    PeriodBucket {
        lower_bound: Some(2014),
        color: "#e9c46a",
        label: "2014\u{2013}2017",
    },
    PeriodBucket {
        lower_bound: None,
        color: "#8d99ae",
        label: "2011\u{2013}2013",
    },
];

/// Find the bucket a year belongs to.
pub fn classify(year: i32) -> &'static PeriodBucket {
    PERIODS
        .iter()
        .find(|bucket| bucket.contains(year))
        .unwrap_or(&PERIODS[PERIODS.len() - 1])
}

/// Marker fill color for a year.
pub fn color_for_year(year: i32) -> &'static str {
    classify(year).color
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(color_for_year(2030), "#e63946");
        assert_eq!(color_for_year(2025), "#e63946");
        assert_eq!(color_for_year(2024), "#457b9d");
        assert_eq!(color_for_year(2022), "#457b9d");
        assert_eq!(color_for_year(2021), "#2a9d8f");
        assert_eq!(color_for_year(2018), "#2a9d8f");
        assert_eq!(color_for_year(2017), "#e9c46a");
        assert_eq!(color_for_year(2014), "#e9c46a");
        assert_eq!(color_for_year(2013), "#8d99ae");
        assert_eq!(color_for_year(1900), "#8d99ae");
    }

    #[test]
    fn test_every_year_maps_to_a_palette_color() {
        let palette: Vec<&str> = PERIODS.iter().map(|b| b.color).collect();
        for year in 1990..=2040 {
            assert!(palette.contains(&color_for_year(year)));
        }
    }

    #[test]
    fn test_step_function_is_monotonic() {
        // Walking forward in time never moves to an older bucket.
        let index = |y: i32| PERIODS.iter().position(|b| b == classify(y)).unwrap();
        for year in 2000..2040 {
            assert!(index(year + 1) <= index(year));
        }
    }

    #[test]
    fn test_only_last_bucket_is_open() {
        let (last, rest) = PERIODS.split_last().unwrap();
        assert!(last.lower_bound.is_none());
        assert!(rest.iter().all(|b| b.lower_bound.is_some()));
        assert!(rest
            .windows(2)
            .all(|w| w[0].lower_bound > w[1].lower_bound));
    }

    #[test]
    fn test_2025_matches_newest_label() {
        assert_eq!(classify(2025).label, "2025\u{2013}2026");
    }
}
