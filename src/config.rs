use std::path::PathBuf;

/// Roster file looked up in the working directory when no path is given.
pub const DEFAULT_DATA_PATH: &str = "lotr_characters.csv";

/// A sidebar multiselect bound to one categorical column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub column: &'static str,
    pub label: &'static str,
}

/// A bar-chart section of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSpec {
    pub column: &'static str,
    pub heading: &'static str,
    pub title: &'static str,
}

pub const FILTER_COLUMNS: &[FilterSpec] = &[
    FilterSpec {
        column: "race",
        label: "Filter by Race",
    },
    FilterSpec {
        column: "gender",
        label: "Filter by Gender",
    },
    FilterSpec {
        column: "realm",
        label: "Filter by Realm",
    },
];

pub const CHART_SECTIONS: &[ChartSpec] = &[
    ChartSpec {
        column: "gender",
        heading: "Gender Distribution",
        title: "Gender Distribution in Middle-Earth",
    },
    ChartSpec {
        column: "hair",
        heading: "Hair Distribution",
        title: "Hair Colors of Middle-Earth",
    },
    ChartSpec {
        column: "race",
        heading: "Race Distribution",
        title: "Race Distribution in Middle-Earth",
    },
    ChartSpec {
        column: "realm",
        heading: "Realm Distribution",
        title: "Realms of Middle-Earth",
    },
];

/// Startup configuration.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// File loaded at startup.
    pub data_path: PathBuf,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Height of each bar chart, in points.
    pub chart_height: f32,
    pub filters: &'static [FilterSpec],
    pub charts: &'static [ChartSpec],
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            window_size: [1200.0, 900.0],
            min_window_size: [600.0, 400.0],
            chart_height: 500.0,
            filters: FILTER_COLUMNS,
            charts: CHART_SECTIONS,
        }
    }
}

impl ExplorerConfig {
    /// Build from process arguments (program name already skipped).
    /// The first argument, if any, replaces the data path.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = args.next() {
            config.data_path = PathBuf::from(path);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_without_arguments() {
        let config = ExplorerConfig::from_args(std::iter::empty());
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.charts.len(), 4);
    }

    #[test]
    fn first_argument_overrides_path() {
        let args = ["roster.parquet".to_string(), "ignored".to_string()];
        let config = ExplorerConfig::from_args(args.into_iter());
        assert_eq!(config.data_path, PathBuf::from("roster.parquet"));
    }
}
