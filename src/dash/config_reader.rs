use crate::dash::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct TableSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    // Only for the xlsx provider
    #[serde(rename = "worksheetName")]
    pub worksheet_name: Option<String>,
}

impl TableSource {
    /// A source given on the command line. The provider follows the extension.
    pub fn from_path(path: &str) -> TableSource {
        let provider = if path.to_lowercase().ends_with(".xlsx") {
            "xlsx"
        } else {
            "csv"
        };
        TableSource {
            provider: provider.to_string(),
            file_path: path.to_string(),
            worksheet_name: None,
        }
    }

    pub fn resolved(&self, root: &Path) -> TableSource {
        TableSource {
            file_path: resolve_path(root, &self.file_path),
            ..self.clone()
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DataSources {
    pub mpi: TableSource,
    pub detailed: TableSource,
    pub boundaries: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct MapSettings {
    pub colors: Option<Vec<String>>,
    #[serde(rename = "noDataColor")]
    pub no_data_color: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DashConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
    #[serde(rename = "dataSources")]
    pub data_sources: DataSources,
    #[serde(rename = "excludedYears")]
    pub excluded_years: Option<Vec<Year>>,
    pub map: Option<MapSettings>,
}

impl DashConfig {
    /// The settings of the dashboard. Everything left out keeps its default value.
    pub fn settings(&self) -> DashResult<DashboardSettings> {
        let mut settings = DashboardSettings::default();
        if let Some(os) = &self.output_settings {
            if let Some(title) = &os.title {
                settings.title = title.clone();
            }
            if let Some(subtitle) = &os.subtitle {
                settings.subtitle = subtitle.clone();
            }
        }
        if let Some(years) = &self.excluded_years {
            settings.excluded_years = years.clone();
        }
        if let Some(map) = &self.map {
            if let Some(colors) = &map.colors {
                if colors.is_empty() {
                    whatever!("map.colors must contain at least one color")
                }
                settings.colors = colors.clone();
            }
            if let Some(c) = &map.no_data_color {
                settings.no_data_color = c.clone();
            }
        }
        Ok(settings)
    }

    pub fn output_directory(&self) -> Option<String> {
        self.output_settings
            .as_ref()
            .and_then(|os| os.output_directory.clone())
    }
}

pub fn read_config(path: &str) -> DashResult<DashConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: DashConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> DashResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_keeps_defaults() {
        let config: DashConfig = serde_json::from_str(
            r#"{
                "dataSources": {
                    "mpi": { "provider": "csv", "filePath": "MPI Data.csv" },
                    "detailed": { "provider": "xlsx", "filePath": "detailed.xlsx", "worksheetName": "Data" }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.settings().unwrap(), DashboardSettings::default());
        assert_eq!(config.output_directory(), None);
        assert_eq!(config.data_sources.boundaries, None);
        assert_eq!(
            config.data_sources.detailed.worksheet_name,
            Some("Data".to_string())
        );
    }

    #[test]
    fn settings_override_defaults() {
        let config: DashConfig = serde_json::from_str(
            r##"{
                "outputSettings": { "title": "MPI", "outputDirectory": "out" },
                "dataSources": {
                    "mpi": { "provider": "csv", "filePath": "a.csv" },
                    "detailed": { "provider": "csv", "filePath": "b.csv" },
                    "boundaries": "world.geojson"
                },
                "excludedYears": [],
                "map": { "colors": ["#fff", "#000"], "noDataColor": "grey" }
            }"##,
        )
        .unwrap();
        let settings = config.settings().unwrap();
        assert_eq!(settings.title, "MPI");
        assert_eq!(settings.subtitle, DEFAULT_SUBTITLE);
        assert!(settings.excluded_years.is_empty());
        assert_eq!(settings.colors, vec!["#fff", "#000"]);
        assert_eq!(settings.no_data_color, "grey");
        assert_eq!(config.output_directory(), Some("out".to_string()));
    }

    #[test]
    fn empty_color_list_is_rejected() {
        let config: DashConfig = serde_json::from_str(
            r#"{
                "dataSources": {
                    "mpi": { "provider": "csv", "filePath": "a.csv" },
                    "detailed": { "provider": "csv", "filePath": "b.csv" }
                },
                "map": { "colors": [] }
            }"#,
        )
        .unwrap();
        assert!(config.settings().is_err());
    }

    #[test]
    fn providers_follow_the_extension() {
        assert_eq!(TableSource::from_path("data/MPI.XLSX").provider, "xlsx");
        assert_eq!(TableSource::from_path("data/MPI Data.csv").provider, "csv");
        let s = TableSource::from_path("MPI Data.csv").resolved(Path::new("/data"));
        assert_eq!(s.file_path, "/data/MPI Data.csv");
    }
}
