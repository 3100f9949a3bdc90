use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use infrastructure::MonitoringConfig;
use serde::Deserialize;

use crate::core::operator::OperatorRegistry;
use crate::core::planner::DEFAULT_MAX_SEARCH_DEPTH;
use crate::painting::RobotPainting;
use crate::tool::PlanningTools;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub monitoring: MonitoringConfig,
    pub planner: PlannerSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("TUTOR")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("monitoring.logs.filters")
                    .try_parsing(true),
            );

        let s = builder.build()?;
        s.try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    pub max_search_depth: usize,
    pub operator_table: Option<PathBuf>,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            max_search_depth: DEFAULT_MAX_SEARCH_DEPTH,
            operator_table: None,
        }
    }
}

impl PlannerSettings {
    pub fn new_tools(&self) -> anyhow::Result<PlanningTools<RobotPainting>> {
        let operators = match &self.operator_table {
            Some(path) => OperatorRegistry::load(&RobotPainting, path)?,
            None => RobotPainting::default_operators()?,
        };

        Ok(PlanningTools::new(RobotPainting, operators).with_max_search_depth(self.max_search_depth))
    }
}
