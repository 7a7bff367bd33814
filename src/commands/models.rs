use crate::utils::config::IscConfig;
use std::path::PathBuf;

/// Arguments for the compute command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ComputeArgs {
    /// Fixation table (CSV)
    pub input: PathBuf,

    /// Output path for the ISC table (CSV)
    pub output_csv: PathBuf,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Engine settings
    pub config: IscConfig,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for ComputeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("ALL_fixations.csv"),
            output_csv: PathBuf::from("frame_level_eye_ISC.csv"),
            output_json: None,
            config: IscConfig::default(),
            print_summary: false,
        }
    }
}
