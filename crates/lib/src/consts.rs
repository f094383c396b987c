pub const APP_NAME: &str = "blacksmith";

/// Name of the logs directory created under the output directory when none is configured.
pub const LOGS_DIR_NAME: &str = "logs";

/// Name of the output directory created under the data directory by the CLI.
pub const OUTPUT_DIR_NAME: &str = "output";
