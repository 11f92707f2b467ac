mod manager;

pub use manager::{
    ApiConfig, ConfigFile, ConfigManager, ResolveOptions, ResolvedConfig, YtrConfig,
    resolve_config,
};
