use std::path::PathBuf;

use clap::Parser;

/// Completion-settings: edit the OpenAI connection used for text completion
#[derive(Parser, Debug, Clone)]
#[command(name = "completion-settings")]
#[command(author = "RidgetopAI")]
#[command(version)]
#[command(about = "Terminal editor for OpenAI completion settings", long_about = None)]
pub struct Cli {
    /// Start in edit mode instead of the read-only summary
    #[arg(short, long, default_value_t = false)]
    pub edit: bool,

    /// Directory holding openai.toml and theme.toml.
    /// Defaults to the platform config dir.
    #[arg(short = 'c', long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// API key for OpenAI. Overrides the stored key for this run.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Built-in theme for this run (default, dark, vibrant). Overrides theme.toml.
    #[arg(long, value_name = "NAME")]
    pub theme: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log file path. Defaults to completion-settings.log in the temp dir.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["completion-settings"]);
        assert!(!cli.edit);
        assert!(cli.config_dir.is_none());
        assert!(cli.log_file.is_none());
        assert!(cli.theme.is_none());
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_edit_flag() {
        let cli = Cli::parse_from(["completion-settings", "--edit"]);
        assert!(cli.edit);
        let cli = Cli::parse_from(["completion-settings", "-e"]);
        assert!(cli.edit);
    }

    #[test]
    fn test_config_dir_flag() {
        let cli = Cli::parse_from(["completion-settings", "-c", "/tmp/test"]);
        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/test")));
    }

    #[test]
    fn test_theme_flag() {
        let cli = Cli::parse_from(["completion-settings", "--theme", "vibrant"]);
        assert_eq!(cli.theme.as_deref(), Some("vibrant"));
    }

    #[test]
    fn test_api_key_flag() {
        let cli = Cli::parse_from(["completion-settings", "--api-key", "sk-test"]);
        assert_eq!(cli.api_key, Some("sk-test".to_string()));
    }
}
