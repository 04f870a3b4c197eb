use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "envgen", version, about)]
pub struct Args {
    /// Env file to read (default: `.env`, or `env_file` from envgen.toml)
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// Emit a dotenv bootstrap so the module loads the env file itself
    #[arg(short = 'd', long = "use-dotenv", default_value_t = false)]
    pub use_dotenv: bool,

    /// Treat numeric-looking values as plain strings
    #[arg(long, default_value_t = false)]
    pub no_infer_numbers: bool,

    /// Where to write the module (default: `config.ts` in the current directory)
    #[arg(short = 'o', long = "out")]
    pub out: Option<PathBuf>,

    /// Print the module to stdout instead of writing it
    #[arg(long, default_value_t = false)]
    pub stdout: bool,

    /// Path to envgen.toml (overrides ENVGEN_CONFIG and the default lookup)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long)]
    pub log_level: Option<String>,

    /// Shorthand for --log-level debug
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["envgen"]).unwrap();
        assert!(args.file.is_none());
        assert!(!args.use_dotenv);
        assert!(!args.no_infer_numbers);
        assert!(!args.stdout);
    }

    #[test]
    fn test_short_flags() {
        let args = Args::try_parse_from(["envgen", "-f", ".env.production", "-d", "-o", "out.ts"])
            .unwrap();
        assert_eq!(args.file.as_deref(), Some(".env.production"));
        assert!(args.use_dotenv);
        assert_eq!(args.out, Some(PathBuf::from("out.ts")));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Args::try_parse_from(["envgen", "-v", "-q"]).is_err());
    }
}
