use anyhow::{Context as _, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::{
    classify::InferenceOptions,
    cli::Args,
    config::{locate_config, Config},
    env_file::read_env_file,
    error::GenerateError,
    schema::{describe_fields, FieldDescriptor},
    templates::{generate_module, ModuleOptions, DEFAULT_ENV_PATH},
};

pub const DEFAULT_OUTPUT: &str = "config.ts";

/// Effective settings after merging CLI flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub env_file: String,
    pub output: PathBuf,
    pub to_stdout: bool,
    pub inference: InferenceOptions,
    pub use_env_loader: bool,
}

impl Settings {
    pub fn resolve(args: &Args, cfg: &Config) -> Self {
        let c = &cfg.envgen;
        Self {
            env_file: args
                .file
                .clone()
                .or_else(|| c.env_file.clone())
                .unwrap_or_else(|| DEFAULT_ENV_PATH.to_string()),
            output: args
                .out
                .clone()
                .or_else(|| c.output.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            to_stdout: args.stdout,
            inference: InferenceOptions {
                infer_numbers: !args.no_infer_numbers && c.infer_numbers.unwrap_or(true),
            },
            use_env_loader: args.use_dotenv || c.use_env_loader.unwrap_or(false),
        }
    }

    pub fn module_options(&self) -> ModuleOptions {
        ModuleOptions {
            env_file_path: self.env_file.clone(),
            use_env_loader: self.use_env_loader,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    /// `None` when the module went to stdout.
    pub output: Option<PathBuf>,
    pub module: String,
    pub fields: Vec<FieldDescriptor>,
    pub packages: Vec<&'static str>,
}

/// Read the env file, infer the schema and write the config module.
/// Relative paths resolve against `cwd`. With `--stdout` the caller prints
/// `RunReport::module`.
pub fn run(args: &Args, cwd: &Path) -> Result<RunReport> {
    let cfg = match locate_config(args.config.as_deref(), cwd)? {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            Config::load_from_path(&path)?
        }
        None => Config::default(),
    };

    let settings = Settings::resolve(args, &cfg);
    debug!(?settings, "resolved settings");

    let report = generate(&settings, cwd).with_context(|| {
        format!(
            "failed to generate {} from {}",
            settings.output.display(),
            settings.env_file
        )
    })?;

    if let Some(path) = &report.output {
        info!("{} file has been created successfully.", path.display());
    }

    info!(
        "the generated module needs these packages: {}",
        report.packages.join(", ")
    );

    Ok(report)
}

pub fn generate(settings: &Settings, cwd: &Path) -> Result<RunReport> {
    let env_path = cwd.join(&settings.env_file);
    let env = read_env_file(&env_path)?;

    let builder = describe_fields(&env, &settings.inference);
    for f in builder.fields() {
        debug!(key = %f.key, kind = %f.kind, "classified");
    }
    let fields = builder.fields().to_vec();
    let schema = builder.finish();

    let opts = settings.module_options();
    let module = generate_module(&schema, &opts)?;

    let output = if settings.to_stdout {
        None
    } else {
        let out_path = cwd.join(&settings.output);
        write_module(&out_path, &module)?;
        Some(out_path)
    };

    Ok(RunReport {
        output,
        module,
        fields,
        packages: opts.required_packages(),
    })
}

/// Overwrites an existing file without asking.
fn write_module(path: &Path, text: &str) -> Result<(), GenerateError> {
    fs::write(path, text).map_err(|source| GenerateError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}
