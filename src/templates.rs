use minijinja::Environment;
use serde_json::json;

use crate::error::GenerateError;

pub const DEFAULT_ENV_PATH: &str = ".env";

const SCHEMA_PACKAGE: &str = "zod";
const LOADER_PACKAGE: &str = "dotenv";

const MODULE_TEMPLATE: &str = r#"import { z } from "zod";
{% if loader %}
import { config as dotenvConfig } from "dotenv";

{% if loader.path %}
dotenvConfig({ path: {{ loader.path | tojson }} });
{% else %}
dotenvConfig();
{% endif %}
{% endif %}

const envSchema = {{ schema }};

const config = envSchema.parse(process.env);

export default config;
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOptions {
    /// Path handed to the loader bootstrap when it is not the default `.env`.
    pub env_file_path: String,
    pub use_env_loader: bool,
}

impl Default for ModuleOptions {
    fn default() -> Self {
        Self {
            env_file_path: DEFAULT_ENV_PATH.to_string(),
            use_env_loader: false,
        }
    }
}

impl ModuleOptions {
    /// Runtime packages the generated module imports.
    pub fn required_packages(&self) -> Vec<&'static str> {
        let mut pkgs = vec![SCHEMA_PACKAGE];
        if self.use_env_loader {
            pkgs.push(LOADER_PACKAGE);
        }
        pkgs
    }

    fn loader_path(&self) -> Option<&str> {
        let p = self.env_file_path.as_str();
        if p == DEFAULT_ENV_PATH || p.strip_prefix("./") == Some(DEFAULT_ENV_PATH) {
            None
        } else {
            Some(p)
        }
    }
}

/// Wrap a rendered schema expression into a complete `config.ts` module.
pub fn generate_module(schema: &str, opts: &ModuleOptions) -> Result<String, GenerateError> {
    let loader = opts
        .use_env_loader
        .then(|| json!({ "path": opts.loader_path() }));

    let ctx = json!({
        "schema": schema,
        "loader": loader,
    });

    render_minijinja(MODULE_TEMPLATE, &ctx)
}

fn render_minijinja(source: &str, ctx_json: &serde_json::Value) -> Result<String, GenerateError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);

    // Produces a JS string literal like ".env.production", with proper escaping.
    env.add_filter("tojson", |s: String| -> Result<String, minijinja::Error> {
        serde_json::to_string(&s).map_err(|e| {
            minijinja::Error::new(minijinja::ErrorKind::InvalidOperation, e.to_string())
        })
    });

    env.add_template("module", source)?;
    let tpl = env.get_template("module")?;
    let v = minijinja::value::Value::from_serialize(ctx_json);
    Ok(tpl.render(v)?)
}
