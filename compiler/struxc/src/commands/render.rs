//! `strux render`: process a template file.

use std::path::PathBuf;

use strux_template::Template;
use tracing::debug;

use super::{read_data, read_json, write_json, CliError};

/// Options for `strux render`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub template: PathBuf,
    pub data: Option<PathBuf>,
    /// `-I` directories followed by `STRUX_PATH` entries.
    pub include_paths: Vec<PathBuf>,
    pub pretty: bool,
}

/// Parse the arguments after `render`.
///
/// `env_paths` is the raw value of `STRUX_PATH`, if set.
pub fn parse_render_options(
    args: &[String],
    env_paths: Option<&std::ffi::OsStr>,
) -> Result<RenderOptions, CliError> {
    let mut options = RenderOptions::default();
    let mut positional = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if arg == "-I" {
            let Some(dir) = args.get(i + 1) else {
                return Err(CliError::Usage("-I needs a directory".to_string()));
            };
            options.include_paths.push(PathBuf::from(dir));
            i += 2;
            continue;
        }
        if let Some(dir) = arg.strip_prefix("-I") {
            options.include_paths.push(PathBuf::from(dir));
        } else if arg == "--pretty" || arg == "-p" {
            options.pretty = true;
        } else if arg.starts_with('-') {
            return Err(CliError::Usage(format!("unknown option '{arg}'")));
        } else {
            positional.push(PathBuf::from(arg));
        }
        i += 1;
    }

    if let Some(paths) = env_paths {
        options.include_paths.extend(std::env::split_paths(paths));
    }

    let mut positional = positional.into_iter();
    let Some(template) = positional.next() else {
        return Err(CliError::Usage("missing template file".to_string()));
    };
    options.template = template;
    options.data = positional.next();
    if let Some(extra) = positional.next() {
        return Err(CliError::Usage(format!(
            "unexpected argument '{}'",
            extra.display()
        )));
    }
    Ok(options)
}

/// Render the template and return its JSON text.
pub fn render(options: &RenderOptions) -> Result<String, CliError> {
    let template = read_json(&options.template)?;
    let data = read_data(options.data.as_deref())?;

    let engine = Template::builder()
        .include_paths(options.include_paths.iter().cloned())
        .build();
    debug!(
        template = %options.template.display(),
        includes = engine.include_paths().len(),
        "render"
    );
    let out = engine.process(&template, &data)?;
    write_json(&out, options.pretty)
}
