#![deny(missing_docs)]

//! # Generate Command
//!
//! Manifest in, OpenAPI document out.
//!
//! 1. **Load**: Reads `custom.documentation` and `functions` from the manifest.
//! 2. **Generate**: Runs the core; resolution and request model errors abort here.
//! 3. **Report**: Prints the validation report. Failures never change the exit status.
//! 4. **Write**: Serializes as YAML or JSON and writes the output file.

use crate::error::{CliError, CliResult};
use crate::manifest::{resolution_root, Manifest};
use crate::report;
use oasgen_core::Definition;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

const YAML_INDENT: usize = 2;

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the service manifest.
    #[clap(long, short = 'c', env = "OASGEN_CONFIG", default_value = "serverless.yml")]
    pub config: PathBuf,

    /// Output file. Defaults to `openapi.yml` or `openapi.json` by format.
    #[clap(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Output format.
    #[clap(long, short = 'f', value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Indentation width.
    #[clap(long, short = 'i', default_value_t = 2)]
    pub indent: usize,
}

/// Serialization format of the written document.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// YAML document.
    Yaml,
    /// JSON document.
    Json,
}

impl OutputFormat {
    /// File written when no `--output` is given.
    pub fn default_file(self) -> &'static str {
        match self {
            OutputFormat::Yaml => "openapi.yml",
            OutputFormat::Json => "openapi.json",
        }
    }
}

/// Executes the generate command, returning the written path.
pub async fn execute(args: &GenerateArgs) -> CliResult<PathBuf> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(args.format.default_file()));
    info!(
        format = ?args.format,
        output = ?output,
        indent = args.indent,
        "Generating OpenAPI v3 documentation"
    );

    let manifest = Manifest::load(&args.config)?;
    let functions = manifest.functions();
    let generated = oasgen_core::generate(
        manifest.documentation()?,
        &functions,
        resolution_root(&args.config),
    )
    .await?;

    report::print(&generated.report);

    let text = render(&generated.definition, args.format, args.indent)?;
    fs::write(&output, text)?;
    info!(output = ?output, "Wrote OpenAPI document");
    Ok(output)
}

/// Serializes the definition in the requested format.
pub fn render(definition: &Definition, format: OutputFormat, indent: usize) -> CliResult<String> {
    match format {
        OutputFormat::Json => {
            let indent = " ".repeat(indent);
            let mut buf = Vec::new();
            let mut serializer = serde_json::Serializer::with_formatter(
                &mut buf,
                PrettyFormatter::with_indent(indent.as_bytes()),
            );
            definition.serialize(&mut serializer)?;
            buf.push(b'\n');
            String::from_utf8(buf).map_err(|e| CliError::General(e.to_string()))
        }
        OutputFormat::Yaml => {
            let text = serde_yaml::to_string(definition)?;
            if indent < YAML_INDENT {
                warn!(indent, "YAML indentation below two spaces, using two");
                return Ok(text);
            }
            if indent == YAML_INDENT {
                return Ok(text);
            }
            Ok(reindent_yaml(&text, indent))
        }
    }
}

/// Re-indents block YAML emitted with two-space indentation.
///
/// The emitter writes sequences flush with their parent key and never folds
/// long scalars, so every structural line starts on a multiple of two.
/// Literal block contents move with their parent and are otherwise copied.
fn reindent_yaml(text: &str, indent: usize) -> String {
    let scale = |column: usize| column / YAML_INDENT * indent + column % YAML_INDENT;
    let mut out = String::with_capacity(text.len() * 2);
    // (original content column, new content column) of an open block scalar
    let mut block: Option<(usize, usize)> = None;

    for line in text.split_inclusive('\n') {
        let body = line.trim_end_matches('\n');
        let lead = body.len() - body.trim_start_matches(' ').len();

        if let Some((base, new_base)) = block {
            if body.is_empty() {
                out.push_str(line);
                continue;
            }
            if lead >= base {
                out.push_str(&" ".repeat(new_base));
                out.push_str(&line[base..]);
                continue;
            }
            block = None;
        }

        let mut rest = &body[lead..];
        let mut dashes = 0;
        while rest == "-" || rest.starts_with("- ") {
            dashes += 1;
            rest = rest.get(2..).unwrap_or("");
        }

        let mut prefix = " ".repeat(scale(lead));
        for _ in 0..dashes {
            prefix.push('-');
            prefix.push_str(&" ".repeat(indent - 1));
        }
        if rest.is_empty() {
            prefix.truncate(prefix.trim_end().len());
        }
        out.push_str(&prefix);
        out.push_str(rest);
        out.push_str(&line[body.len()..]);

        if let Some((keyed, explicit)) = block_scalar_header(rest) {
            // Column of the innermost collection holding the scalar.
            let (parent, new_parent) = match (dashes, keyed) {
                (0, _) => (lead, scale(lead)),
                (n, true) => (lead + YAML_INDENT * n, scale(lead) + indent * n),
                (n, false) => (
                    lead + YAML_INDENT * (n - 1),
                    scale(lead) + indent * (n - 1),
                ),
            };
            block = Some((
                parent + explicit.unwrap_or(YAML_INDENT),
                new_parent + explicit.unwrap_or(indent),
            ));
        }
    }
    out
}

/// Detects a line opening a literal or folded block scalar. Returns whether
/// the scalar is a mapping value and its explicit indentation indicator.
fn block_scalar_header(rest: &str) -> Option<(bool, Option<usize>)> {
    let token = rest.rsplit(' ').next()?;
    let keyed = rest != token;
    if keyed && !rest.ends_with(&format!(": {}", token)) {
        return None;
    }
    let mut chars = token.chars();
    if !matches!(chars.next(), Some('|' | '>')) {
        return None;
    }
    let hints = chars.as_str();
    let explicit = hints
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .filter(|digit| *digit > 0)
        .map(|digit| digit as usize);
    let chomp = if explicit.is_some() { &hints[1..] } else { hints };
    if !matches!(chomp, "" | "-" | "+") {
        return None;
    }
    Some((keyed, explicit))
}
