use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::debug;

use beanpath::bean::BeanCopier;
use beanpath::config::Config;
use beanpath::file::loader::{load_value_file, load_value_from_stdin};
use beanpath::file::saver::{save_value_file, serialize_value};
use beanpath::file::Format;
use beanpath::path::{BeanPath, Segment};
use beanpath::value::Value;

/// beanpath - read, write and copy properties in JSON and YAML documents
#[derive(Parser)]
#[command(name = "beanpath")]
#[command(version)]
#[command(about = "Bean path expressions and property copying for JSON and YAML documents", long_about = None)]
struct Cli {
    /// Output format for stdout (default: from config, else json)
    #[arg(short, long, global = true)]
    format: Option<Format>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show how an expression is split into segments
    Parse {
        expression: String,
    },

    /// Print the value an expression addresses
    Get {
        /// Document to read (`-` for stdin)
        file: String,
        expression: String,
    },

    /// Write a value at an expression
    Set {
        /// Document to modify (`-` for stdin)
        file: String,
        expression: String,
        /// JSON value; anything that is not valid JSON is taken as a string
        value: String,
        /// Write the result here instead of back to FILE
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Copy same-named properties from SOURCE into TARGET
    Copy {
        /// Document to copy from (`-` for stdin)
        source: String,
        /// Document to copy into
        target: String,
        /// Match property names case-insensitively
        #[arg(long)]
        ignore_case: bool,
        /// Do not overwrite with null source values
        #[arg(long)]
        ignore_null: bool,
        /// Never copy this property (repeatable)
        #[arg(long = "exclude", value_name = "NAME")]
        excluded: Vec<String>,
        /// Copy FROM into TO (repeatable)
        #[arg(long = "map", value_name = "FROM=TO", value_parser = parse_mapping)]
        mappings: Vec<(String, String)>,
        /// Write the result here instead of back to TARGET
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn parse_mapping(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((from, to)) if !from.is_empty() && !to.is_empty() => {
            Ok((from.to_string(), to.to_string()))
        }
        _ => Err(format!("expected FROM=TO, got '{}'", s)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = Config::try_load();
    let log_level = match &loaded {
        Ok(config) => config.log_level.clone(),
        Err(_) => Config::default().log_level,
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = loaded.unwrap_or_else(|e| {
        log::warn!("ignoring config: {:#}", e);
        Config::default()
    });

    if let Some(format) = cli.format {
        config.output_format = format;
    }

    match cli.command {
        Command::Parse { expression } => run_parse(&expression),
        Command::Get { file, expression } => run_get(&file, &expression, &config),
        Command::Set {
            file,
            expression,
            value,
            output,
        } => run_set(&file, &expression, &value, output.as_deref(), &config),
        Command::Copy {
            source,
            target,
            ignore_case,
            ignore_null,
            excluded,
            mappings,
            output,
        } => {
            let mut copy = config.copy.clone();
            copy.ignore_case |= ignore_case;
            copy.ignore_null_value |= ignore_null;
            copy.excluded_fields.extend(excluded);
            copy.field_mapping.extend(mappings);
            let options = copy.to_options();

            let source_value = load(&source)?;
            let mut target_value = load(&target)?;
            BeanCopier::new(&source_value, &mut target_value, &options)
                .copy()
                .context("Copy failed")?;
            store(output.as_deref().unwrap_or(&target), &target_value, &config)
        }
    }
}

fn run_parse(expression: &str) -> Result<()> {
    let path = BeanPath::parse(expression)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", path)?;
    if path.is_rooted() {
        writeln!(stdout, "  (rooted)")?;
    }
    for (i, segment) in path.segments().iter().enumerate() {
        let kind = match segment {
            Segment::Name(_) => "name",
            Segment::Slice(_) => "slice",
            Segment::Multi(_) => "multi",
        };
        writeln!(stdout, "  {}: {:<5} {}", i, kind, segment)?;
    }
    Ok(())
}

fn run_get(file: &str, expression: &str, config: &Config) -> Result<()> {
    let path = BeanPath::parse(expression)?;
    let root = load(file)?;
    let Some(value) = path.get(&root) else {
        bail!("Nothing at '{}' in {}", expression, file);
    };
    print_value(&value, config)
}

fn run_set(
    file: &str,
    expression: &str,
    raw_value: &str,
    output: Option<&str>,
    config: &Config,
) -> Result<()> {
    let path = BeanPath::parse(expression)?;
    let mut root = load(file)?;
    let value = match serde_json::from_str::<Value>(raw_value) {
        Ok(value) => value,
        Err(_) => Value::from(raw_value),
    };
    debug!("setting '{}' to {}", path, value);
    path.set(&mut root, value)
        .with_context(|| format!("Cannot set '{}'", expression))?;
    store(output.unwrap_or(file), &root, config)
}

fn load(file: &str) -> Result<Value> {
    if file == "-" {
        load_value_from_stdin()
    } else {
        load_value_file(file)
    }
}

fn store(file: &str, value: &Value, config: &Config) -> Result<()> {
    if file == "-" {
        return print_value(value, config);
    }
    save_value_file(Path::new(file), value, config)
}

fn print_value(value: &Value, config: &Config) -> Result<()> {
    let rendered = serialize_value(value, config.output_format, config)?;
    io::stdout().lock().write_all(rendered.as_bytes())?;
    Ok(())
}
