use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use callroi::report::{render_outcome, render_results, render_templates};
use callroi::util::args::{parse_number_assignment, parse_value_assignment};
use callroi::util::io::{DataFormat, atomic_write, load, render};
use callroi::init_logging;
use callroi_core::config::{CalculatorConfig, calculator_template, calculator_templates};
use callroi_core::formula::{Value, evaluate};
use callroi_core::{DealInputs, VerticalTemplate, calculate};
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{WrapErr, eyre};

#[derive(Parser, Debug)]
#[command(name = "callroi")]
#[command(about = "Call automation ROI calculator")]
struct Args {
    /// Path to the data directory (default: ~/.callroi/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputKind {
    Table,
    Json,
    Yaml,
}

impl OutputKind {
    fn data_format(self) -> Option<DataFormat> {
        match self {
            OutputKind::Table => None,
            OutputKind::Json => Some(DataFormat::Json),
            OutputKind::Yaml => Some(DataFormat::Yaml),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full ROI calculation for a deal scenario file
    Project {
        /// Scenario file (.yaml, .yml or .json)
        file: PathBuf,

        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputKind,

        /// Write the output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print an industry preset scenario, or run it
    Vertical {
        name: String,

        /// Run the calculation instead of printing the scenario
        #[arg(long)]
        run: bool,

        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputKind,
    },

    /// List industry presets and calculator templates
    Templates,

    /// Run a calculator configuration
    Calc {
        /// Calculator file (.yaml, .yml or .json)
        #[arg(required_unless_present = "template", conflicts_with = "template")]
        file: Option<PathBuf>,

        /// Built-in calculator template id
        #[arg(short, long)]
        template: Option<String>,

        /// Input override as name=value (repeatable)
        #[arg(short, long = "set", value_parser = parse_number_assignment)]
        set: Vec<(String, f64)>,

        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputKind,
    },

    /// Evaluate a single formula
    Eval {
        formula: String,

        /// Variable as name=value, value a number or a JSON list (repeatable)
        #[arg(short, long = "var", value_parser = parse_value_assignment)]
        var: Vec<(String, Value)>,
    },
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".callroi")
}

fn emit(text: &str, out: Option<&Path>) -> color_eyre::Result<()> {
    match out {
        Some(path) => {
            let mut content = text.to_string();
            if !content.ends_with('\n') {
                content.push('\n');
            }
            atomic_write(path, &content)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn project(file: &Path, format: OutputKind, out: Option<&Path>) -> color_eyre::Result<()> {
    let inputs: DealInputs = load(file)?;
    tracing::info!(
        path = %file.display(),
        intents = inputs.intents().len(),
        "calculating scenario"
    );

    let results = calculate(&inputs);
    let text = match format.data_format() {
        Some(data_format) => render(&results, data_format)?,
        None => render_results(&results),
    };
    emit(&text, out)
}

fn vertical(name: &str, run: bool, format: OutputKind) -> color_eyre::Result<()> {
    let vertical =
        VerticalTemplate::from_id(name).ok_or_else(|| eyre!("unknown vertical '{name}'"))?;
    let inputs = vertical
        .inputs()
        .wrap_err_with(|| format!("preset '{}' is invalid", vertical.id()))?;

    if !run {
        let data_format = format.data_format().unwrap_or(DataFormat::Yaml);
        return emit(&render(&inputs, data_format)?, None);
    }

    let results = calculate(&inputs);
    let text = match format.data_format() {
        Some(data_format) => render(&results, data_format)?,
        None => render_results(&results),
    };
    emit(&text, None)
}

fn calc(
    file: Option<&Path>,
    template: Option<&str>,
    overrides: Vec<(String, f64)>,
    format: OutputKind,
) -> color_eyre::Result<()> {
    let config: CalculatorConfig = match (file, template) {
        (Some(path), _) => load(path)?,
        (None, Some(id)) => calculator_template(id)?,
        (None, None) => return Err(eyre!("either a calculator file or --template is required")),
    };

    let provided: BTreeMap<String, f64> = overrides.into_iter().collect();
    let outcome = config
        .run(&provided)
        .wrap_err_with(|| format!("calculator '{}' failed", config.id))?;

    let text = match format.data_format() {
        Some(data_format) => render(&outcome, data_format)?,
        None => render_outcome(&config, &outcome),
    };
    emit(&text, None)
}

fn eval(formula: &str, vars: Vec<(String, Value)>) -> color_eyre::Result<()> {
    let vars: BTreeMap<String, Value> = vars.into_iter().collect();
    let value = evaluate(formula, &vars)?;
    println!("{value}");
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;

    match args.command {
        Command::Project { file, format, out } => project(&file, format, out.as_deref()),
        Command::Vertical { name, run, format } => vertical(&name, run, format),
        Command::Templates => {
            println!("{}", render_templates(&calculator_templates()));
            Ok(())
        }
        Command::Calc {
            file,
            template,
            set,
            format,
        } => calc(file.as_deref(), template.as_deref(), set, format),
        Command::Eval { formula, var } => eval(&formula, var),
    }
}
