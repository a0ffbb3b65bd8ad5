use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;
use anyhow::Result;
use itertools::Itertools;
use structopt::StructOpt;
use tracing::*;

use gvrp::{GvrpFmt, Instance, ParseInstance};
use gvrp::logging_setup::init_logging;

pub const OUTPUT_FORMAT_STRINGS: [&str; 3] = ["summary", "sets", "matrix"];

#[derive(Debug, Copy, Clone)]
pub enum OutputFormat {
    Summary,
    Sets,
    Matrix,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        return match s {
            "summary" => Ok(Self::Summary),
            "sets" => Ok(Self::Sets),
            "matrix" => Ok(Self::Matrix),
            _ => Err(format!("invalid string: {}", s))
        };
    }
}

impl Default for OutputFormat {
    fn default() -> Self { OutputFormat::Summary }
}

/// Reads a GVRP instance and reports what was parsed.
#[derive(Debug, StructOpt)]
struct ClArgs {
    /// Instance file; standard input when omitted.
    #[structopt(parse(from_os_str))]
    input: Option<PathBuf>,
    #[structopt(long="format", short="f", parse(try_from_str), default_value="summary", possible_values=&OUTPUT_FORMAT_STRINGS)]
    fmt: OutputFormat,
    #[structopt(long="output", short="o")]
    file: Option<PathBuf>,
    /// Also write log events to this file as JSON.
    #[structopt(long)]
    log: Option<PathBuf>,
}

fn write_summary(instance: &Instance, mut buf: impl Write) -> Result<()> {
    writeln!(buf, "{}", instance)?;
    writeln!(buf, "customers = {}", instance.customer_cnt())?;
    writeln!(buf, "total demand = {}", instance.total_demand())?;
    Ok(())
}

fn write_sets(instance: &Instance, mut buf: impl Write) -> Result<()> {
    writeln!(buf, "set\tdemand\tcustomers")?;
    for s in instance.sets() {
        let members = instance.members(s)
            .map(|c| format!("{}{}", c.id(), c.location()))
            .join(" ");
        writeln!(buf, "{}\t{}\t{}", s.id(), s.demand(), members)?;
    }
    Ok(())
}

fn write_matrix(instance: &Instance, mut buf: impl Write) -> Result<()> {
    let n = instance.node_cnt();
    let matrix = instance.distance_matrix();
    for i in 0..n {
        writeln!(buf, "{}", (0..n).map(|j| matrix[&(i, j)]).join(" "))?;
    }
    Ok(())
}

fn output(args: &ClArgs, instance: &Instance) -> Result<()> {
    let write = |buf: &mut dyn Write| match args.fmt {
        OutputFormat::Summary => write_summary(instance, buf),
        OutputFormat::Sets => write_sets(instance, buf),
        OutputFormat::Matrix => write_matrix(instance, buf),
    };
    match args.file.as_ref() {
        Some(path) => {
            let mut writer = io::BufWriter::new(std::fs::File::create(path)?);
            write(&mut writer)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write(&mut lock)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args : ClArgs = StructOpt::from_args();
    let _g = init_logging(args.log.as_ref())?;
    debug!(?args);

    let instance = match args.input.as_ref() {
        Some(path) => Instance::parse(GvrpFmt(path))?,
        None => {
            let stdin = io::stdin();
            let lock = stdin.lock();
            Instance::from_reader(lock)?
        }
    };
    info!(name = instance.name(), customers = instance.customer_cnt(), sets = instance.set_cnt(), "loaded");

    output(&args, &instance)
}
