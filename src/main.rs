use std::error::Error;
use std::fs::File;
use std::io::{self, Write};
use std::process;

use clap::{Arg, ArgMatches, Command};
use csv::{ReaderBuilder, Trim, Writer};

use uniprocessor::{
    check_feasibility, compute_horizon, run_simulation_with_tie_break, Policy, SchedulingCode,
    SimulationReport, Task, TaskSet, TieBreak, TimeStep,
};

/// Reads a task set file and returns a `TaskSet`
///
/// One task per line: `name, execution_time, period, relative_deadline[, arrival_time]`.
pub fn read_task_file(file_path: &String) -> Result<TaskSet, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_path(file_path)?;
    let mut taskset = TaskSet::new_empty();

    for result in rdr.records() {
        let record = result?;
        if record.len() < 4 || record.len() > 5 {
            return Err(format!(
                "expected 4 or 5 fields per task, found {} in {:?}",
                record.len(),
                record
            )
            .into());
        }

        let name = record[0].to_string();
        let execution_time: TimeStep = record[1].parse()?;
        let period: TimeStep = record[2].parse()?;
        let deadline: TimeStep = record[3].parse()?;
        let arrival_time: TimeStep = match record.get(4) {
            Some(field) => field.parse()?,
            None => 0,
        };

        if taskset.get_task_by_name(&name).is_some() {
            return Err(format!("task '{}' is defined twice", name).into());
        }
        taskset.add_task(Task::new(name, execution_time, period, deadline, arrival_time));
    }

    Ok(taskset)
}

/// Writes the trace as CSV, one row per task per tick.
pub fn write_trace<W: Write>(report: &SimulationReport, writer: W) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_writer(writer);
    for record in report.records() {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the deadline misses as CSV, one row per miss.
pub fn write_misses<W: Write>(report: &SimulationReport, writer: W) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_writer(writer);
    for miss in report.misses() {
        wtr.serialize(miss)?;
    }
    wtr.flush()?;
    Ok(())
}

/// One symbol per tick, `-` for an idle processor.
pub fn timeline(report: &SimulationReport) -> String {
    report
        .schedule()
        .iter()
        .map(|(_, running)| running.unwrap_or("-"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn build_cli_command() -> Command {
    Command::new("uniprocessor")
    .version("1.0")
    .about("Simulates EDF and LLF scheduling of periodic tasks on one processor")

    .arg(Arg::new("task_file")
        .required(true)
        .help("Path to the task set file"))

    .arg(Arg::new("algorithm")
        .short('a')
        .long("algorithm")
        .help("Scheduling policy")
        .value_parser(["edf", "llf"])
        .default_value("edf"))

    .arg(Arg::new("time")
        .short('t')
        .long("time")
        .help("Simulate up to this instant instead of one hyperperiod"))

    .arg(Arg::new("output")
        .short('o')
        .long("output")
        .help("Write the trace to this CSV file instead of stdout"))

    .arg(Arg::new("misses")
        .short('m')
        .long("misses")
        .help("Write the missed deadlines to this CSV file"))

    .arg(Arg::new("tie_break")
        .long("tie-break")
        .help("Last resort ordering between equally urgent tasks")
        .value_parser(["order", "name"])
        .default_value("order"))
}

pub fn run(matches: &ArgMatches) -> Result<SchedulingCode, Box<dyn Error>> {
    let mut taskset = read_task_file(matches.get_one::<String>("task_file").unwrap())?;
    let policy: Policy = matches.get_one::<String>("algorithm").unwrap().parse()?;
    let tie_break: TieBreak = matches.get_one::<String>("tie_break").unwrap().parse()?;

    let horizon = compute_horizon(&taskset)?;
    let total_time = match matches.get_one::<String>("time") {
        Some(time) => time.parse::<TimeStep>()?,
        None => horizon.total_time,
    };
    let feasibility = check_feasibility(&taskset);

    let report = run_simulation_with_tie_break(&mut taskset, total_time, policy, tie_break)?;

    if let Some(path) = matches.get_one::<String>("misses") {
        write_misses(&report, File::create(path)?)?;
    }

    // The summary goes to stderr when stdout carries the trace.
    let mut summary: Box<dyn Write> = match matches.get_one::<String>("output") {
        Some(path) => {
            write_trace(&report, File::create(path)?)?;
            Box::new(io::stdout())
        }
        None => {
            write_trace(&report, io::stdout().lock())?;
            Box::new(io::stderr())
        }
    };

    writeln!(summary, "Policy: {}", policy)?;
    writeln!(
        summary,
        "Start time: {}, hyperperiod: {}, total time: {}",
        horizon.start_time, horizon.horizon, total_time
    )?;
    writeln!(
        summary,
        "Utilisation: {:.1}% ({})",
        feasibility.utilisation * 100.0,
        if feasibility.feasible { "feasible" } else { "overloaded" }
    )?;
    writeln!(summary, "Schedule: {}", timeline(&report))?;

    if report.has_missed() {
        let misses: Vec<String> = report.misses().iter().map(|miss| miss.to_string()).collect();
        writeln!(summary, "Missed deadlines: {}", misses.join(", "))?;
        Ok(SchedulingCode::DeadlineMissed)
    } else {
        writeln!(summary, "No deadline missed")?;
        Ok(SchedulingCode::Schedulable)
    }
}

fn main() {
    // cargo run <task_file> [-a edf|llf] [-t <time>] [-o <trace.csv>] [--tie-break order|name]
    // example : cargo run tasks.csv -a llf -o trace.csv
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches: ArgMatches = build_cli_command().get_matches();

    let code = match run(&matches) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            SchedulingCode::InvalidInput
        }
    };

    process::exit(code as i32);
}
