use std::error::Error;
use std::io;
use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};
use csv::{ReaderBuilder, WriterBuilder};

use edf_timeline::constants::DEMO_TASKS;
use edf_timeline::scheduler::EarliestDeadlineFirst;
use edf_timeline::{
    simulate_with, Schedule, SimulationCode, Task, TaskSet, TieBreak, TimeStep, Timeline,
};

/// Reads a task file (`name, execution_time, period, deadline_multiplier` per line)
pub fn read_task_file(file_path: &str) -> Result<Vec<Task>, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_path(file_path)?;
    let mut tasks = Vec::new();

    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        if record.len() != 4 {
            return Err(format!(
                "record {}: expected 4 fields (name, execution_time, period, deadline_multiplier), found {}",
                line + 1,
                record.len()
            )
            .into());
        }

        let name = &record[0];
        let field = |i: usize, label: &str| -> Result<TimeStep, Box<dyn Error>> {
            record[i]
                .parse()
                .map_err(|e| format!("task `{}`: {} `{}`: {}", name, label, &record[i], e).into())
        };

        tasks.push(Task::new(
            name,
            field(1, "execution_time")?,
            field(2, "period")?,
            field(3, "deadline_multiplier")?,
        ));
    }

    Ok(tasks)
}

/// Writes the schedule as `task,start,end` records.
pub fn write_schedule<W: io::Write>(schedule: &Schedule, writer: W) -> Result<(), Box<dyn Error>> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(["task", "start", "end"])?;
    for interval in schedule.iter() {
        wtr.write_record([
            interval.task_name().to_string(),
            interval.start().to_string(),
            interval.end().to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn demo_tasks() -> Vec<Task> {
    DEMO_TASKS
        .iter()
        .map(|&(name, c, t, m)| Task::new(name, c, t, m))
        .collect()
}

pub fn build_cli_command() -> Command {
    Command::new("edf-timeline")
        .version("0.1.0")
        .about("Simulates non-preemptive EDF scheduling of periodic tasks over one hyperperiod")

        .arg(Arg::new("task_file")
            .help("Path to the task set file; the built-in demo set is used if omitted"))

        .arg(Arg::new("tie_break")
            .short('t')
            .long("tie-break")
            .help("Order of tasks with equal deadlines")
            .value_parser(["registration", "carried"])
            .default_value("registration"))

        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .help("Write the schedule to this CSV file"))

        .arg(Arg::new("chart")
            .short('c')
            .long("chart")
            .action(ArgAction::SetTrue)
            .help("Print a text Gantt chart of the schedule"))

        .arg(Arg::new("quiet")
            .short('q')
            .long("quiet")
            .action(ArgAction::SetTrue)
            .help("Do not print one line per executed job"))
}

fn tie_break(matches: &ArgMatches) -> TieBreak {
    match matches.get_one::<String>("tie_break").map(String::as_str) {
        Some("carried") => TieBreak::Carried,
        _ => TieBreak::Registration,
    }
}

fn main() {
    // cargo run [task_file] [-t registration|carried] [-o schedule.csv] [-c] [-q]
    // example : cargo run tasks.csv -t carried -c
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches: ArgMatches = build_cli_command().get_matches();

    let tasks = match matches.get_one::<String>("task_file") {
        Some(path) => match read_task_file(path) {
            Ok(tasks) => tasks,
            Err(e) => {
                eprintln!("Error reading task file: {}", e);
                process::exit(SimulationCode::InputError as i32);
            }
        },
        None => demo_tasks(),
    };

    let taskset = match TaskSet::new(tasks) {
        Ok(taskset) => taskset,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(SimulationCode::InvalidTaskSet as i32);
        }
    };

    let scheduler = EarliestDeadlineFirst::new(tie_break(&matches));
    let schedule = simulate_with(&taskset, &scheduler);

    if !matches.get_flag("quiet") {
        for interval in schedule.iter() {
            println!("Executing {} at time {}", interval.task_name(), interval.start());
        }
    }

    println!(
        "Hyperperiod {}: {} jobs, {} deadline misses",
        schedule.hyperperiod(),
        schedule.len(),
        schedule.deadline_misses()
    );

    if matches.get_flag("chart") {
        print!("{}", Timeline::from_intervals(schedule.intervals()).render());
    }

    if let Some(path) = matches.get_one::<String>("output") {
        let written = std::fs::File::create(path)
            .map_err(Box::<dyn Error>::from)
            .and_then(|file| write_schedule(&schedule, file));
        if let Err(e) = written {
            eprintln!("Error writing schedule to {}: {}", path, e);
            process::exit(SimulationCode::InputError as i32);
        }
    }

    let code = if schedule.deadline_misses() > 0 {
        SimulationCode::CompletedWithMisses
    } else {
        SimulationCode::Completed
    };
    process::exit(code as i32);
}
