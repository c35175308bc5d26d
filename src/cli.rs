// src/cli.rs
use std::{
    error::Error,
    io::{self, BufRead, Write},
    path::PathBuf,
    thread,
    time::Duration,
};

use chrono::Local;

use crate::{
    config::options::{AppOptions, SplitMode},
    csv::splitter_for,
    dashboard::Dashboard,
    file::normalize_separators,
    net::{HttpSheet, SheetSource},
    notify::Notification,
    store::LocalCache,
    view,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Sync,
    Watch { ticks: Option<u64> },
    Show { search: String },
    Export { out: Option<PathBuf> },
    Delete { uid: String, yes: bool },
    Help,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cli {
    pub options: AppOptions,
    pub command: Command,
    pub verbose: bool,
}

pub fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let cli = parse_args(args)?;
    if cli.command == Command::Help {
        eprintln!(include_str!("cli_help.txt"));
        return Ok(());
    }

    crate::log::init(&cli.options.cache.dir);
    crate::log::set_echo(cli.verbose);
    logf!("CLI: {:?}", cli.command);

    let source = HttpSheet::from_options(&cli.options.source)?;
    logd!("CLI: source={}", source.url());
    let stdin = io::stdin();
    execute(&cli, &source, &mut io::stdout().lock(), &mut stdin.lock())
}

/// Run a parsed command against `source`, printing to `out` and reading
/// confirmations from `input`.
pub fn execute(
    cli: &Cli,
    source: &dyn SheetSource,
    out: &mut dyn Write,
    input: &mut dyn BufRead,
) -> Result<(), Box<dyn Error>> {
    let opts = &cli.options;
    let mut dash = Dashboard::new(LocalCache::from_options(&opts.cache))
        .with_splitter(splitter_for(opts.source.split));

    match &cli.command {
        Command::Help => writeln!(out, "{}", include_str!("cli_help.txt"))?,

        Command::Sync => {
            dash.sync_with(source);
            print_notes(out, &mut dash)?;
            write!(out, "{}", view::to_text(&dash.render("")))?;
            writeln!(out, "{} · {}", dash.connectivity().label(), dash.last_sync())?;
        }

        Command::Watch { ticks } => {
            let mut n = 0u64;
            loop {
                let outcome = dash.sync_with(source);
                print_notes(out, &mut dash)?;
                if outcome.changed_view() {
                    write!(out, "{}", view::to_text(&dash.render("")))?;
                }
                out.flush()?;

                n += 1;
                if ticks.is_some_and(|t| n >= t) { break; }
                thread::sleep(opts.source.poll_interval);
            }
        }

        Command::Show { search } => {
            if !dash.load_cached() {
                writeln!(out, "No offline data. Run `sync` first.")?;
                return Ok(());
            }
            write!(out, "{}", view::to_text(&dash.render(search)))?;
        }

        Command::Export { out: dir } => {
            dash.sync_with(source);
            let dir = dir.clone().unwrap_or_else(|| opts.export.out_dir.clone());
            let written = dash.export(&dir, Local::now().date_naive());
            print_notes(out, &mut dash)?;
            if let Some(path) = written? {
                writeln!(out, "Wrote {}", path.display())?;
            }
        }

        Command::Delete { uid, yes } => {
            if !dash.load_cached() {
                writeln!(out, "No offline data. Run `sync` first.")?;
                return Ok(());
            }
            if !*yes && !confirm(out, input, "Are you sure you want to delete this student?")? {
                writeln!(out, "Cancelled.")?;
                return Ok(());
            }
            dash.delete(uid);
            print_notes(out, &mut dash)?;
        }
    }

    Ok(())
}

fn print_notes(out: &mut dyn Write, dash: &mut Dashboard) -> io::Result<()> {
    for Notification { severity, message, .. } in dash.notifications_mut().drain() {
        writeln!(out, "{} [{}] {}", severity.icon(), severity.tag(), message)?;
    }
    Ok(())
}

fn confirm(out: &mut dyn Write, input: &mut dyn BufRead, question: &str) -> io::Result<bool> {
    write!(out, "{question} [y/N] ")?;
    out.flush()?;
    let mut line = s!();
    input.read_line(&mut line)?;
    Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Seconds as a float, strictly positive and small enough for a Duration.
fn positive_secs(raw: &str, what: &str) -> Result<Duration, Box<dyn Error>> {
    let v: f64 = raw.parse()?;
    if !(v > 0.0) { return Err(format!("{what} must be positive").into()); }
    Duration::try_from_secs_f64(v).map_err(|e| format!("{what} out of range: {e}").into())
}

pub fn parse_args(args: &[String]) -> Result<Cli, Box<dyn Error>> {
    let mut options = AppOptions::default();
    let mut verbose = false;
    let mut command: Option<Command> = None;

    let mut args = args.iter();
    while let Some(a) = args.next() {
        match a.as_str() {
            "--url" => options.source.url = args.next().ok_or("Missing value for --url")?.clone(),
            "--interval" => {
                let v = args.next().ok_or("Missing value for --interval")?;
                options.source.poll_interval = positive_secs(v, "Interval")?;
            }
            "--timeout" => {
                let v = args.next().ok_or("Missing value for --timeout")?;
                options.source.timeout = Some(positive_secs(v, "Timeout")?);
            }
            "--cache-dir" => {
                let v = args.next().ok_or("Missing value for --cache-dir")?;
                options.cache.dir = PathBuf::from(normalize_separators(v));
            }
            "--quoted" => options.source.split = SplitMode::Quoted,
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => command = Some(Command::Help),

            "sync" => command = Some(Command::Sync),
            "watch" => command = Some(Command::Watch { ticks: None }),
            "show" => command = Some(Command::Show { search: s!() }),
            "export" => command = Some(Command::Export { out: None }),
            "delete" => {
                let uid = args.next().ok_or("Missing UID for delete")?.clone();
                command = Some(Command::Delete { uid, yes: false });
            }

            // Sub-command flags
            "--ticks" => match &mut command {
                Some(Command::Watch { ticks }) => {
                    *ticks = Some(args.next().ok_or("Missing value for --ticks")?.parse()?);
                }
                _ => return Err("--ticks only applies to watch".into()),
            },
            "--search" => match &mut command {
                Some(Command::Show { search }) => {
                    *search = args.next().ok_or("Missing value for --search")?.clone();
                }
                _ => return Err("--search only applies to show".into()),
            },
            "-o" | "--out" => match &mut command {
                Some(Command::Export { out }) => {
                    let v = args.next().ok_or("Missing output directory")?;
                    *out = Some(PathBuf::from(normalize_separators(v)));
                }
                _ => return Err("-o only applies to export".into()),
            },
            "-y" | "--yes" => match &mut command {
                Some(Command::Delete { yes, .. }) => *yes = true,
                _ => return Err("--yes only applies to delete".into()),
            },
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    let command = command.ok_or("Specify a command: sync | watch | show | export | delete (see --help)")?;
    Ok(Cli { options, command, verbose })
}
