use crate::flight::DEFAULT_CAPACITY;
use crate::schedule::schedule::Schedule;
use crate::shell::{Console, Session, ShellError};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

mod flight;
mod order;
mod schedule;
mod shell;

#[derive(Parser)]
struct Args {
    /// Number of orders each flight can carry
    #[arg(short, long, value_name = "N", default_value_t = DEFAULT_CAPACITY,
          value_parser = clap::value_parser!(u32).range(1..))]
    capacity: u32,

    /// Schedule file to preload, one `departure,arrival,day` per line
    #[arg(short, long, value_name = "FILE")]
    schedule: Option<PathBuf>,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct PathHelper {
    files: FilenameCompleter,
}

impl Completer for PathHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        self.files.complete(line, pos, ctx)
    }
}

struct Terminal {
    editor: Editor<PathHelper, DefaultHistory>,
}

impl Console for Terminal {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                Ok(None)
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn say(&mut self, text: &str) {
        println!("{text}");
    }

    fn show(&mut self, text: &str) {
        if text.lines().count() > 40 {
            paginate(text);
        } else {
            println!("{text}");
        }
    }
}

fn paginate(content: &str) {
    let spawned = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn());

    let mut pager = match spawned {
        Ok(pager) => pager,
        Err(err) => {
            log::warn!("no pager available: {err}");
            println!("{content}");
            return;
        }
    };

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                log::error!("writing to pager failed: {e}");
            }
        }
    }

    // Wait for the user to close the pager before returning to the menu
    let _ = pager.wait();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let schedule = match &args.schedule {
        Some(path) => match Schedule::load_from_file(path, args.capacity) {
            Ok(schedule) => {
                println!("Loaded {} flights from {}", schedule.flights().len(), path.display());
                schedule
            }
            Err(err) => {
                println!("{}", format!("Error: {err}").red());
                Schedule::default()
            }
        },
        None => Schedule::default(),
    };

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let mut editor = Editor::with_config(config)?;
    editor.set_helper(Some(PathHelper {
        files: FilenameCompleter::new(),
    }));

    let mut terminal = Terminal { editor };
    let mut session = Session::new(schedule, args.capacity);
    session.run(&mut terminal)?;
    log::info!("session closed with {} flights", session.schedule().flights().len());
    Ok(())
}
