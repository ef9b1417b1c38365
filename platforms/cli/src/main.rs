use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tmbb::{
    analyzer, decode, encode, parse, parse_number, run_with_limit, scan, state_letter, BigUint,
    Halt, Outcome, ProgramLoader, ProgramManager, Step, TuringMachine,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  tmbb-cli table -s 2 18371
  tmbb-cli number 1RB1LB_1LA1RC
  tmbb-cli run -s 3 14642600
  echo 21216477565 | tmbb-cli run -s 4")]
struct Cli {
    /// Log debug details to stderr (overrides RUST_LOG)
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a machine number and print its transition table
    Table {
        /// Number of non-halting states
        #[clap(short, long)]
        states: usize,

        /// The machine number (read from stdin when omitted)
        number: Option<String>,
    },

    /// Print the machine number of a standard-format table
    Number {
        /// The table, e.g. 1RB1LB_1LA1RC (read from stdin when omitted)
        standard: Option<String>,
    },

    /// Run a machine until it halts
    Run {
        /// Number of non-halting states, required for machine numbers
        #[clap(short, long)]
        states: Option<usize>,

        /// A machine number or a standard-format table (read from stdin when omitted)
        machine: Option<String>,

        /// Give up after this many transitions
        #[clap(short, long)]
        limit: Option<u64>,

        /// Print the result as JSON
        #[clap(long)]
        json: bool,

        /// Print each step of the execution
        #[clap(short, long)]
        trace: bool,
    },

    /// List the known busy beaver champions
    Champions {
        /// Also run every champion whose step count is below --limit
        #[clap(long)]
        run: bool,

        #[clap(short, long, default_value_t = 1_000_000)]
        limit: u64,
    },

    /// Run consecutive machine numbers with a step budget
    Scan {
        #[clap(short, long)]
        states: usize,

        /// First machine number
        #[clap(long, default_value = "0")]
        from: String,

        /// How many machines to run
        #[clap(short, long)]
        count: u64,

        /// Transitions allowed per machine
        #[clap(short, long, default_value_t = 1000)]
        limit: u64,

        /// Only print machines that halted
        #[clap(long)]
        halting_only: bool,

        /// Print one JSON report per line
        #[clap(long)]
        json: bool,
    },

    /// Run every machine listed in a file, one machine number or table per line
    File {
        path: PathBuf,

        /// Number of non-halting states, required for machine numbers
        #[clap(short, long)]
        states: Option<usize>,

        /// Transitions allowed per machine
        #[clap(short, long, default_value_t = 1_000_000)]
        limit: u64,

        /// Print one JSON report per line
        #[clap(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` applies unless `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn execute(command: Command) -> Result<ExitCode, Box<dyn Error>> {
    match command {
        Command::Table { states, number } => {
            let number = parse_number(&read_input(number)?)?;
            let table = decode(&number, states)?;

            print!("{}", table.grid());
            println!("\nStandard format: {}", table);
            println!("TM Number: {}", encode(&table)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Number { standard } => {
            let table = parse(&read_input(standard)?)?;

            print!("{}", table.grid());
            for issue in analyzer::report(&table) {
                eprintln!("Warning: {}", issue);
            }
            println!("\nTM Number: {}", encode(&table)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Run {
            states,
            machine,
            limit,
            json,
            trace,
        } => {
            let table = ProgramLoader::load_line(&read_input(machine)?, states)?;
            let mut machine = TuringMachine::new(table);

            if !json {
                print!("{}", machine.table().grid());
                for issue in analyzer::report(machine.table()) {
                    eprintln!("Warning: {}", issue);
                }
                if let Some(champion) = ProgramManager::find(machine.table()) {
                    println!("Busy beaver champion for {} states", champion.states);
                }
            }

            let outcome = if trace {
                run_traced(&mut machine, limit)
            } else {
                match limit {
                    Some(limit) => run_with_limit(&mut machine, limit),
                    None => match machine.run() {
                        Step::Halt(Halt::Ok) => Outcome::Halted,
                        _ => Outcome::Invalid,
                    },
                }
            };

            let report = machine.report();
            if json {
                println!("{}", report.to_json()?);
            } else {
                match outcome {
                    Outcome::Halted => println!("TM halted."),
                    Outcome::Invalid => println!("Invalid state, halting execution."),
                    Outcome::LimitReached => println!("Step limit reached."),
                }
                println!(
                    "Ones (Σ): {}, Transitions (S): {}",
                    report.ones, report.transitions
                );
            }

            Ok(match outcome {
                Outcome::Halted => ExitCode::SUCCESS,
                Outcome::Invalid => ExitCode::from(1),
                Outcome::LimitReached => ExitCode::from(2),
            })
        }
        Command::Champions { run, limit } => {
            for champion in ProgramManager::list() {
                let score = |value: Option<u64>| {
                    value.map_or_else(|| "?".to_string(), |v| v.to_string())
                };
                println!(
                    "{}, {}, {}, {} ({})",
                    champion.states,
                    champion.number,
                    score(champion.ones),
                    score(champion.steps),
                    champion.standard
                );

                if run && champion.steps.is_some_and(|steps| steps <= limit) {
                    let mut machine = TuringMachine::new(champion.table()?);
                    let outcome = run_with_limit(&mut machine, limit);
                    println!(
                        "  {:?}: Σ = {}, S = {}",
                        outcome,
                        machine.ones(),
                        machine.transitions()
                    );
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Scan {
            states,
            from,
            count,
            limit,
            halting_only,
            json,
        } => {
            let start = parse_number(&from)?
                .to_biguint()
                .ok_or("Scan start must not be negative")?;

            let mut best: Option<(BigUint, i64, u64)> = None;
            for (report, outcome) in scan(states, start, count, limit)? {
                if outcome == Outcome::Halted
                    && best.as_ref().map_or(true, |(_, ones, _)| report.ones > *ones)
                {
                    let number = report.number.as_deref().unwrap_or("0").parse()?;
                    best = Some((number, report.ones, report.transitions));
                }

                if halting_only && outcome != Outcome::Halted {
                    continue;
                }
                if json {
                    println!("{}", report.to_json()?);
                } else {
                    println!(
                        "{} {} {:?} Σ={} S={}",
                        report.number.as_deref().unwrap_or("-"),
                        report.standard,
                        outcome,
                        report.ones,
                        report.transitions
                    );
                }
            }

            if let Some((number, ones, transitions)) = best {
                eprintln!("Best: {} with Σ = {}, S = {}", number, ones, transitions);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::File {
            path,
            states,
            limit,
            json,
        } => {
            let mut failed = false;

            for loaded in ProgramLoader::load_machines(&path, states)? {
                let (line, table) = match loaded {
                    Ok(entry) => entry,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        failed = true;
                        continue;
                    }
                };

                let mut machine = TuringMachine::new(table);
                let outcome = run_with_limit(&mut machine, limit);
                let report = machine.report();

                if json {
                    println!("{}", report.to_json()?);
                } else {
                    println!(
                        "line {}: {} {:?} Σ={} S={}",
                        line, report.standard, outcome, report.ones, report.transitions
                    );
                }
            }

            Ok(if failed {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}

/// Steps through the machine, printing the configuration after every transition.
fn run_traced(machine: &mut TuringMachine, limit: Option<u64>) -> Outcome {
    let print_state = |machine: &TuringMachine| {
        println!(
            "Step: {}, State: {}, Ones: {}, Tape: {}",
            machine.transitions(),
            state_letter(machine.state()),
            machine.ones(),
            machine.tape()
        );
    };

    print_state(machine);

    loop {
        if limit.is_some_and(|limit| machine.transitions() >= limit) {
            return Outcome::LimitReached;
        }

        match machine.step() {
            Step::Continue => print_state(machine),
            Step::Halt(Halt::Ok) => {
                print_state(machine);
                return Outcome::Halted;
            }
            Step::Halt(Halt::Err(e)) => {
                println!("\nMachine error: {}", e);
                return Outcome::Invalid;
            }
        }
    }
}

/// Returns the argument, or the whole of stdin when the argument is missing and stdin is piped.
fn read_input(arg: Option<String>) -> Result<String, Box<dyn Error>> {
    if let Some(arg) = arg {
        return Ok(arg);
    }

    if atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer.trim().to_string());
    }

    Err("No machine given; pass it as an argument or pipe it via stdin".into())
}
