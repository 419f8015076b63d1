extern crate ethcal as lib;

use flexi_logger::{FileSpec, Logger};
use lib::calendar::names::long_date;
use lib::calendar::{parse_ymd, CalendarDate, CalendarSystem};
use lib::cmds::{parse_command, Reply};
use lib::config::Config;
use lib::selection::{FixedToday, SelectionController, SystemToday, Today};
use lib::ui::MonthPane;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "ec",
    about = "Gregorian / Ethiopian calendar converter and month view."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,

    #[structopt(long = "today", help = "use this Gregorian date (YYYY-MM-DD) as today")]
    pub today: Option<String>,

    #[structopt(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Converts a date into the other calendar
    Convert {
        #[structopt(help = "date as YYYY-MM-DD")]
        date: String,

        #[structopt(
            short = "f",
            long = "from",
            default_value = "gregorian",
            help = "calendar DATE is given in"
        )]
        from: CalendarSystem,
    },
    /// Prints a month grid
    Show {
        #[structopt(long = "calendar", help = "gregorian or ethiopian")]
        calendar: Option<CalendarSystem>,

        #[structopt(short = "y", long = "year")]
        year: Option<i32>,

        #[structopt(short = "m", long = "month")]
        month: Option<u32>,

        #[structopt(
            short = "s",
            long = "select",
            help = "date to select (YYYY-MM-DD) in the shown calendar"
        )]
        select: Option<String>,
    },
    /// Prints today in both calendars
    Today,
    /// Runs an interactive session reading commands from stdin
    Session {
        #[structopt(short = "r", long = "restore", help = "selection record (JSON) to start from")]
        restore: Option<String>,
    },
}

fn print_view<T: Today>(controller: &SelectionController<T>, config: &Config) -> lib::Result<()> {
    let grid = controller.grid()?;
    print!("{}", MonthPane::new(&grid, &config.theme, config.month_names));

    match (controller.selected(), controller.counterpart()) {
        (Some(selected), Some(other)) => println!(
            "\n{} ({})",
            long_date(selected, config.month_names),
            long_date(&other, config.month_names)
        ),
        _ => println!("\nNo date selected"),
    }

    Ok(())
}

fn redraw<T: Today>(controller: &SelectionController<T>, config: &Config) {
    if let Err(e) = print_view(controller, config) {
        log::warn!("could not draw {:?}: {}", controller.viewed(), e);
        eprintln!("{}", e);
    }
}

fn run_session<T: Today>(
    mut controller: SelectionController<T>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    redraw(&controller, config);

    let stdin = io::stdin();
    let mut stdin = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }

        match parse_command(&line).and_then(|cmd| cmd.apply(&mut controller)) {
            Ok(Reply::Redraw) => redraw(&controller, config),
            Ok(Reply::Print(text)) => println!("{}", text),
            Ok(Reply::Exit) => break,
            Ok(Reply::Nothing) => {}
            Err(e) => {
                log::debug!("command '{}' failed: {}", line.trim(), e);
                eprintln!("{}", e);
                if e.is_deserialization() {
                    redraw(&controller, config);
                }
            }
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "info"
    } else {
        "warn"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    std::panic::set_hook(Box::new(|info| {
        eprintln!("ec ran into a fatal error!");
        eprintln!("Consider filing an issue with a log file and the backtrace below.");
        eprintln!("{}", info);
        eprintln!("{:?}", backtrace::Backtrace::new());
    }));

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let today = match &args.today {
        Some(date) => CalendarDate::parse(CalendarSystem::Gregorian, date)?.to_naive(),
        None => SystemToday.today(),
    };

    let controller = SelectionController::with_today(FixedToday(today))
        .grid_options(config.grid_options())
        .month_names(config.month_names);

    match args.cmd {
        Command::Convert { date, from } => {
            let date = CalendarDate::parse(from, &date)?;
            let other = date.convert();
            println!(
                "{}  {} ({})",
                other,
                long_date(&other, config.month_names),
                other.weekday()
            );
        }
        Command::Show {
            calendar,
            year,
            month,
            select,
        } => {
            let mut controller = controller.starting_in(calendar.unwrap_or(config.calendar));
            if let Some(select) = select {
                let (y, m, d) = parse_ymd(&select)?;
                controller.jump_to(y, m, d)?;
            }
            if year.is_some() || month.is_some() {
                let viewed = controller.viewed();
                controller.view_month(
                    year.unwrap_or_else(|| viewed.year()),
                    month.unwrap_or_else(|| viewed.month()),
                )?;
            }
            print_view(&controller, &config)?;
        }
        Command::Today => {
            let gc = CalendarDate::from_naive(CalendarSystem::Gregorian, today);
            println!(
                "{}  {}",
                long_date(&gc, config.month_names),
                long_date(&gc.convert(), config.month_names)
            );
        }
        Command::Session { restore } => {
            let mut controller = controller.starting_in(config.calendar);
            if let Some(record) = restore {
                if let Err(e) = controller.restore_json(&record) {
                    eprintln!("{}", e);
                }
            }
            run_session(controller, &config)?;
        }
    }

    Ok(())
}
