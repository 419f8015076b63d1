//! Line commands of an interactive session, e.g. `3next`, `select 12`,
//! `jump 2015-13-06` or `toggle`.

use nom::{
    bytes::complete::take_while1,
    character::complete::digit1,
    combinator::opt,
    sequence::pair,
    IResult,
};

use crate::calendar::parse_ymd;
use crate::error::{Error, ErrorKind, Result};
use crate::selection::{SelectionController, Today};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    Noop,
    NextMonth(i32),
    PrevMonth(i32),
    NextYear(i32),
    PrevYear(i32),
    Toggle,
    Select(u32),
    Jump(i32, u32, u32),
    Pick(i32, u32, u32),
    Clear,
    Today,
    Save,
    Load(String),
    Help,
    Exit,
}

/// What the session should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Redraw,
    Print(String),
    Exit,
    Nothing,
}

pub const HELP: &str = "\
[N]next, [N]n        show the next month
[N]prev, [N]p        show the previous month
[N]next-year, [N]ny  show the same month of the next year
[N]prev-year, [N]py  show the same month of the previous year
toggle, t            switch between the Gregorian and Ethiopian calendar
select DAY, s DAY    select a day of the shown month
jump Y-M-D, j Y-M-D  select a date and show its month
pick Y-M-D           like jump, but clamps the day to the month length
today                select today
clear                drop the selection
save                 print the selection record
load JSON            restore a selection record
quit, q              end the session";

enum Action {
    Arg(fn(&str) -> Result<Cmd>),
    NoArg(fn() -> Cmd),
    Repeatable(fn(i32) -> Cmd),
}

const COMMANDS: &[(&str, Action)] = &[
    ("next", Action::Repeatable(Cmd::NextMonth)),
    ("n", Action::Repeatable(Cmd::NextMonth)),
    ("prev", Action::Repeatable(Cmd::PrevMonth)),
    ("p", Action::Repeatable(Cmd::PrevMonth)),
    ("next-year", Action::Repeatable(Cmd::NextYear)),
    ("ny", Action::Repeatable(Cmd::NextYear)),
    ("prev-year", Action::Repeatable(Cmd::PrevYear)),
    ("py", Action::Repeatable(Cmd::PrevYear)),
    ("toggle", Action::NoArg(|| Cmd::Toggle)),
    ("t", Action::NoArg(|| Cmd::Toggle)),
    (
        "select",
        Action::Arg(|arg| {
            arg.parse::<u32>().map(Cmd::Select).map_err(|_| {
                Error::new(ErrorKind::ParseError, &format!("'{}' is not a day", arg))
            })
        }),
    ),
    (
        "s",
        Action::Arg(|arg| {
            arg.parse::<u32>().map(Cmd::Select).map_err(|_| {
                Error::new(ErrorKind::ParseError, &format!("'{}' is not a day", arg))
            })
        }),
    ),
    (
        "jump",
        Action::Arg(|arg| {
            let (y, m, d) = parse_ymd(arg)?;
            Ok(Cmd::Jump(y, m, d))
        }),
    ),
    (
        "j",
        Action::Arg(|arg| {
            let (y, m, d) = parse_ymd(arg)?;
            Ok(Cmd::Jump(y, m, d))
        }),
    ),
    (
        "pick",
        Action::Arg(|arg| {
            let (y, m, d) = parse_ymd(arg)?;
            Ok(Cmd::Pick(y, m, d))
        }),
    ),
    ("clear", Action::NoArg(|| Cmd::Clear)),
    ("today", Action::NoArg(|| Cmd::Today)),
    ("save", Action::NoArg(|| Cmd::Save)),
    ("load", Action::Arg(|arg| Ok(Cmd::Load(arg.to_owned())))),
    ("help", Action::NoArg(|| Cmd::Help)),
    ("h", Action::NoArg(|| Cmd::Help)),
    ("quit", Action::NoArg(|| Cmd::Exit)),
    ("q", Action::NoArg(|| Cmd::Exit)),
];

fn command_name(input: &str) -> IResult<&str, (Option<&str>, &str)> {
    pair(
        opt(digit1),
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '-'),
    )(input)
}

pub fn parse_command(line: &str) -> Result<Cmd> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Cmd::Noop);
    }

    let (rest, (repeat, name)) = command_name(line)?;
    let arg = rest.trim();

    let action = COMMANDS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, act)| act)
        .ok_or_else(|| Error::new(ErrorKind::ParseError, &format!("Unknown command '{}'", name)))?;

    let misuse = || Error::new(ErrorKind::ParseError, &format!("Invalid use of '{}'", name));

    match action {
        Action::Repeatable(a) if arg.is_empty() => {
            let repeats = match repeat {
                Some(r) => r.parse::<i32>().map_err(|_| misuse())?,
                None => 1,
            };
            Ok(a(repeats))
        }
        Action::NoArg(a) if arg.is_empty() && repeat.is_none() => Ok(a()),
        Action::Arg(a) if !arg.is_empty() && repeat.is_none() => a(arg),
        _ => Err(misuse()),
    }
}

impl Cmd {
    pub fn apply<T: Today>(&self, controller: &mut SelectionController<T>) -> Result<Reply> {
        match self {
            Cmd::Noop => return Ok(Reply::Nothing),
            Cmd::NextMonth(n) => controller.navigate_month(*n)?,
            Cmd::PrevMonth(n) => controller.navigate_month(-*n)?,
            Cmd::NextYear(n) => controller.navigate_year(*n)?,
            Cmd::PrevYear(n) => controller.navigate_year(-*n)?,
            Cmd::Toggle => controller.toggle_calendar(),
            Cmd::Select(day) => controller.select_day(*day)?,
            Cmd::Jump(y, m, d) => controller.jump_to(*y, *m, *d)?,
            Cmd::Pick(y, m, d) => controller.pick(*y, *m, *d)?,
            Cmd::Clear => controller.clear_selection(),
            Cmd::Today => {
                let today = controller.today();
                controller.jump_to(today.year(), today.month(), today.day())?
            }
            Cmd::Save => {
                let json = match controller.to_record() {
                    Some(record) => record.to_json()?,
                    None => String::new(),
                };
                return Ok(Reply::Print(json));
            }
            Cmd::Load(json) => controller.restore_json(json)?,
            Cmd::Help => return Ok(Reply::Print(HELP.to_owned())),
            Cmd::Exit => return Ok(Reply::Exit),
        }

        Ok(Reply::Redraw)
    }
}
