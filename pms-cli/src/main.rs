#[macro_use]
extern crate clap;

use clap::ArgMatches;
use colored::*;
use log::LevelFilter;
use pms::{
    CaptureFormat, Channel, Cycle, Decoder, FrameCheck, Health, Level, Poller, Reading,
    Thresholds, DECODE_ERROR_LINE,
};
use std::io::{self, prelude::*};
use std::result;
use std::time::Duration;

const PROG_NAME: &str = crate_name!();

struct CliError(Option<String>);
type Result = result::Result<(), CliError>;

fn main() {
    if let Err(CliError(o)) = run() {
        if let Some(msg) = o {
            let _ = io::stdout().flush();
            eprintln!("\n{}: {}", PROG_NAME, msg);
        }
        std::process::exit(1);
    }
}

fn run() -> Result {
    let app_m = clap_app!(pms =>
        (version: crate_version!())
        (author: crate_authors!())
        (about: crate_description!())
        (@arg output: -o --output +takes_value default_value("putty.log")
            "Capture file written by the serial terminal")
        (@arg time: -t --time +takes_value default_value("1.01")
            "Polling interval in seconds")
        (@arg log: -l --log +takes_value default_value("convert.log")
            "Append-only log of every reading")
        (@arg format: -f --format +takes_value possible_values(&["binary", "hex"])
            default_value("binary") "How the capture stores the sensor's bytes")
        (@arg checksum: -c --checksum "Only accept complete packets with a valid checksum")
        (@arg pm1_limit: --("pm1-limit") +takes_value "PM1.0 risk threshold [default: 10]")
        (@arg pm25_limit: --("pm25-limit") +takes_value "PM2.5 risk threshold [default: 15]")
        (@arg pm10_limit: --("pm10-limit") +takes_value "PM10 risk threshold [default: 45]")
        (@arg plain: --plain "Print every cycle instead of redrawing in place")
        (@arg verbose: -v --verbose +multiple "Log diagnostics to stderr (repeat for more)")
    )
    .get_matches();

    init_logger(app_m.occurrences_of("verbose"));

    let interval = parse_interval(app_m.value_of("time").unwrap_or("1.01"))?;
    let decoder = Decoder::new(
        parse_value::<CaptureFormat>(&app_m, "format")?.unwrap_or_default(),
        if app_m.is_present("checksum") {
            FrameCheck::Checksum
        } else {
            FrameCheck::Fixed
        },
    );
    let thresholds = parse_thresholds(&app_m)?;

    let mut poller = Poller::new(
        app_m.value_of("output").unwrap_or("putty.log"),
        app_m.value_of("log").unwrap_or("convert.log"),
    )
    .decoder(decoder)
    .thresholds(thresholds);

    let mut console = Console::new(!app_m.is_present("plain"));
    poller.run(interval, |cycle| {
        // A closed stdout is not a reason to stop logging readings.
        let _ = console.display(&mut io::stdout(), cycle);
        Ok(())
    })?;
    Ok(())
}

impl std::convert::From<pms::Error> for CliError {
    fn from(err: pms::Error) -> CliError {
        match err {
            // 'Stop' does not need to report anything.
            pms::Error::Stop => CliError(None),
            e => CliError(Some(format!("{}", e))),
        }
    }
}

fn init_logger(verbosity: u64) {
    let level = match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Parse a polling interval given in (possibly fractional) seconds.
fn parse_interval(s: &str) -> result::Result<Duration, CliError> {
    match s.parse::<f64>() {
        Ok(secs) if secs >= 0.0 => Duration::try_from_secs_f64(secs).ok(),
        _ => None,
    }
    .ok_or_else(|| CliError(Some(format!("invalid polling interval: {}", s))))
}

fn parse_value<T>(m: &ArgMatches, name: &str) -> result::Result<Option<T>, CliError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match m.value_of(name) {
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|e| CliError(Some(format!("--{}: {}: {}", name, v, e)))),
        None => Ok(None),
    }
}

fn parse_thresholds(m: &ArgMatches) -> result::Result<Thresholds, CliError> {
    let default = Thresholds::default();
    Ok(Thresholds {
        pm1_0: parse_value(m, "pm1_limit")?.unwrap_or(default.pm1_0),
        pm2_5: parse_value(m, "pm25_limit")?.unwrap_or(default.pm2_5),
        pm10: parse_value(m, "pm10_limit")?.unwrap_or(default.pm10),
    })
}

const UP: &str = "\x1B[3A";
const CLR: &str = "\x1B[0K";

/// Renders each cycle as a HEALTH/INFO/STATUS block.
struct Console {
    redraw: bool,
    drawn: bool,
    last: Option<(Reading, Health)>,
}

impl Console {
    fn new(redraw: bool) -> Console {
        Console {
            redraw,
            drawn: false,
            last: None,
        }
    }

    fn display<W: Write>(&mut self, out: &mut W, cycle: &Cycle) -> io::Result<()> {
        let status = match cycle {
            Cycle::Reading { reading, health } => {
                self.last = Some((*reading, *health));
                "Receiving data...".normal()
            }
            Cycle::Failed(_) => DECODE_ERROR_LINE.red(),
        };

        let (up, clr) = if self.redraw { (UP, CLR) } else { ("", "") };
        if self.drawn {
            write!(out, "{}", up)?;
        }
        match &self.last {
            Some((reading, health)) => {
                writeln!(out, "{}{}", health_line(health), clr)?;
                writeln!(out, "{}{}", info_line(reading), clr)?;
            }
            None => {
                writeln!(out, "HEALTH | --{}", clr)?;
                writeln!(out, "INFO   | --{}", clr)?;
            }
        }
        writeln!(out, "STATUS | {}{}", status, clr)?;
        out.flush()?;
        self.drawn = true;
        Ok(())
    }
}

fn health_line(health: &Health) -> String {
    let levels: Vec<String> = Channel::ALL
        .iter()
        .map(|c| {
            let level = match health.get(*c) {
                Level::Safe => "SAFE".green(),
                Level::Risk => "RISK".red(),
            };
            format!("{}: {}", c, level)
        })
        .collect();
    format!("HEALTH | {}", levels.join(" | "))
}

fn info_line(reading: &Reading) -> String {
    format!(
        "INFO   | {}: {:<4}| {}: {:<4}| {}: {} || Unit: ug/m3",
        Channel::Pm1_0,
        reading.pm1_0,
        Channel::Pm2_5,
        reading.pm2_5,
        Channel::Pm10,
        reading.pm10
    )
}

#[test]
fn test_parse_interval() {
    assert_eq!(Some(Duration::from_millis(500)), parse_interval("0.5").ok());
    assert!(parse_interval("1.01").is_ok());
    assert_eq!(Some(Duration::from_secs(2)), parse_interval("2").ok());
    assert_eq!(Some(Duration::from_secs(0)), parse_interval("0").ok());
    assert!(parse_interval("-1").is_err());
    assert!(parse_interval("NaN").is_err());
    assert!(parse_interval("soon").is_err());
    assert!(parse_interval("inf").is_err());
    assert!(parse_interval("1e30").is_err());
}

#[test]
fn test_info_line() {
    assert_eq!(
        "INFO   | PM 1.0: 5   | PM 2.5: 20  | PM 10: 30 || Unit: ug/m3",
        info_line(&Reading::new(5, 20, 30))
    );
}

#[cfg(test)]
fn render(console: &mut Console, cycle: &Cycle) -> String {
    colored::control::set_override(false);
    let mut out = Vec::new();
    console.display(&mut out, cycle).unwrap();
    String::from_utf8(out).unwrap()
}

#[cfg(test)]
fn reading_cycle(reading: Reading) -> Cycle {
    Cycle::Reading {
        reading,
        health: reading.classify(&Thresholds::default()),
    }
}

#[test]
fn test_health_line() {
    colored::control::set_override(false);
    let health = Reading::new(3, 15, 44).classify(&Thresholds::default());
    assert_eq!(
        "HEALTH | PM 1.0: SAFE | PM 2.5: RISK | PM 10: SAFE",
        health_line(&health)
    );
}

// Nothing decoded yet:
#[test]
fn test_console_placeholder() {
    let mut console = Console::new(false);
    let failed = Cycle::Failed(pms::DecodeError {
        kind: pms::DecodeErrorKind::MarkerNotFound,
        offset: 0,
    });
    assert_eq!(
        "HEALTH | --\nINFO   | --\nSTATUS | Error! Bits are short... looping again...\n",
        render(&mut console, &failed)
    );
}

// A failed cycle keeps the last good reading on screen:
#[test]
fn test_console_keeps_last_reading() {
    let mut console = Console::new(false);
    let good = render(&mut console, &reading_cycle(Reading::new(5, 20, 30)));
    assert_eq!(
        "HEALTH | PM 1.0: SAFE | PM 2.5: RISK | PM 10: SAFE\n\
         INFO   | PM 1.0: 5   | PM 2.5: 20  | PM 10: 30 || Unit: ug/m3\n\
         STATUS | Receiving data...\n",
        good
    );

    let failed = Cycle::Failed(pms::DecodeError {
        kind: pms::DecodeErrorKind::SegmentTooShort(3),
        offset: 0x40,
    });
    let bad = render(&mut console, &failed);
    let lines: Vec<&str> = bad.lines().collect();
    assert_eq!(lines[..2], good.lines().collect::<Vec<_>>()[..2]);
    assert_eq!(lines[2], "STATUS | Error! Bits are short... looping again...");
}

// Redraws move the cursor back over the previous block:
#[test]
fn test_console_redraw() {
    let mut console = Console::new(true);
    let first = render(&mut console, &reading_cycle(Reading::new(1, 2, 3)));
    assert!(!first.starts_with(UP));
    assert!(first.lines().all(|l| l.ends_with(CLR)));

    let second = render(&mut console, &reading_cycle(Reading::new(1, 2, 3)));
    assert!(second.starts_with(UP));
    assert_eq!(&second[UP.len()..], first);
}
