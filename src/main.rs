use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use rtucal::calendar::{self, CalendarError, TimetableEvent};
use rtucal::months::semester_months;
use rtucal::parser::{ParseError, parse_study_year};
use rtucal::scraper::ScraperError;
use rtucal::types::SemesterChoice;
use rtucal::{PortalClient, menu, prompt};

#[derive(Parser)]
#[command(name = "rtucal")]
#[command(about = "Interactive nodarbibas.rtu.lv timetable exporter", long_about = None)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[arg(
        short = 'o',
        long = "output",
        default_value = "calendar_file.ics",
        help = "Path of the generated calendar file"
    )]
    output: PathBuf,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Scraper(#[from] ScraperError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("The portal returned no course years for this program")]
    NoCourseYears,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    let client = PortalClient::new().unwrap_or_else(|e| {
        log::error!("Error creating portal client: {}", e);
        process::exit(1);
    });

    let stdin = io::stdin();
    let stdout = io::stdout();

    if let Err(e) = run(&client, &cli.output, &mut stdin.lock(), &mut stdout.lock()).await {
        log::error!("{}", e);
        process::exit(1);
    }
}

/// Walks the portal's choice hierarchy, fetches the chosen group's events
/// and writes the calendar file. Every step threads the identifiers it
/// discovered into the next request.
async fn run<R, W>(
    client: &PortalClient,
    output_path: &Path,
    input: &mut R,
    output: &mut W,
) -> Result<(), AppError>
where
    R: BufRead,
    W: Write,
{
    log::info!("Fetching semester list from the portal...");
    let semesters = client.fetch_semesters().await?;
    let study_year = parse_study_year(&semesters)?;

    prompt::clear_screen(output)?;
    let semester_id = prompt::pick_from_menu(
        input,
        output,
        &menu::semester_rows(&semesters),
        "Pick a semester: ",
    )?;
    let semester = SemesterChoice {
        semester_id,
        study_year,
    };

    log::info!("Fetching faculties...");
    let faculties = client.fetch_faculties(semester.semester_id).await?;

    prompt::clear_screen(output)?;
    let faculty_index = prompt::pick_from_menu(
        input,
        output,
        &menu::faculty_rows(&faculties),
        "Pick a faculty: ",
    )?;

    prompt::clear_screen(output)?;
    let program_id = prompt::pick_from_menu(
        input,
        output,
        &menu::program_rows(&faculties[faculty_index].program),
        "Pick a course: ",
    )?;
    let program = semester.with_program(program_id);

    log::info!("Fetching course years...");
    let years = client.fetch_course_years(&program).await?;
    let (min_year, max_year) = match (years.iter().min(), years.iter().max()) {
        (Some(min), Some(max)) => (*min, *max),
        _ => return Err(AppError::NoCourseYears),
    };

    prompt::clear_screen(output)?;
    let course_id = prompt::read_integer(
        input,
        output,
        &format!("Pick a year {:?}: ", years),
        Some(min_year as i64),
        Some(max_year as i64),
    )? as i32;
    let course = program.with_course(course_id);

    log::info!("Fetching groups...");
    let groups = client.fetch_groups(&course).await?;

    prompt::clear_screen(output)?;
    let semester_program_id =
        prompt::pick_from_menu(input, output, &menu::group_rows(&groups), "Pick a group: ")?;
    let group = course.with_group(semester_program_id);

    prompt::clear_screen(output)?;
    if !client.is_published(group.semester_program_id).await? {
        writeln!(output, "Calendar not yet published. Please try again later...")?;
        return Ok(());
    }

    writeln!(output, "Creating file from events...")?;

    let mut events: Vec<TimetableEvent> = Vec::new();
    for query in semester_months(semester.semester_id, semester.study_year) {
        log::info!("Fetching events for {}-{:02}...", query.year, query.month);
        let batch = client
            .fetch_month_events(group.semester_program_id, query)
            .await?;
        log::debug!("Got {} events for {}-{:02}", batch.len(), query.year, query.month);

        for raw in &batch {
            events.push(calendar::resolve_event(raw)?);
        }
    }

    calendar::write_calendar_file(output_path, &events)?;

    writeln!(
        output,
        "In total {} events mapped. File {} created.",
        events.len(),
        output_path.display()
    )?;
    writeln!(output, "Exiting...")?;

    Ok(())
}
