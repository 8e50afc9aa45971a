use crate::months::MonthQuery;
use crate::parser::{ParseError, parse_semester_options};
use crate::types::{CourseChoice, Faculty, Group, ProgramChoice, RawEvent, Semester};

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Client for the nodarbibas.rtu.lv timetable portal.
///
/// The portal serves one HTML page and a handful of form-encoded POST
/// endpoints returning JSON. Every call blocks the pipeline until it
/// completes; the steps are strictly ordered so there is nothing to overlap.
#[derive(Debug, Clone)]
pub struct PortalClient {
    client: Client,
    base_url: String,
}

impl PortalClient {
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            base_url: crate::BASE_URL.to_string(),
        })
    }

    /// Fetches the front page and extracts the semester dropdown.
    pub async fn fetch_semesters(&self) -> Result<Vec<Semester>, ScraperError> {
        let html = self
            .client
            .get(&self.base_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let semesters = parse_semester_options(&html)?;
        Ok(semesters)
    }

    pub async fn fetch_faculties(&self, semester_id: i32) -> Result<Vec<Faculty>, ScraperError> {
        self.post_form(
            "findProgramsBySemesterId",
            &[("semesterId", semester_id.to_string())],
        )
        .await
    }

    /// Returns the course years (1, 2, 3, ...) the chosen program runs for.
    pub async fn fetch_course_years(&self, choice: &ProgramChoice) -> Result<Vec<i32>, ScraperError> {
        self.post_form(
            "findCourseByProgramId",
            &[
                ("semesterId", choice.semester.semester_id.to_string()),
                ("programId", choice.program_id.to_string()),
            ],
        )
        .await
    }

    pub async fn fetch_groups(&self, choice: &CourseChoice) -> Result<Vec<Group>, ScraperError> {
        self.post_form(
            "findGroupByCourseId",
            &[
                (
                    "semesterId",
                    choice.program.semester.semester_id.to_string(),
                ),
                ("programId", choice.program.program_id.to_string()),
                ("courseId", choice.course_id.to_string()),
            ],
        )
        .await
    }

    /// Whether the timetable feed for the group has been published yet.
    pub async fn is_published(&self, semester_program_id: i64) -> Result<bool, ScraperError> {
        self.post_form(
            "isSemesterProgramPublished",
            &[("semesterProgramId", semester_program_id.to_string())],
        )
        .await
    }

    /// Fetches one month's worth of timetable events for a group.
    pub async fn fetch_month_events(
        &self,
        semester_program_id: i64,
        query: MonthQuery,
    ) -> Result<Vec<RawEvent>, ScraperError> {
        self.post_form(
            "getSemesterProgEventList",
            &[
                ("semesterProgramId", semester_program_id.to_string()),
                ("year", query.year.to_string()),
                ("month", query.month.to_string()),
            ],
        )
        .await
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, String)],
    ) -> Result<T, ScraperError> {
        let url = format!("{}/{}", self.base_url, path);
        let value = self
            .client
            .post(&url)
            .header("Accept", "text/html,*/*")
            .form(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(value)
    }
}
