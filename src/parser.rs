use crate::types::Semester;

use scraper::{Html, Selector};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("Failed to parse number: {0}")]
    NumberParse(String),
}

/// Extracts the semester dropdown from the portal's front page.
///
/// The page carries a `<select id="semester-id">` whose options look like
/// `<option value="17">2022/2023 Rudens semestris (22/23-R)</option>`.
pub fn parse_semester_options(html: &str) -> Result<Vec<Semester>, ParseError> {
    let document = Html::parse_document(html);
    let option_selector = Selector::parse("select#semester-id option").unwrap();

    let mut semesters = Vec::new();

    for element in document.select(&option_selector) {
        let value = element
            .value()
            .attr("value")
            .ok_or_else(|| ParseError::MissingField("value attribute on option".to_string()))?;

        let id = value
            .trim()
            .parse::<i32>()
            .map_err(|_| ParseError::NumberParse(format!("semester id '{}'", value)))?;

        let name = normalize_whitespace(&element.text().collect::<String>());

        semesters.push(Semester { name, id });
    }

    if semesters.is_empty() {
        return Err(ParseError::MissingField(
            "select#semester-id options".to_string(),
        ));
    }

    Ok(semesters)
}

/// The first option's label starts with the academic year, e.g.
/// "2022/2023 Rudens semestris". Its first four characters are the study
/// year that month/year arithmetic is based on.
pub fn parse_study_year(semesters: &[Semester]) -> Result<i32, ParseError> {
    let first = semesters
        .first()
        .ok_or_else(|| ParseError::MissingField("semester list is empty".to_string()))?;

    let prefix: String = first.name.chars().take(4).collect();
    prefix
        .parse::<i32>()
        .map_err(|_| ParseError::NumberParse(format!("study year prefix '{}'", prefix)))
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
