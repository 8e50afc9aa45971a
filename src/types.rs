use serde::Deserialize;

/// One entry of the portal's semester dropdown, built from the front page's
/// HTML rather than a JSON payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Semester {
    pub name: String,
    pub id: i32,
}

/// Faculty entry from `/findProgramsBySemesterId`. The portal pads the list
/// with title-less entries that must not be offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Faculty {
    #[serde(rename = "titleLV")]
    pub title_lv: Option<String>,
    #[serde(default)]
    pub program: Vec<Program>,
}

/// Study program nested under a faculty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Program {
    #[serde(rename = "titleLV")]
    pub title_lv: Option<String>,
    pub code: Option<String>,
    #[serde(rename = "programId")]
    pub program_id: i64,
}

/// Group entry from `/findGroupByCourseId`. `semester_program_id` is the key
/// the event feed and the publication check are addressed by.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Group {
    pub group: String,
    #[serde(rename = "semesterProgramId")]
    pub semester_program_id: i64,
}

/// Local wall-clock time of day, not timezone-qualified on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

/// One timetable entry as returned by `/getSemesterProgEventList`.
///
/// `event_date` is epoch milliseconds in UTC and only disambiguates which
/// local calendar day the wall-clock fields belong to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub event_temp_name: String,
    pub room_info_text: String,
    pub event_date: i64,
    pub custom_start: ClockTime,
    pub custom_end: ClockTime,
}

/// Identifiers accumulated while walking the portal's choice hierarchy.
/// Each step extends the previous step's context instead of mutating shared
/// state, so the data dependency between requests is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemesterChoice {
    pub semester_id: i32,
    pub study_year: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramChoice {
    pub semester: SemesterChoice,
    pub program_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseChoice {
    pub program: ProgramChoice,
    pub course_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupChoice {
    pub course: CourseChoice,
    pub semester_program_id: i64,
}

impl SemesterChoice {
    pub fn with_program(self, program_id: i64) -> ProgramChoice {
        ProgramChoice {
            semester: self,
            program_id,
        }
    }
}

impl ProgramChoice {
    pub fn with_course(self, course_id: i32) -> CourseChoice {
        CourseChoice {
            program: self,
            course_id,
        }
    }
}

impl CourseChoice {
    pub fn with_group(self, semester_program_id: i64) -> GroupChoice {
        GroupChoice {
            course: self,
            semester_program_id,
        }
    }
}
