//! Pure menu construction, separated from terminal I/O so the filtering and
//! labelling rules can be tested without a prompt loop.

use crate::types::{Faculty, Group, Program, Semester};

/// A printable menu row together with the value the row stands for. Rows are
/// renumbered after filtering; `value` carries the mapping back to the source
/// data, so callers never index the unfiltered list by row number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRow<T> {
    pub label: String,
    pub value: T,
}

pub fn semester_rows(semesters: &[Semester]) -> Vec<MenuRow<i32>> {
    semesters
        .iter()
        .map(|s| MenuRow {
            label: s.name.clone(),
            value: s.id,
        })
        .collect()
}

/// Rows for faculties with a display title; the value is the index into the
/// original slice so the chosen faculty's programs can be looked up.
pub fn faculty_rows(faculties: &[Faculty]) -> Vec<MenuRow<usize>> {
    faculties
        .iter()
        .enumerate()
        .filter_map(|(index, faculty)| {
            faculty.title_lv.as_deref().map(|title| MenuRow {
                label: capitalize(title),
                value: index,
            })
        })
        .collect()
}

pub fn program_rows(programs: &[Program]) -> Vec<MenuRow<i64>> {
    programs
        .iter()
        .filter_map(|program| {
            program.title_lv.as_deref().map(|title| {
                let label = match program.code.as_deref() {
                    Some(code) => format!("{} ({})", capitalize(title), code),
                    None => capitalize(title),
                };
                MenuRow {
                    label,
                    value: program.program_id,
                }
            })
        })
        .collect()
}

/// Rows for the group menu. A first entry whose display value is the literal
/// "0" is the portal's placeholder for "no group" and is dropped.
pub fn group_rows(groups: &[Group]) -> Vec<MenuRow<i64>> {
    let selectable = match groups.first() {
        Some(first) if first.group == "0" => &groups[1..],
        _ => groups,
    };

    selectable
        .iter()
        .map(|group| MenuRow {
            label: group.group.clone(),
            value: group.semester_program_id,
        })
        .collect()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
