//! Terminal I/O shell: screen clearing, validated integer input, and menu
//! selection. Everything is generic over `BufRead`/`Write` so the prompt
//! loops can be exercised with in-memory buffers.

use crate::menu::MenuRow;

use std::io::{self, BufRead, Write};

/// Clears the terminal and moves the cursor to the top-left corner.
pub fn clear_screen<W: Write>(output: &mut W) -> io::Result<()> {
    write!(output, "\x1b[2J\x1b[H")?;
    output.flush()
}

/// Reads an integer from `input`, re-prompting until the line parses and
/// falls within the given inclusive bounds. EOF is an error; invalid input
/// never is.
pub fn read_integer<R, W>(
    input: &mut R,
    output: &mut W,
    message: &str,
    min: Option<i64>,
    max: Option<i64>,
) -> io::Result<i64>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{}", message)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for a choice",
            ));
        }

        let value = match line.trim().parse::<i64>() {
            Ok(value) => value,
            Err(_) => {
                writeln!(output, "Input is not an integer")?;
                continue;
            }
        };

        if min.is_some_and(|bound| value < bound) || max.is_some_and(|bound| value > bound) {
            writeln!(output, "Pick a value from the list")?;
            continue;
        }

        return Ok(value);
    }
}

/// Prints a 1-based numbered menu and returns the value of the chosen row.
pub fn pick_from_menu<R, W, T>(
    input: &mut R,
    output: &mut W,
    rows: &[MenuRow<T>],
    message: &str,
) -> io::Result<T>
where
    R: BufRead,
    W: Write,
    T: Copy,
{
    if rows.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "nothing to choose from",
        ));
    }

    for (index, row) in rows.iter().enumerate() {
        writeln!(output, "{}) {}", index + 1, row.label)?;
    }

    let choice = read_integer(input, output, message, Some(1), Some(rows.len() as i64))?;
    Ok(rows[choice as usize - 1].value)
}
