use std::io::{self, Write};

/// Writes `text` plus a newline, treating a closed pipe as success.
pub fn write_stdout_line(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write_line_tolerating_broken_pipe(&mut stdout, text)
}

fn write_line_tolerating_broken_pipe(writer: &mut dyn Write, text: &str) -> io::Result<()> {
    let written = writer
        .write_all(text.as_bytes())
        .and_then(|()| writer.write_all(b"\n"))
        .and_then(|()| writer.flush());
    match written {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(error) => Err(error),
    }
}
