use std::io::{self, BufRead, Cursor, Stdin, StdinLock, Stdout, Write};

/// Input and output used by `read` and `write` statements.
pub trait Console {
    /// Next whitespace-delimited token, `None` at end of input.
    fn read_token(&mut self) -> io::Result<Option<String>>;
    /// Rest of the current input line, or the next line if nothing is left.
    fn read_line(&mut self) -> io::Result<Option<String>>;
    fn write(&mut self, text: &str) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}

/// Console over any buffered reader and writer. Input is consumed line by
/// line so a token read leaves the rest of its line for the next read.
pub struct StreamConsole<R, W> {
    input: R,
    output: W,
    pending: String,
    offset: usize,
}

impl<R: BufRead, W: Write> StreamConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: String::new(),
            offset: 0,
        }
    }

    fn remaining(&self) -> &str {
        &self.pending[self.offset..]
    }

    fn refill(&mut self) -> io::Result<bool> {
        self.pending.clear();
        self.offset = 0;
        Ok(self.input.read_line(&mut self.pending)? > 0)
    }
}

impl StreamConsole<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl StreamConsole<Cursor<Vec<u8>>, Vec<u8>> {
    /// In-memory console fed with `input`.
    pub fn memory(input: &str) -> Self {
        Self::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl<R: BufRead, W: Write> Console for StreamConsole<R, W> {
    fn read_token(&mut self) -> io::Result<Option<String>> {
        loop {
            let rest = self.remaining();
            let skipped = rest.len() - rest.trim_start().len();
            let start = self.offset + skipped;
            let token_len = self.pending[start..]
                .find(char::is_whitespace)
                .unwrap_or(self.pending.len() - start);

            if token_len > 0 {
                self.offset = start + token_len;
                return Ok(Some(self.pending[start..self.offset].to_string()));
            }
            if !self.refill()? {
                return Ok(None);
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        if self.remaining().trim().is_empty() && !self.refill()? {
            return Ok(None);
        }
        let line = self
            .remaining()
            .trim_start()
            .trim_end_matches(['\n', '\r'])
            .to_string();
        self.offset = self.pending.len();
        Ok(Some(line))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}

/// Prompts on stdout and reads one trimmed line from stdin.
pub fn prompt(stdin: &Stdin, message: &str) -> io::Result<Option<String>> {
    let mut stdout = io::stdout();
    stdout.write_all(message.as_bytes())?;
    stdout.flush()?;

    let mut answer = String::new();
    if stdin.read_line(&mut answer)? == 0 {
        return Ok(None);
    }
    Ok(Some(answer.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_span_lines() {
        let mut console = StreamConsole::memory("42  7\n\n  x\n");
        assert_eq!(console.read_token().unwrap().as_deref(), Some("42"));
        assert_eq!(console.read_token().unwrap().as_deref(), Some("7"));
        assert_eq!(console.read_token().unwrap().as_deref(), Some("x"));
        assert_eq!(console.read_token().unwrap(), None);
    }

    #[test]
    fn line_takes_the_rest_of_the_current_line() {
        let mut console = StreamConsole::memory("5 hello there\r\nnext line");
        assert_eq!(console.read_token().unwrap().as_deref(), Some("5"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("hello there"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("next line"));
        assert_eq!(console.read_line().unwrap(), None);
    }

    #[test]
    fn line_after_exhausted_token_reads_next_line() {
        let mut console = StreamConsole::memory("1\ntext here\n");
        console.read_token().unwrap();
        assert_eq!(console.read_line().unwrap().as_deref(), Some("text here"));
    }

    #[test]
    fn writes_are_collected() {
        let mut console = StreamConsole::memory("");
        console.write("a").unwrap();
        console.write("b").unwrap();
        console.flush().unwrap();
        assert_eq!(console.output(), "ab");
    }
}
