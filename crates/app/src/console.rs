//! Line-oriented console I/O
//!
//! Wraps an input reader and an output writer so the menu can be driven
//! by stdin/stdout or by scripted buffers in tests.

use std::io::{self, BufRead, Write};

const CLEAR_SEQUENCE: &str = "\x1B[2J\x1B[1;1H";

const BANNER: &str = r"
  _   _ _ _ _               _     _   _       _       _
 | | | (_) | |__   ___ _ __| |_  | | | | ___ | |_ ___| |
 | |_| | | | '_ \ / _ \ '__| __| | |_| |/ _ \| __/ _ \ |
 |  _  | | | |_) |  __/ |  | |_  |  _  | (_) | ||  __/ |
 |_| |_|_|_|_.__/ \___|_|   \__| |_| |_|\___/ \__\___|_|

--> Welcome to the Infinite Hotel <--
Manage infinite guests with finite rooms using Hilbert's paradox of the Grand Hotel.
";

pub struct Console<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, clear_screen: bool) -> Self {
        Self {
            input,
            output,
            clear_screen,
        }
    }

    /// Writer for command output
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// Print a prompt and read one line, without the trailing newline
    ///
    /// Returns `None` once input is exhausted.
    pub fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Wait for Enter; `false` once input is exhausted
    pub fn pause(&mut self) -> io::Result<bool> {
        Ok(self.prompt("\nPress Enter to continue...")?.is_some())
    }

    /// Clear the terminal (if enabled) and print the banner
    pub fn refresh(&mut self) -> io::Result<()> {
        if self.clear_screen {
            write!(self.output, "{}", CLEAR_SEQUENCE)?;
        }
        writeln!(self.output, "{}", BANNER)?;
        self.output.flush()
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
