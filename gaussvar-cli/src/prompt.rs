//! Interactive input of the p-wave basis layout and widths.
use std::{
    collections::VecDeque,
    io::{BufRead, Write},
    str::FromStr,
};

use anyhow::{bail, ensure, Context};
use gaussvar_core::basis::DirectionConfig;

/// Writes prompts and reads whitespace separated answers. Answers may be spread over lines
/// or several given on one line.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    pub fn prompt(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.output, "{message}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Parse the next answer as a `T`. `what` names the value in error messages.
    pub fn read<T>(&mut self, what: &str) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let token = self.next_token(what)?;
        token
            .parse()
            .with_context(|| format!("expected {what}, got {token:?}"))
    }

    fn next_token(&mut self, what: &str) -> anyhow::Result<String> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                bail!("input ended while waiting for {what}");
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }
}

/// Ask for the number of cartesian directions and the basis size along each of them.
pub fn read_direction_config<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<DirectionConfig> {
    prompter.prompt("Insert number of directions you want to use (1, 2 or 3)")?;
    let directions: i64 = prompter.read("the number of directions")?;
    ensure!(
        (1..=DirectionConfig::MAX_DIRECTIONS as i64).contains(&directions),
        "number of directions must be 1, 2 or 3, got {directions}"
    );

    let mut counts = Vec::with_capacity(directions as usize);
    for direction in 0..directions {
        prompter.prompt(&format!(
            "Insert number of wavefunctions you want to use for projection {direction}:"
        ))?;
        let count: i64 = prompter.read("a number of basis functions")?;
        ensure!(
            count >= 0,
            "number of basis functions for direction {direction} can't be negative, got {count}"
        );
        counts.push(count as usize);
    }

    Ok(DirectionConfig::new(counts)?)
}

/// Ask for `n` gaussian widths.
pub fn read_widths<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    n: usize,
) -> anyhow::Result<Vec<f64>> {
    prompter.prompt("Insert values of parameters of the gaussian basis")?;

    (0..n)
        .map(|index| -> anyhow::Result<f64> {
            let width: f64 = prompter.read("a gaussian width")?;
            ensure!(
                width.is_finite() && width > 0.0,
                "width {index} must be a positive number, got {width}"
            );
            Ok(width)
        })
        .collect()
}
