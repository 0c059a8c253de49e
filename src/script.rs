use crate::Connection;
use skiff_core::{Engine, Result, SqlWriter};

/// Splits a script on standalone case-insensitive GO lines. A GO pushes the
/// block accumulated so far, even when empty; a trailing block without GO is
/// kept when non-blank.
fn split_batches(script: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();
    let mut first = true;
    for line in script.lines() {
        if line.trim().eq_ignore_ascii_case("GO") {
            blocks.push(std::mem::take(&mut current));
            first = true;
            continue;
        }
        if !first {
            current.push('\n');
        }
        current.push_str(line);
        first = false;
    }
    if !current.trim().is_empty() {
        blocks.push(current);
    }
    blocks
}

impl<E: Engine> Connection<E> {
    /// Runs a script of GO-separated blocks as non-query commands, one block
    /// at a time, aborting the remaining blocks on the first failure.
    pub async fn run(&mut self, script: &str) -> Result<()> {
        for block in split_batches(script) {
            self.execute(&block).await?;
        }
        Ok(())
    }

    /// One command text from a sequence of commands.
    pub fn append_commands(&self, commands: &[&str]) -> String {
        let mut out = String::new();
        self.sql_writer().write_batch(&mut out, commands);
        out
    }
}
