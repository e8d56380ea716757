//! Interactive console and chain rendering.
//!
//! The console reads one command per line: `1` appends the next line as a
//! block payload, `2` prints every block, anything else ends the session.

use crate::blockchain::{Block, Blockchain};
use crate::config::ConsoleConfig;
use crate::crypto::hash_to_hex;
use crate::error::Result;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

/// Printed before and after every rendered block.
pub const SEPARATOR: &str = "=======================";

/// Payloads appended by the scripted demo run.
pub const DEMO_PAYLOADS: [&str; 3] = ["Send 1 BTC to Aceld", "Send 2 ETH to X", "Send 3 XRP to Y"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Append,
    Print,
    Exit,
}

impl Command {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => Command::Append,
            "2" => Command::Print,
            _ => Command::Exit,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn render_block<W: Write>(block: &Block, out: &mut W) -> Result<()> {
    writeln!(out, "{}", SEPARATOR)?;
    writeln!(out, "Prev.Hash : {}", hash_to_hex(block.previous_hash()))?;
    writeln!(out, "Data : {}", String::from_utf8_lossy(block.payload()))?;
    writeln!(out, "Hash : {}", hex::encode(block.hash()))?;
    writeln!(out, "{}", SEPARATOR)?;
    Ok(())
}

pub fn render_chain<W: Write>(chain: &Blockchain, out: &mut W) -> Result<()> {
    for block in chain {
        render_block(block, out)?;
    }
    Ok(())
}

/// Scripted counterpart of the interactive loop: append `payloads`, print the
/// chain in `format`, then verify it.
pub fn run_demo<W: Write>(
    chain: &mut Blockchain,
    payloads: &[&str],
    out: &mut W,
    format: OutputFormat,
) -> Result<()> {
    for payload in payloads {
        chain.append(payload);
    }

    match format {
        OutputFormat::Text => render_chain(chain, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, chain)?;
            writeln!(out)?;
        }
    }

    chain.verify()?;
    if format == OutputFormat::Text {
        writeln!(out, "Chain verified: {} blocks", chain.len())?;
    }
    Ok(())
}

pub struct Console<R, W> {
    reader: R,
    writer: W,
    config: ConsoleConfig,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W, config: ConsoleConfig) -> Self {
        Console {
            reader,
            writer,
            config,
        }
    }

    /// Runs commands against `chain` until an exit command or end of input.
    /// Returns the number of blocks appended during the session.
    pub fn run(&mut self, chain: &mut Blockchain) -> Result<usize> {
        info!("Console session started (chain length {})", chain.len());
        let mut appended = 0;

        loop {
            self.print_menu()?;
            let command = match self.read_line()? {
                Some(line) => Command::parse(&String::from_utf8_lossy(&line)),
                None => Command::Exit,
            };
            debug!("Command: {:?}", command);

            match command {
                Command::Append => {
                    writeln!(self.writer, "Enter record data")?;
                    self.writer.flush()?;
                    let Some(line) = self.read_line()? else {
                        debug!("Input closed while waiting for a payload");
                        writeln!(self.writer, "Exited.")?;
                        break;
                    };
                    chain.append(self.prepare_payload(&line));
                    appended += 1;
                }
                Command::Print => render_chain(chain, &mut self.writer)?,
                Command::Exit => {
                    writeln!(self.writer, "Exited.")?;
                    break;
                }
            }
        }
        self.writer.flush()?;

        match chain.verify() {
            Ok(()) => info!(
                "Console session ended: {} blocks appended, chain length {}",
                appended,
                chain.len()
            ),
            Err(e) => warn!("Chain failed verification at session end: {}", e),
        }
        Ok(appended)
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.writer, "Press '1' to append a record to the chain")?;
        writeln!(self.writer, "Press '2' to print the chain")?;
        writeln!(self.writer, "Press any other key to exit")?;
        self.writer.flush()?;
        Ok(())
    }

    /// `None` once the input is exhausted.
    fn read_line(&mut self) -> Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        if self.reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn prepare_payload<'a>(&self, line: &'a [u8]) -> &'a [u8] {
        let payload = self.config.payload_trim.apply(line);
        let limit = payload.len().min(self.config.max_payload_bytes);
        if limit < payload.len() {
            warn!(
                "Payload truncated from {} to {} bytes",
                payload.len(),
                limit
            );
        }
        &payload[..limit]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PayloadTrim;
    use std::io::Cursor;

    fn run_session(input: &str, config: ConsoleConfig) -> (Blockchain, String) {
        let mut chain = Blockchain::new();
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), config);
        console.run(&mut chain).unwrap();
        let output = String::from_utf8(console.into_writer()).unwrap();
        (chain, output)
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::parse("1"), Command::Append);
        assert_eq!(Command::parse(" 2\r\n"), Command::Print);
        assert_eq!(Command::parse("3"), Command::Exit);
        assert_eq!(Command::parse("12"), Command::Exit);
        assert_eq!(Command::parse(""), Command::Exit);
    }

    #[test]
    fn test_render_block_format() {
        let block = Block::with_timestamp(b"Genesis Block", None, 0);
        let mut out = Vec::new();
        render_block(&block, &mut out).unwrap();

        let expected = format!(
            "{sep}\nPrev.Hash : \nData : Genesis Block\nHash : {}\n{sep}\n",
            "8500b59bb5271135cd9bcbf0afd693028d76df3b9c7da58d412b13fc8a8f9394",
            sep = SEPARATOR
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_append_strips_line_ending() {
        let (chain, output) = run_session("1\nhello world\r\nq\n", ConsoleConfig::default());
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.tip().payload(), b"hello world");
        assert!(output.contains("Enter record data"));
        assert!(output.ends_with("Exited.\n"));
    }

    #[test]
    fn test_payload_is_truncated_to_limit() {
        let config = ConsoleConfig {
            max_payload_bytes: 4,
            ..ConsoleConfig::default()
        };
        let (chain, _) = run_session("1\nabcdefgh\n", config);
        assert_eq!(chain.tip().payload(), b"abcd");
    }

    #[test]
    fn test_keep_policy_preserves_terminator() {
        let config = ConsoleConfig {
            payload_trim: PayloadTrim::Keep,
            ..ConsoleConfig::default()
        };
        let (chain, _) = run_session("1\nraw\n", config);
        assert_eq!(chain.tip().payload(), b"raw\n");
    }

    #[test]
    fn test_eof_during_payload_appends_nothing() {
        let (chain, output) = run_session("1\n", ConsoleConfig::default());
        assert_eq!(chain.len(), 1);
        assert!(output.ends_with("Exited.\n"));
    }

    #[test]
    fn test_empty_line_is_an_empty_payload() {
        let (chain, _) = run_session("1\n\n", ConsoleConfig::default());
        assert_eq!(chain.len(), 2);
        assert!(chain.tip().payload().is_empty());
    }

    #[test]
    fn test_run_returns_appended_count() {
        let mut chain = Blockchain::new();
        let mut console = Console::new(
            Cursor::new(b"1\na\n1\nb\nx\n".to_vec()),
            Vec::new(),
            ConsoleConfig::default(),
        );
        assert_eq!(console.run(&mut chain).unwrap(), 2);
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn test_demo_json_output_parses() {
        let mut chain = Blockchain::new();
        let mut out = Vec::new();
        run_demo(&mut chain, &DEMO_PAYLOADS, &mut out, OutputFormat::Json).unwrap();

        let blocks: Vec<Block> = serde_json::from_slice(&out).unwrap();
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks, chain.blocks());
    }
}
