//! Integration tests driving the console and demo through in-memory streams

use hashledger::blockchain::Blockchain;
use hashledger::cli::{run_demo, Console, OutputFormat, DEMO_PAYLOADS, SEPARATOR};
use hashledger::config::{ConsoleConfig, PayloadTrim};
use std::io::Cursor;

fn session(input: &[u8], config: ConsoleConfig) -> Result<(Blockchain, String), Box<dyn std::error::Error>> {
    let mut chain = Blockchain::new();
    let mut console = Console::new(Cursor::new(input.to_vec()), Vec::new(), config);
    console.run(&mut chain)?;
    Ok((chain, String::from_utf8(console.into_writer())?))
}

#[test]
fn test_append_then_print() -> Result<(), Box<dyn std::error::Error>> {
    let (chain, output) = session(b"1\nSend 1 BTC to Aceld\n2\n0\n", ConsoleConfig::default())?;

    assert_eq!(chain.len(), 2);
    let genesis_hash = hex::encode(chain.genesis().hash());
    let tip_hash = hex::encode(chain.tip().hash());

    let expected_listing = format!(
        "{sep}\nPrev.Hash : \nData : Genesis Block\nHash : {g}\n{sep}\n\
         {sep}\nPrev.Hash : {g}\nData : Send 1 BTC to Aceld\nHash : {t}\n{sep}\n",
        sep = SEPARATOR,
        g = genesis_hash,
        t = tip_hash
    );
    assert!(output.contains(&expected_listing));
    assert!(output.ends_with("Exited.\n"));
    Ok(())
}

#[test]
fn test_any_other_input_exits_immediately() -> Result<(), Box<dyn std::error::Error>> {
    for input in [&b"3\n1\nignored\n"[..], &b"exit\n"[..], &b"\n"[..], &b""[..]] {
        let (chain, output) = session(input, ConsoleConfig::default())?;
        assert_eq!(chain.len(), 1);
        assert!(!output.contains(SEPARATOR));
        assert_eq!(output.matches("Exited.").count(), 1);
    }
    Ok(())
}

#[test]
fn test_whitespace_trim_and_non_utf8_payload() -> Result<(), Box<dyn std::error::Error>> {
    let config = ConsoleConfig {
        payload_trim: PayloadTrim::Whitespace,
        ..ConsoleConfig::default()
    };
    let (chain, _) = session(b"1\n   padded   \n1\n\xff\xfe\n", config)?;

    assert_eq!(chain.blocks()[1].payload(), b"padded");
    assert_eq!(chain.blocks()[2].payload(), b"\xff\xfe");
    chain.verify()?;
    Ok(())
}

#[test]
fn test_demo_text_output() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = Blockchain::new();
    let mut out = Vec::new();
    run_demo(&mut chain, &DEMO_PAYLOADS, &mut out, OutputFormat::Text)?;
    let output = String::from_utf8(out)?;

    assert_eq!(chain.len(), 4);
    assert_eq!(output.matches("Prev.Hash : ").count(), 4);
    for payload in DEMO_PAYLOADS {
        assert!(output.contains(&format!("Data : {}\n", payload)));
    }
    assert!(output.ends_with("Chain verified: 4 blocks\n"));
    Ok(())
}
