//! Basic relay example: transform, listen, pause and flush.
//!
//! Run with:
//!     RUST_LOG=bufrelay=trace cargo run --example basic

use bufrelay::{BufferedRelay, EventKind, RelayConfig};
use bytes::Bytes;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Upper-case every chunk on the way in
    let config = RelayConfig::new().with_transform(|c: Bytes| c.to_ascii_uppercase());
    let mut relay = BufferedRelay::new(config);

    relay.on_data(|chunk| println!("data: {:?}", String::from_utf8_lossy(chunk)));
    relay.on_end(|| println!("end"));
    relay.on_complete(|text| println!("complete: {text:?}"));

    relay.write("hello ").write(b"world");

    // Writes while not writable are held back until resume
    relay.set_writable(false).write("!").write("?");
    println!("held back: {} bytes", relay.paused_cache().len());
    relay.set_writable(true).resume();

    // Deferred flush: fires after complete
    relay.ok();
    println!(
        "complete listeners before end: {}",
        relay.listener_count(EventKind::Complete)
    );
    relay.end();

    println!("\nBody: {:?}", relay.text());

    relay.out();
    println!("After out: {} bytes", relay.len());

    Ok(())
}
