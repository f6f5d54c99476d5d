//! Re-run a simulation with a couple of parameter overrides, then read a
//! result column back.
//!
//! Usage: `cargo run --example run -- <pipe-name> <table> <column>`
//!
//! Expects a simulation server already listening on the named local pipe.

use simwire_client::{Client, Replacement};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let pipe = args.next().unwrap_or_else(|| "apsimserver".to_string());
    let table = args.next().unwrap_or_else(|| "Report".to_string());
    let column = args.next().unwrap_or_else(|| "Yield".to_string());

    let mut client = Client::connect_pipe(&pipe).await?;
    client.set_read_timeout(Some(std::time::Duration::from_secs(300)));

    let changes = [
        Replacement::float64("[Wheat].SowingDensity", 150.0),
        Replacement::int32("[Clock].NumberOfYears", 3),
    ];
    client.run(&changes).await?;

    let outputs = client.read_output(&table, &[column.as_str()]).await?;
    println!("{}: {:?}", column, outputs[0].as_f64_array()?);

    client.shutdown().await?;
    Ok(())
}
