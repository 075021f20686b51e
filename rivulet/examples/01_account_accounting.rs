mod common;
use common::get_connector;
use rivulet::Rivulet;
use rivulet_core::AccountingRequest;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Create connector (mock in CI when RIVULET_EXAMPLES_USE_MOCK is set).
    let connector = get_connector();

    // 2. Build the Rivulet router and register the connector.
    let rivulet = Rivulet::builder().with_connector(connector).build()?;

    // 3. Define the account and window we want accounting for.
    let account = "0x1111111111111111111111111111111111111111".parse()?;
    let req = AccountingRequest::new(vec![account], vec![137]).start(1_672_531_200);

    // 4. Fetch stream periods. Rivulet clips each one to the window and
    //    attaches its UTC-daily decomposition.
    println!("Fetching stream periods...");
    let report = rivulet.stream_periods(&req).await?;

    // 5. Print the per-day ledger.
    for period in &report.periods {
        println!(
            "{} -> {} ({} / chain {})",
            period.sender,
            period.receiver,
            period.token.symbol.as_deref().unwrap_or("?"),
            period.chain_id
        );
        for day in &period.daily_amounts {
            let units = day.amount_in_units(period.token.decimals)?;
            println!("  [{} .. {}) {units}", day.start_time, day.end_time);
        }
    }
    Ok(())
}
