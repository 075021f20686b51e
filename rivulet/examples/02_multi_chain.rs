mod common;
use common::get_connector;
use rivulet::Rivulet;
use rivulet_core::AccountingRequest;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let connector = get_connector();

    let rivulet = Rivulet::builder()
        .with_connector(connector)
        .request_timeout(std::time::Duration::from_secs(30))
        .build()?;

    let account = "0x1111111111111111111111111111111111111111".parse()?;
    // One request, several chains; a failing chain becomes a warning rather
    // than sinking the whole report.
    let req = AccountingRequest::new(vec![account], vec![1, 10, 137]);

    let report = rivulet.stream_periods(&req).await?;
    println!("{} periods", report.periods.len());
    for w in &report.warnings {
        eprintln!("warning: {w}");
    }

    for period in &report.periods {
        let total: i128 = period.daily_amounts.iter().map(|a| a.amount).sum();
        println!(
            "chain {}: {} days, net {} base units",
            period.chain_id,
            period.daily_amounts.len(),
            total
        );
    }
    Ok(())
}
