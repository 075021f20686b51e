mod common;
use common::get_connector;
use rivulet::Rivulet;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let connector = get_connector();
    let rivulet = Rivulet::builder().with_connector(connector).build()?;

    let token = "0x00000000000000000000000000000000000000aa".parse()?;
    let meta = rivulet.token(137, &token).await?;

    println!(
        "{} = {} ({} decimals)",
        meta.address,
        meta.symbol.as_deref().unwrap_or("<unknown>"),
        meta.decimals
    );
    Ok(())
}
