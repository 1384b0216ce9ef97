use fabank::app::App;
use fabank::config::KioskConfig;
use fabank::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // A broken config file falls back to the stock demo parameters
    let config = KioskConfig::load().unwrap_or_else(|err| {
        eprintln!("{}", err.user_message());
        KioskConfig::default()
    });

    let mut app = App::new(config)?;
    app.init()?;
    let result = app.run().await;
    app.restore()?;
    result
}
