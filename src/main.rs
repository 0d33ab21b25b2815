use composectl::presentation::cli::CliApp;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logging is set up per run once the base directory is known
    let app = CliApp::new();
    app.run().await
}
