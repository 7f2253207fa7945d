//! Server command implementation

use anyhow::Result;

pub async fn cmd_serve(
    host: &str,
    port: u16,
    origins: Vec<String>,
    skip_pii_scan: bool,
) -> Result<()> {
    println!("🚀 Starting spendcoach web server...");
    println!("   Listening: http://{}:{}", host, port);
    if origins.is_empty() {
        println!("   CORS: same-origin only");
    } else {
        println!("   CORS origins: {}", origins.join(", "));
    }
    if std::env::var("OPENAI_API_KEY").is_ok() {
        println!("   🗣  Narrator: OpenAI backend configured");
    } else {
        println!("   🗣  Narrator: rule-based fallback (set OPENAI_API_KEY for LLM coaching)");
    }
    if skip_pii_scan {
        println!("   ⚠️  PII scan on upload DISABLED (--skip-pii-scan)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let config = spendcoach_server::ServerConfig {
        allowed_origins: origins,
        skip_pii_scan,
    };

    spendcoach_server::serve(host, port, config).await?;

    Ok(())
}
