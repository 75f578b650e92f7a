// ─────────────────────────────────────────────────────────────────────────────
//  Kashif - First Buyer Discovery
//
//  Kashif (كاشف): "The Revealer" - walks the ledger from a token's first
//  trading block and names the wallets that bought in first, then
//  cross-references them across tokens to surface repeat early buyers.
// ─────────────────────────────────────────────────────────────────────────────

use kashif::engine::Kashif;
use kashif::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    Kashif::run().await?;
    Ok(())
}
