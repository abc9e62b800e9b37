//! Command line font tools: format conversion, glyph set diffs, SVG glyph
//! merging and outline cleanup.

use fontsmith::core;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli_args = core::platform::get_cli_args();
    if let Err(error) = core::run_app(cli_args).await {
        core::platform::handle_error(error);
    }
}
