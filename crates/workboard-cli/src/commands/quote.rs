use clap::Args;
use workboard_core::config::data_dir;
use workboard_core::{DailyQuote, HttpQuoteProvider, QuoteProvider, StaticQuoteProvider};

use super::Context;

#[derive(Args)]
pub struct QuoteArgs {
    /// Use the built-in quotes without touching the network or the cache
    #[arg(long)]
    pub offline: bool,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn run(ctx: &Context, args: QuoteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = ctx.load_config()?;
    let today = ctx.now.date();

    let quote = if args.offline || config.quote.url.trim().is_empty() {
        StaticQuoteProvider::for_day(today).fetch()?
    } else {
        let daily = DailyQuote::new(
            Box::new(HttpQuoteProvider::new(&config.quote.url, config.quote_timeout())),
            Box::new(StaticQuoteProvider::for_day(today)),
            data_dir()?.join("quote_cache.json"),
            config.quote_policy(),
        );
        daily.quote_for(today)?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        println!("\"{}\"\n  -- {}", quote.text, quote.author);
    }
    Ok(())
}
