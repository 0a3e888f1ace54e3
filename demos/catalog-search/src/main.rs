//! Catalog search binary
//!
//! Type to search the demo catalogue; results appear once typing pauses.
//! `:pick N` selects a result, `:drop N` deselects, `:clear`, `:clear-all`
//! and `:quit` do what they say.

use catalog_search::{Command, catalogue};
use cinelog_auth::{SessionConfig, SessionManager};
use cinelog_search::presets::{MOVIE_SEARCH_DEBOUNCE, movie_search_dropdown};
use cinelog_search::providers::StaticQueryProvider;
use cinelog_search::{QueryProvider, SearchEngine, SearchEvent, SearchListener};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "catalog_search=info,cinelog_search=info,cinelog_auth=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Cinelog Catalog Search ===\n");

    let config = SessionConfig::from_env()?;
    let sessions = SessionManager::from_config(&config, reqwest::Client::new());
    if sessions.verify_token().await {
        let name = sessions.user().map(|user| user.username).unwrap_or_default();
        println!("Signed in as {name}");
    } else {
        println!("Browsing anonymously ({})", config.api_base_url);
    }

    let listener = |event: &SearchEvent| match event {
        SearchEvent::Selected(item) => println!("  ✓ selected {}", item.name),
        SearchEvent::Cleared => println!("  ✗ cleared"),
        SearchEvent::SelectionChanged(_) | SearchEvent::Changed(_) => {}
    };
    let engine = movie_search_dropdown(StaticQueryProvider::new(catalogue()), listener, None);

    println!("Type a title (debounce {}ms), or :quit\n", MOVIE_SEARCH_DEBOUNCE.as_millis());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Type(text) => {
                engine.set_query_text(text).await?;
                tokio::time::sleep(MOVIE_SEARCH_DEBOUNCE + Duration::from_millis(50)).await;
                print_results(&engine).await;
            },
            Command::Pick(n) => match engine.results().await.into_iter().nth(n - 1) {
                Some(item) => {
                    engine.select_item(item).await?;
                },
                None => println!("  no result #{n}"),
            },
            Command::Drop(n) => match engine.selection().await.into_iter().nth(n - 1) {
                Some(item) => {
                    engine.remove_selection(item).await?;
                },
                None => println!("  no selection #{n}"),
            },
            Command::Clear => {
                engine.clear().await?;
            },
            Command::ClearAll => {
                engine.clear_all().await?;
            },
            Command::Quit => break,
            Command::Unknown(input) => println!("  unknown command {input}"),
        }
        print_selection(&engine).await;
    }

    tracing::info!("Shutting down search session");
    engine.shutdown(Duration::from_secs(1)).await?;
    Ok(())
}

async fn print_results<P, L>(engine: &SearchEngine<P, L>)
where
    P: QueryProvider,
    L: SearchListener,
{
    let results = engine.results().await;
    if results.is_empty() {
        println!("  (no results)");
    }
    for (n, item) in results.iter().enumerate() {
        let description = item.description.as_deref().unwrap_or_default();
        println!("  {:>2}. {:<28} {description}", n + 1, item.name);
    }
}

async fn print_selection<P, L>(engine: &SearchEngine<P, L>)
where
    P: QueryProvider,
    L: SearchListener,
{
    let names: Vec<String> = engine
        .selection()
        .await
        .into_iter()
        .map(|item| item.name)
        .collect();
    if !names.is_empty() {
        println!("  selection: {}", names.join(", "));
    }
}
