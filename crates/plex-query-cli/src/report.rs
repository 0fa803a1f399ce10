use crate::output::{Output, ReportSection};
use color_eyre::eyre::{Result, WrapErr};
use plex_query_core::{get_library_section, list_clients, list_unwatched_movies, search_content, MOVIES_SECTION};
use plex_query_sources::MediaServer;
use serde_json::Value;
use tracing::info;

/// Keyword used for the search block of the report
pub const SEARCH_KEYWORD: &str = "transformers";

/// Run the four report blocks in fixed order. The first failure ends the run.
pub async fn run<S>(server: &S, output: &Output) -> Result<()>
where
    S: MediaServer + ?Sized,
{
    build_sections(server, |section| output.section(&section)).await?;
    info!("Report complete");
    Ok(())
}

/// Build each report block and hand it to `emit` as soon as it is ready, so
/// blocks already produced are still printed when a later query fails.
pub async fn build_sections<S, F>(server: &S, mut emit: F) -> Result<()>
where
    S: MediaServer + ?Sized,
    F: FnMut(ReportSection),
{
    let unwatched = list_unwatched_movies(server)
        .await
        .wrap_err("Failed to list unwatched movies")?;
    emit(unwatched_section(unwatched));

    let clients = list_clients(server)
        .await
        .wrap_err("Failed to list connected clients")?;
    let mut section = ReportSection::new("Connected Clients");
    for client in clients {
        section.push(client.to_string(), serde_json::to_value(&client)?);
    }
    emit(section);

    let results = search_content(server, SEARCH_KEYWORD)
        .await
        .wrap_err_with(|| format!("Failed to search for '{}'", SEARCH_KEYWORD))?;
    let mut section = ReportSection::new(format!("Search Results for '{}'", results.keyword()));
    for item in results {
        section.push(item.title.clone(), serde_json::to_value(&item)?);
    }
    emit(section);

    let library = get_library_section(server, MOVIES_SECTION)
        .await
        .wrap_err_with(|| format!("Failed to open library section '{}'", MOVIES_SECTION))?;
    let items = library
        .all()
        .await
        .wrap_err_with(|| format!("Failed to list items in '{}'", library.title()))?;
    let mut section = ReportSection::new(format!("Items in the '{}' Library Section", library.title()));
    for item in items {
        section.push(
            format!("{} (URL: {})", item.title, item.web_url),
            serde_json::to_value(&item)?,
        );
    }
    emit(section);

    Ok(())
}

fn unwatched_section(titles: Vec<String>) -> ReportSection {
    let mut section = ReportSection::new("Unwatched Movies");
    for title in titles {
        let item = Value::String(title.clone());
        section.push(title, item);
    }
    section
}
