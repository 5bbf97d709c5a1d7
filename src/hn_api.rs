use crate::error::{PipelineError, excerpt};

/// Fetches the list document and then each of the first `num_stories` items, one after
/// another. The first failure aborts the run; nothing partial is returned.
pub(crate) async fn get_hackernews_top_stories(
    fetcher: &crate::fetch::Fetcher,
    config: &crate::config::Config,
) -> Result<Vec<crate::StoryRecord>, PipelineError> {
    let list_url = config.top_stories_url.as_str();

    let body = fetcher
        .fetch(list_url)
        .await
        .map_err(|source| PipelineError::ListFetch { source })?;
    let root = crate::json::decode(&body).map_err(|source| PipelineError::ListParse {
        url: list_url.to_string(),
        source,
    })?;

    let list_shape = |reason: String| PipelineError::ListShape {
        url: list_url.to_string(),
        reason,
        excerpt: excerpt(&body),
    };

    let Some(ids) = root.as_array() else {
        return Err(list_shape("top level is not an array".to_string()));
    };

    tracing::debug!(
        available = ids.len(),
        requested = config.num_stories,
        "Got top stories"
    );

    let mut stories = Vec::with_capacity(config.num_stories);

    for (index, rank) in (0..config.num_stories).zip(1..) {
        let id = match ids.get(index) {
            Some(element) => element.as_i64().ok_or_else(|| {
                list_shape(format!("element {index} is not an integer id: {element}"))
            })?,
            None => {
                return Err(list_shape(format!(
                    "only {} ids available, {} requested",
                    ids.len(),
                    config.num_stories
                )));
            }
        };

        stories.push(get_story(fetcher, config, id, rank).await?);
    }

    Ok(stories)
}

async fn get_story(
    fetcher: &crate::fetch::Fetcher,
    config: &crate::config::Config,
    id: i64,
    rank: usize,
) -> Result<crate::StoryRecord, PipelineError> {
    let url = config.item_url(id);

    let body = fetcher
        .fetch(&url)
        .await
        .map_err(|source| PipelineError::ItemFetch { id, source })?;
    let item = crate::json::decode(&body).map_err(|source| PipelineError::ItemParse {
        id,
        url: url.clone(),
        source,
    })?;

    if !item.is_object() {
        return Err(PipelineError::ItemShape {
            id,
            url,
            excerpt: excerpt(&body),
        });
    }

    let story = crate::StoryRecord {
        rank,
        id,
        title: crate::json::string_field(&item, "title"),
        url: crate::json::string_field(&item, "url"),
    };

    tracing::debug!(rank, id, title =? story.title, url =? story.url, "Got story");
    Ok(story)
}
