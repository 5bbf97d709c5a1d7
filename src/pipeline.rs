//! One run of the digest: list fetch, item fetches, rendering.

pub(crate) struct Pipeline {
    config: crate::config::Config,
    fetcher: crate::fetch::Fetcher,
}

impl Pipeline {
    pub(crate) fn new(config: crate::config::Config) -> Result<Self, crate::error::FetchError> {
        let fetcher = crate::fetch::Fetcher::new(&config)?;
        Ok(Self { config, fetcher })
    }

    /// Returns the rendered digest. Either all stories are fetched or the run fails.
    pub(crate) async fn run(&self) -> Result<String, crate::error::PipelineError> {
        let stories = crate::hn_api::get_hackernews_top_stories(&self.fetcher, &self.config).await?;

        tracing::info!(
            num_stories = stories.len(),
            ids =? stories.iter().map(|s| s.id).collect::<Vec<_>>(),
            "Fetched stories"
        );

        Ok(crate::digest::create_digest(&stories))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount(server: &MockServer, route: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    fn pipeline_for(server: &MockServer, num_stories: usize) -> Pipeline {
        Pipeline::new(crate::config::Config {
            top_stories_url: format!("{}/v0/topstories.json", server.uri()),
            item_url_template: format!("{}/v0/item/{{id}}.json", server.uri()),
            num_stories,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_run_renders_digest() {
        let server = MockServer::start().await;
        mount(&server, "/v0/topstories.json", "[1,2,3]").await;
        mount(&server, "/v0/item/1.json", r#"{"title":"A","url":"http://a"}"#).await;
        mount(&server, "/v0/item/2.json", r#"{"title":"B"}"#).await;

        let digest = pipeline_for(&server, 2).run().await.unwrap();

        assert_eq!(digest, "1: A\n\t(http://a)\n\n2: B\n\t()");
    }

    #[tokio::test]
    async fn test_run_is_repeatable() {
        let server = MockServer::start().await;
        mount(&server, "/v0/topstories.json", "[8863, 121003]").await;
        mount(
            &server,
            "/v0/item/8863.json",
            r#"{"by":"dhouston","id":8863,"score":111,"title":"My YC app: Dropbox - Throw away your USB drive","type":"story","url":"http://www.getdropbox.com/u/2/screencast.html"}"#,
        )
        .await;
        mount(
            &server,
            "/v0/item/121003.json",
            r#"{"by":"tel","id":121003,"title":"Ask HN: The Arc Effect","type":"story"}"#,
        )
        .await;

        let pipeline = pipeline_for(&server, 2);
        let first = pipeline.run().await.unwrap();
        let second = pipeline.run().await.unwrap();

        assert_eq!(first, second);
        assert!(first.ends_with("2: Ask HN: The Arc Effect\n\t()"));
    }
}
