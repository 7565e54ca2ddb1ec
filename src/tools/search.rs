//! Web search tool backed by DuckDuckGo HTML.

use async_trait::async_trait;

use super::Tool;

/// Search the web; the input is the raw query string.
pub struct WebSearch;

#[async_trait]
impl Tool for WebSearch {
    fn name(&self) -> &str {
        "Search"
    }

    fn description(&self) -> &str {
        "A web search engine. Use it for current events, facts, and anything not in your own knowledge. Input is the search query."
    }

    async fn call(&self, input: &str) -> anyhow::Result<String> {
        let query = input.trim();
        if query.is_empty() {
            return Ok("Search received an empty query.".to_string());
        }

        // DuckDuckGo HTML search, no API key needed
        let encoded_query = urlencoding::encode(query);
        let url = format!("https://html.duckduckgo.com/html/?q={}", encoded_query);

        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; reagent/0.1)")
            .build()?;

        let response = client.get(&url).send().await?;
        let html = response.text().await?;

        let results = extract_ddg_results(&html);

        if results.is_empty() {
            Ok(format!("No results found for: {}", query))
        } else {
            Ok(results.join("\n\n"))
        }
    }
}

/// Extract search results from DuckDuckGo HTML.
fn extract_ddg_results(html: &str) -> Vec<String> {
    let mut results = Vec::new();

    // Simple regex-free extraction over result divs
    for (i, chunk) in html.split("class=\"result__body\"").enumerate().skip(1) {
        if i > 5 {
            break;
        }

        let title = chunk
            .split("class=\"result__a\"")
            .nth(1)
            .and_then(|s| s.split('>').nth(1))
            .and_then(|s| s.split('<').next())
            .unwrap_or("No title");

        let snippet = chunk
            .split("class=\"result__snippet\"")
            .nth(1)
            .and_then(|s| s.split('>').nth(1))
            .and_then(|s| s.split('<').next())
            .unwrap_or("No snippet");

        let url = chunk
            .split("class=\"result__url\"")
            .nth(1)
            .and_then(|s| s.split('>').nth(1))
            .and_then(|s| s.split('<').next())
            .map(|s| s.trim())
            .unwrap_or("");

        if !title.is_empty() && title != "No title" {
            results.push(format!(
                "**{}**\n{}\nURL: {}",
                html_decode(title),
                html_decode(snippet),
                url
            ));
        }
    }

    results
}

/// Basic HTML entity decoding.
fn html_decode(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_title_snippet_and_url() {
        let html = r##"
            <div class="result__body">
                <a class="result__a" href="#">Rust &amp; Cargo</a>
                <a class="result__snippet" href="#">The Rust book</a>
                <a class="result__url" href="#"> rust-lang.org </a>
            </div>
        "##;

        let results = extract_ddg_results(html);
        assert_eq!(results.len(), 1);
        assert!(results[0].contains("Rust & Cargo"));
        assert!(results[0].contains("The Rust book"));
        assert!(results[0].contains("rust-lang.org"));
    }

    #[test]
    fn no_result_divs_yields_empty() {
        assert!(extract_ddg_results("<html><body>nothing</body></html>").is_empty());
    }
}
