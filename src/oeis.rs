//! Fetching sequences from the On-Line Encyclopedia of Integer Sequences.

use serde::Deserialize;
use tracing::debug;

use crate::error::FetchError;
use crate::sequence::{parse_b_file, SequenceSource};

const OEIS_URL: &str = "https://oeis.org";

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct SearchHit {
    pub number: u32,
    #[serde(default)]
    pub name: String,
}

impl SearchHit {
    pub fn id(&self) -> String {
        format!("A{:06}", self.number)
    }
}

/// The search endpoint has answered both with a bare list of hits and with
/// the list wrapped in an object; no hits comes back as `null`.
#[derive(Deserialize)]
#[serde(untagged)]
enum SearchReply {
    Hits(Vec<SearchHit>),
    Wrapped { results: Option<Vec<SearchHit>> },
}

pub fn b_file_url(number: u32) -> String {
    format!("{OEIS_URL}/A{number:06}/b{number:06}.txt")
}

pub fn fetch_b_file(number: u32) -> Result<SequenceSource, FetchError> {
    let url = b_file_url(number);
    debug!(%url, "fetching b-file");
    let text = ureq::get(&url).call()?.into_string()?;
    Ok(parse_b_file(&text)?)
}

/// Runs an OEIS search; hits come back in the site's ranking order.
pub fn search(query: &str) -> Result<Vec<SearchHit>, FetchError> {
    debug!(query, "searching OEIS");
    let text = ureq::get(&format!("{OEIS_URL}/search"))
        .query("q", query)
        .query("fmt", "json")
        .call()?
        .into_string()?;
    parse_search_reply(&text)
}

pub fn parse_search_reply(text: &str) -> Result<Vec<SearchHit>, FetchError> {
    let reply: Option<SearchReply> = serde_json::from_str(text)?;
    Ok(match reply {
        Some(SearchReply::Hits(hits)) => hits,
        Some(SearchReply::Wrapped { results }) => results.unwrap_or_default(),
        None => vec![],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_b_file_url() {
        assert_eq!(b_file_url(45), "https://oeis.org/A000045/b000045.txt");
    }

    #[test]
    fn test_parse_hit_list() {
        let text = r#"[{"number": 45, "id": "M0692", "data": "0,1,1,2", "name": "Fibonacci numbers"},
                       {"number": 108, "name": "Catalan numbers"}]"#;
        let hits = parse_search_reply(text).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id(), "A000045");
        assert_eq!(hits[1].name, "Catalan numbers");
    }

    #[test]
    fn test_parse_wrapped_reply() {
        let text = r#"{"greeting": "Greetings", "query": "fibonacci", "count": 1, "start": 0,
                       "results": [{"number": 45, "name": "Fibonacci numbers"}]}"#;
        assert_eq!(parse_search_reply(text).unwrap()[0].number, 45);
        let empty = r#"{"greeting": "Greetings", "count": 0, "results": null}"#;
        assert!(parse_search_reply(empty).unwrap().is_empty());
    }

    #[test]
    fn test_parse_no_hits() {
        assert!(parse_search_reply("null").unwrap().is_empty());
        assert!(matches!(parse_search_reply("<html>"), Err(FetchError::Json(_))));
    }
}
