use edtrellis_core::{encode_query_string, parse_query_string, QueryParams};
use edtrellis_logging::trellis_trace;
use url::Url;

/// Reads and updates the query string of the visible URL.
pub trait Navigation {
    fn current_query(&self) -> QueryParams;
    /// Records a new history entry without reloading anything.
    fn push_query(&mut self, params: &QueryParams);
}

/// Browser-style history stack kept in memory.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Url>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(initial_url: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(initial_url)?;
        Ok(Self {
            entries: vec![url],
            index: 0,
        })
    }

    pub fn current_url(&self) -> &Url {
        &self.entries[self.index]
    }

    /// Moves one entry back and returns its query, or `None` at the start.
    pub fn back(&mut self) -> Option<QueryParams> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current_query())
    }

    /// Moves one entry forward and returns its query, or `None` at the end.
    pub fn forward(&mut self) -> Option<QueryParams> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current_query())
    }
}

impl Navigation for MemoryHistory {
    fn current_query(&self) -> QueryParams {
        parse_query_string(self.current_url().query().unwrap_or(""))
    }

    fn push_query(&mut self, params: &QueryParams) {
        let mut next = self.current_url().clone();
        if params.is_empty() {
            next.set_query(None);
        } else {
            next.set_query(Some(&encode_query_string(params)));
        }
        // Pushing the URL already on screen would only add a duplicate entry.
        if &next == self.current_url() {
            trellis_trace!("push_query: unchanged {}", next);
            return;
        }
        trellis_trace!("push_query: {}", next);
        self.entries.truncate(self.index + 1);
        self.entries.push(next);
        self.index += 1;
    }
}
