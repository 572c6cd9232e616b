//! Paper fetching from the arXiv API

pub mod arxiv;

pub use arxiv::{extract_entry_ids, ArxivClient};
