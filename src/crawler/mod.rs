//! Crawler module for site fetching and orchestration
//!
//! This module contains the fetching side of the pipeline, including:
//! - The `FetchStrategy` seam and the scorer/link filter the strategies share
//! - Plain HTTP fetching with explicit timeouts
//! - Headless browser rendering as a fallback
//! - Per-site coordination and output

mod coordinator;
mod fetcher;
mod renderer;
mod strategy;

pub use coordinator::{build_strategies, run_harvest, summarize, Coordinator};
pub use fetcher::{build_http_client, fetch_body, DirectStrategy};
pub use renderer::{browser_args, RenderSession, RenderedStrategy};
pub use strategy::{Extractors, FetchStrategy};
