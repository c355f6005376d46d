//! Search dispatcher: per-pair fan-out, truncation and ranking.
//!
//! This module sends every candidate to every configured searcher,
//! isolates failures per (candidate, searcher) pair, caps each pair's
//! contribution, and returns one list ranked by `search_sort`.

pub mod dispatch;
pub mod ranking;
