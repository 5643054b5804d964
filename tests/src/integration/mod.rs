//! Cross-domain choreography tests. Every flow here talks through the
//! shared bus only; no test reaches into another domain directly.

mod batch_flow;
mod view_flow;
